use anyhow::{Context, Result};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

use crate::utils::commons::DbPool;

pub fn build_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .build(manager)
        .context("failed to build postgres connection pool")?;

    Ok(pool)
}

pub fn get_conn(pool: &DbPool) -> Result<PooledConnection<ConnectionManager<PgConnection>>> {
    let conn = pool.get().context("failed to acquire postgres connection")?;

    Ok(conn)
}
