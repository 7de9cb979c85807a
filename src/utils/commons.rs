use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool, PooledConnection},
};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConn<'db> = &'db mut PooledConnection<ConnectionManager<PgConnection>>;
