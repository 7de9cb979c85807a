use anyhow::{Context, Result};
use axum::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::expenses::clock::MonthRange;
use crate::expenses::db_types::{CreateExpense, CreateExpenseRecord, Expense, ExpenseRecord};
use crate::expenses::store::ExpenseStore;
use crate::expenses::totals::amount_from_decimal;
use crate::schema::expenses as ExpensesTable;
use crate::utils::commons::{DbConn, DbPool};
use crate::utils::db::{build_pool, get_conn};

pub fn insert_expense(conn: DbConn<'_>, record: &CreateExpenseRecord) -> Result<()> {
    diesel::insert_into(ExpensesTable::table)
        .values(record)
        .execute(conn)?;

    Ok(())
}

pub fn list_expenses(conn: DbConn<'_>, owner: &str) -> Result<Vec<ExpenseRecord>> {
    use crate::schema::expenses::dsl::*;

    let rows = expenses
        .filter(user_id.eq(owner))
        .order(date.desc())
        .select(ExpenseRecord::as_select())
        .load(conn)?;

    Ok(rows)
}

pub fn amounts_on_day(conn: DbConn<'_>, owner: &str, day: NaiveDate) -> Result<Vec<BigDecimal>> {
    use crate::schema::expenses::dsl::*;

    let rows = expenses
        .filter(user_id.eq(owner).and(date.eq(day)))
        .select(amount)
        .load::<BigDecimal>(conn)?;

    Ok(rows)
}

pub fn amounts_between(
    conn: DbConn<'_>,
    owner: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<BigDecimal>> {
    use crate::schema::expenses::dsl::*;

    let rows = expenses
        .filter(user_id.eq(owner))
        .filter(date.ge(start).and(date.lt(end)))
        .select(amount)
        .load::<BigDecimal>(conn)?;

    Ok(rows)
}

pub fn delete_expense(conn: DbConn<'_>, owner: &str, expense_id: Uuid) -> Result<usize> {
    use crate::schema::expenses::dsl::*;

    let removed = diesel::delete(expenses.filter(id.eq(expense_id).and(user_id.eq(owner))))
        .execute(conn)?;

    Ok(removed)
}

/// `expenses` table reached over a direct Postgres connection.
#[derive(Clone)]
pub struct PostgresStore {
    pool: DbPool,
}

impl PostgresStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str) -> Result<Self> {
        Ok(Self::new(build_pool(database_url)?))
    }

    /// Diesel is blocking, so every query runs on the blocking thread pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(DbConn<'_>) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = get_conn(&pool)?;
            op(&mut conn)
        })
        .await
        .context("postgres task was aborted")?
    }
}

fn decimals_to_amounts(rows: Vec<BigDecimal>) -> Result<Vec<f64>> {
    rows.iter().map(amount_from_decimal).collect()
}

/// Keys in this table are uuids; any other id cannot match a row.
fn parse_expense_id(expense_id: &str) -> Option<Uuid> {
    Uuid::parse_str(expense_id).ok()
}

#[async_trait]
impl ExpenseStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, expense: CreateExpense) -> Result<()> {
        let record = CreateExpenseRecord::try_from(expense)?;

        self.with_conn(move |conn| insert_expense(conn, &record))
            .await
            .context("failed to insert expense")
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Expense>> {
        let owner = owner.to_owned();
        let rows = self
            .with_conn(move |conn| list_expenses(conn, &owner))
            .await
            .context("failed to list expenses")?;

        rows.into_iter().map(Expense::try_from).collect()
    }

    async fn amounts_on(&self, owner: &str, day: NaiveDate) -> Result<Vec<f64>> {
        let owner = owner.to_owned();
        let rows = self
            .with_conn(move |conn| amounts_on_day(conn, &owner, day))
            .await
            .context("failed to select amounts for day")?;

        decimals_to_amounts(rows)
    }

    async fn amounts_within(&self, owner: &str, month: MonthRange) -> Result<Vec<f64>> {
        let owner = owner.to_owned();
        let rows = self
            .with_conn(move |conn| amounts_between(conn, &owner, month.start, month.end))
            .await
            .context("failed to select amounts for month")?;

        decimals_to_amounts(rows)
    }

    async fn delete(&self, owner: &str, expense_id: &str) -> Result<usize> {
        let Some(expense_id) = parse_expense_id(expense_id) else {
            tracing::debug!(expense_id, "expense id is not a uuid, nothing to delete");
            return Ok(0);
        };
        let owner = owner.to_owned();

        self.with_conn(move |conn| delete_expense(conn, &owner, expense_id))
            .await
            .context("failed to delete expense")
    }
}
