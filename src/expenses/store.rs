use anyhow::Result;
use axum::async_trait;
use chrono::NaiveDate;

use crate::expenses::clock::MonthRange;
use crate::expenses::db_types::{CreateExpense, Expense};

/// Name of the remote table every backend reads and writes.
pub const EXPENSES_TABLE: &str = "expenses";

/// Handle to the `expenses` table. Each call is one round trip to the store.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    async fn insert(&self, expense: CreateExpense) -> Result<()>;

    /// All of the owner's expenses, newest date first. Order among expenses
    /// sharing a date is whatever the store returns.
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Expense>>;

    /// Amounts of the owner's expenses dated exactly `day`.
    async fn amounts_on(&self, owner: &str, day: NaiveDate) -> Result<Vec<f64>>;

    /// Amounts of the owner's expenses dated within `month`.
    async fn amounts_within(&self, owner: &str, month: MonthRange) -> Result<Vec<f64>>;

    /// Deletes the expense only if it belongs to `owner`. Returns the number of
    /// rows removed; an id the store cannot match removes nothing.
    async fn delete(&self, owner: &str, expense_id: &str) -> Result<usize>;
}
