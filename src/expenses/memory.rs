use anyhow::Result;
use axum::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::expenses::clock::MonthRange;
use crate::expenses::db_types::{CreateExpense, Expense};
use crate::expenses::store::ExpenseStore;

/// In-process `expenses` table for local runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Expense>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Expense>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Snapshot of every row, in insertion order.
    pub async fn rows(&self) -> Vec<Expense> {
        self.rows.read().await.clone()
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, expense: CreateExpense) -> Result<()> {
        let row = Expense {
            id: Uuid::new_v4().to_string(),
            user_id: expense.user_id,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date,
        };

        self.rows.write().await.push(row);
        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Expense>> {
        let mut owned: Vec<Expense> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.user_id == owner)
            .cloned()
            .collect();

        owned.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(owned)
    }

    async fn amounts_on(&self, owner: &str, day: NaiveDate) -> Result<Vec<f64>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.user_id == owner && row.date == day)
            .map(|row| row.amount)
            .collect())
    }

    async fn amounts_within(&self, owner: &str, month: MonthRange) -> Result<Vec<f64>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|row| row.user_id == owner && month.contains(row.date))
            .map(|row| row.amount)
            .collect())
    }

    async fn delete(&self, owner: &str, expense_id: &str) -> Result<usize> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| !(row.id == expense_id && row.user_id == owner));

        Ok(before - rows.len())
    }
}
