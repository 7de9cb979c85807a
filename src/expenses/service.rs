use std::sync::Arc;

use anyhow::Result;

use crate::expenses::clock::{Clock, MonthRange};
use crate::expenses::db_types::{CreateExpense, Expense, NewExpense};
use crate::expenses::store::ExpenseStore;
use crate::expenses::totals::sum_amounts;

/// The five expense operations. Every call is scoped to one owner and makes
/// exactly one store round trip.
#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    pub fn new(store: Arc<dyn ExpenseStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Records a new expense dated today. A date in the payload is ignored.
    pub async fn create(&self, owner: &str, new_expense: NewExpense) -> Result<()> {
        let today = self.clock.today();
        if let Some(requested) = new_expense.date.filter(|requested| *requested != today) {
            tracing::debug!(%requested, %today, "ignoring client supplied expense date");
        }

        let expense = CreateExpense {
            user_id: owner.to_string(),
            amount: new_expense.amount,
            category: new_expense.category,
            description: new_expense.description,
            date: today,
        };

        self.store.insert(expense).await?;
        tracing::debug!(owner, "expense added");

        Ok(())
    }

    pub async fn list_all(&self, owner: &str) -> Result<Vec<Expense>> {
        let expenses = self.store.list_by_owner(owner).await?;
        tracing::debug!(owner, count = expenses.len(), "listed expenses");

        Ok(expenses)
    }

    pub async fn sum_today(&self, owner: &str) -> Result<f64> {
        let today = self.clock.today();
        let amounts = self.store.amounts_on(owner, today).await?;
        let total = sum_amounts(amounts)?;
        tracing::debug!(owner, %today, total, "computed today total");

        Ok(total)
    }

    pub async fn sum_month(&self, owner: &str) -> Result<f64> {
        let month = MonthRange::containing(self.clock.today())?;
        let amounts = self.store.amounts_within(owner, month).await?;
        let total = sum_amounts(amounts)?;
        tracing::debug!(owner, month = %month.prefix(), total, "computed month total");

        Ok(total)
    }

    /// Deleting an id that does not exist, or that belongs to another owner,
    /// succeeds without removing anything.
    pub async fn delete_one(&self, owner: &str, expense_id: &str) -> Result<()> {
        let removed = self.store.delete(owner, expense_id).await?;
        if removed == 0 {
            tracing::debug!(owner, expense_id, "no expense matched delete");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expenses::clock::FixedClock;
    use crate::expenses::memory::MemoryStore;
    use chrono::NaiveDate;
    use uuid::Uuid;

    const OWNER: &str = "00000000-0000-0000-0000-000000000000";

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(owner: &str, amount: f64, date: NaiveDate) -> Expense {
        Expense {
            id: Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            amount,
            category: "misc".to_string(),
            description: None,
            date,
        }
    }

    fn service_at(today: NaiveDate, rows: Vec<Expense>) -> (ExpenseService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_rows(rows));
        let service = ExpenseService::new(store.clone(), Arc::new(FixedClock(today)));
        (service, store)
    }

    fn payload(amount: f64, category: &str, date: Option<NaiveDate>) -> NewExpense {
        NewExpense {
            amount,
            category: category.to_string(),
            description: None,
            date,
        }
    }

    #[tokio::test]
    async fn create_stamps_server_date_over_payload_date() {
        let (service, store) = service_at(ymd(2026, 2, 14), Vec::new());

        service
            .create(OWNER, payload(9.0, "coffee", Some(ymd(1999, 12, 31))))
            .await
            .unwrap();

        let rows = store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, ymd(2026, 2, 14));
        assert_eq!(rows[0].user_id, OWNER);
    }

    #[tokio::test]
    async fn created_expense_round_trips_through_list() {
        let (service, _) = service_at(ymd(2026, 2, 14), Vec::new());

        service.create(OWNER, payload(42.5, "food", None)).await.unwrap();

        let listed = service.list_all(OWNER).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, 42.5);
        assert_eq!(listed[0].category, "food");
        assert_eq!(listed[0].date, ymd(2026, 2, 14));
    }

    #[tokio::test]
    async fn list_orders_by_date_descending() {
        let rows = vec![
            expense(OWNER, 1.0, ymd(2026, 2, 10)),
            expense(OWNER, 2.0, ymd(2026, 2, 12)),
            expense(OWNER, 3.0, ymd(2026, 2, 11)),
        ];
        let (service, _) = service_at(ymd(2026, 2, 14), rows);

        let dates: Vec<NaiveDate> = service
            .list_all(OWNER)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.date)
            .collect();

        assert_eq!(dates, vec![ymd(2026, 2, 12), ymd(2026, 2, 11), ymd(2026, 2, 10)]);
    }

    #[tokio::test]
    async fn list_is_empty_for_unknown_owner() {
        let rows = vec![expense(OWNER, 1.0, ymd(2026, 2, 10))];
        let (service, _) = service_at(ymd(2026, 2, 14), rows);

        assert!(service.list_all("someone-else").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn today_total_is_zero_without_matches() {
        let rows = vec![expense(OWNER, 8.0, ymd(2026, 2, 13))];
        let (service, _) = service_at(ymd(2026, 2, 14), rows);

        assert_eq!(service.sum_today(OWNER).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn today_total_sums_only_todays_amounts() {
        let rows = vec![
            expense(OWNER, 4.25, ymd(2026, 2, 14)),
            expense(OWNER, 0.75, ymd(2026, 2, 14)),
            expense(OWNER, 100.0, ymd(2026, 2, 13)),
            expense("someone-else", 50.0, ymd(2026, 2, 14)),
        ];
        let (service, _) = service_at(ymd(2026, 2, 14), rows);

        assert_eq!(service.sum_today(OWNER).await.unwrap(), 5.0);
    }

    #[tokio::test]
    async fn month_total_excludes_same_month_of_other_years() {
        let rows = vec![
            expense(OWNER, 10.0, ymd(2026, 2, 1)),
            expense(OWNER, 5.0, ymd(2026, 2, 15)),
            expense(OWNER, 100.0, ymd(2025, 2, 15)),
        ];
        let (service, _) = service_at(ymd(2026, 2, 20), rows);

        assert_eq!(service.sum_month(OWNER).await.unwrap(), 15.0);
    }

    #[tokio::test]
    async fn month_total_is_zero_for_empty_month() {
        let rows = vec![expense(OWNER, 10.0, ymd(2026, 2, 28))];
        let (service, _) = service_at(ymd(2026, 3, 1), rows);

        assert_eq!(service.sum_month(OWNER).await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn delete_removes_owned_expense() {
        let target = expense(OWNER, 3.0, ymd(2026, 2, 10));
        let (service, store) = service_at(ymd(2026, 2, 14), vec![target.clone()]);

        service.delete_one(OWNER, &target.id).await.unwrap();

        assert!(store.rows().await.is_empty());
    }

    #[tokio::test]
    async fn delete_with_wrong_owner_keeps_expense() {
        let target = expense(OWNER, 3.0, ymd(2026, 2, 10));
        let (service, store) = service_at(ymd(2026, 2, 14), vec![target.clone()]);

        service.delete_one("someone-else", &target.id).await.unwrap();

        assert_eq!(store.rows().await, vec![target]);
    }

    #[tokio::test]
    async fn delete_of_missing_id_succeeds() {
        let (service, _) = service_at(ymd(2026, 2, 14), Vec::new());

        assert!(service.delete_one(OWNER, "42").await.is_ok());
    }
}
