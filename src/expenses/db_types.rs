use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use uuid::Uuid;

use crate::expenses::totals::{amount_from_decimal, amount_to_decimal};
use crate::schema::expenses as ExpensesTable;

/// A stored expense, as returned by `GET /expenses/all`.
///
/// `id` is whatever key the store assigned, kept as an opaque string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Expense {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Body of `POST /expenses/add`.
///
/// `date` is accepted so that clients sending it are not rejected, but the
/// server always stamps its own date on creation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// The row handed to a store on insert. The store assigns the id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateExpense {
    pub user_id: String,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Accepts string keys (uuid, text) and numeric keys (identity columns).
fn deserialize_opaque_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or numeric expense id, got {other}"
        ))),
    }
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = ExpensesTable)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub user_id: String,
    pub amount: BigDecimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ExpensesTable)]
pub struct CreateExpenseRecord {
    pub user_id: String,
    pub amount: BigDecimal,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = anyhow::Error;

    fn try_from(record: ExpenseRecord) -> Result<Self> {
        Ok(Self {
            id: record.id.to_string(),
            user_id: record.user_id,
            amount: amount_from_decimal(&record.amount)?,
            category: record.category,
            description: record.description,
            date: record.date,
        })
    }
}

impl TryFrom<CreateExpense> for CreateExpenseRecord {
    type Error = anyhow::Error;

    fn try_from(expense: CreateExpense) -> Result<Self> {
        Ok(Self {
            amount: amount_to_decimal(expense.amount)?,
            user_id: expense.user_id,
            category: expense.category,
            description: expense.description,
            date: expense.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn new_expense_accepts_missing_optionals() {
        let body: NewExpense =
            serde_json::from_value(json!({"amount": 12, "category": "rent"})).unwrap();

        assert_eq!(body.amount, 12.0);
        assert_eq!(body.category, "rent");
        assert!(body.description.is_none());
        assert!(body.date.is_none());
    }

    #[test]
    fn new_expense_rejects_non_numeric_amount() {
        let res =
            serde_json::from_value::<NewExpense>(json!({"amount": "12", "category": "rent"}));
        assert!(res.is_err());
    }

    #[test]
    fn new_expense_requires_category() {
        let res = serde_json::from_value::<NewExpense>(json!({"amount": 3.5}));
        assert!(res.is_err());
    }

    #[test]
    fn expense_serializes_date_as_calendar_day() {
        let expense = Expense {
            id: Uuid::nil().to_string(),
            user_id: "owner".to_string(),
            amount: 42.5,
            category: "food".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
        };

        let value = serde_json::to_value(&expense).unwrap();
        assert_eq!(value["date"], "2026-02-15");
        assert_eq!(value["amount"], 42.5);
        assert_eq!(value["description"], serde_json::Value::Null);
    }

    #[test]
    fn record_conversion_keeps_amount() {
        let record = ExpenseRecord {
            id: Uuid::nil(),
            user_id: "owner".to_string(),
            amount: BigDecimal::from_str("19.99").unwrap(),
            category: "books".to_string(),
            description: Some("paperback".to_string()),
            date: NaiveDate::from_ymd_opt(2026, 1, 3).unwrap(),
        };

        let expense = Expense::try_from(record).unwrap();
        assert_eq!(expense.id, Uuid::nil().to_string());
        assert_eq!(expense.amount, 19.99);
        assert_eq!(expense.description.as_deref(), Some("paperback"));
    }

    #[test]
    fn expense_id_is_opaque() {
        let row = json!({
            "id": 7,
            "user_id": "owner",
            "amount": 3.5,
            "category": "food",
            "description": null,
            "date": "2026-02-14",
            "created_at": "2026-02-14T08:00:00+00:00"
        });
        let numeric: Expense = serde_json::from_value(row.clone()).unwrap();
        assert_eq!(numeric.id, "7");

        let mut keyed = row;
        keyed["id"] = json!("6f1c1d0e-2a57-4d8e-9a57-0d6a1c1b2e3f");
        let textual: Expense = serde_json::from_value(keyed).unwrap();
        assert_eq!(textual.id, "6f1c1d0e-2a57-4d8e-9a57-0d6a1c1b2e3f");

        assert_eq!(serde_json::to_value(&numeric).unwrap()["id"], "7");
    }

    #[test]
    fn expense_id_rejects_structured_values() {
        let row = json!({
            "id": {"nested": true},
            "user_id": "owner",
            "amount": 3.5,
            "category": "food",
            "date": "2026-02-14"
        });
        assert!(serde_json::from_value::<Expense>(row).is_err());
    }
}
