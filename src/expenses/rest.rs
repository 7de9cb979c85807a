use std::time::Duration;

use anyhow::{Context, Result, bail};
use axum::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;

use crate::expenses::clock::MonthRange;
use crate::expenses::db_types::{CreateExpense, Expense};
use crate::expenses::store::{EXPENSES_TABLE, ExpenseStore};

type Query = Vec<(&'static str, String)>;

#[derive(Deserialize)]
struct AmountRow {
    amount: f64,
}

/// `expenses` table exposed through a hosted PostgREST API (Supabase).
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client for the table API")?;

        Ok(Self {
            client,
            table_url: table_url(base_url),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, query: &Query) -> RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .query(query)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select_amounts(&self, query: Query) -> Result<Vec<f64>> {
        let response = self.request(Method::GET, &query).send().await?;
        let rows = ensure_success(response)
            .await?
            .json::<Vec<AmountRow>>()
            .await?;

        Ok(rows.into_iter().map(|row| row.amount).collect())
    }
}

pub fn table_url(base_url: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), EXPENSES_TABLE)
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn day(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn list_query(owner: &str) -> Query {
    vec![
        ("select", "*".to_string()),
        ("user_id", eq(owner)),
        ("order", "date.desc".to_string()),
    ]
}

pub fn amounts_on_query(owner: &str, on: NaiveDate) -> Query {
    vec![
        ("select", "amount".to_string()),
        ("user_id", eq(owner)),
        ("date", eq(day(on))),
    ]
}

pub fn amounts_within_query(owner: &str, month: MonthRange) -> Query {
    vec![
        ("select", "amount".to_string()),
        ("user_id", eq(owner)),
        ("date", format!("gte.{}", day(month.start))),
        ("date", format!("lt.{}", day(month.end))),
    ]
}

pub fn delete_query(owner: &str, expense_id: &str) -> Query {
    vec![
        ("id", eq(expense_id)),
        ("user_id", eq(owner)),
        ("select", "id".to_string()),
    ]
}

/// Turns a non-2xx reply into an error carrying the API's message body.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    bail!("table API responded with {status}: {body}")
}

#[async_trait]
impl ExpenseStore for RestStore {
    fn backend(&self) -> &'static str {
        "rest"
    }

    async fn insert(&self, expense: CreateExpense) -> Result<()> {
        let response = self
            .request(Method::POST, &Vec::new())
            .header("Prefer", "return=minimal")
            .json(&expense)
            .send()
            .await
            .context("failed to reach table API")?;

        ensure_success(response)
            .await
            .context("failed to insert expense")?;

        Ok(())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Expense>> {
        let response = self
            .request(Method::GET, &list_query(owner))
            .send()
            .await
            .context("failed to reach table API")?;

        let rows = ensure_success(response)
            .await
            .context("failed to list expenses")?
            .json::<Vec<Expense>>()
            .await
            .context("unexpected expense rows from table API")?;

        Ok(rows)
    }

    async fn amounts_on(&self, owner: &str, on: NaiveDate) -> Result<Vec<f64>> {
        self.select_amounts(amounts_on_query(owner, on))
            .await
            .context("failed to select amounts for day")
    }

    async fn amounts_within(&self, owner: &str, month: MonthRange) -> Result<Vec<f64>> {
        self.select_amounts(amounts_within_query(owner, month))
            .await
            .context("failed to select amounts for month")
    }

    async fn delete(&self, owner: &str, expense_id: &str) -> Result<usize> {
        let response = self
            .request(Method::DELETE, &delete_query(owner, expense_id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .context("failed to reach table API")?;

        let removed = ensure_success(response)
            .await
            .context("failed to delete expense")?
            .json::<Vec<serde_json::Value>>()
            .await
            .context("unexpected delete reply from table API")?;

        Ok(removed.len())
    }
}
