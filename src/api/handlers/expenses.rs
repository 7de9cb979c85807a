use axum::{
    Json,
    extract::{Path, State},
};
use hyper::StatusCode;
use serde::{Deserialize, Serialize};

use crate::{
    api::{
        error::ApiError, extractors::ValidatedJson, handlers::MessageResponse,
        middleware::auth::Owner,
    },
    expenses::db_types::{Expense, NewExpense},
    utils::app_config::AppConfig,
};

#[derive(Serialize, Deserialize, Debug)]
pub struct TodayTotal {
    pub today_total: f64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MonthTotal {
    pub month_total: f64,
}

/// POST /expenses/add
pub async fn add_expense(
    State(app_config): State<AppConfig>,
    Owner(owner): Owner,
    ValidatedJson(new_expense): ValidatedJson<NewExpense>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    app_config
        .expenses
        .create(&owner, new_expense)
        .await
        .map_err(ApiError::store)?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Expense added successfully"))))
}

/// GET /expenses/all - newest first
pub async fn get_all_expenses(
    State(app_config): State<AppConfig>,
    Owner(owner): Owner,
) -> Result<(StatusCode, Json<Vec<Expense>>), ApiError> {
    let expenses = app_config
        .expenses
        .list_all(&owner)
        .await
        .map_err(ApiError::store)?;

    Ok((StatusCode::OK, Json(expenses)))
}

/// GET /expenses/today
pub async fn get_today_total(
    State(app_config): State<AppConfig>,
    Owner(owner): Owner,
) -> Result<(StatusCode, Json<TodayTotal>), ApiError> {
    let today_total = app_config
        .expenses
        .sum_today(&owner)
        .await
        .map_err(ApiError::store)?;

    Ok((StatusCode::OK, Json(TodayTotal { today_total })))
}

/// GET /expenses/month
pub async fn get_month_total(
    State(app_config): State<AppConfig>,
    Owner(owner): Owner,
) -> Result<(StatusCode, Json<MonthTotal>), ApiError> {
    let month_total = app_config
        .expenses
        .sum_month(&owner)
        .await
        .map_err(ApiError::store)?;

    Ok((StatusCode::OK, Json(MonthTotal { month_total })))
}

/// DELETE /expenses/{expense_id}
///
/// The id is handed to the store as is. Answers the same whether or not
/// anything was deleted.
pub async fn delete_expense(
    State(app_config): State<AppConfig>,
    Owner(owner): Owner,
    Path(expense_id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    app_config
        .expenses
        .delete_one(&owner, &expense_id)
        .await
        .map_err(ApiError::store)?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Expense deleted"))))
}
