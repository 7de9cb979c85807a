use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{self, expenses::*};
use crate::utils::app_config::AppConfig;

/// All of the API's routes, with tracing and CORS applied.
pub fn build_router(app_config: AppConfig) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/expenses/add", post(add_expense))
        .route("/expenses/all", get(get_all_expenses))
        .route("/expenses/today", get(get_today_total))
        .route("/expenses/month", get(get_month_total))
        .route("/expenses/:expense_id", delete(delete_expense))
        .fallback(handlers::fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_config)
}
