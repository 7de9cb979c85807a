use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;

pub mod expenses;

pub const BANNER: &str = "SpendWise API is running 🚀";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(BANNER))
}

pub async fn fallback() -> ApiError {
    ApiError::not_found("Route")
}
