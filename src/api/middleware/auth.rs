use anyhow::Context;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderName, request::Parts},
};

use crate::api::error::ApiError;
use crate::utils::app_config::AppConfig;

/// Decides which owner a request acts on behalf of.
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    async fn resolve(&self, parts: &Parts) -> Result<String, ApiError>;
}

/// Every request belongs to the same owner.
#[derive(Debug, Clone)]
pub struct FixedOwner {
    owner_id: String,
}

impl FixedOwner {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
        }
    }
}

#[async_trait]
impl OwnerResolver for FixedOwner {
    async fn resolve(&self, _parts: &Parts) -> Result<String, ApiError> {
        Ok(self.owner_id.clone())
    }
}

/// Reads the owner identifier from a request header.
#[derive(Debug, Clone)]
pub struct HeaderOwner {
    header: HeaderName,
}

impl HeaderOwner {
    pub fn new(header: &str) -> anyhow::Result<Self> {
        let header = HeaderName::try_from(header)
            .with_context(|| format!("'{header}' is not a valid header name"))?;

        Ok(Self { header })
    }
}

#[async_trait]
impl OwnerResolver for HeaderOwner {
    async fn resolve(&self, parts: &Parts) -> Result<String, ApiError> {
        let owner = parts
            .headers
            .get(&self.header)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .ok_or_else(|| ApiError::unauthorized(format!("Missing {} header", self.header)))?;

        Ok(owner.to_string())
    }
}

/// The owner of the current request, as decided by the configured resolver.
pub struct Owner(pub String);

#[async_trait]
impl FromRequestParts<AppConfig> for Owner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppConfig,
    ) -> Result<Self, Self::Rejection> {
        state.owners.resolve(parts).await.map(Owner)
    }
}
