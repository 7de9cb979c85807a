use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::api::config::{ApiConfig, OwnerMode, StoreBackend};
use crate::api::middleware::auth::{FixedOwner, HeaderOwner, OwnerResolver};
use crate::expenses::clock::SystemClock;
use crate::expenses::memory::MemoryStore;
use crate::expenses::postgres::PostgresStore;
use crate::expenses::rest::RestStore;
use crate::expenses::service::ExpenseService;
use crate::expenses::store::ExpenseStore;

/// Shared state handed to every route handler.
#[derive(Clone)]
pub struct AppConfig {
    pub expenses: ExpenseService,
    pub owners: Arc<dyn OwnerResolver>,
}

impl AppConfig {
    pub fn new(expenses: ExpenseService, owners: Arc<dyn OwnerResolver>) -> Self {
        Self { expenses, owners }
    }

    pub fn from_api_config(config: &ApiConfig) -> Result<Self> {
        let store: Arc<dyn ExpenseStore> = match config.store_backend {
            StoreBackend::Rest => {
                let (url, key) = config.supabase_credentials()?;
                let timeout = Duration::from_secs(config.store_timeout_secs);
                Arc::new(RestStore::new(url, key, timeout)?)
            }
            StoreBackend::Postgres => {
                Arc::new(PostgresStore::connect(config.require_database_url()?)?)
            }
            StoreBackend::Memory => {
                tracing::warn!("using the in-memory expense store, data is lost on restart");
                Arc::new(MemoryStore::new())
            }
        };

        let owners: Arc<dyn OwnerResolver> = match config.owner_mode {
            OwnerMode::Fixed => Arc::new(FixedOwner::new(config.fixed_owner_id.clone())),
            OwnerMode::Header => Arc::new(HeaderOwner::new(&config.owner_header)?),
        };

        let expenses = ExpenseService::new(store, Arc::new(SystemClock));

        Ok(Self::new(expenses, owners))
    }
}
