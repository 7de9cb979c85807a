use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};

pub const DEFAULT_OWNER_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted PostgREST table API (Supabase).
    Rest,
    /// Direct Postgres connection.
    Postgres,
    /// In-process table, lost on exit.
    Memory,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerMode {
    /// Every request belongs to `--fixed-owner-id`.
    Fixed,
    /// The owner is read from `--owner-header`.
    Header,
}

/// Server settings, read from flags or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "spendwise-back-end", about = "SpendWise expense tracking API")]
pub struct ApiConfig {
    #[arg(long, env, default_value_t = 8000)]
    pub port: u16,

    #[arg(long, env, value_enum, default_value_t = StoreBackend::Rest)]
    pub store_backend: StoreBackend,

    #[arg(long, env)]
    pub supabase_url: Option<String>,

    #[arg(long, env, hide_env_values = true)]
    pub supabase_key: Option<String>,

    #[arg(long, env, default_value_t = 30)]
    pub store_timeout_secs: u64,

    #[arg(long, env, hide_env_values = true)]
    pub database_url: Option<String>,

    #[arg(long, env, value_enum, default_value_t = OwnerMode::Fixed)]
    pub owner_mode: OwnerMode,

    #[arg(long, env, default_value = DEFAULT_OWNER_ID)]
    pub fixed_owner_id: String,

    #[arg(long, env, default_value = "x-owner-id")]
    pub owner_header: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        Self::try_parse().map_err(|e| anyhow!(e))
    }

    /// `(url, key)` for the rest backend.
    pub fn supabase_credentials(&self) -> Result<(&str, &str)> {
        let url = self
            .supabase_url
            .as_deref()
            .ok_or_else(|| anyhow!("SUPABASE_URL must be set for the rest store backend"))?;
        let key = self
            .supabase_key
            .as_deref()
            .ok_or_else(|| anyhow!("SUPABASE_KEY must be set for the rest store backend"))?;

        Ok((url, key))
    }

    pub fn require_database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| anyhow!("DATABASE_URL must be set for the postgres store backend"))
    }
}
