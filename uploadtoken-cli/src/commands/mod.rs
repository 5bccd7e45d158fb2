//! Command implementations for the uploadtoken CLI

pub mod lookup;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;
use uploadtoken_server::db::{create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
use uploadtoken_server::{PgUploadTokenStore, Settings};

pub use lookup::run_lookup;
pub use serve::run_serve;

/// Database arguments shared by every command
#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Postgres connection string (postgres:// is accepted and normalized)
    #[arg(long, env = "PG_CONNECTION_STRING", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Validate the connection string and connect. Fails fast on any problem.
    pub async fn connect(&self) -> Result<PgUploadTokenStore> {
        let settings = match &self.database_url {
            Some(url) => Settings::new(url),
            None => Settings::from_env(),
        }
        .context("Invalid database configuration")?;

        tracing::debug!(?settings, "Connecting to database");

        let pool = create_pool_with_options(&settings.pg_connection_string, self.max_connections)
            .await
            .context("Failed to create database pool")?;

        Ok(PgUploadTokenStore::new(pool))
    }
}
