//! Relational store for the Rozgar dashboard.
//!
//! This crate owns every persisted entity:
//! - Districts and their locations
//! - Monthly performance records, one per district and period
//! - Precomputed state summaries
//! - Cached API responses with an expiry

pub mod error;
pub mod models;
pub mod postgres;
pub mod repos;
pub mod seed;
pub mod store;
pub mod summary;

pub use error::{StoreError, StoreResult};
pub use postgres::PostgresStore;
pub use seed::{SeedStats, seed_demo};
pub use store::{DashboardStore, SqliteStore};
pub use summary::refresh_state_summary;

use rozgar_core::config::StoreConfig;
use std::sync::Arc;

/// Create a store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn DashboardStore>> {
    match config {
        StoreConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn DashboardStore>)
        }
        StoreConfig::Postgres {
            url,
            host,
            port,
            username,
            password,
            database,
            ssl_mode,
            max_connections,
            statement_timeout_ms,
        } => {
            let store = if let Some(url) = url {
                tracing::info!("Connecting to PostgreSQL using connection URL");
                PostgresStore::from_url(url, *max_connections, *statement_timeout_ms).await?
            } else if let (Some(host), Some(database)) = (host.as_ref(), database.as_ref()) {
                PostgresStore::from_params(
                    host,
                    port.unwrap_or(5432),
                    username.as_deref(),
                    password.as_deref(),
                    database,
                    *ssl_mode,
                    *max_connections,
                    *statement_timeout_ms,
                )
                .await?
            } else {
                return Err(StoreError::Config(
                    "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                ));
            };
            Ok(Arc::new(store) as Arc<dyn DashboardStore>)
        }
    }
}
