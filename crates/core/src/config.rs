//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// PostgreSQL SSL mode configuration.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PgSslMode {
    /// Disable SSL/TLS entirely.
    Disable,
    /// Prefer SSL/TLS but allow unencrypted connections (default).
    #[default]
    Prefer,
    /// Require SSL/TLS for all connections.
    Require,
}

/// Data store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// SQLite database file (development, demos and tests).
    Sqlite {
        /// Database file path.
        path: PathBuf,
    },
    /// PostgreSQL database.
    Postgres {
        /// Connection URL. Takes precedence over individual fields.
        url: Option<String>,
        /// Database host.
        host: Option<String>,
        /// Database port (default: 5432).
        #[serde(default = "default_pg_port")]
        port: Option<u16>,
        /// Database username.
        username: Option<String>,
        /// Database password. Prefer ROZGAR_STORE__PASSWORD over the config file.
        password: Option<String>,
        /// Database name.
        database: Option<String>,
        /// SSL mode for connections.
        ssl_mode: Option<PgSslMode>,
        /// Maximum connections in the pool.
        #[serde(default = "default_max_connections")]
        max_connections: u32,
        /// Statement timeout in milliseconds.
        #[serde(default = "default_statement_timeout_ms")]
        statement_timeout_ms: Option<u64>,
    },
}

fn default_pg_port() -> Option<u16> {
    Some(5432)
}

fn default_max_connections() -> u32 {
    10
}

fn default_statement_timeout_ms() -> Option<u64> {
    Some(30_000)
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./data/rozgar.db"),
        }
    }
}

impl StoreConfig {
    /// Validate store configuration invariants.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            StoreConfig::Postgres {
                url,
                host,
                database,
                max_connections,
                ..
            } => {
                if url.is_none() && (host.is_none() || database.is_none()) {
                    return Err(
                        "postgres config requires either 'url' or 'host' + 'database'".to_string(),
                    );
                }
                if *max_connections == 0 {
                    return Err("postgres max_connections must be at least 1".to_string());
                }
                Ok(())
            }
            StoreConfig::Sqlite { .. } => Ok(()),
        }
    }
}

/// Response cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Serve and populate the response cache (default: true).
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Lifetime of a cached response in seconds (default: 1 hour).
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// How often expired entries are physically removed (default: 5 minutes).
    #[serde(default = "default_reaper_interval_secs")]
    pub reaper_interval_secs: u64,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    crate::DEFAULT_CACHE_TTL_SECS
}

fn default_reaper_interval_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl_secs(),
            reaper_interval_secs: default_reaper_interval_secs(),
        }
    }
}

impl CacheConfig {
    /// Cached response lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Interval between reaper runs.
    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs)
    }

    /// Validate cache configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs == 0 {
            return Err("cache.ttl_secs must be greater than 0".to_string());
        }
        if self.reaper_interval_secs == 0 {
            return Err("cache.reaper_interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Query and aggregation tuning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Search radius for the nearby-district lookup in kilometres.
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
    /// Maximum number of months in a historical series.
    #[serde(default = "default_historical_months")]
    pub historical_months: usize,
    /// Top-districts ranking length when the request does not specify one.
    #[serde(default = "default_top_limit")]
    pub default_top_limit: usize,
    /// Upper bound on the requested ranking length.
    #[serde(default = "default_max_top_limit")]
    pub max_top_limit: usize,
    /// State name reported for districts and summaries.
    #[serde(default = "default_state_name")]
    pub state_name: String,
}

fn default_nearby_radius_km() -> f64 {
    crate::DEFAULT_NEARBY_RADIUS_KM
}

fn default_historical_months() -> usize {
    crate::DEFAULT_HISTORICAL_MONTHS
}

fn default_top_limit() -> usize {
    crate::DEFAULT_TOP_LIMIT
}

fn default_max_top_limit() -> usize {
    50
}

fn default_state_name() -> String {
    crate::DEFAULT_STATE_NAME.to_string()
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            nearby_radius_km: default_nearby_radius_km(),
            historical_months: default_historical_months(),
            default_top_limit: default_top_limit(),
            max_top_limit: default_max_top_limit(),
            state_name: default_state_name(),
        }
    }
}

impl QueryConfig {
    /// Validate query configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.nearby_radius_km.is_finite() || self.nearby_radius_km <= 0.0 {
            return Err("query.nearby_radius_km must be a positive number".to_string());
        }
        if self.historical_months == 0 {
            return Err("query.historical_months must be greater than 0".to_string());
        }
        if self.default_top_limit == 0 || self.max_top_limit == 0 {
            return Err("query top-district limits must be greater than 0".to_string());
        }
        if self.default_top_limit > self.max_top_limit {
            return Err("query.default_top_limit must not exceed query.max_top_limit".to_string());
        }
        Ok(())
    }

    /// Resolve a requested ranking length: missing or zero falls back to the
    /// default, anything above the maximum is clamped.
    pub fn top_limit(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(0) | None => self.default_top_limit,
            Some(n) => n.min(self.max_top_limit),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Data store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Response cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Query tuning.
    #[serde(default)]
    pub query: QueryConfig,
}

impl AppConfig {
    /// Validate every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()?;
        self.cache.validate()?;
        self.query.validate()?;
        Ok(())
    }

    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Uses SQLite in the working directory and disables
    /// the metrics endpoint.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig {
                metrics_enabled: false,
                ..ServerConfig::default()
            },
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
            query: QueryConfig::default(),
        }
    }
}
