//! Application state shared across handlers.

use rozgar_core::config::AppConfig;
use rozgar_store::DashboardStore;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Dashboard store.
    pub store: Arc<dyn DashboardStore>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: AppConfig, store: Arc<dyn DashboardStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Interval for the expired-entry reaper, or `None` when caching is off.
    pub fn cache_reaper_interval(&self) -> Option<Duration> {
        let cache = &self.config.cache;
        if !cache.enabled {
            return None;
        }
        if cache.reaper_interval_secs == 0 {
            tracing::warn!("cache.reaper_interval_secs is 0, using default of 300 seconds");
            return Some(Duration::from_secs(300));
        }
        Some(cache.reaper_interval())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rozgar_store::SqliteStore;
    use tempfile::tempdir;

    async fn build_state(config: AppConfig) -> (tempfile::TempDir, AppState) {
        let temp = tempdir().unwrap();
        let store: Arc<dyn DashboardStore> =
            Arc::new(SqliteStore::new(temp.path().join("rozgar.db")).await.unwrap());
        (temp, AppState::new(config, store))
    }

    #[tokio::test]
    async fn reaper_interval_none_when_cache_disabled() {
        let mut config = AppConfig::for_testing();
        config.cache.enabled = false;
        let (_temp, state) = build_state(config).await;
        assert!(state.cache_reaper_interval().is_none());
    }

    #[tokio::test]
    async fn reaper_interval_respects_config() {
        let mut config = AppConfig::for_testing();
        config.cache.reaper_interval_secs = 12;
        let (_temp, state) = build_state(config).await;
        assert_eq!(state.cache_reaper_interval(), Some(Duration::from_secs(12)));
    }

    #[tokio::test]
    async fn reaper_interval_zero_uses_default() {
        let mut config = AppConfig::for_testing();
        config.cache.reaper_interval_secs = 0;
        let (_temp, state) = build_state(config).await;
        assert_eq!(state.cache_reaper_interval(), Some(Duration::from_secs(300)));
    }
}
