//! Rozgar dashboard server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use rozgar_core::config::AppConfig;
use rozgar_server::cache::spawn_cache_reaper;
use rozgar_server::{AppState, create_router};
use rozgar_store::DashboardStore;
use rozgar_store::seed::DEMO_STATE_CODE;
use std::net::SocketAddr;
use tokio::signal::ctrl_c;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Rozgar - district employment statistics API
#[derive(Parser, Debug)]
#[command(name = "rozgard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "ROZGAR_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,

    /// Load the demo districts and records before serving
    #[arg(long, env = "ROZGAR_SEED_DEMO")]
    seed_demo: bool,
}

/// Build configuration from the optional file, then `ROZGAR_` variables.
fn load_config(path: &str) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if std::path::Path::new(path).exists() {
        tracing::info!(config_path = %path, "Loading configuration from file");
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::info!(config_path = %path, "No config file found, using defaults and environment");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("ROZGAR_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    config
        .validate()
        .map_err(rozgar_core::Error::Config)
        .context("invalid configuration")?;
    Ok(config)
}

/// Seed demo data and precompute the state summary.
async fn seed_demo_data(store: &dyn DashboardStore, state_name: &str) -> Result<()> {
    let stats = rozgar_store::seed_demo(store, state_name)
        .await
        .context("failed to seed demo data")?;
    tracing::info!(
        districts = stats.districts,
        records = stats.records,
        "Demo data seeded"
    );

    rozgar_store::refresh_state_summary(store, state_name, Some(DEMO_STATE_CODE))
        .await
        .context("failed to refresh state summary")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Rozgar v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args.config)?;

    rozgar_server::metrics::register_metrics();

    let store = rozgar_store::from_config(&config.store)
        .await
        .context("failed to initialize store")?;
    store
        .health_check()
        .await
        .context("store health check failed")?;
    tracing::info!("Store initialized");

    if args.seed_demo {
        seed_demo_data(store.as_ref(), &config.query.state_name).await?;
    }

    let state = AppState::new(config.clone(), store);

    if let Some(interval) = state.cache_reaper_interval() {
        spawn_cache_reaper(state.store.clone(), interval);
        tracing::info!(
            interval_secs = interval.as_secs(),
            "Cache reaper task spawned"
        );
    } else {
        tracing::info!("Response cache disabled");
    }

    let app = create_router(state);

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
