//! Terminal dashboard for Rozgar.

use anyhow::{Context, Result};
use clap::Parser;
use rozgar_client::render::{Targets, error_view, render_dashboard};
use rozgar_client::{ApiClient, Dashboard, Lang, SnapshotStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rozgarctl")]
#[command(about = "District employment dashboard with offline fallback")]
#[command(version)]
struct Cli {
    /// Server base URL
    #[arg(long, env = "ROZGAR_SERVER", default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Directory for offline snapshots
    #[arg(long, env = "ROZGAR_SNAPSHOT_DIR", default_value = ".rozgar/snapshots")]
    snapshot_dir: String,

    /// Display language (en or hi)
    #[arg(long, default_value = "en")]
    lang: Lang,

    /// District code to show (defaults to the first district)
    #[arg(long)]
    district: Option<String>,

    /// Latitude for nearby-district detection
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude for nearby-district detection
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Number of districts in the ranking
    #[arg(long, default_value_t = rozgar_core::DEFAULT_TOP_LIMIT)]
    top: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Output goes to stdout; keep logs quiet unless asked.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = ApiClient::new(&cli.server)?;
    let mut dashboard = Dashboard::new(client, SnapshotStore::new(&cli.snapshot_dir), cli.top);

    if let Err(e) = dashboard.load().await {
        for line in error_view(&e.to_string(), cli.lang) {
            eprintln!("{line}");
        }
        return Err(e).context("initial load failed");
    }

    if let (Some(lat), Some(lon)) = (cli.lat, cli.lon) {
        match dashboard.detect_district(lat, lon).await {
            Ok(Some(_)) => {}
            Ok(None) => eprintln!("No district found near {lat}, {lon}"),
            Err(e) => tracing::warn!(error = %e, "Nearby lookup failed"),
        }
    } else if let Some(code) = cli.district.as_deref() {
        dashboard.select_district(code).await;
    }

    println!("{}", render_dashboard(&dashboard, &Targets::default(), cli.lang));
    Ok(())
}
