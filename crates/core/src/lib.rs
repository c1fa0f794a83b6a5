//! Core domain types and shared logic for the Rozgar dashboard.
//!
//! This crate defines the canonical data model used across all other crates:
//! - Districts and their geographic points
//! - Monthly performance records and fiscal month ordering
//! - State-level aggregation and top-N ranking
//! - JSON response contracts of the HTTP API
//! - Configuration shared by the server and tooling

pub mod aggregate;
pub mod api;
pub mod config;
pub mod district;
pub mod error;
pub mod fiscal;
pub mod performance;

pub use aggregate::{
    RecordTotals, StateTotals, rank_top_districts, state_wide_totals, summarize_state,
};
pub use district::{District, GeoPoint, nearest_district};
pub use error::{Error, Result};
pub use fiscal::{FiscalMonth, financial_year_for, fiscal_ordinal, sort_fiscal};
pub use performance::{FinancialMetrics, JobMetrics, PerformanceRecord, SocialMetrics, WorksMetrics};

/// Default response cache lifetime: 1 hour.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60;

/// Default search radius for nearest-district lookups.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 100.0;

/// Default number of entries in the top-districts ranking.
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Default number of months returned by the historical series.
pub const DEFAULT_HISTORICAL_MONTHS: usize = 12;

/// State name used when a record does not carry one.
pub const DEFAULT_STATE_NAME: &str = "Rajasthan";
