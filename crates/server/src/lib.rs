//! HTTP API for the Rozgar employment dashboard.
//!
//! This crate provides:
//! - District listing, summaries and monthly history
//! - Nearest-district lookup by coordinates
//! - State-level totals and rankings
//! - A persistent response cache in front of the read endpoints

pub mod cache;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
