//! Terminal dashboard for the Rozgar API.
//!
//! Fetches district and state statistics, keeps JSON snapshots of the last
//! successful responses and falls back to them when the server is
//! unreachable.

pub mod api_client;
pub mod controller;
pub mod format;
pub mod render;
pub mod snapshot;
pub mod state;

pub use api_client::ApiClient;
pub use controller::Dashboard;
pub use format::Lang;
pub use snapshot::{ClientError, SnapshotStore};
pub use state::{FetchOutcome, ResourceState};
