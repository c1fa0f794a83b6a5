//! Repository traits for dashboard data.

pub mod districts;
pub mod performance;
pub mod response_cache;
pub mod state_summaries;

pub use districts::DistrictRepo;
pub use performance::PerformanceRepo;
pub use response_cache::ResponseCacheRepo;
pub use state_summaries::StateSummaryRepo;
