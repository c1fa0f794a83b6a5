//! HTTP request handlers.

pub mod analytics;
pub mod districts;
pub mod health;
pub mod legacy;

pub use analytics::*;
pub use districts::*;
pub use health::*;
pub use legacy::*;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Endpoint not found".to_string())
}
