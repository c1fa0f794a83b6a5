//! Route configuration.

use crate::cache::cached;
use crate::handlers;
use crate::metrics::metrics_handler;
use crate::state::AppState;
use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::get;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let ttl = state.config.cache.ttl();

    let api_routes = Router::new()
        // Dashboard endpoints, served through the response cache
        .route("/api/districts", cached(handlers::list_districts, ttl, &state))
        .route(
            "/api/districts/{code}/summary",
            cached(handlers::district_summary, ttl, &state),
        )
        .route(
            "/api/districts/{code}/historical",
            cached(handlers::district_historical, ttl, &state),
        )
        .route(
            "/api/analytics/state-summary",
            cached(handlers::state_summary, ttl, &state),
        )
        .route(
            "/api/analytics/top-districts",
            cached(handlers::top_districts, ttl, &state),
        )
        // Coordinates vary per caller; not worth caching
        .route("/api/districts/nearby", get(handlers::nearby_district))
        .route("/api/health", get(handlers::health_check))
        // Record-level endpoints
        .route("/api/district/{code}/latest", get(handlers::latest_record))
        .route(
            "/api/district/{code}/performance",
            get(handlers::recent_records),
        )
        .route("/api/state/stats", get(handlers::state_stats));

    let mut router = Router::new()
        .route("/", get(handlers::index))
        .merge(api_routes);

    if state.config.server.metrics_enabled {
        router = router.route("/metrics", get(metrics_handler));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    router
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
