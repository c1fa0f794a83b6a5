//! PostgreSQL-specific tests using testcontainers.
//!
//! These tests require Docker. Set SKIP_POSTGRES_TESTS=1 to skip.

mod common;

use common::{performance_row, postgres_or_skip};
use time::Month;

#[tokio::test]
async fn test_postgres_migrate_is_idempotent() {
    let Some(postgres) = postgres_or_skip().await else {
        return;
    };
    let store = postgres.store();

    store
        .upsert_performance(&performance_row("2701", Month::April, 10))
        .await
        .unwrap();
    store.migrate().await.unwrap();
    store.health_check().await.unwrap();

    assert_eq!(store.list_all_performance().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_postgres_latest_per_district_uses_period_not_insert_order() {
    let Some(postgres) = postgres_or_skip().await else {
        return;
    };
    let store = postgres.store();

    store
        .upsert_performance(&performance_row("2701", Month::September, 90))
        .await
        .unwrap();
    store
        .upsert_performance(&performance_row("2701", Month::April, 10))
        .await
        .unwrap();

    let latest = store.get_latest_per_district().await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].month, "September");
}
