//! Integration tests for HTTP API endpoints.

mod common;

use axum::http::StatusCode;
use common::TestServer;
use rozgar_core::PerformanceRecord;
use rozgar_store::models::PerformanceRow;
use rozgar_store::repos::PerformanceRepo;
use rozgar_store::seed::demo_records;
use serde_json::Value;
use time::macros::date;

/// Demo records for the latest seeded month.
fn latest_demo_records() -> Vec<PerformanceRecord> {
    demo_records("Rajasthan")
        .unwrap()
        .into_iter()
        .filter(|r| r.month == "October")
        .collect()
}

fn months(data: &Value) -> Vec<String> {
    data.as_array()
        .unwrap()
        .iter()
        .map(|p| p["month"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_index_lists_endpoints() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "running");
    let endpoints: Vec<&str> = json["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect();
    assert!(endpoints.contains(&"/api/districts/nearby"));
    // Metrics are disabled in the test config.
    assert!(!endpoints.contains(&"/metrics"));
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
    assert!(json["timestamp"].as_str().unwrap().contains('T'));

    server.store.fail_health_check(true);
    let (status, json) = server.get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["database"], "disconnected");
}

#[tokio::test]
async fn test_list_districts_sorted_by_name() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/districts").await;

    assert_eq!(status, StatusCode::OK);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 13);
    assert_eq!(data[0]["districtCode"], "2701");
    assert_eq!(data[0]["districtName"], "Ajmer");
    assert_eq!(data[0]["hindiName"], "अजमेर");
    assert_eq!(data[0]["stateName"], "Rajasthan");

    let names: Vec<&str> = data
        .iter()
        .map(|d| d["districtName"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_list_districts_empty_store() {
    let server = TestServer::empty().await;
    let (status, json) = server.get_json("/api/districts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_district_summary_uses_latest_month() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/districts/2701/summary").await;
    assert_eq!(status, StatusCode::OK);

    let expected = latest_demo_records()
        .into_iter()
        .find(|r| r.district_code == "2701")
        .unwrap();
    assert_eq!(json["district"]["code"], "2701");
    assert_eq!(json["district"]["name"], "Ajmer");
    assert_eq!(json["district"]["hindiName"], "अजमेर");
    assert_eq!(
        json["data"]["householdsEmployed"],
        expected.job_data.households_employed
    );
    assert_eq!(
        json["data"]["totalExpenditure"],
        expected.financial_data.total_expenditure
    );
    assert_eq!(
        json["data"]["totalWorks"],
        expected.works_data.completed_works + expected.works_data.ongoing_works
    );
}

#[tokio::test]
async fn test_district_summary_unknown_is_404() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/districts/9999/summary").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No data found");
}

#[tokio::test]
async fn test_historical_in_fiscal_order() {
    let server = TestServer::seeded().await;

    // A January record belongs after October in the April–March year.
    let january = PerformanceRecord::new("2701", "Ajmer", date!(2025 - 01 - 01));
    server
        .store
        .upsert_performance(&PerformanceRow::from(&january))
        .await
        .unwrap();

    let (status, json) = server.get_json("/api/districts/2701/historical").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        months(&json["data"]),
        vec![
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "January"
        ]
    );
}

#[tokio::test]
async fn test_historical_limited_to_recent_months() {
    let server = TestServer::with_config(|config| config.query.historical_months = 3).await;
    let (status, json) = server.get_json("/api/districts/2702/historical").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(months(&json["data"]), vec!["August", "September", "October"]);
    assert!(json["data"][0]["personDays"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_historical_unknown_district_is_empty() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/districts/9999/historical").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], Value::Array(vec![]));
}

#[tokio::test]
async fn test_nearby_finds_closest_district() {
    let server = TestServer::seeded().await;
    let (status, json) = server
        .get_json("/api/districts/nearby?lat=26.46&lon=74.63")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["districtCode"], "2701");
    assert_eq!(json["districtName"], "Ajmer");
}

#[tokio::test]
async fn test_nearby_outside_radius_is_404() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/districts/nearby?lat=12.97&lon=77.59").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No district found nearby");
}

#[tokio::test]
async fn test_nearby_rejects_bad_coordinates() {
    let server = TestServer::seeded().await;

    let (status, json) = server.get_json("/api/districts/nearby?lat=26.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Latitude and longitude required");

    let (status, _) = server.get_json("/api/districts/nearby?lat=abc&lon=74").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = server.get_json("/api/districts/nearby?lat=95&lon=74").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_state_summary_totals_latest_month() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/analytics/state-summary").await;
    assert_eq!(status, StatusCode::OK);

    let latest = latest_demo_records();
    let person_days: i64 = latest.iter().map(|r| r.job_data.person_days_generated).sum();
    let works: i64 = latest.iter().map(|r| r.works_data.total_works).sum();

    assert_eq!(json["totalDistricts"], 13);
    assert_eq!(json["data"]["totalPersonDays"], person_days);
    assert_eq!(json["data"]["totalWorks"], works);
}

#[tokio::test]
async fn test_state_summary_empty_store_is_zero() {
    let server = TestServer::empty().await;
    let (status, json) = server.get_json("/api/analytics/state-summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalDistricts"], 0);
    assert_eq!(json["data"]["totalPersonDays"], 0);
    assert_eq!(json["data"]["avgWomenParticipation"], 0.0);
}

#[tokio::test]
async fn test_top_districts_respects_limit() {
    let server = TestServer::seeded().await;
    let (status, json) = server
        .get_json("/api/analytics/top-districts?limit=3")
        .await;
    assert_eq!(status, StatusCode::OK);

    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    let households: Vec<i64> = data
        .iter()
        .map(|d| d["householdsEmployed"].as_i64().unwrap())
        .collect();
    assert!(households.windows(2).all(|w| w[0] >= w[1]));

    let best = latest_demo_records()
        .iter()
        .map(|r| r.job_data.households_employed)
        .max()
        .unwrap();
    assert_eq!(households[0], best);
}

#[tokio::test]
async fn test_top_districts_limit_fallbacks() {
    let server = TestServer::seeded().await;

    let (_, json) = server.get_json("/api/analytics/top-districts").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);

    let (_, json) = server
        .get_json("/api/analytics/top-districts?limit=many")
        .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 5);

    let (_, json) = server
        .get_json("/api/analytics/top-districts?limit=500")
        .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn test_latest_record_endpoint() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/district/2705/latest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["districtCode"], "2705");
    assert_eq!(json["month"], "October");
    assert_eq!(json["financialYear"], "2024-25");
    assert_eq!(json["dataSource"], "demo-seed");

    let (status, json) = server.get_json("/api/district/9999/latest").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No data found");
}

#[tokio::test]
async fn test_recent_records_endpoint() {
    let server = TestServer::seeded().await;

    let (status, json) = server.get_json("/api/district/2703/performance?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(months(&json), vec!["October", "September"]);

    let (_, json) = server.get_json("/api/district/2703/performance").await;
    assert_eq!(json.as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_state_stats_covers_all_records() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/state/stats").await;
    assert_eq!(status, StatusCode::OK);

    let all = demo_records("Rajasthan").unwrap();
    let job_cards: i64 = all.iter().map(|r| r.job_data.total_job_cards).sum();
    assert_eq!(json["records"], 91);
    assert_eq!(json["totalJobCards"], job_cards);
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = TestServer::seeded().await;
    let (status, json) = server.get_json("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Endpoint not found");
}

#[tokio::test]
async fn test_metrics_endpoint_when_enabled() {
    rozgar_server::metrics::register_metrics();
    let server = TestServer::with_config(|config| config.server.metrics_enabled = true).await;
    let (status, _, body) = server.get("/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("rozgar_cache_hits_total"));

    let disabled = TestServer::seeded().await;
    let (status, _, _) = disabled.get("/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
