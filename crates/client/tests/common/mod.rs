//! Mock API server and fixtures for client tests.

use httpmock::Method::GET;
use httpmock::MockServer;
use serde_json::{Value, json};
use std::net::TcpListener;

/// Base URL nothing listens on.
#[allow(dead_code)]
pub const UNREACHABLE_SERVER: &str = "http://127.0.0.1:1";

#[allow(dead_code)]
pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

#[allow(dead_code)]
pub fn districts_body() -> Value {
    json!({
        "data": [
            {"districtCode": "2701", "districtName": "Ajmer", "hindiName": "अजमेर", "stateName": "Rajasthan"},
            {"districtCode": "2702", "districtName": "Alwar", "hindiName": "अलवर", "stateName": "Rajasthan"}
        ]
    })
}

#[allow(dead_code)]
pub fn summary_body(code: &str, name: &str) -> Value {
    json!({
        "district": {"code": code, "name": name},
        "data": {
            "totalJobCards": 61426,
            "householdsEmployed": 55283,
            "personDaysGenerated": 307130,
            "avgDaysPerHousehold": 56.0,
            "totalExpenditure": 85996400,
            "wageExpenditure": 61426000,
            "completedWorks": 718,
            "ongoingWorks": 252,
            "totalWorks": 970,
            "percentageWomen": 40.0
        }
    })
}

/// History deliberately out of fiscal order.
#[allow(dead_code)]
pub fn historical_body() -> Value {
    json!({
        "data": [
            {"month": "January", "personDays": 100, "expenditure": 1000},
            {"month": "October", "personDays": 300, "expenditure": 3000},
            {"month": "April", "personDays": 200, "expenditure": 2000}
        ]
    })
}

#[allow(dead_code)]
pub fn state_summary_body() -> Value {
    json!({
        "totalDistricts": 2,
        "data": {
            "totalPersonDays": 614260,
            "totalExpenditure": 171992800,
            "totalWorks": 1940,
            "avgWomenParticipation": 38.5
        }
    })
}

#[allow(dead_code)]
pub fn top_districts_body() -> Value {
    json!({
        "data": [
            {"districtCode": "2702", "districtName": "Alwar", "householdsEmployed": 60000, "personDaysGenerated": 330000},
            {"districtCode": "2701", "districtName": "Ajmer", "householdsEmployed": 55283, "personDaysGenerated": 307130}
        ]
    })
}

/// Register the endpoints the initial load and district 2701 need.
#[allow(dead_code)]
pub async fn mock_dashboard_api(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/districts");
            then.status(200).json_body(districts_body());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/analytics/state-summary");
            then.status(200).json_body(state_summary_body());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/analytics/top-districts")
                .query_param("limit", "5");
            then.status(200).json_body(top_districts_body());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/districts/2701/summary");
            then.status(200).json_body(summary_body("2701", "Ajmer"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/districts/2701/historical");
            then.status(200).json_body(historical_body());
        })
        .await;
}
