//! JSON response contracts of the HTTP API.
//!
//! Shared by the server, which produces them, and the client, which reads
//! them. Numeric fields are optional so a client can render a partial payload
//! instead of rejecting it.

use crate::aggregate::StateTotals;
use crate::district::District;
use crate::performance::PerformanceRecord;
use serde::{Deserialize, Serialize};

/// `GET /`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub status: String,
    pub endpoints: Vec<String>,
}

/// `GET /api/health`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 server time.
    pub timestamp: String,
    /// `"connected"` or `"disconnected"`.
    pub database: String,
}

/// One entry of `GET /api/districts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictListItem {
    pub district_code: String,
    pub district_name: String,
    #[serde(default)]
    pub hindi_name: Option<String>,
    pub state_name: String,
}

impl From<District> for DistrictListItem {
    fn from(district: District) -> Self {
        Self {
            district_code: district.code,
            district_name: district.name,
            hindi_name: Some(district.hindi_name).filter(|name| !name.is_empty()),
            state_name: district.state_name,
        }
    }
}

/// `GET /api/districts`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DistrictListResponse {
    pub data: Vec<DistrictListItem>,
}

/// District identity inside a summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRef {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub hindi_name: Option<String>,
}

/// Latest-month figures for one district.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictMetrics {
    pub total_job_cards: Option<i64>,
    pub households_employed: Option<i64>,
    pub person_days_generated: Option<i64>,
    pub avg_days_per_household: Option<f64>,
    pub total_expenditure: Option<i64>,
    pub wage_expenditure: Option<i64>,
    pub completed_works: Option<i64>,
    pub ongoing_works: Option<i64>,
    pub total_works: Option<i64>,
    pub percentage_women: Option<f64>,
}

impl From<&PerformanceRecord> for DistrictMetrics {
    fn from(record: &PerformanceRecord) -> Self {
        Self {
            total_job_cards: Some(record.job_data.total_job_cards),
            households_employed: Some(record.job_data.households_employed),
            person_days_generated: Some(record.job_data.person_days_generated),
            avg_days_per_household: Some(record.job_data.avg_days_per_household),
            total_expenditure: Some(record.financial_data.total_expenditure),
            wage_expenditure: Some(record.financial_data.wage_expenditure),
            completed_works: Some(record.works_data.completed_works),
            ongoing_works: Some(record.works_data.ongoing_works),
            total_works: Some(record.works_data.total_works),
            percentage_women: Some(record.social_metrics.percentage_women),
        }
    }
}

/// `GET /api/districts/{code}/summary`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictSummaryResponse {
    pub district: DistrictRef,
    pub data: DistrictMetrics,
}

/// One month of a historical series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub month: String,
    pub person_days: Option<i64>,
    pub expenditure: Option<i64>,
}

impl From<&PerformanceRecord> for HistoricalPoint {
    fn from(record: &PerformanceRecord) -> Self {
        Self {
            month: record.month.clone(),
            person_days: Some(record.job_data.person_days_generated),
            expenditure: Some(record.financial_data.total_expenditure),
        }
    }
}

/// `GET /api/districts/{code}/historical`, in April–March order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalResponse {
    pub data: Vec<HistoricalPoint>,
}

/// `GET /api/districts/nearby`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyResponse {
    pub district_code: String,
    pub district_name: String,
}

/// State totals inside the state summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateTotalsView {
    pub total_person_days: Option<i64>,
    pub total_expenditure: Option<i64>,
    pub total_works: Option<i64>,
    pub avg_women_participation: Option<f64>,
}

impl From<&StateTotals> for StateTotalsView {
    fn from(totals: &StateTotals) -> Self {
        Self {
            total_person_days: Some(totals.total_person_days),
            total_expenditure: Some(totals.total_expenditure),
            total_works: Some(totals.total_works),
            avg_women_participation: Some(totals.avg_women_participation),
        }
    }
}

/// `GET /api/analytics/state-summary`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummaryResponse {
    pub total_districts: Option<i64>,
    pub data: StateTotalsView,
}

/// One entry of the top-districts ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopDistrict {
    pub district_code: String,
    pub district_name: String,
    #[serde(default)]
    pub hindi_name: Option<String>,
    pub households_employed: Option<i64>,
    pub person_days_generated: Option<i64>,
}

impl From<&PerformanceRecord> for TopDistrict {
    fn from(record: &PerformanceRecord) -> Self {
        Self {
            district_code: record.district_code.clone(),
            district_name: record.district_name.clone(),
            hindi_name: record.hindi_name.clone(),
            households_employed: Some(record.job_data.households_employed),
            person_days_generated: Some(record.job_data.person_days_generated),
        }
    }
}

/// `GET /api/analytics/top-districts`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopDistrictsResponse {
    pub data: Vec<TopDistrict>,
}
