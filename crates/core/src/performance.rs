//! Monthly performance records.

use crate::fiscal::{FiscalMonth, financial_year_for};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Job card and employment figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetrics {
    #[serde(default)]
    pub total_job_cards: i64,
    #[serde(default)]
    pub households_employed: i64,
    #[serde(default)]
    pub person_days_generated: i64,
    #[serde(default)]
    pub avg_days_per_household: f64,
}

/// Spending figures, in rupees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    #[serde(default)]
    pub total_expenditure: i64,
    #[serde(default)]
    pub wage_expenditure: i64,
    #[serde(default)]
    pub material_expenditure: i64,
}

/// Public works counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksMetrics {
    #[serde(default)]
    pub total_works: i64,
    #[serde(default)]
    pub completed_works: i64,
    #[serde(default)]
    pub ongoing_works: i64,
}

/// Social participation figures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMetrics {
    #[serde(default)]
    pub percentage_women: f64,
    #[serde(default)]
    pub sc_persons_worked: i64,
    #[serde(default)]
    pub st_persons_worked: i64,
}

/// One district's metrics for one reporting month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub district_code: String,
    pub district_name: String,
    pub hindi_name: Option<String>,
    pub financial_year: String,
    /// Month name as reported ("April").
    pub month: String,
    /// First day of the reporting month.
    pub period: Date,
    #[serde(default)]
    pub job_data: JobMetrics,
    #[serde(default)]
    pub financial_data: FinancialMetrics,
    #[serde(default)]
    pub works_data: WorksMetrics,
    #[serde(default)]
    pub social_metrics: SocialMetrics,
    pub data_source: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

impl PerformanceRecord {
    /// Create an empty record for a district and period. Month name and
    /// financial year are derived from the period.
    pub fn new(district_code: &str, district_name: &str, period: Date) -> Self {
        let period = period.replace_day(1).unwrap_or(period);
        Self {
            district_code: district_code.to_string(),
            district_name: district_name.to_string(),
            hindi_name: None,
            financial_year: financial_year_for(period),
            month: FiscalMonth::from_calendar(period.month()).name().to_string(),
            period,
            job_data: JobMetrics::default(),
            financial_data: FinancialMetrics::default(),
            works_data: WorksMetrics::default(),
            social_metrics: SocialMetrics::default(),
            data_source: "data.gov.in".to_string(),
            last_updated: OffsetDateTime::now_utc(),
        }
    }
}
