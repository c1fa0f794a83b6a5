//! Test fixtures for districts and performance rows.

use rozgar_core::{District, GeoPoint, PerformanceRecord};
use rozgar_store::models::{DistrictRow, PerformanceRow};
use time::macros::datetime;
use time::{Date, Month};

/// A district row with a known location.
#[allow(dead_code)]
pub fn district_row(code: &str, name: &str, lat: f64, lon: f64) -> DistrictRow {
    let mut row = DistrictRow::from_district(&District {
        code: code.to_string(),
        name: name.to_string(),
        hindi_name: format!("{name} (hi)"),
        state_code: Some("27".to_string()),
        state_name: "Rajasthan".to_string(),
        location: GeoPoint {
            latitude: lat,
            longitude: lon,
        },
    });
    // Whole seconds so timestamps survive every backend's precision.
    row.created_at = datetime!(2024-11-01 00:00 UTC);
    row.updated_at = row.created_at;
    row
}

/// A performance record for the first of `month` 2024.
#[allow(dead_code)]
pub fn performance_record(code: &str, month: Month, households: i64) -> PerformanceRecord {
    let period = Date::from_calendar_date(2024, month, 1).expect("valid date");
    let mut record = PerformanceRecord::new(code, &format!("District {code}"), period);
    record.job_data.households_employed = households;
    record.job_data.person_days_generated = households * 5;
    record.financial_data.total_expenditure = households * 1_400;
    record.works_data.total_works = 10;
    record.works_data.completed_works = 6;
    record.social_metrics.percentage_women = 40.0;
    record.last_updated = datetime!(2024-11-01 00:00 UTC);
    record
}

/// Row form of [`performance_record`].
#[allow(dead_code)]
pub fn performance_row(code: &str, month: Month, households: i64) -> PerformanceRow {
    PerformanceRow::from(&performance_record(code, month, households))
}
