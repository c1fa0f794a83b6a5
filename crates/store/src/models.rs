//! Database models mapping to the dashboard schema.

use rozgar_core::{
    District, FinancialMetrics, GeoPoint, JobMetrics, PerformanceRecord, SocialMetrics,
    WorksMetrics,
};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};

// =============================================================================
// Districts
// =============================================================================

/// District record.
#[derive(Debug, Clone, FromRow)]
pub struct DistrictRow {
    pub district_code: String,
    pub district_name: String,
    pub hindi_name: String,
    pub state_code: Option<String>,
    pub state_name: String,
    /// 0.0 together with `longitude` when the location is unknown.
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl DistrictRow {
    /// Build a row for a new district.
    pub fn from_district(district: &District) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            district_code: district.code.clone(),
            district_name: district.name.clone(),
            hindi_name: district.hindi_name.clone(),
            state_code: district.state_code.clone(),
            state_name: district.state_name.clone(),
            latitude: district.location.latitude,
            longitude: district.location.longitude,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<DistrictRow> for District {
    fn from(row: DistrictRow) -> Self {
        District {
            code: row.district_code,
            name: row.district_name,
            hindi_name: row.hindi_name,
            state_code: row.state_code,
            state_name: row.state_name,
            location: GeoPoint {
                latitude: row.latitude,
                longitude: row.longitude,
            },
        }
    }
}

// =============================================================================
// Performance records
// =============================================================================

/// One district-month of metrics, flattened into columns.
///
/// `(district_code, period)` is unique.
#[derive(Debug, Clone, FromRow)]
pub struct PerformanceRow {
    pub district_code: String,
    pub district_name: String,
    pub hindi_name: Option<String>,
    pub financial_year: String,
    pub month: String,
    pub period: Date,
    pub total_job_cards: i64,
    pub households_employed: i64,
    pub person_days_generated: i64,
    pub avg_days_per_household: f64,
    pub total_expenditure: i64,
    pub wage_expenditure: i64,
    pub material_expenditure: i64,
    pub total_works: i64,
    pub completed_works: i64,
    pub ongoing_works: i64,
    pub percentage_women: f64,
    pub sc_persons_worked: i64,
    pub st_persons_worked: i64,
    pub data_source: String,
    pub last_updated: OffsetDateTime,
}

impl From<&PerformanceRecord> for PerformanceRow {
    fn from(record: &PerformanceRecord) -> Self {
        Self {
            district_code: record.district_code.clone(),
            district_name: record.district_name.clone(),
            hindi_name: record.hindi_name.clone(),
            financial_year: record.financial_year.clone(),
            month: record.month.clone(),
            period: record.period,
            total_job_cards: record.job_data.total_job_cards,
            households_employed: record.job_data.households_employed,
            person_days_generated: record.job_data.person_days_generated,
            avg_days_per_household: record.job_data.avg_days_per_household,
            total_expenditure: record.financial_data.total_expenditure,
            wage_expenditure: record.financial_data.wage_expenditure,
            material_expenditure: record.financial_data.material_expenditure,
            total_works: record.works_data.total_works,
            completed_works: record.works_data.completed_works,
            ongoing_works: record.works_data.ongoing_works,
            percentage_women: record.social_metrics.percentage_women,
            sc_persons_worked: record.social_metrics.sc_persons_worked,
            st_persons_worked: record.social_metrics.st_persons_worked,
            data_source: record.data_source.clone(),
            last_updated: record.last_updated,
        }
    }
}

impl From<PerformanceRow> for PerformanceRecord {
    fn from(row: PerformanceRow) -> Self {
        PerformanceRecord {
            district_code: row.district_code,
            district_name: row.district_name,
            hindi_name: row.hindi_name,
            financial_year: row.financial_year,
            month: row.month,
            period: row.period,
            job_data: JobMetrics {
                total_job_cards: row.total_job_cards,
                households_employed: row.households_employed,
                person_days_generated: row.person_days_generated,
                avg_days_per_household: row.avg_days_per_household,
            },
            financial_data: FinancialMetrics {
                total_expenditure: row.total_expenditure,
                wage_expenditure: row.wage_expenditure,
                material_expenditure: row.material_expenditure,
            },
            works_data: WorksMetrics {
                total_works: row.total_works,
                completed_works: row.completed_works,
                ongoing_works: row.ongoing_works,
            },
            social_metrics: SocialMetrics {
                percentage_women: row.percentage_women,
                sc_persons_worked: row.sc_persons_worked,
                st_persons_worked: row.st_persons_worked,
            },
            data_source: row.data_source,
            last_updated: row.last_updated,
        }
    }
}

// =============================================================================
// State summaries
// =============================================================================

/// Precomputed state totals for one reporting period.
#[derive(Debug, Clone, FromRow)]
pub struct StateSummaryRow {
    pub state_name: String,
    pub state_code: Option<String>,
    pub financial_year: String,
    pub period: Date,
    pub total_districts: i64,
    pub total_person_days: i64,
    pub total_expenditure: i64,
    pub total_works: i64,
    pub completed_works: i64,
    pub avg_women_participation: f64,
    pub last_updated: OffsetDateTime,
}

// =============================================================================
// Response cache
// =============================================================================

/// Cached API response body.
#[derive(Debug, Clone, FromRow)]
pub struct CacheEntryRow {
    /// Request path and query string.
    pub cache_key: String,
    /// Serialized JSON body, stored verbatim.
    pub payload: String,
    /// Unix seconds after which the entry is no longer served.
    pub expires_at: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl CacheEntryRow {
    /// Whether the entry may still be served at `now`.
    pub fn is_live_at(&self, now: OffsetDateTime) -> bool {
        self.expires_at > now.unix_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn performance_row_preserves_every_metric() {
        let mut record = PerformanceRecord::new("2701", "Ajmer", date!(2024 - 06 - 01));
        record.hindi_name = Some("अजमेर".to_string());
        record.job_data.households_employed = 41;
        record.job_data.avg_days_per_household = 47.5;
        record.financial_data.material_expenditure = 9;
        record.works_data.ongoing_works = 3;
        record.social_metrics.st_persons_worked = 7;

        let row = PerformanceRow::from(&record);
        assert_eq!(row.households_employed, 41);
        assert_eq!(row.material_expenditure, 9);

        let back = PerformanceRecord::from(row);
        assert_eq!(back, record);
    }

    #[test]
    fn district_row_keeps_unknown_location_at_origin() {
        let district = District {
            code: "2799".to_string(),
            name: "Nowhere".to_string(),
            hindi_name: "कहीं नहीं".to_string(),
            state_code: None,
            state_name: "Rajasthan".to_string(),
            location: GeoPoint::default(),
        };
        let row = DistrictRow::from_district(&district);
        assert_eq!((row.latitude, row.longitude), (0.0, 0.0));
        let back = District::from(row);
        assert!(back.location.is_unknown());
        assert_eq!(back, district);
    }

    #[test]
    fn cache_entry_expiry_is_exclusive() {
        let now = OffsetDateTime::now_utc();
        let entry = CacheEntryRow {
            cache_key: "/api/districts".to_string(),
            payload: "{}".to_string(),
            expires_at: now.unix_timestamp(),
            created_at: now,
            updated_at: now,
        };
        assert!(!entry.is_live_at(now));
        assert!(entry.is_live_at(now - time::Duration::seconds(1)));
    }
}
