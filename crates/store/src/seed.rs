//! Demo data: thirteen Rajasthan districts with April–October 2024 figures.
//!
//! Values are derived deterministically from the district and month index so
//! repeated seeding yields identical rows.

use crate::error::{StoreError, StoreResult};
use crate::models::{DistrictRow, PerformanceRow};
use crate::store::DashboardStore;
use rozgar_core::{District, GeoPoint, PerformanceRecord};
use time::{Date, Month, OffsetDateTime};

/// State code of the demo districts.
pub const DEMO_STATE_CODE: &str = "27";

/// Number of reporting months seeded per district (April through October).
pub const DEMO_MONTHS: u8 = 7;

const DEMO_DISTRICTS: [(&str, &str, &str, f64, f64); 13] = [
    ("2701", "Ajmer", "अजमेर", 26.4499, 74.6399),
    ("2702", "Alwar", "अलवर", 27.5530, 76.6346),
    ("2703", "Banswara", "बांसवाड़ा", 23.5461, 74.4350),
    ("2704", "Baran", "बारां", 25.1000, 76.5166),
    ("2705", "Barmer", "बाड़मेर", 25.7521, 71.3967),
    ("2706", "Bharatpur", "भरतपुर", 27.2152, 77.4930),
    ("2707", "Bhilwara", "भीलवाड़ा", 25.3407, 74.6313),
    ("2708", "Bikaner", "बीकानेर", 28.0229, 73.3119),
    ("2709", "Bundi", "बूंदी", 25.4305, 75.6499),
    ("2710", "Chittorgarh", "चित्तौड़गढ़", 24.8887, 74.6269),
    ("2711", "Churu", "चूरू", 28.2920, 74.9500),
    ("2712", "Dausa", "दौसा", 26.8932, 76.3375),
    ("2713", "Dungarpur", "डूंगरपुर", 23.8430, 73.7142),
];

/// Counts written by [`seed_demo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub districts: usize,
    pub records: usize,
}

/// The demo districts, reported under `state_name`.
pub fn demo_districts(state_name: &str) -> Vec<District> {
    DEMO_DISTRICTS
        .iter()
        .map(|(code, name, hindi, lat, lon)| District {
            code: (*code).to_string(),
            name: (*name).to_string(),
            hindi_name: (*hindi).to_string(),
            state_code: Some(DEMO_STATE_CODE.to_string()),
            state_name: state_name.to_string(),
            location: GeoPoint {
                latitude: *lat,
                longitude: *lon,
            },
        })
        .collect()
}

/// Base figure for a district-month, in the 40 000..90 000 range.
fn base_value(district_index: usize, month_index: u8) -> i64 {
    let spread = (district_index as i64 * 7_919 + i64::from(month_index) * 3_571) % 50_000;
    40_000 + spread
}

/// Monthly performance records for every demo district.
pub fn demo_records(state_name: &str) -> StoreResult<Vec<PerformanceRecord>> {
    let now = OffsetDateTime::now_utc();
    let mut records = Vec::with_capacity(DEMO_DISTRICTS.len() * usize::from(DEMO_MONTHS));

    for (d, district) in demo_districts(state_name).iter().enumerate() {
        for m in 0..DEMO_MONTHS {
            let period = Date::from_calendar_date(2024, Month::April.nth_next(m), 1)
                .map_err(|e| StoreError::Internal(format!("invalid demo period: {e}")))?;
            let base = base_value(d, m);
            let (di, mi) = (d as i64, i64::from(m));

            let mut record = PerformanceRecord::new(&district.code, &district.name, period);
            record.hindi_name = Some(district.hindi_name.clone());
            record.job_data.total_job_cards = base;
            record.job_data.households_employed = base * 9 / 10;
            record.job_data.person_days_generated = base * 5;
            record.job_data.avg_days_per_household = (50 + (di * 13 + mi * 7) % 40) as f64;
            record.financial_data.total_expenditure = base * 1_400;
            record.financial_data.wage_expenditure = base * 1_000;
            record.financial_data.material_expenditure = base * 400;
            record.works_data.completed_works = 400 + (di * 97 + mi * 53) % 800;
            record.works_data.ongoing_works = 150 + (di * 31 + mi * 17) % 300;
            record.works_data.total_works =
                record.works_data.completed_works + record.works_data.ongoing_works;
            record.social_metrics.percentage_women = (30 + (di * 11 + mi * 5) % 20) as f64;
            record.social_metrics.sc_persons_worked = base * 18 / 100;
            record.social_metrics.st_persons_worked = base * 13 / 100;
            record.data_source = "demo-seed".to_string();
            record.last_updated = now;
            records.push(record);
        }
    }
    Ok(records)
}

/// Upsert the demo districts and their performance records.
pub async fn seed_demo(store: &dyn DashboardStore, state_name: &str) -> StoreResult<SeedStats> {
    let districts = demo_districts(state_name);
    for district in &districts {
        store
            .upsert_district(&DistrictRow::from_district(district))
            .await?;
    }

    let records = demo_records(state_name)?;
    for record in &records {
        store.upsert_performance(&PerformanceRow::from(record)).await?;
    }

    let stats = SeedStats {
        districts: districts.len(),
        records: records.len(),
    };
    tracing::info!(
        districts = stats.districts,
        records = stats.records,
        "Seeded demo data"
    );
    Ok(stats)
}
