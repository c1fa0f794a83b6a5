//! State-level aggregation over performance records.
//!
//! Callers pass the latest-per-district set (one record per district code,
//! the most recent period) for [`summarize_state`] and
//! [`rank_top_districts`]; [`state_wide_totals`] works over any record set.

use crate::performance::PerformanceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Totals over the latest record of every reporting district.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateTotals {
    pub districts_reporting: usize,
    pub total_person_days: i64,
    pub total_expenditure: i64,
    pub total_works: i64,
    pub completed_works: i64,
    /// Mean of per-district women participation; 0 when nothing reports.
    pub avg_women_participation: f64,
}

/// Sum and average the latest-per-district set.
pub fn summarize_state(latest: &[PerformanceRecord]) -> StateTotals {
    let mut totals = StateTotals::default();
    let mut women_sum = 0.0;

    for record in latest {
        totals.districts_reporting += 1;
        totals.total_person_days += record.job_data.person_days_generated;
        totals.total_expenditure += record.financial_data.total_expenditure;
        totals.total_works += record.works_data.total_works;
        totals.completed_works += record.works_data.completed_works;
        women_sum += record.social_metrics.percentage_women;
    }

    if totals.districts_reporting > 0 {
        totals.avg_women_participation = women_sum / totals.districts_reporting as f64;
    }
    totals
}

/// Top `k` districts by households employed, descending.
///
/// Ties are broken by ascending district code so the ranking does not depend
/// on store order. A district code appears at most once.
pub fn rank_top_districts(latest: &[PerformanceRecord], k: usize) -> Vec<PerformanceRecord> {
    let mut ranked: Vec<&PerformanceRecord> = latest.iter().collect();
    ranked.sort_by(|a, b| {
        b.job_data
            .households_employed
            .cmp(&a.job_data.households_employed)
            .then_with(|| a.district_code.cmp(&b.district_code))
    });

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|record| seen.insert(record.district_code.as_str()))
        .take(k)
        .cloned()
        .collect()
}

/// Totals over every record, regardless of period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordTotals {
    pub records: usize,
    pub total_job_cards: i64,
    pub total_working_families: i64,
    pub total_person_days: i64,
    pub total_expenditure: i64,
    pub total_completed_works: i64,
    pub avg_female_participation: f64,
}

/// Sum every record in the set.
pub fn state_wide_totals(records: &[PerformanceRecord]) -> RecordTotals {
    let mut totals = RecordTotals::default();
    let mut women_sum = 0.0;

    for record in records {
        totals.records += 1;
        totals.total_job_cards += record.job_data.total_job_cards;
        totals.total_working_families += record.job_data.households_employed;
        totals.total_person_days += record.job_data.person_days_generated;
        totals.total_expenditure += record.financial_data.total_expenditure;
        totals.total_completed_works += record.works_data.completed_works;
        women_sum += record.social_metrics.percentage_women;
    }

    if totals.records > 0 {
        totals.avg_female_participation = women_sum / totals.records as f64;
    }
    totals
}
