//! Plain-text views of the dashboard.

use crate::controller::Dashboard;
use crate::format::{
    Comparison, Lang, NOT_APPLICABLE, Progress, compare_to_average, format_count,
    format_magnitude, format_percent, progress_badge, rank_medal,
};
use crate::snapshot::StateBundle;
use rozgar_core::api::{DistrictSummaryResponse, HistoricalPoint, StateSummaryResponse, TopDistrict};
use time::OffsetDateTime;
use time::macros::format_description;

/// Monthly goals shown as progress badges on the district card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targets {
    pub total_job_cards: f64,
    pub households_employed: f64,
    pub person_days_generated: f64,
    pub total_expenditure: f64,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            total_job_cards: 50_000.0,
            households_employed: 45_000.0,
            person_days_generated: 2_000_000.0,
            total_expenditure: 120_000_000.0,
        }
    }
}

struct Labels {
    title: &'static str,
    offline: &'static str,
    last_sync: &'static str,
    state_overview: &'static str,
    districts: &'static str,
    person_days: &'static str,
    expenditure: &'static str,
    works: &'static str,
    women: &'static str,
    job_cards: &'static str,
    households: &'static str,
    avg_days: &'static str,
    wages: &'static str,
    completed: &'static str,
    ongoing: &'static str,
    rank: &'static str,
    target: &'static str,
    vs_state: &'static str,
    more: &'static str,
    less: &'static str,
    equal: &'static str,
    history: &'static str,
    month: &'static str,
    top: &'static str,
    unavailable: &'static str,
    no_district: &'static str,
}

const EN: Labels = Labels {
    title: "MGNREGA District Dashboard",
    offline: "OFFLINE MODE",
    last_sync: "Showing cached data (Last Sync:",
    state_overview: "State overview",
    districts: "Districts",
    person_days: "Person-days",
    expenditure: "Expenditure (₹)",
    works: "Works",
    women: "Women participation",
    job_cards: "Job cards",
    households: "Households employed",
    avg_days: "Average days per household",
    wages: "Wage expenditure (₹)",
    completed: "Completed works",
    ongoing: "Ongoing works",
    rank: "Rank",
    target: "Target",
    vs_state: "vs state average",
    more: "more",
    less: "less",
    equal: "equal",
    history: "Monthly trend",
    month: "Month",
    top: "Top districts",
    unavailable: "Unable to load data. Please check your connection.",
    no_district: "No district selected",
};

const HI: Labels = Labels {
    title: "मनरेगा ज़िला डैशबोर्ड",
    offline: "ऑफ़लाइन मोड",
    last_sync: "संग्रहित डेटा दिखाया जा रहा है (अंतिम अपडेट:",
    state_overview: "राज्य का सारांश",
    districts: "ज़िले",
    person_days: "मानव-दिवस",
    expenditure: "खर्च (₹)",
    works: "कार्य",
    women: "महिला भागीदारी",
    job_cards: "जॉब कार्ड",
    households: "रोज़गार पाने वाले परिवार",
    avg_days: "प्रति परिवार औसत दिन",
    wages: "मज़दूरी खर्च (₹)",
    completed: "पूरे हुए कार्य",
    ongoing: "चालू कार्य",
    rank: "रैंक",
    target: "लक्ष्य",
    vs_state: "राज्य औसत से",
    more: "अधिक",
    less: "कम",
    equal: "बराबर",
    history: "मासिक रुझान",
    month: "महीना",
    top: "शीर्ष ज़िले",
    unavailable: "डेटा लोड नहीं हो सका। कृपया अपना कनेक्शन जांचें।",
    no_district: "कोई ज़िला नहीं चुना गया",
};

fn labels(lang: Lang) -> &'static Labels {
    match lang {
        Lang::En => &EN,
        Lang::Hi => &HI,
    }
}

fn as_f64(value: Option<i64>) -> Option<f64> {
    value.map(|v| v as f64)
}

fn sync_time(at: OffsetDateTime) -> String {
    at.format(format_description!("[year]-[month]-[day] [hour]:[minute] UTC"))
        .unwrap_or_else(|_| NOT_APPLICABLE.to_string())
}

/// Banner shown while stale snapshots are on display.
pub fn offline_banner(last_sync: Option<OffsetDateTime>, lang: Lang) -> String {
    let l = labels(lang);
    let when = last_sync.map_or_else(|| NOT_APPLICABLE.to_string(), sync_time);
    format!("⚠ {} | {} {when})", l.offline, l.last_sync)
}

/// Error view for a resource with neither live data nor a snapshot.
pub fn error_view(message: &str, lang: Lang) -> Vec<String> {
    vec![labels(lang).unavailable.to_string(), format!("  ({message})")]
}

pub fn comparison_text(comparison: Comparison, lang: Lang) -> String {
    let l = labels(lang);
    match comparison {
        Comparison::Above(pct) => format!("↑ {pct:.1}% {} {}", l.more, l.vs_state),
        Comparison::Below(pct) => format!("↓ {pct:.1}% {} {}", l.less, l.vs_state),
        Comparison::Equal => format!("→ {} {}", l.equal, l.vs_state),
        Comparison::NotApplicable => NOT_APPLICABLE.to_string(),
    }
}

pub fn progress_text(progress: Progress, target: f64, lang: Lang) -> String {
    let l = labels(lang);
    let target = format_magnitude(Some(target), lang);
    match progress {
        Progress::OnTarget(pct) => format!("✅ {pct:.0}% ({}: {target})", l.target),
        Progress::Behind(pct) => format!("⚠️ {pct:.0}% ({}: {target})", l.target),
        Progress::NotApplicable => NOT_APPLICABLE.to_string(),
    }
}

/// State-level cards.
pub fn state_cards(summary: &StateSummaryResponse, lang: Lang) -> Vec<String> {
    let l = labels(lang);
    let data = &summary.data;
    vec![
        format!("== {} ==", l.state_overview),
        format!("{}: {}", l.districts, format_count(summary.total_districts)),
        format!(
            "{}: {}",
            l.person_days,
            format_magnitude(as_f64(data.total_person_days), lang)
        ),
        format!(
            "{}: {}",
            l.expenditure,
            format_magnitude(as_f64(data.total_expenditure), lang)
        ),
        format!("{}: {}", l.works, format_count(data.total_works)),
        format!("{}: {}", l.women, format_percent(data.avg_women_participation)),
    ]
}

/// State person-days per reporting district.
fn state_average_person_days(summary: &StateSummaryResponse) -> Option<f64> {
    let districts = summary.total_districts.filter(|n| *n > 0)?;
    Some(summary.data.total_person_days? as f64 / districts as f64)
}

/// District card with targets and comparison to the state average.
pub fn district_card(
    summary: &DistrictSummaryResponse,
    state: Option<&StateBundle>,
    rank: Option<usize>,
    targets: &Targets,
    lang: Lang,
) -> Vec<String> {
    let l = labels(lang);
    let data = &summary.data;
    let name = match (lang, summary.district.hindi_name.as_deref()) {
        (Lang::Hi, Some(hindi)) => hindi,
        _ => summary.district.name.as_str(),
    };

    let mut lines = vec![format!("== {name} ({}) ==", summary.district.code)];
    if let Some(rank) = rank {
        let total = state
            .and_then(|bundle| bundle.state_summary.total_districts)
            .map_or_else(|| NOT_APPLICABLE.to_string(), |n| n.to_string());
        lines.push(format!(
            "{} {}: {rank}/{total}",
            rank_medal(rank).symbol(),
            l.rank
        ));
    }

    let with_target = |label: &str, value: Option<i64>, target: f64| {
        let badge = progress_badge(as_f64(value), Some(target));
        format!(
            "{label}: {}  {}",
            format_magnitude(as_f64(value), lang),
            progress_text(badge, target, lang)
        )
    };
    lines.push(with_target(l.job_cards, data.total_job_cards, targets.total_job_cards));
    lines.push(with_target(
        l.households,
        data.households_employed,
        targets.households_employed,
    ));
    lines.push(with_target(
        l.person_days,
        data.person_days_generated,
        targets.person_days_generated,
    ));
    lines.push(with_target(
        l.expenditure,
        data.total_expenditure,
        targets.total_expenditure,
    ));

    lines.push(format!(
        "{}: {}",
        l.avg_days,
        data.avg_days_per_household
            .filter(|v| v.is_finite())
            .map_or_else(|| NOT_APPLICABLE.to_string(), |v| format!("{v:.1}"))
    ));
    lines.push(format!(
        "{}: {}",
        l.wages,
        format_magnitude(as_f64(data.wage_expenditure), lang)
    ));
    lines.push(format!(
        "{}: {} | {}: {} | {}: {}",
        l.completed,
        format_count(data.completed_works),
        l.ongoing,
        format_count(data.ongoing_works),
        l.works,
        format_count(data.total_works)
    ));

    let state_summary = state.map(|bundle| &bundle.state_summary);
    let women = compare_to_average(
        data.percentage_women,
        state_summary.and_then(|s| s.data.avg_women_participation),
    );
    lines.push(format!(
        "{}: {}  {}",
        l.women,
        format_percent(data.percentage_women),
        comparison_text(women, lang)
    ));

    let person_days = compare_to_average(
        as_f64(data.person_days_generated),
        state_summary.and_then(state_average_person_days),
    );
    lines.push(format!(
        "{}: {}",
        l.person_days,
        comparison_text(person_days, lang)
    ));
    lines
}

/// Monthly table in the order received (April–March).
pub fn historical_table(points: &[HistoricalPoint], lang: Lang) -> Vec<String> {
    let l = labels(lang);
    let mut lines = vec![
        format!("== {} ==", l.history),
        format!("{:<12} {:>20} {:>20}", l.month, l.person_days, l.expenditure),
    ];
    for point in points {
        lines.push(format!(
            "{:<12} {:>20} {:>20}",
            point.month,
            format_magnitude(as_f64(point.person_days), lang),
            format_magnitude(as_f64(point.expenditure), lang)
        ));
    }
    lines
}

/// Ranking table with medals.
pub fn top_districts_table(top: &[TopDistrict], lang: Lang) -> Vec<String> {
    let l = labels(lang);
    let mut lines = vec![format!("== {} ==", l.top)];
    for (index, district) in top.iter().enumerate() {
        let rank = index + 1;
        let name = match (lang, district.hindi_name.as_deref()) {
            (Lang::Hi, Some(hindi)) => hindi,
            _ => district.district_name.as_str(),
        };
        lines.push(format!(
            "{} {rank}. {name}  {}: {}  {}: {}",
            rank_medal(rank).symbol(),
            l.households,
            format_count(district.households_employed),
            l.person_days,
            format_magnitude(as_f64(district.person_days_generated), lang)
        ));
    }
    lines
}

/// Full dashboard as text.
pub fn render_dashboard(dashboard: &Dashboard, targets: &Targets, lang: Lang) -> String {
    let l = labels(lang);
    let mut lines = vec![l.title.to_string()];

    if dashboard.is_offline() {
        lines.push(offline_banner(dashboard.last_sync(), lang));
    }

    let bundle = dashboard.state_bundle.value();
    match (bundle, dashboard.state_bundle.error()) {
        (Some(bundle), _) => lines.extend(state_cards(&bundle.state_summary, lang)),
        (None, Some(message)) => lines.extend(error_view(message, lang)),
        (None, None) => {}
    }

    lines.push(String::new());
    match (dashboard.summary.value(), dashboard.summary.error()) {
        (Some(summary), _) => lines.extend(district_card(
            summary,
            bundle,
            dashboard.selected_rank(),
            targets,
            lang,
        )),
        (None, Some(message)) => lines.extend(error_view(message, lang)),
        (None, None) => lines.push(l.no_district.to_string()),
    }

    if let Some(points) = dashboard.historical.value() {
        lines.push(String::new());
        lines.extend(historical_table(points, lang));
    }

    if let Some(bundle) = bundle {
        lines.push(String::new());
        lines.extend(top_districts_table(&bundle.top_districts, lang));
    }

    lines.join("\n")
}
