//! Derived display values.
//!
//! Every function here accepts missing or non-numeric input and returns a
//! "not applicable" result instead of failing.

use std::fmt;
use std::str::FromStr;

/// Rendered in place of a value that cannot be computed.
pub const NOT_APPLICABLE: &str = "N/A";

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    Hi,
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "hi" | "hindi" => Ok(Self::Hi),
            other => Err(format!("unsupported language '{other}' (expected en or hi)")),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::En => "en",
            Self::Hi => "hi",
        })
    }
}

/// A district value relative to the state average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    /// Percent above the average.
    Above(f64),
    /// Percent below the average.
    Below(f64),
    Equal,
    NotApplicable,
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn compare_to_average(value: Option<f64>, average: Option<f64>) -> Comparison {
    let (Some(value), Some(average)) = (finite(value), finite(average)) else {
        return Comparison::NotApplicable;
    };
    if average == 0.0 {
        return Comparison::NotApplicable;
    }

    let diff = value - average;
    let pct = (diff / average * 100.0).abs();
    if diff > 0.0 {
        Comparison::Above(pct)
    } else if diff < 0.0 {
        Comparison::Below(pct)
    } else {
        Comparison::Equal
    }
}

/// Progress of a value towards a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    OnTarget(f64),
    Behind(f64),
    NotApplicable,
}

impl Progress {
    /// Completion percentage capped at 100, for progress bars.
    pub fn capped_percent(&self) -> Option<f64> {
        match self {
            Self::OnTarget(_) => Some(100.0),
            Self::Behind(pct) => Some(pct.clamp(0.0, 100.0)),
            Self::NotApplicable => None,
        }
    }
}

pub fn progress_badge(value: Option<f64>, target: Option<f64>) -> Progress {
    let (Some(value), Some(target)) = (finite(value), finite(target)) else {
        return Progress::NotApplicable;
    };
    if target <= 0.0 {
        return Progress::NotApplicable;
    }

    let pct = value / target * 100.0;
    if pct >= 100.0 {
        Progress::OnTarget(pct)
    } else {
        Progress::Behind(pct)
    }
}

/// Ranking marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    Other,
}

impl Medal {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
            Self::Other => "📊",
        }
    }
}

/// Medal for a 1-based rank.
pub fn rank_medal(rank: usize) -> Medal {
    match rank {
        1 => Medal::Gold,
        2 => Medal::Silver,
        3 => Medal::Bronze,
        _ => Medal::Other,
    }
}

/// Group digits the Indian way: last three, then pairs (12,34,567).
pub fn format_indian_grouping(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let sign = if n < 0 { "-" } else { "" };
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{sign}{},{tail}", groups.join(","))
}

/// Short magnitude in crore/lakh/thousand with two decimals.
///
/// Missing values render as "0"; smaller values are grouped in full.
pub fn format_magnitude(value: Option<f64>, lang: Lang) -> String {
    let Some(value) = value else {
        return "0".to_string();
    };
    if !value.is_finite() {
        return NOT_APPLICABLE.to_string();
    }

    let (crore, lakh, thousand) = match lang {
        Lang::En => ("Crore", "Lakh", "Thousand"),
        Lang::Hi => ("करोड़", "लाख", "हज़ार"),
    };

    if value >= 1e7 {
        format!("{:.2} {crore}", value / 1e7)
    } else if value >= 1e5 {
        format!("{:.2} {lakh}", value / 1e5)
    } else if value >= 1e3 {
        format!("{:.2} {thousand}", value / 1e3)
    } else if value.fract() == 0.0 {
        format_indian_grouping(value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Whole number or "N/A".
pub fn format_count(value: Option<i64>) -> String {
    value.map_or_else(|| NOT_APPLICABLE.to_string(), format_indian_grouping)
}

/// Percentage with one decimal or "N/A".
pub fn format_percent(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{v:.1}%"),
        None => NOT_APPLICABLE.to_string(),
    }
}
