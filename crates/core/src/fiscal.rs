//! Fiscal month ordering.
//!
//! The programme reports on an April–March year, so calendar or lexical
//! ordering of month names puts the series out of order. Everything that
//! presents a monthly series goes through the ordinal map here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::{Date, Month};

/// A month positioned within the April–March reporting year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FiscalMonth {
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
    January,
    February,
    March,
}

impl FiscalMonth {
    /// All months in fiscal order.
    pub const ALL: [FiscalMonth; 12] = [
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::January,
        Self::February,
        Self::March,
    ];

    /// Position in the fiscal year, April = 1 through March = 12.
    pub fn ordinal(self) -> u8 {
        match self {
            Self::April => 1,
            Self::May => 2,
            Self::June => 3,
            Self::July => 4,
            Self::August => 5,
            Self::September => 6,
            Self::October => 7,
            Self::November => 8,
            Self::December => 9,
            Self::January => 10,
            Self::February => 11,
            Self::March => 12,
        }
    }

    /// English month name as stored in performance records.
    pub fn name(self) -> &'static str {
        match self {
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
        }
    }

    /// Parse a month name. Accepts full names and three-letter
    /// abbreviations, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|month| {
            let full = month.name();
            full.eq_ignore_ascii_case(name)
                || (name.len() == 3 && full[..3].eq_ignore_ascii_case(name))
        })
    }

    /// Map a calendar month onto the fiscal year.
    pub fn from_calendar(month: Month) -> Self {
        match month {
            Month::April => Self::April,
            Month::May => Self::May,
            Month::June => Self::June,
            Month::July => Self::July,
            Month::August => Self::August,
            Month::September => Self::September,
            Month::October => Self::October,
            Month::November => Self::November,
            Month::December => Self::December,
            Month::January => Self::January,
            Month::February => Self::February,
            Month::March => Self::March,
        }
    }
}

impl fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FiscalMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::InvalidMonth(s.to_string()))
    }
}

/// Fiscal ordinal for a stored month name. Unrecognised names sort first (0).
pub fn fiscal_ordinal(name: &str) -> u8 {
    FiscalMonth::from_name(name).map_or(0, FiscalMonth::ordinal)
}

/// Stable sort of a monthly series into April–March order.
pub fn sort_fiscal<T, F>(items: &mut [T], month_of: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_key(|item| fiscal_ordinal(month_of(item)));
}

/// Financial year label ("2024-25") for the period containing `date`.
pub fn financial_year_for(date: Date) -> String {
    let year = date.year();
    let start = if (date.month() as u8) >= (Month::April as u8) {
        year
    } else {
        year - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}
