//! Precision module - granularity of an imprecise date

use serde::{Deserialize, Serialize};

/// Granularity of a date, ordered from coarsest to finest
///
/// Precision decides how many leading fragments of a calendar date carry
/// meaning:
/// - Century: only the hundreds of the year
/// - Decade: only the tens of the year
/// - Year: the year
/// - Month: year and month
/// - Day: year, month and day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// A hundred-year span ("the 15th century")
    Century,

    /// A ten-year span ("the 1980s")
    Decade,

    /// A calendar year ("1965")
    Year,

    /// A calendar month ("January 1980")
    Month,

    /// A single day ("January 1, 1980")
    Day,
}

impl Precision {
    /// Get the precision name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Century => "century",
            Precision::Decade => "decade",
            Precision::Year => "year",
            Precision::Month => "month",
            Precision::Day => "day",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
