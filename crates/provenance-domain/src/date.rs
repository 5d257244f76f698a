//! Imprecise dates - a calendar date qualified by precision and certainty

use crate::precision::Precision;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::fmt;

/// A calendar date plus the precision it was stated with and a certainty flag
///
/// The stored `date` is a representative day; only the fragments selected
/// by `precision` carry meaning. The interval a date covers is always
/// derived from `date` and `precision`, so changing the precision after
/// construction moves `earliest`/`latest` with it.
///
/// # Examples
///
/// ```
/// use provenance_domain::{ImpreciseDate, Precision};
///
/// let eighties = ImpreciseDate::decade(1980).unwrap();
/// assert_eq!(eighties.earliest().to_string(), "1980-01-01");
/// assert_eq!(eighties.latest().to_string(), "1989-12-31");
/// assert_eq!(eighties.precision, Precision::Decade);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImpreciseDate {
    /// Representative calendar day
    pub date: NaiveDate,

    /// Granularity of the statement
    pub precision: Precision,

    /// False when the source hedged the date ("circa", "?")
    pub certain: bool,
}

impl ImpreciseDate {
    /// Create a certain date
    pub fn new(date: NaiveDate, precision: Precision) -> Self {
        Self {
            date,
            precision,
            certain: true,
        }
    }

    /// Create a date from raw fragments
    ///
    /// Returns `None` when the fragments do not form a valid calendar day.
    pub fn from_ymd(year: i32, month: u32, day: u32, precision: Precision) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|d| Self::new(d, precision))
    }

    /// A day-precision date
    pub fn day(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::from_ymd(year, month, day, Precision::Day)
    }

    /// A month-precision date
    pub fn month(year: i32, month: u32) -> Option<Self> {
        Self::from_ymd(year, month, 1, Precision::Month)
    }

    /// A year-precision date (astronomical numbering, negative for BCE)
    pub fn year(year: i32) -> Option<Self> {
        Self::from_ymd(year, 1, 1, Precision::Year)
    }

    /// A decade-precision date; `year` is any year inside the decade
    pub fn decade(year: i32) -> Option<Self> {
        Self::from_ymd(year - year.rem_euclid(10), 1, 1, Precision::Decade)
    }

    /// The `ordinal`-th century, CE or BCE
    ///
    /// CE centuries are anchored on their first year (the 7th century is
    /// stored as 601); BCE centuries on `-(100 * (n - 1) + 99)`.
    pub fn century(ordinal: u32, bce: bool) -> Option<Self> {
        if ordinal == 0 {
            return None;
        }
        let base = 100 * (ordinal as i32 - 1);
        let year = if bce { -(base + 99) } else { base + 1 };
        Self::from_ymd(year, 1, 1, Precision::Century)
    }

    /// Return a copy with the certainty flag replaced
    pub fn with_certainty(mut self, certain: bool) -> Self {
        self.certain = certain;
        self
    }

    /// Return a copy marked as uncertain
    pub fn uncertain(self) -> Self {
        self.with_certainty(false)
    }

    /// First and last year covered at the current precision
    fn year_bounds(&self) -> (i32, i32) {
        let year = self.date.year();
        match self.precision {
            Precision::Century => {
                let start = if year > 0 {
                    ((year - 1) / 100) * 100 + 1
                } else {
                    year - year.rem_euclid(100)
                };
                (start, start + 99)
            }
            Precision::Decade => {
                let start = year - year.rem_euclid(10);
                (start, start + 9)
            }
            _ => (year, year),
        }
    }

    /// First day consistent with the precision
    pub fn earliest(&self) -> NaiveDate {
        match self.precision {
            Precision::Day => self.date,
            Precision::Month => self.date.with_day(1).unwrap_or(self.date),
            _ => {
                let (start, _) = self.year_bounds();
                NaiveDate::from_ymd_opt(start, 1, 1).unwrap_or(self.date)
            }
        }
    }

    /// Last day consistent with the precision
    pub fn latest(&self) -> NaiveDate {
        match self.precision {
            Precision::Day => self.date,
            Precision::Month => last_day_of_month(self.date.year(), self.date.month())
                .unwrap_or(self.date),
            _ => {
                let (_, end) = self.year_bounds();
                NaiveDate::from_ymd_opt(end, 12, 31).unwrap_or(self.date)
            }
        }
    }

    /// Same precision and same covered interval, ignoring certainty
    pub fn same(&self, other: &ImpreciseDate) -> bool {
        self.precision == other.precision
            && self.earliest() == other.earliest()
            && self.latest() == other.latest()
    }

    /// Order by normalized instant (earliest, then latest), not raw fragments
    pub fn cmp_instant(&self, other: &ImpreciseDate) -> Ordering {
        self.earliest()
            .cmp(&other.earliest())
            .then_with(|| self.latest().cmp(&other.latest()))
    }

    /// Ordinal number of the century containing this date
    pub fn century_ordinal(&self) -> u32 {
        let year = self.date.year();
        if year > 0 {
            ((year - 1) / 100 + 1) as u32
        } else {
            ((-year) / 100 + 1) as u32
        }
    }

    /// Render without the trailing uncertainty marker
    pub fn to_plain_string(&self) -> String {
        let year = self.date.year();
        match self.precision {
            Precision::Century => {
                let n = self.century_ordinal();
                if year > 0 {
                    format!("the {}{} Century", n, ordinal_suffix(n))
                } else {
                    format!("the {}{} Century BCE", n, ordinal_suffix(n))
                }
            }
            Precision::Decade => {
                let (start, _) = self.year_bounds();
                if start >= 0 {
                    format!("the {}s", start)
                } else {
                    format!("the {}s BCE", -start)
                }
            }
            Precision::Year => format_year(year),
            Precision::Month => format!("{} {}", month_name(self.date.month()), format_year(year)),
            Precision::Day => format!(
                "{} {}, {}",
                month_name(self.date.month()),
                self.date.day(),
                format_year(year)
            ),
        }
    }
}

impl fmt::Display for ImpreciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain_string())?;
        if !self.certain {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// Full English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ];
    MONTHS
        .get((month as usize).wrapping_sub(1))
        .copied()
        .unwrap_or("")
}

/// English ordinal suffix ("st", "nd", "rd", "th")
pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn format_year(year: i32) -> String {
    if year <= 0 {
        format!("{} BCE", -year)
    } else if year < 100 {
        format!("{} CE", year)
    } else {
        year.to_string()
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        NaiveDate::from_ymd_opt(year, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).and_then(|d| d.pred_opt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_bounds_are_equal() {
        let d = ImpreciseDate::day(1980, 1, 1).unwrap();
        assert_eq!(d.earliest(), d.latest());
    }

    #[test]
    fn test_month_bounds() {
        let d = ImpreciseDate::month(1980, 2).unwrap();
        assert_eq!(d.earliest(), ymd(1980, 2, 1));
        assert_eq!(d.latest(), ymd(1980, 2, 29));
    }

    #[test]
    fn test_year_bounds() {
        let d = ImpreciseDate::year(1935).unwrap();
        assert_eq!(d.earliest(), ymd(1935, 1, 1));
        assert_eq!(d.latest(), ymd(1935, 12, 31));
    }

    #[test]
    fn test_century_ce_bounds() {
        let d = ImpreciseDate::century(7, false).unwrap();
        assert_eq!(d.earliest(), ymd(601, 1, 1));
        assert_eq!(d.latest(), ymd(700, 12, 31));
    }

    #[test]
    fn test_century_bce_bounds() {
        let d = ImpreciseDate::century(7, true).unwrap();
        assert_eq!(d.earliest(), ymd(-700, 1, 1));
        assert_eq!(d.latest(), ymd(-601, 12, 31));
    }

    #[test]
    fn test_changing_precision_moves_bounds() {
        let mut d = ImpreciseDate::day(1985, 6, 15).unwrap();
        d.precision = Precision::Decade;
        assert_eq!(d.earliest(), ymd(1980, 1, 1));
        assert_eq!(d.latest(), ymd(1989, 12, 31));
        d.precision = Precision::Month;
        assert_eq!(d.earliest(), ymd(1985, 6, 1));
        assert_eq!(d.latest(), ymd(1985, 6, 30));
    }

    #[test]
    fn test_cmp_instant_across_precisions() {
        let year = ImpreciseDate::year(1980).unwrap();
        let day = ImpreciseDate::day(1980, 1, 1).unwrap();
        let later = ImpreciseDate::day(1980, 3, 1).unwrap();
        // Same start, but the year ends later than the day
        assert_eq!(day.cmp_instant(&year), Ordering::Less);
        assert_eq!(year.cmp_instant(&later), Ordering::Less);
    }

    #[test]
    fn test_same_ignores_certainty() {
        let a = ImpreciseDate::year(1965).unwrap();
        let b = a.uncertain();
        assert!(a.same(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(ImpreciseDate::century(7, false).unwrap().to_string(), "the 7th Century");
        assert_eq!(ImpreciseDate::century(7, true).unwrap().to_string(), "the 7th Century BCE");
        assert_eq!(ImpreciseDate::century(21, false).unwrap().to_string(), "the 21st Century");
        assert_eq!(ImpreciseDate::decade(1985).unwrap().to_string(), "the 1980s");
        assert_eq!(ImpreciseDate::year(1965).unwrap().uncertain().to_string(), "1965?");
        assert_eq!(ImpreciseDate::year(-500).unwrap().to_string(), "500 BCE");
        assert_eq!(ImpreciseDate::year(50).unwrap().to_string(), "50 CE");
        assert_eq!(ImpreciseDate::month(1980, 1).unwrap().to_string(), "January 1980");
        assert_eq!(ImpreciseDate::day(1980, 10, 14).unwrap().to_string(), "October 14, 1980");
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(22), "nd");
    }

    #[test]
    fn test_invalid_fragments() {
        assert!(ImpreciseDate::day(1980, 2, 30).is_none());
        assert!(ImpreciseDate::century(0, false).is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_precision() -> impl Strategy<Value = Precision> {
        prop_oneof![
            Just(Precision::Century),
            Just(Precision::Decade),
            Just(Precision::Year),
            Just(Precision::Month),
            Just(Precision::Day),
        ]
    }

    proptest! {
        /// Property: earliest never exceeds latest
        #[test]
        fn test_earliest_not_after_latest(
            year in -3000i32..3000,
            month in 1u32..=12,
            day in 1u32..=28,
            precision in any_precision(),
        ) {
            let d = ImpreciseDate::from_ymd(year, month, day, precision).unwrap();
            prop_assert!(d.earliest() <= d.latest());
            if precision == Precision::Day {
                prop_assert_eq!(d.earliest(), d.latest());
            }
        }

        /// Property: the representative date lies inside its own interval
        #[test]
        fn test_date_inside_interval(
            year in -3000i32..3000,
            month in 1u32..=12,
            precision in any_precision(),
        ) {
            let d = ImpreciseDate::from_ymd(year, month, 1, precision).unwrap();
            prop_assert!(d.earliest() <= d.date);
            prop_assert!(d.date <= d.latest());
        }
    }
}
