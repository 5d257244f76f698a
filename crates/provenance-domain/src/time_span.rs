//! Time spans - uncertainty intervals around a single instant

use crate::date::ImpreciseDate;
use chrono::NaiveDate;

/// Interval bounding when a single instant happened
///
/// A `TimeSpan` is not a duration: "after 1950" says the instant is
/// somewhere after the start of 1950, "between 1950 and 1960" says it fell
/// somewhere in that window. Either raw bound may be unset, meaning the
/// interval is open in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeSpan {
    /// Raw lower bound as stated
    pub earliest_raw: Option<ImpreciseDate>,

    /// Raw upper bound as stated
    pub latest_raw: Option<ImpreciseDate>,
}

impl TimeSpan {
    /// Create a span from two optional raw bounds
    pub fn new(earliest_raw: Option<ImpreciseDate>, latest_raw: Option<ImpreciseDate>) -> Self {
        Self {
            earliest_raw,
            latest_raw,
        }
    }

    /// Both bounds derived from the same phrase
    pub fn from_date(date: ImpreciseDate) -> Self {
        Self::new(Some(date), Some(date))
    }

    /// Open-ended span starting at `date` ("after 1950")
    pub fn starting(date: ImpreciseDate) -> Self {
        Self::new(Some(date), None)
    }

    /// Open-started span ending at `date` ("by 1950")
    pub fn ending(date: ImpreciseDate) -> Self {
        Self::new(None, Some(date))
    }

    /// Outer lower bound
    pub fn earliest(&self) -> Option<NaiveDate> {
        self.earliest_raw.map(|d| d.earliest())
    }

    /// Outer upper bound
    pub fn latest(&self) -> Option<NaiveDate> {
        self.latest_raw.map(|d| d.latest())
    }

    /// True when both bounds are set and pin down the same day
    pub fn is_precise(&self) -> bool {
        match (self.earliest(), self.latest()) {
            (Some(lo), Some(hi)) => lo == hi,
            _ => false,
        }
    }

    /// True when neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.earliest_raw.is_none() && self.latest_raw.is_none()
    }

    /// Bound equality with another span
    pub fn same(&self, other: &TimeSpan) -> bool {
        self.earliest() == other.earliest() && self.latest() == other.latest()
    }

    /// Check if the span admits the given day
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.earliest().map_or(true, |lo| lo <= day) && self.latest().map_or(true, |hi| day <= hi)
    }

    /// Mark every set bound with the given certainty
    pub fn with_certainty(mut self, certain: bool) -> Self {
        self.earliest_raw = self.earliest_raw.map(|d| d.with_certainty(certain));
        self.latest_raw = self.latest_raw.map(|d| d.with_certainty(certain));
        self
    }

    /// Both raw bounds come from one phrase
    fn single_phrase(&self) -> Option<ImpreciseDate> {
        match (self.earliest_raw, self.latest_raw) {
            (Some(a), Some(b)) if a.same(&b) => Some(a),
            _ => None,
        }
    }

    /// Render as the opening half of a period's dates
    ///
    /// `(a, a)` → "a", `(a, b)` → "between a and b", `(_, b)` → "by b",
    /// `(a, _)` → "after a".
    pub fn begin_phrase(&self) -> String {
        if let Some(d) = self.single_phrase() {
            return d.to_string();
        }
        match (self.earliest_raw, self.latest_raw) {
            (Some(a), Some(b)) => format!("between {} and {}", a, b),
            (None, Some(b)) => format!("by {}", b),
            (Some(a), None) => format!("after {}", a),
            (None, None) => String::new(),
        }
    }

    /// Render as the closing half of a period's dates
    ///
    /// Same shapes as [`TimeSpan::begin_phrase`] behind "until", with "by"
    /// read as "sometime before" and "after" as "at least".
    pub fn end_phrase(&self) -> String {
        if let Some(d) = self.single_phrase() {
            return format!("until {}", d);
        }
        match (self.earliest_raw, self.latest_raw) {
            (Some(a), Some(b)) => format!("until between {} and {}", a, b),
            (None, Some(b)) => format!("until sometime before {}", b),
            (Some(a), None) => format!("until at least {}", a),
            (None, None) => String::new(),
        }
    }
}

/// Render a beginning/ending pair as natural text
///
/// Collapses "by X until at least X" into "in X" and an exact day used on
/// both sides into "on X".
///
/// # Examples
///
/// ```
/// use provenance_domain::{time_string, ImpreciseDate, TimeSpan};
///
/// let d = ImpreciseDate::year(1950).unwrap();
/// let text = time_string(Some(&TimeSpan::ending(d)), Some(&TimeSpan::starting(d)));
/// assert_eq!(text, "in 1950");
/// ```
pub fn time_string(beginning: Option<&TimeSpan>, ending: Option<&TimeSpan>) -> String {
    let beginning = beginning.filter(|b| !b.is_unbounded());
    let ending = ending.filter(|e| !e.is_unbounded());

    if let (Some(b), Some(e)) = (beginning, ending) {
        if let (None, Some(hi), Some(lo), None) =
            (b.earliest_raw, b.latest_raw, e.earliest_raw, e.latest_raw)
        {
            if hi.same(&lo) {
                return format!("in {}", hi);
            }
        }
        if b.is_precise() && e.is_precise() && b.same(e) {
            if let Some(d) = b.single_phrase() {
                return format!("on {}", d);
            }
        }
    }

    let mut parts = Vec::new();
    if let Some(b) = beginning {
        parts.push(b.begin_phrase());
    }
    if let Some(e) = ending {
        parts.push(e.end_phrase());
    }
    parts.join(" ")
}
