//! Date scanning - find and remove date phrases at five granularities

use once_cell::sync::Lazy;
use provenance_domain::ImpreciseDate;
use regex::{Captures, Regex};
use tracing::debug;

pub(crate) use provenance_domain::shorthand::MONTH;

const ERA: &str = r"((?i:bce|bc|ce|ad))";

static CENTURY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:(?i:the)\s+)?(\d{{1,2}})(?i:st|nd|rd|th)[\s-]+(?i:century)\b(?:\s*{}\b)?",
        ERA
    ))
    .unwrap()
});

static DECADE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:(?i:the)\s+)?(\d{{1,3}}0)(?:'|’)?s\b(?:\s*{}\b)?",
        ERA
    ))
    .unwrap()
});

static YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:(\d{{1,4}})\s*{}\b|(\d{{3,4}})\b)", ERA)).unwrap()
});

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{},?\s+(\d{{3,4}})\b", MONTH)).unwrap());

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b{}\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{3,4}})\b",
        MONTH
    ))
    .unwrap()
});

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{},?\s+(\d{{3,4}})\b",
        MONTH
    ))
    .unwrap()
});

// Context checks standing in for negative lookbehind/lookahead
static MONTH_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\b{},?\s+$", MONTH)).unwrap());
static DAY_BEFORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?:\b{}\s+\d{{1,2}}(?:st|nd|rd|th)?,?|\b\d{{1,2}}(?:st|nd|rd|th),?)\s+$",
        MONTH
    ))
    .unwrap()
});
static NUMBER_SIGN_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:\bno\.?|#)\s*$").unwrap());
static DAY_NUMBER_BEFORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?$").unwrap());
static CENTURY_AFTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s-]*(?i:century)\b").unwrap());

/// A date phrase located in text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    /// Byte offset where the phrase starts
    pub start: usize,
    /// Byte offset just past the phrase (including a trailing "?")
    pub end: usize,
    /// The resolved date
    pub date: ImpreciseDate,
}

/// Find every date phrase in `text`, ordered by first appearance
///
/// Runs the century, decade, year, month and day scans independently and
/// concatenates their results. A phrase matched by two scans yields two
/// dates; phrases that do not form a valid calendar date are dropped.
///
/// # Examples
///
/// ```
/// use provenance_extractor::find_dates_in_string;
/// use provenance_domain::Precision;
///
/// let dates = find_dates_in_string("Sold in the 1980s, then on January 1, 1990");
/// assert_eq!(dates.len(), 2);
/// assert_eq!(dates[0].precision, Precision::Decade);
/// assert_eq!(dates[1].precision, Precision::Day);
/// ```
pub fn find_dates_in_string(text: &str) -> Vec<ImpreciseDate> {
    scan_dates(text).into_iter().map(|m| m.date).collect()
}

/// Strip every date phrase found by [`find_dates_in_string`]
pub fn remove_dates_in_string(text: &str) -> String {
    let mut spans: Vec<(usize, usize)> = scan_dates(text).iter().map(|m| (m.start, m.end)).collect();
    spans.sort();

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in spans {
        if end <= cursor {
            continue;
        }
        if start > cursor {
            out.push_str(&text[cursor..start]);
        }
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    crate::normalize::tidy(&out)
}

/// Locate every date phrase with its span
pub fn scan_dates(text: &str) -> Vec<DateMatch> {
    let mut found = Vec::new();
    found.extend(scan(text, &CENTURY, century_from));
    found.extend(scan(text, &DECADE, decade_from));
    found.extend(scan_years(text));
    found.extend(scan_months(text));
    found.extend(scan(text, &MONTH_DAY_YEAR, |c| {
        day_from(c.get(3)?.as_str(), c.get(1)?.as_str(), c.get(2)?.as_str())
    }));
    found.extend(scan(text, &DAY_MONTH_YEAR, |c| {
        day_from(c.get(3)?.as_str(), c.get(2)?.as_str(), c.get(1)?.as_str())
    }));
    // Stable: ties keep scan order
    found.sort_by_key(|m| m.start);
    found
}

/// The last date phrase standing as a comma segment of its own
///
/// A phrase qualifies when it closes `text`, or when a comma follows it
/// and the text before it is empty or ends in a comma. The longer phrase
/// wins among those ending at the same place.
pub(crate) fn segment_date(text: &str) -> Option<DateMatch> {
    scan_dates(text)
        .into_iter()
        .filter(|m| {
            let before = text[..m.start].trim_end();
            let after = text[m.end..].trim_start();
            after.is_empty() || (after.starts_with(',') && (before.is_empty() || before.ends_with(',')))
        })
        .max_by(|a, b| a.end.cmp(&b.end).then(b.start.cmp(&a.start)))
}

/// The date phrase opening `text`, the longest one when several start there
pub(crate) fn leading_match(text: &str) -> Option<DateMatch> {
    let start = text.len() - text.trim_start().len();
    scan_dates(text)
        .into_iter()
        .filter(|m| m.start == start)
        .max_by_key(|m| m.end)
}

/// The date whose phrase starts first, preferring the longer phrase on ties
pub(crate) fn leading_date(text: &str) -> Option<ImpreciseDate> {
    scan_dates(text)
        .into_iter()
        .min_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
        .map(|m| m.date)
}

/// Run one scan: leftmost match, record, continue after it
fn scan<F>(text: &str, pattern: &Regex, resolve: F) -> Vec<DateMatch>
where
    F: Fn(&Captures<'_>) -> Option<ImpreciseDate>,
{
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            match resolve(&caps) {
                Some(date) => Some(finish(text, whole.start(), whole.end(), date)),
                None => {
                    debug!("Dropping unresolved date phrase '{}'", whole.as_str());
                    None
                }
            }
        })
        .collect()
}

/// Absorb a trailing "?" into the match as uncertainty
fn finish(text: &str, start: usize, end: usize, date: ImpreciseDate) -> DateMatch {
    if text[end..].starts_with('?') {
        DateMatch {
            start,
            end: end + 1,
            date: date.uncertain(),
        }
    } else {
        DateMatch { start, end, date }
    }
}

fn scan_years(text: &str) -> Vec<DateMatch> {
    YEAR.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let (start, end) = (whole.start(), whole.end());
            let before = &text[..start];
            let after = &text[end..];
            if MONTH_BEFORE.is_match(before)
                || DAY_BEFORE.is_match(before)
                || NUMBER_SIGN_BEFORE.is_match(before)
                || CENTURY_AFTER.is_match(after)
                || after.starts_with("'s")
                || after.starts_with("’s")
            {
                return None;
            }
            let date = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(digits), Some(era), _) => year_with_era(digits.as_str(), era.as_str()),
                (_, _, Some(digits)) => digits.as_str().parse().ok().and_then(ImpreciseDate::year),
                _ => None,
            };
            match date {
                Some(date) => Some(finish(text, start, end, date)),
                None => {
                    debug!("Dropping unresolved year '{}'", whole.as_str());
                    None
                }
            }
        })
        .collect()
}

fn scan_months(text: &str) -> Vec<DateMatch> {
    MONTH_YEAR
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if DAY_NUMBER_BEFORE.is_match(&text[..whole.start()]) {
                return None;
            }
            let month = month_number(caps.get(1)?.as_str())?;
            let year: i32 = caps.get(2)?.as_str().parse().ok()?;
            let date = ImpreciseDate::month(year, month)?;
            Some(finish(text, whole.start(), whole.end(), date))
        })
        .collect()
}

fn is_bce(era: &str) -> bool {
    era.to_lowercase().starts_with('b')
}

fn century_from(caps: &Captures<'_>) -> Option<ImpreciseDate> {
    let ordinal: u32 = caps.get(1)?.as_str().parse().ok()?;
    let bce = caps.get(2).is_some_and(|e| is_bce(e.as_str()));
    ImpreciseDate::century(ordinal, bce)
}

fn decade_from(caps: &Captures<'_>) -> Option<ImpreciseDate> {
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let bce = caps.get(2).is_some_and(|e| is_bce(e.as_str()));
    ImpreciseDate::decade(if bce { -year } else { year })
}

fn year_with_era(digits: &str, era: &str) -> Option<ImpreciseDate> {
    let year: i32 = digits.parse().ok()?;
    ImpreciseDate::year(if is_bce(era) { -year } else { year })
}

fn day_from(year: &str, month: &str, day: &str) -> Option<ImpreciseDate> {
    ImpreciseDate::day(year.parse().ok()?, month_number(month)?, day.parse().ok()?)
}

/// 1-based month number from a full or abbreviated month name
pub(crate) fn month_number(name: &str) -> Option<u32> {
    let key: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
