//! Temporal phrase parsing - connector detection and recursive date resolution

use crate::dates::{leading_date, leading_match, segment_date, DateMatch, MONTH};
use crate::error::ProvenanceError;
use crate::normalize::tidy;
use once_cell::sync::Lazy;
use provenance_domain::shorthand::expand_ranges;
use provenance_domain::{ImpreciseDate, Period, Precision, TimeSpan};
use regex::Regex;
use std::fmt;
use tracing::debug;

static CIRCA_ABBREVIATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bca?\.\s*(\d)").unwrap());
static RANGE_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+and\s+").unwrap());
static LEADING_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s+and\b").unwrap());

static CONNECTOR_PATTERNS: Lazy<Vec<(Connector, Regex)>> = Lazy::new(|| {
    Connector::ALL
        .iter()
        .map(|c| {
            let token = c.token().replace(' ', r"\s+");
            let pattern = format!(r"\b((?i:{}))\s+(?:{}|\d|(?i:the)\s+\d)", token, MONTH);
            (*c, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Temporal connector words that govern a date expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connector {
    /// "circa 1950"
    Circa,
    /// "on January 1, 1950"
    On,
    /// "before 1950"
    Before,
    /// "by 1950"
    By,
    /// "as of 1950"
    AsOf,
    /// "after 1950"
    After,
    /// "until 1950"
    Until,
    /// "until sometime after 1950"
    UntilSometimeAfter,
    /// "until at least 1950"
    UntilAtLeast,
    /// "until sometime before 1950"
    UntilSometimeBefore,
    /// "in 1950"
    In,
    /// "between 1950 and 1960"
    Between,
    /// "sometime between 1950 and 1960"
    SometimeBetween,
    /// "until between 1950 and 1960"
    UntilBetween,
    /// "until sometime between 1950 and 1960"
    UntilSometimeBetween,
    /// "to at least 1950"
    ToAtLeast,
}

impl Connector {
    /// Every connector
    pub const ALL: [Connector; 16] = [
        Connector::Circa,
        Connector::On,
        Connector::Before,
        Connector::By,
        Connector::AsOf,
        Connector::After,
        Connector::Until,
        Connector::UntilSometimeAfter,
        Connector::UntilAtLeast,
        Connector::UntilSometimeBefore,
        Connector::In,
        Connector::Between,
        Connector::SometimeBetween,
        Connector::UntilBetween,
        Connector::UntilSometimeBetween,
        Connector::ToAtLeast,
    ];

    /// The word or words as written in text
    pub fn token(&self) -> &'static str {
        match self {
            Connector::Circa => "circa",
            Connector::On => "on",
            Connector::Before => "before",
            Connector::By => "by",
            Connector::AsOf => "as of",
            Connector::After => "after",
            Connector::Until => "until",
            Connector::UntilSometimeAfter => "until sometime after",
            Connector::UntilAtLeast => "until at least",
            Connector::UntilSometimeBefore => "until sometime before",
            Connector::In => "in",
            Connector::Between => "between",
            Connector::SometimeBetween => "sometime between",
            Connector::UntilBetween => "until between",
            Connector::UntilSometimeBetween => "until sometime between",
            Connector::ToAtLeast => "to at least",
        }
    }

    /// Build the beginning and ending spans a date expression implies
    ///
    /// # Errors
    /// `UnresolvedDate` when the expression holds no usable date.
    pub fn apply(&self, expression: &str) -> Result<Spans, ProvenanceError> {
        let single = || {
            leading_date(expression)
                .ok_or_else(|| ProvenanceError::UnresolvedDate(expression.to_string()))
        };
        let spans = match self {
            Connector::Circa => Spans::begin(TimeSpan::from_date(single()?).with_certainty(false)),
            Connector::On => {
                let date = single()?;
                let span = TimeSpan::from_date(date);
                if date.precision == Precision::Day {
                    Spans {
                        beginning: Some(span),
                        ending: Some(span),
                    }
                } else {
                    Spans::begin(span)
                }
            }
            Connector::Before | Connector::By | Connector::AsOf => {
                Spans::begin(TimeSpan::ending(single()?))
            }
            Connector::After => Spans::begin(TimeSpan::starting(single()?)),
            Connector::Until => Spans::end(TimeSpan::from_date(single()?)),
            Connector::UntilSometimeAfter | Connector::UntilAtLeast | Connector::ToAtLeast => {
                Spans::end(TimeSpan::starting(single()?))
            }
            Connector::UntilSometimeBefore => Spans::end(TimeSpan::ending(single()?)),
            Connector::In => {
                let date = single()?;
                Spans {
                    beginning: Some(TimeSpan::ending(date)),
                    ending: Some(TimeSpan::starting(date)),
                }
            }
            Connector::Between | Connector::SometimeBetween => Spans::begin(range(expression)?),
            Connector::UntilBetween | Connector::UntilSometimeBetween => {
                Spans::end(range(expression)?)
            }
        };
        Ok(spans)
    }

    fn is_range(&self) -> bool {
        matches!(
            self,
            Connector::Between
                | Connector::SometimeBetween
                | Connector::UntilBetween
                | Connector::UntilSometimeBetween
        )
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// "1950 and 1960" → span with both bounds; either side may be missing
fn range(expression: &str) -> Result<TimeSpan, ProvenanceError> {
    let (first, second) = match RANGE_AND.find(expression) {
        Some(m) => (&expression[..m.start()], &expression[m.end()..]),
        None => (expression, ""),
    };
    let earliest = leading_date(first);
    let latest = leading_date(second);
    if earliest.is_none() && latest.is_none() {
        return Err(ProvenanceError::UnresolvedDate(expression.to_string()));
    }
    Ok(TimeSpan::new(earliest, latest))
}

/// Beginning and ending resolved from one date expression
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spans {
    /// When the period began
    pub beginning: Option<TimeSpan>,
    /// When the period ended
    pub ending: Option<TimeSpan>,
}

impl Spans {
    fn begin(span: TimeSpan) -> Self {
        Self {
            beginning: Some(span),
            ending: None,
        }
    }

    fn end(span: TimeSpan) -> Self {
        Self {
            beginning: None,
            ending: Some(span),
        }
    }
}

/// A connector found in a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ConnectorMatch {
    connector: Connector,
    start: usize,
    end: usize,
}

impl ConnectorMatch {
    fn len(&self) -> usize {
        self.end - self.start
    }

    fn contained_in(&self, other: &ConnectorMatch) -> bool {
        other.len() > self.len() && other.start <= self.start && self.end <= other.end
    }
}

/// One parsing step: dates found and text left over
struct Step {
    spans: Spans,
    remainder: String,
}

/// Resolves the dates in a clause, leaving the descriptive text
pub struct PhraseParser {
    recursion_limit: usize,
}

impl PhraseParser {
    /// Create a parser that resolves at most `recursion_limit` date phrases per clause
    pub fn new(recursion_limit: usize) -> Self {
        Self { recursion_limit }
    }

    /// Resolve every date phrase in `clause` into `period`
    ///
    /// Spans already present on the period are kept; later phrases only
    /// fill gaps. Returns the descriptive text left once the dates are gone.
    ///
    /// # Errors
    /// `RecursionLimit` with the unparsed remainder when the clause holds
    /// more date phrases than the limit allows. Spans resolved before the
    /// limit stay on the period.
    pub fn resolve(&self, clause: &str, period: &mut Period) -> Result<String, ProvenanceError> {
        let mut text = tidy(&normalize_ranges(clause));
        let mut depth = 0;
        loop {
            if text.is_empty() {
                return Ok(text);
            }
            let step = match find_connector(&text) {
                Some((found, expression_end)) => {
                    connector_step(&text, found, expression_end).or_else(|| comma_step(&text))
                }
                None => comma_step(&text),
            };
            let Some(step) = step else {
                return Ok(text);
            };
            if depth >= self.recursion_limit {
                return Err(ProvenanceError::RecursionLimit {
                    depth,
                    remainder: text,
                });
            }
            merge(period, step.spans);
            debug!(depth, remainder = %step.remainder, "Resolved date phrase");
            text = step.remainder;
            depth += 1;
        }
    }
}

impl Default for PhraseParser {
    fn default() -> Self {
        Self::new(10)
    }
}

fn merge(period: &mut Period, spans: Spans) {
    if let Some(span) = spans.beginning {
        if period.beginning.is_none() {
            period.beginning = Some(span);
        } else {
            debug!("Beginning already set; ignoring {:?}", span);
        }
    }
    if let Some(span) = spans.ending {
        if period.ending.is_none() {
            period.ending = Some(span);
        } else {
            debug!("Ending already set; ignoring {:?}", span);
        }
    }
}

/// Rewrite shorthand ranges as "X until Y" and "c./ca." as "circa"
///
/// ```
/// use provenance_extractor::normalize_ranges;
///
/// assert_eq!(normalize_ranges("1985-86"), "1985 until 1986");
/// assert_eq!(normalize_ranges("c. 1945"), "circa 1945");
/// ```
pub fn normalize_ranges(text: &str) -> String {
    CIRCA_ABBREVIATION
        .replace_all(&expand_ranges(text), "circa ${1}")
        .into_owned()
}

/// Pick the governing connector and where its date expression ends
///
/// Only connectors directly followed by a date count. Matches inside a
/// longer match are dropped; the longest survivor wins, the rightmost on
/// ties. The expression stops at the next survivor.
fn find_connector(text: &str) -> Option<(ConnectorMatch, usize)> {
    let all: Vec<ConnectorMatch> = CONNECTOR_PATTERNS
        .iter()
        .flat_map(|(connector, pattern)| {
            pattern.captures_iter(text).filter_map(move |caps| {
                caps.get(1).map(|token| ConnectorMatch {
                    connector: *connector,
                    start: token.start(),
                    end: token.end(),
                })
            })
        })
        .filter(|m| leading_match(&text[m.end..]).is_some())
        .collect();

    let survivors: Vec<ConnectorMatch> = all
        .iter()
        .filter(|m| !all.iter().any(|other| m.contained_in(other)))
        .copied()
        .collect();

    let chosen = survivors.iter().copied().max_by_key(|m| (m.len(), m.start))?;
    let expression_end = survivors
        .iter()
        .filter(|m| m.start >= chosen.end)
        .map(|m| m.start)
        .min()
        .unwrap_or(text.len());
    Some((chosen, expression_end))
}

/// Apply the connector to the date phrase right after it
///
/// Only that phrase (both ends of a range) leaves the text; whatever
/// follows stays for later steps. `None` when the phrase does not resolve.
fn connector_step(text: &str, found: ConnectorMatch, expression_end: usize) -> Option<Step> {
    let expression = &text[found.end..expression_end];
    let consumed = date_phrase_len(expression, found.connector.is_range())?;

    let spans = match found.connector.apply(&expression[..consumed]) {
        Ok(spans) => spans,
        Err(e) => {
            debug!(connector = %found.connector, "{}", e);
            return None;
        }
    };

    let joined = format!("{} {}", text[..found.start].trim(), text[found.end + consumed..].trim());
    Some(Step {
        spans,
        remainder: tidy(&joined),
    })
}

/// Length of the date phrase opening `expression`, through "X and Y" for ranges
fn date_phrase_len(expression: &str, range: bool) -> Option<usize> {
    let first = leading_match(expression)?;
    if range {
        if let Some(and) = LEADING_AND.find(&expression[first.end..]) {
            let rest = first.end + and.end();
            if let Some(second) = leading_match(&expression[rest..]) {
                return Some(rest + second.end);
            }
        }
    }
    Some(first.end)
}

/// No connector: take a date phrase standing as its own comma segment
///
/// The window of trailing comma segments grows while each added segment
/// still changes the date it yields, so "October 14, 1980" stays whole.
/// Only the chosen phrase is cut; the segments around it remain.
fn comma_step(text: &str) -> Option<Step> {
    let segments: Vec<&str> = text.split(',').collect();
    let n = segments.len();

    let mut chosen: Option<(usize, DateMatch)> = None;
    for k in 1..=n {
        let window = segments[n - k..].join(",");
        match (segment_date(&window), chosen) {
            (None, None) => continue,
            (None, Some(_)) => break,
            (Some(found), Some((_, previous))) if same_date(&found.date, &previous.date) => break,
            (Some(found), _) => chosen = Some((k, found)),
        }
    }

    let (k, found) = chosen?;
    let prefix = segments[..n - k].join(",");
    let window = segments[n - k..].join(",");
    let residue = format!("{}{}", &window[..found.start], &window[found.end..]);
    Some(Step {
        spans: Spans::begin(TimeSpan::from_date(found.date)),
        remainder: tidy(&format!("{}, {}", prefix, residue)),
    })
}

fn same_date(a: &ImpreciseDate, b: &ImpreciseDate) -> bool {
    a.same(b) && a.certain == b.certain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> ImpreciseDate {
        ImpreciseDate::year(y).unwrap()
    }

    fn resolve(text: &str) -> (String, Period) {
        let mut period = Period::new(text);
        let remainder = PhraseParser::default().resolve(text, &mut period).unwrap();
        (remainder, period)
    }

    #[test]
    fn test_normalize_ranges() {
        assert_eq!(normalize_ranges("1918-1919"), "1918 until 1919");
        assert_eq!(normalize_ranges("May 5–6, 1980"), "May 5, 1980 until May 6, 1980");
        assert_eq!(
            normalize_ranges("30–31 January 1922"),
            "January 30, 1922 until January 31, 1922"
        );
        assert_eq!(
            normalize_ranges("23 October – 12 November 1926"),
            "October 23, 1926 until November 12, 1926"
        );
        assert_eq!(normalize_ranges("ca.1900"), "circa 1900");
    }

    #[test]
    fn test_two_digit_range_across_centuries() {
        assert_eq!(normalize_ranges("1999-00"), "1999 until 2000");
        let (_, period) = resolve("John Smith, Paris, 1999-00");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(year(1999))));
        assert_eq!(period.ending, Some(TimeSpan::from_date(year(2000))));
    }

    #[test]
    fn test_connector_tokens_are_unique() {
        let mut tokens: Vec<&str> = Connector::ALL.iter().map(Connector::token).collect();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), 16);
    }

    #[test]
    fn test_longest_connector_wins() {
        let (remainder, period) = resolve("John Smith, until sometime after 1950");
        assert_eq!(remainder, "John Smith");
        assert_eq!(period.ending, Some(TimeSpan::starting(year(1950))));
        assert_eq!(period.beginning, None);
    }

    #[test]
    fn test_connector_needs_date_after_it() {
        let (remainder, period) = resolve("Sold by John in Paris");
        assert_eq!(remainder, "Sold by John in Paris");
        assert!(period.beginning.is_none());
    }

    #[test]
    fn test_in_sets_both_halves() {
        let (_, period) = resolve("John Smith, in 1950");
        assert_eq!(period.time_string(), "in 1950");
    }

    #[test]
    fn test_on_with_day_and_month() {
        let (_, period) = resolve("on January 1, 1980");
        assert!(period.ending.is_some());
        assert_eq!(period.time_string(), "on January 1, 1980");

        let (_, period) = resolve("on January 1980");
        assert!(period.ending.is_none());
    }

    #[test]
    fn test_circa_is_uncertain() {
        let (remainder, period) = resolve("Pittsburgh, circa 1965");
        assert_eq!(remainder, "Pittsburgh");
        assert_eq!(period.time_string(), "1965?");
    }

    #[test]
    fn test_between_splits_on_and() {
        let (remainder, period) = resolve("John Smith, between 1950 and 1960");
        assert_eq!(remainder, "John Smith");
        assert_eq!(period.beginning, Some(TimeSpan::new(Some(year(1950)), Some(year(1960)))));
    }

    #[test]
    fn test_until_between() {
        let (_, period) = resolve("until sometime between 1950 and 1960");
        assert_eq!(period.ending, Some(TimeSpan::new(Some(year(1950)), Some(year(1960)))));
        assert_eq!(period.time_string(), "until between 1950 and 1960");
    }

    #[test]
    fn test_range_recurses_into_both_halves() {
        let (remainder, period) = resolve("John Smith, Paris, 1985-86");
        assert_eq!(remainder, "John Smith, Paris");
        assert_eq!(period.time_string(), "1985 until 1986");
    }

    #[test]
    fn test_following_connector_bounds_expression() {
        let (remainder, period) = resolve("X, after 1950 until 1960");
        assert_eq!(remainder, "X");
        assert_eq!(period.beginning, Some(TimeSpan::starting(year(1950))));
        assert_eq!(period.ending, Some(TimeSpan::from_date(year(1960))));
    }

    #[test]
    fn test_comma_window_keeps_full_date() {
        let (remainder, period) = resolve("John Smith, Paris, October 14, 1980");
        assert_eq!(remainder, "John Smith, Paris");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(ImpreciseDate::day(1980, 10, 14).unwrap())));
    }

    #[test]
    fn test_comma_window_keeps_numbers_in_names() {
        let (remainder, period) = resolve("Gallery 291, New York, 1950");
        assert_eq!(remainder, "Gallery 291, New York");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(year(1950))));
    }

    #[test]
    fn test_century_with_until() {
        let (remainder, period) = resolve("Moses, Egypt, until the 7th Century");
        assert_eq!(remainder, "Moses, Egypt");
        assert_eq!(period.time_string(), "until the 7th Century");
    }

    #[test]
    fn test_recursion_limit() {
        let text = (1901..=1912).map(|y| y.to_string()).collect::<Vec<_>>().join(", ");
        let mut period = Period::new(text.as_str());
        let err = PhraseParser::new(10).resolve(&text, &mut period).unwrap_err();
        match err {
            ProvenanceError::RecursionLimit { depth, remainder } => {
                assert_eq!(depth, 10);
                assert_eq!(remainder, "1901, 1902");
            }
            other => panic!("unexpected error: {other}"),
        }
        // The first phrase resolved still stands
        assert_eq!(period.beginning, Some(TimeSpan::from_date(year(1912))));
    }

    #[test]
    fn test_unresolved_date() {
        let err = Connector::On.apply("February 30, 1980").unwrap_err();
        assert!(matches!(err, ProvenanceError::UnresolvedDate(_)));
    }

    #[test]
    fn test_date_must_close_the_clause() {
        let (remainder, period) = resolve("Gallery 291, New York");
        assert_eq!(remainder, "Gallery 291, New York");
        assert!(period.beginning.is_none());
    }

    #[test]
    fn test_comma_date_before_location() {
        let (remainder, period) = resolve("John Smith, 1950, Paris");
        assert_eq!(remainder, "John Smith, Paris");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(year(1950))));

        let (remainder, period) = resolve("John Smith, October 14, 1980, Paris");
        assert_eq!(remainder, "John Smith, Paris");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(ImpreciseDate::day(1980, 10, 14).unwrap())));
    }

    #[test]
    fn test_connector_without_date_keeps_its_word() {
        let (remainder, period) = resolve("Knoedler Gallery on 57th Street, New York, 1950");
        assert_eq!(remainder, "Knoedler Gallery on 57th Street, New York");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(year(1950))));

        let (remainder, period) = resolve("John Smith, in 2 parts, 1950");
        assert_eq!(remainder, "John Smith, in 2 parts");
        assert_eq!(period.time_string(), "1950");
    }

    #[test]
    fn test_invalid_connector_date_is_left_in_text() {
        let (remainder, period) = resolve("John Smith, Paris, on February 30, 1980");
        assert_eq!(remainder, "John Smith, Paris, on February 30");
        assert_eq!(period.beginning, Some(TimeSpan::from_date(year(1980))));
    }

    #[test]
    fn test_connector_takes_only_its_own_date() {
        let (remainder, period) = resolve("John Smith, after 1950, Paris, 1960");
        assert_eq!(remainder, "John Smith, Paris");
        assert_eq!(period.beginning, Some(TimeSpan::starting(year(1950))));
    }
}
