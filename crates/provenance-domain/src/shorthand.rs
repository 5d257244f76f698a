//! Shorthand wording - compact date notation and its canonical spelling
//!
//! Provenance writers abbreviate: "1985-86", "May 5–6, 1980", "(d. 1935)",
//! "sometime between". Parsing expands the ranges before reading dates, and
//! the lenient round-trip check spells both texts the same way before
//! comparing them.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Capitalized month names and abbreviations, captured
pub const MONTH: &str = r"(January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\b\.?";

static MONTH_DAY_RANGE_ACROSS_MONTHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b{m}\s+(\d{{1,2}})\s*[-–—]\s*{m}\s+(\d{{1,2}}),?\s+(\d{{3,4}})\b",
        m = MONTH
    ))
    .unwrap()
});
static MONTH_DAY_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b{}\s+(\d{{1,2}})\s*[-–—]\s*(\d{{1,2}}),?\s+(\d{{3,4}})\b",
        MONTH
    ))
    .unwrap()
});
static DAY_MONTH_RANGE_ACROSS_MONTHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})\s+{m}\s*[-–—]\s*(\d{{1,2}})\s+{m}\s+(\d{{3,4}})\b",
        m = MONTH
    ))
    .unwrap()
});
static DAY_RANGE_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})\s*[-–—]\s*(\d{{1,2}})\s+{}\s+(\d{{3,4}})\b",
        MONTH
    ))
    .unwrap()
});
static FOUR_DIGIT_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\s*[-–—]\s*(\d{4})\b").unwrap());
static TWO_DIGIT_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2})(\d{2})\s*[-–—]\s*(\d{2})\b").unwrap());

// "(d. 1935)", "(b. 1870, d. 1935)", "[1870-1935]", "[-1935]", "(c. 1870-1935?)"
static LIFE_DATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)\s*[\[(]\s*(?:(?:born|died|circa|ca|fl|b|d|c)\.?\s*",
        r"|\d{1,4}\s*(?:bce|bc|ce|ad)?\s*\?*\s*|[-–—,]\s*)+[\])]"
    ))
    .unwrap()
});

static SYNONYMS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let before_date = format!(r"\s+((?:{}|\d|(?i:the)\s+\d))", MONTH);
    [
        (r"until\s+sometime\s+between", "until between"),
        (r"sometime\s+between", "between"),
        (r"until\s+sometime\s+after", "until at least"),
        (r"to\s+at\s+least", "until at least"),
        (r"(?:before|as\s+of)", "by"),
        (r"on", ""),
    ]
    .into_iter()
    .map(|(words, canonical)| {
        let pattern = format!(r"(?i:\b{}){}", words, before_date);
        (Regex::new(&pattern).unwrap(), canonical)
    })
    .collect()
});

static ARTICLE_BEFORE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bthe\s+(\d)").unwrap());

/// Rewrite shorthand ranges as two dates joined by "until"
///
/// ```
/// use provenance_domain::shorthand::expand_ranges;
///
/// assert_eq!(expand_ranges("1985-86"), "1985 until 1986");
/// assert_eq!(expand_ranges("May 5–6, 1980"), "May 5, 1980 until May 6, 1980");
/// ```
pub fn expand_ranges(text: &str) -> String {
    let text = MONTH_DAY_RANGE_ACROSS_MONTHS.replace_all(text, "${1} ${2}, ${5} until ${3} ${4}, ${5}");
    let text = MONTH_DAY_RANGE.replace_all(&text, "${1} ${2}, ${4} until ${1} ${3}, ${4}");
    let text = DAY_MONTH_RANGE_ACROSS_MONTHS.replace_all(&text, "${2} ${1}, ${5} until ${4} ${3}, ${5}");
    let text = DAY_RANGE_MONTH.replace_all(&text, "${3} ${1}, ${4} until ${3} ${2}, ${4}");
    let text = FOUR_DIGIT_RANGE.replace_all(&text, "${1} until ${2}");
    TWO_DIGIT_RANGE
        .replace_all(&text, expand_two_digit_range)
        .into_owned()
}

/// "1985-86" stays in the century; "1999-00" rolls over into the next
fn expand_two_digit_range(caps: &Captures<'_>) -> String {
    match (caps[1].parse::<u32>(), caps[2].parse::<u32>(), caps[3].parse::<u32>()) {
        (Ok(century), Ok(first), Ok(second)) => {
            let end_century = if second < first { century + 1 } else { century };
            format!("{:02}{:02} until {:02}{:02}", century, first, end_century, second)
        }
        _ => caps[0].to_string(),
    }
}

/// Spell a clause the way rendering would, for lenient comparison
///
/// Drops life-date groups, expands ranges, maps connector synonyms onto
/// the rendered wording and drops "the" before numbers.
pub fn canonical_wording(text: &str) -> String {
    let text = LIFE_DATES.replace_all(text, |caps: &Captures<'_>| {
        if caps[0].chars().any(|c| c.is_ascii_digit()) {
            String::new()
        } else {
            caps[0].to_string()
        }
    });
    let mut text = expand_ranges(&text);
    for (pattern, canonical) in SYNONYMS.iter() {
        let replacement = if canonical.is_empty() {
            "${1}".to_string()
        } else {
            format!("{} ${{1}}", canonical)
        };
        text = pattern.replace_all(&text, replacement.as_str()).into_owned();
    }
    ARTICLE_BEFORE_NUMBER.replace_all(&text, "${1}").into_owned()
}
