//! Clause fields - everything in a clause that is not a date phrase or method

use crate::dates::{leading_date, remove_dates_in_string};
use crate::normalize::tidy;
use once_cell::sync::Lazy;
use provenance_domain::certainty::{strip_leading_marker, CERTAINTY_WORDS};
use provenance_domain::ImpreciseDate;
use regex::Regex;

static FOOTNOTE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\[(\d+)\]").unwrap());
static MISPLACED_CERTAINTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)(^|[\s,(])(?:{})\b,?\s*", CERTAINTY_WORDS.join("|"))).unwrap()
});
static GROUPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[(\[]([^()\[\]]*)[)\]]").unwrap());
static BORN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^b\.\s*(.+?)(?:\s*[,;]\s*d\.\s*(.+))?$").unwrap());
static DIED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^d\.\s*(.+)$").unwrap());
static CIRCA_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:circa|ca?\.)\s*").unwrap());
static STOCK_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:stock|inv\.?|inventory|cat\.?|catalog|catalogue|lot)\s*(?:no\.?|number|#)\s*[\w./-]*\d[\w./-]*)")
        .unwrap()
});
static LUGT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:(?i:lugt)|L\.)\s*(?:(?i:no)\.?\s*)?(\d+[a-z]?)\b").unwrap());
static EMPTY_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\s*\)").unwrap());
static NAME_EXTENDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:Jr\.?|Sr\.?|II|III|IV|Esq\.?|Inc\.?|Ltd\.?|LLC|S\.A\.",
        r"|(?:Count|Countess|Duke|Duchess|Earl|Baron|Baroness|Marquis|Marquess|Marchioness",
        r"|Prince|Princess|Lord|Lady|Viscount|Viscountess)\s+of\s+.+)\??$"
    ))
    .unwrap()
});

/// Remove "[n]" references, returning them in order
pub(crate) fn take_footnote_refs(text: &str) -> (String, Vec<u32>) {
    let refs = FOOTNOTE_REF
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    (FOOTNOTE_REF.replace_all(text, "").trim().to_string(), refs)
}

/// Remove a hedge word opening the clause; true when one was found
pub(crate) fn take_leading_certainty(text: &str) -> (String, bool) {
    match strip_leading_marker(text) {
        Some(rest) => (rest.to_string(), true),
        None => (text.to_string(), false),
    }
}

/// Remove hedge words sitting elsewhere in the clause
pub(crate) fn take_misplaced_certainty(text: &str) -> (String, bool) {
    if !MISPLACED_CERTAINTY.is_match(text) {
        return (text.to_string(), false);
    }
    (MISPLACED_CERTAINTY.replace_all(text, "$1").trim().to_string(), true)
}

/// Unwrap a clause enclosed in one pair of parentheses; false when it was
pub(crate) fn take_parentheses(text: &str) -> (String, bool) {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return (trimmed.to_string(), true);
    };
    // "(a) b (c)" opens and closes with parentheses without being wrapped
    let mut depth = 0i32;
    for ch in inner.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return (trimmed.to_string(), true);
        }
    }
    (inner.trim().to_string(), false)
}

/// Remove the first parenthesized or bracketed life-date group
///
/// Accepts "(b. X)", "(d. Y)", "(b. X, d. Y)", "(X-Y)", "[X-Y]", "[-Y]"
/// and "[X-]". Groups that do not resolve leave the text untouched.
pub(crate) fn take_life_dates(text: &str) -> (String, Option<ImpreciseDate>, Option<ImpreciseDate>) {
    for caps in GROUPED.captures_iter(text) {
        let (Some(whole), Some(content)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some((birth, death)) = parse_life_dates(content.as_str()) {
            let rest = format!("{}{}", &text[..whole.start()], &text[whole.end()..]);
            return (tidy(&rest), birth, death);
        }
    }
    (text.to_string(), None, None)
}

type LifeDates = (Option<ImpreciseDate>, Option<ImpreciseDate>);

fn parse_life_dates(content: &str) -> Option<LifeDates> {
    let content = content.trim();
    if let Some(caps) = BORN.captures(content) {
        let birth = pure_date(caps.get(1)?.as_str())?;
        let death = match caps.get(2) {
            Some(d) => Some(pure_date(d.as_str())?),
            None => None,
        };
        return Some((Some(birth), death));
    }
    if let Some(caps) = DIED.captures(content) {
        return Some((None, Some(pure_date(caps.get(1)?.as_str())?)));
    }

    let (birth, death) = content.split_once(['-', '–', '—'])?;
    let birth = optional_pure_date(birth)?;
    let death = optional_pure_date(death)?;
    if birth.is_none() && death.is_none() {
        return None;
    }
    Some((birth, death))
}

/// `Some(None)` for an empty side, `None` when the side is not a date
fn optional_pure_date(text: &str) -> Option<Option<ImpreciseDate>> {
    if text.trim().is_empty() {
        Some(None)
    } else {
        pure_date(text).map(Some)
    }
}

/// A date phrase with nothing else around it
fn pure_date(text: &str) -> Option<ImpreciseDate> {
    let text = text.trim();
    let (text, hedged) = match CIRCA_MARK.find(text) {
        Some(m) => (&text[m.end()..], true),
        None => (text, false),
    };
    if !remove_dates_in_string(text).is_empty() {
        return None;
    }
    let date = leading_date(text)?;
    Some(if hedged { date.uncertain() } else { date })
}

/// Remove a stock, inventory or collector-mark number
///
/// Stock numbers are kept verbatim; Lugt marks become "Lugt N".
pub(crate) fn take_stock_number(text: &str) -> (String, Option<String>) {
    let found = STOCK_NUMBER
        .captures(text)
        .and_then(|c| {
            let whole = c.get(0)?;
            Some((whole.start(), whole.end(), c.get(1)?.as_str().to_string()))
        })
        .or_else(|| {
            LUGT.captures(text).and_then(|c| {
                let whole = c.get(0)?;
                Some((whole.start(), whole.end(), format!("Lugt {}", c.get(1)?.as_str())))
            })
        });

    match found {
        Some((start, end, number)) => {
            let rest = format!("{}{}", &text[..start], &text[end..]);
            (tidy(&EMPTY_GROUP.replace_all(&rest, "")), Some(number))
        }
        None => (text.to_string(), None),
    }
}

/// Split "Name, Location" text, keeping name extensions with the name
///
/// "John Smith, Jr., Boston" has the name "John Smith, Jr.".
pub(crate) fn split_name_and_location(text: &str) -> (Option<String>, Option<String>) {
    let segments: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let Some((first, rest)) = segments.split_first() else {
        return (None, None);
    };

    let mut name = first.to_string();
    let mut idx = 0;
    while idx < rest.len() && NAME_EXTENDER.is_match(rest[idx]) {
        name.push_str(", ");
        name.push_str(rest[idx]);
        idx += 1;
    }
    let location = rest[idx..].join(", ");
    (Some(name), (!location.is_empty()).then_some(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year(y: i32) -> ImpreciseDate {
        ImpreciseDate::year(y).unwrap()
    }

    #[test]
    fn test_footnote_refs() {
        let (text, refs) = take_footnote_refs("John Smith [1], Paris [2]");
        assert_eq!(text, "John Smith, Paris");
        assert_eq!(refs, vec![1, 2]);
    }

    #[test]
    fn test_certainty_words() {
        assert_eq!(take_leading_certainty("Probably John Smith"), ("John Smith".to_string(), true));
        assert_eq!(take_leading_certainty("John Smith"), ("John Smith".to_string(), false));
        assert_eq!(
            take_misplaced_certainty("Sold to possibly John Smith"),
            ("Sold to John Smith".to_string(), true)
        );
        assert_eq!(
            take_misplaced_certainty("(Possibly sold to John Smith)"),
            ("(sold to John Smith)".to_string(), true)
        );
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(take_parentheses("(Knoedler, New York)"), ("Knoedler, New York".to_string(), false));
        assert_eq!(take_parentheses("Knoedler (dealer)"), ("Knoedler (dealer)".to_string(), true));
        assert_eq!(take_parentheses("(a) b (c)"), ("(a) b (c)".to_string(), true));
    }

    #[test]
    fn test_life_dates_forms() {
        let (text, birth, death) = take_life_dates("David Newbury (d. 1935), Pittsburgh");
        assert_eq!(text, "David Newbury, Pittsburgh");
        assert_eq!((birth, death), (None, Some(year(1935))));

        let (_, birth, death) = take_life_dates("John Smith (b. 1870, d. 1935)");
        assert_eq!((birth, death), (Some(year(1870)), Some(year(1935))));

        let (_, birth, death) = take_life_dates("John Smith (1870-1935)");
        assert_eq!((birth, death), (Some(year(1870)), Some(year(1935))));

        let (_, birth, death) = take_life_dates("John Smith [1870-]");
        assert_eq!((birth, death), (Some(year(1870)), None));

        let (_, birth, death) = take_life_dates("John Smith [c. 1870-1935?]");
        assert!(!birth.unwrap().certain);
        assert!(!death.unwrap().certain);
    }

    #[test]
    fn test_unresolvable_life_dates_are_left_alone() {
        let (text, birth, death) = take_life_dates("Knoedler (dealer), New York");
        assert_eq!(text, "Knoedler (dealer), New York");
        assert_eq!((birth, death), (None, None));

        let (text, _, _) = take_life_dates("John Smith (Paris-London)");
        assert_eq!(text, "John Smith (Paris-London)");
    }

    #[test]
    fn test_stock_numbers() {
        let (text, stock) = take_stock_number("Knoedler, New York, stock no. A1234");
        assert_eq!(text, "Knoedler, New York");
        assert_eq!(stock.as_deref(), Some("stock no. A1234"));

        let (text, stock) = take_stock_number("John Smith, Paris (L. 1234)");
        assert_eq!(text, "John Smith, Paris");
        assert_eq!(stock.as_deref(), Some("Lugt 1234"));

        let (_, stock) = take_stock_number("John Smith, Paris");
        assert_eq!(stock, None);
    }

    #[test]
    fn test_name_and_location() {
        assert_eq!(
            split_name_and_location("Mr. and Mrs. James L. Winokur, Pittsburgh"),
            (Some("Mr. and Mrs. James L. Winokur".to_string()), Some("Pittsburgh".to_string()))
        );
        assert_eq!(
            split_name_and_location("John Smith, Jr., Boston, Mass."),
            (Some("John Smith, Jr.".to_string()), Some("Boston, Mass.".to_string()))
        );
        assert_eq!(
            split_name_and_location("John Russell, Duke of Bedford, Woburn Abbey"),
            (Some("John Russell, Duke of Bedford".to_string()), Some("Woburn Abbey".to_string()))
        );
        assert_eq!(split_name_and_location("museum"), (Some("museum".to_string()), None));
        assert_eq!(split_name_and_location(" , "), (None, None));
    }
}
