//! Certainty markers - the words and symbols that hedge a statement

use once_cell::sync::Lazy;
use regex::Regex;

/// Words that mark a whole period as uncertain when they lead a clause
pub const CERTAINTY_WORDS: &[&str] = &[
    "possibly",
    "probably",
    "likely",
    "perhaps",
    "presumably",
    "apparently",
    "reportedly",
    "allegedly",
];

/// Marker emitted in front of an uncertain period
pub const UNCERTAIN_PERIOD_MARKER: &str = "Possibly";

static CERTAINTY_WORD: Lazy<Regex> = Lazy::new(|| {
    let words = CERTAINTY_WORDS.join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b\s*", words)).unwrap()
});

static CIRCA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:circa\s+|ca?\.\s*)(\d)").unwrap());

/// Check whether text opens with a certainty word
///
/// Returns the text after the word when it does.
pub fn strip_leading_marker(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    let lower = trimmed.to_lowercase();
    CERTAINTY_WORDS.iter().find_map(|word| {
        let rest = lower.strip_prefix(word)?;
        if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == ',') {
            // Lowercasing is length-preserving for these ASCII words
            Some(trimmed[word.len()..].trim_start_matches([',', ' ']))
        } else {
            None
        }
    })
}

/// Remove every certainty marker so two renderings can be compared
///
/// Strips hedge words, "circa"/"c."/"ca." before a number and every "?".
pub fn strip_certainty_markers(text: &str) -> String {
    let text = CIRCA.replace_all(text, "$1");
    let text = CERTAINTY_WORD.replace_all(&text, "");
    text.replace('?', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_marker() {
        assert_eq!(strip_leading_marker("Possibly sold to X"), Some("sold to X"));
        assert_eq!(strip_leading_marker("probably, John Smith"), Some("John Smith"));
        assert_eq!(strip_leading_marker("Possiblyness"), None);
        assert_eq!(strip_leading_marker("John Smith"), None);
    }

    #[test]
    fn test_strip_certainty_markers() {
        assert_eq!(strip_certainty_markers("Pittsburgh, circa 1965"), "Pittsburgh, 1965");
        assert_eq!(strip_certainty_markers("Pittsburgh, c. 1965"), "Pittsburgh, 1965");
        assert_eq!(strip_certainty_markers("Pittsburgh, 1965?"), "Pittsburgh, 1965");
        assert_eq!(strip_certainty_markers("Possibly John Smith"), "John Smith");
    }
}
