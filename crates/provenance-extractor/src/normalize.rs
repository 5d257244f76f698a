//! Document normalization - footnotes, notes block, punctuation and clause splitting

use once_cell::sync::Lazy;
use provenance_domain::traits::AcquisitionLookup;
use provenance_domain::AcquisitionTable;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Stand-in for a period that must not end a clause
pub const PERIOD_SENTINEL: char = '\u{2024}';

static ASTERISK_DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(?:^|\s)(\*+)[ \t]*").unwrap());
static ASTERISK_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").unwrap());
static NOTE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:\[\d+\]|\d{1,2}[.)])\s").unwrap());
static NOTE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\[(\d+)\]\s*|^[ \t]*(\d{1,2})[.)]\s+").unwrap());
static FOOTNOTE_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());
static REFERENCE_AFTER_STOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.;])(\[\d+\])").unwrap());
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{2,}").unwrap());
static LIFE_DATE_OPENER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[bd]\.").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([,;.])").unwrap());
static PUNCTUATION_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;.](?:\s*[,;.])+").unwrap());
static REPEATED_COMMAS: Lazy<Regex> = Lazy::new(|| Regex::new(r",(?:\s*,)+").unwrap());

static ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(Mr|Mrs|Ms|Messrs|Mme|Mlle|Dr|Prof|Rev|Hon|Gen|Col|Capt|Lt|Sgt|St|Ste|Mt|Ft|Ave|Jr|Sr|Esq",
        r"|Co|Corp|Inc|Ltd|Bros|no|No|nos|Nos|inv|Inv|cat|Cat|vol|pp|p|b|d|c|ca|fl|ed|eds|fig|pl",
        r"|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)\."
    ))
    .unwrap()
});
// State abbreviations often close a sentence, so they stay breakable before a new clause
static STATE_ABBREVIATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(Ala|Ariz|Ark|Calif|Colo|Conn|Del|Fla|Ga|Ill|Ind|Kans|Ky|La|Md|Mass|Mich|Minn|Miss|Mo|Mont",
        r"|Neb|Nebr|Nev|Okla|Ore|Pa|Penn|Tenn|Tex|Va|Vt|Wash|Wis|Wyo)\."
    ))
    .unwrap()
});
static DOTTED_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:[A-Z]\.){2,}").unwrap());
static INITIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z])\.").unwrap());
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\.(\d)").unwrap());

/// One sentence-level piece of a provenance record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Clause text with protected periods restored
    pub text: String,
    /// The clause followed a semicolon
    pub direct: bool,
}

/// A normalized document ready for per-clause parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Clauses in reading order
    pub clauses: Vec<Clause>,
    /// Footnote texts by number
    pub notes: BTreeMap<u32, String>,
}

/// Turns raw provenance text into clauses and notes
pub struct Normalizer {
    notes_divider: String,
    protect_initials: bool,
    // Lowercased acquisition forms that can open a clause
    clause_openers: Vec<String>,
}

impl Normalizer {
    /// Create a new normalizer
    pub fn new(notes_divider: impl Into<String>, protect_initials: bool) -> Self {
        Self {
            notes_divider: notes_divider.into(),
            protect_initials,
            clause_openers: Vec::new(),
        }
    }

    /// Let a state abbreviation end the clause when one of `forms` follows it
    pub fn with_clause_openers(mut self, forms: &[&str]) -> Self {
        self.clause_openers = forms.iter().map(|f| f.to_lowercase()).collect();
        self
    }

    /// "Gift to museum" after "Pa. " starts a new clause; "gift" or "Pittsburgh" does not
    fn opens_clause(&self, rest: &str) -> bool {
        let Some(next) = rest.strip_prefix(char::is_whitespace).map(str::trim_start) else {
            return false;
        };
        if !next.starts_with(|c: char| c.is_uppercase()) {
            return false;
        }
        let next = next.to_lowercase();
        self.clause_openers.iter().any(|form| next.starts_with(form.as_str()))
    }

    /// Normalize a whole document
    pub fn normalize(&self, text: &str) -> Document {
        let text = asterisks_to_references(text);
        let (main, mut notes) = self.split_notes(&text);
        let main = REFERENCE_AFTER_STOP.replace_all(&main, "${2}${1}");
        let main = extract_inline_notes(&main, &mut notes);
        let main = self.protect_periods(&main);
        let main = normalize_punctuation(&main);
        Document {
            clauses: split_clauses(&main),
            notes,
        }
    }

    /// Separate the main text from its footnote block
    fn split_notes(&self, text: &str) -> (String, BTreeMap<u32, String>) {
        let divider = Regex::new(&format!("(?i){}", regex::escape(self.notes_divider.trim()))).ok();
        let split = divider
            .as_ref()
            .and_then(|d| d.find(text))
            .map(|m| (m.start(), m.end()))
            .or_else(|| {
                NOTE_LINE
                    .find_iter(text)
                    .find(|m| m.start() > 0)
                    .map(|m| (m.start(), m.start()))
            });

        match split {
            Some((main_end, notes_start)) => (
                text[..main_end].replace('\n', " "),
                parse_notes(&text[notes_start..]),
            ),
            None => (text.replace('\n', " "), BTreeMap::new()),
        }
    }

    /// Replace periods that do not end a clause with [`PERIOD_SENTINEL`]
    fn protect_periods(&self, text: &str) -> String {
        let sentinel = PERIOD_SENTINEL.to_string();
        let mut text = ABBREVIATION
            .replace_all(text, format!("${{1}}{}", sentinel).as_str())
            .into_owned();
        let haystack = text;
        text = STATE_ABBREVIATION
            .replace_all(&haystack, |c: &Captures<'_>| {
                let end = c.get(0).map_or(haystack.len(), |m| m.end());
                if self.opens_clause(&haystack[end..]) {
                    c[0].to_string()
                } else {
                    format!("{}{}", &c[1], sentinel)
                }
            })
            .into_owned();
        text = DOTTED_LETTERS
            .replace_all(&text, |c: &Captures<'_>| c[0].replace('.', &sentinel))
            .into_owned();
        if self.protect_initials {
            text = INITIAL
                .replace_all(&text, format!("${{1}}{}", sentinel).as_str())
                .into_owned();
        }
        // Overlapping digits ("1.2.3") need a second pass
        while DECIMAL.is_match(&text) {
            text = DECIMAL
                .replace_all(&text, format!("${{1}}{}${{2}}", sentinel).as_str())
                .into_owned();
        }
        text
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new("NOTES:", true).with_clause_openers(&AcquisitionTable::standard().all_forms())
    }
}

/// Asterisk footnotes become numbered ones: a run of k asterisks is note k
///
/// A run attached to the preceding word is a reference; a run after
/// whitespace or at line start opens the note text.
fn asterisks_to_references(text: &str) -> String {
    if !text.contains('*') {
        return text.to_string();
    }
    let text = ASTERISK_DEFINITION.replace_all(text, |c: &Captures<'_>| format!("\n[{}] ", c[1].len()));
    ASTERISK_REFERENCE
        .replace_all(&text, |c: &Captures<'_>| format!("[{}]", c[0].len()))
        .into_owned()
}

/// Parse a notes block into numbered texts
fn parse_notes(block: &str) -> BTreeMap<u32, String> {
    let markers: Vec<(usize, usize, Option<u32>)> = NOTE_MARKER
        .captures_iter(block)
        .filter_map(|c| {
            let whole = c.get(0)?;
            let number = c.get(1).or_else(|| c.get(2))?.as_str().parse().ok();
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    let mut notes = BTreeMap::new();
    for (idx, (_, body_start, number)) in markers.iter().enumerate() {
        let body_end = markers.get(idx + 1).map_or(block.len(), |m| m.0);
        let body = WHITESPACE.replace_all(block[*body_start..body_end].trim(), " ");
        if let Some(n) = number {
            if !body.is_empty() {
                notes.insert(*n, body.into_owned());
            }
        }
    }
    notes
}

/// Move bracketed prose notes out of the main text
fn extract_inline_notes(main: &str, notes: &mut BTreeMap<u32, String>) -> String {
    let highest_ref = FOOTNOTE_REFERENCE
        .captures_iter(main)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    let mut next = highest_ref.max(notes.keys().copied().max().unwrap_or(0)) + 1;

    BRACKETED
        .replace_all(main, |c: &Captures<'_>| {
            let content = c[1].trim();
            if is_inline_note(content) {
                let n = next;
                next += 1;
                notes.insert(n, content.to_string());
                format!("[{}]", n)
            } else {
                c[0].to_string()
            }
        })
        .into_owned()
}

fn is_inline_note(content: &str) -> bool {
    !LIFE_DATE_OPENER.is_match(content) && WORD.find_iter(content).count() >= 2
}

/// Collapse whitespace and runs of clause punctuation
///
/// A run keeps its strongest mark: "." over ";" over ",".
pub(crate) fn normalize_punctuation(text: &str) -> String {
    let text = WHITESPACE.replace_all(text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    PUNCTUATION_RUN
        .replace_all(&text, |c: &Captures<'_>| {
            let run = &c[0];
            if run.contains('.') {
                "."
            } else if run.contains(';') {
                ";"
            } else {
                ","
            }
        })
        .trim()
        .to_string()
}

/// Split on "." and ";" and restore protected periods
fn split_clauses(text: &str) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let mut current = String::new();
    let mut direct = false;
    for ch in text.chars() {
        if ch == '.' || ch == ';' {
            push_clause(&mut clauses, &current, direct);
            current.clear();
            direct = ch == ';';
        } else {
            current.push(ch);
        }
    }
    push_clause(&mut clauses, &current, direct);
    clauses
}

fn push_clause(clauses: &mut Vec<Clause>, raw: &str, direct: bool) {
    let text = restore_periods(raw).trim().to_string();
    if !text.is_empty() {
        clauses.push(Clause { text, direct });
    }
}

/// Undo period protection
pub fn restore_periods(text: &str) -> String {
    text.replace(PERIOD_SENTINEL, ".")
}

/// Collapse spacing and stray commas left behind by removals
pub(crate) fn tidy(text: &str) -> String {
    let text = WHITESPACE.replace_all(text, " ");
    let text = SPACE_BEFORE_PUNCTUATION.replace_all(&text, "$1");
    let text = REPEATED_COMMAS.replace_all(&text, ",");
    text.trim_matches(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .to_string()
}
