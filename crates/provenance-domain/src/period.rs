//! Period module - one episode of ownership

use crate::acquisition::{AcquisitionMethod, Placement};
use crate::certainty::{strip_certainty_markers, UNCERTAIN_PERIOD_MARKER};
use crate::date::ImpreciseDate;
use crate::party::{Location, Party};
use crate::shorthand::canonical_wording;
use crate::time_span::{time_string, TimeSpan};
use crate::traits::AcquisitionLookup;
use std::fmt;

/// Handle of a period inside its [`crate::Timeline`]
///
/// Handles are assigned in insertion order and are only meaningful for the
/// timeline that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodId(usize);

impl PeriodId {
    /// Create a handle from a raw arena index
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PeriodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One episode of ownership or custody
///
/// A period never knows its neighbours; the owning timeline keeps the
/// links and the direct-transfer flag on the edge between two periods.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    /// Owner, dealer or other holder
    pub party: Option<Party>,

    /// Where the object was held
    pub location: Option<Location>,

    /// How the party acquired the object
    pub acquisition_method: Option<AcquisitionMethod>,

    /// When the period began
    pub beginning: Option<TimeSpan>,

    /// When the period ended
    pub ending: Option<TimeSpan>,

    /// False when the whole period is hedged ("Possibly ...")
    pub certain: bool,

    /// False for parenthesized clauses (dealers, agents, sales)
    pub primary_owner: bool,

    /// Dealer stock, inventory or collector-mark number
    pub stock_number: Option<String>,

    /// Footnote texts attached to this period
    pub footnotes: Vec<String>,

    /// Clause this period was parsed from
    pub original_text: String,
}

impl Period {
    /// Create an empty, certain, primary-owner period for a clause
    pub fn new(original_text: impl Into<String>) -> Self {
        Self {
            party: None,
            location: None,
            acquisition_method: None,
            beginning: None,
            ending: None,
            certain: true,
            primary_owner: true,
            stock_number: None,
            footnotes: Vec::new(),
            original_text: original_text.into(),
        }
    }

    /// Beginning of the beginning
    pub fn botb(&self) -> Option<ImpreciseDate> {
        self.beginning.and_then(|t| t.earliest_raw)
    }

    /// End of the beginning
    pub fn eotb(&self) -> Option<ImpreciseDate> {
        self.beginning.and_then(|t| t.latest_raw)
    }

    /// Beginning of the ending
    pub fn bote(&self) -> Option<ImpreciseDate> {
        self.ending.and_then(|t| t.earliest_raw)
    }

    /// End of the ending
    pub fn eote(&self) -> Option<ImpreciseDate> {
        self.ending.and_then(|t| t.latest_raw)
    }

    /// Dates of this period as natural text
    pub fn time_string(&self) -> String {
        time_string(self.beginning.as_ref(), self.ending.as_ref())
    }

    /// Whether the period has no content worth keeping
    pub fn is_blank(&self) -> bool {
        self.party.is_none()
            && self.location.is_none()
            && self.acquisition_method.is_none()
            && self.beginning.is_none()
            && self.ending.is_none()
            && self.stock_number.is_none()
    }

    /// Render the period as provenance text
    ///
    /// `direct_from_previous` continues the previous sentence: text opening
    /// with an acquisition phrase is left lower-case instead of capitalized.
    pub fn provenance(&self, direct_from_previous: bool) -> String {
        let name = self.party.as_ref().map(Party::display_name).unwrap_or_default();
        let lead = match &self.acquisition_method {
            Some(method) => method.attach_to_name(&name),
            None => name,
        };

        let mut parts = Vec::new();
        if !lead.is_empty() {
            parts.push(lead);
        }
        if let Some(location) = &self.location {
            parts.push(location.display_name());
        }
        let time = self.time_string();
        if !time.is_empty() {
            parts.push(time);
        }
        if let Some(stock) = &self.stock_number {
            parts.push(stock.clone());
        }

        let mut text = parts.join(", ");
        if !self.certain {
            text = format!("{} {}", UNCERTAIN_PERIOD_MARKER, text);
        }

        let opens_with_method = self.certain
            && self
                .acquisition_method
                .as_ref()
                .is_some_and(|m| m.preferred.placement == Placement::Prefix);
        if direct_from_previous {
            if opens_with_method || !self.certain {
                text = lowercase_first(&text);
            }
        } else {
            text = uppercase_first(&text);
        }

        if !self.primary_owner {
            text = format!("({})", text);
        }
        text
    }

    /// Round-trip check against the clause this period came from
    ///
    /// Certainty markers are ignored, as are case and whitespace. When
    /// `strict` is false a failed comparison is retried on the canonical
    /// wording of both sides (life dates dropped, ranges expanded, connector
    /// synonyms unified) with every acquisition form removed, so "Bought by"
    /// and "Purchased by" compare equal, as do "sometime between" and
    /// "between".
    pub fn parsable<L: AcquisitionLookup>(&self, strict: bool, lookup: &L) -> bool {
        let generated = self.provenance(false);
        if comparable(&generated) == comparable(&self.original_text) {
            return true;
        }
        if strict {
            return false;
        }
        let forms = lookup.all_forms();
        let lenient = |text: &str| strip_forms(&comparable(&canonical_wording(text)), &forms);
        lenient(&generated) == lenient(&self.original_text)
    }
}

/// Normalize text for round-trip comparison
fn comparable(text: &str) -> String {
    strip_certainty_markers(text)
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .trim_end_matches(['.', ';'])
        .to_string()
}

/// Remove acquisition forms from comparable (lowercased, unspaced) text
fn strip_forms(text: &str, forms: &[&str]) -> String {
    let mut out = text.to_string();
    // Forms arrive longest first, so "sold at auction to" goes before "sold to"
    for form in forms {
        let needle: String = form
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        out = out.replace(&needle, "");
    }
    out.trim_matches(',').to_string()
}

fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
