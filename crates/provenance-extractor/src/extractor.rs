//! Core Extractor implementation

use crate::clause::{
    split_name_and_location, take_footnote_refs, take_leading_certainty, take_life_dates,
    take_misplaced_certainty, take_parentheses, take_stock_number,
};
use crate::config::ExtractorConfig;
use crate::error::ProvenanceError;
use crate::normalize::Normalizer;
use crate::phrase::PhraseParser;
use crate::types::{MalformedPeriod, Reconstruction};
use provenance_domain::traits::AcquisitionLookup;
use provenance_domain::{AcquisitionTable, Location, Party, Period, PeriodRecord, Timeline};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// The Extractor turns provenance text into a timeline of periods
///
/// ```
/// use provenance_extractor::Extractor;
///
/// let timeline = Extractor::standard()
///     .extract("Mr. and Mrs. James L. Winokur, Pittsburgh, circa 1965; gift to museum, 1968");
/// assert_eq!(timeline.len(), 2);
/// assert_eq!(timeline.time_string(timeline.ids()[0]), "1965?");
/// ```
pub struct Extractor<L = &'static AcquisitionTable>
where
    L: AcquisitionLookup,
{
    lookup: L,
    config: ExtractorConfig,
    normalizer: Normalizer,
    phrases: PhraseParser,
}

impl Extractor {
    /// Extractor over the standard acquisition vocabulary and default settings
    pub fn standard() -> Self {
        Self::new(AcquisitionTable::standard(), ExtractorConfig::default())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::standard()
    }
}

impl<L> Extractor<L>
where
    L: AcquisitionLookup,
{
    /// Create a new Extractor
    pub fn new(lookup: L, config: ExtractorConfig) -> Self {
        Self {
            normalizer: Normalizer::new(config.notes_divider.clone(), config.protect_initials)
                .with_clause_openers(&lookup.all_forms()),
            phrases: PhraseParser::new(config.recursion_limit),
            lookup,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Acquisition vocabulary in use
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Extract a timeline, never failing
    ///
    /// Text over the configured length yields an empty timeline.
    pub fn extract(&self, text: &str) -> Timeline {
        self.try_extract(text).unwrap_or_else(|e| {
            warn!("Extraction skipped: {}", e);
            Timeline::new()
        })
    }

    /// Extract from optional text; `None` yields an empty timeline
    pub fn extract_opt(&self, text: Option<&str>) -> Timeline {
        text.map(|t| self.extract(t)).unwrap_or_default()
    }

    /// Extract a timeline
    ///
    /// # Errors
    /// `TextTooLong` when the text exceeds `max_text_length` characters.
    pub fn try_extract(&self, text: &str) -> Result<Timeline, ProvenanceError> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ProvenanceError::TextTooLong(length, self.config.max_text_length));
        }

        info!("Starting extraction, text length {}", length);
        let document = self.normalizer.normalize(text);
        debug!(
            "Normalized into {} clauses and {} notes",
            document.clauses.len(),
            document.notes.len()
        );

        let mut timeline = Timeline::new();
        for (idx, clause) in document.clauses.iter().enumerate() {
            match self.parse_clause(&clause.text, &document.notes) {
                Some(period) if clause.direct => {
                    timeline.insert_direct(period);
                }
                Some(period) => {
                    timeline.insert(period);
                }
                None => debug!("Clause {} has nothing to record: '{}'", idx, clause.text),
            }
        }

        info!("Extraction complete: {} periods", timeline.len());
        Ok(timeline)
    }

    /// Parse one clause into a period
    ///
    /// Returns `None` when nothing in the clause describes ownership.
    pub fn parse_clause(&self, clause: &str, notes: &BTreeMap<u32, String>) -> Option<Period> {
        debug!("Parsing clause '{}'", clause);
        let (text, refs) = take_footnote_refs(clause);
        let mut period = Period::new(text.as_str());
        for n in refs {
            match notes.get(&n) {
                Some(note) => period.footnotes.push(note.clone()),
                None => debug!("Footnote [{}] has no text", n),
            }
        }

        let (text, hedged) = take_leading_certainty(&text);
        let (text, misplaced) = take_misplaced_certainty(&text);
        period.certain = !(hedged || misplaced);

        let (text, primary_owner) = take_parentheses(&text);
        period.primary_owner = primary_owner;

        let (text, birth, death) = take_life_dates(&text);
        let (text, stock_number) = take_stock_number(&text);
        period.stock_number = stock_number;

        let text = match self.lookup.find(&text) {
            Some(found) => {
                debug!("Acquisition method '{}'", found.method.name);
                period.acquisition_method = Some(found.method.clone());
                found.remainder
            }
            None => text,
        };

        let text = match self.phrases.resolve(&text, &mut period) {
            Ok(remainder) => remainder,
            Err(ProvenanceError::RecursionLimit { depth, remainder }) => {
                warn!("Recursion limit {} reached in '{}'", depth, clause);
                remainder
            }
            Err(e) => {
                warn!("Date parsing failed in '{}': {}", clause, e);
                text
            }
        };

        let (name, location) = split_name_and_location(&text);
        if let Some(name) = name {
            match Party::new(&name) {
                Ok(party) => period.party = Some(party.with_life_dates(birth, death)),
                Err(e) => debug!("No party: {}", e),
            }
        }
        if let Some(location) = location {
            match Location::new(&location) {
                Ok(location) => period.location = Some(location),
                Err(e) => debug!("No location: {}", e),
            }
        }

        if period.is_blank() {
            None
        } else {
            Some(period)
        }
    }

    /// Rebuild a timeline from structured period records
    ///
    /// Each record is checked on its own; bad records are reported and
    /// skipped. The valid ones are rendered back to provenance text and
    /// extracted again, so the result is exactly what the text says.
    pub fn from_records(&self, records: &[Value]) -> Reconstruction {
        let mut source = Timeline::new();
        let mut failures = Vec::new();
        let mut direct_next = false;

        for (index, value) in records.iter().enumerate() {
            match self.record_to_period(index, value) {
                Ok((period, direct_transfer)) => {
                    if direct_next {
                        source.insert_direct(period);
                    } else {
                        source.insert(period);
                    }
                    direct_next = direct_transfer.unwrap_or(false);
                }
                Err(failure) => {
                    warn!("Skipping record {}: {}", failure.index, failure.reason);
                    failures.push(failure);
                }
            }
        }

        let text = if source.is_empty() {
            String::new()
        } else {
            source.provenance()
        };
        info!(
            "Rebuilt {} of {} records into '{}'",
            source.len(),
            records.len(),
            text
        );
        Reconstruction {
            timeline: self.extract(&text),
            failures,
            text,
        }
    }

    /// Rebuild a timeline from a JSON array of period records
    ///
    /// # Errors
    /// `JsonParse` when the document is not valid JSON or not an array.
    pub fn from_json(&self, json: &str) -> Result<Reconstruction, ProvenanceError> {
        let value: Value = serde_json::from_str(json)?;
        let records = value
            .as_array()
            .ok_or_else(|| ProvenanceError::JsonParse("Expected JSON array".to_string()))?;
        Ok(self.from_records(records))
    }

    fn record_to_period(
        &self,
        index: usize,
        value: &Value,
    ) -> Result<(Period, Option<bool>), MalformedPeriod> {
        let malformed = |reason: String| MalformedPeriod { index, reason };
        let record: PeriodRecord =
            serde_json::from_value(value.clone()).map_err(|e| malformed(e.to_string()))?;
        let mut period = record.to_period(&self.lookup).map_err(malformed)?;

        let separator = self.config.footnote_separator.as_str();
        if !separator.is_empty() {
            period.footnotes = period
                .footnotes
                .iter()
                .flat_map(|f| f.split(separator))
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect();
        }
        Ok((period, record.direct_transfer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenance_domain::{ImpreciseDate, TimeSpan};

    fn year(y: i32) -> ImpreciseDate {
        ImpreciseDate::year(y).unwrap()
    }

    fn parse(clause: &str) -> Period {
        Extractor::standard()
            .parse_clause(clause, &BTreeMap::new())
            .unwrap()
    }

    #[test]
    fn test_parse_clause_full() {
        let period = parse("Possibly sold to John Smith (1870-1935), Paris, after 1920, stock no. 42");
        assert!(!period.certain);
        assert_eq!(period.acquisition_method.as_ref().map(|m| m.name), Some("Sale"));
        let party = period.party.unwrap();
        assert_eq!(party.name, "John Smith");
        assert_eq!(party.birth, Some(year(1870)));
        assert_eq!(party.death, Some(year(1935)));
        assert_eq!(period.location.unwrap().name, "Paris");
        assert_eq!(period.beginning, Some(TimeSpan::starting(year(1920))));
        assert_eq!(period.stock_number.as_deref(), Some("stock no. 42"));
    }

    #[test]
    fn test_parse_clause_not_primary_owner() {
        let period = parse("(Knoedler, New York)");
        assert!(!period.primary_owner);
        assert_eq!(period.party.unwrap().name, "Knoedler");
    }

    #[test]
    fn test_parse_clause_uncertain_party() {
        let period = parse("John Smith?, Paris");
        assert!(!period.party.unwrap().certain);
    }

    #[test]
    fn test_parse_clause_footnotes() {
        let notes = BTreeMap::from([(1, "Receipt in file.".to_string())]);
        let period = Extractor::standard()
            .parse_clause("John Smith [1], Paris", &notes)
            .unwrap();
        assert_eq!(period.footnotes, vec!["Receipt in file.".to_string()]);
        assert_eq!(period.original_text, "John Smith, Paris");
    }

    #[test]
    fn test_blank_clause_is_skipped() {
        assert!(Extractor::standard().parse_clause(" [3] ", &BTreeMap::new()).is_none());
    }

    #[test]
    fn test_text_too_long() {
        let config = ExtractorConfig {
            max_text_length: 10,
            ..ExtractorConfig::default()
        };
        let extractor = Extractor::new(AcquisitionTable::standard(), config);
        let result = extractor.try_extract("John Smith, Paris, 1950");
        assert!(matches!(result, Err(ProvenanceError::TextTooLong(23, 10))));
        assert!(extractor.extract("John Smith, Paris, 1950").is_empty());
    }

    #[test]
    fn test_extract_opt_none() {
        assert!(Extractor::standard().extract_opt(None).is_empty());
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let result = Extractor::standard().from_json(r#"{"party": "John"}"#);
        assert!(matches!(result, Err(ProvenanceError::JsonParse(_))));
    }

    #[test]
    fn test_record_footnotes_split_on_separator() {
        let record = serde_json::json!({
            "party": "John Smith",
            "footnote": "Receipt in file; Letter of 1950"
        });
        let (period, direct) = Extractor::standard().record_to_period(0, &record).unwrap();
        assert_eq!(period.footnotes.len(), 2);
        assert_eq!(direct, None);
    }
}
