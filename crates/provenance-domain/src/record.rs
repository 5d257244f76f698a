//! Structured record form of a period, for persistence and JSON exchange

use crate::date::ImpreciseDate;
use crate::party::{Location, Party};
use crate::period::Period;
use crate::precision::Precision;
use crate::time_span::TimeSpan;
use crate::traits::AcquisitionLookup;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Serialized imprecise date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRecord {
    /// Representative day (ISO 8601)
    pub date: NaiveDate,

    /// Granularity
    pub precision: Precision,

    /// Confidence flag
    #[serde(default = "default_true")]
    pub certainty: bool,
}

impl From<ImpreciseDate> for DateRecord {
    fn from(d: ImpreciseDate) -> Self {
        Self {
            date: d.date,
            precision: d.precision,
            certainty: d.certain,
        }
    }
}

impl From<DateRecord> for ImpreciseDate {
    fn from(r: DateRecord) -> Self {
        ImpreciseDate::new(r.date, r.precision).with_certainty(r.certainty)
    }
}

/// Flat, JSON-compatible view of one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Party name
    #[serde(default)]
    pub party: Option<String>,

    /// Party certainty
    #[serde(default = "default_true")]
    pub party_certainty: bool,

    /// Party birth date
    #[serde(default)]
    pub birth: Option<DateRecord>,

    /// Birth certainty, overriding the flag inside `birth` when present
    #[serde(default)]
    pub birth_certainty: Option<bool>,

    /// Party death date
    #[serde(default)]
    pub death: Option<DateRecord>,

    /// Death certainty, overriding the flag inside `death` when present
    #[serde(default)]
    pub death_certainty: Option<bool>,

    /// Location name
    #[serde(default)]
    pub location: Option<String>,

    /// Location certainty
    #[serde(default = "default_true")]
    pub location_certainty: bool,

    /// Beginning of the beginning
    #[serde(default)]
    pub botb: Option<DateRecord>,

    /// End of the beginning
    #[serde(default)]
    pub eotb: Option<DateRecord>,

    /// Beginning of the ending
    #[serde(default)]
    pub bote: Option<DateRecord>,

    /// End of the ending
    #[serde(default)]
    pub eote: Option<DateRecord>,

    /// Clause the period was parsed from
    #[serde(default)]
    pub original_text: String,

    /// Regenerated provenance text
    #[serde(default)]
    pub provenance: String,

    /// Whether the regenerated text round-trips
    #[serde(default)]
    pub parsable: bool,

    /// Edge to the next period; `None` for the last period
    #[serde(default)]
    pub direct_transfer: Option<bool>,

    /// Stock or catalog number
    #[serde(default)]
    pub stock_number: Option<String>,

    /// Footnote texts joined by "; "
    #[serde(default)]
    pub footnote: Option<String>,

    /// Primary owner flag
    #[serde(default = "default_true")]
    pub primary_owner: bool,

    /// Whole-period certainty
    #[serde(default = "default_true")]
    pub period_certainty: bool,

    /// Acquisition method name
    #[serde(default)]
    pub acquisition_method: Option<String>,
}

impl PeriodRecord {
    /// Flatten a period with the facts only its timeline knows
    pub fn from_period(
        period: &Period,
        provenance: String,
        parsable: bool,
        direct_transfer: Option<bool>,
    ) -> Self {
        let party = period.party.as_ref();
        let birth = party.and_then(|p| p.birth);
        let death = party.and_then(|p| p.death);
        Self {
            party: party.map(|p| p.name.clone()),
            party_certainty: party.map_or(true, |p| p.certain),
            birth: birth.map(DateRecord::from),
            birth_certainty: birth.map(|d| d.certain),
            death: death.map(DateRecord::from),
            death_certainty: death.map(|d| d.certain),
            location: period.location.as_ref().map(|l| l.name.clone()),
            location_certainty: period.location.as_ref().map_or(true, |l| l.certain),
            botb: period.botb().map(DateRecord::from),
            eotb: period.eotb().map(DateRecord::from),
            bote: period.bote().map(DateRecord::from),
            eote: period.eote().map(DateRecord::from),
            original_text: period.original_text.clone(),
            provenance,
            parsable,
            direct_transfer,
            stock_number: period.stock_number.clone(),
            footnote: if period.footnotes.is_empty() {
                None
            } else {
                Some(period.footnotes.join("; "))
            },
            primary_owner: period.primary_owner,
            period_certainty: period.certain,
            acquisition_method: period.acquisition_method.as_ref().map(|m| m.name.to_string()),
        }
    }

    /// Rebuild a period from the record
    ///
    /// # Errors
    /// Returns a description of the first invalid field: an unknown
    /// acquisition method, inverted bounds, or a record with no content.
    pub fn to_period<L: AcquisitionLookup>(&self, lookup: &L) -> Result<Period, String> {
        let mut period = Period::new(self.original_text.clone());

        if let Some(name) = self.party.as_deref().filter(|n| !n.trim().is_empty()) {
            let birth = self.birth.map(|r| {
                ImpreciseDate::from(r).with_certainty(self.birth_certainty.unwrap_or(r.certainty))
            });
            let death = self.death.map(|r| {
                ImpreciseDate::from(r).with_certainty(self.death_certainty.unwrap_or(r.certainty))
            });
            if let (Some(b), Some(d)) = (birth, death) {
                if b.earliest() > d.latest() {
                    return Err(format!("birth {} is after death {}", b, d));
                }
            }
            let mut party = Party::new(name)?.with_life_dates(birth, death);
            party.certain = party.certain && self.party_certainty;
            period.party = Some(party);
        }

        if let Some(name) = self.location.as_deref().filter(|n| !n.trim().is_empty()) {
            let mut location = Location::new(name)?;
            location.certain = location.certain && self.location_certainty;
            period.location = Some(location);
        }

        if let Some(name) = self.acquisition_method.as_deref() {
            let method = lookup
                .find_by_name(name)
                .ok_or_else(|| format!("unknown acquisition method '{}'", name))?;
            period.acquisition_method = Some(method.clone());
        }

        period.beginning = span("beginning", self.botb, self.eotb)?;
        period.ending = span("ending", self.bote, self.eote)?;
        period.certain = self.period_certainty;
        period.primary_owner = self.primary_owner;
        period.stock_number = self.stock_number.clone().filter(|s| !s.trim().is_empty());
        period.footnotes = self
            .footnote
            .iter()
            .filter(|f| !f.trim().is_empty())
            .cloned()
            .collect();

        if period.is_blank() {
            return Err("record has no party, location, method or dates".to_string());
        }
        Ok(period)
    }
}

fn span(
    label: &str,
    earliest: Option<DateRecord>,
    latest: Option<DateRecord>,
) -> Result<Option<TimeSpan>, String> {
    let earliest = earliest.map(ImpreciseDate::from);
    let latest = latest.map(ImpreciseDate::from);
    if let (Some(lo), Some(hi)) = (earliest, latest) {
        if lo.earliest() > hi.latest() {
            return Err(format!("{} bounds are inverted: {} is after {}", label, lo, hi));
        }
    }
    if earliest.is_none() && latest.is_none() {
        return Ok(None);
    }
    Ok(Some(TimeSpan::new(earliest, latest)))
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::AcquisitionTable;

    fn year(y: i32) -> ImpreciseDate {
        ImpreciseDate::year(y).unwrap()
    }

    fn sample_period() -> Period {
        let table = AcquisitionTable::standard();
        let mut period = Period::new("Sold to John Smith (1870-1935), Paris, circa 1920");
        period.party = Some(
            Party::new("John Smith")
                .unwrap()
                .with_life_dates(Some(year(1870)), Some(year(1935))),
        );
        period.location = Some(Location::new("Paris").unwrap());
        period.acquisition_method = table.find_by_name("Sale").cloned();
        period.beginning = Some(TimeSpan::from_date(year(1920)).with_certainty(false));
        period.footnotes = vec!["Receipt in file".to_string()];
        period
    }

    #[test]
    fn test_record_round_trip() {
        let period = sample_period();
        let record = PeriodRecord::from_period(&period, period.provenance(false), true, None);
        assert_eq!(record.party.as_deref(), Some("John Smith"));
        assert_eq!(record.acquisition_method.as_deref(), Some("Sale"));
        assert_eq!(record.botb.unwrap().precision, Precision::Year);
        assert!(!record.botb.unwrap().certainty);
        assert_eq!(record.footnote.as_deref(), Some("Receipt in file"));

        let rebuilt = record.to_period(AcquisitionTable::standard()).unwrap();
        assert_eq!(rebuilt, period);
    }

    #[test]
    fn test_record_json_shape() {
        let period = sample_period();
        let record = PeriodRecord::from_period(&period, period.provenance(false), true, None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["botb"]["date"], "1920-01-01");
        assert_eq!(json["botb"]["precision"], "year");
        assert_eq!(json["death"]["date"], "1935-01-01");
        assert_eq!(json["primary_owner"], true);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let period = sample_period();
        let mut record = PeriodRecord::from_period(&period, String::new(), true, None);
        record.acquisition_method = Some("Osmosis".to_string());
        let err = record.to_period(AcquisitionTable::standard()).unwrap_err();
        assert!(err.contains("Osmosis"));
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        let period = sample_period();
        let mut record = PeriodRecord::from_period(&period, String::new(), true, None);
        record.botb = Some(year(1960).into());
        record.eotb = Some(year(1950).into());
        assert!(record.to_period(AcquisitionTable::standard()).is_err());
    }

    #[test]
    fn test_blank_record_is_rejected() {
        let record: PeriodRecord = serde_json::from_str("{}").unwrap();
        assert!(record.to_period(AcquisitionTable::standard()).is_err());
    }
}
