//! Parties and locations - named participants in an ownership period

use crate::date::ImpreciseDate;

/// Split a trailing "?" off a name
fn split_certainty(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    match trimmed.strip_suffix('?') {
        Some(rest) => (rest.trim_end().to_string(), false),
        None => (trimmed.to_string(), true),
    }
}

/// An owner, dealer or other participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    /// Name as written
    pub name: String,

    /// False when the source hedged the attribution
    pub certain: bool,

    /// Birth date, if stated
    pub birth: Option<ImpreciseDate>,

    /// Death date, if stated
    pub death: Option<ImpreciseDate>,
}

impl Party {
    /// Create a party from a name, reading a trailing "?" as uncertainty
    ///
    /// # Errors
    /// Returns error if the name is empty
    pub fn new(value: &str) -> Result<Self, String> {
        let (name, certain) = split_certainty(value);
        if name.is_empty() {
            return Err("Party name cannot be empty".to_string());
        }
        Ok(Self {
            name,
            certain,
            birth: None,
            death: None,
        })
    }

    /// Attach life dates
    pub fn with_life_dates(mut self, birth: Option<ImpreciseDate>, death: Option<ImpreciseDate>) -> Self {
        self.birth = birth;
        self.death = death;
        self
    }

    /// Life dates as "[birth-death]", empty when neither is known
    pub fn life_dates(&self) -> String {
        if self.birth.is_none() && self.death.is_none() {
            return String::new();
        }
        let birth = self.birth.map(|d| d.to_string()).unwrap_or_default();
        let death = self.death.map(|d| d.to_string()).unwrap_or_default();
        format!("[{}-{}]", birth, death)
    }

    /// Name with certainty marker and life dates, as used in provenance text
    pub fn display_name(&self) -> String {
        let mut out = self.name.clone();
        if !self.certain {
            out.push('?');
        }
        let life = self.life_dates();
        if !life.is_empty() {
            out.push(' ');
            out.push_str(&life);
        }
        out
    }
}

/// Where the object was held during a period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Place name as written
    pub name: String,

    /// False when the source hedged the place
    pub certain: bool,
}

impl Location {
    /// Create a location, reading a trailing "?" as uncertainty
    ///
    /// # Errors
    /// Returns error if the name is empty
    pub fn new(value: &str) -> Result<Self, String> {
        let (name, certain) = split_certainty(value);
        if name.is_empty() {
            return Err("Location name cannot be empty".to_string());
        }
        Ok(Self { name, certain })
    }

    /// Name with certainty marker
    pub fn display_name(&self) -> String {
        if self.certain {
            self.name.clone()
        } else {
            format!("{}?", self.name)
        }
    }
}
