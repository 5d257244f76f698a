//! Result types for record reconstruction

use crate::error::ProvenanceError;
use provenance_domain::Timeline;
use serde::{Deserialize, Serialize};

/// Outcome of rebuilding a timeline from structured records
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Timeline re-extracted from the synthesized text
    pub timeline: Timeline,

    /// Records that could not be used
    pub failures: Vec<MalformedPeriod>,

    /// Provenance text synthesized from the valid records
    pub text: String,
}

impl Reconstruction {
    /// Whether every record was usable
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A record that failed to parse or validate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedPeriod {
    /// Position in the input list
    pub index: usize,

    /// Why it was rejected
    pub reason: String,
}

impl From<MalformedPeriod> for ProvenanceError {
    fn from(m: MalformedPeriod) -> Self {
        ProvenanceError::MalformedPeriodInput {
            index: m.index,
            reason: m.reason,
        }
    }
}
