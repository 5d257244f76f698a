//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProvenanceError {
    /// Phrase parsing recursed past the configured limit
    #[error("Recursion limit of {depth} reached with '{remainder}' left to parse")]
    RecursionLimit {
        /// Depth at which parsing stopped
        depth: usize,
        /// Clause text still unparsed
        remainder: String,
    },

    /// A record could not be turned back into a period
    #[error("Malformed period at index {index}: {reason}")]
    MalformedPeriodInput {
        /// Position of the record in its input list
        index: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A date phrase did not resolve to a calendar date
    #[error("Unresolved date: {0}")]
    UnresolvedDate(String),

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ProvenanceError {
    fn from(e: serde_json::Error) -> Self {
        ProvenanceError::JsonParse(e.to_string())
    }
}
