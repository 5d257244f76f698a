//! Provenance Extractor
//!
//! Turns museum provenance text into a timeline of ownership periods.
//!
//! # Overview
//!
//! A provenance record is a run of clauses, one per owner, separated by
//! "." (ownership passed on by unknown means) or ";" (handed over
//! directly). Each clause names a party, usually a place, often an
//! acquisition method and some loosely stated dates:
//!
//! ```text
//! Mr. and Mrs. James L. Winokur, Pittsburgh, circa 1965; gift to museum, 1968.
//! ```
//!
//! # Architecture
//!
//! ```text
//! Text → Normalizer → Clauses → clause fields → PhraseParser → Period → Timeline
//!                                                   ↑
//!                                         find_dates_in_string
//! ```
//!
//! # Key Features
//!
//! - **Imprecise dates**: centuries, decades, years, months and days with
//!   certainty, via [`find_dates_in_string`]
//! - **Temporal connectors**: sixteen phrases from "circa" to "until
//!   sometime between", each with its own interval meaning ([`Connector`])
//! - **Footnotes**: numbered, asterisk and inline bracketed notes
//! - **Round trips**: timelines render back to text, and structured
//!   records rebuild timelines through that text ([`Extractor::from_records`])
//!
//! # Example Usage
//!
//! ```
//! use provenance_extractor::Extractor;
//!
//! let extractor = Extractor::standard();
//! let timeline = extractor.extract("Moses, Egypt, until the 7th Century; gift to museum, 1968");
//!
//! let first = timeline.ids()[0];
//! assert_eq!(timeline.time_string(first), "until the 7th Century");
//! assert_eq!(timeline.direct_transfer(first), Some(true));
//! println!("{}", timeline.provenance());
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod dates;
mod normalize;
mod clause;
mod phrase;
mod extractor;


pub use error::ProvenanceError;
pub use config::ExtractorConfig;
pub use types::{MalformedPeriod, Reconstruction};
pub use dates::{find_dates_in_string, remove_dates_in_string, scan_dates, DateMatch};
pub use normalize::{restore_periods, Clause, Document, Normalizer, PERIOD_SENTINEL};
pub use phrase::{normalize_ranges, Connector, PhraseParser, Spans};
pub use extractor::Extractor;

use provenance_domain::Timeline;

/// Extract with the standard vocabulary and default settings
pub fn extract(text: &str) -> Timeline {
    Extractor::standard().extract(text)
}
