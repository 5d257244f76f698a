//! Provenance Domain Layer
//!
//! Value types and the linked period structure behind a provenance
//! timeline. This crate does no I/O; the extractor crate turns prose into
//! these types. Text handling here is limited to the shared date
//! shorthand and the round-trip comparison of rendered periods.
//!
//! ## Key Concepts
//!
//! - **ImpreciseDate**: a calendar date with a [`Precision`] and a certainty flag
//! - **TimeSpan**: an interval bounding when a single instant happened
//! - **Period**: one episode of ownership (party, location, method, dates)
//! - **Timeline**: an arena of periods chained in document order, with the
//!   direct-transfer flag kept on the edge between neighbours
//! - **Acquisition methods**: static vocabulary of how objects change hands
//! - **Shorthand**: compact ranges ("1985-86") and their canonical wording
//!
//! ## Architecture
//!
//! - Pure domain logic, no I/O
//! - Static vocabularies are immutable after first use
//! - Trait definitions for the collaborators the pipeline reads through

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acquisition;
pub mod certainty;
pub mod date;
pub mod party;
pub mod period;
pub mod precision;
pub mod record;
pub mod shorthand;
pub mod time_span;
pub mod timeline;
pub mod traits;

// Re-exports for convenience
pub use acquisition::{AcquisitionMethod, AcquisitionTable, Form, MethodMatch, Placement};
pub use date::ImpreciseDate;
pub use party::{Location, Party};
pub use period::{Period, PeriodId};
pub use precision::Precision;
pub use record::{DateRecord, PeriodRecord};
pub use time_span::{time_string, TimeSpan};
pub use timeline::Timeline;
