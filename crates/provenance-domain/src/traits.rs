//! Trait definitions for external collaborators
//!
//! The pipeline reads static vocabularies through these traits so that a
//! caller can substitute its own tables.

use crate::acquisition::{AcquisitionMethod, MethodMatch};

/// Lookup over acquisition-method vocabulary
///
/// Implemented by [`crate::AcquisitionTable`]
pub trait AcquisitionLookup {
    /// Find the longest form at the start (prefix forms) or standing as a
    /// trailing comma segment (suffix forms) of `text`
    fn find(&self, text: &str) -> Option<MethodMatch<'_>>;

    /// Find a method by name or id (case-insensitive)
    fn find_by_name(&self, name: &str) -> Option<&AcquisitionMethod>;

    /// Every synonym form, longest first
    fn all_forms(&self) -> Vec<&'static str>;
}

impl<T: AcquisitionLookup + ?Sized> AcquisitionLookup for &T {
    fn find(&self, text: &str) -> Option<MethodMatch<'_>> {
        (**self).find(text)
    }

    fn find_by_name(&self, name: &str) -> Option<&AcquisitionMethod> {
        (**self).find_by_name(name)
    }

    fn all_forms(&self) -> Vec<&'static str> {
        (**self).all_forms()
    }
}
