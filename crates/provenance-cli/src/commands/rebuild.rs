//! Rebuild command implementation.

use super::read_input;
use crate::cli::InputArgs;
use crate::error::Result;
use crate::output::Formatter;
use provenance_domain::AcquisitionTable;
use provenance_extractor::Extractor;

/// Execute the rebuild command.
pub fn execute_rebuild(
    args: InputArgs,
    extractor: &Extractor<&'static AcquisitionTable>,
    formatter: &Formatter,
) -> Result<()> {
    let json = read_input(args)?;
    let rebuilt = extractor.from_json(&json)?;
    println!("{}", formatter.format_reconstruction(&rebuilt)?);
    Ok(())
}
