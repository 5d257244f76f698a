//! Parse command implementation.

use super::read_input;
use crate::cli::InputArgs;
use crate::error::Result;
use crate::output::Formatter;
use provenance_domain::AcquisitionTable;
use provenance_extractor::Extractor;

/// Execute the parse command.
pub fn execute_parse(
    args: InputArgs,
    extractor: &Extractor<&'static AcquisitionTable>,
    formatter: &Formatter,
) -> Result<()> {
    let text = read_input(args)?;
    let timeline = extractor.try_extract(&text)?;
    println!("{}", formatter.format_timeline(&timeline)?);
    Ok(())
}
