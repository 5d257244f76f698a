//! Check command implementation.

use super::read_input;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output::{Formatter, PeriodCheck};
use provenance_domain::{AcquisitionTable, Timeline};
use provenance_extractor::Extractor;

/// Execute the check command.
pub fn execute_check(
    args: CheckArgs,
    extractor: &Extractor<&'static AcquisitionTable>,
    formatter: &Formatter,
) -> Result<()> {
    let strict = args.strict || extractor.config().strict_parsable;
    let text = read_input(args.input)?;
    let timeline = extractor.try_extract(&text)?;
    let checks = check_timeline(&timeline, strict, extractor);
    println!("{}", formatter.format_checks(&checks)?);

    let failed = checks.iter().filter(|c| !c.parsable).count();
    if failed > 0 {
        println!("{}", formatter.warning(&format!("{} of {} period(s) do not round-trip", failed, checks.len())));
    }
    Ok(())
}

fn check_timeline(
    timeline: &Timeline,
    strict: bool,
    extractor: &Extractor<&'static AcquisitionTable>,
) -> Vec<PeriodCheck> {
    timeline
        .ids()
        .into_iter()
        .enumerate()
        .map(|(index, id)| PeriodCheck {
            index,
            provenance: timeline.provenance_of(id),
            parsable: timeline.parsable_with(id, strict, extractor.lookup()),
        })
        .collect()
}
