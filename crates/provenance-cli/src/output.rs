//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use provenance_domain::{Period, Timeline};
use provenance_extractor::Reconstruction;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

/// Round-trip result for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodCheck {
    /// Position in the timeline
    pub index: usize,
    /// Regenerated text for the period
    pub provenance: String,
    /// Whether the text parses back to the same period
    pub parsable: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a timeline.
    pub fn format_timeline(&self, timeline: &Timeline) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(timeline.to_json()?),
            OutputFormat::Table => Ok(self.format_timeline_table(timeline)),
            OutputFormat::Text => Ok(timeline.provenance()),
        }
    }

    fn format_timeline_table(&self, timeline: &Timeline) -> String {
        if timeline.is_empty() {
            return self.colorize("No periods found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Party", "Location", "Method", "Dates", "Direct", "Certain"]);

        for (index, id) in timeline.ids().into_iter().enumerate() {
            let period = &timeline[index];
            let direct = match timeline.direct_transfer(id) {
                Some(true) => "yes",
                Some(false) => "no",
                None => "",
            };
            builder.push_record([
                index.to_string(),
                party_cell(period),
                period.location.as_ref().map(|l| l.display_name()).unwrap_or_default(),
                period
                    .acquisition_method
                    .as_ref()
                    .map(|m| m.name.to_string())
                    .unwrap_or_default(),
                timeline.time_string(id),
                direct.to_string(),
                if period.certain { "yes" } else { "no" }.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format round-trip checks.
    pub fn format_checks(&self, checks: &[PeriodCheck]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<serde_json::Value> = checks
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "index": c.index,
                            "provenance": c.provenance,
                            "parsable": c.parsable
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => {
                if checks.is_empty() {
                    return Ok(self.colorize("No periods found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Provenance", "Parsable"]);
                for check in checks {
                    builder.push_record([
                        check.index.to_string(),
                        check.provenance.clone(),
                        self.verdict(check.parsable),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Text => Ok(checks
                .iter()
                .map(|c| format!("{}\t{}", self.verdict(c.parsable), c.provenance))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a reconstruction from records.
    pub fn format_reconstruction(&self, rebuilt: &Reconstruction) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "text": rebuilt.text,
                    "failures": rebuilt.failures,
                    "periods": rebuilt.timeline.to_records(),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut lines: Vec<String> = rebuilt
                    .failures
                    .iter()
                    .map(|f| self.warning(&format!("Record {} skipped: {}", f.index, f.reason)))
                    .collect();
                lines.push(self.format_timeline_table(&rebuilt.timeline));
                Ok(lines.join("\n"))
            }
            OutputFormat::Text => Ok(rebuilt.text.clone()),
        }
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    fn verdict(&self, parsable: bool) -> String {
        if parsable {
            self.colorize("yes", "green")
        } else {
            self.colorize("no", "red")
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn party_cell(period: &Period) -> String {
    let name = period.party.as_ref().map(|p| p.display_name()).unwrap_or_default();
    if period.primary_owner {
        name
    } else {
        format!("({})", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provenance_extractor::{extract, Extractor};

    const TEXT: &str = "Mr. and Mrs. James L. Winokur, Pittsburgh, circa 1965; gift to museum, 1968";

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_timeline(&extract(TEXT)).unwrap();
        assert!(output.contains("Party"));
        assert!(output.contains("Pittsburgh"));
        assert!(output.contains("1965?"));
        assert!(output.contains("Gift"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_timeline(&extract(TEXT)).unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_text_format() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_timeline(&extract(TEXT)).unwrap();
        assert_eq!(output, "Mr. and Mrs. James L. Winokur, Pittsburgh, 1965?; gift to museum, 1968.");
    }

    #[test]
    fn test_empty_timeline() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_timeline(&Timeline::new()).unwrap();
        assert!(output.contains("No periods found"));
    }

    #[test]
    fn test_checks_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let checks = vec![PeriodCheck {
            index: 0,
            provenance: "John Smith, Paris".to_string(),
            parsable: true,
        }];
        assert_eq!(formatter.format_checks(&checks).unwrap(), "yes\tJohn Smith, Paris");
    }

    #[test]
    fn test_reconstruction_lists_failures() {
        let records = vec![serde_json::json!({ "party": "John Smith" }), serde_json::json!(7)];
        let rebuilt = Extractor::standard().from_records(&records);
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_reconstruction(&rebuilt).unwrap();
        assert!(output.contains("Record 1 skipped"));
        assert!(output.contains("John Smith"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
