//! Human-readable output formatter.
//!
//! Formats reports for terminal display with optional color support.

use console::Style;
use std::io::Write;

use super::ReportFormatter;
use crate::report::Report;

/// Formats reports for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn style(&self, style: Style) -> Style {
        if self.use_color {
            style
        } else {
            Style::new()
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let error = self.style(Style::new().red().bold());
        let dim = self.style(Style::new().dim());

        for diag in &report.diagnostics {
            let violation = &diag.violation;

            // Header line: error[spec.path]: parse violation
            writeln!(
                writer,
                "{}[{}]: {} violation",
                error.apply_to("error"),
                violation.path,
                violation.kind
            )?;

            if let Some(ref span) = diag.span {
                writeln!(writer, "  {} {}", dim.apply_to("-->"), span)?;
            }

            writeln!(writer, "   = value: {}", violation.invalid_value)?;

            if let Some(ref detail) = violation.detail {
                writeln!(writer, "   = help: {}", detail)?;
            }

            writeln!(writer)?;
        }

        if !report.diagnostics.is_empty() {
            writeln!(
                writer,
                "Found {} violation(s) in Stage {:?}",
                report.diagnostics.len(),
                report.stage
            )?;
        }

        Ok(())
    }
}
