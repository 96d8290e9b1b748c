//! JSON output formatter.
//!
//! Formats reports as machine-readable JSON for tooling integration.

use serde::Serialize;
use serde_json::Value;
use std::io::Write;

use super::ReportFormatter;
use crate::report::Report;
use crate::validation::{FieldPath, ViolationKind};

/// Formats reports as JSON.
#[derive(Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    stage: &'a str,
    valid: bool,
    violations: Vec<JsonViolation<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonViolation<'a> {
    path: &'a FieldPath,
    kind: ViolationKind,
    invalid_value: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    structural: usize,
    parse: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let violations = report
            .diagnostics
            .iter()
            .map(|d| JsonViolation {
                path: &d.violation.path,
                kind: d.violation.kind,
                invalid_value: &d.violation.invalid_value,
                detail: d.violation.detail.as_deref(),
                file: d.span.as_ref().map(|s| s.file.display().to_string()),
                line: d.span.as_ref().map(|s| s.line),
                column: d.span.as_ref().map(|s| s.column),
            })
            .collect();

        let output = JsonOutput {
            stage: &report.stage,
            valid: report.is_valid(),
            violations,
            summary: JsonSummary {
                total: report.diagnostics.len(),
                structural: report.count(ViolationKind::Structural),
                parse: report.count(ViolationKind::Parse),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Diagnostic, Span};
    use crate::validation::FieldViolation;

    fn render(report: &Report) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(report, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let report = Report {
            stage: "test".to_string(),
            diagnostics: vec![Diagnostic::new(FieldViolation::parse(
                FieldPath::new("spec").child("platform"),
                "bogus",
            ))],
        };

        let parsed = render(&report);
        assert_eq!(parsed["stage"], "test");
        assert_eq!(parsed["valid"], false);
        assert_eq!(parsed["violations"][0]["path"], "spec.platform");
        assert_eq!(parsed["violations"][0]["kind"], "parse");
        assert_eq!(parsed["violations"][0]["invalidValue"], "bogus");
        assert!(parsed["violations"][0]["detail"].is_null());
        assert!(parsed["violations"][0]["line"].is_null());
    }

    #[test]
    fn includes_location_when_present() {
        let report = Report {
            stage: "test".to_string(),
            diagnostics: vec![Diagnostic::new(FieldViolation::parse(FieldPath::new("spec"), "x"))
                .with_span(Span::new("stage.yaml", 10, 5))],
        };

        let parsed = render(&report);
        assert_eq!(parsed["violations"][0]["file"], "stage.yaml");
        assert_eq!(parsed["violations"][0]["line"], 10);
        assert_eq!(parsed["violations"][0]["column"], 5);
    }

    #[test]
    fn summary_counts_by_kind() {
        let report = Report {
            stage: "test".to_string(),
            diagnostics: vec![
                Diagnostic::new(FieldViolation::parse(FieldPath::new("a"), "1")),
                Diagnostic::new(FieldViolation::structural(FieldPath::new("b"), "2", "d")),
                Diagnostic::new(FieldViolation::structural(FieldPath::new("c"), "3", "d")),
            ],
        };

        let parsed = render(&report);
        assert_eq!(parsed["summary"]["total"], 3);
        assert_eq!(parsed["summary"]["structural"], 2);
        assert_eq!(parsed["summary"]["parse"], 1);
    }

    #[test]
    fn valid_report() {
        let parsed = render(&Report::default());
        assert_eq!(parsed["valid"], true);
        assert_eq!(parsed["summary"]["total"], 0);
        assert!(parsed["violations"].as_array().unwrap().is_empty());
    }
}
