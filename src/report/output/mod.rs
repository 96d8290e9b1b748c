//! Report output formatters.
//!
//! This module provides formatters for writing a [`Report`] in different
//! formats (human-readable, JSON).

pub mod human;
pub mod json;

use crate::report::Report;
use std::io::Write;
use std::str::FromStr;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

/// Trait for formatting report output.
pub trait ReportFormatter {
    /// Format a report to the given writer.
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()>;
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;
