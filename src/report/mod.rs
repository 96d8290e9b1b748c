//! Validation reports.
//!
//! Turns an [`ErrorList`](crate::validation::ErrorList) into something a
//! person or a tool can read:
//!
//! - [`Diagnostic`] / [`Report`] - violations with source positions
//! - [`SourceLocator`] - maps field paths into the manifest text
//! - [`HumanFormatter`] / [`JsonFormatter`] - output formats
//!
//! # Example
//!
//! ```
//! use stagecheck::report::{HumanFormatter, Report, ReportFormatter};
//! use stagecheck::validation::{FieldPath, FieldViolation};
//!
//! let report = Report::new(
//!     "test",
//!     vec![FieldViolation::parse(FieldPath::new("spec").child("platform"), "bogus")],
//!     None,
//! );
//!
//! let mut out = Vec::new();
//! HumanFormatter::new(false).format(&report, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("error[spec.platform]"));
//! ```

pub mod diagnostic;
pub mod locate;
pub mod output;
pub mod span;

pub use diagnostic::{Diagnostic, Report};
pub use locate::SourceLocator;
pub use output::{HumanFormatter, JsonFormatter, OutputFormat, ReportFormatter};
pub use span::Span;
