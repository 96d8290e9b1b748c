//! Report diagnostics.
//!
//! A [`Diagnostic`] is a [`FieldViolation`] with an optional position in
//! the manifest; a [`Report`] is the full result for one Stage.

use crate::validation::{ErrorList, FieldViolation, ViolationKind};

use super::locate::SourceLocator;
use super::span::Span;

/// A violation prepared for display.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The violation being reported.
    pub violation: FieldViolation,
    /// Optional source location.
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Create a diagnostic without a location.
    pub fn new(violation: FieldViolation) -> Self {
        Self {
            violation,
            span: None,
        }
    }

    /// Add a source span to this diagnostic.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Validation result of one Stage, ready for formatting.
#[derive(Debug, Clone, Default)]
pub struct Report {
    /// Name of the Stage.
    pub stage: String,
    /// Diagnostics in traversal order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Build a report, locating each violation when a locator is given.
    pub fn new(
        stage: impl Into<String>,
        violations: ErrorList,
        locator: Option<&SourceLocator>,
    ) -> Self {
        let diagnostics = violations
            .into_iter()
            .map(|violation| {
                let span = locator.and_then(|l| l.locate(&violation.path));
                let diagnostic = Diagnostic::new(violation);
                match span {
                    Some(span) => diagnostic.with_span(span),
                    None => diagnostic,
                }
            })
            .collect();

        Self {
            stage: stage.into(),
            diagnostics,
        }
    }

    /// Whether the Stage passed.
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.violation.kind == kind)
            .count()
    }
}
