//! Field violations.
//!
//! A [`FieldViolation`] is a single constraint failure addressed by its
//! [`FieldPath`]. Validators never fail; they return an [`ErrorList`] that
//! is empty when the document is valid.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::path::FieldPath;

/// Ordered collection of violations produced by a validation pass.
pub type ErrorList = Vec<FieldViolation>;

/// Category of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// A cross-field constraint is unmet (exclusivity, cardinality).
    Structural,
    /// A scalar value failed to parse.
    Parse,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::Structural => write!(f, "structural"),
            ViolationKind::Parse => write!(f, "parse"),
        }
    }
}

/// A single field-addressed constraint failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    pub kind: ViolationKind,
    pub path: FieldPath,
    /// The offending value, serialized.
    pub invalid_value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FieldViolation {
    /// A structural violation at `path` with an explanatory detail.
    pub fn structural<T: Serialize + ?Sized>(
        path: FieldPath,
        value: &T,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind: ViolationKind::Structural,
            path,
            invalid_value: to_value(value),
            detail: Some(detail.into()),
        }
    }

    /// A parse violation at `path`. The raw value is the diagnostic.
    pub fn parse(path: FieldPath, raw: &str) -> Self {
        Self {
            kind: ViolationKind::Parse,
            path,
            invalid_value: Value::String(raw.to_string()),
            detail: None,
        }
    }

    /// A violation with an arbitrary value and detail, used for
    /// caller-side checks such as project membership.
    pub fn invalid(path: FieldPath, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            kind: ViolationKind::Structural,
            path,
            invalid_value: value.into(),
            detail: (!detail.is_empty()).then_some(detail),
        }
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Invalid value: {}", self.path, self.invalid_value)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}
