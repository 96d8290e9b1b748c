//! Stage validation entry points.

use crate::config::schema::{Stage, StageSpec};

use super::path::FieldPath;
use super::promotion::validate_promotion_mechanisms;
use super::subscriptions::validate_subscriptions;
use super::violation::ErrorList;

/// Validate a Stage spec rooted at `path`. Absent is valid.
///
/// Subscriptions and promotion mechanisms are validated independently;
/// subscription violations come first.
pub fn validate_spec(path: &FieldPath, spec: Option<&StageSpec>) -> ErrorList {
    let Some(spec) = spec else {
        return ErrorList::new();
    };

    let mut errs =
        validate_subscriptions(&path.child("subscriptions"), spec.subscriptions.as_ref());
    errs.extend(validate_promotion_mechanisms(
        &path.child("promotionMechanisms"),
        spec.promotion_mechanisms.as_ref(),
    ));
    errs
}

/// Validate the structure of a Stage document.
///
/// Returns every violation found, in traversal order. An empty list means
/// the document is structurally valid.
pub fn validate(stage: &Stage) -> ErrorList {
    tracing::debug!(stage = stage.name(), "validating stage");
    let errs = validate_spec(&FieldPath::new("spec"), stage.spec.as_ref());
    tracing::debug!(stage = stage.name(), violations = errs.len(), "validation finished");
    errs
}
