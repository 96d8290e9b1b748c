//! Promotion mechanism validation.

use crate::config::schema::{
    GitRepoUpdate, HelmPromotionMechanism, PromotionMechanisms, UpdateStrategy,
};

use super::path::FieldPath;
use super::violation::{ErrorList, FieldViolation};

/// Validate the `promotionMechanisms` section. Absent is valid.
///
/// Git repo updates are checked element by element even when the section
/// itself defines no mechanism.
pub fn validate_promotion_mechanisms(
    path: &FieldPath,
    mechs: Option<&PromotionMechanisms>,
) -> ErrorList {
    let Some(mechs) = mechs else {
        return ErrorList::new();
    };
    tracing::trace!(path = %path, "validating promotion mechanisms");

    let mut errs = ErrorList::new();
    if mechs.git_repo_updates.is_empty() && mechs.argocd_app_updates.is_empty() {
        tracing::debug!(path = %path, "no promotion mechanisms");
        errs.push(FieldViolation::structural(
            path.clone(),
            mechs,
            format!(
                "at least one of {}.gitRepoUpdates or {}.argoCDAppUpdates must be non-empty",
                path, path
            ),
        ));
    }

    let updates = path.child("gitRepoUpdates");
    for (i, update) in mechs.git_repo_updates.iter().enumerate() {
        errs.extend(validate_git_repo_update(&updates.index(i), update));
    }

    errs
}

/// Validate one git repo update.
///
/// When more than one strategy is set there is no selected strategy to
/// inspect, so the helm check is skipped.
pub fn validate_git_repo_update(path: &FieldPath, update: &GitRepoUpdate) -> ErrorList {
    match update.strategy() {
        Err(ambiguous) => {
            tracing::debug!(path = %path, set = ?ambiguous.set, "ambiguous update strategy");
            vec![FieldViolation::structural(
                path.clone(),
                update,
                format!(
                    "no more than one of {}.bookkeeper, or {}.kustomize, or {}.helm may be defined",
                    path, path, path
                ),
            )]
        }
        Ok(Some(UpdateStrategy::Helm(helm))) => {
            validate_helm_promotion_mechanism(&path.child("helm"), Some(helm))
        }
        Ok(_) => ErrorList::new(),
    }
}

/// Validate a helm promotion mechanism. Absent is valid.
pub fn validate_helm_promotion_mechanism(
    path: &FieldPath,
    mech: Option<&HelmPromotionMechanism>,
) -> ErrorList {
    let Some(mech) = mech else {
        return ErrorList::new();
    };

    if mech.images.is_empty() && mech.charts.is_empty() {
        tracing::debug!(path = %path, "helm mechanism defines no changes");
        return vec![FieldViolation::structural(
            path.clone(),
            mech,
            format!(
                "at least one of {}.images or {}.charts must be non-empty",
                path, path
            ),
        )];
    }
    ErrorList::new()
}
