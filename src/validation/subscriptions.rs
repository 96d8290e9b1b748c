//! Subscription validation.
//!
//! - a Stage subscribes to repositories XOR upstream Stages
//! - repository subscriptions must name at least one git, image or chart source
//! - image and chart version constraints, and image platforms, must parse

use crate::config::schema::{
    ChartSubscription, ImageSubscription, RepoSubscriptions, Subscriptions,
};

use super::path::FieldPath;
use super::semantic::{validate_platform, validate_version_constraint};
use super::violation::{ErrorList, FieldViolation};

/// Validate the `subscriptions` section. Absent is valid.
pub fn validate_subscriptions(path: &FieldPath, subs: Option<&Subscriptions>) -> ErrorList {
    let Some(subs) = subs else {
        return ErrorList::new();
    };
    tracing::trace!(path = %path, "validating subscriptions");

    let has_repos = subs.repos.is_some();
    let has_upstream = !subs.upstream_stages.is_empty();
    if has_repos == has_upstream {
        tracing::debug!(path = %path, has_repos, has_upstream, "subscriptions are not exclusive");
        return vec![FieldViolation::structural(
            path.clone(),
            subs,
            format!(
                "exactly one of {}.repos or {}.upstreamStages must be defined",
                path, path
            ),
        )];
    }

    validate_repo_subscriptions(&path.child("repos"), subs.repos.as_ref())
}

/// Validate repository subscriptions. Absent is valid.
///
/// The at-least-one check does not stop per-element checks of images and
/// charts, so every violation is reported in one pass.
pub fn validate_repo_subscriptions(
    path: &FieldPath,
    repos: Option<&RepoSubscriptions>,
) -> ErrorList {
    let Some(repos) = repos else {
        return ErrorList::new();
    };

    let mut errs = ErrorList::new();
    if repos.git.is_empty() && repos.images.is_empty() && repos.charts.is_empty() {
        tracing::debug!(path = %path, "no repository subscriptions");
        errs.push(FieldViolation::structural(
            path.clone(),
            repos,
            format!(
                "at least one of {}.git, {}.images, or {}.charts must be non-empty",
                path, path, path
            ),
        ));
    }

    let images = path.child("images");
    for (i, sub) in repos.images.iter().enumerate() {
        errs.extend(validate_image_subscription(&images.index(i), sub));
    }

    let charts = path.child("charts");
    for (i, sub) in repos.charts.iter().enumerate() {
        errs.extend(validate_chart_subscription(&charts.index(i), sub));
    }

    errs
}

/// Validate one image subscription: constraint first, then platform.
pub fn validate_image_subscription(path: &FieldPath, sub: &ImageSubscription) -> ErrorList {
    tracing::trace!(path = %path, repo = %sub.repo_url, "validating image subscription");

    let mut errs = ErrorList::new();
    errs.extend(validate_version_constraint(
        &path.child("semverConstraint"),
        &sub.semver_constraint,
    ));
    if !sub.platform.is_empty() {
        errs.extend(validate_platform(&path.child("platform"), &sub.platform));
    }
    errs
}

/// Validate one chart subscription.
pub fn validate_chart_subscription(path: &FieldPath, sub: &ChartSubscription) -> ErrorList {
    tracing::trace!(path = %path, chart = %sub.name, "validating chart subscription");

    validate_version_constraint(&path.child("semverConstraint"), &sub.semver_constraint)
        .into_iter()
        .collect()
}
