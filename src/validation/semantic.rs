//! Semantic value validators.
//!
//! Parsers for the opaque string values a Stage carries, and the
//! validators that turn a parse failure into a [`FieldViolation`]:
//!
//! - [`VersionConstraint`] - semantic-version range expressions
//! - [`Platform`] - `os/arch[/variant]` identifiers
//!
//! An empty value means "unconstrained" and is always valid.

use semver::{Version, VersionReq};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::path::FieldPath;
use super::violation::FieldViolation;

/// Error parsing a version constraint expression.
#[derive(Debug, Error)]
pub enum ConstraintError {
    #[error("version constraint is empty")]
    Empty,

    #[error("empty comparator in {expr:?}")]
    EmptyComparator { expr: String },

    #[error("wildcard cannot be combined with an operator in {comparator:?}")]
    WildcardWithOperator { comparator: String },

    #[error("invalid version in {comparator:?}: {source}")]
    InvalidVersion {
        comparator: String,
        #[source]
        source: semver::Error,
    },

    #[error("invalid version range {range:?}: {source}")]
    InvalidRange {
        range: String,
        #[source]
        source: semver::Error,
    },
}

/// A parsed semantic-version range expression.
///
/// Grammar:
/// - alternatives are separated by `||`
/// - comparators within an alternative are separated by `,`
/// - `A - B` is an inclusive range, equivalent to `>= A, <= B`
/// - `!= V` excludes one version; `!= 1.x` excludes a wildcard range
/// - `=>`, `=<` and `~>` are aliases for `>=`, `<=` and `~`
/// - `x`, `X` and `*` are wildcards, allowed only on a bare version or
///   after `!=`
/// - a leading `v` on a version is ignored
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone)]
struct Alternative {
    req: VersionReq,
    excluded: Vec<Exclusion>,
}

#[derive(Debug, Clone)]
enum Exclusion {
    Version(Version),
    Range(VersionReq),
}

impl Exclusion {
    fn excludes(&self, version: &Version) -> bool {
        match self {
            Exclusion::Version(excluded) => excluded == version,
            Exclusion::Range(req) => req.matches(version),
        }
    }
}

impl VersionConstraint {
    /// Parse a constraint expression.
    pub fn parse(expr: &str) -> Result<Self, ConstraintError> {
        if expr.trim().is_empty() {
            return Err(ConstraintError::Empty);
        }

        let alternatives = expr
            .split("||")
            .map(parse_alternative)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { alternatives })
    }

    /// Whether `version` satisfies at least one alternative.
    ///
    /// Admission only needs [`parse`](Self::parse); this is library API for
    /// callers that select versions with a parsed constraint.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|alt| {
            alt.req.matches(version) && !alt.excluded.iter().any(|e| e.excludes(version))
        })
    }
}

impl FromStr for VersionConstraint {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_alternative(alternative: &str) -> Result<Alternative, ConstraintError> {
    let mut comparators = Vec::new();
    let mut excluded = Vec::new();

    for token in alternative.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConstraintError::EmptyComparator {
                expr: alternative.trim().to_string(),
            });
        }

        if let Some((low, high)) = token.split_once(" - ") {
            comparators.push(format!(">={}", bare_version(low)?));
            comparators.push(format!("<={}", bare_version(high)?));
        } else if let Some(rest) = token.strip_prefix("!=") {
            excluded.push(exclusion(rest)?);
        } else {
            comparators.push(comparator(token)?);
        }
    }

    let req = if comparators.is_empty() {
        VersionReq::STAR
    } else {
        let joined = comparators.join(", ");
        VersionReq::parse(&joined).map_err(|source| ConstraintError::InvalidRange {
            range: alternative.trim().to_string(),
            source,
        })?
    };

    Ok(Alternative { req, excluded })
}

/// Normalize one comparator: strip a `v` prefix and reject an operator
/// applied to a wildcard version.
fn comparator(token: &str) -> Result<String, ConstraintError> {
    let op_len = token
        .find(|c: char| !matches!(c, '<' | '>' | '=' | '~' | '^'))
        .unwrap_or(token.len());
    let (op, version) = token.split_at(op_len);
    let op = match op {
        "=>" => ">=",
        "=<" => "<=",
        "~>" => "~",
        other => other,
    };
    let version = version.trim();
    if version.is_empty() {
        return Err(ConstraintError::EmptyComparator {
            expr: token.to_string(),
        });
    }

    let version = version.strip_prefix('v').unwrap_or(version);
    if !op.is_empty() && has_wildcard(version) {
        return Err(ConstraintError::WildcardWithOperator {
            comparator: token.to_string(),
        });
    }

    Ok(format!("{}{}", op, version))
}

fn bare_version(raw: &str) -> Result<String, ConstraintError> {
    let version = raw.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    if version.is_empty() {
        return Err(ConstraintError::EmptyComparator {
            expr: raw.to_string(),
        });
    }
    if has_wildcard(version) {
        return Err(ConstraintError::WildcardWithOperator {
            comparator: raw.trim().to_string(),
        });
    }
    Ok(version.to_string())
}

fn has_wildcard(version: &str) -> bool {
    let core = version.split(['-', '+']).next().unwrap_or_default();
    core.contains(['x', 'X', '*'])
}

/// Parse the operand of `!=`: a wildcard excludes a whole range, anything
/// else a single version.
fn exclusion(raw: &str) -> Result<Exclusion, ConstraintError> {
    let version = raw.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    if !has_wildcard(version) {
        return lenient_version(raw).map(Exclusion::Version);
    }
    VersionReq::parse(version)
        .map(Exclusion::Range)
        .map_err(|source| ConstraintError::InvalidVersion {
            comparator: format!("!={}", raw.trim()),
            source,
        })
}

/// Parse a possibly partial version (`1`, `1.2`) by zero-filling.
fn lenient_version(raw: &str) -> Result<Version, ConstraintError> {
    let version = raw.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    let split_at = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(split_at);

    let mut core = core.to_string();
    for _ in core.matches('.').count()..2 {
        core.push_str(".0");
    }

    Version::parse(&format!("{}{}", core, suffix)).map_err(|source| {
        ConstraintError::InvalidVersion {
            comparator: format!("!={}", raw.trim()),
            source,
        }
    })
}

/// Error parsing a platform identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid platform identifier {value:?}: expected os/arch[/variant]")]
pub struct PlatformError {
    pub value: String,
}

/// A target platform: operating system, architecture and optional variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
    pub variant: Option<String>,
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PlatformError {
            value: s.to_string(),
        };

        let mut parts = s.split('/');
        let os = parts.next().ok_or_else(err)?;
        let arch = parts.next().ok_or_else(err)?;
        let variant = parts.next().filter(|v| !v.is_empty()).map(str::to_string);

        Ok(Self {
            os: os.to_string(),
            arch: arch.to_string(),
            variant,
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)?;
        if let Some(variant) = &self.variant {
            write!(f, "/{}", variant)?;
        }
        Ok(())
    }
}

/// Validate a version constraint expression. Empty is valid.
pub fn validate_version_constraint(path: &FieldPath, expr: &str) -> Option<FieldViolation> {
    if expr.is_empty() {
        return None;
    }
    match VersionConstraint::parse(expr) {
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "invalid version constraint");
            Some(FieldViolation::parse(path.clone(), expr))
        }
    }
}

/// Validate a platform identifier. Empty is valid.
pub fn validate_platform(path: &FieldPath, value: &str) -> Option<FieldViolation> {
    if value.is_empty() {
        return None;
    }
    match value.parse::<Platform>() {
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(path = %path, error = %err, "invalid platform");
            Some(FieldViolation::parse(path.clone(), value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn accepts_common_constraints() {
        for expr in [
            "^1.2.3",
            "~1.2",
            ">=1.2.0, <2.0.0",
            "1.x",
            "1.2.X",
            "*",
            "=1.0.0",
            "v1.2.3",
            ">= v1.2",
            "1.2.3 - 2.0.0",
            "^1.0 || ^2.0",
            ">=1.0.0, !=1.5.0",
            "!=1.2",
            "=>1.0.0",
            "=<2.0.0",
            "~>1.2",
            "~> 1.2.3",
            "!=1.x",
            ">=1.0.0, != 1.2.*",
        ] {
            assert!(VersionConstraint::parse(expr).is_ok(), "expected {expr:?} to parse");
        }
    }

    #[test]
    fn rejects_invalid_constraints() {
        for expr in [
            "not-a-range",
            "^1.x",
            ">=1.*",
            "1.2.3 - 2.x",
            ">=1.0.0,",
            "^1.0 ||",
            "bogus || ^1.0",
            "!=banana",
            "~>1.x",
            "=>1.*",
            "  ",
        ] {
            assert!(VersionConstraint::parse(expr).is_err(), "expected {expr:?} to fail");
        }
    }

    #[test]
    fn wildcard_with_operator_error_kind() {
        let err = VersionConstraint::parse("^1.x").unwrap_err();
        assert!(matches!(err, ConstraintError::WildcardWithOperator { .. }));
    }

    #[test]
    fn matches_range() {
        let c = VersionConstraint::parse(">=1.2.0, <2.0.0").unwrap();
        assert!(c.matches(&v("1.2.0")));
        assert!(c.matches(&v("1.9.9")));
        assert!(!c.matches(&v("2.0.0")));
        assert!(!c.matches(&v("1.1.9")));
    }

    #[test]
    fn matches_alternatives_and_exclusions() {
        let c = VersionConstraint::parse("^1.0, !=1.5.0 || ^3.0").unwrap();
        assert!(c.matches(&v("1.4.0")));
        assert!(!c.matches(&v("1.5.0")));
        assert!(!c.matches(&v("2.0.0")));
        assert!(c.matches(&v("3.1.0")));
    }

    #[test]
    fn matches_hyphen_range_inclusive() {
        let c = VersionConstraint::parse("1.2.3 - 2.0.0").unwrap();
        assert!(c.matches(&v("1.2.3")));
        assert!(c.matches(&v("2.0.0")));
        assert!(!c.matches(&v("2.0.1")));
    }

    #[test]
    fn operator_aliases_match_like_canonical_forms() {
        let c = VersionConstraint::parse("=>1.2.0, =<1.9.0").unwrap();
        assert!(c.matches(&v("1.2.0")));
        assert!(c.matches(&v("1.9.0")));
        assert!(!c.matches(&v("1.9.1")));

        let c = VersionConstraint::parse("~>1.2").unwrap();
        assert!(c.matches(&v("1.2.7")));
        assert!(!c.matches(&v("1.3.0")));
    }

    #[test]
    fn wildcard_exclusion_removes_range() {
        let c = VersionConstraint::parse(">=1.0.0, !=1.2.x").unwrap();
        assert!(c.matches(&v("1.1.0")));
        assert!(!c.matches(&v("1.2.5")));
        assert!(c.matches(&v("1.3.0")));
    }

    #[test]
    fn exclusion_only_matches_everything_else() {
        let c = VersionConstraint::parse("!=1.2").unwrap();
        assert!(!c.matches(&v("1.2.0")));
        assert!(c.matches(&v("1.3.0")));
    }

    #[test]
    fn parses_platform_with_and_without_variant() {
        let p: Platform = "linux/amd64".parse().unwrap();
        assert_eq!(p.os, "linux");
        assert_eq!(p.arch, "amd64");
        assert_eq!(p.variant, None);

        let p: Platform = "linux/arm/v7".parse().unwrap();
        assert_eq!(p.variant.as_deref(), Some("v7"));
        assert_eq!(p.to_string(), "linux/arm/v7");
    }

    #[test]
    fn rejects_platforms_without_separator() {
        for value in ["bogus", ""] {
            assert!(value.parse::<Platform>().is_err(), "expected {value:?} to fail");
        }
    }

    #[test]
    fn platform_components_may_be_empty() {
        let p: Platform = "linux/".parse().unwrap();
        assert_eq!((p.os.as_str(), p.arch.as_str()), ("linux", ""));

        let p: Platform = "/amd64".parse().unwrap();
        assert_eq!((p.os.as_str(), p.arch.as_str()), ("", "amd64"));

        let p: Platform = "linux/arm/".parse().unwrap();
        assert_eq!(p.variant, None);

        let path = FieldPath::new("spec").child("platform");
        assert!(validate_platform(&path, "linux/").is_none());
    }

    #[test]
    fn empty_values_are_unconstrained() {
        let path = FieldPath::new("spec");
        assert!(validate_version_constraint(&path, "").is_none());
        assert!(validate_platform(&path, "").is_none());
    }

    #[test]
    fn invalid_constraint_reports_raw_value() {
        let path = FieldPath::new("spec").child("semverConstraint");
        let violation = validate_version_constraint(&path, "not-a-range").unwrap();
        assert_eq!(violation.path, path);
        assert_eq!(violation.invalid_value, "not-a-range");
        assert!(violation.detail.is_none());
    }

    #[test]
    fn platform_validation() {
        let path = FieldPath::new("spec").child("platform");
        assert!(validate_platform(&path, "linux/amd64").is_none());

        let violation = validate_platform(&path, "bogus").unwrap();
        assert_eq!(violation.invalid_value, "bogus");
    }
}
