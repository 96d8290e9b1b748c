//! Structural validation of Stage documents.
//!
//! The validator walks the document top-down and collects every
//! violation it finds instead of stopping at the first one:
//!
//! - [`stage`] - entry point ([`validate`]) and spec orchestration
//! - [`subscriptions`] - repository / upstream Stage subscriptions
//! - [`promotion`] - promotion mechanisms
//! - [`semantic`] - version constraint and platform parsing
//! - [`path`] / [`violation`] - field addressing and results
//!
//! Validation is pure: it reads the document, performs no I/O and can run
//! concurrently on independent documents.
//!
//! # Example
//!
//! ```
//! use stagecheck::config::{RepoSubscriptions, ImageSubscription, Stage, StageSpec, Subscriptions};
//! use stagecheck::validation::validate;
//!
//! let stage = Stage {
//!     spec: Some(StageSpec {
//!         subscriptions: Some(Subscriptions {
//!             repos: Some(RepoSubscriptions {
//!                 images: vec![ImageSubscription {
//!                     repo_url: "nginx".to_string(),
//!                     semver_constraint: "^1.x".to_string(),
//!                     ..Default::default()
//!                 }],
//!                 ..Default::default()
//!             }),
//!             ..Default::default()
//!         }),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let errs = validate(&stage);
//! assert_eq!(errs.len(), 1);
//! assert_eq!(
//!     errs[0].path.to_string(),
//!     "spec.subscriptions.repos.images[0].semverConstraint"
//! );
//! ```

pub mod path;
pub mod promotion;
pub mod semantic;
pub mod stage;
pub mod subscriptions;
pub mod violation;

pub use path::{FieldPath, Segment};
pub use promotion::{
    validate_git_repo_update, validate_helm_promotion_mechanism, validate_promotion_mechanisms,
};
pub use semantic::{
    validate_platform, validate_version_constraint, ConstraintError, Platform, PlatformError,
    VersionConstraint,
};
pub use stage::{validate, validate_spec};
pub use subscriptions::{
    validate_chart_subscription, validate_image_subscription, validate_repo_subscriptions,
    validate_subscriptions,
};
pub use violation::{ErrorList, FieldViolation, ViolationKind};
