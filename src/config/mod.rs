//! Stage documents and tool settings.
//!
//! - Schema definitions in [`schema`]
//! - Manifest loading in [`loader`]
//! - Tool settings in [`settings`]
//!
//! # Example
//!
//! ```
//! use stagecheck::config::parse_stage;
//! use std::path::Path;
//!
//! let stage = parse_stage(
//!     "metadata:\n  name: test\n  namespace: kargo-demo\n",
//!     Path::new("stage.yaml"),
//! )
//! .unwrap();
//! assert_eq!(stage.name(), "test");
//! assert!(stage.spec.is_none());
//! ```

pub mod loader;
pub mod schema;
pub mod settings;

// Schema re-exports
pub use schema::{
    AmbiguousStrategy, ArgoCdAppUpdate, BookkeeperPromotionMechanism, ChartSubscription,
    GitRepoUpdate, GitSubscription, HelmChartDependencyUpdate, HelmImageUpdate,
    HelmPromotionMechanism, ImageSubscription, KustomizeImageUpdate, KustomizePromotionMechanism,
    ObjectMeta, PromotionMechanisms, RepoSubscriptions, Stage, StageSpec, StageSubscription,
    Subscriptions, UpdateStrategy, STAGE_GROUP, STAGE_KIND,
};

// Loader re-exports
pub use loader::{load_stage_file, parse_stage, LoadedStage};

// Settings re-exports
pub use settings::{discover_settings, load_settings, resolve_settings, Settings, SETTINGS_FILE};
