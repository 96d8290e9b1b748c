//! stagecheck - Admission checks for Kargo Stage manifests.
//!
//! A Stage declares where its freight comes from (subscriptions) and how it
//! is promoted (promotion mechanisms). stagecheck applies the structural
//! rules an admission webhook enforces and reports every violation it finds,
//! each with the path of the offending field.
//!
//! # Modules
//!
//! - [`admission`] - Project checks and create/update/delete review
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Stage schema, manifest loading, and tool settings
//! - [`error`] - Error types and result aliases
//! - [`report`] - Diagnostics and output formatters
//! - [`ui`] - Terminal output
//! - [`validation`] - Structural validation of Stage specs
//!
//! # Example
//!
//! ```
//! use stagecheck::config::parse_stage;
//! use stagecheck::validation::validate;
//! use std::path::Path;
//!
//! let stage = parse_stage(
//!     "metadata:\n  name: test\nspec:\n  subscriptions:\n    upstreamStages:\n      - name: dev\n",
//!     Path::new("stage.yaml"),
//! )
//! .unwrap();
//! assert!(validate(&stage).is_empty());
//! ```
//!
//! For file-based checks, see the integration tests.

pub mod admission;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod ui;
pub mod validation;

pub use error::{Result, StageCheckError};
