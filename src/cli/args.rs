//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// stagecheck - Admission checks for Kargo Stage manifests.
#[derive(Debug, Parser)]
#[command(name = "stagecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides default .stagecheck.yml)
    #[arg(short, long, global = true, env = "STAGECHECK_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Review a Stage manifest the way admission would
    Validate(ValidateArgs),

    /// Print the JSON Schema of the Stage document
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ValidateArgs {
    /// Stage manifest to check (YAML or JSON)
    pub file: PathBuf,

    /// Admission operation to simulate
    #[arg(long, default_value = "create", value_parser = ["create", "update", "delete"])]
    pub operation: String,

    /// Previous version of the Stage (update only)
    #[arg(long)]
    pub old: Option<PathBuf>,

    /// Report format (human, json)
    #[arg(long, env = "STAGECHECK_FORMAT", value_parser = ["human", "json"])]
    pub format: Option<String>,

    /// Namespace that is a project (repeatable)
    #[arg(long = "project", value_name = "NS")]
    pub projects: Vec<String>,

    /// Namespace that exists but is not a project (repeatable)
    #[arg(long = "namespace", value_name = "NS")]
    pub namespaces: Vec<String>,
}

impl ValidateArgs {
    /// Arguments for checking `file` with every default.
    pub fn for_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            operation: "create".to_string(),
            old: None,
            format: None,
            projects: Vec::new(),
            namespaces: Vec::new(),
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
