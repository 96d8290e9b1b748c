//! Tool settings.
//!
//! Settings are read from a YAML file: the path given by `--settings` /
//! `STAGECHECK_SETTINGS`, otherwise `.stagecheck.yml` in the working
//! directory when it exists. Command-line flags extend or override them.

use crate::error::{Result, StageCheckError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::loader::read_document;

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE: &str = ".stagecheck.yml";

/// Settings for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Namespaces that are projects.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,

    /// Namespaces that exist but are not projects.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<String>,

    /// Default report format: `human` or `json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Settings {
    /// Whether any namespace knowledge is configured.
    pub fn has_projects(&self) -> bool {
        !self.projects.is_empty() || !self.namespaces.is_empty()
    }

    /// Add namespaces from the command line, skipping duplicates.
    pub fn extend(&mut self, projects: &[String], namespaces: &[String]) {
        for project in projects {
            if !self.projects.contains(project) {
                self.projects.push(project.clone());
            }
        }
        for namespace in namespaces {
            if !self.namespaces.contains(namespace) {
                self.namespaces.push(namespace.clone());
            }
        }
    }
}

/// Find the settings file to use, if any.
pub fn discover_settings(explicit: Option<&Path>, working_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let path = working_dir.join(SETTINGS_FILE);
    path.exists().then_some(path)
}

/// Load settings from a file.
///
/// # Errors
///
/// Returns `DocumentNotFound` if the file doesn't exist.
/// Returns `SettingsParseError` if the YAML is invalid.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = read_document(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings = serde_yaml::from_str(&content).map_err(|e| {
        StageCheckError::SettingsParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    tracing::debug!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// Discover and load settings, falling back to defaults when none exist.
pub fn resolve_settings(explicit: Option<&Path>, working_dir: &Path) -> Result<Settings> {
    match discover_settings(explicit, working_dir) {
        Some(path) => load_settings(&path),
        None => Ok(Settings::default()),
    }
}
