//! Error types for stagecheck operations.
//!
//! This module defines [`StageCheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Validation never fails: violations are data, returned as an
//!   [`ErrorList`](crate::validation::ErrorList)
//! - Use `StageCheckError` for failures around validation (loading
//!   documents, reading settings, admission rejections)
//! - Use `anyhow::Error` (via `StageCheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::admission::AdmissionError;

/// Core error type for stagecheck operations.
#[derive(Debug, Error)]
pub enum StageCheckError {
    /// Document or settings file not found.
    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    /// Failed to parse a Stage manifest.
    #[error("Failed to parse document at {path}: {message}")]
    DocumentParseError { path: PathBuf, message: String },

    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParseError { path: PathBuf, message: String },

    /// The admission review rejected the Stage.
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageCheckError {
    /// Process exit code for this error.
    ///
    /// Unreadable or unparseable input exits with 2, like an unknown
    /// project; anything else is an internal failure.
    pub fn exit_code(&self) -> i32 {
        use crate::cli::commands::exit_codes;

        match self {
            Self::DocumentNotFound { .. }
            | Self::DocumentParseError { .. }
            | Self::SettingsParseError { .. }
            | Self::Io(_) => exit_codes::NOT_FOUND,
            Self::Admission(AdmissionError::NotFound { .. }) => exit_codes::NOT_FOUND,
            Self::Admission(AdmissionError::Invalid { .. }) => exit_codes::INVALID,
            Self::Admission(AdmissionError::Internal(_)) | Self::Other(_) => exit_codes::INTERNAL,
        }
    }
}

/// Result type alias for stagecheck operations.
pub type Result<T> = std::result::Result<T, StageCheckError>;
