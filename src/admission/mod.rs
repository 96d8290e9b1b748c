//! Admission review of Stage documents.
//!
//! This is the caller-side orchestration around structural validation:
//! it checks that the Stage's namespace is a project, runs
//! [`validate`](crate::validation::validate) on create and update, and maps
//! every failure onto an [`AdmissionError`].
//!
//! # Example
//!
//! ```
//! use stagecheck::admission::{AdmissionError, KnownProjects, StageAdmission};
//! use stagecheck::config::parse_stage;
//! use std::path::Path;
//!
//! let stage = parse_stage(
//!     "metadata:\n  name: test\n  namespace: kargo-demo\nspec:\n  subscriptions: {}\n",
//!     Path::new("stage.yaml"),
//! )
//! .unwrap();
//!
//! let admission = StageAdmission::new(KnownProjects::new(["kargo-demo"], Vec::<String>::new()));
//! match admission.validate_create(&stage) {
//!     Err(AdmissionError::Invalid { violations, .. }) => assert_eq!(violations.len(), 1),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

pub mod project;

pub use project::{KnownProjects, ProjectError, ProjectLookup};

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::schema::{Stage, STAGE_GROUP, STAGE_KIND};
use crate::validation::{validate, ErrorList};

/// Why an admission review rejected a Stage.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The Stage references something that does not exist.
    #[error("{resource} {name:?} not found")]
    NotFound { resource: String, name: String },

    /// The Stage is invalid; every violation is listed.
    #[error("{}", render_invalid(.name, .violations))]
    Invalid { name: String, violations: ErrorList },

    /// The review could not be completed.
    #[error("Internal error occurred: {0:#}")]
    Internal(anyhow::Error),
}

fn render_invalid(name: &str, violations: &ErrorList) -> String {
    let rendered: Vec<String> = violations.iter().map(ToString::to_string).collect();
    let body = match rendered.as_slice() {
        [single] => single.clone(),
        many => format!("[{}]", many.join(", ")),
    };
    format!("{}.{} {:?} is invalid: {}", STAGE_KIND, STAGE_GROUP, name, body)
}

/// Kind of change being reviewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Create,
    Update,
    Delete,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            _ => Err(format!("unknown operation: {}", s)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Admission reviewer for Stage documents.
pub struct StageAdmission<L> {
    projects: L,
}

impl<L: ProjectLookup> StageAdmission<L> {
    /// Create a reviewer backed by a project lookup.
    pub fn new(projects: L) -> Self {
        Self { projects }
    }

    /// Review a newly created Stage.
    pub fn validate_create(&self, stage: &Stage) -> Result<(), AdmissionError> {
        self.validate_project(stage)?;
        self.validate_create_or_update(stage)
    }

    /// Review an update. Only the new document is inspected.
    pub fn validate_update(&self, _old: &Stage, new: &Stage) -> Result<(), AdmissionError> {
        self.validate_project(new)?;
        self.validate_create_or_update(new)
    }

    /// Review a deletion. Only the project is checked.
    pub fn validate_delete(&self, stage: &Stage) -> Result<(), AdmissionError> {
        self.validate_project(stage)
    }

    /// Review `stage` for the given operation.
    ///
    /// `old` is the prior version on update; it is accepted for symmetry
    /// with the admission request and never inspected.
    pub fn review(
        &self,
        operation: Operation,
        stage: &Stage,
        old: Option<&Stage>,
    ) -> Result<(), AdmissionError> {
        tracing::debug!(
            %operation,
            stage = stage.name(),
            namespace = stage.namespace(),
            "admission review"
        );
        match operation {
            Operation::Create => self.validate_create(stage),
            Operation::Update => self.validate_update(old.unwrap_or(stage), stage),
            Operation::Delete => self.validate_delete(stage),
        }
    }

    fn validate_project(&self, stage: &Stage) -> Result<(), AdmissionError> {
        let namespace = stage.namespace();
        match self.projects.validate_project(namespace) {
            Ok(()) => Ok(()),
            Err(ProjectError::NotFound) => {
                tracing::debug!(namespace, "project not found");
                Err(AdmissionError::NotFound {
                    resource: "Namespace".to_string(),
                    name: namespace.to_string(),
                })
            }
            Err(ProjectError::Field(violation)) => Err(AdmissionError::Invalid {
                name: stage.name().to_string(),
                violations: vec![violation],
            }),
            Err(ProjectError::Internal(err)) => {
                tracing::warn!(namespace, error = %err, "project lookup failed");
                Err(AdmissionError::Internal(err))
            }
        }
    }

    fn validate_create_or_update(&self, stage: &Stage) -> Result<(), AdmissionError> {
        let violations = validate(stage);
        if violations.is_empty() {
            return Ok(());
        }
        Err(AdmissionError::Invalid {
            name: stage.name().to_string(),
            violations,
        })
    }
}
