//! Project existence checks.
//!
//! A Stage lives in a namespace that must be a project. The check is a
//! collaborator of the admission review, not of structural validation:
//! [`ProjectLookup`] abstracts where the knowledge comes from.

use std::collections::HashSet;

use crate::validation::{FieldPath, FieldViolation};

/// Outcome of a failed project check.
#[derive(Debug)]
pub enum ProjectError {
    /// The namespace does not exist.
    NotFound,
    /// The namespace exists but a field makes it unacceptable.
    Field(FieldViolation),
    /// The lookup itself failed.
    Internal(anyhow::Error),
}

/// Source of truth for which namespaces are projects.
pub trait ProjectLookup: Send + Sync {
    /// Check that `namespace` is an existing project.
    fn validate_project(&self, namespace: &str) -> Result<(), ProjectError>;
}

impl<T: ProjectLookup + ?Sized> ProjectLookup for &T {
    fn validate_project(&self, namespace: &str) -> Result<(), ProjectError> {
        (**self).validate_project(namespace)
    }
}

impl<T: ProjectLookup + ?Sized> ProjectLookup for Box<T> {
    fn validate_project(&self, namespace: &str) -> Result<(), ProjectError> {
        (**self).validate_project(namespace)
    }
}

/// In-memory project lookup built from settings.
#[derive(Debug, Clone, Default)]
pub struct KnownProjects {
    projects: HashSet<String>,
    namespaces: HashSet<String>,
    accept_any: bool,
}

impl KnownProjects {
    /// Create a lookup from namespaces that are projects and namespaces
    /// that exist without being projects.
    pub fn new<P, N>(projects: P, namespaces: N) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        Self {
            projects: projects.into_iter().map(Into::into).collect(),
            namespaces: namespaces.into_iter().map(Into::into).collect(),
            accept_any: false,
        }
    }

    /// A lookup that treats every namespace as a project.
    pub fn any() -> Self {
        Self {
            accept_any: true,
            ..Default::default()
        }
    }
}

impl ProjectLookup for KnownProjects {
    fn validate_project(&self, namespace: &str) -> Result<(), ProjectError> {
        if self.accept_any || self.projects.contains(namespace) {
            return Ok(());
        }
        if self.namespaces.contains(namespace) {
            return Err(ProjectError::Field(FieldViolation::invalid(
                FieldPath::from_fields(["metadata", "namespace"]),
                namespace,
                format!("namespace {:?} is not a project", namespace),
            )));
        }
        Err(ProjectError::NotFound)
    }
}
