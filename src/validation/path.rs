//! Field path addressing.
//!
//! A [`FieldPath`] is an immutable, append-only locator into the Stage
//! document. Deriving a child path never touches the parent: segments are
//! shared through reference-counted links, so composite validators can hand
//! derived paths to leaf checks freely.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A named field, e.g. `subscriptions`.
    Field(String),
    /// A position within a sequence, e.g. `[0]`.
    Index(usize),
}

#[derive(Debug)]
struct Node {
    parent: Option<Arc<Node>>,
    segment: Segment,
}

/// Persistent path from the document root to a field.
#[derive(Clone, Default)]
pub struct FieldPath {
    tail: Option<Arc<Node>>,
}

impl FieldPath {
    /// Create a path rooted at a single field.
    pub fn new(root: impl Into<String>) -> Self {
        Self::default().child(root)
    }

    /// Create a path from a sequence of field names.
    pub fn from_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .fold(Self::default(), |path, field| path.child(field))
    }

    /// Derive the path of a named child field.
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.push(Segment::Field(name.into()))
    }

    /// Derive the path of an element of a sequence.
    pub fn index(&self, index: usize) -> Self {
        self.push(Segment::Index(index))
    }

    fn push(&self, segment: Segment) -> Self {
        Self {
            tail: Some(Arc::new(Node {
                parent: self.tail.clone(),
                segment,
            })),
        }
    }

    /// Whether this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    /// Segments from the root to the leaf.
    pub fn segments(&self) -> Vec<&Segment> {
        let mut segments = Vec::new();
        let mut current = self.tail.as_deref();
        while let Some(node) = current {
            segments.push(&node.segment);
            current = node.parent.as_deref();
        }
        segments.reverse();
        segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().into_iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => write!(f, "{}", name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({})", self)
    }
}

impl PartialEq for FieldPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments() == other.segments()
    }
}

impl Eq for FieldPath {}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
