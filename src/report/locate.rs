//! Mapping field paths to manifest positions.
//!
//! The manifest text is re-parsed with `marked-yaml`, which keeps source
//! markers on every node. A path is followed as far as the document goes;
//! the deepest node reached supplies the position. Fields that were never
//! written (an absent sequence, say) therefore point at their parent.

use marked_yaml::{parse_yaml, Node};
use std::path::PathBuf;

use crate::validation::{FieldPath, Segment};

use super::span::Span;

/// Locates [`FieldPath`]s in one manifest.
pub struct SourceLocator {
    file: PathBuf,
    root: Option<Node>,
}

impl SourceLocator {
    /// Parse `source` for location lookups.
    ///
    /// A manifest that cannot be parsed yields a locator that finds nothing.
    pub fn new(file: impl Into<PathBuf>, source: &str) -> Self {
        let file = file.into();
        let root = match parse_yaml(0, source) {
            Ok(node) => Some(node),
            Err(err) => {
                tracing::debug!(
                    file = %file.display(),
                    error = %err,
                    "source locations unavailable"
                );
                None
            }
        };
        Self { file, root }
    }

    /// Position of the deepest node on `path`.
    pub fn locate(&self, path: &FieldPath) -> Option<Span> {
        let mut node = self.root.as_ref()?;
        for segment in path.segments() {
            let next = match (segment, node) {
                (Segment::Field(name), Node::Mapping(map)) => map.get_node(name),
                (Segment::Index(index), Node::Sequence(seq)) => seq.get_node(*index),
                _ => None,
            };
            match next {
                Some(child) => node = child,
                None => break,
            }
        }

        let marker = node.span().start()?;
        Some(Span::new(self.file.clone(), marker.line(), marker.column()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = "metadata:
  name: test
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: ^1.x
        - repoURL: redis
          platform: bogus
";

    fn images() -> FieldPath {
        FieldPath::new("spec")
            .child("subscriptions")
            .child("repos")
            .child("images")
    }

    #[test]
    fn deeper_fields_are_on_later_lines() {
        let locator = SourceLocator::new("stage.yaml", MANIFEST);
        let first = locator
            .locate(&images().index(0).child("semverConstraint"))
            .unwrap();
        let second = locator.locate(&images().index(1).child("platform")).unwrap();

        assert_eq!(first.file, PathBuf::from("stage.yaml"));
        assert!(second.line > first.line);
    }

    #[test]
    fn missing_field_falls_back_to_parent() {
        let locator = SourceLocator::new("stage.yaml", MANIFEST);
        let parent = locator.locate(&images().index(1)).unwrap();
        let missing = locator
            .locate(&images().index(1).child("semverConstraint"))
            .unwrap();
        assert_eq!(parent, missing);
    }

    #[test]
    fn unparseable_source_locates_nothing() {
        let locator = SourceLocator::new("stage.yaml", "spec: [unclosed");
        assert!(locator.locate(&FieldPath::new("spec")).is_none());
    }
}
