//! Stage manifest loading.
//!
//! Manifests are YAML or JSON; JSON is parsed through the YAML parser.

use crate::config::schema::Stage;
use crate::error::{Result, StageCheckError};
use std::fs;
use std::path::Path;

/// Manifest text together with the parsed Stage.
///
/// The text is kept so violations can be located in the source.
#[derive(Debug, Clone)]
pub struct LoadedStage {
    pub stage: Stage,
    pub source: String,
}

/// Read a file, mapping a missing file to `DocumentNotFound`.
pub(crate) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StageCheckError::DocumentNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StageCheckError::Io(e)
        }
    })
}

/// Load a Stage manifest from disk.
///
/// # Errors
///
/// Returns `DocumentNotFound` if the file doesn't exist.
/// Returns `DocumentParseError` if the content is not a valid Stage.
pub fn load_stage_file(path: &Path) -> Result<LoadedStage> {
    let source = read_document(path)?;
    let stage = parse_stage(&source, path)?;
    tracing::debug!(path = %path.display(), stage = stage.name(), "loaded stage manifest");
    Ok(LoadedStage { stage, source })
}

/// Parse manifest content into a [`Stage`].
///
/// # Arguments
///
/// * `content` - The YAML or JSON content to parse
/// * `source_path` - Path for error reporting
pub fn parse_stage(content: &str, source_path: &Path) -> Result<Stage> {
    if content.trim().is_empty() {
        return Err(StageCheckError::DocumentParseError {
            path: source_path.to_path_buf(),
            message: "document is empty".to_string(),
        });
    }

    let stage: Stage =
        serde_yaml::from_str(content).map_err(|e| StageCheckError::DocumentParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(kind) = &stage.kind {
        if kind != crate::config::schema::STAGE_KIND {
            tracing::warn!(kind = %kind, "manifest kind is not Stage");
        }
    }

    Ok(stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn loads_yaml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stage.yaml");
        fs::write(&path, "metadata:\n  name: test\nspec: {}\n").unwrap();

        let loaded = load_stage_file(&path).unwrap();
        assert_eq!(loaded.stage.name(), "test");
        assert!(loaded.stage.spec.is_some());
        assert!(loaded.source.contains("name: test"));
    }

    #[test]
    fn loads_json_content() {
        let json = r#"{"metadata":{"name":"j"},"spec":{"subscriptions":{"upstreamStages":[{"name":"a"}]}}}"#;
        let stage = parse_stage(json, &PathBuf::from("stage.json")).unwrap();
        assert_eq!(stage.name(), "j");
        let subs = stage.spec.unwrap().subscriptions.unwrap();
        assert_eq!(subs.upstream_stages[0].name, "a");
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = load_stage_file(Path::new("/nonexistent/stage.yaml"));
        assert!(matches!(
            result,
            Err(StageCheckError::DocumentNotFound { .. })
        ));
    }

    #[test]
    fn malformed_content_is_parse_error() {
        let result = parse_stage("spec: [unclosed", Path::new("bad.yaml"));
        match result {
            Err(StageCheckError::DocumentParseError { path, .. }) => {
                assert_eq!(path, PathBuf::from("bad.yaml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn empty_content_is_parse_error() {
        assert!(matches!(
            parse_stage("  \n", Path::new("empty.yaml")),
            Err(StageCheckError::DocumentParseError { .. })
        ));
    }
}
