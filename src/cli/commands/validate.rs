//! The `stagecheck validate` command.
//!
//! Loads a Stage manifest, runs the admission review for the requested
//! operation and renders the outcome. Project knowledge comes from the
//! settings file extended by `--project` / `--namespace`; with none
//! configured every namespace is accepted as a project.

use std::path::{Path, PathBuf};

use crate::admission::{AdmissionError, KnownProjects, Operation, StageAdmission};
use crate::cli::args::ValidateArgs;
use crate::config::{load_stage_file, resolve_settings, LoadedStage, Settings};
use crate::error::{Result, StageCheckError};
use crate::report::{
    HumanFormatter, JsonFormatter, OutputFormat, Report, ReportFormatter, SourceLocator,
};
use crate::ui::UserInterface;

use super::dispatcher::{exit_codes, Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    working_dir: PathBuf,
    settings_path: Option<PathBuf>,
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(working_dir: &Path, settings_path: Option<PathBuf>, args: ValidateArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            settings_path,
            args,
        }
    }

    fn settings(&self) -> Result<Settings> {
        let mut settings = resolve_settings(self.settings_path.as_deref(), &self.working_dir)?;
        settings.extend(&self.args.projects, &self.args.namespaces);
        Ok(settings)
    }

    fn output_format(&self, settings: &Settings) -> Result<OutputFormat> {
        match self.args.format.as_deref().or(settings.format.as_deref()) {
            Some(format) => format
                .parse()
                .map_err(|e: String| StageCheckError::Other(anyhow::anyhow!(e))),
            None => Ok(OutputFormat::default()),
        }
    }

    fn operation(&self) -> Result<Operation> {
        self.args
            .operation
            .parse()
            .map_err(|e: String| StageCheckError::Other(anyhow::anyhow!(e)))
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }

    fn render(
        &self,
        report: &Report,
        format: OutputFormat,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let mut buf = Vec::new();
        match format {
            OutputFormat::Human => HumanFormatter::new(ui.use_color()).format(report, &mut buf)?,
            OutputFormat::Json => JsonFormatter::new().format(report, &mut buf)?,
        }
        ui.output(&String::from_utf8_lossy(&buf));
        Ok(())
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.settings()?;
        let format = self.output_format(&settings)?;
        let operation = self.operation()?;

        let lookup = if settings.has_projects() {
            KnownProjects::new(
                settings.projects.iter().cloned(),
                settings.namespaces.iter().cloned(),
            )
        } else {
            tracing::debug!("no projects configured; accepting every namespace");
            KnownProjects::any()
        };

        let file = self.resolve_path(&self.args.file);
        let LoadedStage { stage, source } = load_stage_file(&file)?;
        let old = match &self.args.old {
            Some(path) => Some(load_stage_file(&self.resolve_path(path))?.stage),
            None => None,
        };
        if old.is_some() && operation != Operation::Update {
            ui.warning(&format!("--old is only used for update; ignored for {}", operation));
        }

        ui.message(&format!(
            "Reviewing {} of Stage {:?} in {}",
            operation,
            stage.name(),
            self.args.file.display()
        ));

        let admission = StageAdmission::new(lookup);
        match admission.review(operation, &stage, old.as_ref()) {
            Ok(()) => {
                match format {
                    OutputFormat::Json => {
                        self.render(&Report::new(stage.name(), Vec::new(), None), format, ui)?
                    }
                    OutputFormat::Human => {
                        ui.success(&format!("Stage {:?} is valid", stage.name()))
                    }
                }
                Ok(CommandResult::success())
            }
            Err(AdmissionError::Invalid { name, violations }) => {
                let locator = SourceLocator::new(&self.args.file, &source);
                let report = Report::new(name, violations, Some(&locator));
                self.render(&report, format, ui)?;
                Ok(CommandResult::failure(exit_codes::INVALID))
            }
            Err(err @ AdmissionError::NotFound { .. }) => {
                ui.error(&err.to_string());
                Ok(CommandResult::failure(exit_codes::NOT_FOUND))
            }
            Err(err @ AdmissionError::Internal(_)) => {
                ui.error(&err.to_string());
                Ok(CommandResult::failure(exit_codes::INTERNAL))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = "\
apiVersion: kargo.akuity.io/v1alpha1
kind: Stage
metadata:
  name: test
  namespace: kargo-demo
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: ^1.24.0
";

    const INVALID: &str = "\
kind: Stage
metadata:
  name: test
  namespace: kargo-demo
spec:
  subscriptions:
    repos:
      images:
        - repoURL: nginx
          semverConstraint: bogus
";

    fn setup(manifest: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stage.yaml"), manifest).unwrap();
        temp
    }

    fn run(temp: &TempDir, args: ValidateArgs) -> (Result<CommandResult>, MockUI) {
        let mut ui = MockUI::new();
        let cmd = ValidateCommand::new(temp.path(), None, args);
        let result = cmd.execute(&mut ui);
        (result, ui)
    }

    #[test]
    fn valid_stage_succeeds() {
        let temp = setup(VALID);
        let (result, ui) = run(&temp, ValidateArgs::for_file("stage.yaml"));
        let result = result.unwrap();
        assert!(result.success);
        assert!(ui.has_success("\"test\" is valid"));
    }

    #[test]
    fn invalid_stage_reports_violations() {
        let temp = setup(INVALID);
        let (result, ui) = run(&temp, ValidateArgs::for_file("stage.yaml"));
        let result = result.unwrap();
        assert_eq!(result.exit_code, exit_codes::INVALID);
        let output = ui.output_text();
        assert!(output.contains("error[spec.subscriptions.repos.images[0].semverConstraint]"));
        assert!(output.contains("--> stage.yaml:"));
    }

    #[test]
    fn json_format_for_valid_stage() {
        let temp = setup(VALID);
        let mut args = ValidateArgs::for_file("stage.yaml");
        args.format = Some("json".to_string());
        let (result, ui) = run(&temp, args);
        assert!(result.unwrap().success);
        let value: serde_json::Value = serde_json::from_str(&ui.output_text()).unwrap();
        assert_eq!(value["valid"], true);
    }

    #[test]
    fn unknown_project_exits_not_found() {
        let temp = setup(VALID);
        let mut args = ValidateArgs::for_file("stage.yaml");
        args.projects = vec!["other".to_string()];
        let (result, ui) = run(&temp, args);
        assert_eq!(result.unwrap().exit_code, exit_codes::NOT_FOUND);
        assert!(ui.has_error(r#"Namespace "kargo-demo" not found"#));
    }

    #[test]
    fn settings_file_supplies_projects() {
        let temp = setup(VALID);
        fs::write(temp.path().join(".stagecheck.yml"), "projects: [kargo-demo]\n").unwrap();
        let (result, _ui) = run(&temp, ValidateArgs::for_file("stage.yaml"));
        assert!(result.unwrap().success);
    }

    #[test]
    fn delete_skips_structure() {
        let temp = setup(INVALID);
        let mut args = ValidateArgs::for_file("stage.yaml");
        args.operation = "delete".to_string();
        let (result, _ui) = run(&temp, args);
        assert!(result.unwrap().success);
    }

    #[test]
    fn old_ignored_outside_update() {
        let temp = setup(VALID);
        let mut args = ValidateArgs::for_file("stage.yaml");
        args.old = Some(PathBuf::from("stage.yaml"));
        let (result, ui) = run(&temp, args);
        assert!(result.unwrap().success);
        assert!(ui.has_warning("--old is only used for update"));
    }

    #[test]
    fn missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let (result, _ui) = run(&temp, ValidateArgs::for_file("missing.yaml"));
        assert!(matches!(result, Err(StageCheckError::DocumentNotFound { .. })));
    }
}
