//! The `stagecheck schema` command.

use crate::config::Stage;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the JSON Schema of the Stage document.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }

    /// Render the schema as pretty-printed JSON.
    pub fn render() -> Result<String> {
        let schema = schemars::schema_for!(Stage);
        let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        Ok(json)
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let json = Self::render()?;
        ui.output(&format!("{}\n", json));
        Ok(CommandResult::success())
    }
}
