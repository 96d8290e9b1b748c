//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and carries the global flags
//! (settings path, working directory) they share.

pub mod completions;
pub mod dispatcher;
pub mod schema;
pub mod validate;

pub use dispatcher::{exit_codes, Command, CommandDispatcher, CommandResult};
