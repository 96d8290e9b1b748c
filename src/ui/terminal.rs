//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, StageTheme, UserInterface};

/// Terminal UI implementation.
///
/// Results and status go to stdout; warnings and errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: StageTheme,
    mode: OutputMode,
    color: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, color: bool) -> Self {
        let theme = if color {
            StageTheme::new()
        } else {
            StageTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            color,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn use_color(&self) -> bool {
        self.color
    }

    fn output(&mut self, text: &str) {
        write!(self.out, "{}", text).ok();
        self.out.flush().ok();
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}

/// Create the terminal UI. Colors are used only when requested and stdout
/// supports them.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    let color = !no_color && should_use_colors();
    Box::new(TerminalUI::new(mode, color))
}
