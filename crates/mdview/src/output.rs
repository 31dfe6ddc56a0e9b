//! Colored terminal output on stderr.
//!
//! Stdout is reserved for rendered HTML.

use console::{Style, Term};

/// Terminal reporter for command progress.
pub(crate) struct Output {
    term: Term,
    label: Style,
    success: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().dim(),
            success: Style::new().green(),
            failure: Style::new().red().bold(),
        }
    }

    /// Print an aligned `label: value` line.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = format!("{label}:");
        let _ = self
            .term
            .write_line(&format!("  {} {value}", self.label.apply_to(format!("{label:<10}"))));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.success.apply_to(msg).to_string());
    }

    /// Print an error message (bold red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.failure.apply_to(msg).to_string());
    }
}
