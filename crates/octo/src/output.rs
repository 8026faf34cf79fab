//! Colored terminal output.

use console::{Style, Term};

/// Writes status messages to stderr and documents to stdout.
pub(crate) struct Output {
    status: Term,
    document: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            document: Term::stdout(),
        }
    }

    /// Write an exported document to stdout unchanged.
    pub(crate) fn print(&self, text: &str) -> std::io::Result<()> {
        self.document.write_str(text)?;
        self.document.flush()
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(&Style::new(), msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(&Style::new().red(), msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&Style::new().cyan().bold(), msg);
    }

    fn line(&self, style: &Style, msg: &str) {
        // Status output is best effort.
        let _ = self.status.write_line(&style.apply_to(msg).to_string());
    }
}
