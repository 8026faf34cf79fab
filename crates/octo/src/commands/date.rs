//! `octo date` command implementation.

use std::path::PathBuf;

use clap::Args;
use octo_export::date_prefix;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the date command.
#[derive(Args)]
pub(crate) struct DateArgs {
    /// Path of the post; only its file name is inspected.
    file: PathBuf,
}

impl DateArgs {
    /// Execute the date command.
    ///
    /// A name without a date prefix is reported, not treated as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        match date_prefix(&self.file) {
            Some(prefix) => output.print(&format!("{prefix}\n"))?,
            None => output.warning(&format!(
                "{} has no date prefix",
                self.file.display()
            )),
        }

        Ok(())
    }
}
