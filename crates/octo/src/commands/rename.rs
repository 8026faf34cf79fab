//! `octo rename` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use octo_export::{dated_path, metadata_date, source_options};
use octo_renderer::MarkdownInline;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the rename command.
#[derive(Args)]
pub(crate) struct RenameArgs {
    /// Path to the markdown file.
    file: PathBuf,

    /// Show the new name without renaming.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenameArgs {
    /// Execute the rename command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has no usable date, or
    /// cannot be renamed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let Some(target) = plan_rename(&self.file)? else {
            output.info(&format!(
                "{} is already named after its date",
                self.file.display()
            ));
            return Ok(());
        };

        if self.dry_run {
            output.highlight("[DRY RUN] No changes made.");
            output.info(&format!(
                "Would rename {} -> {}",
                self.file.display(),
                target.display()
            ));
            return Ok(());
        }

        if target.exists() {
            return Err(CliError::Validation(format!(
                "{} already exists",
                target.display()
            )));
        }
        std::fs::rename(&self.file, &target)?;
        tracing::info!(from = %self.file.display(), to = %target.display(), "Renamed post");
        output.success(&format!(
            "Renamed {} -> {}",
            self.file.display(),
            target.display()
        ));

        Ok(())
    }
}

/// New path for a post named after its metadata date, or `None` when the
/// current name already carries that date.
fn plan_rename(path: &Path) -> Result<Option<PathBuf>, CliError> {
    let markdown = std::fs::read_to_string(path)?;
    let options = source_options(&markdown)?;
    let date = metadata_date(&options, &MarkdownInline)?;

    let target = dated_path(path, date);
    Ok((target != path).then_some(target))
}
