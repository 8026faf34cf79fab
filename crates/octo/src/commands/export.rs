//! `octo export` command implementation.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use octo_config::{CliSettings, Config};
use octo_export::{ExportBackend, Exporter, FieldDefaults, OctopressBackend};
use octo_renderer::HtmlBackend;

use crate::error::CliError;
use crate::output::Output;

/// Output format of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Octopress/Jekyll post with front matter and codeblock shortcodes.
    Octopress,
    /// Plain HTML body.
    Html,
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to the markdown file.
    file: PathBuf,

    /// Print the exported document instead of writing a file.
    #[arg(long)]
    stdout: bool,

    /// Output file (default: source name with the configured extension).
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Octopress)]
    format: Format,

    /// Default layout (overrides config).
    #[arg(long)]
    layout: Option<String>,

    /// Default space-separated categories (overrides config).
    #[arg(long)]
    categories: Option<String>,

    /// Default space-separated tags (overrides config).
    #[arg(long)]
    tags: Option<String>,

    /// Default published state; anything but "true" exports a preview (overrides config).
    #[arg(long)]
    published: Option<String>,

    /// Directory to write exported files to (overrides config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover octo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, exporting or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            layout: self.layout,
            categories: self.categories,
            tags: self.tags,
            published: self.published,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let markdown = std::fs::read_to_string(&self.file)?;
        let document = match self.format {
            Format::Octopress => export_document::<OctopressBackend>(&config, &markdown)?,
            Format::Html => export_document::<HtmlBackend>(&config, &markdown)?,
        };

        if self.stdout {
            output.print(&document)?;
            return Ok(());
        }

        let target = self
            .output
            .unwrap_or_else(|| config.export_resolved.output_path(&self.file));
        write_document(&self.file, &target, &document)?;
        output.success(&format!(
            "Exported {} -> {}",
            self.file.display(),
            target.display()
        ));

        Ok(())
    }
}

fn export_document<B: ExportBackend>(
    config: &Config,
    markdown: &str,
) -> Result<String, CliError> {
    let exporter = Exporter::<B>::new(FieldDefaults::from(&config.defaults))
        .with_toc_levels(config.export_resolved.toc_levels)
        .with_gfm(config.export_resolved.gfm);
    Ok(exporter.export_source(markdown)?)
}

/// Write an exported document, creating the target directory if needed.
fn write_document(source: &Path, target: &Path, document: &str) -> Result<(), CliError> {
    if is_same_file(source, target) {
        return Err(CliError::Validation(format!(
            "Refusing to overwrite source file {}",
            source.display()
        )));
    }
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(target, document)?;
    tracing::info!(path = %target.display(), bytes = document.len(), "Wrote exported document");
    Ok(())
}

/// Whether `target` names the same file as `source`, however it is spelled.
fn is_same_file(source: &Path, target: &Path) -> bool {
    if target == source {
        return true;
    }
    target.exists() && target.canonicalize().ok() == source.canonicalize().ok()
}
