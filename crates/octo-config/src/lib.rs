//! Configuration management for octo.
//!
//! Parses `octo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `defaults.layout`
//! - `defaults.categories`
//! - `defaults.tags`
//! - `defaults.published`
//! - `export.output_dir`

mod expand;

use octo_export::{DEFAULT_TOC_LEVELS, FieldDefaults};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override default layout.
    pub layout: Option<String>,
    /// Override default categories.
    pub categories: Option<String>,
    /// Override default tags.
    pub tags: Option<String>,
    /// Override default published state.
    pub published: Option<String>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "octo.toml";

const DEFAULT_EXTENSION: &str = "html";
const MAX_TOC_LEVELS: u8 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fallback values for front matter fields.
    pub defaults: DefaultsConfig,
    /// Export configuration as written in TOML.
    export: ExportConfigRaw,

    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Fallback values for front matter fields a document leaves unset.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub layout: String,
    /// Space-separated category names.
    pub categories: String,
    /// Space-separated tag names.
    pub tags: String,
    /// Only `"true"` publishes; anything else exports a preview.
    pub published: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let FieldDefaults {
            layout,
            categories,
            tags,
            published,
        } = FieldDefaults::default();
        Self {
            layout,
            categories,
            tags,
            published,
        }
    }
}

impl From<&DefaultsConfig> for FieldDefaults {
    fn from(config: &DefaultsConfig) -> Self {
        Self {
            layout: config.layout.clone(),
            categories: config.categories.clone(),
            tags: config.tags.clone(),
            published: config.published.clone(),
        }
    }
}

/// Raw export configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    output_dir: Option<String>,
    extension: Option<String>,
    toc_levels: Option<u8>,
    gfm: Option<bool>,
}

/// Resolved export configuration.
#[derive(Debug, PartialEq, Eq)]
pub struct ExportConfig {
    /// Directory exported files are written to. `None` writes next to the
    /// source file.
    pub output_dir: Option<PathBuf>,
    /// Extension of exported files, without the dot.
    pub extension: String,
    /// Table of contents depth used when a document asks for one without
    /// giving a depth.
    pub toc_levels: u8,
    /// Render GFM tables, strikethrough and task lists.
    pub gfm: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            extension: DEFAULT_EXTENSION.to_owned(),
            toc_levels: DEFAULT_TOC_LEVELS,
            gfm: true,
        }
    }
}

impl ExportConfig {
    /// Output path for an exported source file.
    ///
    /// The file keeps its stem and takes the configured extension; it goes
    /// to `output_dir` when set, otherwise next to the source.
    #[must_use]
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or(source.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(&self.extension);

        match &self.output_dir {
            Some(dir) => dir.join(name),
            None => source.with_file_name(name),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`defaults.layout`").
        field: String,
        /// Error message (e.g., "${`BLOG_LAYOUT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `octo.toml` in current directory and parents.
    /// Without a config file the defaults are used.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(layout) = &settings.layout {
            self.defaults.layout.clone_from(layout);
        }
        if let Some(categories) = &settings.categories {
            self.defaults.categories.clone_from(categories);
        }
        if let Some(tags) = &settings.tags {
            self.defaults.tags.clone_from(tags);
        }
        if let Some(published) = &settings.published {
            self.defaults.published.clone_from(published);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.export_resolved.output_dir = Some(output_dir.clone());
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let export = &self.export_resolved;

        require_non_empty(&export.extension, "export.extension")?;
        if export.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "export.extension must not start with a dot".to_owned(),
            ));
        }

        if !(1..=MAX_TOC_LEVELS).contains(&export.toc_levels) {
            return Err(ConfigError::Validation(format!(
                "export.toc_levels must be between 1 and {MAX_TOC_LEVELS}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let defaults = &mut self.defaults;
        defaults.layout = expand::expand_env(&defaults.layout, "defaults.layout")?;
        defaults.categories = expand::expand_env(&defaults.categories, "defaults.categories")?;
        defaults.tags = expand::expand_env(&defaults.tags, "defaults.tags")?;
        defaults.published = expand::expand_env(&defaults.published, "defaults.published")?;

        if let Some(ref dir) = self.export.output_dir {
            self.export.output_dir = Some(expand::expand_env(dir, "export.output_dir")?);
        }

        Ok(())
    }

    /// Resolve the raw export section, with relative paths anchored at the
    /// config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.export_resolved = ExportConfig {
            output_dir: self.export.output_dir.as_deref().map(|d| config_dir.join(d)),
            extension: self
                .export
                .extension
                .clone()
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
            toc_levels: self.export.toc_levels.unwrap_or(DEFAULT_TOC_LEVELS),
            gfm: self.export.gfm.unwrap_or(true),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.layout, "post");
        assert_eq!(config.defaults.categories, "");
        assert_eq!(config.defaults.tags, "");
        assert_eq!(config.defaults.published, "true");
        assert_eq!(config.export_resolved, ExportConfig::default());
        assert_eq!(config.export_resolved.extension, "html");
        assert_eq!(config.export_resolved.toc_levels, DEFAULT_TOC_LEVELS);
        assert!(config.export_resolved.gfm);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_defaults_config_matches_field_defaults() {
        let config = DefaultsConfig::default();
        assert_eq!(FieldDefaults::from(&config), FieldDefaults::default());
    }

    #[test]
    fn test_field_defaults_from_config() {
        let config = DefaultsConfig {
            layout: "page".to_owned(),
            tags: "a b".to_owned(),
            ..DefaultsConfig::default()
        };

        assert_eq!(
            FieldDefaults::from(&config),
            FieldDefaults {
                layout: "page".to_owned(),
                categories: String::new(),
                tags: "a b".to_owned(),
                published: "true".to_owned(),
            }
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.defaults.layout, "post");
        assert_eq!(config.defaults.published, "true");
    }

    #[test]
    fn test_parse_defaults() {
        let toml = r#"
[defaults]
layout = "page"
categories = "blog notes"
published = "false"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.defaults.layout, "page");
        assert_eq!(config.defaults.categories, "blog notes");
        assert_eq!(config.defaults.tags, "");
        assert_eq!(config.defaults.published, "false");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[export]
output_dir = "_posts"
extension = "markdown"
toc_levels = 2
gfm = false
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/blog"));

        assert_eq!(
            config.export_resolved,
            ExportConfig {
                output_dir: Some(PathBuf::from("/blog/_posts")),
                extension: "markdown".to_owned(),
                toc_levels: 2,
                gfm: false,
            }
        );
    }

    #[test]
    fn test_resolve_absolute_output_dir() {
        let toml = r#"
[export]
output_dir = "/srv/site/_posts"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/blog"));
        assert_eq!(
            config.export_resolved.output_dir,
            Some(PathBuf::from("/srv/site/_posts"))
        );
    }

    #[test]
    fn test_output_path() {
        let export = ExportConfig::default();
        assert_eq!(
            export.output_path(Path::new("/notes/2023-05-01-hello.md")),
            PathBuf::from("/notes/2023-05-01-hello.html")
        );

        let export = ExportConfig {
            output_dir: Some(PathBuf::from("/site/_posts")),
            extension: "markdown".to_owned(),
            ..ExportConfig::default()
        };
        assert_eq!(
            export.output_path(Path::new("/notes/hello.md")),
            PathBuf::from("/site/_posts/hello.markdown")
        );
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            layout: Some("page".to_owned()),
            tags: Some("a b".to_owned()),
            output_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.defaults.layout, "page");
        assert_eq!(config.defaults.tags, "a b");
        assert_eq!(config.defaults.categories, ""); // Unchanged
        assert_eq!(config.defaults.published, "true"); // Unchanged
        assert_eq!(
            config.export_resolved.output_dir,
            Some(PathBuf::from("/out"))
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.defaults.layout, "post");
        assert!(config.export_resolved.output_dir.is_none());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: the variable names are unique to this test
        unsafe {
            std::env::set_var("OCTO_CONFIG_TEST_TAGS", "rust web");
            std::env::set_var("OCTO_CONFIG_TEST_SITE", "/srv/blog");
        }

        let toml = r#"
[defaults]
tags = "${OCTO_CONFIG_TEST_TAGS}"
layout = "${OCTO_CONFIG_TEST_NO_LAYOUT:-post}"

[export]
output_dir = "${OCTO_CONFIG_TEST_SITE}/_posts"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.defaults.tags, "rust web");
        assert_eq!(config.defaults.layout, "post");
        assert_eq!(
            config.export.output_dir.as_deref(),
            Some("/srv/blog/_posts")
        );

        unsafe {
            std::env::remove_var("OCTO_CONFIG_TEST_TAGS");
            std::env::remove_var("OCTO_CONFIG_TEST_SITE");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::remove_var("OCTO_CONFIG_TEST_MISSING");
        }

        let toml = r#"
[defaults]
published = "${OCTO_CONFIG_TEST_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("OCTO_CONFIG_TEST_MISSING"));
        assert!(err.to_string().contains("defaults.published"));
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_extension_empty() {
        let mut config = Config::default();
        config.export_resolved.extension = String::new();
        assert_validation_error(&config, &["export.extension", "empty"]);
    }

    #[test]
    fn test_validate_extension_leading_dot() {
        let mut config = Config::default();
        config.export_resolved.extension = ".html".to_owned();
        assert_validation_error(&config, &["export.extension", "dot"]);
    }

    #[test]
    fn test_validate_toc_levels() {
        let mut config = Config::default();
        config.export_resolved.toc_levels = 0;
        assert_validation_error(&config, &["export.toc_levels"]);

        config.export_resolved.toc_levels = 7;
        assert_validation_error(&config, &["export.toc_levels"]);

        config.export_resolved.toc_levels = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[defaults]\nlayout = \"page\"\n\n[export]\noutput_dir = \"out\"\n",
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.defaults.layout, "page");
        assert_eq!(
            config.export_resolved.output_dir,
            Some(dir.path().join("out"))
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_with_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[defaults]\nlayout = \"page\"\n");
        let settings = CliSettings {
            layout: Some("post".to_owned()),
            published: Some("false".to_owned()),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.defaults.layout, "post");
        assert_eq!(config.defaults.published, "false");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[defaults\nlayout = ");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_runs_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[export]\ntoc_levels = 9\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("posts").join("drafts");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config(&nested), Some(path));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "");
        let nested = dir.path().join("blog");
        std::fs::create_dir_all(&nested).unwrap();
        let nearest = write_config(&nested, "");

        assert_eq!(Config::discover_config(&nested), Some(nearest));
    }
}
