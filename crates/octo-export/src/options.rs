//! Document export options.
//!
//! [`ExportOptions`] is the per-document mapping from field name to raw
//! value that drives one export. It is built once, before the export, and
//! only read afterwards.

use std::collections::HashMap;

use serde_yaml::Value;

use crate::error::ExportError;

/// Option key holding the table of contents setting.
pub const WITH_TOC: &str = "with-toc";

/// Raw value of a single export option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// A single value.
    Scalar(String),
    /// An ordered sequence of values.
    Sequence(Vec<String>),
}

impl OptionValue {
    /// Reduce to a single string: the scalar itself, or the first element
    /// of a sequence. An empty sequence yields an empty string.
    #[must_use]
    pub fn first_or_empty(&self) -> &str {
        match self {
            Self::Scalar(value) => value,
            Self::Sequence(values) => values.first().map_or("", String::as_str),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(values: Vec<String>) -> Self {
        Self::Sequence(values)
    }
}

/// Export options for one document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    values: HashMap<String, OptionValue>,
}

impl ExportOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, returning the updated options.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Raw value of an option, or `None` when unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Number of options set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Table of contents depth requested by the `with-toc` option.
    ///
    /// - unset, `false`, `nil`, `0` or anything unrecognized: no table of contents
    /// - `true` or `t`: `default_levels`
    /// - a positive number `n`: `n`
    #[must_use]
    pub fn toc_depth(&self, default_levels: u8) -> Option<u8> {
        let raw = self.get(WITH_TOC)?.first_or_empty().trim();
        match raw {
            "true" | "t" => Some(default_levels),
            _ => raw.parse::<u8>().ok().filter(|depth| *depth > 0),
        }
    }

    /// Build options from a YAML metadata block.
    ///
    /// Keys are lower-cased. Strings, numbers and booleans become scalars
    /// (`published: false` is the string `"false"`), sequences become
    /// [`OptionValue::Sequence`], and null values leave the option unset.
    /// Nested mappings have no option meaning and are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Metadata`] if the YAML is malformed or is not
    /// a mapping.
    pub fn from_yaml(content: &str) -> Result<Self, ExportError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value =
            serde_yaml::from_str(content).map_err(|e| ExportError::Metadata(e.to_string()))?;
        let mapping = match value {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ExportError::Metadata(
                    "metadata must be a key/value mapping".to_owned(),
                ));
            }
        };

        let mut values = HashMap::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Some(key) = scalar_to_string(&key) else {
                tracing::debug!(?key, "Skipping metadata entry with non-scalar key");
                continue;
            };
            let key = key.to_lowercase();
            match to_option_value(value) {
                Some(value) => {
                    values.insert(key, value);
                }
                None => tracing::debug!(key = %key, "Skipping metadata entry without a value"),
            }
        }

        Ok(Self { values })
    }
}

fn to_option_value(value: Value) -> Option<OptionValue> {
    match value {
        Value::Sequence(items) => Some(OptionValue::Sequence(
            items.iter().filter_map(scalar_to_string).collect(),
        )),
        Value::Tagged(tagged) => to_option_value(tagged.value),
        other => scalar_to_string(&other).map(OptionValue::Scalar),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
