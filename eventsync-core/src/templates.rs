//! Static page blocks that are not derived from CRM fields.
//!
//! Their text and layout is editorial content, so the mapper takes them from
//! a [`StaticBlocks`] provider instead of hard-coding them. Templates carry no
//! identifier; the mapper assigns a fresh udi to each instance.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::locale::{Locale, Localized};

/// An opaque block fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticTemplate {
    pub content_type_key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl StaticTemplate {
    pub fn new(content_type_key: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            content_type_key: content_type_key.into(),
            fields,
        }
    }
}

/// Supplies the ordered static blocks appended to each locale's page.
pub trait StaticBlocks {
    fn static_blocks(&self, locale: Locale) -> Vec<StaticTemplate>;
}

impl<T: StaticBlocks + ?Sized> StaticBlocks for &T {
    fn static_blocks(&self, locale: Locale) -> Vec<StaticTemplate> {
        (**self).static_blocks(locale)
    }
}

/// Provider with no static blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStaticBlocks;

impl StaticBlocks for NoStaticBlocks {
    fn static_blocks(&self, _locale: Locale) -> Vec<StaticTemplate> {
        Vec::new()
    }
}

/// Per-locale template lists, typically loaded from YAML:
///
/// ```yaml
/// en-US:
///   - contentTypeKey: 0b3c...
///     fields:
///       heading: Getting Here
/// ar:
///   - contentTypeKey: 0b3c...
///     fields:
///       heading: كيفية الوصول
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet(Localized<Vec<StaticTemplate>>);

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale, templates: Vec<StaticTemplate>) -> Self {
        self.0.insert(locale, templates);
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, TemplateError> {
        serde_yaml::from_str(yaml).map_err(TemplateError::Parse)
    }

    /// Loads a template set from a YAML file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| TemplateError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let set = Self::from_yaml_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            locales = set.0.len(),
            "loaded static block templates"
        );
        Ok(set)
    }

    pub fn len(&self, locale: Locale) -> usize {
        self.0.get(locale).map(Vec::len).unwrap_or(0)
    }
}

impl StaticBlocks for TemplateSet {
    fn static_blocks(&self, locale: Locale) -> Vec<StaticTemplate> {
        self.0.get(locale).cloned().unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to read template file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse templates: {0}")]
    Parse(#[source] serde_yaml::Error),
}
