use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Venue whose events are synchronized
    pub venue: ConfigValue<String>,
    /// JSON export of the CRM event feed
    pub crm_path: ConfigValue<PathBuf>,
    /// JSON export of the current CMS event collection
    pub cms_path: ConfigValue<PathBuf>,
    /// Directory receiving create/update payloads
    pub output_dir: ConfigValue<PathBuf>,
    /// YAML file with per-locale static page blocks
    pub templates_path: ConfigValue<Option<PathBuf>>,
    /// CMS node under which new events are created
    pub parent_id: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    venue: Option<String>,
    crm_path: Option<PathBuf>,
    cms_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    templates_path: Option<PathBuf>,
    parent_id: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = Self::default_data_dir();

        // Start with defaults
        let mut venue = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut crm_path = ConfigValue::new(data_dir.join("crm-events.json"), ConfigSource::Default);
        let mut cms_path = ConfigValue::new(data_dir.join("cms-events.json"), ConfigSource::Default);
        let mut output_dir = ConfigValue::new(data_dir.join("outbox"), ConfigSource::Default);
        let mut templates_path = ConfigValue::new(None, ConfigSource::Default);
        let mut parent_id = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            if let Some(v) = file_config.venue {
                venue = ConfigValue::new(v, ConfigSource::File);
            }
            if let Some(p) = file_config.crm_path {
                crm_path = ConfigValue::new(resolve(&path, p), ConfigSource::File);
            }
            if let Some(p) = file_config.cms_path {
                cms_path = ConfigValue::new(resolve(&path, p), ConfigSource::File);
            }
            if let Some(p) = file_config.output_dir {
                output_dir = ConfigValue::new(resolve(&path, p), ConfigSource::File);
            }
            if let Some(p) = file_config.templates_path {
                templates_path = ConfigValue::new(Some(resolve(&path, p)), ConfigSource::File);
            }
            if let Some(id) = file_config.parent_id {
                parent_id = ConfigValue::new(Some(id), ConfigSource::File);
            }

            config_file = Some(path);
        }

        // Apply environment variable overrides
        if let Ok(v) = std::env::var("EVENTSYNC_VENUE") {
            venue = ConfigValue::new(v, ConfigSource::Environment);
        }
        if let Ok(p) = std::env::var("EVENTSYNC_CRM_PATH") {
            crm_path = ConfigValue::new(PathBuf::from(p), ConfigSource::Environment);
        }
        if let Ok(p) = std::env::var("EVENTSYNC_CMS_PATH") {
            cms_path = ConfigValue::new(PathBuf::from(p), ConfigSource::Environment);
        }
        if let Ok(p) = std::env::var("EVENTSYNC_OUTPUT_DIR") {
            output_dir = ConfigValue::new(PathBuf::from(p), ConfigSource::Environment);
        }
        if let Ok(p) = std::env::var("EVENTSYNC_TEMPLATES_PATH") {
            templates_path = ConfigValue::new(Some(PathBuf::from(p)), ConfigSource::Environment);
        }
        if let Ok(id) = std::env::var("EVENTSYNC_PARENT_ID") {
            parent_id = ConfigValue::new(Some(id), ConfigSource::Environment);
        }

        Ok(Self {
            venue,
            crm_path,
            cms_path,
            output_dir,
            templates_path,
            parent_id,
            config_file,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/eventsync/
    /// - macOS: ~/Library/Application Support/eventsync/
    /// - Windows: %APPDATA%/eventsync/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventsync")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/eventsync/
    /// - macOS: ~/Library/Application Support/eventsync/
    /// - Windows: %APPDATA%/eventsync/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("eventsync")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// Relative paths in the config file are taken from the file's directory.
fn resolve(config_file: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        config_file
            .parent()
            .map(|p| p.join(&path))
            .unwrap_or(path)
    } else {
        path
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
