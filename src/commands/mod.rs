use clap::ValueEnum;
use rand::rngs::ThreadRng;

use eventsync_core::{
    DocumentMapper, SyncError, SyncOptions, SyncRunner, TemplateError, TemplateSet,
};

use crate::config::Config;

mod config_cmd;
mod plan;
mod sync_cmd;

pub use config_cmd::ConfigCommand;
pub use plan::PlanCommand;
pub use sync_cmd::SyncCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Builds a runner from configuration, with an optional venue override.
fn build_runner(
    config: &Config,
    venue: Option<&str>,
) -> Result<SyncRunner<ThreadRng, TemplateSet>, CommandError> {
    let venue = venue.unwrap_or(&config.venue.value).trim().to_string();
    if venue.is_empty() {
        return Err(CommandError::MissingVenue);
    }

    let templates = match &config.templates_path.value {
        Some(path) => TemplateSet::load(path)?,
        None => {
            tracing::debug!("no templates_path configured, pages get no static blocks");
            TemplateSet::new()
        }
    };

    let options = SyncOptions {
        venue,
        parent_id: config.parent_id.value.clone(),
    };
    Ok(SyncRunner::new(
        DocumentMapper::with_thread_rng(templates),
        options,
    ))
}

/// Errors from plan and sync commands
#[derive(Debug)]
pub enum CommandError {
    MissingVenue,
    Templates(TemplateError),
    Sync(SyncError),
    Output(serde_json::Error),
    WriteFailures(usize),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::MissingVenue => write!(
                f,
                "No venue configured. Pass --venue, set 'venue' in the config file or EVENTSYNC_VENUE"
            ),
            CommandError::Templates(e) => write!(f, "{}", e),
            CommandError::Sync(e) => write!(f, "{}", e),
            CommandError::Output(e) => write!(f, "Failed to format report: {}", e),
            CommandError::WriteFailures(n) => {
                write!(f, "{} event{} could not be written", n, if *n == 1 { "" } else { "s" })
            }
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Templates(e) => Some(e),
            CommandError::Sync(e) => Some(e),
            CommandError::Output(e) => Some(e),
            CommandError::MissingVenue | CommandError::WriteFailures(_) => None,
        }
    }
}

impl From<TemplateError> for CommandError {
    fn from(e: TemplateError) -> Self {
        CommandError::Templates(e)
    }
}

impl From<SyncError> for CommandError {
    fn from(e: SyncError) -> Self {
        CommandError::Sync(e)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(e: serde_json::Error) -> Self {
        CommandError::Output(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config_in(dir: &std::path::Path) -> Config {
        Config::load(Some(dir.join("absent.yaml"))).unwrap()
    }

    #[test]
    fn test_missing_venue() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());

        let err = build_runner(&config, None).err().unwrap();
        assert!(matches!(err, CommandError::MissingVenue));
        assert!(matches!(
            build_runner(&config, Some("   ")).err().unwrap(),
            CommandError::MissingVenue
        ));
    }

    #[test]
    fn test_missing_templates_file() {
        let dir = tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.templates_path.value = Some(dir.path().join("blocks.yaml"));

        let err = build_runner(&config, Some("Expo City")).err().unwrap();
        assert!(matches!(err, CommandError::Templates(_)));
    }

    #[test]
    fn test_venue_override() {
        let dir = tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(build_runner(&config, Some("Expo City")).is_ok());
    }
}
