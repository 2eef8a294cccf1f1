use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::{Config, ConfigValue};

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

const DEFAULT_CONFIG: &str = r#"# eventsync configuration

# Venue whose events are synchronized (required)
venue: Dubai World Trade Centre

# JSON exports read on every run; relative paths are taken from this file's directory
# crm_path: crm-events.json
# cms_path: cms-events.json

# Directory receiving create-<eventId>.json and update-<eventId>.json payloads
# output_dir: outbox

# Per-locale static page blocks (YAML)
# templates_path: static-blocks.yaml

# CMS node under which new events are created
# parent_id: "1100"
"#;

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        cli_config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            let path = cli_config_path.unwrap_or_else(Config::default_config_path);
                            println!("Config file: {} (not found)", path.display());
                        }
                        println!();

                        print_value("venue", &config.venue, |v| v.clone());
                        print_value("crm_path", &config.crm_path, |p| p.display().to_string());
                        print_value("cms_path", &config.cms_path, |p| p.display().to_string());
                        print_value("output_dir", &config.output_dir, |p| {
                            p.display().to_string()
                        });
                        print_value("templates_path", &config.templates_path, |p| {
                            p.as_ref()
                                .map(|p| p.display().to_string())
                                .unwrap_or_else(|| "(none)".to_string())
                        });
                        print_value("parent_id", &config.parent_id, |id| {
                            id.clone().unwrap_or_else(|| "(none)".to_string())
                        });
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = cli_config_path.unwrap_or_else(Config::default_config_path);

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'eventsync config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nEdit this file to customize your settings.");
                Ok(())
            }
        }
    }
}

fn print_value<T>(key: &str, value: &ConfigValue<T>, render: impl Fn(&T) -> String) {
    println!("{}: {}", key, render(&value.value));
    println!("  source: {}", value.source);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSource;
    use tempfile::tempdir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = Config::load(Some(path.clone())).unwrap();

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Init,
        };
        cmd.run(&config, Some(path.clone())).unwrap();
        assert!(path.exists());

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded.venue.value, "Dubai World Trade Centre");
        assert_eq!(loaded.venue.source, ConfigSource::File);
        assert_eq!(loaded.parent_id.source, ConfigSource::Default);
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "venue: Expo City\n").unwrap();
        let config = Config::load(Some(path.clone())).unwrap();

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Init,
        };
        cmd.run(&config, Some(path.clone())).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "venue: Expo City\n");
    }
}
