//! Sync CLI command: reconcile the CRM feed and write CMS payloads.

use clap::Args;
use std::path::PathBuf;

use super::{build_runner, CommandError, OutputFormat};
use crate::config::Config;
use crate::sync::{DirectorySink, JsonFileSource};

/// Reconcile CRM events against the CMS and write create/update payloads
#[derive(Args)]
pub struct SyncCommand {
    /// Venue to synchronize (overrides config)
    #[arg(long)]
    pub venue: Option<String>,

    /// Directory for payload files (overrides config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SyncCommand {
    pub fn run(&self, config: &Config) -> Result<(), CommandError> {
        let mut runner = build_runner(config, self.venue.as_deref())?;
        let crm = JsonFileSource::new(&config.crm_path.value);
        let cms = JsonFileSource::new(&config.cms_path.value);
        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output_dir.value.clone());
        let mut sink = DirectorySink::new(output_dir);

        let report = runner.run(&crm, &cms, &mut sink)?;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                print!("{}", report);
                if !sink.written().is_empty() {
                    println!();
                    println!(
                        "Wrote {} payload file(s) to {}",
                        sink.written().len(),
                        sink.dir().display()
                    );
                }
            }
        }

        if report.is_success() {
            Ok(())
        } else {
            Err(CommandError::WriteFailures(report.failures.len()))
        }
    }
}
