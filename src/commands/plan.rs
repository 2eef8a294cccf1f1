use clap::Args;

use super::{build_runner, CommandError, OutputFormat};
use crate::config::Config;
use crate::sync::JsonFileSource;

/// Show what a sync would create and update, without writing anything
#[derive(Args)]
pub struct PlanCommand {
    /// Venue to synchronize (overrides config)
    #[arg(long)]
    pub venue: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl PlanCommand {
    pub fn run(&self, config: &Config) -> Result<(), CommandError> {
        let mut runner = build_runner(config, self.venue.as_deref())?;
        let crm = JsonFileSource::new(&config.crm_path.value);
        let cms = JsonFileSource::new(&config.cms_path.value);

        let report = runner.plan(&crm, &cms)?;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                println!("Sync plan (dry run)");
                println!("===================\n");
                print!("{}", report);
            }
        }
        Ok(())
    }
}
