use crate::config::settings::Settings;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "pet-friends-check")]
#[command(about = "Functional checks against the PetFriends REST API")]
pub struct CliConfig {
    #[arg(long, short, help = "TOML settings file; environment variables are used when omitted")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override service.base_url")]
    pub base_url: Option<String>,

    #[arg(long = "only", value_name = "SCENARIO", help = "Run only the named scenario (repeatable)")]
    pub only: Vec<String>,

    #[arg(long, help = "Print the scenario names and exit")]
    pub list: bool,

    #[arg(long, value_name = "PATH", help = "Write a JSON report of the run")]
    pub report: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn load_settings(&self) -> Result<Settings> {
        let settings = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Settings::from_file(path)?
            }
            None => {
                tracing::debug!("No settings file given, reading environment");
                Settings::from_env()?
            }
        };

        Ok(settings.with_base_url(self.base_url.clone()))
    }
}
