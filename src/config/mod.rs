pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::output::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use settings::Settings;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "scrape-hub")]
#[command(about = "Test harness for the YouTube and Twitter scraper APIs")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base URL of the scraper backend
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the rendered table to this file (or `<source>.<ext>` inside a directory) instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Truncate cells in the text table to this many characters
    #[arg(long)]
    pub max_width: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the YouTube scraper
    Youtube {
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Run the Twitter scraper
    Twitter {
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merge defaults, the TOML file (if given) and command line flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            settings = settings.with_toml(&TomlConfig::from_file(path)?);
        }

        Ok(self.apply_overrides(settings))
    }

    fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(output) = &self.output {
            settings.output_path = Some(output.clone());
        }
        if let Some(max_width) = self.max_width {
            settings.max_cell_width = max_width;
        }
        match &self.command {
            Some(Command::Youtube {
                max_results: Some(max_results),
            }) => settings.youtube_max_results = *max_results,
            Some(Command::Twitter { limit: Some(limit) }) => settings.twitter_limit = *limit,
            _ => {}
        }
        settings
    }
}
