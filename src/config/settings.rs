use crate::config::toml_config::TomlConfig;
use crate::core::output::{OutputFormat, DEFAULT_MAX_CELL_WIDTH};
use crate::core::sources::{
    TWITTER_DEFAULT_LIMIT, TWITTER_ENDPOINT, YOUTUBE_DEFAULT_MAX_RESULTS, YOUTUBE_ENDPOINT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_backend_url, validate_cell_width, validate_endpoint_limit, validate_output_path,
    Validate,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

// 後端 API 接受的範圍
pub const YOUTUBE_MAX_RESULTS_RANGE: (u32, u32) = (1, 30);
pub const TWITTER_LIMIT_RANGE: (u32, u32) = (1, 100);

pub const MIN_CELL_WIDTH: usize = 4;

/// Effective settings: defaults, overlaid by the TOML file, overlaid by flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub youtube_max_results: u32,
    pub twitter_limit: u32,
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub max_cell_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            youtube_max_results: YOUTUBE_DEFAULT_MAX_RESULTS,
            twitter_limit: TWITTER_DEFAULT_LIMIT,
            format: OutputFormat::Table,
            output_path: None,
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }
}

impl Settings {
    pub fn with_toml(mut self, config: &TomlConfig) -> Self {
        if let Some(base_url) = &config.backend.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(max_results) = config.youtube.max_results {
            self.youtube_max_results = max_results;
        }
        if let Some(limit) = config.twitter.limit {
            self.twitter_limit = limit;
        }
        if let Some(format) = config.output.format {
            self.format = format;
        }
        if let Some(path) = &config.output.path {
            self.output_path = Some(path.clone());
        }
        if let Some(max_width) = config.output.max_width {
            self.max_cell_width = max_width;
        }
        self
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn youtube_max_results(&self) -> u32 {
        self.youtube_max_results
    }

    fn twitter_limit(&self) -> u32 {
        self.twitter_limit
    }

    fn format(&self) -> OutputFormat {
        self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn max_cell_width(&self) -> usize {
        self.max_cell_width
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_backend_url("backend.base_url", &self.base_url)?;

        validate_endpoint_limit(
            "youtube.max_results",
            self.youtube_max_results,
            YOUTUBE_MAX_RESULTS_RANGE,
            YOUTUBE_ENDPOINT,
        )?;
        validate_endpoint_limit(
            "twitter.limit",
            self.twitter_limit,
            TWITTER_LIMIT_RANGE,
            TWITTER_ENDPOINT,
        )?;

        if let Some(path) = &self.output_path {
            validate_output_path("output.path", path)?;
        }

        validate_cell_width("output.max_width", self.max_cell_width, MIN_CELL_WIDTH)?;

        Ok(())
    }
}
