pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::adapters::{http::BackendClient, storage::LocalStorage};
pub use crate::config::{settings::Settings, toml_config::TomlConfig};
pub use crate::core::{
    engine::{HubEngine, OutputOptions, RunSummary},
    page::ScraperPage,
    sources::{TwitterSource, YoutubeSource},
};
pub use crate::utils::error::{HubError, Result};
