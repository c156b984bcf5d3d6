use crate::core::output::OutputFormat;
use crate::domain::model::{Column, Record};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn youtube_max_results(&self) -> u32;
    fn twitter_limit(&self) -> u32;
    fn format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
    fn max_cell_width(&self) -> usize;
}

/// Scraper backend reached over plain HTTP.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// GET `path_and_query` relative to the backend base URL and decode the JSON body.
    async fn get_json(&self, path_and_query: &str) -> Result<Value>;
}

/// One scraper endpoint: where to fetch, how to flatten, how to display.
pub trait ScrapeSource: Send + Sync {
    fn name(&self) -> &str;
    fn path_and_query(&self) -> String;
    fn normalize(&self, payload: Value) -> Result<Vec<Record>>;
    fn columns(&self) -> Vec<Column>;
}
