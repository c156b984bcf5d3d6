use crate::core::output::{format_grid, OutputFormat, DEFAULT_MAX_CELL_WIDTH};
use crate::core::page::ScraperPage;
use crate::domain::ports::{BackendApi, ConfigProvider, ScrapeSource, Storage};
use crate::utils::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub max_cell_width: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            output_path: None,
            max_cell_width: DEFAULT_MAX_CELL_WIDTH,
        }
    }
}

impl OutputOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            format: config.format(),
            output_path: config.output_path().map(str::to_string),
            max_cell_width: config.max_cell_width(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub source: String,
    pub rows: usize,
    /// Page-level failure message; no rows are shown when set.
    pub error: Option<String>,
    pub rendered: String,
    pub written_to: Option<String>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

pub struct HubEngine<A: BackendApi, St: Storage> {
    api: A,
    storage: St,
    options: OutputOptions,
}

impl<A: BackendApi, St: Storage> HubEngine<A, St> {
    pub fn new(api: A, storage: St, options: OutputOptions) -> Self {
        Self {
            api,
            storage,
            options,
        }
    }

    /// 執行一次抓取：觸發請求、正規化、渲染並輸出
    pub async fn run<S: ScrapeSource>(&self, source: S) -> Result<RunSummary> {
        let mut page = ScraperPage::new(source);
        let name = page.source().name().to_string();

        tracing::info!("🚀 {}", page.trigger_label());
        page.run(&self.api).await;

        if let Some(message) = page.error() {
            tracing::error!("❌ {} scraper failed: {}", name, message);
            return Ok(RunSummary {
                source: name,
                rows: 0,
                error: Some(message.to_string()),
                rendered: String::new(),
                written_to: None,
            });
        }

        let grid = page.grid();
        tracing::info!("✅ {} scraper returned {} rows", name, grid.row_count());

        let title = format!("{} Scraper", name);
        let rendered = format_grid(
            &grid,
            self.options.format,
            &title,
            self.options.max_cell_width,
        )?;

        let written_to = match &self.options.output_path {
            Some(path) => {
                let path = &resolve_output_path(path, &name, self.options.format);
                tracing::debug!("Writing {} bytes to {}", rendered.len(), path);
                self.storage.write_file(path, rendered.as_bytes()).await?;
                tracing::info!("📁 Output saved to: {}", path);
                Some(path.to_string())
            }
            None => None,
        };

        Ok(RunSummary {
            source: name,
            rows: grid.row_count(),
            error: None,
            rendered,
            written_to,
        })
    }
}

/// 輸出路徑是目錄時，檔名用來源名稱加上格式的副檔名
fn resolve_output_path(path: &str, source: &str, format: OutputFormat) -> String {
    let names_directory = path.ends_with('/')
        || path.ends_with(std::path::MAIN_SEPARATOR)
        || Path::new(path).is_dir();
    if !names_directory {
        return path.to_string();
    }

    let file_name = format!("{}.{}", source.to_lowercase(), format.extension());
    Path::new(path).join(file_name).to_string_lossy().into_owned()
}

pub fn home_menu() -> String {
    [
        "Scraper Test Hub",
        "",
        "Choose a scraper:",
        "  youtube   YouTube Scraper",
        "  twitter   Twitter Scraper",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sources::TwitterSource;
    use crate::utils::error::HubError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockApi(std::result::Result<Value, u16>);

    #[async_trait]
    impl BackendApi for MockApi {
        async fn get_json(&self, _path_and_query: &str) -> Result<Value> {
            match &self.0 {
                Ok(value) => Ok(value.clone()),
                Err(status) => Err(HubError::StatusError { status: *status }),
            }
        }
    }

    fn tweets() -> Value {
        json!({
            "items": [
                {"created_at": "2025-09-01", "lang": "en", "text": "one", "likes": 1, "retweets": 0, "url": "u1"},
                {"created_at": "2025-09-02", "lang": "hi", "text": "two", "likes": 2, "retweets": 1, "url": "u2"}
            ]
        })
    }

    #[tokio::test]
    async fn test_run_prints_when_no_output_path() {
        let storage = MockStorage::default();
        let options = OutputOptions {
            format: OutputFormat::Csv,
            ..OutputOptions::default()
        };
        let engine = HubEngine::new(MockApi(Ok(tweets())), storage.clone(), options);

        let summary = engine.run(TwitterSource::default()).await.unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.source, "Twitter");
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.written_to, None);
        assert_eq!(
            summary.rendered,
            "Time,Lang,Text,Likes,RTs\n2025-09-01,en,one,1,0\n2025-09-02,hi,two,2,1\n"
        );
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_run_writes_to_storage() {
        let storage = MockStorage::default();
        let options = OutputOptions {
            format: OutputFormat::Json,
            output_path: Some("tweets.json".to_string()),
            ..OutputOptions::default()
        };
        let engine = HubEngine::new(MockApi(Ok(tweets())), storage.clone(), options);

        let summary = engine.run(TwitterSource::default()).await.unwrap();

        assert_eq!(summary.written_to.as_deref(), Some("tweets.json"));
        let written = storage.get_file("tweets.json").await.unwrap();
        let value: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(value[1]["Text"], "two");
    }

    #[tokio::test]
    async fn test_run_failure_has_message_and_no_output() {
        let storage = MockStorage::default();
        let options = OutputOptions {
            output_path: Some("tweets.txt".to_string()),
            ..OutputOptions::default()
        };
        let engine = HubEngine::new(MockApi(Err(404)), storage.clone(), options);

        let summary = engine.run(TwitterSource::default()).await.unwrap();

        assert!(!summary.is_success());
        assert_eq!(summary.error.as_deref(), Some("API 404"));
        assert_eq!(summary.rows, 0);
        assert!(summary.rendered.is_empty());
        assert!(storage.get_file("tweets.txt").await.is_none());
    }

    #[tokio::test]
    async fn test_run_names_file_after_source_when_path_is_directory() {
        let storage = MockStorage::default();
        let options = OutputOptions {
            format: OutputFormat::Csv,
            output_path: Some("reports/".to_string()),
            ..OutputOptions::default()
        };
        let engine = HubEngine::new(MockApi(Ok(tweets())), storage.clone(), options);

        let summary = engine.run(TwitterSource::default()).await.unwrap();

        assert_eq!(summary.written_to.as_deref(), Some("reports/twitter.csv"));
        let written = storage.get_file("reports/twitter.csv").await.unwrap();
        assert!(String::from_utf8(written).unwrap().starts_with("Time,Lang,Text"));
    }

    #[test]
    fn test_resolve_output_path_keeps_file_names() {
        assert_eq!(
            resolve_output_path("out/tweets.txt", "Twitter", OutputFormat::Html),
            "out/tweets.txt"
        );
        assert_eq!(
            resolve_output_path("out/", "YouTube", OutputFormat::Table),
            "out/youtube.txt"
        );

        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_output_path(
            dir.path().to_str().unwrap(),
            "YouTube",
            OutputFormat::Json,
        );
        assert_eq!(
            std::path::PathBuf::from(resolved),
            dir.path().join("youtube.json")
        );
    }

    #[test]
    fn test_output_options_from_config() {
        let settings = crate::config::settings::Settings {
            format: OutputFormat::Tsv,
            output_path: Some("out.tsv".to_string()),
            max_cell_width: 30,
            ..crate::config::settings::Settings::default()
        };

        let options = OutputOptions::from_config(&settings);

        assert_eq!(options.format, OutputFormat::Tsv);
        assert_eq!(options.output_path.as_deref(), Some("out.tsv"));
        assert_eq!(options.max_cell_width, 30);
    }

    #[test]
    fn test_home_menu_lists_scrapers() {
        let menu = home_menu();
        assert!(menu.contains("Choose a scraper:"));
        assert!(menu.contains("youtube"));
        assert!(menu.contains("twitter"));
    }
}
