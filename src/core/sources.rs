use crate::core::normalizer::{normalize_twitter, normalize_youtube};
use crate::core::table::stringify;
use crate::core::thumbnail::thumbnail_for;
use crate::domain::model::{Cell, Column, Record};
use crate::domain::ports::ScrapeSource;
use crate::utils::error::Result;
use serde_json::Value;

pub const YOUTUBE_DEFAULT_MAX_RESULTS: u32 = 5;
pub const TWITTER_DEFAULT_LIMIT: u32 = 10;

pub const YOUTUBE_ENDPOINT: &str = "/api/youtube/scrape";
pub const TWITTER_ENDPOINT: &str = "/api/twitter/search";

#[derive(Debug, Clone)]
pub struct YoutubeSource {
    pub max_results: u32,
}

impl YoutubeSource {
    pub fn new(max_results: u32) -> Self {
        Self { max_results }
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new(YOUTUBE_DEFAULT_MAX_RESULTS)
    }
}

impl ScrapeSource for YoutubeSource {
    fn name(&self) -> &str {
        "YouTube"
    }

    fn path_and_query(&self) -> String {
        format!("{}?max_results={}", YOUTUBE_ENDPOINT, self.max_results)
    }

    fn normalize(&self, payload: Value) -> Result<Vec<Record>> {
        normalize_youtube(payload)
    }

    fn columns(&self) -> Vec<Column> {
        vec![
            Column::new("thumb", "Preview").with_render(|_, row| match thumbnail_for(row) {
                Some(src) => Cell::Image {
                    src,
                    alt: row.get_str("title").unwrap_or_default().to_string(),
                    href: row.get_str("url").map(str::to_string),
                },
                None => Cell::Empty,
            }),
            Column::new("title", "Title").with_render(link_to_url),
            Column::new("channel", "Channel"),
            Column::new("upload_time", "Uploaded"),
            Column::new("category", "Category"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct TwitterSource {
    pub limit: u32,
}

impl TwitterSource {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl Default for TwitterSource {
    fn default() -> Self {
        Self::new(TWITTER_DEFAULT_LIMIT)
    }
}

impl ScrapeSource for TwitterSource {
    fn name(&self) -> &str {
        "Twitter"
    }

    fn path_and_query(&self) -> String {
        format!("{}?limit={}", TWITTER_ENDPOINT, self.limit)
    }

    fn normalize(&self, payload: Value) -> Result<Vec<Record>> {
        normalize_twitter(payload)
    }

    fn columns(&self) -> Vec<Column> {
        vec![
            Column::new("created_at", "Time"),
            Column::new("lang", "Lang"),
            Column::new("text", "Text").with_render(link_to_url),
            Column::new("likes", "Likes"),
            Column::new("retweets", "RTs"),
        ]
    }
}

/// Cell text is the column value, linked to the row's `url`.
fn link_to_url(value: Option<&Value>, row: &Record) -> Cell {
    let text = stringify(value);
    match row.get_str("url") {
        Some(href) => Cell::link(text, href),
        None => Cell::text(text),
    }
}
