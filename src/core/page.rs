use crate::core::request::{Outcome, RequestSlot, RequestTicket};
use crate::core::table::render;
use crate::domain::model::{DisplayGrid, Record};
use crate::domain::ports::{BackendApi, ScrapeSource};
use crate::utils::error::Result;

/// UI state of one scraper page: the rows on screen, the last error and the
/// request slot guarding the trigger.
pub struct ScraperPage<S: ScrapeSource> {
    source: S,
    slot: RequestSlot,
    rows: Vec<Record>,
    error: Option<String>,
}

impl<S: ScrapeSource> ScraperPage<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: RequestSlot::new(),
            rows: Vec::new(),
            error: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn trigger_label(&self) -> String {
        if self.is_busy() {
            "Running…".to_string()
        } else {
            format!("Run {} Scraper", self.source.name())
        }
    }

    /// Accept a trigger if no request is in flight. Clears the previous
    /// rows and error; returns `None` (and changes nothing) while busy.
    pub fn begin(&mut self) -> Option<RequestTicket> {
        let ticket = self.slot.trigger()?;
        self.rows.clear();
        self.error = None;
        tracing::debug!("{} request started", self.source.name());
        Some(ticket)
    }

    pub async fn fetch<A>(&self, api: &A) -> Result<Vec<Record>>
    where
        A: BackendApi + ?Sized,
    {
        let path = self.source.path_and_query();
        let payload = api.get_json(&path).await?;
        self.source.normalize(payload)
    }

    /// Settle the in-flight request and apply its result to the page.
    /// A failure leaves an error message and no rows.
    pub fn finish(&mut self, ticket: RequestTicket, result: Result<Vec<Record>>) {
        match result {
            Ok(rows) => {
                self.slot.settle(ticket, Outcome::Success);
                tracing::debug!("{} request returned {} rows", self.source.name(), rows.len());
                self.rows = rows;
            }
            Err(e) => {
                self.slot.settle(ticket, Outcome::Failure);
                tracing::debug!("{} request failed: {}", self.source.name(), e);
                self.rows.clear();
                self.error = Some(e.user_friendly_message());
            }
        }
        self.slot.consume();
    }

    /// Trigger, fetch and settle in one go. Returns `false` if the trigger
    /// was ignored because a request was already pending.
    pub async fn run<A>(&mut self, api: &A) -> bool
    where
        A: BackendApi + ?Sized,
    {
        let Some(ticket) = self.begin() else {
            return false;
        };
        let result = self.fetch(api).await;
        self.finish(ticket, result);
        true
    }

    pub fn grid(&self) -> DisplayGrid {
        render(&self.source.columns(), &self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sources::{TwitterSource, YoutubeSource};
    use crate::utils::error::HubError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use tokio::sync::oneshot;
    use tokio_test::{assert_pending, assert_ready, task};

    /// Answers from a oneshot channel so the test controls when the request resolves.
    struct GatedApi {
        response: Mutex<Option<oneshot::Receiver<Result<Value>>>>,
        requested: Mutex<Vec<String>>,
    }

    impl GatedApi {
        fn new() -> (Self, oneshot::Sender<Result<Value>>) {
            let (tx, rx) = oneshot::channel();
            let api = Self {
                response: Mutex::new(Some(rx)),
                requested: Mutex::new(Vec::new()),
            };
            (api, tx)
        }
    }

    #[async_trait]
    impl BackendApi for GatedApi {
        async fn get_json(&self, path_and_query: &str) -> Result<Value> {
            self.requested.lock().unwrap().push(path_and_query.to_string());
            let rx = self.response.lock().unwrap().take().expect("single request");
            rx.await.expect("sender kept alive")
        }
    }

    struct FixedApi(Value);

    #[async_trait]
    impl BackendApi for FixedApi {
        async fn get_json(&self, _path_and_query: &str) -> Result<Value> {
            Ok(self.0.clone())
        }
    }

    fn youtube_payload() -> Value {
        json!({
            "results": {
                "tsunami": [
                    {"url": "https://youtu.be/A1", "title": "a1", "channel": "c", "upload_time": "t"},
                    {"url": "https://youtu.be/A2", "title": "a2", "channel": "c", "upload_time": "t"}
                ],
                "cyclone": [
                    {"url": "https://youtu.be/B1", "title": "b1", "channel": "c", "upload_time": "t"}
                ]
            }
        })
    }

    #[test]
    fn test_busy_while_pending_and_rows_only_after_resolve() {
        let mut page = ScraperPage::new(YoutubeSource::default());
        let (api, tx) = GatedApi::new();

        let ticket = page.begin().unwrap();
        assert!(page.is_busy());
        assert_eq!(page.trigger_label(), "Running…");

        let result = {
            let mut fetch = task::spawn(page.fetch(&api));
            assert_pending!(fetch.poll());
            assert!(page.is_busy());
            assert!(page.rows().is_empty());

            tx.send(Ok(youtube_payload())).unwrap();
            assert!(fetch.is_woken());
            assert_ready!(fetch.poll())
        };

        assert!(page.rows().is_empty());
        page.finish(ticket, result);

        assert!(!page.is_busy());
        assert_eq!(page.trigger_label(), "Run YouTube Scraper");
        assert_eq!(page.rows().len(), 3);
        assert_eq!(page.error(), None);
        assert_eq!(
            api.requested.lock().unwrap().as_slice(),
            ["/api/youtube/scrape?max_results=5"]
        );
    }

    #[test]
    fn test_second_trigger_while_busy_is_ignored() {
        let mut page = ScraperPage::new(TwitterSource::default());
        let ticket = page.begin().unwrap();

        assert!(page.begin().is_none());
        assert!(page.is_busy());

        page.finish(ticket, Ok(vec![Record::new().with_field("text", "hi")]));
        assert_eq!(page.rows().len(), 1);
        assert!(page.begin().is_some());
        // a new trigger clears the previous rows
        assert!(page.rows().is_empty());
    }

    #[tokio::test]
    async fn test_failure_sets_message_and_no_rows() {
        let mut page = ScraperPage::new(YoutubeSource::default());
        assert!(page.run(&FixedApi(youtube_payload())).await);
        assert_eq!(page.rows().len(), 3);

        let ticket = page.begin().unwrap();
        page.finish(ticket, Err(HubError::StatusError { status: 500 }));

        assert!(!page.is_busy());
        assert!(page.rows().is_empty());
        assert_eq!(page.error(), Some("API 500"));
    }

    #[tokio::test]
    async fn test_malformed_payload_collapses_into_message() {
        let mut page = ScraperPage::new(TwitterSource::default());
        assert!(page.run(&FixedApi(json!({"results": {}}))).await);

        assert!(page.rows().is_empty());
        let message = page.error().unwrap();
        assert!(message.contains("items"));
    }

    #[tokio::test]
    async fn test_grid_uses_source_columns() {
        let mut page = ScraperPage::new(YoutubeSource::default());
        page.run(&FixedApi(youtube_payload())).await;

        let grid = page.grid();
        assert_eq!(grid.column_count(), 5);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[2][4].plain_text(), "cyclone");
    }
}
