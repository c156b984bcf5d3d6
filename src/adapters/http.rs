use crate::domain::ports::BackendApi;
use crate::utils::error::{HubError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// reqwest client bound to the scraper backend's base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }
}

#[async_trait]
impl BackendApi for BackendClient {
    async fn get_json(&self, path_and_query: &str) -> Result<Value> {
        let url = self.url_for(path_and_query);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(HubError::StatusError {
                status: response.status().as_u16(),
            });
        }

        let payload: Value = response.json().await?;

        // 後端設定有問題時會回 200 加上 {"error": "..."}
        if let Some(message) = payload.get("error").and_then(Value::as_str) {
            return Err(HubError::BackendError {
                message: message.to_string(),
            });
        }

        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = BackendClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.url_for("/api/twitter/search?limit=10"),
            "http://localhost:8000/api/twitter/search?limit=10"
        );
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/twitter/search")
                .query_param("limit", "3");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"count": 0, "items": []}));
        });

        let client = BackendClient::new(server.base_url());
        let payload = client.get_json("/api/twitter/search?limit=3").await.unwrap();

        api_mock.assert();
        assert_eq!(payload["items"], json!([]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/youtube/scrape");
            then.status(502);
        });

        let client = BackendClient::new(server.base_url());
        let err = client
            .get_json("/api/youtube/scrape?max_results=5")
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, HubError::StatusError { status: 502 }));
    }

    #[tokio::test]
    async fn test_error_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/twitter/search");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"error": "TWITTER_BEARER_TOKEN missing on server"}));
        });

        let client = BackendClient::new(server.base_url());
        let err = client.get_json("/api/twitter/search?limit=10").await.unwrap_err();

        assert_eq!(err.user_friendly_message(), "TWITTER_BEARER_TOKEN missing on server");
    }

    #[tokio::test]
    async fn test_invalid_json_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/twitter/search");
            then.status(200).body("<html>oops</html>");
        });

        let client = BackendClient::new(server.base_url());
        let err = client.get_json("/api/twitter/search?limit=10").await.unwrap_err();

        assert!(matches!(err, HubError::ApiError(_)));
    }
}
