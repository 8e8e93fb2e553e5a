use crate::domain::model::{Endpoint, SearchRequest};
use crate::domain::ports::SearchClient;
use crate::utils::error::{DispatchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// `reqwest`-backed search client posting `{provider, query}` as JSON.
///
/// `transport_timeout` bounds every request end to end, so calls the
/// dispatcher stopped waiting for still finish eventually.
#[derive(Debug, Clone)]
pub struct ReqwestSearchClient {
    client: Client,
    search_path: String,
}

impl ReqwestSearchClient {
    pub fn new(search_path: impl Into<String>, transport_timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(transport_timeout).build()?;
        Ok(Self::with_client(client, search_path))
    }

    pub fn with_client(client: Client, search_path: impl Into<String>) -> Self {
        Self {
            client,
            search_path: search_path.into(),
        }
    }
}

#[async_trait]
impl SearchClient for ReqwestSearchClient {
    async fn search(
        &self,
        endpoint: &Endpoint,
        query: &str,
    ) -> std::result::Result<serde_json::Value, DispatchError> {
        let url = endpoint.search_url(&self.search_path);
        tracing::debug!("POST {} (provider: {})", url, endpoint.provider);

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest {
                provider: &endpoint.provider,
                query,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    const SEARCH_PATH: &str = "/api/serp/search";

    fn client() -> ReqwestSearchClient {
        ReqwestSearchClient::new(SEARCH_PATH, Duration::from_secs(30)).unwrap()
    }

    #[tokio::test]
    async fn test_posts_provider_and_query_as_json() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(SEARCH_PATH)
                .header("content-type", "application/json")
                .json_body(json!({"provider": "bing", "query": "minecraft"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"hits": []}));
        });

        let client = client();
        let endpoint = Endpoint::new("bing", server.base_url());

        let payload = client.search(&endpoint, "minecraft").await.unwrap();

        api_mock.assert();
        assert_eq!(payload, json!({"hits": []}));
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(SEARCH_PATH);
            then.status(500).body("{\"ignored\": true}");
        });

        let client = client();
        let endpoint = Endpoint::new("bing", server.base_url());

        let err = client.search(&endpoint, "minecraft").await.unwrap_err();
        assert!(matches!(err, DispatchError::HttpStatus(500)));
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(SEARCH_PATH);
            then.status(200).body("<html>not json</html>");
        });

        let client = client();
        let endpoint = Endpoint::new("google", server.base_url());

        let err = client.search(&endpoint, "minecraft").await.unwrap_err();
        assert!(matches!(err, DispatchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_silent_peer_is_cut_off_at_transport_timeout() {
        // Accepted by the kernel backlog, never answered.
        let silent = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = Endpoint::new("bing", format!("http://{}", silent.local_addr().unwrap()));
        let client = ReqwestSearchClient::new(SEARCH_PATH, Duration::from_millis(200)).unwrap();

        let started = std::time::Instant::now();
        let err = client.search(&endpoint, "minecraft").await.unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(matches!(err, DispatchError::Transport(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = client();
        let endpoint = Endpoint::new("google", "http://127.0.0.1:1");

        let err = client.search(&endpoint, "minecraft").await.unwrap_err();
        assert!(matches!(err, DispatchError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }
}
