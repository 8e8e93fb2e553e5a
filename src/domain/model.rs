use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// One remote search-proxy server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub provider: String,
    pub url: String,
}

impl Endpoint {
    pub fn new(provider: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            url: url.into(),
        }
    }

    /// Full URL of the search route, e.g. `https://host/api/serp/search`.
    pub fn search_url(&self, search_path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), search_path)
    }
}

/// A named collection of endpoints reported together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderGroup {
    pub name: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Body sent to `POST <url><search_path>`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub provider: &'a str,
    pub query: &'a str,
}

/// Result of dispatching to one endpoint.
///
/// Construct through [`Outcome::success`] or [`Outcome::error`] so that
/// exactly one of the payload and the error message is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    #[serde(rename = "server", serialize_with = "serialize_endpoint_url")]
    pub endpoint: Endpoint,
    pub status: OutcomeStatus,
    #[serde(rename = "data", skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

fn serialize_endpoint_url<S: Serializer>(endpoint: &Endpoint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&endpoint.url)
}

impl Outcome {
    pub fn success(endpoint: Endpoint, payload: serde_json::Value) -> Self {
        Self {
            endpoint,
            status: OutcomeStatus::Success,
            payload: Some(payload),
            error_message: None,
        }
    }

    pub fn error(endpoint: Endpoint, message: impl Into<String>) -> Self {
        Self {
            endpoint,
            status: OutcomeStatus::Error,
            payload: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReport {
    pub success_count: usize,
    pub results: Vec<Outcome>,
}

/// Combined report returned by `GET /`; groups keep their configured order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusResponse {
    pub message: String,
    #[serde(flatten)]
    pub groups: IndexMap<String, GroupReport>,
}
