//! Inbound HTTP surface.
//!
//! - `GET /` - fan out the query and report every server
//! - `GET /health` - liveness, no fan-out

use crate::core::status::StatusService;
use crate::core::StatusResponse;
use axum::{
    extract::{RawQuery, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use url::form_urlencoded;

const QUERY_KEYS: [&str; 2] = ["query", "q"];

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn router(service: Arc<StatusService>) -> Router {
    Router::new()
        .route("/", get(server_statuses))
        .route("/health", get(health))
        .with_state(service)
}

/// First non-blank `query` / `q` value of a raw query string. Repeated or
/// malformed parameters never fail the request.
pub fn requested_query(raw: Option<&str>) -> Option<String> {
    form_urlencoded::parse(raw?.as_bytes())
        .filter(|(key, _)| QUERY_KEYS.contains(&&**key))
        .map(|(_, value)| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Always 200: individual server failures live inside the report.
async fn server_statuses(
    State(service): State<Arc<StatusService>>,
    RawQuery(raw): RawQuery,
) -> Json<StatusResponse> {
    let query = requested_query(raw.as_deref())
        .unwrap_or_else(|| service.default_query().to_string());

    Json(service.check(&query).await)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}
