use crate::core::{Endpoint, Outcome, SearchClient};
use crate::utils::error::DispatchError;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Fans a query out to every endpoint of a group at once.
///
/// Each call runs as its own task and is raced against `timeout`. When the
/// timer wins the task is left running and its result is dropped on the floor;
/// nothing is cancelled.
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn SearchClient>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn SearchClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// One outcome per endpoint, in input order, regardless of which call
    /// finishes first. Never fails.
    pub async fn dispatch(&self, endpoints: &[Endpoint], query: &str) -> Vec<Outcome> {
        let calls = endpoints
            .iter()
            .map(|endpoint| self.dispatch_one(endpoint.clone(), query.to_string()));

        join_all(calls).await
    }

    async fn dispatch_one(&self, endpoint: Endpoint, query: String) -> Outcome {
        let client = Arc::clone(&self.client);
        let target = endpoint.clone();
        let call = tokio::spawn(async move { client.search(&target, &query).await });

        // Dropping the JoinHandle detaches the task rather than aborting it.
        let result = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(DispatchError::Aborted(join_error.to_string())),
            Err(_) => Err(DispatchError::Timeout),
        };

        match result {
            Ok(payload) => {
                tracing::debug!("✅ {} responded", endpoint.url);
                Outcome::success(endpoint, payload)
            }
            Err(e) => {
                tracing::warn!("❌ {} failed: {}", endpoint.url, e);
                Outcome::error(endpoint, e.to_string())
            }
        }
    }
}
