use crate::core::aggregator::aggregate;
use crate::core::dispatcher::Dispatcher;
use crate::core::{ConfigProvider, ProviderGroup, SearchClient, StatusResponse};
use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;

pub const STATUS_MESSAGE: &str = "Server statuses";

/// Runs one dispatch-and-aggregate round per provider group.
///
/// The roster is fixed at construction; each call to [`StatusService::check`]
/// builds a fresh report and keeps nothing afterwards.
pub struct StatusService {
    groups: Vec<ProviderGroup>,
    dispatcher: Dispatcher,
    default_query: String,
}

impl StatusService {
    pub fn new(
        groups: Vec<ProviderGroup>,
        dispatcher: Dispatcher,
        default_query: impl Into<String>,
    ) -> Self {
        Self {
            groups,
            dispatcher,
            default_query: default_query.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, client: Arc<dyn SearchClient>) -> Self {
        let dispatcher = Dispatcher::new(client, Duration::from_millis(config.timeout_ms()));
        Self::new(config.groups().to_vec(), dispatcher, config.default_query())
    }

    pub fn default_query(&self) -> &str {
        &self.default_query
    }

    pub fn groups(&self) -> &[ProviderGroup] {
        &self.groups
    }

    pub async fn check(&self, query: &str) -> StatusResponse {
        tracing::info!(
            "🔍 Checking {} group(s) with query '{}'",
            self.groups.len(),
            query
        );

        let rounds = self.groups.iter().map(|group| async move {
            let outcomes = self.dispatcher.dispatch(&group.endpoints, query).await;
            let report = aggregate(outcomes);
            tracing::info!(
                "📊 {}: {}/{} servers responded",
                group.name,
                report.success_count,
                report.results.len()
            );
            (group.name.clone(), report)
        });

        let groups: IndexMap<_, _> = join_all(rounds).await.into_iter().collect();

        StatusResponse {
            message: STATUS_MESSAGE.to_string(),
            groups,
        }
    }
}
