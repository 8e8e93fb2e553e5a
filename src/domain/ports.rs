use crate::domain::model::Endpoint;
use crate::utils::error::DispatchError;
use async_trait::async_trait;

/// Outbound search call against one endpoint.
///
/// Implementations report non-2xx answers as [`DispatchError::HttpStatus`]
/// without reading the body. Timeouts are applied by the dispatcher, not here.
#[async_trait]
pub trait SearchClient: Send + Sync + 'static {
    async fn search(
        &self,
        endpoint: &Endpoint,
        query: &str,
    ) -> Result<serde_json::Value, DispatchError>;
}

pub trait ConfigProvider: Send + Sync {
    fn groups(&self) -> &[crate::domain::model::ProviderGroup];
    fn timeout_ms(&self) -> u64;
    fn transport_timeout_ms(&self) -> u64;
    fn default_query(&self) -> &str;
    fn search_path(&self) -> &str;
}
