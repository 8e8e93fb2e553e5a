use crate::adapters::ReqwestSearchClient;
use crate::app::routes::router;
use crate::config::StatusConfig;
use crate::core::status::StatusService;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, StatusError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Binds the listener. Failing here is the one fatal error of the service.
pub async fn bind(config: &StatusConfig) -> Result<TcpListener> {
    let addr = config.bind_addr();
    TcpListener::bind(&addr)
        .await
        .map_err(|source| StatusError::BindError { addr, source })
}

pub fn build_service(config: &StatusConfig) -> Result<Arc<StatusService>> {
    let client = ReqwestSearchClient::new(
        config.search_path(),
        Duration::from_millis(config.transport_timeout_ms()),
    )?;
    Ok(Arc::new(StatusService::from_config(config, Arc::new(client))))
}

/// Serves on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, service: Arc<StatusService>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    tracing::info!("🚀 Server is running on http://{}", local_addr);
    for group in service.groups() {
        tracing::info!("📡 {}: {} server(s)", group.name, group.endpoints.len());
    }

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
