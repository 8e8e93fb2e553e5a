pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::ReqwestSearchClient;
pub use config::StatusConfig;
pub use crate::core::{
    aggregator::aggregate, dispatcher::Dispatcher, status::StatusService, Endpoint, GroupReport,
    Outcome, OutcomeStatus, ProviderGroup, StatusResponse,
};
pub use utils::error::{DispatchError, Result, StatusError};
