pub mod aggregator;
pub mod dispatcher;
pub mod status;

pub use crate::domain::model::{
    Endpoint, GroupReport, Outcome, OutcomeStatus, ProviderGroup, StatusResponse,
};
pub use crate::domain::ports::{ConfigProvider, SearchClient};
