#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::dispatcher::DEFAULT_TIMEOUT_MS;
use crate::core::{ConfigProvider, Endpoint, ProviderGroup};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_not_reserved, validate_positive_number, validate_unique,
    validate_url, validate_url_path, Validate,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5555;
pub const DEFAULT_QUERY: &str = "minecraft";
pub const DEFAULT_SEARCH_PATH: &str = "/api/serp/search";

/// Transport ceiling as a multiple of `timeout_ms` when not set explicitly.
pub const TRANSPORT_TIMEOUT_FACTOR: u64 = 10;

/// Keys that sit next to the groups in the flattened response.
const RESERVED_GROUP_NAMES: [&str; 1] = ["message"];

const BASE_SERVERS: [&str; 6] = [
    "https://serpfree.onrender.com",
    "https://serpfree-2.onrender.com",
    "https://serpfree-3.onrender.com",
    "https://serpfree-4.onrender.com",
    "https://serpfree-5.onrender.com",
    "https://serpfree-6.onrender.com",
];

const GOOGLE_SERVERS: [&str; 6] = [
    "https://serpfree-google.onrender.com",
    "https://serpfree-google-2.onrender.com",
    "https://serpfree-google-3.onrender.com",
    "https://serpfree-google-4.onrender.com",
    "https://serpfree-google-5.onrender.com",
    "https://serpfree-google-6.onrender.com",
];

fn group(name: &str, provider: &str, urls: &[&str]) -> ProviderGroup {
    ProviderGroup {
        name: name.to_string(),
        endpoints: urls.iter().map(|url| Endpoint::new(provider, *url)).collect(),
    }
}

/// Built-in roster: `base` (bing proxies) and `google`.
pub fn default_groups() -> Vec<ProviderGroup> {
    vec![
        group("base", "bing", &BASE_SERVERS),
        group("google", "google", &GOOGLE_SERVERS),
    ]
}

/// Resolved runtime configuration, immutable once the server starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    pub host: String,
    pub port: u16,
    pub timeout_ms: u64,
    /// Hard limit on an outbound call, including calls nobody waits for any more.
    pub transport_timeout_ms: Option<u64>,
    pub default_query: String,
    pub search_path: String,
    pub groups: Vec<ProviderGroup>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            transport_timeout_ms: None,
            default_query: DEFAULT_QUERY.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            groups: default_groups(),
        }
    }
}

impl StatusConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for StatusConfig {
    fn groups(&self) -> &[ProviderGroup] {
        &self.groups
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn transport_timeout_ms(&self) -> u64 {
        self.transport_timeout_ms
            .unwrap_or_else(|| self.timeout_ms.saturating_mul(TRANSPORT_TIMEOUT_FACTOR))
    }

    fn default_query(&self) -> &str {
        &self.default_query
    }

    fn search_path(&self) -> &str {
        &self.search_path
    }
}

impl Validate for StatusConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_positive_number("dispatch.timeout_ms", self.timeout_ms, 1)?;
        if let Some(transport_timeout_ms) = self.transport_timeout_ms {
            validate_positive_number(
                "dispatch.transport_timeout_ms",
                transport_timeout_ms,
                self.timeout_ms,
            )?;
        }
        validate_non_empty_string("dispatch.default_query", &self.default_query)?;
        validate_url_path("dispatch.search_path", &self.search_path)?;

        validate_unique("groups.name", self.groups.iter().map(|g| g.name.as_str()))?;
        for group in &self.groups {
            validate_non_empty_string("groups.name", &group.name)?;
            validate_not_reserved("groups.name", &group.name, &RESERVED_GROUP_NAMES)?;
            for endpoint in &group.endpoints {
                validate_non_empty_string("groups.provider", &endpoint.provider)?;
                validate_url("groups.urls", &endpoint.url)?;
            }
        }

        Ok(())
    }
}
