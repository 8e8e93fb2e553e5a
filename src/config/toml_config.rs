use crate::config::{default_groups, StatusConfig};
use crate::core::{Endpoint, ProviderGroup};
use crate::core::dispatcher::DEFAULT_TIMEOUT_MS;
use crate::utils::error::{Result, StatusError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// On-disk roster file. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerSection,
    pub dispatch: DispatchSection,
    pub groups: Vec<GroupSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: super::DEFAULT_HOST.to_string(),
            port: super::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchSection {
    pub timeout_ms: u64,
    pub transport_timeout_ms: Option<u64>,
    pub default_query: String,
    pub search_path: String,
}

impl Default for DispatchSection {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            transport_timeout_ms: None,
            default_query: super::DEFAULT_QUERY.to_string(),
            search_path: super::DEFAULT_SEARCH_PATH.to_string(),
        }
    }
}

/// `[[groups]]` entry: every URL in `urls` shares the group's provider tag.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSection {
    pub name: String,
    pub provider: String,
    pub urls: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StatusError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StatusError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StatusError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Flattens the file into the runtime configuration. A file without
    /// `[[groups]]` keeps the built-in roster.
    pub fn resolve(self) -> StatusConfig {
        let groups = if self.groups.is_empty() {
            default_groups()
        } else {
            self.groups
                .into_iter()
                .map(|group| ProviderGroup {
                    endpoints: group
                        .urls
                        .into_iter()
                        .map(|url| Endpoint::new(group.provider.clone(), url))
                        .collect(),
                    name: group.name,
                })
                .collect()
        };

        StatusConfig {
            host: self.server.host,
            port: self.server.port,
            timeout_ms: self.dispatch.timeout_ms,
            transport_timeout_ms: self.dispatch.transport_timeout_ms,
            default_query: self.dispatch.default_query,
            search_path: self.dispatch.search_path,
            groups,
        }
    }
}
