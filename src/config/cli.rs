use crate::config::toml_config::TomlConfig;
use crate::config::StatusConfig;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "serp-status")]
#[command(about = "Reports which search proxy servers are answering")]
pub struct CliConfig {
    /// Path to a TOML roster file; the built-in roster is used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Per-call timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Hard limit on any outbound call, in milliseconds (default: 10x --timeout-ms)
    #[arg(long)]
    pub transport_timeout_ms: Option<u64>,

    /// Query sent when a request does not supply one
    #[arg(long)]
    pub query: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Loads the roster file (if any) and applies command-line overrides.
    pub fn load(&self) -> Result<StatusConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.resolve()
            }
            None => StatusConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(transport_timeout_ms) = self.transport_timeout_ms {
            config.transport_timeout_ms = Some(transport_timeout_ms);
        }
        if let Some(query) = &self.query {
            config.default_query = query.clone();
        }

        Ok(config)
    }
}
