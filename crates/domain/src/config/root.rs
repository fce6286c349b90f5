use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::query::QueryConfig;
use super::resolvers::ResolversConfig;
use super::transport::TransportConfig;
use crate::DohProtocol;

const LOCAL_CONFIG_FILE: &str = "ferrous-doh.toml";

/// Main configuration structure for Ferrous DoH
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Encoding and question defaults
    #[serde(default)]
    pub query: QueryConfig,

    /// Timeouts, endpoint scheme and proxy
    #[serde(default)]
    pub transport: TransportConfig,

    /// Where the resolver list comes from
    #[serde(default)]
    pub resolvers: ResolversConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-doh.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
            Self::from_file(LOCAL_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(protocol) = overrides.protocol {
            self.query.protocol = protocol;
        }
        if let Some(record_type) = overrides.record_type {
            self.query.record_type = record_type;
        }
        if let Some(ecs) = overrides.ecs {
            self.query.ecs = Some(ecs);
        }
        if let Some(ms) = overrides.connect_timeout_ms {
            self.transport.connect_timeout_ms = ms;
        }
        if let Some(ms) = overrides.read_timeout_ms {
            self.transport.read_timeout_ms = ms;
        }
        if let Some(proxy) = overrides.proxy {
            self.transport.proxy = Some(proxy);
        }
        if let Some(server) = overrides.server {
            self.resolvers.servers = vec![server];
        }
        if let Some(file) = overrides.servers_file {
            self.resolvers.file = file;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.connect_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Connect timeout cannot be 0".to_string(),
            ));
        }

        if self.query.record_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Record type cannot be empty".to_string(),
            ));
        }

        if self.resolvers.servers.is_empty() && self.resolvers.file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No resolvers configured: set resolvers.servers or resolvers.file".to_string(),
            ));
        }

        if let Some(proxy) = &self.transport.proxy {
            if !proxy.starts_with("http://") && !proxy.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "Proxy '{}' must be an http:// or https:// URL",
                    proxy
                )));
            }
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub protocol: Option<DohProtocol>,
    pub record_type: Option<String>,
    pub ecs: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub read_timeout_ms: Option<u64>,
    pub proxy: Option<String>,
    pub server: Option<String>,
    pub servers_file: Option<String>,
    pub log_level: Option<String>,
}
