use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::dispatch::DispatchConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use crate::LookupProtocol;

/// Main configuration structure for Ferrous PTR
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Config {
    /// Resolver selection (platform default or explicit endpoint)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Task launching (delay, optional cap)
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an optional TOML file, then apply command-line
    /// overrides and validate the result.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) -> Result<(), ConfigError> {
        if let Some(resolver) = overrides.resolver {
            let ip = resolver.trim().parse::<IpAddr>().map_err(|_| {
                ConfigError::Validation(format!("Resolver '{}' is not an IP address", resolver))
            })?;
            self.resolver.resolver = Some(ip);
        }
        if let Some(protocol) = overrides.protocol {
            self.resolver.protocol = protocol
                .parse::<LookupProtocol>()
                .map_err(ConfigError::Validation)?;
        }
        if let Some(port) = overrides.port {
            self.resolver.port = port;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.resolver.timeout_ms = timeout_ms;
        }
        if let Some(wait_ms) = overrides.wait_ms {
            self.dispatch.wait_ms = wait_ms;
        }
        if let Some(max) = overrides.max_in_flight {
            self.dispatch.max_in_flight = Some(max);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.port == 0 {
            return Err(ConfigError::Validation(
                "Resolver port cannot be 0".to_string(),
            ));
        }

        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Lookup timeout cannot be 0".to_string(),
            ));
        }

        if self.dispatch.max_in_flight == Some(0) {
            return Err(ConfigError::Validation(
                "max_in_flight must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub resolver: Option<String>,
    pub protocol: Option<String>,
    pub port: Option<u16>,
    pub timeout_ms: Option<u64>,
    pub wait_ms: Option<u64>,
    pub max_in_flight: Option<usize>,
    pub log_level: Option<String>,
}
