use crate::LookupProtocol;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Where reverse lookups are sent. Built once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Explicit resolver; `None` means the platform resolver.
    #[serde(default)]
    pub resolver: Option<IpAddr>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub protocol: LookupProtocol,

    /// Applied to every network step of a lookup against the explicit resolver.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ResolverConfig {
    pub fn endpoint(&self) -> Option<SocketAddr> {
        self.resolver.map(|ip| SocketAddr::new(ip, self.port))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            resolver: None,
            port: default_port(),
            protocol: LookupProtocol::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_port() -> u16 {
    53
}

fn default_timeout_ms() -> u64 {
    5000
}
