use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport used to reach an explicitly configured resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupProtocol {
    #[default]
    Udp,
    Tcp,
}

impl LookupProtocol {
    pub fn protocol_name(&self) -> &'static str {
        match self {
            LookupProtocol::Udp => "UDP",
            LookupProtocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for LookupProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupProtocol::Udp => write!(f, "udp"),
            LookupProtocol::Tcp => write!(f, "tcp"),
        }
    }
}

impl FromStr for LookupProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "udp" => Ok(LookupProtocol::Udp),
            "tcp" => Ok(LookupProtocol::Tcp),
            other => Err(format!(
                "Invalid protocol '{}'. Expected 'tcp' or 'udp'",
                other
            )),
        }
    }
}
