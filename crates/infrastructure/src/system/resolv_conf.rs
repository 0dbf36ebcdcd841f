//! Nameservers from the platform resolver configuration.

use std::net::{IpAddr, SocketAddr};
use tracing::debug;

#[cfg(unix)]
const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

const DNS_PORT: u16 = 53;

/// Nameservers configured on this host, in file order. Empty when the file is
/// missing or lists none.
pub fn system_nameservers() -> Vec<SocketAddr> {
    #[cfg(unix)]
    {
        match std::fs::read_to_string(RESOLV_CONF_PATH) {
            Ok(contents) => parse_nameservers(&contents),
            Err(e) => {
                debug!(path = RESOLV_CONF_PATH, error = %e, "Cannot read resolver configuration");
                Vec::new()
            }
        }
    }

    #[cfg(not(unix))]
    {
        debug!("No resolver configuration file on this platform");
        Vec::new()
    }
}

/// Extracts `nameserver` entries. Other directives and malformed entries
/// are skipped.
pub fn parse_nameservers(contents: &str) -> Vec<SocketAddr> {
    let mut servers = Vec::new();

    for line in contents.lines() {
        let line = line.split(['#', ';']).next().unwrap_or_default();
        let mut words = line.split_whitespace();

        if words.next() != Some("nameserver") {
            continue;
        }

        let Some(word) = words.next() else {
            continue;
        };

        // Link-local scope suffixes ("fe80::1%eth0") are not usable here.
        match word.parse::<IpAddr>() {
            Ok(ip) => servers.push(SocketAddr::new(ip, DNS_PORT)),
            Err(_) => debug!(entry = word, "Skipping unusable nameserver entry"),
        }
    }

    servers
}
