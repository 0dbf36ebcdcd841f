use super::resolv_conf;
use crate::dns::UpstreamPtrResolver;
use async_trait::async_trait;
use dns_lookup::LookupErrorKind;
use ferrous_ptr_application::ports::ReverseResolver;
use ferrous_ptr_domain::{absolute_name, DomainError, LookupProtocol};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

#[cfg(unix)]
use libc::NI_NAMEREQD;

#[cfg(not(unix))]
const NI_NAMEREQD: i32 = 0x04;

/// Reverse lookups through the platform's resolver configuration.
///
/// PTR queries go to the host's configured nameservers in order, so every
/// PTR record in the answer is returned. When no nameserver gives an answer
/// the lookup falls back to `getnameinfo`, which yields at most one name.
pub struct SystemPtrResolver {
    nameservers: Vec<UpstreamPtrResolver>,
}

impl SystemPtrResolver {
    pub fn new(timeout: Duration) -> Self {
        Self::with_nameservers(resolv_conf::system_nameservers(), timeout)
    }

    pub fn with_nameservers(servers: Vec<SocketAddr>, timeout: Duration) -> Self {
        let nameservers = servers
            .into_iter()
            .map(|addr| UpstreamPtrResolver::new(addr, LookupProtocol::Udp, timeout))
            .collect();

        Self { nameservers }
    }

    pub fn nameserver_count(&self) -> usize {
        self.nameservers.len()
    }

    async fn lookup_with_getnameinfo(&self, ip: IpAddr, address: &str) -> Result<Vec<String>, DomainError> {
        let lookup = tokio::task::spawn_blocking(move || {
            // NI_NAMEREQD: fail instead of echoing the numeric address back
            dns_lookup::getnameinfo(&SocketAddr::new(ip, 0), NI_NAMEREQD)
        })
        .await
        .map_err(|e| DomainError::IoError(format!("System lookup task failed: {}", e)))?;

        match lookup {
            Ok((hostname, _service)) if !hostname.is_empty() => Ok(vec![absolute_name(&hostname)]),
            Ok(_) => Err(DomainError::NoPtrRecord(address.to_string())),
            Err(e) => {
                let kind = e.kind();
                let e = std::io::Error::from(e);
                debug!(ip = %ip, error = %e, "getnameinfo failed");
                Err(classify_lookup_error(kind, address, e.to_string()))
            }
        }
    }
}

/// Maps a `getnameinfo` failure onto the lookup error it stands for.
fn classify_lookup_error(kind: LookupErrorKind, address: &str, detail: String) -> DomainError {
    match kind {
        LookupErrorKind::NoName | LookupErrorKind::NoData => {
            DomainError::NoPtrRecord(address.to_string())
        }
        LookupErrorKind::Again => DomainError::QueryTimeout,
        _ => DomainError::IoError(detail),
    }
}

#[async_trait]
impl ReverseResolver for SystemPtrResolver {
    async fn reverse_lookup(&self, address: &str) -> Result<Vec<String>, DomainError> {
        let ip: IpAddr = address
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;

        debug!(
            ip = %ip,
            nameservers = self.nameservers.len(),
            "Performing PTR lookup via system resolver"
        );

        for nameserver in &self.nameservers {
            match nameserver.reverse_lookup(address).await {
                Ok(names) => return Ok(names),
                // A definite negative answer ends the lookup.
                Err(e @ (DomainError::NxDomain | DomainError::NoPtrRecord(_))) => return Err(e),
                Err(e) => {
                    debug!(
                        ip = %ip,
                        nameserver = %nameserver.describe(),
                        error = %e,
                        "Nameserver gave no answer, trying next"
                    );
                }
            }
        }

        self.lookup_with_getnameinfo(ip, address).await
    }

    fn describe(&self) -> String {
        "system".to_string()
    }
}
