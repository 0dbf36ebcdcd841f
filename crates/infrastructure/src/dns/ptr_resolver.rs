use super::forwarding::{MessageBuilder, PtrResponse, ResponseParser};
use super::transport::{create_transport, tcp::TcpTransport, DnsTransport, Transport, TransportResponse};
use async_trait::async_trait;
use ferrous_ptr_application::ports::ReverseResolver;
use ferrous_ptr_domain::{ip_to_reverse_domain, DomainError, LookupProtocol};
use hickory_proto::op::ResponseCode;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Sends PTR queries straight to one configured resolver, bypassing the
/// platform resolver.
pub struct UpstreamPtrResolver {
    server_addr: SocketAddr,
    protocol: LookupProtocol,
    transport: Transport,
    tcp_fallback: Option<TcpTransport>,
    timeout: Duration,
}

impl UpstreamPtrResolver {
    pub fn new(server_addr: SocketAddr, protocol: LookupProtocol, timeout: Duration) -> Self {
        let tcp_fallback = match protocol {
            LookupProtocol::Udp => Some(TcpTransport::new(server_addr)),
            LookupProtocol::Tcp => None,
        };

        Self {
            server_addr,
            protocol,
            transport: create_transport(protocol, server_addr),
            tcp_fallback,
            timeout,
        }
    }

    fn check_response(sent: &TransportResponse, query_id: u16) -> Result<PtrResponse, DomainError> {
        let response = ResponseParser::parse(&sent.bytes)?;

        if response.id != query_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {} (over {})",
                response.id, query_id, sent.protocol_used
            )));
        }

        Ok(response)
    }

    async fn query(&self, query_bytes: &[u8], query_id: u16) -> Result<PtrResponse, DomainError> {
        let sent = self.transport.send(query_bytes, self.timeout).await?;
        let response = Self::check_response(&sent, query_id)?;

        if !response.truncated {
            return Ok(response);
        }

        match &self.tcp_fallback {
            Some(tcp) => {
                debug!(server = %self.server_addr, "Truncated UDP response, retrying over TCP");
                let sent = tcp.send(query_bytes, self.timeout).await?;
                Self::check_response(&sent, query_id)
            }
            None => Ok(response),
        }
    }
}

#[async_trait]
impl ReverseResolver for UpstreamPtrResolver {
    async fn reverse_lookup(&self, address: &str) -> Result<Vec<String>, DomainError> {
        let ip: IpAddr = address
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;
        let reverse_domain = ip_to_reverse_domain(&ip);

        debug!(
            ip = %ip,
            reverse_domain = %reverse_domain,
            server = %self.server_addr,
            protocol = self.transport.protocol_name(),
            "Performing PTR lookup"
        );

        let (query_id, query_bytes) = MessageBuilder::build_ptr_query(&reverse_domain)?;
        let response = self.query(&query_bytes, query_id).await?;

        match response.rcode {
            ResponseCode::NoError => {}
            ResponseCode::NXDomain => return Err(DomainError::NxDomain),
            rcode => {
                return Err(DomainError::InvalidDnsResponse(format!(
                    "{} from {}",
                    ResponseParser::rcode_to_status(rcode),
                    self.server_addr
                )))
            }
        }

        if response.names.is_empty() {
            return Err(DomainError::NoPtrRecord(address.to_string()));
        }

        Ok(response.names)
    }

    fn describe(&self) -> String {
        format!("{}://{}", self.protocol, self.server_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_udp_resolver_has_tcp_fallback() {
        let addr: SocketAddr = "9.9.9.9:53".parse().unwrap();
        let resolver = UpstreamPtrResolver::new(addr, LookupProtocol::Udp, Duration::from_secs(5));
        assert!(resolver.tcp_fallback.is_some());
        assert_eq!(resolver.describe(), "udp://9.9.9.9:53");
    }

    #[test]
    fn test_tcp_resolver_has_no_fallback() {
        let addr: SocketAddr = "[2620:fe::fe]:853".parse().unwrap();
        let resolver = UpstreamPtrResolver::new(addr, LookupProtocol::Tcp, Duration::from_secs(5));
        assert!(resolver.tcp_fallback.is_none());
        assert_eq!(resolver.describe(), "tcp://[2620:fe::fe]:853");
    }

    #[tokio::test]
    async fn test_malformed_address_fails_without_io() {
        let addr: SocketAddr = "127.0.0.1:9".parse().unwrap();
        let resolver = UpstreamPtrResolver::new(addr, LookupProtocol::Udp, Duration::from_millis(50));

        let result = resolver.reverse_lookup("not-an-ip").await;
        assert_eq!(
            result,
            Err(DomainError::InvalidIpAddress("not-an-ip".to_string()))
        );
    }
}
