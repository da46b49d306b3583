use super::forwarding::{MessageBuilder, PtrResponse, ResponseParser};
use super::transport::{DnsTransport, TcpTransport, UdpTransport};
use crate::system::system_nameserver;
use async_trait::async_trait;
use rdns_application::ports::PtrResolver;
use rdns_domain::{DomainError, ResolverConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends PTR queries to a single recursive nameserver.
///
/// Queries go out over UDP. A truncated UDP answer is retried over TCP
/// unless the fallback is disabled.
pub struct HickoryPtrResolver {
    udp: UdpTransport,
    tcp: TcpTransport,
    timeout: Duration,
    tcp_fallback: bool,
}

impl HickoryPtrResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            udp: UdpTransport::new(server),
            tcp: TcpTransport::new(server),
            timeout,
            tcp_fallback: true,
        }
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    pub fn from_config(config: &ResolverConfig) -> Result<Self, DomainError> {
        let server = match config.server_addr() {
            Some(addr) => addr.map_err(DomainError::ConfigError)?,
            None => system_nameserver(),
        };

        Ok(Self::new(server, Duration::from_millis(config.timeout_ms))
            .with_tcp_fallback(config.tcp_fallback))
    }

    pub fn server(&self) -> SocketAddr {
        self.udp.server_addr()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(
        &self,
        transport: &dyn DnsTransport,
        query_id: u16,
        query_bytes: &[u8],
    ) -> Result<PtrResponse, DomainError> {
        let response = transport.send(query_bytes, self.timeout).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != query_id {
            warn!(
                server = %self.server(),
                expected = query_id,
                received = parsed.id,
                protocol = response.protocol_used,
                "DNS response ID mismatch"
            );
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                parsed.id, query_id
            )));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl PtrResolver for HickoryPtrResolver {
    async fn query_ptr(&self, reverse_domain: &str) -> Result<Vec<String>, DomainError> {
        let (query_id, query_bytes) = MessageBuilder::build_ptr_query(reverse_domain)?;

        let mut response = self.exchange(&self.udp, query_id, &query_bytes).await?;

        if response.truncated && self.tcp_fallback {
            debug!(
                reverse_domain = %reverse_domain,
                server = %self.server(),
                "UDP response truncated, retrying over TCP"
            );
            response = self.exchange(&self.tcp, query_id, &query_bytes).await?;
        }

        if response.is_server_error() {
            return Err(DomainError::ServerFailure(format!(
                "{} from {} for {}",
                ResponseParser::rcode_to_status(response.rcode),
                self.server(),
                reverse_domain
            )));
        }

        debug!(
            reverse_domain = %reverse_domain,
            status = ResponseParser::rcode_to_status(response.rcode),
            records = response.ptr_names.len(),
            "PTR query completed"
        );

        Ok(response.ptr_names)
    }
}
