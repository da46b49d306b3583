//! Plain DNS over UDP (RFC 1035 §4.2.1).
//!
//! Each query gets a fresh ephemeral socket connected to the nameserver, so
//! the kernel discards datagrams from any other address or port and reports
//! ICMP port-unreachable as a refused connection. A truncated answer is
//! returned as-is; the resolver decides whether to retry over TCP.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rdns_domain::DomainError;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest datagram accepted, matching the EDNS(0) payload size we advertise.
const MAX_DATAGRAM_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn open_socket(&self) -> Result<UdpSocket, DomainError> {
        let socket = UdpSocket::bind(wildcard_for(self.server_addr.ip()))
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.io_failure("connect", e))?;

        Ok(socket)
    }

    async fn exchange(&self, socket: &UdpSocket, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let sent = socket.send(query).await.map_err(|e| self.io_failure("send", e))?;
        debug!(server = %self.server_addr, bytes_sent = sent, "UDP query sent");

        let mut datagram = vec![0u8; MAX_DATAGRAM_SIZE];
        let received = socket
            .recv(&mut datagram)
            .await
            .map_err(|e| self.io_failure("receive", e))?;
        datagram.truncate(received);

        debug!(server = %self.server_addr, bytes_received = received, "UDP response received");
        Ok(datagram)
    }

    fn io_failure(&self, action: &str, e: io::Error) -> DomainError {
        if e.kind() == io::ErrorKind::ConnectionRefused {
            return DomainError::TransportConnectionRefused {
                server: self.server_addr.to_string(),
            };
        }
        DomainError::IoError(format!(
            "Failed to {} UDP datagram with {}: {}",
            action, self.server_addr, e
        ))
    }
}

/// Unspecified address of the same family as `server`, on an OS-chosen port.
fn wildcard_for(server: IpAddr) -> SocketAddr {
    match server {
        IpAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        IpAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let socket = self.open_socket().await?;

        // One deadline covers both directions of the exchange.
        let bytes = tokio::time::timeout(timeout, self.exchange(&socket, message_bytes))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        Ok(TransportResponse {
            bytes,
            protocol_used: self.protocol_name(),
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
