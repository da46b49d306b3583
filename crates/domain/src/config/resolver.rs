use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Nameserver to send PTR queries to (`ip:port`). When unset the first
    /// `nameserver` entry of `/etc/resolv.conf` is used.
    #[serde(default)]
    pub server: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Re-send over TCP when the UDP answer comes back truncated
    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl ResolverConfig {
    /// Parses `server`, accepting a bare IP address and defaulting the port to 53.
    pub fn server_addr(&self) -> Option<Result<SocketAddr, String>> {
        self.server.as_deref().map(parse_server_addr)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            server: None,
            timeout_ms: default_timeout_ms(),
            tcp_fallback: true,
        }
    }
}

pub fn parse_server_addr(raw: &str) -> Result<SocketAddr, String> {
    let raw = raw.trim();
    if let Ok(addr) = raw.parse::<SocketAddr>() {
        return Ok(addr);
    }
    raw.parse::<std::net::IpAddr>()
        .map(|ip| SocketAddr::new(ip, 53))
        .map_err(|_| format!("invalid nameserver address '{}'", raw))
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}
