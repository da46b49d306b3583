use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use tracing::{debug, warn};

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Used when the system resolver configuration names no usable nameserver.
pub const DEFAULT_NAMESERVER: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

/// Extracts `nameserver` entries from resolv.conf content, in file order.
///
/// Lines starting with `#` or `;` are comments. Link-local IPv6 entries
/// carrying a zone (`fe80::1%eth0`) cannot be expressed as a `SocketAddr`
/// here and are skipped, as are entries that fail to parse.
pub fn parse_nameservers(content: &str) -> Vec<SocketAddr> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            if fields.next()? != "nameserver" {
                return None;
            }
            let value = fields.next()?;
            if value.contains('%') {
                debug!(entry = %value, "Skipping zone-scoped nameserver");
                return None;
            }
            match value.parse::<IpAddr>() {
                Ok(ip) => Some(SocketAddr::new(ip, 53)),
                Err(_) => {
                    warn!(entry = %value, "Ignoring malformed nameserver entry");
                    None
                }
            }
        })
        .collect()
}

pub fn read_nameservers(path: &Path) -> std::io::Result<Vec<SocketAddr>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_nameservers(&content))
}

/// First nameserver from `/etc/resolv.conf`, or [`DEFAULT_NAMESERVER`].
pub fn system_nameserver() -> SocketAddr {
    match read_nameservers(Path::new(RESOLV_CONF_PATH)) {
        Ok(servers) => match servers.first() {
            Some(server) => *server,
            None => {
                warn!(
                    path = RESOLV_CONF_PATH,
                    fallback = %DEFAULT_NAMESERVER,
                    "No nameserver configured, using fallback"
                );
                DEFAULT_NAMESERVER
            }
        },
        Err(e) => {
            warn!(
                path = RESOLV_CONF_PATH,
                error = %e,
                fallback = %DEFAULT_NAMESERVER,
                "Failed to read resolver configuration, using fallback"
            );
            DEFAULT_NAMESERVER
        }
    }
}
