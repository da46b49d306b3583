//! Reverse-lookup domain names (RFC 1035 §3.5, RFC 3596 §2.5).

use std::fmt::Write;
use std::net::IpAddr;

const REVERSE_DOMAIN_IPV4: &str = "in-addr.arpa";
const REVERSE_DOMAIN_IPV6: &str = "ip6.arpa";

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Builds `d.c.b.a.in-addr.arpa` from the octets of `a.b.c.d`.
///
/// # Panics
///
/// Panics if `octets` is not exactly 4 bytes long.
pub fn ipv4_reverse_name(octets: &[u8]) -> String {
    assert_eq!(
        octets.len(),
        4,
        "IPv4 reverse name needs 4 octets, got {}",
        octets.len()
    );

    let mut name = String::with_capacity(16 + REVERSE_DOMAIN_IPV4.len());
    for octet in octets.iter().rev() {
        let _ = write!(name, "{}.", octet);
    }
    name.push_str(REVERSE_DOMAIN_IPV4);
    name
}

/// Builds the nibble-reversed `ip6.arpa` name from 16 big-endian bytes.
///
/// # Panics
///
/// Panics if `octets` is not exactly 16 bytes long.
pub fn ipv6_reverse_name(octets: &[u8]) -> String {
    assert_eq!(
        octets.len(),
        16,
        "IPv6 reverse name needs 16 octets, got {}",
        octets.len()
    );

    let mut name = String::with_capacity(64 + REVERSE_DOMAIN_IPV6.len());
    for byte in octets.iter().rev() {
        name.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
        name.push('.');
        name.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        name.push('.');
    }
    name.push_str(REVERSE_DOMAIN_IPV6);
    name
}

pub fn reverse_name(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => ipv4_reverse_name(&ipv4.octets()),
        IpAddr::V6(ipv6) => ipv6_reverse_name(&ipv6.octets()),
    }
}
