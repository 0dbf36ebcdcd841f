use std::net::IpAddr;

/// Builds the absolute reverse-lookup owner name for `ip`.
///
/// IPv4 addresses map into `in-addr.arpa.` (octets reversed), IPv6 addresses
/// into `ip6.arpa.` (all 32 nibbles reversed).
pub fn ip_to_reverse_domain(ip: &IpAddr) -> String {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            format!(
                "{}.{}.{}.{}.in-addr.arpa.",
                octets[3], octets[2], octets[1], octets[0]
            )
        }
        IpAddr::V6(ipv6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in ipv6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa.", nibbles.join("."))
        }
    }
}

/// Returns `name` in absolute form, appending the root label when missing.
pub fn absolute_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}
