//! # Peer Network Addresses
//!
//! The set of address kinds a peer can have is fixed, so it is a plain enum
//! rather than an extensible trait object.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

/// Routing zone an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressZone {
    Public,
    Tor,
    I2p,
}

/// A peer address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkAddress {
    Ipv4 { ip: Ipv4Addr, port: u16 },
    Ipv6 { ip: Ipv6Addr, port: u16 },
    /// Hidden-service host, including the `.onion` suffix.
    Tor { host: String, port: u16 },
    /// Eepsite host, including the `.i2p` suffix.
    I2p { host: String, port: u16 },
}

impl NetworkAddress {
    pub fn zone(&self) -> AddressZone {
        match self {
            NetworkAddress::Ipv4 { .. } | NetworkAddress::Ipv6 { .. } => AddressZone::Public,
            NetworkAddress::Tor { .. } => AddressZone::Tor,
            NetworkAddress::I2p { .. } => AddressZone::I2p,
        }
    }

    pub fn port(&self) -> u16 {
        match self {
            NetworkAddress::Ipv4 { port, .. }
            | NetworkAddress::Ipv6 { port, .. }
            | NetworkAddress::Tor { port, .. }
            | NetworkAddress::I2p { port, .. } => *port,
        }
    }

    /// Host part without the port.
    pub fn host_str(&self) -> String {
        match self {
            NetworkAddress::Ipv4 { ip, .. } => ip.to_string(),
            NetworkAddress::Ipv6 { ip, .. } => ip.to_string(),
            NetworkAddress::Tor { host, .. } | NetworkAddress::I2p { host, .. } => host.clone(),
        }
    }

    pub fn is_loopback(&self) -> bool {
        match self {
            NetworkAddress::Ipv4 { ip, .. } => ip.is_loopback(),
            NetworkAddress::Ipv6 { ip, .. } => ip.is_loopback(),
            NetworkAddress::Tor { .. } | NetworkAddress::I2p { .. } => false,
        }
    }

    /// Private-range or link-local address.
    pub fn is_local(&self) -> bool {
        match self {
            NetworkAddress::Ipv4 { ip, .. } => ip.is_private() || ip.is_link_local(),
            NetworkAddress::Ipv6 { ip, .. } => {
                let first = ip.segments()[0];
                // fc00::/7 unique-local, fe80::/10 link-local
                (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80
            }
            NetworkAddress::Tor { .. } | NetworkAddress::I2p { .. } => false,
        }
    }
}

impl From<SocketAddr> for NetworkAddress {
    fn from(addr: SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(v4) => NetworkAddress::Ipv4 {
                ip: *v4.ip(),
                port: v4.port(),
            },
            SocketAddr::V6(v6) => NetworkAddress::Ipv6 {
                ip: *v6.ip(),
                port: v6.port(),
            },
        }
    }
}

impl fmt::Display for NetworkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkAddress::Ipv6 { ip, port } => write!(f, "[{}]:{}", ip, port),
            other => write!(f, "{}:{}", other.host_str(), other.port()),
        }
    }
}

impl FromStr for NetworkAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(addr.into());
        }

        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ParseError::InvalidAddress(s.to_string()))?;
        let port: u16 = port
            .parse()
            .map_err(|_| ParseError::InvalidAddress(s.to_string()))?;
        let lower = host.to_ascii_lowercase();

        if lower.len() > ".onion".len() && lower.ends_with(".onion") {
            Ok(NetworkAddress::Tor { host: lower, port })
        } else if lower.len() > ".i2p".len() && lower.ends_with(".i2p") {
            Ok(NetworkAddress::I2p { host: lower, port })
        } else {
            Err(ParseError::InvalidAddress(s.to_string()))
        }
    }
}
