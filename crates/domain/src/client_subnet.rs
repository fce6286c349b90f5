use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// EDNS Client Subnet hint (RFC 7871), e.g. `198.51.100.0/24`.
///
/// A bare address is taken as a host prefix (/32 or /128).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSubnet {
    network: IpNetwork,
}

impl ClientSubnet {
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Self, String> {
        let network = IpNetwork::new(addr, prefix)
            .map_err(|e| format!("Invalid prefix /{}: {}", prefix, e))?;
        Ok(Self { network })
    }

    /// IANA address family number: 1 for IPv4, 2 for IPv6.
    pub fn family(&self) -> u16 {
        match self.network {
            IpNetwork::V4(_) => 1,
            IpNetwork::V6(_) => 2,
        }
    }

    pub fn source_prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Network address truncated to the octets covered by the source prefix,
    /// host bits zeroed, as required on the wire.
    pub fn address_octets(&self) -> Vec<u8> {
        let significant = self.source_prefix().div_ceil(8) as usize;
        let mut octets = match self.network.network() {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        };
        octets.truncate(significant);
        octets
    }
}

impl FromStr for ClientSubnet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Client subnet cannot be empty".to_string());
        }

        match s.split_once('/') {
            Some((addr, prefix)) => {
                let addr: IpAddr = addr
                    .parse()
                    .map_err(|e| format!("Invalid client subnet address '{}': {}", addr, e))?;
                let prefix: u8 = prefix
                    .parse()
                    .map_err(|e| format!("Invalid client subnet prefix '{}': {}", prefix, e))?;
                Self::new(addr, prefix)
            }
            None => {
                let addr: IpAddr = s
                    .parse()
                    .map_err(|e| format!("Invalid client subnet address '{}': {}", s, e))?;
                let prefix = if addr.is_ipv4() { 32 } else { 128 };
                Self::new(addr, prefix)
            }
        }
    }
}

impl fmt::Display for ClientSubnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network.network(), self.network.prefix())
    }
}
