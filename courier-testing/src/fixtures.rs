use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// A host that does not immediately close connections with a TCP reset,
/// so connection attempts to it run into timeouts.
pub const TARPIT_HOST: &str = "10.255.255.1";

pub const TARPIT_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 255, 255, 1));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceAddress {
    pub addr: SocketAddr,
    pub is_ipv6: bool,
}

/// Local addresses a client may bind to as connection source.
pub const VALID_SOURCE_ADDRESSES: [SourceAddress; 2] = [
    SourceAddress { addr: SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 0), is_ipv6: true },
    SourceAddress { addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0), is_ipv6: false },
];

/// Addresses no local interface owns.
// RFC 5737: 192.0.2.0/24 is for testing only.
// RFC 3849: 2001:db8::/32 is for documentation only.
pub const INVALID_SOURCE_ADDRESSES: [SocketAddr; 2] = [
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 255)), 0),
    SocketAddr::new(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)), 0),
];

pub fn tarpit(port: u16) -> SocketAddr {
    SocketAddr::new(TARPIT_ADDR, port)
}
