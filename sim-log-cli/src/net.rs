//! Multicast socket setup
//!
//! The simulation publishes its telemetry to a UDP multicast group; this
//! module binds the listening socket and joins the group for IPv4 or IPv6
//! addresses. Transport failures past this point are fatal for the receive
//! loop and surface as `io::Error` from `recv_from`.

use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, UdpSocket};

/// Bind a UDP socket on the given port and join the multicast group
pub fn multicast_listener(address: IpAddr, port: u16) -> io::Result<UdpSocket> {
    if !address.is_multicast() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a multicast group address", address),
        ));
    }

    match address {
        IpAddr::V4(group) => {
            let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port))?;
            socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;
            Ok(socket)
        }
        IpAddr::V6(group) => {
            let socket = UdpSocket::bind((Ipv6Addr::UNSPECIFIED, port))?;
            // Interface index 0 lets the system pick.
            socket.join_multicast_v6(&group, 0)?;
            Ok(socket)
        }
    }
}
