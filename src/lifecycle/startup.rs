//! Startup helpers.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Browser-friendly URL for the bound address.
///
/// A wildcard bind (`0.0.0.0` / `::`) is shown as loopback, since that is the
/// address a local browser would open.
pub fn local_url(addr: SocketAddr) -> String {
    let ip = if addr.ip().is_unspecified() {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    } else {
        addr.ip()
    };
    format!("http://{}", SocketAddr::new(ip, addr.port()))
}

/// Line printed once the listener is bound.
pub fn banner(addr: SocketAddr) -> String {
    format!("Serving at {}", local_url(addr))
}
