//! HTTP server configuration object and helpers.

use std::net::{Ipv4Addr, SocketAddr};

use dataproc::config::PeerSettings;

/// Port the service listens on.
pub const DEFAULT_PORT: u16 = 8001;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) peer: PeerSettings,
}

impl ServerConfig {
    /// Construct a server configuration bound to every interface on
    /// [`DEFAULT_PORT`].
    #[must_use]
    pub fn new(peer: PeerSettings) -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            peer,
        }
    }
}
