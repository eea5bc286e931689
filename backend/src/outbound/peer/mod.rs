//! Peer service outbound adapter.
//!
//! This module provides a thin HTTP implementation of the [`PeerService`]
//! port.
//!
//! [`PeerService`]: crate::domain::ports::PeerService

mod dto;
mod http_client;

pub use http_client::PeerHttpClient;
