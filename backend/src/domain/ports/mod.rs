//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`PeerOperations`]) are implemented
//! by domain services and consumed by inbound adapters. Driven ports
//! ([`RecordStore`], [`PeerService`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod analytics_query;
mod peer_operations;
mod peer_service;
mod processed_users_command;
mod processed_users_query;
mod record_store;

pub use analytics_query::AnalyticsQuery;
pub use peer_operations::PeerOperations;
#[cfg(test)]
pub use peer_service::MockPeerService;
pub use peer_service::{PeerService, PeerServiceError};
pub use processed_users_command::ProcessedUsersCommand;
pub use processed_users_query::ProcessedUsersQuery;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{RecordStore, RecordStoreError};
