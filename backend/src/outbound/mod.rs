//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local record store
//! - **peer**: reqwest client for the peer user service
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod peer;
