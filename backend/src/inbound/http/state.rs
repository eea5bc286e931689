//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnalyticsQuery, PeerOperations, ProcessedUsersCommand, ProcessedUsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub processed_users: Arc<dyn ProcessedUsersCommand>,
    pub processed_users_query: Arc<dyn ProcessedUsersQuery>,
    pub analytics: Arc<dyn AnalyticsQuery>,
    pub peer: Arc<dyn PeerOperations>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub processed_users: Arc<dyn ProcessedUsersCommand>,
    pub processed_users_query: Arc<dyn ProcessedUsersQuery>,
    pub analytics: Arc<dyn AnalyticsQuery>,
    pub peer: Arc<dyn PeerOperations>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use dataproc::domain::{
    ///     AgeResolver, AnalyticsService, PeerOperationsService, ProcessingService,
    /// };
    /// use dataproc::inbound::http::state::{HttpState, HttpStatePorts};
    /// use dataproc::outbound::memory::InMemoryRecordStore;
    /// use dataproc::outbound::peer::PeerHttpClient;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryRecordStore::new());
    /// let peer = Arc::new(
    ///     PeerHttpClient::new(
    ///         "http://localhost:8000".parse().expect("valid url"),
    ///         std::time::Duration::from_secs(10),
    ///     )
    ///     .expect("client builds"),
    /// );
    /// let processing = Arc::new(ProcessingService::new(store.clone(), Arc::new(DefaultClock)));
    /// let state = HttpState::new(HttpStatePorts {
    ///     processed_users: processing.clone(),
    ///     processed_users_query: processing.clone(),
    ///     analytics: Arc::new(AnalyticsService::new(store, AgeResolver::new(peer.clone()))),
    ///     peer: Arc::new(PeerOperationsService::new(peer, processing)),
    /// });
    /// let _analytics = state.analytics.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            processed_users,
            processed_users_query,
            analytics,
            peer,
        } = ports;
        Self {
            processed_users,
            processed_users_query,
            analytics,
            peer,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
