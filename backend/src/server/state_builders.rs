//! Builders wiring outbound adapters into domain services and HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use dataproc::config::PeerSettings;
use dataproc::domain::{AgeResolver, AnalyticsService, PeerOperationsService, ProcessingService};
use dataproc::inbound::http::state::{HttpState, HttpStatePorts};
use dataproc::outbound::memory::InMemoryRecordStore;
use dataproc::outbound::peer::PeerHttpClient;

/// Build HTTP state over a fresh in-memory store and a peer client
/// configured from `settings`.
///
/// # Errors
/// Returns [`io::Error`] when the peer URL is invalid or the HTTP client
/// cannot be constructed.
pub fn build_http_state(settings: &PeerSettings) -> io::Result<web::Data<HttpState>> {
    let base_url = settings.base_url().map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid SERVICE1_URL {:?}: {err}", settings.url()),
        )
    })?;
    let peer = Arc::new(
        PeerHttpClient::new(base_url, settings.timeout())
            .map_err(|err| io::Error::other(format!("peer client construction failed: {err}")))?,
    );
    info!(
        peer_url = %peer.base_url(),
        timeout_secs = settings.timeout().as_secs(),
        concurrency = settings.concurrency().get(),
        "peer client configured"
    );

    let store = Arc::new(InMemoryRecordStore::new());
    let processing = Arc::new(ProcessingService::new(store.clone(), Arc::new(DefaultClock)));
    let analytics = Arc::new(AnalyticsService::with_concurrency(
        store,
        AgeResolver::new(peer.clone()),
        settings.concurrency(),
    ));
    let peer_operations = Arc::new(PeerOperationsService::new(peer, processing.clone()));

    Ok(web::Data::new(HttpState::new(HttpStatePorts {
        processed_users: processing.clone(),
        processed_users_query: processing,
        analytics,
        peer: peer_operations,
    })))
}
