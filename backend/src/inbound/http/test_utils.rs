//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::Trace;
use crate::domain::ports::MockPeerService;
use crate::domain::{AgeResolver, AnalyticsService, PeerOperationsService, ProcessingService};
use crate::inbound::http::configure;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryRecordStore;

/// Build handler state over a fresh in-memory store and the given peer mock.
pub fn test_state(peer: MockPeerService) -> HttpState {
    let store = Arc::new(InMemoryRecordStore::new());
    let peer = Arc::new(peer);
    let processing = Arc::new(ProcessingService::new(store.clone(), Arc::new(DefaultClock)));
    HttpState::new(HttpStatePorts {
        processed_users: processing.clone(),
        processed_users_query: processing.clone(),
        analytics: Arc::new(AnalyticsService::new(store, AgeResolver::new(peer.clone()))),
        peer: Arc::new(PeerOperationsService::new(peer, processing)),
    })
}

/// Build the full application around `state`, wrapped in [`Trace`].
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
}
