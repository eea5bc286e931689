//! Harness for exercising the full HTTP surface over real sockets.
//!
//! Each test starts a stand-in peer service and the data processing app on
//! ephemeral ports inside the Actix test runtime. The app talks to the peer
//! through the real reqwest adapter.

use std::collections::HashSet;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use dataproc::Trace;
use dataproc::domain::{AgeResolver, AnalyticsService, PeerOperationsService, ProcessingService};
use dataproc::inbound::http::configure;
use dataproc::inbound::http::state::{HttpState, HttpStatePorts};
use dataproc::outbound::memory::InMemoryRecordStore;
use dataproc::outbound::peer::PeerHttpClient;

/// Base URL nothing listens on.
pub const UNREACHABLE_PEER: &str = "http://127.0.0.1:1";

/// Behaviour of the stand-in peer service.
#[derive(Debug, Clone, Default)]
pub struct PeerScript {
    /// Users returned by `GET /users` and, by id, `GET /users/{id}`.
    pub users: Vec<Value>,
    /// Ids whose `POST /process-user` submission is rejected with 422.
    pub reject_submissions: HashSet<i64>,
    /// Answer `/health` and `/users` with 503 and a JSON body.
    pub degraded: bool,
}

struct PeerState {
    script: PeerScript,
    submissions: Arc<AtomicUsize>,
}

async fn peer_health(state: web::Data<PeerState>) -> HttpResponse {
    if state.script.degraded {
        return HttpResponse::ServiceUnavailable().json(json!({"status": "degraded"}));
    }
    HttpResponse::Ok().json(json!({"status": "healthy", "service": "service1"}))
}

async fn peer_users(state: web::Data<PeerState>) -> HttpResponse {
    if state.script.degraded {
        return HttpResponse::ServiceUnavailable().json(json!({"detail": "maintenance"}));
    }
    HttpResponse::Ok().json(&state.script.users)
}

async fn peer_user(state: web::Data<PeerState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    match state.script.users.iter().find(|user| user["id"] == id) {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::NotFound().json(json!({"detail": "User not found"})),
    }
}

async fn peer_process(state: web::Data<PeerState>, user: web::Json<Value>) -> HttpResponse {
    let id = user["id"].as_i64().unwrap_or_default();
    if state.script.reject_submissions.contains(&id) {
        return HttpResponse::UnprocessableEntity().json(json!({"detail": "rejected"}));
    }
    state.submissions.fetch_add(1, Ordering::SeqCst);
    HttpResponse::Ok().json(json!({"message": "User processed successfully", "user_id": id}))
}

/// Running stand-in peer.
pub struct StubPeer {
    pub base_url: String,
    pub submissions: Arc<AtomicUsize>,
    handle: ServerHandle,
}

impl StubPeer {
    pub fn accepted_submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub async fn stop(&self) {
        self.handle.stop(true).await;
    }
}

/// Start the stand-in peer on an ephemeral port.
pub fn spawn_peer(script: PeerScript) -> StubPeer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind peer listener");
    let addr = listener.local_addr().expect("peer address");
    let submissions = Arc::new(AtomicUsize::new(0));
    let state = web::Data::new(PeerState {
        script,
        submissions: Arc::clone(&submissions),
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/health", web::get().to(peer_health))
            .route("/users", web::get().to(peer_users))
            .route("/users/{id}", web::get().to(peer_user))
            .route("/process-user", web::post().to(peer_process))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("peer listens")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    StubPeer {
        base_url: format!("http://{addr}"),
        submissions,
        handle,
    }
}

/// Running data processing app.
pub struct RunningApp {
    pub base_url: String,
    pub client: reqwest::Client,
    handle: ServerHandle,
}

impl RunningApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET completes")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST completes")
    }

    pub async fn post_empty(&self, path: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .send()
            .await
            .expect("POST completes")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE completes")
    }

    pub async fn stop(&self) {
        self.handle.stop(true).await;
    }
}

fn build_state(peer_url: &str) -> HttpState {
    let peer = Arc::new(
        PeerHttpClient::new(
            peer_url.parse().expect("valid peer url"),
            Duration::from_secs(2),
        )
        .expect("peer client builds"),
    );
    let store = Arc::new(InMemoryRecordStore::new());
    let processing = Arc::new(ProcessingService::new(store.clone(), Arc::new(DefaultClock)));
    HttpState::new(HttpStatePorts {
        processed_users: processing.clone(),
        processed_users_query: processing.clone(),
        analytics: Arc::new(AnalyticsService::new(store, AgeResolver::new(peer.clone()))),
        peer: Arc::new(PeerOperationsService::new(peer, processing)),
    })
}

/// Start the app against the peer at `peer_url`.
pub fn spawn_app(peer_url: &str) -> RunningApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind app listener");
    let addr = listener.local_addr().expect("app address");
    let state = web::Data::new(build_state(peer_url));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure)
    })
    .disable_signals()
    .workers(2)
    .listen(listener)
    .expect("app listens")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    RunningApp {
        base_url: format!("http://{addr}"),
        client: reqwest::Client::new(),
        handle,
    }
}

/// Raw user payload used across tests.
pub fn user(id: i64, name: &str, age: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "age": age,
    })
}
