//! Service entry-point: loads configuration, installs logging and serves
//! the HTTP API.

mod server;

use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use dataproc::config::PeerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let peer = PeerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load peer settings: {e}")))?;

    create_server(ServerConfig::new(peer))?.await
}
