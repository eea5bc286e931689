//! Peer service configuration loaded via OrthoConfig.
//!
//! Values come from `SERVICE1_*` environment variables or the matching CLI
//! flags, falling back to local development defaults.

use std::num::NonZeroUsize;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::DEFAULT_LOOKUP_CONCURRENCY;

const DEFAULT_PEER_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for reaching the peer user service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVICE1")]
pub struct PeerSettings {
    /// Base URL of the peer service.
    pub url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
    /// Maximum concurrent age lookups while computing analytics.
    pub concurrency: Option<usize>,
}

impl PeerSettings {
    /// Return the configured base URL text, falling back to the default.
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_PEER_URL)
    }

    /// Parse the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not an absolute
    /// URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.url())
    }

    /// Return the per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Return the analytics lookup concurrency; zero is raised to one.
    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
            .map_or(DEFAULT_LOOKUP_CONCURRENCY, |value| {
                NonZeroUsize::new(value).unwrap_or(NonZeroUsize::MIN)
            })
    }
}
