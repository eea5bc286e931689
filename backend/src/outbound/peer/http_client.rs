//! Reqwest-backed peer service client.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding. Every call is a single attempt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::dto::PeerUserDto;
use crate::domain::UserId;
use crate::domain::ports::{PeerService, PeerServiceError};

/// Peer client issuing requests relative to one base URL.
#[derive(Debug, Clone)]
pub struct PeerHttpClient {
    client: Client,
    base: Url,
}

impl PeerHttpClient {
    /// Build a client using a reqwest client with an explicit request timeout.
    ///
    /// The timeout bounds each request end to end, connection included.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    ///
    /// use dataproc::outbound::peer::PeerHttpClient;
    ///
    /// let base = "http://localhost:8000".parse().expect("valid url");
    /// let client = PeerHttpClient::new(base, Duration::from_secs(10)).expect("client builds");
    /// assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    /// Base URL every request is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, PeerServiceError> {
        self.base.join(path).map_err(|error| {
            PeerServiceError::connection(format!("invalid peer endpoint {path}: {error}"))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, PeerServiceError> {
        let (status, body) = self.get_raw(path).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        decode(&body)
    }

    /// Decode the body without inspecting the status code.
    async fn get_any_json(&self, path: &str) -> Result<Value, PeerServiceError> {
        let (status, body) = self.get_raw(path).await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), path, "peer replied with non-success status");
        }
        decode(&body)
    }

    async fn get_raw(&self, path: &str) -> Result<(StatusCode, Vec<u8>), PeerServiceError> {
        let url = self.endpoint(path)?;
        debug!(%url, "peer GET");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl PeerService for PeerHttpClient {
    async fn fetch_user_age(&self, user_id: UserId) -> Result<f64, PeerServiceError> {
        let user: PeerUserDto = self.get_json(&format!("users/{user_id}")).await?;
        user.into_age().map_err(PeerServiceError::decode)
    }

    async fn health(&self) -> Result<Value, PeerServiceError> {
        self.get_any_json("health").await
    }

    async fn list_users(&self) -> Result<Vec<Value>, PeerServiceError> {
        self.get_json("users").await
    }

    async fn users_snapshot(&self) -> Result<Value, PeerServiceError> {
        self.get_any_json("users").await
    }

    async fn submit_user(&self, user: &Value) -> Result<(), PeerServiceError> {
        let url = self.endpoint("process-user")?;
        debug!(%url, "peer POST");
        let response = self
            .client
            .post(url)
            .json(user)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, PeerServiceError> {
    serde_json::from_slice(body).map_err(|error| {
        PeerServiceError::decode(format!("invalid peer JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> PeerServiceError {
    if error.is_timeout() {
        PeerServiceError::timeout(error.to_string())
    } else if error.is_decode() {
        PeerServiceError::decode(error.to_string())
    } else {
        PeerServiceError::connection(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PeerServiceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    PeerServiceError::bad_status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
