use std::time::Duration;

use roster_core::{FailureKind, User};
use roster_logging::roster_debug;

use crate::types::TransportError;

/// Maximum number of body characters echoed into an HTTP error message.
const BODY_EXCERPT_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// One immediate retry of the idempotent GET when the connection itself
    /// fails. Never fires after bytes have been exchanged, and is distinct
    /// from the fetch pipeline, which has no retry logic of its own.
    pub retry_on_connection_failure: bool,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            retry_on_connection_failure: true,
        }
    }
}

/// One network call against the fixed users endpoint.
#[async_trait::async_trait]
pub trait UserTransport: Send + Sync {
    async fn get_users(&self) -> Result<Vec<User>, TransportError>;
}

/// Long-lived HTTP client for the users endpoint.
///
/// Construct once per process and share; the inner `reqwest::Client` pools
/// connections internally.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    users_url: reqwest::Url,
    retry_on_connection_failure: bool,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, settings: TransportSettings) -> Result<Self, TransportError> {
        let mut base = reqwest::Url::parse(base_url)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;
        // Url::join treats a base without a trailing slash as a file
        // segment and would drop the last path element.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        let users_url = base
            .join("users")
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            users_url,
            retry_on_connection_failure: settings.retry_on_connection_failure,
        })
    }

    async fn send(&self) -> Result<reqwest::Response, reqwest::Error> {
        match self.client.get(self.users_url.clone()).send().await {
            Err(err) if err.is_connect() && self.retry_on_connection_failure => {
                roster_debug!("connection to {} failed, retrying once: {err}", self.users_url);
                self.client.get(self.users_url.clone()).send().await
            }
            other => other,
        }
    }
}

#[async_trait::async_trait]
impl UserTransport for ReqwestTransport {
    async fn get_users(&self) -> Result<Vec<User>, TransportError> {
        let response = self.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(http_status_error(status.as_u16(), &body));
        }

        let users = response.json::<Vec<User>>().await.map_err(|err| {
            if err.is_decode() {
                TransportError::new(FailureKind::Decode, err.to_string())
            } else {
                map_reqwest_error(err)
            }
        })?;
        roster_debug!("fetched {} users from {}", users.len(), self.users_url);
        Ok(users)
    }
}

fn http_status_error(code: u16, body: &str) -> TransportError {
    let mut message = format!("HTTP {code}");
    let excerpt: String = body.trim().chars().take(BODY_EXCERPT_LIMIT).collect();
    if !excerpt.is_empty() {
        message.push_str(": ");
        message.push_str(&excerpt);
    }
    TransportError::new(FailureKind::HttpStatus(code), message)
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::Decode, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}
