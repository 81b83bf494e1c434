//! Blocking HTTP client for the notarization service.

use crate::{Credential, NotarizationError, NotarizeRequest, NotaryClient, Receipt};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Production notarization endpoint.
pub const DEFAULT_API_URL: &str = "https://notary-api.agentsystems.ai/v1/notary";

/// Header that carries the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Notary client that POSTs JSON to the service endpoint.
pub struct HttpNotaryClient {
    api_url: String,
    credential: Credential,
    http_client: reqwest::blocking::Client,
}

impl HttpNotaryClient {
    /// Creates a client with an overall per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is empty or the HTTP client cannot be
    /// initialized.
    pub fn new(
        api_url: impl Into<String>,
        credential: Credential,
        timeout: Duration,
    ) -> Result<Self, NotarizationError> {
        let api_url = api_url.into();
        if api_url.trim().is_empty() {
            return Err(NotarizationError::ClientBuild(
                "api_url must not be empty".to_string(),
            ));
        }

        let http_client = reqwest::blocking::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|error| NotarizationError::ClientBuild(error.to_string()))?;

        Ok(Self {
            api_url,
            credential,
            http_client,
        })
    }

    /// Endpoint this client posts to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

impl std::fmt::Debug for HttpNotaryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpNotaryClient")
            .field("api_url", &self.api_url)
            .field("credential", &self.credential)
            .finish()
    }
}

impl NotaryClient for HttpNotaryClient {
    fn notarize(&self, request: &NotarizeRequest) -> Result<Receipt, NotarizationError> {
        tracing::debug!(url = %self.api_url, hash = %request.hash, "submitting hash");
        let response = self
            .http_client
            .post(&self.api_url)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(&request.to_body())
            .send()
            .map_err(|error| {
                if error.is_timeout() {
                    NotarizationError::Timeout
                } else {
                    NotarizationError::Transport(error.to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "notary responded");
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            return Err(NotarizationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .map_err(|error| NotarizationError::InvalidResponse(error.to_string()))?;
        Receipt::from_response(&body).ok_or(NotarizationError::MissingReceipt)
    }
}
