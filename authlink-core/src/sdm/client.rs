//! HTTP client for the SDM tag verification backend.
//!
//! Calls `GET {base}tagpt?uid=..&ctr=..&cmac=..` and maps the JSON
//! response to a [`TagVerification`]. The response is either
//! `{uid, read_ctr, enc_mode}` on success or `{error}` on rejection.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::TagVerifier;
use crate::error::{AuthlinkError, Result};
use crate::types::{NfcData, TagVerification};

/// Default SDM backend base URL (trailing slash included, endpoint
/// paths are appended directly).
const DEFAULT_API_URL: &str = "http://localhost:3001/api/";

/// Default timeout for verification requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the SDM verification client.
#[derive(Debug, Clone)]
pub struct SdmConfig {
    /// Base URL of the SDM backend.
    pub api_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for SdmConfig {
    fn default() -> Self {
        Self {
            api_url: std::env::var("SDM_BACKEND").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Response body from the SDM `tagpt` endpoint.
///
/// A rejection carries an `error` field; a success carries the echoed
/// tag data. `Error` must be tried first so a body with both shapes
/// never masks a verifier-supplied rejection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagptResponse {
    Error { error: String },
    Success(NfcData),
}

/// HTTP client for the SDM tag verification backend.
pub struct SdmClient {
    client: Client,
    config: SdmConfig,
}

impl SdmClient {
    /// Create a new SDM client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(SdmConfig::default())
    }

    /// Create a new SDM client with custom configuration.
    #[instrument(level = "debug", skip_all, fields(
        api_url = %config.api_url,
        timeout_ms = config.timeout.as_millis() as u64
    ))]
    pub fn with_config(config: SdmConfig) -> Result<Self> {
        Url::parse(&config.api_url)
            .map_err(|e| AuthlinkError::ConfigError(format!("Invalid SDM backend URL: {e}")))?;

        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            warn!(error = %e, "Failed to create HTTP client");
            AuthlinkError::ConfigError(format!("Failed to create HTTP client: {e}"))
        })?;

        debug!("SDM client created");
        Ok(Self { client, config })
    }
}

#[async_trait]
impl TagVerifier for SdmClient {
    /// Verify a tag read with the SDM backend.
    ///
    /// Transport failures and non-2xx statuses become
    /// [`TagVerification::Rejected`] with a transport-error description:
    /// a stale or unverifiable counter state is never treated as success.
    #[instrument(level = "info", skip(self, cmac), fields(uid = %uid, ctr = %ctr))]
    async fn verify_tag(&self, uid: &str, ctr: &str, cmac: &str) -> Result<TagVerification> {
        let start = Instant::now();
        let url = format!("{}tagpt", self.config.api_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("uid", uid), ("ctr", ctr), ("cmac", cmac)])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    error = %e,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "SDM request failed"
                );
                return Ok(TagVerification::Rejected {
                    reason: format!("SDM request failed: {e}"),
                });
            }
        };

        let status = response.status();
        debug!(status = %status, "Received SDM response");

        if !status.is_success() {
            warn!(
                status = %status,
                latency_ms = start.elapsed().as_millis() as u64,
                "SDM backend returned error status"
            );
            return Ok(TagVerification::Rejected {
                reason: format!(
                    "Error {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("unknown")
                ),
            });
        }

        let payload: TagptResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse SDM response");
            AuthlinkError::MalformedResponse(format!("Failed to parse SDM response: {e}"))
        })?;

        let latency_ms = start.elapsed().as_millis() as u64;
        match payload {
            TagptResponse::Error { error } => {
                info!(latency_ms, reason = %error, "Tag rejected by SDM backend");
                Ok(TagVerification::Rejected { reason: error })
            }
            TagptResponse::Success(data) => {
                info!(latency_ms, read_ctr = data.read_ctr, "Tag verified by SDM backend");
                Ok(TagVerification::Verified(data))
            }
        }
    }
}
