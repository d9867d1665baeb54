//! HTTP client for the Solana-backed product registry.
//!
//! Two sequential calls: `GET {base}/products/verify/{uid}` decides
//! authenticity, and `GET {base}/products/{uid}` fetches the on-ledger
//! product record when the first call reports authentic.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::RegistryClient;
use crate::error::{AuthlinkError, Result};
use crate::types::{ProductRecord, RegistryVerification};

/// Default registry backend base URL.
const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Default timeout for registry requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the registry verification client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Base URL of the registry backend.
    pub api_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            api_url: std::env::var("SOLANA_BACKEND")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Body of the `/products/verify/{uid}` response.
///
/// Lenient on purpose: a missing `isAuthentic` means "not authentic".
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    is_authentic: bool,
    #[serde(default)]
    product_account: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Body of the `/products/{uid}` response.
#[derive(Debug, Deserialize)]
struct ProductDetailsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    product: Option<ProductRecord>,
}

/// HTTP client for the registry backend.
pub struct HttpRegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl HttpRegistryClient {
    /// Create a new registry client with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry client with custom configuration.
    #[instrument(level = "debug", skip_all, fields(
        api_url = %config.api_url,
        timeout_ms = config.timeout.as_millis() as u64
    ))]
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        Url::parse(&config.api_url).map_err(|e| {
            AuthlinkError::ConfigError(format!("Invalid registry backend URL: {e}"))
        })?;

        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            warn!(error = %e, "Failed to create HTTP client");
            AuthlinkError::ConfigError(format!("Failed to create HTTP client: {e}"))
        })?;

        debug!("Registry client created");
        Ok(Self { client, config })
    }

    /// Fetch the on-ledger product record for an authentic tag.
    ///
    /// Failures here are logged and swallowed: the authenticity verdict
    /// already stands, the caller just sees `product` absent.
    async fn fetch_product_details(&self, nfc_id: &str) -> Option<ProductRecord> {
        let url = format!("{}/products/{}", self.config.api_url, nfc_id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Product detail fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Product detail fetch returned error status");
            return None;
        }

        match response.json::<ProductDetailsResponse>().await {
            Ok(details) if details.success => details.product,
            Ok(_) => {
                warn!("Product detail fetch reported success=false");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to parse product details");
                None
            }
        }
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    /// Verify a tag identifier on the registry.
    ///
    /// Transport failures and non-2xx statuses yield a negative outcome
    /// with `success = false`, not an error; the registry does not
    /// distinguish "not found" from "unreachable" for the caller.
    #[instrument(level = "info", skip(self), fields(nfc_id = %nfc_id))]
    async fn verify_product(&self, nfc_id: &str) -> Result<RegistryVerification> {
        let start = Instant::now();
        let url = format!("{}/products/verify/{}", self.config.api_url, nfc_id);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    error = %e,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Registry request failed"
                );
                return Ok(RegistryVerification::unavailable(nfc_id));
            }
        };

        let status = response.status();
        debug!(status = %status, "Received registry response");

        if !status.is_success() {
            warn!(
                status = %status,
                latency_ms = start.elapsed().as_millis() as u64,
                "Registry returned error status"
            );
            return Ok(RegistryVerification::unavailable(nfc_id));
        }

        let payload: VerifyResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse registry response");
            AuthlinkError::MalformedResponse(format!("Failed to parse registry response: {e}"))
        })?;

        if let Some(error) = &payload.error {
            warn!(error = %error, "Registry reported an error");
        }

        let mut outcome = RegistryVerification {
            success: payload.success,
            is_authentic: payload.is_authentic,
            nfc_id: nfc_id.to_string(),
            product_account: payload.product_account,
            product: None,
        };

        if outcome.is_authentic {
            outcome.product = self.fetch_product_details(nfc_id).await;
        }

        info!(
            latency_ms = start.elapsed().as_millis() as u64,
            is_authentic = outcome.is_authentic,
            has_product = outcome.product.is_some(),
            "Registry verification completed"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.api_url.is_empty());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let client = HttpRegistryClient::with_config(RegistryConfig {
            api_url: "not a url".into(),
            timeout: DEFAULT_TIMEOUT,
        });
        assert!(matches!(client, Err(AuthlinkError::ConfigError(_))));
    }

    #[test]
    fn test_parse_verify_response() {
        let body = r#"{"success":true,"isAuthentic":true,"productAccount":"acct1"}"#;
        let parsed: VerifyResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert!(parsed.is_authentic);
        assert_eq!(parsed.product_account.as_deref(), Some("acct1"));
    }

    #[test]
    fn test_missing_is_authentic_means_not_authentic() {
        let body = r#"{"success":true}"#;
        let parsed: VerifyResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert!(!parsed.is_authentic);
    }

    #[test]
    fn test_parse_product_details_response() {
        let body = r#"{
            "success": true,
            "product": {
                "owner": "ownerX",
                "nfcId": "TAG123",
                "productId": "PRD-001",
                "productAccount": "acct1"
            }
        }"#;
        let parsed: ProductDetailsResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.product.unwrap().product_id, "PRD-001");
    }
}
