//! Dual-factor verification orchestrator.
//!
//! Sequences the cryptographic tag check and the ledger registry check
//! into a single composite verdict. The tag check always runs first and
//! gates the registry lookup: the cheap, tag-scoped cryptographic check
//! bounds cost and avoids leaking registry queries for bogus tags. The
//! two stages are never reordered or run concurrently.
//!
//! [`Verifier::verify`] is this subsystem's error boundary: it always
//! returns a fully-populated [`VerificationResult`] and never propagates
//! an error to its caller.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{AuthlinkError, Result};
use crate::registry::{HttpRegistryClient, RegistryClient, RegistryConfig};
use crate::sdm::{SdmClient, SdmConfig, TagVerifier};
use crate::types::{TagVerification, VerificationResult};

/// Dual-factor product verifier.
///
/// Holds the two trust authorities behind trait objects so tests (and
/// alternative deployments) can substitute either one.
pub struct Verifier {
    tag_verifier: Arc<dyn TagVerifier>,
    registry: Arc<dyn RegistryClient>,
}

impl Verifier {
    /// Create a verifier from explicit client implementations.
    pub fn new(tag_verifier: Arc<dyn TagVerifier>, registry: Arc<dyn RegistryClient>) -> Self {
        Self {
            tag_verifier,
            registry,
        }
    }

    /// Create a verifier backed by the HTTP clients.
    pub fn from_configs(sdm: SdmConfig, registry: RegistryConfig) -> Result<Self> {
        Ok(Self::new(
            Arc::new(SdmClient::with_config(sdm)?),
            Arc::new(HttpRegistryClient::with_config(registry)?),
        ))
    }

    /// Verify a scanned tag read against both trust authorities.
    ///
    /// `success` is true iff the SDM backend accepted the (uid, ctr,
    /// cmac) triple and the registry reported the uid authentic. Every
    /// failure path yields a result with exactly one stage-tagged error
    /// message; partial success (tag verified, registry failed) is
    /// preserved in the flags rather than discarded.
    #[instrument(level = "info", skip(self, cmac), fields(uid = %uid, ctr = %ctr))]
    pub async fn verify(&self, uid: &str, ctr: &str, cmac: &str) -> VerificationResult {
        if uid.is_empty() || ctr.is_empty() || cmac.is_empty() {
            warn!("Verification request with missing parameters");
            return VerificationResult::rejected(AuthlinkError::MissingParameters.to_string());
        }

        // Stage 1: cryptographic tag check. A rejection short-circuits;
        // the registry is never consulted for a tag that fails here.
        let nfc_data = match self.tag_verifier.verify_tag(uid, ctr, cmac).await {
            Ok(TagVerification::Verified(data)) => data,
            Ok(TagVerification::Rejected { reason }) => {
                info!(reason = %reason, "Tag verification rejected");
                return VerificationResult::rejected(
                    AuthlinkError::NfcVerificationFailed(reason).to_string(),
                );
            }
            Err(e) => {
                warn!(error = %e, "Tag verification failed unexpectedly");
                return VerificationResult::rejected(e.to_string());
            }
        };

        let mut result = VerificationResult {
            success: false,
            nfc_verified: true,
            blockchain_verified: false,
            nfc_data: Some(nfc_data),
            blockchain_data: None,
            error: None,
        };

        // Stage 2: registry check with the same uid.
        let registry_outcome = match self.registry.verify_product(uid).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Registry verification failed unexpectedly");
                result.error = Some(e.to_string());
                return result;
            }
        };

        if !registry_outcome.success || !registry_outcome.is_authentic {
            info!(
                registry_success = registry_outcome.success,
                "Registry verification negative"
            );
            result.blockchain_data = Some(registry_outcome);
            result.error = Some(
                AuthlinkError::BlockchainVerificationFailed(
                    "Product not found or not authentic".into(),
                )
                .to_string(),
            );
            return result;
        }

        result.blockchain_verified = true;
        result.blockchain_data = Some(registry_outcome);
        result.success = true;

        info!("Product verified on both factors");
        result
    }

    /// Legacy single-stage verification: checks only the SDM backend,
    /// never consulting the registry. Kept for tag-provisioning flows
    /// that predate the registry; new callers should use [`verify`].
    ///
    /// [`verify`]: Verifier::verify
    #[instrument(level = "info", skip(self, cmac), fields(uid = %uid, ctr = %ctr))]
    pub async fn verify_tag_only(&self, uid: &str, ctr: &str, cmac: &str) -> Result<TagVerification> {
        if uid.is_empty() || ctr.is_empty() || cmac.is_empty() {
            return Err(AuthlinkError::MissingParameters);
        }
        self.tag_verifier.verify_tag(uid, ctr, cmac).await
    }
}
