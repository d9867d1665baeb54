//! Secure Dynamic Messaging (SDM) tag verification.
//!
//! NTAG 424 DNA tags embed a unique identifier, a monotonic read counter
//! and a CMAC in the URL they present on scan. The SDM backend owns the
//! cryptography; this module only carries the three tokens to it and
//! reports the verdict.
//!
//! Results are never cached and never retried: the counter is single-use
//! in spirit, and a blind retry could mask a replay.

mod client;
mod mock;

pub use client::{SdmClient, SdmConfig};
pub use mock::MockTagVerifier;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::TagVerification;

/// Trait for cryptographic tag verifiers.
///
/// Ordinary negative outcomes (rejection, unreachable backend) are
/// returned as [`TagVerification::Rejected`]; only truly exceptional
/// conditions such as a malformed response body surface as `Err`.
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait TagVerifier: Send + Sync {
    /// Check a scanned (uid, ctr, cmac) triple against the verifier.
    ///
    /// The caller validates parameter presence before invoking this;
    /// implementations may assume all three values are non-empty.
    async fn verify_tag(&self, uid: &str, ctr: &str, cmac: &str) -> Result<TagVerification>;
}
