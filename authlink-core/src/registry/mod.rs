//! Ledger-backed product registry verification.
//!
//! The registry is the Solana-backed service of record for product
//! ownership. This module asks it whether a tag identifier maps to a
//! registered, authentic product and fetches the product's on-ledger
//! metadata when it does.
//!
//! Each verification performs its own round trip. Ledger state changes
//! (e.g. an ownership transfer) must be observed immediately, so nothing
//! is cached across requests.

mod client;
mod mock;

pub use client::{HttpRegistryClient, RegistryConfig};
pub use mock::MockRegistryClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::RegistryVerification;

/// Trait for registry verification clients.
///
/// A failed or unreachable verify call is an ordinary negative outcome
/// (`success = false`, `is_authentic = false`), not an `Err`; only
/// exceptional conditions such as a malformed response body surface as
/// `Err`. Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Check a tag identifier against the registry, fetching product
    /// details when the registry reports it authentic.
    async fn verify_product(&self, nfc_id: &str) -> Result<RegistryVerification>;
}
