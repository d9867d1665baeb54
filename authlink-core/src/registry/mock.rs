//! Mock registry client for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::RegistryClient;
use crate::error::{AuthlinkError, Result};
use crate::types::{ProductRecord, RegistryVerification};

enum MockOutcome {
    Outcome(RegistryVerification),
    /// Simulates an exceptional failure (e.g. malformed response body).
    Fail(String),
}

/// Programmable registry client for tests.
///
/// Returns a fixed outcome and counts invocations, so tests can assert
/// the short-circuit rule (the registry is never consulted when the tag
/// check fails).
pub struct MockRegistryClient {
    outcome: MockOutcome,
    calls: AtomicUsize,
}

impl MockRegistryClient {
    /// Mock reporting an authentic product with full details.
    pub fn authentic(product: ProductRecord) -> Self {
        let outcome = RegistryVerification {
            success: true,
            is_authentic: true,
            nfc_id: product.nfc_id.clone(),
            product_account: Some(product.product_account.clone()),
            product: Some(product),
        };
        Self::with_outcome(outcome)
    }

    /// Mock reporting authentic but with the detail fetch failed
    /// (soft degradation: `product` stays absent).
    pub fn authentic_without_details(nfc_id: impl Into<String>) -> Self {
        Self::with_outcome(RegistryVerification {
            success: true,
            is_authentic: true,
            nfc_id: nfc_id.into(),
            product_account: None,
            product: None,
        })
    }

    /// Mock reporting a found but not authentic product.
    pub fn not_authentic(nfc_id: impl Into<String>) -> Self {
        Self::with_outcome(RegistryVerification {
            success: true,
            is_authentic: false,
            nfc_id: nfc_id.into(),
            product_account: None,
            product: None,
        })
    }

    /// Mock simulating an unreachable registry.
    pub fn unavailable(nfc_id: impl Into<String>) -> Self {
        Self::with_outcome(RegistryVerification::unavailable(nfc_id))
    }

    /// Mock failing with a malformed-response error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock returning an explicit outcome.
    pub fn with_outcome(outcome: RegistryVerification) -> Self {
        Self {
            outcome: MockOutcome::Outcome(outcome),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `verify_product` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RegistryClient for MockRegistryClient {
    async fn verify_product(&self, _nfc_id: &str) -> Result<RegistryVerification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MockOutcome::Outcome(outcome) => Ok(outcome.clone()),
            MockOutcome::Fail(message) => Err(AuthlinkError::MalformedResponse(message.clone())),
        }
    }
}
