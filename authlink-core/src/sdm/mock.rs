//! Mock tag verifier for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::TagVerifier;
use crate::error::{AuthlinkError, Result};
use crate::types::{NfcData, TagVerification};

enum MockOutcome {
    Verified(NfcData),
    Rejected(String),
    /// Simulates an exceptional failure (e.g. malformed response body).
    Fail(String),
}

/// Programmable tag verifier for tests.
///
/// Returns a fixed outcome and counts invocations, so tests can assert
/// both the verdict and whether the verifier was consulted at all.
pub struct MockTagVerifier {
    outcome: MockOutcome,
    calls: AtomicUsize,
}

impl MockTagVerifier {
    /// Mock that accepts every read with the given echoed tag data.
    pub fn verified(data: NfcData) -> Self {
        Self {
            outcome: MockOutcome::Verified(data),
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock that rejects every read with the given reason.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Rejected(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Mock that fails with a malformed-response error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: MockOutcome::Fail(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times `verify_tag` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagVerifier for MockTagVerifier {
    async fn verify_tag(&self, _uid: &str, _ctr: &str, _cmac: &str) -> Result<TagVerification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            MockOutcome::Verified(data) => Ok(TagVerification::Verified(data.clone())),
            MockOutcome::Rejected(reason) => Ok(TagVerification::Rejected {
                reason: reason.clone(),
            }),
            MockOutcome::Fail(message) => Err(AuthlinkError::MalformedResponse(message.clone())),
        }
    }
}
