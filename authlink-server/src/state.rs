//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use authlink_core::Verifier;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Dual-factor verification orchestrator
    pub verifier: Arc<Verifier>,
}

impl AppState {
    pub fn new(verifier: Arc<Verifier>) -> Self {
        Self { verifier }
    }
}
