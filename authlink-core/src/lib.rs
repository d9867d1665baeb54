//! Authlink Core - dual-factor product verification pipeline
//!
//! This crate coordinates the two trust authorities behind Authlink
//! product authentication:
//!
//! - the **SDM backend**, which cryptographically validates the
//!   (uid, ctr, cmac) triple presented by a scanned NFC tag, and
//! - the **registry backend**, the Solana-backed service of record for
//!   product ownership and authenticity.
//!
//! The [`Verifier`] sequences both checks and merges their outcomes into
//! a single [`VerificationResult`] with well-defined partial-failure
//! semantics: a tag rejection short-circuits the registry lookup, a
//! negative registry verdict preserves the tag-stage success, and a
//! failed detail fetch degrades softly instead of failing the verdict.
//!
//! # Example
//!
//! ```no_run
//! use authlink_core::{RegistryConfig, SdmConfig, Verifier};
//!
//! # async fn example() -> authlink_core::Result<()> {
//! let verifier = Verifier::from_configs(SdmConfig::default(), RegistryConfig::default())?;
//!
//! let result = verifier.verify("TAG123", "5", "ABCDEF").await;
//! if result.success {
//!     println!("authentic: {:?}", result.blockchain_data);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod registry;
pub mod sdm;
pub mod types;
pub mod verify;

// Re-export main types for convenience
pub use error::{AuthlinkError, Result};
pub use registry::{HttpRegistryClient, MockRegistryClient, RegistryClient, RegistryConfig};
pub use sdm::{MockTagVerifier, SdmClient, SdmConfig, TagVerifier};
pub use types::{
    NfcData, ProductRecord, RegistryVerification, TagVerification, VerificationResult,
};
pub use verify::Verifier;
