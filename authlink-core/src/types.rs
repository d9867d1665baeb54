//! Shared result model for the verification pipeline.
//!
//! Field names follow the wire format of the original Authlink dashboard
//! (`nfcVerified`, `blockchainVerified`, `isAuthentic`, ...) so downstream
//! consumers can render results without translation.

use serde::{Deserialize, Serialize};

/// NFC tag data echoed by the SDM verifier on a successful check.
///
/// `read_ctr` is the counter value accepted by the verifier, used by
/// callers for replay/monotonicity auditing. `enc_mode` names the
/// cryptographic profile (e.g. `"AES128"`) and is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfcData {
    pub uid: String,
    pub read_ctr: u64,
    pub enc_mode: String,
}

/// Outcome of the cryptographic tag check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagVerification {
    /// The SDM backend accepted the (uid, ctr, cmac) triple.
    Verified(NfcData),
    /// The check was rejected or the verifier was unreachable.
    /// A rejection is authoritative for this attempt; it is never retried.
    Rejected { reason: String },
}

/// Product metadata recorded on the registry ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub owner: String,
    pub nfc_id: String,
    pub product_id: String,
    pub product_account: String,
}

/// Outcome of the ledger-backed registry check.
///
/// `success = false` means the verify call itself failed (transport error
/// or non-success status); the registry does not distinguish "not found"
/// from "unreachable" for the caller, only the error text differs.
/// `product` is populated only when `is_authentic = true` and the detail
/// fetch succeeded; a failed detail fetch leaves `is_authentic = true`
/// with `product` absent (authentic, details pending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryVerification {
    pub success: bool,
    pub is_authentic: bool,
    pub nfc_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRecord>,
}

impl RegistryVerification {
    /// Negative outcome for a failed or unreachable verify call.
    pub fn unavailable(nfc_id: impl Into<String>) -> Self {
        Self {
            success: false,
            is_authentic: false,
            nfc_id: nfc_id.into(),
            product_account: None,
            product: None,
        }
    }
}

/// The composite verdict produced by the orchestrator.
///
/// Invariants:
/// - `success = true` iff `nfc_verified` and `blockchain_verified`;
/// - `nfc_data` is present iff `nfc_verified`;
/// - `blockchain_data` is present iff the registry call was attempted
///   (it never is when the tag check fails — short-circuit);
/// - `error` is set with a stage-tagged message iff `success = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub success: bool,
    pub nfc_verified: bool,
    pub blockchain_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfc_data: Option<NfcData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain_data: Option<RegistryVerification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    /// A failure before any external call was made.
    pub(crate) fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            nfc_verified: false,
            blockchain_verified: false,
            nfc_data: None,
            blockchain_data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> VerificationResult {
        VerificationResult {
            success: true,
            nfc_verified: true,
            blockchain_verified: true,
            nfc_data: Some(NfcData {
                uid: "TAG123".into(),
                read_ctr: 5,
                enc_mode: "AES128".into(),
            }),
            blockchain_data: Some(RegistryVerification {
                success: true,
                is_authentic: true,
                nfc_id: "TAG123".into(),
                product_account: Some("acct1".into()),
                product: Some(ProductRecord {
                    owner: "ownerX".into(),
                    nfc_id: "TAG123".into(),
                    product_id: "PRD-001".into(),
                    product_account: "acct1".into(),
                }),
            }),
            error: None,
        }
    }

    #[test]
    fn result_serializes_with_dashboard_field_names() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["nfcVerified"], true);
        assert_eq!(json["blockchainVerified"], true);
        assert_eq!(json["nfcData"]["read_ctr"], 5);
        assert_eq!(json["blockchainData"]["isAuthentic"], true);
        assert_eq!(json["blockchainData"]["product"]["productId"], "PRD-001");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn rejected_result_omits_optional_fields() {
        let result = VerificationResult::rejected("NFC verification failed: mac mismatch");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("nfcData").is_none());
        assert!(json.get("blockchainData").is_none());
        assert_eq!(json["error"], "NFC verification failed: mac mismatch");
    }

    #[test]
    fn unavailable_registry_outcome_is_not_authentic() {
        let outcome = RegistryVerification::unavailable("TAG123");
        assert!(!outcome.success);
        assert!(!outcome.is_authentic);
        assert!(outcome.product.is_none());
        assert!(outcome.product_account.is_none());
    }
}
