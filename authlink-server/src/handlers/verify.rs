//! Product verification handlers
//!
//! Exposes the dual-factor orchestrator as `GET /verify` and the legacy
//! single-stage tag check as `GET /verify/tag`. Both take the three
//! tokens from the scanned tag URL as query parameters.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use authlink_core::{TagVerification, VerificationResult};

use crate::state::AppState;

/// Query parameters presented by a scanned NFC tag.
///
/// All three are required for a successful verification, but they are
/// modeled as optional here: a missing parameter yields a structured
/// negative verdict, not an HTTP-level rejection, matching the original
/// dashboard behavior.
#[derive(Debug, Deserialize, IntoParams)]
pub struct VerifyParams {
    /// Unique tag identifier
    pub uid: Option<String>,
    /// Monotonic read counter from the tag
    pub ctr: Option<String>,
    /// Cryptographic message authentication code
    pub cmac: Option<String>,
}

/// GET /verify - Dual-factor product verification
///
/// Runs the cryptographic tag check and the registry check in sequence
/// and returns the composite verdict. Always responds with 200; the
/// verdict carries its own `success` flag and stage-tagged `error`.
#[utoipa::path(
    get,
    path = "/verify",
    tag = "Verification",
    params(VerifyParams),
    responses(
        (status = 200, description = "Composite verification verdict (success, nfcVerified, blockchainVerified, nfcData?, blockchainData?, error?)")
    )
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Json<VerificationResult> {
    let uid = params.uid.unwrap_or_default();
    let ctr = params.ctr.unwrap_or_default();
    let cmac = params.cmac.unwrap_or_default();

    let result = state.verifier.verify(&uid, &ctr, &cmac).await;
    Json(result)
}

/// GET /verify/tag - Legacy single-stage tag verification
///
/// Checks only the SDM backend, never consulting the registry. Returns
/// `{"result": {uid, read_ctr, enc_mode}}` on success or `{"error": ..}`
/// otherwise, the original tag-only response shape.
#[utoipa::path(
    get,
    path = "/verify/tag",
    tag = "Verification",
    params(VerifyParams),
    responses(
        (status = 200, description = "Tag verification outcome ({result} or {error})")
    )
)]
pub async fn verify_tag_handler(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Json<Value> {
    let uid = params.uid.unwrap_or_default();
    let ctr = params.ctr.unwrap_or_default();
    let cmac = params.cmac.unwrap_or_default();

    let body = match state.verifier.verify_tag_only(&uid, &ctr, &cmac).await {
        Ok(TagVerification::Verified(data)) => json!({ "result": data }),
        Ok(TagVerification::Rejected { reason }) => json!({ "error": reason }),
        Err(e) => json!({ "error": e.to_string() }),
    };
    Json(body)
}
