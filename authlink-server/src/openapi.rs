//! OpenAPI documentation configuration
//!
//! Generates OpenAPI 3.0 specification for the Authlink verification API.

use utoipa::OpenApi;

use crate::handlers::health::{HealthResponse, ReadyResponse};

/// Authlink Verification API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Authlink Verification API",
        version = "0.1.0",
        description = r#"
## Dual-Factor Product Verification API

Authlink authenticates NFC-tagged physical products by combining two
independent trust authorities:

- **SDM tag verification** - cryptographic validation of the tag's
  (uid, ctr, cmac) triple by the secure-messaging backend
- **Registry verification** - Solana-backed ledger check that the tag
  identifier maps to a registered, authentic product

### How It Works

1. A scanned tag presents `uid`, `ctr` and `cmac` in its URL
2. `GET /verify` runs the tag check, then (only on success) the registry check
3. The response is a composite verdict: `success` is true iff both pass
4. Partial failures are preserved in the verdict, never discarded
"#,
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/authlink/authlink-verify/blob/main/LICENSE"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Verification", description = "Dual-factor and legacy tag-only product verification"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::verify::verify_handler,
        crate::handlers::verify::verify_tag_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
        )
    )
)]
pub struct ApiDoc;
