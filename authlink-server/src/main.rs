//! Authlink Server - REST API for dual-factor product verification
//!
//! Exposes authlink-core functionality via HTTP endpoints:
//! - GET /verify - Dual-factor verification (SDM + registry)
//! - GET /verify/tag - Legacy single-stage tag verification

use std::sync::Arc;

use authlink_core::Verifier;
use authlink_server::{create_router_with_config, AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let verifier = match Verifier::from_configs(config.sdm.clone(), config.registry.clone()) {
        Ok(verifier) => Arc::new(verifier),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create verifier");
            std::process::exit(1);
        }
    };

    let state = AppState::new(verifier);
    let app = create_router_with_config(&config, state);
    let addr = config.socket_addr();

    tracing::info!(
        sdm_backend = %config.sdm.api_url,
        registry_backend = %config.registry.api_url,
        "Authlink verification server starting"
    );
    tracing::info!("Listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Failed to bind {addr}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Resolves on ctrl-c or SIGTERM so in-flight verifications can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
