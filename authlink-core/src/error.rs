use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthlinkError {
    #[error("Missing required parameters (uid, ctr, or cmac)")]
    MissingParameters,

    #[error("NFC verification failed: {0}")]
    NfcVerificationFailed(String),

    #[error("Blockchain verification failed: {0}")]
    BlockchainVerificationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AuthlinkError>;
