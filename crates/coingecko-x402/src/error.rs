use thiserror::Error;

/// Errors returned by x402 operations.
#[derive(Debug, Error)]
pub enum X402Error {
    #[error("signature error: {0}")]
    SignatureError(String),

    #[error("invalid payment: {0}")]
    InvalidPayment(String),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("http error: {0}")]
    HttpError(String),

    #[error("invalid payment required response: {0}")]
    PaymentRequiredParse(String),

    #[error("Request failed with status {0}")]
    RequestStatus(u16),

    #[error("Paid request failed with status {0}")]
    PaidRequestStatus(u16),

    #[error("Response body is not valid JSON")]
    InvalidJson,

    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
