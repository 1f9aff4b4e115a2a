//! Error types for talkbridge operations.

use thiserror::Error;

/// Result type alias for talkbridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Required configuration is missing or invalid. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Outbound delivery to the Talk bot API failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Failure modes of a single delivery attempt.
///
/// A delivery either succeeds or terminates with exactly one of these; no
/// variant triggers a retry and none escapes the delivery client as a panic.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Could not construct the HTTP client.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Network-level failure: connection refused, DNS failure, or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote responded, but the body was not valid JSON.
    #[error("Invalid response from Talk API: {0}")]
    InvalidResponse(String),

    /// The remote responded with JSON but did not accept the message.
    #[error("Error {status}: {body}")]
    Rejected { status: u16, body: String },
}
