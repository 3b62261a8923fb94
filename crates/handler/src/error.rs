use smsgate_core::DeliveryStatus;
use thiserror::Error;

/// Errors that can occur during channel handler operations.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler is registered for the channel type.
    #[error("handler not found: {0}")]
    NotFound(String),

    /// The channel is missing required configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The provider could not be reached or answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a malformed or unexpected body.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An inbound payload failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

impl HandlerError {
    /// Returns `true` if the error is transient and the operation may succeed
    /// if the caller tries again later. Handlers never retry on their own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Returned by a send when not a single provider exchange could be attempted.
///
/// Still carries the (errored, diagnostic-free) status so the gateway can
/// record the attempt.
#[derive(Debug, Error)]
#[error("unable to send message: {source}")]
pub struct DeliveryError {
    pub status: DeliveryStatus,
    pub source: HandlerError,
}

impl DeliveryError {
    #[must_use]
    pub fn new(status: DeliveryStatus, source: HandlerError) -> Self {
        Self { status, source }
    }

    /// Consume the error, keeping only the status.
    #[must_use]
    pub fn into_status(self) -> DeliveryStatus {
        self.status
    }
}
