use smsgate_handler::{ExchangeError, HandlerError};
use thiserror::Error;

/// Errors specific to the Hormuud handler.
///
/// Converted into [`HandlerError`] at the handler trait boundary.
#[derive(Debug, Error)]
pub enum HormuudError {
    /// The channel is missing a required credential.
    #[error("{0}")]
    Config(String),

    /// The provider could not be reached or answered with a non-2xx status.
    #[error(transparent)]
    Transport(#[from] ExchangeError),

    /// The provider answered 2xx with a body we could not use.
    #[error("{0}")]
    Protocol(String),

    /// An inbound webhook payload is missing or has an invalid field.
    #[error("{0}")]
    Validation(String),

    /// The HTTP client or a request could not be constructed.
    #[error("unable to build request: {0}")]
    Request(#[from] reqwest::Error),
}

impl From<HormuudError> for HandlerError {
    fn from(err: HormuudError) -> Self {
        match err {
            HormuudError::Config(msg) => HandlerError::Config(msg),
            HormuudError::Transport(e) => HandlerError::Transport(e.to_string()),
            HormuudError::Protocol(msg) => HandlerError::Protocol(msg),
            HormuudError::Validation(msg) => HandlerError::Validation(msg),
            HormuudError::Request(e) => HandlerError::Config(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_maps_to_config() {
        let err: HandlerError =
            HormuudError::Config("Missing 'username' config for HM channel".into()).into();
        assert!(matches!(err, HandlerError::Config(ref m) if m.contains("'username'")));
        assert!(!err.is_retryable());
    }

    #[test]
    fn transport_error_is_retryable() {
        let err: HandlerError = HormuudError::from(ExchangeError::Status(503)).into();
        assert!(matches!(err, HandlerError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            HormuudError::Protocol("no access token returned".into()).to_string(),
            "no access token returned"
        );
        assert_eq!(
            HormuudError::from(ExchangeError::Status(500)).to_string(),
            "received non 200 status: 500"
        );
    }
}
