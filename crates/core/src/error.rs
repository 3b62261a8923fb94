use thiserror::Error;

/// Errors raised while building core model values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A URN could not be parsed or failed validation.
    #[error("invalid urn: {0}")]
    InvalidUrn(String),

    /// A phone number failed validation.
    #[error("invalid phone number: {0}")]
    InvalidPhone(String),
}
