use thiserror::Error;

/// Errors raised while setting up or running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    #[error("state backend: {0}")]
    State(#[from] smsgate_state::StateError),
}
