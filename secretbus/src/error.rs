use secretbus_core::{ConfigError, CryptoError};

/// Everything that can go wrong talking to the Secret Service.
///
/// A dismissed prompt is not an error: operations that can be dismissed
/// return `Ok(None)` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bus connection, method call or remote failure, passed through as-is.
    #[error("D-Bus error: {0}")]
    Transport(#[from] zbus::Error),

    /// The daemon replied with a shape the protocol does not allow.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Session cryptography failed. The session should be considered poisoned.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("config error: {0}")]
    Config(ConfigError),
}

impl From<zbus::fdo::Error> for Error {
    fn from(err: zbus::fdo::Error) -> Self {
        Self::Transport(zbus::Error::from(err))
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnsupportedAlgorithm(name) => {
                Self::Unsupported(format!("session algorithm '{name}'"))
            }
            other => Self::Config(other),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
