use std::collections::HashMap;
use std::str::FromStr;

pub mod cipher;
pub mod config;
pub mod constants;
pub mod dh;
pub mod error;

pub use cipher::AesKey;
pub use dh::DhKeypair;
pub use error::{ConfigError, CryptoError};

/// Lookup attributes attached to an item.
pub type Attributes = HashMap<String, String>;

/// How secrets travel between this process and the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionType {
    /// Secrets cross the (local) bus unencrypted.
    Plain,
    /// AES-128-CBC under a key negotiated with Diffie-Hellman.
    Dh,
}

impl EncryptionType {
    /// The algorithm identifier passed to `OpenSession`.
    pub fn algorithm(self) -> &'static str {
        match self {
            Self::Plain => constants::ALGORITHM_PLAIN,
            Self::Dh => constants::ALGORITHM_DH,
        }
    }
}

impl FromStr for EncryptionType {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            constants::ALGORITHM_PLAIN => Ok(Self::Plain),
            "dh" | constants::ALGORITHM_DH => Ok(Self::Dh),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}
