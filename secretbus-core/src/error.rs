//! Error types shared by the crypto and configuration layers.

/// Failures of the session cryptography.
///
/// Variants carry lengths and library messages only; key material, IVs and
/// secret bytes never end up in an error.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("system random number generator failed: {0}")]
    Random(String),

    #[error("peer DH public key is out of range")]
    InvalidPublicKey,

    #[error("HKDF key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("AES IV must be 16 bytes, got {len}")]
    InvalidIv { len: usize },

    #[error("AES key must be 16 bytes, got {len}")]
    InvalidKey { len: usize },

    #[error("invalid PKCS#7 padding")]
    Padding,
}

/// Failures while loading or interpreting the client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unsupported session algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
