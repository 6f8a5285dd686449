//! Client half of a Secret Service transfer session.
//!
//! A session decides how secret values cross the bus: verbatim for `plain`,
//! or AES-128-CBC under a Diffie-Hellman negotiated key for
//! `dh-ietf1024-sha256-aes128-cbc-pkcs7`.

use secretbus_core::{AesKey, DhKeypair, EncryptionType, cipher};
use tracing::debug;
use zvariant::{ObjectPath, OwnedObjectPath, Value};

use crate::bus::SecretBus;
use crate::convert;
use crate::error::Result;
use crate::secret::Secret;

#[derive(Debug)]
pub enum Session {
    Plain {
        path: OwnedObjectPath,
    },
    Dh {
        path: OwnedObjectPath,
        /// Zeroized on drop.
        key: AesKey,
    },
}

impl Session {
    /// Negotiate a session with the daemon.
    pub async fn open(bus: &dyn SecretBus, encryption: EncryptionType) -> Result<Self> {
        let session = match encryption {
            EncryptionType::Plain => {
                let (_output, path) = bus
                    .open_session(encryption.algorithm(), Value::from(""))
                    .await?;
                Self::Plain { path }
            }
            EncryptionType::Dh => {
                let keypair = DhKeypair::generate()?;
                let input = Value::from(keypair.public_bytes().to_vec());
                let (output, path) = bus.open_session(encryption.algorithm(), input).await?;
                let server_public = convert::to_bytes(&output, "OpenSession output")?;
                let key = keypair.derive_key(&server_public)?;
                Self::Dh { path, key }
            }
        };
        debug!(
            session = %session.path(),
            algorithm = session.algorithm(),
            "secret service session opened"
        );
        Ok(session)
    }

    pub fn path(&self) -> &ObjectPath<'static> {
        match self {
            Self::Plain { path } | Self::Dh { path, .. } => path,
        }
    }

    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Dh { .. })
    }

    /// The algorithm identifier this session was opened with.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Plain { .. } => EncryptionType::Plain.algorithm(),
            Self::Dh { .. } => EncryptionType::Dh.algorithm(),
        }
    }

    /// Wrap `data` into a [`Secret`] ready to send. DH sessions draw a fresh
    /// IV for every call.
    pub fn format(&self, data: &[u8], content_type: &str) -> Result<Secret> {
        let (parameters, value) = match self {
            Self::Plain { .. } => (Vec::new(), data.to_vec()),
            Self::Dh { key, .. } => {
                let iv = cipher::random_iv()?;
                (iv.to_vec(), cipher::encrypt(key, &iv, data)?)
            }
        };
        Ok(Secret {
            session: self.path().clone().into(),
            parameters,
            value,
            content_type: content_type.to_string(),
        })
    }

    /// Recover the plaintext of a secret received from the daemon.
    pub fn decrypt(&self, secret: &Secret) -> Result<Vec<u8>> {
        match self {
            Self::Plain { .. } => Ok(secret.value.clone()),
            Self::Dh { key, .. } => Ok(cipher::decrypt(key, &secret.parameters, &secret.value)?),
        }
    }
}
