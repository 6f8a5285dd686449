use serde::{Deserialize, Serialize};
use zvariant::{OwnedObjectPath, Type};

/// The `(oayays)` secret struct exchanged with the daemon.
///
/// For plain sessions `parameters` is empty and `value` holds the raw
/// secret. For DH sessions `parameters` is the AES IV and `value` the
/// PKCS#7-padded ciphertext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Secret {
    pub session: OwnedObjectPath,
    pub parameters: Vec<u8>,
    pub value: Vec<u8>,
    pub content_type: String,
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("session", &self.session.as_str())
            .field("parameters_len", &self.parameters.len())
            .field("value", &"[redacted]")
            .field("content_type", &self.content_type)
            .finish()
    }
}
