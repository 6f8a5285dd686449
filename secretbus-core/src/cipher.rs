//! AES-128-CBC with PKCS#7 padding, as used by the
//! `dh-ietf1024-sha256-aes128-cbc-pkcs7` session algorithm.

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::TryRngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::CryptoError;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

pub const AES_KEY_LEN: usize = 16;
pub const AES_IV_LEN: usize = 16;

/// A negotiated AES-128 session key. Zeroized on drop.
#[derive(Clone)]
pub struct AesKey(Zeroizing<[u8; AES_KEY_LEN]>);

impl AesKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key: [u8; AES_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKey { len: bytes.len() })?;
        Ok(Self(Zeroizing::new(key)))
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LEN] {
        &self.0
    }
}

impl From<Zeroizing<[u8; AES_KEY_LEN]>> for AesKey {
    fn from(key: Zeroizing<[u8; AES_KEY_LEN]>) -> Self {
        Self(key)
    }
}

impl std::fmt::Debug for AesKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AesKey([redacted])")
    }
}

/// Draw a fresh IV from the operating system CSPRNG.
pub fn random_iv() -> Result<[u8; AES_IV_LEN], CryptoError> {
    let mut iv = [0u8; AES_IV_LEN];
    OsRng
        .try_fill_bytes(&mut iv)
        .map_err(|e| CryptoError::Random(e.to_string()))?;
    Ok(iv)
}

/// Encrypt `plaintext` under `key` and `iv`, returning the padded ciphertext.
pub fn encrypt(
    key: &AesKey,
    iv: &[u8; AES_IV_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes128CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| CryptoError::InvalidKey { len: AES_KEY_LEN })?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt `ciphertext` and strip its PKCS#7 padding.
///
/// `iv` comes straight off the wire, so its length is checked here.
pub fn decrypt(key: &AesKey, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if iv.len() != AES_IV_LEN {
        return Err(CryptoError::InvalidIv { len: iv.len() });
    }
    let cipher = Aes128CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| CryptoError::InvalidKey { len: AES_KEY_LEN })?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Padding)
}
