//! Diffie-Hellman key agreement for `dh-ietf1024-sha256-aes128-cbc-pkcs7`.
//!
//! The group is the 1024-bit MODP group from RFC 2409 (Oakley group 2) with
//! generator 2.  The shared secret is encoded as a fixed 128-byte big-endian
//! integer and fed through HKDF-SHA256 (no salt, empty info) to produce the
//! 16-byte AES session key.

use hkdf::Hkdf;
use num_bigint::BigUint;
use rand::TryRngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::cipher::{AES_KEY_LEN, AesKey};
use crate::error::CryptoError;

/// Size of group elements and private exponents, in bytes.
pub const DH_KEY_LEN: usize = 128;

const OAKLEY_GROUP_2_PRIME: [u8; DH_KEY_LEN] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xC9, 0x0F, 0xDA, 0xA2, 0x21, 0x68, 0xC2, 0x34,
    0xC4, 0xC6, 0x62, 0x8B, 0x80, 0xDC, 0x1C, 0xD1, 0x29, 0x02, 0x4E, 0x08, 0x8A, 0x67, 0xCC, 0x74,
    0x02, 0x0B, 0xBE, 0xA6, 0x3B, 0x13, 0x9B, 0x22, 0x51, 0x4A, 0x08, 0x79, 0x8E, 0x34, 0x04, 0xDD,
    0xEF, 0x95, 0x19, 0xB3, 0xCD, 0x3A, 0x43, 0x1B, 0x30, 0x2B, 0x0A, 0x6D, 0xF2, 0x5F, 0x14, 0x37,
    0x4F, 0xE1, 0x35, 0x6D, 0x6D, 0x51, 0xC2, 0x45, 0xE4, 0x85, 0xB5, 0x76, 0x62, 0x5E, 0x7E, 0xC6,
    0xF4, 0x4C, 0x42, 0xE9, 0xA6, 0x37, 0xED, 0x6B, 0x0B, 0xFF, 0x5C, 0xB6, 0xF4, 0x06, 0xB7, 0xED,
    0xEE, 0x38, 0x6B, 0xFB, 0x5A, 0x89, 0x9F, 0xA5, 0xAE, 0x9F, 0x24, 0x11, 0x7C, 0x4B, 0x1F, 0xE6,
    0x49, 0x28, 0x66, 0x51, 0xEC, 0xE6, 0x53, 0x81, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

const GENERATOR: u32 = 2;

fn prime() -> BigUint {
    BigUint::from_bytes_be(&OAKLEY_GROUP_2_PRIME)
}

/// Parse secret key material into an integer that is wiped on drop.
fn secret_int(bytes: &[u8]) -> Zeroizing<BigUint> {
    Zeroizing::new(BigUint::from_bytes_be(bytes))
}

/// A per-session DH keypair.
///
/// The private exponent lives in zeroizing storage and is consumed by
/// [`DhKeypair::derive_key`], so it cannot outlive the derivation.
pub struct DhKeypair {
    private: Zeroizing<Vec<u8>>,
    public: Vec<u8>,
}

impl DhKeypair {
    /// Draw a random 1024-bit private exponent and compute `g^x mod p`.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut private = Zeroizing::new(vec![0u8; DH_KEY_LEN]);
        OsRng
            .try_fill_bytes(&mut private)
            .map_err(|e| CryptoError::Random(e.to_string()))?;
        Ok(Self::from_private(private))
    }

    fn from_private(private: Zeroizing<Vec<u8>>) -> Self {
        let exponent = secret_int(&private);
        let public = BigUint::from(GENERATOR)
            .modpow(&exponent, &prime())
            .to_bytes_be();
        Self { private, public }
    }

    /// Our public key as an unsigned big-endian byte string.
    pub fn public_bytes(&self) -> &[u8] {
        &self.public
    }

    /// Complete the exchange with the peer's public key and derive the
    /// AES-128 session key.
    ///
    /// Rejects peer keys outside `[2, p - 2]`.
    pub fn derive_key(self, peer_public: &[u8]) -> Result<AesKey, CryptoError> {
        let p = prime();
        let two = BigUint::from(2u32);
        let peer = BigUint::from_bytes_be(peer_public);
        if peer < two || peer > &p - &two {
            return Err(CryptoError::InvalidPublicKey);
        }

        let exponent = secret_int(&self.private);
        let shared = Zeroizing::new(peer.modpow(&exponent, &p));
        let ikm = fixed_width_bytes(&shared);
        derive_aes_key(ikm.as_slice())
    }
}

impl std::fmt::Debug for DhKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DhKeypair")
            .field("private", &"[redacted]")
            .field("public_len", &self.public.len())
            .finish()
    }
}

/// Left-pad a group element to exactly [`DH_KEY_LEN`] bytes.
fn fixed_width_bytes(value: &BigUint) -> Zeroizing<[u8; DH_KEY_LEN]> {
    let bytes = Zeroizing::new(value.to_bytes_be());
    let mut out = Zeroizing::new([0u8; DH_KEY_LEN]);
    out[DH_KEY_LEN - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// HKDF-SHA256 extract-then-expand with no salt and empty info.
fn derive_aes_key(ikm: &[u8]) -> Result<AesKey, CryptoError> {
    let hkdf = Hkdf::<Sha256>::new(None, ikm);
    let mut okm = Zeroizing::new([0u8; AES_KEY_LEN]);
    hkdf.expand(&[], &mut *okm)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    Ok(AesKey::from(okm))
}
