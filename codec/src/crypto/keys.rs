//! # Key Handles
//!
//! Two signature algorithms share one public-key encoding: 33 bytes whose
//! first byte names the algorithm.
//!
//! ```text
//! 0xED || 32-byte Ed25519 point        Ed25519
//! 0x02 / 0x03 || 32-byte x coordinate  secp256k1, compressed
//! ```
//!
//! Private keys are 32 bytes. The hex form sometimes carries a 33rd leading
//! byte in the same spirit (`0xED` for Ed25519, `0x00` for secp256k1); both
//! forms are accepted.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS RNG (`OsRng`).
//! - `Debug` on private keys prints the algorithm and public key only.
//! - Nothing in this module logs.
//! - Seed and key-family derivation are not implemented here; callers bring
//!   raw secret key bytes.

use std::fmt;
use std::str::FromStr;

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::SECP256K1;
use thiserror::Error;

use crate::config::{ED25519_KEY_PREFIX, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use crate::error::CodecError;

/// Leading byte of a 33-byte secp256k1 private key in hex form.
const SECP256K1_SECRET_PREFIX: u8 = 0x00;

/// Errors that can occur while parsing key material.
///
/// Deliberately says nothing about the bytes that were rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length, wrong prefix or out of range")]
    InvalidSecretKey,

    #[error("invalid public key bytes: unknown prefix or not a curve point")]
    InvalidPublicKey,
}

impl From<KeyError> for CodecError {
    fn from(err: KeyError) -> Self {
        CodecError::InvalidValue(err.to_string())
    }
}

/// The two supported signature algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Secp256k1,
    Ed25519,
}

impl KeyType {
    /// Algorithm implied by the first byte of an encoded public key.
    pub fn from_public_key_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            ED25519_KEY_PREFIX => Some(Self::Ed25519),
            0x02 | 0x03 => Some(Self::Secp256k1),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "secp256k1",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 33-byte prefixed public key, validated as a point on its curve.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Parses and validates an encoded public key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw: [u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        match KeyType::from_public_key_prefix(raw[0]) {
            Some(KeyType::Ed25519) => {
                let point: [u8; 32] = raw[1..]
                    .try_into()
                    .map_err(|_| KeyError::InvalidPublicKey)?;
                ed25519_dalek::VerifyingKey::from_bytes(&point)
                    .map_err(|_| KeyError::InvalidPublicKey)?;
            }
            Some(KeyType::Secp256k1) => {
                secp256k1::PublicKey::from_slice(&raw).map_err(|_| KeyError::InvalidPublicKey)?;
            }
            None => return Err(KeyError::InvalidPublicKey),
        }
        Ok(Self(raw))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_slice(&bytes)
    }

    pub fn key_type(&self) -> KeyType {
        if self.0[0] == ED25519_KEY_PREFIX {
            KeyType::Ed25519
        } else {
            KeyType::Secp256k1
        }
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Upper-case hex, the form that appears in `SigningPubKey`.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub(crate) fn to_ed25519(self) -> Result<ed25519_dalek::VerifyingKey, KeyError> {
        let point: [u8; 32] = self.0[1..]
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKey)?;
        ed25519_dalek::VerifyingKey::from_bytes(&point).map_err(|_| KeyError::InvalidPublicKey)
    }

    pub(crate) fn to_secp256k1(self) -> Result<secp256k1::PublicKey, KeyError> {
        secp256k1::PublicKey::from_slice(&self.0).map_err(|_| KeyError::InvalidPublicKey)
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, KeyError> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}, {})", self.key_type(), self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// Secret key material for one of the two algorithms.
///
/// Supplied by the caller for a single sign call; the pipeline never keeps
/// a copy. Does not implement `Serialize`: exporting a secret should be an
/// explicit [`to_bytes`](Self::to_bytes).
#[derive(Clone)]
pub enum PrivateKey {
    Secp256k1(secp256k1::SecretKey),
    Ed25519(SigningKey),
}

impl PrivateKey {
    /// A fresh random key.
    pub fn generate(key_type: KeyType) -> Self {
        match key_type {
            KeyType::Ed25519 => Self::Ed25519(SigningKey::generate(&mut OsRng)),
            KeyType::Secp256k1 => loop {
                // Out-of-range scalars are astronomically rare; draw again.
                let mut candidate = [0u8; SECRET_KEY_LENGTH];
                OsRng.fill_bytes(&mut candidate);
                if let Ok(secret) = secp256k1::SecretKey::from_slice(&candidate) {
                    break Self::Secp256k1(secret);
                }
            },
        }
    }

    /// Raw secret bytes: 32 bytes, or 33 with the algorithm's prefix byte.
    pub fn from_slice(key_type: KeyType, bytes: &[u8]) -> Result<Self, KeyError> {
        let expected_prefix = match key_type {
            KeyType::Ed25519 => ED25519_KEY_PREFIX,
            KeyType::Secp256k1 => SECP256K1_SECRET_PREFIX,
        };
        let secret = match bytes.len() {
            SECRET_KEY_LENGTH => bytes,
            n if n == SECRET_KEY_LENGTH + 1 && bytes[0] == expected_prefix => &bytes[1..],
            _ => return Err(KeyError::InvalidSecretKey),
        };
        match key_type {
            KeyType::Ed25519 => {
                let seed: [u8; SECRET_KEY_LENGTH] =
                    secret.try_into().map_err(|_| KeyError::InvalidSecretKey)?;
                Ok(Self::Ed25519(SigningKey::from_bytes(&seed)))
            }
            KeyType::Secp256k1 => secp256k1::SecretKey::from_slice(secret)
                .map(Self::Secp256k1)
                .map_err(|_| KeyError::InvalidSecretKey),
        }
    }

    pub fn from_hex(key_type: KeyType, s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_slice(key_type, &bytes)
    }

    /// Parses a 33-byte hex key whose prefix byte names the algorithm.
    pub fn from_prefixed_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidSecretKey)?;
        match bytes.first() {
            Some(&ED25519_KEY_PREFIX) if bytes.len() == SECRET_KEY_LENGTH + 1 => {
                Self::from_slice(KeyType::Ed25519, &bytes)
            }
            Some(&SECP256K1_SECRET_PREFIX) if bytes.len() == SECRET_KEY_LENGTH + 1 => {
                Self::from_slice(KeyType::Secp256k1, &bytes)
            }
            _ => Err(KeyError::InvalidSecretKey),
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            Self::Secp256k1(_) => KeyType::Secp256k1,
            Self::Ed25519(_) => KeyType::Ed25519,
        }
    }

    /// Derives the matching 33-byte public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Secp256k1(secret) => {
                PublicKey(secp256k1::PublicKey::from_secret_key(SECP256K1, secret).serialize())
            }
            Self::Ed25519(signing) => {
                let mut raw = [0u8; PUBLIC_KEY_LENGTH];
                raw[0] = ED25519_KEY_PREFIX;
                raw[1..].copy_from_slice(signing.verifying_key().as_bytes());
                PublicKey(raw)
            }
        }
    }

    /// The 32 secret bytes, without any prefix.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        match self {
            Self::Secp256k1(secret) => secret.secret_bytes(),
            Self::Ed25519(signing) => signing.to_bytes(),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({}, public={})", self.key_type(), self.public_key())
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// A private key together with its derived public key.
#[derive(Clone, Debug)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn generate(key_type: KeyType) -> Self {
        Self::from_private_key(PrivateKey::generate(key_type))
    }

    pub fn from_private_key(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    pub fn from_hex(key_type: KeyType, secret_hex: &str) -> Result<Self, KeyError> {
        Ok(Self::from_private_key(PrivateKey::from_hex(key_type, secret_hex)?))
    }

    pub fn key_type(&self) -> KeyType {
        self.private.key_type()
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED_SECRET: &str = "B224AFDCCEC7AA4E245E35452585D4FBBE37519BCA3929578BFC5BBD4640E163";
    const ED_PUBLIC: &str = "ED94F8F262A639D6C88B9EFC29F4AA8B1B8E0B7D9143A17733179A388FD26CC3AE";
    const EC_SECRET: &str = "0093CC77E2333958D1480FC36811A68A1785258F65251DE100012FA18D0186FFB0";
    const EC_PUBLIC: &str = "0378272C2A8F6146FE94BA3D116F548179A9875CBBD52E9D9B91A0FA44AEC4684D";

    #[test]
    fn ed25519_fixture_derives_known_public_key() {
        let key = PrivateKey::from_hex(KeyType::Ed25519, ED_SECRET).unwrap();
        assert_eq!(key.public_key().to_hex(), ED_PUBLIC);
        assert_eq!(key.public_key().key_type(), KeyType::Ed25519);
    }

    #[test]
    fn secp256k1_fixture_derives_known_public_key() {
        let key = PrivateKey::from_prefixed_hex(EC_SECRET).unwrap();
        assert_eq!(key.key_type(), KeyType::Secp256k1);
        assert_eq!(key.public_key().to_hex(), EC_PUBLIC);
        assert_eq!(
            PrivateKey::from_hex(KeyType::Secp256k1, &EC_SECRET[2..])
                .unwrap()
                .public_key()
                .to_hex(),
            EC_PUBLIC
        );
    }

    #[test]
    fn prefixed_ed25519_secret() {
        let key = PrivateKey::from_prefixed_hex(&format!("ED{ED_SECRET}")).unwrap();
        assert_eq!(key.public_key().to_hex(), ED_PUBLIC);
    }

    #[test]
    fn wrong_prefix_or_length_rejected() {
        assert_eq!(
            PrivateKey::from_hex(KeyType::Ed25519, &format!("00{ED_SECRET}")).unwrap_err(),
            KeyError::InvalidSecretKey
        );
        assert!(PrivateKey::from_hex(KeyType::Ed25519, "ABCD").is_err());
        assert!(PrivateKey::from_prefixed_hex(ED_SECRET).is_err());
        // Zero is not a valid secp256k1 scalar.
        assert!(PrivateKey::from_slice(KeyType::Secp256k1, &[0u8; 32]).is_err());
    }

    #[test]
    fn public_key_parsing() {
        let ed: PublicKey = ED_PUBLIC.parse().unwrap();
        assert_eq!(ed.key_type(), KeyType::Ed25519);
        let ec: PublicKey = EC_PUBLIC.parse().unwrap();
        assert_eq!(ec.key_type(), KeyType::Secp256k1);

        assert!(PublicKey::from_slice(&[0x04; 33]).is_err());
        assert!(PublicKey::from_slice(&[0xED; 32]).is_err());
        // Valid prefix, not an x coordinate on the curve.
        let mut bogus = [0xFFu8; 33];
        bogus[0] = 0x02;
        assert!(PublicKey::from_slice(&bogus).is_err());
    }

    #[test]
    fn generated_keys_roundtrip_through_bytes() {
        for key_type in [KeyType::Ed25519, KeyType::Secp256k1] {
            let pair = KeyPair::generate(key_type);
            assert_eq!(pair.key_type(), key_type);
            let restored = PrivateKey::from_slice(key_type, &pair.private_key().to_bytes()).unwrap();
            assert_eq!(restored.public_key(), *pair.public_key());
        }
    }

    #[test]
    fn debug_never_prints_the_secret() {
        let key = PrivateKey::from_hex(KeyType::Ed25519, ED_SECRET).unwrap();
        let shown = format!("{key:?}");
        assert!(!shown.to_uppercase().contains(ED_SECRET));
        assert!(shown.contains("ed25519"));
    }

    #[test]
    fn key_errors_become_invalid_values() {
        let err: CodecError = KeyError::InvalidPublicKey.into();
        assert!(err.is_invalid_value());
    }
}
