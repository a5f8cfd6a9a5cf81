//! # Digital Signatures
//!
//! One [`SignatureScheme`] per algorithm, selected by key type. Both take the
//! same input, the unhashed signing bytes, and differ in what they do with it:
//!
//! | scheme    | signs                         | signature           |
//! |-----------|-------------------------------|---------------------|
//! | secp256k1 | SHA-512Half(input)            | DER, low-S, <= 72 B |
//! | Ed25519   | input itself (RFC 8032)       | 64 bytes            |
//!
//! ## Strictness
//!
//! ECDSA nonces are deterministic (RFC 6979) and signatures are always
//! produced in low-S form. Verification rejects high-S and non-DER
//! encodings, and Ed25519 uses `verify_strict`. A signature that fails any
//! of these checks is simply invalid (`Ok(false)`); only unusable keys or a
//! key of the wrong algorithm are errors.

use std::fmt;

use ed25519_dalek::Signer;
use secp256k1::{ecdsa, Message, SECP256K1};

use super::hash::sha512_half;
use super::keys::{KeyType, PrivateKey, PublicKey};
use crate::config::{ED25519_SIGNATURE_LENGTH, MAX_DER_SIGNATURE_LENGTH};
use crate::error::{CodecError, Result};
use crate::types::Blob;

/// Raw signature bytes as they appear in `TxnSignature`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.0)
    }
}

impl From<Signature> for Blob {
    fn from(signature: Signature) -> Self {
        Blob::new(signature.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// A signing algorithm.
pub trait SignatureScheme: Send + Sync {
    fn key_type(&self) -> KeyType;

    /// Signs the unhashed signing input.
    fn sign(&self, message: &[u8], key: &PrivateKey) -> Result<Signature>;

    /// `Ok(false)` for any signature that does not verify, however malformed.
    fn verify(&self, message: &[u8], signature: &[u8], public_key: &PublicKey) -> Result<bool>;
}

/// The scheme for `key_type`.
pub fn scheme_for(key_type: KeyType) -> &'static dyn SignatureScheme {
    match key_type {
        KeyType::Secp256k1 => &Secp256k1Scheme,
        KeyType::Ed25519 => &Ed25519Scheme,
    }
}

fn wrong_algorithm(scheme: KeyType, key: KeyType) -> CodecError {
    CodecError::InvalidValue(format!(
        "algorithm mismatch: {scheme} scheme given a {key} key"
    ))
}

// ---------------------------------------------------------------------------
// secp256k1
// ---------------------------------------------------------------------------

/// ECDSA over secp256k1 with SHA-512Half digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Scheme;

impl Secp256k1Scheme {
    fn digest(message: &[u8]) -> Message {
        Message::from_digest(*sha512_half(message).as_bytes())
    }
}

impl SignatureScheme for Secp256k1Scheme {
    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn sign(&self, message: &[u8], key: &PrivateKey) -> Result<Signature> {
        let PrivateKey::Secp256k1(secret) = key else {
            return Err(wrong_algorithm(self.key_type(), key.key_type()));
        };
        let signature = SECP256K1.sign_ecdsa(&Self::digest(message), secret);
        Ok(Signature(signature.serialize_der().to_vec()))
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &PublicKey) -> Result<bool> {
        if public_key.key_type() != KeyType::Secp256k1 {
            return Err(wrong_algorithm(self.key_type(), public_key.key_type()));
        }
        let key = public_key.to_secp256k1()?;
        if signature.is_empty() || signature.len() > MAX_DER_SIGNATURE_LENGTH {
            return Ok(false);
        }
        let Ok(parsed) = ecdsa::Signature::from_der(signature) else {
            return Ok(false);
        };
        // Reject high-S and any DER that does not re-encode byte for byte.
        let mut normalized = parsed;
        normalized.normalize_s();
        if normalized != parsed || parsed.serialize_der()[..] != signature[..] {
            return Ok(false);
        }
        Ok(SECP256K1
            .verify_ecdsa(&Self::digest(message), &parsed, &key)
            .is_ok())
    }
}

// ---------------------------------------------------------------------------
// Ed25519
// ---------------------------------------------------------------------------

/// Ed25519 over the raw signing input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Scheme;

impl SignatureScheme for Ed25519Scheme {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn sign(&self, message: &[u8], key: &PrivateKey) -> Result<Signature> {
        let PrivateKey::Ed25519(signing_key) = key else {
            return Err(wrong_algorithm(self.key_type(), key.key_type()));
        };
        Ok(Signature(signing_key.sign(message).to_bytes().to_vec()))
    }

    fn verify(&self, message: &[u8], signature: &[u8], public_key: &PublicKey) -> Result<bool> {
        if public_key.key_type() != KeyType::Ed25519 {
            return Err(wrong_algorithm(self.key_type(), public_key.key_type()));
        }
        let key = public_key.to_ed25519()?;
        let Ok(bytes) = <[u8; ED25519_SIGNATURE_LENGTH]>::try_from(signature) else {
            return Ok(false);
        };
        let parsed = ed25519_dalek::Signature::from_bytes(&bytes);
        Ok(key.verify_strict(message, &parsed).is_ok())
    }
}
