//! # Hashing Utilities
//!
//! Two digests cover everything the codec hashes:
//!
//! - **SHA-512Half**: the first 32 bytes of SHA-512. Every ledger
//!   identifier (transaction IDs, signing digests, object keys) is one of
//!   these, always computed over a 4-byte hash prefix followed by canonical
//!   bytes.
//!
//! - **SHA-256**: only used twice in a row, for the 4-byte checksum on
//!   human-readable addresses.

use sha2::{Digest, Sha256, Sha512};

use crate::types::Hash256;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use ledger_codec::crypto::sha256;
///
/// let hash = sha256(b"ledger");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 applied twice. The first four bytes form the address checksum.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// The first half of a SHA-512 digest.
///
/// ```
/// use ledger_codec::crypto::sha512_half;
///
/// let digest = sha512_half(b"abc");
/// assert_eq!(digest.to_hex().len(), 64);
/// ```
pub fn sha512_half(data: &[u8]) -> Hash256 {
    sha512_half_parts(&[data])
}

/// SHA-512Half over the concatenation of `parts`, without materializing it.
pub fn sha512_half_parts(parts: &[&[u8]]) -> Hash256 {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let full = hasher.finalize();
    let mut half = [0u8; 32];
    half.copy_from_slice(&full[..32]);
    Hash256::new(half)
}
