//! # Cryptographic Primitives
//!
//! Everything the signing pipeline needs from cryptography, as thin wrappers
//! over audited crates:
//!
//! - **SHA-512Half** and **SHA-256** (`sha2`) for digests and checksums.
//! - **secp256k1 ECDSA** (`secp256k1`, libsecp256k1 bindings).
//! - **Ed25519** (`ed25519-dalek`).
//!
//! Nothing here implements curve arithmetic itself.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{double_sha256, sha256, sha512_half, sha512_half_parts};
pub use keys::{KeyError, KeyPair, KeyType, PrivateKey, PublicKey};
pub use signatures::{scheme_for, Ed25519Scheme, Secp256k1Scheme, Signature, SignatureScheme};
