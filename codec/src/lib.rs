// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Ledger Codec
//!
//! Canonical binary encoding and transaction signing for the ledger wire
//! format. Every byte this crate produces is hashed or signed by someone, so
//! there is exactly one encoding per value and decoding rejects everything
//! else.
//!
//! ## Architecture
//!
//! - **config**: protocol constants (VL limits, sentinels, amount layout,
//!   hash prefixes).
//! - **definitions**: the type and field registry, loaded from a JSON schema.
//! - **binary**: field identifiers, VL lengths, the byte reader and writer.
//! - **types**: the value model and one codec per wire type.
//! - **serializer**: objects to canonical bytes and back.
//! - **json**: the JSON form of objects.
//! - **address**: account IDs to human-readable addresses.
//! - **crypto**: SHA-512Half, key handles, Ed25519 and secp256k1 signatures.
//! - **transaction**: signing inputs, single and multi signing, verification.
//! - **logging**: subscriber setup for binaries and benches.
//!
//! ## Example
//!
//! ```
//! use ledger_codec::crypto::{KeyType, PrivateKey};
//! use ledger_codec::transaction::{sign_transaction, verify_transaction};
//! use ledger_codec::types::{AccountId, Amount, StObject};
//!
//! let tx = StObject::new()
//!     .with("TransactionType", 0u16)
//!     .with("Account", AccountId::new([1; 20]))
//!     .with("Destination", AccountId::new([2; 20]))
//!     .with("Amount", Amount::drops(1_000_000)?)
//!     .with("Fee", Amount::drops(10)?)
//!     .with("Sequence", 1u32);
//!
//! let key = PrivateKey::generate(KeyType::Ed25519);
//! let signed = sign_transaction(&tx, &key)?;
//! assert!(verify_transaction(signed.signed(), &key.public_key())?);
//! # Ok::<(), ledger_codec::CodecError>(())
//! ```

pub mod address;
pub mod binary;
pub mod config;
pub mod crypto;
pub mod definitions;
pub mod error;
pub mod json;
pub mod logging;
pub mod serializer;
pub mod transaction;
pub mod types;

pub use definitions::Definitions;
pub use error::{CodecError, Result};
pub use serializer::{deserialize_object, serialize_object, serialize_object_with, FieldFilter};
pub use transaction::{SignedTransaction, SigningPipeline};
