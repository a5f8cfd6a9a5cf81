//! # Signing Pipeline
//!
//! Computes what gets signed, signs it, and checks signatures.
//!
//! ## Architecture
//!
//! ```text
//! types.rs          SigningContext, SigningInput, SignedTransaction
//! signing.rs        single signing, multi-signing, assembling Signers
//! verification.rs   signature checks for both forms
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Signing input**: serialize the signing fields only, behind a 4-byte
//!    domain prefix (`STX\0` single, `SMT\0` multi + signer account).
//! 2. **Sign**: hand the input to the scheme named by the key type.
//! 3. **Re-serialize**: insert `TxnSignature` and serialize everything.
//! 4. **Verify**: recompute the same input and check the signature.
//!
//! Signature fields are never signing fields, so step 1 gives the same bytes
//! before and after step 3.

pub mod signing;
pub mod types;
pub mod verification;

use crate::config::HASH_PREFIX_TRANSACTION_ID;
use crate::crypto::sha512_half_parts;
use crate::definitions::Definitions;
use crate::error::Result;
use crate::serializer::{serialize_object, serialize_object_with, FieldFilter};
use crate::types::{Hash256, StObject};

pub use signing::sign_transaction;
pub use types::{MultiSignedTransaction, SignedTransaction, SigningContext, SigningInput};
pub use verification::verify_transaction;

/// Signing and verification bound to one schema.
///
/// Holds no key material and no mutable state; one pipeline can serve any
/// number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SigningPipeline<'d> {
    defs: &'d Definitions,
}

impl Default for SigningPipeline<'static> {
    fn default() -> Self {
        Self::new(Definitions::global())
    }
}

impl<'d> SigningPipeline<'d> {
    pub fn new(defs: &'d Definitions) -> Self {
        Self { defs }
    }

    pub fn definitions(&self) -> &'d Definitions {
        self.defs
    }

    /// The bytes a signature in `context` covers.
    pub fn signing_input(&self, tx: &StObject, context: SigningContext) -> Result<SigningInput> {
        let fields = serialize_object_with(tx, self.defs, FieldFilter::SigningOnly)?;
        let mut bytes = Vec::with_capacity(4 + fields.len() + 20);
        bytes.extend_from_slice(&context.prefix());
        bytes.extend_from_slice(&fields);
        if let SigningContext::Multi { signer } = context {
            bytes.extend_from_slice(signer.as_bytes());
        }
        Ok(SigningInput::new(context, bytes))
    }

    /// Transaction identifier: SHA-512Half(`TXN\0` || full serialization).
    pub fn transaction_hash(&self, signed: &StObject) -> Result<Hash256> {
        let bytes = serialize_object(signed, self.defs)?;
        Ok(sha512_half_parts(&[&HASH_PREFIX_TRANSACTION_ID[..], &bytes[..]]))
    }
}
