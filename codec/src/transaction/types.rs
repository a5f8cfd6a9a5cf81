//! Values passed between the stages of the signing pipeline.

use crate::config::{
    HASH_PREFIX_TRANSACTION_MULTISIGN, HASH_PREFIX_TRANSACTION_SIGN, SIGNERS_FIELD,
};
use crate::crypto::{sha512_half, PublicKey, Signature};
use crate::types::{AccountId, Hash256, StArray, StObject};

/// Whose signature a signing input is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningContext {
    /// The transaction's own account signs with `TxnSignature`.
    Single,
    /// One member of a signer list. Each member signs a distinct input.
    Multi { signer: AccountId },
}

impl SigningContext {
    /// The 4-byte domain separator this context hashes under.
    pub fn prefix(&self) -> [u8; 4] {
        match self {
            Self::Single => HASH_PREFIX_TRANSACTION_SIGN,
            Self::Multi { .. } => HASH_PREFIX_TRANSACTION_MULTISIGN,
        }
    }
}

/// The exact bytes a signature covers.
///
/// ```text
/// single: "STX\0" || signing fields
/// multi:  "SMT\0" || signing fields || signer account id
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningInput {
    context: SigningContext,
    bytes: Vec<u8>,
}

impl SigningInput {
    pub(crate) fn new(context: SigningContext, bytes: Vec<u8>) -> Self {
        Self { context, bytes }
    }

    pub fn context(&self) -> SigningContext {
        self.context
    }

    /// Prefix, fields and (for multi-signing) the signer, unhashed.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// SHA-512Half of the input; what an ECDSA signature actually signs.
    pub fn digest(&self) -> Hash256 {
        sha512_half(&self.bytes)
    }
}

/// A single-signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub(crate) unsigned: StObject,
    pub(crate) signed: StObject,
    pub(crate) signature: Signature,
    pub(crate) signer_public_key: PublicKey,
    pub(crate) signed_bytes: Vec<u8>,
    pub(crate) hash: Hash256,
}

impl SignedTransaction {
    /// The transaction as signed, with `SigningPubKey` filled in and no
    /// `TxnSignature`.
    pub fn unsigned(&self) -> &StObject {
        &self.unsigned
    }

    /// The transaction including `TxnSignature`.
    pub fn signed(&self) -> &StObject {
        &self.signed
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn signer_public_key(&self) -> &PublicKey {
        &self.signer_public_key
    }

    /// Canonical serialization of [`signed`](Self::signed).
    pub fn signed_bytes(&self) -> &[u8] {
        &self.signed_bytes
    }

    /// Upper-case hex of the signed bytes, ready to submit.
    pub fn tx_blob(&self) -> String {
        hex::encode_upper(&self.signed_bytes)
    }

    /// Transaction identifier.
    pub fn hash(&self) -> Hash256 {
        self.hash
    }

    pub fn into_signed(self) -> StObject {
        self.signed
    }
}

/// A transaction carrying a complete, sorted `Signers` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSignedTransaction {
    pub(crate) signed: StObject,
    pub(crate) signed_bytes: Vec<u8>,
    pub(crate) hash: Hash256,
}

impl MultiSignedTransaction {
    pub fn signed(&self) -> &StObject {
        &self.signed
    }

    /// The `Signers` array, sorted by account.
    pub fn signers(&self) -> Option<&StArray> {
        self.signed.get(SIGNERS_FIELD).and_then(|value| value.as_array())
    }

    pub fn signed_bytes(&self) -> &[u8] {
        &self.signed_bytes
    }

    pub fn tx_blob(&self) -> String {
        hex::encode_upper(&self.signed_bytes)
    }

    pub fn hash(&self) -> Hash256 {
        self.hash
    }

    pub fn into_signed(self) -> StObject {
        self.signed
    }
}
