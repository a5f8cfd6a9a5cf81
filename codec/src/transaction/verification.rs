//! Signature verification for single- and multi-signed transactions.
//!
//! An invalid signature is `Ok(false)`. Errors are reserved for input that
//! cannot be checked at all: a transaction that does not serialize, a key
//! that does not parse, or a key of the wrong algorithm.

use tracing::debug;

use super::signing::{signer_account, signing_pub_key};
use super::types::SigningContext;
use super::SigningPipeline;
use crate::config::{SIGNERS_FIELD, SIGNING_PUB_KEY_FIELD, TXN_SIGNATURE_FIELD};
use crate::crypto::{scheme_for, PublicKey};
use crate::error::{CodecError, Result};
use crate::types::{FieldValue, StObject};

/// Verifies the single signature on `tx` with the process-wide schema.
pub fn verify_transaction(tx: &StObject, public_key: &PublicKey) -> Result<bool> {
    SigningPipeline::default().verify(tx, public_key)
}

fn blob_field<'a>(object: &'a StObject, name: &str) -> Result<Option<&'a [u8]>> {
    match object.get(name) {
        None => Ok(None),
        Some(FieldValue::Blob(blob)) => Ok(Some(blob.as_bytes())),
        Some(other) => Err(CodecError::TypeMismatch {
            field: name.to_string(),
            expected: "Blob".to_string(),
            found: other.kind().to_string(),
        }),
    }
}

impl<'d> SigningPipeline<'d> {
    /// Checks `TxnSignature` against `public_key`.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidValue`] if the transaction's `SigningPubKey`
    ///   does not parse or belongs to a different algorithm than
    ///   `public_key`.
    /// - Any serialization error raised while recomputing the signing input.
    pub fn verify(&self, tx: &StObject, public_key: &PublicKey) -> Result<bool> {
        if let Some(embedded) = signing_pub_key(tx)? {
            let embedded = PublicKey::from_slice(embedded.as_bytes())?;
            if embedded.key_type() != public_key.key_type() {
                return Err(CodecError::InvalidValue(format!(
                    "algorithm mismatch: transaction signed by a {} key, verifying with {}",
                    embedded.key_type(),
                    public_key.key_type()
                )));
            }
            if embedded != *public_key {
                debug!(%public_key, "SigningPubKey names a different key");
                return Ok(false);
            }
        }
        let Some(signature) = blob_field(tx, TXN_SIGNATURE_FIELD)? else {
            debug!("no TxnSignature to verify");
            return Ok(false);
        };

        let input = self.signing_input(tx, SigningContext::Single)?;
        let scheme = scheme_for(public_key.key_type());
        let valid = scheme.verify(input.as_bytes(), signature, public_key)?;
        debug!(
            algorithm = %scheme.key_type(),
            input_len = input.as_bytes().len(),
            valid,
            "verified transaction signature"
        );
        Ok(valid)
    }

    /// Checks `TxnSignature` against the transaction's own `SigningPubKey`.
    ///
    /// A transaction without a signing key (including a multi-signed one)
    /// yields `false`.
    pub fn verify_signed(&self, tx: &StObject) -> Result<bool> {
        match signing_pub_key(tx)? {
            Some(embedded) => {
                let public_key = PublicKey::from_slice(embedded.as_bytes())?;
                self.verify(tx, &public_key)
            }
            None => Ok(false),
        }
    }

    /// Checks every entry of `Signers`.
    ///
    /// True only when `SigningPubKey` is empty, `Signers` is present and
    /// strictly ascending by account, and every entry's signature verifies
    /// for that entry's account.
    pub fn verify_multisigned(&self, tx: &StObject) -> Result<bool> {
        if signing_pub_key(tx)?.is_some() {
            debug!("multi-signed transaction carries a SigningPubKey");
            return Ok(false);
        }
        let signers = match tx.get(SIGNERS_FIELD) {
            None => return Ok(false),
            Some(FieldValue::Array(signers)) if !signers.is_empty() => signers,
            Some(FieldValue::Array(_)) => return Ok(false),
            Some(other) => {
                return Err(CodecError::TypeMismatch {
                    field: SIGNERS_FIELD.to_string(),
                    expected: "STArray".to_string(),
                    found: other.kind().to_string(),
                })
            }
        };

        let mut previous = None;
        for member in signers.members() {
            let account = signer_account(member)?;
            if previous.is_some_and(|prev| prev >= account) {
                debug!(%account, "Signers out of order");
                return Ok(false);
            }
            previous = Some(account);

            let Some(key_bytes) = blob_field(&member.object, SIGNING_PUB_KEY_FIELD)? else {
                return Ok(false);
            };
            let Some(signature) = blob_field(&member.object, TXN_SIGNATURE_FIELD)? else {
                return Ok(false);
            };
            let public_key = PublicKey::from_slice(key_bytes)?;
            let input = self.signing_input(tx, SigningContext::Multi { signer: account })?;
            let valid = scheme_for(public_key.key_type()).verify(
                input.as_bytes(),
                signature,
                &public_key,
            )?;
            if !valid {
                debug!(%account, "multi-signature does not verify");
                return Ok(false);
            }
        }
        debug!(signers = signers.len(), "verified multi-signed transaction");
        Ok(true)
    }
}
