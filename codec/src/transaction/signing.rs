//! Single signing and multi-signing.
//!
//! Signing is split from serialization because the key may live elsewhere
//! (a hardware device, a remote signer): everything up to the signing input
//! is pure codec work, and only [`SignatureScheme::sign`] touches the key.

use tracing::debug;

use super::types::{MultiSignedTransaction, SignedTransaction, SigningContext};
use super::SigningPipeline;
use crate::config::{
    ACCOUNT_FIELD, HASH_PREFIX_TRANSACTION_ID, SIGNERS_FIELD, SIGNER_FIELD, SIGNING_PUB_KEY_FIELD,
    TXN_SIGNATURE_FIELD,
};
use crate::crypto::{scheme_for, sha512_half_parts, PrivateKey, PublicKey};
use crate::error::{CodecError, Result};
use crate::serializer::serialize_object;
use crate::types::{AccountId, ArrayMember, Blob, FieldValue, StArray, StObject};

/// Signs `tx` with the process-wide schema.
pub fn sign_transaction(tx: &StObject, key: &PrivateKey) -> Result<SignedTransaction> {
    SigningPipeline::default().sign(tx, key)
}

/// The `SigningPubKey` of `tx`: `None` when absent or empty.
pub(crate) fn signing_pub_key(tx: &StObject) -> Result<Option<&Blob>> {
    match tx.get(SIGNING_PUB_KEY_FIELD) {
        None => Ok(None),
        Some(FieldValue::Blob(blob)) if blob.is_empty() => Ok(None),
        Some(FieldValue::Blob(blob)) => Ok(Some(blob)),
        Some(other) => Err(CodecError::TypeMismatch {
            field: SIGNING_PUB_KEY_FIELD.to_string(),
            expected: "Blob".to_string(),
            found: other.kind().to_string(),
        }),
    }
}

impl<'d> SigningPipeline<'d> {
    /// Signs `tx` with `key`.
    ///
    /// `SigningPubKey` is filled in from the key when absent or empty; a
    /// different key already present is an error. Any stale `TxnSignature`
    /// is replaced.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidValue`] if `SigningPubKey` names another key.
    /// - Any serialization error raised by the transaction's fields.
    pub fn sign(&self, tx: &StObject, key: &PrivateKey) -> Result<SignedTransaction> {
        let public = key.public_key();
        if let Some(existing) = signing_pub_key(tx)? {
            if existing.as_bytes() != public.as_bytes() {
                return Err(CodecError::InvalidValue(format!(
                    "SigningPubKey {existing} does not belong to the signing key {public}"
                )));
            }
        }

        let mut unsigned = tx.clone();
        unsigned.remove(TXN_SIGNATURE_FIELD);
        unsigned.insert(SIGNING_PUB_KEY_FIELD, Blob::new(public.as_bytes().to_vec()));

        let input = self.signing_input(&unsigned, SigningContext::Single)?;
        let scheme = scheme_for(key.key_type());
        let signature = scheme.sign(input.as_bytes(), key)?;

        let signed = unsigned
            .clone()
            .with(TXN_SIGNATURE_FIELD, Blob::from(signature.clone()));
        let signed_bytes = serialize_object(&signed, self.defs)?;
        let hash = sha512_half_parts(&[&HASH_PREFIX_TRANSACTION_ID[..], &signed_bytes[..]]);

        debug!(
            algorithm = %scheme.key_type(),
            input_len = input.as_bytes().len(),
            signature_len = signature.len(),
            tx_len = signed_bytes.len(),
            %hash,
            "signed transaction"
        );

        Ok(SignedTransaction {
            unsigned,
            signed,
            signature,
            signer_public_key: public,
            signed_bytes,
            hash,
        })
    }

    /// Produces one `Signer` entry for a multi-signed transaction.
    ///
    /// The transaction must not carry a single-signing key: `SigningPubKey`
    /// is treated as empty, as it will be once the signers are combined.
    pub fn multi_sign(
        &self,
        tx: &StObject,
        key: &PrivateKey,
        signer: AccountId,
    ) -> Result<ArrayMember> {
        if signing_pub_key(tx)?.is_some() {
            return Err(CodecError::InvalidValue(
                "multi-signed transactions must have an empty SigningPubKey".into(),
            ));
        }
        let unsigned = for_multisigning(tx);
        let input = self.signing_input(&unsigned, SigningContext::Multi { signer })?;
        let scheme = scheme_for(key.key_type());
        let signature = scheme.sign(input.as_bytes(), key)?;

        debug!(
            algorithm = %scheme.key_type(),
            %signer,
            input_len = input.as_bytes().len(),
            "produced multi-signature"
        );

        Ok(signer_entry(signer, &key.public_key(), Blob::from(signature)))
    }

    /// Assembles `Signers` from individual entries, sorted by account.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidValue`] for an empty list, a member that is not a
    /// well-formed `Signer`, or the same account twice.
    pub fn combine_multisigned(
        &self,
        tx: &StObject,
        signers: Vec<ArrayMember>,
    ) -> Result<MultiSignedTransaction> {
        if signers.is_empty() {
            return Err(CodecError::InvalidValue("no signers to combine".into()));
        }
        let mut keyed = signers
            .into_iter()
            .map(|member| Ok((signer_account(&member)?, member)))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by_key(|(account, _)| *account);
        if let Some(pair) = keyed.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(CodecError::InvalidValue(format!(
                "account {} signs more than once",
                pair[0].0
            )));
        }

        let members = keyed.into_iter().map(|(_, member)| member).collect();
        let signed = for_multisigning(tx).with(SIGNERS_FIELD, StArray::new(members));
        let signed_bytes = serialize_object(&signed, self.defs)?;
        let hash = sha512_half_parts(&[&HASH_PREFIX_TRANSACTION_ID[..], &signed_bytes[..]]);

        debug!(tx_len = signed_bytes.len(), %hash, "combined multi-signed transaction");

        Ok(MultiSignedTransaction {
            signed,
            signed_bytes,
            hash,
        })
    }
}

/// `tx` with an empty `SigningPubKey` and no signatures.
fn for_multisigning(tx: &StObject) -> StObject {
    let mut unsigned = tx.clone();
    unsigned.remove(TXN_SIGNATURE_FIELD);
    unsigned.remove(SIGNERS_FIELD);
    unsigned.insert(SIGNING_PUB_KEY_FIELD, Blob::empty());
    unsigned
}

fn signer_entry(account: AccountId, public: &PublicKey, signature: Blob) -> ArrayMember {
    ArrayMember::new(
        SIGNER_FIELD,
        StObject::new()
            .with(ACCOUNT_FIELD, account)
            .with(SIGNING_PUB_KEY_FIELD, Blob::new(public.as_bytes().to_vec()))
            .with(TXN_SIGNATURE_FIELD, signature),
    )
}

pub(crate) fn signer_account(member: &ArrayMember) -> Result<AccountId> {
    if member.name != SIGNER_FIELD {
        return Err(CodecError::InvalidValue(format!(
            "Signers may only hold {SIGNER_FIELD} entries, found {}",
            member.name
        )));
    }
    member
        .object
        .get(ACCOUNT_FIELD)
        .and_then(FieldValue::as_account_id)
        .copied()
        .ok_or_else(|| CodecError::InvalidValue("Signer entry has no Account".into()))
}
