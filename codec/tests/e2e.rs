//! End-to-end tests: JSON in, canonical bytes, signatures, JSON out.
//!
//! Fixtures are fixed keys and addresses so failures reproduce exactly.

use serde_json::{json, Value};

use ledger_codec::address::{AddressCodec, ClassicAddressCodec};
use ledger_codec::crypto::{KeyType, PrivateKey, PublicKey};
use ledger_codec::json;
use ledger_codec::transaction::{sign_transaction, verify_transaction, SigningPipeline};
use ledger_codec::types::{Blob, FieldValue, StObject};
use ledger_codec::{deserialize_object, serialize_object, CodecError, Definitions};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const ED_SECRET: &str = "B224AFDCCEC7AA4E245E35452585D4FBBE37519BCA3929578BFC5BBD4640E163";
const ED_PUBLIC: &str = "ED94F8F262A639D6C88B9EFC29F4AA8B1B8E0B7D9143A17733179A388FD26CC3AE";
const ED_ACCOUNT: &str = "rwGWYtRR6jJJJq7FKQg74YwtkiPyUqJ466";

const EC_SECRET: &str = "0093CC77E2333958D1480FC36811A68A1785258F65251DE100012FA18D0186FFB0";
const EC_PUBLIC: &str = "0378272C2A8F6146FE94BA3D116F548179A9875CBBD52E9D9B91A0FA44AEC4684D";
const EC_ACCOUNT: &str = "rDt78kzcAfRf5NwmwL4f3E5pK14iM4CxRi";

const DESTINATION: &str = "rD8ATvjj9mfnFuYYTGRNb9DygnJW9JNN1C";

// ED_SECRET's signature over payment_json(ED_ACCOUNT), produced outside this
// crate from the raw field bytes and an RFC 8032 Ed25519 signer.
const ED_PAYMENT_SIGNATURE: &str = "1E984770A2B907C106B43A6090142F81BF6B6BF723E43FA3AE43006D3BC6CA8F\
                                    91672275AC0AB8E229A8EC2CE2EA37787AB9A28B74945FA23DC9CA001CB86D04";
const ED_PAYMENT_TX_BLOB: &str = "1200002280000000240000000161400000000000303968400000000000000A\
                                  7321ED94F8F262A639D6C88B9EFC29F4AA8B1B8E0B7D9143A17733179A388FD26CC3AE\
                                  7440\
                                  1E984770A2B907C106B43A6090142F81BF6B6BF723E43FA3AE43006D3BC6CA8F\
                                  91672275AC0AB8E229A8EC2CE2EA37787AB9A28B74945FA23DC9CA001CB86D04\
                                  811465A809D39F264C6F5AB896F162A79D01087223FF\
                                  83148C51B130E125AC3269E279D675691B09E57C7CED";
const ED_PAYMENT_HASH: &str = "B1FE13ACC6F063C1F91E6E238BC894ED7E075408F04A6F0C5970FCE151CC5E92";

fn ed_key() -> PrivateKey {
    PrivateKey::from_hex(KeyType::Ed25519, ED_SECRET).expect("ed fixture")
}

fn ec_key() -> PrivateKey {
    PrivateKey::from_prefixed_hex(EC_SECRET).expect("ec fixture")
}

fn payment_json(account: &str) -> Value {
    json!({
        "TransactionType": "Payment",
        "Account": account,
        "Destination": DESTINATION,
        "Amount": "12345",
        "Fee": "10",
        "Sequence": 1,
        "Flags": 2147483648u32,
    })
}

fn payment(account: &str) -> StObject {
    json::to_object(
        &payment_json(account),
        Definitions::global(),
        &ClassicAddressCodec,
    )
    .expect("payment fixture")
}

fn flip(tx: &StObject, field: &str, index: usize) -> StObject {
    let mut bytes = tx
        .get(field)
        .and_then(FieldValue::as_blob)
        .expect("blob field")
        .as_bytes()
        .to_vec();
    bytes[index] ^= 0x80;
    tx.clone().with(field, Blob::new(bytes))
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[test]
fn fixtures_derive_their_public_keys() {
    assert_eq!(ed_key().public_key().to_hex(), ED_PUBLIC);
    assert_eq!(ec_key().public_key().to_hex(), EC_PUBLIC);
}

// ---------------------------------------------------------------------------
// Single signing
// ---------------------------------------------------------------------------

#[test]
fn ed25519_payment_signs_and_verifies() {
    let key = ed_key();
    let signed = sign_transaction(&payment(ED_ACCOUNT), &key).unwrap();

    assert_eq!(signed.signer_public_key().to_hex(), ED_PUBLIC);
    assert_eq!(signed.signature().len(), 64);
    assert!(verify_transaction(signed.signed(), &key.public_key()).unwrap());

    // Ed25519 is deterministic: the whole blob is reproducible.
    let again = sign_transaction(&payment(ED_ACCOUNT), &key).unwrap();
    assert_eq!(signed.tx_blob(), again.tx_blob());
}

#[test]
fn ed25519_payment_matches_known_vector() {
    let signed = sign_transaction(&payment(ED_ACCOUNT), &ed_key()).unwrap();
    assert_eq!(signed.signature().to_hex(), ED_PAYMENT_SIGNATURE);
    assert_eq!(signed.tx_blob(), ED_PAYMENT_TX_BLOB);
    assert_eq!(signed.hash().to_hex(), ED_PAYMENT_HASH);

    let decoded = json::decode(ED_PAYMENT_TX_BLOB).unwrap();
    assert_eq!(decoded["TxnSignature"], json!(ED_PAYMENT_SIGNATURE));
    let object = json::to_object(&decoded, Definitions::global(), &ClassicAddressCodec).unwrap();
    assert!(verify_transaction(&object, &ed_key().public_key()).unwrap());
}

#[test]
fn secp256k1_payment_signs_and_verifies() {
    let key = ec_key();
    let signed = sign_transaction(&payment(EC_ACCOUNT), &key).unwrap();
    assert!(signed.signature().len() <= 72);
    assert_eq!(signed.signature().as_bytes()[0], 0x30);
    assert!(verify_transaction(signed.signed(), &key.public_key()).unwrap());
}

#[test]
fn flipping_any_signature_byte_fails_verification() {
    for (key, account) in [(ed_key(), ED_ACCOUNT), (ec_key(), EC_ACCOUNT)] {
        let signed = sign_transaction(&payment(account), &key).unwrap();
        for index in 0..signed.signature().len() {
            let tampered = flip(signed.signed(), "TxnSignature", index);
            assert!(
                !verify_transaction(&tampered, &key.public_key()).unwrap(),
                "{} signature still valid after flipping byte {index}",
                key.key_type()
            );
        }
    }
}

#[test]
fn ed25519_signature_checked_with_secp256k1_key_is_an_error() {
    let signed = sign_transaction(&payment(ED_ACCOUNT), &ed_key()).unwrap();
    let err = verify_transaction(signed.signed(), &ec_key().public_key()).unwrap_err();
    assert!(matches!(err, CodecError::InvalidValue(_)), "{err:?}");
}

#[test]
fn signed_blob_decodes_and_still_verifies() {
    let key = ec_key();
    let signed = sign_transaction(&payment(EC_ACCOUNT), &key).unwrap();

    let decoded = json::decode(&signed.tx_blob()).unwrap();
    assert_eq!(decoded["SigningPubKey"], json!(EC_PUBLIC));
    assert_eq!(decoded["Account"], json!(EC_ACCOUNT));

    let object = json::to_object(&decoded, Definitions::global(), &ClassicAddressCodec).unwrap();
    assert_eq!(&object, signed.signed());
    assert!(verify_transaction(&object, &key.public_key()).unwrap());
    assert!(SigningPipeline::default().verify_signed(&object).unwrap());
}

#[test]
fn transaction_hash_matches_signed_bytes() {
    let pipeline = SigningPipeline::default();
    let signed = pipeline.sign(&payment(ED_ACCOUNT), &ed_key()).unwrap();
    assert_eq!(pipeline.transaction_hash(signed.signed()).unwrap(), signed.hash());
    assert_ne!(
        pipeline.transaction_hash(signed.unsigned()).unwrap(),
        signed.hash()
    );
}

#[test]
fn signing_input_matches_json_helper() {
    let pipeline = SigningPipeline::default();
    let signed = pipeline.sign(&payment(ED_ACCOUNT), &ed_key()).unwrap();
    let unsigned_json = json::from_object(
        signed.unsigned(),
        Definitions::global(),
        &ClassicAddressCodec,
    )
    .unwrap();
    let input = pipeline
        .signing_input(signed.unsigned(), ledger_codec::transaction::SigningContext::Single)
        .unwrap();
    assert_eq!(
        json::encode_for_signing(&unsigned_json).unwrap(),
        hex::encode_upper(input.as_bytes())
    );
}

// ---------------------------------------------------------------------------
// Multi signing
// ---------------------------------------------------------------------------

#[test]
fn two_signer_multisig_roundtrip() {
    let pipeline = SigningPipeline::default();
    let addresses = ClassicAddressCodec;
    let tx = payment(DESTINATION);

    let ed_signer = addresses.decode_account_id(ED_ACCOUNT).unwrap();
    let ec_signer = addresses.decode_account_id(EC_ACCOUNT).unwrap();
    let entries = vec![
        pipeline.multi_sign(&tx, &ed_key(), ed_signer).unwrap(),
        pipeline.multi_sign(&tx, &ec_key(), ec_signer).unwrap(),
    ];
    let combined = pipeline.combine_multisigned(&tx, entries).unwrap();
    assert!(pipeline.verify_multisigned(combined.signed()).unwrap());

    let decoded = deserialize_object(combined.signed_bytes(), Definitions::global()).unwrap();
    assert_eq!(&decoded, combined.signed());
    assert!(pipeline.verify_multisigned(&decoded).unwrap());

    // The JSON helper yields the same input the ed25519 signer signed.
    let tx_json = json::from_object(&tx, Definitions::global(), &addresses).unwrap();
    let expected = pipeline
        .signing_input(
            &tx.clone().with("SigningPubKey", Blob::empty()),
            ledger_codec::transaction::SigningContext::Multi { signer: ed_signer },
        )
        .unwrap();
    assert_eq!(
        json::encode_for_multisigning(&tx_json, ED_ACCOUNT).unwrap(),
        hex::encode_upper(expected.as_bytes())
    );
}

#[test]
fn tampered_multisignature_fails() {
    let pipeline = SigningPipeline::default();
    let tx = payment(DESTINATION);
    let signer = ClassicAddressCodec.decode_account_id(ED_ACCOUNT).unwrap();
    let mut entry = pipeline.multi_sign(&tx, &ed_key(), signer).unwrap();
    entry.object = flip(&entry.object, "TxnSignature", 10);
    let combined = pipeline.combine_multisigned(&tx, vec![entry]).unwrap();
    assert!(!pipeline.verify_multisigned(combined.signed()).unwrap());
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

#[test]
fn payment_bytes_are_independent_of_json_key_order() {
    let forward = payment_json(ED_ACCOUNT);
    let mut reversed = serde_json::Map::new();
    for (k, v) in forward.as_object().unwrap().iter().rev() {
        reversed.insert(k.clone(), v.clone());
    }
    assert_eq!(
        json::encode(&forward).unwrap(),
        json::encode(&Value::Object(reversed)).unwrap()
    );
}

#[test]
fn blob_cut_inside_the_last_field_is_malformed() {
    // Destination sorts last: field id, VL byte, 20 account bytes.
    let bytes = serialize_object(&payment(ED_ACCOUNT), Definitions::global()).unwrap();
    for dropped in 1..=21 {
        let err = deserialize_object(&bytes[..bytes.len() - dropped], Definitions::global())
            .unwrap_err();
        assert!(err.is_malformed_input(), "dropped {dropped}: {err:?}");
    }
    let whole_field = deserialize_object(&bytes[..bytes.len() - 22], Definitions::global());
    assert!(!whole_field.unwrap().contains_key("Destination"));
}

#[test]
fn public_keys_parse_from_fixture_hex() {
    let ed: PublicKey = ED_PUBLIC.parse().unwrap();
    let ec: PublicKey = EC_PUBLIC.parse().unwrap();
    assert_eq!(ed.key_type(), KeyType::Ed25519);
    assert_eq!(ec.key_type(), KeyType::Secp256k1);
}
