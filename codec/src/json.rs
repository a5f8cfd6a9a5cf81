//! # JSON Mapping
//!
//! Converts between the JSON form transactions travel in and [`StObject`].
//!
//! | type | JSON |
//! |---|---|
//! | UInt8 / UInt16 / UInt32 | number; `TransactionType`, `LedgerEntryType` and `TransactionResult` also by name |
//! | UInt64 | hex string |
//! | Hash128 / Hash160 / Hash256, Blob | hex string |
//! | AccountID | address string |
//! | Amount | drops as a decimal string, or `{currency, issuer, value}` |
//! | STObject | object |
//! | STArray | `[{"Wrapper": {...}}, ...]` |
//! | PathSet | `[[{account?, currency?, issuer?}, ...], ...]` |
//! | Vector256 | list of hex strings |
//!
//! Output always uses the canonical form of each row: upper-case hex,
//! 16-digit UInt64, symbolic enum names where the schema has one.

use serde_json::{Map, Number, Value};
use tracing::trace;

use crate::address::{AddressCodec, ClassicAddressCodec};
use crate::definitions::{Definitions, EnumTable};
use crate::error::{CodecError, Result};
use crate::serializer::{deserialize_object, serialize_object};
use crate::transaction::{SigningContext, SigningPipeline};
use crate::types::{
    AccountId, Amount, ArrayMember, Blob, Currency, FieldValue, Hash128, Hash160, Hash256,
    IssuedAmount, NativeAmount, Path, PathSet, PathStep, StArray, StObject, TypeKind, Vector256,
};

/// Serializes a JSON transaction to upper-case hex with the default schema.
pub fn encode(json: &Value) -> Result<String> {
    let defs = Definitions::try_global()?;
    let object = to_object(json, defs, &ClassicAddressCodec)?;
    Ok(hex::encode_upper(serialize_object(&object, defs)?))
}

/// Parses upper- or lower-case hex back into JSON with the default schema.
pub fn decode(hex_blob: &str) -> Result<Value> {
    let defs = Definitions::try_global()?;
    let object = deserialize_object(&hex::decode(hex_blob)?, defs)?;
    from_object(&object, defs, &ClassicAddressCodec)
}

/// Hex of the single-signing input: `STX\0` followed by the signing fields.
pub fn encode_for_signing(json: &Value) -> Result<String> {
    signing_hex(json, |_| Ok(SigningContext::Single))
}

/// Hex of the multi-signing input for `signer`, given as an address.
///
/// `SigningPubKey` is forced empty, as it is on every multi-signed
/// transaction.
pub fn encode_for_multisigning(json: &Value, signer: &str) -> Result<String> {
    signing_hex(json, |addresses| {
        Ok(SigningContext::Multi {
            signer: addresses.decode_account_id(signer)?,
        })
    })
}

fn signing_hex(
    json: &Value,
    context: impl FnOnce(&dyn AddressCodec) -> Result<SigningContext>,
) -> Result<String> {
    let defs = Definitions::try_global()?;
    let addresses = ClassicAddressCodec;
    let mut object = to_object(json, defs, &addresses)?;
    let context = context(&addresses)?;
    if matches!(context, SigningContext::Multi { .. }) {
        object.insert("SigningPubKey", Blob::empty());
    }
    let input = SigningPipeline::new(defs).signing_input(&object, context)?;
    Ok(hex::encode_upper(input.as_bytes()))
}

// ---------------------------------------------------------------------------
// JSON -> value model
// ---------------------------------------------------------------------------

/// Builds an [`StObject`] from a JSON object, resolving every key against
/// `defs`.
///
/// # Errors
///
/// - [`CodecError::Json`] if `json` is not an object or a value has the wrong
///   JSON shape.
/// - [`CodecError::UnknownField`] for keys the schema does not define.
/// - Any value error raised while parsing individual fields.
pub fn to_object(
    json: &Value,
    defs: &Definitions,
    addresses: &dyn AddressCodec,
) -> Result<StObject> {
    let map = expect_object(json, "transaction")?;
    let mut object = StObject::new();
    for (name, value) in map {
        let field = defs.field(name)?;
        let kind = defs.kind_of(field)?;
        let parsed = parse_value(name, kind, value, defs, addresses)?;
        object.insert(name.as_str(), parsed);
    }
    trace!(fields = object.len(), "parsed json object");
    Ok(object)
}

fn parse_value(
    name: &str,
    kind: TypeKind,
    value: &Value,
    defs: &Definitions,
    addresses: &dyn AddressCodec,
) -> Result<FieldValue> {
    let parsed = match kind {
        TypeKind::UInt8 => FieldValue::UInt8(narrow(name, parse_uint(name, value, defs)?)?),
        TypeKind::UInt16 => FieldValue::UInt16(narrow(name, parse_uint(name, value, defs)?)?),
        TypeKind::UInt32 => FieldValue::UInt32(narrow(name, parse_uint(name, value, defs)?)?),
        TypeKind::UInt64 => {
            let hex_digits = expect_str(name, value)?;
            if hex_digits.is_empty() || hex_digits.len() > 16 {
                return Err(CodecError::InvalidValue(format!(
                    "{name}: UInt64 takes 1 to 16 hex digits, got {hex_digits:?}"
                )));
            }
            let n = u64::from_str_radix(hex_digits, 16).map_err(|_| {
                CodecError::InvalidValue(format!("{name}: not a hex number: {hex_digits:?}"))
            })?;
            FieldValue::UInt64(n)
        }
        TypeKind::Hash128 => Hash128::from_hex(expect_str(name, value)?)?.into(),
        TypeKind::Hash160 => Hash160::from_hex(expect_str(name, value)?)?.into(),
        TypeKind::Hash256 => Hash256::from_hex(expect_str(name, value)?)?.into(),
        TypeKind::Blob => Blob::from_hex(expect_str(name, value)?)?.into(),
        TypeKind::AccountId => addresses
            .decode_account_id(expect_str(name, value)?)?
            .into(),
        TypeKind::Amount => parse_amount(name, value, addresses)?.into(),
        TypeKind::StObject => to_object(value, defs, addresses)?.into(),
        TypeKind::StArray => parse_array(name, value, defs, addresses)?.into(),
        TypeKind::PathSet => parse_path_set(name, value, addresses)?.into(),
        TypeKind::Vector256 => {
            let hashes = expect_array(name, value)?
                .iter()
                .map(|item| Hash256::from_hex(expect_str(name, item)?))
                .collect::<Result<Vec<_>>>()?;
            Vector256::new(hashes).into()
        }
    };
    Ok(parsed)
}

/// The symbolic-name table for fields that have one.
fn enum_table<'d>(name: &str, defs: &'d Definitions) -> Option<&'d EnumTable> {
    match name {
        "TransactionType" => Some(defs.transaction_types()),
        "LedgerEntryType" => Some(defs.ledger_entry_types()),
        "TransactionResult" => Some(defs.transaction_results()),
        _ => None,
    }
}

fn parse_uint(name: &str, value: &Value, defs: &Definitions) -> Result<u64> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| {
            CodecError::InvalidValue(format!("{name}: expected an unsigned integer, got {n}"))
        }),
        Value::String(symbol) => {
            let table = enum_table(name, defs).ok_or_else(|| {
                CodecError::Json(format!("{name}: expected a number, got {symbol:?}"))
            })?;
            let code = table.code(symbol).ok_or_else(|| {
                CodecError::InvalidValue(format!("{name}: unknown name {symbol:?}"))
            })?;
            u64::try_from(code).map_err(|_| {
                CodecError::InvalidValue(format!("{name}: {symbol} has negative code {code}"))
            })
        }
        other => Err(CodecError::Json(format!(
            "{name}: expected a number, got {other}"
        ))),
    }
}

fn narrow<T: TryFrom<u64>>(name: &str, n: u64) -> Result<T> {
    T::try_from(n).map_err(|_| CodecError::InvalidValue(format!("{name}: {n} out of range")))
}

fn parse_amount(name: &str, value: &Value, addresses: &dyn AddressCodec) -> Result<Amount> {
    match value {
        Value::String(drops) => Ok(Amount::Native(drops.parse::<NativeAmount>()?)),
        Value::Object(map) => {
            let issued = IssuedAmount::new(
                amount_part(name, map, "value")?.parse()?,
                Currency::from_code(amount_part(name, map, "currency")?)?,
                addresses.decode_account_id(amount_part(name, map, "issuer")?)?,
            )?;
            Ok(Amount::Issued(issued))
        }
        other => Err(CodecError::Json(format!(
            "{name}: expected a drops string or an amount object, got {other}"
        ))),
    }
}

fn amount_part<'a>(name: &str, map: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    let value = map
        .get(key)
        .ok_or_else(|| CodecError::Json(format!("{name}: amount has no {key}")))?;
    expect_str(name, value)
}

fn parse_array(
    name: &str,
    value: &Value,
    defs: &Definitions,
    addresses: &dyn AddressCodec,
) -> Result<StArray> {
    let mut members = Vec::new();
    for item in expect_array(name, value)? {
        let wrapper = expect_object(item, name)?;
        let mut entries = wrapper.iter();
        let (Some((wrapper_name, inner)), None) = (entries.next(), entries.next()) else {
            return Err(CodecError::Json(format!(
                "{name}: each member must be an object with exactly one key"
            )));
        };
        let field = defs.field(wrapper_name)?;
        if defs.kind_of(field)? != TypeKind::StObject {
            return Err(CodecError::TypeMismatch {
                field: wrapper_name.clone(),
                expected: TypeKind::StObject.to_string(),
                found: field.type_name.clone(),
            });
        }
        members.push(ArrayMember::new(
            wrapper_name.as_str(),
            to_object(inner, defs, addresses)?,
        ));
    }
    Ok(StArray::new(members))
}

fn parse_path_set(name: &str, value: &Value, addresses: &dyn AddressCodec) -> Result<PathSet> {
    let mut paths = Vec::new();
    for path in expect_array(name, value)? {
        let mut steps = Vec::new();
        for step in expect_array(name, path)? {
            let step = expect_object(step, name)?;
            let account = |key: &str| {
                step.get(key)
                    .map(|v| addresses.decode_account_id(expect_str(name, v)?))
                    .transpose()
            };
            let currency = step
                .get("currency")
                .map(|v| Currency::from_code(expect_str(name, v)?))
                .transpose()?;
            steps.push(PathStep {
                account: account("account")?,
                currency,
                issuer: account("issuer")?,
            });
        }
        paths.push(Path::new(steps));
    }
    Ok(PathSet::new(paths))
}

fn expect_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CodecError::Json(format!("{what}: expected an object, got {value}")))
}

fn expect_array<'a>(name: &str, value: &'a Value) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| CodecError::Json(format!("{name}: expected an array, got {value}")))
}

fn expect_str<'a>(name: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| CodecError::Json(format!("{name}: expected a string, got {value}")))
}

// ---------------------------------------------------------------------------
// value model -> JSON
// ---------------------------------------------------------------------------

/// Renders `object` as JSON.
pub fn from_object(
    object: &StObject,
    defs: &Definitions,
    addresses: &dyn AddressCodec,
) -> Result<Value> {
    let mut map = Map::new();
    for (name, value) in object.iter() {
        map.insert(name.to_string(), render_value(name, value, defs, addresses)?);
    }
    Ok(Value::Object(map))
}

fn render_value(
    name: &str,
    value: &FieldValue,
    defs: &Definitions,
    addresses: &dyn AddressCodec,
) -> Result<Value> {
    let rendered = match value {
        FieldValue::UInt8(n) => render_uint(name, u64::from(*n), defs),
        FieldValue::UInt16(n) => render_uint(name, u64::from(*n), defs),
        FieldValue::UInt32(n) => render_uint(name, u64::from(*n), defs),
        FieldValue::UInt64(n) => Value::String(format!("{n:016X}")),
        FieldValue::Hash128(h) => Value::String(h.to_hex()),
        FieldValue::Hash160(h) => Value::String(h.to_hex()),
        FieldValue::Hash256(h) => Value::String(h.to_hex()),
        FieldValue::Blob(b) => Value::String(b.to_hex()),
        FieldValue::AccountId(a) => Value::String(addresses.encode_account_id(a)),
        FieldValue::Amount(amount) => render_amount(amount, addresses),
        FieldValue::Object(inner) => from_object(inner, defs, addresses)?,
        FieldValue::Array(array) => Value::Array(
            array
                .members()
                .iter()
                .map(|member| -> Result<Value> {
                    let mut wrapper = Map::new();
                    wrapper.insert(
                        member.name.clone(),
                        from_object(&member.object, defs, addresses)?,
                    );
                    Ok(Value::Object(wrapper))
                })
                .collect::<Result<Vec<_>>>()?,
        ),
        FieldValue::PathSet(set) => Value::Array(
            set.paths()
                .iter()
                .map(|path| {
                    Value::Array(
                        path.steps()
                            .iter()
                            .map(|step| render_step(step, addresses))
                            .collect(),
                    )
                })
                .collect(),
        ),
        FieldValue::Vector256(v) => Value::Array(
            v.hashes()
                .iter()
                .map(|h| Value::String(h.to_hex()))
                .collect(),
        ),
    };
    Ok(rendered)
}

fn render_uint(name: &str, n: u64, defs: &Definitions) -> Value {
    let symbol = enum_table(name, defs)
        .zip(i32::try_from(n).ok())
        .and_then(|(table, code)| table.name(code));
    match symbol {
        Some(symbol) => Value::String(symbol.to_string()),
        None => Value::Number(Number::from(n)),
    }
}

fn render_amount(amount: &Amount, addresses: &dyn AddressCodec) -> Value {
    match amount {
        Amount::Native(native) => Value::String(native.to_string()),
        Amount::Issued(issued) => {
            let mut map = Map::new();
            map.insert("currency".into(), Value::String(issued.currency.to_code()));
            map.insert(
                "issuer".into(),
                Value::String(addresses.encode_account_id(&issued.issuer)),
            );
            map.insert("value".into(), Value::String(issued.value.to_string()));
            Value::Object(map)
        }
    }
}

fn render_step(step: &PathStep, addresses: &dyn AddressCodec) -> Value {
    let mut map = Map::new();
    let mut put_account = |key: &str, account: Option<AccountId>| {
        if let Some(account) = account {
            map.insert(key.into(), Value::String(addresses.encode_account_id(&account)));
        }
    };
    put_account("account", step.account);
    put_account("issuer", step.issuer);
    if let Some(currency) = step.currency {
        map.insert("currency".into(), Value::String(currency.to_code()));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const DESTINATION: &str = "rD8ATvjj9mfnFuYYTGRNb9DygnJW9JNN1C";

    fn payment() -> Value {
        json!({
            "TransactionType": "Payment",
            "Flags": 0,
            "Account": ACCOUNT,
            "Destination": DESTINATION,
            "Amount": "12345",
            "Fee": "10",
            "Sequence": 1,
            "SigningPubKey": "",
        })
    }

    #[test]
    fn symbolic_transaction_type() {
        let object = to_object(&payment(), Definitions::global(), &ClassicAddressCodec).unwrap();
        assert_eq!(object.get("TransactionType"), Some(&FieldValue::UInt16(0)));
        // Numbers are accepted too.
        let mut numeric = payment();
        numeric["TransactionType"] = json!(0);
        assert_eq!(encode(&numeric).unwrap(), encode(&payment()).unwrap());
    }

    #[test]
    fn payment_roundtrips_through_hex() {
        let hex_blob = encode(&payment()).unwrap();
        assert!(hex_blob.starts_with("120000"));
        assert_eq!(decode(&hex_blob).unwrap(), payment());
    }

    #[test]
    fn issued_amounts_and_memos_roundtrip() {
        let tx = json!({
            "TransactionType": "Payment",
            "Account": ACCOUNT,
            "Destination": DESTINATION,
            "Amount": {"currency": "USD", "issuer": ACCOUNT, "value": "1.5"},
            "SendMax": {"currency": "USD", "issuer": ACCOUNT, "value": "-0.002"},
            "Fee": "12",
            "Memos": [{"Memo": {"MemoType": "01", "MemoData": "ABCD"}}],
            "InvoiceID": "00".repeat(31) + "01",
        });
        assert_eq!(decode(&encode(&tx).unwrap()).unwrap(), tx);
    }

    #[test]
    fn paths_uint64_and_vector256_roundtrip() {
        let tx = json!({
            "TransactionType": "Payment",
            "Account": ACCOUNT,
            "Paths": [
                [{"account": DESTINATION}],
                [{"currency": "USD", "issuer": ACCOUNT}, {"currency": "XRP"}],
            ],
        });
        assert_eq!(decode(&encode(&tx).unwrap()).unwrap(), tx);

        let ledger_entry = json!({
            "LedgerEntryType": "AccountRoot",
            "IndexNext": "00000000000000FF",
            "Hashes": ["AB".repeat(32), "CD".repeat(32)],
        });
        assert_eq!(decode(&encode(&ledger_entry).unwrap()).unwrap(), ledger_entry);
    }

    #[test]
    fn transaction_result_by_name() {
        let meta = json!({"TransactionResult": "tesSUCCESS"});
        assert_eq!(decode(&encode(&meta).unwrap()).unwrap(), meta);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = encode(&json!({"NotAField": 1})).unwrap_err();
        assert!(matches!(err, CodecError::UnknownField(_)));
    }

    #[test]
    fn wrong_shapes_rejected() {
        assert!(matches!(encode(&json!([1, 2])), Err(CodecError::Json(_))));
        assert!(matches!(
            encode(&json!({"Sequence": "one"})),
            Err(CodecError::Json(_))
        ));
        assert!(encode(&json!({"Sequence": 1u64 << 40}))
            .unwrap_err()
            .is_invalid_value());
        assert!(encode(&json!({"TransactionType": "NoSuchType"}))
            .unwrap_err()
            .is_invalid_value());
        assert!(matches!(
            encode(&json!({"Memos": [{"Memo": {}, "Extra": {}}]})),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn array_wrapper_must_be_an_object_field() {
        let err = encode(&json!({"Memos": [{"Sequence": {}}]})).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn issued_amount_in_native_currency_rejected() {
        let tx = json!({"Amount": {"currency": "XRP", "issuer": ACCOUNT, "value": "1"}});
        assert!(encode(&tx).unwrap_err().is_invalid_value());
    }

    #[test]
    fn signing_encodings_carry_their_prefixes() {
        let single = encode_for_signing(&payment()).unwrap();
        assert!(single.starts_with("53545800"));
        assert_eq!(&single[8..], encode(&payment()).unwrap());

        let multi = encode_for_multisigning(&payment(), DESTINATION).unwrap();
        assert!(multi.starts_with("534D5400"));
        let signer = ClassicAddressCodec.decode_account_id(DESTINATION).unwrap();
        assert!(multi.ends_with(&signer.to_hex()));
    }
}
