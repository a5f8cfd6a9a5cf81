//! Account identifiers.
//!
//! On the wire an account is always 20 raw bytes. When an AccountID *field*
//! is serialized it also carries a VL prefix, which is always 20; the prefix
//! exists for forward compatibility, not because the length can vary. Inside
//! amounts and path steps the same 20 bytes appear without a prefix.
//!
//! Human-readable addresses are the address codec's business
//! ([`crate::address`]); this type only knows raw bytes and hex.

use std::fmt;

use super::WireType;
use crate::binary::BinaryParser;
use crate::config::ACCOUNT_ID_LENGTH;
use crate::error::{CodecError, Result};

/// A 20-byte account identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; ACCOUNT_ID_LENGTH]);

impl AccountId {
    /// The all-zero account, which owns nothing and signs nothing.
    pub const ZERO: Self = Self([0u8; ACCOUNT_ID_LENGTH]);

    pub const fn new(bytes: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; ACCOUNT_ID_LENGTH] = slice.try_into().map_err(|_| {
            CodecError::InvalidLength(format!(
                "account id must be {ACCOUNT_ID_LENGTH} bytes, got {}",
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl WireType for AccountId {
    const TYPE_NAME: &'static str = "AccountID";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0);
        Ok(())
    }

    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
        if let Some(n) = length_hint {
            if n != ACCOUNT_ID_LENGTH {
                return Err(CodecError::InvalidLength(format!(
                    "account id VL length must be {ACCOUNT_ID_LENGTH}, got {n}"
                )));
            }
        }
        Ok(Self(parser.read_array()?))
    }
}

impl From<[u8; ACCOUNT_ID_LENGTH]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "B5F762798A53D543A014CAF8B297CFF8F2F937E8";

    #[test]
    fn hex_roundtrip() {
        let account = AccountId::from_hex(GENESIS).unwrap();
        assert_eq!(account.to_string(), GENESIS);
        assert_eq!(account.to_bytes().unwrap().len(), 20);
    }

    #[test]
    fn vl_length_other_than_20_is_rejected() {
        let bytes = [0u8; 32];
        assert!(matches!(
            AccountId::from_bytes(&bytes, Some(32)),
            Err(CodecError::InvalidLength(_))
        ));
        assert!(AccountId::from_bytes(&bytes, Some(20)).is_ok());
        assert!(AccountId::from_bytes(&bytes, None).is_ok());
    }

    #[test]
    fn wrong_slice_length_is_rejected() {
        assert!(AccountId::from_slice(&[1, 2, 3]).is_err());
    }

    #[test]
    fn ordering_is_bytewise() {
        let low = AccountId::new([0x01; 20]);
        let high = AccountId::new([0x02; 20]);
        assert!(low < high);
        assert!(AccountId::ZERO < low);
    }
}
