//! Fixed-width hashes: raw bytes, no length prefix.

use std::fmt;
use std::str::FromStr;

use super::uint::check_fixed_hint;
use super::WireType;
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};

/// An opaque `N`-byte hash.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash<const N: usize>([u8; N]);

/// 128-bit hash (e.g. `EmailHash`).
pub type Hash128 = Hash<16>;
/// 160-bit hash (e.g. `TakerPaysCurrency`).
pub type Hash160 = Hash<20>;
/// 256-bit hash (transaction and ledger object identifiers).
pub type Hash256 = Hash<32>;

impl<const N: usize> Hash<N> {
    /// Width of the hash in bytes.
    pub const LENGTH: usize = N;

    pub const fn new(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// The all-zero hash.
    pub const fn zero() -> Self {
        Self([0u8; N])
    }

    /// Builds a hash from a slice of exactly `N` bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; N] = slice.try_into().map_err(|_| {
            CodecError::InvalidLength(format!("expected {N}-byte hash, got {} bytes", slice.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Upper-case hex, the form hashes take in JSON.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(s)?)
    }
}

impl<const N: usize> WireType for Hash<N> {
    const TYPE_NAME: &'static str = "Hash";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0);
        Ok(())
    }

    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
        check_fixed_hint(Self::TYPE_NAME, N, length_hint)?;
        Ok(Self(parser.read_array()?))
    }
}

impl<const N: usize> From<[u8; N]> for Hash<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> FromStr for Hash<N> {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl<const N: usize> fmt::Display for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: usize> fmt::Debug for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash{}({})", N * 8, self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX_HASH: &str = "C53ECF838647FA5A4C780377025FEC7999AB4182590510CA461444B207AB74A9";

    #[test]
    fn hash256_roundtrips_hex() {
        let hash: Hash256 = TX_HASH.parse().unwrap();
        assert_eq!(hash.to_string(), TX_HASH);
        assert_eq!(hash.to_bytes().unwrap().len(), 32);
    }

    #[test]
    fn lowercase_hex_is_accepted_and_printed_upper() {
        let hash = Hash128::from_hex("00000000000000000000000000000abc").unwrap();
        assert_eq!(hash.to_hex(), "00000000000000000000000000000ABC");
    }

    #[test]
    fn wrong_width_is_invalid_length() {
        assert!(matches!(
            Hash160::from_hex("ABCD"),
            Err(CodecError::InvalidLength(_))
        ));
        assert!(matches!(
            Hash256::from_bytes(&[0u8; 32], Some(20)),
            Err(CodecError::InvalidLength(_))
        ));
    }

    #[test]
    fn decode_consumes_exactly_the_width() {
        let mut bytes = vec![0x11u8; 20];
        bytes.push(0xFF);
        let (hash, consumed) = Hash160::from_bytes(&bytes, None).unwrap();
        assert_eq!(consumed, 20);
        assert_eq!(hash, Hash160::new([0x11; 20]));
    }

    #[test]
    fn short_input_is_truncated() {
        assert_eq!(
            Hash256::from_bytes(&[0u8; 31], None),
            Err(CodecError::truncated(32, 31))
        );
    }

    #[test]
    fn non_hex_is_invalid_value() {
        assert!(Hash128::from_hex("zz").unwrap_err().is_invalid_value());
    }
}
