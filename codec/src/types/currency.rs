//! 160-bit currency codes.
//!
//! Two layouts share the 20 bytes:
//!
//! ```text
//! standard:     00 x 12 | 3 ASCII chars | 00 x 5
//! non-standard: any 20 bytes whose first byte is not 0x00
//! ```
//!
//! The all-zero code denotes the native asset. It is legal in path steps but
//! never as the currency of an issued amount.

use std::fmt;
use std::str::FromStr;

use super::WireType;
use super::uint::check_fixed_hint;
use crate::binary::BinaryParser;
use crate::config::CURRENCY_CODE_LENGTH;
use crate::error::{CodecError, Result};

/// Native asset ticker.
pub const NATIVE_CURRENCY_CODE: &str = "XRP";

const ISO_OFFSET: usize = 12;
const ISO_LENGTH: usize = 3;

/// Characters allowed in a three-letter standard code.
fn is_iso_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"?!@#$%^&*<>(){}[]|".contains(&c)
}

/// A 20-byte currency code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency([u8; CURRENCY_CODE_LENGTH]);

impl Currency {
    /// The native asset (all zeros).
    pub const NATIVE: Self = Self([0u8; CURRENCY_CODE_LENGTH]);

    pub const fn from_raw(bytes: [u8; CURRENCY_CODE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a three-character code (`"USD"`) or 40 hex characters.
    ///
    /// `"XRP"` maps to the native code; everything else in three characters
    /// becomes a standard code.
    pub fn from_code(code: &str) -> Result<Self> {
        if code.len() == ISO_LENGTH {
            if code == NATIVE_CURRENCY_CODE {
                return Ok(Self::NATIVE);
            }
            let ascii = code.as_bytes();
            if !ascii.iter().all(|&c| is_iso_char(c)) {
                return Err(CodecError::InvalidValue(format!(
                    "invalid characters in currency code {code:?}"
                )));
            }
            let mut bytes = [0u8; CURRENCY_CODE_LENGTH];
            bytes[ISO_OFFSET..ISO_OFFSET + ISO_LENGTH].copy_from_slice(ascii);
            return Ok(Self(bytes));
        }

        if code.len() == CURRENCY_CODE_LENGTH * 2 {
            let raw = hex::decode(code)?;
            let mut bytes = [0u8; CURRENCY_CODE_LENGTH];
            bytes.copy_from_slice(&raw);
            return Ok(Self(bytes));
        }

        Err(CodecError::InvalidValue(format!(
            "currency must be 3 characters or 40 hex digits, got {code:?}"
        )))
    }

    pub fn as_bytes(&self) -> &[u8; CURRENCY_CODE_LENGTH] {
        &self.0
    }

    pub fn is_native(&self) -> bool {
        self.0 == [0u8; CURRENCY_CODE_LENGTH]
    }

    /// The three-character code when this uses the standard layout.
    pub fn iso_code(&self) -> Option<&str> {
        let (head, rest) = self.0.split_at(ISO_OFFSET);
        let (iso, tail) = rest.split_at(ISO_LENGTH);
        let standard = head.iter().all(|&b| b == 0)
            && tail.iter().all(|&b| b == 0)
            && iso.iter().all(|&c| is_iso_char(c));
        if standard {
            std::str::from_utf8(iso).ok()
        } else {
            None
        }
    }

    /// Display form: `XRP`, the ISO code, or 40 hex digits.
    pub fn to_code(&self) -> String {
        if self.is_native() {
            return NATIVE_CURRENCY_CODE.to_string();
        }
        match self.iso_code() {
            Some(iso) if iso != NATIVE_CURRENCY_CODE => iso.to_string(),
            _ => hex::encode_upper(self.0),
        }
    }
}

impl WireType for Currency {
    const TYPE_NAME: &'static str = "Currency";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&self.0);
        Ok(())
    }

    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
        check_fixed_hint(Self::TYPE_NAME, CURRENCY_CODE_LENGTH, length_hint)?;
        Ok(Self(parser.read_array()?))
    }
}

impl FromStr for Currency {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.to_code())
    }
}
