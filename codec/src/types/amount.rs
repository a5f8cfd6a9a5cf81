//! Currency amounts.
//!
//! Every amount starts with a 64-bit word whose top bit says which variant
//! follows:
//!
//! ```text
//! native: 0 | positive | 62-bit drop count                        (8 bytes)
//! issued: 1 | positive | exponent + 97 (8 bits) | mantissa (54)   (8 bytes)
//!         + 20-byte currency code + 20-byte issuer account id     (48 total)
//! ```
//!
//! Issued values are kept normalized: a non-zero mantissa always lies in
//! `[10^15, 10^16 - 1]` and the exponent in `[-96, 80]`. Zero has exactly one
//! encoding, `0x8000000000000000`. Encoding and decoding both enforce these
//! invariants, so every amount has exactly one byte representation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::account_id::AccountId;
use super::currency::Currency;
use super::WireType;
use crate::binary::BinaryParser;
use crate::config::{
    AMOUNT_ISSUED_BIT, AMOUNT_MANTISSA_MASK, AMOUNT_NATIVE_VALUE_MASK, AMOUNT_POSITIVE_BIT,
    ISSUED_EXPONENT_BIAS, ISSUED_ZERO, MAX_ISSUED_DIGITS, MAX_ISSUED_EXPONENT,
    MAX_ISSUED_MANTISSA, MAX_NATIVE_DROPS, MIN_ISSUED_EXPONENT, MIN_ISSUED_MANTISSA,
};
use crate::error::{CodecError, Result};

// ---------------------------------------------------------------------------
// NativeAmount
// ---------------------------------------------------------------------------

/// A quantity of the native asset, in drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeAmount {
    drops: u64,
    negative: bool,
}

impl NativeAmount {
    /// Zero drops.
    pub const ZERO: Self = Self {
        drops: 0,
        negative: false,
    };

    /// A non-negative drop count. Fails above the total supply.
    pub fn from_drops(drops: u64) -> Result<Self> {
        Self::new(drops, false)
    }

    /// A signed drop count. Negative zero is not a value.
    pub fn new(drops: u64, negative: bool) -> Result<Self> {
        if drops > MAX_NATIVE_DROPS {
            return Err(CodecError::InvalidValue(format!(
                "{drops} drops exceeds the maximum of {MAX_NATIVE_DROPS}"
            )));
        }
        if negative && drops == 0 {
            return Err(CodecError::InvalidValue("negative zero native amount".into()));
        }
        Ok(Self { drops, negative })
    }

    pub fn drops(&self) -> u64 {
        self.drops
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    fn to_word(self) -> u64 {
        let sign = if self.negative { 0 } else { AMOUNT_POSITIVE_BIT };
        sign | self.drops
    }

    fn from_word(word: u64) -> Result<Self> {
        debug_assert_eq!(word & AMOUNT_ISSUED_BIT, 0);
        let negative = word & AMOUNT_POSITIVE_BIT == 0;
        Self::new(word & AMOUNT_NATIVE_VALUE_MASK, negative)
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.drops)
        } else {
            write!(f, "{}", self.drops)
        }
    }
}

impl FromStr for NativeAmount {
    type Err = CodecError;

    /// Parses a whole number of drops, optionally signed.
    fn from_str(s: &str) -> Result<Self> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::InvalidValue(format!(
                "native amounts are whole drops, got {s:?}"
            )));
        }
        let drops = digits
            .parse::<u64>()
            .map_err(|_| CodecError::InvalidValue(format!("drop count out of range: {s:?}")))?;
        Self::new(drops, negative)
    }
}

// ---------------------------------------------------------------------------
// IssuedValue
// ---------------------------------------------------------------------------

/// A normalized decimal `(-1)^negative * mantissa * 10^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssuedValue {
    mantissa: u64,
    exponent: i32,
    negative: bool,
}

impl IssuedValue {
    /// Canonical zero.
    pub const ZERO: Self = Self {
        mantissa: 0,
        exponent: 0,
        negative: false,
    };

    /// Builds and normalizes a value.
    ///
    /// Trailing digits are never dropped: a mantissa that needs more than 16
    /// significant digits is rejected. Values too small to represent collapse
    /// to zero; values too large are rejected.
    pub fn new(mantissa: u64, exponent: i32, negative: bool) -> Result<Self> {
        if mantissa == 0 {
            return Ok(Self::ZERO);
        }

        let mut mantissa = mantissa;
        let mut exponent = exponent;

        while mantissa > MAX_ISSUED_MANTISSA {
            if mantissa % 10 != 0 {
                return Err(CodecError::InvalidValue(format!(
                    "issued value needs more than {MAX_ISSUED_DIGITS} significant digits"
                )));
            }
            mantissa /= 10;
            exponent = exponent.checked_add(1).ok_or_else(overflow)?;
        }

        while mantissa < MIN_ISSUED_MANTISSA && exponent > MIN_ISSUED_EXPONENT {
            mantissa *= 10;
            exponent -= 1;
        }

        if mantissa < MIN_ISSUED_MANTISSA || exponent < MIN_ISSUED_EXPONENT {
            return Ok(Self::ZERO);
        }
        if exponent > MAX_ISSUED_EXPONENT {
            return Err(overflow());
        }

        Ok(Self {
            mantissa,
            exponent,
            negative,
        })
    }

    pub fn mantissa(&self) -> u64 {
        self.mantissa
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// The 64-bit amount word.
    pub fn to_word(&self) -> u64 {
        if self.is_zero() {
            return ISSUED_ZERO;
        }
        let sign = if self.negative { 0 } else { AMOUNT_POSITIVE_BIT };
        let biased = (self.exponent + ISSUED_EXPONENT_BIAS) as u64;
        AMOUNT_ISSUED_BIT | sign | (biased << 54) | self.mantissa
    }

    /// Parses a 64-bit amount word, rejecting every non-canonical form.
    pub fn from_word(word: u64) -> Result<Self> {
        if word & AMOUNT_ISSUED_BIT == 0 {
            return Err(CodecError::InvalidValue(
                "native amount word where an issued value was expected".into(),
            ));
        }
        if word == ISSUED_ZERO {
            return Ok(Self::ZERO);
        }

        let mantissa = word & AMOUNT_MANTISSA_MASK;
        let exponent = ((word >> 54) & 0xFF) as i32 - ISSUED_EXPONENT_BIAS;
        let negative = word & AMOUNT_POSITIVE_BIT == 0;

        if mantissa == 0 {
            return Err(CodecError::InvalidValue(format!(
                "non-canonical issued zero 0x{word:016X}"
            )));
        }
        if !(MIN_ISSUED_MANTISSA..=MAX_ISSUED_MANTISSA).contains(&mantissa) {
            return Err(CodecError::InvalidValue(format!(
                "issued mantissa {mantissa} is not normalized"
            )));
        }
        if !(MIN_ISSUED_EXPONENT..=MAX_ISSUED_EXPONENT).contains(&exponent) {
            return Err(CodecError::InvalidValue(format!(
                "issued exponent {exponent} out of range"
            )));
        }

        Ok(Self {
            mantissa,
            exponent,
            negative,
        })
    }

    /// Mantissa with trailing zeros moved into the exponent.
    fn significant(&self) -> (u64, i32) {
        let (mut m, mut e) = (self.mantissa, self.exponent);
        while m != 0 && m % 10 == 0 {
            m /= 10;
            e += 1;
        }
        (m, e)
    }
}

fn overflow() -> CodecError {
    CodecError::InvalidValue(format!(
        "issued value exponent exceeds {MAX_ISSUED_EXPONENT}"
    ))
}

impl fmt::Display for IssuedValue {
    /// Plain decimal notation, no exponent: `1.5`, `-0.0025`, `1200`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let (m, e) = self.significant();
        let digits = m.to_string();
        let sign = if self.negative { "-" } else { "" };

        if e >= 0 {
            return write!(f, "{sign}{digits}{}", "0".repeat(e as usize));
        }
        let point = digits.len() as i64 + e as i64;
        if point > 0 {
            let (int, frac) = digits.split_at(point as usize);
            write!(f, "{sign}{int}.{frac}")
        } else {
            write!(f, "{sign}0.{}{digits}", "0".repeat((-point) as usize))
        }
    }
}

impl FromStr for IssuedValue {
    type Err = CodecError;

    /// Accepts `[-]digits[.digits][(e|E)[+|-]digits]`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CodecError::InvalidValue(format!("invalid decimal value {s:?}"));

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (number, exp) = match body.find(['e', 'E']) {
            Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
            None => (body, None),
        };
        let (int_part, frac_part) = match number.split_once('.') {
            Some((i, f)) => (i, f),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        // Out-of-range exponents saturate, then get clamped below.
        let exponent: i64 = match exp {
            Some(e) => e.parse::<i64>().map_err(|_| invalid())?,
            None => 0,
        };
        let exponent = exponent.saturating_sub(frac_part.len() as i64);

        let all_digits: String = int_part.chars().chain(frac_part.chars()).collect();
        let trimmed = all_digits.trim_start_matches('0');
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        let significant = trimmed.trim_end_matches('0');
        let exponent = exponent.saturating_add((trimmed.len() - significant.len()) as i64);

        if significant.len() > MAX_ISSUED_DIGITS {
            return Err(CodecError::InvalidValue(format!(
                "{s:?} has more than {MAX_ISSUED_DIGITS} significant digits"
            )));
        }
        let mantissa = significant.parse::<u64>().map_err(|_| invalid())?;

        // Anything this far out is zero or an overflow either way.
        let exponent = exponent.clamp(i32::MIN as i64 / 2, i32::MAX as i64 / 2) as i32;
        Self::new(mantissa, exponent, negative)
    }
}

impl PartialOrd for IssuedValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IssuedValue {
    fn cmp(&self, other: &Self) -> Ordering {
        fn sign(v: &IssuedValue) -> i8 {
            match (v.is_zero(), v.negative) {
                (true, _) => 0,
                (false, true) => -1,
                (false, false) => 1,
            }
        }
        let by_sign = sign(self).cmp(&sign(other));
        if by_sign != Ordering::Equal || self.is_zero() {
            return by_sign;
        }
        // Normalized values order by exponent first, then mantissa.
        let magnitude = (self.exponent, self.mantissa).cmp(&(other.exponent, other.mantissa));
        if self.negative {
            magnitude.reverse()
        } else {
            magnitude
        }
    }
}

// ---------------------------------------------------------------------------
// IssuedAmount / Amount
// ---------------------------------------------------------------------------

/// An amount of a non-native asset together with its issuer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IssuedAmount {
    pub value: IssuedValue,
    pub currency: Currency,
    pub issuer: AccountId,
}

impl IssuedAmount {
    /// Fails when `currency` is the native code.
    pub fn new(value: IssuedValue, currency: Currency, issuer: AccountId) -> Result<Self> {
        if currency.is_native() {
            return Err(CodecError::InvalidValue(
                "issued amounts cannot use the native currency code".into(),
            ));
        }
        Ok(Self {
            value,
            currency,
            issuer,
        })
    }
}

/// Either native drops or an issued amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
    Native(NativeAmount),
    Issued(IssuedAmount),
}

impl Amount {
    /// Shorthand for a non-negative native amount.
    pub fn drops(drops: u64) -> Result<Self> {
        Ok(Self::Native(NativeAmount::from_drops(drops)?))
    }

    /// Shorthand for an issued amount parsed from a decimal string.
    pub fn issued(value: &str, currency: &str, issuer: AccountId) -> Result<Self> {
        Ok(Self::Issued(IssuedAmount::new(
            value.parse()?,
            Currency::from_code(currency)?,
            issuer,
        )?))
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }
}

impl WireType for Amount {
    const TYPE_NAME: &'static str = "Amount";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        match self {
            Self::Native(native) => {
                out.extend_from_slice(&native.to_word().to_be_bytes());
            }
            Self::Issued(issued) => {
                if issued.currency.is_native() {
                    return Err(CodecError::InvalidValue(
                        "issued amounts cannot use the native currency code".into(),
                    ));
                }
                out.extend_from_slice(&issued.value.to_word().to_be_bytes());
                issued.currency.write_to(out)?;
                issued.issuer.write_to(out)?;
            }
        }
        Ok(())
    }

    fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
        let word = parser.read_u64()?;
        let amount = if word & AMOUNT_ISSUED_BIT == 0 {
            Self::Native(NativeAmount::from_word(word)?)
        } else {
            let value = IssuedValue::from_word(word)?;
            let currency = Currency::read_from(parser, None)?;
            let issuer = AccountId::read_from(parser, None)?;
            Self::Issued(IssuedAmount::new(value, currency, issuer)?)
        };
        if let Some(n) = length_hint {
            let width = if amount.is_native() { 8 } else { 48 };
            if n != width {
                return Err(CodecError::InvalidLength(format!(
                    "amount is {width} bytes, got length {n}"
                )));
            }
        }
        Ok(amount)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => write!(f, "{native} drops"),
            Self::Issued(issued) => {
                write!(f, "{} {}/{}", issued.value, issued.currency, issued.issuer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> AccountId {
        AccountId::from_hex("B5F762798A53D543A014CAF8B297CFF8F2F937E8").unwrap()
    }

    fn encode_hex(amount: &Amount) -> String {
        hex::encode_upper(amount.to_bytes().unwrap())
    }

    fn decode(hex_str: &str) -> Result<Amount> {
        Amount::from_bytes(&hex::decode(hex_str).unwrap(), None).map(|(a, _)| a)
    }

    #[test]
    fn native_zero() {
        let zero = Amount::drops(0).unwrap();
        assert_eq!(encode_hex(&zero), "4000000000000000");
        assert_eq!(decode("4000000000000000").unwrap(), zero);
    }

    #[test]
    fn native_fixtures() {
        assert_eq!(encode_hex(&Amount::drops(1).unwrap()), "4000000000000001");
        assert_eq!(encode_hex(&Amount::drops(10).unwrap()), "400000000000000A");
        assert_eq!(encode_hex(&Amount::drops(12_345).unwrap()), "4000000000003039");
    }

    #[test]
    fn native_maximum() {
        let max = Amount::drops(MAX_NATIVE_DROPS).unwrap();
        assert_eq!(encode_hex(&max), "416345785D8A0000");
        assert_eq!(decode("416345785D8A0000").unwrap(), max);
        assert!(Amount::drops(MAX_NATIVE_DROPS + 1).is_err());
        // One drop above the maximum on the wire.
        assert!(decode("416345785D8A0001").unwrap_err().is_invalid_value());
    }

    #[test]
    fn native_negative() {
        let neg = Amount::Native(NativeAmount::new(1, true).unwrap());
        assert_eq!(encode_hex(&neg), "0000000000000001");
        assert_eq!(decode("0000000000000001").unwrap(), neg);
        assert_eq!("-1".parse::<NativeAmount>().unwrap(), NativeAmount::new(1, true).unwrap());
    }

    #[test]
    fn native_negative_zero_rejected() {
        assert!(NativeAmount::new(0, true).is_err());
        assert!(decode("0000000000000000").unwrap_err().is_invalid_value());
    }

    #[test]
    fn native_parse_rejects_decimals() {
        assert!("1.5".parse::<NativeAmount>().is_err());
        assert!("".parse::<NativeAmount>().is_err());
        assert!("abc".parse::<NativeAmount>().is_err());
    }

    #[test]
    fn issued_zero_is_canonical() {
        let zero: IssuedValue = "0".parse().unwrap();
        assert_eq!(zero, IssuedValue::ZERO);
        assert_eq!(zero.to_word(), 0x8000_0000_0000_0000);
        assert_eq!("-0.000".parse::<IssuedValue>().unwrap(), IssuedValue::ZERO);
        assert_eq!(IssuedValue::from_word(ISSUED_ZERO).unwrap(), IssuedValue::ZERO);
    }

    #[test]
    fn issued_zero_with_extra_bits_rejected() {
        // Positive bit set with a zero mantissa.
        assert!(IssuedValue::from_word(0xC000_0000_0000_0000).is_err());
        // Exponent bits set with a zero mantissa.
        assert!(IssuedValue::from_word(0x8040_0000_0000_0000).is_err());
    }

    #[test]
    fn issued_one_encoding() {
        // 1 = 1000000000000000e-15 → biased exponent 82.
        let one: IssuedValue = "1".parse().unwrap();
        assert_eq!(one.mantissa(), MIN_ISSUED_MANTISSA);
        assert_eq!(one.exponent(), -15);
        assert_eq!(one.to_word(), 0xD483_8D7E_A4C6_8000);
    }

    #[test]
    fn issued_amount_fixture() {
        let amount = Amount::issued("1", "USD", issuer()).unwrap();
        assert_eq!(
            encode_hex(&amount),
            "D4838D7EA4C68000\
             0000000000000000000000005553440000000000\
             B5F762798A53D543A014CAF8B297CFF8F2F937E8"
        );
        let bytes = amount.to_bytes().unwrap();
        let (decoded, consumed) = Amount::from_bytes(&bytes, None).unwrap();
        assert_eq!(decoded, amount);
        assert_eq!(consumed, 48);
    }

    #[test]
    fn non_normalized_mantissa_rejected_on_decode() {
        // Mantissa 1 with exponent 0: positive, biased exponent 97.
        let word: u64 = AMOUNT_ISSUED_BIT | AMOUNT_POSITIVE_BIT | (97u64 << 54) | 1;
        let err = IssuedValue::from_word(word).unwrap_err();
        assert!(err.is_invalid_value());

        let mut bytes = word.to_be_bytes().to_vec();
        bytes.extend_from_slice(Currency::from_code("USD").unwrap().as_bytes());
        bytes.extend_from_slice(issuer().as_bytes());
        assert!(Amount::from_bytes(&bytes, None).unwrap_err().is_invalid_value());
    }

    #[test]
    fn mantissa_above_range_rejected_on_decode() {
        let word: u64 = AMOUNT_ISSUED_BIT | AMOUNT_POSITIVE_BIT | (97u64 << 54) | (MAX_ISSUED_MANTISSA + 1);
        assert!(IssuedValue::from_word(word).is_err());
    }

    #[test]
    fn exponent_out_of_range_rejected_on_decode() {
        // Biased exponent 200 → 103 > 80.
        let word: u64 = AMOUNT_ISSUED_BIT | AMOUNT_POSITIVE_BIT | (200u64 << 54) | MIN_ISSUED_MANTISSA;
        assert!(IssuedValue::from_word(word).is_err());
    }

    #[test]
    fn native_currency_rejected_for_issued() {
        assert!(Amount::issued("1", "XRP", issuer()).is_err());
        let mut bytes = IssuedValue::from_str("1").unwrap().to_word().to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0u8; 20]);
        bytes.extend_from_slice(issuer().as_bytes());
        assert!(Amount::from_bytes(&bytes, None).unwrap_err().is_invalid_value());
    }

    #[test]
    fn normalization() {
        let v = IssuedValue::new(15, -1, false).unwrap();
        assert_eq!(v.mantissa(), 1_500_000_000_000_000);
        assert_eq!(v.exponent(), -15);
        assert_eq!(v, "1.5".parse().unwrap());
        assert_eq!(v, "15e-1".parse().unwrap());
        assert_eq!(v, "0.00015E4".parse().unwrap());
    }

    #[test]
    fn large_mantissa_with_trailing_zeros_normalizes() {
        let v = IssuedValue::new(12_000_000_000_000_000_000, 0, false).unwrap();
        assert_eq!(v.mantissa(), 1_200_000_000_000_000);
        assert_eq!(v.exponent(), 4);
    }

    #[test]
    fn too_many_digits_rejected() {
        assert!("1.2345678901234567".parse::<IssuedValue>().is_err());
        assert!(IssuedValue::new(12_345_678_901_234_567, 0, false).is_err());
        // Sixteen digits are fine.
        assert!("1.234567890123456".parse::<IssuedValue>().is_ok());
    }

    #[test]
    fn overflow_and_underflow() {
        assert!("1e96".parse::<IssuedValue>().is_err());
        assert!("9999999999999999e80".parse::<IssuedValue>().is_ok());
        assert_eq!("1e-200".parse::<IssuedValue>().unwrap(), IssuedValue::ZERO);
        assert_eq!(IssuedValue::new(1, -120, false).unwrap(), IssuedValue::ZERO);
    }

    #[test]
    fn exponents_at_the_i64_limits() {
        assert_eq!(
            "1.5e-9223372036854775808".parse::<IssuedValue>().unwrap(),
            IssuedValue::ZERO
        );
        assert!("10e9223372036854775807"
            .parse::<IssuedValue>()
            .unwrap_err()
            .is_invalid_value());
        assert!("1e9223372036854775808".parse::<IssuedValue>().is_err());
    }

    #[test]
    fn display_is_plain_decimal() {
        for (input, shown) in [
            ("1.5", "1.5"),
            ("-0.0025", "-0.0025"),
            ("1200", "1200"),
            ("0.1", "0.1"),
            ("123.456", "123.456"),
            ("0", "0"),
        ] {
            assert_eq!(input.parse::<IssuedValue>().unwrap().to_string(), shown);
        }
    }

    #[test]
    fn malformed_decimal_strings() {
        for bad in ["", ".", "-", "1.2.3", "abc", "1e", "1e1.5", "--1"] {
            assert!(bad.parse::<IssuedValue>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn negative_issued_roundtrip() {
        let amount = Amount::issued("-7.25", "EUR", issuer()).unwrap();
        let (decoded, _) = Amount::from_bytes(&amount.to_bytes().unwrap(), None).unwrap();
        assert_eq!(decoded, amount);
        let Amount::Issued(issued) = decoded else {
            panic!("expected issued amount");
        };
        assert!(issued.value.is_negative());
        assert_eq!(issued.value.to_string(), "-7.25");
    }

    #[test]
    fn ordering_of_issued_values() {
        let parse = |s: &str| s.parse::<IssuedValue>().unwrap();
        assert!(parse("-2") < parse("-1"));
        assert!(parse("-1") < parse("0"));
        assert!(parse("0") < parse("0.001"));
        assert!(parse("0.5") < parse("2"));
        assert!(parse("99") < parse("100"));
    }

    #[test]
    fn truncated_issued_amount() {
        let amount = Amount::issued("1", "USD", issuer()).unwrap();
        let bytes = amount.to_bytes().unwrap();
        assert!(Amount::from_bytes(&bytes[..30], None)
            .unwrap_err()
            .is_malformed_input());
    }
}
