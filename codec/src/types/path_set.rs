//! Payment paths.
//!
//! ```text
//! step      = flags (1 byte) [account 20] [currency 20] [issuer 20]
//! path      = step+
//! path set  = path (0xFF path)* 0x00
//! ```
//!
//! The flags byte says which of the three components follow, in that fixed
//! order. A step with no components, an empty path and unknown flag bits are
//! all rejected.

use super::account_id::AccountId;
use super::currency::Currency;
use super::WireType;
use crate::binary::BinaryParser;
use crate::config::{
    PATHSET_END_BYTE, PATH_SEPARATOR_BYTE, PATH_STEP_ACCOUNT, PATH_STEP_CURRENCY,
    PATH_STEP_ISSUER,
};
use crate::error::{CodecError, Result};

const KNOWN_STEP_FLAGS: u8 = PATH_STEP_ACCOUNT | PATH_STEP_CURRENCY | PATH_STEP_ISSUER;

/// One hop of a path: an account, a currency conversion, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub account: Option<AccountId>,
    pub currency: Option<Currency>,
    pub issuer: Option<AccountId>,
}

impl PathStep {
    /// A pure account hop.
    pub fn account(account: AccountId) -> Self {
        Self {
            account: Some(account),
            ..Self::default()
        }
    }

    /// A currency hop, optionally pinned to an issuer.
    pub fn currency(currency: Currency, issuer: Option<AccountId>) -> Self {
        Self {
            currency: Some(currency),
            issuer,
            ..Self::default()
        }
    }

    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.account.is_some() {
            flags |= PATH_STEP_ACCOUNT;
        }
        if self.currency.is_some() {
            flags |= PATH_STEP_CURRENCY;
        }
        if self.issuer.is_some() {
            flags |= PATH_STEP_ISSUER;
        }
        flags
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let flags = self.flags();
        if flags == 0 {
            return Err(CodecError::InvalidValue("path step has no components".into()));
        }
        out.push(flags);
        if let Some(account) = &self.account {
            account.write_to(out)?;
        }
        if let Some(currency) = &self.currency {
            currency.write_to(out)?;
        }
        if let Some(issuer) = &self.issuer {
            issuer.write_to(out)?;
        }
        Ok(())
    }

    fn read_from(parser: &mut BinaryParser<'_>, flags: u8) -> Result<Self> {
        if flags & !KNOWN_STEP_FLAGS != 0 {
            return Err(CodecError::MalformedInput(format!(
                "unknown path step flags 0x{flags:02X}"
            )));
        }
        let mut step = Self::default();
        if flags & PATH_STEP_ACCOUNT != 0 {
            step.account = Some(AccountId::read_from(parser, None)?);
        }
        if flags & PATH_STEP_CURRENCY != 0 {
            step.currency = Some(Currency::read_from(parser, None)?);
        }
        if flags & PATH_STEP_ISSUER != 0 {
            step.issuer = Some(AccountId::read_from(parser, None)?);
        }
        Ok(step)
    }
}

/// An ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(pub Vec<PathStep>);

impl Path {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }
}

/// Alternative paths a payment may take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathSet(pub Vec<Path>);

impl PathSet {
    pub fn new(paths: Vec<Path>) -> Self {
        Self(paths)
    }

    pub fn paths(&self) -> &[Path] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl WireType for PathSet {
    const TYPE_NAME: &'static str = "PathSet";

    fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        for (index, path) in self.0.iter().enumerate() {
            if path.0.is_empty() {
                return Err(CodecError::InvalidValue(format!("path {index} is empty")));
            }
            if index > 0 {
                out.push(PATH_SEPARATOR_BYTE);
            }
            for step in &path.0 {
                step.write_to(out)?;
            }
        }
        out.push(PATHSET_END_BYTE);
        Ok(())
    }

    fn read_from(parser: &mut BinaryParser<'_>, _length_hint: Option<usize>) -> Result<Self> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        loop {
            match parser.read_u8()? {
                PATHSET_END_BYTE => {
                    if current.is_empty() && !paths.is_empty() {
                        return Err(CodecError::MalformedInput(
                            "path set ends with an empty path".into(),
                        ));
                    }
                    if !current.is_empty() {
                        paths.push(Path(current));
                    }
                    return Ok(Self(paths));
                }
                PATH_SEPARATOR_BYTE => {
                    if current.is_empty() {
                        return Err(CodecError::MalformedInput(
                            "empty path before separator".into(),
                        ));
                    }
                    paths.push(Path(std::mem::take(&mut current)));
                }
                flags => current.push(PathStep::read_from(parser, flags)?),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> AccountId {
        AccountId::new([byte; 20])
    }

    fn usd() -> Currency {
        Currency::from_code("USD").unwrap()
    }

    #[test]
    fn single_account_step() {
        let set = PathSet::new(vec![Path::new(vec![PathStep::account(account(0xAA))])]);
        let bytes = set.to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 20 + 1);
        assert_eq!(bytes[0], PATH_STEP_ACCOUNT);
        assert_eq!(*bytes.last().unwrap(), PATHSET_END_BYTE);
        assert_eq!(PathSet::from_bytes(&bytes, None).unwrap(), (set, 22));
    }

    #[test]
    fn two_paths_with_mixed_steps() {
        let set = PathSet::new(vec![
            Path::new(vec![
                PathStep::currency(usd(), Some(account(0x01))),
                PathStep::account(account(0x02)),
            ]),
            Path::new(vec![PathStep::currency(Currency::NATIVE, None)]),
        ]);
        let bytes = set.to_bytes().unwrap();

        // 0x30 + currency + issuer, 0x01 + account, separator, 0x10 + currency, end.
        assert_eq!(bytes[0], PATH_STEP_CURRENCY | PATH_STEP_ISSUER);
        assert_eq!(bytes[41], PATH_STEP_ACCOUNT);
        assert_eq!(bytes[62], PATH_SEPARATOR_BYTE);
        assert_eq!(bytes[63], PATH_STEP_CURRENCY);
        assert_eq!(bytes.len(), 41 + 21 + 1 + 21 + 1);

        let (decoded, consumed) = PathSet::from_bytes(&bytes, None).unwrap();
        assert_eq!(decoded, set);
        assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn all_three_components_in_one_step() {
        let step = PathStep {
            account: Some(account(0x0A)),
            currency: Some(usd()),
            issuer: Some(account(0x0B)),
        };
        assert_eq!(step.flags(), 0x31);
        let set = PathSet::new(vec![Path::new(vec![step])]);
        let bytes = set.to_bytes().unwrap();
        assert_eq!(bytes.len(), 1 + 60 + 1);
        assert_eq!(PathSet::from_bytes(&bytes, None).unwrap().0, set);
    }

    #[test]
    fn empty_path_set_is_just_the_terminator() {
        let set = PathSet::default();
        assert_eq!(set.to_bytes().unwrap(), vec![PATHSET_END_BYTE]);
        assert!(PathSet::from_bytes(&[PATHSET_END_BYTE], None).unwrap().0.is_empty());
    }

    #[test]
    fn empty_paths_and_steps_rejected_on_encode() {
        let set = PathSet::new(vec![Path::default()]);
        assert!(set.to_bytes().unwrap_err().is_invalid_value());

        let set = PathSet::new(vec![Path::new(vec![PathStep::default()])]);
        assert!(set.to_bytes().unwrap_err().is_invalid_value());
    }

    #[test]
    fn leading_or_doubled_separator_rejected() {
        assert!(PathSet::from_bytes(&[PATH_SEPARATOR_BYTE, PATHSET_END_BYTE], None)
            .unwrap_err()
            .is_malformed_input());

        let mut bytes = vec![PATH_STEP_ACCOUNT];
        bytes.extend_from_slice(&[0x11; 20]);
        bytes.extend_from_slice(&[PATH_SEPARATOR_BYTE, PATHSET_END_BYTE]);
        assert!(PathSet::from_bytes(&bytes, None).unwrap_err().is_malformed_input());
    }

    #[test]
    fn unknown_flags_rejected() {
        let mut bytes = vec![0x02];
        bytes.extend_from_slice(&[0u8; 20]);
        bytes.push(PATHSET_END_BYTE);
        assert!(PathSet::from_bytes(&bytes, None).unwrap_err().is_malformed_input());
    }

    #[test]
    fn missing_terminator_is_truncated() {
        let mut bytes = vec![PATH_STEP_ACCOUNT];
        bytes.extend_from_slice(&[0x11; 20]);
        assert_eq!(
            PathSet::from_bytes(&bytes, None),
            Err(CodecError::truncated(1, 0))
        );
    }
}
