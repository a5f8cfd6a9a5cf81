//! # Address Codec
//!
//! The codec core only handles raw 20-byte account IDs. Turning them into
//! the strings people paste into wallets is a separate collaborator behind
//! [`AddressCodec`], so alternative address formats can be plugged into the
//! JSON layer without touching the wire code.
//!
//! [`ClassicAddressCodec`] implements the standard format:
//!
//! ```text
//! payload  = 0x00 || account_id (20 bytes)
//! checksum = SHA-256(SHA-256(payload))[..4]
//! address  = base58(payload || checksum)    ripple alphabet, starts with 'r'
//! ```

use crate::config::{ACCOUNT_ADDRESS_VERSION, ACCOUNT_ID_LENGTH, ADDRESS_CHECKSUM_LENGTH};
use crate::crypto::double_sha256;
use crate::error::{CodecError, Result};
use crate::types::AccountId;

/// Converts between account IDs and their human-readable form.
pub trait AddressCodec: Send + Sync {
    fn encode_account_id(&self, account: &AccountId) -> String;

    fn decode_account_id(&self, address: &str) -> Result<AccountId>;
}

/// Base58Check addresses with the ripple alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicAddressCodec;

impl ClassicAddressCodec {
    pub fn new() -> Self {
        Self
    }
}

impl AddressCodec for ClassicAddressCodec {
    fn encode_account_id(&self, account: &AccountId) -> String {
        let mut payload = Vec::with_capacity(1 + ACCOUNT_ID_LENGTH + ADDRESS_CHECKSUM_LENGTH);
        payload.push(ACCOUNT_ADDRESS_VERSION);
        payload.extend_from_slice(account.as_bytes());
        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[..ADDRESS_CHECKSUM_LENGTH]);
        bs58::encode(payload)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_string()
    }

    fn decode_account_id(&self, address: &str) -> Result<AccountId> {
        let raw = bs58::decode(address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_vec()
            .map_err(|err| CodecError::InvalidValue(format!("bad address {address:?}: {err}")))?;

        if raw.len() != 1 + ACCOUNT_ID_LENGTH + ADDRESS_CHECKSUM_LENGTH {
            return Err(CodecError::InvalidValue(format!(
                "address {address:?} decodes to {} bytes",
                raw.len()
            )));
        }
        let (payload, checksum) = raw.split_at(1 + ACCOUNT_ID_LENGTH);
        if double_sha256(payload)[..ADDRESS_CHECKSUM_LENGTH] != *checksum {
            return Err(CodecError::InvalidValue(format!(
                "address {address:?} has a bad checksum"
            )));
        }
        if payload[0] != ACCOUNT_ADDRESS_VERSION {
            return Err(CodecError::InvalidValue(format!(
                "address {address:?} has version byte {}, not an account",
                payload[0]
            )));
        }
        AccountId::from_slice(&payload[1..])
    }
}
