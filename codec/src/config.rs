//! # Protocol Constants
//!
//! Every magic number of the wire format lives here. The binary encoding is
//! hashed and signed, so none of these can change without breaking every
//! signature ever produced against them. Treat edits to this file as a
//! protocol amendment, not a refactor.

// ---------------------------------------------------------------------------
// Variable-length prefixes
// ---------------------------------------------------------------------------

/// Largest payload length that fits in a single-byte VL prefix.
pub const VL_MAX_ONE_BYTE: usize = 192;

/// Largest payload length that fits in a two-byte VL prefix.
pub const VL_MAX_TWO_BYTE: usize = 12_480;

/// Largest payload length that fits in a three-byte VL prefix. Anything
/// longer cannot be represented on the wire at all.
pub const VL_MAX_THREE_BYTE: usize = 918_744;

/// First byte value that opens a two-byte VL prefix.
pub const VL_TWO_BYTE_MARKER: u8 = 193;

/// First byte value that opens a three-byte VL prefix.
pub const VL_THREE_BYTE_MARKER: u8 = 241;

/// Highest legal first byte of a VL prefix. `0xFF` is reserved.
pub const VL_MAX_MARKER: u8 = 254;

// ---------------------------------------------------------------------------
// Field identifiers
// ---------------------------------------------------------------------------

/// Type and field codes below this value fit in a single nibble of the
/// compact field identifier.
pub const FIELD_ID_NIBBLE_LIMIT: u8 = 16;

/// Encoded field ID of `ObjectEndMarker` (STObject, field 1). Closes every
/// nested object.
pub const OBJECT_END_MARKER: u8 = 0xE1;

/// Encoded field ID of `ArrayEndMarker` (STArray, field 1). Closes every
/// nested array.
pub const ARRAY_END_MARKER: u8 = 0xF1;

/// Schema name of the end-of-object sentinel field.
pub const OBJECT_END_MARKER_NAME: &str = "ObjectEndMarker";

/// Schema name of the end-of-array sentinel field.
pub const ARRAY_END_MARKER_NAME: &str = "ArrayEndMarker";

/// Deepest chain of nested objects and arrays below the top-level object.
/// An array and each of its members count as one level apiece.
pub const MAX_NESTING_DEPTH: usize = 10;

// ---------------------------------------------------------------------------
// Path sets
// ---------------------------------------------------------------------------

/// Separates two paths inside a path set.
pub const PATH_SEPARATOR_BYTE: u8 = 0xFF;

/// Terminates a path set.
pub const PATHSET_END_BYTE: u8 = 0x00;

/// Path step flag: the step names an account.
pub const PATH_STEP_ACCOUNT: u8 = 0x01;

/// Path step flag: the step names a currency.
pub const PATH_STEP_CURRENCY: u8 = 0x10;

/// Path step flag: the step names an issuer.
pub const PATH_STEP_ISSUER: u8 = 0x20;

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Bit 63: set for issued amounts, clear for native drops.
pub const AMOUNT_ISSUED_BIT: u64 = 0x8000_0000_0000_0000;

/// Bit 62: set when the amount is positive (or native zero).
pub const AMOUNT_POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;

/// Low 62 bits of a native amount hold the drop count.
pub const AMOUNT_NATIVE_VALUE_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;

/// Low 54 bits of an issued amount hold the mantissa.
pub const AMOUNT_MANTISSA_MASK: u64 = 0x003F_FFFF_FFFF_FFFF;

/// Maximum number of drops in existence (100 billion units of 10^6 drops).
pub const MAX_NATIVE_DROPS: u64 = 100_000_000_000_000_000;

/// Smallest normalized issued mantissa (10^15).
pub const MIN_ISSUED_MANTISSA: u64 = 1_000_000_000_000_000;

/// Largest normalized issued mantissa (10^16 - 1).
pub const MAX_ISSUED_MANTISSA: u64 = 9_999_999_999_999_999;

/// Smallest issued exponent.
pub const MIN_ISSUED_EXPONENT: i32 = -96;

/// Largest issued exponent.
pub const MAX_ISSUED_EXPONENT: i32 = 80;

/// Bias added to the exponent before it is packed into bits 54..61.
pub const ISSUED_EXPONENT_BIAS: i32 = 97;

/// Canonical encoding of an issued zero: only the issued bit set.
pub const ISSUED_ZERO: u64 = AMOUNT_ISSUED_BIT;

/// Maximum significant decimal digits an issued value can carry.
pub const MAX_ISSUED_DIGITS: usize = 16;

// ---------------------------------------------------------------------------
// Fixed widths
// ---------------------------------------------------------------------------

/// Account identifiers are RIPEMD-160 sized.
pub const ACCOUNT_ID_LENGTH: usize = 20;

/// Currency codes are 160 bits.
pub const CURRENCY_CODE_LENGTH: usize = 20;

/// Length of one Vector256 element.
pub const HASH256_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Hash prefixes
// ---------------------------------------------------------------------------

/// "STX\0": prefix of the single-signer signing input.
pub const HASH_PREFIX_TRANSACTION_SIGN: [u8; 4] = *b"STX\0";

/// "SMT\0": prefix of the multi-signer signing input.
pub const HASH_PREFIX_TRANSACTION_MULTISIGN: [u8; 4] = *b"SMT\0";

/// "TXN\0": prefix hashed with a signed transaction to form its identifier.
pub const HASH_PREFIX_TRANSACTION_ID: [u8; 4] = *b"TXN\0";

/// "SND\0": transaction plus metadata, used in ledger tree leaves.
pub const HASH_PREFIX_TRANSACTION_NODE: [u8; 4] = *b"SND\0";

/// "MLN\0": inner node of a ledger state tree.
pub const HASH_PREFIX_INNER_NODE: [u8; 4] = *b"MLN\0";

/// "LWR\0": ledger header.
pub const HASH_PREFIX_LEDGER_HEADER: [u8; 4] = *b"LWR\0";

/// "VAL\0": validation messages.
pub const HASH_PREFIX_VALIDATION: [u8; 4] = *b"VAL\0";

/// "PRP\0": consensus proposals.
pub const HASH_PREFIX_PROPOSAL: [u8; 4] = *b"PRP\0";

/// "CLM\0": payment channel claims.
pub const HASH_PREFIX_PAYMENT_CHANNEL_CLAIM: [u8; 4] = *b"CLM\0";

// ---------------------------------------------------------------------------
// Keys and signatures
// ---------------------------------------------------------------------------

/// Encoded public keys are 33 bytes for both supported algorithms.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Leading byte of an Ed25519 public key on the wire.
pub const ED25519_KEY_PREFIX: u8 = 0xED;

/// Ed25519 signatures are always 64 bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Upper bound of a DER-encoded secp256k1 signature.
pub const MAX_DER_SIGNATURE_LENGTH: usize = 72;

/// Raw secret scalar length for both algorithms.
pub const SECRET_KEY_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Fields the signing pipeline reads or writes
// ---------------------------------------------------------------------------

/// Sending account of a transaction, and the signer's account in a `Signer`.
pub const ACCOUNT_FIELD: &str = "Account";

/// Public key of the single signer; empty on a multi-signed transaction.
pub const SIGNING_PUB_KEY_FIELD: &str = "SigningPubKey";

/// Signature over the signing input.
pub const TXN_SIGNATURE_FIELD: &str = "TxnSignature";

/// Array of `Signer` entries on a multi-signed transaction.
pub const SIGNERS_FIELD: &str = "Signers";

/// Wrapper name of each `Signers` member.
pub const SIGNER_FIELD: &str = "Signer";

// ---------------------------------------------------------------------------
// Address encoding
// ---------------------------------------------------------------------------

/// Version byte prepended to an account ID before Base58Check encoding.
pub const ACCOUNT_ADDRESS_VERSION: u8 = 0x00;

/// Checksum bytes appended by Base58Check.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;
