//! Variable-length (VL) prefixes.
//!
//! Blobs, account IDs and hash vectors carry a length prefix of one, two or
//! three bytes. Each wider form is biased by the capacity of the narrower
//! ones, so every length has exactly one encoding.

use crate::config::{
    VL_MAX_MARKER, VL_MAX_ONE_BYTE, VL_MAX_THREE_BYTE, VL_MAX_TWO_BYTE, VL_THREE_BYTE_MARKER,
    VL_TWO_BYTE_MARKER,
};
use crate::error::{CodecError, Result};

/// Encodes `length` as a VL prefix.
///
/// # Errors
///
/// [`CodecError::InvalidLength`] for lengths above 918 744.
pub fn encode_vl_length(length: usize) -> Result<Vec<u8>> {
    if length <= VL_MAX_ONE_BYTE {
        Ok(vec![length as u8])
    } else if length <= VL_MAX_TWO_BYTE {
        let biased = length - (VL_MAX_ONE_BYTE + 1);
        Ok(vec![
            VL_TWO_BYTE_MARKER + (biased >> 8) as u8,
            (biased & 0xFF) as u8,
        ])
    } else if length <= VL_MAX_THREE_BYTE {
        let biased = length - (VL_MAX_TWO_BYTE + 1);
        Ok(vec![
            VL_THREE_BYTE_MARKER + (biased >> 16) as u8,
            ((biased >> 8) & 0xFF) as u8,
            (biased & 0xFF) as u8,
        ])
    } else {
        Err(CodecError::InvalidLength(format!(
            "{length} exceeds the maximum VL length of {VL_MAX_THREE_BYTE}"
        )))
    }
}

/// How many prefix bytes a VL prefix starting with `first` occupies.
pub fn vl_prefix_width(first: u8) -> Result<usize> {
    match first {
        b if b as usize <= VL_MAX_ONE_BYTE => Ok(1),
        b if b < VL_THREE_BYTE_MARKER => Ok(2),
        b if b <= VL_MAX_MARKER => Ok(3),
        b => Err(CodecError::InvalidLength(format!(
            "reserved VL prefix byte 0x{b:02X}"
        ))),
    }
}

/// Decodes a VL prefix from the front of `bytes`, returning the payload
/// length and the number of prefix bytes consumed.
///
/// This only reads the prefix; callers check the payload against the bytes
/// that remain.
pub fn decode_vl_length(bytes: &[u8]) -> Result<(usize, usize)> {
    let first = *bytes.first().ok_or(CodecError::truncated(1, 0))?;
    let width = vl_prefix_width(first)?;
    if bytes.len() < width {
        return Err(CodecError::truncated(width, bytes.len()));
    }

    let length = match width {
        1 => first as usize,
        2 => {
            let b1 = bytes[1] as usize;
            VL_MAX_ONE_BYTE + 1 + ((first - VL_TWO_BYTE_MARKER) as usize) * 256 + b1
        }
        _ => {
            let (b1, b2) = (bytes[1] as usize, bytes[2] as usize);
            VL_MAX_TWO_BYTE + 1
                + ((first - VL_THREE_BYTE_MARKER) as usize) * 65_536
                + b1 * 256
                + b2
        }
    };
    Ok((length, width))
}
