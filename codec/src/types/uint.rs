//! Unsigned integers: big-endian, fixed width, no sign handling.

use super::WireType;
use crate::binary::BinaryParser;
use crate::error::{CodecError, Result};

/// Fixed-width types reject a length hint that disagrees with their width.
pub(crate) fn check_fixed_hint(type_name: &str, width: usize, hint: Option<usize>) -> Result<()> {
    match hint {
        Some(n) if n != width => Err(CodecError::InvalidLength(format!(
            "{type_name} is {width} bytes, got length {n}"
        ))),
        _ => Ok(()),
    }
}

macro_rules! impl_uint_wire_type {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl WireType for $ty {
                const TYPE_NAME: &'static str = $name;

                fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
                    out.extend_from_slice(&self.to_be_bytes());
                    Ok(())
                }

                fn read_from(parser: &mut BinaryParser<'_>, length_hint: Option<usize>) -> Result<Self> {
                    check_fixed_hint($name, std::mem::size_of::<$ty>(), length_hint)?;
                    Ok(<$ty>::from_be_bytes(parser.read_array()?))
                }
            }
        )*
    };
}

impl_uint_wire_type! {
    u8 => "UInt8",
    u16 => "UInt16",
    u32 => "UInt32",
    u64 => "UInt64",
}
