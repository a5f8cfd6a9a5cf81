//! # Wire Primitives
//!
//! The three building blocks every other layer of the codec is written in:
//!
//! ```text
//! field_id.rs   (type code, field code) <-> 1-3 byte field identifier
//! vl.rs         payload length <-> 1-3 byte VL prefix
//! parser.rs     bounds-checked cursor used by every decoder
//! writer.rs     output buffer used by the object serializer
//! ```
//!
//! Type codecs append to a plain `Vec<u8>`; the writer only adds field IDs
//! and VL prefixes around them.

pub mod field_id;
pub mod parser;
pub mod vl;
pub mod writer;

pub use field_id::FieldId;
pub use parser::BinaryParser;
pub use writer::BinarySerializer;
pub use vl::{decode_vl_length, encode_vl_length};
