//! Codec Module
//!
//! Maps typed values to the `(bytes, flags)` pairs pylibmc stores, and back.
//!
//! ## Flags
//! - 0x00: NONE    - plain bytes / `str`
//! - 0x01: PICKLE  - pickled object (`unicode`, `None`)
//! - 0x02: INTEGER - ASCII decimal
//! - 0x04: LONG    - ASCII decimal
//! - 0x08: ZLIB    - compressed (unsupported)
//! - 0x10: BOOL    - ASCII `0`/`1`

mod flags;
mod tagged;
mod value;

pub use flags::TypeFlag;
pub use tagged::{
    decode, decode_bool, decode_int64, decode_string, encode, encode_bool, encode_int64,
    encode_string, encode_unicode,
};
pub use value::{Item, ScalarValue, TaggedValue};
