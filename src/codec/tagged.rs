//! Tagged value codec
//!
//! Converts between scalar values and `(bytes, flag)` pairs using pylibmc's
//! storage conventions.
//!
//! ## Encoding
//! | Value             | Flag    | Bytes                          |
//! |-------------------|---------|--------------------------------|
//! | string            | NONE    | UTF-8 verbatim                 |
//! | unicode string    | PICKLE  | pickled `unicode` (protocol 2) |
//! | i64               | INTEGER | ASCII decimal                  |
//! | bool              | BOOL    | `"1"` / `"0"`                  |
//!
//! ## Decoding
//! Flags are matched exactly. A FLAG_NONE payload that starts with the
//! protocol 2 preamble is decoded as a pickle. Every other combination is
//! `InvalidType`.

use bytes::Bytes;

use crate::error::{McError, Result};
use crate::pickle::{self, PickleValue};

use super::{ScalarValue, TaggedValue, TypeFlag};

// =============================================================================
// Encoding
// =============================================================================

/// Plain string: flag NONE, UTF-8 bytes unchanged
pub fn encode_string(s: &str) -> TaggedValue {
    TaggedValue::new(Bytes::copy_from_slice(s.as_bytes()), TypeFlag::NONE)
}

/// Unicode string: flag PICKLE, pickled `unicode` object
pub fn encode_unicode(s: &str) -> Result<TaggedValue> {
    pickle::encode_unicode(s).map(|bytes| TaggedValue::new(bytes, TypeFlag::PICKLE))
}

/// Integer: flag INTEGER, base-10 ASCII
pub fn encode_int64(n: i64) -> TaggedValue {
    TaggedValue::new(n.to_string(), TypeFlag::INTEGER)
}

/// Boolean: flag BOOL, `"1"` or `"0"`
pub fn encode_bool(b: bool) -> TaggedValue {
    let text: &'static [u8] = if b { b"1" } else { b"0" };
    TaggedValue::new(Bytes::from_static(text), TypeFlag::BOOL)
}

/// Encode any scalar; strings take the plain (unpickled) form
pub fn encode(value: &ScalarValue) -> TaggedValue {
    match value {
        ScalarValue::Str(s) => encode_string(s),
        ScalarValue::Int(n) => encode_int64(*n),
        ScalarValue::Bool(b) => encode_bool(*b),
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a tagged value into whichever scalar its flag describes
pub fn decode(value: &TaggedValue) -> Result<ScalarValue> {
    let flag = value.flag;

    if flag == TypeFlag::NONE || flag == TypeFlag::PICKLE {
        return match unpickle_if_needed(value)? {
            Payload::Text(s) => Ok(ScalarValue::Str(s)),
            Payload::Pickled(PickleValue::Bool(b)) => Ok(ScalarValue::Bool(b)),
            Payload::Pickled(other) => match other.into_text() {
                Some(s) => Ok(ScalarValue::Str(s)),
                None => Err(invalid(flag, "scalar")),
            },
        };
    }
    if flag == TypeFlag::INTEGER || flag == TypeFlag::LONG {
        return parse_int64(&value.bytes).map(ScalarValue::Int);
    }
    if flag == TypeFlag::BOOL {
        return parse_bool(&value.bytes).map(ScalarValue::Bool);
    }

    Err(invalid(flag, "scalar"))
}

/// Decode a string stored plain (FLAG_NONE) or pickled (FLAG_PICKLE)
pub fn decode_string(value: &TaggedValue) -> Result<String> {
    let flag = value.flag;
    if flag != TypeFlag::NONE && flag != TypeFlag::PICKLE {
        return Err(invalid(flag, "string"));
    }

    match unpickle_if_needed(value)? {
        Payload::Text(s) => Ok(s),
        Payload::Pickled(v) => v.into_text().ok_or_else(|| invalid(flag, "string")),
    }
}

/// Decode an integer stored with FLAG_INTEGER or FLAG_LONG
pub fn decode_int64(value: &TaggedValue) -> Result<i64> {
    let flag = value.flag;
    if flag != TypeFlag::INTEGER && flag != TypeFlag::LONG {
        return Err(invalid(flag, "int64"));
    }
    parse_int64(&value.bytes)
}

/// Decode a boolean.
///
/// FLAG_BOOL and legacy FLAG_INTEGER values must be exactly `"0"` or `"1"`.
/// A FLAG_PICKLE value, or a FLAG_NONE value carrying the protocol 2
/// preamble, is accepted when it unpickles to `True`/`False`.
pub fn decode_bool(value: &TaggedValue) -> Result<bool> {
    let flag = value.flag;
    if flag == TypeFlag::BOOL || flag == TypeFlag::INTEGER {
        return parse_bool(&value.bytes);
    }
    if flag == TypeFlag::PICKLE || flag == TypeFlag::NONE {
        return match unpickle_if_needed(value) {
            Ok(Payload::Pickled(PickleValue::Bool(b))) => Ok(b),
            Ok(_) | Err(McError::InvalidUtf8) => Err(invalid(flag, "bool")),
            Err(e) => Err(e),
        };
    }
    Err(invalid(flag, "bool"))
}

// =============================================================================
// Helpers
// =============================================================================

enum Payload {
    /// FLAG_NONE bytes taken as text
    Text(String),

    /// Result of running the pickle machine
    Pickled(PickleValue),
}

/// Run the pickle machine for FLAG_PICKLE, or FLAG_NONE bytes that carry the
/// protocol 2 preamble; otherwise take the bytes as UTF-8 text.
fn unpickle_if_needed(value: &TaggedValue) -> Result<Payload> {
    if value.flag == TypeFlag::PICKLE || pickle::has_protocol_2_preamble(&value.bytes) {
        return pickle::decode(&value.bytes).map(Payload::Pickled);
    }

    std::str::from_utf8(&value.bytes)
        .map(|s| Payload::Text(s.to_owned()))
        .map_err(|_| McError::InvalidUtf8)
}

fn parse_int64(bytes: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| McError::Parse("integer value is not ASCII".to_string()))?;
    text.parse::<i64>()
        .map_err(|e| McError::Parse(format!("invalid integer {:?}: {}", text, e)))
}

fn parse_bool(bytes: &[u8]) -> Result<bool> {
    match bytes {
        b"0" => Ok(false),
        b"1" => Ok(true),
        other => Err(McError::Parse(format!(
            "invalid boolean {:?}, expected \"0\" or \"1\"",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn invalid(flag: TypeFlag, expected: &'static str) -> McError {
    McError::InvalidType {
        flag: flag.bits(),
        expected,
    }
}
