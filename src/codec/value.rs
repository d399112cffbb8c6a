//! Value definitions
//!
//! Stored (tagged) values, decoded scalars and keyed items.

use bytes::Bytes;

use super::TypeFlag;

/// Raw bytes plus type flag, as held by the cache server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedValue {
    /// Payload bytes
    pub bytes: Bytes,

    /// Type flag stored alongside
    pub flag: TypeFlag,
}

impl TaggedValue {
    pub fn new(bytes: impl Into<Bytes>, flag: TypeFlag) -> Self {
        Self {
            bytes: bytes.into(),
            flag,
        }
    }

    /// Build from the raw flags word a server returned
    pub fn from_raw(bytes: impl Into<Bytes>, flags: u32) -> Self {
        Self::new(bytes, TypeFlag::from_raw(flags))
    }

    /// Raw flags word to send to a server
    pub fn raw_flags(&self) -> u32 {
        self.flag.bits()
    }
}

/// A decoded logical value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::Str(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::Str(s)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Int(n)
    }
}

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

/// A key paired with the tagged value to store under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: String,
    pub value: TaggedValue,
}

impl Item {
    pub fn new(key: impl Into<String>, value: TaggedValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Plain string, readable by pylibmc as `str`
    pub fn string(key: impl Into<String>, s: &str) -> Self {
        Self::new(key, super::encode_string(s))
    }

    /// String stored as a pickled Python `unicode` object
    pub fn unicode(key: impl Into<String>, s: &str) -> crate::error::Result<Self> {
        Ok(Self::new(key, super::encode_unicode(s)?))
    }

    /// 64-bit integer stored as ASCII decimal
    pub fn int64(key: impl Into<String>, n: i64) -> Self {
        Self::new(key, super::encode_int64(n))
    }

    /// Boolean stored as ASCII `0`/`1`
    pub fn boolean(key: impl Into<String>, b: bool) -> Self {
        Self::new(key, super::encode_bool(b))
    }
}
