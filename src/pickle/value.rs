//! Decoded pickle values

/// A value on the pickle machine's stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickleValue {
    /// Python `unicode` / `str` (text)
    Str(String),

    /// Python 2 `str` (raw bytes)
    Bytes(Vec<u8>),

    /// Python `int` / `long` that fits in 64 bits
    Int(i64),

    Bool(bool),

    /// Python `None`
    None,
}

impl PickleValue {
    /// Text content, if this value is string-typed.
    ///
    /// Byte strings count as text when they hold valid UTF-8.
    pub fn into_text(self) -> Option<String> {
        match self {
            PickleValue::Str(s) => Some(s),
            PickleValue::Bytes(b) => String::from_utf8(b).ok(),
            _ => None,
        }
    }
}
