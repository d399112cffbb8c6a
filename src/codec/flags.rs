//! Value type flags
//!
//! The bit values match pylibmc's `_pylibmcmodule.h`, so items written by
//! either client carry the same flags on the server.

bitflags::bitflags! {
    /// Type tag stored next to a value's bytes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlag: u32 {
        /// Pickled Python object (`unicode`, `None`, ...)
        const PICKLE = 1 << 0;
        /// ASCII decimal `int`
        const INTEGER = 1 << 1;
        /// ASCII decimal `long`
        const LONG = 1 << 2;
        /// zlib compressed payload (reserved, never produced or accepted)
        const ZLIB = 1 << 3;
        /// ASCII `0`/`1` boolean (pylibmc addition)
        const BOOL = 1 << 4;
    }
}

impl TypeFlag {
    /// Plain bytes, no type information
    pub const NONE: TypeFlag = TypeFlag::empty();

    /// Build from the raw flags word returned by a server, keeping unknown bits
    pub fn from_raw(raw: u32) -> Self {
        TypeFlag::from_bits_retain(raw)
    }
}
