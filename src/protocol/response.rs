//! Response definitions
//!
//! Replies read back from a memcached node.

use bytes::Bytes;

/// A parsed reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `VALUE <key> <flags> <bytes>` block followed by `END`
    Value { key: String, flags: u32, data: Bytes },

    /// `END` with no value block
    Miss,

    /// `STORED`
    Stored,

    /// `NOT_STORED`, `EXISTS` or `NOT_FOUND`
    NotStored,
}
