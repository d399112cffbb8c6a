//! Error types for mcpickle
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using McError
pub type Result<T> = std::result::Result<T, McError>;

/// Unified error type for mcpickle operations
#[derive(Debug, Error)]
pub enum McError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Pickle Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported pickle opcode 0x{opcode:02x} at offset {offset}")]
    UnsupportedOpcode { opcode: u8, offset: usize },

    #[error("Unsupported pickle protocol version {0}")]
    UnsupportedProtocol(u8),

    #[error("Truncated pickle stream at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Pickle stack underflow executing {opcode}")]
    StackUnderflow { opcode: &'static str },

    #[error("Malformed pickle stream: {0}")]
    MalformedStream(String),

    #[error("Value of {len} bytes exceeds the pickle length limit of {max}")]
    ValueTooLarge { len: usize, max: usize },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("Value with flags 0x{flag:x} cannot be decoded as {expected}")]
    InvalidType { flag: u32, expected: &'static str },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Value is not valid UTF-8")]
    InvalidUtf8,

    // -------------------------------------------------------------------------
    // Ring Errors
    // -------------------------------------------------------------------------
    #[error("Hash ring has no points")]
    EmptyRing,

    #[error("Invalid node address: {0:?}")]
    InvalidNode(String),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl McError {
    /// Whether the error came from the pickle machine
    pub fn is_pickle_error(&self) -> bool {
        matches!(
            self,
            McError::UnsupportedOpcode { .. }
                | McError::UnsupportedProtocol(_)
                | McError::TruncatedStream { .. }
                | McError::StackUnderflow { .. }
                | McError::MalformedStream(_)
        )
    }
}
