//! Command definitions
//!
//! Requests sent to a memcached node.

use bytes::Bytes;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Set,
}

/// A storage or retrieval command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch a single key
    Get { key: String },

    /// Store a value unconditionally
    Set {
        key: String,
        flags: u32,
        exptime: u32,
        value: Bytes,
    },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Set { .. } => CommandType::Set,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Command::Get { key } | Command::Set { key, .. } => key,
        }
    }
}
