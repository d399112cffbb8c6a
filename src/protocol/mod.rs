//! Protocol Module
//!
//! The subset of the memcached ASCII protocol the client needs: single-key
//! `get` and `set`, carrying the 32-bit flags word that holds the value's
//! type tag.
//!
//! ### Commands
//! - `get <key>`
//! - `set <key> <flags> <exptime> <bytes>` + data block
//!
//! ### Replies
//! - `VALUE ... END`: hit
//! - `END`: miss
//! - `STORED` / `NOT_STORED`
//! - `ERROR`, `CLIENT_ERROR`, `SERVER_ERROR`: mapped to `McError::Network`

mod codec;
mod command;
mod response;

pub use codec::{
    decode_response, encode_command, read_response, validate_key, write_command, MAX_KEY_LEN,
    MAX_PAYLOAD_SIZE,
};
pub use command::{Command, CommandType};
pub use response::Response;
