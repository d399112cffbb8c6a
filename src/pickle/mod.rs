//! Pickle Module
//!
//! A restricted reader and writer for Python pickle streams (protocol <= 2),
//! covering the scalar values a Python pickler emits for `str`, `unicode`,
//! `bytes`, `int`, `long`, `bool` and `None`.
//!
//! ## Machine Model
//! ```text
//! input:  ┌──────┬────────────┬──────┬────────┬──────┐
//!         │PROTO │ BINUNICODE │ len  │ utf-8  │ STOP │ ...
//!         └──────┴────────────┴──────┴────────┴──────┘
//!            ▲ cursor
//!
//! stack:  [ partial values ]      memo: { index -> value }
//! ```
//!
//! Each call to [`decode`] builds a fresh machine; nothing survives the call.
//! Opcodes outside the supported set fail the whole decode.

mod decoder;
mod encoder;
mod opcode;
mod value;

pub use decoder::decode;
pub use encoder::{encode_unicode, UNICODE_OVERHEAD};
pub use opcode::Opcode;
pub use value::PickleValue;

/// Highest pickle protocol version the machine accepts
pub const MAX_PROTOCOL: u8 = 2;

/// Two byte preamble of a protocol 2 stream (`PROTO 2`)
pub const PROTOCOL_2_PREAMBLE: [u8; 2] = [0x80, 0x02];

/// Whether `bytes` starts with the protocol 2 preamble
pub fn has_protocol_2_preamble(bytes: &[u8]) -> bool {
    bytes.starts_with(&PROTOCOL_2_PREAMBLE)
}
