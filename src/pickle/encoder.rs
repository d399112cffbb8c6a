//! Pickle encoder
//!
//! Emits the exact stream `pickle.dumps(u"...", 2)` produces for a unicode
//! object, as stored by pylibmc.
//!
//! ```text
//! ┌──────┬──────┬──────┬──────────┬──────────────┬──────┬──────┬──────┐
//! │ 0x80 │ 0x02 │ 0x58 │ len (4)  │ utf-8 bytes  │ 0x71 │ 0x01 │ 0x2e │
//! └──────┴──────┴──────┴──────────┴──────────────┴──────┴──────┴──────┘
//!   PROTO 2      BINUNICODE (LE)                  BINPUT 1      STOP
//! ```

use crate::error::{McError, Result};

use super::{Opcode, PROTOCOL_2_PREAMBLE};

/// Bytes added around the UTF-8 payload
pub const UNICODE_OVERHEAD: usize = 10;

/// Memo slot the reference pickler assigns to the string
const UNICODE_MEMO_INDEX: u8 = 1;

/// Encode `s` as a pickled unicode object.
///
/// Fails with `ValueTooLarge` when the UTF-8 payload does not fit the 4-byte
/// length operand.
pub fn encode_unicode(s: &str) -> Result<Vec<u8>> {
    let payload = s.as_bytes();
    let len = length_operand(payload.len())?;

    let mut out = Vec::with_capacity(payload.len() + UNICODE_OVERHEAD);
    out.extend_from_slice(&PROTOCOL_2_PREAMBLE);
    out.push(Opcode::BinUnicode as u8);
    out.extend_from_slice(&len);
    out.extend_from_slice(payload);
    out.push(Opcode::BinPut as u8);
    out.push(UNICODE_MEMO_INDEX);
    out.push(Opcode::Stop as u8);

    Ok(out)
}

/// BINUNICODE length operand for a payload of `len` bytes
fn length_operand(len: usize) -> Result<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_le_bytes)
        .map_err(|_| McError::ValueTooLarge {
            len,
            max: u32::MAX as usize,
        })
}
