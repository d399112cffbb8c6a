//! Pickle decoder
//!
//! Stack machine over the supported opcode set.
//!
//! ## Operand Layouts
//! ```text
//! PROTO            0x80 │ version (1)
//! BINUNICODE       0x58 │ len (4, LE) │ utf-8 bytes
//! BINSTRING        0x54 │ len (4, LE signed) │ bytes
//! SHORT_BINSTRING  0x55 │ len (1) │ bytes
//! BININT           0x4a │ i32 (4, LE)
//! BININT1          0x4b │ u8 (1)
//! BININT2          0x4d │ u16 (2, LE)
//! LONG1            0x8a │ len (1) │ two's complement (LE)
//! LONG4            0x8b │ len (4, LE signed) │ two's complement (LE)
//! BINPUT/BINGET    0x71/0x68 │ index (1)
//! LONG_BINPUT/GET  0x72/0x6a │ index (4, LE)
//! NEWTRUE/NEWFALSE/NONE/POP/STOP   no operand
//! ```
//!
//! Lengths are byte counts of the payload as stored, never character counts.

use std::collections::HashMap;

use crate::error::{McError, Result};

use super::{Opcode, PickleValue, MAX_PROTOCOL};

/// Decode a complete pickle stream into a single value.
///
/// Execution stops at the first `STOP`; trailing bytes after it are ignored,
/// matching `pickle.loads`. Any error discards the machine state and no
/// partial value is returned.
pub fn decode(bytes: &[u8]) -> Result<PickleValue> {
    Machine::new(bytes).run()
}

/// Per-call machine state
struct Machine<'a> {
    /// Input stream
    input: &'a [u8],

    /// Cursor into `input`
    pos: usize,

    /// Value stack
    stack: Vec<PickleValue>,

    /// Memo table filled by BINPUT/LONG_BINPUT
    memo: HashMap<u32, PickleValue>,
}

impl<'a> Machine<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            stack: Vec::with_capacity(4),
            memo: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<PickleValue> {
        loop {
            let offset = self.pos;
            let byte = *self.input.get(offset).ok_or_else(|| {
                McError::MalformedStream(format!("stream ended at offset {} without STOP", offset))
            })?;
            self.pos += 1;

            let opcode = Opcode::from_byte(byte)
                .ok_or(McError::UnsupportedOpcode { opcode: byte, offset })?;

            match opcode {
                Opcode::Proto => {
                    let version = self.read_u8()?;
                    if version > MAX_PROTOCOL {
                        return Err(McError::UnsupportedProtocol(version));
                    }
                }
                Opcode::BinUnicode => {
                    let len = self.read_u32()? as usize;
                    let payload = self.take(len)?;
                    let text = std::str::from_utf8(payload).map_err(|e| {
                        McError::MalformedStream(format!("BINUNICODE payload is not UTF-8: {}", e))
                    })?;
                    self.stack.push(PickleValue::Str(text.to_owned()));
                }
                Opcode::BinString => {
                    let len = self.read_signed_len(opcode)?;
                    let payload = self.take(len)?;
                    self.stack.push(PickleValue::Bytes(payload.to_vec()));
                }
                Opcode::ShortBinString => {
                    let len = self.read_u8()? as usize;
                    let payload = self.take(len)?;
                    self.stack.push(PickleValue::Bytes(payload.to_vec()));
                }
                Opcode::BinInt => {
                    let raw = self.take(4)?;
                    let n = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
                    self.stack.push(PickleValue::Int(n as i64));
                }
                Opcode::BinInt1 => {
                    let n = self.read_u8()?;
                    self.stack.push(PickleValue::Int(n as i64));
                }
                Opcode::BinInt2 => {
                    let raw = self.take(2)?;
                    let n = u16::from_le_bytes([raw[0], raw[1]]);
                    self.stack.push(PickleValue::Int(n as i64));
                }
                Opcode::Long1 => {
                    let len = self.read_u8()? as usize;
                    let raw = self.take(len)?;
                    self.stack.push(PickleValue::Int(decode_long(raw)?));
                }
                Opcode::Long4 => {
                    let len = self.read_signed_len(opcode)?;
                    let raw = self.take(len)?;
                    self.stack.push(PickleValue::Int(decode_long(raw)?));
                }
                Opcode::NewTrue => self.stack.push(PickleValue::Bool(true)),
                Opcode::NewFalse => self.stack.push(PickleValue::Bool(false)),
                Opcode::None => self.stack.push(PickleValue::None),
                Opcode::BinPut => {
                    let index = self.read_u8()? as u32;
                    self.memo_put(opcode, index)?;
                }
                Opcode::LongBinPut => {
                    let index = self.read_u32()?;
                    self.memo_put(opcode, index)?;
                }
                Opcode::BinGet => {
                    let index = self.read_u8()? as u32;
                    self.memo_get(index)?;
                }
                Opcode::LongBinGet => {
                    let index = self.read_u32()?;
                    self.memo_get(index)?;
                }
                Opcode::Pop => {
                    self.stack.pop().ok_or(McError::StackUnderflow {
                        opcode: opcode.name(),
                    })?;
                }
                Opcode::Stop => return self.finish(),
            }
        }
    }

    /// STOP: exactly one value must remain
    fn finish(mut self) -> Result<PickleValue> {
        if self.stack.len() > 1 {
            return Err(McError::MalformedStream(format!(
                "STOP with {} values on the stack",
                self.stack.len()
            )));
        }
        self.stack.pop().ok_or(McError::StackUnderflow {
            opcode: Opcode::Stop.name(),
        })
    }

    fn memo_put(&mut self, opcode: Opcode, index: u32) -> Result<()> {
        let top = self.stack.last().cloned().ok_or(McError::StackUnderflow {
            opcode: opcode.name(),
        })?;
        self.memo.insert(index, top);
        Ok(())
    }

    fn memo_get(&mut self, index: u32) -> Result<()> {
        let value = self
            .memo
            .get(&index)
            .cloned()
            .ok_or_else(|| McError::MalformedStream(format!("memo index {} not found", index)))?;
        self.stack.push(value);
        Ok(())
    }

    // =========================================================================
    // Operand readers
    // =========================================================================

    /// Consume exactly `len` bytes
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.input.len() - self.pos;
        if len > available {
            return Err(McError::TruncatedStream {
                offset: self.pos,
                needed: len,
                available,
            });
        }
        let input = self.input;
        let start = self.pos;
        self.pos += len;
        Ok(&input[start..start + len])
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let raw = self.take(4)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    /// 4-byte signed length used by BINSTRING and LONG4
    fn read_signed_len(&mut self, opcode: Opcode) -> Result<usize> {
        let raw = self.take(4)?;
        let len = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        if len < 0 {
            return Err(McError::MalformedStream(format!(
                "{} with negative length {}",
                opcode.name(),
                len
            )));
        }
        Ok(len as usize)
    }
}

/// Decode a little-endian two's complement integer of any width.
///
/// Wider encodings are accepted only when the extra bytes are pure sign
/// extension of a value that fits in an `i64`.
fn decode_long(raw: &[u8]) -> Result<i64> {
    let Some(&last) = raw.last() else {
        return Ok(0);
    };

    let negative = last & 0x80 != 0;
    let fill = if negative { 0xff } else { 0x00 };

    if raw.len() > 8 {
        let extension_ok = raw[8..].iter().all(|&b| b == fill);
        let sign_ok = (raw[7] & 0x80 != 0) == negative;
        if !extension_ok || !sign_ok {
            return Err(McError::MalformedStream(format!(
                "{}-byte long does not fit in 64 bits",
                raw.len()
            )));
        }
    }

    let mut buf = [fill; 8];
    let n = raw.len().min(8);
    buf[..n].copy_from_slice(&raw[..n]);
    Ok(i64::from_le_bytes(buf))
}
