//! Opcode definitions
//!
//! The closed set of pickle instructions the machine executes.

/// Supported pickle opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Protocol marker, 1-byte version operand
    Proto = 0x80,

    /// Unicode string, 4-byte LE length + UTF-8 payload
    BinUnicode = 0x58,

    /// Byte string, 4-byte signed LE length + payload
    BinString = 0x54,

    /// Byte string, 1-byte length + payload
    ShortBinString = 0x55,

    /// Signed 4-byte LE integer
    BinInt = 0x4a,

    /// Unsigned 1-byte integer
    BinInt1 = 0x4b,

    /// Unsigned 2-byte LE integer
    BinInt2 = 0x4d,

    /// Long, 1-byte length + LE two's complement bytes
    Long1 = 0x8a,

    /// Long, 4-byte signed LE length + LE two's complement bytes
    Long4 = 0x8b,

    NewTrue = 0x88,
    NewFalse = 0x89,
    None = 0x4e,

    /// Store top of stack in memo, 1-byte index
    BinPut = 0x71,

    /// Store top of stack in memo, 4-byte LE index
    LongBinPut = 0x72,

    /// Push memo entry, 1-byte index
    BinGet = 0x68,

    /// Push memo entry, 4-byte LE index
    LongBinGet = 0x6a,

    /// Discard top of stack
    Pop = 0x30,

    /// End of stream
    Stop = 0x2e,
}

impl Opcode {
    /// Map an instruction byte to an opcode, `None` when unsupported
    pub fn from_byte(byte: u8) -> Option<Self> {
        let opcode = match byte {
            0x80 => Opcode::Proto,
            0x58 => Opcode::BinUnicode,
            0x54 => Opcode::BinString,
            0x55 => Opcode::ShortBinString,
            0x4a => Opcode::BinInt,
            0x4b => Opcode::BinInt1,
            0x4d => Opcode::BinInt2,
            0x8a => Opcode::Long1,
            0x8b => Opcode::Long4,
            0x88 => Opcode::NewTrue,
            0x89 => Opcode::NewFalse,
            0x4e => Opcode::None,
            0x71 => Opcode::BinPut,
            0x72 => Opcode::LongBinPut,
            0x68 => Opcode::BinGet,
            0x6a => Opcode::LongBinGet,
            0x30 => Opcode::Pop,
            0x2e => Opcode::Stop,
            _ => return None,
        };
        Some(opcode)
    }

    /// Name as used by Python's `pickletools`
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Proto => "PROTO",
            Opcode::BinUnicode => "BINUNICODE",
            Opcode::BinString => "BINSTRING",
            Opcode::ShortBinString => "SHORT_BINSTRING",
            Opcode::BinInt => "BININT",
            Opcode::BinInt1 => "BININT1",
            Opcode::BinInt2 => "BININT2",
            Opcode::Long1 => "LONG1",
            Opcode::Long4 => "LONG4",
            Opcode::NewTrue => "NEWTRUE",
            Opcode::NewFalse => "NEWFALSE",
            Opcode::None => "NONE",
            Opcode::BinPut => "BINPUT",
            Opcode::LongBinPut => "LONG_BINPUT",
            Opcode::BinGet => "BINGET",
            Opcode::LongBinGet => "LONG_BINGET",
            Opcode::Pop => "POP",
            Opcode::Stop => "STOP",
        }
    }
}
