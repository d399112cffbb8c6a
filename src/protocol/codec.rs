//! Protocol codec
//!
//! Client side of the memcached text protocol: commands are encoded,
//! replies are decoded.
//!
//! ## Wire Format
//!
//! ### Commands
//! ```text
//! get <key>\r\n
//! set <key> <flags> <exptime> <bytes>\r\n<data>\r\n
//! ```
//!
//! ### Responses
//! ```text
//! VALUE <key> <flags> <bytes> [<cas>]\r\n<data>\r\nEND\r\n   (hit)
//! END\r\n                                                    (miss)
//! STORED\r\n | NOT_STORED\r\n | EXISTS\r\n | NOT_FOUND\r\n
//! ERROR\r\n | CLIENT_ERROR <msg>\r\n | SERVER_ERROR <msg>\r\n
//! ```

use std::io::{BufRead, Cursor, Read, Write};

use bytes::Bytes;

use crate::error::{McError, Result};

use super::{Command, CommandType, Response};

/// Longest key the server accepts
pub const MAX_KEY_LEN: usize = 250;

/// Maximum data block size (16 MB)
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Longest header line accepted before giving up
const MAX_LINE_LEN: usize = 2048;

const CRLF: &[u8] = b"\r\n";

/// Check a key against the text protocol rules
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > MAX_KEY_LEN {
        return Err(McError::Protocol(format!(
            "key length {} outside 1..={}",
            key.len(),
            MAX_KEY_LEN
        )));
    }
    if key.bytes().any(|b| b <= b' ' || b == 0x7f) {
        return Err(McError::Protocol(format!(
            "key {:?} contains whitespace or control characters",
            key
        )));
    }
    Ok(())
}

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to bytes
pub fn encode_command(command: &Command) -> Result<Vec<u8>> {
    validate_key(command.key())?;

    let message = match command {
        Command::Get { key } => format!("get {}\r\n", key).into_bytes(),
        Command::Set {
            key,
            flags,
            exptime,
            value,
        } => {
            if value.len() > MAX_PAYLOAD_SIZE {
                return Err(McError::Protocol(format!(
                    "Value too large: {} bytes (max {})",
                    value.len(),
                    MAX_PAYLOAD_SIZE
                )));
            }
            let header = format!("set {} {} {} {}\r\n", key, flags, exptime, value.len());
            let mut message = Vec::with_capacity(header.len() + value.len() + CRLF.len());
            message.extend_from_slice(header.as_bytes());
            message.extend_from_slice(value);
            message.extend_from_slice(CRLF);
            message
        }
    };

    Ok(message)
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    let bytes = encode_command(command)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Read the reply to a command of type `command_type`
pub fn read_response<R: BufRead>(reader: &mut R, command_type: CommandType) -> Result<Response> {
    let line = read_line(reader)?;
    check_server_error(&line)?;

    match command_type {
        CommandType::Get => {
            if line == "END" {
                return Ok(Response::Miss);
            }
            let rest = line
                .strip_prefix("VALUE ")
                .ok_or_else(|| McError::Protocol(format!("Unexpected get reply: {:?}", line)))?;

            let mut parts = rest.split(' ');
            let key = parts
                .next()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| McError::Protocol("VALUE: missing key".to_string()))?
                .to_string();
            let flags = parse_field::<u32>(parts.next(), "VALUE flags")?;
            let len = parse_field::<usize>(parts.next(), "VALUE bytes")?;
            let data = read_data_block(reader, len)?;

            let end = read_line(reader)?;
            if end != "END" {
                return Err(McError::Protocol(format!(
                    "Expected END after value block, got {:?}",
                    end
                )));
            }

            Ok(Response::Value { key, flags, data })
        }
        CommandType::Set => match line.as_str() {
            "STORED" => Ok(Response::Stored),
            "NOT_STORED" | "EXISTS" | "NOT_FOUND" => Ok(Response::NotStored),
            _ => Err(McError::Protocol(format!("Unexpected set reply: {:?}", line))),
        },
    }
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8], command_type: CommandType) -> Result<Response> {
    read_response(&mut Cursor::new(bytes), command_type)
}

// =============================================================================
// Line helpers
// =============================================================================

/// Read one CRLF-terminated line, without the terminator
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', &mut buf)?;

    if read == 0 {
        return Err(McError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed",
        )));
    }
    if !buf.ends_with(CRLF) {
        return Err(McError::Protocol(format!(
            "Line not terminated by CRLF within {} bytes",
            MAX_LINE_LEN
        )));
    }
    buf.truncate(buf.len() - CRLF.len());

    String::from_utf8(buf).map_err(|_| McError::Protocol("Line is not valid UTF-8".to_string()))
}

/// Read a `len`-byte data block and its trailing CRLF
fn read_data_block<R: Read>(reader: &mut R, len: usize) -> Result<Bytes> {
    if len > MAX_PAYLOAD_SIZE {
        return Err(McError::Protocol(format!(
            "Payload too large: {} bytes (max {})",
            len, MAX_PAYLOAD_SIZE
        )));
    }

    let mut data = vec![0u8; len + CRLF.len()];
    reader.read_exact(&mut data)?;
    if !data.ends_with(CRLF) {
        return Err(McError::Protocol(
            "Data block not terminated by CRLF".to_string(),
        ));
    }
    data.truncate(len);

    Ok(Bytes::from(data))
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, what: &str) -> Result<T> {
    let field = field.ok_or_else(|| McError::Protocol(format!("{}: missing", what)))?;
    field
        .parse::<T>()
        .map_err(|_| McError::Protocol(format!("{}: invalid value {:?}", what, field)))
}

/// Map `ERROR` / `CLIENT_ERROR` / `SERVER_ERROR` lines to errors
fn check_server_error(line: &str) -> Result<()> {
    if line == "ERROR" {
        return Err(McError::Network("server replied ERROR".to_string()));
    }
    if let Some(msg) = line.strip_prefix("CLIENT_ERROR") {
        return Err(McError::Network(format!("client error:{}", msg)));
    }
    if let Some(msg) = line.strip_prefix("SERVER_ERROR") {
        return Err(McError::Network(format!("server error:{}", msg)));
    }
    Ok(())
}
