//! Connection
//!
//! One TCP connection to one memcached node.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::error::{McError, Result};
use crate::protocol::{read_response, write_command, Command, Response};

/// A blocking request/response connection to a single node
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Configured `host:port`, for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to `addr` (`host:port`).
    ///
    /// Each resolved address is tried in turn with `connect_timeout_ms`
    /// (0 uses the OS default).
    pub fn connect(addr: &str, connect_timeout_ms: u64) -> Result<Self> {
        let mut last_err = None;

        for socket_addr in addr.to_socket_addrs()? {
            let attempt = if connect_timeout_ms > 0 {
                TcpStream::connect_timeout(&socket_addr, Duration::from_millis(connect_timeout_ms))
            } else {
                TcpStream::connect(socket_addr)
            };

            match attempt {
                Ok(stream) => return Self::from_stream(stream, addr),
                Err(e) => {
                    tracing::debug!("Connect to {} ({}) failed: {}", addr, socket_addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(match last_err {
            Some(e) => McError::Io(e),
            None => McError::Network(format!("{} did not resolve to any address", addr)),
        })
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, peer_addr: &str) -> Result<Self> {
        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connection established to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr: peer_addr.to_string(),
        })
    }

    /// Configure connection timeouts
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }

    /// Send one command and read its reply
    pub fn execute(&mut self, command: &Command) -> Result<Response> {
        tracing::trace!("Sending {:?} to {}", command.command_type(), self.peer_addr);
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader, command.command_type())
    }
}
