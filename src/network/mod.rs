//! Network Module
//!
//! Blocking TCP access to memcached nodes.
//!
//! ## Architecture
//! - One `Connection` per node, opened on first use
//! - Round trips to the same node are serialized by that node's slot lock
//! - A connection is dropped after any I/O or framing error

mod connection;
mod tcp_store;

pub use connection::Connection;
pub use tcp_store::TcpStore;
