//! # mcpickle
//!
//! A memcached client that shares a cache with Python's pylibmc:
//! - Values use pylibmc's type flags and encodings (plain `str`, pickled
//!   `unicode`, ASCII integers and booleans)
//! - A small pickle machine reads the scalar pickles Python writes
//! - Keys are placed with libmemcached's non-weighted ketama ring using the
//!   one-at-a-time hash, so both clients agree on every key's node
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │          set(item) / get_string / get_int64 / get_bool       │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌─────────────────────────┐     ┌─────────────────────────┐
//!   │   Codec (TypeFlag)      │     │   Ring (SharedRing)     │
//!   │  string/int/bool/pickle │     │  ketama, one-at-a-time  │
//!   └────────────┬────────────┘     └────────────┬────────────┘
//!                │                               │ node
//!                ▼                               ▼
//!   ┌─────────────────────────┐     ┌─────────────────────────┐
//!   │   Pickle machine        │     │   Store                 │
//!   │  (stack + memo)         │     │  (TcpStore/MemoryStore) │
//!   └─────────────────────────┘     └─────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod pickle;
pub mod codec;
pub mod ring;
pub mod protocol;
pub mod network;
pub mod store;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{McError, Result};
pub use config::Config;
pub use client::Client;
pub use codec::{Item, ScalarValue, TaggedValue, TypeFlag};
pub use ring::{HashRing, Node};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of mcpickle
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
