//! Ring Module
//!
//! Consistent hashing compatible with libmemcached's non-weighted ketama
//! distribution using the one-at-a-time hash.
//!
//! ## Layout
//! ```text
//!            0 ─────────────────────────────────────────── 2^32-1
//!  points:   │ a-17 │ b-3 │ a-62 │ c-0 │ b-91 │ ... │ c-44 │
//!                      ▲
//!            hash(key) ┘  → first point >= hash(key), wrap to start
//! ```
//!
//! Node addresses are hashed as text and never resolved, so placements are
//! identical on every host that uses the same configured names.

mod continuum;
mod hash;
mod shared;

pub use continuum::{HashRing, Node, RingPoint};
pub use hash::{fnv1a_32, one_at_a_time, Fnv1a32, HashKind, Jenkins32, KeyHasher};
pub use shared::SharedRing;

use crate::error::{McError, Result};

/// Points per server in libmemcached's non-weighted ketama mode
pub const DEFAULT_POINTS_PER_SERVER: usize = 100;

/// Check that `addr` looks like `host:port`
pub fn validate_node_addr(addr: &str) -> Result<()> {
    let invalid = || McError::InvalidNode(addr.to_string());

    if addr.is_empty() || addr.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid());
    }

    let (host, port) = addr.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(invalid());
    }

    Ok(())
}
