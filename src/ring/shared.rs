//! Shared ring snapshot
//!
//! Readers clone the current `Arc<HashRing>` and keep using it for as long as
//! they hold it; a rebuild swaps in a new ring without touching the old one.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{HashRing, Node};

/// Swappable reference to the current ring
pub struct SharedRing {
    current: RwLock<Arc<HashRing>>,
}

impl SharedRing {
    pub fn new(ring: HashRing) -> Self {
        Self {
            current: RwLock::new(Arc::new(ring)),
        }
    }

    /// Current ring; stays valid across later swaps
    pub fn snapshot(&self) -> Arc<HashRing> {
        self.current.read().clone()
    }

    /// Install `ring` and return the one it replaced
    pub fn replace(&self, ring: HashRing) -> Arc<HashRing> {
        let ring = Arc::new(ring);
        std::mem::replace(&mut *self.current.write(), ring)
    }

    /// Owner of `key` in the current ring
    pub fn pick_node(&self, key: &str) -> Node {
        self.current.read().pick_node(key).clone()
    }
}

impl std::fmt::Debug for SharedRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedRing").field(&*self.current.read()).finish()
    }
}
