//! Store Module
//!
//! The key-value collaborator the client writes through. A store moves
//! `(bytes, flags)` pairs to and from a named node and never looks inside
//! them.
//!
//! ## Implementations
//! - `MemoryStore`: per-node in-process maps
//! - `network::TcpStore`: memcached text protocol over TCP

mod memory;

pub use memory::MemoryStore;

use crate::codec::TaggedValue;
use crate::error::Result;
use crate::ring::Node;

/// Key-value backend addressed by node
pub trait Store: Send + Sync {
    /// Fetch `key` from `node`; `Ok(None)` on a miss
    fn get(&self, node: &Node, key: &str) -> Result<Option<TaggedValue>>;

    /// Store `value` under `key` on `node`
    fn set(&self, node: &Node, key: &str, value: &TaggedValue) -> Result<()>;

    /// Release per-node resources for nodes not in `nodes`
    fn retain_nodes(&self, _nodes: &[Node]) {}
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn get(&self, node: &Node, key: &str) -> Result<Option<TaggedValue>> {
        (**self).get(node, key)
    }

    fn set(&self, node: &Node, key: &str, value: &TaggedValue) -> Result<()> {
        (**self).set(node, key, value)
    }

    fn retain_nodes(&self, nodes: &[Node]) {
        (**self).retain_nodes(nodes)
    }
}
