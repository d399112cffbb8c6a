//! In-memory store
//!
//! Keeps a separate map per node so tests can see where keys landed.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::codec::TaggedValue;
use crate::error::Result;
use crate::ring::Node;

use super::Store;

/// `Store` backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    /// node -> key -> value
    data: RwLock<HashMap<Node, HashMap<String, TaggedValue>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held for `node`
    pub fn len_on(&self, node: &Node) -> usize {
        self.data.read().get(node).map_or(0, HashMap::len)
    }

    /// Total number of keys across nodes
    pub fn len(&self) -> usize {
        self.data.read().values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write raw bytes and flags, as a foreign client would
    pub fn insert_raw(&self, node: &Node, key: &str, bytes: &[u8], flags: u32) {
        self.data
            .write()
            .entry(node.clone())
            .or_default()
            .insert(key.to_string(), TaggedValue::from_raw(bytes.to_vec(), flags));
    }

    /// Node currently holding `key`, if any
    pub fn node_holding(&self, key: &str) -> Option<Node> {
        self.data
            .read()
            .iter()
            .find(|(_, keys)| keys.contains_key(key))
            .map(|(node, _)| node.clone())
    }
}

impl Store for MemoryStore {
    fn get(&self, node: &Node, key: &str) -> Result<Option<TaggedValue>> {
        Ok(self
            .data
            .read()
            .get(node)
            .and_then(|keys| keys.get(key))
            .cloned())
    }

    fn set(&self, node: &Node, key: &str, value: &TaggedValue) -> Result<()> {
        self.data
            .write()
            .entry(node.clone())
            .or_default()
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}
