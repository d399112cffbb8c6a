//! TCP store
//!
//! `Store` implementation that talks to real memcached nodes, keeping one
//! lazily opened connection per node.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::codec::TaggedValue;
use crate::config::Config;
use crate::error::{McError, Result};
use crate::protocol::{Command, Response};
use crate::ring::Node;
use crate::store::Store;

use super::Connection;

/// Connection slot for one node; `None` until first use or after a failure
type Slot = Arc<Mutex<Option<Connection>>>;

/// Memcached-backed store
pub struct TcpStore {
    connect_timeout_ms: u64,
    read_timeout_ms: u64,
    write_timeout_ms: u64,
    exptime: u32,

    /// Per-node connection slots
    slots: RwLock<HashMap<Node, Slot>>,
}

impl TcpStore {
    pub fn new(config: &Config) -> Self {
        Self {
            connect_timeout_ms: config.connect_timeout_ms,
            read_timeout_ms: config.read_timeout_ms,
            write_timeout_ms: config.write_timeout_ms,
            exptime: config.exptime,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Number of nodes with an open connection
    pub fn open_connections(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.lock().is_some())
            .count()
    }

    fn slot(&self, node: &Node) -> Slot {
        if let Some(slot) = self.slots.read().get(node) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(node.clone()).or_default())
    }

    /// Run one round trip against `node`, reconnecting if needed
    fn execute(&self, node: &Node, command: &Command) -> Result<Response> {
        let slot = self.slot(node);
        let mut guard = slot.lock();

        if guard.is_none() {
            let mut conn = Connection::connect(node.as_str(), self.connect_timeout_ms)?;
            conn.set_timeouts(self.read_timeout_ms, self.write_timeout_ms)?;
            *guard = Some(conn);
        }

        let result = match guard.as_mut() {
            Some(conn) => conn.execute(command),
            None => return Err(McError::Network(format!("no connection to {}", node))),
        };

        // A failed read or write can leave the stream mid-reply
        if let Err(e @ (McError::Io(_) | McError::Protocol(_))) = &result {
            tracing::warn!("Dropping connection to {}: {}", node, e);
            *guard = None;
        }

        result
    }
}

impl Store for TcpStore {
    fn get(&self, node: &Node, key: &str) -> Result<Option<TaggedValue>> {
        let command = Command::Get {
            key: key.to_string(),
        };
        match self.execute(node, &command)? {
            Response::Value { flags, data, .. } => Ok(Some(TaggedValue::from_raw(data, flags))),
            Response::Miss => Ok(None),
            other => Err(McError::Protocol(format!("Unexpected reply to get: {:?}", other))),
        }
    }

    fn set(&self, node: &Node, key: &str, value: &TaggedValue) -> Result<()> {
        let command = Command::Set {
            key: key.to_string(),
            flags: value.raw_flags(),
            exptime: self.exptime,
            value: value.bytes.clone(),
        };
        match self.execute(node, &command)? {
            Response::Stored => Ok(()),
            Response::NotStored => Err(McError::Network(format!(
                "{} did not store key {:?}",
                node, key
            ))),
            other => Err(McError::Protocol(format!("Unexpected reply to set: {:?}", other))),
        }
    }

    /// Close connections to nodes that left the ring
    fn retain_nodes(&self, nodes: &[Node]) {
        self.slots.write().retain(|node, _| {
            let keep = nodes.contains(node);
            if !keep {
                tracing::debug!("Closing connection to removed node {}", node);
            }
            keep
        });
    }
}
