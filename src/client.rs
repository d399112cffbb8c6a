//! Client Module
//!
//! Composes the ring, the tagged value codec and a store.
//!
//! ```text
//! set(item) ─► ring.pick_node(key) ─► store.set(node, key, (bytes, flags))
//! get_x(key) ─► ring.pick_node(key) ─► store.get(node, key) ─► codec::decode_x
//! ```
//!
//! `get_string`/`get_int64`/`get_bool` are soft: misses, store failures and
//! undecodable values all come back as `None`. Use `get_value` or `get` with
//! the `codec::decode_*` functions to see the precise error.

use std::sync::Arc;

use crate::codec::{self, Item, ScalarValue, TaggedValue};
use crate::config::Config;
use crate::error::Result;
use crate::network::TcpStore;
use crate::protocol::validate_key;
use crate::ring::{HashRing, Node, SharedRing};
use crate::store::Store;

/// Cache client with pylibmc-compatible values and ketama key placement
pub struct Client<S: Store> {
    /// Current ring, swapped on topology changes
    ring: SharedRing,

    /// Backend the values are written through
    store: S,
}

impl Client<TcpStore> {
    /// Client talking to the memcached servers listed in `config`
    pub fn connect(config: Config) -> Result<Self> {
        let store = TcpStore::new(&config);
        Self::with_store(&config, store)
    }
}

impl<S: Store> Client<S> {
    /// Client over an arbitrary store, ring built from `config`
    pub fn with_store(config: &Config, store: S) -> Result<Self> {
        config.validate()?;
        let ring = HashRing::new(
            config.servers.iter().cloned(),
            config.points_per_server,
            config.hash.hasher(),
        )?;
        Ok(Self::with_ring(ring, store))
    }

    /// Client over a prebuilt ring (custom hash functions)
    pub fn with_ring(ring: HashRing, store: S) -> Self {
        Self {
            ring: SharedRing::new(ring),
            store,
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Store an item on the node that owns its key
    pub fn set(&self, item: &Item) -> Result<()> {
        validate_key(&item.key)?;
        let node = self.ring.pick_node(&item.key);
        tracing::trace!("set {} -> {}", item.key, node);
        self.store.set(&node, &item.key, &item.value)
    }

    /// Store a plain string (FLAG_NONE)
    pub fn set_string(&self, key: &str, s: &str) -> Result<()> {
        self.set(&Item::string(key, s))
    }

    /// Store a string as a pickled `unicode` object (FLAG_PICKLE)
    pub fn set_unicode(&self, key: &str, s: &str) -> Result<()> {
        self.set(&Item::unicode(key, s)?)
    }

    pub fn set_int64(&self, key: &str, n: i64) -> Result<()> {
        self.set(&Item::int64(key, n))
    }

    pub fn set_bool(&self, key: &str, b: bool) -> Result<()> {
        self.set(&Item::boolean(key, b))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Raw tagged value for `key`
    pub fn get(&self, key: &str) -> Result<Option<TaggedValue>> {
        validate_key(key)?;
        let node = self.ring.pick_node(key);
        tracing::trace!("get {} -> {}", key, node);
        self.store.get(&node, key)
    }

    /// Decoded value for `key`, surfacing decode errors
    pub fn get_value(&self, key: &str) -> Result<Option<ScalarValue>> {
        match self.get(key)? {
            Some(value) => codec::decode(&value).map(Some),
            None => Ok(None),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_soft(key, codec::decode_string)
    }

    pub fn get_int64(&self, key: &str) -> Option<i64> {
        self.get_soft(key, codec::decode_int64)
    }

    /// Boolean from FLAG_BOOL, legacy FLAG_INTEGER `0`/`1`, or a pickled bool
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_soft(key, codec::decode_bool)
    }

    fn get_soft<T>(&self, key: &str, decode: fn(&TaggedValue) -> Result<T>) -> Option<T> {
        let value = match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("get {} failed: {}", key, e);
                return None;
            }
        };

        match decode(&value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::debug!("value for {} not decodable: {}", key, e);
                None
            }
        }
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// Node that owns `key` in the current ring
    pub fn node_for(&self, key: &str) -> Node {
        self.ring.pick_node(key)
    }

    /// Current ring snapshot
    pub fn ring(&self) -> Arc<HashRing> {
        self.ring.snapshot()
    }

    /// Rebuild the ring over `servers` and swap it in.
    ///
    /// Lookups already holding the previous snapshot finish against it. The
    /// store then drops connections to nodes that are no longer listed.
    pub fn update_servers<I, T>(&self, servers: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let next = self.ring.snapshot().with_nodes(servers)?;
        tracing::debug!("Replacing ring with nodes {:?}", next.nodes());
        self.ring.replace(next);
        self.store.retain_nodes(self.ring.snapshot().nodes());
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
