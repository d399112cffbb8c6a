//! Hash ring (continuum)
//!
//! Sorted sequence of ring points built once from a node list.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{McError, Result};

use super::{validate_node_addr, KeyHasher};

/// A cache node, identified by its configured `host:port` text
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node(String);

impl Node {
    /// Validate and wrap a `host:port` address
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        validate_node_addr(&addr)?;
        Ok(Self(addr))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One point on the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingPoint {
    /// Ring coordinate
    pub hash: u32,

    /// Index of the owning node in `HashRing::nodes()`
    pub node: usize,

    /// Per-node point number used to derive `hash`
    pub replica: u32,
}

/// Consistent hash ring, non-weighted ketama layout.
///
/// Every node contributes `points_per_node` points at
/// `hash("<host:port>-<n>")`. Lookups hash the key with the same function and
/// take the first point at or after it, wrapping to the start.
///
/// The ring is immutable. Topology changes build a new ring
/// (see [`HashRing::with_nodes`] and [`super::SharedRing`]).
pub struct HashRing {
    /// Points sorted by (hash, node address, replica)
    points: Vec<RingPoint>,

    /// Distinct nodes in configuration order
    nodes: Vec<Node>,

    points_per_node: usize,

    hasher: Arc<dyn KeyHasher>,
}

impl HashRing {
    /// Build a ring from `host:port` addresses.
    ///
    /// Duplicate addresses are collapsed. An empty node list or zero points
    /// per node is `EmptyRing`.
    pub fn new<I, S>(nodes: I, points_per_node: usize, hasher: Arc<dyn KeyHasher>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut distinct = Vec::new();
        for addr in nodes {
            let node = Node::new(addr)?;
            if seen.insert(node.clone()) {
                distinct.push(node);
            } else {
                tracing::warn!("Ignoring duplicate ring node {}", node);
            }
        }

        if distinct.is_empty() || points_per_node == 0 {
            return Err(McError::EmptyRing);
        }

        let mut points = Vec::with_capacity(distinct.len() * points_per_node);
        for (index, node) in distinct.iter().enumerate() {
            for replica in 0..points_per_node {
                let input = format!("{}-{}", node, replica);
                points.push(RingPoint {
                    hash: hasher.hash(input.as_bytes()),
                    node: index,
                    replica: replica as u32,
                });
            }
        }

        // Ties resolve by address, so the layout does not depend on list order
        points.sort_unstable_by(|a, b| {
            a.hash
                .cmp(&b.hash)
                .then_with(|| distinct[a.node].cmp(&distinct[b.node]))
                .then_with(|| a.replica.cmp(&b.replica))
        });

        tracing::debug!(
            nodes = distinct.len(),
            points = points.len(),
            "Built hash ring"
        );

        Ok(Self {
            points,
            nodes: distinct,
            points_per_node,
            hasher,
        })
    }

    /// Build a new ring over `nodes` with this ring's hasher and point count
    pub fn with_nodes<I, S>(&self, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(nodes, self.points_per_node, Arc::clone(&self.hasher))
    }

    /// Ring coordinate of `key`
    pub fn hash_key(&self, key: &str) -> u32 {
        self.hasher.hash(key.as_bytes())
    }

    /// Node that owns `key`
    pub fn pick_node(&self, key: &str) -> &Node {
        let point = self.point_for_hash(self.hash_key(key));
        &self.nodes[point.node]
    }

    /// First point at or after `hash`, wrapping to the first point
    pub fn point_for_hash(&self, hash: u32) -> &RingPoint {
        let index = self.points.partition_point(|p| p.hash < hash);
        if index == self.points.len() {
            &self.points[0]
        } else {
            &self.points[index]
        }
    }

    pub fn points(&self) -> &[RingPoint] {
        &self.points
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn points_per_node(&self) -> usize {
        self.points_per_node
    }

    pub fn contains(&self, addr: &str) -> bool {
        self.nodes.iter().any(|n| n.as_str() == addr)
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("nodes", &self.nodes)
            .field("points", &self.points.len())
            .finish()
    }
}
