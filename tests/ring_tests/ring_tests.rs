//! Tests for the consistent hash ring
//!
//! These tests verify:
//! - Ring layout (point count, ordering, point hash inputs)
//! - Lookup with wrap-around
//! - Determinism independent of node order
//! - Bounded remapping when a node leaves
//! - Snapshot semantics of the shared ring

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use mcpickle::ring::{
    one_at_a_time, Fnv1a32, HashRing, Jenkins32, KeyHasher, SharedRing,
    DEFAULT_POINTS_PER_SERVER,
};
use mcpickle::McError;

// =============================================================================
// Helper Functions
// =============================================================================

fn jenkins() -> Arc<dyn KeyHasher> {
    Arc::new(Jenkins32)
}

fn cluster(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("cache{}.example.com:11211", i))
        .collect()
}

fn owners(ring: &HashRing, keys: usize) -> Vec<String> {
    (0..keys)
        .map(|i| ring.pick_node(&format!("key-{}", i)).to_string())
        .collect()
}

/// Hasher that places ring points by table and keys by their numeric value
fn placed(points: &'static [(&'static str, u32)]) -> Arc<dyn KeyHasher> {
    Arc::new(move |data: &[u8]| -> u32 {
        let text = std::str::from_utf8(data).unwrap();
        points
            .iter()
            .find(|(input, _)| *input == text)
            .map(|(_, hash)| *hash)
            .unwrap_or_else(|| text.parse().unwrap())
    })
}

// =============================================================================
// Layout Tests
// =============================================================================

#[test]
fn test_point_count_and_order() {
    let ring = HashRing::new(cluster(3), DEFAULT_POINTS_PER_SERVER, jenkins()).unwrap();

    assert_eq!(ring.points().len(), 300);
    assert_eq!(ring.nodes().len(), 3);
    assert_eq!(ring.points_per_node(), 100);
    assert!(ring.points().windows(2).all(|w| w[0].hash <= w[1].hash));
}

#[test]
fn test_points_hash_host_port_and_index() {
    let ring = HashRing::new(["10.0.0.1:11211"], 4, jenkins()).unwrap();

    let mut hashes: Vec<u32> = ring.points().iter().map(|p| p.hash).collect();
    hashes.sort_unstable();
    let mut expected: Vec<u32> = (0..4)
        .map(|i| one_at_a_time(format!("10.0.0.1:11211-{}", i).as_bytes()))
        .collect();
    expected.sort_unstable();

    assert_eq!(hashes, expected);
}

#[test]
fn test_known_placements() {
    let ring = HashRing::new(
        ["10.0.0.1:11211", "10.0.0.2:11211", "10.0.0.3:11211"],
        100,
        jenkins(),
    )
    .unwrap();

    assert_eq!(ring.hash_key("foo"), 0x238678dd);
    for key in ["foo", "bar", "user:1", "session:abc"] {
        assert_eq!(ring.pick_node(key).as_str(), "10.0.0.2:11211", "{}", key);
    }
}

#[test]
fn test_duplicate_nodes_collapsed() {
    let ring = HashRing::new(["a:1", "b:1", "a:1"], 10, jenkins()).unwrap();
    assert_eq!(ring.nodes().len(), 2);
    assert_eq!(ring.points().len(), 20);
    assert!(ring.contains("a:1"));
    assert!(!ring.contains("c:1"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn test_empty_ring_rejected() {
    let empty: Vec<String> = Vec::new();
    assert!(matches!(
        HashRing::new(empty, 100, jenkins()),
        Err(McError::EmptyRing)
    ));
    assert!(matches!(
        HashRing::new(["a:1"], 0, jenkins()),
        Err(McError::EmptyRing)
    ));
}

#[test]
fn test_invalid_node_rejected() {
    for addr in ["", "nohost", ":11211", "host:", "host:99999", "ho st:1"] {
        assert!(
            matches!(HashRing::new([addr], 10, jenkins()), Err(McError::InvalidNode(_))),
            "{:?}",
            addr
        );
    }
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_takes_first_point_at_or_after_hash() {
    static POINTS: &[(&str, u32)] = &[("a:1-0", 100), ("b:1-0", 200)];
    let ring = HashRing::new(["a:1", "b:1"], 1, placed(POINTS)).unwrap();

    assert_eq!(ring.pick_node("0").as_str(), "a:1");
    assert_eq!(ring.pick_node("50").as_str(), "a:1");
    assert_eq!(ring.pick_node("100").as_str(), "a:1");
    assert_eq!(ring.pick_node("101").as_str(), "b:1");
    assert_eq!(ring.pick_node("200").as_str(), "b:1");
}

#[test]
fn test_lookup_wraps_past_last_point() {
    static POINTS: &[(&str, u32)] = &[("a:1-0", 100), ("b:1-0", 200)];
    let ring = HashRing::new(["a:1", "b:1"], 1, placed(POINTS)).unwrap();

    assert_eq!(ring.pick_node("201").as_str(), "a:1");
    assert_eq!(ring.pick_node(&u32::MAX.to_string()).as_str(), "a:1");
}

#[test]
fn test_tied_points_resolve_by_address() {
    let constant: Arc<dyn KeyHasher> = Arc::new(|_: &[u8]| -> u32 { 7 });

    let forward = HashRing::new(["b:1", "a:1"], 3, Arc::clone(&constant)).unwrap();
    let reverse = HashRing::new(["a:1", "b:1"], 3, constant).unwrap();

    assert_eq!(forward.pick_node("anything").as_str(), "a:1");
    assert_eq!(reverse.pick_node("anything").as_str(), "a:1");
}

#[test]
fn test_single_node_owns_everything() {
    let ring = HashRing::new(["solo:11211"], 100, jenkins()).unwrap();
    for owner in owners(&ring, 500) {
        assert_eq!(owner, "solo:11211");
    }
}

// =============================================================================
// Determinism and Stability
// =============================================================================

#[test]
fn test_same_nodes_any_order_same_mapping() {
    let nodes = cluster(5);
    let mut shuffled = nodes.clone();
    shuffled.reverse();
    shuffled.swap(0, 2);

    let a = HashRing::new(nodes, 100, jenkins()).unwrap();
    let b = HashRing::new(shuffled, 100, jenkins()).unwrap();

    assert_eq!(owners(&a, 2000), owners(&b, 2000));
}

#[test]
fn test_removing_node_only_moves_its_keys() {
    let nodes = cluster(5);
    let removed = nodes[4].clone();

    let before = HashRing::new(nodes.clone(), 100, jenkins()).unwrap();
    let after = before.with_nodes(nodes[..4].to_vec()).unwrap();

    let old = owners(&before, 10_000);
    let new = owners(&after, 10_000);

    let mut moved = 0;
    for (was, now) in old.iter().zip(&new) {
        if *was == removed {
            moved += 1;
            assert_ne!(*now, removed);
        } else {
            assert_eq!(was, now);
        }
    }
    // Roughly a fifth of the keyspace belonged to the removed node
    assert!(moved > 1000 && moved < 3500, "moved {}", moved);
}

#[test]
fn test_adding_node_only_claims_keys() {
    let nodes = cluster(4);
    let before = HashRing::new(nodes[..3].to_vec(), 100, jenkins()).unwrap();
    let after = before.with_nodes(nodes.clone()).unwrap();

    for (was, now) in owners(&before, 5000).iter().zip(owners(&after, 5000)) {
        assert!(*was == now || now == nodes[3]);
    }
}

#[test]
fn test_distribution_is_reasonably_even() {
    let ring = HashRing::new(cluster(4), 100, jenkins()).unwrap();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for owner in owners(&ring, 10_000) {
        *counts.entry(owner).or_default() += 1;
    }

    assert_eq!(counts.len(), 4);
    for (node, count) in counts {
        assert!(count > 1500 && count < 3500, "{} got {}", node, count);
    }
}

#[test]
fn test_hasher_choice_changes_layout() {
    let jenkins_ring = HashRing::new(cluster(3), 100, jenkins()).unwrap();
    let fnv_ring = HashRing::new(cluster(3), 100, Arc::new(Fnv1a32)).unwrap();

    assert_ne!(jenkins_ring.hash_key("key"), fnv_ring.hash_key("key"));
    assert_eq!(fnv_ring.points().len(), 300);
}

// =============================================================================
// Shared Ring
// =============================================================================

#[test]
fn test_snapshot_survives_replace() {
    let shared = SharedRing::new(HashRing::new(["a:1", "b:1"], 50, jenkins()).unwrap());

    let old = shared.snapshot();
    let replaced = shared.replace(old.with_nodes(["c:1"]).unwrap());

    assert!(Arc::ptr_eq(&old, &replaced));
    assert_eq!(old.nodes().len(), 2);
    assert!(old.contains("a:1"));
    assert_eq!(shared.pick_node("anything").as_str(), "c:1");
    assert_eq!(shared.snapshot().nodes().len(), 1);
}

#[test]
fn test_concurrent_lookups_during_swaps() {
    let shared = Arc::new(SharedRing::new(
        HashRing::new(["a:1", "b:1"], 50, jenkins()).unwrap(),
    ));

    let readers: Vec<_> = (0..4)
        .map(|t| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..2000 {
                    let node = shared.pick_node(&format!("t{}-{}", t, i));
                    assert!(["a:1", "b:1", "c:1"].contains(&node.as_str()));
                }
            })
        })
        .collect();

    for round in 0..50 {
        let nodes: &[&str] = if round % 2 == 0 {
            &["a:1", "c:1"]
        } else {
            &["a:1", "b:1"]
        };
        let next = shared.snapshot().with_nodes(nodes.iter().copied()).unwrap();
        shared.replace(next);
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
