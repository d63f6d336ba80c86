//! Behavioral tests for the hash ring.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Multiple nodes**: Distribution, backup distinctness, stability
//! 3. **Round-robin**: Coverage and weight fairness
//! 4. **Edge cases**: Wraparound, single node, partial removal

use std::collections::HashMap;

use conring_core::{HashAlgorithm, HashRing, NodeHandle, RingBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NODES: [(u64, u32); 5] = [
    (0x1_2345_6789, 1),
    (0x2_2446_6880, 3),
    (0x6_789a_bcde, 2),
    (0x8_8888_8888, 2),
    (0xf_edcb_a987, 2),
];

fn five_node_ring(algorithm: HashAlgorithm) -> HashRing<u64> {
    let mut ring = HashRing::new(algorithm, 168);
    for (node, weight) in NODES {
        ring.add_node(node, weight);
    }
    ring
}

fn total_weight() -> u32 {
    NODES.iter().map(|&(_, w)| w).sum()
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_contract() {
    for algorithm in HashAlgorithm::ALL {
        let mut ring: HashRing<u64> = HashRing::new(algorithm, 168);
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.lookup(12u32), None);
        assert_eq!(ring.lookup_with_backup(12u32), None);
        assert_eq!(ring.lookup_bytes(b"key"), None);
        assert_eq!(ring.lookup_bytes_with_backup(b"key"), None);
        assert_eq!(ring.round_robin(), None);
        assert_eq!(ring.round_robin_with_backup(), None);
    }
}

#[test]
fn test_add_node_and_lookup() {
    let mut ring = HashRing::new(HashAlgorithm::Murmur, 168);
    ring.add_node(1u64, 1);

    assert_eq!(ring.len(), 168);
    assert_eq!(ring.lookup_bytes(b"test-key"), Some(&1));
    assert_eq!(ring.lookup(99u64), Some(&1));
}

#[test]
fn test_insertion_growth() {
    // no collisions among these nodes for any digest
    for algorithm in HashAlgorithm::ALL {
        let ring = five_node_ring(algorithm);
        assert_eq!(ring.len(), 168 * total_weight() as usize);
        assert_eq!(ring.distinct_nodes(), 5);
    }
}

#[test]
fn test_remove_node() {
    let mut ring = five_node_ring(HashAlgorithm::Murmur);
    let before = ring.len();

    ring.add_node(0xdead_beef, 4);
    assert_eq!(ring.len(), before + 4 * 168);

    assert_eq!(ring.remove_node(&0xdead_beef, 4), 4 * 168);
    assert_eq!(ring.len(), before);

    for i in 0..2_000u32 {
        assert_ne!(ring.lookup(i), Some(&0xdead_beef));
    }
}

#[test]
fn test_remove_missing_node_is_noop() {
    let mut ring = five_node_ring(HashAlgorithm::Fnv);
    let before = ring.len();
    assert_eq!(ring.remove_node(&0x42, 3), 0);
    assert_eq!(ring.remove_named_node(b"never-added", 10), 0);
    assert_eq!(ring.len(), before);
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_lookup_totality() {
    let ring = five_node_ring(HashAlgorithm::Hsieh);
    let present: Vec<u64> = NODES.iter().map(|&(n, _)| n).collect();

    let max_position = ring.iter().last().map(|(p, _)| p).unwrap();
    let (_, first_node) = ring.iter().next().unwrap();

    // keys whose digest lands past the last position wrap to the first entry
    let mut wrapped = 0;
    for i in 0..20_000u32 {
        let node = ring.lookup(i).unwrap();
        assert!(present.contains(node));
        if ring.position_of(&i.to_ne_bytes()) > max_position {
            assert_eq!(node, first_node);
            wrapped += 1;
        }
    }
    assert!(wrapped > 0, "sample should exercise wraparound");
}

#[test]
fn test_consistent_lookup() {
    let ring = five_node_ring(HashAlgorithm::Murmur);
    let key = b"consistent-key";
    let first = ring.lookup_bytes_with_backup(key);
    for _ in 0..10 {
        assert_eq!(ring.lookup_bytes_with_backup(key), first);
    }
}

#[test]
fn test_backup_distinctness() {
    for algorithm in HashAlgorithm::ALL {
        let ring = five_node_ring(algorithm);
        for i in 0..2_000 {
            let key = format!("key-{i}");
            let (primary, backup) = ring.lookup_bytes_with_backup(key.as_bytes()).unwrap();
            assert_ne!(primary, backup, "{algorithm} key {key}");
            assert_eq!(Some(primary), ring.lookup_bytes(key.as_bytes()));
        }
    }
}

#[test]
fn test_stability_under_single_removal() {
    let removed = 0x8_8888_8888u64;
    for algorithm in HashAlgorithm::ALL {
        let mut ring = five_node_ring(algorithm);
        let keys: Vec<String> = (0..2_000).map(|i| format!("key-{i}")).collect();
        let before: Vec<u64> = keys
            .iter()
            .map(|k| *ring.lookup_bytes(k.as_bytes()).unwrap())
            .collect();

        ring.remove_node(&removed, 2);

        let mut unchanged = 0;
        for (key, old) in keys.iter().zip(&before) {
            let new = *ring.lookup_bytes(key.as_bytes()).unwrap();
            if new == *old {
                unchanged += 1;
            } else {
                // only keys owned by the removed node move
                assert_eq!(*old, removed);
            }
        }
        assert!(unchanged * 100 >= keys.len() * 60, "{algorithm}: {unchanged}");
    }
}

#[test]
fn test_lookup_distribution_follows_weight() {
    let ring = five_node_ring(HashAlgorithm::Murmur);
    let mut rng = StdRng::seed_from_u64(7);
    let samples = 50_000;

    let mut counts: HashMap<u64, usize> = HashMap::new();
    for _ in 0..samples {
        let key: u32 = rng.gen();
        *counts.entry(*ring.lookup(key).unwrap()).or_default() += 1;
    }

    for (node, weight) in NODES {
        let share = counts[&node] as f64 / samples as f64;
        let expected = f64::from(weight) / f64::from(total_weight());
        assert!((share - expected).abs() < 0.05, "{node:x}: {share} vs {expected}");
    }
}

// ============================================================================
// Round-Robin Tests
// ============================================================================

#[test]
fn test_round_robin_coverage() {
    for algorithm in HashAlgorithm::ALL {
        let mut ring = five_node_ring(algorithm);
        let mut seen: HashMap<u64, usize> = HashMap::new();
        for _ in 0..ring.len() {
            *seen.entry(*ring.round_robin().unwrap()).or_default() += 1;
        }
        assert_eq!(seen.len(), NODES.len(), "{algorithm}");
    }
}

#[test]
fn test_round_robin_fairness() {
    let calls = 1_000_000;
    for algorithm in HashAlgorithm::ALL {
        let mut ring = five_node_ring(algorithm);
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for _ in 0..calls {
            *counts.entry(*ring.round_robin().unwrap()).or_default() += 1;
        }

        for (node, weight) in NODES {
            let share = counts[&node] as f64 / calls as f64;
            let expected = f64::from(weight) / f64::from(total_weight());
            assert!(
                (share - expected).abs() < 0.05,
                "{algorithm} {node:x}: {share} vs {expected}"
            );
        }
    }
}

#[test]
fn test_round_robin_rarely_repeats() {
    let mut ring = five_node_ring(HashAlgorithm::Murmur);
    let mut previous = *ring.round_robin().unwrap();
    let mut repeats = 0;
    for _ in 0..1_000 {
        let node = *ring.round_robin().unwrap();
        if node == previous {
            repeats += 1;
        }
        previous = node;
    }
    assert_eq!(repeats, 0);
}

#[test]
fn test_round_robin_survives_churn() {
    let mut ring = five_node_ring(HashAlgorithm::Fnv);
    for round in 0..50u64 {
        ring.round_robin();
        let (node, weight) = NODES[(round % 5) as usize];
        ring.remove_node(&node, weight);
        assert!(ring.round_robin().is_some());
        ring.add_node(node, weight);
    }
    assert_eq!(ring.len(), 168 * total_weight() as usize);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_single_node() {
    let mut ring = HashRing::new(HashAlgorithm::Hsieh, 168);
    ring.add_node(1u32, 1);

    for key in [&b"key1"[..], b"key2", b"", b"very-long-key-name"] {
        assert_eq!(ring.lookup_bytes(key), Some(&1));
        assert_eq!(ring.lookup_bytes_with_backup(key), Some((&1, &1)));
    }
}

#[test]
fn test_add_remove_add() {
    let mut ring = HashRing::new(HashAlgorithm::Murmur, 168);
    ring.add_node(1u64, 2);
    assert_eq!(ring.remove_node(&1, 2), 336);
    assert!(ring.is_empty());

    ring.add_node(1u64, 2);
    assert_eq!(ring.len(), 336);
    assert!(ring.lookup_bytes(b"key").is_some());
}

#[test]
fn test_repeated_add_is_idempotent() {
    let mut ring = HashRing::new(HashAlgorithm::Murmur, 168);
    ring.add_node(1u64, 1);
    ring.add_node(1u64, 1);
    assert_eq!(ring.len(), 168);
}

#[test]
fn test_partial_removal() {
    let mut ring = five_node_ring(HashAlgorithm::Murmur);
    let before = ring.len();
    let heavy = 0x2_2446_6880u64;

    assert_eq!(ring.remove_node(&heavy, 1), 168);
    assert_eq!(ring.len(), before - 168);
    assert!(ring.iter().any(|(_, &n)| n == heavy));
}

#[test]
fn test_named_handles() {
    let endpoints = [
        ("9.8.7.6:11211", 2),
        ("5.6.7.8:11311", 3),
        ("6.5.4.3:11511", 5),
    ];
    let handles: Vec<NodeHandle<&str>> = endpoints.iter().map(|&(e, _)| NodeHandle::new(e)).collect();

    let mut builder = RingBuilder::new();
    for (handle, &(endpoint, weight)) in handles.iter().zip(&endpoints) {
        builder = builder.named_node(handle.clone(), endpoint, weight);
    }
    let mut ring = builder.build();
    assert_eq!(ring.len(), 168 * 10);
    assert_eq!(ring.distinct_nodes(), 3);

    let (primary, backup) = ring.lookup_bytes_with_backup(b"user:42").unwrap();
    assert_ne!(primary, backup);
    assert!(handles.contains(primary));

    for (handle, &(endpoint, weight)) in handles.iter().zip(&endpoints).take(2) {
        ring.remove_named_node(endpoint.as_bytes(), weight);
        assert!(ring.iter().all(|(_, n)| n != handle));
    }
    assert_eq!(ring.lookup_bytes(b"user:42"), Some(&handles[2]));
}
