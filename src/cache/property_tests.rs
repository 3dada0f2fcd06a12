//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's capacity, round-trip and recency guarantees.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::CacheStore;

// == Test Configuration ==
const TEST_CAPACITY: usize = 10;

// == Strategies ==
/// Generates remote object keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,24}".prop_map(|s| format!("gs://bucket/{}", s))
}

/// Generates opaque payloads
fn value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

fn unique(keys: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(k.clone())).collect()
}

#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: Vec<u8> },
    Get { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| StoreOp::Set { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing a payload and reading it back returns the exact bytes.
    #[test]
    fn prop_set_then_get_roundtrip(key in key_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(TEST_CAPACITY);

        prop_assert!(!store.exists(&key));
        store.set(&key, value.clone()).unwrap();

        prop_assert!(store.exists(&key));
        prop_assert_eq!(store.get(&key).unwrap(), value);
    }

    // The store never holds more entries than its capacity.
    #[test]
    fn prop_capacity_enforcement(
        ops in prop::collection::vec(store_op_strategy(), 1..200),
        capacity in 1usize..12
    ) {
        let mut store = CacheStore::new(capacity);

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, value).unwrap();
                }
                StoreOp::Get { key } => {
                    let _ = store.get(&key);
                }
            }
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }

    // Hits and misses reflect every get that was issued.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..50)) {
        let mut store = CacheStore::new(TEST_CAPACITY);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Set { key, value } => {
                    store.set(&key, value).unwrap();
                }
                StoreOp::Get { key } => match store.get(&key) {
                    Ok(_) => expected_hits += 1,
                    Err(_) => expected_misses += 1,
                },
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, store.len());
    }

    // Inserting past capacity evicts exactly the earliest-inserted keys.
    #[test]
    fn prop_overflow_evicts_least_recent(
        keys in prop::collection::vec(key_strategy(), 3..30),
        capacity in 1usize..8
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() > capacity);

        let mut store = CacheStore::new(capacity);
        for key in &keys {
            store.set(key, key.as_bytes().to_vec()).unwrap();
        }

        let split = keys.len() - capacity;
        for key in &keys[..split] {
            prop_assert!(!store.exists(key), "'{}' should have been evicted", key);
        }
        for key in &keys[split..] {
            prop_assert!(store.exists(key), "'{}' should still be cached", key);
        }
        prop_assert_eq!(store.stats().evictions, split as u64);
    }

    // A read makes the key the most recent, so it survives the next eviction.
    #[test]
    fn prop_get_protects_from_eviction(
        keys in prop::collection::vec(key_strategy(), 3..10),
        access_index in 0usize..100,
        new_key in key_strategy()
    ) {
        let keys = unique(keys);
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&new_key));

        let mut store = CacheStore::new(keys.len());
        for key in &keys {
            store.set(key, Vec::new()).unwrap();
        }

        let accessed = &keys[access_index % keys.len()];
        store.get(accessed).unwrap();
        store.set(&new_key, Vec::new()).unwrap();

        prop_assert!(store.exists(accessed));
        prop_assert!(store.exists(&new_key));
        prop_assert_eq!(store.len(), keys.len());
    }
}
