use std::collections::HashMap;

use proptest::prelude::*;
use randprobe::HashTable;

/// One step of a random workload
#[derive(Debug, Clone)]
enum Op {
    Insert(u8, i64),
    Remove(u8),
}

fn key(id: u8) -> String {
    format!("k{id}")
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_u8..48, any::<i64>()).prop_map(|(id, value)| Op::Insert(id, value)),
        (0_u8..48).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn unique_inserts_are_all_retrievable(
        keys in prop::collection::hash_set("[a-zA-Z0-9]{0,12}", 0..200),
        seed in any::<u64>(),
    ) {
        let mut table = HashTable::with_seed(8, seed);
        for (value, key) in (0_i64..).zip(&keys) {
            prop_assert!(table.insert(key.as_str(), value));
        }

        prop_assert_eq!(table.len(), keys.len());
        for (value, key) in (0_i64..).zip(&keys) {
            prop_assert!(table.contains(key));
            prop_assert_eq!(table.get(key), Some(value));
        }
    }

    #[test]
    fn duplicate_insert_keeps_first_value(key in ".{0,16}", first in any::<i64>(), second in any::<i64>()) {
        let mut table = HashTable::new();
        prop_assert!(table.insert(key.as_str(), first));
        prop_assert!(!table.insert(key.as_str(), second));
        prop_assert_eq!(table.get(&key), Some(first));
        prop_assert_eq!(table.len(), 1);
    }

    #[test]
    fn workload_matches_model(ops in prop::collection::vec(op(), 0..300), seed in any::<u64>()) {
        let mut table = HashTable::with_seed(8, seed);
        let mut model: HashMap<String, i64> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(id, value) => {
                    let capacity = table.capacity();
                    let fresh = !model.contains_key(&key(id));
                    prop_assert_eq!(table.insert(key(id), value), fresh);
                    if fresh {
                        model.insert(key(id), value);
                    }

                    prop_assert!(table.alpha() <= 0.5);
                    let grown = table.capacity() != capacity;
                    prop_assert!(!grown || table.capacity() == capacity * 2);
                }
                Op::Remove(id) => {
                    let len = table.len();
                    let present = model.remove(&key(id)).is_some();
                    prop_assert_eq!(table.remove(&key(id)), present);
                    prop_assert_eq!(table.len(), if present { len - 1 } else { len });
                    prop_assert!(!table.contains(&key(id)));
                    prop_assert_eq!(table.get(&key(id)), None);
                }
            }

            let keys = table.keys();
            prop_assert_eq!(keys.len(), table.len());
            for key in &keys {
                prop_assert!(table.contains(key));
            }
        }

        prop_assert_eq!(table.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(table.get(key), Some(*value));
        }
    }

    #[test]
    fn same_seed_same_layout(
        keys in prop::collection::vec("[a-z]{1,8}", 0..64),
        seed in any::<u64>(),
    ) {
        let mut first = HashTable::with_seed(4, seed);
        let mut second = HashTable::with_seed(4, seed);
        for key in &keys {
            first.insert(key.as_str(), 0);
            second.insert(key.as_str(), 0);
        }
        prop_assert_eq!(first.to_string(), second.to_string());
    }
}
