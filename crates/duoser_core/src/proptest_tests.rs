//! Property-based tests for determinism and round-trips.

use std::collections::{BTreeMap, HashMap, HashSet};

use proptest::prelude::*;

use crate::{borsh, json, ByteBuf};

proptest! {
    #[test]
    fn set_encoding_ignores_insertion_order(mut items in prop::collection::vec(any::<i64>(), 0..64)) {
        let forward: HashSet<i64> = items.iter().copied().collect();
        items.reverse();
        let backward: HashSet<i64> = items.iter().copied().collect();

        prop_assert_eq!(borsh::to_vec(&forward).unwrap(), borsh::to_vec(&backward).unwrap());
        prop_assert_eq!(json::to_string(&forward).unwrap(), json::to_string(&backward).unwrap());
    }

    #[test]
    fn map_encoding_matches_sorted_map(entries in prop::collection::vec((".*", any::<u32>()), 0..32)) {
        let hashed: HashMap<String, u32> = entries.iter().cloned().collect();
        let sorted: BTreeMap<String, u32> = entries.into_iter().collect();

        prop_assert_eq!(borsh::to_vec(&hashed).unwrap(), borsh::to_vec(&sorted).unwrap());
        prop_assert_eq!(json::to_string(&hashed).unwrap(), json::to_string(&sorted).unwrap());
    }

    #[test]
    fn wide_integers_round_trip(v in any::<u128>(), s in any::<i128>()) {
        let bytes = borsh::to_vec(&v).unwrap();
        prop_assert_eq!(&bytes[..8], &(v as u64).to_le_bytes()[..]);
        prop_assert_eq!(&bytes[8..], &((v >> 64) as u64).to_le_bytes()[..]);

        prop_assert_eq!(borsh::from_slice::<u128>(&bytes).unwrap(), v);
        prop_assert_eq!(json::from_str::<u128>(&json::to_string(&v).unwrap()).unwrap(), v);
        prop_assert_eq!(json::from_str::<i128>(&json::to_string(&s).unwrap()).unwrap(), s);
    }

    #[test]
    fn strings_and_payloads_round_trip(s in ".*", raw in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(borsh::from_slice::<String>(&borsh::to_vec(&s).unwrap()).unwrap(), s.clone());
        prop_assert_eq!(json::from_str::<String>(&json::to_string(&s).unwrap()).unwrap(), s);

        let payload = ByteBuf::from(raw);
        prop_assert_eq!(json::from_str::<ByteBuf>(&json::to_string(&payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn finite_floats_round_trip(v in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(borsh::from_slice::<f64>(&borsh::to_vec(&v).unwrap()).unwrap(), v);
        prop_assert_eq!(json::from_str::<f64>(&json::to_string(&v).unwrap()).unwrap(), v);
    }

    #[test]
    fn nullable_is_marker_plus_payload(v in prop::option::of(any::<u32>())) {
        let bytes = borsh::to_vec(&v).unwrap();
        match v {
            None => prop_assert_eq!(bytes, vec![0]),
            Some(inner) => {
                let mut expected = vec![1];
                expected.extend(borsh::to_vec(&inner).unwrap());
                prop_assert_eq!(bytes, expected);
            }
        }
    }
}
