//! Property tests: idempotence and defensive copies.

use proptest::prelude::*;
use std::sync::Arc;

use stratapack::{CompositeResolver, ErasedFormatter, FormatterProvider, TypeKey};

use crate::common::{tagged, ListProvider};

fn formatter_for(type_index: u8, tag: u8) -> ErasedFormatter {
    match type_index % 4 {
        0 => tagged::<u8>(tag),
        1 => tagged::<u16>(tag),
        2 => tagged::<String>(tag),
        _ => tagged::<bool>(tag),
    }
}

fn key_for(type_index: u8) -> TypeKey {
    match type_index % 4 {
        0 => TypeKey::of::<u8>(),
        1 => TypeKey::of::<u16>(),
        2 => TypeKey::of::<String>(),
        _ => TypeKey::of::<bool>(),
    }
}

proptest! {
    #[test]
    fn prop_lookup_is_idempotent(
        explicit in proptest::collection::vec(0u8..4, 0..6),
        provided in proptest::collection::vec(0u8..4, 0..6),
        requests in proptest::collection::vec(0u8..5, 1..20),
    ) {
        let formatters: Vec<ErasedFormatter> = explicit
            .iter()
            .enumerate()
            .map(|(i, t)| formatter_for(*t, i as u8))
            .collect();
        let provider = ListProvider::new(
            provided.iter().map(|t| formatter_for(*t, 100)).collect(),
        );
        let resolver =
            CompositeResolver::new(formatters, vec![provider as Arc<dyn FormatterProvider>]);

        for request in requests {
            // 4 maps to a type nobody registers
            let key = if request == 4 { TypeKey::of::<i64>() } else { key_for(request) };
            let first = resolver.resolve(&key);
            let second = resolver.resolve(&key);
            match (first, second) {
                (Some(a), Some(b)) => prop_assert!(a.ptr_eq(&b)),
                (None, None) => {}
                _ => prop_assert!(false, "answer changed between lookups"),
            }
        }
    }

    #[test]
    fn prop_mutating_input_after_construction_has_no_effect(
        explicit in proptest::collection::vec(0u8..4, 1..6),
        replacement in proptest::collection::vec(0u8..4, 0..6),
    ) {
        let mut formatters: Vec<ErasedFormatter> = explicit
            .iter()
            .enumerate()
            .map(|(i, t)| formatter_for(*t, i as u8))
            .collect();
        let resolver = CompositeResolver::from_formatters(formatters.clone());
        let snapshot = formatters.clone();

        formatters.clear();
        formatters.extend(replacement.iter().map(|t| formatter_for(*t, 200)));

        for type_index in 0u8..4 {
            let key = key_for(type_index);
            let expected = snapshot.iter().find(|f| f.type_key() == key);
            match (resolver.resolve(&key), expected) {
                (Some(found), Some(expected)) => prop_assert!(found.ptr_eq(expected)),
                (None, None) => {}
                _ => prop_assert!(false, "resolution followed the mutated input"),
            }
        }
    }
}
