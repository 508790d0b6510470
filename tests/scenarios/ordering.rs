//! Resolution order: explicit formatters first, then providers, first wins.

use std::sync::Arc;

use stratapack::builtin::{StringFormatter, U32Formatter};
use stratapack::{CompositeResolver, ErasedFormatter, FormatterProvider};

use crate::common::{encode_with, tagged, ListProvider};

#[test]
fn test_int_string_bool_scenario() {
    let f_int = ErasedFormatter::new(U32Formatter);
    let f_string = ErasedFormatter::new(StringFormatter);
    let p1 = ListProvider::new(vec![f_string.clone()]);

    let resolver = CompositeResolver::new(
        vec![f_int.clone()],
        vec![p1 as Arc<dyn FormatterProvider>],
    );

    assert!(resolver.resolve(&stratapack::TypeKey::of::<u32>()).unwrap().ptr_eq(&f_int));
    assert!(resolver
        .resolve(&stratapack::TypeKey::of::<String>())
        .unwrap()
        .ptr_eq(&f_string));
    assert!(resolver.get_formatter::<bool>().is_none());
}

#[test]
fn test_two_formatters_same_type_first_wins() {
    let resolver = CompositeResolver::from_formatters(vec![tagged::<u32>(1), tagged::<u32>(2)]);
    assert_eq!(encode_with(&resolver, &0u32), vec![1]);
}

#[test]
fn test_explicit_beats_earlier_provider() {
    let provider = ListProvider::new(vec![tagged::<u32>(9)]);
    let resolver = CompositeResolver::new(
        vec![tagged::<u32>(1)],
        vec![provider.clone() as Arc<dyn FormatterProvider>],
    );

    assert_eq!(encode_with(&resolver, &0u32), vec![1]);
    assert_eq!(provider.lookups(), 0);
}

#[test]
fn test_providers_scanned_in_order() {
    let empty = ListProvider::new(vec![]);
    let first = ListProvider::new(vec![tagged::<String>(1)]);
    let second = ListProvider::new(vec![tagged::<String>(2)]);

    let resolver = CompositeResolver::from_providers(vec![
        empty.clone() as Arc<dyn FormatterProvider>,
        first as Arc<dyn FormatterProvider>,
        second.clone() as Arc<dyn FormatterProvider>,
    ]);

    assert_eq!(encode_with(&resolver, &String::new()), vec![1]);
    assert_eq!(empty.lookups(), 1);
    assert_eq!(second.lookups(), 0);
}

#[test]
fn test_override_default_by_nesting() {
    // Library defaults live in an inner resolver; the application layers its
    // own overrides in front of it
    let defaults = CompositeResolver::from_formatters(vec![tagged::<u32>(1), tagged::<i32>(2)]);
    let app = CompositeResolver::new(
        vec![tagged::<u32>(7)],
        vec![Arc::new(defaults) as Arc<dyn FormatterProvider>],
    );

    assert_eq!(encode_with(&app, &0u32), vec![7]);
    assert_eq!(encode_with(&app, &0i32), vec![2]);
}
