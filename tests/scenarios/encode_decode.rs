//! Using resolved formatters to move values through bytes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use stratapack::{
    BincodeFormatter, BuiltinProvider, CompositeResolver, ErasedFormatter, Error,
    FormatterProvider, FormatterProviderExt,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
    id: u64,
    symbol: String,
    quantity: i32,
}

fn engine_resolver() -> CompositeResolver {
    CompositeResolver::new(
        vec![ErasedFormatter::new(BincodeFormatter::<Order>::new())],
        vec![Arc::new(BuiltinProvider::new()) as Arc<dyn FormatterProvider>],
    )
}

#[test]
fn test_builtin_and_generated_formatters() {
    let resolver = engine_resolver();

    let order = Order {
        id: 17,
        symbol: "ACME".to_string(),
        quantity: -3,
    };
    let formatter = resolver.require_formatter::<Order>().unwrap();
    let mut buf = Vec::new();
    formatter.serialize(&order, &mut buf).unwrap();
    assert_eq!(formatter.deserialize(&buf).unwrap(), order);

    let strings = resolver.require_formatter::<String>().unwrap();
    let mut buf = Vec::new();
    strings.serialize(&"ACME".to_string(), &mut buf).unwrap();
    assert_eq!(strings.deserialize(&buf).unwrap(), "ACME");
}

#[test]
fn test_missing_formatter_surfaces_at_use() {
    let resolver = engine_resolver();

    // Lookup itself is not an error
    assert!(resolver.get_formatter::<Vec<Order>>().is_none());

    // The caller that needs it right now turns absence into an error
    match resolver.require_formatter::<Vec<Order>>() {
        Err(Error::FormatterNotFound(name)) => assert!(name.contains("Order")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected no formatter"),
    }
}
