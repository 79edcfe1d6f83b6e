//! Property-based test generators using proptest.

use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for generating valid collection names.
pub fn collection_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z][a-zA-Z0-9_-]{0,31}").expect("Invalid regex")
}

/// Strategy for generating valid resource names.
pub fn resource_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9][a-zA-Z0-9_. -]{0,31}").expect("Invalid regex")
}

/// Strategy for generating names a store must reject.
pub fn invalid_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just(".".to_string()),
        Just("..".to_string()),
        "[a-z]{1,8}/[a-z]{1,8}",
        "[a-z]{1,8}\\\\[a-z]{1,8}",
    ]
}

/// Strategy for generating JSON documents.
///
/// Numbers are integers so that decoding yields an equal value.
pub fn document_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[ -~]{0,24}".prop_map(Value::String),
    ];
    let tree = leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z_]{1,10}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    });
    prop::collection::btree_map("[a-zA-Z_]{1,10}", tree, 0..8)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}
