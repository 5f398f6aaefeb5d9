use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for arbitrary JSON values nested up to `depth` levels.
///
/// Keys and strings come from a small alphabet so that generated patterns
/// actually hit generated structure.
pub fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-4i64..4).prop_map(|i| json!(i)),
        "[a-d]{1,2}".prop_map(Value::String),
    ];

    leaf.prop_recursive(depth, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::vec(("[a-d]", inner), 1..4).prop_map(|pairs| {
                let map: serde_json::Map<String, Value> = pairs.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

/// Patterns over the same alphabet as [`arb_json`], with wildcards and
/// stray separators mixed in.
pub fn arb_pattern() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof!["[a-d]", Just("[]".to_string()), Just(String::new())], 0..5)
        .prop_map(|segments| segments.join("."))
}

/// Every scalar leaf in `value`, depth first.
pub fn leaves(value: &Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => items.iter().for_each(|v| leaves(v, out)),
        Value::Object(map) => map.values().for_each(|v| leaves(v, out)),
        scalar => out.push(scalar.clone()),
    }
}
