//! Property-based tests for the serializer's core guarantees.
//!
//! Shape round-trip for acyclic input, totality for cyclic graphs, and the
//! compact layout rule, checked over generated inputs.

use proptest::prelude::*;
use safe_stringify::{
    serialize, serialize_with_options, to_value, Array, Object, StringifyOptions, Value,
};
use serde_json::Value as Json;

fn json_leaf() -> impl Strategy<Value = Json> {
    prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i32>().prop_map(Json::from),
        "\\PC{0,10}".prop_map(Json::String),
    ]
}

fn json_tree() -> impl Strategy<Value = Json> {
    json_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Json::Array),
            prop::collection::btree_map("[a-z_]{1,6}", inner, 0..6)
                .prop_map(|map| Json::Object(map.into_iter().collect())),
        ]
    })
}

/// Builds `count` objects and wires them together along `edges`, which may
/// form cycles.
fn graph(count: usize, edges: &[(usize, usize)]) -> Value {
    let nodes: Vec<Object> = (0..count).map(|_| Object::new()).collect();
    for (i, node) in nodes.iter().enumerate() {
        node.set("id", i as i32);
    }
    for (n, &(from, to)) in edges.iter().enumerate() {
        nodes[from % count].set(format!("e{}", n), nodes[to % count].clone());
    }
    let list: Array = nodes.into_iter().map(Value::from).collect();
    list.into()
}

proptest! {
    #[test]
    fn prop_acyclic_shape_round_trips(tree in json_tree()) {
        let value = to_value(&tree).unwrap();
        let text = serialize(&value);
        let parsed: Json = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, tree);
    }

    #[test]
    fn prop_compact_output_round_trips(tree in json_tree()) {
        let value = to_value(&tree).unwrap();
        let options = StringifyOptions::new().with_indent(0);
        let text = serialize_with_options(&value, &options);
        prop_assert_eq!(text, serde_json::to_string(&tree).unwrap());
    }

    #[test]
    fn prop_cyclic_graphs_terminate(
        count in 1usize..6,
        edges in prop::collection::vec((0usize..6, 0usize..6), 0..12),
        max_depth in 0usize..6,
    ) {
        let value = graph(count, &edges);
        let options = StringifyOptions::new().with_max_depth(max_depth).with_indent(0);
        let text = serialize_with_options(&value, &options);
        let parsed: Json = serde_json::from_str(&text).unwrap();
        prop_assert!(parsed.is_array());
    }

    #[test]
    fn prop_indent_widths(tree in json_tree(), indent in 0usize..16) {
        let value = to_value(&tree).unwrap();
        let options = StringifyOptions::new().with_indent(indent);
        let text = serialize_with_options(&value, &options);
        let parsed: Json = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, tree);
    }
}
