use indexmap::IndexMap;
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::Value;

use json_schema_model::{AdditionalProperties, Decoder, FiniteF64, SchemaNode, encode};

fn text() -> impl Strategy<Value = Option<String>> {
    option::of("[A-Za-z][A-Za-z0-9 ]{0,11}")
}

fn count() -> impl Strategy<Value = Option<u64>> {
    option::of(0u64..1000)
}

/// Any finite `f64`, subnormals and extremes included.
fn bound() -> impl Strategy<Value = Option<FiniteF64>> {
    option::of(any::<f64>().prop_filter_map("non-finite", FiniteF64::new))
}

fn literal() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn leaf() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        (text(), count(), count(), text(), text())
            .prop_map(|(d, min, max, pattern, format)| SchemaNode::string(d, min, max, pattern, format)),
        (text(), option::of(any::<i64>()), option::of(any::<i64>()))
            .prop_map(|(d, lo, hi)| SchemaNode::integer(d, lo, hi)),
        (text(), bound(), bound()).prop_map(|(d, lo, hi)| SchemaNode::number(d, lo, hi)),
        text().prop_map(SchemaNode::boolean),
        text().prop_map(SchemaNode::null),
        (text(), vec(literal(), 0..4)).prop_map(|(d, values)| SchemaNode::enumeration(d, values)),
    ]
}

fn node() -> impl Strategy<Value = SchemaNode> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (text(), option::of(inner.clone()), count(), count(), option::of(any::<bool>()))
                .prop_map(|(d, items, min, max, unique)| SchemaNode::array(d, items, min, max, unique)),
            (text(), vec(("[a-z]{1,6}", inner.clone()), 0..4), option::of(any::<bool>())).prop_map(
                |(d, props, additional)| {
                    let required: Vec<String> = props.iter().take(1).map(|(name, _)| name.clone()).collect();
                    let properties: IndexMap<String, SchemaNode> = props.into_iter().collect();
                    SchemaNode::object(
                        d,
                        Some(properties),
                        Some(required),
                        additional.map(AdditionalProperties::Allowed),
                    )
                }
            ),
            (text(), text(), vec(inner.clone(), 0..3)).prop_map(|(t, d, s)| SchemaNode::one_of(t, d, s)),
            (text(), text(), vec(inner.clone(), 0..3)).prop_map(|(t, d, s)| SchemaNode::any_of(t, d, s)),
            (text(), text(), vec(inner, 0..3)).prop_map(|(t, d, s)| SchemaNode::all_of(t, d, s)),
        ]
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(node in node()) {
        let decoded = Decoder::default().decode(&encode(&node)).unwrap();
        prop_assert_eq!(decoded, node);
    }

    #[test]
    fn text_round_trip(node in node()) {
        let text = node.to_json_string();
        let parsed = SchemaNode::from_json_str(&text).unwrap();
        prop_assert_eq!(parsed, node);
    }

    #[test]
    fn serde_round_trip(node in node()) {
        let text = serde_json::to_string(&node).unwrap();
        let back: SchemaNode = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(back, node);
    }

    #[test]
    fn type_keyword_only_for_typed_kinds(node in node()) {
        let encoded = encode(&node);
        prop_assert_eq!(encoded.get("type").is_some(), node.kind().emits_type());
    }

    #[test]
    fn encoding_is_stable(node in node()) {
        let once = encode(&node);
        let twice = encode(&Decoder::default().decode(&once).unwrap());
        prop_assert_eq!(once.to_string(), twice.to_string());
    }
}
