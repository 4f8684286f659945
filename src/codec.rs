//! Flat JSON codec for [`SchemaNode`].
//!
//! A schema node is a single JSON object: common fields (`type`, `title`,
//! `description`) and the kind-specific keywords live side by side. Decoding
//! therefore works on one shared `ObjectView` of that object, which every
//! payload reader consumes; encoding writes every payload straight into the
//! same output map.
//!
//! Discriminator priority: `enum` > `oneOf` > `anyOf` > `allOf` > `type`.
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::{Result, SchemaError, Unresolvable};
use crate::kind::SchemaKind;
use crate::node::SchemaNode;
use crate::payload::{
    ArraySchema, BooleanSchema, CombinedSchema, EnumSchema, FiniteF64, IntegerSchema, NullSchema,
    NumberSchema, ObjectSchema, Payload, StringSchema,
};
use crate::pointer::JsonPointer;

/// Default for [`DecodeOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Bracket nesting allowed inside `enum` literals on top of the schema
/// structure itself; the same budget `serde_json` grants by default.
const LITERAL_NESTING: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest schema nesting accepted; the root node sits at depth 0.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DECODE
// ————————————————————————————————————————————————————————————————————————————

/// Stateless decoder; holds only its options, so one instance can be shared
/// freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode(&self, value: &Value) -> Result<SchemaNode> {
        self.decode_at(value, JsonPointer::root(), 0)
    }

    /// Parses `text` and decodes it.
    ///
    /// Each schema level can cost two levels of JSON nesting (`properties`
    /// then the child), so `serde_json`'s fixed recursion limit is replaced by
    /// a budget derived from `max_depth`. Text nested past that budget fails
    /// with [`SchemaError::TooDeep`] at the root before it is parsed.
    pub fn decode_str(&self, text: &str) -> Result<SchemaNode> {
        let budget = self.nesting_budget();
        if exceeds_nesting(text, budget) {
            tracing::debug!(budget, "input nesting exceeds the parse budget");
            return Err(SchemaError::TooDeep {
                path: JsonPointer::root(),
                max_depth: self.options.max_depth,
            });
        }
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de)?;
        de.end()?;
        self.decode(&value)
    }

    /// UTF-8 is checked strictly before JSON parsing and structural decode.
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<SchemaNode> {
        let text = std::str::from_utf8(bytes)?;
        self.decode_str(text)
    }

    fn nesting_budget(&self) -> usize {
        self.options
            .max_depth
            .saturating_add(1)
            .saturating_mul(2)
            .saturating_add(LITERAL_NESTING)
    }

    pub(crate) fn decode_at(&self, value: &Value, path: JsonPointer, depth: usize) -> Result<SchemaNode> {
        if depth > self.options.max_depth {
            return Err(SchemaError::TooDeep { path, max_depth: self.options.max_depth });
        }
        let Some(map) = value.as_object() else {
            return Err(SchemaError::mismatch(path, "schema object", Some(value)));
        };
        let view = ObjectView { decoder: self, map, path, depth };

        let kind = resolve_kind(&view)?;
        let title = view.string("title")?;
        let description = view.string("description")?;
        let payload = match kind {
            SchemaKind::Array => Payload::Array(ArraySchema::read(&view)?),
            SchemaKind::Boolean => Payload::Boolean(BooleanSchema::read(&view)?),
            SchemaKind::Enum => Payload::Enum(EnumSchema::read(&view)?),
            SchemaKind::Integer => Payload::Integer(IntegerSchema::read(&view)?),
            SchemaKind::Null => Payload::Null(NullSchema::read(&view)?),
            SchemaKind::Number => Payload::Number(NumberSchema::read(&view)?),
            SchemaKind::Object => Payload::Object(ObjectSchema::read(&view)?),
            SchemaKind::String => Payload::String(StringSchema::read(&view)?),
            SchemaKind::OneOf => Payload::OneOf(CombinedSchema::read(&view, kind)?),
            SchemaKind::AnyOf => Payload::AnyOf(CombinedSchema::read(&view, kind)?),
            SchemaKind::AllOf => Payload::AllOf(CombinedSchema::read(&view, kind)?),
        };
        tracing::trace!(path = %view.path, %kind, "decoded schema node");
        Ok(SchemaNode::new(title, description, payload))
    }
}

/// Whether `{`/`[` nesting in `text` goes past `budget`. Brackets inside
/// string literals are skipped; malformed text is left for the parser.
fn exceeds_nesting(text: &str, budget: usize) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                if depth > budget {
                    return true;
                }
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    false
}

fn resolve_kind(view: &ObjectView<'_>) -> Result<SchemaKind> {
    if view.contains(SchemaKind::Enum.keyword()) {
        return Ok(SchemaKind::Enum);
    }

    let mut present = SchemaKind::COMBINATORS
        .into_iter()
        .filter(|kind| view.contains(kind.keyword()));
    if let Some(kind) = present.next() {
        let ignored: Vec<&str> = present.map(SchemaKind::keyword).collect();
        if !ignored.is_empty() {
            tracing::debug!(
                path = %view.path,
                chosen = %kind,
                ?ignored,
                "several combinator keywords present; using the first in priority order"
            );
        }
        return Ok(kind);
    }

    match view.get("type") {
        None => Err(view.unresolvable(Unresolvable::MissingType)),
        Some(Value::String(name)) => SchemaKind::from_type_keyword(name).ok_or_else(|| {
            if SchemaKind::ALL.iter().any(|kind| kind.keyword() == name.as_str()) {
                view.unresolvable(Unresolvable::ReservedType(name.clone()))
            } else {
                view.unresolvable(Unresolvable::UnknownType(name.clone()))
            }
        }),
        Some(other) => Err(view.mismatch("type", "schema type name", Some(other))),
    }
}

/// Read-by-key access to one flat schema object.
///
/// A JSON `null` under any keyword reads as "absent".
pub(crate) struct ObjectView<'a> {
    decoder: &'a Decoder,
    map: &'a Map<String, Value>,
    path: JsonPointer,
    depth: usize,
}

impl<'a> ObjectView<'a> {
    pub(crate) fn path(&self) -> &JsonPointer {
        &self.path
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    pub(crate) fn mismatch(&self, key: &str, expected: &'static str, found: Option<&Value>) -> SchemaError {
        SchemaError::mismatch(self.path.child(key), expected, found)
    }

    fn unresolvable(&self, reason: Unresolvable) -> SchemaError {
        SchemaError::UnresolvableKind { path: self.path.clone(), reason }
    }

    /// Turns an absent keyword into a mismatch for keywords that must be present.
    pub(crate) fn required<T>(&self, key: &str, expected: &'static str, value: Option<T>) -> Result<T> {
        value.ok_or_else(|| self.mismatch(key, expected, self.map.get(key)))
    }

    pub(crate) fn string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.mismatch(key, "string", Some(other))),
        }
    }

    pub(crate) fn boolean(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mismatch(key, "boolean", Some(other))),
        }
    }

    pub(crate) fn non_negative(&self, key: &str) -> Result<Option<u64>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "non-negative integer", Some(value))),
        }
    }

    pub(crate) fn integer(&self, key: &str) -> Result<Option<i64>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                let expected = if value.is_u64() { "integer within i64 range" } else { "integer" };
                self.mismatch(key, expected, Some(value))
            }),
        }
    }

    /// Any JSON number; integers are widened to `f64`.
    pub(crate) fn number(&self, key: &str) -> Result<Option<FiniteF64>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(FiniteF64::new)
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "finite number", self.map.get(key))),
            Some(other) => Err(self.mismatch(key, "number", Some(other))),
        }
    }

    pub(crate) fn array(&self, key: &str) -> Result<Option<&'a Vec<Value>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(self.mismatch(key, "array", Some(other))),
        }
    }

    pub(crate) fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let Some(items) = self.array(key)? else {
            return Ok(None);
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(SchemaError::mismatch(
                    self.path.child(key).child(i),
                    "string",
                    Some(other),
                )),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Decodes a nested schema found at `path`, one level deeper than this one.
    pub(crate) fn child(&self, value: &Value, path: JsonPointer) -> Result<SchemaNode> {
        self.decoder.decode_at(value, path, self.depth + 1)
    }

    pub(crate) fn node(&self, key: &str) -> Result<Option<SchemaNode>> {
        self.get(key)
            .map(|value| self.child(value, self.path.child(key)))
            .transpose()
    }

    pub(crate) fn node_list(&self, key: &str) -> Result<Option<Vec<SchemaNode>>> {
        let Some(items) = self.array(key)? else {
            return Ok(None);
        };
        let base = self.path.child(key);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.child(item, base.child(i)))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Decodes an object of named schemas, keeping the document's key order.
    pub(crate) fn node_map(&self, key: &str) -> Result<Option<IndexMap<String, SchemaNode>>> {
        let entries = match self.get(key) {
            None => return Ok(None),
            Some(Value::Object(entries)) => entries,
            Some(other) => return Err(self.mismatch(key, "object of schemas", Some(other))),
        };
        let base = self.path.child(key);
        let mut out = IndexMap::with_capacity(entries.len());
        for (name, value) in entries {
            let node = self.child(value, base.child(name))?;
            out.insert(name.clone(), node);
        }
        Ok(Some(out))
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENCODE
// ————————————————————————————————————————————————————————————————————————————

/// Encodes a node as one flat JSON object. Infallible: every node is valid
/// by construction.
pub fn encode(node: &SchemaNode) -> Value {
    Value::Object(encode_map(node))
}

pub(crate) fn encode_map(node: &SchemaNode) -> Map<String, Value> {
    let mut out = Map::new();
    let kind = node.kind();
    if kind.emits_type() {
        out.insert("type".to_owned(), Value::from(kind.keyword()));
    }
    put(&mut out, "title", node.title());
    put(&mut out, "description", node.description());

    match node.payload() {
        Payload::Array(schema) => schema.write(&mut out),
        Payload::Boolean(schema) => schema.write(&mut out),
        Payload::Enum(schema) => schema.write(&mut out),
        Payload::Integer(schema) => schema.write(&mut out),
        Payload::Null(schema) => schema.write(&mut out),
        Payload::Number(schema) => schema.write(&mut out),
        Payload::Object(schema) => schema.write(&mut out),
        Payload::String(schema) => schema.write(&mut out),
        Payload::OneOf(schema) | Payload::AnyOf(schema) | Payload::AllOf(schema) => {
            schema.write(kind, &mut out)
        }
    }
    out
}

/// Inserts `key` only when `value` is present.
pub(crate) fn put<T: Into<Value>>(out: &mut Map<String, Value>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        out.insert(key.to_owned(), value.into());
    }
}

pub(crate) fn put_number(out: &mut Map<String, Value>, key: &str, value: Option<FiniteF64>) {
    if let Some(number) = value.and_then(|f| Number::from_f64(f.get())) {
        out.insert(key.to_owned(), Value::Number(number));
    }
}

pub(crate) fn encode_list(nodes: &[SchemaNode]) -> Value {
    Value::Array(nodes.iter().map(encode).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> Result<SchemaNode> {
        Decoder::default().decode(&value)
    }

    #[test]
    fn enum_wins_over_explicit_type() {
        let node = decode(json!({"type": "object", "enum": ["a", "b"]})).unwrap();
        assert_eq!(node.kind(), SchemaKind::Enum);
    }

    #[test]
    fn enum_wins_over_combinators() {
        let node = decode(json!({"enum": [1], "oneOf": [{"type": "null"}]})).unwrap();
        assert_eq!(node.kind(), SchemaKind::Enum);
    }

    #[test]
    fn first_combinator_in_priority_order_wins() {
        let node = decode(json!({
            "allOf": [{"type": "string"}],
            "anyOf": [{"type": "integer"}]
        }))
        .unwrap();
        assert_eq!(node.kind(), SchemaKind::AnyOf);

        let encoded = encode(&node);
        assert!(encoded.get("allOf").is_none());
        assert_eq!(encoded["anyOf"], json!([{"type": "integer"}]));
    }

    #[test]
    fn combinator_beats_type() {
        let node = decode(json!({"type": "string", "allOf": [{"type": "string"}]})).unwrap();
        assert_eq!(node.kind(), SchemaKind::AllOf);
        assert!(encode(&node).get("type").is_none());
    }

    #[test]
    fn missing_type_is_unresolvable() {
        let err = decode(json!({"minLength": "oops"})).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvableKind { reason: Unresolvable::MissingType, .. }
        ));
    }

    #[test]
    fn null_type_counts_as_missing() {
        let err = decode(json!({"type": null})).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvableKind { reason: Unresolvable::MissingType, .. }
        ));
    }

    #[test]
    fn unknown_and_reserved_type_names_are_rejected() {
        let err = decode(json!({"type": "bogus"})).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvableKind { reason: Unresolvable::UnknownType(ref name), .. } if name == "bogus"
        ));

        for reserved in ["enum", "oneOf", "anyOf", "allOf"] {
            let err = decode(json!({"type": reserved})).unwrap_err();
            assert!(
                matches!(err, SchemaError::UnresolvableKind { reason: Unresolvable::ReservedType(_), .. }),
                "{reserved}: {err}"
            );
        }
    }

    #[test]
    fn type_union_arrays_are_a_mismatch() {
        let err = decode(json!({"type": ["string", "null"]})).unwrap_err();
        assert!(matches!(err, SchemaError::Mismatch { found: "array", .. }));
        assert_eq!(err.pointer().unwrap().to_string(), "/type");
    }

    #[test]
    fn non_object_schema_is_a_mismatch() {
        let err = decode(json!(true)).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::Mismatch { expected: "schema object", found: "boolean", .. }
        ));
    }

    #[test]
    fn common_fields_type_checked_for_every_kind() {
        let err = decode(json!({"type": "null", "title": 7})).unwrap_err();
        assert_eq!(err.pointer().unwrap().to_string(), "/title");
    }

    #[test]
    fn depth_guard_stops_recursion() {
        let mut value = json!({"type": "string"});
        for _ in 0..5 {
            value = json!({"type": "array", "items": value});
        }
        let shallow = Decoder::new(DecodeOptions { max_depth: 3 });
        let err = shallow.decode(&value).unwrap_err();
        match err {
            SchemaError::TooDeep { path, max_depth } => {
                assert_eq!(max_depth, 3);
                assert_eq!(path.to_string(), "/items/items/items/items");
            }
            other => panic!("unexpected error: {other}"),
        }

        let deep_enough = Decoder::new(DecodeOptions { max_depth: 5 });
        assert!(deep_enough.decode(&value).is_ok());
    }

    #[test]
    fn encode_puts_type_first() {
        let node = decode(json!({"description": "d", "title": "t", "type": "boolean"})).unwrap();
        let encoded = encode(&node);
        let keys: Vec<&str> = encoded.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["type", "title", "description"]);
    }

    #[test]
    fn number_bounds_are_written_as_given() {
        let mut out = Map::new();
        put_number(&mut out, "minimum", None);
        put_number(&mut out, "maximum", FiniteF64::new(2.5));
        assert!(!out.contains_key("minimum"));
        assert_eq!(out["maximum"], json!(2.5));
    }

    /// `depth` levels of `{"type":"object","properties":{"p": ...}}` around a string leaf.
    fn nested_properties(depth: usize) -> String {
        let mut text = r#"{"type":"string"}"#.to_owned();
        for _ in 0..depth {
            text = format!(r#"{{"type":"object","properties":{{"p":{text}}}}}"#);
        }
        text
    }

    #[test]
    fn text_decoding_honours_max_depth_exactly() {
        let decoder = Decoder::default();
        let node = decoder.decode_str(&nested_properties(DEFAULT_MAX_DEPTH)).unwrap();
        assert_eq!(node.kind(), SchemaKind::Object);

        let err = decoder
            .decode_str(&nested_properties(DEFAULT_MAX_DEPTH + 1))
            .unwrap_err();
        match err {
            SchemaError::TooDeep { path, max_depth } => {
                assert_eq!(max_depth, DEFAULT_MAX_DEPTH);
                assert_eq!(path.segments().len(), 2 * (DEFAULT_MAX_DEPTH + 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn text_decoding_follows_a_raised_max_depth() {
        let decoder = Decoder::new(DecodeOptions { max_depth: 100 });
        assert!(decoder.decode_str(&nested_properties(100)).is_ok());
        assert!(matches!(
            decoder.decode_str(&nested_properties(101)),
            Err(SchemaError::TooDeep { max_depth: 100, .. })
        ));
    }

    #[test]
    fn runaway_nesting_is_refused_before_parsing() {
        let literal = format!("{}{}", "[".repeat(100_000), "]".repeat(100_000));
        let text = format!(r#"{{"enum":[{literal}]}}"#);
        let err = Decoder::default().decode_str(&text).unwrap_err();
        assert!(matches!(err, SchemaError::TooDeep { ref path, .. } if path.is_root()));
    }

    #[test]
    fn brackets_inside_strings_do_not_count() {
        assert!(!exceeds_nesting(r#"{"pattern":"[[[[\"{{{{"}"#, 1));
        assert!(exceeds_nesting(r#"{"a":[1]}"#, 1));
        let deep_literal = format!(r#"{{"type":"string","pattern":"{}"}}"#, "[".repeat(10_000));
        assert!(Decoder::default().decode_str(&deep_literal).is_ok());
    }
}
