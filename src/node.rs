//! The polymorphic schema node and its builders.
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::codec::{Decoder, encode};
use crate::error::{Result, SchemaError};
use crate::kind::SchemaKind;
use crate::payload::{
    AdditionalProperties, ArraySchema, BooleanSchema, CombinedSchema, EnumSchema, FiniteF64,
    IntegerSchema, NullSchema, NumberSchema, ObjectSchema, Payload, StringSchema,
};

/// One JSON Schema construct: common fields plus exactly one payload.
///
/// Immutable once built. The kind is derived from the payload variant, so it
/// can never disagree with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    title: Option<String>,
    description: Option<String>,
    payload: Payload,
}

impl SchemaNode {
    /// General constructor. For combinator payloads the payload's own
    /// `title` is overwritten with `title`, keeping both copies equal.
    pub fn new(title: Option<String>, description: Option<String>, mut payload: Payload) -> Self {
        if let Some(combined) = payload.as_combined_mut() {
            combined.title = title.clone();
        }
        Self { title, description, payload }
    }

    pub fn kind(&self) -> SchemaKind {
        self.payload.kind()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_parts(self) -> (Option<String>, Option<String>, Payload) {
        (self.title, self.description, self.payload)
    }

    /// A new node equal to this one except for its title.
    pub fn with_title(self, title: Option<String>) -> Self {
        Self::new(title, self.description, self.payload)
    }

    /// Direct children with display labels, see [`Payload::children`].
    pub fn children(&self) -> Vec<(String, &SchemaNode)> {
        self.payload.children()
    }

    // ---------------------------------------------------------------- builders

    pub fn array(
        description: Option<String>,
        items: Option<SchemaNode>,
        min_items: Option<u64>,
        max_items: Option<u64>,
        unique_items: Option<bool>,
    ) -> Self {
        let schema = ArraySchema {
            items: items.map(Box::new),
            min_items,
            max_items,
            unique_items,
            ..ArraySchema::default()
        };
        Self::new(None, description, Payload::Array(schema))
    }

    pub fn boolean(description: Option<String>) -> Self {
        Self::new(None, description, Payload::Boolean(BooleanSchema))
    }

    /// `enum` schema; named `enumeration` because `enum` is reserved in Rust.
    pub fn enumeration(description: Option<String>, values: Vec<Value>) -> Self {
        Self::new(None, description, Payload::Enum(EnumSchema::new(values)))
    }

    pub fn integer(description: Option<String>, minimum: Option<i64>, maximum: Option<i64>) -> Self {
        let schema = IntegerSchema { minimum, maximum, ..IntegerSchema::default() };
        Self::new(None, description, Payload::Integer(schema))
    }

    pub fn null(description: Option<String>) -> Self {
        Self::new(None, description, Payload::Null(NullSchema))
    }

    /// Bounds are [`FiniteF64`]; build them with `FiniteF64::new` or `try_from`.
    pub fn number(description: Option<String>, minimum: Option<FiniteF64>, maximum: Option<FiniteF64>) -> Self {
        let schema = NumberSchema { minimum, maximum, ..NumberSchema::default() };
        Self::new(None, description, Payload::Number(schema))
    }

    pub fn object(
        description: Option<String>,
        properties: Option<IndexMap<String, SchemaNode>>,
        required: Option<Vec<String>>,
        additional_properties: Option<AdditionalProperties>,
    ) -> Self {
        let schema = ObjectSchema {
            properties,
            required,
            additional_properties,
            ..ObjectSchema::default()
        };
        Self::new(None, description, Payload::Object(schema))
    }

    pub fn string(
        description: Option<String>,
        min_length: Option<u64>,
        max_length: Option<u64>,
        pattern: Option<String>,
        format: Option<String>,
    ) -> Self {
        let schema = StringSchema { min_length, max_length, pattern, format };
        Self::new(None, description, Payload::String(schema))
    }

    /// Valid when exactly one of `schemas` validates.
    pub fn one_of(title: Option<String>, description: Option<String>, schemas: Vec<SchemaNode>) -> Self {
        Self::new(title, description, Payload::OneOf(CombinedSchema::new(schemas)))
    }

    /// Valid when at least one of `schemas` validates.
    pub fn any_of(title: Option<String>, description: Option<String>, schemas: Vec<SchemaNode>) -> Self {
        Self::new(title, description, Payload::AnyOf(CombinedSchema::new(schemas)))
    }

    /// Valid when every one of `schemas` validates.
    pub fn all_of(title: Option<String>, description: Option<String>, schemas: Vec<SchemaNode>) -> Self {
        Self::new(title, description, Payload::AllOf(CombinedSchema::new(schemas)))
    }

    // ------------------------------------------------------------- conversions

    pub fn from_value(value: &Value) -> Result<Self> {
        Decoder::default().decode(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Decoder::default().decode_str(text)
    }

    /// Fails with [`SchemaError::Encoding`] before any parsing if `bytes`
    /// are not UTF-8.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Decoder::default().decode_slice(bytes)
    }

    pub fn to_value(&self) -> Value {
        encode(self)
    }

    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    pub fn to_json_string_pretty(&self) -> String {
        format!("{:#}", self.to_value())
    }
}

impl FromStr for SchemaNode {
    type Err = SchemaError;

    fn from_str(text: &str) -> Result<Self> {
        Self::from_json_str(text)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Decoder::default()
            .decode(&value)
            .map_err(serde::de::Error::custom)
    }
}
