//! Kind-specific payload bodies.
//!
//! Every payload reads its keywords out of the same flat schema object the
//! common fields live in, and writes them back into that object on encode.
pub mod array;
pub mod combined;
pub mod enumeration;
pub mod numeric;
pub mod object;
pub mod string;

use serde_json::{Map, Value};

use crate::codec::ObjectView;
use crate::error::Result;
use crate::kind::SchemaKind;
use crate::node::SchemaNode;

pub use array::ArraySchema;
pub use combined::CombinedSchema;
pub use enumeration::EnumSchema;
pub use numeric::{FiniteF64, IntegerSchema, NumberSchema};
pub use object::{AdditionalProperties, ObjectSchema};
pub use string::StringSchema;

/// The one populated payload of a node. The variant *is* the node's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Array(ArraySchema),
    Boolean(BooleanSchema),
    Enum(EnumSchema),
    Integer(IntegerSchema),
    Null(NullSchema),
    Number(NumberSchema),
    Object(ObjectSchema),
    String(StringSchema),
    OneOf(CombinedSchema),
    AnyOf(CombinedSchema),
    AllOf(CombinedSchema),
}

impl Payload {
    pub fn kind(&self) -> SchemaKind {
        match self {
            Payload::Array(_) => SchemaKind::Array,
            Payload::Boolean(_) => SchemaKind::Boolean,
            Payload::Enum(_) => SchemaKind::Enum,
            Payload::Integer(_) => SchemaKind::Integer,
            Payload::Null(_) => SchemaKind::Null,
            Payload::Number(_) => SchemaKind::Number,
            Payload::Object(_) => SchemaKind::Object,
            Payload::String(_) => SchemaKind::String,
            Payload::OneOf(_) => SchemaKind::OneOf,
            Payload::AnyOf(_) => SchemaKind::AnyOf,
            Payload::AllOf(_) => SchemaKind::AllOf,
        }
    }

    pub fn as_combined(&self) -> Option<&CombinedSchema> {
        match self {
            Payload::OneOf(c) | Payload::AnyOf(c) | Payload::AllOf(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_combined_mut(&mut self) -> Option<&mut CombinedSchema> {
        match self {
            Payload::OneOf(c) | Payload::AnyOf(c) | Payload::AllOf(c) => Some(c),
            _ => None,
        }
    }

    /// Direct child schemas with a display label (`items`, `properties/name`, `oneOf/0`, ...).
    pub fn children(&self) -> Vec<(String, &SchemaNode)> {
        match self {
            Payload::Array(schema) => schema.children(),
            Payload::Object(schema) => schema.children(),
            Payload::OneOf(schema) | Payload::AnyOf(schema) | Payload::AllOf(schema) => {
                schema.children(self.kind())
            }
            Payload::Boolean(_)
            | Payload::Enum(_)
            | Payload::Integer(_)
            | Payload::Null(_)
            | Payload::Number(_)
            | Payload::String(_) => Vec::new(),
        }
    }
}

/// `{"type": "boolean"}`; nothing beyond the common fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanSchema;

impl BooleanSchema {
    pub(crate) fn read(_view: &ObjectView<'_>) -> Result<Self> {
        Ok(BooleanSchema)
    }

    pub(crate) fn write(&self, _out: &mut Map<String, Value>) {}
}

/// `{"type": "null"}`; nothing beyond the common fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSchema;

impl NullSchema {
    pub(crate) fn read(_view: &ObjectView<'_>) -> Result<Self> {
        Ok(NullSchema)
    }

    pub(crate) fn write(&self, _out: &mut Map<String, Value>) {}
}
