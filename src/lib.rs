//! Typed JSON Schema (draft 2020-12 subset) nodes and their flat JSON codec.
//!
//! A [`SchemaNode`] is exactly one of eleven kinds. It decodes from, and
//! encodes to, a single flat JSON object whose kind is inferred from the
//! `enum` / `oneOf` / `anyOf` / `allOf` keywords before falling back to `type`.
//!
//! ```
//! use json_schema_model::{SchemaKind, SchemaNode};
//!
//! let node: SchemaNode = r#"{"oneOf":[{"type":"string"},{"type":"integer"}]}"#.parse().unwrap();
//! assert_eq!(node.kind(), SchemaKind::OneOf);
//! assert!(node.to_value().get("type").is_none());
//! ```
pub mod codec;
pub mod error;
pub mod kind;
pub mod node;
pub mod path_de;
pub mod payload;
pub mod pointer;

pub use codec::{DEFAULT_MAX_DEPTH, DecodeOptions, Decoder, encode};
pub use error::{NonFinite, Result, SchemaError, Unresolvable};
pub use kind::SchemaKind;
pub use node::SchemaNode;
pub use payload::{
    AdditionalProperties, ArraySchema, BooleanSchema, CombinedSchema, EnumSchema, FiniteF64,
    IntegerSchema, NullSchema, NumberSchema, ObjectSchema, Payload, StringSchema,
};
pub use pointer::JsonPointer;
