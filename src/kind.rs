use std::fmt;

/// Discriminator of a [`crate::SchemaNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    Array,
    Boolean,
    Enum,
    Integer,
    Null,
    Number,
    Object,
    String,
    OneOf,
    AnyOf,
    AllOf,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 11] = [
        SchemaKind::Array,
        SchemaKind::Boolean,
        SchemaKind::Enum,
        SchemaKind::Integer,
        SchemaKind::Null,
        SchemaKind::Number,
        SchemaKind::Object,
        SchemaKind::String,
        SchemaKind::OneOf,
        SchemaKind::AnyOf,
        SchemaKind::AllOf,
    ];

    /// Combinators in discriminator priority order.
    pub const COMBINATORS: [SchemaKind; 3] = [SchemaKind::OneOf, SchemaKind::AnyOf, SchemaKind::AllOf];

    /// The JSON spelling: a `type` value for the seven primitive/container
    /// kinds, the marker keyword for `enum` and the combinators.
    pub fn keyword(self) -> &'static str {
        match self {
            SchemaKind::Array => "array",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Enum => "enum",
            SchemaKind::Integer => "integer",
            SchemaKind::Null => "null",
            SchemaKind::Number => "number",
            SchemaKind::Object => "object",
            SchemaKind::String => "string",
            SchemaKind::OneOf => "oneOf",
            SchemaKind::AnyOf => "anyOf",
            SchemaKind::AllOf => "allOf",
        }
    }

    /// Whether this kind is written with an explicit `type` keyword.
    pub fn emits_type(self) -> bool {
        !matches!(
            self,
            SchemaKind::Enum | SchemaKind::OneOf | SchemaKind::AnyOf | SchemaKind::AllOf
        )
    }

    pub fn is_combinator(self) -> bool {
        matches!(self, SchemaKind::OneOf | SchemaKind::AnyOf | SchemaKind::AllOf)
    }

    /// Parses a `type` value. Only the seven kinds that carry `type` are accepted.
    pub fn from_type_keyword(name: &str) -> Option<SchemaKind> {
        SchemaKind::ALL
            .into_iter()
            .find(|kind| kind.emits_type() && kind.keyword() == name)
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
