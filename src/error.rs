use serde_json::Value;
use thiserror::Error;

use crate::pointer::JsonPointer;

pub type Result<T, E = SchemaError> = std::result::Result<T, E>;

/// Everything that can go wrong turning bytes or JSON into a [`crate::SchemaNode`].
///
/// Encoding a node never fails, so there is no encode-side variant.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input bytes are not UTF-8. Checked before any JSON parsing.
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The input text is not JSON at all; passed through from `serde_json`.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("at \"{path}\": cannot resolve schema kind: {reason}")]
    UnresolvableKind {
        path: JsonPointer,
        reason: Unresolvable,
    },

    /// A keyword holds the wrong kind of JSON value (or a node is not an object).
    #[error("at \"{path}\": expected {expected}, found {found}")]
    Mismatch {
        path: JsonPointer,
        expected: &'static str,
        found: &'static str,
    },

    #[error("at \"{path}\": schema nesting exceeds the maximum depth of {max_depth}")]
    TooDeep { path: JsonPointer, max_depth: usize },

    /// A caller-defined document failed to deserialize; `path` is the
    /// document path reported by `serde_path_to_error`.
    #[error("at document path {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Why the discriminator of a schema object could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unresolvable {
    #[error("no `type` keyword and none of `enum`, `oneOf`, `anyOf`, `allOf`")]
    MissingType,
    #[error("`{0}` is not a schema type")]
    UnknownType(String),
    #[error("`{0}` is a keyword, not a value for `type`")]
    ReservedType(String),
}

/// A number bound that has no JSON spelling (NaN or an infinity).
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{0} is not a finite number")]
pub struct NonFinite(pub f64);

impl SchemaError {
    /// Location of the failure inside the schema, for decode-stage errors.
    pub fn pointer(&self) -> Option<&JsonPointer> {
        match self {
            SchemaError::UnresolvableKind { path, .. }
            | SchemaError::Mismatch { path, .. }
            | SchemaError::TooDeep { path, .. } => Some(path),
            SchemaError::Encoding(_) | SchemaError::Json(_) | SchemaError::Document { .. } => None,
        }
    }

    pub(crate) fn mismatch(path: JsonPointer, expected: &'static str, found: Option<&Value>) -> Self {
        SchemaError::Mismatch {
            path,
            expected,
            found: found.map_or("nothing", describe),
        }
    }
}

/// Short name of a JSON value's shape, for error messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(n) if n.as_i64().is_none() => "integer beyond i64 range",
        Value::Number(n) if n.as_i64().is_some_and(|i| i < 0) => "negative integer",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describe_distinguishes_integer_shapes() {
        assert_eq!(describe(&json!(3)), "integer");
        assert_eq!(describe(&json!(-3)), "negative integer");
        assert_eq!(describe(&json!(3.5)), "number");
        assert_eq!(describe(&json!(u64::MAX)), "integer beyond i64 range");
        assert_eq!(describe(&json!("3")), "string");
    }

    #[test]
    fn mismatch_message_names_pointer() {
        let err = SchemaError::mismatch(
            JsonPointer::root().child("minLength"),
            "non-negative integer",
            Some(&json!("oops")),
        );
        assert_eq!(
            err.to_string(),
            "at \"/minLength\": expected non-negative integer, found string"
        );
        assert_eq!(err.pointer().map(ToString::to_string).as_deref(), Some("/minLength"));
    }
}
