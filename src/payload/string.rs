use serde_json::{Map, Value};

use crate::codec::{ObjectView, put};
use crate::error::Result;

/// Validation keywords for `{"type": "string"}` (draft 2020-12, §6.3).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSchema {
    /// `minLength`
    pub min_length: Option<u64>,
    /// `maxLength`
    pub max_length: Option<u64>,
    /// `pattern`; kept as text, never compiled here.
    pub pattern: Option<String>,
    /// `format`
    pub format: Option<String>,
}

impl StringSchema {
    pub(crate) fn read(view: &ObjectView<'_>) -> Result<Self> {
        Ok(Self {
            min_length: view.non_negative("minLength")?,
            max_length: view.non_negative("maxLength")?,
            pattern: view.string("pattern")?,
            format: view.string("format")?,
        })
    }

    pub(crate) fn write(&self, out: &mut Map<String, Value>) {
        put(out, "minLength", self.min_length);
        put(out, "maxLength", self.max_length);
        put(out, "pattern", self.pattern.as_deref());
        put(out, "format", self.format.as_deref());
    }
}
