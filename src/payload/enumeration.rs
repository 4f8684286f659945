use serde_json::{Map, Value};

use crate::codec::ObjectView;
use crate::error::Result;

/// `{"enum": [...]}`: an ordered list of permitted literal values.
///
/// The `enum` keyword alone decides the kind; a `type` next to it is ignored
/// on decode and never written on encode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumSchema {
    pub values: Vec<Value>,
}

impl EnumSchema {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub(crate) fn read(view: &ObjectView<'_>) -> Result<Self> {
        let values = view.required("enum", "array of values", view.array("enum")?)?;
        Ok(Self { values: values.clone() })
    }

    pub(crate) fn write(&self, out: &mut Map<String, Value>) {
        out.insert("enum".to_owned(), Value::Array(self.values.clone()));
    }
}
