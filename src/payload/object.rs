use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::codec::{ObjectView, encode, put};
use crate::error::Result;
use crate::node::SchemaNode;

/// Keywords for `{"type": "object"}`.
///
/// `properties` keeps document order, both when decoded and when encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchema {
    pub properties: Option<IndexMap<String, SchemaNode>>,
    /// Names listed under `required`, in document order.
    pub required: Option<Vec<String>>,
    pub additional_properties: Option<AdditionalProperties>,
    pub min_properties: Option<u64>,
    pub max_properties: Option<u64>,
}

/// `additionalProperties` is either a plain allow/deny flag or a schema for
/// every property not named in `properties`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaNode>),
}

impl ObjectSchema {
    pub(crate) fn read(view: &ObjectView<'_>) -> Result<Self> {
        Ok(Self {
            properties: view.node_map("properties")?,
            required: view.string_list("required")?,
            additional_properties: read_additional(view)?,
            min_properties: view.non_negative("minProperties")?,
            max_properties: view.non_negative("maxProperties")?,
        })
    }

    pub(crate) fn write(&self, out: &mut Map<String, Value>) {
        if let Some(properties) = &self.properties {
            let encoded = properties
                .iter()
                .map(|(name, node)| (name.clone(), encode(node)))
                .collect::<Map<String, Value>>();
            out.insert("properties".to_owned(), Value::Object(encoded));
        }
        put(out, "required", self.required.clone());
        let additional = self.additional_properties.as_ref().map(|additional| match additional {
            AdditionalProperties::Allowed(flag) => Value::Bool(*flag),
            AdditionalProperties::Schema(node) => encode(node),
        });
        put(out, "additionalProperties", additional);
        put(out, "minProperties", self.min_properties);
        put(out, "maxProperties", self.max_properties);
    }

    pub(crate) fn children(&self) -> Vec<(String, &SchemaNode)> {
        let mut out: Vec<(String, &SchemaNode)> = self
            .properties
            .iter()
            .flatten()
            .map(|(name, node)| (format!("properties/{name}"), node))
            .collect();
        if let Some(AdditionalProperties::Schema(node)) = &self.additional_properties {
            out.push(("additionalProperties".to_owned(), node.as_ref()));
        }
        out
    }
}

fn read_additional(view: &ObjectView<'_>) -> Result<Option<AdditionalProperties>> {
    const KEY: &str = "additionalProperties";
    match view.get(KEY) {
        None => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(AdditionalProperties::Allowed(*flag))),
        Some(value @ Value::Object(_)) => {
            let node = view.child(value, view.path().child(KEY))?;
            Ok(Some(AdditionalProperties::Schema(Box::new(node))))
        }
        Some(other) => Err(view.mismatch(KEY, "boolean or schema object", Some(other))),
    }
}
