use serde_json::{Map, Value};

use crate::codec::{ObjectView, encode, encode_list, put};
use crate::error::Result;
use crate::node::SchemaNode;

/// Keywords for `{"type": "array"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArraySchema {
    /// `items`: schema for every element (after `prefixItems`, if any).
    pub items: Option<Box<SchemaNode>>,
    /// `prefixItems`: positional schemas for a tuple-like prefix.
    pub prefix_items: Option<Vec<SchemaNode>>,
    /// `contains`
    pub contains: Option<Box<SchemaNode>>,
    pub min_items: Option<u64>,
    pub max_items: Option<u64>,
    pub unique_items: Option<bool>,
}

impl ArraySchema {
    pub(crate) fn read(view: &ObjectView<'_>) -> Result<Self> {
        Ok(Self {
            items: view.node("items")?.map(Box::new),
            prefix_items: view.node_list("prefixItems")?,
            contains: view.node("contains")?.map(Box::new),
            min_items: view.non_negative("minItems")?,
            max_items: view.non_negative("maxItems")?,
            unique_items: view.boolean("uniqueItems")?,
        })
    }

    pub(crate) fn write(&self, out: &mut Map<String, Value>) {
        put(out, "items", self.items.as_deref().map(encode));
        put(out, "prefixItems", self.prefix_items.as_deref().map(encode_list));
        put(out, "contains", self.contains.as_deref().map(encode));
        put(out, "minItems", self.min_items);
        put(out, "maxItems", self.max_items);
        put(out, "uniqueItems", self.unique_items);
    }

    pub(crate) fn children(&self) -> Vec<(String, &SchemaNode)> {
        let mut out = Vec::new();
        if let Some(prefix) = &self.prefix_items {
            out.extend(prefix.iter().enumerate().map(|(i, node)| (format!("prefixItems/{i}"), node)));
        }
        if let Some(items) = &self.items {
            out.push(("items".to_owned(), items.as_ref()));
        }
        if let Some(contains) = &self.contains {
            out.push(("contains".to_owned(), contains.as_ref()));
        }
        out
    }
}
