use serde_json::{Map, Value};

use crate::codec::{ObjectView, encode_list, put};
use crate::error::Result;
use crate::kind::SchemaKind;
use crate::node::SchemaNode;

/// Payload of a `oneOf` / `anyOf` / `allOf` node.
///
/// Which of the three keywords applies is carried by the [`crate::Payload`]
/// variant, so only one list can ever exist. `title` duplicates the node's
/// own title; [`SchemaNode::new`] keeps the two equal.
///
/// An empty `schemas` list is accepted on decode and written back as `[]`,
/// although draft 2020-12 asks for at least one entry. Builders and decoded
/// nodes therefore agree, and an empty list round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedSchema {
    pub title: Option<String>,
    pub schemas: Vec<SchemaNode>,
}

impl CombinedSchema {
    pub fn new(schemas: Vec<SchemaNode>) -> Self {
        Self { title: None, schemas }
    }

    /// Reads `title` and the list under `kind`'s keyword from the same flat
    /// object the node's common fields came from.
    pub(crate) fn read(view: &ObjectView<'_>, kind: SchemaKind) -> Result<Self> {
        let keyword = kind.keyword();
        let schemas = view.required(keyword, "array of schemas", view.node_list(keyword)?)?;
        Ok(Self {
            title: view.string("title")?,
            schemas,
        })
    }

    pub(crate) fn write(&self, kind: SchemaKind, out: &mut Map<String, Value>) {
        put(out, "title", self.title.as_deref());
        out.insert(kind.keyword().to_owned(), encode_list(&self.schemas));
    }

    pub(crate) fn children(&self, kind: SchemaKind) -> Vec<(String, &SchemaNode)> {
        self.schemas
            .iter()
            .enumerate()
            .map(|(i, node)| (format!("{}/{i}", kind.keyword()), node))
            .collect()
    }
}
