//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Figx.
//! The Figx project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Figx Scene Node Module
//!
//! This module provides the data structure for one element of a design-tool
//! scene graph. The same type represents both raw exported nodes and their
//! compressed form: compression only removes attributes, it never changes
//! the shape of a node.
//!
//! ## Design Principles
//!
//! - **Flexibility**: Attributes are kept as JSON (serde_json::Value) so that
//!   unknown exporter fields pass through untouched
//! - **Tree ownership**: Children are owned by their parent; `None` means the
//!   exporter did not emit a `children` key at all, `Some(vec![])` means an
//!   explicitly empty child list
//! - **Typed reads**: Layout code reads attributes through defaulting
//!   accessors rather than matching on JSON by hand
//!
//! ## Usage Example
//!
//! ```rust
//! use figx::node::{FxSceneNode, FxNodeKind};
//! use serde_json::json;
//!
//! let node = FxSceneNode::from_value(json!({
//!     "id": "1:2",
//!     "type": "FRAME",
//!     "name": "Card",
//!     "children": []
//! })).unwrap();
//!
//! assert_eq!(node.kind(), FxNodeKind::Frame);
//! assert_eq!(node.str_or("layoutMode", "NONE"), "NONE");
//! ```

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{FxError, Result};

/// Attribute map of a single scene node, excluding its children.
pub type FxAttributes = Map<String, Value>;

/// Node types the layout engine knows how to map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FxNodeKind {
    Frame,
    Rectangle,
    Text,
    /// Any other exporter type, carrying the raw tag (empty when missing).
    Unknown(String),
}

impl FxNodeKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "FRAME" => FxNodeKind::Frame,
            "RECTANGLE" => FxNodeKind::Rectangle,
            "TEXT" => FxNodeKind::Text,
            other => FxNodeKind::Unknown(other.to_string()),
        }
    }
}

/// One node of an exported scene graph.
///
/// Serializes as a single JSON object whose `children` key (when present)
/// follows the node's own attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FxSceneNode {
    /// Every attribute of the node except `children`.
    pub attributes: FxAttributes,

    /// Ordered child nodes, when the exporter emitted a child list.
    pub children: Option<Vec<FxSceneNode>>,
}

impl FxSceneNode {
    /// Constructs a node from an attribute map and an optional child list.
    pub fn new(attributes: FxAttributes, children: Option<Vec<FxSceneNode>>) -> Self {
        FxSceneNode {
            attributes,
            children,
        }
    }

    /// Decodes a node tree from a JSON value.
    ///
    /// The value must be an object. A `children` array is decoded
    /// recursively; entries that are not objects are skipped with a warning.
    /// A `children` value that is not an array is kept as a plain attribute.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut attributes) = value else {
            return Err(FxError::validation("scene node must be a JSON object"));
        };

        let children = match attributes.remove("children") {
            Some(Value::Array(items)) => {
                let mut nodes = Vec::with_capacity(items.len());
                for item in items {
                    if item.is_object() {
                        nodes.push(FxSceneNode::from_value(item)?);
                    } else {
                        log::warn!("skipping non-object child entry: {}", item);
                    }
                }
                Some(nodes)
            }
            Some(other) => {
                attributes.insert("children".to_string(), other);
                None
            }
            None => None,
        };

        Ok(FxSceneNode {
            attributes,
            children,
        })
    }

    /// Encodes the node tree back into a JSON value.
    pub fn to_value(&self) -> Value {
        let mut map = self.attributes.clone();
        if let Some(children) = &self.children {
            map.insert(
                "children".to_string(),
                Value::Array(children.iter().map(FxSceneNode::to_value).collect()),
            );
        }
        Value::Object(map)
    }

    /// Raw exporter type tag, or an empty string when missing.
    pub fn node_type(&self) -> &str {
        self.str_or("type", "")
    }

    /// Classified node type.
    pub fn kind(&self) -> FxNodeKind {
        FxNodeKind::from_tag(self.node_type())
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Reads a string attribute, falling back to `default` when it is
    /// missing or not a string.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Reads a numeric attribute.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }

    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }

    /// Whether the node is rendered; only an explicit `visible: false` hides it.
    pub fn is_visible(&self) -> bool {
        self.attributes
            .get("visible")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Object entries of a paint list such as `fills` or `strokes`.
    pub fn paints(&self, key: &str) -> Vec<&Map<String, Value>> {
        self.attributes
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Children, or an empty slice when the node has no child list.
    pub fn child_nodes(&self) -> &[FxSceneNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Number of nodes in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .child_nodes()
            .iter()
            .map(FxSceneNode::subtree_len)
            .sum::<usize>()
    }

    /// Number of attribute keys in this subtree, counting `children` as one
    /// key wherever a child list is present.
    pub fn attribute_count(&self) -> usize {
        let own = self.attributes.len() + usize::from(self.children.is_some());
        own + self
            .child_nodes()
            .iter()
            .map(FxSceneNode::attribute_count)
            .sum::<usize>()
    }
}

impl Serialize for FxSceneNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = usize::from(self.children.is_some());
        let mut map = serializer.serialize_map(Some(self.attributes.len() + extra))?;
        for (key, value) in &self.attributes {
            map.serialize_entry(key, value)?;
        }
        if let Some(children) = &self.children {
            map.serialize_entry("children", children)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FxSceneNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FxSceneNode::from_value(value).map_err(D::Error::custom)
    }
}
