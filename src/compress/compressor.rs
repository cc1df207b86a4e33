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


use serde_json::{Map, Value};

use crate::compress::paint::{compress_paint, is_empty_collection};
use crate::defaults::FxDefaultTable;
use crate::node::FxSceneNode;

/// Attributes derivable from the rest of the tree.
pub const COMPUTED_ATTRIBUTES: [&str; 6] = [
    "absoluteTransform",
    "absoluteBoundingBox",
    "absoluteRenderBounds",
    "parent",
    "fillGeometry",
    "strokeGeometry",
];

/// Editor session state with no meaning outside the design tool.
pub const UI_STATE_ATTRIBUTES: [&str; 2] = ["expanded", "inferredAutoLayout"];

/// Grid track and gap fields. Only meaningful on a frame whose own layout
/// is a native grid; dropped everywhere else.
pub const GRID_CONTAINER_ATTRIBUTES: [&str; 6] = [
    "gridRowCount",
    "gridColumnCount",
    "gridRowGap",
    "gridColumnGap",
    "gridRowSizingCSS",
    "gridColumnSizingCSS",
];

/// Grid cell placement fields. Only meaningful on a direct child of a
/// native grid frame; dropped everywhere else.
pub const GRID_CELL_ATTRIBUTES: [&str; 4] = [
    "gridRowSpan",
    "gridColumnSpan",
    "gridRowAnchorIndex",
    "gridColumnAnchorIndex",
];

/// Attributes kept whenever they are present and non-null.
pub const CRITICAL_ATTRIBUTES: [&str; 8] =
    ["id", "type", "name", "children", "x", "y", "width", "height"];

const PAINT_LISTS: [&str; 3] = ["fills", "strokes", "effects"];

/// Which grid fields survive on the attribute map being compressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct GridScope {
    container: bool,
    cell: bool,
}

impl GridScope {
    fn keeps(self, key: &str) -> bool {
        if GRID_CONTAINER_ATTRIBUTES.contains(&key) {
            return self.container;
        }
        if GRID_CELL_ATTRIBUTES.contains(&key) {
            return self.cell;
        }
        true
    }
}

/// Strips scene nodes down to their non-default attributes.
#[derive(Clone, Copy, Debug)]
pub struct FxCompressor<'a> {
    defaults: &'a FxDefaultTable,
}

impl<'a> FxCompressor<'a> {
    pub fn new(defaults: &'a FxDefaultTable) -> Self {
        FxCompressor { defaults }
    }

    pub fn defaults(&self) -> &'a FxDefaultTable {
        self.defaults
    }

    /// Compresses a node and its subtree. Each child is compressed against
    /// the defaults of its own node type.
    pub fn compress(&self, node: &FxSceneNode) -> FxSceneNode {
        self.compress_in_scope(node, false)
    }

    fn compress_in_scope(&self, node: &FxSceneNode, parent_is_grid: bool) -> FxSceneNode {
        let is_grid = node.str_or("layoutMode", "NONE") == "GRID";
        let scope = GridScope {
            container: is_grid,
            cell: parent_is_grid,
        };
        let attributes = self.compress_attributes(&node.attributes, node.node_type(), scope);
        let children = node.children.as_ref().map(|children| {
            children
                .iter()
                .map(|child| self.compress_in_scope(child, is_grid))
                .collect()
        });
        FxSceneNode::new(attributes, children)
    }

    pub fn compress_tree(&self, nodes: &[FxSceneNode]) -> Vec<FxSceneNode> {
        nodes.iter().map(|node| self.compress(node)).collect()
    }

    /// Applies the elision rules to one attribute map.
    ///
    /// Nested objects inherit `node_type` for default lookups. An empty
    /// `node_type` disables default elision. Grid fields are always dropped
    /// here; only [`FxCompressor::compress`] knows whether a node takes part
    /// in a native grid.
    pub fn compress_object(&self, object: &Map<String, Value>, node_type: &str) -> Map<String, Value> {
        self.compress_attributes(object, node_type, GridScope::default())
    }

    fn compress_attributes(&self, object: &Map<String, Value>, node_type: &str, scope: GridScope) -> Map<String, Value> {
        let mut compressed = Map::new();

        for (key, value) in object {
            if value.is_null() || is_always_dropped(key) || !scope.keeps(key) {
                continue;
            }

            if key == "overlayBackground" && is_none_overlay(value) {
                continue;
            }

            if key == "relativeTransform" {
                if !is_identity_transform(value) {
                    compressed.insert(key.clone(), value.clone());
                }
                continue;
            }

            if CRITICAL_ATTRIBUTES.contains(&key.as_str()) {
                let kept = match (key.as_str(), value) {
                    ("children", Value::Array(items)) => {
                        Value::Array(items.iter().map(|item| self.compress_item(item, node_type)).collect())
                    }
                    _ => value.clone(),
                };
                compressed.insert(key.clone(), kept);
                continue;
            }

            if is_empty_collection(value) || self.is_default(node_type, key, value) {
                continue;
            }

            match value {
                Value::Object(inner) => {
                    let nested = Value::Object(self.compress_object(inner, node_type));
                    if !is_empty_collection(&nested) && !self.is_default(node_type, key, &nested) {
                        compressed.insert(key.clone(), nested);
                    }
                }
                Value::Array(items) if PAINT_LISTS.contains(&key.as_str()) => {
                    let paints = items
                        .iter()
                        .map(|item| match item {
                            Value::Object(paint) => Value::Object(compress_paint(paint)),
                            other => other.clone(),
                        })
                        .collect();
                    compressed.insert(key.clone(), Value::Array(paints));
                }
                Value::Array(items) => {
                    let items = items.iter().map(|item| self.compress_item(item, node_type)).collect();
                    compressed.insert(key.clone(), Value::Array(items));
                }
                other => {
                    compressed.insert(key.clone(), other.clone());
                }
            }
        }

        compressed
    }

    fn compress_item(&self, item: &Value, node_type: &str) -> Value {
        match item {
            Value::Object(object) => Value::Object(self.compress_object(object, node_type)),
            other => other.clone(),
        }
    }

    fn is_default(&self, node_type: &str, key: &str, value: &Value) -> bool {
        if node_type.is_empty() {
            return false;
        }
        self.defaults
            .resolve(node_type, key)
            .is_some_and(|default| values_equal(default, value))
    }
}

fn is_always_dropped(key: &str) -> bool {
    COMPUTED_ATTRIBUTES.contains(&key) || UI_STATE_ATTRIBUTES.contains(&key)
}

fn is_none_overlay(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|overlay| overlay.len() == 1 && overlay.get("type").and_then(Value::as_str) == Some("NONE"))
}

/// Whether `value` is a 2x3 affine matrix without rotation, scale or skew.
///
/// The translation column is not inspected.
pub fn is_identity_transform(value: &Value) -> bool {
    let Some(rows) = value.as_array() else {
        return false;
    };
    if rows.len() != 2 {
        return false;
    }

    let mut cells = [[0.0f64; 2]; 2];
    for (row_index, row) in rows.iter().enumerate() {
        let Some(row) = row.as_array() else {
            return false;
        };
        if row.len() != 3 {
            return false;
        }
        for column in 0..2 {
            match row[column].as_f64() {
                Some(cell) => cells[row_index][column] = cell,
                None => return false,
            }
        }
    }

    cells == [[1.0, 0.0], [0.0, 1.0]]
}

/// Structural JSON equality where numbers compare by value, so `1 == 1.0`.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => left == right,
    }
}
