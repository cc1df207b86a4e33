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

//! # UI Node Model
//!
//! Element tree produced by the builder and consumed by renderers. Nodes own
//! their children exclusively and keep attributes in insertion order, so
//! rendering the same tree always yields the same text.

use serde_json::{json, Map, Value};

/// Structural role of a UI node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FxUiKind {
    /// Decorated box holding at most one child (border, background, padding).
    Box,
    StackVertical,
    StackHorizontal,
    WrapContainer,
    GridContainer,
    TextLeaf,
    /// Placeholder for a scene node that could not be mapped.
    Unknown,
}

impl FxUiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FxUiKind::Box => "Box",
            FxUiKind::StackVertical => "StackVertical",
            FxUiKind::StackHorizontal => "StackHorizontal",
            FxUiKind::WrapContainer => "WrapContainer",
            FxUiKind::GridContainer => "GridContainer",
            FxUiKind::TextLeaf => "TextLeaf",
            FxUiKind::Unknown => "Unknown",
        }
    }

    /// Control kind name used by attribute rules and markup output.
    pub fn control_name(&self) -> Option<&'static str> {
        match self {
            FxUiKind::Box => Some("Border"),
            FxUiKind::StackVertical | FxUiKind::StackHorizontal => Some("StackPanel"),
            FxUiKind::WrapContainer => Some("WrapPanel"),
            FxUiKind::GridContainer => Some("Grid"),
            FxUiKind::TextLeaf => Some("TextBlock"),
            FxUiKind::Unknown => None,
        }
    }
}

/// One element of the UI tree.
#[derive(Clone, Debug, PartialEq)]
pub struct FxUiNode {
    pub kind: FxUiKind,
    attributes: Vec<(String, String)>,
    pub children: Vec<FxUiNode>,
    pub comment: Option<String>,
    /// Row track sizes of a grid container.
    pub rows: Vec<String>,
    /// Column track sizes of a grid container.
    pub columns: Vec<String>,
}

impl FxUiNode {
    pub fn new(kind: FxUiKind) -> Self {
        FxUiNode {
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
            comment: None,
            rows: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets `name` when `value` is present; `None` leaves the node untouched.
    ///
    /// An existing attribute keeps its position and takes the new value.
    pub fn set_attribute<V: Into<String>>(&mut self, name: &str, value: Option<V>) {
        let Some(value) = value else {
            return;
        };
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.set_attribute(name, Some(value));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(index).1)
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn add_child(&mut self, child: FxUiNode) {
        self.children.push(child);
    }

    /// Debug view: `{type, attributes, children, comment, rows, columns}`.
    pub fn to_json(&self) -> Value {
        let attributes: Map<String, Value> = self
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        json!({
            "type": self.kind.as_str(),
            "attributes": attributes,
            "children": self.children.iter().map(FxUiNode::to_json).collect::<Vec<_>>(),
            "comment": self.comment,
            "rows": self.rows,
            "columns": self.columns,
        })
    }
}
