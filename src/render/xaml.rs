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

//! # XAML Renderer
//!
//! Emits a user-control document for a UI tree. Output is a pure function of
//! the tree and the options: attributes appear in insertion order and every
//! element sits on its own line.

use serde::{Deserialize, Serialize};

use crate::ast::ui_node::{FxUiKind, FxUiNode};
use crate::rules::ir::format_number;

const PRESENTATION_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";
const XAML_NAMESPACE: &str = "http://schemas.microsoft.com/winfx/2006/xaml";
const COMPATIBILITY_NAMESPACE: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
const DESIGNER_NAMESPACE: &str = "http://schemas.microsoft.com/expression/blend/2008";

/// Configuration for markup output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FxRenderOptions {
    /// Namespace prefixed to the generated class name.
    pub namespace: String,
    /// One level of indentation.
    pub indent: String,
    /// Design size used when a root node has no usable width or height.
    pub fallback_size: f64,
}

impl Default for FxRenderOptions {
    fn default() -> Self {
        Self {
            namespace: "YourNamespace".to_string(),
            indent: "    ".to_string(),
            fallback_size: 200.0,
        }
    }
}

/// Renders [`FxUiNode`] trees as XAML.
#[derive(Clone, Debug, Default)]
pub struct FxXamlRenderer {
    options: FxRenderOptions,
}

impl FxXamlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: FxRenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FxRenderOptions {
        &self.options
    }

    /// Renders a complete user control wrapping `root`.
    ///
    /// Missing or non-positive design sizes fall back to the configured size.
    pub fn render_document(
        &self,
        root: &FxUiNode,
        class_name: &str,
        design_width: Option<f64>,
        design_height: Option<f64>,
    ) -> String {
        let width = self.design_size(design_width);
        let height = self.design_size(design_height);
        let attribute_indent = " ".repeat("<UserControl ".len());

        let mut out = String::new();
        out.push_str(&format!(
            "<UserControl x:Class=\"{}.{}\"\n",
            escape(&self.options.namespace),
            escape(class_name)
        ));
        for (name, value) in [
            ("xmlns", PRESENTATION_NAMESPACE),
            ("xmlns:x", XAML_NAMESPACE),
            ("xmlns:mc", COMPATIBILITY_NAMESPACE),
            ("xmlns:d", DESIGNER_NAMESPACE),
            ("mc:Ignorable", "d"),
        ] {
            out.push_str(&format!("{}{}=\"{}\"\n", attribute_indent, name, value));
        }
        out.push_str(&format!(
            "{}d:DesignHeight=\"{}\" d:DesignWidth=\"{}\">\n",
            attribute_indent,
            format_number(height),
            format_number(width)
        ));

        self.render_into(&mut out, root, 1);
        out.push_str("</UserControl>\n");
        out
    }

    /// Renders a subtree starting at indentation `depth`.
    pub fn render_node(&self, node: &FxUiNode, depth: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, node, depth);
        out
    }

    fn render_into(&self, out: &mut String, node: &FxUiNode, depth: usize) {
        let indent = self.options.indent.repeat(depth);

        if let Some(comment) = &node.comment {
            out.push_str(&format!("{}<!-- {} -->\n", indent, escape_comment(comment)));
        }

        let Some(tag) = node.kind.control_name() else {
            return;
        };

        out.push_str(&indent);
        out.push('<');
        out.push_str(tag);
        for (name, value) in node.attributes() {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }

        let has_tracks = node.kind == FxUiKind::GridContainer && (!node.rows.is_empty() || !node.columns.is_empty());
        if node.children.is_empty() && !has_tracks {
            out.push_str(" />\n");
            return;
        }
        out.push_str(">\n");

        if has_tracks {
            self.render_tracks(out, tag, "RowDefinition", "Height", &node.rows, depth + 1);
            self.render_tracks(out, tag, "ColumnDefinition", "Width", &node.columns, depth + 1);
        }
        for child in &node.children {
            self.render_into(out, child, depth + 1);
        }

        out.push_str(&format!("{}</{}>\n", indent, tag));
    }

    fn render_tracks(&self, out: &mut String, tag: &str, element: &str, size_name: &str, tracks: &[String], depth: usize) {
        if tracks.is_empty() {
            return;
        }
        let indent = self.options.indent.repeat(depth);
        let inner = self.options.indent.repeat(depth + 1);

        out.push_str(&format!("{}<{}.{}s>\n", indent, tag, element));
        for track in tracks {
            out.push_str(&format!("{}<{} {}=\"{}\" />\n", inner, element, size_name, escape(track)));
        }
        out.push_str(&format!("{}</{}.{}s>\n", indent, tag, element));
    }

    fn design_size(&self, size: Option<f64>) -> f64 {
        size.filter(|value| *value > 0.0).unwrap_or(self.options.fallback_size)
    }
}

/// Escapes text for use inside a double-quoted attribute value.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Comments may not contain `--`.
fn escape_comment(text: &str) -> String {
    let mut escaped = escape(text);
    while escaped.contains("--") {
        escaped = escaped.replace("--", "- -");
    }
    escaped
}
