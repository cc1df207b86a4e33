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

//! # Conversion Pipeline
//!
//! Wires the engines together: decode input, compress every top-level tree,
//! build its UI tree and render it. Configuration is loaded once and shared
//! read-only; top-level trees are independent and, with the `parallel`
//! feature, are converted concurrently. Output order always matches input
//! order.

use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde_json::Value;

use crate::ast::{FxAstBuilder, FxUiNode};
use crate::compress::{FxCompressedDocument, FxCompressor};
use crate::defaults::FxDefaultTable;
use crate::errors::{FxError, Result};
use crate::node::FxSceneNode;
use crate::render::{FxRenderOptions, FxXamlRenderer};
use crate::rules::FxRuleEngine;

/// Decoded input: the trees plus the default table a compressed document
/// carries with it.
#[derive(Clone, Debug)]
pub struct FxInputDocument {
    pub trees: Vec<FxSceneNode>,
    pub defaults: Option<FxDefaultTable>,
}

/// One rendered top-level node.
#[derive(Clone, Debug)]
pub struct FxConvertedControl {
    pub class_name: String,
    pub markup: String,
    pub ast: FxUiNode,
}

/// Scene graph to markup converter.
#[derive(Clone, Debug)]
pub struct FxConverter {
    defaults: Arc<FxDefaultTable>,
    engine: Arc<FxRuleEngine>,
    renderer: FxXamlRenderer,
}

impl FxConverter {
    pub fn new(defaults: Arc<FxDefaultTable>, engine: Arc<FxRuleEngine>) -> Self {
        FxConverter {
            defaults,
            engine,
            renderer: FxXamlRenderer::new(),
        }
    }

    /// Converter using the tables compiled into the crate.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(
            Arc::new(FxDefaultTable::shared().clone()),
            Arc::new(FxRuleEngine::builtin()?),
        ))
    }

    /// Converter reading `layout_rules.yaml` and `mapping.yaml` from `dir`.
    /// Fails before any input is seen when either file is missing or invalid.
    pub fn from_config_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(
            Arc::new(FxDefaultTable::shared().clone()),
            Arc::new(FxRuleEngine::from_dir(dir)?),
        ))
    }

    pub fn with_render_options(mut self, options: FxRenderOptions) -> Self {
        self.renderer = self.renderer.with_options(options);
        self
    }

    pub fn defaults(&self) -> &FxDefaultTable {
        &self.defaults
    }

    pub fn engine(&self) -> &FxRuleEngine {
        &self.engine
    }

    /// Decodes a JSON array of trees, or an object whose `compressed_data`
    /// holds one.
    pub fn parse_input(input: &str) -> Result<Vec<FxSceneNode>> {
        Ok(Self::parse_document(input)?.trees)
    }

    pub fn parse_document(input: &str) -> Result<FxInputDocument> {
        let value: Value = serde_json::from_str(input)?;
        match value {
            Value::Array(items) => Ok(FxInputDocument {
                trees: decode_trees(items)?,
                defaults: None,
            }),
            Value::Object(mut object) => {
                let Some(Value::Array(items)) = object.remove("compressed_data") else {
                    return Err(FxError::validation(
                        "input object has no 'compressed_data' array",
                    ));
                };
                let defaults = match object.remove("defaults") {
                    Some(table) => Some(FxDefaultTable::from_value(table)?),
                    None => None,
                };
                Ok(FxInputDocument {
                    trees: decode_trees(items)?,
                    defaults,
                })
            }
            other => Err(FxError::validation(format!(
                "expected an array of nodes or a compressed document, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Compresses every tree of `input` into a document.
    pub fn compress_document(&self, input: &str) -> Result<FxCompressedDocument> {
        let trees = Self::parse_input(input)?;
        let compressor = FxCompressor::new(&self.defaults);
        Ok(FxCompressedDocument::build(&trees, &compressor))
    }

    /// Converts every top-level node of `input` into a rendered control.
    ///
    /// Compressed input is compressed against the table it carries, which
    /// leaves it unchanged.
    pub fn convert(&self, input: &str) -> Result<Vec<FxConvertedControl>> {
        let document = Self::parse_document(input)?;
        let defaults = document.defaults.as_ref().unwrap_or(&*self.defaults);
        Ok(self.convert_trees(&document.trees, defaults))
    }

    pub fn convert_trees(&self, trees: &[FxSceneNode], defaults: &FxDefaultTable) -> Vec<FxConvertedControl> {
        let compressor = FxCompressor::new(defaults);
        let builder = FxAstBuilder::new(&self.engine);

        #[cfg(feature = "parallel")]
        let controls: Vec<FxConvertedControl> = trees
            .par_iter()
            .enumerate()
            .map(|(index, tree)| self.convert_tree(index, tree, &compressor, &builder))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let controls: Vec<FxConvertedControl> = trees
            .iter()
            .enumerate()
            .map(|(index, tree)| self.convert_tree(index, tree, &compressor, &builder))
            .collect();

        log::info!(
            "converted {} control(s): {}",
            controls.len(),
            controls
                .iter()
                .map(|control| control.class_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        controls
    }

    fn convert_tree(
        &self,
        index: usize,
        tree: &FxSceneNode,
        compressor: &FxCompressor<'_>,
        builder: &FxAstBuilder<'_>,
    ) -> FxConvertedControl {
        let compressed = compressor.compress(tree);
        let ast = builder.build(&compressed, true);
        let class_name = class_name(&compressed, index);
        let markup = self.renderer.render_document(
            &ast,
            &class_name,
            compressed.number("width"),
            compressed.number("height"),
        );
        FxConvertedControl {
            class_name,
            markup,
            ast,
        }
    }
}

/// Node name without whitespace, or `Control<n>` (1-based) when that is
/// empty.
pub fn class_name(node: &FxSceneNode, index: usize) -> String {
    let name: String = node
        .name()
        .unwrap_or("")
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    if name.is_empty() {
        format!("Control{}", index + 1)
    } else {
        name
    }
}

fn decode_trees(items: Vec<Value>) -> Result<Vec<FxSceneNode>> {
    items.into_iter().map(FxSceneNode::from_value).collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
