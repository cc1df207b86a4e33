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


use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compress::compressor::FxCompressor;
use crate::defaults::FxDefaultTable;
use crate::errors::Result;
use crate::metrics::FxCompressionMetrics;
use crate::node::FxSceneNode;

const DOCUMENT_NOTE: &str = "Compressed scene-node data with its default table. \
Attributes equal to their defaults, computed attributes and empty collections have been removed.";

/// Summary block of a compressed document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FxDocumentMetadata {
    pub original_nodes: usize,
    pub compressed_nodes: usize,
    #[serde(default)]
    pub original_attributes: usize,
    #[serde(default)]
    pub compressed_attributes: usize,
    #[serde(default)]
    pub note: String,
}

/// Serialized output of a compression run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FxCompressedDocument {
    pub compressed_data: Vec<FxSceneNode>,
    pub defaults: FxDefaultTable,
    pub metadata: FxDocumentMetadata,
}

impl FxCompressedDocument {
    /// Compresses `trees` and records the table and counts used.
    pub fn build(trees: &[FxSceneNode], compressor: &FxCompressor<'_>) -> Self {
        let compressed_data = compressor.compress_tree(trees);
        let metrics = FxCompressionMetrics::compute(trees, &compressed_data);
        log::info!(
            "compressed {} tree(s): {} -> {} attributes",
            metrics.original_nodes,
            metrics.original_attributes,
            metrics.compressed_attributes
        );

        FxCompressedDocument {
            compressed_data,
            defaults: compressor.defaults().clone(),
            metadata: FxDocumentMetadata {
                original_nodes: metrics.original_nodes,
                compressed_nodes: metrics.compressed_nodes,
                original_attributes: metrics.original_attributes,
                compressed_attributes: metrics.compressed_attributes,
                note: DOCUMENT_NOTE.to_string(),
            },
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Pretty-printed JSON with non-ASCII text left unescaped.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
