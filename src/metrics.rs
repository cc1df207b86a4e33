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


use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::node::FxSceneNode;

/// Before/after statistics for one compression run.
#[derive(Debug, Serialize, Default, PartialEq)]
pub struct FxCompressionMetrics {
    pub original_nodes: usize,
    pub compressed_nodes: usize,
    pub original_tree_nodes: usize,
    pub original_attributes: usize,
    pub compressed_attributes: usize,
    /// How often each attribute name was elided, over all nodes.
    pub removed_attribute_counts: BTreeMap<String, usize>,
}

impl FxCompressionMetrics {
    /// Compares original trees with their compressed counterparts.
    ///
    /// Compression never adds or removes nodes, so the two slices are walked
    /// in lockstep.
    pub fn compute(original: &[FxSceneNode], compressed: &[FxSceneNode]) -> Self {
        let mut metrics = FxCompressionMetrics {
            original_nodes: original.len(),
            compressed_nodes: compressed.len(),
            ..FxCompressionMetrics::default()
        };

        for node in original {
            metrics.original_tree_nodes += node.subtree_len();
            metrics.original_attributes += node.attribute_count();
        }
        for node in compressed {
            metrics.compressed_attributes += node.attribute_count();
        }
        for (before, after) in original.iter().zip(compressed) {
            metrics.count_removed(before, after);
        }

        metrics
    }

    /// Fraction of attributes removed, in `0.0..=1.0`.
    pub fn reduction_ratio(&self) -> f64 {
        if self.original_attributes == 0 {
            return 0.0;
        }
        let removed = self.original_attributes.saturating_sub(self.compressed_attributes);
        removed as f64 / self.original_attributes as f64
    }

    pub fn as_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn count_removed(&mut self, before: &FxSceneNode, after: &FxSceneNode) {
        for key in before.attributes.keys() {
            if !after.attributes.contains_key(key) {
                *self.removed_attribute_counts.entry(key.clone()).or_insert(0) += 1;
            }
        }
        for (child_before, child_after) in before.child_nodes().iter().zip(after.child_nodes()) {
            self.count_removed(child_before, child_after);
        }
    }
}
