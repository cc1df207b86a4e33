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

//! # Rule Configuration
//!
//! Typed form of the two YAML tables that drive layout decisions:
//!
//! - `layout_rules.yaml`: ordered container selection rules and per-control
//!   attribute rules
//! - `mapping.yaml`: alignment and sizing-mode lookup tables

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::rules::ir::format_number;

/// Layout container a frame maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FxContainerType {
    StackPanel,
    WrapPanel,
    Grid,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FxOrientation {
    Vertical,
    Horizontal,
}

/// Result of container selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FxContainerDecision {
    pub container_type: FxContainerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<FxOrientation>,
    /// Axis layout emulated with a grid so a child can take the remaining space.
    #[serde(default)]
    pub use_grid: bool,
    /// Native grid with explicit tracks.
    #[serde(default)]
    pub use_grid_layout: bool,
    #[serde(default)]
    pub space_between: bool,
}

impl FxContainerDecision {
    /// Vertical stack with no grid flags.
    pub fn fallback() -> Self {
        FxContainerDecision {
            container_type: FxContainerType::StackPanel,
            orientation: Some(FxOrientation::Vertical),
            use_grid: false,
            use_grid_layout: false,
            space_between: false,
        }
    }

    /// Orientation, defaulting per container type the way the layout
    /// containers themselves default.
    pub fn orientation_or_default(&self) -> FxOrientation {
        self.orientation.unwrap_or(match self.container_type {
            FxContainerType::WrapPanel | FxContainerType::Grid => FxOrientation::Horizontal,
            _ => FxOrientation::Vertical,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FxContainerRule {
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "expression_text")]
    pub condition: String,
    pub result: FxContainerDecision,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FxAttributeRule {
    #[serde(deserialize_with = "expression_text")]
    pub condition: String,
    /// Literal value or template with `{expression}` placeholders.
    #[serde(deserialize_with = "expression_text")]
    pub value: String,
}

/// Attribute rules keyed by control kind, then attribute name.
pub type FxAttributeRuleTable = BTreeMap<String, BTreeMap<String, Vec<FxAttributeRule>>>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FxRuleConfig {
    #[serde(default)]
    pub container_selection_rules: Vec<FxContainerRule>,
    #[serde(default)]
    pub attribute_rules: FxAttributeRuleTable,
}

/// Horizontal and vertical alignment names for one design-tool alignment value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FxAxisAlignment {
    #[serde(default)]
    pub horizontal: Option<String>,
    #[serde(default)]
    pub vertical: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FxAlignmentMapping {
    #[serde(default)]
    pub counter_axis: BTreeMap<String, FxAxisAlignment>,
    #[serde(default)]
    pub primary_axis: BTreeMap<String, FxAxisAlignment>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FxSizingRule {
    #[serde(default)]
    pub set_dimension: bool,
    #[serde(default)]
    pub stretch: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FxMappingConfig {
    #[serde(default)]
    pub alignment_mapping: FxAlignmentMapping,
    #[serde(default)]
    pub sizing_mode: BTreeMap<String, FxSizingRule>,
}

/// Accepts strings, booleans and numbers, so unquoted YAML scalars such as
/// `condition: true` or `value: 1` load as expression text.
fn expression_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(number.as_f64().map(format_number).unwrap_or_else(|| number.to_string())),
        other => Err(D::Error::custom(format!("expected expression text, found {}", other))),
    }
}
