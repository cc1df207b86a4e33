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

//! # Figx Default Table Module
//!
//! Attribute default values used by the compressor to decide which scene-node
//! attributes can be omitted. The table has two levels: a `GLOBAL` section
//! shared by every node type and one section per node type whose entries
//! shadow the global ones.
//!
//! An attribute without an entry is never elided. A `null` entry means the
//! attribute has no default; in a type section it also hides the global one.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::{FxError, Result};

/// Name of the section shared by all node types.
pub const GLOBAL_SECTION: &str = "GLOBAL";

static BUILTIN: OnceLock<FxDefaultTable> = OnceLock::new();

/// Two-level attribute default table.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FxDefaultTable {
    sections: Map<String, Value>,
}

impl FxDefaultTable {
    /// Shared instance of the builtin table, built on first use.
    pub fn shared() -> &'static FxDefaultTable {
        BUILTIN.get_or_init(FxDefaultTable::builtin)
    }

    /// Builds the table of defaults documented for the design tool's plugin API.
    pub fn builtin() -> Self {
        let stroke_defaults = |align: &str| {
            vec![
                ("fills", json!([])),
                ("fillStyleId", json!("")),
                ("strokes", json!([])),
                ("strokeStyleId", json!("")),
                ("strokeWeight", json!(1)),
                ("strokeAlign", json!(align)),
                ("strokeJoin", json!("MITER")),
                ("strokeCap", json!("NONE")),
                ("strokeMiterLimit", json!(4)),
                ("dashPattern", json!([])),
            ]
        };
        let shape_defaults = vec![
            ("cornerRadius", json!(0)),
            ("cornerSmoothing", json!(0)),
            ("topLeftRadius", json!(0)),
            ("topRightRadius", json!(0)),
            ("bottomLeftRadius", json!(0)),
            ("bottomRightRadius", json!(0)),
            ("strokeTopWeight", json!(1)),
            ("strokeBottomWeight", json!(1)),
            ("strokeLeftWeight", json!(1)),
            ("strokeRightWeight", json!(1)),
            ("fillGeometry", json!([])),
            ("strokeGeometry", json!([])),
            ("layoutSizingHorizontal", json!("FIXED")),
            ("layoutSizingVertical", json!("FIXED")),
        ];
        let constraints = ("constraints", json!({"horizontal": "MIN", "vertical": "MIN"}));

        let global = vec![
            ("visible", json!(true)),
            ("locked", json!(false)),
            ("opacity", json!(1)),
            ("blendMode", json!("PASS_THROUGH")),
            ("isMask", json!(false)),
            ("maskType", json!("ALPHA")),
            ("effects", json!([])),
            ("effectStyleId", json!("")),
            ("reactions", json!([])),
            ("isAsset", json!(false)),
            ("stuckNodes", json!([])),
            ("attachedConnectors", json!([])),
            ("variableConsumptionMap", json!({})),
            ("boundVariables", json!({})),
            ("resolvedVariableModes", json!({})),
            ("inferredVariables", json!({})),
            ("availableInferredVariables", json!({})),
            ("explicitVariableModes", json!({})),
            ("constrainProportions", json!(false)),
            ("layoutGrow", json!(0)),
            ("layoutAlign", json!("INHERIT")),
            ("layoutPositioning", json!("AUTO")),
            ("rotation", json!(0)),
            ("exportSettings", json!([])),
            ("annotations", json!([])),
            (
                "playbackSettings",
                json!({"autoplay": true, "loop": true, "muted": false}),
            ),
        ];

        let mut rectangle = stroke_defaults("INSIDE");
        rectangle.extend(shape_defaults.iter().cloned());
        rectangle.extend([
            constraints.clone(),
            ("gridRowSpan", json!(1)),
            ("gridColumnSpan", json!(1)),
            ("gridRowAnchorIndex", json!(-1)),
            ("gridColumnAnchorIndex", json!(-1)),
            ("gridChildHorizontalAlign", json!("AUTO")),
            ("gridChildVerticalAlign", json!("AUTO")),
        ]);

        let mut frame = stroke_defaults("INSIDE");
        frame.extend(shape_defaults.iter().cloned());
        frame.extend([
            ("clipsContent", json!(true)),
            ("layoutMode", json!("NONE")),
            ("paddingLeft", json!(0)),
            ("paddingRight", json!(0)),
            ("paddingTop", json!(0)),
            ("paddingBottom", json!(0)),
            ("itemSpacing", json!(0)),
            ("counterAxisSpacing", json!(0)),
            ("primaryAxisAlignItems", json!("MIN")),
            ("counterAxisAlignItems", json!("MIN")),
            ("primaryAxisSizingMode", json!("FIXED")),
            ("counterAxisSizingMode", json!("FIXED")),
            ("layoutWrap", json!("NO_WRAP")),
            ("counterAxisAlignContent", json!("AUTO")),
            ("layoutGrids", json!([])),
            ("gridStyleId", json!("")),
            ("backgrounds", json!([])),
            ("backgroundStyleId", json!("")),
            ("guides", json!([])),
            constraints.clone(),
            ("overflowDirection", json!("NONE")),
            ("numberOfFixedChildren", json!(0)),
            ("overlayPositionType", json!("CENTER")),
            ("overlayBackgroundInteraction", json!("NONE")),
            ("itemReverseZIndex", json!(false)),
            ("strokesIncludedInLayout", json!(false)),
        ]);

        let mut text = stroke_defaults("OUTSIDE");
        text.extend([
            ("textAlignHorizontal", json!("LEFT")),
            ("textAlignVertical", json!("TOP")),
            ("textAutoResize", json!("WIDTH_AND_HEIGHT")),
            ("paragraphIndent", json!(0)),
            ("paragraphSpacing", json!(0)),
            ("autoRename", json!(true)),
            ("textStyleId", json!("")),
            ("fontSize", json!(12)),
            ("fontName", json!({"family": "Roboto", "style": "Regular"})),
            ("textCase", json!("ORIGINAL")),
            ("textDecoration", json!("NONE")),
            ("letterSpacing", json!({"unit": "PERCENT", "value": 0})),
            ("lineHeight", json!({"unit": "AUTO"})),
            constraints,
        ]);

        let mut sections = Map::new();
        for (name, entries) in [
            (GLOBAL_SECTION, global),
            ("RECTANGLE", rectangle),
            ("FRAME", frame),
            ("TEXT", text),
        ] {
            let section: Map<String, Value> = entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect();
            sections.insert(name.to_string(), Value::Object(section));
        }
        FxDefaultTable { sections }
    }

    /// Builds a table from a JSON object of sections.
    ///
    /// Every section must itself be an object. A `null` entry marks the
    /// attribute as having no default in that section.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(raw) = value else {
            return Err(FxError::config(
                "defaults",
                "default table must be an object of sections",
            ));
        };

        let mut sections = Map::new();
        for (name, section) in raw {
            let Value::Object(entries) = section else {
                return Err(FxError::config(
                    "defaults",
                    format!("section '{}' must be an object", name),
                ));
            };
            sections.insert(name, Value::Object(entries));
        }
        Ok(FxDefaultTable { sections })
    }

    /// Loads a table from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source_name = path.display().to_string();
        let text = fs::read_to_string(path)
            .map_err(|err| FxError::config(&source_name, err.to_string()))?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        let value: Value = if is_yaml {
            serde_yaml::from_str(&text).map_err(|err| FxError::config(&source_name, err.to_string()))?
        } else {
            serde_json::from_str(&text).map_err(|err| FxError::config(&source_name, err.to_string()))?
        };

        FxDefaultTable::from_value(value).map_err(|err| match err {
            FxError::Config { message, .. } => FxError::config(source_name, message),
            other => other,
        })
    }

    /// Resolves the default for `attribute` on a node of `node_type`.
    ///
    /// The first section naming the attribute wins, type section before
    /// `GLOBAL`. A `null` entry there means no default, even when `GLOBAL`
    /// has one. Unknown types only see `GLOBAL`.
    pub fn resolve(&self, node_type: &str, attribute: &str) -> Option<&Value> {
        self.section_entry(node_type, attribute)
            .or_else(|| self.section_entry(GLOBAL_SECTION, attribute))
            .filter(|value| !value.is_null())
    }

    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.sections.get(name).and_then(Value::as_object)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.sections.clone())
    }

    fn section_entry(&self, section: &str, attribute: &str) -> Option<&Value> {
        self.section(section).and_then(|entries| entries.get(attribute))
    }
}
