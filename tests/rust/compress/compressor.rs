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

//! # Figx Compression Tests
//!
//! Tests for default elision, transform detection, paint compression and
//! the compressed document format.
//!
//! ## Test Categories
//!
//! - **Elision Tests**: defaults, computed attributes, empty collections
//! - **Paint Tests**: per-entry elision and hex conversion
//! - **Grid Scope Tests**: grid fields on grid frames and their cells
//! - **Property Tests**: idempotence and critical-attribute retention
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test compress
//! ```

use figx::compress::compressor::CRITICAL_ATTRIBUTES;
use figx::{FxCompressedDocument, FxCompressor, FxDefaultTable, FxSceneNode};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn compress(value: Value) -> Value {
    let table = FxDefaultTable::builtin();
    let node = FxSceneNode::from_value(value).unwrap();
    FxCompressor::new(&table).compress(&node).to_value()
}

/// Tests that attributes equal to their type or global default are removed.
///
/// Non-default values of the same attributes must survive.
#[test]
fn test_default_attributes_are_elided() {
    let compressed = compress(json!({
        "id": "1:2",
        "type": "RECTANGLE",
        "name": "Box",
        "opacity": 1,
        "visible": true,
        "strokeWeight": 1.0,
        "cornerRadius": 0,
        "strokeAlign": "INSIDE",
        "strokeJoin": "ROUND",
        "rotation": 15
    }));

    assert_eq!(
        compressed,
        json!({
            "id": "1:2",
            "type": "RECTANGLE",
            "name": "Box",
            "strokeJoin": "ROUND",
            "rotation": 15
        })
    );
}

/// Tests that type-specific defaults shadow global ones.
///
/// TEXT strokes default to OUTSIDE while rectangles default to INSIDE.
#[test]
fn test_type_defaults_shadow_global_defaults() {
    let text = compress(json!({"type": "TEXT", "strokeAlign": "OUTSIDE", "fontSize": 12}));
    assert_eq!(text, json!({"type": "TEXT"}));

    let rectangle = compress(json!({"type": "RECTANGLE", "strokeAlign": "OUTSIDE"}));
    assert_eq!(rectangle, json!({"type": "RECTANGLE", "strokeAlign": "OUTSIDE"}));
}

/// Tests identity transform elision.
///
/// Pure translations are dropped; any rotation, scale or skew keeps the
/// matrix verbatim.
#[test]
fn test_relative_transform_identity_detection() {
    let identity = compress(json!({"type": "FRAME", "relativeTransform": [[1, 0, 5], [0, 1, 7]]}));
    assert!(identity.get("relativeTransform").is_none());

    let skewed = compress(json!({"type": "FRAME", "relativeTransform": [[1, 0.1, 5], [0, 1, 7]]}));
    assert_eq!(skewed["relativeTransform"], json!([[1, 0.1, 5], [0, 1, 7]]));
}

/// Tests that computed geometry, session state, nulls and empty
/// collections are removed while critical attributes stay.
#[test]
fn test_computed_and_empty_attributes_are_dropped() {
    let compressed = compress(json!({
        "id": "3:1",
        "type": "FRAME",
        "name": "Panel",
        "x": 0,
        "y": 0,
        "width": 100,
        "height": 50,
        "absoluteBoundingBox": {"x": 0, "y": 0, "width": 100, "height": 50},
        "absoluteTransform": [[1, 0, 0], [0, 1, 0]],
        "expanded": true,
        "description": null,
        "exportSettings": [],
        "pluginData": {},
        "children": []
    }));

    assert_eq!(
        compressed,
        json!({
            "id": "3:1",
            "type": "FRAME",
            "name": "Panel",
            "x": 0,
            "y": 0,
            "width": 100,
            "height": 50,
            "children": []
        })
    );
}

/// Tests paint entry compression and color conversion.
///
/// `(0.85, 0.85, 0.85)` becomes `#D9D9D9`; default paint fields disappear.
#[test]
fn test_paints_are_compressed() {
    let compressed = compress(json!({
        "type": "RECTANGLE",
        "fills": [{
            "blendMode": "NORMAL",
            "type": "SOLID",
            "visible": true,
            "opacity": 1,
            "color": {"r": 0.85, "g": 0.85, "b": 0.85, "a": 1},
            "boundVariables": {}
        }],
        "strokes": [{
            "type": "SOLID",
            "opacity": 0.4,
            "color": {"r": 1, "g": 0, "b": 0}
        }]
    }));

    assert_eq!(compressed["fills"], json!([{"type": "SOLID", "color": "#D9D9D9"}]));
    assert_eq!(
        compressed["strokes"],
        json!([{"type": "SOLID", "opacity": 0.4, "color": "#FF0000"}])
    );
}

/// Tests that children are compressed against their own type's defaults.
#[test]
fn test_children_use_their_own_defaults() {
    let compressed = compress(json!({
        "type": "FRAME",
        "clipsContent": true,
        "children": [
            {"type": "TEXT", "fontSize": 12, "clipsContent": true},
            {"type": "RECTANGLE", "cornerRadius": 0, "fontSize": 12}
        ]
    }));

    assert_eq!(
        compressed,
        json!({
            "type": "FRAME",
            "children": [
                {"type": "TEXT", "clipsContent": true},
                {"type": "RECTANGLE", "fontSize": 12}
            ]
        })
    );
}

/// Tests that grid track fields survive only on native grid frames and cell
/// fields only on their direct children.
#[test]
fn test_grid_fields_are_scoped_to_native_grids() {
    let grid = compress(json!({
        "type": "FRAME",
        "layoutMode": "GRID",
        "gridColumnGap": 10,
        "gridRowCount": 2,
        "gridColumnAnchorIndex": 1,
        "children": [
            {"type": "RECTANGLE", "gridColumnAnchorIndex": 2, "gridRowCount": 4}
        ]
    }));
    assert_eq!(grid["gridColumnGap"], json!(10));
    assert_eq!(grid["gridRowCount"], json!(2));
    assert!(grid.get("gridColumnAnchorIndex").is_none());
    assert_eq!(grid["children"][0], json!({"type": "RECTANGLE", "gridColumnAnchorIndex": 2}));

    let stack = compress(json!({
        "type": "FRAME",
        "layoutMode": "VERTICAL",
        "gridColumnGap": 10,
        "children": [{"type": "RECTANGLE", "gridColumnAnchorIndex": 2}]
    }));
    assert!(stack.get("gridColumnGap").is_none());
    assert_eq!(stack["children"][0], json!({"type": "RECTANGLE"}));
}

/// Tests the `overlayBackground` special case.
#[test]
fn test_none_overlay_background_is_dropped() {
    let none = compress(json!({"type": "FRAME", "overlayBackground": {"type": "NONE"}}));
    assert!(none.get("overlayBackground").is_none());

    let solid = compress(json!({
        "type": "FRAME",
        "overlayBackground": {"type": "SOLID_COLOR", "opacity": 0.25}
    }));
    assert_eq!(solid["overlayBackground"]["type"], json!("SOLID_COLOR"));
}

/// Tests the compressed document layout and its metadata.
#[test]
fn test_compressed_document_metadata() {
    let table = FxDefaultTable::builtin();
    let compressor = FxCompressor::new(&table);
    let trees = vec![
        FxSceneNode::from_value(json!({
            "type": "FRAME",
            "name": "A",
            "opacity": 1,
            "children": [{"type": "TEXT", "name": "Label", "fontSize": 12}]
        }))
        .unwrap(),
        FxSceneNode::from_value(json!({"type": "RECTANGLE", "name": "B", "visible": true})).unwrap(),
    ];

    let document = FxCompressedDocument::build(&trees, &compressor);
    assert_eq!(document.metadata.original_nodes, 2);
    assert_eq!(document.metadata.compressed_nodes, 2);
    assert_eq!(document.metadata.original_attributes, 10);
    assert_eq!(document.metadata.compressed_attributes, 7);

    let value = document.to_value().unwrap();
    assert!(value["compressed_data"].is_array());
    assert!(value["defaults"]["GLOBAL"].is_object());
    assert_eq!(value["metadata"]["original_nodes"], json!(2));
}

const GENERATED_KEYS: [&str; 18] = [
    "id",
    "name",
    "x",
    "width",
    "opacity",
    "visible",
    "cornerRadius",
    "fills",
    "strokes",
    "relativeTransform",
    "absoluteBoundingBox",
    "constraints",
    "layoutMode",
    "gridRowGap",
    "gridColumnAnchorIndex",
    "expanded",
    "itemSpacing",
    "fontSize",
];

fn attribute_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        (0i64..4).prop_map(Value::from),
        prop::sample::select(vec!["MIN", "NONE", "FIXED", "GRID", "HORIZONTAL", "Mixed"]).prop_map(Value::from),
        prop::sample::select(vec![
            Value::Null,
            json!(0.5),
            json!([]),
            json!({}),
            json!([[1, 0, 3], [0, 1, 4]]),
            json!([[0, 1, 3], [1, 0, 4]]),
            json!({"horizontal": "MIN", "vertical": "MIN"}),
            json!({"horizontal": "MAX", "vertical": null, "opacity": 1}),
            json!([{
                "type": "SOLID",
                "visible": true,
                "opacity": 1,
                "color": {"r": 0.5, "g": 0.25, "b": 1.0}
            }]),
        ]),
    ]
}

fn attributes() -> impl Strategy<Value = Map<String, Value>> {
    (
        prop::sample::select(vec!["FRAME", "RECTANGLE", "TEXT"]),
        prop::collection::vec((prop::sample::select(GENERATED_KEYS.to_vec()), attribute_value()), 0..8),
    )
        .prop_map(|(node_type, entries)| {
            let mut map = Map::new();
            map.insert("type".to_string(), json!(node_type));
            for (key, value) in entries {
                map.insert(key.to_string(), value);
            }
            map
        })
}

fn scene_tree() -> impl Strategy<Value = Value> {
    attributes().prop_map(Value::Object).prop_recursive(3, 24, 4, |inner| {
        (attributes(), prop::collection::vec(inner, 0..4)).prop_map(|(mut map, children)| {
            map.insert("children".to_string(), Value::Array(children));
            Value::Object(map)
        })
    })
}

fn assert_critical_kept(original: &Value, compressed: &Value) {
    for key in CRITICAL_ATTRIBUTES {
        if original.get(key).is_some_and(|value| !value.is_null()) {
            assert!(compressed.get(key).is_some(), "critical attribute '{}' was dropped", key);
        }
    }
    if let (Some(Value::Array(before)), Some(Value::Array(after))) = (original.get("children"), compressed.get("children")) {
        assert_eq!(before.len(), after.len());
        for (child, compressed_child) in before.iter().zip(after) {
            assert_critical_kept(child, compressed_child);
        }
    }
}

proptest! {
    /// Compressing an already compressed tree changes nothing.
    #[test]
    fn test_compression_is_idempotent(tree in scene_tree()) {
        let once = compress(tree);
        let twice = compress(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Critical attributes survive whenever they are present and non-null,
    /// including empty child lists.
    #[test]
    fn test_critical_attributes_are_retained(tree in scene_tree()) {
        let compressed = compress(tree.clone());
        assert_critical_kept(&tree, &compressed);
    }
}
