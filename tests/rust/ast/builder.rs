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

//! # Figx AST Builder Tests
//!
//! Tests for container selection, grid placement, margins, wrapper elision
//! and leaf attribute mapping.
//!
//! ## Test Categories
//!
//! - **Container Tests**: stacks, wrap panels, synthetic and native grids
//! - **Spacing Tests**: margins from item spacing and grid gaps
//! - **Wrapper Tests**: when a frame gets a decorated box
//! - **Leaf Tests**: rectangles, text and unknown nodes
//! - **Robustness Tests**: wrong-typed and out-of-range layout fields
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test builder
//! ```

use figx::{FxAstBuilder, FxCompressor, FxDefaultTable, FxRuleEngine, FxSceneNode, FxUiKind, FxUiNode};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn build(value: Value) -> FxUiNode {
    let table = FxDefaultTable::builtin();
    let engine = FxRuleEngine::builtin().unwrap();
    let node = FxSceneNode::from_value(value).unwrap();
    let compressed = FxCompressor::new(&table).compress(&node);
    FxAstBuilder::new(&engine).build(&compressed, true)
}

fn names(node: &FxUiNode) -> Vec<&str> {
    node.attributes().iter().map(|(name, _)| name.as_str()).collect()
}

fn rectangle(name: &str, width: f64) -> Value {
    json!({"type": "RECTANGLE", "name": name, "width": width, "height": 20})
}

/// Tests the horizontal layout with a filling child end to end.
///
/// The frame becomes a grid with `Auto,*` columns; the second child sits in
/// column 1 and carries the item spacing on its leading edge only.
#[test]
fn test_horizontal_fill_child_becomes_grid() {
    let mut filler = rectangle("Filler", 100.0);
    filler["layoutSizingHorizontal"] = json!("FILL");
    let root = build(json!({
        "type": "FRAME",
        "name": "Row",
        "layoutMode": "HORIZONTAL",
        "itemSpacing": 8,
        "children": [rectangle("Icon", 50.0), filler]
    }));

    assert_eq!(root.kind, FxUiKind::GridContainer);
    assert_eq!(root.columns, vec!["Auto", "*"]);
    assert!(root.rows.is_empty());

    let icon = &root.children[0];
    assert_eq!(icon.get("Grid.Column"), Some("0"));
    assert_eq!(icon.get("Margin"), None);
    assert_eq!(icon.get("Width"), Some("50"));

    let filler = &root.children[1];
    assert_eq!(filler.get("Grid.Column"), Some("1"));
    assert_eq!(filler.get("Margin"), Some("8,0,0,0"));
    assert_eq!(filler.get("Width"), None);
    assert_eq!(filler.get("HorizontalAlignment"), Some("Stretch"));
}

/// Tests that a horizontal root with several children reserves the
/// trailing column even without an explicit filling child.
#[test]
fn test_root_horizontal_layout_reserves_last_column() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Toolbar",
        "layoutMode": "HORIZONTAL",
        "children": [
            rectangle("Logo", 40.0),
            {"type": "FRAME", "name": "Actions", "width": 300, "height": 40, "children": []}
        ]
    }));

    assert_eq!(root.kind, FxUiKind::GridContainer);
    assert_eq!(root.columns, vec!["Auto", "*"]);
    let actions = &root.children[1];
    assert_eq!(actions.get("Width"), None);
    assert_eq!(actions.get("Height"), Some("40"));
    assert_eq!(actions.get("Grid.Column"), Some("1"));
}

/// Tests gap distribution on a 3x1 native grid.
///
/// Outer edges of the first and last tracks never get a margin.
#[test]
fn test_native_grid_edge_suppression() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Tiles",
        "layoutMode": "GRID",
        "gridRowGap": 10,
        "gridColumnGap": 10,
        "gridRowSizes": [{"type": "FIXED", "value": 40}],
        "gridColumnSizes": [
            {"type": "FLEX", "value": 1},
            {"type": "FLEX", "value": 2},
            {"type": "HUG"}
        ],
        "children": [rectangle("A", 10.0), rectangle("B", 10.0), rectangle("C", 10.0)]
    }));

    assert_eq!(root.kind, FxUiKind::GridContainer);
    assert_eq!(root.rows, vec!["40"]);
    assert_eq!(root.columns, vec!["*", "2*", "Auto"]);

    let margins: Vec<Option<&str>> = root.children.iter().map(|child| child.get("Margin")).collect();
    assert_eq!(margins, vec![Some("0,0,5,0"), Some("5,0,5,0"), Some("5,0,0,0")]);

    let columns: Vec<Option<&str>> = root.children.iter().map(|child| child.get("Grid.Column")).collect();
    assert_eq!(columns, vec![Some("0"), Some("1"), Some("2")]);
    assert!(root.children.iter().all(|child| child.get("Grid.Row") == Some("0")));
}

/// Tests explicit anchors, spans and row-major auto placement.
#[test]
fn test_native_grid_anchors_and_spans() {
    let mut banner = rectangle("Banner", 10.0);
    banner["gridRowAnchorIndex"] = json!(1);
    banner["gridColumnAnchorIndex"] = json!(0);
    banner["gridColumnSpan"] = json!(2);

    let root = build(json!({
        "type": "FRAME",
        "name": "Board",
        "layoutMode": "GRID",
        "gridRowSizes": [{"type": "FLEX", "value": 1}, {"type": "FLEX", "value": 1}],
        "gridColumnSizes": [{"type": "FLEX", "value": 1}, {"type": "FLEX", "value": 1}],
        "children": [rectangle("A", 10.0), rectangle("B", 10.0), banner]
    }));

    let b = &root.children[1];
    assert_eq!(b.get("Grid.Row"), Some("0"));
    assert_eq!(b.get("Grid.Column"), Some("1"));

    let banner = &root.children[2];
    assert_eq!(banner.get("Grid.Row"), Some("1"));
    assert_eq!(banner.get("Grid.Column"), Some("0"));
    assert_eq!(banner.get("Grid.ColumnSpan"), Some("2"));
    assert_eq!(banner.get("Grid.RowSpan"), None);
    assert_eq!(banner.get("Margin"), None);
}

/// Tests the three-track layout used for spread-apart children.
#[test]
fn test_space_between_uses_three_tracks() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Header",
        "layoutMode": "HORIZONTAL",
        "primaryAxisAlignItems": "SPACE_BETWEEN",
        "children": [rectangle("A", 10.0), rectangle("B", 10.0), rectangle("C", 10.0), rectangle("D", 10.0)]
    }));

    assert_eq!(root.kind, FxUiKind::GridContainer);
    assert_eq!(root.columns, vec!["Auto", "*", "Auto"]);
    let columns: Vec<Option<&str>> = root.children.iter().map(|child| child.get("Grid.Column")).collect();
    assert_eq!(columns, vec![Some("0"), Some("1"), Some("1"), Some("2")]);
}

/// Tests one-sided stack margins and hidden children.
#[test]
fn test_vertical_stack_spacing_skips_hidden_children() {
    let mut hidden = rectangle("Hidden", 10.0);
    hidden["visible"] = json!(false);

    let root = build(json!({
        "type": "FRAME",
        "name": "List",
        "layoutMode": "VERTICAL",
        "itemSpacing": 12,
        "counterAxisAlignItems": "CENTER",
        "children": [hidden, rectangle("First", 10.0), rectangle("Second", 10.0)]
    }));

    assert_eq!(root.kind, FxUiKind::StackVertical);
    assert_eq!(root.get("Orientation"), Some("Vertical"));
    assert_eq!(root.get("HorizontalAlignment"), Some("Center"));
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].comment.as_deref(), Some("First"));
    assert_eq!(root.children[0].get("Margin"), None);
    assert_eq!(root.children[1].get("Margin"), Some("0,12,0,0"));
}

/// Tests uniform half-spacing margins in wrap containers.
#[test]
fn test_wrap_container_margins() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Tags",
        "layoutMode": "HORIZONTAL",
        "layoutWrap": "WRAP",
        "itemSpacing": 10,
        "primaryAxisAlignItems": "MAX",
        "children": [rectangle("A", 10.0), rectangle("B", 10.0)]
    }));

    assert_eq!(root.kind, FxUiKind::WrapContainer);
    assert_eq!(root.get("HorizontalAlignment"), Some("Right"));
    assert_eq!(root.get("VerticalAlignment"), Some("Top"));
    assert_eq!(root.children[0].get("Margin"), None);
    assert_eq!(root.children[1].get("Margin"), Some("5"));
}

/// Tests that an undecorated root frame returns its container directly.
#[test]
fn test_plain_root_frame_has_no_wrapper() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Card",
        "layoutMode": "VERTICAL",
        "width": 320,
        "height": 200,
        "paddingLeft": 0,
        "cornerRadius": 0,
        "fills": [],
        "children": [rectangle("A", 10.0)]
    }));

    assert_eq!(root.kind, FxUiKind::StackVertical);
    assert_eq!(root.comment.as_deref(), Some("Card container"));
    assert_eq!(root.get("Width"), None);
    assert_eq!(root.get("Height"), None);
}

/// Tests the decorated wrapper and its attribute order.
#[test]
fn test_decorated_frame_is_wrapped() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Card",
        "layoutMode": "VERTICAL",
        "opacity": 0.5,
        "cornerRadius": 8,
        "paddingLeft": 16,
        "paddingRight": 16,
        "paddingTop": 16,
        "paddingBottom": 16,
        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}],
        "strokes": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}],
        "children": []
    }));

    assert_eq!(root.kind, FxUiKind::Box);
    assert_eq!(root.comment.as_deref(), Some("Card"));
    assert_eq!(
        names(&root),
        vec!["CornerRadius", "BorderBrush", "BorderThickness", "Background", "Padding"]
    );
    assert_eq!(root.get("CornerRadius"), Some("8"));
    assert_eq!(root.get("BorderBrush"), Some("#80000000"));
    assert_eq!(root.get("Background"), Some("#80FFFFFF"));
    assert_eq!(root.get("Padding"), Some("16"));
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].kind, FxUiKind::StackVertical);
}

/// Tests sizing of nested frames: fixed frames get dimensions, filling
/// frames stretch instead.
#[test]
fn test_nested_frame_sizing() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Page",
        "layoutMode": "VERTICAL",
        "children": [
            {"type": "FRAME", "name": "Fixed", "width": 200, "height": 100, "children": []},
            {
                "type": "FRAME",
                "name": "Fluid",
                "width": 200,
                "height": 100,
                "layoutSizingHorizontal": "FILL",
                "children": []
            }
        ]
    }));

    let fixed = &root.children[0];
    assert_eq!(fixed.kind, FxUiKind::StackVertical);
    assert_eq!(fixed.comment.as_deref(), Some("Fixed container"));
    assert_eq!(names(fixed), vec!["Orientation", "HorizontalAlignment", "Width", "Height"]);
    assert_eq!(fixed.get("HorizontalAlignment"), Some("Left"));

    let fluid = &root.children[1];
    assert_eq!(names(fluid), vec!["Orientation", "Height", "HorizontalAlignment"]);
    assert_eq!(fluid.get("HorizontalAlignment"), Some("Stretch"));
}

/// Tests rectangle colors and mixed corner radii.
#[test]
fn test_rectangle_attributes() {
    let root = build(json!({
        "type": "RECTANGLE",
        "name": "Swatch",
        "width": 48,
        "height": 24,
        "opacity": 0.5,
        "cornerRadius": "Mixed",
        "topLeftRadius": 4,
        "topRightRadius": 4,
        "bottomRightRadius": 0,
        "bottomLeftRadius": 0,
        "fills": [{"type": "SOLID", "opacity": 1.0, "color": {"r": 0.85, "g": 0.85, "b": 0.85}}]
    }));

    assert_eq!(root.kind, FxUiKind::Box);
    assert_eq!(names(&root), vec!["Width", "Height", "Background", "CornerRadius"]);
    assert_eq!(root.get("Background"), Some("#80D9D9D9"));
    assert_eq!(root.get("CornerRadius"), Some("4,4,0,0"));
}

/// Tests text attributes and builtin text rules.
#[test]
fn test_text_attributes() {
    let text = build(json!({
        "type": "TEXT",
        "name": "Title",
        "characters": "Hello & welcome",
        "fontSize": 16,
        "fontWeight": 700,
        "fontName": {"family": "Inter", "style": "Bold"},
        "textAlignHorizontal": "CENTER",
        "layoutSizingHorizontal": "HUG",
        "layoutSizingVertical": "HUG",
        "fills": [{"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}]
    }));

    assert_eq!(text.kind, FxUiKind::TextLeaf);
    assert_eq!(
        names(&text),
        vec!["Text", "FontFamily", "FontSize", "FontWeight", "TextAlignment"]
    );
    assert_eq!(text.get("Text"), Some("Hello & welcome"));
    assert_eq!(text.get("FontFamily"), Some("Inter"));
    assert_eq!(text.get("FontSize"), Some("16"));
    assert_eq!(text.get("FontWeight"), Some("Bold"));
    assert_eq!(text.get("TextAlignment"), Some("Center"));
}

/// Tests that default fonts are omitted and fixed-width text wraps.
#[test]
fn test_text_defaults_are_omitted() {
    let text = build(json!({
        "type": "TEXT",
        "name": "Body",
        "width": 180,
        "height": 32,
        "fontSize": 12,
        "fontName": {"family": "Roboto", "style": "Regular"},
        "textAutoResize": "HEIGHT",
        "fills": [{"type": "SOLID", "color": {"r": 1, "g": 0, "b": 0}}]
    }));

    assert_eq!(text.get("Text"), Some("Body"));
    assert_eq!(text.get("FontFamily"), None);
    assert_eq!(text.get("FontSize"), None);
    assert_eq!(text.get("Foreground"), Some("#FF0000"));
    assert_eq!(text.get("Width"), Some("180"));
    assert_eq!(text.get("TextWrapping"), Some("Wrap"));
}

/// Tests that unknown node types degrade to a placeholder.
#[test]
fn test_unknown_node_degrades() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Holder",
        "layoutMode": "VERTICAL",
        "children": [{"type": "STAR", "name": "Rating"}, rectangle("A", 10.0)]
    }));

    assert_eq!(root.children.len(), 2);
    let star = &root.children[0];
    assert_eq!(star.kind, FxUiKind::Unknown);
    assert_eq!(star.comment.as_deref(), Some("unsupported node type: STAR"));
    assert!(star.attributes().is_empty());
}

/// Tests that building the same tree twice gives the same result.
#[test]
fn test_build_is_deterministic() {
    let tree = json!({
        "type": "FRAME",
        "name": "Row",
        "layoutMode": "HORIZONTAL",
        "itemSpacing": 4,
        "children": [rectangle("A", 10.0), rectangle("B", 20.0), rectangle("C", 30.0)]
    });
    assert_eq!(build(tree.clone()), build(tree.clone()));
    assert_eq!(build(tree.clone()).to_json(), build(tree).to_json());
}

/// Tests that anchors outside the declared tracks fall back to row-major
/// placement and that spans are clipped to the remaining tracks.
#[test]
fn test_out_of_range_grid_anchors_are_ignored() {
    let mut far = rectangle("Far", 10.0);
    far["gridColumnAnchorIndex"] = json!(1e20);
    far["gridRowAnchorIndex"] = json!(0);
    far["gridColumnSpan"] = json!(2);

    let mut negative = rectangle("Negative", 10.0);
    negative["gridColumnAnchorIndex"] = json!(-3);
    negative["gridRowAnchorIndex"] = json!(-3);
    negative["gridColumnSpan"] = json!(1e300);

    let root = build(json!({
        "type": "FRAME",
        "name": "Column",
        "layoutMode": "GRID",
        "gridColumnSizes": [{"type": "FLEX", "value": 1}],
        "children": [far, negative]
    }));

    assert_eq!(root.columns, vec!["*"]);
    let far = &root.children[0];
    assert_eq!(far.get("Grid.Row"), Some("0"));
    assert_eq!(far.get("Grid.Column"), Some("0"));
    assert_eq!(far.get("Grid.ColumnSpan"), None);

    let negative = &root.children[1];
    assert_eq!(negative.get("Grid.Row"), Some("1"));
    assert_eq!(negative.get("Grid.Column"), Some("0"));
    assert_eq!(negative.get("Grid.ColumnSpan"), None);
}

/// Tests that wrong-typed layout fields fall back to their defaults.
#[test]
fn test_malformed_layout_fields_degrade() {
    let root = build(json!({
        "type": "FRAME",
        "name": "Odd",
        "layoutMode": "VERTICAL",
        "itemSpacing": "wide",
        "cornerRadius": "round",
        "children": [rectangle("A", 10.0), rectangle("B", 10.0)]
    }));
    assert_eq!(root.kind, FxUiKind::StackVertical);
    assert!(!root.has("CornerRadius"));
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[1].get("Margin"), None);

    let root = build(json!({
        "type": "FRAME",
        "name": "Bare",
        "layoutMode": "GRID",
        "gridRowGap": "none",
        "children": [rectangle("A", 10.0), rectangle("B", 10.0)]
    }));
    assert_eq!(root.kind, FxUiKind::GridContainer);
    assert!(root.rows.is_empty());
    assert!(root.columns.is_empty());
    assert_eq!(root.children[1].get("Grid.Row"), Some("0"));
    assert_eq!(root.children[1].get("Grid.Column"), Some("1"));
    assert_eq!(root.children[1].get("Margin"), None);
}

fn grid_number() -> impl Strategy<Value = f64> {
    prop_oneof![-3.0..6.0f64, Just(1e20), Just(-1e20), any::<f64>()]
}

fn grid_cell() -> impl Strategy<Value = Value> {
    (
        prop::option::of(grid_number()),
        prop::option::of(grid_number()),
        prop::option::of(grid_number()),
        prop::option::of(grid_number()),
    )
        .prop_map(|(row, column, row_span, column_span)| {
            let mut cell = rectangle("Cell", 10.0);
            for (key, value) in [
                ("gridRowAnchorIndex", row),
                ("gridColumnAnchorIndex", column),
                ("gridRowSpan", row_span),
                ("gridColumnSpan", column_span),
            ] {
                if let Some(value) = value {
                    cell[key] = json!(value);
                }
            }
            cell
        })
}

fn grid_frame() -> impl Strategy<Value = Value> {
    (0usize..4, 0usize..4, prop::collection::vec(grid_cell(), 1..5), grid_number()).prop_map(
        |(rows, columns, children, gap)| {
            let track = json!({"type": "FLEX", "value": 1});
            let mut frame = Map::new();
            frame.insert("type".into(), json!("FRAME"));
            frame.insert("name".into(), json!("Board"));
            frame.insert("layoutMode".into(), json!("GRID"));
            frame.insert("gridRowGap".into(), json!(gap));
            frame.insert("gridColumnGap".into(), json!(gap));
            if rows > 0 {
                frame.insert("gridRowSizes".into(), Value::Array(vec![track.clone(); rows]));
            }
            if columns > 0 {
                frame.insert("gridColumnSizes".into(), Value::Array(vec![track; columns]));
            }
            frame.insert("children".into(), Value::Array(children));
            Value::Object(frame)
        },
    )
}

fn track_attribute(node: &FxUiNode, name: &str) -> Option<usize> {
    node.get(name).map(|value| value.parse().unwrap())
}

proptest! {
    /// Every cell of a native grid lands inside the declared columns,
    /// whatever its anchors and spans say.
    #[test]
    fn test_native_grid_cells_stay_in_bounds(tree in grid_frame()) {
        let child_count = tree["children"].as_array().map_or(0, Vec::len);
        let root = build(tree);
        prop_assert_eq!(root.children.len(), child_count);

        let columns = root.columns.len();
        for cell in &root.children {
            let column = track_attribute(cell, "Grid.Column");
            prop_assert!(column.is_some());
            prop_assert!(track_attribute(cell, "Grid.Row").is_some());
            if columns > 0 {
                let column = column.unwrap_or_default();
                let span = track_attribute(cell, "Grid.ColumnSpan").unwrap_or(1);
                prop_assert!(column < columns);
                prop_assert!(column + span <= columns);
            }
        }
    }
}
