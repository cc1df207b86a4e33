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

//! # AST Builder
//!
//! Turns compressed scene nodes into a [`FxUiNode`] tree in a single
//! recursive pass. Parent-to-child information (spacing, axis, first-child
//! and fill-column flags) travels in a [`FxBuildContext`] argument; scene
//! nodes are never modified.
//!
//! ## Frames
//!
//! A frame becomes a layout container chosen by the rule engine:
//!
//! - vertical or horizontal stack
//! - wrap container
//! - native grid with explicit tracks and anchored cells
//! - synthetic grid, used for a horizontal layout whose child fills the
//!   remaining width (one column per child) or whose items are spread apart
//!   (`Auto,*,Auto`)
//!
//! The container is wrapped in a `Box` only when the frame has a border,
//! rounded corners, a background or padding.
//!
//! ## Failure Behaviour
//!
//! Building never fails. Unknown node types become `Unknown` placeholders
//! and missing attributes fall back to their defaults.

use crate::ast::context::{FxBuildContext, FxParentLayout};
use crate::ast::style;
use crate::ast::ui_node::{FxUiKind, FxUiNode};
use crate::node::{FxNodeKind, FxSceneNode};
use crate::rules::config::{FxContainerDecision, FxContainerType, FxOrientation};
use crate::rules::context::FxRuleContext;
use crate::rules::engine::{FxAlignAxis, FxDirection, FxRuleEngine};
use crate::rules::ir::{format_number, FxValue};

const SPACE_BETWEEN_TRACKS: [&str; 3] = ["Auto", "*", "Auto"];
const DEFAULT_FONT_FAMILIES: [&str; 2] = ["Segoe UI", "Roboto"];
const DEFAULT_FONT_SIZE: f64 = 12.0;
const BOLD_WEIGHT: f64 = 700.0;

/// Layout inputs read from a frame, with design-tool defaults applied.
struct FrameLayout<'n> {
    name: &'n str,
    layout_mode: &'n str,
    layout_wrap: &'n str,
    sizing_horizontal: &'n str,
    sizing_vertical: &'n str,
    layout_align: &'n str,
    item_spacing: f64,
    counter_axis_align: &'n str,
    primary_axis_align: &'n str,
    visible_children: Vec<&'n FxSceneNode>,
}

impl<'n> FrameLayout<'n> {
    fn read(node: &'n FxSceneNode) -> Self {
        FrameLayout {
            name: node.name().unwrap_or("Frame"),
            layout_mode: node.str_or("layoutMode", "NONE"),
            layout_wrap: node.str_or("layoutWrap", "NO_WRAP"),
            sizing_horizontal: node.str_or("layoutSizingHorizontal", "FIXED"),
            sizing_vertical: node.str_or("layoutSizingVertical", "FIXED"),
            layout_align: node.str_or("layoutAlign", "INHERIT"),
            item_spacing: node.number_or("itemSpacing", 0.0),
            counter_axis_align: node.str_or("counterAxisAlignItems", "MIN"),
            primary_axis_align: node.str_or("primaryAxisAlignItems", "MIN"),
            visible_children: node.child_nodes().iter().filter(|child| child.is_visible()).collect(),
        }
    }
}

/// Grid geometry shared by all cells of a native grid.
struct NativeGrid {
    row_count: usize,
    column_count: usize,
    row_gap: f64,
    column_gap: f64,
}

/// Builds UI trees from compressed scene nodes.
#[derive(Clone, Copy, Debug)]
pub struct FxAstBuilder<'e> {
    engine: &'e FxRuleEngine,
}

impl<'e> FxAstBuilder<'e> {
    pub fn new(engine: &'e FxRuleEngine) -> Self {
        FxAstBuilder { engine }
    }

    /// Builds the UI tree for `node`. Roots get no explicit size and no
    /// spacing margin.
    pub fn build(&self, node: &FxSceneNode, is_root: bool) -> FxUiNode {
        self.build_with_context(node, is_root, FxBuildContext::root())
    }

    pub fn build_with_context(&self, node: &FxSceneNode, is_root: bool, context: FxBuildContext) -> FxUiNode {
        match node.kind() {
            FxNodeKind::Frame => self.build_frame(node, is_root, context),
            FxNodeKind::Rectangle => self.build_rectangle(node, context),
            FxNodeKind::Text => self.build_text(node, context),
            FxNodeKind::Unknown(tag) => {
                log::warn!("unsupported node type '{}' on '{}'", tag, node.name().unwrap_or(""));
                FxUiNode::new(FxUiKind::Unknown).with_comment(format!("unsupported node type: {}", tag))
            }
        }
    }

    fn build_frame(&self, node: &FxSceneNode, is_root: bool, context: FxBuildContext) -> FxUiNode {
        let layout = FrameLayout::read(node);
        let child_count = layout.visible_children.len();

        let mut has_fill_child = layout
            .visible_children
            .iter()
            .any(|child| child.str_or("layoutSizingHorizontal", "FIXED") == "FILL");
        if is_root && layout.layout_mode == "HORIZONTAL" && child_count > 1 {
            has_fill_child = true;
        }

        let selection_context = FxRuleContext::new()
            .with("layout_mode", layout.layout_mode)
            .with("layout_wrap", layout.layout_wrap)
            .with("has_fill_child", has_fill_child)
            .with("visible_children_count", child_count)
            .with("primary_axis_align", layout.primary_axis_align)
            .with("counter_axis_align", layout.counter_axis_align)
            .with("sizing_horizontal", layout.sizing_horizontal)
            .with("sizing_vertical", layout.sizing_vertical)
            .with("is_root", is_root);
        let decision = self.engine.select_container(&selection_context);

        let mut container = self.create_container(&decision, &layout);
        self.add_tracks(&mut container, &decision, node, &layout, is_root);
        log::debug!(
            "frame '{}' -> {} rows={:?} columns={:?}",
            layout.name,
            container.kind.as_str(),
            container.rows,
            container.columns
        );

        let grid = NativeGrid {
            row_count: container.rows.len(),
            column_count: container.columns.len(),
            row_gap: node.number_or("gridRowGap", 0.0),
            column_gap: node.number_or("gridColumnGap", 0.0),
        };
        let parent_layout = FxParentLayout::from_layout(layout.layout_mode, layout.layout_wrap);

        for (index, child) in layout.visible_children.iter().enumerate() {
            let is_last = index + 1 == child_count;
            let in_fill_column = decision.use_grid
                && (child.str_or("layoutSizingHorizontal", "FIXED") == "FILL" || (is_root && is_last));
            let child_context = FxBuildContext {
                parent_spacing: layout.item_spacing,
                parent_layout,
                is_first_child: index == 0,
                in_fill_column,
            };

            let mut child_ui = self.build_with_context(child, false, child_context);
            if decision.use_grid_layout {
                place_in_native_grid(&mut child_ui, child, index, &grid);
            } else if decision.use_grid {
                place_in_synthetic_grid(&mut child_ui, &decision, index, child_count);
            }
            container.add_child(child_ui);
        }

        let corner_radius = style::corner_radius_string(node);
        let border_brush = style::border_color(node);
        let background = style::background_color(node);
        let padding = style::padding_string(node);
        let needs_wrapper =
            corner_radius.is_some() || border_brush.is_some() || background.is_some() || padding.is_some();

        let mut result = if needs_wrapper {
            let mut wrapper = FxUiNode::new(FxUiKind::Box).with_comment(layout.name);
            wrapper.set_attribute("CornerRadius", corner_radius);
            if let Some(brush) = border_brush {
                wrapper.set("BorderBrush", brush);
                wrapper.set("BorderThickness", "1");
            }
            self.apply_frame_size(&mut wrapper, node, &layout, is_root, context);
            wrapper.set_attribute("Background", background);
            wrapper.set_attribute("Padding", padding);
            wrapper.add_child(container);
            wrapper
        } else {
            container.comment = Some(format!("{} container", layout.name));
            self.apply_frame_size(&mut container, node, &layout, is_root, context);
            container
        };

        if !is_root {
            result.set_attribute("Margin", style::spacing_margin(&context));
        }
        self.apply_attribute_rules(&mut result, node, context);
        result
    }

    fn create_container(&self, decision: &FxContainerDecision, layout: &FrameLayout<'_>) -> FxUiNode {
        let orientation = decision.orientation_or_default();
        let fills_horizontally = self.stretches_horizontally(layout.sizing_horizontal, layout.layout_align);
        let fills_vertically = self.engine.should_stretch(layout.sizing_vertical) || layout.layout_align == "STRETCH";

        match decision.container_type {
            FxContainerType::StackPanel | FxContainerType::Unknown => {
                let (kind, label) = match orientation {
                    FxOrientation::Vertical => (FxUiKind::StackVertical, "Vertical"),
                    FxOrientation::Horizontal => (FxUiKind::StackHorizontal, "Horizontal"),
                };
                let mut stack = FxUiNode::new(kind);
                stack.set("Orientation", label);

                if orientation == FxOrientation::Vertical && !fills_horizontally {
                    stack.set(
                        "HorizontalAlignment",
                        self.engine
                            .alignment(FxAlignAxis::Counter, layout.counter_axis_align, FxDirection::Horizontal),
                    );
                }
                if orientation == FxOrientation::Horizontal && !fills_vertically {
                    stack.set(
                        "VerticalAlignment",
                        self.engine
                            .alignment(FxAlignAxis::Counter, layout.counter_axis_align, FxDirection::Vertical),
                    );
                }
                stack
            }
            FxContainerType::WrapPanel => {
                let mut wrap = FxUiNode::new(FxUiKind::WrapContainer);
                wrap.set(
                    "Orientation",
                    match orientation {
                        FxOrientation::Vertical => "Vertical",
                        FxOrientation::Horizontal => "Horizontal",
                    },
                );
                wrap.set(
                    "HorizontalAlignment",
                    self.engine
                        .alignment(FxAlignAxis::Primary, layout.primary_axis_align, FxDirection::Horizontal),
                );
                wrap.set(
                    "VerticalAlignment",
                    self.engine
                        .alignment(FxAlignAxis::Counter, layout.counter_axis_align, FxDirection::Vertical),
                );
                wrap
            }
            FxContainerType::Grid => {
                let mut grid = FxUiNode::new(FxUiKind::GridContainer);
                if decision.space_between {
                    let tracks = SPACE_BETWEEN_TRACKS.iter().map(|track| track.to_string()).collect();
                    match orientation {
                        FxOrientation::Horizontal => grid.columns = tracks,
                        FxOrientation::Vertical => grid.rows = tracks,
                    }
                }
                grid
            }
        }
    }

    fn add_tracks(
        &self,
        container: &mut FxUiNode,
        decision: &FxContainerDecision,
        node: &FxSceneNode,
        layout: &FrameLayout<'_>,
        is_root: bool,
    ) {
        if decision.use_grid_layout {
            container.rows = native_tracks(node, "gridRowSizes");
            container.columns = native_tracks(node, "gridColumnSizes");
        } else if decision.use_grid && !decision.space_between {
            let last = layout.visible_children.len().saturating_sub(1);
            container.columns = layout
                .visible_children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    let is_fill = child.str_or("layoutSizingHorizontal", "FIXED") == "FILL";
                    if is_fill || (is_root && index == last) {
                        "*".to_string()
                    } else {
                        "Auto".to_string()
                    }
                })
                .collect();
        }
    }

    /// Width, height and stretch of a frame, placed on whichever node the
    /// frame returns.
    fn apply_frame_size(
        &self,
        target: &mut FxUiNode,
        node: &FxSceneNode,
        layout: &FrameLayout<'_>,
        is_root: bool,
        context: FxBuildContext,
    ) {
        let stretches = self.stretches_horizontally(layout.sizing_horizontal, layout.layout_align);
        if !is_root {
            if !stretches && !context.in_fill_column && self.engine.should_set_dimension(layout.sizing_horizontal) {
                target.set_attribute("Width", dimension(node, "width"));
            }
            if !self.engine.should_stretch(layout.sizing_vertical)
                && self.engine.should_set_dimension(layout.sizing_vertical)
            {
                target.set_attribute("Height", dimension(node, "height"));
            }
        }
        if stretches {
            target.set("HorizontalAlignment", "Stretch");
        }
    }

    fn build_rectangle(&self, node: &FxSceneNode, context: FxBuildContext) -> FxUiNode {
        let sizing_horizontal = node.str_or("layoutSizingHorizontal", "FIXED");
        let sizing_vertical = node.str_or("layoutSizingVertical", "FIXED");
        let layout_align = node.str_or("layoutAlign", "INHERIT");
        let stretches = self.stretches_horizontally(sizing_horizontal, layout_align);
        let stretches_vertically = self.engine.should_stretch(sizing_vertical);

        let mut border = FxUiNode::new(FxUiKind::Box).with_comment(node.name().unwrap_or("Rectangle"));

        if !stretches && !context.in_fill_column && self.engine.should_set_dimension(sizing_horizontal) {
            border.set_attribute("Width", dimension(node, "width"));
        }
        if !stretches_vertically && self.engine.should_set_dimension(sizing_vertical) {
            border.set_attribute("Height", dimension(node, "height"));
        }
        if stretches {
            border.set("HorizontalAlignment", "Stretch");
        }
        if stretches_vertically {
            border.set("VerticalAlignment", "Stretch");
        }
        border.set_attribute("Background", style::background_color(node));
        border.set_attribute("CornerRadius", style::corner_radius_string(node));
        border.set_attribute("Margin", style::spacing_margin(&context));

        self.apply_attribute_rules(&mut border, node, context);
        border
    }

    fn build_text(&self, node: &FxSceneNode, context: FxBuildContext) -> FxUiNode {
        let name = node.name().unwrap_or("Text");
        let text = node.str_or("characters", name);

        let mut block = FxUiNode::new(FxUiKind::TextLeaf).with_comment(name);
        block.set("Text", text);

        let font_family = node
            .get("fontName")
            .and_then(|font| font.get("family"))
            .and_then(|family| family.as_str())
            .unwrap_or(DEFAULT_FONT_FAMILIES[0]);
        if !font_family.is_empty() && !DEFAULT_FONT_FAMILIES.contains(&font_family) {
            block.set("FontFamily", font_family);
        }

        let font_size = node.number_or("fontSize", DEFAULT_FONT_SIZE);
        if font_size != 0.0 && font_size != DEFAULT_FONT_SIZE {
            block.set("FontSize", format_number(font_size));
        }

        if node.number_or("fontWeight", 400.0) >= BOLD_WEIGHT {
            block.set("FontWeight", "Bold");
        }

        block.set_attribute("Foreground", style::text_color(node));

        if node.str_or("layoutSizingHorizontal", "FIXED") != "HUG" {
            block.set_attribute("Width", dimension(node, "width"));
        }
        if node.str_or("layoutSizingVertical", "FIXED") != "HUG" {
            block.set_attribute("Height", dimension(node, "height"));
        }
        block.set_attribute("Margin", style::spacing_margin(&context));

        self.apply_attribute_rules(&mut block, node, context);
        block
    }

    /// Fills attributes the builder left unset from the configured
    /// attribute rules of the node's control kind.
    fn apply_attribute_rules(&self, target: &mut FxUiNode, node: &FxSceneNode, context: FxBuildContext) {
        let Some(control) = target.kind.control_name() else {
            return;
        };
        let names = self.engine.attribute_names(control);
        if names.is_empty() {
            return;
        }

        let rule_context = attribute_context(node, context);
        for name in names {
            if target.has(name) {
                continue;
            }
            target.set_attribute(name, self.engine.compute_attribute(control, name, &rule_context));
        }
    }

    fn stretches_horizontally(&self, sizing_mode: &str, layout_align: &str) -> bool {
        self.engine.should_stretch(sizing_mode) || layout_align == "STRETCH"
    }
}

fn native_tracks(node: &FxSceneNode, key: &str) -> Vec<String> {
    node.get(key)
        .and_then(|tracks| tracks.as_array())
        .map(|tracks| tracks.iter().map(style::grid_track).collect())
        .unwrap_or_default()
}

/// Places a child of a native grid and spreads the grid gaps as margins.
///
/// Anchors come from the child when both fall inside the declared tracks,
/// otherwise from row-major order. Spans are clipped to the tracks left
/// after the anchor. Half of each gap goes on either side of an interior
/// edge; the outer edges of the first and last tracks get none.
fn place_in_native_grid(target: &mut FxUiNode, child: &FxSceneNode, index: usize, grid: &NativeGrid) {
    let anchor_row = track_index(child.number("gridRowAnchorIndex"), grid.row_count);
    let anchor_column = track_index(child.number("gridColumnAnchorIndex"), grid.column_count);

    let (row, column) = match (anchor_row, anchor_column) {
        (Some(row), Some(column)) => (row, column),
        _ if grid.column_count > 0 => (index / grid.column_count, index % grid.column_count),
        _ => (0, index),
    };

    target.set("Grid.Row", row.to_string());
    target.set("Grid.Column", column.to_string());

    let row_span = track_span(child.number("gridRowSpan"), row, grid.row_count);
    let column_span = track_span(child.number("gridColumnSpan"), column, grid.column_count);
    if row_span > 1 {
        target.set("Grid.RowSpan", row_span.to_string());
    }
    if column_span > 1 {
        target.set("Grid.ColumnSpan", column_span.to_string());
    }

    let half_column_gap = grid.column_gap / 2.0;
    let half_row_gap = grid.row_gap / 2.0;
    let ends_last_column = grid.column_count > 0 && column.saturating_add(column_span) >= grid.column_count;
    let ends_last_row = grid.row_count > 0 && row.saturating_add(row_span) >= grid.row_count;

    let left = if column > 0 { half_column_gap } else { 0.0 };
    let top = if row > 0 { half_row_gap } else { 0.0 };
    let right = if ends_last_column { 0.0 } else { half_column_gap };
    let bottom = if ends_last_row { 0.0 } else { half_row_gap };

    if left > 0.0 || top > 0.0 || right > 0.0 || bottom > 0.0 {
        target.set("Margin", style::join_sides(left, top, right, bottom));
    }
}

/// A child anchor, if it names an existing track. Without declared tracks
/// any non-negative whole anchor is accepted.
fn track_index(anchor: Option<f64>, track_count: usize) -> Option<usize> {
    let anchor = anchor.filter(|value| value.is_finite() && *value >= 0.0)?.trunc();
    if track_count > 0 && anchor >= track_count as f64 {
        return None;
    }
    Some(anchor as usize)
}

/// A child span of at least one track, clipped to the tracks after `start`.
fn track_span(span: Option<f64>, start: usize, track_count: usize) -> usize {
    let span = span.filter(|value| value.is_finite()).unwrap_or(1.0).max(1.0) as usize;
    if track_count > start {
        span.min(track_count - start)
    } else {
        span
    }
}

/// Places a child of a synthetic grid. Spread-apart layouts use three
/// tracks: first child, middle children, last child.
fn place_in_synthetic_grid(target: &mut FxUiNode, decision: &FxContainerDecision, index: usize, child_count: usize) {
    if !decision.space_between {
        target.set("Grid.Column", index.to_string());
        return;
    }

    let track = if index == 0 {
        0
    } else if index + 1 == child_count {
        2
    } else {
        1
    };
    let attribute = match decision.orientation_or_default() {
        FxOrientation::Horizontal => "Grid.Column",
        FxOrientation::Vertical => "Grid.Row",
    };
    target.set(attribute, track.to_string());
}

/// Non-zero numeric dimension, formatted.
fn dimension(node: &FxSceneNode, key: &str) -> Option<String> {
    node.number(key).filter(|value| *value != 0.0).map(format_number)
}

fn attribute_context(node: &FxSceneNode, context: FxBuildContext) -> FxRuleContext {
    let line_height = node.get("lineHeight");
    FxRuleContext::new()
        .with("name", node.name().unwrap_or(""))
        .with("sizing_horizontal", node.str_or("layoutSizingHorizontal", "FIXED"))
        .with("sizing_vertical", node.str_or("layoutSizingVertical", "FIXED"))
        .with("layout_align", node.str_or("layoutAlign", "INHERIT"))
        .with("width", node.number("width"))
        .with("height", node.number("height"))
        .with("opacity", node.number_or("opacity", 1.0))
        .with("text_align_horizontal", node.str_or("textAlignHorizontal", "LEFT"))
        .with("text_auto_resize", node.str_or("textAutoResize", "WIDTH_AND_HEIGHT"))
        .with(
            "line_height_unit",
            line_height
                .and_then(|value| value.get("unit"))
                .and_then(|unit| unit.as_str())
                .unwrap_or("AUTO"),
        )
        .with(
            "line_height",
            line_height
                .and_then(|value| value.get("value"))
                .map(FxValue::from_json)
                .unwrap_or(FxValue::Null),
        )
        .with("parent_spacing", context.parent_spacing)
        .with("parent_layout", context.parent_layout.as_str())
        .with("is_first_child", context.is_first_child)
        .with("in_fill_column", context.in_fill_column)
}
