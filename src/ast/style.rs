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

//! # Style Helpers
//!
//! Conversions from scene-node attributes to markup attribute strings:
//! colors, padding, corner radii, margins and grid track sizes.

use serde_json::{Map, Value};

use crate::ast::context::{FxBuildContext, FxParentLayout};
use crate::compress::paint::color_to_hex;
use crate::node::FxSceneNode;
use crate::rules::ir::format_number;

const DEFAULT_FILL: &str = "#FFFFFF";
const DEFAULT_INK: &str = "#000000";

/// Formats a color for markup: `#RRGGBB` when opaque, `#AARRGGBB` otherwise
/// with the alpha channel rounded from `opacity`.
pub fn ui_color(hex: &str, opacity: f64) -> String {
    let digits = hex.trim_start_matches('#').to_uppercase();
    if opacity >= 1.0 {
        return format!("#{}", digits);
    }
    let alpha = (opacity * 255.0).round().clamp(0.0, 255.0) as u8;
    format!("#{:02X}{}", alpha, digits)
}

/// First entry of a paint list as `(hex, composed opacity)`.
///
/// Opacity is node opacity times paint opacity. `fallback_hex` stands in for
/// paints without a solid color.
pub fn first_paint(node: &FxSceneNode, key: &str, fallback_hex: &str) -> Option<(String, f64)> {
    let paint = node.paints(key).into_iter().next()?;
    let hex = paint_hex(paint).unwrap_or_else(|| fallback_hex.to_string());
    let opacity = node.number_or("opacity", 1.0) * paint.get("opacity").and_then(Value::as_f64).unwrap_or(1.0);
    Some((hex, opacity))
}

pub fn background_color(node: &FxSceneNode) -> Option<String> {
    first_paint(node, "fills", DEFAULT_FILL).map(|(hex, opacity)| ui_color(&hex, opacity))
}

pub fn border_color(node: &FxSceneNode) -> Option<String> {
    first_paint(node, "strokes", DEFAULT_INK).map(|(hex, opacity)| ui_color(&hex, opacity))
}

/// Text color, omitted for opaque black.
pub fn text_color(node: &FxSceneNode) -> Option<String> {
    let (hex, opacity) = first_paint(node, "fills", DEFAULT_INK)?;
    let is_default = hex.trim_start_matches('#').eq_ignore_ascii_case("000000") && opacity >= 1.0;
    (!is_default).then(|| ui_color(&hex, opacity))
}

/// `"n"` when all sides match, `"left,top,right,bottom"` otherwise, `None`
/// when there is no padding at all.
pub fn padding_string(node: &FxSceneNode) -> Option<String> {
    let left = node.number_or("paddingLeft", 0.0);
    let top = node.number_or("paddingTop", 0.0);
    let right = node.number_or("paddingRight", 0.0);
    let bottom = node.number_or("paddingBottom", 0.0);

    if [left, top, right, bottom].iter().all(|side| *side == 0.0) {
        return None;
    }
    if left == top && top == right && right == bottom {
        return Some(format_number(left));
    }
    Some(join_sides(left, top, right, bottom))
}

/// Corner radius string, `None` when every corner is square.
///
/// `Mixed` radii are emitted as `top-left,top-right,bottom-right,bottom-left`.
pub fn corner_radius_string(node: &FxSceneNode) -> Option<String> {
    match node.get("cornerRadius") {
        Some(Value::String(mode)) if mode == "Mixed" => {
            let corners = [
                node.number_or("topLeftRadius", 0.0),
                node.number_or("topRightRadius", 0.0),
                node.number_or("bottomRightRadius", 0.0),
                node.number_or("bottomLeftRadius", 0.0),
            ];
            corners.iter().any(|corner| *corner != 0.0).then(|| {
                corners
                    .iter()
                    .map(|corner| format_number(*corner))
                    .collect::<Vec<_>>()
                    .join(",")
            })
        }
        Some(Value::Number(radius)) => radius
            .as_f64()
            .filter(|radius| *radius != 0.0)
            .map(format_number),
        _ => None,
    }
}

/// Margin separating a child from its preceding sibling.
///
/// Wrap containers get half the spacing on all sides; stacks get the full
/// spacing on the leading edge of their axis. The first child gets none.
pub fn spacing_margin(context: &FxBuildContext) -> Option<String> {
    let spacing = context.parent_spacing;
    if spacing <= 0.0 || context.is_first_child {
        return None;
    }
    match context.parent_layout {
        FxParentLayout::Wrap => Some(format_number(spacing / 2.0)),
        FxParentLayout::Vertical => Some(format!("0,{},0,0", format_number(spacing))),
        FxParentLayout::Horizontal => Some(format!("{},0,0,0", format_number(spacing))),
        FxParentLayout::None => None,
    }
}

/// Track size of a native grid row or column.
///
/// `FLEX` tracks become `*` or `n*`, `FIXED` tracks their size, anything
/// else `Auto`.
pub fn grid_track(track: &Value) -> String {
    let kind = track.get("type").and_then(Value::as_str);
    let value = track.get("value").and_then(Value::as_f64);
    match (kind, value) {
        (Some("FLEX"), Some(weight)) if weight != 1.0 => format!("{}*", format_number(weight)),
        (Some("FLEX"), _) => "*".to_string(),
        (Some("FIXED"), Some(size)) => format_number(size),
        _ => "Auto".to_string(),
    }
}

pub fn join_sides(left: f64, top: f64, right: f64, bottom: f64) -> String {
    format!(
        "{},{},{},{}",
        format_number(left),
        format_number(top),
        format_number(right),
        format_number(bottom)
    )
}

fn paint_hex(paint: &Map<String, Value>) -> Option<String> {
    match paint.get("color")? {
        Value::String(hex) => Some(hex.clone()),
        Value::Object(color) => color_to_hex(color),
        _ => None,
    }
}
