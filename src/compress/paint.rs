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


use serde_json::{Map, Value};

/// Converts a color triplet in `0.0..=1.0` to `#RRGGBB`.
///
/// Channels are rounded independently and clamped to the byte range.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    format!("#{:02X}{:02X}{:02X}", channel(r), channel(g), channel(b))
}

/// Converts a `{r, g, b}` color object to hex. Any alpha channel is ignored.
pub fn color_to_hex(color: &Map<String, Value>) -> Option<String> {
    let r = color.get("r")?.as_f64()?;
    let g = color.get("g")?.as_f64()?;
    let b = color.get("b")?.as_f64()?;
    Some(rgb_to_hex(r, g, b))
}

/// Compresses a single fill, stroke or effect entry.
///
/// `type` is moved to the front; `null`, `visible: true`, `opacity: 1`,
/// `blendMode: NORMAL` and empty `boundVariables` are dropped; color objects
/// become hex strings.
pub fn compress_paint(paint: &Map<String, Value>) -> Map<String, Value> {
    let mut compressed = Map::new();
    if let Some(kind) = paint.get("type") {
        compressed.insert("type".to_string(), kind.clone());
    }

    for (key, value) in paint {
        if key == "type" || value.is_null() {
            continue;
        }

        let is_default = match key.as_str() {
            "visible" => value.as_bool() == Some(true),
            "opacity" => value.as_f64() == Some(1.0),
            "blendMode" => value.as_str() == Some("NORMAL"),
            "boundVariables" => is_empty_collection(value),
            _ => false,
        };
        if is_default {
            continue;
        }

        let converted = match (key.as_str(), value) {
            ("color", Value::Object(color)) => color_to_hex(color).map(Value::String),
            _ => None,
        };
        compressed.insert(key.clone(), converted.unwrap_or_else(|| value.clone()));
    }

    compressed
}

pub(crate) fn is_empty_collection(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
