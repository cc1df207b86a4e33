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


/// Layout of the parent container as seen by a child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FxParentLayout {
    #[default]
    None,
    Vertical,
    Horizontal,
    Wrap,
}

impl FxParentLayout {
    /// Derives the flow a frame imposes on its children. Native grids and
    /// frames without auto-layout impose none.
    pub fn from_layout(layout_mode: &str, layout_wrap: &str) -> Self {
        match (layout_mode, layout_wrap) {
            ("HORIZONTAL", "WRAP") => FxParentLayout::Wrap,
            ("VERTICAL", _) => FxParentLayout::Vertical,
            ("HORIZONTAL", _) => FxParentLayout::Horizontal,
            _ => FxParentLayout::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FxParentLayout::None => "NONE",
            FxParentLayout::Vertical => "VERTICAL",
            FxParentLayout::Horizontal => "HORIZONTAL",
            FxParentLayout::Wrap => "WRAP",
        }
    }
}

/// What a parent tells a child while building it. Passed by value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FxBuildContext {
    pub parent_spacing: f64,
    pub parent_layout: FxParentLayout,
    pub is_first_child: bool,
    /// The child sits in a grid column sized `*`.
    pub in_fill_column: bool,
}

impl FxBuildContext {
    /// Context of a top-level node: no parent, hence no spacing.
    pub fn root() -> Self {
        FxBuildContext {
            is_first_child: true,
            ..FxBuildContext::default()
        }
    }
}
