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

//! # Figx AST Module
//!
//! The UI tree produced from a compressed scene graph, and the builder that
//! produces it. [`FxUiNode`] is plain data: a kind, ordered string
//! attributes, owned children and an optional diagnostic comment. Rendering
//! it to markup lives in [`crate::render`].

pub mod builder;
pub mod context;
pub mod style;
pub mod ui_node;

pub use builder::FxAstBuilder;
pub use context::{FxBuildContext, FxParentLayout};
pub use ui_node::{FxUiKind, FxUiNode};
