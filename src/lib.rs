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

//! # Figx Core Library
//!
//! Figx turns scene graphs exported from a design tool into desktop UI
//! markup. It works in two stages: a compressor that reduces every node to
//! the attributes that differ from their defaults, and a layout mapper that
//! turns the compressed tree into a UI tree of stacks, wrap panels, grids,
//! boxes and text blocks.
//!
//! ## Module Overview
//!
//! - **node**: `FxSceneNode`, the JSON-backed scene node
//! - **defaults**: per-type and global attribute defaults
//! - **compress**: default elision, paint compression, compressed documents
//! - **metrics**: attribute counts before and after compression
//! - **rules**: the layout rule engine and its expression language
//! - **ast**: the UI tree and the builder that produces it
//! - **render**: XAML emission
//! - **pipeline**: end-to-end conversion of input documents
//!
//! ## Feature Flags
//!
//! - `parallel`: converts independent top-level trees on the Rayon pool
//! - `full`: enables all features
//!
//! ## Quick Start
//!
//! ```rust
//! use figx::FxConverter;
//!
//! let input = r#"[{"type": "FRAME", "name": "Card", "width": 320, "height": 200,
//!                  "layoutMode": "VERTICAL", "children": []}]"#;
//!
//! let converter = FxConverter::builtin().unwrap();
//! let controls = converter.convert(input).unwrap();
//! println!("{}", controls[0].markup);
//! ```
//!
//! ## Error Handling
//!
//! Only configuration loading and input decoding return `Result<T, FxError>`.
//! Compression and tree building always succeed; problems inside a tree are
//! logged through the `log` facade and degrade to placeholders or omitted
//! attributes.

pub mod errors;
pub mod node;
pub mod defaults;
pub mod compress;
pub mod metrics;
pub mod rules;
pub mod ast;
pub mod render;
pub mod pipeline;

pub use errors::{FxError, Result};
pub use node::{FxAttributes, FxNodeKind, FxSceneNode};
pub use defaults::FxDefaultTable;
pub use compress::{FxCompressedDocument, FxCompressor, FxDocumentMetadata};
pub use metrics::FxCompressionMetrics;
pub use rules::{FxContainerDecision, FxContainerType, FxOrientation, FxRuleContext, FxRuleEngine, FxValue};
pub use ast::{FxAstBuilder, FxBuildContext, FxParentLayout, FxUiKind, FxUiNode};
pub use render::{FxRenderOptions, FxXamlRenderer};
pub use pipeline::{FxConvertedControl, FxConverter, FxInputDocument};
