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

//! # Figx Rule Module
//!
//! Externally configurable layout rules. The builder asks this module which
//! container a frame becomes, how alignment values map, whether a sizing mode
//! sets an explicit dimension, and which extra attributes a control gets.
//!
//! Conditions and template placeholders use a small expression language
//! interpreted over a [`FxRuleContext`]. Expressions can only read context
//! variables; there is no function call, attribute access or assignment
//! syntax, so configuration cannot execute code.
//!
//! ## Example
//!
//! ```rust
//! use figx::rules::{FxRuleContext, FxRuleEngine};
//!
//! let engine = FxRuleEngine::builtin().unwrap();
//! let context = FxRuleContext::new()
//!     .with("layout_mode", "HORIZONTAL")
//!     .with("layout_wrap", "WRAP")
//!     .with("has_fill_child", false)
//!     .with("visible_children_count", 3usize)
//!     .with("primary_axis_align", "MIN");
//!
//! let decision = engine.select_container(&context);
//! assert!(!decision.use_grid);
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod eval;
pub mod ir;
pub mod parser;

pub use config::{
    FxAttributeRule, FxContainerDecision, FxContainerRule, FxContainerType, FxMappingConfig,
    FxOrientation, FxRuleConfig,
};
pub use context::FxRuleContext;
pub use engine::{FxAlignAxis, FxDirection, FxRuleEngine};
pub use eval::evaluate;
pub use ir::{format_number, FxExpr, FxValue};
pub use parser::parse_expression;
