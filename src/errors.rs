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

//! # Figx Error Module
//!
//! This module defines the error types and utilities used throughout Figx
//! for consistent error handling and reporting.
//!
//! ## Error Handling Philosophy
//!
//! The compression and layout engines are total: malformed scene nodes
//! degrade to placeholder output instead of failing. Errors therefore only
//! surface at the boundaries of the crate:
//!
//! - **Configuration**: a missing or malformed rule/default table is fatal and
//!   is reported before any node is processed
//! - **Input decoding**: a document that is not JSON, or has no node trees
//! - **Expressions**: parse and evaluation failures inside the rule engine,
//!   which the engine itself downgrades to a non-match
//!
//! ## Error Categories
//!
//! - **Io**: Filesystem errors while reading configuration or input
//! - **Config**: Rule, mapping or default table problems
//! - **Validation**: Input document validation failures
//! - **Expression**: Rule condition or template failures
//! - **Serde**: Serialization/deserialization errors
//! - **Internal**: Unexpected internal failures

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience result type used throughout Figx.
pub type Result<T> = std::result::Result<T, FxError>;

/// Canonical error enumeration for Figx.
#[derive(Debug, Error, Serialize, Deserialize, PartialEq)]
pub enum FxError {
    /// Errors originating from filesystem IO.
    #[error("io error: {0}")]
    Io(String),

    /// A configuration table could not be loaded or understood.
    #[error("config error in '{source_name}': {message}")]
    Config { source_name: String, message: String },

    /// Validation errors triggered by invalid input documents.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A rule expression failed to parse or evaluate.
    #[error("expression '{expression}' failed: {message}")]
    Expression { expression: String, message: String },

    /// Wrapper for serde-style serialization issues.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all variant for unexpected situations.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<io::Error> for FxError {
    fn from(err: io::Error) -> Self {
        FxError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FxError {
    fn from(err: serde_json::Error) -> Self {
        FxError::Serde(err.to_string())
    }
}

impl From<serde_yaml::Error> for FxError {
    fn from(err: serde_yaml::Error) -> Self {
        FxError::Serde(err.to_string())
    }
}

impl FxError {
    /// Helper to construct simple validation errors.
    pub fn validation<T: Into<String>>(message: T) -> Self {
        FxError::Validation {
            message: message.into(),
        }
    }

    /// Helper to construct configuration errors.
    pub fn config(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        FxError::Config {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Helper to construct expression errors.
    pub fn expression(expression: impl Into<String>, message: impl Into<String>) -> Self {
        FxError::Expression {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Helper to construct internal errors.
    pub fn internal<T: Into<String>>(message: T) -> Self {
        FxError::Internal(message.into())
    }
}
