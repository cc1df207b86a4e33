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

//! # Rule Expression IR
//!
//! Values and syntax tree of the rule condition language. Expressions can
//! only read variables from a context and combine them with comparison,
//! boolean, membership, null-check and arithmetic operators.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Runtime value of a rule expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FxValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<FxValue>),
}

impl FxValue {
    /// Scripting-style truthiness: null, false, zero and empty values are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            FxValue::Null => false,
            FxValue::Bool(value) => *value,
            FxValue::Number(value) => *value != 0.0,
            FxValue::Str(value) => !value.is_empty(),
            FxValue::List(items) => !items.is_empty(),
        }
    }

    /// Numeric view; booleans count as 0 and 1.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FxValue::Number(value) => Some(*value),
            FxValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FxValue::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FxValue::Null => "None",
            FxValue::Bool(_) => "bool",
            FxValue::Number(_) => "number",
            FxValue::Str(_) => "str",
            FxValue::List(_) => "list",
        }
    }

    /// Converts a JSON value. Objects have no counterpart and become `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null | Value::Object(_) => FxValue::Null,
            Value::Bool(flag) => FxValue::Bool(*flag),
            Value::Number(number) => number.as_f64().map(FxValue::Number).unwrap_or(FxValue::Null),
            Value::String(text) => FxValue::Str(text.clone()),
            Value::Array(items) => FxValue::List(items.iter().map(FxValue::from_json).collect()),
        }
    }
}

/// Integral numbers print without a fractional part, booleans as
/// `True`/`False` and null as `None`.
impl fmt::Display for FxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxValue::Null => write!(f, "None"),
            FxValue::Bool(true) => write!(f, "True"),
            FxValue::Bool(false) => write!(f, "False"),
            FxValue::Number(value) => write!(f, "{}", format_number(*value)),
            FxValue::Str(value) => write!(f, "{}", value),
            FxValue::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    match item {
                        FxValue::Str(text) => write!(f, "'{}'", text)?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "]")
            }
        }
    }
}

/// Formats a number without a trailing `.0` when it is integral.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl From<bool> for FxValue {
    fn from(value: bool) -> Self {
        FxValue::Bool(value)
    }
}

impl From<f64> for FxValue {
    fn from(value: f64) -> Self {
        FxValue::Number(value)
    }
}

impl From<i64> for FxValue {
    fn from(value: i64) -> Self {
        FxValue::Number(value as f64)
    }
}

impl From<usize> for FxValue {
    fn from(value: usize) -> Self {
        FxValue::Number(value as f64)
    }
}

impl From<&str> for FxValue {
    fn from(value: &str) -> Self {
        FxValue::Str(value.to_string())
    }
}

impl From<String> for FxValue {
    fn from(value: String) -> Self {
        FxValue::Str(value)
    }
}

impl<T: Into<FxValue>> From<Option<T>> for FxValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FxValue::Null)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxUnaryOp {
    Not,
    Negate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FxCompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    In,
    NotIn,
    Is,
    IsNot,
}

/// Parsed rule expression.
#[derive(Clone, Debug, PartialEq)]
pub enum FxExpr {
    Literal(FxValue),
    Variable(String),
    List(Vec<FxExpr>),
    Unary(FxUnaryOp, Box<FxExpr>),
    Arith(FxArithOp, Box<FxExpr>, Box<FxExpr>),
    /// Comparison chain `a < b <= c`, true when every adjacent pair holds.
    Compare(Box<FxExpr>, Vec<(FxCompareOp, FxExpr)>),
    And(Box<FxExpr>, Box<FxExpr>),
    Or(Box<FxExpr>, Box<FxExpr>),
}
