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


use std::cmp::Ordering;

use crate::errors::{FxError, Result};
use crate::rules::context::FxRuleContext;
use crate::rules::ir::{FxArithOp, FxCompareOp, FxExpr, FxUnaryOp, FxValue};

/// Evaluates `expr` against `context`.
///
/// `source` is only used to label errors. `and`/`or` short-circuit and
/// return the deciding operand, like their scripting-language counterparts.
pub fn evaluate(expr: &FxExpr, context: &FxRuleContext, source: &str) -> Result<FxValue> {
    let fail = |message: String| FxError::expression(source, message);

    match expr {
        FxExpr::Literal(value) => Ok(value.clone()),
        FxExpr::Variable(name) => context
            .get(name)
            .cloned()
            .ok_or_else(|| fail(format!("name '{}' is not defined", name))),
        FxExpr::List(items) => items
            .iter()
            .map(|item| evaluate(item, context, source))
            .collect::<Result<Vec<_>>>()
            .map(FxValue::List),
        FxExpr::Unary(FxUnaryOp::Not, operand) => {
            Ok(FxValue::Bool(!evaluate(operand, context, source)?.is_truthy()))
        }
        FxExpr::Unary(FxUnaryOp::Negate, operand) => {
            let value = evaluate(operand, context, source)?;
            value
                .as_number()
                .map(|number| FxValue::Number(-number))
                .ok_or_else(|| fail(format!("bad operand type for unary -: '{}'", value.type_name())))
        }
        FxExpr::Arith(op, left, right) => {
            let left = evaluate(left, context, source)?;
            let right = evaluate(right, context, source)?;
            arithmetic(*op, &left, &right).map_err(fail)
        }
        FxExpr::Compare(first, rest) => {
            let mut left = evaluate(first, context, source)?;
            for (op, operand) in rest {
                let right = evaluate(operand, context, source)?;
                if !compare(*op, &left, &right).map_err(fail)? {
                    return Ok(FxValue::Bool(false));
                }
                left = right;
            }
            Ok(FxValue::Bool(true))
        }
        FxExpr::And(left, right) => {
            let left = evaluate(left, context, source)?;
            if !left.is_truthy() {
                return Ok(left);
            }
            evaluate(right, context, source)
        }
        FxExpr::Or(left, right) => {
            let left = evaluate(left, context, source)?;
            if left.is_truthy() {
                return Ok(left);
            }
            evaluate(right, context, source)
        }
    }
}

fn arithmetic(op: FxArithOp, left: &FxValue, right: &FxValue) -> std::result::Result<FxValue, String> {
    match (op, left, right) {
        (FxArithOp::Add, FxValue::Str(a), FxValue::Str(b)) => return Ok(FxValue::Str(format!("{}{}", a, b))),
        (FxArithOp::Add, FxValue::List(a), FxValue::List(b)) => {
            return Ok(FxValue::List(a.iter().chain(b).cloned().collect()));
        }
        _ => {}
    }

    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(format!(
            "unsupported operand types for {:?}: '{}' and '{}'",
            op,
            left.type_name(),
            right.type_name()
        ));
    };

    let value = match op {
        FxArithOp::Add => a + b,
        FxArithOp::Subtract => a - b,
        FxArithOp::Multiply => a * b,
        FxArithOp::Divide => {
            if b == 0.0 {
                return Err("division by zero".to_string());
            }
            a / b
        }
        FxArithOp::Modulo => {
            if b == 0.0 {
                return Err("modulo by zero".to_string());
            }
            a - b * (a / b).floor()
        }
    };
    Ok(FxValue::Number(value))
}

fn compare(op: FxCompareOp, left: &FxValue, right: &FxValue) -> std::result::Result<bool, String> {
    match op {
        FxCompareOp::Equal => Ok(loose_equal(left, right)),
        FxCompareOp::NotEqual => Ok(!loose_equal(left, right)),
        FxCompareOp::Less => ordering(left, right).map(|ord| ord == Ordering::Less),
        FxCompareOp::LessEqual => ordering(left, right).map(|ord| ord != Ordering::Greater),
        FxCompareOp::Greater => ordering(left, right).map(|ord| ord == Ordering::Greater),
        FxCompareOp::GreaterEqual => ordering(left, right).map(|ord| ord != Ordering::Less),
        FxCompareOp::In => contains(right, left),
        FxCompareOp::NotIn => contains(right, left).map(|found| !found),
        FxCompareOp::Is => Ok(identical(left, right)),
        FxCompareOp::IsNot => Ok(!identical(left, right)),
    }
}

/// Equality where numbers and booleans compare numerically and mismatched
/// types are simply unequal.
pub fn loose_equal(left: &FxValue, right: &FxValue) -> bool {
    match (left, right) {
        (FxValue::Null, FxValue::Null) => true,
        (FxValue::Str(a), FxValue::Str(b)) => a == b,
        (FxValue::List(a), FxValue::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loose_equal(x, y))
        }
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn identical(left: &FxValue, right: &FxValue) -> bool {
    match (left, right) {
        (FxValue::Null, FxValue::Null) => true,
        (FxValue::Bool(a), FxValue::Bool(b)) => a == b,
        (FxValue::Number(a), FxValue::Number(b)) => a == b,
        (FxValue::Str(a), FxValue::Str(b)) => a == b,
        _ => false,
    }
}

fn ordering(left: &FxValue, right: &FxValue) -> std::result::Result<Ordering, String> {
    let unsupported = || {
        format!(
            "ordering not supported between '{}' and '{}'",
            left.type_name(),
            right.type_name()
        )
    };

    match (left, right) {
        (FxValue::Str(a), FxValue::Str(b)) => Ok(a.cmp(b)),
        (FxValue::List(a), FxValue::List(b)) => {
            for (x, y) in a.iter().zip(b) {
                if !loose_equal(x, y) {
                    return ordering(x, y);
                }
            }
            Ok(a.len().cmp(&b.len()))
        }
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).ok_or_else(unsupported),
            _ => Err(unsupported()),
        },
    }
}

fn contains(container: &FxValue, item: &FxValue) -> std::result::Result<bool, String> {
    match (container, item) {
        (FxValue::List(items), _) => Ok(items.iter().any(|candidate| loose_equal(candidate, item))),
        (FxValue::Str(haystack), FxValue::Str(needle)) => Ok(haystack.contains(needle.as_str())),
        (FxValue::Str(_), other) => Err(format!(
            "'in <string>' requires string as left operand, not {}",
            other.type_name()
        )),
        (other, _) => Err(format!("argument of type '{}' is not iterable", other.type_name())),
    }
}
