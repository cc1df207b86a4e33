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

//! # Rule Expression Parser
//!
//! Tokenizer and recursive-descent parser for rule conditions and template
//! placeholders. The grammar, from lowest to highest precedence:
//!
//! ```text
//! or         := and (("or" | "||") and)*
//! and        := not (("and" | "&&") not)*
//! not        := ("not" | "!") not | comparison
//! comparison := additive (cmp_op additive)*
//! cmp_op     := == | != | < | <= | > | >= | in | not in | is | is not
//! additive   := term (("+" | "-") term)*
//! term       := unary (("*" | "/" | "%") unary)*
//! unary      := "-" unary | primary
//! primary    := number | string | True | False | None | ident
//!             | "(" or ")" | "[" (or ("," or)* ","?)? "]"
//! ```

use crate::errors::{FxError, Result};
use crate::rules::ir::{FxArithOp, FxCompareOp, FxExpr, FxUnaryOp, FxValue};

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    Symbol(&'static str),
}

const SYMBOLS: [&str; 20] = [
    "==", "!=", "<=", ">=", "&&", "||", "<", ">", "+", "-", "*", "/", "%", "(", ")", "[", "]",
    ",", "!", "=",
];

/// Parses a complete expression.
pub fn parse_expression(source: &str) -> Result<FxExpr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        position: 0,
    };
    let expr = parser.parse_or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(parser.error(format!("unexpected token {:?}", token))),
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        let current = chars[index];

        if current.is_whitespace() {
            index += 1;
            continue;
        }

        if current.is_ascii_digit() || (current == '.' && chars.get(index + 1).is_some_and(char::is_ascii_digit)) {
            let start = index;
            while index < chars.len() && (chars[index].is_ascii_digit() || chars[index] == '.') {
                index += 1;
            }
            let text: String = chars[start..index].iter().collect();
            let number = text
                .parse::<f64>()
                .map_err(|_| FxError::expression(source, format!("invalid number '{}'", text)))?;
            tokens.push(Token::Number(number));
            continue;
        }

        if current == '\'' || current == '"' {
            let quote = current;
            let mut text = String::new();
            index += 1;
            loop {
                match chars.get(index) {
                    None => return Err(FxError::expression(source, "unterminated string literal")),
                    Some(&ch) if ch == quote => {
                        index += 1;
                        break;
                    }
                    Some(&'\\') => {
                        if let Some(&escaped) = chars.get(index + 1) {
                            text.push(escaped);
                        }
                        index += 2;
                    }
                    Some(&ch) => {
                        text.push(ch);
                        index += 1;
                    }
                }
            }
            tokens.push(Token::Str(text));
            continue;
        }

        if current.is_alphabetic() || current == '_' {
            let start = index;
            while index < chars.len() && (chars[index].is_alphanumeric() || chars[index] == '_') {
                index += 1;
            }
            tokens.push(Token::Ident(chars[start..index].iter().collect()));
            continue;
        }

        let rest: String = chars[index..chars.len().min(index + 2)].iter().collect();
        match SYMBOLS.iter().find(|symbol| rest.starts_with(**symbol)) {
            Some(&"=") => {
                return Err(FxError::expression(source, "assignment is not allowed, use '=='"));
            }
            Some(symbol) => {
                index += symbol.chars().count();
                tokens.push(Token::Symbol(*symbol));
            }
            None => {
                return Err(FxError::expression(
                    source,
                    format!("unexpected character '{}'", current),
                ));
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    position: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> FxError {
        FxError::expression(self.source, message)
    }

    fn is_symbol(&self, symbol: &str) -> bool {
        matches!(self.peek(), Some(Token::Symbol(found)) if *found == symbol)
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(found)) if found == keyword)
    }

    fn eat_symbol(&mut self, symbol: &str) -> bool {
        if self.is_symbol(symbol) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.is_keyword(keyword) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect_symbol(&mut self, symbol: &str) -> Result<()> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", symbol)))
        }
    }

    fn parse_or(&mut self) -> Result<FxExpr> {
        let mut left = self.parse_and()?;
        while self.eat_keyword("or") || self.eat_symbol("||") {
            let right = self.parse_and()?;
            left = FxExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<FxExpr> {
        let mut left = self.parse_not()?;
        while self.eat_keyword("and") || self.eat_symbol("&&") {
            let right = self.parse_not()?;
            left = FxExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<FxExpr> {
        if self.eat_keyword("not") || self.eat_symbol("!") {
            let operand = self.parse_not()?;
            return Ok(FxExpr::Unary(FxUnaryOp::Not, Box::new(operand)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<FxExpr> {
        let first = self.parse_additive()?;
        let mut rest = Vec::new();

        while let Some(op) = self.comparison_operator() {
            let operand = self.parse_additive()?;
            rest.push((op, operand));
        }

        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(FxExpr::Compare(Box::new(first), rest))
        }
    }

    /// Consumes a comparison operator when one is next.
    fn comparison_operator(&mut self) -> Option<FxCompareOp> {
        let (op, width) = match (self.peek()?, self.peek_at(1)) {
            (Token::Symbol("=="), _) => (FxCompareOp::Equal, 1),
            (Token::Symbol("!="), _) => (FxCompareOp::NotEqual, 1),
            (Token::Symbol("<"), _) => (FxCompareOp::Less, 1),
            (Token::Symbol("<="), _) => (FxCompareOp::LessEqual, 1),
            (Token::Symbol(">"), _) => (FxCompareOp::Greater, 1),
            (Token::Symbol(">="), _) => (FxCompareOp::GreaterEqual, 1),
            (Token::Ident(word), _) if word == "in" => (FxCompareOp::In, 1),
            (Token::Ident(word), Some(Token::Ident(next))) if word == "is" && next == "not" => {
                (FxCompareOp::IsNot, 2)
            }
            (Token::Ident(word), _) if word == "is" => (FxCompareOp::Is, 1),
            (Token::Ident(word), Some(Token::Ident(next))) if word == "not" && next == "in" => {
                (FxCompareOp::NotIn, 2)
            }
            _ => return None,
        };
        self.position += width;
        Some(op)
    }

    fn parse_additive(&mut self) -> Result<FxExpr> {
        let mut left = self.parse_term()?;
        loop {
            let op = if self.eat_symbol("+") {
                FxArithOp::Add
            } else if self.eat_symbol("-") {
                FxArithOp::Subtract
            } else {
                break;
            };
            let right = self.parse_term()?;
            left = FxExpr::Arith(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<FxExpr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.eat_symbol("*") {
                FxArithOp::Multiply
            } else if self.eat_symbol("/") {
                FxArithOp::Divide
            } else if self.eat_symbol("%") {
                FxArithOp::Modulo
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = FxExpr::Arith(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<FxExpr> {
        if self.eat_symbol("-") {
            let operand = self.parse_unary()?;
            return Ok(FxExpr::Unary(FxUnaryOp::Negate, Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<FxExpr> {
        let Some(token) = self.advance() else {
            return Err(self.error("unexpected end of expression"));
        };

        match token {
            Token::Number(value) => Ok(FxExpr::Literal(FxValue::Number(value))),
            Token::Str(text) => Ok(FxExpr::Literal(FxValue::Str(text))),
            Token::Ident(word) => match word.as_str() {
                "True" | "true" => Ok(FxExpr::Literal(FxValue::Bool(true))),
                "False" | "false" => Ok(FxExpr::Literal(FxValue::Bool(false))),
                "None" | "null" => Ok(FxExpr::Literal(FxValue::Null)),
                "and" | "or" | "not" | "in" | "is" => {
                    Err(self.error(format!("unexpected keyword '{}'", word)))
                }
                _ => Ok(FxExpr::Variable(word)),
            },
            Token::Symbol("(") => {
                let inner = self.parse_or()?;
                self.expect_symbol(")")?;
                Ok(inner)
            }
            Token::Symbol("[") => {
                let mut items = Vec::new();
                while !self.is_symbol("]") {
                    items.push(self.parse_or()?);
                    if !self.eat_symbol(",") {
                        break;
                    }
                }
                self.expect_symbol("]")?;
                Ok(FxExpr::List(items))
            }
            Token::Symbol(symbol) => Err(self.error(format!("unexpected '{}'", symbol))),
        }
    }
}
