//! Arithmetic evaluation of numeric config values
//!
//! Supports integer and float literals (with `_` separators), unary `+`/`-`,
//! binary `+ - * / // % **` and parentheses. `/` always produces a float,
//! `//` and `%` round towards negative infinity, and `**` is right-associative.

use crate::error::ExprError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of evaluating a config expression.
///
/// Keeps the integer/float distinction so values are written back the way
/// they were configured (`1000` stays `1000`, `1400.0` stays `1400.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// The integer value, or `None` for floats
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(i) => Some(i),
            Number::Float(_) => None,
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Evaluate an arithmetic expression
pub fn evaluate(input: &str) -> Result<Number, ExprError> {
    let mut parser = Parser { input: input.as_bytes(), pos: 0 };
    let value = parser.expr()?;
    parser.skip_whitespace();
    if parser.pos < parser.input.len() {
        return Err(ExprError::TrailingInput(parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.input.get(self.pos).copied()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.input[self.pos..].starts_with(token.as_bytes()) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Number, ExprError> {
        let mut value = self.term()?;
        loop {
            if self.eat("+") {
                value = add(value, self.term()?)?;
            } else if self.eat("-") {
                value = sub(value, self.term()?)?;
            } else {
                return Ok(value);
            }
        }
    }

    // term := factor (('*' | '/' | '//' | '%') factor)*
    fn term(&mut self) -> Result<Number, ExprError> {
        let mut value = self.factor()?;
        loop {
            // `//` must be tried before `/`
            if self.eat("*") {
                value = mul(value, self.factor()?)?;
            } else if self.eat("//") {
                value = floor_div(value, self.factor()?)?;
            } else if self.eat("/") {
                value = true_div(value, self.factor()?)?;
            } else if self.eat("%") {
                value = modulo(value, self.factor()?)?;
            } else {
                return Ok(value);
            }
        }
    }

    // factor := ('+' | '-') factor | power
    fn factor(&mut self) -> Result<Number, ExprError> {
        if self.eat("-") {
            return negate(self.factor()?);
        }
        if self.eat("+") {
            return self.factor();
        }
        self.power()
    }

    // power := atom ('**' factor)?
    fn power(&mut self) -> Result<Number, ExprError> {
        let base = self.atom()?;
        if self.eat("**") {
            let exponent = self.factor()?;
            return pow(base, exponent);
        }
        Ok(base)
    }

    // atom := number | '(' expr ')'
    fn atom(&mut self) -> Result<Number, ExprError> {
        match self.peek() {
            None => Err(ExprError::UnexpectedEnd),
            Some(b'(') => {
                self.pos += 1;
                let value = self.expr()?;
                if !self.eat(")") {
                    return match self.peek() {
                        None => Err(ExprError::UnexpectedEnd),
                        Some(c) => Err(ExprError::UnexpectedChar(c as char)),
                    };
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(_) => {
                let c = std::str::from_utf8(&self.input[self.pos..])
                    .ok()
                    .and_then(|s| s.chars().next())
                    .unwrap_or('?');
                Err(ExprError::UnexpectedChar(c))
            }
        }
    }

    fn number(&mut self) -> Result<Number, ExprError> {
        let start = self.pos;
        let mut is_float = false;

        while let Some(&c) = self.input.get(self.pos) {
            match c {
                b'0'..=b'9' | b'_' => self.pos += 1,
                b'.' => {
                    is_float = true;
                    self.pos += 1;
                }
                b'e' | b'E' => {
                    is_float = true;
                    self.pos += 1;
                    if matches!(self.input.get(self.pos), Some(b'+') | Some(b'-')) {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }

        let literal = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        let cleaned = literal.replace('_', "");
        if literal.starts_with('_') || literal.ends_with('_') || literal.contains("__") {
            return Err(ExprError::InvalidLiteral(literal));
        }

        if is_float {
            cleaned
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| ExprError::InvalidLiteral(literal))
        } else {
            match cleaned.parse::<i64>() {
                Ok(i) => Ok(Number::Int(i)),
                Err(e) if matches!(e.kind(), std::num::IntErrorKind::PosOverflow) => Err(ExprError::Overflow),
                Err(_) => Err(ExprError::InvalidLiteral(literal)),
            }
        }
    }
}

fn negate(a: Number) -> Result<Number, ExprError> {
    match a {
        Number::Int(i) => i.checked_neg().map(Number::Int).ok_or(ExprError::Overflow),
        Number::Float(f) => Ok(Number::Float(-f)),
    }
}

fn add(a: Number, b: Number) -> Result<Number, ExprError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.checked_add(y).map(Number::Int).ok_or(ExprError::Overflow),
        _ => Ok(Number::Float(a.as_f64() + b.as_f64())),
    }
}

fn sub(a: Number, b: Number) -> Result<Number, ExprError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.checked_sub(y).map(Number::Int).ok_or(ExprError::Overflow),
        _ => Ok(Number::Float(a.as_f64() - b.as_f64())),
    }
}

fn mul(a: Number, b: Number) -> Result<Number, ExprError> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.checked_mul(y).map(Number::Int).ok_or(ExprError::Overflow),
        _ => Ok(Number::Float(a.as_f64() * b.as_f64())),
    }
}

fn true_div(a: Number, b: Number) -> Result<Number, ExprError> {
    if b.as_f64() == 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    Ok(Number::Float(a.as_f64() / b.as_f64()))
}

fn floor_div(a: Number, b: Number) -> Result<Number, ExprError> {
    match (a, b) {
        (Number::Int(_), Number::Int(0)) => Err(ExprError::DivisionByZero),
        (Number::Int(x), Number::Int(y)) => {
            let q = x.checked_div(y).ok_or(ExprError::Overflow)?;
            let floored = if (x % y != 0) && ((x < 0) != (y < 0)) { q - 1 } else { q };
            Ok(Number::Int(floored))
        }
        _ => {
            if b.as_f64() == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Ok(Number::Float((a.as_f64() / b.as_f64()).floor()))
        }
    }
}

fn modulo(a: Number, b: Number) -> Result<Number, ExprError> {
    match (a, b) {
        (Number::Int(_), Number::Int(0)) => Err(ExprError::DivisionByZero),
        (Number::Int(x), Number::Int(y)) => {
            let r = x.checked_rem(y).ok_or(ExprError::Overflow)?;
            let floored = if r != 0 && ((r < 0) != (y < 0)) { r + y } else { r };
            Ok(Number::Int(floored))
        }
        _ => {
            let (x, y) = (a.as_f64(), b.as_f64());
            if y == 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Ok(Number::Float(x - y * (x / y).floor()))
        }
    }
}

fn pow(base: Number, exponent: Number) -> Result<Number, ExprError> {
    match (base, exponent) {
        (Number::Int(x), Number::Int(e)) if e >= 0 => {
            let e = u32::try_from(e).map_err(|_| ExprError::Overflow)?;
            x.checked_pow(e).map(Number::Int).ok_or(ExprError::Overflow)
        }
        _ => {
            if base.as_f64() == 0.0 && exponent.as_f64() < 0.0 {
                return Err(ExprError::DivisionByZero);
            }
            Ok(Number::Float(base.as_f64().powf(exponent.as_f64())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(evaluate("2024"), Ok(Number::Int(2024)));
        assert_eq!(evaluate("  1_000_000 "), Ok(Number::Int(1_000_000)));
        assert_eq!(evaluate("0.23"), Ok(Number::Float(0.23)));
        assert_eq!(evaluate("1e3"), Ok(Number::Float(1000.0)));
    }

    #[test]
    fn test_display_keeps_kind() {
        assert_eq!(Number::Int(1000).to_string(), "1000");
        assert_eq!(Number::Float(1400.0).to_string(), "1400.0");
        assert_eq!(Number::Float(512.5).to_string(), "512.5");
        assert_eq!(evaluate("1_200 * 14 / 12").unwrap().to_string(), "1400.0");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(Number::Int(14)));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(Number::Int(20)));
        assert_eq!(evaluate("-2 ** 2"), Ok(Number::Int(-4)));
        assert_eq!(evaluate("2 ** 3 ** 2"), Ok(Number::Int(512)));
        assert_eq!(evaluate("2 ** -1"), Ok(Number::Float(0.5)));
        assert_eq!(evaluate("1000 * 12 - 500"), Ok(Number::Int(11_500)));
    }

    #[test]
    fn test_division_kinds() {
        assert_eq!(evaluate("7 / 2"), Ok(Number::Float(3.5)));
        assert_eq!(evaluate("6 / 2"), Ok(Number::Float(3.0)));
        assert_eq!(evaluate("7 // 2"), Ok(Number::Int(3)));
        assert_eq!(evaluate("-7 // 2"), Ok(Number::Int(-4)));
        assert_eq!(evaluate("-7 % 3"), Ok(Number::Int(2)));
        assert_eq!(evaluate("7 % -3"), Ok(Number::Int(-2)));
        assert_eq!(evaluate("7.5 // 2"), Ok(Number::Float(3.0)));
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate(""), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("1 / 0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("1 // 0"), Err(ExprError::DivisionByZero));
        assert_eq!(evaluate("abc"), Err(ExprError::UnexpectedChar('a')));
        assert_eq!(evaluate("(1 + 2"), Err(ExprError::UnexpectedEnd));
        assert_eq!(evaluate("1 2"), Err(ExprError::TrailingInput(2)));
        assert_eq!(evaluate("9223372036854775807 + 1"), Err(ExprError::Overflow));
        assert!(matches!(evaluate("range(23, 68)"), Err(ExprError::UnexpectedChar('r'))));
    }
}
