//! Scalar values
//!
//!     Scripts only know three kinds of scalars: free-form strings (identifiers, file and
//!     potential names), numbers, and the implicit `true` of a bare option flag.
//!
//! Numbers
//!
//!     A numeric literal is either an integer or a decimal. A decimal that is mathematically
//!     integral (`100.0`) is stored as the integer `100`, so it renders back as `100`. This
//!     normalization happens once, in [Number::from_f64], and everything producing numbers
//!     goes through it.
//!
//! Flags
//!
//!     There is no boolean-false. An option that is off is simply absent from its
//!     option-set, so [Value::Flag] is the only boolean there is.

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A numeric literal.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Build a number from a decimal, normalizing integral values to [Number::Int].
    pub fn from_f64(value: f64) -> Self {
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            Number::Int(value as i64)
        } else {
            Number::Float(value)
        }
    }

    /// Parse a numeric literal as written in a script.
    pub fn parse(literal: &str) -> Option<Self> {
        if let Ok(int) = literal.parse::<i64>() {
            return Some(Number::Int(int));
        }
        literal
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Number::from_f64)
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(value) => *value as f64,
            Number::Float(value) => *value,
        }
    }

    pub fn is_integral(&self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(value) => value.fract() == 0.0,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

// Decimals compare by bit pattern; the lexer never produces NaN.
impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Int(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            Number::Float(value) => {
                1u8.hash(state);
                value.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{}", value),
            // Rust prints integral floats without a fractional part and everything else
            // with the shortest representation that parses back to the same value.
            Number::Float(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
    }
}

/// The value side of an option assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Str(String),
    Number(Number),
    /// A bare option name, i.e. `true`.
    Flag,
}

impl Value {
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Value::Flag)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => f.write_str(text),
            Value::Number(number) => write!(f, "{}", number),
            Value::Flag => f.write_str("true"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(text) => serializer.serialize_str(text),
            Value::Number(number) => number.serialize(serializer),
            Value::Flag => serializer.serialize_bool(true),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value.into())
    }
}

/// A positional command argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Argument {
    Str(String),
    Number(Number),
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Str(text) => f.write_str(text),
            Argument::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Str(value.to_string())
    }
}

impl From<String> for Argument {
    fn from(value: String) -> Self {
        Argument::Str(value)
    }
}

impl From<Number> for Argument {
    fn from(value: Number) -> Self {
        Argument::Number(value)
    }
}

impl From<i64> for Argument {
    fn from(value: i64) -> Self {
        Argument::Number(value.into())
    }
}

impl From<i32> for Argument {
    fn from(value: i32) -> Self {
        Argument::Number(value.into())
    }
}

impl From<f64> for Argument {
    fn from(value: f64) -> Self {
        Argument::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_decimal_normalizes() {
        assert_eq!(Number::from_f64(100.0), Number::Int(100));
        assert_eq!(Number::parse("100.0"), Some(Number::Int(100)));
        assert_eq!(Number::parse("-2."), Some(Number::Int(-2)));
        assert_eq!(Number::parse("0.01"), Some(Number::Float(0.01)));
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Int(100).to_string(), "100");
        assert_eq!(Number::Float(0.01).to_string(), "0.01");
        assert_eq!(Number::Float(-1.57).to_string(), "-1.57");
        // Constructed directly, bypassing normalization
        assert_eq!(Number::Float(3.0).to_string(), "3");
    }

    #[test]
    fn test_huge_integral_stays_decimal() {
        let number = Number::from_f64(1e20);
        assert!(matches!(number, Number::Float(_)));
        assert!(number.is_integral());
        assert_eq!(Number::parse(&number.to_string()), Some(number));
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from("vp"), Value::Str("vp".to_string()));
        assert_eq!(Value::from(2.5), Value::Number(Number::Float(2.5)));
        assert_eq!(Value::from(2.0), Value::Number(Number::Int(2)));
        assert_eq!(Value::from(7).as_number(), Some(Number::Int(7)));
        assert!(Value::Flag.is_flag());
    }

    #[test]
    fn test_value_serializes_flag_as_true() {
        let json = serde_json::to_string(&vec![
            Value::Flag,
            Value::from(1),
            Value::from(0.5),
            Value::from("x"),
        ])
        .unwrap();
        assert_eq!(json, r#"[true,1,0.5,"x"]"#);
    }
}
