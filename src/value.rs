//! Raw data cells going into a scale and the mapped values coming out.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fastnum::decimal::D128;
use serde::Deserialize;

use crate::label;
use crate::scale::util;

/// One cell of a mapped data column.
///
/// Numbers held as `Int`, `Float` or `Decimal` compare numerically with each
/// other, so `Value::Int(1) == Value::Float(1.0)`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(D128),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
}

/// Coarse type of a [`Value`], used to decide whether a set of levels has a
/// natural ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Text,
    Date,
    DateTime,
    Time,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Date(_) => ValueKind::Date,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Time(_) => ValueKind::Time,
        }
    }

    /// `Null` and floating-point NaN.
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric coercion. Numeric strings are accepted; `NA`, empty and
    /// unparseable text, booleans and temporal values are not numbers.
    pub fn as_decimal(&self) -> Option<D128> {
        match self {
            Value::Int(v) => Some(util::dec_int(*v)),
            Value::Float(v) => util::dec(*v),
            Value::Decimal(v) => Some(*v),
            Value::Text(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("na") || text.eq_ignore_ascii_case("nan") {
                    return None;
                }
                util::parse_decimal(text)
                    .or_else(|| text.parse::<f64>().ok().and_then(util::dec))
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if v.is_finite() => Some(*v),
            Value::Float(_) => None,
            other => other.as_decimal().map(|d| util::to_f64(&d)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Ordering between two values of the same kind. Values of different
    /// kinds, and nulls, have no natural order.
    pub fn natural_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            (Value::Time(a), Value::Time(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (a, b) if a.kind() == ValueKind::Number && b.kind() == ValueKind::Number => {
                match (a.as_decimal(), b.as_decimal()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Float(a), Value::Float(b)) => a == b,
            (a, b) => a.natural_cmp(b) == Some(Ordering::Equal),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NA"),
            Value::Bool(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{}", label::format_number(*v)),
            Value::Decimal(v) => write!(f, "{}", label::format_decimal(v)),
            Value::Text(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            Value::Time(v) => write!(f, "{}", v.format("%H:%M:%S")),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<D128> for Value {
    fn from(value: D128) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Result of mapping one value through a scale.
///
/// Numeric scales signal untransformable input with `Missing`; colour and
/// other palette scales return their configured NA value instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Mapped {
    Missing,
    /// Pixel position, point size or alpha level.
    Number(D128),
    /// `#RRGGBB` / `#RRGGBBAA` hex or a named colour.
    Color(String),
    /// Shape or linetype name, or a manual/identity pass-through value.
    Literal(Value),
}

impl Mapped {
    pub fn is_missing(&self) -> bool {
        matches!(self, Mapped::Missing)
    }

    pub fn as_number(&self) -> Option<D128> {
        match self {
            Mapped::Number(v) => Some(*v),
            Mapped::Literal(value) => value.as_decimal(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|v| util::to_f64(&v))
    }

    pub fn as_color(&self) -> Option<&str> {
        match self {
            Mapped::Color(color) => Some(color),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_across_representations() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_eq!(Value::Decimal(D128::from(2)), Value::Int(2));
        assert_ne!(Value::Int(1), Value::Text("1".into()));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from("12.5").as_decimal(), util::dec(12.5));
        assert_eq!(Value::from(" 7 ").as_decimal(), Some(D128::from(7)));
        assert_eq!(Value::from("NA").as_decimal(), None);
        assert_eq!(Value::from("").as_decimal(), None);
        assert_eq!(Value::from("abc").as_decimal(), None);
        assert_eq!(Value::Bool(true).as_decimal(), None);
        assert_eq!(Value::Float(f64::NAN).as_decimal(), None);
    }

    #[test]
    fn test_json_conversion() {
        let values: Vec<Value> = serde_json::from_str(r#"[1, 2.5, "a", null, true]"#).unwrap();
        assert_eq!(values[0], Value::Int(1));
        assert_eq!(values[1], Value::Float(2.5));
        assert_eq!(values[2], Value::from("a"));
        assert!(values[3].is_null());
        assert_eq!(values[4], Value::Bool(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Null.to_string(), "NA");
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(Value::Date(date).to_string(), "2024-03-01");
    }

    #[test]
    fn test_natural_order_requires_same_kind() {
        assert_eq!(Value::from("a").natural_cmp(&Value::from("b")), Some(Ordering::Less));
        assert_eq!(Value::Int(3).natural_cmp(&Value::Float(2.5)), Some(Ordering::Greater));
        assert_eq!(Value::Int(3).natural_cmp(&Value::from("a")), None);
    }
}
