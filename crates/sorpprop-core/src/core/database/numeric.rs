use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumericParseError {
    #[error("'{0}' is not a finite number")]
    NotANumber(String),
}

/// A numeric database field that may be absent.
///
/// Stored in the JSON database as a number, or as the empty string when the
/// source cell was empty. An absent value is never equivalent to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Numeric {
    Value(f64),
    #[default]
    Absent,
}

impl Numeric {
    pub fn value(self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(v),
            Numeric::Absent => None,
        }
    }

    pub fn is_absent(self) -> bool {
        matches!(self, Numeric::Absent)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Value(value)
    }
}

impl FromStr for Numeric {
    type Err = NumericParseError;

    /// Only the exact empty string is absent; blank but non-empty cells are
    /// malformed.
    fn from_str(cell: &str) -> Result<Self, Self::Err> {
        if cell.is_empty() {
            Ok(Numeric::Absent)
        } else {
            parse_finite(cell).map(Numeric::Value)
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Value(v) => write!(f, "{}", v),
            Numeric::Absent => Ok(()),
        }
    }
}

pub fn parse_finite(text: &str) -> Result<f64, NumericParseError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(NumericParseError::NotANumber(text.to_string())),
    }
}

/// Splits a comma-separated measurement cell into floats.
///
/// An empty leading token yields an empty list.
pub fn parse_measurements(cell: &str) -> Result<Vec<f64>, NumericParseError> {
    let mut tokens = cell.split(',').peekable();
    if tokens.peek().is_some_and(|first| first.is_empty()) {
        return Ok(Vec::new());
    }
    tokens.map(parse_finite).collect()
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Numeric::Value(v) => serializer.serialize_f64(*v),
            Numeric::Absent => serializer.serialize_str(""),
        }
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a finite number or an empty string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
        if v.is_finite() {
            Ok(Numeric::Value(v))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(v), &self))
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
        Ok(Numeric::Value(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
        Ok(Numeric::Value(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
        if v.is_empty() {
            Ok(Numeric::Absent)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}
