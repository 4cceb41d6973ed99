use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::models::domain::{Axis, GeoPoint};

/// Errors raised while reading a coordinate out of a record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("field '{key}' is missing")]
    Missing { key: String },

    #[error("field '{key}' is not numeric: {value}")]
    NotNumeric { key: String, value: String },

    #[error("field '{key}' is not a finite number: {value}")]
    NotFinite { key: String, value: f64 },

    #[error("field '{key}' value {value} is outside [{min}, {max}]")]
    OutOfRange { key: String, value: f64, min: f64, max: f64 },
}

/// A single attribute value carried by a record
///
/// Numbers keep their exact JSON representation so records pass through
/// the service unchanged. Nested arrays and objects land in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Lenient numeric coercion: numbers as-is, text parsed after trimming
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            FieldValue::Null | FieldValue::Bool(_) | FieldValue::Other(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "\"{}\"", s),
            FieldValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// An opaque survey record: arbitrary attributes keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Read a finite number stored under `key`
    pub fn number(&self, key: &str) -> Result<f64, FieldError> {
        let value = self.get(key).ok_or_else(|| FieldError::Missing {
            key: key.to_string(),
        })?;

        let number = value.as_f64().ok_or_else(|| FieldError::NotNumeric {
            key: key.to_string(),
            value: value.to_string(),
        })?;

        if !number.is_finite() {
            return Err(FieldError::NotFinite {
                key: key.to_string(),
                value: number,
            });
        }

        Ok(number)
    }

    /// Read a coordinate stored under `key` and check it against the axis range
    pub fn coordinate(&self, key: &str, axis: Axis) -> Result<f64, FieldError> {
        let value = self.number(key)?;

        if !axis.contains(value) {
            let (min, max) = axis.bounds();
            return Err(FieldError::OutOfRange {
                key: key.to_string(),
                value,
                min,
                max,
            });
        }

        Ok(value)
    }

    /// Read a full point from the given latitude/longitude keys
    pub fn point(&self, lat_key: &str, lon_key: &str) -> Result<GeoPoint, FieldError> {
        Ok(GeoPoint::new(
            self.coordinate(lat_key, Axis::Latitude)?,
            self.coordinate(lon_key, Axis::Longitude)?,
        ))
    }
}
