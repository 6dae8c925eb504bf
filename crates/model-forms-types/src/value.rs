// File: model-forms-types/src/value.rs
// Purpose: Tagged value held in a form's field-value store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single property value while it is being edited.
///
/// Store entries are `Option<FieldValue>`; `None` means the value is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    /// Case name of an enumeration value
    Enumeration(String),
    /// Identifier of the referenced entity
    Relationship(String),
}

impl FieldValue {
    /// Short name of the variant, used in codec and binding errors
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Real(_) => "real",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Enumeration(_) => "enumeration",
            FieldValue::Relationship(_) => "relationship",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Real(r) => write!(f, "{}", r),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            FieldValue::Enumeration(case) => write!(f, "{}", case),
            FieldValue::Relationship(id) => write!(f, "{}", id),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(n as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Real(n)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_integer_widens_to_f64() {
        assert_eq!(FieldValue::Integer(42).as_f64(), Some(42.0));
        assert_eq!(FieldValue::Real(1.5).as_f64(), Some(1.5));
        assert_eq!(FieldValue::String("1".into()).as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::from("abc").to_string(), "abc");
        assert_eq!(FieldValue::from(7).to_string(), "7");
        assert_eq!(FieldValue::from(true).to_string(), "true");

        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(FieldValue::from(ts).to_string(), "2024-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(FieldValue::Enumeration("Cycling".into())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "enumeration", "value": "Cycling"}));
    }
}
