//! Construction inputs
//!
//! Everything a `Dimension` can be built from, decided once at the
//! boundary and normalized to `(value, unit)` before any conversion runs.

use serde::{Deserialize, Serialize};
use crate::Dimension;

/// Plain `{ value, unit }` record; a missing unit means the default unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl DimensionRecord {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        DimensionRecord {
            value,
            unit: Some(unit.into()),
        }
    }
}

/// Tagged union of construction inputs
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionInput {
    /// Bare number in the default unit
    Number(f64),
    /// `"<number><unit>"` or a bare number string
    Text(String),
    Record(DimensionRecord),
    /// Passed through unchanged
    Existing(Dimension),
}

impl From<f64> for DimensionInput {
    fn from(value: f64) -> Self {
        DimensionInput::Number(value)
    }
}

impl From<i32> for DimensionInput {
    fn from(value: i32) -> Self {
        DimensionInput::Number(value as f64)
    }
}

impl From<&str> for DimensionInput {
    fn from(s: &str) -> Self {
        DimensionInput::Text(s.to_string())
    }
}

impl From<String> for DimensionInput {
    fn from(s: String) -> Self {
        DimensionInput::Text(s)
    }
}

impl From<DimensionRecord> for DimensionInput {
    fn from(record: DimensionRecord) -> Self {
        DimensionInput::Record(record)
    }
}

impl From<Dimension> for DimensionInput {
    fn from(dimension: Dimension) -> Self {
        DimensionInput::Existing(dimension)
    }
}

/// Per-construction options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionOptions {
    /// Overrides the configured default unit for this construction
    pub default_unit: Option<String>,
}

impl DimensionOptions {
    pub fn default_unit(unit: impl Into<String>) -> Self {
        DimensionOptions {
            default_unit: Some(unit.into()),
        }
    }
}

impl From<&str> for DimensionOptions {
    fn from(unit: &str) -> Self {
        DimensionOptions::default_unit(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_from_number() {
        assert_eq!(DimensionInput::from(2), DimensionInput::Number(2.0));
        assert_eq!(DimensionInput::from(99.9), DimensionInput::Number(99.9));
    }

    #[test]
    fn test_input_from_text() {
        assert_eq!(DimensionInput::from("1m"), DimensionInput::Text("1m".to_string()));
    }

    #[test]
    fn test_record_deserialize_without_unit() {
        let record: DimensionRecord = serde_json::from_str(r#"{"value": 3}"#).unwrap();
        assert_eq!(record.value, 3.0);
        assert_eq!(record.unit, None);
    }

    #[test]
    fn test_options_from_unit() {
        assert_eq!(DimensionOptions::from("m").default_unit.as_deref(), Some("m"));
    }
}
