//! Dimension type - a number with a unit

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use dimension_core::{global, ConversionRegistry, DimensionError, ResolveOptions};
use crate::input::{DimensionInput, DimensionOptions, DimensionRecord};
use crate::parse::parse_dimension_str;

/// A numeric value with a canonical unit
///
/// Conversions never modify the receiver; they return numbers, strings
/// or new `Dimension`s. Methods without a `_with` suffix use the
/// process-wide registry, the `_with` variants take one explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionRecord")]
pub struct Dimension {
    value: f64,
    unit: String,
}

impl Dimension {
    /// Build from any supported input with default options
    ///
    /// A string that is neither `<number><unit>` nor a bare number is a
    /// `DimensionError::Parse`; it is never read as zero.
    pub fn new(input: impl Into<DimensionInput>) -> Result<Self, DimensionError> {
        Self::with_options(input, &DimensionOptions::default())
    }

    pub fn with_options(
        input: impl Into<DimensionInput>,
        options: &DimensionOptions,
    ) -> Result<Self, DimensionError> {
        let input = input.into();
        global::with_registry(|registry| Self::build(registry, input, options))
    }

    /// Build against an explicit registry
    pub fn new_with(
        registry: &ConversionRegistry,
        input: impl Into<DimensionInput>,
        options: &DimensionOptions,
    ) -> Result<Self, DimensionError> {
        Self::build(registry, input.into(), options)
    }

    fn build(
        registry: &ConversionRegistry,
        input: DimensionInput,
        options: &DimensionOptions,
    ) -> Result<Self, DimensionError> {
        let default_unit = options
            .default_unit
            .as_deref()
            .unwrap_or(&registry.config().default_unit);

        let (value, unit) = match input {
            DimensionInput::Existing(dimension) => return Ok(dimension),
            DimensionInput::Number(value) => (value, default_unit.to_string()),
            DimensionInput::Record(record) => {
                (record.value, record.unit.unwrap_or_else(|| default_unit.to_string()))
            }
            DimensionInput::Text(s) => parse_dimension_str(&s, default_unit).ok_or_else(|| {
                tracing::debug!(input = %s, "unparseable dimension string");
                DimensionError::parse(s.as_str())
            })?,
        };

        Ok(Dimension {
            value,
            unit: registry.resolve_alias(&unit).to_string(),
        })
    }

    /// The value in its own unit
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The canonical unit
    pub fn unit(&self) -> &str {
        &self.unit
    }

    // ========== Conversion ==========

    /// The value converted to `target`
    pub fn to_number(&self, target: &str) -> Result<f64, DimensionError> {
        global::conversion_function(&self.unit, target, ResolveOptions::default())
            .map(|converter| converter.convert(self.value))
            .ok_or_else(|| DimensionError::no_conversion(&self.unit, target))
    }

    pub fn to_number_with(&self, registry: &ConversionRegistry, target: &str) -> Result<f64, DimensionError> {
        registry
            .convert(self.value, &self.unit, target)
            .ok_or_else(|| DimensionError::no_conversion(&self.unit, target))
    }

    /// The value in the configured output unit, or as-is when none is set
    pub fn value_of(&self) -> Result<f64, DimensionError> {
        match global::default_output_unit() {
            Some(unit) => self.to_number(&unit),
            None => Ok(self.value),
        }
    }

    pub fn value_of_with(&self, registry: &ConversionRegistry) -> Result<f64, DimensionError> {
        match &registry.config().default_output_unit {
            Some(unit) => self.to_number_with(registry, unit),
            None => Ok(self.value),
        }
    }

    /// A new `Dimension` in `target`
    pub fn to_dimension(&self, target: &str) -> Result<Dimension, DimensionError> {
        let value = self.to_number(target)?;
        Ok(Dimension {
            value,
            unit: global::un_alias(target),
        })
    }

    pub fn to_dimension_with(&self, registry: &ConversionRegistry, target: &str) -> Result<Dimension, DimensionError> {
        let value = self.to_number_with(registry, target)?;
        Ok(Dimension {
            value,
            unit: registry.resolve_alias(target).to_string(),
        })
    }

    // ========== Formatting ==========

    /// The value with `digits` decimals, converted first if `target` is given
    pub fn to_fixed(&self, digits: usize, target: Option<&str>) -> Result<String, DimensionError> {
        let value = match target {
            Some(unit) => self.to_number(unit)?,
            None => self.value,
        };
        Ok(format_fixed(value, digits))
    }

    pub fn to_fixed_with(
        &self,
        registry: &ConversionRegistry,
        digits: usize,
        target: Option<&str>,
    ) -> Result<String, DimensionError> {
        let value = match target {
            Some(unit) => self.to_number_with(registry, unit)?,
            None => self.value,
        };
        Ok(format_fixed(value, digits))
    }

    /// Number and unit suffix, optionally converted and rounded
    ///
    /// The suffix is `target` as given, not its canonical form.
    pub fn to_string_in(&self, target: Option<&str>, digits: Option<usize>) -> Result<String, DimensionError> {
        let value = match target {
            Some(unit) => self.to_number(unit)?,
            None => self.value,
        };
        Ok(format_with_unit(value, target.unwrap_or(&self.unit), digits))
    }

    pub fn to_string_with(
        &self,
        registry: &ConversionRegistry,
        target: Option<&str>,
        digits: Option<usize>,
    ) -> Result<String, DimensionError> {
        let value = match target {
            Some(unit) => self.to_number_with(registry, unit)?,
            None => self.value,
        };
        Ok(format_with_unit(value, target.unwrap_or(&self.unit), digits))
    }

    // ========== Plain data ==========

    /// Plain-data form through the configured hook
    pub fn to_json(&self) -> serde_json::Value {
        global::json_of(self.value, &self.unit)
    }

    pub fn to_json_with(&self, registry: &ConversionRegistry) -> serde_json::Value {
        registry.config().json_of(self.value, &self.unit)
    }

    pub fn to_record(&self) -> DimensionRecord {
        DimensionRecord::new(self.value, self.unit.clone())
    }
}

fn format_fixed(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

fn format_with_unit(value: f64, unit: &str, digits: Option<usize>) -> String {
    match digits {
        Some(digits) => format!("{}{}", format_fixed(value, digits), unit),
        None => format!("{}{}", value, unit),
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(digits) => write!(f, "{:.*}{}", digits, self.value, self.unit),
            None => write!(f, "{}{}", self.value, self.unit),
        }
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::new(s)
    }
}

impl TryFrom<DimensionRecord> for Dimension {
    type Error = DimensionError;

    fn try_from(record: DimensionRecord) -> Result<Self, Self::Error> {
        Dimension::new(record)
    }
}

impl Default for Dimension {
    /// Zero in the configured default unit
    fn default() -> Self {
        Dimension {
            value: 0.0,
            unit: global::default_unit(),
        }
    }
}
