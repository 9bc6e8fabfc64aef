//! Structured errors
//!
//! Resolution itself never fails: a missing path is reported as `None`.
//! These errors surface only where a caller asks for a number or a value
//! and none can be produced.

use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const NO_CONVERSION: &str = "NO_CONVERSION";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Error type for dimension operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    #[error("No conversion path from {from} to {to} found")]
    NoConversionPath { from: String, to: String },

    #[error("Invalid dimension format: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DimensionError {
    pub fn no_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::NoConversionPath {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn parse(input: impl Into<String>) -> Self {
        Self::Parse(input.into())
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoConversionPath { .. } => codes::NO_CONVERSION,
            Self::Parse(_) => codes::PARSE_ERROR,
            Self::InvalidConfig(_) => codes::CONFIG_ERROR,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoConversionPath { .. } => {
                "Register a conversion with add_conversion() or one into the anchor unit"
            }
            Self::Parse(_) => "Use <number><unit>, e.g. \"12.5mm\" or \"-3in\"",
            Self::InvalidConfig(_) => "Check configuration field names and types",
        }
    }
}

impl From<serde_json::Error> for DimensionError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
