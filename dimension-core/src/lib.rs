//! Dimension Core - conversion graph and resolver
//!
//! This crate provides the machinery behind unit conversion:
//! - `ConversionRegistry`: directed graph of unit-to-unit conversions, aliases
//!   and configuration
//! - `ConversionEntry`: a scalar factor or a parametric function
//! - `Transform`: a resolved conversion (direct, reverse or through the anchor unit)
//! - `global`: the process-wide registry used by `Dimension` values
//! - `DimensionError`: errors for callers that need a number and get none

mod config;
mod entry;
mod error;
mod registry;
mod resolve;
mod units;
pub mod global;

pub use config::{Config, ConfigUpdate, JsonHook, Parameters, default_aliases, default_json_hook};
pub use entry::{ConversionEntry, ParametricFn};
pub use error::{DimensionError, codes};
pub use registry::ConversionRegistry;
pub use resolve::{ResolveOptions, Transform};
pub use global::Converter;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ConfigUpdate, ConversionEntry, ConversionRegistry, DimensionError, Parameters, ResolveOptions};
    pub use crate::error::codes;
}
