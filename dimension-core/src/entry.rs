//! Conversion table entries

use std::fmt;
use std::sync::Arc;
use crate::Parameters;

/// Signature of a parametric conversion: `target = f(source, parameters)`
pub type ParametricFn = Arc<dyn Fn(f64, &Parameters) -> f64 + Send + Sync>;

/// One edge of the conversion graph
///
/// `Scalar(f)` means `target = source * f` and can be walked backwards by
/// division. `Parametric` covers non-linear or configuration-dependent
/// relationships and is only ever applied in the direction it was
/// registered.
#[derive(Clone)]
pub enum ConversionEntry {
    Scalar(f64),
    Parametric(ParametricFn),
}

impl ConversionEntry {
    /// Wrap a function as a parametric entry
    pub fn parametric<F>(f: F) -> Self
    where
        F: Fn(f64, &Parameters) -> f64 + Send + Sync + 'static,
    {
        ConversionEntry::Parametric(Arc::new(f))
    }

    /// The constant factor, if this is a scalar entry
    pub fn factor(&self) -> Option<f64> {
        match self {
            ConversionEntry::Scalar(f) => Some(*f),
            ConversionEntry::Parametric(_) => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, ConversionEntry::Scalar(_))
    }

    /// Apply the entry in its registered direction
    pub fn apply(&self, value: f64, params: &Parameters) -> f64 {
        match self {
            ConversionEntry::Scalar(f) => value * f,
            ConversionEntry::Parametric(f) => f(value, params),
        }
    }
}

impl From<f64> for ConversionEntry {
    fn from(factor: f64) -> Self {
        ConversionEntry::Scalar(factor)
    }
}

impl From<i32> for ConversionEntry {
    fn from(factor: i32) -> Self {
        ConversionEntry::Scalar(factor as f64)
    }
}

impl fmt::Debug for ConversionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionEntry::Scalar(factor) => write!(f, "Scalar({})", factor),
            ConversionEntry::Parametric(_) => write!(f, "Parametric(<fn>)"),
        }
    }
}
