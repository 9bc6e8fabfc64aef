//! Process-wide registry
//!
//! A single `ConversionRegistry` seeded with the built-in units, shared
//! behind an `RwLock`. Configuration may change at any time; conversions
//! resolved without freezing read the parameters current when they run.

use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::{
    ConfigUpdate, ConversionEntry, ConversionRegistry, DimensionError, Parameters, ResolveOptions,
    Transform,
};

static REGISTRY: LazyLock<RwLock<ConversionRegistry>> =
    LazyLock::new(|| RwLock::new(ConversionRegistry::new()));

// Poisoning is ignored: every mutation is a single map or field write.
fn read() -> RwLockReadGuard<'static, ConversionRegistry> {
    REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, ConversionRegistry> {
    REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with shared access to the process-wide registry
pub fn with_registry<R>(f: impl FnOnce(&ConversionRegistry) -> R) -> R {
    f(&read())
}

/// Merge `update` into the process-wide configuration
pub fn configure(update: ConfigUpdate) -> Result<(), DimensionError> {
    write().merge_configuration(update)
}

/// Make `alias` resolve to `unit`
pub fn add_alias(unit: &str, alias: &str) {
    write().add_alias(unit, alias);
}

/// Register the edge `source -> target`
pub fn add_conversion(source: &str, target: &str, entry: impl Into<ConversionEntry>) {
    write().set_conversion(source, target, entry);
}

/// Canonical form of a unit token
pub fn un_alias(unit: &str) -> String {
    read().resolve_alias(unit).to_string()
}

/// All units known to the process-wide registry
pub fn units() -> Vec<String> {
    read().list_units()
}

pub fn parameters() -> Parameters {
    read().snapshot()
}

pub fn default_unit() -> String {
    read().config().default_unit.clone()
}

pub fn default_output_unit() -> Option<String> {
    read().config().default_output_unit.clone()
}

/// Plain-data form of `(value, unit)` through the configured hook
pub fn json_of(value: f64, unit: &str) -> serde_json::Value {
    let hook = read().config().to_json.clone();
    // Call outside the lock, the hook is user code
    hook(value, unit)
}

/// Resolve a conversion against the process-wide registry
pub fn conversion_function(source: &str, target: &str, options: ResolveOptions) -> Option<Converter> {
    read()
        .resolve(source, target, options)
        .map(|transform| Converter { transform })
}

/// A transform bound to the process-wide parameters
///
/// Unless frozen, each call reads the parameters in effect at that moment.
#[derive(Debug, Clone)]
pub struct Converter {
    transform: Transform,
}

impl Converter {
    pub fn convert(&self, value: f64) -> f64 {
        match self.transform.frozen_parameters() {
            Some(frozen) => self.transform.apply(value, frozen),
            None => self.transform.apply(value, &parameters()),
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn is_indirect(&self) -> bool {
        self.transform.is_indirect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests here share the process-wide registry with each other, so they
    // only add uniquely named units and never change parameters.

    #[test]
    fn test_global_inch_to_mm() {
        let conv = conversion_function("in", "mm", ResolveOptions::default()).unwrap();
        assert_eq!(conv.convert(1.0), 25.4);
    }

    #[test]
    fn test_global_un_alias() {
        assert_eq!(un_alias("°"), "deg");
        assert_eq!(un_alias("mm"), "mm");
    }

    #[test]
    fn test_global_add_conversion() {
        add_conversion("global_test_a", "global_test_b", 4.0);
        assert!(units().iter().any(|u| u == "global_test_b"));
        let conv = conversion_function("global_test_b", "global_test_a", ResolveOptions::default()).unwrap();
        assert_eq!(conv.convert(8.0), 2.0);
    }

    #[test]
    fn test_global_add_alias() {
        add_alias("mm", "global_test_mmx");
        assert_eq!(un_alias("global_test_mmx"), "mm");
    }

    #[test]
    fn test_global_missing_path() {
        add_conversion("global_test_c", "global_test_d", 1.0);
        assert!(conversion_function("global_test_c", "in", ResolveOptions::default()).is_none());
    }

    #[test]
    fn test_converter_with_registry() {
        let units = with_registry(|r| r.list_units());
        assert!(units.iter().any(|u| u == "arcmin"));
    }
}
