//! The conversion graph and its configuration

use std::collections::{BTreeSet, HashMap};
use crate::{Config, ConfigUpdate, ConversionEntry, DimensionError, Parameters};

/// Directed, partial graph of unit-to-unit transforms
///
/// Stored as `conversions[target][source]`. A missing entry only says there
/// is no direct edge in that direction; the resolver may still find the
/// reverse edge or a path through the anchor unit.
#[derive(Debug, Clone)]
pub struct ConversionRegistry {
    conversions: HashMap<String, HashMap<String, ConversionEntry>>,
    config: Config,
}

impl ConversionRegistry {
    /// Registry seeded with the built-in units and default configuration
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_units();
        registry
    }

    /// Registry with default configuration and no conversions
    pub fn empty() -> Self {
        ConversionRegistry {
            conversions: HashMap::new(),
            config: Config::default(),
        }
    }

    /// Canonical form of a unit token; returns the token itself if it is not an alias
    pub fn resolve_alias<'a>(&'a self, unit: &'a str) -> &'a str {
        self.config
            .aliases
            .get(unit)
            .map(String::as_str)
            .unwrap_or(unit)
    }

    /// Make `alias` resolve to `unit`
    pub fn add_alias(&mut self, unit: &str, alias: &str) {
        tracing::trace!(alias, unit, "alias registered");
        self.config.aliases.insert(alias.to_string(), unit.to_string());
    }

    /// Insert or overwrite the edge `source -> target`
    pub fn set_conversion(&mut self, source: &str, target: &str, entry: impl Into<ConversionEntry>) {
        let entry = entry.into();
        tracing::trace!(source, target, ?entry, "conversion registered");
        self.conversions
            .entry(target.to_string())
            .or_default()
            .insert(source.to_string(), entry);
    }

    /// Alias of `set_conversion`
    pub fn add_conversion(&mut self, source: &str, target: &str, entry: impl Into<ConversionEntry>) {
        self.set_conversion(source, target, entry);
    }

    /// The entry for the direct edge `source -> target`, if registered
    pub fn entry(&self, source: &str, target: &str) -> Option<&ConversionEntry> {
        self.conversions.get(target).and_then(|row| row.get(source))
    }

    /// Shallow-merge `update` into the configuration
    pub fn merge_configuration(&mut self, update: ConfigUpdate) -> Result<(), DimensionError> {
        update.validate()?;
        tracing::debug!(?update, "merging configuration");
        update.apply_to(&mut self.config);
        Ok(())
    }

    /// Every unit appearing as a source or target of any edge
    ///
    /// Sorted for stable output; callers should not depend on the order.
    pub fn list_units(&self) -> Vec<String> {
        let mut units = BTreeSet::new();
        for (target, row) in &self.conversions {
            units.insert(target.as_str());
            units.extend(row.keys().map(String::as_str));
        }
        units.into_iter().map(str::to_string).collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parameters(&self) -> &Parameters {
        &self.config.params
    }

    /// Frozen copy of the current parameters
    pub fn snapshot(&self) -> Parameters {
        self.config.params.clone()
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
