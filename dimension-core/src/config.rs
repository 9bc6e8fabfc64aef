//! Global parameters and configuration
//!
//! `Parameters` is the small record that parametric conversions read.
//! `Config` wraps it together with the alias table, unit defaults and the
//! plain-data hook. `ConfigUpdate` is a partial `Config` merged field by field.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use crate::DimensionError;

/// Hook producing the plain-data form of a `(value, unit)` pair
pub type JsonHook = Arc<dyn Fn(f64, &str) -> serde_json::Value + Send + Sync>;

/// Values closed over by parametric conversions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Pixels per inch
    pub pixel_density: f64,
    /// Viewing distance in mm, used by angular conversions
    pub viewing_distance: f64,
    /// Intermediate unit for two-hop conversions
    pub anchor_unit: String,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            pixel_density: 96.0,
            viewing_distance: 600.0,
            anchor_unit: "mm".to_string(),
        }
    }
}

/// Complete mutable configuration of a registry
#[derive(Clone)]
pub struct Config {
    pub params: Parameters,
    /// Unit assigned to bare numbers
    pub default_unit: String,
    /// Unit used by `value_of()` when set
    pub default_output_unit: Option<String>,
    /// alias -> canonical unit
    pub aliases: HashMap<String, String>,
    pub to_json: JsonHook,
}

impl Config {
    /// Produce the plain-data form of a value through the configured hook
    pub fn json_of(&self, value: f64, unit: &str) -> serde_json::Value {
        (self.to_json)(value, unit)
    }
}

/// The `{ "value": v, "unit": u }` representation
pub fn default_json_hook() -> JsonHook {
    Arc::new(|value, unit| json!({ "value": value, "unit": unit }))
}

pub fn default_aliases() -> HashMap<String, String> {
    // '"' for inches is left out on purpose, it collides with arcseconds
    [("um", "µ"), ("µm", "µ"), ("°", "deg")]
        .into_iter()
        .map(|(alias, unit)| (alias.to_string(), unit.to_string()))
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            params: Parameters::default(),
            default_unit: "mm".to_string(),
            default_output_unit: None,
            aliases: default_aliases(),
            to_json: default_json_hook(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("params", &self.params)
            .field("default_unit", &self.default_unit)
            .field("default_output_unit", &self.default_output_unit)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

/// Partial configuration, merged into a `Config` by `configure`
///
/// Absent fields leave the current setting alone. In particular an update
/// without `aliases` keeps the alias table, while `aliases: {}` clears it.
#[derive(Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigUpdate {
    pub pixel_density: Option<f64>,
    pub viewing_distance: Option<f64>,
    pub anchor_unit: Option<String>,
    pub default_unit: Option<String>,
    /// `Some(None)` switches the output unit off
    #[serde(deserialize_with = "explicit_option")]
    pub default_output_unit: Option<Option<String>>,
    pub aliases: Option<HashMap<String, String>>,
    #[serde(skip)]
    pub to_json: Option<JsonHook>,
}

/// Keep `null` distinct from a missing field
fn explicit_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an update from a JSON document
    pub fn from_json(s: &str) -> Result<Self, DimensionError> {
        let update: ConfigUpdate = serde_json::from_str(s)?;
        update.validate()?;
        Ok(update)
    }

    pub fn pixel_density(mut self, density: f64) -> Self {
        self.pixel_density = Some(density);
        self
    }

    pub fn viewing_distance(mut self, distance: f64) -> Self {
        self.viewing_distance = Some(distance);
        self
    }

    pub fn anchor_unit(mut self, unit: impl Into<String>) -> Self {
        self.anchor_unit = Some(unit.into());
        self
    }

    pub fn default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = Some(unit.into());
        self
    }

    pub fn default_output_unit(mut self, unit: Option<&str>) -> Self {
        self.default_output_unit = Some(unit.map(str::to_string));
        self
    }

    /// Replace the alias table wholesale; an empty map clears it
    pub fn aliases<I, A, U>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, U)>,
        A: Into<String>,
        U: Into<String>,
    {
        self.aliases = Some(
            aliases
                .into_iter()
                .map(|(alias, unit)| (alias.into(), unit.into()))
                .collect(),
        );
        self
    }

    pub fn to_json<F>(mut self, hook: F) -> Self
    where
        F: Fn(f64, &str) -> serde_json::Value + Send + Sync + 'static,
    {
        self.to_json = Some(Arc::new(hook));
        self
    }

    /// Reject values no conversion could use
    pub fn validate(&self) -> Result<(), DimensionError> {
        if let Some(density) = self.pixel_density {
            if !(density.is_finite() && density > 0.0) {
                return Err(DimensionError::InvalidConfig(format!(
                    "pixel_density must be positive, got {}",
                    density
                )));
            }
        }
        if let Some(distance) = self.viewing_distance {
            if !(distance.is_finite() && distance > 0.0) {
                return Err(DimensionError::InvalidConfig(format!(
                    "viewing_distance must be positive, got {}",
                    distance
                )));
            }
        }
        Ok(())
    }

    /// Shallow-merge into `config`
    pub fn apply_to(self, config: &mut Config) {
        if let Some(density) = self.pixel_density {
            config.params.pixel_density = density;
        }
        if let Some(distance) = self.viewing_distance {
            config.params.viewing_distance = distance;
        }
        if let Some(anchor) = self.anchor_unit {
            config.params.anchor_unit = anchor;
        }
        if let Some(unit) = self.default_unit {
            config.default_unit = unit;
        }
        if let Some(output) = self.default_output_unit {
            config.default_output_unit = output;
        }
        if let Some(aliases) = self.aliases {
            config.aliases = aliases;
        }
        if let Some(hook) = self.to_json {
            config.to_json = hook;
        }
    }
}

impl fmt::Debug for ConfigUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigUpdate")
            .field("pixel_density", &self.pixel_density)
            .field("viewing_distance", &self.viewing_distance)
            .field("anchor_unit", &self.anchor_unit)
            .field("default_unit", &self.default_unit)
            .field("default_output_unit", &self.default_output_unit)
            .field("aliases", &self.aliases)
            .field("to_json", &self.to_json.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.params.pixel_density, 96.0);
        assert_eq!(config.params.viewing_distance, 600.0);
        assert_eq!(config.params.anchor_unit, "mm");
        assert_eq!(config.default_unit, "mm");
        assert_eq!(config.default_output_unit, None);
        assert_eq!(config.aliases.get("°").map(String::as_str), Some("deg"));
        assert_eq!(config.aliases.get("um").map(String::as_str), Some("µ"));
    }

    #[test]
    fn test_merge_keeps_aliases_when_omitted() {
        let mut config = Config::default();
        ConfigUpdate::new().pixel_density(100.0).apply_to(&mut config);
        assert_eq!(config.params.pixel_density, 100.0);
        assert_eq!(config.aliases.len(), 3);
    }

    #[test]
    fn test_merge_empty_aliases_clears() {
        let mut config = Config::default();
        ConfigUpdate::new()
            .aliases(Vec::<(String, String)>::new())
            .apply_to(&mut config);
        assert!(config.aliases.is_empty());
    }

    #[test]
    fn test_merge_aliases_replaces_table() {
        let mut config = Config::default();
        ConfigUpdate::new().aliases([("foo", "mm")]).apply_to(&mut config);
        assert_eq!(config.aliases.len(), 1);
        assert_eq!(config.aliases.get("foo").map(String::as_str), Some("mm"));
    }

    #[test]
    fn test_output_unit_set_and_cleared() {
        let mut config = Config::default();
        ConfigUpdate::new().default_output_unit(Some("mm")).apply_to(&mut config);
        assert_eq!(config.default_output_unit.as_deref(), Some("mm"));

        ConfigUpdate::new().default_output_unit(None).apply_to(&mut config);
        assert_eq!(config.default_output_unit, None);
    }

    #[test]
    fn test_from_json() {
        let update = ConfigUpdate::from_json(
            r#"{"pixel_density": 72, "anchor_unit": "in", "default_output_unit": null}"#,
        )
        .unwrap();
        assert_eq!(update.pixel_density, Some(72.0));
        assert_eq!(update.anchor_unit.as_deref(), Some("in"));
        assert_eq!(update.default_output_unit, Some(None));
        assert!(update.aliases.is_none());
    }

    #[test]
    fn test_from_json_missing_output_unit() {
        let update = ConfigUpdate::from_json(r#"{"viewing_distance": 300}"#).unwrap();
        assert_eq!(update.default_output_unit, None);
    }

    #[test]
    fn test_from_json_rejects_bad_density() {
        let err = ConfigUpdate::from_json(r#"{"pixel_density": -1}"#).unwrap_err();
        assert!(matches!(err, DimensionError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        assert!(ConfigUpdate::from_json(r#"{"pixels": 1}"#).is_err());
    }

    #[test]
    fn test_json_hook() {
        let mut config = Config::default();
        assert_eq!(config.json_of(1.0, "mm"), json!({ "value": 1.0, "unit": "mm" }));

        ConfigUpdate::new()
            .to_json(|v, u| json!(format!("{}{}", v, u)))
            .apply_to(&mut config);
        assert_eq!(config.json_of(1.0, "mm"), json!("1mm"));
    }
}
