//! Dimension - numbers with a unit of measurement
//!
//! A `Dimension` pairs an `f64` with a unit token and converts to other
//! units on demand. Built-in units:
//! - Length (mm, µ, cm, m, km, hm, in, thou, pt, pc)
//! - Pixels (px), depending on the configured pixel density
//! - Visual angle (deg, arcmin, arcsec), depending on the viewing distance
//!
//! Units without a direct conversion are connected through the anchor unit
//! (mm by default). Custom units and aliases can be added at runtime.
//!
//! ```no_run
//! use dimension::Dimension;
//!
//! let d: Dimension = "1in".parse()?;
//! assert_eq!(d.to_number("mm")?, 25.4);
//! assert_eq!(d.to_string_in(Some("mm"), Some(1))?, "25.4mm");
//! # Ok::<(), dimension::DimensionError>(())
//! ```

mod input;
mod parse;
mod value;

pub use input::{DimensionInput, DimensionOptions, DimensionRecord};
pub use parse::parse_dimension_str;
pub use value::Dimension;

pub use dimension_core::global::{add_alias, add_conversion, configure, conversion_function, un_alias, units};
pub use dimension_core::{
    codes, ConfigUpdate, ConversionEntry, ConversionRegistry, Converter, DimensionError, Parameters,
    ResolveOptions, Transform,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_listed() {
        let units = units();
        assert!(units.iter().any(|u| u == "mm"));
        assert!(units.iter().any(|u| u == "in"));
        assert!(units.iter().any(|u| u == "arcmin"));
    }

    #[test]
    fn test_conversion_function() {
        let conv = conversion_function("in", "mm", ResolveOptions::default()).unwrap();
        assert_eq!(conv.convert(1.0), 25.4);
    }

    #[test]
    fn test_add_conversion_reaches_values() {
        add_conversion("lib_test_a", "lib_test_b", 10.0);
        let d = Dimension::new("1lib_test_a").unwrap();
        assert_eq!(d.to_number("lib_test_b").unwrap(), 10.0);
        let d = Dimension::new("1lib_test_b").unwrap();
        assert_eq!(d.to_number("lib_test_a").unwrap(), 0.1);
        assert!(d.to_number("mm").is_err());
    }

    #[test]
    fn test_add_alias_reaches_values() {
        add_alias("mm", "lib_test_mmx");
        assert_eq!(un_alias("lib_test_mmx"), "mm");
        assert_eq!(Dimension::new("2lib_test_mmx").unwrap().unit(), "mm");
    }
}
