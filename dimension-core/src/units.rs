//! Built-in unit definitions: metric and imperial lengths, pixels, visual angles
//!
//! Each table is keyed by target unit, then source unit. Only one direction
//! is listed where the relationship is a plain factor; the resolver walks
//! scalar entries backwards on its own.

use std::f64::consts::PI;
use crate::{ConversionEntry, ConversionRegistry, Parameters};

/// mm per unit for the linear units that pixels convert from
const PIXEL_SOURCES: [(&str, f64); 9] = [
    ("m", 0.0254),
    ("cm", 2.54),
    ("mm", 25.4),
    ("hm", 2540.0),
    ("µ", 25400.0),
    ("in", 1.0),
    ("thou", 1000.0),
    ("pt", 72.0),
    ("pc", 6.0),
];

// Visual angle <-> size at the configured viewing distance.
// The arcmin/arcsec variants call the degree ones, never each other.

pub(crate) fn deg_to_mm(v: f64, p: &Parameters) -> f64 {
    (v / 2.0 / 180.0 * PI).tan() * 2.0 * p.viewing_distance
}

pub(crate) fn arcmin_to_mm(v: f64, p: &Parameters) -> f64 {
    deg_to_mm(v / 60.0, p)
}

pub(crate) fn arcsec_to_mm(v: f64, p: &Parameters) -> f64 {
    deg_to_mm(v / 3600.0, p)
}

pub(crate) fn mm_to_deg(v: f64, p: &Parameters) -> f64 {
    v.atan2(2.0 * p.viewing_distance) / PI * 360.0
}

impl ConversionRegistry {
    pub(crate) fn register_builtin_units(&mut self) {
        self.register_length_units();
        self.register_inch_units();
        self.register_pixel_units();
        self.register_angle_units();
    }

    fn register_length_units(&mut self) {
        self.set_conversion("km", "mm", 1_000_000.0);
        self.set_conversion("m", "mm", 1000.0);
        self.set_conversion("cm", "mm", 10.0);
        self.set_conversion("hm", "mm", 0.01);
        self.set_conversion("µ", "mm", 0.001);
        self.set_conversion("in", "mm", 25.4);
        self.set_conversion("thou", "mm", 0.0254);
        self.set_conversion("pt", "mm", 25.4 / 72.0);
        self.set_conversion("pc", "mm", 25.4 / 6.0);

        self.set_conversion("px", "mm", ConversionEntry::parametric(|v, p| v * 25.4 / p.pixel_density));
        self.set_conversion("deg", "mm", ConversionEntry::parametric(deg_to_mm));
        self.set_conversion("arcmin", "mm", ConversionEntry::parametric(arcmin_to_mm));
        self.set_conversion("arcsec", "mm", ConversionEntry::parametric(arcsec_to_mm));
    }

    fn register_inch_units(&mut self) {
        self.set_conversion("m", "in", 1.0 / 0.0254);
        self.set_conversion("cm", "in", 1.0 / 2.54);
        self.set_conversion("mm", "in", 1.0 / 25.4);
        self.set_conversion("hm", "in", 1.0 / 2540.0);
        self.set_conversion("µ", "in", 1.0 / 25400.0);
        self.set_conversion("thou", "in", 0.001);
        self.set_conversion("pt", "in", 1.0 / 72.0);
        self.set_conversion("pc", "in", 1.0 / 6.0);

        self.set_conversion("px", "in", ConversionEntry::parametric(|v, p| v / p.pixel_density));
        self.set_conversion("deg", "in", ConversionEntry::parametric(|v, p| deg_to_mm(v, p) / 25.4));
        self.set_conversion("arcmin", "in", ConversionEntry::parametric(|v, p| arcmin_to_mm(v, p) / 25.4));
        self.set_conversion("arcsec", "in", ConversionEntry::parametric(|v, p| arcsec_to_mm(v, p) / 25.4));
    }

    fn register_pixel_units(&mut self) {
        for (unit, per_inch) in PIXEL_SOURCES {
            self.set_conversion(
                unit,
                "px",
                ConversionEntry::parametric(move |v, p| v * p.pixel_density / per_inch),
            );
        }

        self.set_conversion("deg", "px", ConversionEntry::parametric(|v, p| deg_to_mm(v, p) * p.pixel_density / 25.4));
        self.set_conversion("arcmin", "px", ConversionEntry::parametric(|v, p| arcmin_to_mm(v, p) * p.pixel_density / 25.4));
        self.set_conversion("arcsec", "px", ConversionEntry::parametric(|v, p| arcsec_to_mm(v, p) * p.pixel_density / 25.4));
    }

    fn register_angle_units(&mut self) {
        self.set_conversion("mm", "deg", ConversionEntry::parametric(mm_to_deg));
        self.set_conversion("arcmin", "deg", 1.0 / 60.0);
        self.set_conversion("arcsec", "deg", 1.0 / 3600.0);

        self.set_conversion("mm", "arcmin", ConversionEntry::parametric(|v, p| mm_to_deg(v, p) * 60.0));
        self.set_conversion("deg", "arcmin", 60.0);
        self.set_conversion("arcsec", "arcmin", 1.0 / 60.0);

        self.set_conversion("mm", "arcsec", ConversionEntry::parametric(|v, p| mm_to_deg(v, p) * 3600.0));
        self.set_conversion("deg", "arcsec", 3600.0);
        self.set_conversion("arcmin", "arcsec", 60.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_unit_set() {
        let registry = ConversionRegistry::new();
        let units = registry.list_units();
        for unit in [
            "mm", "km", "m", "cm", "hm", "µ", "in", "thou", "pt", "pc", "px", "deg", "arcmin", "arcsec",
        ] {
            assert!(units.iter().any(|u| u == unit), "missing {}", unit);
        }
        assert_eq!(units.len(), 14);
    }

    #[test]
    fn test_deg_mm_inverse() {
        let params = Parameters::default();
        let mm = deg_to_mm(1.0, &params);
        assert!((mm_to_deg(mm, &params) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_arcmin_matches_degree_fraction() {
        let params = Parameters::default();
        assert_eq!(arcmin_to_mm(60.0, &params), deg_to_mm(1.0, &params));
        assert_eq!(arcsec_to_mm(3600.0, &params), deg_to_mm(1.0, &params));
    }
}
