//! Process-wide configuration changes
//!
//! Kept in its own test binary as a single test: it mutates the shared
//! registry, which would race with any other test in the same process.

use dimension_core::global::{self, configure, conversion_function};
use dimension_core::{ConfigUpdate, ResolveOptions};

#[test]
fn test_global_configuration_lifecycle() {
    configure(ConfigUpdate::new().pixel_density(100.0)).unwrap();
    let frozen = conversion_function("in", "px", ResolveOptions::frozen()).unwrap();
    let live = conversion_function("in", "px", ResolveOptions::default()).unwrap();
    let cm_to_px = conversion_function("cm", "px", ResolveOptions::default()).unwrap();

    configure(ConfigUpdate::new().pixel_density(200.0)).unwrap();
    assert_eq!(frozen.convert(1.0), 100.0);
    assert_eq!(live.convert(1.0), 200.0);
    assert!((cm_to_px.convert(2.54) - 200.0).abs() < 1e-9);

    // Omitting aliases keeps them
    assert_eq!(global::un_alias("°"), "deg");

    configure(ConfigUpdate::new().aliases([("foo", "mm")])).unwrap();
    assert_eq!(global::un_alias("foo"), "mm");
    assert_eq!(global::un_alias("°"), "°");

    configure(ConfigUpdate::new().aliases(Vec::<(&str, &str)>::new())).unwrap();
    assert_eq!(global::un_alias("foo"), "foo");

    configure(ConfigUpdate::new().default_unit("in").default_output_unit(Some("mm"))).unwrap();
    assert_eq!(global::default_unit(), "in");
    assert_eq!(global::default_output_unit().as_deref(), Some("mm"));

    assert!(configure(ConfigUpdate::new().viewing_distance(f64::NAN)).is_err());
    assert_eq!(global::parameters().viewing_distance, 600.0);
}
