//! Property-based invariants for the panorama pixel projection.
//!
//! 1. Every projected point lies on the sphere of the requested radius.
//! 2. Longitude wraps every full texture width.
//! 3. The top and bottom rows collapse onto the poles.

use foundation::math::{Vec2, pixel_to_sphere};
use proptest::prelude::*;

fn resolution_strategy() -> impl Strategy<Value = Vec2> {
    (1.0f64..8192.0, 1.0f64..8192.0).prop_map(|(w, h)| Vec2::new(w, h))
}

proptest! {
    #[test]
    fn projection_preserves_radius(
        res in resolution_strategy(),
        fx in -2.0f64..3.0,
        fy in -2.0f64..3.0,
        radius in 0.001f64..1.0e6,
    ) {
        let p = pixel_to_sphere(Vec2::new(fx * res.x, fy * res.y), res, radius);
        let tolerance = radius * 1e-9;
        prop_assert!(
            (p.length() - radius).abs() <= tolerance,
            "|{:?}| = {} but radius is {}", p, p.length(), radius
        );
    }

    #[test]
    fn longitude_wraps_every_width(
        res in resolution_strategy(),
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        radius in 1.0f64..5000.0,
    ) {
        let a = pixel_to_sphere(Vec2::new(fx * res.x, fy * res.y), res, radius);
        let b = pixel_to_sphere(Vec2::new(fx * res.x + res.x, fy * res.y), res, radius);
        let tolerance = radius * 1e-9;
        prop_assert!((a.x - b.x).abs() <= tolerance);
        prop_assert!((a.y - b.y).abs() <= tolerance);
        prop_assert!((a.z - b.z).abs() <= tolerance);
    }

    #[test]
    fn top_and_bottom_rows_hit_the_poles(
        res in resolution_strategy(),
        fx in -1.0f64..2.0,
        radius in 1.0f64..5000.0,
    ) {
        let top = pixel_to_sphere(Vec2::new(fx * res.x, 0.0), res, radius);
        let bottom = pixel_to_sphere(Vec2::new(fx * res.x, res.y), res, radius);
        let tolerance = radius * 1e-9;
        prop_assert!((top.y - radius).abs() <= tolerance);
        prop_assert!((bottom.y + radius).abs() <= tolerance);
    }
}
