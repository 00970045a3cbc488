//! Property tests for the transit geometry.

use proptest::prelude::*;
use std::f64::consts::TAU;
use transit_geometry::overlap::{lens_overlap_area, occulted_fraction};
use transit_geometry::{Planet, Star};

/// Star radius in simulation units
fn star_radius() -> impl Strategy<Value = f64> {
    0.1f64..10.0
}

/// Planet-to-star radius ratio
fn radius_ratio() -> impl Strategy<Value = f64> {
    0.001f64..0.9
}

proptest! {
    #[test]
    fn fraction_stays_within_bounds(
        big_r in star_radius(),
        ratio in radius_ratio(),
        d_scale in 0.0f64..3.0,
    ) {
        let r = big_r * ratio;
        let f = occulted_fraction(big_r, r, d_scale * big_r);
        prop_assert!(f >= 0.0);
        prop_assert!(f <= ratio * ratio + 1e-15);
    }

    #[test]
    fn fraction_continuous_at_outer_contact(big_r in star_radius(), ratio in radius_ratio()) {
        let r = big_r * ratio;
        let eps = 1e-9 * big_r;
        let inside = occulted_fraction(big_r, r, big_r + r - eps);
        let outside = occulted_fraction(big_r, r, big_r + r + eps);
        prop_assert!((inside - outside).abs() < 1e-9);
    }

    #[test]
    fn fraction_continuous_at_inner_contact(big_r in star_radius(), ratio in radius_ratio()) {
        let r = big_r * ratio;
        let eps = 1e-9 * big_r;
        let inside = occulted_fraction(big_r, r, big_r - r - eps);
        let outside = occulted_fraction(big_r, r, big_r - r + eps);
        prop_assert!((inside - outside).abs() < 1e-9, "{} vs {}", inside, outside);
    }

    #[test]
    fn lens_area_never_exceeds_smaller_disk(
        r1 in 0.01f64..5.0,
        r2 in 0.01f64..5.0,
        d in 0.0f64..12.0,
    ) {
        let area = lens_overlap_area(r1, r2, d);
        let smaller = r1.min(r2);
        prop_assert!(area >= -1e-12);
        prop_assert!(area <= std::f64::consts::PI * smaller * smaller + 1e-9);
    }

    #[test]
    fn face_on_orbit_never_occults(
        ratio in radius_ratio(),
        distance in 3.0f64..100.0,
        period in 0.5f64..500.0,
        t in 0.0f64..1000.0,
    ) {
        let star = Star::new(1.0).unwrap();
        let planet = Planet::from_period(distance, ratio, period, 0.0, 0.0).unwrap();
        prop_assert_eq!(planet.occulted_fraction(&star, t), 0.0);
    }

    #[test]
    fn position_stays_on_projected_orbit(
        distance in 2.0f64..100.0,
        phase in 0.0f64..TAU,
        t in 0.0f64..100.0,
    ) {
        let planet = Planet::new(distance, 0.1, 0.3, phase, 1.0).unwrap();
        let p = planet.position(t);
        prop_assert!((p.coords.norm() - distance).abs() < 1e-9 * distance);
    }
}
