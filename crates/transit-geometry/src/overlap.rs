//! Disk Overlap Calculator
//!
//! Area of intersection between the stellar disk and a planet disk.
//! Accounts for:
//! - Disjoint disks (out of transit)
//! - Partial overlap (ingress/egress) via the circular-segment lens formula
//! - Planet disk fully inside the stellar disk
//! - Planet disk larger than, and covering, the stellar disk

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// How a planet disk meets the stellar disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    /// Disks do not overlap
    Clear,
    /// Limbs intersect (ingress or egress)
    Partial,
    /// Planet disk entirely inside the stellar disk
    Full,
    /// Planet disk covers the whole stellar disk
    Eclipsed,
}

/// Classify the overlap for center distance `d`
pub fn classify(star_radius: f64, planet_radius: f64, d: f64) -> Contact {
    let d = d.abs();
    if d >= star_radius + planet_radius {
        Contact::Clear
    } else if planet_radius <= star_radius && d <= star_radius - planet_radius {
        Contact::Full
    } else if planet_radius > star_radius && d <= planet_radius - star_radius {
        Contact::Eclipsed
    } else {
        Contact::Partial
    }
}

/// Intersection area of two circles with radii `r1`, `r2` whose centers are `d` apart
pub fn lens_overlap_area(r1: f64, r2: f64, d: f64) -> f64 {
    let d = d.abs();
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r = r1.min(r2);
        return PI * r * r;
    }

    // Half-angles subtended by the chord, clamped against rounding past ±1
    let cos1 = ((d * d + r1 * r1 - r2 * r2) / (2.0 * d * r1)).clamp(-1.0, 1.0);
    let cos2 = ((d * d + r2 * r2 - r1 * r1) / (2.0 * d * r2)).clamp(-1.0, 1.0);

    let kite = (-d + r1 + r2) * (d + r1 - r2) * (d - r1 + r2) * (d + r1 + r2);

    r1 * r1 * cos1.acos() + r2 * r2 * cos2.acos() - 0.5 * kite.max(0.0).sqrt()
}

/// Fraction of the stellar disk covered by a planet disk `d` away from its center
pub fn occulted_fraction(star_radius: f64, planet_radius: f64, d: f64) -> f64 {
    let ratio = planet_radius / star_radius;
    let ceiling = (ratio * ratio).min(1.0);

    match classify(star_radius, planet_radius, d) {
        Contact::Clear => 0.0,
        Contact::Full => ceiling,
        Contact::Eclipsed => 1.0,
        Contact::Partial => {
            let area = lens_overlap_area(star_radius, planet_radius, d);
            (area / (PI * star_radius * star_radius)).clamp(0.0, ceiling)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint_disks() {
        assert_eq!(occulted_fraction(1.0, 0.1, 1.1), 0.0);
        assert_eq!(occulted_fraction(1.0, 0.1, 5.0), 0.0);
        assert_eq!(classify(1.0, 0.1, 2.0), Contact::Clear);
    }

    #[test]
    fn test_planet_inside_star() {
        let f = occulted_fraction(1.0, 0.1, 0.5);
        assert!((f - 0.01).abs() < 1e-12);
        assert_eq!(classify(1.0, 0.1, 0.0), Contact::Full);
    }

    #[test]
    fn test_planet_covers_star() {
        assert_eq!(occulted_fraction(1.0, 2.0, 0.5), 1.0);
        assert_eq!(classify(1.0, 2.0, 0.5), Contact::Eclipsed);
        // Bigger planet, partially off the disk
        let f = occulted_fraction(1.0, 2.0, 2.5);
        assert!(f > 0.0 && f < 1.0, "fraction {}", f);
    }

    #[test]
    fn test_equal_disks_half_offset() {
        // Two unit circles one radius apart: 2π/3 − √3/2
        let area = lens_overlap_area(1.0, 1.0, 1.0);
        let expected = 2.0 * PI / 3.0 - 3.0f64.sqrt() / 2.0;
        assert!((area - expected).abs() < 1e-12, "area {}", area);
    }

    #[test]
    fn test_lens_area_symmetric_in_radii() {
        let a = lens_overlap_area(1.0, 0.3, 0.9);
        let b = lens_overlap_area(0.3, 1.0, 0.9);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_continuity_at_limb_contacts() {
        let (big_r, r) = (1.0, 0.1);
        let eps = 1e-9;

        let outer_in = occulted_fraction(big_r, r, big_r + r - eps);
        let outer_out = occulted_fraction(big_r, r, big_r + r + eps);
        assert!((outer_in - outer_out).abs() < 1e-9);

        let inner_in = occulted_fraction(big_r, r, big_r - r - eps);
        let inner_out = occulted_fraction(big_r, r, big_r - r + eps);
        assert!((inner_in - inner_out).abs() < 1e-9, "{} vs {}", inner_in, inner_out);
    }

    #[test]
    fn test_partial_overlap_is_monotonic_in_distance() {
        let mut last = occulted_fraction(1.0, 0.1, 0.9);
        for i in 1..=100 {
            let d = 0.9 + 0.2 * i as f64 / 100.0;
            let f = occulted_fraction(1.0, 0.1, d);
            assert!(f <= last + 1e-12, "not monotonic at d={}", d);
            last = f;
        }
        assert!(last < 1e-12);
    }
}
