//! Light Rays
//!
//! Evenly spaced rays leaving the stellar equator toward the observer.
//! A ray is blocked while a planet in front of the star covers its
//! footprint on the sky. Used by renderers to show which parts of the
//! disk are dimmed.

use crate::{ConfigurationError, Planet, Result, Star};
use serde::{Deserialize, Serialize};

/// Rays span this fraction of the stellar radius on either side of center
pub const RAY_SPAN: f64 = 0.9;

/// Default ray count used by the animation
pub const DEFAULT_RAY_COUNT: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightRays {
    positions: Vec<f64>,
}

impl LightRays {
    /// Lay out `count` rays from `-0.9 R` to `+0.9 R`
    pub fn new(star: &Star, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ConfigurationError::NonPositive {
                parameter: "ray count",
                value: 0.0,
            });
        }

        let half_width = star.radius() * RAY_SPAN;
        let positions = if count == 1 {
            vec![0.0]
        } else {
            let spacing = 2.0 * half_width / (count - 1) as f64;
            (0..count).map(|i| -half_width + i as f64 * spacing).collect()
        };

        Ok(Self { positions })
    }

    /// Horizontal sky positions of the rays
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Visibility of every ray at time `t` (`true` = reaches the observer)
    pub fn visibility(&self, planets: &[Planet], t: f64) -> Vec<bool> {
        self.positions
            .iter()
            .map(|&ray_x| !planets.iter().any(|p| blocks(p, ray_x, t)))
            .collect()
    }

    /// Number of rays blocked at time `t`
    pub fn blocked_count(&self, planets: &[Planet], t: f64) -> usize {
        self.visibility(planets, t).iter().filter(|v| !**v).count()
    }
}

fn blocks(planet: &Planet, ray_x: f64, t: f64) -> bool {
    if !planet.is_in_front(t) {
        return false;
    }
    let (horizontal, vertical) = planet.sky_offset(t);
    let dx = ray_x - horizontal;
    dx * dx + vertical * vertical < planet.radius() * planet.radius()
}
