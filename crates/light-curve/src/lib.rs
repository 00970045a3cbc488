//! Light Curve Library
//!
//! Synthetic photometry for planetary transits. Each run steps a
//! [`SimulationState`] across a fixed grid, queries the transit geometry
//! for every planet and records the star's relative flux:
//!
//! ```text
//! flux(t) = 1 − min(1, Σ occulted_fraction(planet, t))
//! ```
//!
//! Output is deterministic: identical inputs give bitwise-identical samples.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod events;
pub mod state;
pub mod synth;

pub use config::SimulationConfig;
pub use events::{find_transits, TransitWindow};
pub use state::SimulationState;
pub use synth::{flux_at, generate, resume, samples, Samples};
pub use transit_geometry::{ConfigurationError, Planet, Result, Star};

/// Relative stellar flux at one instant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LightCurveSample {
    pub time: f64,
    pub relative_flux: f64, // 1.0 = out of transit
}

/// Time-ordered output of one run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LightCurve {
    samples: Vec<LightCurveSample>,
}

impl LightCurve {
    pub(crate) fn from_samples(samples: Vec<LightCurveSample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[LightCurveSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LightCurveSample> {
        self.samples.iter()
    }

    pub fn times(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time).collect()
    }

    pub fn fluxes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.relative_flux).collect()
    }

    /// Dimmest sample (1.0 for an empty curve)
    pub fn min_flux(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.relative_flux)
            .fold(1.0, f64::min)
    }

    /// Largest fractional drop below full brightness
    pub fn transit_depth(&self) -> f64 {
        1.0 - self.min_flux()
    }

    pub fn into_samples(self) -> Vec<LightCurveSample> {
        self.samples
    }
}

impl<'a> IntoIterator for &'a LightCurve {
    type Item = &'a LightCurveSample;
    type IntoIter = std::slice::Iter<'a, LightCurveSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_statistics() {
        let curve = LightCurve::from_samples(vec![
            LightCurveSample {
                time: 0.0,
                relative_flux: 1.0,
            },
            LightCurveSample {
                time: 1.0,
                relative_flux: 0.68,
            },
            LightCurveSample {
                time: 2.0,
                relative_flux: 1.0,
            },
        ]);

        assert_eq!(curve.len(), 3);
        assert_eq!(curve.min_flux(), 0.68);
        assert!((curve.transit_depth() - 0.32).abs() < 1e-12);
        assert_eq!(curve.times(), vec![0.0, 1.0, 2.0]);
        assert_eq!((&curve).into_iter().count(), 3);
    }

    #[test]
    fn test_empty_curve() {
        let curve = LightCurve::default();
        assert!(curve.is_empty());
        assert_eq!(curve.min_flux(), 1.0);
        assert_eq!(curve.transit_depth(), 0.0);
    }

    #[test]
    fn test_serializes_as_sample_list() {
        let curve = generate(&Star::default(), &[], 1.0, 2.0).unwrap();
        let json = serde_json::to_value(&curve).unwrap();
        assert_eq!(json["samples"].as_array().unwrap().len(), 3);
        assert_eq!(json["samples"][1]["time"], 1.0);
        assert_eq!(json["samples"][1]["relative_flux"], 1.0);
    }
}
