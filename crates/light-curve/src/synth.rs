//! Light Curve Synthesizer
//!
//! Steps the simulation clock, asks every planet for its occulted
//! fraction and folds them into one relative flux per sample.
//!
//! Planets are combined additively and the total is capped at 1. Overlap
//! between two planet disks is counted twice, which only matters when two
//! planets transit at the same moment.

use tracing::{debug, warn};
use transit_geometry::{validate_system, Planet, Result, Star};

use crate::{LightCurve, LightCurveSample, SimulationState};

/// Relative flux at time `t`, plus whether the occultation sum saturated
fn combined_flux(star: &Star, planets: &[Planet], t: f64) -> (f64, bool) {
    let total: f64 = planets.iter().map(|p| p.occulted_fraction(star, t)).sum();
    let saturated = total > 1.0;
    (1.0 - total.clamp(0.0, 1.0), saturated)
}

/// Relative stellar flux at time `t`
pub fn flux_at(star: &Star, planets: &[Planet], t: f64) -> f64 {
    combined_flux(star, planets, t).0
}

/// Lazy sample sequence over a simulation grid
pub struct Samples<'a> {
    star: &'a Star,
    planets: &'a [Planet],
    state: SimulationState,
    saturated: u64,
}

impl<'a> Samples<'a> {
    /// Clock position after the samples consumed so far
    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Samples whose summed occultation exceeded the whole disk
    pub fn saturated(&self) -> u64 {
        self.saturated
    }
}

impl Iterator for Samples<'_> {
    type Item = LightCurveSample;

    fn next(&mut self) -> Option<LightCurveSample> {
        let time = self.state.advance()?;
        let (relative_flux, saturated) = combined_flux(self.star, self.planets, time);
        if saturated {
            self.saturated += 1;
        }
        Some(LightCurveSample {
            time,
            relative_flux,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.state.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

/// Iterate samples from `state` onward
pub fn samples<'a>(
    star: &'a Star,
    planets: &'a [Planet],
    state: SimulationState,
) -> Result<Samples<'a>> {
    validate_system(star, planets)?;
    state.validate()?;
    Ok(Samples {
        star,
        planets,
        state,
        saturated: 0,
    })
}

/// Produce the full light curve for `t = 0, step, 2·step, …` up to `horizon`
pub fn generate(star: &Star, planets: &[Planet], step: f64, horizon: f64) -> Result<LightCurve> {
    let state = SimulationState::new(step, horizon)?;
    let mut iter = samples(star, planets, state)?;

    debug!(
        planets = planets.len(),
        step,
        horizon,
        samples = state.total_samples(),
        "generating light curve"
    );

    let collected: Vec<LightCurveSample> = iter.by_ref().collect();
    if iter.saturated() > 0 {
        warn!(
            samples = iter.saturated(),
            "combined occultation exceeded the stellar disk; flux clamped to 0"
        );
    }

    let curve = LightCurve::from_samples(collected);
    debug!(
        samples = curve.len(),
        min_flux = curve.min_flux(),
        "light curve complete"
    );
    Ok(curve)
}

/// Continue a run for at most `max_samples` samples.
///
/// Returns the samples and the advanced clock; chaining calls until the
/// state is finished reproduces [`generate`] exactly.
pub fn resume(
    star: &Star,
    planets: &[Planet],
    state: SimulationState,
    max_samples: usize,
) -> Result<(Vec<LightCurveSample>, SimulationState)> {
    let mut iter = samples(star, planets, state)?;
    let chunk: Vec<LightCurveSample> = iter.by_ref().take(max_samples).collect();
    if iter.saturated() > 0 {
        warn!(samples = iter.saturated(), "combined occultation saturated");
    }
    Ok((chunk, iter.state()))
}
