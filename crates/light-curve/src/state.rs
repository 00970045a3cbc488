//! Simulation Clock
//!
//! Explicit, resumable stepping state. Sample `k` sits at time `k * step`,
//! so timestamps never accumulate rounding from repeated addition.

use serde::{Deserialize, Serialize};
use transit_geometry::{ConfigurationError, Result};

/// Largest `horizon / step` ratio that still counts samples in a `u64`
const MAX_SAMPLE_SPAN: f64 = u64::MAX as f64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationState {
    step: f64,
    horizon: f64,
    /// Index of the next sample to produce
    index: u64,
}

impl SimulationState {
    /// Fresh clock at t = 0
    pub fn new(step: f64, horizon: f64) -> Result<Self> {
        let state = Self {
            step,
            horizon,
            index: 0,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(ConfigurationError::NonPositive {
                parameter: "step",
                value: self.step,
            });
        }
        if !(self.horizon > 0.0 && self.horizon.is_finite()) {
            return Err(ConfigurationError::NonPositive {
                parameter: "horizon",
                value: self.horizon,
            });
        }
        let span = self.horizon / self.step;
        if !(span < MAX_SAMPLE_SPAN) {
            return Err(ConfigurationError::OutOfRange {
                parameter: "horizon / step",
                value: span,
                min: 0.0,
                max: MAX_SAMPLE_SPAN,
            });
        }
        Ok(())
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Time of the next sample
    pub fn time(&self) -> f64 {
        self.time_of(self.index)
    }

    /// Time of sample `index` on this grid
    pub fn time_of(&self, index: u64) -> f64 {
        index as f64 * self.step
    }

    /// Number of samples already produced
    pub fn sample_index(&self) -> u64 {
        self.index
    }

    /// Samples in a full run: `floor(horizon / step) + 1`
    pub fn total_samples(&self) -> u64 {
        ((self.horizon / self.step).floor() as u64).saturating_add(1)
    }

    pub fn remaining(&self) -> u64 {
        self.total_samples().saturating_sub(self.index)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.total_samples()
    }

    /// Same grid, rewound to t = 0
    pub fn restarted(&self) -> Self {
        Self { index: 0, ..*self }
    }

    /// Hand out the next sample time and move the clock forward
    pub(crate) fn advance(&mut self) -> Option<f64> {
        if self.is_finished() {
            return None;
        }
        let t = self.time();
        self.index += 1;
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_grid() {
        assert!(SimulationState::new(0.0, 10.0).is_err());
        assert!(SimulationState::new(-0.1, 10.0).is_err());
        assert!(SimulationState::new(0.1, 0.0).is_err());
        assert!(SimulationState::new(f64::NAN, 10.0).is_err());

        let err = SimulationState::new(0.1, -1.0).unwrap_err();
        assert!(err.to_string().contains("horizon"), "{}", err);
    }

    #[test]
    fn test_rejects_grid_too_fine_to_count() {
        let err = SimulationState::new(1e-300, 1e300).unwrap_err();
        assert!(err.to_string().contains("horizon / step"), "{}", err);
        assert!(SimulationState::new(f64::MIN_POSITIVE, 1.0).is_err());

        // Just under the limit still counts without overflow
        let state = SimulationState::new(1.0, 1e19).unwrap();
        assert_eq!(state.total_samples(), 10_000_000_000_000_000_001);
    }

    #[test]
    fn test_sample_count() {
        let state = SimulationState::new(0.1, 10.0).unwrap();
        assert_eq!(state.total_samples(), 101);

        let state = SimulationState::new(3.0, 10.0).unwrap();
        assert_eq!(state.total_samples(), 4);

        // Step longer than the horizon still yields t = 0
        let state = SimulationState::new(20.0, 10.0).unwrap();
        assert_eq!(state.total_samples(), 1);
    }

    #[test]
    fn test_advance_until_finished() {
        let mut state = SimulationState::new(3.0, 10.0).unwrap();
        let times: Vec<f64> = std::iter::from_fn(|| state.advance()).collect();
        assert_eq!(times, vec![0.0, 3.0, 6.0, 9.0]);
        assert!(state.is_finished());
        assert_eq!(state.remaining(), 0);
        assert_eq!(state.advance(), None);

        let fresh = state.restarted();
        assert_eq!(fresh.sample_index(), 0);
        assert_eq!(fresh.remaining(), 4);
    }
}
