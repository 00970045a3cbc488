//! Simulation Configuration
//!
//! Serializable description of one run: the star, its planets and the
//! sampling grid. Loading it from disk is left to the caller.

use serde::{Deserialize, Serialize};
use transit_geometry::presets::{self, SystemPreset};
use transit_geometry::{validate_system, LightRays, Planet, Result, Star};

use crate::events::{self, TransitWindow};
use crate::{synth, LightCurve, SimulationState};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub star: Star,
    #[serde(default)]
    pub planets: Vec<Planet>,
    /// Sampling interval (days for the presets)
    pub step: f64,
    /// Last sample time
    pub horizon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        presets::earth_and_hot_jupiter().into()
    }
}

impl From<SystemPreset> for SimulationConfig {
    fn from(preset: SystemPreset) -> Self {
        Self {
            star: preset.star,
            planets: preset.planets,
            step: preset.step,
            horizon: preset.horizon,
        }
    }
}

impl SimulationConfig {
    pub fn new(star: Star) -> Self {
        Self {
            star,
            planets: Vec::new(),
            step: 0.01,
            horizon: 1.0,
        }
    }

    pub fn with_planet(mut self, planet: Planet) -> Self {
        self.planets.push(planet);
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_system(&self.star, &self.planets)?;
        SimulationState::new(self.step, self.horizon).map(|_| ())
    }

    /// Fresh clock for this grid
    pub fn state(&self) -> Result<SimulationState> {
        SimulationState::new(self.step, self.horizon)
    }

    /// Synthesize the light curve
    pub fn run(&self) -> Result<LightCurve> {
        self.validate()?;
        synth::generate(&self.star, &self.planets, self.step, self.horizon)
    }

    /// Transit windows on this grid
    pub fn transits(&self) -> Result<Vec<TransitWindow>> {
        events::find_transits(&self.star, &self.planets, self.state()?)
    }

    /// Ray layout over this star
    pub fn rays(&self, count: usize) -> Result<LightRays> {
        LightRays::new(&self.star, count)
    }
}
