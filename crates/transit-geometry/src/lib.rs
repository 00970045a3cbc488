//! Transit Geometry Library
//!
//! Circular-orbit planet positions and stellar disk occultation for
//! transit light-curve synthesis. The star sits at the origin; every
//! planet moves on a fixed-period circular orbit.
//!
//! Frame conventions:
//! - `x` is horizontal in the plane of the sky
//! - `y` is the line-of-sight coordinate scaled by the inclination factor;
//!   negative `y` is toward the observer

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use thiserror::Error;

pub mod overlap;
pub mod rays;

pub use rays::LightRays;

/// Orbital phase at inferior conjunction (planet directly in front of the star)
pub const INFERIOR_CONJUNCTION: f64 = 1.5 * PI;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{parameter} must be positive and finite, got {value}")]
    NonPositive { parameter: &'static str, value: f64 },
    #[error("{parameter} must be finite, got {value}")]
    NonFinite { parameter: &'static str, value: f64 },
    #[error("{parameter} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("orbital_radius {orbital_radius} lies inside the star (needs at least {min_orbital_radius})")]
    OrbitInsideStar {
        orbital_radius: f64,
        min_orbital_radius: f64,
    },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    // Rejects NaN as well
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonPositive { parameter, value })
    }
}

fn require_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigurationError::NonFinite { parameter, value })
    }
}

/// Host star, fixed at the origin with normalized luminosity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StarFields")]
pub struct Star {
    radius: f64,
}

impl Star {
    pub fn new(radius: f64) -> Result<Self> {
        Ok(Self {
            radius: require_positive("star radius", radius)?,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Out-of-transit brightness (always 1.0)
    pub fn luminosity(&self) -> f64 {
        1.0
    }

    /// Projected disk area
    pub fn disk_area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Re-check the constructor invariants
    pub fn validate(&self) -> Result<()> {
        require_positive("star radius", self.radius).map(|_| ())
    }
}

#[derive(Deserialize)]
struct StarFields {
    radius: f64,
}

impl TryFrom<StarFields> for Star {
    type Error = ConfigurationError;

    fn try_from(fields: StarFields) -> Result<Self> {
        Self::new(fields.radius)
    }
}

impl Default for Star {
    fn default() -> Self {
        Self { radius: 1.0 } // 1 solar radius
    }
}

/// A planet on a circular orbit about the star
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "PlanetFields")]
pub struct Planet {
    orbital_radius: f64,
    radius: f64,
    angular_velocity: f64,
    phase_offset: f64,
    inclination_factor: f64,
}

#[derive(Deserialize)]
struct PlanetFields {
    orbital_radius: f64,
    radius: f64,
    angular_velocity: f64,
    phase_offset: f64,
    inclination_factor: f64,
}

impl TryFrom<PlanetFields> for Planet {
    type Error = ConfigurationError;

    fn try_from(f: PlanetFields) -> Result<Self> {
        Self::new(
            f.orbital_radius,
            f.radius,
            f.angular_velocity,
            f.phase_offset,
            f.inclination_factor,
        )
    }
}

impl Planet {
    /// Build a planet from its orbit and disk parameters.
    ///
    /// `phase_offset` is wrapped into `[0, 2π)`. `inclination_factor` must
    /// lie in `[0, 1]`: 1 is edge-on (central transit), 0 is face-on (no
    /// transit).
    pub fn new(
        orbital_radius: f64,
        radius: f64,
        angular_velocity: f64,
        phase_offset: f64,
        inclination_factor: f64,
    ) -> Result<Self> {
        let planet = Self {
            orbital_radius: require_positive("orbital_radius", orbital_radius)?,
            radius: require_positive("planet radius", radius)?,
            angular_velocity: require_positive("angular_velocity", angular_velocity)?,
            phase_offset: require_finite("phase_offset", phase_offset)?.rem_euclid(TAU),
            inclination_factor,
        };
        planet.check_inclination()?;
        Ok(planet)
    }

    /// Build a planet from its orbital period instead of its angular velocity
    pub fn from_period(
        orbital_radius: f64,
        radius: f64,
        period: f64,
        phase_offset: f64,
        inclination_factor: f64,
    ) -> Result<Self> {
        let omega = kepler::angular_velocity(period)?;
        Self::new(orbital_radius, radius, omega, phase_offset, inclination_factor)
    }

    /// Re-phase the orbit so that inferior conjunction happens at `time`
    pub fn with_mid_transit_at(mut self, time: f64) -> Result<Self> {
        let time = require_finite("mid-transit time", time)?;
        self.phase_offset = (INFERIOR_CONJUNCTION - self.angular_velocity * time).rem_euclid(TAU);
        Ok(self)
    }

    pub fn orbital_radius(&self) -> f64 {
        self.orbital_radius
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn phase_offset(&self) -> f64 {
        self.phase_offset
    }

    pub fn inclination_factor(&self) -> f64 {
        self.inclination_factor
    }

    pub fn period(&self) -> f64 {
        TAU / self.angular_velocity
    }

    /// Orbital phase angle at time `t` (unwrapped)
    pub fn phase(&self, t: f64) -> f64 {
        self.angular_velocity * t + self.phase_offset
    }

    /// Planet center in the star frame at time `t`
    pub fn position(&self, t: f64) -> Point2<f64> {
        let phase = self.phase(t);
        Point2::new(
            self.orbital_radius * phase.cos(),
            self.orbital_radius * phase.sin() * self.inclination_factor,
        )
    }

    /// True while the planet is on the observer's side of the star
    pub fn is_in_front(&self, t: f64) -> bool {
        self.phase(t).sin() < 0.0
    }

    /// Center offset from the star on the plane of the sky, `(horizontal, vertical)`
    pub fn sky_offset(&self, t: f64) -> (f64, f64) {
        let phase = self.phase(t);
        let tilt = (1.0 - self.inclination_factor * self.inclination_factor).max(0.0).sqrt();
        (
            self.orbital_radius * phase.cos(),
            self.orbital_radius * phase.sin() * tilt,
        )
    }

    /// Projected center-to-center distance from the star on the sky
    pub fn projected_separation(&self, t: f64) -> f64 {
        let (horizontal, vertical) = self.sky_offset(t);
        horizontal.hypot(vertical)
    }

    /// Fraction of the stellar disk covered by this planet at time `t`
    pub fn occulted_fraction(&self, star: &Star, t: f64) -> f64 {
        if !self.is_in_front(t) {
            return 0.0;
        }
        overlap::occulted_fraction(star.radius, self.radius, self.projected_separation(t))
    }

    /// Re-check the constructor invariants
    pub fn validate(&self) -> Result<()> {
        require_positive("orbital_radius", self.orbital_radius)?;
        require_positive("planet radius", self.radius)?;
        require_positive("angular_velocity", self.angular_velocity)?;
        require_finite("phase_offset", self.phase_offset)?;
        self.check_inclination()
    }

    /// Check that the orbit stays outside the star
    pub fn validate_for(&self, star: &Star) -> Result<()> {
        self.validate()?;
        let min_orbital_radius = star.radius + self.radius;
        if self.orbital_radius < min_orbital_radius {
            return Err(ConfigurationError::OrbitInsideStar {
                orbital_radius: self.orbital_radius,
                min_orbital_radius,
            });
        }
        Ok(())
    }

    fn check_inclination(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.inclination_factor) {
            Ok(())
        } else {
            Err(ConfigurationError::OutOfRange {
                parameter: "inclination_factor",
                value: self.inclination_factor,
                min: 0.0,
                max: 1.0,
            })
        }
    }
}

/// Planet center at time `t`
pub fn position(planet: &Planet, t: f64) -> Point2<f64> {
    planet.position(t)
}

/// Fraction of the stellar disk a planet covers at time `t`
pub fn occulted_fraction(star: &Star, planet: &Planet, t: f64) -> f64 {
    planet.occulted_fraction(star, t)
}

/// Validate a star together with every planet orbiting it
pub fn validate_system(star: &Star, planets: &[Planet]) -> Result<()> {
    star.validate()?;
    for planet in planets {
        planet.validate_for(star)?;
    }
    Ok(())
}

pub mod kepler {
    use super::*;

    /// Days in one Julian year (orbital period at 1 AU around a solar-mass star)
    pub const DAYS_PER_YEAR: f64 = 365.25;

    /// Solar radii per astronomical unit
    pub const SOLAR_RADII_PER_AU: f64 = 215.032;

    /// Angular velocity (radians per time unit) for an orbital period
    pub fn angular_velocity(period: f64) -> Result<f64> {
        Ok(TAU / require_positive("period", period)?)
    }

    /// Orbital period in days for a semi-major axis in AU (solar-mass host)
    pub fn period_from_semi_major_axis(semi_major_axis_au: f64) -> Result<f64> {
        let a = require_positive("semi_major_axis", semi_major_axis_au)?;
        Ok(DAYS_PER_YEAR * a.powf(1.5))
    }

    pub fn au_to_solar_radii(au: f64) -> f64 {
        au * SOLAR_RADII_PER_AU
    }
}

pub mod presets {
    //! Ready-made star systems.

    use super::*;

    /// A named star system with a suggested time grid
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct SystemPreset {
        pub name: String,
        pub star: Star,
        pub planets: Vec<Planet>,
        pub step: f64,
        pub horizon: f64,
    }

    /// Edge-on planet with its inferior conjunction at `mid_transit`
    fn transiting(orbital_radius: f64, radius: f64, period: f64, mid_transit: f64) -> Planet {
        let angular_velocity = TAU / period;
        Planet {
            orbital_radius,
            radius,
            angular_velocity,
            phase_offset: (INFERIOR_CONJUNCTION - angular_velocity * mid_transit).rem_euclid(TAU),
            inclination_factor: 1.0,
        }
    }

    /// One planet on a central transit: 10-unit period, 1% depth at t = 7.5
    pub fn central_transit_demo() -> SystemPreset {
        SystemPreset {
            name: "central-transit-demo".to_string(),
            star: Star { radius: 1.0 },
            planets: vec![Planet {
                orbital_radius: 10.0,
                radius: 0.1,
                angular_velocity: TAU / 10.0,
                phase_offset: 0.0,
                inclination_factor: 1.0,
            }],
            step: 0.1,
            horizon: 10.0,
        }
    }

    /// Sun-like star with an Earth-like planet at 1 AU and a larger planet at
    /// 0.5 AU, observed for two weeks at 200 samples per day.
    ///
    /// Distances are in solar radii, times in days.
    pub fn earth_and_hot_jupiter() -> SystemPreset {
        let earth_period = kepler::DAYS_PER_YEAR;
        let inner_period = kepler::DAYS_PER_YEAR * 0.5f64.powf(1.5);

        SystemPreset {
            name: "earth-and-hot-jupiter".to_string(),
            star: Star { radius: 1.0 },
            planets: vec![
                transiting(kepler::au_to_solar_radii(1.0), 0.009, earth_period, 4.0),
                transiting(kepler::au_to_solar_radii(0.5), 0.02, inner_period, 10.0),
            ],
            step: 1.0 / 200.0,
            horizon: 14.0,
        }
    }
}
