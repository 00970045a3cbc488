//! Transit Event Timeline
//!
//! Finds when each planet is in front of the stellar disk.
//! Used to annotate a light curve with per-planet transit spans.

use serde::{Deserialize, Serialize};
use tracing::trace;
use transit_geometry::{validate_system, Planet, Result, Star};

use crate::SimulationState;

/// One transit of one planet, resolved to the sample grid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TransitWindow {
    pub planet_index: usize,
    pub ingress: f64,       // First sample with nonzero occultation
    pub egress: f64,        // Last sample with nonzero occultation
    pub midpoint: f64,      // Center of the deepest samples
    pub max_depth: f64,     // Peak occulted fraction
    pub duration: f64,
}

impl TransitWindow {
    pub fn contains(&self, t: f64) -> bool {
        t >= self.ingress && t <= self.egress
    }
}

/// Scan one planet over the grid
fn planet_windows(
    star: &Star,
    planet: &Planet,
    planet_index: usize,
    mut state: SimulationState,
) -> Vec<TransitWindow> {
    let mut windows = Vec::new();
    let mut in_transit = false;
    let mut ingress = 0.0;
    let mut last_time = 0.0;
    let mut deepest = (0.0, 0.0); // First and last sample at max depth
    let mut max_depth = 0.0;

    while let Some(time) = state.advance() {
        let depth = planet.occulted_fraction(star, time);

        if depth > 0.0 && !in_transit {
            // Ingress
            in_transit = true;
            ingress = time;
            deepest = (time, time);
            max_depth = depth;
        } else if depth > 0.0 && in_transit {
            // Flat bottom samples all carry the same clamped depth
            if depth > max_depth {
                max_depth = depth;
                deepest = (time, time);
            } else if depth == max_depth {
                deepest.1 = time;
            }
        } else if depth <= 0.0 && in_transit {
            // Egress completed on the previous sample
            in_transit = false;
            windows.push(TransitWindow {
                planet_index,
                ingress,
                egress: last_time,
                midpoint: 0.5 * (deepest.0 + deepest.1),
                max_depth,
                duration: last_time - ingress,
            });
        }

        last_time = time;
    }

    // Transit still in progress at the horizon
    if in_transit {
        windows.push(TransitWindow {
            planet_index,
            ingress,
            egress: last_time,
            midpoint: 0.5 * (deepest.0 + deepest.1),
            max_depth,
            duration: last_time - ingress,
        });
    }

    windows
}

/// All transits of all planets on the run's grid, ordered by ingress
pub fn find_transits(
    star: &Star,
    planets: &[Planet],
    state: SimulationState,
) -> Result<Vec<TransitWindow>> {
    validate_system(star, planets)?;
    state.validate()?;

    let mut windows: Vec<TransitWindow> = planets
        .iter()
        .enumerate()
        .flat_map(|(i, planet)| planet_windows(star, planet, i, state.restarted()))
        .collect();

    windows.sort_by(|a, b| {
        a.ingress
            .total_cmp(&b.ingress)
            .then(a.planet_index.cmp(&b.planet_index))
    });

    for w in &windows {
        trace!(
            planet = w.planet_index,
            ingress = w.ingress,
            egress = w.egress,
            depth = w.max_depth,
            "transit window"
        );
    }

    Ok(windows)
}
