//! Proportional law calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::FRAC_2_PI;

use super::{LocoCtrl, WheelRates};
use crate::track::TrackDeviation;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Wheel rate for one side under the proportional law.
///
/// Scores of zero or above (on the track or outside it) give full speed. A
/// negative score means the sensor has cut inside the inner boundary, and the
/// wheel is slowed to
///
/// ```text
/// max * 2/pi * atan(|score| * gain)
/// ```
///
/// which rises from zero towards (but never reaches) `max` as the sensor goes
/// deeper. If `inner_cutoff` is set, inside scores at or beyond it in
/// magnitude are treated as full speed.
pub fn proportional_wheel_rate(
    score: f64,
    max_wheel_velocity_cms: f64,
    gain: f64,
    inner_cutoff: Option<f64>,
) -> f64 {
    if score >= 0.0 {
        return max_wheel_velocity_cms;
    }

    let magnitude = score.abs();

    match inner_cutoff {
        Some(c) if magnitude >= c => max_wheel_velocity_cms,
        _ => max_wheel_velocity_cms * FRAC_2_PI * (magnitude * gain).atan(),
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LocoCtrl {
    /// Perform the proportional law calculations.
    pub(crate) fn calc_proportional(
        &self,
        deviation: &TrackDeviation,
        gain: f64,
        inner_cutoff: Option<f64>,
    ) -> WheelRates {
        let max = self.params.max_wheel_velocity_cms;

        WheelRates::new(
            proportional_wheel_rate(deviation.left, max, gain, inner_cutoff),
            proportional_wheel_rate(deviation.right, max, gain, inner_cutoff),
        )
    }
}
