//! Bang-bang law calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{LocoCtrl, WheelRates};
use crate::track::TrackDeviation;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Wheel rate for one side under the bang-bang law.
///
/// Any non-zero score (the sensor is off the track on either side) gives full
/// speed, a score of exactly zero (on the track) stops the wheel. The sign of
/// the score is not used.
pub fn bang_bang_wheel_rate(score: f64, max_wheel_velocity_cms: f64) -> f64 {
    if score != 0.0 {
        max_wheel_velocity_cms
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LocoCtrl {
    /// Perform the bang-bang law calculations.
    ///
    /// Only one of the two outputs is ever possible per wheel, so the vehicle
    /// either drives straight at full speed, pivots about a stopped wheel, or
    /// stops entirely when both sensors are on the track.
    pub(crate) fn calc_bang_bang(&self, deviation: &TrackDeviation) -> WheelRates {
        let max = self.params.max_wheel_velocity_cms;

        WheelRates::new(
            bang_bang_wheel_rate(deviation.left, max),
            bang_bang_wheel_rate(deviation.right, max),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bang_bang_wheel_rate() {
        assert_eq!(bang_bang_wheel_rate(0.0, 29.0), 0.0);
        assert_eq!(bang_bang_wheel_rate(-0.0, 29.0), 0.0);
        assert_eq!(bang_bang_wheel_rate(0.2, 29.0), 29.0);
        assert_eq!(bang_bang_wheel_rate(-0.2, 29.0), 29.0);
        assert_eq!(bang_bang_wheel_rate(1e-300, 29.0), 29.0);
    }
}
