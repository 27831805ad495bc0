//! Parameters structure for LocoCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::ControlLaw;
use crate::params::{check_non_negative, check_positive, ParamsError};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Gain of the proportional law when none is configured.
pub const DEFAULT_PROPORTIONAL_GAIN: f64 = 100.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Locomotion control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- GEOMETRY ----
    /// Distance used as the denominator when converting the wheel speed
    /// difference into a turn rate.
    ///
    /// Units: centimeters
    pub axle_distance_cm: f64,

    // ---- CAPABILITIES ----
    /// Maximum linear velocity of either wheel. Wheels never run backwards,
    /// so the minimum is zero.
    ///
    /// Units: centimeters/second
    pub max_wheel_velocity_cms: f64,

    // ---- CONTROL ----
    /// The law used to compute wheel rates from the sensor scores.
    pub law: ControlLaw,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_positive("vehicle.axle_distance_cm", self.axle_distance_cm)?;
        check_non_negative("vehicle.max_wheel_velocity_cms", self.max_wheel_velocity_cms)?;

        if let ControlLaw::Proportional { gain, inner_cutoff } = self.law {
            check_positive("vehicle.law.gain", gain)?;
            if let Some(c) = inner_cutoff {
                check_positive("vehicle.law.inner_cutoff", c)?;
            }
        }

        Ok(())
    }
}
