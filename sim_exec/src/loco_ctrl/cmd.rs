//! Commands produced by LocoCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::kinematics::ControlInput;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Linear velocity demand for each wheel.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct WheelRates {
    /// Units: centimeters/second
    pub left_cms: f64,

    /// Units: centimeters/second
    pub right_cms: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The control law used to turn track-deviation scores into wheel rates.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlLaw {
    /// Full speed while off the track, stopped while on it.
    BangBang,

    /// Full speed unless inside the inner boundary, then
    /// `max * 2/pi * atan(|score| * gain)`.
    Proportional {
        /// Gain applied to the score before the `atan` map.
        gain: f64,

        /// If set, inside scores at least this large in magnitude are ignored
        /// and the wheel stays at full speed.
        #[serde(default)]
        inner_cutoff: Option<f64>,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WheelRates {
    pub fn new(left_cms: f64, right_cms: f64) -> Self {
        Self {
            left_cms,
            right_cms,
        }
    }

    /// Convert the wheel rates into a body-frame control input.
    ///
    /// The right wheel running faster gives a positive (counter-clockwise)
    /// turn rate. `axle_distance_cm` must be non-zero.
    pub fn to_control_input(&self, axle_distance_cm: f64) -> ControlInput {
        ControlInput {
            speed_cms: (self.left_cms + self.right_cms) / 2.0,
            turn_rate_rads: (self.right_cms - self.left_cms) / axle_distance_cm,
        }
    }
}

impl ControlLaw {
    /// The proportional law with the default gain and no cutoff.
    pub fn proportional() -> Self {
        ControlLaw::Proportional {
            gain: super::DEFAULT_PROPORTIONAL_GAIN,
            inner_cutoff: None,
        }
    }
}
