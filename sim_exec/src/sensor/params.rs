//! Parameters structure for the line sensors

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::params::{check_non_negative, check_positive, ParamsError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geometry of the two line sensors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Distance from the axle centre to the sensor pair, measured forward
    /// along the vehicle centreline.
    ///
    /// Units: centimeters
    pub sensor_length_cm: f64,

    /// Lateral separation between the left and right sensors.
    ///
    /// Units: centimeters
    pub sensor_width_cm: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_positive("sensor.sensor_length_cm", self.sensor_length_cm)?;
        check_non_negative("sensor.sensor_width_cm", self.sensor_width_cm)?;
        Ok(())
    }
}
