//! # Sensor model
//!
//! The vehicle carries two line sensors mounted side by side ahead of the
//! axle. In the vehicle frame each sensor sits at polar offset `(r, +theta)`
//! (left) or `(r, -theta)` (right) from the axle centre, where
//!
//! ```text
//! r     = sqrt(length^2 + (width / 2)^2)
//! theta = atan((width / 2) / length)
//! ```
//!
//! The model rotates these offsets by the vehicle heading to get the sensor
//! positions in the track frame.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

pub use params::Params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Point2, Vector2};
use serde::Serialize;

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Maps a vehicle pose to the positions of its two sensors.
#[derive(Debug, Copy, Clone)]
pub struct SensorModel {
    /// Distance from the axle centre to each sensor
    radius_cm: f64,

    /// Angle between the vehicle centreline and the line to each sensor
    offset_rad: f64,
}

/// Positions of both sensors in the track frame.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SensorPoints {
    pub left_cm: Point2<f64>,
    pub right_cm: Point2<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SensorModel {
    /// Build the model from the sensor geometry.
    ///
    /// The parameters should have been validated, a zero sensor length is
    /// not rejected here.
    pub fn new(params: &Params) -> Self {
        let half_width_cm = params.sensor_width_cm / 2.0;

        Self {
            radius_cm: params.sensor_length_cm.hypot(half_width_cm),
            offset_rad: (half_width_cm / params.sensor_length_cm).atan(),
        }
    }

    /// Compute the sensor positions for the given pose.
    pub fn sense(&self, pose: &Pose) -> SensorPoints {
        let left_rad = pose.heading_rad + self.offset_rad;
        let right_rad = pose.heading_rad - self.offset_rad;

        SensorPoints {
            left_cm: pose.position_cm
                + self.radius_cm * Vector2::new(left_rad.cos(), left_rad.sin()),
            right_cm: pose.position_cm
                + self.radius_cm * Vector2::new(right_rad.cos(), right_rad.sin()),
        }
    }
}

impl SensorPoints {
    /// Midpoint between the two sensors.
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.left_cm, &self.right_cm)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
