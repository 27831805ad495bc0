//! # Localisation module
//!
//! The simulated vehicle knows its pose exactly, so localisation reduces to
//! the [`Pose`] type shared by the sensor model, kinematics and the driver.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and heading in the track frame) of the vehicle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position of the centre of the wheel axle.
    ///
    /// Units: centimeters
    pub position_cm: Point2<f64>,

    /// The heading of the vehicle, counter-clockwise from the +X axis.
    ///
    /// Not wrapped, repeated laps accumulate multiples of 2pi.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    pub fn new(x_cm: f64, y_cm: f64, heading_rad: f64) -> Self {
        Self {
            position_cm: Point2::new(x_cm, y_cm),
            heading_rad,
        }
    }

    /// Unit vector pointing along the vehicle's heading.
    pub fn forward2(&self) -> Vector2<f64> {
        Vector2::new(self.heading_rad.cos(), self.heading_rad.sin())
    }

    /// Heading wrapped into the range [0, 2pi).
    pub fn heading_2pi(&self) -> f64 {
        util::maths::wrap_2pi(self.heading_rad)
    }

    /// True if every component of the pose is finite.
    pub fn is_finite(&self) -> bool {
        self.position_cm.x.is_finite()
            && self.position_cm.y.is_finite()
            && self.heading_rad.is_finite()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_pose_heading() {
        let pose = Pose::new(1.0, 2.0, -PI / 2.0);
        assert!((pose.heading_2pi() - 1.5 * PI).abs() < 1e-12);
        assert!(pose.forward2().x.abs() < 1e-12);
        assert!((pose.forward2().y + 1.0).abs() < 1e-12);
        assert!(pose.is_finite());
        assert!(!Pose::new(std::f64::NAN, 0.0, 0.0).is_finite());
    }
}
