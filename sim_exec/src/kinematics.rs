//! # Vehicle kinematics
//!
//! Unicycle model of the differential-drive vehicle, integrated with a single
//! forward Euler step per tick. There is no stability guard, the timestep
//! must be small compared to the turn rate (0.01 s against ~30 cm/s wheel
//! speeds in practice).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Serialize;

use crate::loc::Pose;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Body-frame motion demand for one tick.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct ControlInput {
    /// Forward speed of the axle centre.
    ///
    /// Units: centimeters/second
    pub speed_cms: f64,

    /// Rate of change of heading, positive counter-clockwise.
    ///
    /// Units: radians/second
    pub turn_rate_rads: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Integrate the pose forward by `timestep_s` under the given control input.
///
/// Position is advanced along the heading held at the start of the step,
/// then the heading is advanced.
pub fn integrate(control: &ControlInput, pose: &Pose, timestep_s: f64) -> Pose {
    let step_cm = timestep_s * control.speed_cms;

    Pose {
        position_cm: pose.position_cm
            + step_cm * Vector2::new(pose.heading_rad.cos(), pose.heading_rad.sin()),
        heading_rad: pose.heading_rad + timestep_s * control.turn_rate_rads,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_straight_line() {
        let control = ControlInput {
            speed_cms: 29.0,
            turn_rate_rads: 0.0,
        };
        let dt = 0.01;
        let start = Pose::new(1.0, -3.0, 0.6);

        let mut pose = start;
        let n = 250;
        for _ in 0..n {
            pose = integrate(&control, &pose, dt);
        }

        let travelled = pose.position_cm - start.position_cm;
        let expected_cm = n as f64 * dt * control.speed_cms;

        assert_eq!(pose.heading_rad, start.heading_rad);
        assert!((travelled.norm() - expected_cm).abs() < 1e-9);
        assert!((travelled.normalize() - start.forward2()).norm() < 1e-9);
    }

    #[test]
    fn test_turn_only() {
        let control = ControlInput {
            speed_cms: 0.0,
            turn_rate_rads: FRAC_PI_2,
        };

        let pose = integrate(&control, &Pose::new(2.0, 2.0, 0.0), 1.0);

        assert_eq!(pose.position_cm, Pose::new(2.0, 2.0, 0.0).position_cm);
        assert_eq!(pose.heading_rad, FRAC_PI_2);
    }

    #[test]
    fn test_euler_uses_start_heading() {
        let control = ControlInput {
            speed_cms: 10.0,
            turn_rate_rads: 1.0,
        };

        let pose = integrate(&control, &Pose::new(0.0, 0.0, 0.0), 0.1);

        assert_eq!(pose.position_cm.x, 1.0);
        assert_eq!(pose.position_cm.y, 0.0);
        assert_eq!(pose.heading_rad, 0.1);
    }
}
