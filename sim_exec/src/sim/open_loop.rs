//! # Open-loop kinematics
//!
//! Drives the vehicle with constant wheel rates and no sensing, used to check
//! the kinematics on their own.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use crate::{
    kinematics,
    loc::Pose,
    loco_ctrl::{self, WheelRates},
    params::{check_finite, check_non_negative, check_positive, ParamsError},
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Integrate the vehicle from `start` for `duration_s` under constant wheel
/// rates.
///
/// Wheel rates are used as given, without the vehicle's speed limits. Returns
/// the pose after each step, not including `start`. The number of steps is
/// `duration_s / timestep_s` rounded up.
pub fn run(
    vehicle: &loco_ctrl::Params,
    wheel_rates: WheelRates,
    start: Pose,
    duration_s: f64,
    timestep_s: f64,
) -> Result<Vec<Pose>, ParamsError> {
    vehicle.validate()?;
    check_finite("wheel_rates.left_cms", wheel_rates.left_cms)?;
    check_finite("wheel_rates.right_cms", wheel_rates.right_cms)?;
    check_non_negative("duration_s", duration_s)?;
    check_positive("timestep_s", timestep_s)?;

    // Small tolerance so an exact multiple of the timestep isn't rounded up
    // by representation error
    let num_steps = (duration_s / timestep_s - 1e-9).ceil().max(0.0) as usize;

    let control = wheel_rates.to_control_input(vehicle.axle_distance_cm);

    debug!(
        "Open loop run: {} steps of {} s with {:?}",
        num_steps, timestep_s, control
    );

    let mut poses = Vec::with_capacity(num_steps);
    let mut pose = start;
    for _ in 0..num_steps {
        pose = kinematics::integrate(&control, &pose, timestep_s);
        poses.push(pose);
    }

    Ok(poses)
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::loco_ctrl::ControlLaw;
    use nalgebra::Point2;

    fn vehicle() -> loco_ctrl::Params {
        loco_ctrl::Params {
            axle_distance_cm: 3.5,
            max_wheel_velocity_cms: 29.0,
            law: ControlLaw::BangBang,
        }
    }

    #[test]
    fn test_equal_rates_drive_straight() {
        let poses = run(
            &vehicle(),
            WheelRates::new(10.0, 10.0),
            Pose::new(0.0, 0.0, 0.0),
            2.0,
            0.01,
        )
        .unwrap();

        assert_eq!(poses.len(), 200);

        let last = poses.last().unwrap();
        assert!((last.position_cm.x - 20.0).abs() < 1e-9);
        assert_eq!(last.position_cm.y, 0.0);
        assert_eq!(last.heading_rad, 0.0);
    }

    #[test]
    fn test_unequal_rates_drive_a_circle() {
        let axle_cm = 3.5;
        let (vl, vr) = (0.0, 29.0);
        let radius_cm = axle_cm * (vl + vr) / (2.0 * (vr - vl));

        let start = Pose::new(1.0, 2.0, 0.3);
        let poses = run(&vehicle(), WheelRates::new(vl, vr), start, 1.0, 0.001).unwrap();

        assert_eq!(poses.len(), 1000);

        // Right wheel faster so the centre of the circle is to the left
        let left = nalgebra::Vector2::new(-start.heading_rad.sin(), start.heading_rad.cos());
        let centre: Point2<f64> = start.position_cm + radius_cm * left;

        for p in &poses {
            let r = (p.position_cm - centre).norm();
            assert!((r - radius_cm).abs() < 0.02, "radius {}", r);
        }

        // Counter-clockwise
        assert!(poses.last().unwrap().heading_rad > start.heading_rad);
    }

    #[test]
    fn test_zero_duration() {
        let poses = run(
            &vehicle(),
            WheelRates::new(10.0, 10.0),
            Pose::new(0.0, 0.0, 0.0),
            0.0,
            0.01,
        )
        .unwrap();

        assert!(poses.is_empty());
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let start = Pose::new(0.0, 0.0, 0.0);
        let wheels = WheelRates::new(10.0, 10.0);

        assert_eq!(
            run(&vehicle(), wheels, start, 1.0, 0.0),
            Err(ParamsError::NotPositive("timestep_s", 0.0))
        );
        assert_eq!(
            run(&vehicle(), wheels, start, -1.0, 0.01),
            Err(ParamsError::Negative("duration_s", -1.0))
        );

        let mut v = vehicle();
        v.axle_distance_cm = 0.0;
        assert!(run(&v, wheels, start, 1.0, 0.01).is_err());
    }
}
