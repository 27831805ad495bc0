//! Simulation parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::path::Path;

// Internal
use super::SimError;
use crate::{
    loc::Pose,
    loco_ctrl,
    params::{check_finite, check_positive, ParamsError},
    sensor, track,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Parameter file used when no path is given, relative to the software root's
/// `params` directory.
pub const DEFAULT_PARAMS_FILE: &str = "track_sim.toml";

/// Largest accepted timestep. Anything coarser is meaningless for the Euler
/// step and cannot be paced in real time.
///
/// Units: seconds
pub const MAX_TIMESTEP_S: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for a complete simulation run.
///
/// There are no defaults, every value must be present in the parameter file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Fixed integration timestep of one tick.
    ///
    /// Units: seconds
    pub timestep_s: f64,

    /// Pose of the vehicle at tick 0.
    pub start_pose: StartPose,

    /// Track geometry
    pub track: track::Params,

    /// Line sensor geometry
    pub sensor: sensor::Params,

    /// Vehicle geometry, capabilities and control law
    pub vehicle: loco_ctrl::Params,
}

/// Starting pose as written in the parameter file.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct StartPose {
    /// Units: centimeters
    pub x_cm: f64,

    /// Units: centimeters
    pub y_cm: f64,

    /// Counter-clockwise from +X.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Load the parameters from the given file, or from
    /// [`DEFAULT_PARAMS_FILE`] under the software root if there is no path.
    ///
    /// The parameters are not validated, overrides can still be applied
    /// before building the simulation.
    pub fn load(path: Option<&Path>) -> Result<Self, SimError> {
        match path {
            Some(p) => util::params::load_from_path::<Self, _>(p),
            None => util::params::load::<Self>(DEFAULT_PARAMS_FILE),
        }
        .map_err(SimError::ParamLoadError)
    }

    /// Check every parameter in the run.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let timestep_s = check_positive("timestep_s", self.timestep_s)?;
        if timestep_s > MAX_TIMESTEP_S {
            return Err(ParamsError::TooLarge(
                "timestep_s",
                timestep_s,
                MAX_TIMESTEP_S,
            ));
        }
        check_finite("start_pose.x_cm", self.start_pose.x_cm)?;
        check_finite("start_pose.y_cm", self.start_pose.y_cm)?;
        check_finite("start_pose.heading_rad", self.start_pose.heading_rad)?;
        self.track.validate()?;
        self.sensor.validate()?;
        self.vehicle.validate()?;

        Ok(())
    }
}

impl From<StartPose> for Pose {
    fn from(start: StartPose) -> Self {
        Pose::new(start.x_cm, start.y_cm, start.heading_rad)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loco_ctrl::ControlLaw;
    use crate::track::TrackScoring;

    const PARAMS_TOML: &str = r#"
        timestep_s = 0.01

        [start_pose]
        x_cm = 0.0
        y_cm = 7.5
        heading_rad = 0.0

        [track]
        centre_cm = [0.0, 0.0]
        semi_axis_a_cm = 12.5
        semi_axis_b_cm = 7.5
        thickness_cm = 1.5

        [sensor]
        sensor_length_cm = 4.0
        sensor_width_cm = 2.5

        [vehicle]
        axle_distance_cm = 3.5
        max_wheel_velocity_cms = 29.0

        [vehicle.law]
        type = "proportional"
        gain = 100.0
    "#;

    #[test]
    fn test_params_from_toml() {
        let params: Params = util::params::from_str(PARAMS_TOML).unwrap();

        assert_eq!(params.timestep_s, 0.01);
        assert_eq!(params.track.scoring, TrackScoring::Annulus);
        assert_eq!(
            params.vehicle.law,
            ControlLaw::Proportional {
                gain: 100.0,
                inner_cutoff: None
            }
        );
        assert_eq!(Pose::from(params.start_pose), Pose::new(0.0, 7.5, 0.0));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_validation() {
        let mut params: Params = util::params::from_str(PARAMS_TOML).unwrap();
        params.timestep_s = 0.0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("timestep_s", 0.0))
        );

        let mut params: Params = util::params::from_str(PARAMS_TOML).unwrap();
        params.sensor.sensor_length_cm = 0.0;
        assert_eq!(
            params.validate(),
            Err(ParamsError::NotPositive("sensor.sensor_length_cm", 0.0))
        );

        let mut params: Params = util::params::from_str(PARAMS_TOML).unwrap();
        params.start_pose.heading_rad = std::f64::INFINITY;
        assert!(params.validate().is_err());

        // Finite but far too coarse
        let mut params: Params = util::params::from_str(PARAMS_TOML).unwrap();
        params.timestep_s = 1e300;
        assert_eq!(
            params.validate(),
            Err(ParamsError::TooLarge("timestep_s", 1e300, MAX_TIMESTEP_S))
        );
        params.timestep_s = MAX_TIMESTEP_S;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_shipped_params_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../params/track_sim.toml");
        let params = Params::load(Some(Path::new(path))).unwrap();

        assert!(params.validate().is_ok());
        assert_eq!(params.sensor.sensor_length_cm, 4.0);
        assert_eq!(params.vehicle.law, ControlLaw::proportional());
    }

    #[test]
    fn test_load_missing_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../params/no_such_file.toml");

        assert!(matches!(
            Params::load(Some(Path::new(path))),
            Err(SimError::ParamLoadError(
                util::params::LoadError::FileLoadError(..)
            ))
        ));
    }
}
