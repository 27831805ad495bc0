//! # Track simulation library.
//!
//! This library allows the executables in this crate (and the benchmarks) to access the
//! simulation of a two-wheeled line-following vehicle on a thick-ellipse track.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Geometry - implicit ellipse functions and the thick-ellipse track
pub mod geometry;

/// Kinematics - integrates the vehicle pose under a control input
pub mod kinematics;

/// Lap counter - detects crossings of the lap reference line
pub mod lap;

/// Localisation - the vehicle pose
pub mod loc;

/// Locomotion control module - converts track-deviation scores into wheel rates
pub mod loco_ctrl;

/// Parameter validation shared by every module
pub mod params;

/// Sensor model - positions of the two line sensors
pub mod sensor;

/// Simulation driver - runs the modules once per tick
pub mod sim;

/// Track model - scores sensor positions against the track
pub mod track;
