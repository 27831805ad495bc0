//! # Simulation module
//!
//! The simulation driver owns the vehicle pose, the trajectory history and
//! the lap markers, and advances them one fixed timestep per call to
//! [`Simulation::tick`]. Scheduling is left to the caller: a real-time loop,
//! a benchmark or a test can all drive the same simulation.
//!
//! Each tick runs:
//!
//! 1. Lap crossing detection on the current pose
//! 2. Trajectory history append
//! 3. Sensor model
//! 4. Track model (track-deviation scores)
//! 5. Locomotion control (wheel rates and control input)
//! 6. Kinematics (pose integration)
//!
//! [`open_loop`] runs the kinematics alone under constant wheel rates.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod open_loop;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised while setting up a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Could not set up the simulation archive: {0}")]
    ArchiveError(util::archive::ArchiveError),
}
