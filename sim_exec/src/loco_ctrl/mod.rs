//! # Locomotion control module
//!
//! Converts the pair of track-deviation scores from the line sensors into
//! left and right wheel velocities, and those into the body-frame control
//! input used by the kinematics.
//!
//! Two laws are available:
//!
//! - **Bang-bang**: a wheel runs at full speed while its sensor is off the
//!   track and stops while it is on the track.
//! - **Proportional**: a wheel runs at full speed unless its sensor has
//!   crossed inside the inner boundary, in which case it is slowed by a
//!   saturating `atan` map of the score.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_bang_bang;
mod calc_proportional;
mod cmd;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use calc_bang_bang::bang_bang_wheel_rate;
pub use calc_proportional::proportional_wheel_rate;
pub use cmd::*;
pub use params::*;
pub use state::*;
