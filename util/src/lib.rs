//! Utility library for the track simulator.
//!
//! Holds the ambient pieces every executable in the workspace needs: session
//! directories, logging, parameter loading, CSV archiving and a few numeric
//! helpers.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod archive;
pub mod host;
pub mod logger;
pub mod maths;
pub mod params;
pub mod session;
pub mod time;
