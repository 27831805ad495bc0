//! Parameters structure for the track

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::params::{check_finite, check_non_negative, check_positive, ParamsError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Geometry of the thick-ellipse track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Centre of the track ellipse
    ///
    /// Units: centimeters
    pub centre_cm: [f64; 2],

    /// Semi-axis of the track centreline along X
    ///
    /// Units: centimeters
    pub semi_axis_a_cm: f64,

    /// Semi-axis of the track centreline along Y
    ///
    /// Units: centimeters
    pub semi_axis_b_cm: f64,

    /// Width of the track surface, split evenly either side of the
    /// centreline.
    ///
    /// Units: centimeters
    pub thickness_cm: f64,

    /// How sensor positions are scored against the track
    #[serde(default)]
    pub scoring: TrackScoring,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Scoring function used to compute the track-deviation of a sensor.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackScoring {
    /// Implicit-function score against the annulus, zero anywhere on the
    /// track surface.
    Annulus,

    /// Signed radial distance to the track centreline, zero only on the
    /// centreline itself.
    ///
    /// Only laps with a low proportional gain (3) and an inner cutoff, see
    /// `params/track_sim.toml`.
    Radial,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for TrackScoring {
    fn default() -> Self {
        TrackScoring::Annulus
    }
}

impl Params {
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_finite("track.centre_cm[0]", self.centre_cm[0])?;
        check_finite("track.centre_cm[1]", self.centre_cm[1])?;
        let a = check_positive("track.semi_axis_a_cm", self.semi_axis_a_cm)?;
        let b = check_positive("track.semi_axis_b_cm", self.semi_axis_b_cm)?;
        let thickness_cm = check_non_negative("track.thickness_cm", self.thickness_cm)?;

        let min_semi_axis_cm = a.min(b);
        if thickness_cm >= min_semi_axis_cm {
            return Err(ParamsError::ThicknessTooLarge {
                thickness_cm,
                min_semi_axis_cm,
            });
        }

        Ok(())
    }
}
