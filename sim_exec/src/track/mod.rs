//! # Track model
//!
//! Couples the sensor model to the track geometry: each sensor position is
//! scored against the track, giving the pair of track-deviation signals the
//! locomotion control laws consume.
//!
//! With the default annulus scoring the sign convention is:
//!
//! | score | sensor position                        |
//! |-------|----------------------------------------|
//! | > 0   | beyond the outer boundary              |
//! | == 0  | on the track surface, boundaries incl. |
//! | < 0   | inside the inner boundary              |

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

pub use params::{Params, TrackScoring};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;
use serde::Serialize;

use crate::{
    geometry::{Ellipse, ThickEllipse},
    params::ParamsError,
    sensor::SensorPoints,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Scores sensor positions against the track.
#[derive(Debug, Copy, Clone)]
pub struct TrackModel {
    track: ThickEllipse,
    scoring: TrackScoring,
}

/// Track-deviation score of each sensor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct TrackDeviation {
    pub left: f64,
    pub right: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrackModel {
    /// Build the model, rejecting degenerate track geometry.
    pub fn new(params: &Params) -> Result<Self, ParamsError> {
        params.validate()?;

        Ok(Self {
            track: ThickEllipse::new(
                Ellipse::new(
                    Point2::new(params.centre_cm[0], params.centre_cm[1]),
                    params.semi_axis_a_cm,
                    params.semi_axis_b_cm,
                ),
                params.thickness_cm,
            ),
            scoring: params.scoring,
        })
    }

    /// Score a single point against the track.
    pub fn score(&self, point_cm: &Point2<f64>) -> f64 {
        match self.scoring {
            TrackScoring::Annulus => self.track.where_point_thick(point_cm),
            TrackScoring::Radial => self.track.centreline.radial_deviation(point_cm),
        }
    }

    /// Score both sensors.
    pub fn deviation(&self, sensors: &SensorPoints) -> TrackDeviation {
        TrackDeviation {
            left: self.score(&sensors.left_cm),
            right: self.score(&sensors.right_cm),
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
