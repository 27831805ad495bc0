//! Implementations for the LocoCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{ControlLaw, Params, WheelRates};
use crate::{kinematics::ControlInput, params::ParamsError, track::TrackDeviation};
use util::maths::clamp;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Locomotion control module state
#[derive(Debug, Clone)]
pub struct LocoCtrl {
    pub(crate) params: Params,
}

/// Output from LocoCtrl that the kinematics must execute.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct OutputData {
    /// Demanded wheel rates after limits were applied
    pub wheel_rates: WheelRates,

    /// Body-frame control input equivalent to the wheel rates
    pub control: ControlInput,
}

/// Status report for LocoCtrl processing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct StatusReport {
    /// The left wheel demand was outside [0, max] and has been clamped
    pub left_rate_limited: bool,

    /// The right wheel demand was outside [0, max] and has been clamped
    pub right_rate_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LocoCtrl {
    /// Create the module, rejecting parameters that would make the turn rate
    /// or the law degenerate.
    pub fn new(params: Params) -> Result<Self, ParamsError> {
        params.validate()?;

        Ok(Self { params })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Compute the wheel rates and control input for the given sensor
    /// scores.
    pub fn proc(&self, deviation: &TrackDeviation) -> (OutputData, StatusReport) {
        let demand = match self.params.law {
            ControlLaw::BangBang => self.calc_bang_bang(deviation),
            ControlLaw::Proportional { gain, inner_cutoff } => {
                self.calc_proportional(deviation, gain, inner_cutoff)
            }
        };

        let (wheel_rates, report) = self.enforce_limits(demand);

        let output = OutputData {
            wheel_rates,
            control: wheel_rates.to_control_input(self.params.axle_distance_cm),
        };

        trace!(
            "LocoCtrl output:\n    wheels: {:?}\n    control: {:?}",
            output.wheel_rates,
            output.control
        );

        (output, report)
    }

    /// Clamp each wheel into [0, max], raising the matching flag in the
    /// status report if the demand had to change.
    fn enforce_limits(&self, demand: WheelRates) -> (WheelRates, StatusReport) {
        let max = self.params.max_wheel_velocity_cms;

        let left_cms = clamp(&demand.left_cms, &0.0, &max);
        let right_cms = clamp(&demand.right_cms, &0.0, &max);

        let report = StatusReport {
            left_rate_limited: left_cms != demand.left_cms,
            right_rate_limited: right_cms != demand.right_cms,
        };

        (WheelRates::new(left_cms, right_cms), report)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
