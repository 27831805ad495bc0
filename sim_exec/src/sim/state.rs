//! Simulation driver state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use nalgebra::Point2;
use serde::Serialize;

// Internal
use super::{Params, SimError};
use crate::{
    kinematics,
    lap::{Lap, LapCounter, LapSummary},
    loc::Pose,
    loco_ctrl::{self, LocoCtrl},
    params::ParamsError,
    sensor::{SensorModel, SensorPoints},
    track::{TrackDeviation, TrackModel},
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulation driver.
///
/// Owns the only mutable state in the simulator. `tick` takes `&mut self`
/// so ticks can never interleave.
pub struct Simulation {
    params: Params,

    sensor_model: SensorModel,
    track_model: TrackModel,
    loco_ctrl: LocoCtrl,

    /// Pose the next tick will start from
    pose: Pose,

    /// Position at the start of every tick so far, append only
    trajectory_cm: Vec<Point2<f64>>,

    lap_counter: LapCounter,

    /// Number of ticks executed, also the index of the next tick
    num_ticks: u64,

    /// Flattened record of the last tick, written by the archiver
    last_record: Option<TickRecord>,
    arch_ticks: Archiver,
}

/// Status report for one tick.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Frame index passed in by the caller
    pub frame_index: u64,

    /// Index of this tick, counted from zero
    pub tick: u64,

    /// Track-deviation score of each sensor
    pub deviation: TrackDeviation,

    /// Wheel rates and the equivalent control input
    pub loco_ctrl: loco_ctrl::OutputData,

    /// Wheel rate limit flags
    pub loco_ctrl_status: loco_ctrl::StatusReport,

    /// True if a lap marker was recorded on this tick
    pub lap_marker: bool,
}

/// Everything the caller needs to draw one frame.
#[derive(Debug)]
pub struct TickOutput<'a> {
    /// The pose the tick started from, and which the sensors were evaluated
    /// at
    pub pose: Pose,

    /// Sensor positions for `pose`
    pub sensors: SensorPoints,

    pub report: TickReport,

    /// Trajectory history up to and including `pose`
    pub trajectory_cm: &'a [Point2<f64>],
}

/// One row of the tick archive.
#[derive(Debug, Copy, Clone, Serialize)]
struct TickRecord {
    tick: u64,
    frame_index: u64,
    x_cm: f64,
    y_cm: f64,
    /// Wrapped into [0, 2pi)
    heading_rad: f64,
    left_sensor_x_cm: f64,
    left_sensor_y_cm: f64,
    right_sensor_x_cm: f64,
    right_sensor_y_cm: f64,
    left_score: f64,
    right_score: f64,
    left_wheel_cms: f64,
    right_wheel_cms: f64,
    speed_cms: f64,
    turn_rate_rads: f64,
    left_rate_limited: bool,
    right_rate_limited: bool,
    lap_marker: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Simulation {
    /// Build a simulation from the given parameters.
    ///
    /// All parameters are validated here, no checks are made while ticking.
    pub fn new(params: Params) -> Result<Self, ParamsError> {
        params.validate()?;

        let sensor_model = SensorModel::new(&params.sensor);
        let track_model = TrackModel::new(&params.track)?;
        let loco_ctrl = LocoCtrl::new(params.vehicle.clone())?;
        let pose = Pose::from(params.start_pose);

        debug!("Simulation initialised at {:?}", pose);

        Ok(Self {
            params,
            sensor_model,
            track_model,
            loco_ctrl,
            pose,
            trajectory_cm: Vec::new(),
            lap_counter: LapCounter::new(),
            num_ticks: 0,
            last_record: None,
            arch_ticks: Archiver::default(),
        })
    }

    /// Archive every tick into `sim/ticks.csv` in the session's archive.
    pub fn attach_archive(&mut self, session: &Session) -> Result<(), SimError> {
        self.arch_ticks =
            Archiver::from_path(session, "sim/ticks.csv").map_err(SimError::ArchiveError)?;

        Ok(())
    }

    /// Advance the simulation by one timestep.
    ///
    /// `frame_index` is only recorded in the report, the simulation keeps its
    /// own tick count.
    pub fn tick(&mut self, frame_index: u64) -> TickOutput<'_> {
        let tick = self.num_ticks;
        let pose = self.pose;

        let lap_marker = self.lap_counter.update(tick, pose.position_cm.x);
        if lap_marker {
            self.log_lap(tick);
        }

        self.trajectory_cm.push(pose.position_cm);

        let sensors = self.sensor_model.sense(&pose);
        let deviation = self.track_model.deviation(&sensors);
        let (loco_ctrl_output, loco_ctrl_status) = self.loco_ctrl.proc(&deviation);

        self.pose = kinematics::integrate(&loco_ctrl_output.control, &pose, self.params.timestep_s);
        self.num_ticks += 1;

        let report = TickReport {
            frame_index,
            tick,
            deviation,
            loco_ctrl: loco_ctrl_output,
            loco_ctrl_status,
            lap_marker,
        };

        trace!(
            "Tick {}: pose {:?}, scores ({:.4}, {:.4})",
            tick,
            pose,
            deviation.left,
            deviation.right
        );

        self.last_record = Some(TickRecord::new(&pose, &sensors, &report));

        TickOutput {
            pose,
            sensors,
            report,
            trajectory_cm: &self.trajectory_cm,
        }
    }

    /// The pose the next tick will start from.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Position at the start of every tick executed so far.
    pub fn trajectory(&self) -> &[Point2<f64>] {
        &self.trajectory_cm
    }

    /// Tick indices at which the vehicle crossed X = 0 heading +X.
    pub fn lap_markers(&self) -> &[u64] {
        self.lap_counter.markers()
    }

    /// Laps completed so far.
    pub fn laps(&self) -> Vec<Lap> {
        self.lap_counter.laps(self.params.timestep_s)
    }

    pub fn lap_summary(&self) -> LapSummary {
        self.lap_counter.summary(self.params.timestep_s)
    }

    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// Simulated time elapsed.
    ///
    /// Units: seconds
    pub fn elapsed_s(&self) -> f64 {
        self.num_ticks as f64 * self.params.timestep_s
    }

    fn log_lap(&self, tick: u64) {
        let markers = self.lap_counter.markers();

        match markers.len() {
            0 | 1 => info!(
                "First lap line crossing at tick {} ({:.2} s)",
                tick,
                tick as f64 * self.params.timestep_s
            ),
            n => info!(
                "Lap {} completed in {:.2} s",
                n - 1,
                (markers[n - 1] - markers[n - 2]) as f64 * self.params.timestep_s
            ),
        }
    }
}

impl Archived for Simulation {
    /// Write the last tick, if there is an archive attached.
    fn write(&mut self) -> Result<(), ArchiveError> {
        if !self.arch_ticks.is_attached() {
            return Ok(());
        }

        match self.last_record {
            Some(r) => self.arch_ticks.serialise(r),
            None => Ok(()),
        }
    }
}

impl TickRecord {
    fn new(pose: &Pose, sensors: &SensorPoints, report: &TickReport) -> Self {
        Self {
            tick: report.tick,
            frame_index: report.frame_index,
            x_cm: pose.position_cm.x,
            y_cm: pose.position_cm.y,
            heading_rad: pose.heading_2pi(),
            left_sensor_x_cm: sensors.left_cm.x,
            left_sensor_y_cm: sensors.left_cm.y,
            right_sensor_x_cm: sensors.right_cm.x,
            right_sensor_y_cm: sensors.right_cm.y,
            left_score: report.deviation.left,
            right_score: report.deviation.right,
            left_wheel_cms: report.loco_ctrl.wheel_rates.left_cms,
            right_wheel_cms: report.loco_ctrl.wheel_rates.right_cms,
            speed_cms: report.loco_ctrl.control.speed_cms,
            turn_rate_rads: report.loco_ctrl.control.turn_rate_rads,
            left_rate_limited: report.loco_ctrl_status.left_rate_limited,
            right_rate_limited: report.loco_ctrl_status.right_rate_limited,
            lap_marker: report.lap_marker,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        loco_ctrl::ControlLaw,
        sensor,
        sim::StartPose,
        track::{self, TrackScoring},
    };

    fn oval_params(law: ControlLaw) -> Params {
        Params {
            timestep_s: 0.01,
            start_pose: StartPose {
                x_cm: 0.0,
                y_cm: 7.5,
                heading_rad: 0.0,
            },
            track: track::Params {
                centre_cm: [0.0, 0.0],
                semi_axis_a_cm: 12.5,
                semi_axis_b_cm: 7.5,
                thickness_cm: 1.5,
                scoring: TrackScoring::Annulus,
            },
            sensor: sensor::Params {
                sensor_length_cm: 4.0,
                sensor_width_cm: 2.5,
            },
            vehicle: loco_ctrl::Params {
                axle_distance_cm: 3.5,
                max_wheel_velocity_cms: 29.0,
                law,
            },
        }
    }

    /// A track so large the sensors stay inside the inner boundary, so the
    /// bang-bang law drives straight at full speed.
    fn open_field_params(x_cm: f64) -> Params {
        let mut params = oval_params(ControlLaw::BangBang);
        params.start_pose = StartPose {
            x_cm,
            y_cm: 0.0,
            heading_rad: 0.0,
        };
        params.track.semi_axis_a_cm = 1000.0;
        params.track.semi_axis_b_cm = 1000.0;
        params
    }

    #[test]
    fn test_first_tick_on_oval() {
        let mut sim = Simulation::new(oval_params(ControlLaw::proportional())).unwrap();
        let start = sim.pose();

        let out = sim.tick(0);

        // The tick reports the pose it started from
        assert_eq!(out.pose, start);
        assert_eq!(out.trajectory_cm, &[start.position_cm][..]);

        // Left sensor just beyond the outer edge, right just inside the inner
        // edge, both within a fraction of the track of the surface
        let dev = out.report.deviation;
        assert!(dev.left > 0.0 && dev.left < 0.25, "left {}", dev.left);
        assert!(dev.right < 0.0 && dev.right > -0.05, "right {}", dev.right);

        // Left wheel at full speed, right slowed, turning clockwise
        let wheels = out.report.loco_ctrl.wheel_rates;
        assert_eq!(wheels.left_cms, 29.0);
        assert!(wheels.right_cms > 20.0 && wheels.right_cms < 29.0);
        assert!(out.report.loco_ctrl.control.turn_rate_rads < 0.0);
        assert!(!out.report.lap_marker);

        // Moved forward along the tangent
        let new_pose = sim.pose();
        assert!(new_pose.position_cm.x > start.position_cm.x);
        assert_eq!(new_pose.position_cm.y, start.position_cm.y);
        assert!(new_pose.heading_rad < start.heading_rad);
        assert_eq!(sim.num_ticks(), 1);
        assert!((sim.elapsed_s() - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_history_is_append_only() {
        let mut sim = Simulation::new(oval_params(ControlLaw::BangBang)).unwrap();

        let mut expected = Vec::new();
        for i in 0..500 {
            expected.push(sim.pose().position_cm);
            let out = sim.tick(i);
            assert_eq!(out.report.tick, i);
            assert_eq!(out.trajectory_cm.len() as u64, i + 1);
        }

        assert_eq!(sim.trajectory(), &expected[..]);
        assert!(sim.pose().is_finite());
    }

    #[test]
    fn test_straight_drive_through_driver() {
        let mut sim = Simulation::new(open_field_params(0.0)).unwrap();

        let n = 100;
        for i in 0..n {
            let out = sim.tick(i);
            assert!(out.report.deviation.left < 0.0);
            assert_eq!(out.report.loco_ctrl.control.turn_rate_rads, 0.0);
        }

        let pose = sim.pose();
        assert!((pose.position_cm.x - n as f64 * 0.01 * 29.0).abs() < 1e-9);
        assert_eq!(pose.position_cm.y, 0.0);
        assert_eq!(pose.heading_rad, 0.0);
    }

    #[test]
    fn test_lap_marker_through_driver() {
        let mut sim = Simulation::new(open_field_params(-5.0)).unwrap();

        // x = -5 + 0.29 k, first non-negative at k = 18
        for i in 0..40 {
            let out = sim.tick(i);
            assert_eq!(out.report.lap_marker, i == 18);
        }

        assert_eq!(sim.lap_markers(), &[18]);
        assert!(sim.laps().is_empty());
        assert_eq!(sim.lap_summary().markers, vec![18]);
    }

    /// Run the oval for 60 s and check the vehicle keeps lapping at a steady
    /// pace without leaving the track's neighbourhood.
    fn check_laps_oval(params: Params) {
        let a = params.track.semi_axis_a_cm;
        let b = params.track.semi_axis_b_cm;
        let t = params.track.thickness_cm;
        let mut sim = Simulation::new(params).unwrap();

        for i in 0..6000 {
            let p = sim.tick(i).pose.position_cm;
            assert!(
                p.x.abs() < a + t && p.y.abs() < b + t,
                "left the track at tick {}: {:?}",
                i,
                p
            );
        }

        let markers = sim.lap_markers();
        assert!(markers.len() >= 2, "markers {:?}", markers);
        assert!(markers.windows(2).all(|w| w[0] < w[1]));

        let laps = sim.laps();
        let mean_s = laps.iter().map(|l| l.duration_s).sum::<f64>() / laps.len() as f64;
        for lap in &laps {
            assert!(
                (lap.duration_s - mean_s).abs() < 0.2 * mean_s,
                "lap {:?} against mean {} s",
                lap,
                mean_s
            );
        }
    }

    #[test]
    fn test_proportional_laps_oval() {
        check_laps_oval(oval_params(ControlLaw::proportional()));
    }

    #[test]
    fn test_bang_bang_laps_oval() {
        check_laps_oval(oval_params(ControlLaw::BangBang));
    }

    #[test]
    fn test_radial_scoring_laps_with_early_settings() {
        let mut params = oval_params(ControlLaw::Proportional {
            gain: 3.0,
            inner_cutoff: Some(2.0),
        });
        params.track.scoring = TrackScoring::Radial;
        params.sensor.sensor_length_cm = 5.0;

        let mut sim = Simulation::new(params).unwrap();
        for i in 0..6000 {
            sim.tick(i);
        }

        assert!(sim.pose().is_finite());
        let markers = sim.lap_markers();
        assert!(markers.len() >= 2, "markers {:?}", markers);
        assert!(markers.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_frame_index_is_reported_not_used() {
        let mut sim = Simulation::new(oval_params(ControlLaw::BangBang)).unwrap();

        let out = sim.tick(42);
        assert_eq!(out.report.frame_index, 42);
        assert_eq!(out.report.tick, 0);
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut params = oval_params(ControlLaw::BangBang);
        params.vehicle.axle_distance_cm = 0.0;
        assert!(matches!(
            Simulation::new(params),
            Err(ParamsError::NotPositive("vehicle.axle_distance_cm", _))
        ));

        let mut params = oval_params(ControlLaw::BangBang);
        params.track.thickness_cm = 8.0;
        assert!(matches!(
            Simulation::new(params),
            Err(ParamsError::ThicknessTooLarge { .. })
        ));
    }

    #[test]
    fn test_write_without_archive_is_noop() {
        let mut sim = Simulation::new(oval_params(ControlLaw::BangBang)).unwrap();
        sim.tick(0);
        assert!(sim.write().is_ok());
    }
}
