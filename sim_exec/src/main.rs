//! Main track simulation executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session and logging
//!     - Load and validate parameters
//!     - Main loop, once per tick:
//!         - Simulation tick (sensing, control, kinematics)
//!         - Archiving
//!         - Cycle management (only in real-time mode)
//!     - Save the lap summary
//!
//! # Usage
//!
//! ```text
//! sim_exec [--params <path>] [--ticks <n>] [--law <bang-bang|proportional>]
//!          [--heading-deg <deg>] [--realtime] [--log-level <level>]
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::Utc;
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::str::FromStr;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use sim_lib::{
    loco_ctrl::ControlLaw,
    sim::{Params, Simulation},
};
use util::{
    archive::Archived,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of ticks between progress messages.
const PROGRESS_PERIOD_TICKS: u64 = 1000;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulate a line-following vehicle on a thick-ellipse track.
#[derive(Debug, StructOpt)]
#[structopt(name = "sim_exec")]
struct Opt {
    /// Path to the parameter file, defaults to `params/track_sim.toml` under the software root
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Number of ticks to run for
    #[structopt(long, default_value = "6000")]
    ticks: u64,

    /// Override the control law (`bang-bang` or `proportional`)
    #[structopt(long)]
    law: Option<LawArg>,

    /// Override the starting heading, in degrees counter-clockwise from +X
    #[structopt(long)]
    heading_deg: Option<f64>,

    /// Pace ticks to the simulation timestep
    #[structopt(long)]
    realtime: bool,

    /// Minimum log level, `info` or more verbose
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Control law selectable from the command line.
#[derive(Debug, Copy, Clone, PartialEq)]
enum LawArg {
    BangBang,
    Proportional,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("sim_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opt.log_level, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Track Simulation Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", opt);

    // ---- LOAD PARAMETERS ----

    let mut params =
        Params::load(opt.params.as_deref()).wrap_err("Could not load simulation params")?;

    apply_overrides(&mut params, &opt);

    info!("Simulation parameters loaded");
    info!("    Timestep: {} s", params.timestep_s);
    info!("    Control law: {:?}", params.vehicle.law);
    info!("    Track scoring: {:?}", params.track.scoring);

    session.save("params.json", params.clone());

    // ---- INITIALISE SIMULATION ----

    let mut sim = Simulation::new(params).wrap_err("Failed to initialise the simulation")?;
    sim.attach_archive(&session)
        .wrap_err("Failed to attach the simulation archive")?;

    info!("Simulation initialised, running {} ticks\n", opt.ticks);

    // ---- MAIN LOOP ----

    let timestep = Duration::from_secs_f64(sim.params().timestep_s);
    let run_start = Utc::now();

    for frame_index in 0..opt.ticks {
        let cycle_start_instant = Instant::now();

        let out = sim.tick(frame_index);

        if !out.pose.is_finite() {
            return Err(eyre!(
                "Vehicle pose is no longer finite at tick {}: {:?}",
                out.report.tick,
                out.pose
            ));
        }

        if frame_index % PROGRESS_PERIOD_TICKS == 0 {
            debug!(
                "Tick {}: pose {:?}, wheels {:?}",
                out.report.tick, out.pose, out.report.loco_ctrl.wheel_rates
            );
        }

        match sim.write() {
            Ok(_) => (),
            Err(e) => warn!("Could not archive tick {}: {}", frame_index, e),
        };

        // ---- CYCLE MANAGEMENT ----

        if opt.realtime {
            let cycle_dur = Instant::now() - cycle_start_instant;

            match timestep.checked_sub(cycle_dur) {
                Some(d) => thread::sleep(d),
                None => warn!(
                    "Tick overran by {:.06} s",
                    cycle_dur.as_secs_f64() - timestep.as_secs_f64()
                ),
            }
        }
    }

    // ---- SHUTDOWN ----

    let summary = sim.lap_summary();

    info!("End of simulation");
    info!(
        "    Simulated {} ticks ({:.2} s) in {:.3} s",
        sim.num_ticks(),
        sim.elapsed_s(),
        util::time::duration_to_seconds(Utc::now() - run_start).unwrap_or(std::f64::NAN)
    );
    info!("    Final pose: {:?}", sim.pose());
    info!("    Laps completed: {}", summary.laps.len());
    if let Some(best) = summary.best_lap_s {
        info!("    Best lap: {:.2} s", best);
    }
    debug!(
        "Lap summary:\n{}",
        serde_json::to_string_pretty(&summary).wrap_err("Could not format the lap summary")?
    );

    session.save("laps.json", summary);
    session.exit();

    Ok(())
}

/// Apply the command line overrides to the loaded parameters.
fn apply_overrides(params: &mut Params, opt: &Opt) {
    if let Some(heading_deg) = opt.heading_deg {
        params.start_pose.heading_rad = heading_deg.to_radians();
        info!("Start heading overridden to {} deg", heading_deg);
    }

    match (opt.law, params.vehicle.law) {
        (Some(LawArg::BangBang), _) => params.vehicle.law = ControlLaw::BangBang,
        // Keep the configured gain if the file already selects the law
        (Some(LawArg::Proportional), ControlLaw::Proportional { .. }) => (),
        (Some(LawArg::Proportional), _) => params.vehicle.law = ControlLaw::proportional(),
        (None, _) => (),
    }
}

impl FromStr for LawArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bang-bang" | "bang_bang" => Ok(LawArg::BangBang),
            "proportional" => Ok(LawArg::Proportional),
            _ => Err(format!(
                "Unknown control law \"{}\", expected \"bang-bang\" or \"proportional\"",
                s
            )),
        }
    }
}
