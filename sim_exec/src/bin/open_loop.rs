//! # Open Loop
//!
//! This binary drives the vehicle with constant wheel rates and no sensing, so the kinematics can
//! be checked on their own. The vehicle geometry, timestep and start pose are taken from the
//! simulation parameter file. The resulting poses are saved to `poses.json` in the session.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::path::PathBuf;

use color_eyre::{eyre::WrapErr, Result};
use log::info;
use structopt::StructOpt;

use sim_lib::{
    loc::Pose,
    loco_ctrl::WheelRates,
    sim::{open_loop, Params},
};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Drive the vehicle open loop with constant wheel rates.
#[derive(Debug, StructOpt)]
#[structopt(name = "open_loop")]
struct Opt {
    /// Path to the parameter file, defaults to `params/track_sim.toml` under the software root
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    /// Left wheel rate in cm/s
    #[structopt(long, default_value = "0.0")]
    v_left: f64,

    /// Right wheel rate in cm/s
    #[structopt(long, default_value = "29.0")]
    v_right: f64,

    /// Duration of the run in seconds
    #[structopt(long, default_value = "10.0")]
    duration: f64,

    /// Minimum log level, `info` or more verbose
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    let session = Session::new("open_loop", "sessions").wrap_err("Failed to create the session")?;

    logger_init(opt.log_level, &session).wrap_err("Failed to initialise logging")?;

    info!("Open Loop Kinematics\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let params =
        Params::load(opt.params.as_deref()).wrap_err("Could not load simulation params")?;

    // ---- RUN ----

    let start = Pose::from(params.start_pose);
    let wheel_rates = WheelRates::new(opt.v_left, opt.v_right);

    info!(
        "Driving from {:?} with {:?} for {} s",
        start, wheel_rates, opt.duration
    );

    let poses = open_loop::run(
        &params.vehicle,
        wheel_rates,
        start,
        opt.duration,
        params.timestep_s,
    )
    .wrap_err("Invalid open loop run")?;

    match poses.last() {
        Some(p) => info!("{} steps, final pose: {:?}", poses.len(), p),
        None => info!("Zero duration, no steps taken"),
    }

    session.save("poses.json", poses);
    session.exit();

    Ok(())
}
