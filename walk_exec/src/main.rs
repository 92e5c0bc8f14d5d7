//! # Walk Executable
//!
//! Drives the walker: loads the walk control parameters, stands up and then
//! either walks a gait for a fixed time or runs a timed command script.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use std::{
    cell::RefCell,
    path::PathBuf,
    rc::Rc,
    thread,
    time::{Duration, Instant},
};

use color_eyre::{eyre::WrapErr, Result};
use log::{error, info, warn};
use structopt::StructOpt;

// Internal
use util::{
    logger::{logger_init, LevelFilter, LogLevels},
    script_interpreter::{PendingCmds, ScriptInterpreter},
    session::Session,
};
use walk_lib::{
    frame_sched::{RealTimeSlot, SchedStateKind},
    leg_reg::{LegId, LegRegistry},
    servo_ctrl::{Actuator, DutyCycleServo, SimBoard, SimServo},
    walk_ctrl::{Params, WalkCmd, WalkCtrl},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Longest sleep of the main loop, bounding the latency of script commands.
const MAX_LOOP_SLEEP: Duration = Duration::from_millis(10);

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "walk_exec", about = "Quadruped walker motion executable")]
struct Opts {
    /// Gait to walk with when no script is given.
    #[structopt(long, default_value = "forward")]
    gait: String,

    /// Seconds to walk for. With a script, how long motion may carry on after the last command.
    #[structopt(long = "run-time-s", default_value = "10")]
    run_time_s: f64,

    /// Stand height, defaults to the configured height.
    #[structopt(long = "stand-height")]
    stand_height: Option<f64>,

    /// Calibrate every leg and exit.
    #[structopt(long)]
    calibrate: bool,

    /// Calibrate one leg (FR, FL, BR or BL) and exit.
    #[structopt(long = "calibrate-leg")]
    calibrate_leg: Option<LegId>,

    /// Timed command script to run instead of walking.
    #[structopt(long, parse(from_os_str))]
    script: Option<PathBuf>,

    /// Drive a simulated PWM board rather than angle-logging servos.
    #[structopt(long = "sim-board")]
    sim_board: bool,

    /// Log every joint command.
    #[structopt(long = "verbose-frames")]
    verbose_frames: bool,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;
    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("walk_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger, joint commands are only shown on request
    let frame_level = if opts.verbose_frames {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    let levels = LogLevels::new(LevelFilter::Debug)
        .with_target("walk_lib::leg_reg", frame_level)
        .with_target("walk_lib::servo_ctrl", frame_level);
    logger_init(&levels, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Walk Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: Params = util::params::load("walk_ctrl.toml")
        .wrap_err("Could not load the walk control parameters")?;
    params
        .validate()
        .wrap_err("Invalid walk control parameters")?;

    info!("Parameters loaded");

    // ---- MODULE INITIALISATION ----

    let legs = build_registry(&params, opts.sim_board)
        .wrap_err("Failed to initialise the leg registry")?;

    let slot = RealTimeSlot::new(Duration::from_millis(params.frame_period_ms));
    let mut walk_ctrl = WalkCtrl::new(params, legs, slot)
        .wrap_err("Failed to initialise WalkCtrl")?;

    info!("Initialisation complete\n");

    // ---- CALIBRATION ----

    if opts.calibrate || opts.calibrate_leg.is_some() {
        let desc = match opts.calibrate_leg {
            Some(leg) => walk_ctrl.calibrate_leg(leg),
            None => walk_ctrl.calibrate(),
        };
        info!("{}", desc);

        session.exit();
        return Ok(());
    }

    // ---- MAIN LOOP ----

    info!("{}", walk_ctrl.stand(opts.stand_height)?);

    match opts.script {
        Some(ref path) => {
            let script: ScriptInterpreter<WalkCmd> = ScriptInterpreter::new(path)
                .wrap_err_with(|| format!("Could not load the script {:?}", path))?;
            run_script(&mut walk_ctrl, script, opts.run_time_s);
        }
        None => {
            info!("{}", walk_ctrl.walk(&opts.gait)?);
            run_for(&mut walk_ctrl, Duration::from_secs_f64(opts.run_time_s.max(0.0)));
        }
    }

    info!("{}", walk_ctrl.stand(opts.stand_height)?);
    info!("Final status: {:?}", walk_ctrl.status());

    session.exit();

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the leg registry, either with logging servos or with servos on a simulated PWM board.
fn build_registry(params: &Params, sim_board: bool) -> Result<LegRegistry> {
    let board = Rc::new(RefCell::new(SimBoard::new()));
    let pulse = params.pulse;

    let legs = LegRegistry::new(&params.legs, |_, _, joint| {
        let actuator: Box<dyn Actuator> = if sim_board {
            Box::new(DutyCycleServo::new(board.clone(), joint.pin, pulse)?)
        } else {
            Box::new(SimServo::new(joint.pin))
        };
        Ok(actuator)
    })?;

    Ok(legs)
}

/// Play the current motion for the given time.
fn run_for(walk_ctrl: &mut WalkCtrl<RealTimeSlot>, run_time: Duration) {
    let end = Instant::now() + run_time;

    while Instant::now() < end {
        walk_ctrl.poll();
        sleep_until_next_event(walk_ctrl, end);
    }
}

/// Run a command script, then let motion carry on for up to `run_time_s`.
fn run_script(
    walk_ctrl: &mut WalkCtrl<RealTimeSlot>,
    mut script: ScriptInterpreter<WalkCmd>,
    run_time_s: f64,
) {
    info!(
        "Running script with {} commands over {} s",
        script.get_num_cmds(),
        script.get_duration()
    );

    let start = Instant::now();

    loop {
        let elapsed_s = start.elapsed().as_secs_f64();

        match script.get_pending(elapsed_s) {
            PendingCmds::Some(cmds) => {
                for cmd in cmds.iter() {
                    match walk_ctrl.exec(cmd) {
                        Ok(desc) => info!("{:8.3} s: {}", elapsed_s, desc),
                        Err(e) => error!("{:8.3} s: {:?} failed: {}", elapsed_s, cmd, e),
                    }
                }
            }
            PendingCmds::None => (),
            PendingCmds::EndOfScript => break,
        }

        walk_ctrl.poll();
        sleep_until_next_event(walk_ctrl, Instant::now() + MAX_LOOP_SLEEP);
    }

    info!("End of script");

    if walk_ctrl.status().state == SchedStateKind::Running {
        info!("Letting motion run for {} s", run_time_s);
        run_for(walk_ctrl, Duration::from_secs_f64(run_time_s.max(0.0)));
    }
}

/// Sleep until the next frame is due, or `deadline`, whichever is first.
fn sleep_until_next_event(walk_ctrl: &WalkCtrl<RealTimeSlot>, deadline: Instant) {
    let to_deadline = deadline.saturating_duration_since(Instant::now());

    let sleep = match walk_ctrl.time_until_next_frame() {
        Some(to_frame) => to_frame.min(to_deadline),
        None => to_deadline.min(MAX_LOOP_SLEEP),
    };

    if sleep > Duration::from_secs(1) {
        warn!("Sleeping for {:?} in the main loop", sleep);
    }

    thread::sleep(sleep);
}
