//! Implementations for the WalkCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::time::Duration;

use log::{debug, info};

// Internal
use super::{Params, WalkCmd, WalkCtrlError};
use crate::{
    frame_sched::{
        Frame, FrameScheduler, LoopCount, PauseOutcome, SchedStatus, Schedule, TaskSlot,
        TickOutcome,
    },
    gait_cmp::{self, PoseCode},
    kin::{AnglePair, LegSolver},
    leg_reg::{LegId, LegRegistry, NUM_LEGS},
    traj::Point,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Name of the default walking gait.
pub const FORWARD_GAIT: &str = "forward";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Walk control module state
pub struct WalkCtrl<S: TaskSlot> {
    params: Params,
    solver: LegSolver,
    legs: LegRegistry,
    sched: FrameScheduler<S>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: TaskSlot> WalkCtrl<S> {
    /// Create the controller from validated parameters and the leg registry
    /// built from them.
    pub fn new(params: Params, legs: LegRegistry, slot: S) -> Result<Self, WalkCtrlError> {
        params.validate()?;

        let solver = LegSolver::new(
            params.geometry.femur,
            params.geometry.tibia,
            legs.origins(),
        );
        let sched = FrameScheduler::new(slot, Duration::from_millis(params.frame_period_ms));

        Ok(Self {
            params,
            solver,
            legs,
            sched,
        })
    }

    /// Execute a command, returning the description of what was done.
    pub fn exec(&mut self, cmd: &WalkCmd) -> Result<String, WalkCtrlError> {
        debug!("Executing {:?}", cmd);

        match cmd {
            WalkCmd::Stand { height } => self.stand(*height),
            WalkCmd::Forward => self.forward(),
            WalkCmd::Walk { gait } => self.walk(gait),
            WalkCmd::Pause => Ok(self.pause()),
            WalkCmd::Calibrate => Ok(self.calibrate()),
            WalkCmd::CalibrateLeg { leg } => Ok(self.calibrate_leg(*leg)),
            WalkCmd::PoseLeg { leg, code } => self.pose_leg(*leg, *code),
            WalkCmd::PositionLeg { leg, x, y } => self.position_leg(*leg, Point::new(*x, *y)),
            WalkCmd::HomeLeg { leg } => self.home_leg(*leg),
        }
    }

    /// Position all four legs in the neutral stance, at `height` or at the
    /// configured stand height.
    pub fn stand(&mut self, height: Option<f64>) -> Result<String, WalkCtrlError> {
        let height = height.unwrap_or(self.params.geometry.height);
        let targets = [Point::new(0.0, height); NUM_LEGS];

        let angles = self
            .solver
            .solve_all(&targets)
            .map_err(|(leg, source)| WalkCtrlError::Kinematics {
                op: "stand",
                leg,
                source,
            })?;

        self.halt_motion();
        self.legs.apply_all(&angles);

        Ok(format!("standing at height {}", height))
    }

    /// Walk forward, resuming if the forward gait is paused.
    pub fn forward(&mut self) -> Result<String, WalkCtrlError> {
        self.walk(FORWARD_GAIT)
    }

    /// Start the named gait as an endless cycle.
    ///
    /// If the gait is currently paused it is resumed from where it stopped,
    /// otherwise the cycle is compiled afresh and started from its first
    /// frame.
    pub fn walk(&mut self, gait: &str) -> Result<String, WalkCtrlError> {
        if self.sched.is_paused_on(gait) {
            self.sched.pause(&mut self.legs);
            return Ok(format!("resuming {}", gait));
        }

        let frames = self.compile_gait(gait)?;
        util::session::save(format!("gaits/{}.json", gait), frames.clone());

        info!("Starting the \"{}\" gait ({} frames per cycle)", gait, frames.len());
        let schedule = Schedule::new(frames, LoopCount::Infinite);
        self.sched.start(gait, schedule, &mut self.legs);

        Ok(format!("walking {}", gait))
    }

    /// Toggle pause of the current motion.
    pub fn pause(&mut self) -> String {
        match self.sched.pause(&mut self.legs) {
            PauseOutcome::Paused(motion) => format!("pausing {}", motion),
            PauseOutcome::Resumed(motion) => format!("resuming {}", motion),
            PauseOutcome::NothingToPause => "nothing to pause".to_string(),
        }
    }

    /// Drive every joint to its zero-reference angle.
    pub fn calibrate(&mut self) -> String {
        self.halt_motion();
        self.legs.calibrate_all();

        "calibrating legs".to_string()
    }

    pub fn calibrate_leg(&mut self, leg: LegId) -> String {
        self.halt_motion();
        self.legs.leg_mut(leg).calibrate();

        format!("calibrating {}", self.legs.label(leg))
    }

    /// Move a leg to the stance point of a pose code.
    pub fn pose_leg(&mut self, leg: LegId, code: i64) -> Result<String, WalkCtrlError> {
        let pose = PoseCode::from_code(code).map_err(|_| WalkCtrlError::InvalidPoseCode(code))?;
        let point = gait_cmp::stance_point(pose, self.params.geometry.height, &self.params.geometry);

        self.move_leg("pose_leg", leg, point)?;

        Ok(format!(
            "move {} to pose {} (x:{},y:{})",
            self.legs.label(leg),
            code,
            point.x,
            point.y
        ))
    }

    /// Move a leg directly to a point.
    pub fn position_leg(&mut self, leg: LegId, point: Point) -> Result<String, WalkCtrlError> {
        self.move_leg("position_leg", leg, point)?;

        Ok(format!(
            "move {} to (x:{},y:{})",
            self.legs.label(leg),
            point.x,
            point.y
        ))
    }

    /// Move a leg to its neutral home point.
    pub fn home_leg(&mut self, leg: LegId) -> Result<String, WalkCtrlError> {
        let height = self.params.geometry.height;
        self.move_leg("home_leg", leg, Point::new(0.0, height))?;

        Ok(format!(
            "move {} to its home position (x:0, y:{})",
            self.legs.label(leg),
            height
        ))
    }

    /// Compile one cycle of a named gait.
    pub fn compile_gait(&self, gait: &str) -> Result<Vec<Frame>, WalkCtrlError> {
        let table = self
            .params
            .gaits
            .get(gait)
            .ok_or_else(|| WalkCtrlError::UnknownGait(gait.to_string()))?;

        gait_cmp::compile_cycle(table, &self.params.geometry, &self.solver, self.params.granularity)
            .map_err(|source| WalkCtrlError::GaitCmp {
                gait: gait.to_string(),
                source,
            })
    }

    /// Play the next frame if it is due.
    pub fn poll(&mut self) -> Option<TickOutcome> {
        self.sched.poll(&mut self.legs)
    }

    /// Time left before the next frame is due, `None` if nothing is playing.
    pub fn time_until_next_frame(&self) -> Option<Duration> {
        self.sched.slot().time_until_due()
    }

    pub fn status(&self) -> SchedStatus {
        self.sched.status()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn slot_mut(&mut self) -> &mut S {
        self.sched.slot_mut()
    }

    /// Solve and apply one leg target, stopping any motion first.
    fn move_leg(&mut self, op: &'static str, leg: LegId, point: Point) -> Result<AnglePair, WalkCtrlError> {
        let angles = self
            .solver
            .solve(leg, point)
            .map_err(|source| WalkCtrlError::Kinematics { op, leg, source })?;

        self.halt_motion();
        self.legs.leg_mut(leg).apply(angles);

        Ok(angles)
    }

    /// Stop playback so it can't overwrite a direct positioning command.
    fn halt_motion(&mut self) {
        if let Some(motion) = self.sched.halt() {
            info!("Stopped \"{}\"", motion);
        }
    }
}
