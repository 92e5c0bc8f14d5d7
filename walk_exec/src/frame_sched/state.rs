//! Frame scheduler state machine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{mem, time::Duration};

use log::{debug, info};
use serde::Serialize;

use super::{Schedule, TaskSlot};
use crate::leg_reg::LegRegistry;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A named motion and its schedule.
#[derive(Debug)]
pub struct ActiveMotion {
    pub motion: String,
    pub schedule: Schedule,
}

/// Plays at most one schedule at a time.
pub struct FrameScheduler<S: TaskSlot> {
    state: SchedState,
    slot: S,
    frame_period: Duration,
}

/// Snapshot of the scheduler for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedStatus {
    pub state: SchedStateKind,
    pub motion: Option<String>,
    pub cursor: usize,
    pub cycle: u64,
    pub tick_pending: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum SchedState {
    Idle,
    Running(ActiveMotion),
    Paused(ActiveMotion),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchedStateKind {
    Idle,
    Running,
    Paused,
}

/// Result of a playback tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The frame at `frame` (a schedule index) was applied during `cycle`.
    Applied { frame: usize, cycle: u64 },

    /// Playback reached its end, the scheduler is now idle.
    Halted,

    /// Nothing is running.
    NotRunning,
}

/// Result of toggling pause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PauseOutcome {
    Paused(String),
    Resumed(String),
    NothingToPause,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<S: TaskSlot> FrameScheduler<S> {
    pub fn new(slot: S, frame_period: Duration) -> Self {
        Self {
            state: SchedState::Idle,
            slot,
            frame_period,
        }
    }

    /// Replace whatever is playing with `schedule` and apply its first frame.
    pub fn start(&mut self, motion: &str, schedule: Schedule, legs: &mut LegRegistry) -> TickOutcome {
        self.slot.cancel();

        if let Some(previous) = self.motion() {
            debug!("Replacing motion \"{}\" with \"{}\"", previous, motion);
        }

        self.state = SchedState::Running(ActiveMotion {
            motion: motion.to_string(),
            schedule,
        });

        self.tick(legs)
    }

    /// Apply the next frame, scheduling the tick after it.
    pub fn tick(&mut self, legs: &mut LegRegistry) -> TickOutcome {
        let Self {
            state,
            slot,
            frame_period,
        } = self;

        let active = match state {
            SchedState::Running(active) => active,
            _ => return TickOutcome::NotRunning,
        };

        match active.schedule.next_pose() {
            Some(pose) => {
                legs.apply_all(&pose.angles);
                slot.schedule(*frame_period);

                TickOutcome::Applied {
                    // The cursor has already moved past the applied frame
                    frame: active.schedule.cursor() - 1,
                    cycle: active.schedule.cycle(),
                }
            }
            None => {
                info!(
                    "Motion \"{}\" complete after {} cycle(s)",
                    active.motion,
                    active.schedule.cycle() + 1
                );
                slot.cancel();
                *state = SchedState::Idle;

                TickOutcome::Halted
            }
        }
    }

    /// Tick if the pending tick is due.
    pub fn poll(&mut self, legs: &mut LegRegistry) -> Option<TickOutcome> {
        if self.slot.take_due() {
            Some(self.tick(legs))
        } else {
            None
        }
    }

    /// Toggle between running and paused.
    ///
    /// Pausing cancels the pending tick and keeps the playback position.
    /// Resuming immediately applies the frame at that position.
    pub fn pause(&mut self, legs: &mut LegRegistry) -> PauseOutcome {
        match mem::replace(&mut self.state, SchedState::Idle) {
            SchedState::Running(active) => {
                self.slot.cancel();
                let motion = active.motion.clone();
                self.state = SchedState::Paused(active);

                PauseOutcome::Paused(motion)
            }
            SchedState::Paused(active) => {
                let motion = active.motion.clone();
                self.state = SchedState::Running(active);
                self.tick(legs);

                PauseOutcome::Resumed(motion)
            }
            SchedState::Idle => PauseOutcome::NothingToPause,
        }
    }

    /// Stop any motion, returning its name.
    pub fn halt(&mut self) -> Option<String> {
        self.slot.cancel();

        match mem::replace(&mut self.state, SchedState::Idle) {
            SchedState::Running(active) | SchedState::Paused(active) => Some(active.motion),
            SchedState::Idle => None,
        }
    }

    /// Name of the running or paused motion.
    pub fn motion(&self) -> Option<&str> {
        self.active().map(|a| a.motion.as_str())
    }

    pub fn is_paused_on(&self, motion: &str) -> bool {
        match &self.state {
            SchedState::Paused(active) => active.motion == motion,
            _ => false,
        }
    }

    pub fn status(&self) -> SchedStatus {
        let kind = match self.state {
            SchedState::Idle => SchedStateKind::Idle,
            SchedState::Running(_) => SchedStateKind::Running,
            SchedState::Paused(_) => SchedStateKind::Paused,
        };

        SchedStatus {
            state: kind,
            motion: self.motion().map(String::from),
            cursor: self.active().map_or(0, |a| a.schedule.cursor()),
            cycle: self.active().map_or(0, |a| a.schedule.cycle()),
            tick_pending: self.slot.is_pending(),
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    fn active(&self) -> Option<&ActiveMotion> {
        match &self.state {
            SchedState::Running(active) | SchedState::Paused(active) => Some(active),
            SchedState::Idle => None,
        }
    }
}
