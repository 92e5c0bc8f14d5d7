//! Frames making up a compiled schedule

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::fmt;

use serde::Serialize;

use crate::{kin::AnglePair, leg_reg::NUM_LEGS, traj::Point};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A full body pose, applied to all legs at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseFrame {
    /// Joint angles of each leg, in the fixed leg order.
    pub angles: [AnglePair; NUM_LEGS],

    /// Foot targets the angles were solved from.
    pub points: [Point; NUM_LEGS],

    /// Where in the gait the frame comes from.
    pub context: FrameContext,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// One timed motion instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Frame {
    Pose(PoseFrame),

    /// Jump back to the start of the schedule.
    Loop(LoopCount),
}

/// Number of times a loop directive sends playback back to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoopCount {
    Infinite,

    /// Remaining repeats. Zero halts playback.
    Times(u32),
}

/// Gait context of a pose frame, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FrameContext {
    /// Stance of a gait row.
    Stance { row: usize },

    /// Interpolated instant between the stances of two rows.
    Transition { from: usize, to: usize },

    /// A pose built outside of a gait table.
    Direct,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Frame {
    pub fn as_pose(&self) -> Option<&PoseFrame> {
        match self {
            Frame::Pose(p) => Some(p),
            Frame::Loop(_) => None,
        }
    }
}

impl LoopCount {
    /// Use up one repeat, returning false if none were left.
    pub(crate) fn consume(&mut self) -> bool {
        match self {
            LoopCount::Infinite => true,
            LoopCount::Times(0) => false,
            LoopCount::Times(n) => {
                *n -= 1;
                true
            }
        }
    }
}

impl fmt::Display for FrameContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameContext::Stance { row } => write!(f, "stance of row {}", row),
            FrameContext::Transition { from, to } => {
                write!(f, "transition from row {} to row {}", from, to)
            }
            FrameContext::Direct => write!(f, "direct pose"),
        }
    }
}
