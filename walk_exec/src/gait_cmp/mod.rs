//! Gait compiler module
//!
//! Turns a cyclic gait table into the pose frames of one full stride cycle.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod compile;
mod gait_table;
mod params;
mod pose_code;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::{frame_sched::FrameContext, kin::KinError, leg_reg::LegId};

pub use compile::*;
pub use gait_table::*;
pub use params::*;
pub use pose_code::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while compiling a gait.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaitCmpError {
    #[error("Invalid pose code {0}, expected a value from 1 to 4")]
    InvalidPoseCode(i64),

    #[error("The gait table has no rows")]
    EmptyTable,

    #[error("Row {row} of the gait table lifts more than one leg")]
    MultipleLifts { row: usize },

    #[error("The granularity must be at least 1")]
    ZeroGranularity,

    #[error("Could not solve the {leg} leg for the {context}: {source}")]
    Kinematics {
        context: FrameContext,
        leg: LegId,
        source: KinError,
    },
}
