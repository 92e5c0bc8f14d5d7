//! Walk control module
//!
//! Public operations of the walker: standing, walking gaits, pausing,
//! calibration and direct leg positioning.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::{
    gait_cmp::GaitCmpError,
    kin::KinError,
    leg_reg::{LegId, LegRegError},
};

pub use cmd::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during WalkCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum WalkCtrlError {
    #[error("Invalid walk control parameters: {0}")]
    InvalidParams(String),

    #[error("No gait named \"{0}\" is defined")]
    UnknownGait(String),

    #[error("Invalid pose code {0}, expected a value from 1 to 4")]
    InvalidPoseCode(i64),

    #[error(transparent)]
    LegReg(#[from] LegRegError),

    #[error("Could not compile the \"{gait}\" gait: {source}")]
    GaitCmp { gait: String, source: GaitCmpError },

    #[error("{op} failed for the {leg} leg: {source}")]
    Kinematics {
        op: &'static str,
        leg: LegId,
        source: KinError,
    },
}
