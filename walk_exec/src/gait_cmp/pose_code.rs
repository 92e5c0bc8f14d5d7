//! Pose codes

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::convert::TryFrom;

use serde::{Deserialize, Serialize};

use super::GaitCmpError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Stride position of a leg and whether it lifts towards the next row.
///
/// Gait tables write these as the integers 1 to 4, 4 being both the
/// front-most position and the lift signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PoseCode {
    pub position: StridePos,
    pub lift: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The four fixed stance positions along the stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StridePos {
    Rear,
    MidRear,
    MidFront,
    Front,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PoseCode {
    pub fn from_code(code: i64) -> Result<Self, GaitCmpError> {
        let position = match code {
            1 => StridePos::Rear,
            2 => StridePos::MidRear,
            3 => StridePos::MidFront,
            4 => StridePos::Front,
            _ => return Err(GaitCmpError::InvalidPoseCode(code)),
        };

        Ok(Self {
            position,
            lift: code == 4,
        })
    }

    pub fn code(self) -> u8 {
        match self.position {
            StridePos::Rear => 1,
            StridePos::MidRear => 2,
            StridePos::MidFront => 3,
            StridePos::Front => 4,
        }
    }
}

impl StridePos {
    /// Fore-aft position of the foot for a stride of `step_width`.
    ///
    /// The stride is split into three equal segments: the outer positions
    /// are its ends and the inner ones sit half a segment either side of
    /// the middle.
    pub fn x(self, step_width: f64) -> f64 {
        let half_segment = step_width / 6.0;

        match self {
            StridePos::Rear => -step_width / 2.0,
            StridePos::MidRear => -half_segment,
            StridePos::MidFront => half_segment,
            StridePos::Front => step_width / 2.0,
        }
    }
}

impl TryFrom<i64> for PoseCode {
    type Error = GaitCmpError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<PoseCode> for u8 {
    fn from(code: PoseCode) -> Self {
        code.code()
    }
}

impl std::fmt::Display for PoseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
