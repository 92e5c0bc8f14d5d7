//! Leg registry module
//!
//! Owns the four legs of the robot, their joint bindings and actuators, and
//! the fixed topology relating the legs to one another.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::servo_ctrl::ServoError;

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of legs on the robot.
pub const NUM_LEGS: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Identity of a leg. The declaration order is the fixed leg order used by
/// gait rows and every per-leg array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegId {
    #[serde(rename = "FR")]
    FrontRight,

    #[serde(rename = "FL")]
    FrontLeft,

    #[serde(rename = "BR")]
    BackRight,

    #[serde(rename = "BL")]
    BackLeft,
}

/// The two joints of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JointKind {
    Hip,
    Knee,
}

/// Possible errors that can occur in the leg registry.
#[derive(Debug, thiserror::Error)]
pub enum LegRegError {
    #[error("Unknown leg \"{0}\", expected one of FR, FL, BR or BL")]
    UnknownLeg(String),

    #[error("No definition was provided for the {0} leg")]
    MissingLeg(LegId),

    #[error("The {0} leg is defined more than once")]
    DuplicateLeg(LegId),

    #[error("Could not create the {joint} actuator of the {leg} leg: {source}")]
    ActuatorInit {
        leg: LegId,
        joint: JointKind,
        source: ServoError,
    },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LegId {
    /// All legs in the fixed leg order.
    pub const ALL: [LegId; NUM_LEGS] = [
        LegId::FrontRight,
        LegId::FrontLeft,
        LegId::BackRight,
        LegId::BackLeft,
    ];

    /// Position of the leg in the fixed leg order.
    pub fn index(self) -> usize {
        match self {
            LegId::FrontRight => 0,
            LegId::FrontLeft => 1,
            LegId::BackRight => 2,
            LegId::BackLeft => 3,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            LegId::FrontRight => "FR",
            LegId::FrontLeft => "FL",
            LegId::BackRight => "BR",
            LegId::BackLeft => "BL",
        }
    }

    /// The leg at the same end of the body, on the other side.
    pub fn opposite(self) -> LegId {
        match self {
            LegId::FrontRight => LegId::FrontLeft,
            LegId::FrontLeft => LegId::FrontRight,
            LegId::BackRight => LegId::BackLeft,
            LegId::BackLeft => LegId::BackRight,
        }
    }

    /// The leg on the same side of the body, at the other end.
    pub fn same_side(self) -> LegId {
        match self {
            LegId::FrontRight => LegId::BackRight,
            LegId::FrontLeft => LegId::BackLeft,
            LegId::BackRight => LegId::FrontRight,
            LegId::BackLeft => LegId::FrontLeft,
        }
    }

    /// The leg at the opposite corner of the body.
    pub fn diagonal(self) -> LegId {
        match self {
            LegId::FrontRight => LegId::BackLeft,
            LegId::FrontLeft => LegId::BackRight,
            LegId::BackRight => LegId::FrontLeft,
            LegId::BackLeft => LegId::FrontRight,
        }
    }

    /// Whether the leg is mounted mirrored, with its fore-aft axis flipped.
    pub fn is_mirrored(self) -> bool {
        matches!(self, LegId::BackRight | LegId::BackLeft)
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for LegId {
    type Err = LegRegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LegId::ALL
            .iter()
            .find(|id| id.code().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| LegRegError::UnknownLeg(s.to_string()))
    }
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointKind::Hip => write!(f, "hip"),
            JointKind::Knee => write!(f, "knee"),
        }
    }
}
