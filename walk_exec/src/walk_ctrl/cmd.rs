//! Commands accepted by WalkCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use crate::leg_reg::LegId;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A walk control operation, as written in command scripts.
///
/// Serialised with a `cmd` tag, for example
/// `{"cmd": "pose_leg", "leg": "FR", "code": 3}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum WalkCmd {
    /// Stand on all four legs, at the configured height unless one is given.
    Stand {
        #[serde(default)]
        height: Option<f64>,
    },

    Forward,

    /// Walk with a named gait.
    Walk { gait: String },

    /// Pause the current motion, or resume it if already paused.
    Pause,

    Calibrate,

    CalibrateLeg { leg: LegId },

    /// Move a leg to the stance point of a pose code (1 to 4).
    PoseLeg { leg: LegId, code: i64 },

    /// Move a leg to an arbitrary point.
    PositionLeg { leg: LegId, x: f64, y: f64 },

    HomeLeg { leg: LegId },
}
