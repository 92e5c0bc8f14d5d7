//! Parameters structures for the leg registry

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::LegId;
use crate::traj::Point;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Definition of a single leg.
#[derive(Debug, Clone, Deserialize)]
pub struct LegParams {
    pub id: LegId,

    /// Human readable name, used in operation descriptions.
    pub label: String,

    /// Position of the hip pivot in the body frame.
    pub origin: Point,

    pub hip: JointParams,

    pub knee: JointParams,
}

/// Binding of a joint to its actuator.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct JointParams {
    /// Pin (or board channel) the servo is attached to.
    pub pin: u8,

    /// Calibration trim added to every commanded angle.
    ///
    /// Units: degrees
    #[serde(default)]
    pub offset_deg: f64,

    /// Flip the angle about 90 degrees before adding the offset, for
    /// mechanically mirrored joints.
    #[serde(default)]
    pub invert: bool,
}
