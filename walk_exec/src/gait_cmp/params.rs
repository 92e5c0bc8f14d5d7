//! Parameters for the gait compiler

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Leg and stride geometry.
///
/// All lengths share the units of the leg origins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Length of the upper leg segment (hip to knee).
    pub femur: f64,

    /// Length of the lower leg segment (knee to foot).
    pub tibia: f64,

    /// Neutral stance height, hip to foot.
    pub height: f64,

    /// Height of the swing arc of a lifted foot.
    pub step_height: f64,

    /// Fore-aft distance between the rear-most and front-most stance
    /// positions.
    pub step_width: f64,
}

impl Geometry {
    /// Total length of the leg when fully extended.
    pub fn reach(&self) -> f64 {
        self.femur + self.tibia
    }
}
