//! Trajectory generation module
//!
//! Produces the intermediate foot positions between two stance points, either
//! along a straight line or along an elliptical arc (the swing of a lifted
//! foot).
//!
//! Both generators share the `skip_start_point` contract: when chaining
//! trajectories the first point of a segment repeats the last point of the
//! previous one, so it can be skipped. Skipping keeps the full `granularity`
//! as the number of steps; not skipping uses `granularity - 1` steps so the
//! end point is still reached.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod elliptical;
mod linear;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

pub use elliptical::elliptical;
pub use linear::linear;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A point in the vertical plane of a leg.
///
/// `x` is the fore-aft displacement and `y` the height (hip to foot, so a
/// larger `y` is closer to the ground).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An elliptical arc, used for the swing of a lifted foot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    /// Centre of the ellipse.
    pub origin: Point,

    /// Horizontal (`x`) and vertical (`y`) radii.
    pub radius: Point,

    /// Units: degrees
    pub start_angle_deg: f64,

    /// Units: degrees
    pub end_angle_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        // Both slices are two dimensional so the norm always exists
        util::maths::norm(&[self.x, self.y], &[other.x, other.y]).unwrap_or(0.0)
    }

    /// Round both coordinates to the nearest integer (halves up).
    pub(crate) fn rounded(x: f64, y: f64) -> Self {
        Self {
            x: util::maths::round_half_up(x),
            y: util::maths::round_half_up(y),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x:{}, y:{})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Number of steps the path is divided into and the offset (in steps) of the
/// first returned point.
fn step_layout(granularity: usize, skip_start_point: bool) -> (f64, f64) {
    if skip_start_point {
        (granularity as f64, 1.0)
    } else {
        ((granularity - 1) as f64, 0.0)
    }
}
