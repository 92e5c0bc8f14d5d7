//! Kinematics module
//!
//! Closed form inverse kinematics for the two segment (femur + tibia) legs.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod inverse_kinematics;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::leg_reg::{LegId, NUM_LEGS};
use crate::traj::Point;

pub use inverse_kinematics::solve_ik;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Joint angles for one leg, before any calibration offset or inversion is
/// applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnglePair {
    /// Units: degrees
    pub hip_deg: i32,

    /// Units: degrees
    pub knee_deg: i32,
}

/// Solves foot targets into joint angles for every leg of the robot.
#[derive(Debug, Clone, Copy)]
pub struct LegSolver {
    /// Units: linear units of the leg geometry
    femur: f64,

    /// Units: linear units of the leg geometry
    tibia: f64,

    /// Hip pivot of each leg, indexed by [`LegId::index`].
    origins: [Point; NUM_LEGS],
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while solving the kinematics.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum KinError {
    #[error("Target {target} coincides with the hip origin {origin}")]
    CoincidentTarget { origin: Point, target: Point },

    #[error("Target {target} cannot be solved from origin {origin} (too close to the hip)")]
    OutOfDomain { origin: Point, target: Point },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl AnglePair {
    pub fn new(hip_deg: i32, knee_deg: i32) -> Self {
        Self { hip_deg, knee_deg }
    }
}

impl std::fmt::Display for AnglePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(hip:{}, knee:{})", self.hip_deg, self.knee_deg)
    }
}

impl LegSolver {
    pub fn new(femur: f64, tibia: f64, origins: [Point; NUM_LEGS]) -> Self {
        Self { femur, tibia, origins }
    }

    /// Solve the joint angles which place the foot of `leg` on `target`.
    ///
    /// The target is leg-local. Mechanically mirrored legs see the fore-aft
    /// axis flipped, so `x` is negated for them before solving.
    pub fn solve(&self, leg: LegId, target: Point) -> Result<AnglePair, KinError> {
        let target = if leg.is_mirrored() {
            Point::new(-target.x, target.y)
        } else {
            target
        };

        solve_ik(self.femur, self.tibia, self.origins[leg.index()], target)
    }

    /// Solve all legs at once, failing if any single leg fails.
    pub fn solve_all(
        &self,
        targets: &[Point; NUM_LEGS],
    ) -> Result<[AnglePair; NUM_LEGS], (LegId, KinError)> {
        let mut angles = [AnglePair::default(); NUM_LEGS];

        for leg in LegId::ALL.iter() {
            angles[leg.index()] = self
                .solve(*leg, targets[leg.index()])
                .map_err(|e| (*leg, e))?;
        }

        Ok(angles)
    }

    pub fn femur(&self) -> f64 {
        self.femur
    }

    pub fn tibia(&self) -> f64 {
        self.tibia
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reference_solver() -> LegSolver {
        LegSolver::new(
            44.0,
            74.0,
            [
                Point::new(10.0, 0.0),
                Point::new(15.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_solve_home() {
        let solver = reference_solver();
        let home = Point::new(0.0, 110.0);

        assert_eq!(solver.solve(LegId::FrontRight, home), Ok(AnglePair::new(68, 137)));
        assert_eq!(solver.solve(LegId::FrontLeft, home), Ok(AnglePair::new(72, 139)));
        assert_eq!(solver.solve(LegId::BackRight, home), Ok(AnglePair::new(68, 137)));
        assert_eq!(solver.solve(LegId::BackLeft, home), Ok(AnglePair::new(62, 136)));
    }

    #[test]
    fn test_mirroring() {
        let solver = reference_solver();

        // FR and BR share an origin, BR is mirrored
        for &(x, y) in [(5.0, 110.0), (-13.0, 108.0), (4.0, 95.0)].iter() {
            assert_eq!(
                solver.solve(LegId::FrontRight, Point::new(x, y)),
                solver.solve(LegId::BackRight, Point::new(-x, y))
            );
        }
        assert_ne!(
            solver.solve(LegId::FrontRight, Point::new(13.0, 110.0)),
            solver.solve(LegId::BackRight, Point::new(13.0, 110.0))
        );
    }

    #[test]
    fn test_solve_all() {
        let solver = reference_solver();

        let angles = solver.solve_all(&[Point::new(0.0, 110.0); NUM_LEGS]).unwrap();
        assert_eq!(angles[LegId::BackLeft.index()], AnglePair::new(62, 136));

        // BL's origin is at (0, 0), so this target is coincident for it alone
        let mut targets = [Point::new(0.0, 110.0); NUM_LEGS];
        targets[LegId::BackLeft.index()] = Point::new(0.0, 0.0);
        match solver.solve_all(&targets) {
            Err((leg, KinError::CoincidentTarget { .. })) => assert_eq!(leg, LegId::BackLeft),
            r => panic!("Expected coincident target error, got {:?}", r),
        }
    }
}
