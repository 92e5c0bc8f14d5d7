//! Two link planar inverse kinematics

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::f64::consts::FRAC_PI_2;

use util::maths::{clamp, degrees, round_half_up};

use super::{AnglePair, KinError};
use crate::traj::Point;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Amount by which a cosine may leave `[-1, 1]` through rounding error alone.
const COS_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Solve the hip and knee angles placing the end of a femur/tibia chain
/// pivoting about `origin` on `target`.
///
/// Targets further away than the fully extended leg are not an error: the
/// leg reaches as far as it can towards them.
///
/// Angles are rounded to whole degrees.
pub fn solve_ik(femur: f64, tibia: f64, origin: Point, target: Point) -> Result<AnglePair, KinError> {
    let h_x = target.x - origin.x;
    let h_y = target.y - origin.y;

    // Hypotenuse between the hip and the foot
    let mut k = origin.distance_to(&target);

    if k == 0.0 {
        return Err(KinError::CoincidentTarget { origin, target });
    }

    // The hypotenuse can't be longer than the leg
    if k > femur + tibia {
        k = femur + tibia;
    }

    let out_of_domain = || KinError::OutOfDomain { origin, target };

    // Knee angle, between femur and tibia
    let knee_rad = checked_acos(
        (femur.powi(2) + tibia.powi(2) - k.powi(2)) / (2.0 * femur * tibia),
    )
    .ok_or_else(out_of_domain)?;

    // Angle between the hypotenuse and the femur
    let hyp_femur_rad = checked_acos(
        (k.powi(2) + femur.powi(2) - tibia.powi(2)) / (2.0 * k * femur),
    )
    .ok_or_else(out_of_domain)?;

    // Angle between the hypotenuse and the vertical. Saturates with the
    // hypotenuse when the target is out of reach.
    let hyp_vert_rad = clamp(h_x / k, -1.0, 1.0).asin();

    let hip_rad = FRAC_PI_2 - (hyp_femur_rad + hyp_vert_rad);

    // Rounded values are integral and well within i32
    Ok(AnglePair {
        hip_deg: round_half_up(degrees(hip_rad)) as i32,
        knee_deg: round_half_up(degrees(knee_rad)) as i32,
    })
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// `acos` which rejects arguments outside of `[-1, 1]` beyond rounding error.
fn checked_acos(cos: f64) -> Option<f64> {
    if cos.is_nan() || cos.abs() > 1.0 + COS_TOLERANCE {
        return None;
    }
    Some(clamp(cos, -1.0, 1.0).acos())
}

#[cfg(test)]
mod test {
    use super::*;

    const FEMUR: f64 = 44.0;
    const TIBIA: f64 = 74.0;

    /// Foot position for a pair of joint angles.
    fn forward_kinematics(angles: AnglePair) -> Point {
        let femur_rad = FRAC_PI_2 - (angles.hip_deg as f64).to_radians();
        let tibia_rad = femur_rad - (std::f64::consts::PI - (angles.knee_deg as f64).to_radians());

        Point::new(
            FEMUR * femur_rad.sin() + TIBIA * tibia_rad.sin(),
            FEMUR * femur_rad.cos() + TIBIA * tibia_rad.cos(),
        )
    }

    #[test]
    fn test_reachable_round_trip() {
        let origin = Point::default();

        for &(x, y) in [(0.0, 110.0), (13.0, 110.0), (-13.0, 107.0), (0.0, 90.0)].iter() {
            let target = Point::new(x, y);
            let angles = solve_ik(FEMUR, TIBIA, origin, target).unwrap();
            let reached = forward_kinematics(angles);

            assert!(
                (reached.x - x).abs() <= 1.0 && (reached.y - y).abs() <= 1.0,
                "{} solved to {} reaching {}",
                target, angles, reached
            );
        }
    }

    #[test]
    fn test_known_angles() {
        let origin = Point::default();

        assert_eq!(
            solve_ik(FEMUR, TIBIA, origin, Point::new(0.0, 110.0)),
            Ok(AnglePair::new(62, 136))
        );
        assert_eq!(
            solve_ik(FEMUR, TIBIA, origin, Point::new(20.0, 100.0)),
            Ok(AnglePair::new(39, 117))
        );
        assert_eq!(
            solve_ik(FEMUR, TIBIA, origin, Point::new(-20.0, 100.0)),
            Ok(AnglePair::new(61, 117))
        );
    }

    #[test]
    fn test_saturation() {
        let origin = Point::default();

        let at_reach = solve_ik(FEMUR, TIBIA, origin, Point::new(0.0, 118.0)).unwrap();
        let beyond = solve_ik(FEMUR, TIBIA, origin, Point::new(0.0, 200.0)).unwrap();
        assert_eq!(at_reach.knee_deg, beyond.knee_deg);
        assert_eq!(at_reach, AnglePair::new(90, 180));

        // Along a slanted bearing too: (30, 40) scaled to a length of 118 and 150
        let at_reach = solve_ik(FEMUR, TIBIA, origin, Point::new(70.8, 94.4)).unwrap();
        let beyond = solve_ik(FEMUR, TIBIA, origin, Point::new(90.0, 120.0)).unwrap();
        assert_eq!(at_reach.knee_deg, beyond.knee_deg);

        // Even a target far out along the fore-aft axis gives real angles
        assert!(solve_ik(FEMUR, TIBIA, origin, Point::new(300.0, 10.0)).is_ok());
    }

    #[test]
    fn test_domain_errors() {
        let origin = Point::new(10.0, 0.0);

        assert_eq!(
            solve_ik(FEMUR, TIBIA, origin, origin),
            Err(KinError::CoincidentTarget { origin, target: origin })
        );

        // Closer than |tibia - femur| to the hip
        let target = Point::new(10.0, 20.0);
        assert_eq!(
            solve_ik(FEMUR, TIBIA, origin, target),
            Err(KinError::OutOfDomain { origin, target })
        );
    }
}
