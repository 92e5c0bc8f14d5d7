//! Compilation of a gait table into one stride cycle

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use super::{GaitCmpError, GaitRow, GaitTable, Geometry, PoseCode};
use crate::{
    frame_sched::{Frame, FrameContext, PoseFrame},
    kin::LegSolver,
    leg_reg::{LegId, NUM_LEGS},
    traj::{self, Arc, Point},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Stance height offset of the leg diagonal to the lifted leg.
const DIAGONAL_HEIGHT_OFFSET: f64 = -3.0;

/// Stance height offset of the leg at the same end as the lifted leg.
const OPPOSITE_HEIGHT_OFFSET: f64 = -1.0;

/// Stance height offset of the leg on the same side as the lifted leg.
const SAME_SIDE_HEIGHT_OFFSET: f64 = 2.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compile one full stride cycle of `table`.
///
/// Each row gives one stance frame followed by `granularity` transition
/// frames towards the next row, the last row transitioning back to the
/// first. The cycle is not terminated by a loop directive.
pub fn compile_cycle(
    table: &GaitTable,
    geometry: &Geometry,
    solver: &LegSolver,
    granularity: usize,
) -> Result<Vec<Frame>, GaitCmpError> {
    table.validate()?;
    if granularity == 0 {
        return Err(GaitCmpError::ZeroGranularity);
    }

    let stances: Vec<[Point; NUM_LEGS]> = table
        .rows()
        .iter()
        .map(|row| stance_points(row, geometry))
        .collect();

    let mut frames = Vec::with_capacity(table.len() * (granularity + 1));

    for (row_idx, row) in table.rows().iter().enumerate() {
        frames.push(pose_frame(
            stances[row_idx],
            FrameContext::Stance { row: row_idx },
            solver,
        )?);

        let next_idx = table.next_row(row_idx);
        let context = FrameContext::Transition {
            from: row_idx,
            to: next_idx,
        };

        let mut paths: Vec<Vec<Point>> = Vec::with_capacity(NUM_LEGS);
        for leg in LegId::ALL.iter() {
            paths.push(transition_path(
                row.code(*leg),
                stances[row_idx][leg.index()],
                stances[next_idx][leg.index()],
                geometry,
                granularity,
            ));
        }

        // Zip the per leg paths into per instant frames
        for instant in 0..granularity {
            let mut points = [Point::default(); NUM_LEGS];
            for (point, path) in points.iter_mut().zip(paths.iter()) {
                *point = path[instant];
            }

            frames.push(pose_frame(points, context, solver)?);
        }
    }

    debug!(
        "Compiled {} row gait into {} frames",
        table.len(),
        frames.len()
    );

    Ok(frames)
}

/// Stance targets of every leg for a gait row.
///
/// The legs other than the lifted one are raised or lowered to keep the body
/// balanced over the three grounded feet.
pub fn stance_points(row: &GaitRow, geometry: &Geometry) -> [Point; NUM_LEGS] {
    let mut heights = [geometry.height; NUM_LEGS];

    if let Some(lifted) = row.lifted_leg() {
        heights[lifted.diagonal().index()] += DIAGONAL_HEIGHT_OFFSET;
        heights[lifted.opposite().index()] += OPPOSITE_HEIGHT_OFFSET;
        heights[lifted.same_side().index()] += SAME_SIDE_HEIGHT_OFFSET;
    }

    let mut points = [Point::default(); NUM_LEGS];
    for leg in LegId::ALL.iter() {
        let i = leg.index();
        points[i] = stance_point(row.code(*leg), heights[i], geometry);
    }

    points
}

/// Nominal stance target for a pose code at the given height.
pub fn stance_point(code: PoseCode, height: f64, geometry: &Geometry) -> Point {
    Point::new(code.position.x(geometry.step_width), height)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Points followed by one leg between two stances, always `granularity`
/// long and excluding the starting point.
fn transition_path(
    from_code: PoseCode,
    from: Point,
    to: Point,
    geometry: &Geometry,
    granularity: usize,
) -> Vec<Point> {
    let path = if from_code.lift {
        traj::elliptical(&swing_arc(from, to, geometry), granularity, true)
    } else {
        traj::linear(from, to, granularity, true)
    };

    // A leg which doesn't move holds its target
    if path.is_empty() {
        vec![to; granularity]
    } else {
        path
    }
}

/// Half ellipse lifting the foot from `from` and setting it down on `to`.
fn swing_arc(from: Point, to: Point, geometry: &Geometry) -> Arc {
    let radius_x = (from.x - to.x).abs() / 2.0;

    // Sweep over the top of the ellipse (smaller height is higher), in the
    // direction of travel
    let (start_angle_deg, end_angle_deg) = if from.x >= to.x {
        (360.0, 180.0)
    } else {
        (180.0, 360.0)
    };

    Arc {
        origin: Point::new(from.x.min(to.x) + radius_x, to.y),
        radius: Point::new(radius_x, geometry.step_height),
        start_angle_deg,
        end_angle_deg,
    }
}

/// Solve a set of foot targets into a pose frame.
fn pose_frame(
    points: [Point; NUM_LEGS],
    context: FrameContext,
    solver: &LegSolver,
) -> Result<Frame, GaitCmpError> {
    let angles = solver
        .solve_all(&points)
        .map_err(|(leg, source)| GaitCmpError::Kinematics {
            context,
            leg,
            source,
        })?;

    Ok(Frame::Pose(PoseFrame {
        angles,
        points,
        context,
    }))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_support::{reference_params, reference_solver, trot_table};

    fn compile_trot() -> Vec<Frame> {
        let params = reference_params();
        compile_cycle(
            &trot_table(),
            &params.geometry,
            &reference_solver(),
            params.granularity,
        )
        .unwrap()
    }

    fn poses(frames: &[Frame]) -> Vec<&PoseFrame> {
        frames.iter().filter_map(Frame::as_pose).collect()
    }

    #[test]
    fn test_frame_layout() {
        let frames = compile_trot();
        let granularity = reference_params().granularity;

        assert_eq!(frames.len(), 4 * (granularity + 1));

        let poses = poses(&frames);
        assert_eq!(poses.len(), frames.len());
        for row in 0..4 {
            let base = row * (granularity + 1);
            assert_eq!(poses[base].context, FrameContext::Stance { row });
            for k in 1..=granularity {
                assert_eq!(
                    poses[base + k].context,
                    FrameContext::Transition {
                        from: row,
                        to: (row + 1) % 4
                    }
                );
            }
        }
    }

    #[test]
    fn test_stability_offsets() {
        let geometry = reference_params().geometry;
        let table = trot_table();

        // Back left is lifted in the first row
        let points = stance_points(&table.rows()[0], &geometry);
        assert_eq!(points[LegId::FrontRight.index()], Point::new(-13.0, 107.0));
        assert_eq!(points[LegId::BackRight.index()].y, 109.0);
        assert_eq!(points[LegId::FrontLeft.index()].y, 112.0);
        assert_eq!(points[LegId::BackLeft.index()], Point::new(13.0, 110.0));

        // Without a lifted leg every foot is at the nominal height
        let flat = GaitTable::from_codes(&[[1, 2, 3, 3]]).unwrap();
        for point in stance_points(&flat.rows()[0], &geometry).iter() {
            assert_eq!(point.y, 110.0);
        }
    }

    #[test]
    fn test_cycle_returns_to_first_stance() {
        let frames = compile_trot();
        let poses = poses(&frames);

        let first = poses[0];
        let last = poses[poses.len() - 1];
        assert_eq!(first.context, FrameContext::Stance { row: 0 });
        assert_eq!(last.context, FrameContext::Transition { from: 3, to: 0 });

        // The end of the last transition is the first stance, within rounding
        for (a, b) in first.points.iter().zip(last.points.iter()) {
            assert!(a.distance_to(b) < 1.0, "{} vs {}", a, b);
        }
        for (a, b) in first.angles.iter().zip(last.angles.iter()) {
            assert!((a.hip_deg - b.hip_deg).abs() <= 2, "{} vs {}", a, b);
            assert!((a.knee_deg - b.knee_deg).abs() <= 2, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_lifted_leg_swings() {
        let frames = compile_trot();
        let granularity = reference_params().granularity;
        let poses = poses(&frames);

        // Back left lifts from the front-most position in the first transition
        let bl = LegId::BackLeft.index();
        let swing: Vec<Point> = poses[1..=granularity].iter().map(|p| p.points[bl]).collect();

        assert!(swing.iter().any(|p| p.y < 105.0), "{:?}", swing);
        assert_eq!(swing[granularity - 1], Point::new(-13.0, 109.0));

        // Grounded legs move in a straight line at stance height
        let fr = LegId::FrontRight.index();
        for pose in poses[1..=granularity].iter() {
            assert!(pose.points[fr].y >= 107.0 && pose.points[fr].y <= 112.0);
        }
    }

    #[test]
    fn test_held_legs_keep_sequence_length() {
        let params = reference_params();
        let table = GaitTable::from_codes(&[[1, 2, 3, 3]]).unwrap();

        let frames = compile_cycle(&table, &params.geometry, &reference_solver(), params.granularity).unwrap();
        assert_eq!(frames.len(), 1 + params.granularity);

        let poses = poses(&frames);
        for pose in poses.iter() {
            assert_eq!(pose.angles, poses[0].angles);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = serde_json::to_string(&compile_trot()).unwrap();
        let b = serde_json::to_string(&compile_trot()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_errors() {
        let params = reference_params();
        let solver = reference_solver();

        assert_eq!(
            compile_cycle(&trot_table(), &params.geometry, &solver, 0),
            Err(GaitCmpError::ZeroGranularity)
        );

        // Feet pulled up into the hips
        let mut geometry = params.geometry;
        geometry.height = 0.0;
        geometry.step_width = 0.0;
        assert!(matches!(
            compile_cycle(&trot_table(), &geometry, &solver, 3),
            Err(GaitCmpError::Kinematics {
                context: FrameContext::Stance { row: 0 },
                ..
            })
        ));
    }
}
