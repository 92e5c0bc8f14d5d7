//! Elliptical arc trajectories

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::radians;

use super::{step_layout, Arc, Point};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Divide the arc into `granularity` points separated by equal angles.
///
/// Points are rounded to integer coordinates.
pub fn elliptical(arc: &Arc, granularity: usize, skip_start_point: bool) -> Vec<Point> {
    if granularity == 0 {
        return Vec::new();
    }

    let point_at = |angle_deg: f64| {
        let angle_rad = radians(angle_deg);
        Point::rounded(
            arc.origin.x + arc.radius.x * angle_rad.cos(),
            arc.origin.y + arc.radius.y * angle_rad.sin(),
        )
    };

    if granularity == 1 && !skip_start_point {
        return vec![point_at(arc.start_angle_deg)];
    }

    let (num_steps, first_step) = step_layout(granularity, skip_start_point);
    let step_size = (arc.end_angle_deg - arc.start_angle_deg) / num_steps;

    (0..granularity)
        .map(|i| point_at(arc.start_angle_deg + (first_step + i as f64) * step_size))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn swing_arc() -> Arc {
        Arc {
            origin: Point::new(0.0, 110.0),
            radius: Point::new(12.0, 10.0),
            start_angle_deg: 360.0,
            end_angle_deg: 180.0,
        }
    }

    #[test]
    fn test_elliptical_full() {
        let traj = elliptical(&swing_arc(), 5, false);

        assert_eq!(
            traj,
            vec![
                Point::new(12.0, 110.0),
                Point::new(8.0, 103.0),
                Point::new(0.0, 100.0),
                Point::new(-8.0, 103.0),
                Point::new(-12.0, 110.0),
            ]
        );
    }

    #[test]
    fn test_elliptical_skip_start() {
        let traj = elliptical(&swing_arc(), 3, true);

        // The foot rises (smaller height) mid swing and lands on the end point
        assert_eq!(
            traj,
            vec![
                Point::new(6.0, 101.0),
                Point::new(-6.0, 101.0),
                Point::new(-12.0, 110.0),
            ]
        );
    }

    #[test]
    fn test_elliptical_degenerate() {
        assert!(elliptical(&swing_arc(), 0, false).is_empty());
        assert_eq!(elliptical(&swing_arc(), 1, false), vec![Point::new(12.0, 110.0)]);
    }
}
