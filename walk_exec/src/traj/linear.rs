//! Straight line trajectories

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::{step_layout, Point};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Divide the segment `from -> to` into `granularity` equally spaced points.
///
/// Returns an empty trajectory if the segment has zero length. Points are
/// rounded to integer coordinates.
pub fn linear(from: Point, to: Point, granularity: usize, skip_start_point: bool) -> Vec<Point> {
    let distance = from.distance_to(&to);

    if distance == 0.0 || granularity == 0 {
        return Vec::new();
    }

    // A single point which keeps the start is just the start
    if granularity == 1 && !skip_start_point {
        return vec![Point::rounded(from.x, from.y)];
    }

    let delta_x = to.x - from.x;
    let delta_y = to.y - from.y;

    let (num_steps, first_step) = step_layout(granularity, skip_start_point);
    let step_size = distance / num_steps;

    (0..granularity)
        .map(|i| {
            let inc = (first_step + i as f64) * step_size / distance;
            Point::rounded(from.x + inc * delta_x, from.y + inc * delta_y)
        })
        .collect()
}
