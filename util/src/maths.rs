//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Convert an angle in radians into degrees.
pub fn degrees<T>(rad: T) -> T
where
    T: Float
{
    rad.to_degrees()
}

/// Convert an angle in degrees into radians.
pub fn radians<T>(deg: T) -> T
where
    T: Float
{
    deg.to_radians()
}

/// Round to the nearest integer, with halves rounded towards positive
/// infinity (so `-2.5` becomes `-2.0` and `2.5` becomes `3.0`).
pub fn round_half_up<T>(value: T) -> T
where
    T: Float
{
    let half = T::one() / (T::one() + T::one());
    (value + half).floor()
}

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where 
    T: Float 
{
    target_range.0 
        + ((value - source_range.0) 
        * (target_range.1 - target_range.0) 
        / (source_range.1 - source_range.0))
}

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is 
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T> 
where
    T: Float
{
    // Check that the dimentions match
    if point_0.len() != point_1.len() {
        return None;
    }

    let sum = point_0
        .iter()
        .zip(point_1.iter())
        .fold(T::zero(), |acc, (a, b)| acc + (*a - *b).powi(2));

    Some(sum.sqrt())
}

/// Limit a value to the closed range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T 
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5f64), 3.0);
        assert_eq!(round_half_up(-2.5f64), -2.0);
        assert_eq!(round_half_up(-0.5f64), 0.0);
        assert_eq!(round_half_up(4.333f64), 4.0);
        assert_eq!(round_half_up(-4.6f64), -5.0);
    }

    #[test]
    fn test_norm() {
        assert_eq!(norm(&[0f64, 0.0], &[3.0, 4.0]), Some(5.0));
        assert_eq!(norm(&[1f64, 1.0], &[1.0, 1.0]), Some(0.0));
        assert_eq!(norm(&[1f64], &[1.0, 1.0]), None);
    }

    #[test]
    fn test_conversions() {
        const PI: f64 = std::f64::consts::PI;

        assert!((degrees(PI) - 180.0).abs() < 1e-12);
        assert!((radians(90f64) - PI / 2.0).abs() < 1e-12);
        assert_eq!(clamp(1.2f64, -1.0, 1.0), 1.0);
        assert_eq!(clamp(-3f64, -1.0, 1.0), -1.0);
        assert_eq!(lin_map((0f64, 180.0), (544.0, 2400.0), 90.0), 1472.0);
    }
}
