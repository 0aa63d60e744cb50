//! Rectangle and centroid geometry, plus the object-to-detection distance matrix

use ndarray::Array2;
use num::ToPrimitive;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned detection rectangle `(x1, y1, x2, y2)`
///
/// Coordinates can be any primitive number; they are only ever read through
/// `ToPrimitive`, so `f32` detector output and `i32` pixel boxes both work.
/// The rectangle is not validated: `x2 < x1` is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect<T = f32> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl<T: ToPrimitive + Copy> Rect<T> {
    /// Center point of the rectangle, averaged in `f64` and truncated toward zero
    ///
    /// The cast saturates: centers beyond the `i64` range clamp to
    /// `i64::MIN`/`i64::MAX`, and a NaN coordinate (or one `to_f64` cannot
    /// represent) yields 0 on that axis, so such a rectangle lands on the origin.
    pub fn centroid(&self) -> Centroid {
        let x1 = self.x1.to_f64().unwrap_or(f64::NAN);
        let y1 = self.y1.to_f64().unwrap_or(f64::NAN);
        let x2 = self.x2.to_f64().unwrap_or(f64::NAN);
        let y2 = self.y2.to_f64().unwrap_or(f64::NAN);
        Centroid {
            x: ((x1 + x2) / 2.0) as i64,
            y: ((y1 + y2) / 2.0) as i64,
        }
    }

    pub fn to_bounds(&self) -> [T; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl<T> From<[T; 4]> for Rect<T> {
    fn from([x1, y1, x2, y2]: [T; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl<T> From<(T, T, T, T)> for Rect<T> {
    fn from((x1, y1, x2, y2): (T, T, T, T)) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl<T: fmt::Display> fmt::Display for Rect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Integer center point of a tracked object or detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Centroid {
    pub x: i64,
    pub y: i64,
}

impl Centroid {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another centroid
    ///
    /// Differences are taken in `f64`; the full `i64` span does not fit in an `i64`.
    pub fn distance(&self, other: &Centroid) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.hypot(dy)
    }
}

impl fmt::Display for Centroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compute the distance matrix between tracked objects and input centroids
/// Returns: (n_objects, n_inputs) matrix, rows follow the order of `objects`
pub fn distance_matrix(objects: &[Centroid], inputs: &[Centroid]) -> Array2<f64> {
    let n_objects = objects.len();
    let n_inputs = inputs.len();

    if n_objects == 0 || n_inputs == 0 {
        return Array2::zeros((n_objects, n_inputs));
    }

    let mut matrix = Array2::<f64>::zeros((n_objects, n_inputs));

    // one row per object, filled in parallel
    matrix
        .outer_iter_mut()
        .collect::<Vec<_>>()
        .into_par_iter()
        .zip(objects.par_iter())
        .for_each(|(mut row, object)| {
            for (cell, input) in row.iter_mut().zip(inputs) {
                *cell = object.distance(input);
            }
        });

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_centroid_of_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.centroid(), Centroid::new(5, 5));

        let rect = Rect::new(10, 20, 30, 41);
        assert_eq!(rect.centroid(), Centroid::new(20, 30));
    }

    #[test]
    fn test_centroid_truncates_toward_zero() {
        let rect = Rect::new(0.0_f32, 0.0, 3.0, 5.0);
        assert_eq!(rect.centroid(), Centroid::new(1, 2));

        // -1.5 truncates to -1, not -2
        let rect = Rect::new(-3, -3, 0, 0);
        assert_eq!(rect.centroid(), Centroid::new(-1, -1));
    }

    #[test]
    fn test_malformed_rect_is_not_rejected() {
        let rect = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(rect.centroid(), Centroid::new(5, 5));
    }

    #[test]
    fn test_rect_conversions() {
        let a: Rect<i32> = [1, 2, 3, 4].into();
        let b: Rect<i32> = (1, 2, 3, 4).into();
        assert_eq!(a, b);
        assert_eq!(a.to_bounds(), [1, 2, 3, 4]);
        assert_eq!(a.to_string(), "Rect(1, 2, 3, 4)");
    }

    #[test]
    fn test_distance() {
        let a = Centroid::new(0, 0);
        let b = Centroid::new(3, 4);
        assert_abs_diff_eq!(a.distance(&b), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.distance(&a), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_distance_across_full_range() {
        let a = Centroid::new(i64::MAX, 0);
        let b = Centroid::new(i64::MIN, 0);
        assert_eq!(a.distance(&b), 2.0_f64.powi(64));
        assert_eq!(b.distance(&a), 2.0_f64.powi(64));

        let c = Centroid::new(i64::MIN, i64::MAX);
        assert!(c.distance(&Centroid::new(i64::MAX, i64::MIN)) > 2.0_f64.powi(64));
    }

    #[test]
    fn test_extreme_rects_saturate() {
        let far = Rect::new(f32::MAX, 0.0, f32::MAX, 0.0);
        assert_eq!(far.centroid(), Centroid::new(i64::MAX, 0));
        let far = Rect::new(-f32::MAX, 0.0, -f32::MAX, 0.0);
        assert_eq!(far.centroid(), Centroid::new(i64::MIN, 0));
    }

    #[test]
    fn test_nan_rect_lands_on_origin() {
        let rect = Rect::new(f32::NAN, 4.0, f32::NAN, 8.0);
        assert_eq!(rect.centroid(), Centroid::new(0, 6));
    }

    #[test]
    fn test_distance_matrix() {
        let objects = [Centroid::new(0, 0), Centroid::new(100, 100)];
        let inputs = [Centroid::new(1, 1), Centroid::new(99, 99), Centroid::new(0, 10)];
        let d = distance_matrix(&objects, &inputs);

        assert_eq!(d.dim(), (2, 3));
        assert_abs_diff_eq!(d[[0, 0]], 2.0_f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(d[[1, 1]], 2.0_f64.sqrt(), epsilon = 1e-9);
        assert_abs_diff_eq!(d[[0, 2]], 10.0, epsilon = 1e-9);
        assert!(d[[0, 1]] > 100.0);
    }

    #[test]
    fn test_distance_matrix_extreme_coordinates() {
        let objects = [Centroid::new(i64::MAX, 0)];
        let inputs = [Centroid::new(i64::MIN, 0), Centroid::new(i64::MAX, 0)];
        let d = distance_matrix(&objects, &inputs);
        assert_eq!(d[[0, 0]], 2.0_f64.powi(64));
        assert_eq!(d[[0, 1]], 0.0);
    }

    #[test]
    fn test_distance_matrix_empty() {
        let objects = [Centroid::new(0, 0)];
        assert_eq!(distance_matrix(&objects, &[]).dim(), (1, 0));
        assert_eq!(distance_matrix(&[], &objects).dim(), (0, 1));
    }
}
