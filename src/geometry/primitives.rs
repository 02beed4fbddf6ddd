//! Distance and containment primitives.

use super::types::{Point, Rect};

/// Euclidean distance `sqrt((x2-x1)^2 + (y2-y1)^2)`.
///
/// # Examples
///
/// ```
/// use warehouse_pso::geometry::{distance, Point};
///
/// let d = distance(&Point::new(0.0, 0.0), &Point::new(6.0, 8.0));
/// assert!((d - 10.0).abs() < 1e-12);
/// ```
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance_to(p2)
}

/// Returns `true` if `point` lies within the closed bounds of at least one
/// rectangle. A point exactly on an edge counts as inside.
///
/// # Examples
///
/// ```
/// use warehouse_pso::geometry::{is_inside_any_rectangle, Point, Rect};
///
/// let zones = [Rect::new(0.0, 0.0, 10.0, 10.0)];
/// assert!(is_inside_any_rectangle(&Point::new(10.0, 5.0), &zones));
/// assert!(!is_inside_any_rectangle(&Point::new(10.5, 5.0), &zones));
/// ```
pub fn is_inside_any_rectangle(point: &Point, rectangles: &[Rect]) -> bool {
    rectangles.iter().any(|r| r.contains(point))
}
