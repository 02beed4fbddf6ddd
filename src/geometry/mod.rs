//! Planar geometry primitives.
//!
//! Points, axis-aligned rectangles, Euclidean distance, and closed-rectangle
//! containment. Everything here is a total function over finite input.

mod primitives;
mod types;

pub use primitives::{distance, is_inside_any_rectangle};
pub use types::{Point, Rect};
