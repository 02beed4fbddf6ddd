//! Flat coordinate vector for a facility placement.
//!
//! A [`Candidate`] stores `facility_count` points as
//! `[x0, y0, x1, y1, ...]`. The swarm also uses it for velocities, which share
//! the same length and the same elementwise arithmetic.

use crate::error::{Error, Result};
use crate::geometry::Point;
use std::ops::{AddAssign, Index, IndexMut, MulAssign};

/// A placement of `facility_count` facilities, flattened to
/// `2 * facility_count` reals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    coords: Vec<f64>,
}

impl Candidate {
    /// Builds a candidate from interleaved `x, y` coordinates.
    ///
    /// Fails if the vector is empty or has odd length.
    pub fn from_coords(coords: Vec<f64>) -> Result<Self> {
        if coords.is_empty() || coords.len() % 2 != 0 {
            return Err(Error::DimensionMismatch {
                expected: (coords.len() / 2).max(1) * 2,
                found: coords.len(),
            });
        }
        Ok(Self { coords })
    }

    /// Builds a candidate from facility points.
    ///
    /// # Examples
    ///
    /// ```
    /// use warehouse_pso::{Candidate, Point};
    ///
    /// let c = Candidate::from_points(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
    /// assert_eq!(c.facility_count(), 2);
    /// assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn from_points(points: &[Point]) -> Self {
        let coords = points.iter().flat_map(|p| [p.x, p.y]).collect();
        Self { coords }
    }

    /// All-zero vector for `facility_count` facilities.
    pub fn zeros(facility_count: usize) -> Self {
        Self {
            coords: vec![0.0; facility_count * 2],
        }
    }

    pub(crate) fn from_fn(len: usize, f: impl FnMut(usize) -> f64) -> Self {
        Self {
            coords: (0..len).map(f).collect(),
        }
    }

    pub fn facility_count(&self) -> usize {
        self.coords.len() / 2
    }

    /// Number of scalar coordinates (`2 * facility_count`).
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    /// Location of facility `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= facility_count()`.
    pub fn facility(&self, i: usize) -> Point {
        Point::new(self.coords[2 * i], self.coords[2 * i + 1])
    }

    /// Iterates facility locations in order.
    pub fn facilities(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.coords
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
    }

    pub fn to_points(&self) -> Vec<Point> {
        self.facilities().collect()
    }

    /// Clamps every coordinate into `[lo, hi]`.
    pub fn clamp(&mut self, lo: f64, hi: f64) {
        for c in &mut self.coords {
            *c = c.clamp(lo, hi);
        }
    }

    /// Returns `true` if every coordinate lies in `[lo, hi]`.
    pub fn is_within(&self, lo: f64, hi: f64) -> bool {
        self.coords.iter().all(|&c| (lo..=hi).contains(&c))
    }
}

impl Index<usize> for Candidate {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.coords[i]
    }
}

impl IndexMut<usize> for Candidate {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.coords[i]
    }
}

impl AddAssign<&Candidate> for Candidate {
    fn add_assign(&mut self, rhs: &Candidate) {
        debug_assert_eq!(self.coords.len(), rhs.coords.len());
        for (a, b) in self.coords.iter_mut().zip(&rhs.coords) {
            *a += b;
        }
    }
}

impl MulAssign<f64> for Candidate {
    fn mul_assign(&mut self, k: f64) {
        for a in &mut self.coords {
            *a *= k;
        }
    }
}
