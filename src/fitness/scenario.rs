//! Static scenario data consumed by the evaluator.

use crate::error::{Error, Result};
use crate::geometry::{distance, Point, Rect};

/// Flat penalty added for each facility inside an exclusion zone.
pub const DEFAULT_EXCLUSION_PENALTY: f64 = 1e9;

/// Multiplier applied to the depth of a distance violation.
pub const DEFAULT_PENALTY_SCALE: f64 = 1e6;

/// Length scale of the exponential soft-cost decay.
///
/// Fixed, and independent of the hard distance thresholds.
pub const SOFT_DECAY_SCALE: f64 = 100.0;

/// Relative importance of the soft objectives. All non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    /// Weight of the residential proximity cost.
    pub residential: f64,
    /// Weight of the facility crowding cost.
    pub separation: f64,
    /// Weight of the distance-from-center cost.
    pub centrality: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            residential: 0.6,
            separation: 0.5,
            centrality: 0.9,
        }
    }
}

impl Weights {
    pub fn new(residential: f64, separation: f64, centrality: f64) -> Self {
        Self {
            residential,
            separation,
            centrality,
        }
    }
}

/// Hard-constraint penalty magnitudes.
///
/// Must exceed the largest achievable soft cost by orders of magnitude.
/// [`Scenario::validate`] rejects values below the defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penalties {
    /// Added once per facility lying inside any exclusion zone.
    pub exclusion_zone: f64,
    /// Multiplies `min_residential_distance - d` for each violation.
    pub residential_scale: f64,
    /// Multiplies `min_facility_separation - d` for each violating pair.
    pub separation_scale: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            exclusion_zone: DEFAULT_EXCLUSION_PENALTY,
            residential_scale: DEFAULT_PENALTY_SCALE,
            separation_scale: DEFAULT_PENALTY_SCALE,
        }
    }
}

/// The placement problem: a square region `[0, bounds]²`, forbidden
/// rectangles, residential centers, distance thresholds and weights.
///
/// Built once by the caller and only read during optimization.
///
/// # Examples
///
/// ```
/// use warehouse_pso::fitness::{Scenario, Weights};
/// use warehouse_pso::geometry::{Point, Rect};
///
/// let scenario = Scenario::new(1000.0)
///     .with_exclusion_zones(vec![Rect::new(400.0, 400.0, 600.0, 600.0)])
///     .with_residential_points(vec![Point::new(500.0, 500.0)])
///     .with_min_residential_distance(50.0)
///     .with_min_facility_separation(100.0)
///     .with_weights(Weights::new(0.6, 0.5, 0.9));
/// assert!(scenario.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    /// Side length of the square region.
    pub bounds: f64,

    /// Rectangles in which no facility may be placed.
    pub exclusion_zones: Vec<Rect>,

    /// Residential centers facilities must keep away from.
    pub residential_points: Vec<Point>,

    /// Minimum allowed facility-to-residence distance.
    pub min_residential_distance: f64,

    /// Minimum allowed facility-to-facility distance.
    pub min_facility_separation: f64,

    /// Soft objective weights.
    pub weights: Weights,

    /// Hard constraint penalties.
    pub penalties: Penalties,
}

impl Scenario {
    /// Creates an empty scenario over `[0, bounds]²` with default
    /// thresholds (50 / 100), weights and penalties.
    pub fn new(bounds: f64) -> Self {
        Self {
            bounds,
            exclusion_zones: Vec::new(),
            residential_points: Vec::new(),
            min_residential_distance: 50.0,
            min_facility_separation: 100.0,
            weights: Weights::default(),
            penalties: Penalties::default(),
        }
    }

    pub fn with_exclusion_zones(mut self, zones: Vec<Rect>) -> Self {
        self.exclusion_zones = zones;
        self
    }

    pub fn with_residential_points(mut self, points: Vec<Point>) -> Self {
        self.residential_points = points;
        self
    }

    pub fn with_min_residential_distance(mut self, d: f64) -> Self {
        self.min_residential_distance = d;
        self
    }

    pub fn with_min_facility_separation(mut self, d: f64) -> Self {
        self.min_facility_separation = d;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_penalties(mut self, penalties: Penalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Center of the region.
    pub fn center(&self) -> Point {
        Point::new(self.bounds / 2.0, self.bounds / 2.0)
    }

    /// Distance from the center to a corner: the largest distance any
    /// in-bounds point can have from the center.
    pub fn max_center_distance(&self) -> f64 {
        distance(&Point::new(0.0, 0.0), &self.center())
    }

    /// Validates the scenario.
    pub fn validate(&self) -> Result<()> {
        if !(self.bounds.is_finite() && self.bounds > 0.0) {
            return Err(invalid(format!(
                "bounds must be positive and finite, got {}",
                self.bounds
            )));
        }
        if !(self.min_residential_distance.is_finite() && self.min_residential_distance > 0.0) {
            return Err(invalid(format!(
                "min_residential_distance must be positive, got {}",
                self.min_residential_distance
            )));
        }
        if !(self.min_facility_separation.is_finite() && self.min_facility_separation > 0.0) {
            return Err(invalid(format!(
                "min_facility_separation must be positive, got {}",
                self.min_facility_separation
            )));
        }

        let w = &self.weights;
        for (name, value) in [
            ("residential", w.residential),
            ("separation", w.separation),
            ("centrality", w.centrality),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(format!(
                    "{name} weight must be non-negative, got {value}"
                )));
            }
        }

        let p = &self.penalties;
        for (name, value, floor) in [
            ("exclusion_zone", p.exclusion_zone, DEFAULT_EXCLUSION_PENALTY),
            ("residential_scale", p.residential_scale, DEFAULT_PENALTY_SCALE),
            ("separation_scale", p.separation_scale, DEFAULT_PENALTY_SCALE),
        ] {
            if !(value.is_finite() && value >= floor) {
                return Err(invalid(format!(
                    "{name} penalty must be at least {floor:e}, got {value}"
                )));
            }
        }

        if let Some((i, zone)) = self
            .exclusion_zones
            .iter()
            .enumerate()
            .find(|(_, z)| !z.is_well_formed())
        {
            return Err(invalid(format!(
                "exclusion zone {i} is malformed: {zone:?}"
            )));
        }
        if let Some(i) = self
            .residential_points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(invalid(format!("residential point {i} is not finite")));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidScenario(msg)
}
