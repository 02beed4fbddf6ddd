//! Penalty and soft-cost evaluation.

use super::scenario::{Scenario, SOFT_DECAY_SCALE};
use crate::candidate::Candidate;
use crate::geometry::{distance, is_inside_any_rectangle};

/// Every component of a candidate's fitness.
///
/// Hard fields are raw penalty sums. Soft fields already include their
/// [`Weights`](super::Weights) factor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessBreakdown {
    /// Penalty from facilities inside exclusion zones.
    pub exclusion_penalty: f64,
    /// Penalty from facilities too close to residential points.
    pub residential_penalty: f64,
    /// Penalty from facility pairs closer than the minimum separation.
    pub separation_penalty: f64,
    /// Weighted residential proximity cost.
    pub residential_cost: f64,
    /// Weighted facility crowding cost.
    pub separation_cost: f64,
    /// Weighted distance-from-center cost.
    pub centrality_cost: f64,
    /// Number of facilities inside an exclusion zone.
    pub exclusion_violations: usize,
    /// Number of (facility, residence) pairs under the minimum distance.
    pub residential_violations: usize,
    /// Number of facility pairs under the minimum separation.
    pub separation_violations: usize,
}

impl FitnessBreakdown {
    pub fn hard_penalty(&self) -> f64 {
        self.exclusion_penalty + self.residential_penalty + self.separation_penalty
    }

    pub fn soft_cost(&self) -> f64 {
        self.residential_cost + self.separation_cost + self.centrality_cost
    }

    /// The scalar fitness, identical to [`evaluate_fitness`].
    pub fn total(&self) -> f64 {
        self.hard_penalty() + self.soft_cost()
    }

    /// `true` when no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.exclusion_violations == 0
            && self.residential_violations == 0
            && self.separation_violations == 0
    }
}

/// Computes the fitness of `candidate` under `scenario`. Lower is better.
///
/// Pure and deterministic: identical inputs give bit-identical output.
///
/// # Examples
///
/// ```
/// use warehouse_pso::fitness::{evaluate_fitness, Scenario};
/// use warehouse_pso::geometry::{Point, Rect};
/// use warehouse_pso::Candidate;
///
/// let scenario = Scenario::new(1000.0)
///     .with_exclusion_zones(vec![Rect::new(400.0, 400.0, 600.0, 600.0)]);
///
/// let inside = Candidate::from_points(&[Point::new(500.0, 500.0)]);
/// let outside = Candidate::from_points(&[Point::new(100.0, 100.0)]);
/// assert!(evaluate_fitness(&inside, &scenario) >= 1e9);
/// assert!(evaluate_fitness(&outside, &scenario) < 1e9);
/// ```
pub fn evaluate_fitness(candidate: &Candidate, scenario: &Scenario) -> f64 {
    evaluate_breakdown(candidate, scenario).total()
}

/// Computes every fitness component of `candidate` under `scenario`.
pub fn evaluate_breakdown(candidate: &Candidate, scenario: &Scenario) -> FitnessBreakdown {
    let penalties = &scenario.penalties;
    let weights = &scenario.weights;
    let n = candidate.facility_count();

    let mut b = FitnessBreakdown::default();
    let mut residential_sum = 0.0;
    let mut separation_sum = 0.0;
    let mut centrality_sum = 0.0;

    let center = scenario.center();
    let max_center = scenario.max_center_distance();

    for i in 0..n {
        let facility = candidate.facility(i);

        if is_inside_any_rectangle(&facility, &scenario.exclusion_zones) {
            b.exclusion_penalty += penalties.exclusion_zone;
            b.exclusion_violations += 1;
        }

        for home in &scenario.residential_points {
            let d = distance(&facility, home);
            if d < scenario.min_residential_distance {
                b.residential_penalty +=
                    penalties.residential_scale * (scenario.min_residential_distance - d);
                b.residential_violations += 1;
            }
            residential_sum += decay(d, scenario.min_residential_distance);
        }

        for j in (i + 1)..n {
            let d = distance(&facility, &candidate.facility(j));
            if d < scenario.min_facility_separation {
                b.separation_penalty +=
                    penalties.separation_scale * (scenario.min_facility_separation - d);
                b.separation_violations += 1;
            }
            separation_sum += decay(d, scenario.min_facility_separation);
        }

        let r = distance(&facility, &center) / max_center;
        centrality_sum += r * r;
    }

    b.residential_cost = weights.residential * residential_sum;
    b.separation_cost = weights.separation * separation_sum;
    b.centrality_cost = weights.centrality * centrality_sum;
    b
}

/// `exp(-(d - threshold) / SOFT_DECAY_SCALE)`: bounded for large `d`,
/// strictly decreasing, equal to 1 at the threshold.
#[inline]
fn decay(d: f64, threshold: f64) -> f64 {
    (-(d - threshold) / SOFT_DECAY_SCALE).exp()
}
