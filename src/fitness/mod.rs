//! Placement fitness.
//!
//! Maps a [`Candidate`](crate::Candidate) and a [`Scenario`] to a scalar
//! cost. Lower is better.
//!
//! # Two tiers
//!
//! - **Hard penalty**: a flat [`Penalties::exclusion_zone`] per facility
//!   inside an exclusion rectangle, plus linear penalties proportional to
//!   the depth of every residential-distance and facility-separation
//!   violation. Penalty magnitudes dwarf any achievable soft cost, so any
//!   feasible placement outranks any infeasible one.
//! - **Soft cost**: bounded exponential-decay terms for residential
//!   proximity and facility crowding, plus a quadratic centrality term.
//!   Always evaluated, including for infeasible placements, so the
//!   landscape stays graded inside the infeasible region.
//!
//! Use [`evaluate_fitness`] for the scalar and [`evaluate_breakdown`] to see
//! each component, e.g. to decide whether a returned best is feasible.

mod evaluator;
mod scenario;

pub use evaluator::{evaluate_breakdown, evaluate_fitness, FitnessBreakdown};
pub use scenario::{
    Penalties, Scenario, Weights, DEFAULT_EXCLUSION_PENALTY, DEFAULT_PENALTY_SCALE,
    SOFT_DECAY_SCALE,
};
