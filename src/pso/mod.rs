//! Particle Swarm Optimization (PSO).
//!
//! A population of particles moves through the `2 × facility_count`
//! dimensional placement space. Each particle is pulled toward its own best
//! position and toward the swarm's best:
//!
//! ```text
//! v = w·v + c₁·r₁·(pbest - x) + c₂·r₂·(gbest - x)
//! x = clamp(x + v, 0, bounds)
//! ```
//!
//! The inertia weight `w` decays linearly from [`PsoConfig::inertia_max`]
//! to [`PsoConfig::inertia_min`] over a fixed iteration budget.
//!
//! # Key Types
//!
//! - [`PsoConfig`]: Algorithm parameters
//! - [`PsoRunner`]: Executes the loop; [`optimize`] is the shorthand
//! - [`PsoResult`]: Best placement, fitness history and feasibility
//! - [`SwarmState`]: The population and the lock-guarded [`GlobalBest`]
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"
//!   (linearly decreasing inertia weight)

mod config;
mod runner;
mod swarm;
mod types;

pub use config::PsoConfig;
pub use runner::{optimize, IterationInfo, PsoResult, PsoRunner};
pub use swarm::{GlobalBest, SwarmSnapshot, SwarmState};
pub use types::{Particle, StepCoefficients};
