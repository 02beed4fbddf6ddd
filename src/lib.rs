//! Warehouse placement by Particle Swarm Optimization.
//!
//! Places a fixed number of facilities inside a square region so that they
//! stay out of exclusion zones, keep a minimum distance from residential
//! centers and from each other, and otherwise sit close to the center and
//! well spread out.
//!
//! - **Geometry**: points, rectangles, distance and closed containment.
//! - **Fitness**: a two-tier cost. Hard constraint violations add penalties
//!   large enough that any feasible placement beats any infeasible one;
//!   bounded soft costs rank feasible placements.
//! - **PSO**: a swarm with linearly decaying inertia, absorbing boundaries,
//!   a lock-guarded global best and optional rayon-parallel updates.
//!
//! # Example
//!
//! ```
//! use warehouse_pso::{optimize, PsoConfig, Point, Rect, Scenario};
//!
//! let scenario = Scenario::new(1000.0)
//!     .with_exclusion_zones(vec![Rect::new(400.0, 400.0, 600.0, 600.0)])
//!     .with_residential_points(vec![Point::new(200.0, 800.0)]);
//! let config = PsoConfig::default()
//!     .with_particle_count(20)
//!     .with_iterations(40)
//!     .with_seed(42);
//!
//! let result = optimize(&scenario, &config).unwrap();
//! if result.is_feasible() {
//!     for (i, p) in result.facilities().iter().enumerate() {
//!         println!("warehouse {}: ({:.2}, {:.2})", i + 1, p.x, p.y);
//!     }
//! }
//! ```
//!
//! Scenario generation, plotting and command-line handling belong to the
//! caller; this crate only consumes and produces the types above.

pub mod candidate;
pub mod error;
pub mod fitness;
pub mod geometry;
pub mod pso;
pub mod random;

pub use candidate::Candidate;
pub use error::{Error, Result};
pub use fitness::{evaluate_breakdown, evaluate_fitness, FitnessBreakdown, Scenario, Weights};
pub use geometry::{Point, Rect};
pub use pso::{optimize, PsoConfig, PsoResult, PsoRunner};
