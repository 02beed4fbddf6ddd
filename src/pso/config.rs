//! PSO configuration.
//!
//! [`PsoConfig`] holds every tunable scalar consumed by the swarm loop.
//! It is built once, validated, and only read afterwards.

use crate::error::{Error, Result};

/// Configuration for the Particle Swarm Optimizer.
///
/// # Defaults
///
/// ```
/// use warehouse_pso::pso::PsoConfig;
///
/// let config = PsoConfig::default();
/// assert_eq!(config.facility_count, 4);
/// assert_eq!(config.particle_count, 50);
/// assert_eq!(config.iterations, 200);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use warehouse_pso::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_facility_count(3)
///     .with_particle_count(80)
///     .with_iterations(500)
///     .with_inertia(0.9, 0.4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of facilities to place. Each particle has `2 * facility_count`
    /// coordinates.
    pub facility_count: usize,

    /// Number of particles in the swarm.
    pub particle_count: usize,

    /// Fixed number of iterations. There is no early stop.
    pub iterations: usize,

    /// Cognitive coefficient `c1`: pull toward the particle's own best.
    pub cognitive: f64,

    /// Social coefficient `c2`: pull toward the swarm's best.
    pub social: f64,

    /// Inertia weight at the first iteration (exploration).
    pub inertia_max: f64,

    /// Inertia weight approached at the last iteration (exploitation).
    pub inertia_min: f64,

    /// Initial velocities are drawn from
    /// `[-bounds * fraction, bounds * fraction]` per coordinate.
    pub initial_velocity_fraction: f64,

    /// Whether to update particles in parallel using rayon.
    /// Requires the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a random seed.
    pub seed: Option<u64>,

    /// Log progress every this many iterations. 0 disables progress logs.
    pub progress_interval: usize,

    /// Whether to keep a [`SwarmSnapshot`](super::SwarmSnapshot) per
    /// iteration in the result.
    pub record_trajectory: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            facility_count: 4,
            particle_count: 50,
            iterations: 200,
            cognitive: 1.5,
            social: 1.5,
            inertia_max: 0.9,
            inertia_min: 0.4,
            initial_velocity_fraction: 0.1,
            parallel: false,
            seed: None,
            progress_interval: 20,
            record_trajectory: false,
        }
    }
}

impl PsoConfig {
    /// Sets the number of facilities.
    pub fn with_facility_count(mut self, n: usize) -> Self {
        self.facility_count = n;
        self
    }

    /// Sets the swarm size.
    pub fn with_particle_count(mut self, n: usize) -> Self {
        self.particle_count = n;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the cognitive (`c1`) and social (`c2`) coefficients.
    pub fn with_coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Sets the inertia schedule end points.
    pub fn with_inertia(mut self, max: f64, min: f64) -> Self {
        self.inertia_max = max;
        self.inertia_min = min;
        self
    }

    pub fn with_initial_velocity_fraction(mut self, fraction: f64) -> Self {
        self.initial_velocity_fraction = fraction;
        self
    }

    /// Enables or disables parallel particle updates.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the progress logging interval (0 to disable).
    pub fn with_progress_interval(mut self, n: usize) -> Self {
        self.progress_interval = n;
        self
    }

    /// Enables or disables per-iteration swarm snapshots.
    pub fn with_record_trajectory(mut self, record: bool) -> Self {
        self.record_trajectory = record;
        self
    }

    /// Inertia weight for the 0-based `iteration`.
    ///
    /// Linear decay: `w = w_max - (iteration / iterations) * (w_max - w_min)`.
    pub fn inertia_at(&self, iteration: usize) -> f64 {
        let progress = iteration as f64 / self.iterations as f64;
        self.inertia_max - progress * (self.inertia_max - self.inertia_min)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.facility_count == 0 {
            return Err(invalid("facility_count must be at least 1"));
        }
        if self.particle_count == 0 {
            return Err(invalid("particle_count must be at least 1"));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations must be at least 1"));
        }
        if !(self.cognitive.is_finite() && self.cognitive >= 0.0) {
            return Err(invalid(format!(
                "cognitive coefficient must be non-negative, got {}",
                self.cognitive
            )));
        }
        if !(self.social.is_finite() && self.social >= 0.0) {
            return Err(invalid(format!(
                "social coefficient must be non-negative, got {}",
                self.social
            )));
        }
        if !(self.inertia_max.is_finite() && self.inertia_min.is_finite()) {
            return Err(invalid("inertia weights must be finite"));
        }
        if self.inertia_min > self.inertia_max {
            return Err(invalid(format!(
                "inertia_min ({}) must not exceed inertia_max ({})",
                self.inertia_min, self.inertia_max
            )));
        }
        if !(self.initial_velocity_fraction.is_finite() && self.initial_velocity_fraction >= 0.0) {
            return Err(invalid(format!(
                "initial_velocity_fraction must be non-negative, got {}",
                self.initial_velocity_fraction
            )));
        }
        #[cfg(not(feature = "parallel"))]
        if self.parallel {
            return Err(invalid("parallel updates require the `parallel` feature"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidConfig(msg.into())
}
