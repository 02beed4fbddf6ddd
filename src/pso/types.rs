//! Particle representation and the per-particle update step.

use crate::candidate::Candidate;
use crate::fitness::{evaluate_fitness, Scenario};
use rand::Rng;

/// Coefficients for one velocity update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepCoefficients {
    /// Inertia weight `w` for the current iteration.
    pub inertia: f64,
    /// Cognitive coefficient `c1`.
    pub cognitive: f64,
    /// Social coefficient `c2`.
    pub social: f64,
}

/// One member of the swarm.
///
/// Owns its position, velocity and personal best. Only the optimizer
/// mutates it, during that particle's update step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    /// Current placement.
    pub position: Candidate,
    /// Current velocity, same length as `position`.
    pub velocity: Candidate,
    /// Fitness of `position`.
    pub fitness: f64,
    /// Best placement this particle has visited.
    pub best_position: Candidate,
    /// Fitness of `best_position`.
    pub best_fitness: f64,
}

impl Particle {
    /// Creates a particle at `position` with `velocity`, evaluating the
    /// starting fitness. The personal best starts at the initial position.
    pub fn new(position: Candidate, velocity: Candidate, scenario: &Scenario) -> Self {
        let fitness = evaluate_fitness(&position, scenario);
        Self {
            best_position: position.clone(),
            best_fitness: fitness,
            position,
            velocity,
            fitness,
        }
    }

    /// Creates a particle with coordinates uniform in `[0, bounds]` and
    /// velocity components uniform in `[-max_speed, max_speed]`.
    pub fn random<R: Rng>(
        facility_count: usize,
        max_speed: f64,
        scenario: &Scenario,
        rng: &mut R,
    ) -> Self {
        let dim = facility_count * 2;
        let bounds = scenario.bounds;
        let position = Candidate::from_fn(dim, |_| rng.random_range(0.0..=bounds));
        let velocity = if max_speed > 0.0 {
            Candidate::from_fn(dim, |_| rng.random_range(-max_speed..=max_speed))
        } else {
            Candidate::zeros(facility_count)
        };
        Self::new(position, velocity, scenario)
    }

    /// Advances the particle by one PSO step toward `global_best`.
    ///
    /// ```text
    /// v = w·v + c1·r1·(pbest - x) + c2·r2·(gbest - x)
    /// x = clamp(x + v, 0, bounds)
    /// ```
    ///
    /// `r1` and `r2` are drawn fresh per coordinate. Only the position is
    /// clamped; the velocity keeps its value. Returns `true` if the new
    /// position strictly improved the personal best.
    pub fn step<R: Rng>(
        &mut self,
        coeffs: &StepCoefficients,
        global_best: &Candidate,
        scenario: &Scenario,
        rng: &mut R,
    ) -> bool {
        debug_assert_eq!(self.position.len(), global_best.len());

        #[allow(clippy::needless_range_loop)]
        for j in 0..self.position.len() {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let x = self.position[j];
            self.velocity[j] = coeffs.inertia * self.velocity[j]
                + coeffs.cognitive * r1 * (self.best_position[j] - x)
                + coeffs.social * r2 * (global_best[j] - x);
        }

        self.position += &self.velocity;
        self.position.clamp(0.0, scenario.bounds);

        self.fitness = evaluate_fitness(&self.position, scenario);
        if self.fitness < self.best_fitness {
            self.best_fitness = self.fitness;
            self.best_position.clone_from(&self.position);
            true
        } else {
            false
        }
    }
}
