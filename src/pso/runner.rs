//! PSO main loop.
//!
//! [`PsoRunner`] validates its inputs, initializes a [`SwarmState`], runs a
//! fixed number of iterations with a linearly decaying inertia weight, and
//! returns the best placement together with its fitness history.

use super::config::PsoConfig;
use super::swarm::{SwarmSnapshot, SwarmState};
use super::types::StepCoefficients;
use crate::candidate::Candidate;
use crate::error::Result;
use crate::fitness::{evaluate_breakdown, FitnessBreakdown, Scenario};
use crate::geometry::Point;
use crate::random::create_rng;
use rand::Rng;
use tracing::{debug, info, warn};

/// Result of a PSO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// Best placement found.
    pub best_position: Candidate,

    /// Fitness of `best_position`.
    pub best_fitness: f64,

    /// Global best fitness after each iteration. Length equals the
    /// configured iteration count; never increases.
    pub fitness_history: Vec<f64>,

    /// Global best fitness of the initial swarm, before any update.
    pub initial_best_fitness: f64,

    /// Number of iterations executed.
    pub iterations: usize,

    /// How many times the global best was replaced during the loop.
    pub improvements: usize,

    /// Every fitness component of `best_position`.
    pub breakdown: FitnessBreakdown,

    /// Swarm snapshots (initial swarm plus one per iteration), only when
    /// [`PsoConfig::record_trajectory`] is set.
    pub trajectory: Vec<SwarmSnapshot>,
}

impl PsoResult {
    /// `true` if the best placement violates no hard constraint.
    ///
    /// The loop never reports "no solution"; when the scenario cannot be
    /// satisfied this is how the caller finds out.
    pub fn is_feasible(&self) -> bool {
        self.breakdown.is_feasible()
    }

    /// Hard-penalty component of `best_fitness`.
    pub fn hard_penalty(&self) -> f64 {
        self.breakdown.hard_penalty()
    }

    /// Best facility locations, in order.
    pub fn facilities(&self) -> Vec<Point> {
        self.best_position.to_points()
    }
}

/// Per-iteration progress passed to an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationInfo {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Inertia weight used for this iteration.
    pub inertia: f64,
    /// Global best fitness after this iteration.
    pub best_fitness: f64,
    /// Global-best improvements during this iteration.
    pub improvements: usize,
}

/// Executes the PSO loop.
///
/// # Usage
///
/// ```
/// use warehouse_pso::fitness::Scenario;
/// use warehouse_pso::geometry::Rect;
/// use warehouse_pso::pso::{PsoConfig, PsoRunner};
///
/// let scenario = Scenario::new(1000.0)
///     .with_exclusion_zones(vec![Rect::new(400.0, 400.0, 600.0, 600.0)]);
/// let config = PsoConfig::default()
///     .with_particle_count(20)
///     .with_iterations(30)
///     .with_seed(42);
///
/// let result = PsoRunner::run(&scenario, &config).unwrap();
/// assert_eq!(result.fitness_history.len(), 30);
/// assert_eq!(result.best_position.facility_count(), 4);
/// ```
pub struct PsoRunner;

impl PsoRunner {
    /// Runs the optimization with an RNG seeded from
    /// [`PsoConfig::seed`] (random when `None`).
    pub fn run(scenario: &Scenario, config: &PsoConfig) -> Result<PsoResult> {
        Self::run_with_observer(scenario, config, |_| {})
    }

    /// Runs the optimization, calling `observer` after every iteration.
    pub fn run_with_observer<F>(
        scenario: &Scenario,
        config: &PsoConfig,
        observer: F,
    ) -> Result<PsoResult>
    where
        F: FnMut(&IterationInfo),
    {
        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));
        Self::run_inner(scenario, config, &mut rng, observer)
    }

    /// Runs the optimization drawing every random number from `rng`.
    ///
    /// [`PsoConfig::seed`] is ignored. Two runs with identically seeded
    /// generators return identical results.
    pub fn run_with_rng<R: Rng>(
        scenario: &Scenario,
        config: &PsoConfig,
        rng: &mut R,
    ) -> Result<PsoResult> {
        Self::run_inner(scenario, config, rng, |_| {})
    }

    fn run_inner<R, F>(
        scenario: &Scenario,
        config: &PsoConfig,
        rng: &mut R,
        mut observer: F,
    ) -> Result<PsoResult>
    where
        R: Rng,
        F: FnMut(&IterationInfo),
    {
        scenario.validate()?;
        config.validate()?;

        // 1. Initialize swarm
        let mut swarm = SwarmState::initialize(scenario, config, rng);
        let initial_best_fitness = swarm.best_fitness();
        debug!(
            particles = config.particle_count,
            facilities = config.facility_count,
            iterations = config.iterations,
            parallel = config.parallel,
            initial_best_fitness,
            "swarm initialized"
        );

        let mut trajectory = Vec::new();
        if config.record_trajectory {
            trajectory.reserve(config.iterations + 1);
            trajectory.push(swarm.snapshot(0));
        }

        let mut total_improvements = 0usize;

        // 2. Fixed iteration budget
        for k in 0..config.iterations {
            let coeffs = StepCoefficients {
                inertia: config.inertia_at(k),
                cognitive: config.cognitive,
                social: config.social,
            };

            #[cfg(feature = "parallel")]
            let improvements = if config.parallel {
                swarm.update_parallel(&coeffs, scenario, rng)
            } else {
                swarm.update_sequential(&coeffs, scenario, rng)
            };
            #[cfg(not(feature = "parallel"))]
            let improvements = swarm.update_sequential(&coeffs, scenario, rng);
            total_improvements += improvements;

            let best_fitness = swarm.record_iteration();

            if config.record_trajectory {
                trajectory.push(swarm.snapshot(k + 1));
            }

            observer(&IterationInfo {
                iteration: k + 1,
                inertia: coeffs.inertia,
                best_fitness,
                improvements,
            });

            if config.progress_interval > 0 && (k + 1) % config.progress_interval == 0 {
                let feasible =
                    evaluate_breakdown(&swarm.global_best().position(), scenario).is_feasible();
                info!(
                    iteration = k + 1,
                    total = config.iterations,
                    best_fitness,
                    feasible,
                    "pso progress"
                );
            }
        }

        // 3. Collect result
        let (best_position, best_fitness, fitness_history) = swarm.into_best();
        let breakdown = evaluate_breakdown(&best_position, scenario);

        if breakdown.is_feasible() {
            info!(best_fitness, improvements = total_improvements, "pso finished");
        } else {
            warn!(
                best_fitness,
                hard_penalty = breakdown.hard_penalty(),
                exclusion_violations = breakdown.exclusion_violations,
                residential_violations = breakdown.residential_violations,
                separation_violations = breakdown.separation_violations,
                "pso finished without a feasible placement"
            );
        }

        Ok(PsoResult {
            best_position,
            best_fitness,
            fitness_history,
            initial_best_fitness,
            iterations: config.iterations,
            improvements: total_improvements,
            breakdown,
            trajectory,
        })
    }
}

/// Runs PSO on `scenario` with `config`.
///
/// Shorthand for [`PsoRunner::run`].
pub fn optimize(scenario: &Scenario, config: &PsoConfig) -> Result<PsoResult> {
    PsoRunner::run(scenario, config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::fitness::{evaluate_fitness, Weights};
    use crate::geometry::Rect;

    fn city() -> Scenario {
        Scenario::new(1000.0)
            .with_exclusion_zones(vec![
                Rect::new(120.0, 640.0, 138.0, 655.0),
                Rect::new(700.0, 210.0, 712.0, 229.0),
                Rect::new(480.0, 480.0, 495.0, 492.0),
                Rect::new(300.0, 310.0, 318.0, 316.0),
                Rect::new(830.0, 790.0, 840.0, 808.0),
            ])
            .with_residential_points(vec![
                Point::new(512.0, 430.0),
                Point::new(233.0, 702.0),
                Point::new(640.0, 611.0),
                Point::new(801.0, 150.0),
                Point::new(95.0, 90.0),
                Point::new(377.0, 540.0),
                Point::new(905.0, 880.0),
                Point::new(450.0, 260.0),
                Point::new(610.0, 780.0),
                Point::new(160.0, 400.0),
            ])
            .with_min_residential_distance(50.0)
            .with_min_facility_separation(100.0)
            .with_weights(Weights::new(0.6, 0.5, 0.9))
    }

    fn small_config() -> PsoConfig {
        PsoConfig::default()
            .with_particle_count(30)
            .with_iterations(60)
            .with_progress_interval(0)
            .with_seed(42)
    }

    #[test]
    fn test_finds_feasible_placement() {
        let result = PsoRunner::run(&city(), &small_config().with_iterations(150)).unwrap();

        assert!(
            result.is_feasible(),
            "expected a feasible placement, got breakdown {:?}",
            result.breakdown
        );
        assert_eq!(result.hard_penalty(), 0.0);
        assert!(result.best_fitness < 1e6);
        assert_eq!(result.facilities().len(), 4);
    }

    #[test]
    fn test_history_length_and_monotone() {
        let result = PsoRunner::run(&city(), &small_config()).unwrap();

        assert_eq!(result.fitness_history.len(), 60);
        assert_eq!(result.iterations, 60);
        assert!(result.fitness_history[0] <= result.initial_best_fitness);
        for w in result.fitness_history.windows(2) {
            assert!(
                w[1] <= w[0],
                "fitness history should be non-increasing: {} > {}",
                w[1],
                w[0]
            );
        }
        assert_eq!(*result.fitness_history.last().unwrap(), result.best_fitness);
    }

    #[test]
    fn test_best_fitness_matches_position() {
        let scenario = city();
        let result = PsoRunner::run(&scenario, &small_config()).unwrap();
        assert_eq!(
            evaluate_fitness(&result.best_position, &scenario),
            result.best_fitness
        );
        assert_eq!(result.breakdown.total(), result.best_fitness);
        assert!(result.best_position.is_within(0.0, scenario.bounds));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let scenario = city();
        let config = small_config().with_seed(7);
        let a = PsoRunner::run(&scenario, &config).unwrap();
        let b = PsoRunner::run(&scenario, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reproducible_with_injected_rng() {
        let scenario = city();
        let config = small_config();
        let a = PsoRunner::run_with_rng(&scenario, &config, &mut create_rng(99)).unwrap();
        let b = PsoRunner::run_with_rng(&scenario, &config, &mut create_rng(99)).unwrap();
        assert_eq!(a.best_position, b.best_position);
        assert_eq!(a.best_fitness.to_bits(), b.best_fitness.to_bits());
        assert_eq!(a.fitness_history, b.fitness_history);
    }

    #[test]
    fn test_different_seeds_differ() {
        let scenario = city();
        let a = PsoRunner::run(&scenario, &small_config().with_seed(1)).unwrap();
        let b = PsoRunner::run(&scenario, &small_config().with_seed(2)).unwrap();
        assert_ne!(a.best_position, b.best_position);
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_run() {
        let scenario = city();
        let config = small_config().with_parallel(true).with_iterations(150);
        let result = PsoRunner::run(&scenario, &config).unwrap();

        assert_eq!(result.fitness_history.len(), 150);
        for w in result.fitness_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert!(result.is_feasible(), "parallel run should find a feasible placement");
    }

    #[test]
    #[cfg(feature = "parallel")]
    fn test_parallel_reproducible_with_seed() {
        let scenario = city();
        for seed in [3, 17] {
            let config = small_config().with_parallel(true).with_seed(seed);
            let a = PsoRunner::run(&scenario, &config).unwrap();
            let b = PsoRunner::run(&scenario, &config).unwrap();
            assert_eq!(a, b, "parallel runs with seed {seed} diverged");
        }
    }

    #[test]
    #[cfg(not(feature = "parallel"))]
    fn test_parallel_requires_feature() {
        let err = PsoRunner::run(&city(), &small_config().with_parallel(true)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_trajectory_recording() {
        let scenario = city();
        let config = small_config().with_iterations(10).with_record_trajectory(true);
        let result = PsoRunner::run(&scenario, &config).unwrap();

        assert_eq!(result.trajectory.len(), 11);
        for (k, snap) in result.trajectory.iter().enumerate() {
            assert_eq!(snap.iteration, k);
            assert_eq!(snap.positions.len(), 30);
            for pos in &snap.positions {
                assert!(pos.is_within(0.0, scenario.bounds));
            }
        }
        assert_eq!(result.trajectory[0].global_best_fitness, result.initial_best_fitness);

        // the best bounds every particle's final position
        let last = result.trajectory.last().unwrap();
        assert_eq!(last.global_best, result.best_position);
        for pos in &last.positions {
            assert!(result.best_fitness <= evaluate_fitness(pos, &scenario));
        }
    }

    #[test]
    fn test_no_trajectory_by_default() {
        let result = PsoRunner::run(&city(), &small_config()).unwrap();
        assert!(result.trajectory.is_empty());
    }

    #[test]
    fn test_observer_sees_every_iteration() {
        let config = small_config().with_iterations(25);
        let mut seen = Vec::new();
        let result =
            PsoRunner::run_with_observer(&city(), &config, |info| seen.push(*info)).unwrap();

        assert_eq!(seen.len(), 25);
        for (k, info) in seen.iter().enumerate() {
            assert_eq!(info.iteration, k + 1);
            assert!((info.inertia - config.inertia_at(k)).abs() < 1e-15);
            assert_eq!(info.best_fitness, result.fitness_history[k]);
        }
        assert_eq!(
            seen.iter().map(|i| i.improvements).sum::<usize>(),
            result.improvements
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = PsoRunner::run(&city(), &small_config().with_iterations(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = optimize(&city(), &small_config().with_facility_count(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let scenario = city().with_weights(Weights::new(-1.0, 0.5, 0.9));
        let err = PsoRunner::run(&scenario, &small_config()).unwrap_err();
        assert!(matches!(err, Error::InvalidScenario(_)));

        let err = PsoRunner::run(&Scenario::new(0.0), &small_config()).unwrap_err();
        assert!(matches!(err, Error::InvalidScenario(_)));
    }

    #[test]
    fn test_infeasible_scenario_completes() {
        // five facilities 600 apart cannot fit in a 500 x 500 square
        let scenario = Scenario::new(500.0).with_min_facility_separation(600.0);
        let config = small_config().with_facility_count(5).with_iterations(40);
        let result = PsoRunner::run(&scenario, &config).unwrap();

        assert!(!result.is_feasible());
        assert!(result.hard_penalty() > 0.0);
        assert_eq!(result.fitness_history.len(), 40);
        assert!(result.best_fitness.is_finite());
    }

    #[test]
    fn test_single_particle_single_iteration() {
        let config = PsoConfig::default()
            .with_facility_count(1)
            .with_particle_count(1)
            .with_iterations(1)
            .with_seed(3);
        let result = optimize(&Scenario::new(100.0), &config).unwrap();
        assert_eq!(result.fitness_history.len(), 1);
        assert_eq!(result.best_position.facility_count(), 1);
        assert!(result.best_fitness <= result.initial_best_fitness);
    }

    #[test]
    fn test_centrality_only_converges_near_center() {
        let scenario = Scenario::new(1000.0).with_weights(Weights::new(0.0, 0.0, 1.0));
        let config = small_config().with_facility_count(1).with_iterations(100);
        let result = optimize(&scenario, &config).unwrap();
        let p = result.best_position.facility(0);
        assert!(
            p.distance_to(&scenario.center()) < 50.0,
            "expected near-center placement, got {p:?}"
        );
    }
}
