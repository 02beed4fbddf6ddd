//! Swarm population and the shared global best.

use super::config::PsoConfig;
use super::types::{Particle, StepCoefficients};
use crate::candidate::Candidate;
use crate::fitness::Scenario;
#[cfg(feature = "parallel")]
use crate::random::create_rng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The best placement found by any particle so far.
///
/// A single lock-guarded `(fitness, position)` value. [`offer`](Self::offer)
/// performs read-compare-write under the lock, so concurrent discoveries in
/// one iteration never lose an update.
#[derive(Debug)]
pub struct GlobalBest {
    inner: Mutex<BestEntry>,
}

#[derive(Debug, Clone)]
struct BestEntry {
    position: Candidate,
    fitness: f64,
}

impl GlobalBest {
    pub fn new(position: Candidate, fitness: f64) -> Self {
        Self {
            inner: Mutex::new(BestEntry { position, fitness }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BestEntry> {
        // No code runs under this lock that could panic mid-update.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn fitness(&self) -> f64 {
        self.lock().fitness
    }

    /// Copy of the current best position.
    pub fn position(&self) -> Candidate {
        self.lock().position.clone()
    }

    /// Replaces the best if `fitness` is strictly lower. Returns whether it
    /// was replaced.
    pub fn offer(&self, position: &Candidate, fitness: f64) -> bool {
        let mut best = self.lock();
        if fitness < best.fitness {
            best.fitness = fitness;
            best.position.clone_from(position);
            true
        } else {
            false
        }
    }

    pub fn into_inner(self) -> (Candidate, f64) {
        let entry = self
            .inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (entry.position, entry.fitness)
    }
}

/// A copy of the swarm at one point of the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmSnapshot {
    /// Iterations completed when the snapshot was taken (0 = initial swarm).
    pub iteration: usize,
    /// Current position of every particle.
    pub positions: Vec<Candidate>,
    /// Personal best of every particle.
    pub personal_bests: Vec<Candidate>,
    /// Swarm-wide best position.
    pub global_best: Candidate,
    /// Fitness of `global_best`.
    pub global_best_fitness: f64,
}

/// The mutable population for one optimization run.
///
/// Created at the start of a run and consumed at the end.
#[derive(Debug)]
pub struct SwarmState {
    particles: Vec<Particle>,
    global_best: GlobalBest,
    fitness_history: Vec<f64>,
}

impl SwarmState {
    /// Places `config.particle_count` particles uniformly at random and sets
    /// the global best to the best initial particle (lowest index on ties).
    ///
    /// # Panics
    ///
    /// Panics if `config.particle_count` is zero. Validate first.
    pub fn initialize<R: Rng>(scenario: &Scenario, config: &PsoConfig, rng: &mut R) -> Self {
        let max_speed = scenario.bounds * config.initial_velocity_fraction;
        let particles: Vec<Particle> = (0..config.particle_count)
            .map(|_| Particle::random(config.facility_count, max_speed, scenario, rng))
            .collect();
        Self::from_particles(particles, config.iterations)
    }

    /// Builds a swarm from already-evaluated particles.
    ///
    /// # Panics
    ///
    /// Panics if `particles` is empty.
    pub fn from_particles(particles: Vec<Particle>, iterations: usize) -> Self {
        let leader = particles
            .iter()
            .reduce(|best, p| if p.best_fitness < best.best_fitness { p } else { best })
            .expect("swarm must not be empty");
        let global_best = GlobalBest::new(leader.best_position.clone(), leader.best_fitness);

        Self {
            particles,
            global_best,
            fitness_history: Vec::with_capacity(iterations),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_best(&self) -> &GlobalBest {
        &self.global_best
    }

    pub fn best_fitness(&self) -> f64 {
        self.global_best.fitness()
    }

    /// Global best fitness after each completed iteration.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Updates every particle in index order on the calling thread.
    ///
    /// Each particle is guided by the global best as it stands when its own
    /// update begins, so improvements found earlier in the same iteration
    /// are visible to later particles. Returns the number of global-best
    /// improvements.
    pub fn update_sequential<R: Rng>(
        &mut self,
        coeffs: &StepCoefficients,
        scenario: &Scenario,
        rng: &mut R,
    ) -> usize {
        let mut guide = self.global_best.position();
        let mut improvements = 0;

        for particle in &mut self.particles {
            if particle.step(coeffs, &guide, scenario, rng)
                && self
                    .global_best
                    .offer(&particle.best_position, particle.best_fitness)
            {
                guide.clone_from(&particle.best_position);
                improvements += 1;
            }
        }
        improvements
    }

    /// Updates every particle on the rayon pool.
    ///
    /// All particles are guided by the global best as of the start of the
    /// iteration. Each particle draws from its own stream, seeded from `rng`
    /// in index order, so the run is replayable for a fixed seed. Returns
    /// after every particle has finished, i.e. this is the iteration
    /// barrier.
    #[cfg(feature = "parallel")]
    pub fn update_parallel<R: Rng>(
        &mut self,
        coeffs: &StepCoefficients,
        scenario: &Scenario,
        rng: &mut R,
    ) -> usize {
        let guide = self.global_best.position();
        let seeds: Vec<u64> = (0..self.particles.len()).map(|_| rng.random()).collect();
        let global_best = &self.global_best;

        self.particles
            .par_iter_mut()
            .zip(seeds.par_iter())
            .map(|(particle, &seed)| {
                let mut local = create_rng(seed);
                let improved = particle.step(coeffs, &guide, scenario, &mut local)
                    && global_best.offer(&particle.best_position, particle.best_fitness);
                usize::from(improved)
            })
            .sum()
    }

    /// Appends the current global best fitness to the history and returns it.
    pub fn record_iteration(&mut self) -> f64 {
        let best = self.global_best.fitness();
        self.fitness_history.push(best);
        best
    }

    /// Copies the current swarm state.
    pub fn snapshot(&self, iteration: usize) -> SwarmSnapshot {
        SwarmSnapshot {
            iteration,
            positions: self.particles.iter().map(|p| p.position.clone()).collect(),
            personal_bests: self
                .particles
                .iter()
                .map(|p| p.best_position.clone())
                .collect(),
            global_best: self.global_best.position(),
            global_best_fitness: self.global_best.fitness(),
        }
    }

    /// Consumes the swarm, returning `(best position, best fitness, history)`.
    pub fn into_best(self) -> (Candidate, f64, Vec<f64>) {
        let (position, fitness) = self.global_best.into_inner();
        (position, fitness, self.fitness_history)
    }
}
