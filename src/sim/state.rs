//! Simulation state
//!
//! Everything a tick mutates lives here: the population, the seeded RNG and
//! the fitness model. The presentation layer owns none of it.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::fitness::{FitnessModel, ReferenceFitness};
use super::population::Population;
use super::rocket::RocketId;
use crate::consts::*;
use crate::settings::Settings;

/// Axis-aligned arena edges (screen space, `top` < `bottom`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, ARENA_WIDTH, 0.0, ARENA_HEIGHT)
    }
}

impl Bounds {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Inclusive containment; a point on an edge is still inside
    #[inline]
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }
}

/// Complete simulation state (deterministic for a given seed and input stream)
#[derive(Debug)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub population: Population,
    pub(crate) rng: Pcg32,
    pub(crate) fitness_model: Box<dyn FitnessModel>,
}

impl Simulation {
    /// `size` random rockets at `spawn`, scored by [`ReferenceFitness`]
    pub fn new(seed: u64, size: usize, lifespan: usize, spawn: DVec2, mutation_rate: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let population = Population::new(size, lifespan, spawn, mutation_rate, &mut rng);
        log::info!("simulation seeded with {} ({} rockets)", seed, size);
        Self {
            seed,
            time_ticks: 0,
            population,
            rng,
            fitness_model: Box::new(ReferenceFitness::default()),
        }
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        Self::new(
            seed,
            settings.population_size,
            settings.lifespan,
            settings.spawn,
            settings.mutation_rate,
        )
    }

    /// Wrap an already-built population (tests and custom scenarios)
    pub fn with_population(seed: u64, population: Population) -> Self {
        Self {
            seed,
            time_ticks: 0,
            population,
            rng: Pcg32::seed_from_u64(seed),
            fitness_model: Box::new(ReferenceFitness::default()),
        }
    }

    /// Score rockets with a different model
    pub fn with_fitness_model(mut self, model: impl FitnessModel + 'static) -> Self {
        self.fitness_model = Box::new(model);
        self
    }

    /// Throw the population away and start over with `size` fresh rockets.
    /// Returns the IDs whose visuals should be released.
    pub fn reset(&mut self, size: usize) -> Vec<RocketId> {
        let discarded = self.population.reset(size, &mut self.rng);
        log::info!(
            "population reset at tick {}: {} discarded, {} spawned",
            self.time_ticks,
            discarded.len(),
            size
        );
        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fitness::ClosestApproach;

    #[derive(Debug)]
    struct Constant;

    impl FitnessModel for Constant {
        fn evaluate(&self, _: f64, _: ClosestApproach, _: usize) -> f64 {
            1.0
        }
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::default();
        assert!(bounds.contains(DVec2::new(0.0, 0.0)));
        assert!(bounds.contains(DVec2::new(500.0, 600.0)));
        assert!(!bounds.contains(DVec2::new(500.001, 10.0)));
        assert!(!bounds.contains(DVec2::new(10.0, -0.001)));
    }

    #[test]
    fn test_new_simulation() {
        let sim = Simulation::new(42, 10, LIFESPAN, SPAWN_POS, 0.45);
        assert_eq!(sim.population.len(), 10);
        assert_eq!(sim.time_ticks, 0);
        assert!(sim.population.members.iter().all(|r| r.pos == SPAWN_POS));
    }

    #[test]
    fn test_same_seed_same_genomes() {
        let a = Simulation::new(7, 5, 50, SPAWN_POS, 0.45);
        let b = Simulation::new(7, 5, 50, SPAWN_POS, 0.45);
        for (ra, rb) in a.population.members.iter().zip(&b.population.members) {
            assert_eq!(ra.genome, rb.genome);
        }
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut sim = Simulation::new(1, 4, 50, SPAWN_POS, 0.45);
        let discarded = sim.reset(6);
        assert_eq!(discarded, vec![1, 2, 3, 4]);
        assert_eq!(sim.population.len(), 6);
        assert_eq!(sim.population.target_size, 6);
    }

    #[test]
    fn test_custom_fitness_model_drives_ticks() {
        let mut sim = Simulation::new(1, 3, 50, SPAWN_POS, 0.45).with_fitness_model(Constant);
        let input = crate::sim::TickInput {
            target_size: 3,
            ..Default::default()
        };
        let report = crate::sim::tick(&mut sim, &input).unwrap();
        assert!(sim.population.members.iter().all(|r| r.fitness == 1.0));
        // Equal scores: the first rocket wins
        assert_eq!(report.fittest, 1);
    }
}
