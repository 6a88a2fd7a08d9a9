//! The live rocket population and its breeding rules
//!
//! Selection is fitness-proportional over the current member order. Offspring
//! interleave two parents' genomes and, with probability `mutation_rate`,
//! receive a burst of point mutations.

use glam::DVec2;
use rand::Rng;
use serde::Serialize;

use super::genome::Genome;
use super::rocket::{Rocket, RocketId};
use crate::consts::{MUTATION_BURST, ROUND_PLACES};
use crate::error::SimError;
use crate::round_to;

/// Smallest non-zero selection draw at 5 decimal places
const MIN_DRAW: f64 = 0.00001;

/// Summary of the live population
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationStats {
    pub live: usize,
    pub best_fitness: Option<f64>,
    pub mean_fitness: Option<f64>,
    /// Closest any live rocket has come to the target
    pub closest_distance: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Population {
    /// Live rockets in spawn order
    pub members: Vec<Rocket>,
    /// Size the population refills toward, one birth per tick
    pub target_size: usize,
    pub mutation_rate: f64,
    lifespan: usize,
    spawn: DVec2,
    next_id: RocketId,
}

impl Population {
    /// `size` fresh rockets with random genomes
    pub fn new<R: Rng>(
        size: usize,
        lifespan: usize,
        spawn: DVec2,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Self {
        let mut population = Self::with_members(Vec::new(), lifespan, spawn, mutation_rate);
        population.target_size = size;
        for _ in 0..size {
            population.spawn_random(rng);
        }
        population
    }

    /// Population seeded with existing rockets; target size is their count
    pub fn with_members(
        members: Vec<Rocket>,
        lifespan: usize,
        spawn: DVec2,
        mutation_rate: f64,
    ) -> Self {
        let next_id = members
            .iter()
            .map(|r| r.id.wrapping_add(1))
            .max()
            .unwrap_or(1);
        Self {
            target_size: members.len(),
            members,
            mutation_rate,
            lifespan,
            spawn,
            next_id,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Allocate a new rocket ID (wraps after `u32::MAX`)
    pub fn next_rocket_id(&mut self) -> RocketId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Add a rocket with a fresh random genome
    pub fn spawn_random<R: Rng>(&mut self, rng: &mut R) -> RocketId {
        let id = self.next_rocket_id();
        self.members.push(Rocket::random(id, self.spawn, self.lifespan, rng));
        id
    }

    /// Set every member's probability to its share of total fitness
    pub fn compute_selection_probabilities(&mut self) -> Result<(), SimError> {
        let total: f64 = self.members.iter().map(|r| r.fitness).sum();
        if total == 0.0 {
            return Err(SimError::ZeroTotalFitness);
        }
        for rocket in &mut self.members {
            rocket.probability = rocket.fitness / total;
        }
        Ok(())
    }

    /// Walk the members subtracting rounded probabilities from `draw` until
    /// it reaches zero. Falls back to the last member when rounding leaves
    /// part of the draw unspent.
    pub fn select_index(&self, draw: f64) -> Option<usize> {
        let mut remaining = round_to(draw, ROUND_PLACES);
        if remaining <= 0.0 {
            remaining = MIN_DRAW;
        }
        for (i, rocket) in self.members.iter().enumerate() {
            remaining -= round_to(rocket.probability, ROUND_PLACES);
            if remaining <= 0.0 {
                return Some(i);
            }
        }
        self.members.len().checked_sub(1)
    }

    /// Weighted random pick over freshly computed probabilities
    pub fn select_one<R: Rng>(&mut self, rng: &mut R) -> Result<&Rocket, SimError> {
        self.compute_selection_probabilities()?;
        let index = self.draw_index(rng)?;
        Ok(&self.members[index])
    }

    fn draw_index<R: Rng>(&self, rng: &mut R) -> Result<usize, SimError> {
        self.select_index(rng.random::<f64>()).ok_or(SimError::EmptyPopulation)
    }

    /// Produce one offspring from two fitness-weighted parents. The parents
    /// may be the same rocket.
    pub fn breed<R: Rng>(&mut self, rng: &mut R) -> Result<Rocket, SimError> {
        self.compute_selection_probabilities()?;
        let first = self.draw_index(rng)?;
        let second = self.draw_index(rng)?;

        let mut genome = Genome::random(rng, self.lifespan);
        genome.inherit(&self.members[first].genome, &self.members[second].genome);

        // All-or-nothing: one trial gates the whole burst
        if rng.random::<f64>() < self.mutation_rate {
            genome.mutate(rng, MUTATION_BURST);
        }

        let id = self.next_rocket_id();
        log::debug!(
            "rocket {} bred from {} x {}",
            id,
            self.members[first].id,
            self.members[second].id
        );
        Ok(Rocket::new(id, self.spawn, genome))
    }

    /// Drop every member flagged dead, returning their IDs in member order
    pub fn remove_dead(&mut self) -> Vec<RocketId> {
        let removed: Vec<RocketId> = self
            .members
            .iter()
            .filter(|r| !r.alive)
            .map(|r| r.id)
            .collect();
        if !removed.is_empty() {
            self.members.retain(|r| r.alive);
        }
        removed
    }

    /// Highest-fitness member; the earliest one wins ties
    pub fn fittest(&self) -> Result<&Rocket, SimError> {
        let mut members = self.members.iter();
        let mut best = members.next().ok_or(SimError::EmptyPopulation)?;
        for rocket in members {
            if rocket.fitness > best.fitness {
                best = rocket;
            }
        }
        Ok(best)
    }

    /// Breed and add a single rocket if below target size
    pub fn maybe_spawn<R: Rng>(&mut self, rng: &mut R) -> Result<Option<RocketId>, SimError> {
        if self.members.len() >= self.target_size {
            return Ok(None);
        }
        let child = self.breed(rng)?;
        let id = child.id;
        self.members.push(child);
        Ok(Some(id))
    }

    /// Replace every member with `size` fresh rockets, returning the
    /// discarded IDs
    pub fn reset<R: Rng>(&mut self, size: usize, rng: &mut R) -> Vec<RocketId> {
        let discarded: Vec<RocketId> = self.members.drain(..).map(|r| r.id).collect();
        self.target_size = size;
        for _ in 0..size {
            self.spawn_random(rng);
        }
        discarded
    }

    pub fn stats(&self) -> PopulationStats {
        let live = self.members.len();
        let best_fitness = self.fittest().ok().map(|r| r.fitness);
        let mean_fitness = (live > 0)
            .then(|| self.members.iter().map(|r| r.fitness).sum::<f64>() / live as f64);
        let closest_distance = self
            .members
            .iter()
            .map(|r| r.closest.distance)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        PopulationStats {
            live,
            best_fitness,
            mean_fitness,
            closest_distance,
        }
    }
}
