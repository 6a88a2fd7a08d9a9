//! A single rocket: genome, kinematics and score

use glam::DVec2;
use rand::Rng;

use super::fitness::{ClosestApproach, FitnessModel};
use super::genome::{Channel, Genome};
use super::state::Bounds;
use super::vector::{Polar, compose_vectors, distance};
use crate::consts::UNSEEN_DISTANCE;

/// Opaque handle the presentation layer uses to track a rocket's visual
pub type RocketId = u32;

#[derive(Debug, Clone)]
pub struct Rocket {
    pub id: RocketId,
    pub pos: DVec2,
    pub vel: Polar,
    pub genome: Genome,
    /// Frames lived so far; also the genome index read by the engines
    pub frame: usize,
    pub fitness: f64,
    /// Share of total population fitness (refreshed before breeding)
    pub probability: f64,
    /// Distance to the target measured this frame
    pub distance: f64,
    pub closest: ClosestApproach,
    pub lifespan: usize,
    pub alive: bool,
}

impl Rocket {
    /// A rocket at rest on the spawn point, living as long as its genome
    pub fn new(id: RocketId, spawn: DVec2, genome: Genome) -> Self {
        Self {
            id,
            pos: spawn,
            vel: Polar::ZERO,
            lifespan: genome.len(),
            genome,
            frame: 0,
            fitness: 0.0,
            probability: 0.0,
            distance: UNSEEN_DISTANCE,
            closest: ClosestApproach {
                distance: UNSEEN_DISTANCE,
                frame: 0,
            },
            alive: true,
        }
    }

    pub fn random<R: Rng>(id: RocketId, spawn: DVec2, lifespan: usize, rng: &mut R) -> Self {
        Self::new(id, spawn, Genome::random(rng, lifespan))
    }

    /// Fold gravity and this frame's engine thrust into the velocity.
    /// Must run before [`Rocket::advance`].
    pub fn apply_forces(&mut self, gravity: Polar) {
        let [bottom, left, right] = Channel::ALL
            .map(|c| Polar::new(self.genome.thrust(c, self.frame), c.thrust_direction()));
        self.vel = compose_vectors(&[self.vel, gravity, bottom, left, right]);
    }

    /// Move by the current velocity and step to the next frame
    pub fn advance(&mut self) {
        self.pos += self.vel.to_cartesian();
        self.frame += 1;
    }

    /// Measure the distance to the target and update the closest approach
    pub fn observe_target(&mut self, target: DVec2) -> f64 {
        self.distance = distance(target, self.pos);
        self.record_closest_approach(self.distance);
        self.distance
    }

    pub fn record_closest_approach(&mut self, distance: f64) {
        if distance < self.closest.distance {
            self.closest = ClosestApproach {
                distance,
                frame: self.frame,
            };
        }
    }

    pub fn evaluate_fitness(&mut self, model: &dyn FitnessModel) -> f64 {
        self.fitness = model.evaluate(self.distance, self.closest, self.frame);
        self.fitness
    }

    /// Outside the arena, or at the last frame of its life
    pub fn is_dead(&self, bounds: &Bounds) -> bool {
        !bounds.contains(self.pos) || self.frame + 1 >= self.lifespan
    }
}
