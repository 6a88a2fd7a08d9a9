//! One simulation step
//!
//! Every live rocket is moved and scored first; deaths, the fittest pick and
//! the single birth are committed afterwards against that updated snapshot.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rocket::RocketId;
use super::state::{Bounds, Simulation};
use super::vector::Polar;
use crate::consts::*;
use crate::error::SimError;

/// Control values for a single tick, read fresh every step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Gravity strength (direction is always screen-down)
    pub gravity: f64,
    /// Chance in [0, 1] that an offspring receives a mutation burst
    pub mutation_rate: f64,
    /// Population size to refill toward
    pub target_size: usize,
    pub target: DVec2,
    pub bounds: Bounds,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            mutation_rate: DEFAULT_MUTATION_RATE,
            target_size: DEFAULT_POPULATION,
            target: TARGET_POS,
            bounds: Bounds::default(),
        }
    }
}

/// What the presentation layer needs to draw one rocket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocketView {
    pub id: RocketId,
    pub pos: DVec2,
    /// Highest fitness this tick (highlighted on screen)
    pub fittest: bool,
}

/// Outcome of a successful tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    /// Live rockets after deaths and the birth, in population order
    pub rockets: Vec<RocketView>,
    /// Rockets that died this tick; their visuals can be released
    pub removed: Vec<RocketId>,
    pub spawned: Option<RocketId>,
    pub fittest: RocketId,
}

/// A tick that could not finish. Deaths were already committed, so their
/// IDs travel with the error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("tick {tick} failed: {source}")]
pub struct TickError {
    pub tick: u64,
    pub removed: Vec<RocketId>,
    #[source]
    pub source: SimError,
}

/// Fresh start after a failed tick. Every ID listed in `removed` or
/// `discarded` no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResetReport {
    pub tick: u64,
    /// Deaths the failed tick had already committed
    pub removed: Vec<RocketId>,
    /// Survivors thrown away by the reset
    pub discarded: Vec<RocketId>,
    /// The replacement rockets
    pub rockets: Vec<RocketView>,
}

/// Replace the population with `size` fresh rockets after `err`
pub fn recover(state: &mut Simulation, err: TickError, size: usize) -> ResetReport {
    let discarded = state.reset(size);
    let rockets = state
        .population
        .members
        .iter()
        .map(|r| RocketView {
            id: r.id,
            pos: r.pos,
            fittest: false,
        })
        .collect();
    ResetReport {
        tick: err.tick,
        removed: err.removed,
        discarded,
        rockets,
    }
}

/// Advance the simulation by one step
pub fn tick(state: &mut Simulation, input: &TickInput) -> Result<TickReport, TickError> {
    state.time_ticks += 1;
    let tick = state.time_ticks;

    let population = &mut state.population;
    population.target_size = input.target_size;
    population.mutation_rate = input.mutation_rate;

    let gravity = Polar::new(input.gravity, GRAVITY_DIRECTION);
    let model = state.fitness_model.as_ref();

    // Update phase: nothing is added or removed here
    for rocket in &mut population.members {
        rocket.apply_forces(gravity);
        rocket.advance();
        rocket.observe_target(input.target);
        rocket.evaluate_fitness(model);
        if rocket.is_dead(&input.bounds) {
            rocket.alive = false;
        }
    }

    // Commit phase
    let removed = population.remove_dead();
    if !removed.is_empty() {
        log::debug!("tick {}: {} rockets died {:?}", tick, removed.len(), removed);
    }

    let fittest = match population.fittest() {
        Ok(rocket) => rocket.id,
        Err(source) => {
            return Err(TickError {
                tick,
                removed,
                source,
            });
        }
    };

    let spawned = match population.maybe_spawn(&mut state.rng) {
        Ok(spawned) => spawned,
        Err(source) => {
            return Err(TickError {
                tick,
                removed,
                source,
            });
        }
    };

    let rockets = population
        .members
        .iter()
        .map(|r| RocketView {
            id: r.id,
            pos: r.pos,
            fittest: r.id == fittest,
        })
        .collect();

    Ok(TickReport {
        tick,
        rockets,
        removed,
        spawned,
        fittest,
    })
}
