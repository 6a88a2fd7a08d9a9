//! Deterministic simulation module
//!
//! All evolutionary and physics logic lives here. This module must be pure
//! and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (population order)
//! - No rendering or platform dependencies

pub mod fitness;
pub mod genome;
pub mod population;
pub mod rocket;
pub mod state;
pub mod tick;
pub mod vector;

pub use fitness::{ClosestApproach, FitnessModel, ReferenceFitness};
pub use genome::{Channel, Genome};
pub use population::{Population, PopulationStats};
pub use rocket::{Rocket, RocketId};
pub use state::{Bounds, Simulation};
pub use tick::{ResetReport, RocketView, TickError, TickInput, TickReport, recover, tick};
pub use vector::{Polar, compose_vectors, distance};
