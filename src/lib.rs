//! Rocket Evolve - rockets that learn to steer toward a target
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vector physics, genomes, fitness, breeding)
//! - `settings`: Construction parameters and per-tick control values
//! - `error`: Population-level failure conditions
//!
//! Drawing, windowing and frame pacing belong to whoever drives [`sim::tick`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Reference simulation constants
pub mod consts {
    use glam::DVec2;

    /// Frames a rocket lives for (and length of every genome channel)
    pub const LIFESPAN: usize = 500;

    /// Arena dimensions (screen space, y grows downward)
    pub const ARENA_WIDTH: f64 = 500.0;
    pub const ARENA_HEIGHT: f64 = 600.0;

    /// Where every rocket starts, just above the bottom edge
    pub const SPAWN_POS: DVec2 = DVec2::new(250.0, 590.0);
    /// Initial target location
    pub const TARGET_POS: DVec2 = DVec2::new(250.0, 150.0);

    /// Gravity always points screen-down
    pub const GRAVITY_DIRECTION: f64 = std::f64::consts::FRAC_PI_2;

    /// Sentinel distance for a rocket that has not measured the target yet
    pub const UNSEEN_DISTANCE: f64 = 10_000.0;

    /// Number of point mutations applied when the mutation gate fires
    pub const MUTATION_BURST: usize = 50;

    /// Decimal places kept by the reference vector arithmetic
    pub const ROUND_PLACES: i32 = 5;

    /// Control defaults and their allowed ranges
    pub const DEFAULT_POPULATION: usize = 75;
    pub const POPULATION_RANGE: (usize, usize) = (3, 100);
    pub const DEFAULT_MUTATION_RATE: f64 = 0.45;
    pub const DEFAULT_GRAVITY: f64 = 0.5;
    pub const GRAVITY_RANGE: (f64, f64) = (0.3, 0.6);
    pub const DEFAULT_FRAME_TIME: f64 = 0.03;
    pub const FRAME_TIME_RANGE: (f64, f64) = (0.001, 0.05);
}

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value through its decimal expansion, so values
/// such as `2.000025` (stored just below the halfway point) round down.
/// Scaling by `10^places` first would round those up.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = places.max(0) as usize;
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_five_places() {
        assert_eq!(round_to(0.123456, 5), 0.12346);
        assert_eq!(round_to(6.123e-17, 5), 0.0);
        assert_eq!(round_to(-0.000004, 5), 0.0);
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // Both are stored just below the halfway point
        assert_eq!(round_to(0.123455, 5), 0.12345);
        assert_eq!(round_to(2.000025, 5), 2.00002);
        assert_eq!(round_to(-2.000025, 5), -2.00002);
        assert_eq!(round_to(1.5707963267948966, 5), 1.5708);
        assert!(round_to(f64::NAN, 5).is_nan());
        assert_eq!(round_to(f64::INFINITY, 5), f64::INFINITY);
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert!((p - DVec2::new(2.0, 0.0)).length() < 1e-12);
        let p = polar_to_cartesian(2.0, std::f64::consts::FRAC_PI_2);
        assert!((p - DVec2::new(0.0, 2.0)).length() < 1e-12);
    }
}
