//! Fitness scoring
//!
//! Higher is fitter. Scores are signed and unbounded: the reference formula
//! subtracts the rocket's age, so its denominator can reach zero or go
//! negative late in life. Models must not fail on those values.

use std::fmt;

/// Closest a rocket has come to the target, and the frame it happened on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestApproach {
    pub distance: f64,
    pub frame: usize,
}

/// A scoring policy for one rocket's trajectory
pub trait FitnessModel: fmt::Debug {
    fn evaluate(&self, distance: f64, closest: ClosestApproach, frame: usize) -> f64;
}

/// `numerator / (w_d*distance + w_c*closest + w_cf*closest_frame + w_f*frame)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFitness {
    pub numerator: f64,
    pub distance_weight: f64,
    pub closest_weight: f64,
    pub closest_frame_weight: f64,
    pub frame_weight: f64,
}

impl Default for ReferenceFitness {
    fn default() -> Self {
        Self {
            numerator: 1000.0,
            distance_weight: 8.0,
            closest_weight: 3.0,
            closest_frame_weight: 1.0,
            frame_weight: -2.0,
        }
    }
}

impl FitnessModel for ReferenceFitness {
    fn evaluate(&self, distance: f64, closest: ClosestApproach, frame: usize) -> f64 {
        let denominator = self.distance_weight * distance
            + self.closest_weight * closest.distance
            + self.closest_frame_weight * closest.frame as f64
            + self.frame_weight * frame as f64;
        self.numerator / denominator
    }
}
