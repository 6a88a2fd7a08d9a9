//! Thruster control sequences
//!
//! A genome holds one thrust schedule per engine. All three schedules always
//! have the same length; the constructors are the only way to build one.

use rand::Rng;
use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::SimError;

/// One of the three engines on a rocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Pushes the rocket up
    Bottom,
    /// Pushes the rocket right
    Left,
    /// Pushes the rocket left
    Right,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Bottom, Channel::Left, Channel::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Bottom => 0,
            Channel::Left => 1,
            Channel::Right => 2,
        }
    }

    /// Direction of the force this engine applies (screen space, y down)
    pub fn thrust_direction(self) -> f64 {
        match self {
            Channel::Bottom => 3.0 * FRAC_PI_2,
            Channel::Left => 0.0,
            Channel::Right => PI,
        }
    }
}

/// Per-frame thrust intensities in [0, 1] for every engine
#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    channels: [Vec<f64>; 3],
}

impl Genome {
    /// Fresh genome with uniform random thrust values
    pub fn random<R: Rng>(rng: &mut R, lifespan: usize) -> Self {
        let channels =
            std::array::from_fn(|_| (0..lifespan).map(|_| rng.random::<f64>()).collect());
        Self { channels }
    }

    /// Genome with every engine idle
    pub fn zeroed(lifespan: usize) -> Self {
        Self::constant(lifespan, 0.0)
    }

    /// Genome with every engine at the same thrust for its whole life
    pub fn constant(lifespan: usize, thrust: f64) -> Self {
        Self {
            channels: [vec![thrust; lifespan], vec![thrust; lifespan], vec![thrust; lifespan]],
        }
    }

    pub fn from_channels(
        bottom: Vec<f64>,
        left: Vec<f64>,
        right: Vec<f64>,
    ) -> Result<Self, SimError> {
        if bottom.len() != left.len() || left.len() != right.len() {
            return Err(SimError::GenomeLengthMismatch {
                bottom: bottom.len(),
                left: left.len(),
                right: right.len(),
            });
        }
        Ok(Self {
            channels: [bottom, left, right],
        })
    }

    /// Length shared by all three channels
    #[inline]
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel(&self, channel: Channel) -> &[f64] {
        &self.channels[channel.index()]
    }

    /// Thrust for an engine at a given frame (idle past the end of the genome)
    #[inline]
    pub fn thrust(&self, channel: Channel, frame: usize) -> f64 {
        self.channels[channel.index()]
            .get(frame)
            .copied()
            .unwrap_or(0.0)
    }

    /// Overwrite this genome by interleaving two parents: even frames come
    /// from `first`, odd frames from `second`. Frames past the shortest of the
    /// three genomes keep their current values.
    pub fn inherit(&mut self, first: &Genome, second: &Genome) {
        for channel in Channel::ALL {
            let i = channel.index();
            let shared = self.channels[i]
                .len()
                .min(first.channels[i].len())
                .min(second.channels[i].len());
            for frame in 0..shared {
                self.channels[i][frame] = if frame % 2 == 0 {
                    first.channels[i][frame]
                } else {
                    second.channels[i][frame]
                };
            }
        }
    }

    /// Overwrite `count` random (channel, frame) sites with fresh thrust
    /// values. Sites may repeat.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R, count: usize) {
        if self.is_empty() {
            return;
        }
        let len = self.len();
        for _ in 0..count {
            let frame = rng.random_range(0..len);
            let value = rng.random::<f64>();
            let channel = Channel::ALL[rng.random_range(0..Channel::ALL.len())];
            self.channels[channel.index()][frame] = value;
        }
    }
}
