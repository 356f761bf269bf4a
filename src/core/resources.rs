//! Core domain: shared resources for run configuration and randomness.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Seeded generator shared by every AI roll (patrol targets, attack picks).
#[derive(Resource, Debug)]
pub struct AiRng(pub ChaCha8Rng);

impl AiRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
