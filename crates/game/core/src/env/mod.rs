//! Read-only inputs the rules consult while resolving actions.
//!
//! The [`GameEnv`] aggregate bundles the tunable configuration and the random
//! source so actions can reach both without owning either.
mod catalog;
mod layout;
mod rng;

pub use catalog::{EnemyKind, EnemyTemplate};
pub use layout::{EnemySpawn, ItemSpawn, LevelLayout, NpcSpawn};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::GameConfig;

/// Borrowed view of the engine's configuration and random source.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    config: &'a GameConfig,
    rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
