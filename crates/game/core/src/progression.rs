//! Experience and levels.
//!
//! Experience is cumulative. The level is derived from it: level 1 -> 2
//! costs `experience_base`, every later level costs the previous cost scaled
//! by `experience_growth_numerator / experience_growth_denominator`.

use tracing::info;

use crate::config::GameConfig;
use crate::state::{GameState, MessageCategory};

/// Where a player stands within their current level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// Experience earned since reaching `level`.
    pub into_level: u64,
    /// Experience the current level costs in total.
    pub level_cost: u64,
}

impl LevelProgress {
    pub fn remaining(&self) -> u64 {
        self.level_cost.saturating_sub(self.into_level)
    }
}

/// Computes level and in-level progress for a total experience value.
pub fn progress(config: &GameConfig, experience: u64) -> LevelProgress {
    let mut level = 1u32;
    let mut reached = 0u64;
    let mut cost = config.experience_base;

    loop {
        let next = reached.saturating_add(cost);
        // A zero cost or a saturated threshold would loop forever.
        if cost == 0 || next == u64::MAX || experience < next || level == u32::MAX {
            break;
        }
        reached = next;
        level += 1;
        cost = next_cost(config, cost);
    }

    LevelProgress {
        level,
        into_level: experience - reached,
        level_cost: cost,
    }
}

pub fn level_for_experience(config: &GameConfig, experience: u64) -> u32 {
    progress(config, experience).level
}

fn next_cost(config: &GameConfig, cost: u64) -> u64 {
    cost.saturating_mul(config.experience_growth_numerator)
        .checked_div(config.experience_growth_denominator)
        .unwrap_or(cost)
}

/// Adds experience to the player and logs one entry per level gained.
///
/// Returns the number of levels gained.
pub fn grant_experience(state: &mut GameState, config: &GameConfig, amount: u64) -> u32 {
    let player = &mut state.player;
    player.experience = player.experience.saturating_add(amount);

    let target = level_for_experience(config, player.experience);
    let mut gained = 0;
    while state.player.level < target {
        state.player.level += 1;
        gained += 1;
        let level = state.player.level;
        info!(target: "game_core::progression", level, "level up");
        state.log.push(
            format!("Level up! You are now level {level}."),
            MessageCategory::Success,
        );
    }
    gained
}
