//! Combat resolution.
//!
//! [`damage`] holds the pure roll formulas; [`enemy_strike`] applies an enemy
//! hit to the player and is shared by counterattacks and enemy AI.

pub mod damage;

pub use damage::{enemy_damage, player_damage};

use tracing::{debug, info};

use crate::env::{GameEnv, RollContext};
use crate::state::{EntityId, GameState, MessageCategory, TurnPhase};

/// Result of an enemy hitting the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeReport {
    pub attacker: EntityId,
    pub damage: u32,
    /// The hit brought the player to zero health.
    pub player_defeated: bool,
}

/// Lets `attacker` hit the player once. Returns `None` when the enemy does
/// not exist.
///
/// Drops the player into [`TurnPhase::Defeated`] when health reaches zero.
pub fn enemy_strike(
    state: &mut GameState,
    env: &GameEnv<'_>,
    attacker: EntityId,
) -> Option<StrikeReport> {
    let attack = state.entities.enemy(attacker)?.attack;
    let seed = state.next_seed(attacker, RollContext::EnemyDamage);
    let damage = enemy_damage(env.rng(), seed, attack);

    state.player.health.drain(damage);
    debug!(
        target: "game_core::combat",
        attacker = %attacker,
        damage,
        health = state.player.health.current,
        "enemy hits player"
    );
    state
        .log
        .push(format!("Enemy deals {damage} damage!"), MessageCategory::Error);

    let player_defeated = !state.player.is_alive();
    if player_defeated {
        state.turn.phase = TurnPhase::Defeated;
        info!(target: "game_core::combat", turn = state.turn.turn, "player defeated");
        state
            .log
            .push("You have been defeated!", MessageCategory::Error);
    }

    Some(StrikeReport {
        attacker,
        damage,
        player_defeated,
    })
}
