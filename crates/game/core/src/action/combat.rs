use tracing::debug;

use crate::action::ActionTransition;
use crate::combat::{StrikeReport, enemy_strike, player_damage};
use crate::env::{GameEnv, RollContext};
use crate::error::{ErrorSeverity, GameError};
use crate::progression::grant_experience;
use crate::state::{EntityId, GameState, MessageCategory};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("enemy {0} not found")]
    EnemyNotFound(EntityId),

    #[error("enemy {0} left registry and occupancy index out of sync")]
    Desync(EntityId),
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EnemyNotFound(_) => ErrorSeverity::Validation,
            Self::Desync(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EnemyNotFound(_) => "ATTACK_ENEMY_NOT_FOUND",
            Self::Desync(_) => "ATTACK_DESYNC",
        }
    }
}

/// Player melee attack against an enemy.
///
/// Normally triggered by moving into the enemy's cell. Range is not checked
/// so tests and scripted hosts can resolve an exchange directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pub target: EntityId,
}

impl AttackAction {
    pub fn new(target: EntityId) -> Self {
        Self { target }
    }
}

/// What followed the player's hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResolution {
    /// The enemy died and its rewards were granted. No counterattack.
    Slain {
        experience: u64,
        gold: u64,
        levels_gained: u32,
    },
    /// The enemy survived and hit back.
    Countered(StrikeReport),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub target: EntityId,
    pub damage: u32,
    pub resolution: AttackResolution,
}

impl ActionTransition for AttackAction {
    type Error = AttackError;
    type Result = AttackOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state
            .entities
            .enemy(self.target)
            .map(|_| ())
            .ok_or(AttackError::EnemyNotFound(self.target))
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<AttackOutcome, AttackError> {
        let config = env.config();
        let seed = state.next_seed(EntityId::PLAYER, RollContext::PlayerDamage);

        let enemy = state
            .entities
            .enemy_mut(self.target)
            .ok_or(AttackError::EnemyNotFound(self.target))?;
        let damage = player_damage(
            env.rng(),
            seed,
            config.player_damage_spread,
            config.player_damage_floor,
            enemy.defense,
        );
        enemy.health.drain(damage);
        let slain = !enemy.is_alive();

        debug!(
            target: "game_core::combat",
            enemy = %self.target,
            damage,
            remaining = enemy.health.current,
            "player hits enemy"
        );
        state
            .log
            .push(format!("Hit enemy for {damage} damage!"), MessageCategory::Combat);

        let resolution = if slain {
            let enemy = state
                .remove_enemy(self.target)
                .ok_or(AttackError::EnemyNotFound(self.target))?;
            let experience = enemy.experience;
            let gold = u64::from(enemy.health.maximum).saturating_mul(config.gold_per_max_health);

            state.player.gold = state.player.gold.saturating_add(gold);
            state.log.push(
                format!("Victory! +{experience} EXP, +{gold} Gold"),
                MessageCategory::Success,
            );
            let levels_gained = grant_experience(state, config, experience);

            AttackResolution::Slain {
                experience,
                gold,
                levels_gained,
            }
        } else {
            let strike = enemy_strike(state, env, self.target)
                .ok_or(AttackError::EnemyNotFound(self.target))?;
            AttackResolution::Countered(strike)
        };

        Ok(AttackOutcome {
            target: self.target,
            damage,
            resolution,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        // A slain enemy must be gone from both the registry and the index.
        let indexed = state
            .occupancy
            .occupancy()
            .values()
            .flatten()
            .any(|occupant| occupant.id() == self.target);
        match state.entities.enemy(self.target) {
            Some(enemy) if enemy.is_alive() && indexed => Ok(()),
            None if !indexed => Ok(()),
            _ => Err(AttackError::Desync(self.target)),
        }
    }
}
