//! Resolution phase: enemy AI and turn bookkeeping.

use tracing::{debug, info, warn};

use crate::ai::{EnemyIntent, plan_step};
use crate::combat::{StrikeReport, enemy_strike};
use crate::env::GameEnv;
use crate::state::{EntityId, GameState, MessageCategory, Position, TurnPhase};

use super::{ExecuteError, GameEngine};

/// What one enemy did during the resolution phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    Attacked(StrikeReport),
    Moved { from: Position, to: Position },
    Held,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTurn {
    pub enemy: EntityId,
    pub action: EnemyAction,
}

/// Summary of a completed `end_turn` call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    /// Turn counter after resolution. Unchanged when the player fell.
    pub turn: u64,
    /// Enemies that acted, in registry order.
    pub enemies: Vec<EnemyTurn>,
    pub player_defeated: bool,
}

impl GameEngine {
    /// Ends the player phase: every enemy acts once, then the turn counter
    /// advances and is logged.
    ///
    /// If an enemy defeats the player, the remaining enemies skip their move
    /// and the counter stays where it was.
    pub fn end_turn(&mut self) -> Result<TurnReport, ExecuteError> {
        self.ensure_active()?;

        self.state.turn.phase = TurnPhase::Resolution;
        let env = GameEnv::new(&self.config, self.rng.as_ref());
        let enemies = run_enemy_phase(&mut self.state, &env);

        let player_defeated = self.state.turn.is_defeated();
        if !player_defeated {
            let turn = &mut self.state.turn;
            turn.turn += 1;
            turn.phase = TurnPhase::Player;
            let number = turn.turn;
            info!(target: "game_core::engine", turn = number, "turn completed");
            self.state
                .log
                .push(format!("Turn {number}"), MessageCategory::Action);
        }

        Ok(TurnReport {
            turn: self.state.turn.turn,
            enemies,
            player_defeated,
        })
    }
}

fn run_enemy_phase(state: &mut GameState, env: &GameEnv<'_>) -> Vec<EnemyTurn> {
    let mut turns = Vec::new();

    for id in state.entities.enemy_ids() {
        let Some(enemy) = state.entities.enemy(id) else {
            continue;
        };
        let from = enemy.position;
        let intent = plan_step(state, enemy);

        let action = match intent {
            EnemyIntent::Attack => enemy_strike(state, env, id)
                .map(EnemyAction::Attacked)
                .unwrap_or(EnemyAction::Held),
            EnemyIntent::Step(to) => match state.move_enemy(id, to) {
                Ok(()) => EnemyAction::Moved { from, to },
                Err(error) => {
                    warn!(target: "game_core::ai", enemy = %id, error = %error, "enemy step refused");
                    EnemyAction::Held
                }
            },
            EnemyIntent::Hold => EnemyAction::Held,
        };
        debug!(target: "game_core::ai", enemy = %id, ?action, "enemy acted");
        turns.push(EnemyTurn { enemy: id, action });

        if state.turn.is_defeated() {
            break;
        }
    }

    turns
}
