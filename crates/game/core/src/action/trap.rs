use tracing::debug;

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, MessageCategory, Position, StateError, TrapKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceTrapError {
    #[error("trap costs {required} gold but only {available} is available")]
    InsufficientGold { required: u64, available: u64 },

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for PlaceTrapError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientGold { .. } => ErrorSeverity::Recoverable,
            Self::State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientGold { .. } => "PLACE_TRAP_INSUFFICIENT_GOLD",
            Self::State(error) => error.error_code(),
        }
    }
}

/// Buy a trap and place it on any cell.
///
/// The target cell is not checked: traps may sit on walls or under other
/// entities. Trap inventory entries are not consumed, only gold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceTrapAction {
    pub position: Position,
    pub kind: TrapKind,
}

impl PlaceTrapAction {
    pub fn new(position: Position, kind: TrapKind) -> Self {
        Self { position, kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceTrapOutcome {
    pub trap: EntityId,
    pub cost: u64,
}

impl ActionTransition for PlaceTrapAction {
    type Error = PlaceTrapError;
    type Result = PlaceTrapOutcome;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let required = env.config().trap_cost;
        let available = state.player.gold;
        if available < required {
            return Err(PlaceTrapError::InsufficientGold {
                required,
                available,
            });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<PlaceTrapOutcome, PlaceTrapError> {
        let config = env.config();
        let trap = state.add_trap(self.kind, self.position, config.trap_damage)?;
        state.player.gold -= config.trap_cost;

        debug!(
            target: "game_core::action",
            trap = %trap,
            kind = %self.kind,
            position = %self.position,
            "trap placed"
        );
        state.log.push("Trap placed!", MessageCategory::Action);

        Ok(PlaceTrapOutcome {
            trap,
            cost: config.trap_cost,
        })
    }
}
