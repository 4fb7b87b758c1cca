//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, AttackAction, AttackError, MoveAction, MoveError, PlaceTrapAction,
    PlaceTrapError, UseItemAction, UseItemError,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{MessageCategory, StateError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
///
/// Every variant is also narrated in the message log; see
/// [`ExecuteError::log_message`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("attack action failed: {0}")]
    Attack(TransitionPhaseError<<AttackAction as ActionTransition>::Error>),

    #[error("use item action failed: {0}")]
    UseItem(TransitionPhaseError<<UseItemAction as ActionTransition>::Error>),

    #[error("place trap action failed: {0}")]
    PlaceTrap(TransitionPhaseError<<PlaceTrapAction as ActionTransition>::Error>),

    /// The run is over; only a new run or a restore can continue it.
    #[error("the player has been defeated")]
    Defeated,

    /// The layout could not be spawned onto a new level.
    #[error("level could not be built: {0}")]
    Level(StateError),
}

impl ExecuteError {
    /// Player-facing narration appended to the message log on rejection.
    pub fn log_message(&self) -> String {
        match self {
            Self::Move(failure) => match &failure.error {
                MoveError::Attack(error) => attack_message(error),
                _ => "Cannot move there!".to_owned(),
            },
            Self::Attack(failure) => attack_message(&failure.error),
            Self::UseItem(failure) => match &failure.error {
                UseItemError::NotAvailable { .. } => "Item not available!".to_owned(),
                UseItemError::NotUsable { kind } => format!("{kind} cannot be used directly."),
            },
            Self::PlaceTrap(failure) => match &failure.error {
                PlaceTrapError::InsufficientGold { .. } => "Not enough gold!".to_owned(),
                PlaceTrapError::State(_) => "Trap could not be placed!".to_owned(),
            },
            Self::Defeated => {
                "You have been defeated! Start a new run to play again.".to_owned()
            }
            Self::Level(_) => "The next level could not be built!".to_owned(),
        }
    }

    pub fn log_category(&self) -> MessageCategory {
        match self {
            Self::UseItem(failure) if matches!(failure.error, UseItemError::NotUsable { .. }) => {
                MessageCategory::Info
            }
            _ => MessageCategory::Error,
        }
    }

    /// Pipeline phase that failed, if the error came from an action.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(failure) => Some(failure.phase),
            Self::Attack(failure) => Some(failure.phase),
            Self::UseItem(failure) => Some(failure.phase),
            Self::PlaceTrap(failure) => Some(failure.phase),
            Self::Defeated | Self::Level(_) => None,
        }
    }
}

fn attack_message(error: &AttackError) -> String {
    match error {
        AttackError::EnemyNotFound(_) => "There is no enemy there!".to_owned(),
        AttackError::Desync(_) => "The fight went wrong!".to_owned(),
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(failure) => failure.error.severity(),
            Self::Attack(failure) => failure.error.severity(),
            Self::UseItem(failure) => failure.error.severity(),
            Self::PlaceTrap(failure) => failure.error.severity(),
            Self::Defeated => ErrorSeverity::Fatal,
            Self::Level(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(failure) => failure.error.error_code(),
            Self::Attack(failure) => failure.error.error_code(),
            Self::UseItem(failure) => failure.error.error_code(),
            Self::PlaceTrap(failure) => failure.error.error_code(),
            Self::Defeated => "EXECUTE_DEFEATED",
            Self::Level(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InventoryKind, Position};

    #[test]
    fn narration_matches_failure() {
        let wall = ExecuteError::Move(TransitionPhaseError::new(
            TransitionPhase::PreValidate,
            MoveError::Blocked {
                destination: Position::new(0, 0),
            },
        ));
        assert_eq!(wall.log_message(), "Cannot move there!");
        assert_eq!(wall.log_category(), MessageCategory::Error);
        assert_eq!(wall.error_code(), "MOVE_BLOCKED");

        let not_usable = ExecuteError::UseItem(TransitionPhaseError::new(
            TransitionPhase::PreValidate,
            UseItemError::NotUsable {
                kind: InventoryKind::TrapFire,
            },
        ));
        assert_eq!(not_usable.log_message(), "trap_fire cannot be used directly.");
        assert_eq!(not_usable.log_category(), MessageCategory::Info);
        assert_eq!(ExecuteError::Defeated.severity(), ErrorSeverity::Fatal);

        let level = ExecuteError::Level(StateError::TileFull {
            position: Position::new(3, 3),
        });
        assert_eq!(level.log_message(), "The next level could not be built!");
        assert_eq!(level.error_code(), "STATE_TILE_FULL");
        assert_eq!(level.phase(), None);
    }
}
