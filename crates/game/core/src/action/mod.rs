//! Player actions and the transition contract they implement.
//!
//! Every action validates against the state before mutating it, mutates it
//! in `apply`, and appends its own success narration to the message log.
//! Rejections are narrated by the engine.
mod combat;
mod inventory;
mod movement;
mod transition;
mod trap;

pub use combat::{AttackAction, AttackError, AttackOutcome, AttackResolution};
pub use inventory::{UseItemAction, UseItemError, UseItemOutcome};
pub use movement::{CardinalDirection, MoveAction, MoveError, MoveOutcome, Pickup};
pub use transition::ActionTransition;
pub use trap::{PlaceTrapAction, PlaceTrapError, PlaceTrapOutcome};

/// A player command the engine can execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Attack(AttackAction),
    UseItem(UseItemAction),
    PlaceTrap(PlaceTrapAction),
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<AttackAction> for Action {
    fn from(action: AttackAction) -> Self {
        Self::Attack(action)
    }
}

impl From<UseItemAction> for Action {
    fn from(action: UseItemAction) -> Self {
        Self::UseItem(action)
    }
}

impl From<PlaceTrapAction> for Action {
    fn from(action: PlaceTrapAction) -> Self {
        Self::PlaceTrap(action)
    }
}

/// Action-specific result returned by a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveOutcome),
    Attack(AttackOutcome),
    UseItem(UseItemOutcome),
    PlaceTrap(PlaceTrapOutcome),
}
