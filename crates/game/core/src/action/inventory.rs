use tracing::debug;

use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, InventoryKind, MessageCategory};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseItemError {
    /// No slot for the kind, or the slot is empty.
    #[error("no {kind} left in the inventory")]
    NotAvailable { kind: InventoryKind },

    /// The kind exists but has no direct-use effect.
    #[error("{kind} cannot be used directly")]
    NotUsable { kind: InventoryKind },
}

impl GameError for UseItemError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAvailable { .. } => "USE_ITEM_NOT_AVAILABLE",
            Self::NotUsable { .. } => "USE_ITEM_NOT_USABLE",
        }
    }
}

/// Consume one item from the player's inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub kind: InventoryKind,
}

impl UseItemAction {
    pub fn new(kind: InventoryKind) -> Self {
        Self { kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemOutcome {
    pub kind: InventoryKind,
    /// Health actually restored after clamping to the maximum.
    pub healed: u32,
    pub remaining: u32,
}

impl ActionTransition for UseItemAction {
    type Error = UseItemError;
    type Result = UseItemOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.player.inventory.count(self.kind) == 0 {
            return Err(UseItemError::NotAvailable { kind: self.kind });
        }
        if self.kind != InventoryKind::Potion {
            return Err(UseItemError::NotUsable { kind: self.kind });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<UseItemOutcome, UseItemError> {
        let heal = env.config().potion_heal;
        let player = &mut state.player;

        let slot = player
            .inventory
            .slot_mut(self.kind)
            .filter(|slot| slot.count > 0)
            .ok_or(UseItemError::NotAvailable { kind: self.kind })?;
        slot.count -= 1;
        let remaining = slot.count;

        let healed = player.health.restore(heal);
        debug!(target: "game_core::action", healed, remaining, "potion used");
        state
            .log
            .push(format!("Potion used! +{heal} HP"), MessageCategory::Success);

        Ok(UseItemOutcome {
            kind: self.kind,
            healed,
            remaining,
        })
    }
}
