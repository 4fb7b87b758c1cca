//! The player character and its inventory.

use arrayvec::ArrayVec;

use super::{Position, ResourceMeter};
use crate::config::GameConfig;

/// Kinds of items the player can carry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InventoryKind {
    Potion,
    TrapSpike,
    TrapFire,
}

/// Inventory slot containing an item kind, its display name and quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySlot {
    pub kind: InventoryKind,
    pub name: String,
    pub count: u32,
}

impl InventorySlot {
    pub fn new(kind: InventoryKind, name: impl Into<String>, count: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            count,
        }
    }
}

type Slots = ArrayVec<InventorySlot, { GameConfig::MAX_INVENTORY_SLOTS }>;

/// Ordered list of carried items.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    pub items: Slots,
}

impl InventoryState {
    pub fn empty() -> Self {
        Self {
            items: ArrayVec::new(),
        }
    }

    /// Builds an inventory from slots, keeping at most
    /// [`GameConfig::MAX_INVENTORY_SLOTS`] entries.
    pub fn from_slots(slots: impl IntoIterator<Item = InventorySlot>) -> Self {
        Self {
            items: slots
                .into_iter()
                .take(GameConfig::MAX_INVENTORY_SLOTS)
                .collect(),
        }
    }

    pub fn slot(&self, kind: InventoryKind) -> Option<&InventorySlot> {
        self.items.iter().find(|slot| slot.kind == kind)
    }

    pub fn slot_mut(&mut self, kind: InventoryKind) -> Option<&mut InventorySlot> {
        self.items.iter_mut().find(|slot| slot.kind == kind)
    }

    /// Quantity carried for `kind`, zero when there is no slot.
    pub fn count(&self, kind: InventoryKind) -> u32 {
        self.slot(kind).map_or(0, |slot| slot.count)
    }
}

/// The singleton player record.
///
/// # Invariants
///
/// - `position` lies inside the grid
/// - `health.current <= health.maximum`; reaching zero ends the run
/// - `experience` is cumulative and `level` is derived from it
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub health: ResourceMeter,
    pub mana: ResourceMeter,
    pub level: u32,
    pub experience: u64,
    pub gold: u64,
    pub inventory: InventoryState,
}

impl PlayerState {
    /// Fresh player placed on the configured spawn cell.
    pub fn from_config(config: &GameConfig) -> Self {
        let start = &config.player;
        Self {
            position: config.player_spawn,
            health: ResourceMeter::full(start.max_health),
            mana: ResourceMeter::new(start.mana.min(start.max_mana), start.max_mana),
            level: 1,
            experience: 0,
            gold: start.gold,
            inventory: InventoryState::from_slots(start.inventory.iter().cloned()),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }
}
