use std::collections::BTreeMap;

use super::{EntityId, Position, ResourceMeter};
use crate::env::{EnemyKind, EnemyTemplate};

/// Registry of every non-player entity on the level.
///
/// Collections are keyed by [`EntityId`]; because identifiers are allocated
/// monotonically, iteration order equals spawn order. Enemy AI relies on this.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EntitiesState {
    pub enemies: BTreeMap<EntityId, EnemyState>,
    pub items: BTreeMap<EntityId, ItemState>,
    pub npcs: BTreeMap<EntityId, NpcState>,
    pub traps: BTreeMap<EntityId, TrapState>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.enemies.get(&id)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.enemies.get_mut(&id)
    }

    /// Enemy identifiers in registry order.
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.keys().copied().collect()
    }

    /// Traps placed at `position`, in placement order.
    pub fn traps_at(&self, position: Position) -> impl Iterator<Item = &TrapState> {
        self.traps
            .values()
            .filter(move |trap| trap.position == position)
    }

    /// Largest identifier in use, if any entity exists.
    pub fn max_id(&self) -> Option<EntityId> {
        [
            self.enemies.keys().next_back(),
            self.items.keys().next_back(),
            self.npcs.keys().next_back(),
            self.traps.keys().next_back(),
        ]
        .into_iter()
        .flatten()
        .max()
        .copied()
    }
}

/// Hostile combatant.
///
/// # Invariants
///
/// - present in the registry only while `health.current > 0`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: ResourceMeter,
    pub attack: u32,
    pub defense: u32,
    pub experience: u64,
}

impl EnemyState {
    /// Instantiates an enemy at full health from its catalog template.
    pub fn from_template(id: EntityId, kind: EnemyKind, position: Position) -> Self {
        let EnemyTemplate {
            max_health,
            attack,
            defense,
            experience,
        } = kind.template();

        Self {
            id,
            kind,
            position,
            health: ResourceMeter::full(max_health),
            attack,
            defense,
            experience,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }
}

/// Ground pickup categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Gold,
    Potion,
    Treasure,
}

/// Item lying on the ground; removed on pickup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub id: EntityId,
    pub position: Position,
    pub kind: ItemKind,
    pub amount: u32,
}

impl ItemState {
    pub fn new(id: EntityId, position: Position, kind: ItemKind, amount: u32) -> Self {
        Self {
            id,
            position,
            kind,
            amount,
        }
    }
}

/// Roles for non-player characters.
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
pub enum NpcKind {
    Merchant,
    Guard,
}

/// Non-combat character. Blocks movement; bumping into it starts a conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcState {
    pub id: EntityId,
    pub position: Position,
    pub name: String,
    pub kind: NpcKind,
}

impl NpcState {
    pub fn new(id: EntityId, position: Position, name: impl Into<String>, kind: NpcKind) -> Self {
        Self {
            id,
            position,
            name: name.into(),
            kind,
        }
    }
}

/// Trap variants the player can build.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrapKind {
    Spike,
    Fire,
    PoisonDart,
    PressurePlate,
    Ice,
    Electric,
}

/// Placed trap. Nothing in the core triggers traps yet; the registry is
/// exposed so a trigger layer can be added on top.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrapState {
    pub id: EntityId,
    pub position: Position,
    pub kind: TrapKind,
    pub active: bool,
    pub damage: u32,
}

impl TrapState {
    pub fn new(id: EntityId, position: Position, kind: TrapKind, damage: u32) -> Self {
        Self {
            id,
            position,
            kind,
            active: true,
            damage,
        }
    }
}
