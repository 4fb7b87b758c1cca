//! Where enemies, items and NPCs appear when a level is initialized.

use crate::env::EnemyKind;
use crate::state::{ItemKind, NpcKind, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub amount: u32,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NpcSpawn {
    pub name: String,
    pub kind: NpcKind,
    pub position: Position,
}

/// Spawn tables applied by `initialize_level`, in order: enemies, items, NPCs.
///
/// Layouts are deterministic; only wall placement uses randomness. A list
/// missing from a data file deserializes as empty, not as the built-in catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelLayout {
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemies: Vec<EnemySpawn>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub items: Vec<ItemSpawn>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub npcs: Vec<NpcSpawn>,
}

impl LevelLayout {
    /// A layout with nothing in it.
    pub fn empty() -> Self {
        Self {
            enemies: Vec::new(),
            items: Vec::new(),
            npcs: Vec::new(),
        }
    }

    pub fn with_enemy(mut self, kind: EnemyKind, position: Position) -> Self {
        self.enemies.push(EnemySpawn { kind, position });
        self
    }

    pub fn with_item(mut self, kind: ItemKind, amount: u32, position: Position) -> Self {
        self.items.push(ItemSpawn {
            kind,
            amount,
            position,
        });
        self
    }

    pub fn with_npc(mut self, name: impl Into<String>, kind: NpcKind, position: Position) -> Self {
        self.npcs.push(NpcSpawn {
            name: name.into(),
            kind,
            position,
        });
        self
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::empty()
            .with_enemy(EnemyKind::Goblin, Position::new(2, 2))
            .with_enemy(EnemyKind::Orc, Position::new(14, 3))
            .with_enemy(EnemyKind::Skeleton, Position::new(3, 14))
            .with_item(ItemKind::Gold, 50, Position::new(5, 5))
            .with_item(ItemKind::Potion, 20, Position::new(10, 10))
            .with_item(ItemKind::Treasure, 100, Position::new(13, 13))
            .with_npc("Merchant", NpcKind::Merchant, Position::new(8, 2))
            .with_npc("Guard", NpcKind::Guard, Position::new(2, 8))
    }
}
