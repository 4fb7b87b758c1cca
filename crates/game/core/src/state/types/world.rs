use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::{EntityId, Position};

/// Reference to an entity stored in the occupancy index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    Enemy(EntityId),
    Item(EntityId),
    Npc(EntityId),
}

impl Occupant {
    pub fn id(self) -> EntityId {
        match self {
            Occupant::Enemy(id) | Occupant::Item(id) | Occupant::Npc(id) => id,
        }
    }

    /// Enemies and NPCs block movement; items do not.
    pub fn is_blocking(self) -> bool {
        matches!(self, Occupant::Enemy(_) | Occupant::Npc(_))
    }
}

pub type OccupantSlots = ArrayVec<Occupant, { GameConfig::MAX_OCCUPANTS_PER_TILE }>;

/// Why an occupant could not be added to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupancyConflict {
    /// A second enemy/NPC was placed on a cell that already has one.
    Blocked { occupant: Occupant },
    /// The tile already holds the maximum number of occupants.
    Full,
}

/// Position-indexed lookup of enemies, items and NPCs.
///
/// # Invariants
///
/// - at most one blocking occupant per position
/// - every entry mirrors an entity in [`super::EntitiesState`] at that position
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TileMap {
    occupancy: BTreeMap<Position, OccupantSlots>,
}

impl TileMap {
    pub fn occupancy(&self) -> &BTreeMap<Position, OccupantSlots> {
        &self.occupancy
    }

    pub fn occupants(&self, position: &Position) -> Option<&OccupantSlots> {
        self.occupancy.get(position)
    }

    /// The enemy or NPC standing on `position`, if any.
    pub fn blocker(&self, position: &Position) -> Option<Occupant> {
        self.occupants(position)?
            .iter()
            .copied()
            .find(|occupant| occupant.is_blocking())
    }

    pub fn enemy_at(&self, position: &Position) -> Option<EntityId> {
        self.find(position, |occupant| match occupant {
            Occupant::Enemy(id) => Some(id),
            _ => None,
        })
    }

    pub fn item_at(&self, position: &Position) -> Option<EntityId> {
        self.find(position, |occupant| match occupant {
            Occupant::Item(id) => Some(id),
            _ => None,
        })
    }

    pub fn npc_at(&self, position: &Position) -> Option<EntityId> {
        self.find(position, |occupant| match occupant {
            Occupant::Npc(id) => Some(id),
            _ => None,
        })
    }

    pub fn add_occupant(
        &mut self,
        position: Position,
        occupant: Occupant,
    ) -> Result<(), OccupancyConflict> {
        let slot = self.occupancy.entry(position).or_default();
        if slot.contains(&occupant) {
            return Ok(());
        }
        if occupant.is_blocking() {
            if let Some(existing) = slot.iter().copied().find(|other| other.is_blocking()) {
                return Err(OccupancyConflict::Blocked { occupant: existing });
            }
        }
        slot.try_push(occupant).map_err(|_| OccupancyConflict::Full)
    }

    pub fn remove_occupant(&mut self, position: &Position, occupant: Occupant) -> bool {
        let Some(slot) = self.occupancy.get_mut(position) else {
            return false;
        };
        let Some(index) = slot.iter().position(|existing| *existing == occupant) else {
            return false;
        };
        // Keep insertion order so the oldest item on a cell is picked up first.
        slot.remove(index);
        if slot.is_empty() {
            self.occupancy.remove(position);
        }
        true
    }

    /// Moves an occupant between cells, restoring the origin on conflict.
    pub fn relocate(
        &mut self,
        from: Position,
        to: Position,
        occupant: Occupant,
    ) -> Result<(), OccupancyConflict> {
        self.remove_occupant(&from, occupant);
        if let Err(conflict) = self.add_occupant(to, occupant) {
            let _ = self.add_occupant(from, occupant);
            return Err(conflict);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.occupancy.clear();
    }

    fn find(
        &self,
        position: &Position,
        select: impl Fn(Occupant) -> Option<EntityId>,
    ) -> Option<EntityId> {
        self.occupants(position)?.iter().copied().find_map(select)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_blocker_per_cell() {
        let mut map = TileMap::default();
        let cell = Position::new(3, 3);

        map.add_occupant(cell, Occupant::Enemy(EntityId(1))).unwrap();
        map.add_occupant(cell, Occupant::Item(EntityId(2))).unwrap();

        let conflict = map.add_occupant(cell, Occupant::Npc(EntityId(3)));
        assert_eq!(
            conflict,
            Err(OccupancyConflict::Blocked {
                occupant: Occupant::Enemy(EntityId(1))
            })
        );
        assert_eq!(map.enemy_at(&cell), Some(EntityId(1)));
        assert_eq!(map.item_at(&cell), Some(EntityId(2)));
        assert_eq!(map.npc_at(&cell), None);
    }

    #[test]
    fn removing_last_occupant_drops_the_entry() {
        let mut map = TileMap::default();
        let cell = Position::new(1, 1);
        map.add_occupant(cell, Occupant::Item(EntityId(4))).unwrap();

        assert!(map.remove_occupant(&cell, Occupant::Item(EntityId(4))));
        assert!(map.occupants(&cell).is_none());
        assert!(!map.remove_occupant(&cell, Occupant::Item(EntityId(4))));
    }

    #[test]
    fn relocate_rolls_back_on_conflict() {
        let mut map = TileMap::default();
        let from = Position::new(1, 1);
        let to = Position::new(2, 1);
        map.add_occupant(from, Occupant::Enemy(EntityId(1))).unwrap();
        map.add_occupant(to, Occupant::Npc(EntityId(2))).unwrap();

        assert!(map.relocate(from, to, Occupant::Enemy(EntityId(1))).is_err());
        assert_eq!(map.enemy_at(&from), Some(EntityId(1)));
        assert_eq!(map.npc_at(&to), Some(EntityId(2)));
    }
}
