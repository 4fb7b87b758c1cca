//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the grid, the player,
//! the entity registry, turn bookkeeping and the message log. Hosts read this
//! state through [`crate::GameEngine::state`] but mutate it exclusively
//! through the engine.
pub mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    EnemyState, EntitiesState, EntityId, Grid, InventoryKind, InventorySlot, InventoryState,
    ItemKind, ItemState, MessageCategory, MessageEntry, MessageLog, NpcKind, NpcState, Occupant,
    OccupancyConflict, OccupantSlots, PlayerState, Position, ResourceMeter, TileKind, TileMap,
    TrapKind, TrapState, TurnPhase, TurnState,
};

use crate::config::GameConfig;
use crate::env::{EnemyKind, RollContext, compute_seed};

/// Canonical snapshot of the mutable simulation state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Combined with `turn.nonce` to generate a unique seed for each roll.
    pub game_seed: u64,

    /// Sequential entity ID allocator (monotonically increasing, never reused).
    next_entity_id: u32,

    pub turn: TurnState,
    pub grid: Grid,
    pub player: PlayerState,
    /// Enemies, ground items, NPCs and traps.
    pub entities: EntitiesState,
    /// Position index over `entities`; kept in sync by the spawn/move helpers.
    pub occupancy: TileMap,
    pub log: MessageLog,
}

impl GameState {
    /// Creates an empty level: walled room, fresh player, no entities.
    pub fn new(config: &GameConfig, game_seed: u64) -> Self {
        Self {
            game_seed,
            next_entity_id: EntityId::FIRST.0,
            turn: TurnState::new(),
            grid: Grid::walled(config.grid_width, config.grid_height),
            player: PlayerState::from_config(config),
            entities: EntitiesState::empty(),
            occupancy: TileMap::default(),
            log: MessageLog::new(),
        }
    }

    /// Reassembles a state from already-validated parts and rebuilds the
    /// occupancy index.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        game_seed: u64,
        next_entity_id: u32,
        turn: TurnState,
        grid: Grid,
        player: PlayerState,
        entities: EntitiesState,
        log: MessageLog,
    ) -> Result<Self, StateError> {
        let mut state = Self {
            game_seed,
            next_entity_id,
            turn,
            grid,
            player,
            entities,
            occupancy: TileMap::default(),
            log,
        };
        state.rebuild_occupancy()?;
        Ok(state)
    }

    /// Keeps the random stream, id allocator and message log of `previous`
    /// so a new run continues the same random stream and history.
    pub(crate) fn carry_over(&mut self, previous: &GameState) {
        self.turn.nonce = previous.turn.nonce;
        self.next_entity_id = previous.next_entity_id;
        self.log = previous.log.clone();
    }

    pub fn next_entity_id(&self) -> u32 {
        self.next_entity_id
    }

    /// Allocates a new unique EntityId.
    pub fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let id = EntityId(self.next_entity_id.max(EntityId::FIRST.0));
        self.next_entity_id = id.0.checked_add(1).ok_or(StateError::EntityIdOverflow {
            current: id.0,
        })?;
        Ok(id)
    }

    /// Derives the seed for the next random draw and advances the roll nonce.
    ///
    pub fn next_seed(&mut self, actor: EntityId, context: RollContext) -> u64 {
        let seed = compute_seed(self.game_seed, self.turn.nonce, actor.0, context.as_u32());
        self.turn.nonce += 1;
        seed
    }

    // ------------------------------------------------------------------------
    // Spawning
    // ------------------------------------------------------------------------

    pub fn spawn_enemy(
        &mut self,
        kind: EnemyKind,
        position: Position,
    ) -> Result<EntityId, StateError> {
        self.ensure_not_player(position)?;
        let id = self.allocate_entity_id()?;
        self.occupy(position, Occupant::Enemy(id))?;
        self.entities
            .enemies
            .insert(id, EnemyState::from_template(id, kind, position));
        Ok(id)
    }

    pub fn spawn_item(
        &mut self,
        kind: ItemKind,
        amount: u32,
        position: Position,
    ) -> Result<EntityId, StateError> {
        let id = self.allocate_entity_id()?;
        self.occupy(position, Occupant::Item(id))?;
        self.entities
            .items
            .insert(id, ItemState::new(id, position, kind, amount));
        Ok(id)
    }

    pub fn spawn_npc(
        &mut self,
        name: impl Into<String>,
        kind: NpcKind,
        position: Position,
    ) -> Result<EntityId, StateError> {
        self.ensure_not_player(position)?;
        let id = self.allocate_entity_id()?;
        self.occupy(position, Occupant::Npc(id))?;
        self.entities
            .npcs
            .insert(id, NpcState::new(id, position, name, kind));
        Ok(id)
    }

    /// Registers a trap. Traps are not part of the occupancy index and may
    /// share any cell.
    pub fn add_trap(
        &mut self,
        kind: TrapKind,
        position: Position,
        damage: u32,
    ) -> Result<EntityId, StateError> {
        let id = self.allocate_entity_id()?;
        self.entities
            .traps
            .insert(id, TrapState::new(id, position, kind, damage));
        Ok(id)
    }

    // ------------------------------------------------------------------------
    // Removal and movement
    // ------------------------------------------------------------------------

    /// Removes an enemy from the registry and the index. Returns `None` if it
    /// was already gone.
    pub fn remove_enemy(&mut self, id: EntityId) -> Option<EnemyState> {
        let enemy = self.entities.enemies.remove(&id)?;
        self.occupancy
            .remove_occupant(&enemy.position, Occupant::Enemy(id));
        Some(enemy)
    }

    /// Picks an item up off the ground.
    pub fn take_item(&mut self, id: EntityId) -> Option<ItemState> {
        let item = self.entities.items.remove(&id)?;
        self.occupancy
            .remove_occupant(&item.position, Occupant::Item(id));
        Some(item)
    }

    pub fn move_enemy(&mut self, id: EntityId, destination: Position) -> Result<(), StateError> {
        self.ensure_not_player(destination)?;
        let origin = self
            .entities
            .enemy(id)
            .map(|enemy| enemy.position)
            .ok_or(StateError::EntityNotFound(id))?;

        self.occupancy
            .relocate(origin, destination, Occupant::Enemy(id))
            .map_err(|conflict| conflict_error(destination, conflict))?;

        if let Some(enemy) = self.entities.enemy_mut(id) {
            enemy.position = destination;
        }
        Ok(())
    }

    /// Drops every enemy, item, NPC and trap.
    pub fn clear_entities(&mut self) {
        self.entities = EntitiesState::empty();
        self.occupancy.clear();
    }

    /// Recomputes the occupancy index from the registry.
    pub fn rebuild_occupancy(&mut self) -> Result<(), StateError> {
        let mut occupancy = TileMap::default();
        let enemies = self
            .entities
            .enemies
            .values()
            .map(|enemy| (enemy.position, Occupant::Enemy(enemy.id)));
        let npcs = self
            .entities
            .npcs
            .values()
            .map(|npc| (npc.position, Occupant::Npc(npc.id)));
        let items = self
            .entities
            .items
            .values()
            .map(|item| (item.position, Occupant::Item(item.id)));

        for (position, occupant) in enemies.chain(npcs).chain(items) {
            if occupant.is_blocking() {
                self.ensure_not_player(position)?;
            }
            occupancy
                .add_occupant(position, occupant)
                .map_err(|conflict| conflict_error(position, conflict))?;
        }

        self.occupancy = occupancy;
        Ok(())
    }

    fn occupy(&mut self, position: Position, occupant: Occupant) -> Result<(), StateError> {
        self.occupancy
            .add_occupant(position, occupant)
            .map_err(|conflict| conflict_error(position, conflict))
    }

    fn ensure_not_player(&self, position: Position) -> Result<(), StateError> {
        if position == self.player.position {
            return Err(StateError::PositionOccupied {
                position,
                occupant: EntityId::PLAYER,
            });
        }
        Ok(())
    }
}

fn conflict_error(position: Position, conflict: OccupancyConflict) -> StateError {
    match conflict {
        OccupancyConflict::Blocked { occupant } => StateError::PositionOccupied {
            position,
            occupant: occupant.id(),
        },
        OccupancyConflict::Full => StateError::TileFull { position },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(&GameConfig::default(), 7)
    }

    #[test]
    fn ids_are_monotonic_across_collections() {
        let mut state = state();
        let goblin = state
            .spawn_enemy(EnemyKind::Goblin, Position::new(2, 2))
            .unwrap();
        let gold = state
            .spawn_item(ItemKind::Gold, 50, Position::new(5, 5))
            .unwrap();
        let trap = state
            .add_trap(TrapKind::Spike, Position::new(4, 4), 20)
            .unwrap();

        assert!(goblin < gold && gold < trap);
        assert_eq!(state.entities.max_id(), Some(trap));
        assert_eq!(state.next_entity_id(), trap.0 + 1);
    }

    #[test]
    fn blocking_spawn_on_player_is_rejected() {
        let mut state = state();
        let player = state.player.position;
        let result = state.spawn_enemy(EnemyKind::Orc, player);
        assert_eq!(
            result,
            Err(StateError::PositionOccupied {
                position: player,
                occupant: EntityId::PLAYER
            })
        );
        assert!(state.entities.enemies.is_empty());
    }

    #[test]
    fn move_and_remove_keep_index_in_sync() {
        let mut state = state();
        let id = state
            .spawn_enemy(EnemyKind::Skeleton, Position::new(3, 3))
            .unwrap();

        state.move_enemy(id, Position::new(4, 4)).unwrap();
        assert_eq!(state.occupancy.enemy_at(&Position::new(3, 3)), None);
        assert_eq!(state.occupancy.enemy_at(&Position::new(4, 4)), Some(id));

        let removed = state.remove_enemy(id).unwrap();
        assert_eq!(removed.position, Position::new(4, 4));
        assert!(state.occupancy.occupancy().is_empty());
        assert!(state.remove_enemy(id).is_none());
    }

    #[test]
    fn next_seed_advances_nonce() {
        let mut state = state();
        let first = state.next_seed(EntityId::PLAYER, RollContext::PlayerDamage);
        let second = state.next_seed(EntityId::PLAYER, RollContext::PlayerDamage);
        assert_ne!(first, second);
        assert_eq!(state.turn.nonce, 2);
    }
}
