//! Save and restore of the full mutable state.
//!
//! A [`Snapshot`] is a plain structure; hosts choose how to persist it (with
//! the `serde` feature any serde format works). Restoring validates the
//! structure first and fails fast instead of accepting partial data.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    EnemyState, EntitiesState, EntityId, GameState, Grid, ItemState, MessageLog, NpcState,
    PlayerState, Position, StateError, TrapState, TurnPhase, TurnState,
};

/// Serializable copy of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub turn: u64,
    pub phase: TurnPhase,
    pub game_seed: u64,
    pub nonce: u64,
    pub next_entity_id: u32,
    pub grid: Grid,
    pub player: PlayerState,
    pub enemies: Vec<EnemyState>,
    pub items: Vec<ItemState>,
    pub npcs: Vec<NpcState>,
    pub traps: Vec<TrapState>,
    pub log: MessageLog,
}

/// Structural problems that make a snapshot unusable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("turn counter must start at 1")]
    ZeroTurn,

    #[error("grid holds {actual} tiles but {width}x{height} needs {expected}")]
    GridSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("grid border is not fully walled")]
    OpenBorder,

    #[error("turns can only be saved between actions, not during {0}")]
    TransientPhase(TurnPhase),

    #[error("phase {phase} does not match player health {health}")]
    PhaseHealthMismatch { phase: TurnPhase, health: u32 },

    #[error("player position {position} is outside the grid")]
    PlayerOutOfBounds { position: Position },

    #[error("player stands on a wall at {position}")]
    PlayerOnWall { position: Position },

    #[error("player {meter} {current} exceeds maximum {maximum}")]
    MeterOverflow {
        meter: &'static str,
        current: u32,
        maximum: u32,
    },

    #[error("entity id {0} is reserved for the player")]
    ReservedEntityId(EntityId),

    #[error("entity id {0} appears more than once")]
    DuplicateEntityId(EntityId),

    #[error("entity ids in a collection must be ascending, found {id} after {previous}")]
    NonAscendingIds { previous: EntityId, id: EntityId },

    #[error("entity id {id} is not below the allocator position {next_entity_id}")]
    IdBeyondAllocator { id: EntityId, next_entity_id: u32 },

    #[error("entity {id} at {position} is outside the grid")]
    EntityOutOfBounds { id: EntityId, position: Position },

    #[error("enemy {0} has no health left")]
    DeadEnemy(EntityId),

    #[error("entity {id} blocks the player's cell {position}")]
    BlockerOnPlayer { id: EntityId, position: Position },

    #[error("two blocking entities share cell {position}")]
    StackedBlockers { position: Position },

    #[error("cell {position} holds too many entities")]
    TileFull { position: Position },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use SnapshotError::*;
        match self {
            ZeroTurn => "SNAPSHOT_ZERO_TURN",
            GridSizeMismatch { .. } => "SNAPSHOT_GRID_SIZE_MISMATCH",
            OpenBorder => "SNAPSHOT_OPEN_BORDER",
            TransientPhase(_) => "SNAPSHOT_TRANSIENT_PHASE",
            PhaseHealthMismatch { .. } => "SNAPSHOT_PHASE_HEALTH_MISMATCH",
            PlayerOutOfBounds { .. } => "SNAPSHOT_PLAYER_OUT_OF_BOUNDS",
            PlayerOnWall { .. } => "SNAPSHOT_PLAYER_ON_WALL",
            MeterOverflow { .. } => "SNAPSHOT_METER_OVERFLOW",
            ReservedEntityId(_) => "SNAPSHOT_RESERVED_ENTITY_ID",
            DuplicateEntityId(_) => "SNAPSHOT_DUPLICATE_ENTITY_ID",
            NonAscendingIds { .. } => "SNAPSHOT_NON_ASCENDING_IDS",
            IdBeyondAllocator { .. } => "SNAPSHOT_ID_BEYOND_ALLOCATOR",
            EntityOutOfBounds { .. } => "SNAPSHOT_ENTITY_OUT_OF_BOUNDS",
            DeadEnemy(_) => "SNAPSHOT_DEAD_ENEMY",
            BlockerOnPlayer { .. } => "SNAPSHOT_BLOCKER_ON_PLAYER",
            StackedBlockers { .. } => "SNAPSHOT_STACKED_BLOCKERS",
            TileFull { .. } => "SNAPSHOT_TILE_FULL",
        }
    }
}

impl Snapshot {
    /// Copies everything needed to resume `state` later.
    pub fn capture(state: &GameState) -> Self {
        let entities = &state.entities;
        Self {
            turn: state.turn.turn,
            phase: state.turn.phase,
            game_seed: state.game_seed,
            nonce: state.turn.nonce,
            next_entity_id: state.next_entity_id(),
            grid: state.grid.clone(),
            player: state.player.clone(),
            enemies: entities.enemies.values().cloned().collect(),
            items: entities.items.values().cloned().collect(),
            npcs: entities.npcs.values().cloned().collect(),
            traps: entities.traps.values().cloned().collect(),
            log: state.log.clone(),
        }
    }

    /// Checks every structural rule a restored state depends on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.turn == 0 {
            return Err(SnapshotError::ZeroTurn);
        }
        self.validate_phase()?;
        self.validate_grid()?;
        self.validate_player()?;
        self.validate_ids()?;

        let grid = &self.grid;
        let positioned = self
            .enemies
            .iter()
            .map(|enemy| (enemy.id, enemy.position))
            .chain(self.items.iter().map(|item| (item.id, item.position)))
            .chain(self.npcs.iter().map(|npc| (npc.id, npc.position)));
        for (id, position) in positioned {
            if !grid.contains(position) {
                return Err(SnapshotError::EntityOutOfBounds { id, position });
            }
        }

        if let Some(enemy) = self.enemies.iter().find(|enemy| !enemy.is_alive()) {
            return Err(SnapshotError::DeadEnemy(enemy.id));
        }
        Ok(())
    }

    /// Validates and converts into a live state with a rebuilt occupancy index.
    pub fn into_state(self) -> Result<GameState, SnapshotError> {
        self.validate()?;

        let player_position = self.player.position;
        let blocker_on_player = self
            .enemies
            .iter()
            .map(|enemy| (enemy.id, enemy.position))
            .chain(self.npcs.iter().map(|npc| (npc.id, npc.position)))
            .find(|(_, position)| *position == player_position);
        if let Some((id, position)) = blocker_on_player {
            return Err(SnapshotError::BlockerOnPlayer { id, position });
        }

        let entities = EntitiesState {
            enemies: keyed(self.enemies, |enemy| enemy.id),
            items: keyed(self.items, |item| item.id),
            npcs: keyed(self.npcs, |npc| npc.id),
            traps: keyed(self.traps, |trap| trap.id),
        };
        let turn = TurnState {
            turn: self.turn,
            phase: self.phase,
            nonce: self.nonce,
        };

        GameState::from_parts(
            self.game_seed,
            self.next_entity_id,
            turn,
            self.grid,
            self.player,
            entities,
            self.log,
        )
        .map_err(|error| match error {
            StateError::PositionOccupied { position, .. } => {
                SnapshotError::StackedBlockers { position }
            }
            StateError::TileFull { position } => SnapshotError::TileFull { position },
            StateError::EntityNotFound(id) => SnapshotError::DuplicateEntityId(id),
            StateError::EntityIdOverflow { current } => SnapshotError::IdBeyondAllocator {
                id: EntityId(current),
                next_entity_id: current,
            },
        })
    }

    fn validate_grid(&self) -> Result<(), SnapshotError> {
        let grid = &self.grid;
        let expected = grid.width() as usize * grid.height() as usize;
        let actual = grid.tiles().len();
        if expected != actual {
            return Err(SnapshotError::GridSizeMismatch {
                width: grid.width(),
                height: grid.height(),
                expected,
                actual,
            });
        }
        if !grid.has_walled_border() {
            return Err(SnapshotError::OpenBorder);
        }
        Ok(())
    }

    /// Only rest phases are saved, and defeat is exactly zero health.
    fn validate_phase(&self) -> Result<(), SnapshotError> {
        if self.phase == TurnPhase::Resolution {
            return Err(SnapshotError::TransientPhase(self.phase));
        }
        let health = self.player.health.current;
        if (health == 0) != (self.phase == TurnPhase::Defeated) {
            return Err(SnapshotError::PhaseHealthMismatch {
                phase: self.phase,
                health,
            });
        }
        Ok(())
    }

    fn validate_player(&self) -> Result<(), SnapshotError> {
        let player = &self.player;
        if !self.grid.contains(player.position) {
            return Err(SnapshotError::PlayerOutOfBounds {
                position: player.position,
            });
        }
        if !self.grid.is_walkable(player.position) {
            return Err(SnapshotError::PlayerOnWall {
                position: player.position,
            });
        }
        for (meter, value) in [("health", player.health), ("mana", player.mana)] {
            if value.current > value.maximum {
                return Err(SnapshotError::MeterOverflow {
                    meter,
                    current: value.current,
                    maximum: value.maximum,
                });
            }
        }
        Ok(())
    }

    fn validate_ids(&self) -> Result<(), SnapshotError> {
        let collections: [Vec<EntityId>; 4] = [
            self.enemies.iter().map(|enemy| enemy.id).collect(),
            self.items.iter().map(|item| item.id).collect(),
            self.npcs.iter().map(|npc| npc.id).collect(),
            self.traps.iter().map(|trap| trap.id).collect(),
        ];

        let mut seen = BTreeSet::new();
        for ids in &collections {
            for pair in ids.windows(2) {
                if pair[1] <= pair[0] {
                    return Err(if pair[1] == pair[0] {
                        SnapshotError::DuplicateEntityId(pair[1])
                    } else {
                        SnapshotError::NonAscendingIds {
                            previous: pair[0],
                            id: pair[1],
                        }
                    });
                }
            }
            for &id in ids {
                if id.is_player() {
                    return Err(SnapshotError::ReservedEntityId(id));
                }
                if id.0 >= self.next_entity_id {
                    return Err(SnapshotError::IdBeyondAllocator {
                        id,
                        next_entity_id: self.next_entity_id,
                    });
                }
                if !seen.insert(id) {
                    return Err(SnapshotError::DuplicateEntityId(id));
                }
            }
        }
        Ok(())
    }
}

fn keyed<T>(values: Vec<T>, id: impl Fn(&T) -> EntityId) -> BTreeMap<EntityId, T> {
    values.into_iter().map(|value| (id(&value), value)).collect()
}
