pub mod common;
pub mod entities;
pub mod grid;
pub mod log;
pub mod player;
pub mod turn;
pub mod world;

// Re-export common types
pub use common::{EntityId, Position, ResourceMeter};

// Re-export entity registry types
pub use entities::{
    EnemyState, EntitiesState, ItemKind, ItemState, NpcKind, NpcState, TrapKind, TrapState,
};

// Re-export grid types
pub use grid::{Grid, TileKind};

// Re-export message log
pub use log::{MessageCategory, MessageEntry, MessageLog};

// Re-export player types
pub use player::{InventoryKind, InventorySlot, InventoryState, PlayerState};

// Re-export turn state
pub use turn::{TurnPhase, TurnState};

// Re-export world types
pub use world::{Occupant, OccupancyConflict, OccupantSlots, TileMap};
