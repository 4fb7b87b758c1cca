//! Deterministic rules for a turn-based dungeon crawler.
//!
//! `game-core` owns the grid, the entity registry, movement and combat
//! resolution, enemy AI and the message log. All state mutation flows through
//! [`engine::GameEngine`]; hosts read the state back and draw it through the
//! [`render`] hook. The crate performs no I/O.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod progression;
pub mod render;
pub mod snapshot;
pub mod state;

pub use action::{
    Action, ActionResult, ActionTransition, AttackAction, AttackError, AttackOutcome,
    AttackResolution, CardinalDirection, MoveAction, MoveError, MoveOutcome, Pickup,
    PlaceTrapAction, PlaceTrapError, PlaceTrapOutcome, UseItemAction, UseItemError,
    UseItemOutcome,
};
pub use combat::StrikeReport;
pub use config::{GameConfig, PlayerStart};
pub use engine::{
    EnemyAction, EnemyTurn, ExecuteError, GameEngine, GameEngineBuilder, TransitionPhase,
    TransitionPhaseError, TurnReport,
};
pub use env::{
    EnemyKind, EnemySpawn, EnemyTemplate, GameEnv, ItemSpawn, LevelLayout, NpcSpawn, PcgRng,
    RngOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use progression::LevelProgress;
pub use render::{Glyph, Surface, TextSurface};
pub use snapshot::{Snapshot, SnapshotError};
pub use state::{
    EnemyState, EntitiesState, EntityId, GameState, Grid, InventoryKind, InventorySlot,
    InventoryState, ItemKind, ItemState, MessageCategory, MessageEntry, MessageLog, NpcKind,
    NpcState, PlayerState, Position, ResourceMeter, StateError, TileKind, TileMap, TrapKind,
    TrapState, TurnPhase, TurnState,
};
