//! State management errors.
//!
//! Errors related to entity placement and the occupancy index.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors that occur while adding or moving entities.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// A blocking entity already stands on the cell.
    #[error("Position {position} is already occupied by entity {occupant}")]
    PositionOccupied {
        /// The position that is occupied.
        position: Position,
        /// The entity currently occupying the position.
        occupant: EntityId,
    },

    /// The occupancy slots for the cell are exhausted.
    #[error("Position {position} cannot hold more occupants")]
    TileFull { position: Position },

    /// The referenced entity does not exist.
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// The id allocator ran past `u32::MAX`.
    #[error("Entity id allocator exhausted at {current}")]
    EntityIdOverflow { current: u32 },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            PositionOccupied { .. } | TileFull { .. } => ErrorSeverity::Validation,
            // Callers only pass ids they just read from the registry.
            EntityNotFound(_) => ErrorSeverity::Internal,
            EntityIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            TileFull { .. } => "STATE_TILE_FULL",
            EntityNotFound(_) => "STATE_ENTITY_NOT_FOUND",
            EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
        }
    }
}
