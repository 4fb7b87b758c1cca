use tracing::debug;

use crate::action::{ActionTransition, AttackAction, AttackError, AttackOutcome};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, GameState, ItemKind, MessageCategory, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("step ({dx}, {dy}) is not a single-cell move")]
    InvalidStep { dx: i32, dy: i32 },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is a wall")]
    Blocked { destination: Position },

    #[error("bump attack failed: {0}")]
    Attack(#[from] AttackError),

    #[error("item {item} missing from occupancy index at {position}")]
    OccupancyDesync { item: EntityId, position: Position },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidStep { .. } => ErrorSeverity::Validation,
            Self::OutOfBounds { .. } | Self::Blocked { .. } => ErrorSeverity::Recoverable,
            Self::Attack(error) => error.severity(),
            Self::OccupancyDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStep { .. } => "MOVE_INVALID_STEP",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Blocked { .. } => "MOVE_BLOCKED",
            Self::Attack(error) => error.error_code(),
            Self::OccupancyDesync { .. } => "MOVE_OCCUPANCY_DESYNC",
        }
    }
}

/// Single-step move of the player. Bumping into an enemy attacks it and
/// bumping into an NPC talks to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub dx: i32,
    pub dy: i32,
}

impl MoveAction {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Any of the eight neighbouring cells; the null step is rejected.
    pub fn is_single_step(&self) -> bool {
        (-1..=1).contains(&self.dx) && (-1..=1).contains(&self.dy) && (self.dx, self.dy) != (0, 0)
    }

    fn destination_from(&self, origin: Position) -> Position {
        origin.offset(self.dx, self.dy)
    }
}

impl From<CardinalDirection> for MoveAction {
    fn from(direction: CardinalDirection) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(dx, dy)
    }
}

/// Screen-oriented directions: row 0 is the top of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }
}

/// Item picked up while moving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pickup {
    pub item: EntityId,
    pub kind: ItemKind,
    pub amount: u32,
}

/// Which resolution branch a move took.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    /// The player stepped onto the cell, collecting whatever lay there.
    Moved {
        to: Position,
        pickup: Option<Pickup>,
    },
    /// An enemy stood on the cell; the player attacked instead of moving.
    Attacked(AttackOutcome),
    /// An NPC stood on the cell; the player stayed put. An item sharing the
    /// NPC's cell is still collected.
    Talked {
        npc: EntityId,
        pickup: Option<Pickup>,
    },
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if !self.is_single_step() {
            return Err(MoveError::InvalidStep {
                dx: self.dx,
                dy: self.dy,
            });
        }

        let destination = self.destination_from(state.player.position);
        if !state.grid.contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if !state.grid.is_walkable(destination) {
            return Err(MoveError::Blocked { destination });
        }

        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<MoveOutcome, MoveError> {
        let destination = self.destination_from(state.player.position);

        if let Some(enemy) = state.occupancy.enemy_at(&destination) {
            let attack = AttackAction::new(enemy);
            attack.pre_validate(state, env)?;
            let outcome = attack.apply(state, env)?;
            return Ok(MoveOutcome::Attacked(outcome));
        }

        let pickup = match state.occupancy.item_at(&destination) {
            Some(item) => Some(pick_up(state, item, destination)?),
            None => None,
        };

        if let Some(npc) = state.occupancy.npc_at(&destination) {
            let name = state
                .entities
                .npcs
                .get(&npc)
                .map(|npc| npc.name.clone())
                .unwrap_or_default();
            debug!(target: "game_core::action", npc = %npc, "player talks to npc");
            state
                .log
                .push(format!("You talk to {name}..."), MessageCategory::Action);
            return Ok(MoveOutcome::Talked { npc, pickup });
        }

        state.player.position = destination;
        debug!(target: "game_core::action", to = %destination, "player moved");
        state
            .log
            .push(format!("Moved to {destination}"), MessageCategory::Action);

        Ok(MoveOutcome::Moved {
            to: destination,
            pickup,
        })
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.occupancy.blocker(&state.player.position).is_some() {
            return Err(MoveError::Blocked {
                destination: state.player.position,
            });
        }
        Ok(())
    }
}

fn pick_up(state: &mut GameState, item: EntityId, position: Position) -> Result<Pickup, MoveError> {
    let item = state
        .take_item(item)
        .ok_or(MoveError::OccupancyDesync { item, position })?;

    let player = &mut state.player;
    let amount = item.amount;
    let message = match item.kind {
        ItemKind::Gold => {
            player.gold = player.gold.saturating_add(u64::from(amount));
            format!("+{amount} Gold!")
        }
        ItemKind::Potion => {
            player.health.restore(amount);
            format!("+{amount} HP!")
        }
        ItemKind::Treasure => {
            player.gold = player.gold.saturating_add(u64::from(amount));
            format!("Treasure found! +{amount} Gold!")
        }
    };
    debug!(target: "game_core::action", kind = %item.kind, amount, "item picked up");
    state.log.push(message, MessageCategory::Success);

    Ok(Pickup {
        item: item.id,
        kind: item.kind,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_accepts_neighbours_only() {
        assert!(MoveAction::new(1, 0).is_single_step());
        assert!(MoveAction::new(-1, 1).is_single_step());
        assert!(!MoveAction::new(0, 0).is_single_step());
        assert!(!MoveAction::new(2, 0).is_single_step());
    }

    #[test]
    fn north_points_up_the_screen() {
        assert_eq!(MoveAction::from(CardinalDirection::North), MoveAction::new(0, -1));
        assert_eq!(MoveAction::from(CardinalDirection::East), MoveAction::new(1, 0));
    }
}
