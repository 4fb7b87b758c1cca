//! Greedy single-step pursuit.
//!
//! Each enemy steps toward the player along both axes at once, attacks when
//! that step would land on the player, and otherwise waits. There is no
//! obstacle avoidance; an enemy can stall behind a wall forever.

use crate::state::{EnemyState, GameState, Position};

/// What an enemy will do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyIntent {
    /// The greedy step lands on the player.
    Attack,
    Step(Position),
    /// The greedy step is a wall, off the grid, or held by another blocker.
    Hold,
}

/// Plans `enemy`'s move without mutating anything.
pub fn plan_step(state: &GameState, enemy: &EnemyState) -> EnemyIntent {
    let player = state.player.position;
    let dx = (player.x - enemy.position.x).signum();
    let dy = (player.y - enemy.position.y).signum();
    let candidate = enemy.position.offset(dx, dy);

    if candidate == player {
        return EnemyIntent::Attack;
    }
    if candidate == enemy.position
        || !state.grid.is_walkable(candidate)
        || state.occupancy.blocker(&candidate).is_some()
    {
        return EnemyIntent::Hold;
    }
    EnemyIntent::Step(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::EnemyKind;
    use crate::state::{EntityId, ItemKind, NpcKind, TileKind};

    fn open_state() -> GameState {
        GameState::new(&GameConfig::default(), 0)
    }

    fn plan(state: &GameState, id: EntityId) -> EnemyIntent {
        plan_step(state, state.entities.enemy(id).unwrap())
    }

    #[test]
    fn steps_diagonally_toward_player() {
        let mut state = open_state();
        let id = state.spawn_enemy(EnemyKind::Goblin, Position::new(2, 2)).unwrap();
        assert_eq!(plan(&state, id), EnemyIntent::Step(Position::new(3, 3)));
    }

    #[test]
    fn adjacent_enemy_attacks() {
        let mut state = open_state();
        let id = state.spawn_enemy(EnemyKind::Orc, Position::new(9, 7)).unwrap();
        assert_eq!(plan(&state, id), EnemyIntent::Attack);
    }

    #[test]
    fn walls_and_blockers_stall_pursuit() {
        let mut state = open_state();
        let id = state.spawn_enemy(EnemyKind::Skeleton, Position::new(2, 8)).unwrap();

        state.grid.set(Position::new(3, 8), TileKind::Wall);
        assert_eq!(plan(&state, id), EnemyIntent::Hold);

        state.grid.set(Position::new(3, 8), TileKind::Floor);
        state
            .spawn_npc("Guard", NpcKind::Guard, Position::new(3, 8))
            .unwrap();
        assert_eq!(plan(&state, id), EnemyIntent::Hold);
    }

    #[test]
    fn items_do_not_block() {
        let mut state = open_state();
        let id = state.spawn_enemy(EnemyKind::Goblin, Position::new(8, 2)).unwrap();
        state
            .spawn_item(ItemKind::Gold, 10, Position::new(8, 3))
            .unwrap();
        assert_eq!(plan(&state, id), EnemyIntent::Step(Position::new(8, 3)));
    }
}
