use tracing::info;

use crate::env::{EnemySpawn, ItemSpawn, NpcSpawn, RollContext};
use crate::state::{EntityId, GameState, Grid, MessageCategory, StateError};

use super::{ExecuteError, GameEngine};

impl GameEngine {
    /// Regenerates the walls and respawns the layout around the current run.
    ///
    /// The player keeps health, progression, gold and inventory and returns
    /// to the spawn cell. The turn counter, placed traps and the message log
    /// carry over. Refused once the player has been defeated; use
    /// [`GameEngine::new_run`] instead. On error the engine keeps its
    /// previous state.
    pub fn initialize_level(&mut self) -> Result<(), ExecuteError> {
        self.ensure_active()?;

        let mut next = self.state.clone();
        let traps = std::mem::take(&mut next.entities.traps);
        next.clear_entities();
        next.entities.traps = traps;
        next.player.position = self.config.player_spawn;

        match self.populate(&mut next) {
            Ok(()) => {
                self.state = next;
                Ok(())
            }
            Err(error) => Err(self.reject(ExecuteError::Level(error))),
        }
    }

    /// Starts over: fresh player, turn 1, a new level and no traps.
    ///
    /// Accepted in any phase, including after defeat. The message log, the
    /// roll nonce and the id allocator carry over so the random stream keeps
    /// advancing. On error the engine keeps its previous state.
    pub fn new_run(&mut self) -> Result<(), StateError> {
        let mut next = GameState::new(&self.config, self.state.game_seed);
        next.carry_over(&self.state);
        self.populate(&mut next)?;
        info!(target: "game_core::engine", "new run started");
        self.state = next;
        Ok(())
    }

    /// Generates walls into `next`, spawns the layout and logs the welcome.
    fn populate(&self, next: &mut GameState) -> Result<(), StateError> {
        let config = &self.config;
        let rng = self.rng.as_ref();

        let spawn = config.player_spawn;
        let chance = config.wall_chance_percent;
        let grid = Grid::generate(config.grid_width, config.grid_height, |position| {
            // No draws at all for a wall-free config.
            if position == spawn || chance == 0 {
                return false;
            }
            let seed = next.next_seed(EntityId::PLAYER, RollContext::Wall);
            rng.roll_d100(seed) <= chance
        });
        next.grid = grid;

        for EnemySpawn { kind, position } in &self.layout.enemies {
            next.spawn_enemy(*kind, *position)?;
        }
        for ItemSpawn {
            kind,
            amount,
            position,
        } in &self.layout.items
        {
            next.spawn_item(*kind, *amount, *position)?;
        }
        for NpcSpawn {
            name,
            kind,
            position,
        } in &self.layout.npcs
        {
            next.spawn_npc(name.clone(), *kind, *position)?;
        }

        let walls = next
            .grid
            .positions()
            .filter(|position| !next.grid.is_border(*position) && !next.grid.is_walkable(*position))
            .count();
        info!(
            target: "game_core::engine",
            turn = next.turn.turn,
            width = config.grid_width,
            height = config.grid_height,
            interior_walls = walls,
            enemies = next.entities.enemies.len(),
            "level initialized"
        );

        next.log
            .push("Welcome to the Dungeon!", MessageCategory::Action);
        next.log
            .push("Use arrow keys or buttons to move.", MessageCategory::Info);
        Ok(())
    }
}
