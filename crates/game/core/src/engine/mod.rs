//! Turn controller and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative owner of [`GameState`]. Hosts issue
//! commands through it, read the state back through [`GameEngine::state`],
//! and never mutate the state directly.

mod errors;
mod level;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use turns::{EnemyAction, EnemyTurn, TurnReport};

use tracing::{info, warn};

use crate::action::{
    Action, ActionResult, ActionTransition, AttackAction, AttackOutcome, MoveAction, MoveOutcome,
    PlaceTrapAction, PlaceTrapOutcome, UseItemAction, UseItemOutcome,
};
use crate::config::GameConfig;
use crate::env::{GameEnv, LevelLayout, PcgRng, RngOracle};
use crate::error::GameError;
use crate::render::{Surface, render};
use crate::snapshot::{Snapshot, SnapshotError};
use crate::state::{EntityId, GameState, InventoryKind, Position, StateError, TrapKind};

/// Game engine that owns the level and resolves every command against it.
///
/// All action mutations flow through the three-phase pipeline:
/// pre_validate → apply → post_validate
///
/// A failed action leaves the state exactly as it was, apart from the log
/// entry narrating the failure.
pub struct GameEngine {
    state: GameState,
    config: GameConfig,
    layout: LevelLayout,
    rng: Box<dyn RngOracle>,
}

impl GameEngine {
    /// Default rules, default layout and the PCG generator, ready to play.
    pub fn new(seed: u64) -> Result<Self, StateError> {
        Self::builder().seed(seed).build()
    }

    pub fn builder() -> GameEngineBuilder {
        GameEngineBuilder::default()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn is_defeated(&self) -> bool {
        self.state.turn.is_defeated()
    }

    /// Executes any player action.
    pub fn execute(&mut self, action: impl Into<Action>) -> Result<ActionResult, ExecuteError> {
        match action.into() {
            Action::Move(transition) => self
                .run(&transition, ExecuteError::Move)
                .map(ActionResult::Move),
            Action::Attack(transition) => self
                .run(&transition, ExecuteError::Attack)
                .map(ActionResult::Attack),
            Action::UseItem(transition) => self
                .run(&transition, ExecuteError::UseItem)
                .map(ActionResult::UseItem),
            Action::PlaceTrap(transition) => self
                .run(&transition, ExecuteError::PlaceTrap)
                .map(ActionResult::PlaceTrap),
        }
    }

    /// Moves the player one cell, attacking or talking when the cell is taken.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> Result<MoveOutcome, ExecuteError> {
        self.run(&MoveAction::new(dx, dy), ExecuteError::Move)
    }

    /// Resolves one exchange against `target`.
    pub fn attack(&mut self, target: EntityId) -> Result<AttackOutcome, ExecuteError> {
        self.run(&AttackAction::new(target), ExecuteError::Attack)
    }

    pub fn use_item(&mut self, kind: InventoryKind) -> Result<UseItemOutcome, ExecuteError> {
        self.run(&UseItemAction::new(kind), ExecuteError::UseItem)
    }

    pub fn place_trap(
        &mut self,
        position: Position,
        kind: TrapKind,
    ) -> Result<PlaceTrapOutcome, ExecuteError> {
        self.run(&PlaceTrapAction::new(position, kind), ExecuteError::PlaceTrap)
    }

    /// Draws the current state onto `surface`. Never mutates the engine.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render(&self.state, surface);
    }

    /// Captures the full mutable state.
    pub fn export_state(&self) -> Snapshot {
        let snapshot = Snapshot::capture(&self.state);
        info!(
            target: "game_core::engine",
            turn = snapshot.turn,
            enemies = snapshot.enemies.len(),
            "state exported"
        );
        snapshot
    }

    /// Replaces the state with `snapshot` after validating it.
    ///
    /// A rejected snapshot leaves the engine untouched. Accepted even after
    /// defeat, since it replaces the run instead of advancing it.
    pub fn import_state(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        match snapshot.into_state() {
            Ok(state) => {
                info!(
                    target: "game_core::engine",
                    turn = state.turn.turn,
                    phase = %state.turn.phase,
                    "state imported"
                );
                self.state = state;
                Ok(())
            }
            Err(error) => {
                warn!(
                    target: "game_core::engine",
                    error = %error,
                    code = error.error_code(),
                    "snapshot rejected"
                );
                Err(error)
            }
        }
    }

    /// Runs one transition with the defeat guard, rollback and narration.
    fn run<T>(
        &mut self,
        action: &T,
        wrap: fn(TransitionPhaseError<T::Error>) -> ExecuteError,
    ) -> Result<T::Result, ExecuteError>
    where
        T: ActionTransition,
    {
        self.ensure_active()?;

        // The log is append-only, so rollback only needs its length.
        let log_len = self.state.log.len();
        let log = std::mem::take(&mut self.state.log);
        let before = self.state.clone();
        self.state.log = log;

        let env = GameEnv::new(&self.config, self.rng.as_ref());
        match transition::drive_transition(action, &mut self.state, &env) {
            Ok(result) => Ok(result),
            Err(failure) => {
                let mut log = std::mem::replace(&mut self.state, before).log;
                log.truncate(log_len);
                self.state.log = log;
                Err(self.reject(wrap(failure)))
            }
        }
    }

    fn ensure_active(&mut self) -> Result<(), ExecuteError> {
        if self.is_defeated() {
            return Err(self.reject(ExecuteError::Defeated));
        }
        Ok(())
    }

    fn reject(&mut self, error: ExecuteError) -> ExecuteError {
        warn!(
            target: "game_core::engine",
            error = %error,
            code = error.error_code(),
            severity = error.severity().as_str(),
            phase = error.phase().map(|phase| phase.as_str()),
            "action rejected"
        );
        self.state
            .log
            .push(error.log_message(), error.log_category());
        error
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Configures a [`GameEngine`]. Unset parts fall back to the defaults.
#[derive(Default)]
pub struct GameEngineBuilder {
    config: Option<GameConfig>,
    layout: Option<LevelLayout>,
    rng: Option<Box<dyn RngOracle>>,
    seed: u64,
}

impl GameEngineBuilder {
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn layout(mut self, layout: LevelLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Replaces the random source, e.g. with a scripted one in tests.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the engine and initializes the first level.
    pub fn build(self) -> Result<GameEngine, StateError> {
        let config = self.config.unwrap_or_default();
        let state = GameState::new(&config, self.seed);
        let mut engine = GameEngine {
            state,
            config,
            layout: self.layout.unwrap_or_default(),
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
        };
        engine.new_run()?;
        Ok(engine)
    }
}
