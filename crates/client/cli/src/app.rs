//! Terminal application: owns the engine and turns commands into engine calls.
use anyhow::Result;
use crossterm::event::{self, Event};
use game_core::{ExecuteError, GameEngine, InventoryKind, Snapshot, TrapKind};
use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::input::{Command, command_for};
use crate::presentation::{terminal::Tui, ui};

/// Whether the event loop keeps going after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    engine: GameEngine,
    ui: UiConfig,
    quick_save: Option<Snapshot>,
    /// Host-side notice shown in the footer; the engine log only narrates play.
    status: Option<String>,
}

impl App {
    pub fn new(engine: GameEngine, ui: UiConfig) -> Self {
        Self {
            engine,
            ui,
            quick_save: None,
            status: None,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn ui(&self) -> &UiConfig {
        &self.ui
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn has_quick_save(&self) -> bool {
        self.quick_save.is_some()
    }

    /// Draws, waits for a key, applies it. Returns when the player quits.
    pub fn run(mut self, terminal: &mut Tui) -> Result<()> {
        loop {
            terminal.draw(|frame| ui::draw(frame, &self))?;

            let Event::Key(key) = event::read()? else {
                continue;
            };
            let Some(command) = command_for(key) else {
                continue;
            };
            if self.handle(command) == Flow::Quit {
                info!("quit requested");
                return Ok(());
            }
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        debug!(?command, "command");
        self.status = None;

        match command {
            Command::Move(direction) => {
                let (dx, dy) = direction.delta();
                report(self.engine.move_player(dx, dy));
            }
            Command::EndTurn => report(self.engine.end_turn()),
            Command::DrinkPotion => report(self.engine.use_item(InventoryKind::Potion)),
            Command::PlaceTrap => {
                let position = self.engine.state().player.position;
                report(self.engine.place_trap(position, TrapKind::Spike));
            }
            Command::QuickSave => {
                let snapshot = self.engine.export_state();
                self.status = Some(format!("Quick-saved turn {}.", snapshot.turn));
                self.quick_save = Some(snapshot);
            }
            Command::Restore => self.restore(),
            Command::NextLevel => report(self.engine.initialize_level()),
            Command::NewRun => {
                if let Err(error) = self.engine.new_run() {
                    warn!(%error, "new run failed");
                    self.status = Some(format!("Could not start a new run: {error}"));
                }
            }
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn restore(&mut self) {
        let Some(snapshot) = self.quick_save.clone() else {
            self.status = Some("Nothing to restore.".to_owned());
            return;
        };
        let turn = snapshot.turn;
        self.status = Some(match self.engine.import_state(snapshot) {
            Ok(()) => format!("Restored turn {turn}."),
            Err(error) => format!("Quick-save rejected: {error}"),
        });
    }
}

/// Failed actions are already narrated in the game log.
fn report<T>(result: Result<T, ExecuteError>) {
    if let Err(error) = result {
        debug!(%error, "action failed");
    }
}
