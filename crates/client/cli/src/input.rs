//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::CardinalDirection;

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Step one cell; bumping an enemy attacks it, bumping an NPC talks.
    Move(CardinalDirection),
    /// Hand the turn to the enemies.
    EndTurn,
    DrinkPotion,
    /// Spike trap on the player's own cell.
    PlaceTrap,
    /// Keep an in-memory snapshot of the current state.
    QuickSave,
    /// Restore the in-memory snapshot.
    Restore,
    /// Descend: fresh level, same run.
    NextLevel,
    /// Start over from turn 1; the only way on after defeat.
    NewRun,
    Quit,
}

/// Converts a raw key event into a command. Releases and repeats of
/// non-movement keys are ignored.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Left | KeyCode::Char('h') => Command::Move(CardinalDirection::West),
        KeyCode::Right | KeyCode::Char('l') => Command::Move(CardinalDirection::East),
        KeyCode::Up | KeyCode::Char('k') => Command::Move(CardinalDirection::North),
        KeyCode::Down | KeyCode::Char('j') => Command::Move(CardinalDirection::South),

        KeyCode::Char('e') | KeyCode::Char(' ') => Command::EndTurn,
        KeyCode::Char('p') => Command::DrinkPotion,
        KeyCode::Char('t') => Command::PlaceTrap,

        KeyCode::Char('s') => Command::QuickSave,
        KeyCode::Char('r') => Command::Restore,
        KeyCode::Char('>') => Command::NextLevel,
        KeyCode::Char('n') => Command::NewRun,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };

    if key.kind == KeyEventKind::Repeat && !matches!(command, Command::Move(_)) {
        return None;
    }
    Some(command)
}
