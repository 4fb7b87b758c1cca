//! Level layout loader.
//!
//! Spawn tables are plain RON mirroring [`LevelLayout`]:
//!
//! ```ron
//! (
//!     enemies: [(kind: goblin, position: (x: 2, y: 2))],
//!     items: [(kind: gold, amount: 50, position: (x: 5, y: 5))],
//!     npcs: [(name: "Merchant", kind: merchant, position: (x: 8, y: 2))],
//! )
//! ```
//!
//! Omitted lists are empty.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, ensure};
use game_core::{GameConfig, LevelLayout, Position};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for level layouts from RON files.
pub struct LayoutLoader;

impl LayoutLoader {
    /// Load a layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<LevelLayout> {
        let content = read_file(path)?;
        let layout = Self::parse(&content)
            .with_context(|| format!("Invalid layout file {}", path.display()))?;

        debug!(
            target: "game_content::layout",
            path = %path.display(),
            enemies = layout.enemies.len(),
            items = layout.items.len(),
            npcs = layout.npcs.len(),
            "layout loaded"
        );
        Ok(layout)
    }

    pub fn parse(content: &str) -> LoadResult<LevelLayout> {
        ron::from_str(content).context("Failed to parse layout RON")
    }

    /// Checks a layout against the grid it will be spawned on.
    ///
    /// Every spawn must sit inside the border, blockers may not share a cell
    /// and nothing blocking may start on the player's cell.
    pub fn validate(layout: &LevelLayout, config: &GameConfig) -> LoadResult<()> {
        let interior = |position: Position| {
            (1..config.grid_width as i32 - 1).contains(&position.x)
                && (1..config.grid_height as i32 - 1).contains(&position.y)
        };

        let mut blockers = HashSet::new();
        let blocking = layout
            .enemies
            .iter()
            .map(|spawn| (spawn.kind.as_ref().to_owned(), spawn.position))
            .chain(
                layout
                    .npcs
                    .iter()
                    .map(|spawn| (spawn.name.clone(), spawn.position)),
            );
        for (label, position) in blocking {
            ensure!(interior(position), "{label} at {position} is outside the level");
            ensure!(
                position != config.player_spawn,
                "{label} at {position} blocks the player spawn"
            );
            ensure!(
                blockers.insert(position),
                "{label} at {position} shares a cell with another blocker"
            );
        }

        for item in &layout.items {
            ensure!(
                interior(item.position),
                "{} at {} is outside the level",
                item.kind,
                item.position
            );
        }
        Ok(())
    }
}
