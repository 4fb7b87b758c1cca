//! Content factory for building an engine from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{GameConfig, GameEngine, LevelLayout};
use tracing::info;

use crate::loaders::{ConfigLoader, LayoutLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── layout.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const LAYOUT_FILE: &'static str = "layout.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Load the level layout from `layout.ron`, checked against `config`.
    pub fn load_layout(&self, config: &GameConfig) -> LoadResult<LevelLayout> {
        let path = self.data_dir.join(Self::LAYOUT_FILE);
        let layout = LayoutLoader::load(&path)?;
        LayoutLoader::validate(&layout, config)
            .with_context(|| format!("Layout {} does not fit the grid", path.display()))?;
        Ok(layout)
    }

    /// Builds a ready-to-play engine from both files.
    pub fn build_engine(&self, seed: u64) -> LoadResult<GameEngine> {
        let config = self.load_config()?;
        let layout = self.load_layout(&config)?;

        let engine = GameEngine::builder()
            .config(config)
            .layout(layout)
            .seed(seed)
            .build()
            .context("Failed to initialize the first level")?;

        info!(
            target: "game_content::factory",
            data_dir = %self.data_dir.display(),
            seed,
            "engine built from content"
        );
        Ok(engine)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
