//! Game configuration loader.

use std::path::Path;

use anyhow::{Context, ensure};
use game_core::GameConfig;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Every field of [`GameConfig`] has a default, so a file only needs the
/// values it changes:
///
/// ```toml
/// wall_chance_percent = 12
/// potion_heal = 25
///
/// [player]
/// gold = 300
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(
            target: "game_content::config",
            path = %path.display(),
            width = config.grid_width,
            height = config.grid_height,
            "config loaded"
        );
        Ok(config)
    }

    /// Parse and check a TOML document.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Rejects configurations the engine cannot build a level from.
    pub fn validate(config: &GameConfig) -> LoadResult<()> {
        ensure!(
            config.grid_width >= 3 && config.grid_height >= 3,
            "grid must be at least 3x3, got {}x{}",
            config.grid_width,
            config.grid_height
        );

        let spawn = config.player_spawn;
        let interior_x = 1..config.grid_width as i32 - 1;
        let interior_y = 1..config.grid_height as i32 - 1;
        ensure!(
            interior_x.contains(&spawn.x) && interior_y.contains(&spawn.y),
            "player spawn {spawn} is not an interior cell"
        );

        ensure!(
            config.wall_chance_percent <= 100,
            "wall_chance_percent must be within 0..=100, got {}",
            config.wall_chance_percent
        );
        ensure!(
            config.player.max_health > 0,
            "player max_health must be positive"
        );
        ensure!(
            config.player.mana <= config.player.max_mana,
            "player mana {} exceeds max_mana {}",
            config.player.mana,
            config.player.max_mana
        );
        ensure!(
            config.player.inventory.len() <= GameConfig::MAX_INVENTORY_SLOTS,
            "starting inventory has {} slots, at most {} fit",
            config.player.inventory.len(),
            GameConfig::MAX_INVENTORY_SLOTS
        );
        ensure!(
            config.experience_growth_denominator > 0,
            "experience_growth_denominator must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{InventoryKind, Position};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            wall_chance_percent = 0
            trap_cost = 75

            [player]
            gold = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.wall_chance_percent, 0);
        assert_eq!(config.trap_cost, 75);
        assert_eq!(config.player.gold, 20);
        assert_eq!(config.player.max_health, 100);
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.player_spawn, Position::new(8, 8));
        assert_eq!(config.player.inventory.len(), 3);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn inventory_can_be_replaced() {
        let config = ConfigLoader::parse(
            r#"
            [[player.inventory]]
            kind = "potion"
            name = "Small Potion"
            count = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.player.inventory.len(), 1);
        assert_eq!(config.player.inventory[0].kind, InventoryKind::Potion);
        assert_eq!(config.player.inventory[0].name, "Small Potion");
    }

    #[test]
    fn rejects_spawn_on_the_border() {
        let err = ConfigLoader::parse("player_spawn = { x = 0, y = 4 }").unwrap_err();
        assert!(err.to_string().contains("interior"), "{err}");
    }

    #[test]
    fn rejects_tiny_grid() {
        let err = ConfigLoader::parse("grid_width = 2\nplayer_spawn = { x = 1, y = 1 }")
            .unwrap_err();
        assert!(err.to_string().contains("3x3"), "{err}");
    }

    #[test]
    fn rejects_unknown_inventory_kind() {
        let result = ConfigLoader::parse(
            r#"
            [[player.inventory]]
            kind = "sword"
            name = "Sword"
            count = 1
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "grid_width = \"wide\"").unwrap();

        let err = ConfigLoader::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));

        let missing = ConfigLoader::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(missing.to_string().contains("missing.toml"));
    }
}
