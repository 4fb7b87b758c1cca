//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Everything the terminal host needs before the engine exists.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Seed for the engine. Random when `DUNGEON_SEED` is unset.
    pub seed: u64,
    /// Content directory holding `config.toml` and `layout.ron`.
    pub data_dir: Option<PathBuf>,
    /// Overrides the platform cache directory for log files.
    pub log_dir: Option<PathBuf>,
    pub ui: UiConfig,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_SEED` - Game seed (default: random)
    /// - `DUNGEON_DATA_DIR` - Content directory (default: built-in rules and layout)
    /// - `DUNGEON_LOG_DIR` - Log directory (default: platform cache dir)
    /// - `CLI_MESSAGE_PANEL_HEIGHT` - Message panel height in lines (default: 8, min: 3)
    pub fn from_env() -> Self {
        let mut ui = UiConfig::default();
        if let Some(height) = read_env::<u16>("CLI_MESSAGE_PANEL_HEIGHT") {
            ui = ui.with_message_panel_height(height);
        }

        Self {
            seed: read_env("DUNGEON_SEED").unwrap_or_else(rand::random),
            data_dir: read_env("DUNGEON_DATA_DIR"),
            log_dir: read_env("DUNGEON_LOG_DIR"),
            ui,
        }
    }
}

/// UI layout and display configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Height of message panel in lines (including borders).
    pub message_panel_height: u16,
}

impl UiConfig {
    pub const MIN_MESSAGE_PANEL_HEIGHT: u16 = 3;

    pub fn with_message_panel_height(mut self, height: u16) -> Self {
        self.message_panel_height = height.max(Self::MIN_MESSAGE_PANEL_HEIGHT);
        self
    }

    /// Log lines that fit inside the panel borders.
    pub fn visible_messages(&self) -> usize {
        usize::from(self.message_panel_height.saturating_sub(2))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_panel_height: 8,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
