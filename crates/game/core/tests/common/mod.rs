#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use game_core::{GameConfig, GameEngine, LevelLayout, RngOracle};

/// Returns the same value for every draw.
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Replays a fixed script of draws, cycling when it runs out.
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.values[index % self.values.len()]
    }
}

/// Wall-free engine with the given layout and random source.
pub fn engine(layout: LevelLayout, rng: impl RngOracle + 'static) -> GameEngine {
    engine_with_config(GameConfig::open_floor(), layout, rng)
}

pub fn engine_with_config(
    config: GameConfig,
    layout: LevelLayout,
    rng: impl RngOracle + 'static,
) -> GameEngine {
    GameEngine::builder()
        .config(config)
        .layout(layout)
        .rng(rng)
        .seed(7)
        .build()
        .expect("layout spawns on free cells")
}

pub fn last_text(engine: &GameEngine) -> &str {
    engine
        .state()
        .log
        .last()
        .map(|entry| entry.text.as_str())
        .unwrap_or_default()
}
