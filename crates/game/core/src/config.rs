use crate::state::{InventoryKind, InventorySlot, Position};

/// Game configuration constants and tunable parameters.
///
/// Every field has a default, so a partial config file only needs to name
/// the values it overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Chance (0-100) that an interior cell becomes a wall.
    pub wall_chance_percent: u32,
    /// Always cleared to floor during generation.
    pub player_spawn: Position,
    pub player: PlayerStart,

    pub potion_heal: u32,
    pub trap_cost: u64,
    pub trap_damage: u32,

    /// Player damage is drawn from `0..spread` and raised to at least `floor`.
    pub player_damage_spread: u32,
    pub player_damage_floor: u32,
    /// Gold granted per point of a slain enemy's maximum health.
    pub gold_per_max_health: u64,

    /// Experience needed to go from level 1 to level 2.
    pub experience_base: u64,
    /// Each further level costs `previous * numerator / denominator`.
    pub experience_growth_numerator: u64,
    pub experience_growth_denominator: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 8;
    pub const MAX_OCCUPANTS_PER_TILE: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_SIZE: u32 = 16;
    pub const DEFAULT_WALL_CHANCE_PERCENT: u32 = 8;
    pub const DEFAULT_POTION_HEAL: u32 = 30;
    pub const DEFAULT_TRAP_COST: u64 = 50;
    pub const DEFAULT_TRAP_DAMAGE: u32 = 20;

    pub fn new() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_SIZE,
            grid_height: Self::DEFAULT_GRID_SIZE,
            wall_chance_percent: Self::DEFAULT_WALL_CHANCE_PERCENT,
            player_spawn: Position::new(8, 8),
            player: PlayerStart::default(),
            potion_heal: Self::DEFAULT_POTION_HEAL,
            trap_cost: Self::DEFAULT_TRAP_COST,
            trap_damage: Self::DEFAULT_TRAP_DAMAGE,
            player_damage_spread: 15,
            player_damage_floor: 5,
            gold_per_max_health: 2,
            experience_base: 100,
            experience_growth_numerator: 3,
            experience_growth_denominator: 2,
        }
    }

    /// Default configuration with wall generation disabled.
    pub fn open_floor() -> Self {
        Self {
            wall_chance_percent: 0,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Starting values for a fresh player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerStart {
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub gold: u64,
    pub inventory: Vec<InventorySlot>,
}

impl Default for PlayerStart {
    fn default() -> Self {
        Self {
            max_health: 100,
            mana: 50,
            max_mana: 100,
            gold: 150,
            inventory: vec![
                InventorySlot::new(InventoryKind::Potion, "Health Potion", 3),
                InventorySlot::new(InventoryKind::TrapSpike, "Spike Trap", 5),
                InventorySlot::new(InventoryKind::TrapFire, "Fire Trap", 2),
            ],
        }
    }
}
