//! Damage rolls.

use crate::env::RngOracle;

/// Damage the player deals with one swing.
///
/// # Formula
///
/// ```text
/// raw    = next % spread
/// rolled = max(raw, floor)
/// dealt  = max(1, rolled - defense)
/// ```
///
/// With the default spread 15 and floor 5 the roll lands in `5..=14`.
pub fn player_damage(rng: &dyn RngOracle, seed: u64, spread: u32, floor: u32, defense: u32) -> u32 {
    let rolled = rng.below(seed, spread).max(floor);
    rolled.saturating_sub(defense).max(1)
}

/// Damage an enemy deals to the player: `max(1, next % attack)`.
///
/// The player's stats do not reduce it. An attack stat of zero still deals 1.
pub fn enemy_damage(rng: &dyn RngOracle, seed: u64, attack: u32) -> u32 {
    rng.below(seed, attack).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn player_damage_respects_floor_and_defense() {
        assert_eq!(player_damage(&Fixed(0), 0, 15, 5, 2), 3);
        assert_eq!(player_damage(&Fixed(14), 0, 15, 5, 2), 12);
        assert_eq!(player_damage(&Fixed(29), 0, 15, 5, 0), 14);
        assert_eq!(player_damage(&Fixed(3), 0, 15, 5, 50), 1);
    }

    #[test]
    fn enemy_damage_is_at_least_one() {
        assert_eq!(enemy_damage(&Fixed(0), 0, 5), 1);
        assert_eq!(enemy_damage(&Fixed(4), 0, 5), 4);
        assert_eq!(enemy_damage(&Fixed(9), 0, 5), 4);
        assert_eq!(enemy_damage(&Fixed(7), 0, 0), 1);
    }
}
