//! Fixed enemy catalog.

/// Base statistics shared by every enemy of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyTemplate {
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Experience granted to the player on a kill.
    pub experience: u64,
}

impl EnemyTemplate {
    pub const fn new(max_health: u32, attack: u32, defense: u32, experience: u64) -> Self {
        Self {
            max_health,
            attack,
            defense,
            experience,
        }
    }
}

/// Enemy species known to the engine.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Skeleton,
}

impl EnemyKind {
    pub const fn template(self) -> EnemyTemplate {
        match self {
            Self::Goblin => EnemyTemplate::new(30, 5, 2, 25),
            Self::Orc => EnemyTemplate::new(50, 8, 3, 40),
            Self::Skeleton => EnemyTemplate::new(25, 6, 1, 30),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn goblin_stats() {
        let goblin = EnemyKind::Goblin.template();
        assert_eq!(goblin.max_health, 30);
        assert_eq!(goblin.defense, 2);
        assert_eq!(goblin.experience, 25);
    }

    #[test]
    fn every_kind_can_fight_back() {
        for kind in EnemyKind::iter() {
            let template = kind.template();
            assert!(template.max_health > 0, "{kind} has no health");
            assert!(template.attack > 0, "{kind} cannot attack");
        }
        assert_eq!("ORC".parse::<EnemyKind>(), Ok(EnemyKind::Orc));
    }
}
