/// Where the turn controller currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    /// Waiting for player actions; `end_turn` moves on.
    #[default]
    Player,
    /// Enemy AI is being resolved.
    Resolution,
    /// The player has been defeated. Terminal.
    Defeated,
}

/// Turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Completed turns plus one. Starts at 1 and only ever increases.
    pub turn: u64,

    pub phase: TurnPhase,

    /// Sequential roll identifier, bumped for every random draw.
    ///
    /// Combined with the game seed so that a run replays identically and a
    /// restored snapshot continues the same random stream.
    pub nonce: u64,
}

impl TurnState {
    pub const FIRST_TURN: u64 = 1;

    pub fn new() -> Self {
        Self {
            turn: Self::FIRST_TURN,
            phase: TurnPhase::Player,
            nonce: 0,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.phase == TurnPhase::Defeated
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
