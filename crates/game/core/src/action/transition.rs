use crate::env::GameEnv;
use crate::state::GameState;

/// Defines how a concrete action mutates game state.
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions around the mutation. Every rejection a player can cause
/// belongs in `pre_validate`; errors from `apply` or `post_validate` mean the
/// state was inconsistent and the engine rolls the mutation back.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations should
    /// assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
