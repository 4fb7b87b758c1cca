//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., `MoveError`, `AttackError`) are defined in
//! their respective modules alongside the actions they validate. This module
//! only holds what they share.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player can simply try something else
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the run cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: walked into a wall, not enough gold.
    Recoverable,

    /// Examples: malformed snapshot, unknown target.
    Validation,

    /// Examples: occupancy index desync, missing expected entity.
    /// These indicate bugs and should be investigated.
    Internal,

    /// Examples: the player has been defeated, id space exhausted.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Stable across releases; useful for tests and host-side matching.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
