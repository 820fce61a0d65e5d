//! Common error infrastructure for game-core.
//!
//! Play-time failures (blocked moves, out-of-range attacks, a full backpack) are
//! never errors: they come back as booleans or outcome values. The error types in
//! this crate cover malformed content only, such as an unknown terrain character
//! or a dungeon entrance that points at a map nobody loaded.
//!
//! Domain-specific errors live next to the code that raises them
//! ([`TerrainError`](crate::terrain::TerrainError), [`MapError`](crate::map::MapError),
//! [`TransitionError`]).

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed on retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted game state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
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

    /// Returns true if this error indicates an internal bug or broken content.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure while moving the warrior between the world map and a dungeon.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// An entrance references a dungeon map that was never loaded.
    #[error("Dungeon '{id}' not loaded")]
    DungeonNotLoaded { id: String },

    /// A transition targeted a map id with no registered map.
    #[error("Map '{id}' is not registered")]
    UnknownMap { id: String },
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DungeonNotLoaded { .. } => ErrorSeverity::Validation,
            Self::UnknownMap { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DungeonNotLoaded { .. } => "TRANSITION_DUNGEON_NOT_LOADED",
            Self::UnknownMap { .. } => "TRANSITION_UNKNOWN_MAP",
        }
    }
}
