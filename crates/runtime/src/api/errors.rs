//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and map
//! transitions so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, GameError, TransitionError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no save found in slot '{slot}'")]
    SaveNotFound { slot: String },

    #[error("runtime requires game content to be configured before building")]
    MissingContent,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Transition(err) => err.severity(),
            Self::SaveNotFound { .. } => ErrorSeverity::Recoverable,
            Self::Repository(_) => ErrorSeverity::Recoverable,
            Self::MissingContent => ErrorSeverity::Validation,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Transition(err) => err.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::SaveNotFound { .. } => "RUNTIME_SAVE_NOT_FOUND",
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
