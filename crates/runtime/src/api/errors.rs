//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the curse scheduler so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use mon_core::{ConfigError, ErrorSeverity, GameError, SchedulerError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("clock worker command channel closed")]
    CommandChannelClosed,

    #[error("clock worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("clock worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("invalid world configuration")]
    InvalidConfig(#[from] ConfigError),

    #[error("action rejected")]
    InvalidAction(#[source] ConfigError),
}

impl RuntimeError {
    /// Severity of the underlying failure. Channel failures mean the world
    /// session is gone.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) | Self::WorkerJoin(_) => {
                ErrorSeverity::Fatal
            }
            Self::Scheduler(inner) => inner.severity(),
            Self::InvalidConfig(inner) | Self::InvalidAction(inner) => inner.severity(),
        }
    }
}
