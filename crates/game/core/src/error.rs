//! Common error infrastructure for mon-core.
//!
//! Expected gameplay refusals (a book too weak, a target still standing) are
//! not errors at all: they are outcome variants returned by the resolvers.
//! The types here cover the remaining classes:
//!
//! - configuration that cannot be used ([`ConfigError`])
//! - misuse of the modifier registry ([`RegistryError`])
//! - scheduler commands that cannot be honored ([`SchedulerError`])
//! - invariant violations, which are bugs ([`InvariantViolation`])

use crate::curse::CurseId;
use crate::modifiers::{ModifierKey, ModifierSource};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Can retry with the same or an alternative command.
    Recoverable,

    /// Invalid input, should not retry without changes.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,

    /// The owning session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all mon-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str;
}

/// Configuration rejected by [`GameConfig::validate`](crate::GameConfig::validate)
/// or by curse pool construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("{field} must be a finite, non-negative multiplier (got {value})")]
    InvalidMultiplier { field: &'static str, value: f64 },

    #[error("{field} must lie in [0, 1] (got {value})")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("curse pool is empty")]
    EmptyCursePool,

    #[error("curse {0} is defined more than once")]
    DuplicateCurse(CurseId),

    #[error("curse {0} has zero selection weight")]
    ZeroWeight(CurseId),

    #[error("curse {0} has no effects")]
    EmptyCurse(CurseId),

    #[error("modifier {key} expects a {expected} value")]
    ValueKindMismatch {
        key: ModifierKey,
        expected: &'static str,
    },
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroDuration { .. } => "CONFIG_ZERO_DURATION",
            Self::InvalidMultiplier { .. } => "CONFIG_INVALID_MULTIPLIER",
            Self::InvalidProbability { .. } => "CONFIG_INVALID_PROBABILITY",
            Self::EmptyCursePool => "CONFIG_EMPTY_CURSE_POOL",
            Self::DuplicateCurse(_) => "CONFIG_DUPLICATE_CURSE",
            Self::ZeroWeight(_) => "CONFIG_ZERO_WEIGHT",
            Self::EmptyCurse(_) => "CONFIG_EMPTY_CURSE",
            Self::ValueKindMismatch { .. } => "CONFIG_VALUE_KIND_MISMATCH",
        }
    }
}

/// Misuse of the apply/revert transaction pair.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("{0} already has modifiers applied")]
    AlreadyApplied(ModifierSource),

    #[error("{0} has no modifiers applied")]
    NotApplied(ModifierSource),

    #[error("{0} tried to apply an empty effect set")]
    EmptyEffects(ModifierSource),
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyApplied(_) => "REGISTRY_ALREADY_APPLIED",
            Self::NotApplied(_) => "REGISTRY_NOT_APPLIED",
            Self::EmptyEffects(_) => "REGISTRY_EMPTY_EFFECTS",
        }
    }
}

/// Scheduler commands that cannot be honored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("curse cycle has been shut down")]
    ShutDown,

    #[error("curse {0} is not in the configured pool")]
    UnknownCurse(CurseId),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl GameError for SchedulerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ShutDown => ErrorSeverity::Fatal,
            Self::UnknownCurse(_) => ErrorSeverity::Validation,
            Self::Registry(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ShutDown => "SCHEDULER_SHUT_DOWN",
            Self::UnknownCurse(_) => "SCHEDULER_UNKNOWN_CURSE",
            Self::Registry(inner) => inner.error_code(),
        }
    }
}

/// Broken invariants. Never returned to callers.
///
/// Fatal in debug builds; in release builds they are logged and the
/// offending value is clamped or purged. See [`report`](InvariantViolation::report).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("capture probability {0} is not a number in [0, 1]")]
    ProbabilityOutOfRange(f64),

    #[error("computed damage {0} is not finite")]
    NonFiniteDamage(f64),

    #[error("{count} modifier entries of {origin} survived reversion")]
    ResidualModifiers {
        origin: ModifierSource,
        count: usize,
    },
}

impl InvariantViolation {
    /// Logs the violation and trips a debug assertion.
    pub fn report(self) {
        tracing::error!(violation = %self, code = self.error_code(), "invariant violated");
        debug_assert!(false, "invariant violated: {self}");
    }
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ProbabilityOutOfRange(_) => "INVARIANT_PROBABILITY_RANGE",
            Self::NonFiniteDamage(_) => "INVARIANT_NON_FINITE_DAMAGE",
            Self::ResidualModifiers { .. } => "INVARIANT_RESIDUAL_MODIFIERS",
        }
    }
}
