//! Outcomes of a capture attempt.

/// Why a capture attempt was refused before any roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    /// The target still has health left.
    NotDefeated,
    /// The book's tier is below the target's required tier.
    BookTooWeak,
    /// The target is larger than the book's free capacity.
    DoesNotFit,
}

/// Result of a capture attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptureOutcome {
    Rejected(RejectReason),
    Captured { probability: f64 },
    BrokeFree { probability: f64 },
}

impl CaptureOutcome {
    pub const fn is_captured(&self) -> bool {
        matches!(self, Self::Captured { .. })
    }

    pub const fn rejection(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }

    /// Probability that was rolled against. `None` for rejections.
    pub const fn probability(&self) -> Option<f64> {
        match self {
            Self::Rejected(_) => None,
            Self::Captured { probability } | Self::BrokeFree { probability } => Some(*probability),
        }
    }
}
