//! Notifications emitted on every curse cycle transition.

use std::time::Duration;

use super::pool::{Curse, CurseId};

/// Phase of the curse cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CyclePhase {
    Rest,
    Warning,
    Active,
}

/// What triggered a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionCause {
    /// The previous phase ran out.
    Expired,
    /// A curse was forced by an operator or test harness.
    Forced,
    /// The active or pending curse was cancelled.
    Cancelled,
    /// The owning session ended.
    Shutdown,
}

/// Lightweight curse reference carried by events.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseRef {
    pub id: CurseId,
    pub name: String,
}

impl From<&Curse> for CurseRef {
    fn from(curse: &Curse) -> Self {
        Self {
            id: curse.id,
            name: curse.name.clone(),
        }
    }
}

/// Published to UI and network collaborators after each transition.
///
/// `curse` is the pending curse when entering Warning, the applied curse
/// when entering Active, and the curse that just ended when entering Rest.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurseStateChangeEvent {
    pub phase: CyclePhase,
    pub curse: Option<CurseRef>,
    pub remaining: Duration,
    pub cause: TransitionCause,
}
