//! Payloads published on the event bus.

use serde::{Deserialize, Serialize};

use mon_core::{CaptureOutcome, CombatResult, CombatantId};

/// A resolved punch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Action sequence number within the world.
    pub nonce: u64,
    pub attacker: CombatantId,
    pub defender: CombatantId,
    pub result: CombatResult,
}

/// A resolved capture attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureEvent {
    pub nonce: u64,
    pub player: CombatantId,
    pub target: CombatantId,
    pub outcome: CaptureOutcome,
}
