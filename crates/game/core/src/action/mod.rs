//! Player actions consumed by a world session.

mod punch;

pub use punch::Punch;

use crate::combat::Move;
use crate::entity::{Book, CaptureTarget, Combatant, CombatantId};
use crate::error::ConfigError;

/// Roll stream of one action. Fed to [`compute_seed`](crate::rng::compute_seed)
/// as the `context` component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    Combat = 0,
    Capture = 1,
    CurseSelection = 2,
}

impl RollContext {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// An action submitted by a player, carrying the stat blocks it acts on.
///
/// Stat blocks come from the Mon-data collaborator; the world session does
/// not own combatants, books or targets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Punch {
        attacker: Combatant,
        defender: Combatant,
        #[cfg_attr(feature = "serde", serde(rename = "move"))]
        mv: Move,
        punch: Punch,
    },
    Capture {
        player: CombatantId,
        target: CaptureTarget,
        book: Book,
    },
}

impl PlayerAction {
    /// The entity performing the action.
    pub fn actor(&self) -> CombatantId {
        match self {
            Self::Punch { attacker, .. } => attacker.id,
            Self::Capture { player, .. } => *player,
        }
    }

    /// The actor and the entity it acts on: attacker and defender for a
    /// punch, player and target for a capture.
    pub fn participants(&self) -> (CombatantId, CombatantId) {
        match self {
            Self::Punch {
                attacker, defender, ..
            } => (attacker.id, defender.id),
            Self::Capture { player, target, .. } => (*player, target.id),
        }
    }

    pub const fn roll_context(&self) -> RollContext {
        match self {
            Self::Punch { .. } => RollContext::Combat,
            Self::Capture { .. } => RollContext::Capture,
        }
    }

    /// Checks the probabilities carried by the action's stat blocks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Punch {
                attacker, defender, ..
            } => {
                attacker.validate()?;
                defender.validate()
            }
            Self::Capture { target, .. } => target.validate(),
        }
    }
}
