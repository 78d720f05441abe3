//! Modifier names, values and sources.

use core::fmt;

use crate::curse::CurseId;
use crate::entity::Side;

/// Named global modifier.
///
/// Names are stable snake_case strings so content files can refer to them.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum ModifierKey {
    WildAttack,
    WildDefense,
    WildSpeed,
    PlayerAttack,
    PlayerDefense,
    PlayerSpeed,
    CaptureRate,
    CriticalChance,
    CounterChance,
    /// Flag: capture is categorically disabled while set.
    NoCapture,
}

/// Combat stat a side-scoped multiplier applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKind {
    Attack,
    Defense,
    Speed,
}

/// Whether a key holds a multiplier or a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Multiplier,
    Flag,
}

impl ValueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Multiplier => "multiplier",
            Self::Flag => "flag",
        }
    }
}

impl ModifierKey {
    pub const fn value_kind(self) -> ValueKind {
        match self {
            Self::NoCapture => ValueKind::Flag,
            _ => ValueKind::Multiplier,
        }
    }

    /// Key scaling `stat` for combatants on `side`.
    pub const fn for_stat(side: Side, stat: StatKind) -> Self {
        match (side, stat) {
            (Side::Wild, StatKind::Attack) => Self::WildAttack,
            (Side::Wild, StatKind::Defense) => Self::WildDefense,
            (Side::Wild, StatKind::Speed) => Self::WildSpeed,
            (Side::Player, StatKind::Attack) => Self::PlayerAttack,
            (Side::Player, StatKind::Defense) => Self::PlayerDefense,
            (Side::Player, StatKind::Speed) => Self::PlayerSpeed,
        }
    }
}

/// Value contributed for one key.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierValue {
    Multiplier(f64),
    Flag(bool),
}

impl ModifierValue {
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Multiplier(_) => ValueKind::Multiplier,
            Self::Flag(_) => ValueKind::Flag,
        }
    }

    /// Merges two values of the same kind (multipliers multiply, flags OR).
    ///
    /// Returns `None` when the kinds differ.
    pub fn combine(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Multiplier(a), Self::Multiplier(b)) => Some(Self::Multiplier(a * b)),
            (Self::Flag(a), Self::Flag(b)) => Some(Self::Flag(a || b)),
            _ => None,
        }
    }
}

/// Who contributed a registry entry.
///
/// Reversion removes exactly one source's entries, so a curse ending never
/// drops an admin override that is active at the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierSource {
    Curse(CurseId),
    Override(u32),
}

impl fmt::Display for ModifierSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Curse(id) => write!(f, "curse {id}"),
            Self::Override(id) => write!(f, "override #{id}"),
        }
    }
}
