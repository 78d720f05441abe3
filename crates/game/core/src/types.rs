//! Elemental types carried by Mons and moves.

use arrayvec::ArrayVec;

/// Fixed type enumeration.
///
/// The discriminant doubles as the row/column index into
/// [`TypeChart`](crate::effectiveness::TypeChart).
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
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum MonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl MonType {
    /// Index of this type in the effectiveness matrix.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One or two types of a combatant.
///
/// Duplicate types collapse into a single entry, so a "Fire/Fire" Mon is
/// simply Fire and never double-counts a matchup.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeSet {
    types: ArrayVec<MonType, 2>,
}

impl TypeSet {
    /// A single-typed set.
    pub fn single(primary: MonType) -> Self {
        let mut types = ArrayVec::new();
        types.push(primary);
        Self { types }
    }

    /// A dual-typed set. Equal types collapse to a single type.
    pub fn dual(primary: MonType, secondary: MonType) -> Self {
        let mut set = Self::single(primary);
        if secondary != primary {
            set.types.push(secondary);
        }
        set
    }

    /// The first (primary) type.
    pub fn primary(&self) -> MonType {
        self.types[0]
    }

    /// The secondary type, if any.
    pub fn secondary(&self) -> Option<MonType> {
        self.types.get(1).copied()
    }

    pub fn contains(&self, ty: MonType) -> bool {
        self.types.contains(&ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = MonType> + '_ {
        self.types.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: a set holds at least its primary type.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl From<MonType> for TypeSet {
    fn from(primary: MonType) -> Self {
        Self::single(primary)
    }
}
