//! Capture books and capture targets.

use bitflags::bitflags;

use crate::config::{CaptureRules, check_probability};
use crate::error::ConfigError;

use super::combatant::{Combatant, CombatantId, Health};

/// Book tiers, ordered from weakest to strongest.
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
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BookTier {
    Starter,
    Standard,
    Advanced,
    Master,
}

bitflags! {
    /// Optional book capabilities.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BookCapabilities: u8 {
        /// May capture other books. Master tier only, granted by the owner.
        const CAPTURE_BOOKS = 1 << 0;
    }
}

/// Errors from changing a book's contents or capabilities.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BookError {
    #[error("{tier} books cannot capture other books")]
    CapabilityRequiresMaster { tier: BookTier },

    #[error("a size {size} Mon does not fit in {free} free capacity")]
    DoesNotFit { size: u32, free: u32 },
}

/// Capture-and-storage container.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Book {
    pub tier: BookTier,
    pub max_capacity: u32,
    /// Sum of the sizes of stored Mons.
    pub occupied: u32,
    /// Multiplier applied to capture probability.
    pub capture_bonus: f64,
    capabilities: BookCapabilities,
}

impl Book {
    /// An empty book whose capture bonus comes from `rules`.
    pub fn new(tier: BookTier, max_capacity: u32, rules: &CaptureRules) -> Self {
        Self::with_bonus(tier, max_capacity, rules.book_bonus(tier))
    }

    /// An empty book with an explicit capture bonus.
    pub fn with_bonus(tier: BookTier, max_capacity: u32, capture_bonus: f64) -> Self {
        Self {
            tier,
            max_capacity,
            occupied: 0,
            capture_bonus,
            capabilities: BookCapabilities::empty(),
        }
    }

    #[must_use]
    pub fn with_occupied(mut self, occupied: u32) -> Self {
        self.occupied = occupied;
        self
    }

    pub fn free_capacity(&self) -> u32 {
        self.max_capacity.saturating_sub(self.occupied)
    }

    pub fn fits(&self, size: u32) -> bool {
        size <= self.free_capacity()
    }

    pub fn capabilities(&self) -> BookCapabilities {
        self.capabilities
    }

    pub fn can_capture_books(&self) -> bool {
        self.capabilities.contains(BookCapabilities::CAPTURE_BOOKS)
    }

    /// Owner grants book capturing. Refused below Master tier.
    pub fn grant_book_capture(&mut self) -> Result<(), BookError> {
        if self.tier != BookTier::Master {
            return Err(BookError::CapabilityRequiresMaster { tier: self.tier });
        }
        self.capabilities |= BookCapabilities::CAPTURE_BOOKS;
        Ok(())
    }

    pub fn revoke_book_capture(&mut self) {
        self.capabilities.remove(BookCapabilities::CAPTURE_BOOKS);
    }

    /// Records a captured Mon's size.
    pub fn store(&mut self, size: u32) -> Result<(), BookError> {
        if !self.fits(size) {
            return Err(BookError::DoesNotFit {
                size,
                free: self.free_capacity(),
            });
        }
        self.occupied += size;
        Ok(())
    }
}

/// A Mon that may be captured once defeated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptureTarget {
    pub id: CombatantId,
    pub health: Health,
    /// Capacity units the Mon occupies in a book.
    pub size: u32,
    pub required_tier: BookTier,
    /// Base capture rate in `[0, 1]`.
    pub base_capture_rate: f64,
}

impl CaptureTarget {
    pub fn new(
        id: CombatantId,
        health: Health,
        size: u32,
        required_tier: BookTier,
        base_capture_rate: f64,
    ) -> Self {
        Self {
            id,
            health,
            size,
            required_tier,
            base_capture_rate,
        }
    }

    /// Capture view of a combatant, carrying over identity and health.
    pub fn from_combatant(
        combatant: &Combatant,
        size: u32,
        required_tier: BookTier,
        base_capture_rate: f64,
    ) -> Self {
        Self::new(
            combatant.id,
            combatant.health,
            size,
            required_tier,
            base_capture_rate,
        )
    }

    pub const fn is_defeated(&self) -> bool {
        self.health.is_depleted()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("target.base_capture_rate", self.base_capture_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(BookTier::Starter < BookTier::Standard);
        assert!(BookTier::Advanced < BookTier::Master);
    }

    #[test]
    fn only_master_books_capture_books() {
        let rules = CaptureRules::default();
        let mut advanced = Book::new(BookTier::Advanced, 10, &rules);
        assert_eq!(
            advanced.grant_book_capture(),
            Err(BookError::CapabilityRequiresMaster {
                tier: BookTier::Advanced
            })
        );

        let mut master = Book::new(BookTier::Master, 10, &rules);
        assert!(!master.can_capture_books());
        master.grant_book_capture().expect("master book");
        assert!(master.can_capture_books());
        master.revoke_book_capture();
        assert!(!master.can_capture_books());
    }

    #[test]
    fn store_respects_free_capacity() {
        let mut book = Book::with_bonus(BookTier::Starter, 10, 1.0).with_occupied(7);
        assert_eq!(book.free_capacity(), 3);
        assert_eq!(
            book.store(4),
            Err(BookError::DoesNotFit { size: 4, free: 3 })
        );
        book.store(3).expect("fits exactly");
        assert_eq!(book.free_capacity(), 0);
    }

    #[test]
    fn capture_rate_must_be_a_probability() {
        let target = |rate| {
            CaptureTarget::new(CombatantId(4), Health::new(0, 10), 1, BookTier::Starter, rate)
        };
        assert_eq!(target(0.0).validate(), Ok(()));
        assert_eq!(
            target(-0.2).validate(),
            Err(ConfigError::InvalidProbability {
                field: "target.base_capture_rate",
                value: -0.2
            })
        );
    }
}
