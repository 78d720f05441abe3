//! Capture preconditions, probability and the single capture roll.

use tracing::debug;

use crate::entity::{Book, CaptureTarget, Health};
use crate::error::InvariantViolation;
use crate::modifiers::{ModifierKey, ModifierSnapshot};
use crate::rng::RngSource;

use super::outcome::{CaptureOutcome, RejectReason};

/// Checks capture legality, in order: defeated, book tier, free capacity.
pub fn check_preconditions(target: &CaptureTarget, book: &Book) -> Result<(), RejectReason> {
    if !target.is_defeated() {
        return Err(RejectReason::NotDefeated);
    }
    if book.tier < target.required_tier {
        return Err(RejectReason::BookTooWeak);
    }
    if !book.fits(target.size) {
        return Err(RejectReason::DoesNotFit);
    }
    Ok(())
}

/// Capture probability for the given inputs.
///
/// # Formula
///
/// ```text
/// p = clamp(base_rate × book_bonus × (1 − health / max_health) × capture_rate, 0, 1)
/// ```
///
/// The `no_capture` flag forces 0. Lower health never lowers the result.
pub fn capture_probability(
    base_rate: f64,
    book_bonus: f64,
    health: &Health,
    modifiers: &ModifierSnapshot,
) -> f64 {
    if modifiers.capture_disabled() {
        return 0.0;
    }

    let probability = base_rate
        * book_bonus
        * (1.0 - health.ratio())
        * modifiers.multiplier(ModifierKey::CaptureRate);

    if probability.is_nan() {
        InvariantViolation::ProbabilityOutOfRange(probability).report();
        return 0.0;
    }
    probability.clamp(0.0, 1.0)
}

/// Attempts to capture `target` into `book`.
///
/// Rejections consume no RNG. Otherwise exactly one draw decides between
/// [`CaptureOutcome::Captured`] and [`CaptureOutcome::BrokeFree`]. The book
/// is not modified; call [`Book::store`] after a successful capture.
pub fn attempt_capture(
    target: &CaptureTarget,
    book: &Book,
    modifiers: &ModifierSnapshot,
    rng: &mut impl RngSource,
) -> CaptureOutcome {
    if let Err(reason) = check_preconditions(target, book) {
        debug!(target = %target.id, %reason, "capture rejected");
        return CaptureOutcome::Rejected(reason);
    }

    let probability = capture_probability(
        target.base_capture_rate,
        book.capture_bonus,
        &target.health,
        modifiers,
    );
    let outcome = if rng.chance(probability) {
        CaptureOutcome::Captured { probability }
    } else {
        CaptureOutcome::BrokeFree { probability }
    };

    debug!(target = %target.id, probability, captured = outcome.is_captured(), "capture rolled");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptureRules;
    use crate::curse::CurseId;
    use crate::entity::{BookTier, CombatantId};
    use crate::modifiers::{Effect, EffectSet, ModifierRegistry, ModifierSource};
    use crate::rng::{PcgRng, ScriptedRng};

    fn target(current: u32) -> CaptureTarget {
        CaptureTarget::new(
            CombatantId(7),
            Health::new(current, 100),
            3,
            BookTier::Standard,
            0.3,
        )
    }

    fn starter_book() -> Book {
        Book::with_bonus(BookTier::Standard, 10, 1.0)
    }

    #[test]
    fn defeated_target_uses_base_rate() {
        let probability = capture_probability(
            0.3,
            1.0,
            &Health::new(0, 100),
            &ModifierSnapshot::empty(),
        );
        assert_eq!(probability, 0.3);

        let mut rng = ScriptedRng::from_units(&[0.29]);
        let outcome = attempt_capture(
            &target(0),
            &starter_book(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        assert_eq!(outcome, CaptureOutcome::Captured { probability: 0.3 });
    }

    #[test]
    fn standing_target_is_rejected_without_rolling() {
        let mut rng = PcgRng::new(9);
        let outcome = attempt_capture(
            &target(50),
            &starter_book(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        assert_eq!(outcome, CaptureOutcome::Rejected(RejectReason::NotDefeated));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn preconditions_are_checked_in_order() {
        let weak = Book::with_bonus(BookTier::Starter, 1, 1.0);
        // Not defeated beats both tier and size problems
        assert_eq!(check_preconditions(&target(10), &weak), Err(RejectReason::NotDefeated));
        assert_eq!(check_preconditions(&target(0), &weak), Err(RejectReason::BookTooWeak));

        let full = Book::with_bonus(BookTier::Master, 10, 2.0).with_occupied(8);
        assert_eq!(check_preconditions(&target(0), &full), Err(RejectReason::DoesNotFit));
        assert_eq!(check_preconditions(&target(0), &full.with_occupied(7)), Ok(()));
    }

    #[test]
    fn no_capture_flag_forces_zero() {
        let mut registry = ModifierRegistry::new();
        let curse = EffectSet::new([Effect::flag(ModifierKey::NoCapture)]).expect("valid");
        registry
            .apply(ModifierSource::Curse(CurseId(3)), &curse)
            .expect("apply");

        let mut rng = ScriptedRng::from_units(&[0.0]);
        let outcome = attempt_capture(&target(0), &starter_book(), &registry.snapshot(), &mut rng);
        assert_eq!(outcome, CaptureOutcome::BrokeFree { probability: 0.0 });
    }

    #[test]
    fn bonuses_stack_and_clamp() {
        let rules = CaptureRules::default();
        let master = Book::new(BookTier::Master, 10, &rules);
        let mut registry = ModifierRegistry::new();
        let lucky = EffectSet::new([Effect::multiplier(ModifierKey::CaptureRate, 2.0)])
            .expect("valid");
        registry
            .apply(ModifierSource::Override(1), &lucky)
            .expect("apply");

        let probability = capture_probability(
            0.3,
            master.capture_bonus,
            &Health::new(0, 100),
            &registry.snapshot(),
        );
        assert!((probability - 1.0).abs() < f64::EPSILON);

        let capped = capture_probability(
            0.9,
            master.capture_bonus,
            &Health::new(0, 100),
            &registry.snapshot(),
        );
        assert_eq!(capped, 1.0);
    }

    #[test]
    fn wounded_targets_are_easier() {
        let snapshot = ModifierSnapshot::empty();
        let healthy = capture_probability(0.5, 1.0, &Health::new(80, 100), &snapshot);
        let wounded = capture_probability(0.5, 1.0, &Health::new(20, 100), &snapshot);
        assert!(wounded > healthy);
    }
}
