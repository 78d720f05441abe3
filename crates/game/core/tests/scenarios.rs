//! End-to-end rule scenarios: a curse cycle driving combat and capture.

use std::time::Duration;

use mon_core::{
    BaseStats, Book, BookTier, CaptureOutcome, CaptureRules, CaptureTarget, CombatResolver,
    CombatRules, Combatant, CombatantId, Curse, CurseId, CursePool, CurseScheduler, CycleConfig,
    CyclePhase, DamageFormula, Effect, EffectSet, Health, ModifierKey, MonType, Move, PcgRng,
    RejectReason, RngSource, ScriptedRng, Side, TypeChart, attempt_capture,
};

fn rules() -> CombatRules {
    CombatRules {
        formula: DamageFormula::Difference,
        ..CombatRules::default()
    }
}

fn powerful_mons_pool() -> CursePool {
    let effects = EffectSet::new([
        Effect::multiplier(ModifierKey::WildAttack, 1.5),
        Effect::multiplier(ModifierKey::WildDefense, 1.5),
    ])
    .expect("valid effects");
    CursePool::new(vec![Curse::new(CurseId(1), "PowerfulMons", effects)]).expect("valid pool")
}

fn player() -> Combatant {
    Combatant::new(
        CombatantId(1),
        Side::Player,
        MonType::Fighting,
        100,
        BaseStats::new(10, 10, 10),
    )
}

fn wild() -> Combatant {
    Combatant::new(
        CombatantId(2),
        Side::Wild,
        MonType::Normal,
        100,
        BaseStats::new(12, 5, 8),
    )
}

#[test]
fn curse_changes_damage_only_while_active() {
    let chart = TypeChart::standard();
    let rules = rules();
    let resolver = CombatResolver::new(&chart, &rules);
    let punch = Move::new("punch", MonType::Normal, 100);

    let config = CycleConfig {
        rest_ms: 1_000,
        warning_ms: 500,
        curse_ms: 1_000,
    };
    let mut scheduler = CurseScheduler::new(config, powerful_mons_pool());
    let reader = scheduler.reader();
    let mut rng = PcgRng::new(17);

    let before = resolver.resolve(&player(), &wild(), &punch, &reader.snapshot(), &mut rng);
    assert_eq!(before.damage, 5);

    scheduler
        .tick(Duration::from_millis(1_000), &mut rng)
        .expect("tick");
    assert_eq!(scheduler.state().phase, CyclePhase::Warning);
    let warned = resolver.resolve(&player(), &wild(), &punch, &reader.snapshot(), &mut rng);
    assert_eq!(warned.damage, 5);

    scheduler
        .tick(Duration::from_millis(500), &mut rng)
        .expect("tick");
    assert_eq!(scheduler.state().phase, CyclePhase::Active);
    let cursed = resolver.resolve(&player(), &wild(), &punch, &reader.snapshot(), &mut rng);
    assert_eq!(cursed.damage, 3);

    scheduler
        .tick(Duration::from_millis(1_000), &mut rng)
        .expect("tick");
    assert_eq!(scheduler.state().phase, CyclePhase::Rest);
    let after = resolver.resolve(&player(), &wild(), &punch, &reader.snapshot(), &mut rng);
    assert_eq!(after.damage, 5);
}

#[test]
fn snapshot_taken_before_activation_is_stable() {
    let config = CycleConfig {
        rest_ms: 10,
        warning_ms: 10,
        curse_ms: 10,
    };
    let mut scheduler = CurseScheduler::new(config, powerful_mons_pool());
    let mut rng = PcgRng::new(0);
    scheduler
        .tick(Duration::from_millis(10), &mut rng)
        .expect("tick");

    let held = scheduler.snapshot();
    scheduler
        .tick(Duration::from_millis(10), &mut rng)
        .expect("tick");

    assert!(held.is_empty());
    assert_eq!(scheduler.snapshot().multiplier(ModifierKey::WildDefense), 1.5);
}

#[test]
fn fight_then_capture() {
    let chart = TypeChart::standard();
    let rules = rules();
    let resolver = CombatResolver::new(&chart, &rules);
    let capture_rules = CaptureRules::default();

    let mut attacker = player();
    let mut defender = wild().with_health(4);
    let punch = Move::new("punch", MonType::Normal, 100);
    let scheduler = CurseScheduler::new(CycleConfig::default(), powerful_mons_pool());
    let snapshot = scheduler.snapshot();

    let result = resolver.resolve(&attacker, &defender, &punch, &snapshot, &mut PcgRng::new(2));
    assert!(result.defender_defeated);
    result.apply(&mut attacker, &mut defender);

    let target = CaptureTarget::from_combatant(&defender, 2, BookTier::Starter, 0.3);
    let mut book = Book::new(BookTier::Starter, 4, &capture_rules);
    // Roll 0.1 under 0.3
    let mut rng = ScriptedRng::from_units(&[0.1]);
    let outcome = attempt_capture(&target, &book, &snapshot, &mut rng);
    assert_eq!(outcome, CaptureOutcome::Captured { probability: 0.3 });
    book.store(target.size).expect("fits");
    assert_eq!(book.free_capacity(), 2);
}

#[test]
fn standing_target_consumes_no_rng() {
    let book = Book::with_bonus(BookTier::Master, 10, 1.0);
    let target = CaptureTarget::new(
        CombatantId(9),
        Health::new(50, 100),
        1,
        BookTier::Starter,
        0.3,
    );
    let mut rng = PcgRng::new(123);
    let untouched = rng.clone();

    let outcome = attempt_capture(&target, &book, &Default::default(), &mut rng);

    assert_eq!(outcome, CaptureOutcome::Rejected(RejectReason::NotDefeated));
    assert_eq!(rng, untouched);
    assert_eq!(rng.next_u32(), untouched.clone().next_u32());
}
