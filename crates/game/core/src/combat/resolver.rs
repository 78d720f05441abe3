//! Attack resolution: crit roll, damage, counter decision.

use tracing::debug;

use crate::config::CombatRules;
use crate::effectiveness::TypeChart;
use crate::entity::{CombatFlags, Combatant};
use crate::modifiers::{ModifierKey, ModifierSnapshot};
use crate::rng::RngSource;

use super::damage::{DamageInput, Move, calculate_damage};
use super::result::{CombatResult, CounterOutcome};

/// Resolves attacks against a type chart and combat rules.
///
/// # Roll order
///
/// 1. Critical roll, always taken (one draw).
/// 2. Vaporize roll, if the defender survived and can vaporize.
/// 3. Counter-punch roll, if the defender survived, can counter-punch and
///    did not vaporize.
///
/// Callers seed `rng` per action; the same inputs and RNG state always give
/// the same result.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver<'a> {
    chart: &'a TypeChart,
    rules: &'a CombatRules,
}

impl<'a> CombatResolver<'a> {
    pub const fn new(chart: &'a TypeChart, rules: &'a CombatRules) -> Self {
        Self { chart, rules }
    }

    pub fn resolve(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        mv: &Move,
        modifiers: &ModifierSnapshot,
        rng: &mut impl RngSource,
    ) -> CombatResult {
        let type_multiplier = self.chart.effectiveness(mv.move_type, &defender.types);

        let crit_chance = scaled_chance(
            attacker.critical_chance,
            modifiers.multiplier(ModifierKey::CriticalChance),
        );
        let was_critical = rng.chance(crit_chance);
        let critical_multiplier = if was_critical {
            self.rules.critical_multiplier
        } else {
            1.0
        };

        let damage = calculate_damage(
            self.rules.formula,
            DamageInput {
                power: mv.base_power,
                attack: attacker.effective_attack(modifiers),
                defense: defender.effective_defense(modifiers),
                type_multiplier,
                critical_multiplier,
            },
        );
        let defender_defeated = damage >= defender.health.current();

        let counter = if defender_defeated {
            CounterOutcome::None
        } else {
            self.counter(defender, attacker, modifiers, rng)
        };

        debug!(
            attacker = %attacker.id,
            defender = %defender.id,
            r#move = %mv.name,
            damage,
            was_critical,
            type_multiplier,
            defender_defeated,
            ?counter,
            "attack resolved"
        );

        CombatResult {
            damage,
            was_critical,
            type_multiplier,
            defender_defeated,
            counter,
        }
    }

    /// The surviving defender's response. Vaporize takes priority; each
    /// branch has its own draw.
    fn counter(
        &self,
        defender: &Combatant,
        attacker: &Combatant,
        modifiers: &ModifierSnapshot,
        rng: &mut impl RngSource,
    ) -> CounterOutcome {
        let scale = modifiers.multiplier(ModifierKey::CounterChance);

        if defender.flags.contains(CombatFlags::VAPORIZE)
            && rng.chance(scaled_chance(defender.vaporize_chance, scale))
        {
            return CounterOutcome::Vaporize;
        }

        if defender.flags.contains(CombatFlags::COUNTER_PUNCH)
            && rng.chance(scaled_chance(defender.counter_chance, scale))
        {
            return CounterOutcome::CounterPunch(self.counter_damage(defender, attacker, modifiers));
        }

        CounterOutcome::None
    }

    /// Counter-punch uses the configured power and the defender's primary
    /// type, with roles swapped and no crit.
    fn counter_damage(
        &self,
        defender: &Combatant,
        attacker: &Combatant,
        modifiers: &ModifierSnapshot,
    ) -> u32 {
        calculate_damage(
            self.rules.formula,
            DamageInput {
                power: self.rules.counter_power,
                attack: defender.effective_attack(modifiers),
                defense: attacker.effective_defense(modifiers),
                type_multiplier: self
                    .chart
                    .effectiveness(defender.types.primary(), &attacker.types),
                critical_multiplier: 1.0,
            },
        )
    }
}

fn scaled_chance(chance: f64, multiplier: f64) -> f64 {
    let scaled = chance * multiplier;
    if scaled.is_nan() { 0.0 } else { scaled.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DamageFormula;
    use crate::curse::CurseId;
    use crate::entity::{BaseStats, CombatantId, Side};
    use crate::modifiers::{Effect, EffectSet, ModifierRegistry, ModifierSource};
    use crate::rng::{PcgRng, ScriptedRng};
    use crate::types::MonType;

    fn difference_rules() -> CombatRules {
        CombatRules {
            formula: DamageFormula::Difference,
            ..CombatRules::default()
        }
    }

    fn player(attack: u32) -> Combatant {
        Combatant::new(
            CombatantId(1),
            Side::Player,
            MonType::Normal,
            100,
            BaseStats::new(attack, 10, 10),
        )
    }

    fn wild(defense: u32) -> Combatant {
        Combatant::new(
            CombatantId(2),
            Side::Wild,
            MonType::Normal,
            100,
            BaseStats::new(30, defense, 10),
        )
    }

    fn punch() -> Move {
        Move::new("punch", MonType::Normal, 100)
    }

    fn jab() -> Move {
        Move::new("jab", MonType::Normal, 10)
    }

    #[test]
    fn plain_hit_deals_attack_minus_defense() {
        let chart = TypeChart::standard();
        let rules = difference_rules();
        let resolver = CombatResolver::new(&chart, &rules);
        let mut rng = PcgRng::new(1);

        let result = resolver.resolve(
            &player(10),
            &wild(5),
            &punch(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );

        assert_eq!(result.damage, 5);
        assert!(!result.was_critical);
        assert_eq!(result.type_multiplier, 1.0);
        assert!(!result.defender_defeated);
        assert_eq!(result.counter, CounterOutcome::None);
    }

    #[test]
    fn powerful_mons_curse_raises_defense() {
        let chart = TypeChart::standard();
        let rules = difference_rules();
        let resolver = CombatResolver::new(&chart, &rules);

        let mut registry = ModifierRegistry::new();
        let curse = EffectSet::new([
            Effect::multiplier(ModifierKey::WildAttack, 1.5),
            Effect::multiplier(ModifierKey::WildDefense, 1.5),
        ])
        .expect("valid");
        registry
            .apply(ModifierSource::Curse(CurseId(1)), &curse)
            .expect("apply");

        let mut rng = PcgRng::new(1);
        let result = resolver.resolve(
            &player(10),
            &wild(5),
            &punch(),
            &registry.snapshot(),
            &mut rng,
        );
        // 10 − 7.5 = 2.5 → 3
        assert_eq!(result.damage, 3);
    }

    #[test]
    fn ratio_formula_uses_fractional_effective_defense() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);

        let mut registry = ModifierRegistry::new();
        let softened = EffectSet::new([Effect::multiplier(ModifierKey::WildDefense, 0.5)])
            .expect("valid");
        registry
            .apply(ModifierSource::Curse(CurseId(4)), &softened)
            .expect("apply");

        let mut rng = PcgRng::new(1);
        let result = resolver.resolve(
            &player(10),
            &wild(1),
            &jab(),
            &registry.snapshot(),
            &mut rng,
        );
        // 10 × 10 / 0.5
        assert_eq!(result.damage, 200);
        assert!(result.defender_defeated);
    }

    #[test]
    fn critical_roll_doubles_damage() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let attacker = player(20).with_critical_chance(0.5);
        let mv = Move::new("punch", MonType::Normal, 10);

        let mut hit = ScriptedRng::from_units(&[0.1]);
        let crit = resolver.resolve(
            &attacker,
            &wild(10),
            &mv,
            &ModifierSnapshot::empty(),
            &mut hit,
        );
        assert!(crit.was_critical);
        assert_eq!(crit.damage, 40);

        let mut miss = ScriptedRng::from_units(&[0.9]);
        let normal = resolver.resolve(
            &attacker,
            &wild(10),
            &mv,
            &ModifierSnapshot::empty(),
            &mut miss,
        );
        assert!(!normal.was_critical);
        assert_eq!(normal.damage, 20);
    }

    #[test]
    fn type_chart_feeds_multiplier() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let defender = Combatant::new(
            CombatantId(3),
            Side::Wild,
            crate::types::TypeSet::dual(MonType::Grass, MonType::Bug),
            100,
            BaseStats::new(10, 10, 10),
        );
        let ember = Move::new("ember", MonType::Fire, 10);
        let mut rng = PcgRng::new(4);

        let result = resolver.resolve(
            &player(10),
            &defender,
            &ember,
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        assert_eq!(result.type_multiplier, 4.0);
        assert_eq!(result.damage, 40);
    }

    #[test]
    fn vaporize_takes_priority_over_counter_punch() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let defender = wild(10).with_counter_punch(1.0).with_vaporize(1.0);
        let mut rng = ScriptedRng::from_units(&[0.9, 0.0, 0.0]);

        let result = resolver.resolve(
            &player(10),
            &defender,
            &jab(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        assert_eq!(result.counter, CounterOutcome::Vaporize);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn failed_vaporize_falls_back_to_counter_punch() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let defender = wild(10).with_counter_punch(0.5).with_vaporize(0.1);
        // crit miss, vaporize miss, counter hit
        let mut rng = ScriptedRng::from_units(&[0.9, 0.5, 0.2]);

        let result = resolver.resolve(
            &player(10),
            &defender,
            &jab(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        // 40 × 30 / 10
        assert_eq!(result.counter, CounterOutcome::CounterPunch(120));
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn defeated_defender_never_counters() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let defender = wild(10).with_health(5).with_counter_punch(1.0);
        let mut rng = ScriptedRng::from_units(&[0.9]);

        let result = resolver.resolve(
            &player(10),
            &defender,
            &punch(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        assert!(result.defender_defeated);
        assert_eq!(result.counter, CounterOutcome::None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn counter_chance_modifier_can_suppress_counters() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);

        let mut registry = ModifierRegistry::new();
        let calm = EffectSet::new([Effect::multiplier(ModifierKey::CounterChance, 0.0)])
            .expect("valid");
        registry
            .apply(ModifierSource::Override(1), &calm)
            .expect("apply");

        let defender = wild(10).with_counter_punch(1.0);
        let mut rng = ScriptedRng::from_units(&[0.9, 0.0]);
        let result = resolver.resolve(
            &player(10),
            &defender,
            &jab(),
            &registry.snapshot(),
            &mut rng,
        );
        assert_eq!(result.counter, CounterOutcome::None);
    }

    #[test]
    fn apply_updates_both_sides() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let mut attacker = player(10);
        let mut defender = wild(10).with_vaporize(1.0);
        let mut rng = ScriptedRng::from_units(&[0.9, 0.0]);

        let result = resolver.resolve(
            &attacker,
            &defender,
            &jab(),
            &ModifierSnapshot::empty(),
            &mut rng,
        );
        assert!(result.attacker_eliminated(&attacker));
        result.apply(&mut attacker, &mut defender);

        assert_eq!(defender.health.current(), 90);
        assert!(attacker.is_defeated());
    }

    #[test]
    fn same_seed_same_result() {
        let chart = TypeChart::standard();
        let rules = CombatRules::default();
        let resolver = CombatResolver::new(&chart, &rules);
        let attacker = player(25).with_critical_chance(0.3);
        let defender = wild(12).with_counter_punch(0.4).with_vaporize(0.05);
        let snapshot = ModifierSnapshot::empty();

        for seed in 0..32 {
            let a = resolver.resolve(
                &attacker,
                &defender,
                &punch(),
                &snapshot,
                &mut PcgRng::new(seed),
            );
            let b = resolver.resolve(
                &attacker,
                &defender,
                &punch(),
                &snapshot,
                &mut PcgRng::new(seed),
            );
            assert_eq!(a, b);
        }
    }
}
