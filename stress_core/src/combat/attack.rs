//! Magical attacks - Roll 1 decides the hit, Roll 2 the damage
//!
//! Both rolls are `skill bonus + 4dF`, with the dice rolled by the caller.

use super::damage::apply_damage_with;
use super::log::{CombatEvent, CombatLog};
use super::outcome::DamageOutcome;
use crate::character::{Character, CombatState};
use crate::config::RulesConfig;
use crate::types::StressKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Roll 1 totals at or below this misfire
pub const MISFIRE_THRESHOLD: i32 = -4;

/// Outcome of the hit roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HitResult {
    /// The spell backfired and the caster took Aether damage
    Misfire {
        total: i32,
        self_damage: i32,
        outcome: DamageOutcome,
    },
    Miss,
    Hit,
    /// +25% damage
    Crit,
    /// +50% damage
    CritPlus,
    /// +50% damage, plus an overcharge left to the caller
    CritWithStyle,
}

impl HitResult {
    /// Numeric code: the raw total for a misfire, -2 for a miss, 1..=4 otherwise
    pub fn value(&self) -> i32 {
        match self {
            HitResult::Misfire { total, .. } => *total,
            HitResult::Miss => -2,
            HitResult::Hit => 1,
            HitResult::Crit => 2,
            HitResult::CritPlus => 3,
            HitResult::CritWithStyle => 4,
        }
    }

    /// Whether Roll 2 should be made at all
    pub fn is_hit(&self) -> bool {
        !matches!(self, HitResult::Misfire { .. } | HitResult::Miss)
    }

    /// Damage multiplier for Roll 2, `None` on a miss or misfire
    pub fn damage_multiplier(&self, rules: &RulesConfig) -> Option<f64> {
        match self {
            HitResult::Misfire { .. } | HitResult::Miss => None,
            HitResult::Hit => Some(1.0),
            HitResult::Crit => Some(rules.attack.crit_multiplier),
            HitResult::CritPlus => Some(rules.attack.crit_plus_multiplier),
            HitResult::CritWithStyle => Some(rules.attack.style_multiplier),
        }
    }
}

impl fmt::Display for HitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitResult::Misfire { total, .. } => write!(f, "MISFIRE ({})", total),
            HitResult::Miss => write!(f, "MISS"),
            HitResult::Hit => write!(f, "HIT"),
            HitResult::Crit => write!(f, "CRIT HIT (+25%)"),
            HitResult::CritPlus => write!(f, "CRIT HIT (+50%)"),
            HitResult::CritWithStyle => write!(f, "CRIT WITH STYLE (+50%, overcharge)"),
        }
    }
}

/// Roll 1 with default rules
pub fn resolve_hit(state: &mut CombatState, skill_bonus: i32, roll: i32) -> HitResult {
    resolve_hit_with(
        state,
        skill_bonus,
        roll,
        &RulesConfig::default(),
        &mut CombatLog::new(),
    )
}

/// Roll 1: classify `skill_bonus + roll`
///
/// | total     | result          |
/// |-----------|-----------------|
/// | <= -4     | Misfire         |
/// | -3 ..= -2 | Miss            |
/// | -1 ..= 1  | Hit             |
/// | 2         | Crit            |
/// | 3         | CritPlus        |
/// | >= 4      | CritWithStyle   |
///
/// A misfire immediately deals `|total| - misfire_offset` Aether damage to
/// the caster's own `state`.
pub fn resolve_hit_with(
    state: &mut CombatState,
    skill_bonus: i32,
    roll: i32,
    rules: &RulesConfig,
    log: &mut CombatLog,
) -> HitResult {
    let total = skill_bonus + roll;
    log.push(CombatEvent::HitRolled {
        bonus: skill_bonus,
        roll,
        total,
    });

    let hit = match total {
        t if t <= MISFIRE_THRESHOLD => {
            let self_damage = t.abs() - rules.attack.misfire_offset;
            let outcome = apply_damage_with(state, self_damage, StressKind::Aether, log);
            log.push(CombatEvent::Misfire {
                self_damage,
                outcome,
            });
            return HitResult::Misfire {
                total,
                self_damage,
                outcome,
            };
        }
        -3..=-2 => HitResult::Miss,
        -1..=1 => HitResult::Hit,
        2 => HitResult::Crit,
        3 => HitResult::CritPlus,
        _ => HitResult::CritWithStyle,
    };

    log.push(CombatEvent::HitResolved { hit });
    hit
}

/// Roll 2 with default rules
pub fn resolve_damage(hit: HitResult, aether_spent: i32, skill_bonus: i32, roll: i32) -> i32 {
    resolve_damage_with(
        hit,
        aether_spent,
        skill_bonus,
        roll,
        &RulesConfig::default(),
        &mut CombatLog::new(),
    )
}

/// Roll 2: damage from `skill_bonus + roll`, capped by Aether spent
///
/// A miss or misfire returns 0 without looking at the roll. The capped
/// value is scaled by the crit multiplier and rounded half away from zero
/// (`f64::round`). Never negative.
pub fn resolve_damage_with(
    hit: HitResult,
    aether_spent: i32,
    skill_bonus: i32,
    roll: i32,
    rules: &RulesConfig,
    log: &mut CombatLog,
) -> i32 {
    let Some(multiplier) = hit.damage_multiplier(rules) else {
        return 0;
    };

    let total = skill_bonus + roll;
    log.push(CombatEvent::DamageRolled {
        bonus: skill_bonus,
        roll,
        total,
    });
    if total < 0 {
        log.push(CombatEvent::SecondRollFailed { total });
        return 0;
    }

    let base = total.min(aether_spent).max(0);
    if total > aether_spent {
        log.push(CombatEvent::DamageCapped {
            rolled: total,
            cap: base,
        });
    }

    let damage = (f64::from(base) * multiplier).round() as i32;
    if hit != HitResult::Hit {
        log.push(CombatEvent::CritApplied { multiplier, damage });
    }

    log.push(CombatEvent::DamageResolved { damage });
    damage
}

/// Roll 1 for a character, using the named physical skill
///
/// An unknown skill counts as 0 and is reported in the log.
pub fn magical_attack_hit(
    attacker: &mut Character,
    physical_skill: &str,
    roll: i32,
    rules: &RulesConfig,
    log: &mut CombatLog,
) -> HitResult {
    let bonus = attacker.skill_bonus(physical_skill, log);
    resolve_hit_with(&mut attacker.combat, bonus, roll, rules, log)
}

/// Roll 2 for a character, using their attack affinity skill
///
/// With no attack affinity set the roll is abandoned and deals 0.
pub fn magical_attack_damage(
    attacker: &Character,
    hit: HitResult,
    aether_spent: i32,
    roll: i32,
    rules: &RulesConfig,
    log: &mut CombatLog,
) -> i32 {
    if !hit.is_hit() {
        return 0;
    }

    let skill = attacker.affinity.attack.as_str();
    if skill.is_empty() {
        log.push(CombatEvent::AffinityUnset);
        return 0;
    }

    let bonus = attacker.skill_bonus(skill, log);
    resolve_damage_with(hit, aether_spent, bonus, roll, rules, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::StressTrack;
    use crate::types::Affinity;

    fn state() -> CombatState {
        CombatState::new(
            StressTrack::new([1, 2]).unwrap(),
            StressTrack::new([1, 2, 3]).unwrap(),
            StressTrack::new([1, 2, 3]).unwrap(),
        )
    }

    #[test]
    fn test_hit_chart() {
        let cases = [
            (-3, HitResult::Miss),
            (-2, HitResult::Miss),
            (-1, HitResult::Hit),
            (0, HitResult::Hit),
            (1, HitResult::Hit),
            (2, HitResult::Crit),
            (3, HitResult::CritPlus),
            (4, HitResult::CritWithStyle),
            (7, HitResult::CritWithStyle),
        ];

        for (total, expected) in cases {
            let mut s = state();
            let hit = resolve_hit(&mut s, 0, total);
            assert_eq!(hit, expected, "total {}", total);
            assert_eq!(s, state(), "total {} should not touch the caster", total);
        }
    }

    #[test]
    fn test_hit_values() {
        assert_eq!(HitResult::Miss.value(), -2);
        assert_eq!(HitResult::Hit.value(), 1);
        assert_eq!(HitResult::Crit.value(), 2);
        assert_eq!(HitResult::CritPlus.value(), 3);
        assert_eq!(HitResult::CritWithStyle.value(), 4);
    }

    #[test]
    fn test_misfire_is_never_a_hit() {
        // Built by hand with an out of range total
        let odd = HitResult::Misfire {
            total: 3,
            self_damage: 0,
            outcome: DamageOutcome::NoDamage,
        };
        assert!(!odd.is_hit());
        assert!(!HitResult::Miss.is_hit());
        assert!(HitResult::Hit.is_hit());

        let caster = Character::new("arden", "Arden", state())
            .with_skill("Telekinesis", 2)
            .with_affinity(Affinity::attacking_with("Telekinesis"));
        let mut log = CombatLog::new();
        let damage = magical_attack_damage(&caster, odd, 3, 2, &RulesConfig::default(), &mut log);

        assert_eq!(damage, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_misfire_damages_caster() {
        let mut s = state();
        let mut log = CombatLog::new();
        let hit = resolve_hit_with(&mut s, 1, -5, &RulesConfig::default(), &mut log);

        assert_eq!(hit.value(), -4);
        match hit {
            HitResult::Misfire {
                self_damage,
                outcome,
                ..
            } => {
                assert_eq!(self_damage, 1);
                // Resolve is tried first even for Aether damage
                assert_eq!(
                    outcome,
                    DamageOutcome::Absorbed {
                        track: StressKind::Resolve,
                        capacity: 1,
                    }
                );
            }
            other => panic!("expected misfire, got {:?}", other),
        }
        assert_eq!(s.resolve.filled_capacities(), vec![1]);
        assert!(!s.aether.has_filled());
        assert_eq!(log.count("misfire"), 1);
        assert_eq!(log.count("damage_incoming"), 1);
    }

    #[test]
    fn test_worse_misfire_hurts_more() {
        let mut s = state();
        let hit = resolve_hit(&mut s, -2, -4);

        assert_eq!(hit.value(), -6);
        assert_eq!(s.resolve.filled_capacities(), vec![3]);
    }

    #[test]
    fn test_crit_damage_rounds() {
        // min(3, 3) * 1.25 = 3.75 -> 4
        assert_eq!(resolve_damage(HitResult::Crit, 3, 1, 2), 4);
        // min(3, 5) * 1.25 = 3.75 -> 4
        assert_eq!(resolve_damage(HitResult::Crit, 5, 2, 1), 4);
        // 2 * 1.25 = 2.5 -> 3 (half away from zero)
        assert_eq!(resolve_damage(HitResult::Crit, 2, 2, 0), 3);
        // 1 * 1.5 = 1.5 -> 2
        assert_eq!(resolve_damage(HitResult::CritPlus, 4, 0, 1), 2);
        assert_eq!(resolve_damage(HitResult::CritWithStyle, 4, 3, 1), 6);
    }

    #[test]
    fn test_damage_capped_by_aether() {
        let mut log = CombatLog::new();
        let damage =
            resolve_damage_with(HitResult::Hit, 2, 3, 2, &RulesConfig::default(), &mut log);

        assert_eq!(damage, 2);
        assert!(log.contains("damage_capped"));
        assert!(!log.contains("crit_applied"));
    }

    #[test]
    fn test_miss_deals_nothing() {
        let mut log = CombatLog::new();
        let damage =
            resolve_damage_with(HitResult::Miss, 4, 4, 4, &RulesConfig::default(), &mut log);

        assert_eq!(damage, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_failed_second_roll() {
        let mut log = CombatLog::new();
        let damage =
            resolve_damage_with(HitResult::CritPlus, 4, 0, -1, &RulesConfig::default(), &mut log);

        assert_eq!(damage, 0);
        assert!(log.contains("second_roll_failed"));
    }

    #[test]
    fn test_zero_roll_deals_zero() {
        assert_eq!(resolve_damage(HitResult::CritWithStyle, 3, 0, 0), 0);
    }

    #[test]
    fn test_no_aether_spent_no_damage() {
        assert_eq!(resolve_damage(HitResult::Hit, 0, 3, 1), 0);
        assert_eq!(resolve_damage(HitResult::Hit, -2, 3, 1), 0);
    }

    #[test]
    fn test_configured_multiplier() {
        let mut rules = RulesConfig::default();
        rules.attack.crit_multiplier = 2.0;

        let damage = resolve_damage_with(HitResult::Crit, 3, 3, 0, &rules, &mut CombatLog::new());
        assert_eq!(damage, 6);
    }

    #[test]
    fn test_character_missing_skill_counts_zero() {
        let mut caster = Character::new("vessa", "Vessa", state());
        let mut log = CombatLog::new();

        let hit = magical_attack_hit(
            &mut caster,
            "Marksmanship",
            2,
            &RulesConfig::default(),
            &mut log,
        );

        assert_eq!(hit, HitResult::Crit);
        assert_eq!(log.count("skill_missing"), 1);
    }

    #[test]
    fn test_character_uses_affinity_skill() {
        let caster = Character::new("vessa", "Vessa", state())
            .with_skill("Conjuration", 2)
            .with_affinity(Affinity::attacking_with("Conjuration"));

        let damage = magical_attack_damage(
            &caster,
            HitResult::Hit,
            5,
            1,
            &RulesConfig::default(),
            &mut CombatLog::new(),
        );
        assert_eq!(damage, 3);
    }

    #[test]
    fn test_unset_affinity_aborts_roll() {
        let caster = Character::new("vessa", "Vessa", state()).with_skill("Conjuration", 2);
        let mut log = CombatLog::new();

        let damage = magical_attack_damage(
            &caster,
            HitResult::CritWithStyle,
            5,
            4,
            &RulesConfig::default(),
            &mut log,
        );

        assert_eq!(damage, 0);
        assert!(log.contains("affinity_unset"));
        assert!(!log.contains("damage_rolled"));
    }
}
