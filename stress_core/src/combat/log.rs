//! CombatLog - Structured record of everything a resolver did

use super::attack::HitResult;
use super::outcome::DamageOutcome;
use crate::types::{CharacterId, StressKind};
use serde::Serialize;
use std::fmt;
use tracing::Level;

/// A state change or terminal condition reported by a resolver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    DamageIncoming { amount: i32, kind: StressKind },
    StressBoxFilled { track: StressKind, capacity: i32 },
    ConsequenceTaken { slot: StressKind, remaining: i32 },
    NoConsequenceSlot { kind: StressKind, amount: i32 },
    TakenOut { excess: i32 },
    ConsequenceHealed { slot: StressKind },
    StressBoxHealed { track: StressKind, capacity: i32 },
    TendFinished { kind: StressKind, remaining: i32 },
    UnsupportedHealKind { kind: StressKind },
    SkillMissing { skill: String },
    HitRolled { bonus: i32, roll: i32, total: i32 },
    Misfire { self_damage: i32, outcome: DamageOutcome },
    HitResolved { hit: HitResult },
    SecondRollFailed { total: i32 },
    DamageRolled { bonus: i32, roll: i32, total: i32 },
    DamageCapped { rolled: i32, cap: i32 },
    CritApplied { multiplier: f64, damage: i32 },
    DamageResolved { damage: i32 },
    AffinityUnset,
    MissingCharacter { id: CharacterId },
    TemporaryBoxesCleared { track: StressKind, count: usize },
}

impl CombatEvent {
    /// Stable snake_case name, used to query the log
    pub fn kind(&self) -> &'static str {
        match self {
            CombatEvent::DamageIncoming { .. } => "damage_incoming",
            CombatEvent::StressBoxFilled { .. } => "stress_box_filled",
            CombatEvent::ConsequenceTaken { .. } => "consequence_taken",
            CombatEvent::NoConsequenceSlot { .. } => "no_consequence_slot",
            CombatEvent::TakenOut { .. } => "taken_out",
            CombatEvent::ConsequenceHealed { .. } => "consequence_healed",
            CombatEvent::StressBoxHealed { .. } => "stress_box_healed",
            CombatEvent::TendFinished { .. } => "tend_finished",
            CombatEvent::UnsupportedHealKind { .. } => "unsupported_heal_kind",
            CombatEvent::SkillMissing { .. } => "skill_missing",
            CombatEvent::HitRolled { .. } => "hit_rolled",
            CombatEvent::Misfire { .. } => "misfire",
            CombatEvent::HitResolved { .. } => "hit_resolved",
            CombatEvent::SecondRollFailed { .. } => "second_roll_failed",
            CombatEvent::DamageRolled { .. } => "damage_rolled",
            CombatEvent::DamageCapped { .. } => "damage_capped",
            CombatEvent::CritApplied { .. } => "crit_applied",
            CombatEvent::DamageResolved { .. } => "damage_resolved",
            CombatEvent::AffinityUnset => "affinity_unset",
            CombatEvent::MissingCharacter { .. } => "missing_character",
            CombatEvent::TemporaryBoxesCleared { .. } => "temporary_boxes_cleared",
        }
    }

    /// Severity the event is logged at
    pub fn level(&self) -> Level {
        match self {
            CombatEvent::NoConsequenceSlot { .. }
            | CombatEvent::UnsupportedHealKind { .. }
            | CombatEvent::SkillMissing { .. }
            | CombatEvent::Misfire { .. } => Level::WARN,
            CombatEvent::TakenOut { .. }
            | CombatEvent::AffinityUnset
            | CombatEvent::MissingCharacter { .. } => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::DamageIncoming { amount, kind } => {
                write!(f, "taking {} {} damage", amount, kind)
            }
            CombatEvent::StressBoxFilled { track, capacity } => {
                write!(f, "filled {} box [{}], damage absorbed", track, capacity)
            }
            CombatEvent::ConsequenceTaken { slot, remaining } => {
                write!(f, "took Mild {} consequence ({} remaining)", slot, remaining)
            }
            CombatEvent::NoConsequenceSlot { kind, amount } => {
                write!(f, "no free Mild consequence slot for {} {} damage", amount, kind)
            }
            CombatEvent::TakenOut { excess } => {
                write!(f, "{} damage remains with nothing left to absorb it, TAKEN OUT", excess)
            }
            CombatEvent::ConsequenceHealed { slot } => {
                write!(f, "cleared Mild {} consequence", slot)
            }
            CombatEvent::StressBoxHealed { track, capacity } => {
                write!(f, "cleared {} box [{}]", track, capacity)
            }
            CombatEvent::TendFinished { kind, remaining } => {
                write!(f, "{} tending complete, {} shifts unused", kind, remaining)
            }
            CombatEvent::UnsupportedHealKind { kind } => {
                write!(f, "tending does not heal {}", kind)
            }
            CombatEvent::SkillMissing { skill } => {
                write!(f, "skill '{}' not found, assuming 0", skill)
            }
            CombatEvent::HitRolled { bonus, roll, total } => {
                write!(f, "hit roll {} + {} = {}", bonus, roll, total)
            }
            CombatEvent::Misfire { self_damage, outcome } => {
                write!(f, "MISFIRE, caster takes {} Aether damage ({})", self_damage, outcome)
            }
            CombatEvent::HitResolved { hit } => write!(f, "{}", hit),
            CombatEvent::SecondRollFailed { total } => {
                write!(f, "damage roll {} failed, no damage", total)
            }
            CombatEvent::DamageCapped { rolled, cap } => {
                write!(f, "damage capped by Aether spent (rolled {}, capped to {})", rolled, cap)
            }
            CombatEvent::CritApplied { multiplier, damage } => {
                write!(f, "crit x{} applied, damage is now {}", multiplier, damage)
            }
            CombatEvent::DamageRolled { bonus, roll, total } => {
                write!(f, "damage roll {} + {} = {}", bonus, roll, total)
            }
            CombatEvent::DamageResolved { damage } => write!(f, "final damage = {}", damage),
            CombatEvent::AffinityUnset => write!(f, "attack affinity skill is not set"),
            CombatEvent::MissingCharacter { id } => {
                write!(f, "no character state for '{}'", id)
            }
            CombatEvent::TemporaryBoxesCleared { track, count } => {
                write!(f, "removed {} temporary {} boxes", count, track)
            }
        }
    }
}

/// Ordered list of events from one or more resolver calls
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event and forward it to `tracing`
    pub fn push(&mut self, event: CombatEvent) {
        let kind = event.kind();
        let level = event.level();
        if level == Level::ERROR {
            tracing::error!(kind, "{}", event);
        } else if level == Level::WARN {
            tracing::warn!(kind, "{}", event);
        } else {
            tracing::info!(kind, "{}", event);
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Events with the given kind name
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a CombatEvent> + 'a {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    pub fn count(&self, kind: &str) -> usize {
        self.of_kind(kind).count()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.of_kind(kind).next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Drain all events, leaving the log empty
    pub fn take(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_by_kind() {
        let mut log = CombatLog::new();
        log.push(CombatEvent::DamageIncoming {
            amount: 2,
            kind: StressKind::Endurance,
        });
        log.push(CombatEvent::StressBoxFilled {
            track: StressKind::Resolve,
            capacity: 2,
        });
        log.push(CombatEvent::SkillMissing {
            skill: "Will".to_string(),
        });

        assert_eq!(log.len(), 3);
        assert!(log.contains("stress_box_filled"));
        assert_eq!(log.count("skill_missing"), 1);
        assert!(!log.contains("taken_out"));
    }

    #[test]
    fn test_levels() {
        assert_eq!(CombatEvent::TakenOut { excess: 1 }.level(), Level::ERROR);
        assert_eq!(
            CombatEvent::SkillMissing {
                skill: "Will".to_string(),
            }
            .level(),
            Level::WARN
        );
        assert_eq!(CombatEvent::DamageResolved { damage: 3 }.level(), Level::INFO);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_string(&CombatEvent::TakenOut { excess: 3 }).unwrap();
        assert!(json.contains("\"event\":\"taken_out\""));
        assert!(json.contains("\"excess\":3"));
    }

    #[test]
    fn test_take_drains() {
        let mut log = CombatLog::new();
        log.push(CombatEvent::AffinityUnset);
        let drained = log.take();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }
}
