//! Damage resolution - Stress boxes first, then a Mild consequence

use super::log::{CombatEvent, CombatLog};
use super::outcome::DamageOutcome;
use crate::character::CombatState;
use crate::types::StressKind;

/// Tracks tried for single-box absorption, in order
///
/// Resolve is always tried before Endurance whatever the damage kind.
pub const ABSORPTION_ORDER: [StressKind; 2] = [StressKind::Resolve, StressKind::Endurance];

/// Apply `amount` shifts of `kind` damage to a character
pub fn apply_damage(state: &mut CombatState, amount: i32, kind: StressKind) -> DamageOutcome {
    apply_damage_with(state, amount, kind, &mut CombatLog::new())
}

/// Apply damage, recording what happened in `log`
///
/// Steps, stopping as soon as the hit is absorbed:
/// 1. Fill one Resolve box big enough for the whole hit
/// 2. Fill one Endurance box big enough for the whole hit
/// 3. Take a Mild consequence (matching slot, else Aether)
/// 4. Whatever is left takes the character out
///
/// At most one box or one consequence slot changes per call. Non-positive
/// amounts change nothing.
pub fn apply_damage_with(
    state: &mut CombatState,
    amount: i32,
    kind: StressKind,
    log: &mut CombatLog,
) -> DamageOutcome {
    if amount <= 0 {
        return DamageOutcome::NoDamage;
    }
    log.push(CombatEvent::DamageIncoming { amount, kind });

    for track_kind in ABSORPTION_ORDER {
        let track = state.track_mut(track_kind);
        if let Some(picked) = track.find_best_box(amount) {
            track.fill_box(picked.index);
            log.push(CombatEvent::StressBoxFilled {
                track: track_kind,
                capacity: picked.capacity,
            });
            return DamageOutcome::Absorbed {
                track: track_kind,
                capacity: picked.capacity,
            };
        }
    }

    let excess = match state.consequences.take_mild(kind, amount) {
        (Some(slot), remaining) => {
            log.push(CombatEvent::ConsequenceTaken { slot, remaining });
            if remaining <= 0 {
                return DamageOutcome::ConsequenceTaken { slot, remaining };
            }
            remaining
        }
        (None, remaining) => {
            log.push(CombatEvent::NoConsequenceSlot { kind, amount });
            remaining
        }
    };

    // TODO: decide whether taken out characters reset or freeze their tracks
    log.push(CombatEvent::TakenOut { excess });
    DamageOutcome::TakenOut { excess }
}
