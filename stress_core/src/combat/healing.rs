//! Tending - Clear a consequence, then stress boxes

use super::log::{CombatEvent, CombatLog};
use crate::character::CombatState;
use crate::types::StressKind;

/// Heal `shifts` of Endurance or Resolve harm
///
/// Returns the unspent shifts.
pub fn tend(state: &mut CombatState, kind: StressKind, shifts: i32) -> i32 {
    tend_with(state, kind, shifts, &mut CombatLog::new())
}

/// Heal, recording what happened in `log`
///
/// The matching Mild consequence is cleared first if the shifts cover it;
/// what is left clears stress boxes smallest first. Aether is not healed by
/// tending and comes back untouched.
pub fn tend_with(
    state: &mut CombatState,
    kind: StressKind,
    shifts: i32,
    log: &mut CombatLog,
) -> i32 {
    if kind == StressKind::Aether {
        log.push(CombatEvent::UnsupportedHealKind { kind });
        return shifts;
    }

    let (healed, mut remaining) = state.consequences.heal_mild(kind, shifts);
    if healed {
        log.push(CombatEvent::ConsequenceHealed { slot: kind });
    }

    if remaining > 0 {
        remaining = state.track_mut(kind).heal_smallest_each(remaining, |capacity| {
            log.push(CombatEvent::StressBoxHealed {
                track: kind,
                capacity,
            })
        });
    }

    log.push(CombatEvent::TendFinished { kind, remaining });
    remaining
}
