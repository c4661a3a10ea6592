//! Consequences - Mild injuries that absorb overflow damage

use crate::types::StressKind;
use serde::{Deserialize, Serialize};

/// Shifts a Mild consequence absorbs, and what it costs to heal
pub const MILD_CONSEQUENCE_VALUE: i32 = 2;

/// The three Mild consequence slots
///
/// A slot holds `None` while free, or the description of the injury.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsequenceSet {
    #[serde(default)]
    pub endurance_mild: Option<String>,
    #[serde(default)]
    pub resolve_mild: Option<String>,
    #[serde(default)]
    pub aether_mild: Option<String>,
}

impl ConsequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Description held in the slot for `kind`, if occupied
    pub fn slot(&self, kind: StressKind) -> Option<&str> {
        match kind {
            StressKind::Endurance => self.endurance_mild.as_deref(),
            StressKind::Resolve => self.resolve_mild.as_deref(),
            StressKind::Aether => self.aether_mild.as_deref(),
        }
    }

    pub fn is_available(&self, kind: StressKind) -> bool {
        self.slot(kind).is_none()
    }

    /// Number of occupied slots
    pub fn occupied(&self) -> usize {
        StressKind::all()
            .iter()
            .filter(|k| !self.is_available(**k))
            .count()
    }

    /// Pick the slot a new consequence of `kind` would go into
    ///
    /// The matching slot wins; the Aether slot is the fallback for every kind.
    pub fn available_slot(&self, kind: StressKind) -> Option<StressKind> {
        if self.is_available(kind) {
            Some(kind)
        } else if self.is_available(StressKind::Aether) {
            Some(StressKind::Aether)
        } else {
            None
        }
    }

    /// Take a Mild consequence with a default description
    ///
    /// See [`ConsequenceSet::take_mild_described`].
    pub fn take_mild(&mut self, kind: StressKind, amount: i32) -> (Option<StressKind>, i32) {
        self.take_mild_described(kind, amount, None)
    }

    /// Take a Mild consequence against `amount` shifts
    ///
    /// Returns the slot used and the remaining damage. The remainder can go
    /// negative; anything `<= 0` is fully absorbed. With no free slot the
    /// amount comes back unchanged.
    pub fn take_mild_described(
        &mut self,
        kind: StressKind,
        amount: i32,
        description: Option<&str>,
    ) -> (Option<StressKind>, i32) {
        let Some(slot) = self.available_slot(kind) else {
            return (None, amount);
        };

        let text = description
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Mild {} Consequence", slot.name()));
        *self.slot_mut(slot) = Some(text);

        (Some(slot), amount - MILD_CONSEQUENCE_VALUE)
    }

    /// Heal the Mild consequence matching `kind` if the budget covers it
    ///
    /// The Aether slot is never healed here. Returns whether a slot was
    /// cleared and the remaining budget.
    pub fn heal_mild(&mut self, kind: StressKind, budget: i32) -> (bool, i32) {
        if kind == StressKind::Aether || budget < MILD_CONSEQUENCE_VALUE {
            return (false, budget);
        }

        let slot = self.slot_mut(kind);
        if slot.is_none() {
            return (false, budget);
        }
        *slot = None;

        (true, budget - MILD_CONSEQUENCE_VALUE)
    }

    fn slot_mut(&mut self, kind: StressKind) -> &mut Option<String> {
        match kind {
            StressKind::Endurance => &mut self.endurance_mild,
            StressKind::Resolve => &mut self.resolve_mild,
            StressKind::Aether => &mut self.aether_mild,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_matching_slot_first() {
        let mut set = ConsequenceSet::new();
        let (slot, remaining) = set.take_mild(StressKind::Endurance, 3);

        assert_eq!(slot, Some(StressKind::Endurance));
        assert_eq!(remaining, 1);
        assert_eq!(set.slot(StressKind::Endurance), Some("Mild Endurance Consequence"));
        assert!(set.is_available(StressKind::Aether));
    }

    #[test]
    fn test_falls_back_to_aether_slot() {
        let mut set = ConsequenceSet::new();
        set.resolve_mild = Some("Shaken".to_string());

        let (slot, remaining) = set.take_mild(StressKind::Resolve, 2);
        assert_eq!(slot, Some(StressKind::Aether));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_remainder_can_go_negative() {
        let mut set = ConsequenceSet::new();
        let (_, remaining) = set.take_mild(StressKind::Aether, 1);
        assert_eq!(remaining, -1);
    }

    #[test]
    fn test_no_slot_returns_amount() {
        let mut set = ConsequenceSet::new();
        set.endurance_mild = Some("Bruised ribs".to_string());
        set.aether_mild = Some("Singed".to_string());

        let (slot, remaining) = set.take_mild(StressKind::Endurance, 5);
        assert_eq!(slot, None);
        assert_eq!(remaining, 5);
        assert_eq!(set.slot(StressKind::Endurance), Some("Bruised ribs"));
    }

    #[test]
    fn test_custom_description() {
        let mut set = ConsequenceSet::new();
        set.take_mild_described(StressKind::Resolve, 2, Some("Rattled"));
        assert_eq!(set.slot(StressKind::Resolve), Some("Rattled"));
        assert_eq!(set.occupied(), 1);
    }

    #[test]
    fn test_empty_description_uses_default() {
        let mut set = ConsequenceSet::new();
        set.take_mild_described(StressKind::Endurance, 2, Some(""));
        assert_eq!(set.slot(StressKind::Endurance), Some("Mild Endurance Consequence"));
    }

    #[test]
    fn test_heal_matching_slot() {
        let mut set = ConsequenceSet::new();
        set.take_mild(StressKind::Endurance, 2);

        let (healed, remaining) = set.heal_mild(StressKind::Endurance, 3);
        assert!(healed);
        assert_eq!(remaining, 1);
        assert!(set.is_available(StressKind::Endurance));
    }

    #[test]
    fn test_heal_needs_full_cost() {
        let mut set = ConsequenceSet::new();
        set.take_mild(StressKind::Resolve, 2);

        let (healed, remaining) = set.heal_mild(StressKind::Resolve, 1);
        assert!(!healed);
        assert_eq!(remaining, 1);
        assert!(!set.is_available(StressKind::Resolve));
    }

    #[test]
    fn test_aether_slot_never_healed() {
        let mut set = ConsequenceSet::new();
        set.aether_mild = Some("Burnt out".to_string());

        let (healed, remaining) = set.heal_mild(StressKind::Aether, 4);
        assert!(!healed);
        assert_eq!(remaining, 4);
        assert!(!set.is_available(StressKind::Aether));
    }
}
