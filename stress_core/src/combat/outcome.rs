//! DamageOutcome - Where an incoming hit ended up

use crate::types::StressKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of applying damage to a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DamageOutcome {
    /// A single stress box soaked the whole hit
    Absorbed { track: StressKind, capacity: i32 },
    /// A Mild consequence soaked the hit; `remaining` is `<= 0`
    ConsequenceTaken { slot: StressKind, remaining: i32 },
    /// Nothing could absorb the hit
    TakenOut { excess: i32 },
    /// The hit had no shifts to absorb
    NoDamage,
}

impl DamageOutcome {
    pub fn is_taken_out(&self) -> bool {
        matches!(self, DamageOutcome::TakenOut { .. })
    }

    /// Damage that got through all absorption
    pub fn excess(&self) -> i32 {
        match self {
            DamageOutcome::TakenOut { excess } => *excess,
            _ => 0,
        }
    }
}

impl fmt::Display for DamageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageOutcome::Absorbed { track, capacity } => {
                write!(f, "absorbed by {} box [{}]", track, capacity)
            }
            DamageOutcome::ConsequenceTaken { slot, .. } => {
                write!(f, "absorbed by Mild {} consequence", slot)
            }
            DamageOutcome::TakenOut { excess } => write!(f, "TAKEN OUT ({} excess)", excess),
            DamageOutcome::NoDamage => write!(f, "no damage"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess_only_when_taken_out() {
        let absorbed = DamageOutcome::Absorbed {
            track: StressKind::Resolve,
            capacity: 2,
        };
        assert_eq!(absorbed.excess(), 0);
        assert!(!absorbed.is_taken_out());

        let out = DamageOutcome::TakenOut { excess: 4 };
        assert_eq!(out.excess(), 4);
        assert!(out.to_string().contains("TAKEN OUT"));
    }
}
