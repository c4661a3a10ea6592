//! stress_core - Stress and consequence resolution for Fate-style combat
//!
//! This library provides:
//! - StressTrack: Numbered boxes that soak a whole hit each
//! - ConsequenceSet: Mild consequences that absorb overflow
//! - Damage, tending and two-roll magical attack resolvers
//! - Roster: Characters addressed by id, with the rules they play under
//!
//! Dice are rolled by the caller and character records are loaded and saved
//! elsewhere; every resolver works on one borrowed `CombatState` at a time.

pub mod character;
pub mod combat;
pub mod config;
pub mod consequence;
pub mod error;
pub mod prelude;
pub mod roster;
pub mod stress;
pub mod types;

// Re-export core types for convenience
pub use character::{Character, CombatState};
pub use combat::{
    apply_damage, resolve_damage, resolve_hit, tend, CombatEvent, CombatLog, DamageOutcome,
    HitResult,
};
pub use config::{default_characters, ConfigError, RulesConfig};
pub use consequence::{ConsequenceSet, MILD_CONSEQUENCE_VALUE};
pub use error::CombatError;
pub use roster::{AttackReport, MagicalAttack, Roster};
pub use stress::{SelectedBox, StressBox, StressTrack};
pub use types::{
    Affinity, CharacterId, CharacterStatus, SkillMap, StressKind, MAX_SKILL_RATING,
};
