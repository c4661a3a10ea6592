//! Prelude module for convenient imports
//!
//! ```rust
//! use stress_core::prelude::*;
//! ```

// Core types
pub use crate::character::{Character, CombatState};
pub use crate::consequence::ConsequenceSet;
pub use crate::stress::StressTrack;
pub use crate::types::{Affinity, CharacterId, SkillMap, StressKind};

// Resolvers
pub use crate::combat::{
    apply_damage, apply_damage_with, magical_attack_damage, magical_attack_hit, resolve_damage,
    resolve_damage_with, resolve_hit, resolve_hit_with, tend, tend_with,
};

// Results and logging
pub use crate::combat::{CombatEvent, CombatLog, DamageOutcome, HitResult};
pub use crate::error::CombatError;

// Scene
pub use crate::roster::{AttackReport, MagicalAttack, Roster};

// Config
pub use crate::config::{default_characters, RulesConfig};
