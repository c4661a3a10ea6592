//! Combat resolution - Damage, tending and magical attacks against a CombatState

mod attack;
mod damage;
mod healing;
mod log;
mod outcome;

pub use attack::{
    magical_attack_damage, magical_attack_hit, resolve_damage, resolve_damage_with, resolve_hit,
    resolve_hit_with, HitResult, MISFIRE_THRESHOLD,
};
pub use damage::{apply_damage, apply_damage_with, ABSORPTION_ORDER};
pub use healing::{tend, tend_with};
pub use log::{CombatEvent, CombatLog};
pub use outcome::DamageOutcome;
