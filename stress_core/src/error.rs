//! Resolver errors

use crate::types::CharacterId;
use thiserror::Error;

/// Failure of a single resolver call
///
/// None of these leave the character state partially mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("No character state bound to id '{0}'")]
    MissingCharacter(CharacterId),
    #[error("Stress box capacity must be positive, got {0}")]
    InvalidCapacity(i32),
}
