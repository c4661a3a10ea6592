//! Core types shared by the resolvers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Skill name to bonus mapping, owned by the character record
pub type SkillMap = HashMap<String, i32>;

/// Highest rating a skill can have on a sheet; the lowest is 0
pub const MAX_SKILL_RATING: i32 = 4;

/// Which stress track / consequence slot family an event targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressKind {
    Endurance,
    Resolve,
    Aether,
}

impl StressKind {
    /// Get all stress kinds
    pub fn all() -> &'static [StressKind] {
        &[StressKind::Endurance, StressKind::Resolve, StressKind::Aether]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            StressKind::Endurance => "Endurance",
            StressKind::Resolve => "Resolve",
            StressKind::Aether => "Aether",
        }
    }
}

impl fmt::Display for StressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stable identifier for a character record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub String);

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        CharacterId(s.to_string())
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        CharacterId(s)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Social and magical standing of a character, governs how they touch Aether
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterStatus {
    #[default]
    None,
    Fyemyn,
    Ayrmyn,
    Tyrmyn,
    Fyrmyn,
    Ayxmyn,
    Nyhmyn,
}

/// The four skills bound to a character's magical style
///
/// Empty strings mean the affinity slot is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affinity {
    /// Name of the magical style, e.g. "Stonecaller"
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub attack: String,
    #[serde(default)]
    pub defend: String,
    #[serde(default)]
    pub tend: String,
    #[serde(default)]
    pub non_combat: String,
}

impl Affinity {
    /// Affinity with only the attack skill set
    pub fn attacking_with(skill: impl Into<String>) -> Self {
        Affinity {
            attack: skill.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_kind_serialization() {
        let json = serde_json::to_string(&StressKind::Endurance).unwrap();
        assert_eq!(json, "\"endurance\"");

        let kind: StressKind = serde_json::from_str("\"aether\"").unwrap();
        assert_eq!(kind, StressKind::Aether);
    }

    #[test]
    fn test_character_id_ordering() {
        let a = CharacterId::from("arden");
        let b = CharacterId::from("brin");
        assert!(a < b);
        assert_eq!(a.to_string(), "arden");
    }

    #[test]
    fn test_affinity_defaults_unset() {
        let affinity = Affinity::default();
        assert!(affinity.attack.is_empty());

        let caster = Affinity::attacking_with("Conjuration");
        assert_eq!(caster.attack, "Conjuration");
        assert!(caster.tend.is_empty());
        assert!(caster.name.is_empty());
    }
}
