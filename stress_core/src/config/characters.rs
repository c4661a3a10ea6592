//! Character sheet loading

use super::{ConfigError, TrackDefaults};
use crate::character::{Character, CombatState};
use crate::stress::StressTrack;
use crate::types::{Affinity, CharacterId, CharacterStatus, SkillMap, MAX_SKILL_RATING};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Stress box capacities listed on a sheet; missing tracks use the rule defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressLayout {
    pub endurance: Option<Vec<i32>>,
    pub resolve: Option<Vec<i32>>,
    pub aether: Option<Vec<i32>>,
}

/// A character as written in a sheet file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub maxim: String,
    #[serde(default)]
    pub imperative: String,
    #[serde(default)]
    pub guild: String,
    #[serde(default)]
    pub status: CharacterStatus,
    #[serde(default)]
    pub affinity: Affinity,
    #[serde(default)]
    pub skills: SkillMap,
    #[serde(default)]
    pub stunts: Vec<String>,
    #[serde(default)]
    pub fate_points: u32,
    #[serde(default)]
    pub refresh: u32,
    #[serde(default)]
    pub stress: StressLayout,
}

impl CharacterSheet {
    /// Build a fresh character with empty stress and consequences
    pub fn into_character(self, defaults: &TrackDefaults) -> Result<Character, ConfigError> {
        let track = |listed: Option<Vec<i32>>, fallback: &Vec<i32>, name: &str| {
            StressTrack::new(listed.unwrap_or_else(|| fallback.clone())).map_err(|e| {
                ConfigError::ValidationError(format!("{} {} track: {}", self.id, name, e))
            })
        };

        let combat = CombatState::new(
            track(self.stress.endurance.clone(), &defaults.endurance, "endurance")?,
            track(self.stress.resolve.clone(), &defaults.resolve, "resolve")?,
            track(self.stress.aether.clone(), &defaults.aether, "aether")?,
        );

        Ok(Character {
            id: CharacterId(self.id),
            name: self.name,
            maxim: self.maxim,
            imperative: self.imperative,
            guild: self.guild,
            status: self.status,
            affinity: self.affinity,
            skills: self.skills,
            stunts: self.stunts,
            fate_points: self.fate_points,
            refresh: self.refresh,
            combat,
        })
    }
}

/// Container for character sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharactersConfig {
    #[serde(rename = "characters")]
    pub characters: Vec<CharacterSheet>,
}

/// Load character sheets from a TOML file
pub fn load_character_sheets(
    path: &Path,
    defaults: &TrackDefaults,
) -> Result<Vec<Character>, ConfigError> {
    let config: CharactersConfig = super::load_toml(path)?;
    build_characters(config, defaults)
}

/// Load character sheets from a TOML string
pub fn parse_character_sheets(
    content: &str,
    defaults: &TrackDefaults,
) -> Result<Vec<Character>, ConfigError> {
    let config: CharactersConfig = super::parse_toml(content)?;
    build_characters(config, defaults)
}

fn build_characters(
    config: CharactersConfig,
    defaults: &TrackDefaults,
) -> Result<Vec<Character>, ConfigError> {
    let mut seen = HashSet::new();
    let mut characters = Vec::with_capacity(config.characters.len());

    for sheet in config.characters {
        if !seen.insert(sheet.id.clone()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate character id '{}'",
                sheet.id
            )));
        }
        if let Some((skill, rating)) = sheet
            .skills
            .iter()
            .find(|(_, rating)| !(0..=MAX_SKILL_RATING).contains(*rating))
        {
            return Err(ConfigError::ValidationError(format!(
                "{} skill '{}' rating {} is outside 0..={}",
                sheet.id, skill, rating, MAX_SKILL_RATING
            )));
        }
        characters.push(sheet.into_character(defaults)?);
    }

    Ok(characters)
}

/// Get the bundled sample characters
pub fn default_characters() -> Vec<Character> {
    let toml = include_str!("../../config/characters.toml");
    parse_character_sheets(toml, &TrackDefaults::default()).unwrap_or_else(|e| {
        tracing::error!("bundled character sheets are invalid: {}", e);
        Vec::new()
    })
}
