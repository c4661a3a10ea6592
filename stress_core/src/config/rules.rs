//! Tunable rule constants

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rule constants for attack resolution and new character tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub attack: AttackRules,
    #[serde(default)]
    pub tracks: TrackDefaults,
}

impl RulesConfig {
    /// Load rules from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let rules: RulesConfig = super::load_toml(path)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load rules from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let rules: RulesConfig = super::parse_toml(content)?;
        rules.validate()?;
        Ok(rules)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.attack;
        for (name, value) in [
            ("crit_multiplier", a.crit_multiplier),
            ("crit_plus_multiplier", a.crit_plus_multiplier),
            ("style_multiplier", a.style_multiplier),
        ] {
            if !value.is_finite() || value < 1.0 {
                return Err(ConfigError::ValidationError(format!(
                    "attack.{} must be at least 1.0, got {}",
                    name, value
                )));
            }
        }
        if a.misfire_offset < 0 {
            return Err(ConfigError::ValidationError(format!(
                "attack.misfire_offset must not be negative, got {}",
                a.misfire_offset
            )));
        }
        self.tracks.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRules {
    /// Damage multiplier for a Roll 1 result of +2
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: f64,
    /// Damage multiplier for a Roll 1 result of +3
    #[serde(default = "default_crit_plus_multiplier")]
    pub crit_plus_multiplier: f64,
    /// Damage multiplier for a Roll 1 result of +4 or better
    #[serde(default = "default_style_multiplier")]
    pub style_multiplier: f64,
    /// Self damage on a misfire is `|roll| - misfire_offset`
    #[serde(default = "default_misfire_offset")]
    pub misfire_offset: i32,
}

impl Default for AttackRules {
    fn default() -> Self {
        AttackRules {
            crit_multiplier: 1.25,
            crit_plus_multiplier: 1.5,
            style_multiplier: 1.5,
            misfire_offset: 3,
        }
    }
}

fn default_crit_multiplier() -> f64 {
    1.25
}
fn default_crit_plus_multiplier() -> f64 {
    1.5
}
fn default_style_multiplier() -> f64 {
    1.5
}
fn default_misfire_offset() -> i32 {
    3
}

/// Box layouts given to sheets that do not list their own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDefaults {
    #[serde(default = "default_endurance")]
    pub endurance: Vec<i32>,
    #[serde(default = "default_resolve")]
    pub resolve: Vec<i32>,
    #[serde(default = "default_aether")]
    pub aether: Vec<i32>,
}

impl Default for TrackDefaults {
    fn default() -> Self {
        TrackDefaults {
            endurance: default_endurance(),
            resolve: default_resolve(),
            aether: default_aether(),
        }
    }
}

impl TrackDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, track) in [
            ("endurance", &self.endurance),
            ("resolve", &self.resolve),
            ("aether", &self.aether),
        ] {
            if let Some(bad) = track.iter().find(|c| **c <= 0) {
                return Err(ConfigError::ValidationError(format!(
                    "tracks.{} has non-positive box {}",
                    name, bad
                )));
            }
        }
        Ok(())
    }
}

fn default_endurance() -> Vec<i32> {
    vec![1, 2]
}
fn default_resolve() -> Vec<i32> {
    vec![1, 2]
}
fn default_aether() -> Vec<i32> {
    vec![1, 2, 3]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RulesConfig::default();
        assert!((rules.attack.crit_multiplier - 1.25).abs() < f64::EPSILON);
        assert!((rules.attack.style_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(rules.attack.misfire_offset, 3);
        assert_eq!(rules.tracks.aether, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_partial_rules() {
        let toml = r#"
[attack]
crit_multiplier = 1.3

[tracks]
endurance = [1, 2, 3, 4]
"#;

        let rules = RulesConfig::parse(toml).unwrap();
        assert!((rules.attack.crit_multiplier - 1.3).abs() < f64::EPSILON);
        assert!((rules.attack.crit_plus_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(rules.tracks.endurance, vec![1, 2, 3, 4]);
        assert_eq!(rules.tracks.resolve, vec![1, 2]);
    }

    #[test]
    fn test_empty_rules_match_defaults() {
        let rules = RulesConfig::parse("").unwrap();
        assert_eq!(rules, RulesConfig::default());
    }

    #[test]
    fn test_rejects_bad_multiplier() {
        let toml = r#"
[attack]
style_multiplier = 0.5
"#;
        assert!(matches!(
            RulesConfig::parse(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_rejects_bad_track() {
        let toml = r#"
[tracks]
resolve = [1, -2]
"#;
        assert!(matches!(
            RulesConfig::parse(toml),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
