//! Character records and their combat state

use crate::combat::{CombatEvent, CombatLog};
use crate::consequence::ConsequenceSet;
use crate::stress::StressTrack;
use crate::types::{Affinity, CharacterId, CharacterStatus, SkillMap, StressKind};
use serde::{Deserialize, Serialize};

/// Everything the resolvers mutate on one character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    pub endurance: StressTrack,
    pub resolve: StressTrack,
    pub aether: StressTrack,
    #[serde(default)]
    pub consequences: ConsequenceSet,
}

impl CombatState {
    pub fn new(endurance: StressTrack, resolve: StressTrack, aether: StressTrack) -> Self {
        CombatState {
            endurance,
            resolve,
            aether,
            consequences: ConsequenceSet::new(),
        }
    }

    pub fn track(&self, kind: StressKind) -> &StressTrack {
        match kind {
            StressKind::Endurance => &self.endurance,
            StressKind::Resolve => &self.resolve,
            StressKind::Aether => &self.aether,
        }
    }

    pub fn track_mut(&mut self, kind: StressKind) -> &mut StressTrack {
        match kind {
            StressKind::Endurance => &mut self.endurance,
            StressKind::Resolve => &mut self.resolve,
            StressKind::Aether => &mut self.aether,
        }
    }

    /// Drop temporary boxes from every track at the end of a scene
    pub fn end_scene(&mut self, log: &mut CombatLog) {
        for kind in StressKind::all() {
            let count = self.track_mut(*kind).clear_temporary();
            if count > 0 {
                log.push(CombatEvent::TemporaryBoxesCleared { track: *kind, count });
            }
        }
    }
}

/// A character sheet as the resolvers see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
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
    pub combat: CombatState,
}

impl Character {
    /// Create a bare character with the given combat state
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>, combat: CombatState) -> Self {
        Character {
            id: id.into(),
            name: name.into(),
            maxim: String::new(),
            imperative: String::new(),
            guild: String::new(),
            status: CharacterStatus::default(),
            affinity: Affinity::default(),
            skills: SkillMap::new(),
            stunts: Vec::new(),
            fate_points: 0,
            refresh: 0,
            combat,
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>, bonus: i32) -> Self {
        self.skills.insert(skill.into(), bonus);
        self
    }

    pub fn with_affinity(mut self, affinity: Affinity) -> Self {
        self.affinity = affinity;
        self
    }

    /// Look up a skill bonus, treating an unknown skill as 0
    pub fn skill_bonus(&self, skill: &str, log: &mut CombatLog) -> i32 {
        match self.skills.get(skill) {
            Some(bonus) => *bonus,
            None => {
                log.push(CombatEvent::SkillMissing {
                    skill: skill.to_string(),
                });
                0
            }
        }
    }
}
