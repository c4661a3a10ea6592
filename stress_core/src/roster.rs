//! Roster - Characters in a scene, addressed by id

use crate::character::Character;
use crate::combat::{
    apply_damage_with, magical_attack_damage, magical_attack_hit, tend_with, CombatEvent,
    CombatLog, DamageOutcome, HitResult,
};
use crate::config::RulesConfig;
use crate::error::CombatError;
use crate::types::{CharacterId, StressKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters of one magical attack, dice already rolled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicalAttack {
    pub attacker: CharacterId,
    pub target: CharacterId,
    /// Physical skill used for the hit roll
    pub physical_skill: String,
    /// Aether committed to the spell, caps the damage
    pub aether_spent: i32,
    /// 4dF total for Roll 1
    pub hit_roll: i32,
    /// 4dF total for Roll 2
    pub damage_roll: i32,
}

/// What a magical attack did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackReport {
    pub hit: HitResult,
    pub damage: i32,
    /// Where the damage landed on the target, if any was dealt
    pub target_outcome: Option<DamageOutcome>,
}

/// Owns the characters of a scene and the rules they play under
///
/// Every call borrows exactly one character mutably at a time; an attack
/// resolves the attacker fully before touching the target.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: BTreeMap<CharacterId, Character>,
    rules: RulesConfig,
}

impl Roster {
    pub fn new(rules: RulesConfig) -> Self {
        Roster {
            characters: BTreeMap::new(),
            rules,
        }
    }

    pub fn from_characters(
        characters: impl IntoIterator<Item = Character>,
        rules: RulesConfig,
    ) -> Self {
        let mut roster = Self::new(rules);
        for character in characters {
            roster.insert(character);
        }
        roster
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Add or replace a character, returning the previous record
    pub fn insert(&mut self, character: Character) -> Option<Character> {
        self.characters.insert(character.id.clone(), character)
    }

    pub fn remove(&mut self, id: &CharacterId) -> Option<Character> {
        self.characters.remove(id)
    }

    pub fn get(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn get_mut(&mut self, id: &CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id)
    }

    /// Ids in their stable order
    pub fn ids(&self) -> impl Iterator<Item = &CharacterId> {
        self.characters.keys()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Apply damage to the character with `id`
    pub fn apply_damage(
        &mut self,
        id: &CharacterId,
        amount: i32,
        kind: StressKind,
        log: &mut CombatLog,
    ) -> Result<DamageOutcome, CombatError> {
        let character = lookup(&mut self.characters, id, log)?;
        Ok(apply_damage_with(&mut character.combat, amount, kind, log))
    }

    /// Tend the character with `id`, returning unspent shifts
    pub fn tend(
        &mut self,
        id: &CharacterId,
        kind: StressKind,
        shifts: i32,
        log: &mut CombatLog,
    ) -> Result<i32, CombatError> {
        let character = lookup(&mut self.characters, id, log)?;
        Ok(tend_with(&mut character.combat, kind, shifts, log))
    }

    /// Resolve both rolls of a magical attack and land the damage on the target
    ///
    /// Both characters must exist before anything is rolled. Damage lands on
    /// the target as Aether damage. An attacker may target themself.
    pub fn magical_attack(
        &mut self,
        attack: &MagicalAttack,
        log: &mut CombatLog,
    ) -> Result<AttackReport, CombatError> {
        for id in [&attack.attacker, &attack.target] {
            if !self.characters.contains_key(id) {
                log.push(CombatEvent::MissingCharacter { id: id.clone() });
                return Err(CombatError::MissingCharacter(id.clone()));
            }
        }

        let rules = &self.rules;
        let attacker = lookup(&mut self.characters, &attack.attacker, log)?;
        let hit = magical_attack_hit(
            attacker,
            &attack.physical_skill,
            attack.hit_roll,
            rules,
            log,
        );
        let damage = magical_attack_damage(
            attacker,
            hit,
            attack.aether_spent,
            attack.damage_roll,
            rules,
            log,
        );

        let target_outcome = if damage > 0 {
            let target = lookup(&mut self.characters, &attack.target, log)?;
            Some(apply_damage_with(
                &mut target.combat,
                damage,
                StressKind::Aether,
                log,
            ))
        } else {
            None
        };

        Ok(AttackReport {
            hit,
            damage,
            target_outcome,
        })
    }

    /// Close the scene: temporary stress boxes go away for everyone
    pub fn end_scene(&mut self, log: &mut CombatLog) {
        for character in self.characters.values_mut() {
            character.combat.end_scene(log);
        }
    }
}

fn lookup<'a>(
    characters: &'a mut BTreeMap<CharacterId, Character>,
    id: &CharacterId,
    log: &mut CombatLog,
) -> Result<&'a mut Character, CombatError> {
    match characters.get_mut(id) {
        Some(character) => Ok(character),
        None => {
            log.push(CombatEvent::MissingCharacter { id: id.clone() });
            Err(CombatError::MissingCharacter(id.clone()))
        }
    }
}
