//! Derived combat statistics - base character plus equipment bonuses

use super::aggregator::EquipmentBonuses;
use crate::spell::{casting_ability, spell_save_dc};
use crate::types::{Ability, AbilityScores, CharacterClass, CharacterSheet};
use dice_core::calculate_modifier;
use serde::{Deserialize, Serialize};

/// Effective statistics after equipment, recomputed on every query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    pub effective_ac: i32,
    pub effective_max_hp: i32,
    pub effective_speed: i32,
    pub effective_abilities: AbilityScores,
    pub ability_modifiers: AbilityScores,
    pub attack_bonus: i32,
    /// Present only for casters
    pub spell_save_dc: Option<i32>,
    /// Present only for casters
    pub spell_attack_bonus: Option<i32>,
    pub damage_bonus: i32,
    /// Percentage, clamped to 0..=100
    pub crit_chance: i32,
}

impl DerivedStats {
    /// Modifier of one ability
    pub fn modifier(&self, ability: Ability) -> i32 {
        self.ability_modifiers.get(ability)
    }
}

/// Ability used for weapon attacks by class
pub fn primary_ability_for_class(class: Option<CharacterClass>) -> Ability {
    match class {
        Some(CharacterClass::Barbarian | CharacterClass::Fighter | CharacterClass::Paladin) => {
            Ability::Strength
        }
        Some(CharacterClass::Monk | CharacterClass::Ranger | CharacterClass::Rogue) => {
            Ability::Dexterity
        }
        Some(CharacterClass::Warlock) => Ability::Charisma,
        Some(
            class @ (CharacterClass::Bard
            | CharacterClass::Cleric
            | CharacterClass::Druid
            | CharacterClass::Sorcerer
            | CharacterClass::Wizard),
        ) => casting_ability(class).unwrap_or(Ability::Strength),
        None => Ability::Strength,
    }
}

/// Combine a character with its equipment bonuses
pub fn compute_derived_stats(character: &CharacterSheet, bonuses: &EquipmentBonuses) -> DerivedStats {
    let class = character.class();
    let effective_abilities = character.abilities.plus(&bonuses.abilities);
    let ability_modifiers = effective_abilities.map(calculate_modifier);

    let attack_bonus =
        character.proficiency_bonus.saturating_add(ability_modifiers.get(primary_ability_for_class(class)));

    let casting_modifier = class
        .and_then(casting_ability)
        .map(|ability| ability_modifiers.get(ability));

    DerivedStats {
        effective_ac: character.ac.saturating_add(bonuses.ac),
        effective_max_hp: character.max_hp.saturating_add(bonuses.hp).max(0),
        effective_speed: character.speed.saturating_add(bonuses.speed).max(0),
        effective_abilities,
        ability_modifiers,
        attack_bonus,
        spell_save_dc: casting_modifier.map(|m| spell_save_dc(character.proficiency_bonus, m)),
        spell_attack_bonus: casting_modifier.map(|m| character.proficiency_bonus.saturating_add(m)),
        damage_bonus: bonuses.damage_bonus,
        crit_chance: bonuses.crit_chance.clamp(0, 100),
    }
}
