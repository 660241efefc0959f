//! Spell system - caster classification, slot progression and spell math

mod slots;

pub use slots::{initialize_spell_slots, SlotError, SlotState, SpellSlots};

use crate::types::{Ability, CharacterClass};
use dice_core::calculate_modifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spell slot progression a class follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasterCategory {
    Full,
    Half,
    None,
}

/// Full-caster slots per spell level (1-9), indexed by character level - 1
const FULL_CASTER_SLOTS: [[u32; 9]; 20] = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

const MAX_LEVEL: u32 = 20;

/// Caster category of a class
///
/// Warlock pact magic is not modelled, so warlocks are non-casters here.
pub fn caster_category(class: CharacterClass) -> CasterCategory {
    match class {
        CharacterClass::Bard
        | CharacterClass::Cleric
        | CharacterClass::Druid
        | CharacterClass::Sorcerer
        | CharacterClass::Wizard => CasterCategory::Full,
        CharacterClass::Paladin | CharacterClass::Ranger => CasterCategory::Half,
        CharacterClass::Barbarian
        | CharacterClass::Fighter
        | CharacterClass::Monk
        | CharacterClass::Rogue
        | CharacterClass::Warlock => CasterCategory::None,
    }
}

/// Casting ability of a class, `None` for non-casters
pub fn casting_ability(class: CharacterClass) -> Option<Ability> {
    match caster_category(class) {
        CasterCategory::None => None,
        CasterCategory::Full | CasterCategory::Half => match class {
            CharacterClass::Wizard => Some(Ability::Intelligence),
            CharacterClass::Cleric | CharacterClass::Druid | CharacterClass::Ranger => {
                Some(Ability::Wisdom)
            }
            _ => Some(Ability::Charisma),
        },
    }
}

/// Whether a class name is a full or half caster (case-insensitive)
pub fn is_caster(class_name: &str) -> bool {
    CharacterClass::parse(class_name)
        .map(|c| caster_category(c) != CasterCategory::None)
        .unwrap_or(false)
}

/// Casting ability by class name
pub fn get_casting_ability(class_name: &str) -> Option<Ability> {
    CharacterClass::parse(class_name).and_then(casting_ability)
}

/// Slot counts per spell level for a class
pub fn spell_slots_for(class: CharacterClass, level: u32) -> BTreeMap<u8, u32> {
    let table_level = match caster_category(class) {
        CasterCategory::None => return BTreeMap::new(),
        CasterCategory::Full => level,
        // Half-casters gain slots at 2 and progress at half rate
        CasterCategory::Half if level < 2 => return BTreeMap::new(),
        CasterCategory::Half => level.div_ceil(2),
    };
    if table_level < 1 {
        return BTreeMap::new();
    }
    let row = FULL_CASTER_SLOTS[(table_level.min(MAX_LEVEL) - 1) as usize];
    row.iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(i, count)| ((i + 1) as u8, *count))
        .collect()
}

/// Slot counts per spell level by class name; empty for non-casters and level 0
pub fn get_spell_slots(class_name: &str, level: u32) -> BTreeMap<u8, u32> {
    CharacterClass::parse(class_name)
        .map(|c| spell_slots_for(c, level))
        .unwrap_or_default()
}

/// Spell save DC from an already computed casting modifier
pub fn spell_save_dc(proficiency_bonus: i32, casting_modifier: i32) -> i32 {
    8i32.saturating_add(proficiency_bonus).saturating_add(casting_modifier)
}

/// Spell save DC: 8 + proficiency + casting modifier
pub fn get_spell_save_dc(proficiency_bonus: i32, casting_ability_score: i32) -> i32 {
    spell_save_dc(proficiency_bonus, calculate_modifier(casting_ability_score))
}

/// Spell attack bonus: proficiency + casting modifier
pub fn get_spell_attack_bonus(proficiency_bonus: i32, casting_ability_score: i32) -> i32 {
    proficiency_bonus.saturating_add(calculate_modifier(casting_ability_score))
}

/// Number of damage dice a cantrip rolls at a character level
pub fn get_cantrip_dice_count(level: u32) -> u32 {
    match level {
        0..=4 => 1,
        5..=10 => 2,
        11..=16 => 3,
        _ => 4,
    }
}
