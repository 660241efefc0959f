//! Class feature table

use super::resources::ResourceKind;
use crate::types::CharacterClass;
use serde::{Deserialize, Serialize};
use FeatureEffect::*;

/// Combat effect a class feature grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FeatureEffect {
    /// Grants or sizes a resource pool
    Resource(ResourceKind),
    ExtraAttack,
    SneakAttack,
    RageDamage,
    MartialArts,
    /// Alternative AC formula when unarmored
    ArmorClassFormula,
    /// Flat walking speed increase in feet
    SpeedBonus(i32),
    /// Double proficiency on chosen skills
    Expertise,
    /// Out-of-combat or narrative benefit
    Passive,
}

/// A class feature gained at a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassFeature {
    pub name: &'static str,
    pub level: u32,
    pub effect: FeatureEffect,
}

const fn feature(name: &'static str, level: u32, effect: FeatureEffect) -> ClassFeature {
    ClassFeature { name, level, effect }
}

const BARBARIAN: &[ClassFeature] = &[
    feature("Rage", 1, Resource(ResourceKind::Rage)),
    feature("Rage Damage", 1, RageDamage),
    feature("Unarmored Defense", 1, ArmorClassFormula),
    feature("Reckless Attack", 2, Passive),
    feature("Danger Sense", 2, Passive),
    feature("Extra Attack", 5, ExtraAttack),
    feature("Fast Movement", 5, SpeedBonus(10)),
    feature("Feral Instinct", 7, Passive),
    feature("Brutal Critical", 9, Passive),
];

const BARD: &[ClassFeature] = &[
    feature("Spellcasting", 1, Passive),
    feature("Jack of All Trades", 2, Passive),
    feature("Song of Rest", 2, Passive),
    feature("Expertise", 3, Expertise),
];

const CLERIC: &[ClassFeature] = &[
    feature("Spellcasting", 1, Passive),
    feature("Channel Divinity", 2, Resource(ResourceKind::ChannelDivinity)),
    feature("Destroy Undead", 5, Passive),
];

const DRUID: &[ClassFeature] = &[
    feature("Spellcasting", 1, Passive),
    feature("Wild Shape", 2, Resource(ResourceKind::WildShape)),
];

const FIGHTER: &[ClassFeature] = &[
    feature("Fighting Style", 1, Passive),
    feature("Second Wind", 1, Resource(ResourceKind::SecondWind)),
    feature("Action Surge", 2, Resource(ResourceKind::ActionSurge)),
    feature("Martial Archetype", 3, Passive),
    feature("Extra Attack", 5, ExtraAttack),
    feature("Indomitable", 9, Resource(ResourceKind::Indomitable)),
];

const MONK: &[ClassFeature] = &[
    feature("Martial Arts", 1, MartialArts),
    feature("Unarmored Defense", 1, ArmorClassFormula),
    feature("Ki", 1, Resource(ResourceKind::Ki)),
    feature("Unarmored Movement", 2, SpeedBonus(10)),
    feature("Deflect Missiles", 3, Passive),
    feature("Extra Attack", 5, ExtraAttack),
    feature("Stunning Strike", 5, Passive),
    feature("Evasion", 7, Passive),
];

const PALADIN: &[ClassFeature] = &[
    feature("Divine Sense", 1, Passive),
    feature("Lay on Hands", 1, Resource(ResourceKind::LayOnHands)),
    feature("Divine Smite", 2, Passive),
    feature("Spellcasting", 2, Passive),
    feature("Channel Divinity", 3, Resource(ResourceKind::ChannelDivinity)),
    feature("Extra Attack", 5, ExtraAttack),
    feature("Aura of Protection", 6, Passive),
];

const RANGER: &[ClassFeature] = &[
    feature("Favored Enemy", 1, Passive),
    feature("Natural Explorer", 1, Passive),
    feature("Fighting Style", 2, Passive),
    feature("Spellcasting", 2, Passive),
    feature("Extra Attack", 5, ExtraAttack),
];

const ROGUE: &[ClassFeature] = &[
    feature("Expertise", 1, Expertise),
    feature("Sneak Attack", 1, SneakAttack),
    feature("Cunning Action", 2, Passive),
    feature("Uncanny Dodge", 5, Passive),
    feature("Evasion", 7, Passive),
];

const SORCERER: &[ClassFeature] = &[
    feature("Spellcasting", 1, Passive),
    feature("Font of Magic", 2, Resource(ResourceKind::SorceryPoints)),
    feature("Metamagic", 3, Passive),
];

const WARLOCK: &[ClassFeature] = &[
    feature("Otherworldly Patron", 1, Passive),
    feature("Eldritch Invocations", 2, Passive),
];

const WIZARD: &[ClassFeature] = &[
    feature("Spellcasting", 1, Passive),
    feature("Arcane Recovery", 1, Resource(ResourceKind::ArcaneRecovery)),
];

/// Every feature of a class, in level order
pub fn class_features(class: CharacterClass) -> &'static [ClassFeature] {
    match class {
        CharacterClass::Barbarian => BARBARIAN,
        CharacterClass::Bard => BARD,
        CharacterClass::Cleric => CLERIC,
        CharacterClass::Druid => DRUID,
        CharacterClass::Fighter => FIGHTER,
        CharacterClass::Monk => MONK,
        CharacterClass::Paladin => PALADIN,
        CharacterClass::Ranger => RANGER,
        CharacterClass::Rogue => ROGUE,
        CharacterClass::Sorcerer => SORCERER,
        CharacterClass::Warlock => WARLOCK,
        CharacterClass::Wizard => WIZARD,
    }
}

/// Features a class has at a level; unknown classes have none
pub fn get_features_for_class_at_level(class_name: &str, level: u32) -> Vec<ClassFeature> {
    CharacterClass::parse(class_name)
        .map(|class| {
            class_features(class)
                .iter()
                .filter(|f| f.level <= level)
                .copied()
                .collect()
        })
        .unwrap_or_default()
}
