//! Class Feature System
//!
//! Feature tables, per-level combat progressions and expendable resource
//! pools for the twelve standard classes. Unknown class names resolve to
//! empty results.

pub mod features;
pub mod resources;

pub use features::{class_features, get_features_for_class_at_level, ClassFeature, FeatureEffect};
pub use resources::{
    initialize_class_resources, resource_maxima, ClassResources, ResourceError, ResourceKind,
    ResourcePool, RestKind,
};

use crate::types::CharacterClass;

/// Attacks beyond the first when taking the Attack action
pub fn extra_attacks(class: CharacterClass, level: u32) -> u32 {
    match class {
        CharacterClass::Fighter => match level {
            0..=4 => 0,
            5..=10 => 1,
            11..=19 => 2,
            _ => 3,
        },
        CharacterClass::Barbarian
        | CharacterClass::Monk
        | CharacterClass::Paladin
        | CharacterClass::Ranger => u32::from(level >= 5),
        CharacterClass::Bard
        | CharacterClass::Cleric
        | CharacterClass::Druid
        | CharacterClass::Rogue
        | CharacterClass::Sorcerer
        | CharacterClass::Warlock
        | CharacterClass::Wizard => 0,
    }
}

/// Extra attacks by class name; unknown classes get none
pub fn get_extra_attacks(class_name: &str, level: u32) -> u32 {
    CharacterClass::parse(class_name)
        .map(|class| extra_attacks(class, level))
        .unwrap_or(0)
}

/// Sneak attack d6 count: ceil(level / 2)
pub fn get_sneak_attack_dice(level: u32) -> u32 {
    level.div_ceil(2)
}

/// Bonus damage while raging
pub fn get_rage_damage_bonus(level: u32) -> i32 {
    match level {
        0..=8 => 2,
        9..=15 => 3,
        _ => 4,
    }
}

/// Monk unarmed strike die
pub fn get_martial_arts_die(level: u32) -> &'static str {
    match level {
        0..=4 => "1d4",
        5..=10 => "1d6",
        11..=16 => "1d8",
        _ => "1d10",
    }
}
