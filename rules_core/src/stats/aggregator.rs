//! Equipment bonus aggregation - sums equipped items into one bonus set

use crate::types::{Ability, AbilityScores, EquippedItem};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::trace;

/// Keys recognized in an item's `stats` map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKey {
    Ac,
    Hp,
    Speed,
    Ability(Ability),
}

impl FromStr for StatKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ac" => Ok(StatKey::Ac),
            "hp" | "maxhp" => Ok(StatKey::Hp),
            "speed" => Ok(StatKey::Speed),
            other => other.parse::<Ability>().map(StatKey::Ability),
        }
    }
}

/// Keys recognized in an item's `specialAttributes` map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialAttribute {
    CritChance,
    SpellPower,
    XpBonus,
    DamageBonus,
}

impl FromStr for SpecialAttribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critchance" | "crit_chance" => Ok(SpecialAttribute::CritChance),
            "spellpower" | "spell_power" => Ok(SpecialAttribute::SpellPower),
            "xpbonus" | "xp_bonus" => Ok(SpecialAttribute::XpBonus),
            "damagebonus" | "damage_bonus" => Ok(SpecialAttribute::DamageBonus),
            _ => Err(()),
        }
    }
}

/// Aggregated numeric deltas from all equipped items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentBonuses {
    pub ac: i32,
    pub hp: i32,
    pub speed: i32,
    pub abilities: AbilityScores,
    pub crit_chance: i32,
    pub spell_power: i32,
    pub xp_bonus: i32,
    pub damage_bonus: i32,
}

impl EquipmentBonuses {
    /// The all-zero bonus set
    pub fn zero() -> Self {
        Self::default()
    }

    /// Apply a single stat entry
    pub fn apply_stat(&mut self, key: StatKey, value: i32) {
        match key {
            StatKey::Ac => self.ac = self.ac.saturating_add(value),
            StatKey::Hp => self.hp = self.hp.saturating_add(value),
            StatKey::Speed => self.speed = self.speed.saturating_add(value),
            StatKey::Ability(ability) => {
                let score = self.abilities.get_mut(ability);
                *score = score.saturating_add(value);
            }
        }
    }

    /// Apply a single special attribute entry
    pub fn apply_special(&mut self, key: SpecialAttribute, value: i32) {
        match key {
            SpecialAttribute::CritChance => self.crit_chance = self.crit_chance.saturating_add(value),
            SpecialAttribute::SpellPower => self.spell_power = self.spell_power.saturating_add(value),
            SpecialAttribute::XpBonus => self.xp_bonus = self.xp_bonus.saturating_add(value),
            SpecialAttribute::DamageBonus => {
                self.damage_bonus = self.damage_bonus.saturating_add(value)
            }
        }
    }

    /// Fold one item's maps into this bonus set
    pub fn add_item(&mut self, item: &EquippedItem) {
        for (raw, value) in &item.stats {
            match raw.parse::<StatKey>() {
                Ok(key) => self.apply_stat(key, *value),
                Err(_) => trace!(item = %item.name, key = %raw, "ignoring unknown stat key"),
            }
        }
        for (raw, value) in &item.special_attributes {
            match raw.parse::<SpecialAttribute>() {
                Ok(key) => self.apply_special(key, *value),
                Err(_) => trace!(item = %item.name, key = %raw, "ignoring unknown special attribute"),
            }
        }
    }
}

/// Sum the stats and special attributes of every equipped item
pub fn compute_equipment_bonuses(items: &[EquippedItem]) -> EquipmentBonuses {
    let mut bonuses = EquipmentBonuses::zero();
    for item in items {
        bonuses.add_item(item);
    }
    bonuses
}
