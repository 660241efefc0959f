//! Core domain types: abilities, classes, character records and equipment

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// ============================================================================
// Abilities
// ============================================================================

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Get all abilities in sheet order
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "strength",
            Ability::Dexterity => "dexterity",
            Ability::Constitution => "constitution",
            Ability::Intelligence => "intelligence",
            Ability::Wisdom => "wisdom",
            Ability::Charisma => "charisma",
        }
    }
}

impl FromStr for Ability {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" | "str" => Ok(Ability::Strength),
            "dexterity" | "dex" => Ok(Ability::Dexterity),
            "constitution" | "con" => Ok(Ability::Constitution),
            "intelligence" | "int" => Ok(Ability::Intelligence),
            "wisdom" | "wis" => Ok(Ability::Wisdom),
            "charisma" | "cha" => Ok(Ability::Charisma),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A full set of ability scores (or per-ability deltas)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Create a score set in sheet order (STR, DEX, CON, INT, WIS, CHA)
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        AbilityScores {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Every score set to the same value
    pub fn uniform(score: i32) -> Self {
        Self::new(score, score, score, score, score, score)
    }

    /// Get a single score
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    /// Mutable access to a single score
    pub fn get_mut(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        }
    }

    /// Element-wise sum
    pub fn plus(&self, other: &AbilityScores) -> AbilityScores {
        let mut sum = *self;
        for ability in Ability::all() {
            let score = sum.get_mut(*ability);
            *score = score.saturating_add(other.get(*ability));
        }
        sum
    }

    /// Apply a function to every score
    pub fn map(&self, f: impl Fn(i32) -> i32) -> AbilityScores {
        let mut mapped = *self;
        for ability in Ability::all() {
            *mapped.get_mut(*ability) = f(self.get(*ability));
        }
        mapped
    }
}

// ============================================================================
// Classes
// ============================================================================

/// Character classes known to the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    /// Get all classes
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Barbarian,
            CharacterClass::Bard,
            CharacterClass::Cleric,
            CharacterClass::Druid,
            CharacterClass::Fighter,
            CharacterClass::Monk,
            CharacterClass::Paladin,
            CharacterClass::Ranger,
            CharacterClass::Rogue,
            CharacterClass::Sorcerer,
            CharacterClass::Warlock,
            CharacterClass::Wizard,
        ]
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "barbarian",
            CharacterClass::Bard => "bard",
            CharacterClass::Cleric => "cleric",
            CharacterClass::Druid => "druid",
            CharacterClass::Fighter => "fighter",
            CharacterClass::Monk => "monk",
            CharacterClass::Paladin => "paladin",
            CharacterClass::Ranger => "ranger",
            CharacterClass::Rogue => "rogue",
            CharacterClass::Sorcerer => "sorcerer",
            CharacterClass::Warlock => "warlock",
            CharacterClass::Wizard => "wizard",
        }
    }

    /// Normalize a free-text class name
    ///
    /// Unknown classes return `None`; callers treat them as non-casters with
    /// no resources rather than failing.
    pub fn parse(name: &str) -> Option<CharacterClass> {
        let normalized = name.trim().to_lowercase();
        let class = CharacterClass::all()
            .iter()
            .copied()
            .find(|c| c.name() == normalized);
        if class.is_none() {
            debug!(class = name, "unknown class name");
        }
        class
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Collaborator records
// ============================================================================

/// Character record supplied by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSheet {
    #[serde(default)]
    pub name: String,
    /// Free-text class name as stored by the orchestrator
    #[serde(rename = "class")]
    pub class_name: String,
    pub level: u32,
    pub proficiency_bonus: i32,
    pub abilities: AbilityScores,
    pub ac: i32,
    pub max_hp: i32,
    pub speed: i32,
}

impl CharacterSheet {
    /// The normalized class, if recognized
    pub fn class(&self) -> Option<CharacterClass> {
        CharacterClass::parse(&self.class_name)
    }

    /// Parse a character record from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// An equipped item's numeric contributions
///
/// Keys are free text on the wire and are normalized by the stats aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquippedItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: HashMap<String, i32>,
    #[serde(default)]
    pub special_attributes: HashMap<String, i32>,
}

impl EquippedItem {
    /// Create an item with no stats
    pub fn new(name: impl Into<String>) -> Self {
        EquippedItem {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder: add a stat entry
    pub fn with_stat(mut self, key: impl Into<String>, value: i32) -> Self {
        let entry = self.stats.entry(key.into()).or_insert(0);
        *entry = entry.saturating_add(value);
        self
    }

    /// Builder: add a special attribute entry
    pub fn with_special(mut self, key: impl Into<String>, value: i32) -> Self {
        let entry = self.special_attributes.entry(key.into()).or_insert(0);
        *entry = entry.saturating_add(value);
        self
    }

    /// Parse an equipped-item list from JSON
    pub fn list_from_json(json: &str) -> Result<Vec<EquippedItem>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
