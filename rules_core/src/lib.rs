//! rules_core - Tabletop combat rules engine
//!
//! This library provides:
//! - Conditions: effect bundles, durations and their combat impact
//! - Stats: equipment bonuses and derived combat statistics
//! - Class features: per-level progressions and resource pools
//! - Spellcasting: caster categories, slot tables and slot spending
//! - Action resolution: one attack or spell run through every subsystem
//! - A typed pending-roll slot for sessions that roll at the table
//!
//! Every function is pure: state (slots, pools, condition lists) goes in as a
//! value and comes back as a new snapshot for the caller to persist.
//!
//! # Quick Start
//!
//! ```rust
//! use rules_core::prelude::*;
//!
//! let config = RulesConfig::default();
//! let resolver = ActionResolver::new(&config);
//!
//! let fighter = Combatant::new(CharacterSheet {
//!     name: "Brienne".to_string(),
//!     class_name: "Fighter".to_string(),
//!     level: 5,
//!     proficiency_bonus: 3,
//!     abilities: AbilityScores::new(16, 12, 14, 10, 10, 10),
//!     ac: 16,
//!     max_hp: 44,
//!     speed: 30,
//! });
//! let goblin = Combatant::new(CharacterSheet {
//!     name: "Goblin".to_string(),
//!     class_name: "monster".to_string(),
//!     level: 1,
//!     proficiency_bonus: 2,
//!     abilities: AbilityScores::uniform(10),
//!     ac: 15,
//!     max_hp: 7,
//!     speed: 30,
//! })
//! .with_condition(Condition::Prone);
//!
//! // Natural 20, then the damage die
//! let mut roller = ScriptedRoller::new([20, 20, 6, 4]);
//! let outcome = resolver
//!     .weapon_attack(&mut roller, &fighter, &goblin, &WeaponAttack::melee("1d8"))
//!     .unwrap();
//! assert!(outcome.attack.is_critical);
//! assert_eq!(outcome.extra_attacks, 1);
//! ```

pub mod action;
pub mod class;
pub mod condition;
pub mod config;
pub mod prelude;
pub mod roll_slot;
pub mod spell;
pub mod stats;
pub mod types;

// Core API
pub use action::{ActionError, ActionResolver, Combatant, SpellCast, WeaponAttack};
pub use config::{ConfigError, RulesConfig};
pub use roll_slot::{AnyRollSlot, RollOutcome, RollRequest, RollSlot, RollSlotState};
pub use types::{Ability, AbilityScores, CharacterClass, CharacterSheet, EquippedItem};

// Subsystems
pub use class::{
    get_extra_attacks, get_features_for_class_at_level, get_martial_arts_die,
    get_rage_damage_bonus, get_sneak_attack_dice, initialize_class_resources, ClassResources,
    ResourceError, ResourceKind, ResourcePool, RestKind,
};
pub use condition::{
    can_act, can_move, concentration_save_dc, get_condition, get_effective_speed, is_auto_crit,
    parse_conditions, process_condition_durations, resolve_attack_advantage, Condition,
    ConditionInstance, TurnPhase,
};
pub use spell::{
    get_cantrip_dice_count, get_casting_ability, get_spell_attack_bonus, get_spell_save_dc,
    get_spell_slots, initialize_spell_slots, is_caster, SlotError, SpellSlots,
};
pub use stats::{compute_derived_stats, compute_equipment_bonuses, DerivedStats, EquipmentBonuses};

// Re-export the dice layer
pub use dice_core::{AdvantageState, DiceError, Roller, ScriptedRoller};
