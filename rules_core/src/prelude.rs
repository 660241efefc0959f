//! Prelude module for convenient imports
//!
//! ```rust
//! use rules_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Ability, AbilityScores, CharacterClass, CharacterSheet, EquippedItem};

// Actions
pub use crate::action::{
    ActionError, ActionResolver, Combatant, SpellCast, SpellDelivery, SpellResolution,
    WeaponAttack,
};

// Conditions
pub use crate::condition::{Condition, ConditionInstance, TurnPhase};

// Resources and slots
pub use crate::class::{ClassResources, ResourceKind, RestKind};
pub use crate::spell::SpellSlots;

// Pending rolls
pub use crate::roll_slot::{AnyRollSlot, RollOutcome, RollRequest, RollSlot, RollSlotState};

// Config
pub use crate::config::RulesConfig;

// Re-exports from dice_core
pub use dice_core::{AdvantageState, Roller, ScriptedRoller};
