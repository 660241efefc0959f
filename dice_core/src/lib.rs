//! dice_core - Dice rolling and d20 check resolution
//!
//! This library provides:
//! - Uniform die rolls with advantage/disadvantage
//! - Dice notation parsing ("2d6+1d4+3 fire")
//! - Ability checks, attack rolls, saving throws and damage rolls
//!
//! # Quick Start
//!
//! ```rust
//! use dice_core::{make_attack_roll_with, AdvantageState, ScriptedRoller};
//!
//! // Force a natural 20 so the example is deterministic
//! let mut roller = ScriptedRoller::new([20]);
//! let attack = make_attack_roll_with(&mut roller, 16, 2, 25, AdvantageState::Normal);
//! assert!(attack.is_critical && attack.hits);
//! ```

pub mod advantage;
pub mod check;
pub mod dice;
pub mod error;
pub mod notation;
pub mod roller;

pub use advantage::AdvantageState;
pub use check::{
    calculate_modifier, make_ability_check, make_ability_check_with, make_attack_roll,
    make_attack_roll_with, make_saving_throw, make_saving_throw_with,
    proficiency_bonus_for_level, roll_damage, roll_damage_with, AbilityCheckResult,
    AttackRollResult, DamageRollResult, Proficiency, SavingThrowResult,
};
pub use dice::{
    roll_d20, roll_d20_with, roll_dice, roll_dice_with, roll_with_advantage,
    roll_with_advantage_state, roll_with_disadvantage, D20Roll,
};
pub use error::DiceError;
pub use notation::{
    parse_dice_string, parse_dice_string_with, DiceExpression, DiceRollResult, DiceTerm,
    DEFAULT_MAX_DICE,
};
pub use roller::{Roller, ScriptedRoller};
