//! Check resolution - ability checks, attack rolls, saving throws and damage
//!
//! Every function comes in two forms: a plain one that rolls with the thread
//! RNG and a `_with` form that takes a `Roller` for deterministic resolution.

use crate::advantage::AdvantageState;
use crate::dice::{roll_dice_with, roll_with_advantage_state};
use crate::roller::Roller;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How trained a character is in a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    #[default]
    None,
    Proficient,
    /// Double proficiency; implies proficient
    Expertise,
}

impl Proficiency {
    /// Build from the proficient/expertise flags
    pub fn from_flags(is_proficient: bool, has_expertise: bool) -> Self {
        if has_expertise {
            Proficiency::Expertise
        } else if is_proficient {
            Proficiency::Proficient
        } else {
            Proficiency::None
        }
    }

    /// Contribution to a check's modifier
    pub fn bonus(&self, proficiency_bonus: i32) -> i32 {
        match self {
            Proficiency::None => 0,
            Proficiency::Proficient => proficiency_bonus,
            Proficiency::Expertise => proficiency_bonus.saturating_mul(2),
        }
    }
}

/// Result of an ability check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityCheckResult {
    /// The kept natural d20
    pub roll: u32,
    /// Every d20 rolled (two with advantage or disadvantage)
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
    pub advantage: AdvantageState,
}

impl AbilityCheckResult {
    /// The natural d20 result that was kept
    pub fn natural_roll(&self) -> u32 {
        self.roll
    }
}

/// Result of an attack roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRollResult {
    pub roll: u32,
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
    pub target_ac: i32,
    pub hits: bool,
    pub is_critical: bool,
    pub is_critical_miss: bool,
}

impl AttackRollResult {
    /// Upgrade a hit to a critical hit (e.g. a paralyzed target within 5 ft)
    ///
    /// A miss stays a miss.
    pub fn force_critical(mut self) -> Self {
        if self.hits {
            self.is_critical = true;
        }
        self
    }
}

/// Result of a saving throw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrowResult {
    pub roll: u32,
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
    pub dc: i32,
    pub success: bool,
}

/// Result of a damage roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRollResult {
    pub rolls: Vec<u32>,
    pub modifier: i32,
    /// Sum of the dice plus modifier, never below zero
    pub total: i32,
}

/// Ability modifier for a score: floor((score - 10) / 2)
pub fn calculate_modifier(score: i32) -> i32 {
    score.saturating_sub(10).div_euclid(2)
}

/// Proficiency bonus by character level (levels clamp to 1..=20)
pub fn proficiency_bonus_for_level(level: u32) -> i32 {
    let level = level.clamp(1, 20) as i32;
    2 + (level - 1) / 4
}

/// Make an ability check with the thread RNG
pub fn make_ability_check(
    ability_score: i32,
    proficiency_bonus: i32,
    proficiency: Proficiency,
    advantage: AdvantageState,
) -> AbilityCheckResult {
    make_ability_check_with(
        &mut rand::thread_rng(),
        ability_score,
        proficiency_bonus,
        proficiency,
        advantage,
    )
}

/// Make an ability check with a provided roller
pub fn make_ability_check_with(
    roller: &mut impl Roller,
    ability_score: i32,
    proficiency_bonus: i32,
    proficiency: Proficiency,
    advantage: AdvantageState,
) -> AbilityCheckResult {
    let d20 = roll_with_advantage_state(roller, advantage);
    let modifier = calculate_modifier(ability_score).saturating_add(proficiency.bonus(proficiency_bonus));
    let total = (d20.result as i32).saturating_add(modifier);
    trace!(roll = d20.result, modifier, total, %advantage, "ability check");
    AbilityCheckResult {
        roll: d20.result,
        rolls: d20.rolls,
        modifier,
        total,
        advantage,
    }
}

/// Make an attack roll with the thread RNG
pub fn make_attack_roll(
    ability_score: i32,
    proficiency_bonus: i32,
    target_ac: i32,
    advantage: AdvantageState,
) -> AttackRollResult {
    make_attack_roll_with(
        &mut rand::thread_rng(),
        ability_score,
        proficiency_bonus,
        target_ac,
        advantage,
    )
}

/// Make an attack roll with a provided roller
///
/// Attacks always add proficiency. A natural 20 always hits and a natural 1
/// always misses, regardless of the total.
pub fn make_attack_roll_with(
    roller: &mut impl Roller,
    ability_score: i32,
    proficiency_bonus: i32,
    target_ac: i32,
    advantage: AdvantageState,
) -> AttackRollResult {
    let d20 = roll_with_advantage_state(roller, advantage);
    let modifier = calculate_modifier(ability_score).saturating_add(proficiency_bonus);
    let total = (d20.result as i32).saturating_add(modifier);
    let is_critical = d20.result == 20;
    let is_critical_miss = d20.result == 1;
    let hits = if is_critical {
        true
    } else if is_critical_miss {
        false
    } else {
        total >= target_ac
    };
    trace!(roll = d20.result, total, target_ac, hits, is_critical, "attack roll");
    AttackRollResult {
        roll: d20.result,
        rolls: d20.rolls,
        modifier,
        total,
        target_ac,
        hits,
        is_critical,
        is_critical_miss,
    }
}

/// Roll damage with the thread RNG
pub fn roll_damage(dice_count: u32, dice_sides: u32, modifier: i32, is_critical: bool) -> DamageRollResult {
    roll_damage_with(&mut rand::thread_rng(), dice_count, dice_sides, modifier, is_critical)
}

/// Roll damage with a provided roller
///
/// A critical doubles the number of dice, never the modifier.
pub fn roll_damage_with(
    roller: &mut impl Roller,
    dice_count: u32,
    dice_sides: u32,
    modifier: i32,
    is_critical: bool,
) -> DamageRollResult {
    let count = if is_critical {
        dice_count.saturating_mul(2)
    } else {
        dice_count
    };
    let rolls = roll_dice_with(roller, count, dice_sides);
    let sum = rolls.iter().fold(0i32, |acc, r| acc.saturating_add(*r as i32));
    let total = sum.saturating_add(modifier).max(0);
    DamageRollResult {
        rolls,
        modifier,
        total,
    }
}

/// Make a saving throw with the thread RNG
pub fn make_saving_throw(
    ability_score: i32,
    proficiency_bonus: i32,
    is_proficient: bool,
    dc: i32,
    advantage: AdvantageState,
) -> SavingThrowResult {
    make_saving_throw_with(
        &mut rand::thread_rng(),
        ability_score,
        proficiency_bonus,
        is_proficient,
        dc,
        advantage,
    )
}

/// Make a saving throw with a provided roller; succeeds when total >= dc
pub fn make_saving_throw_with(
    roller: &mut impl Roller,
    ability_score: i32,
    proficiency_bonus: i32,
    is_proficient: bool,
    dc: i32,
    advantage: AdvantageState,
) -> SavingThrowResult {
    let check = make_ability_check_with(
        roller,
        ability_score,
        proficiency_bonus,
        Proficiency::from_flags(is_proficient, false),
        advantage,
    );
    SavingThrowResult {
        success: check.total >= dc,
        roll: check.roll,
        rolls: check.rolls,
        modifier: check.modifier,
        total: check.total,
        dc,
    }
}
