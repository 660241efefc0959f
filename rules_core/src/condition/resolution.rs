//! Condition resolution - combat impact of a set of active conditions
//!
//! All functions take normalized `Condition` slices; free-text names are
//! converted once with `parse_conditions` at the boundary.

use super::definitions::{Condition, ConditionEffects};
use crate::types::Ability;
use dice_core::AdvantageState;
use tracing::trace;

fn any_effect(conditions: &[Condition], flag: impl Fn(&ConditionEffects) -> bool) -> bool {
    conditions.iter().any(|c| flag(&c.definition()))
}

/// Net advantage on an attack roll from both sides' conditions
///
/// Each source contributes +1 or -1 once; the sum is clamped, so one
/// advantage and one disadvantage always cancel. A prone target grants
/// advantage to melee attacks from within 5 ft and imposes disadvantage on
/// everything else.
pub fn resolve_attack_advantage(
    attacker_conditions: &[Condition],
    target_conditions: &[Condition],
    is_melee: bool,
    is_within_5ft: bool,
) -> AdvantageState {
    let mut net: i32 = 0;

    if any_effect(attacker_conditions, |e| e.attack_disadvantage) {
        net -= 1;
    }
    if any_effect(attacker_conditions, |e| e.attack_advantage) {
        net += 1;
    }
    if any_effect(target_conditions, |e| e.attacked_advantage) {
        net += 1;
    }
    if any_effect(target_conditions, |e| e.attacked_disadvantage) {
        net -= 1;
    }

    let close_melee = is_melee && is_within_5ft;
    if close_melee && any_effect(target_conditions, |e| e.melee_attacked_advantage) {
        net += 1;
    } else if !close_melee && any_effect(target_conditions, |e| e.ranged_attacked_disadvantage) {
        net -= 1;
    }

    let state = AdvantageState::from_net(net);
    trace!(net, %state, "resolved attack advantage");
    state
}

/// False if any condition prevents taking actions
pub fn can_act(conditions: &[Condition]) -> bool {
    !any_effect(conditions, |e| e.cannot_act)
}

/// False if any condition prevents movement or sets speed to zero
pub fn can_move(conditions: &[Condition]) -> bool {
    !any_effect(conditions, |e| e.cannot_move || e.speed_zero)
}

/// Speed after conditions: zero if any condition sets it to zero
pub fn get_effective_speed(base_speed: i32, conditions: &[Condition]) -> i32 {
    if any_effect(conditions, |e| e.speed_zero) {
        0
    } else {
        base_speed
    }
}

/// Whether a hit against the target from this range is automatically critical
pub fn is_auto_crit(target_conditions: &[Condition], is_within_5ft: bool) -> bool {
    is_within_5ft && any_effect(target_conditions, |e| e.crit_within_5ft)
}

/// Whether any condition grants resistance to all damage
pub fn has_resistance_all(conditions: &[Condition]) -> bool {
    any_effect(conditions, |e| e.resistance_all)
}

/// Whether a saving throw of this ability fails automatically
pub fn auto_fails_save(conditions: &[Condition], ability: Ability) -> bool {
    matches!(ability, Ability::Strength | Ability::Dexterity)
        && any_effect(conditions, |e| e.auto_fail_str_dex_saves)
}

/// Advantage state imposed on a saving throw of this ability
pub fn save_advantage_state(conditions: &[Condition], ability: Ability) -> AdvantageState {
    if ability == Ability::Dexterity && any_effect(conditions, |e| e.dex_save_disadvantage) {
        AdvantageState::Disadvantage
    } else {
        AdvantageState::Normal
    }
}

/// Advantage state imposed on ability checks
pub fn ability_check_advantage_state(conditions: &[Condition]) -> AdvantageState {
    if any_effect(conditions, |e| e.ability_check_disadvantage) {
        AdvantageState::Disadvantage
    } else {
        AdvantageState::Normal
    }
}

/// Whether hearing-based checks fail automatically
pub fn auto_fails_hearing_checks(conditions: &[Condition]) -> bool {
    any_effect(conditions, |e| e.auto_fail_hearing_checks)
}

/// Concentration save DC after taking damage: max(10, damage / 2)
pub fn concentration_save_dc(damage_taken: u32) -> u32 {
    (damage_taken / 2).max(10)
}
