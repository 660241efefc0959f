//! Condition system - status effects and their combat impact

mod definitions;
mod instance;
mod resolution;

pub use definitions::{get_condition, Condition, ConditionEffects, UnknownCondition};
pub use instance::{
    active_conditions, apply_condition, deserialize_condition_instances, deserialize_conditions,
    parse_conditions, process_condition_durations, remove_condition, ConditionInstance, TurnPhase,
};
pub use resolution::{
    ability_check_advantage_state, auto_fails_hearing_checks, auto_fails_save, can_act, can_move,
    concentration_save_dc, get_effective_speed, has_resistance_all, is_auto_crit,
    resolve_attack_advantage, save_advantage_state,
};
