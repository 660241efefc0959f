//! Stats aggregation - equipment bonuses and derived combat statistics

mod aggregator;
mod derived;

pub use aggregator::{compute_equipment_bonuses, EquipmentBonuses, SpecialAttribute, StatKey};
pub use derived::{compute_derived_stats, primary_ability_for_class, DerivedStats};
