//! Spell slot table state

use super::get_spell_slots;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Error consuming or restoring a spell slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("No spell slots of level {0}")]
    NoSlotsAtLevel(u8),
    #[error("All level {0} spell slots are used")]
    Exhausted(u8),
    #[error("No level {0} spell slots have been used")]
    NothingToRestore(u8),
}

/// Slots of a single spell level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotState {
    pub max: u32,
    pub used: u32,
}

impl SlotState {
    /// Slots still available
    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.used)
    }
}

/// Spell slot table: spell level (1-9) to slot state
///
/// Mutations return a new table; the caller commits it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellSlots {
    levels: BTreeMap<u8, SlotState>,
}

impl SpellSlots {
    /// An empty table (non-casters)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit states
    pub fn from_states(levels: impl IntoIterator<Item = (u8, SlotState)>) -> Self {
        SpellSlots {
            levels: levels.into_iter().collect(),
        }
    }

    /// State of one spell level
    pub fn get(&self, level: u8) -> Option<SlotState> {
        self.levels.get(&level).copied()
    }

    /// Iterate over (spell level, state) in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u8, SlotState)> + '_ {
        self.levels.iter().map(|(level, state)| (*level, *state))
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// True iff a slot of exactly this level exists and is unused
    pub fn has_slot(&self, level: u8) -> bool {
        self.levels
            .get(&level)
            .map(|s| s.used < s.max)
            .unwrap_or(false)
    }

    /// Lowest level at or above `min_level` with a free slot (for upcasting)
    pub fn lowest_available(&self, min_level: u8) -> Option<u8> {
        self.levels
            .range(min_level..)
            .find(|(_, s)| s.used < s.max)
            .map(|(level, _)| *level)
    }

    /// Use one slot of a level
    pub fn consume(&self, level: u8) -> Result<SpellSlots, SlotError> {
        let state = self.levels.get(&level).ok_or(SlotError::NoSlotsAtLevel(level))?;
        if state.used >= state.max {
            return Err(SlotError::Exhausted(level));
        }
        let mut next = self.clone();
        next.levels.insert(
            level,
            SlotState {
                used: state.used + 1,
                ..*state
            },
        );
        debug!(level, remaining = state.remaining() - 1, "spell slot consumed");
        Ok(next)
    }

    /// Give back one used slot of a level
    pub fn restore(&self, level: u8) -> Result<SpellSlots, SlotError> {
        let state = self.levels.get(&level).ok_or(SlotError::NoSlotsAtLevel(level))?;
        if state.used == 0 {
            return Err(SlotError::NothingToRestore(level));
        }
        let mut next = self.clone();
        next.levels.insert(
            level,
            SlotState {
                used: state.used - 1,
                ..*state
            },
        );
        Ok(next)
    }

    /// Long rest: give back used slots one at a time until none are used
    pub fn recover_all(&self) -> SpellSlots {
        let mut slots = self.clone();
        for level in self.levels.keys() {
            while let Ok(next) = slots.restore(*level) {
                slots = next;
            }
        }
        debug!("spell slots recovered");
        slots
    }
}

/// Fresh slot table for a class and level, nothing used
pub fn initialize_spell_slots(class_name: &str, level: u32) -> SpellSlots {
    SpellSlots::from_states(
        get_spell_slots(class_name, level)
            .into_iter()
            .map(|(spell_level, max)| (spell_level, SlotState { max, used: 0 })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize() {
        let slots = initialize_spell_slots("wizard", 3);
        assert_eq!(slots.get(1), Some(SlotState { max: 4, used: 0 }));
        assert_eq!(slots.get(2), Some(SlotState { max: 2, used: 0 }));
        assert_eq!(slots.get(3), None);
        assert!(initialize_spell_slots("fighter", 10).is_empty());
    }

    #[test]
    fn test_has_slot() {
        let slots = SpellSlots::from_states([
            (1, SlotState { max: 2, used: 2 }),
            (2, SlotState { max: 1, used: 0 }),
        ]);
        assert!(!slots.has_slot(1));
        assert!(slots.has_slot(2));
        assert!(!slots.has_slot(3));
    }

    #[test]
    fn test_consume_until_exhausted() {
        let slots = initialize_spell_slots("wizard", 1);
        let slots = slots.consume(1).unwrap();
        let slots = slots.consume(1).unwrap();
        assert_eq!(slots.consume(1), Err(SlotError::Exhausted(1)));
        assert_eq!(slots.consume(2), Err(SlotError::NoSlotsAtLevel(2)));
    }

    #[test]
    fn test_consume_does_not_mutate_original() {
        let slots = initialize_spell_slots("cleric", 5);
        let used = slots.consume(3).unwrap();
        assert_eq!(slots.get(3).unwrap().used, 0);
        assert_eq!(used.get(3).unwrap().used, 1);
    }

    #[test]
    fn test_restore_and_recover() {
        let slots = initialize_spell_slots("bard", 5);
        assert_eq!(slots.restore(1), Err(SlotError::NothingToRestore(1)));
        let used = slots.consume(1).unwrap().consume(2).unwrap();
        let restored = used.restore(1).unwrap();
        assert_eq!(restored.get(1).unwrap().used, 0);
        assert_eq!(used.recover_all(), slots);
    }

    #[test]
    fn test_recover_all_is_repeated_restores() {
        let slots = SpellSlots::from_states([
            (1, SlotState { max: 4, used: 3 }),
            (2, SlotState { max: 2, used: 0 }),
            (3, SlotState { max: 2, used: 5 }),
        ]);
        let by_hand = slots
            .restore(1)
            .and_then(|s| s.restore(1))
            .and_then(|s| s.restore(1))
            .unwrap();
        let rested = slots.recover_all();
        assert_eq!(rested.get(1), by_hand.get(1));
        assert_eq!(rested.get(2).unwrap().used, 0);
        assert_eq!(rested.get(3).unwrap().used, 0);
        assert_eq!(rested.recover_all(), rested);
    }

    #[test]
    fn test_lowest_available() {
        let slots = SpellSlots::from_states([
            (1, SlotState { max: 4, used: 4 }),
            (2, SlotState { max: 3, used: 3 }),
            (3, SlotState { max: 2, used: 1 }),
        ]);
        assert_eq!(slots.lowest_available(1), Some(3));
        assert_eq!(slots.lowest_available(4), None);
    }

    #[test]
    fn test_json_shape() {
        let slots = initialize_spell_slots("wizard", 1);
        let json = serde_json::to_value(&slots).unwrap();
        assert_eq!(json["1"]["max"], 2);
        assert_eq!(json["1"]["used"], 0);
    }
}
