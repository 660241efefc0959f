//! Uniform die rolls

use crate::advantage::AdvantageState;
use crate::roller::Roller;
use serde::{Deserialize, Serialize};

/// Outcome of a d20 roll that may have used advantage or disadvantage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct D20Roll {
    /// Every d20 rolled, in order
    pub rolls: Vec<u32>,
    /// The kept natural result
    pub result: u32,
}

/// Roll a single d20
pub fn roll_d20() -> u32 {
    roll_d20_with(&mut rand::thread_rng())
}

/// Roll a single d20 with a provided roller
pub fn roll_d20_with(roller: &mut impl Roller) -> u32 {
    roller.roll_die(20)
}

/// Roll `count` independent dice with `sides` faces each
pub fn roll_dice(count: u32, sides: u32) -> Vec<u32> {
    roll_dice_with(&mut rand::thread_rng(), count, sides)
}

/// Roll `count` dice with a provided roller
pub fn roll_dice_with(roller: &mut impl Roller, count: u32, sides: u32) -> Vec<u32> {
    (0..count).map(|_| roller.roll_die(sides)).collect()
}

/// Roll two d20 and keep the higher
pub fn roll_with_advantage() -> D20Roll {
    roll_with_advantage_state(&mut rand::thread_rng(), AdvantageState::Advantage)
}

/// Roll two d20 and keep the lower
pub fn roll_with_disadvantage() -> D20Roll {
    roll_with_advantage_state(&mut rand::thread_rng(), AdvantageState::Disadvantage)
}

/// Roll a d20 according to an advantage state
pub fn roll_with_advantage_state(roller: &mut impl Roller, state: AdvantageState) -> D20Roll {
    let rolls = roll_dice_with(roller, state.dice_rolled() as u32, 20);
    let result = match state {
        AdvantageState::Advantage => rolls.iter().copied().max(),
        AdvantageState::Disadvantage => rolls.iter().copied().min(),
        AdvantageState::Normal => rolls.first().copied(),
    }
    .unwrap_or(1);
    D20Roll { rolls, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::ScriptedRoller;
    use proptest::prelude::*;

    #[test]
    fn test_d20_bounds() {
        for _ in 0..200 {
            let roll = roll_d20();
            assert!((1..=20).contains(&roll), "d20 rolled {}", roll);
        }
    }

    #[test]
    fn test_roll_dice_count_and_bounds() {
        let rolls = roll_dice(7, 6);
        assert_eq!(rolls.len(), 7);
        assert!(rolls.iter().all(|r| (1..=6).contains(r)));
        assert!(roll_dice(0, 6).is_empty());
    }

    #[test]
    fn test_advantage_keeps_max() {
        for _ in 0..100 {
            let roll = roll_with_advantage();
            assert_eq!(roll.rolls.len(), 2);
            assert_eq!(roll.result, *roll.rolls.iter().max().unwrap());
        }
    }

    #[test]
    fn test_disadvantage_keeps_min() {
        for _ in 0..100 {
            let roll = roll_with_disadvantage();
            assert_eq!(roll.rolls.len(), 2);
            assert_eq!(roll.result, *roll.rolls.iter().min().unwrap());
        }
    }

    #[test]
    fn test_normal_rolls_once() {
        let mut roller = ScriptedRoller::new([12, 19]);
        let roll = roll_with_advantage_state(&mut roller, AdvantageState::Normal);
        assert_eq!(roll.rolls, vec![12]);
        assert_eq!(roll.result, 12);
        assert_eq!(roller.remaining(), 1);
    }

    proptest! {
        #[test]
        fn prop_roll_dice_in_range(count in 0u32..40, sides in 1u32..100) {
            let rolls = roll_dice(count, sides);
            prop_assert_eq!(rolls.len(), count as usize);
            prop_assert!(rolls.iter().all(|r| *r >= 1 && *r <= sides));
        }
    }
}
