//! Class resource pools (rage, ki, action surge, ...)

use crate::types::CharacterClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Which rest refills a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestKind {
    Short,
    Long,
}

/// Expendable class resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Rage,
    Ki,
    SecondWind,
    ActionSurge,
    Indomitable,
    ChannelDivinity,
    LayOnHands,
    SorceryPoints,
    WildShape,
    ArcaneRecovery,
}

impl ResourceKind {
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::Rage,
            ResourceKind::Ki,
            ResourceKind::SecondWind,
            ResourceKind::ActionSurge,
            ResourceKind::Indomitable,
            ResourceKind::ChannelDivinity,
            ResourceKind::LayOnHands,
            ResourceKind::SorceryPoints,
            ResourceKind::WildShape,
            ResourceKind::ArcaneRecovery,
        ]
    }

    /// Wire key, as used in persisted pool maps
    pub fn key(&self) -> &'static str {
        match self {
            ResourceKind::Rage => "rage",
            ResourceKind::Ki => "ki",
            ResourceKind::SecondWind => "secondWind",
            ResourceKind::ActionSurge => "actionSurge",
            ResourceKind::Indomitable => "indomitable",
            ResourceKind::ChannelDivinity => "channelDivinity",
            ResourceKind::LayOnHands => "layOnHands",
            ResourceKind::SorceryPoints => "sorceryPoints",
            ResourceKind::WildShape => "wildShape",
            ResourceKind::ArcaneRecovery => "arcaneRecovery",
        }
    }

    /// Rest that refills this resource
    pub fn recovered_by(&self) -> RestKind {
        match self {
            ResourceKind::Ki
            | ResourceKind::SecondWind
            | ResourceKind::ActionSurge
            | ResourceKind::ChannelDivinity
            | ResourceKind::WildShape => RestKind::Short,
            ResourceKind::Rage
            | ResourceKind::Indomitable
            | ResourceKind::LayOnHands
            | ResourceKind::SorceryPoints
            | ResourceKind::ArcaneRecovery => RestKind::Long,
        }
    }

    /// Parse a wire key, case-insensitive
    pub fn parse(key: &str) -> Option<ResourceKind> {
        let key = key.trim();
        ResourceKind::all()
            .iter()
            .copied()
            .find(|kind| kind.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error using or restoring a class resource
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("Resource {0} is not available to this character")]
    Unavailable(ResourceKind),
    #[error("Resource {0} is exhausted")]
    Exhausted(ResourceKind),
}

/// Current and maximum charges of one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub max: u32,
    pub current: u32,
}

impl ResourcePool {
    /// A full pool
    pub fn full(max: u32) -> Self {
        ResourcePool { max, current: max }
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Spend one charge; `None` when empty
    pub fn consume_one(&self) -> Option<ResourcePool> {
        self.current.checked_sub(1).map(|current| ResourcePool {
            current,
            ..*self
        })
    }

    /// Regain one charge, capped at max
    pub fn restore_one(&self) -> ResourcePool {
        ResourcePool {
            current: self.current.saturating_add(1).min(self.max),
            ..*self
        }
    }
}

/// All resource pools of a character
///
/// Mutations return a new map; the caller commits it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassResources {
    pools: BTreeMap<ResourceKind, ResourcePool>,
}

impl ClassResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pools(pools: impl IntoIterator<Item = (ResourceKind, ResourcePool)>) -> Self {
        ClassResources {
            pools: pools.into_iter().collect(),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<ResourcePool> {
        self.pools.get(&kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, ResourcePool)> + '_ {
        self.pools.iter().map(|(kind, pool)| (*kind, *pool))
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Spend one charge of a resource
    pub fn consume(&self, kind: ResourceKind) -> Result<ClassResources, ResourceError> {
        let pool = self.pools.get(&kind).ok_or(ResourceError::Unavailable(kind))?;
        let spent = pool.consume_one().ok_or(ResourceError::Exhausted(kind))?;
        let mut next = self.clone();
        next.pools.insert(kind, spent);
        debug!(resource = %kind, remaining = spent.current, "class resource consumed");
        Ok(next)
    }

    /// Regain one charge of a resource
    pub fn restore(&self, kind: ResourceKind) -> Result<ClassResources, ResourceError> {
        let pool = self.pools.get(&kind).ok_or(ResourceError::Unavailable(kind))?;
        let mut next = self.clone();
        next.pools.insert(kind, pool.restore_one());
        Ok(next)
    }

    /// Refill every pool the rest recovers; a long rest also covers short-rest pools
    ///
    /// A rest is a run of single-charge restores until each pool is full.
    pub fn recover(&self, rest: RestKind) -> ClassResources {
        let mut next = self.clone();
        for (kind, pool) in next.pools.iter_mut() {
            if rest == RestKind::Long || kind.recovered_by() == rest {
                while pool.current < pool.max {
                    *pool = pool.restore_one();
                }
            }
        }
        debug!(?rest, "class resources recovered");
        next
    }
}

fn rage_charges(level: u32) -> u32 {
    match level {
        0 => 0,
        1..=2 => 2,
        3..=5 => 3,
        6..=11 => 4,
        12..=16 => 5,
        _ => 6,
    }
}

fn channel_divinity_charges(class: CharacterClass, level: u32) -> u32 {
    match class {
        CharacterClass::Cleric => match level {
            0..=1 => 0,
            2..=5 => 1,
            6..=17 => 2,
            _ => 3,
        },
        CharacterClass::Paladin if level >= 3 => 1,
        _ => 0,
    }
}

/// Resource maxima for a class at a level; zero-sized pools are omitted
pub fn resource_maxima(class: CharacterClass, level: u32) -> Vec<(ResourceKind, u32)> {
    if level == 0 {
        return Vec::new();
    }
    let maxima = match class {
        CharacterClass::Barbarian => vec![(ResourceKind::Rage, rage_charges(level))],
        CharacterClass::Fighter => vec![
            (ResourceKind::SecondWind, 1),
            (ResourceKind::ActionSurge, match level {
                0..=1 => 0,
                2..=16 => 1,
                _ => 2,
            }),
            (ResourceKind::Indomitable, match level {
                0..=8 => 0,
                9..=12 => 1,
                13..=16 => 2,
                _ => 3,
            }),
        ],
        CharacterClass::Monk => vec![(ResourceKind::Ki, level)],
        CharacterClass::Cleric => vec![(
            ResourceKind::ChannelDivinity,
            channel_divinity_charges(class, level),
        )],
        CharacterClass::Paladin => vec![
            (ResourceKind::LayOnHands, 5 * level),
            (
                ResourceKind::ChannelDivinity,
                channel_divinity_charges(class, level),
            ),
        ],
        CharacterClass::Sorcerer => vec![(
            ResourceKind::SorceryPoints,
            if level >= 2 { level } else { 0 },
        )],
        CharacterClass::Druid => vec![(ResourceKind::WildShape, if level >= 2 { 2 } else { 0 })],
        CharacterClass::Wizard => vec![(ResourceKind::ArcaneRecovery, 1)],
        CharacterClass::Bard
        | CharacterClass::Ranger
        | CharacterClass::Rogue
        | CharacterClass::Warlock => Vec::new(),
    };
    maxima.into_iter().filter(|(_, max)| *max > 0).collect()
}

/// Full resource pools for a class and level; unknown classes get none
pub fn initialize_class_resources(class_name: &str, level: u32) -> ClassResources {
    match CharacterClass::parse(class_name) {
        Some(class) => ClassResources::from_pools(
            resource_maxima(class, level)
                .into_iter()
                .map(|(kind, max)| (kind, ResourcePool::full(max))),
        ),
        None => ClassResources::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fighter_resources() {
        let res = initialize_class_resources("fighter", 2);
        assert_eq!(res.get(ResourceKind::SecondWind), Some(ResourcePool::full(1)));
        assert_eq!(res.get(ResourceKind::ActionSurge), Some(ResourcePool::full(1)));
        assert_eq!(res.get(ResourceKind::Indomitable), None);

        let res = initialize_class_resources("Fighter", 1);
        assert_eq!(res.len(), 1);

        let res = initialize_class_resources("fighter", 17);
        assert_eq!(res.get(ResourceKind::ActionSurge).unwrap().max, 2);
        assert_eq!(res.get(ResourceKind::Indomitable).unwrap().max, 3);
    }

    #[test]
    fn test_rage_scaling() {
        let expected = [(1, 2), (2, 2), (3, 3), (6, 4), (12, 5), (17, 6), (20, 6)];
        for (level, charges) in expected {
            let res = initialize_class_resources("barbarian", level);
            assert_eq!(res.get(ResourceKind::Rage), Some(ResourcePool::full(charges)), "level {}", level);
        }
    }

    #[test]
    fn test_monk_ki_equals_level() {
        for level in 1..=20 {
            let res = initialize_class_resources("monk", level);
            assert_eq!(res.get(ResourceKind::Ki), Some(ResourcePool::full(level)));
        }
    }

    #[test]
    fn test_paladin_and_cleric() {
        let res = initialize_class_resources("paladin", 4);
        assert_eq!(res.get(ResourceKind::LayOnHands).unwrap().max, 20);
        assert_eq!(res.get(ResourceKind::ChannelDivinity).unwrap().max, 1);

        let res = initialize_class_resources("cleric", 1);
        assert!(res.is_empty());
        let res = initialize_class_resources("cleric", 18);
        assert_eq!(res.get(ResourceKind::ChannelDivinity).unwrap().max, 3);
    }

    #[test]
    fn test_no_resources() {
        assert!(initialize_class_resources("rogue", 20).is_empty());
        assert!(initialize_class_resources("necromancer", 5).is_empty());
        assert!(initialize_class_resources("barbarian", 0).is_empty());
    }

    #[test]
    fn test_consume_and_restore() {
        let res = initialize_class_resources("barbarian", 1);
        let res = res.consume(ResourceKind::Rage).unwrap();
        let res = res.consume(ResourceKind::Rage).unwrap();
        assert!(res.get(ResourceKind::Rage).unwrap().is_empty());
        assert_eq!(
            res.consume(ResourceKind::Rage),
            Err(ResourceError::Exhausted(ResourceKind::Rage))
        );
        assert_eq!(
            res.consume(ResourceKind::Ki),
            Err(ResourceError::Unavailable(ResourceKind::Ki))
        );

        let res = res.restore(ResourceKind::Rage).unwrap();
        assert_eq!(res.get(ResourceKind::Rage).unwrap().current, 1);
    }

    #[test]
    fn test_restore_capped_at_max() {
        let pool = ResourcePool::full(2);
        assert_eq!(pool.restore_one(), pool);
        assert_eq!(ResourcePool { max: 1, current: 0 }.consume_one(), None);
    }

    #[test]
    fn test_rest_recovery() {
        let res = initialize_class_resources("fighter", 9);
        let spent = res
            .consume(ResourceKind::SecondWind)
            .and_then(|r| r.consume(ResourceKind::Indomitable))
            .unwrap();

        let short = spent.recover(RestKind::Short);
        assert_eq!(short.get(ResourceKind::SecondWind).unwrap().current, 1);
        assert_eq!(short.get(ResourceKind::Indomitable).unwrap().current, 0);

        assert_eq!(spent.recover(RestKind::Long), res);
    }

    #[test]
    fn test_rest_matches_repeated_restores() {
        let res = initialize_class_resources("monk", 6);
        let ki_max = res.get(ResourceKind::Ki).unwrap().max;
        let mut spent = res.clone();
        for _ in 0..ki_max {
            spent = spent.consume(ResourceKind::Ki).unwrap();
        }
        assert!(spent.get(ResourceKind::Ki).unwrap().is_empty());

        let mut by_hand = spent.clone();
        for _ in 0..ki_max {
            by_hand = by_hand.restore(ResourceKind::Ki).unwrap();
        }
        assert_eq!(spent.recover(RestKind::Short), by_hand);
        assert_eq!(by_hand.restore(ResourceKind::Ki).unwrap(), by_hand);
    }

    #[test]
    fn test_wire_format() {
        let res = initialize_class_resources("fighter", 2);
        let json = serde_json::to_string(&res).unwrap();
        assert_eq!(
            json,
            r#"{"secondWind":{"max":1,"current":1},"actionSurge":{"max":1,"current":1}}"#
        );
        let back: ClassResources = serde_json::from_str(&json).unwrap();
        assert_eq!(back, res);
        assert_eq!(ResourceKind::parse("ACTIONSURGE"), Some(ResourceKind::ActionSurge));
    }
}
