//! Condition definitions - the fixed effect bundle of every condition

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named status condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
    /// Non-standard: the creature took the Dodge action
    Dodging,
}

/// Boolean combat effects of a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionEffects {
    /// The creature's own attacks have disadvantage
    pub attack_disadvantage: bool,
    /// The creature's own attacks have advantage
    pub attack_advantage: bool,
    /// Attacks against the creature have advantage
    pub attacked_advantage: bool,
    /// Attacks against the creature have disadvantage
    pub attacked_disadvantage: bool,
    pub cannot_act: bool,
    pub cannot_move: bool,
    pub speed_zero: bool,
    pub auto_fail_str_dex_saves: bool,
    pub auto_fail_hearing_checks: bool,
    pub ability_check_disadvantage: bool,
    pub dex_save_disadvantage: bool,
    /// Any hit from within 5 ft is a critical hit
    pub crit_within_5ft: bool,
    /// Resistance to all damage
    pub resistance_all: bool,
    pub cannot_approach_source: bool,
    pub cannot_attack_charmer: bool,
    /// Melee attacks from within 5 ft have advantage
    pub melee_attacked_advantage: bool,
    /// Attacks from farther away have disadvantage
    pub ranged_attacked_disadvantage: bool,
}

impl Condition {
    /// The 14 standard conditions followed by the non-standard ones
    pub const ALL: [Condition; 15] = [
        Condition::Blinded,
        Condition::Charmed,
        Condition::Deafened,
        Condition::Frightened,
        Condition::Grappled,
        Condition::Incapacitated,
        Condition::Invisible,
        Condition::Paralyzed,
        Condition::Petrified,
        Condition::Poisoned,
        Condition::Prone,
        Condition::Restrained,
        Condition::Stunned,
        Condition::Unconscious,
        Condition::Dodging,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Blinded => "blinded",
            Condition::Charmed => "charmed",
            Condition::Deafened => "deafened",
            Condition::Frightened => "frightened",
            Condition::Grappled => "grappled",
            Condition::Incapacitated => "incapacitated",
            Condition::Invisible => "invisible",
            Condition::Paralyzed => "paralyzed",
            Condition::Petrified => "petrified",
            Condition::Poisoned => "poisoned",
            Condition::Prone => "prone",
            Condition::Restrained => "restrained",
            Condition::Stunned => "stunned",
            Condition::Unconscious => "unconscious",
            Condition::Dodging => "dodging",
        }
    }

    /// Whether this is one of the 14 standard conditions
    pub fn is_standard(&self) -> bool {
        !matches!(self, Condition::Dodging)
    }

    /// The effect bundle for this condition
    pub fn definition(&self) -> ConditionEffects {
        let none = ConditionEffects::default();
        match self {
            Condition::Blinded => ConditionEffects {
                attack_disadvantage: true,
                attacked_advantage: true,
                ..none
            },
            Condition::Charmed => ConditionEffects {
                cannot_attack_charmer: true,
                ..none
            },
            Condition::Deafened => ConditionEffects {
                auto_fail_hearing_checks: true,
                ..none
            },
            Condition::Frightened => ConditionEffects {
                attack_disadvantage: true,
                ability_check_disadvantage: true,
                cannot_approach_source: true,
                ..none
            },
            Condition::Grappled => ConditionEffects {
                speed_zero: true,
                ..none
            },
            Condition::Incapacitated => ConditionEffects {
                cannot_act: true,
                ..none
            },
            Condition::Invisible => ConditionEffects {
                attack_advantage: true,
                attacked_disadvantage: true,
                ..none
            },
            Condition::Paralyzed => ConditionEffects {
                cannot_act: true,
                cannot_move: true,
                auto_fail_str_dex_saves: true,
                attacked_advantage: true,
                crit_within_5ft: true,
                ..none
            },
            Condition::Petrified => ConditionEffects {
                cannot_act: true,
                cannot_move: true,
                auto_fail_str_dex_saves: true,
                attacked_advantage: true,
                crit_within_5ft: true,
                resistance_all: true,
                ..none
            },
            Condition::Poisoned => ConditionEffects {
                attack_disadvantage: true,
                ability_check_disadvantage: true,
                ..none
            },
            Condition::Prone => ConditionEffects {
                attack_disadvantage: true,
                melee_attacked_advantage: true,
                ranged_attacked_disadvantage: true,
                ..none
            },
            Condition::Restrained => ConditionEffects {
                speed_zero: true,
                attack_disadvantage: true,
                attacked_advantage: true,
                dex_save_disadvantage: true,
                ..none
            },
            Condition::Stunned => ConditionEffects {
                cannot_act: true,
                cannot_move: true,
                auto_fail_str_dex_saves: true,
                attacked_advantage: true,
                ..none
            },
            Condition::Unconscious => ConditionEffects {
                cannot_act: true,
                cannot_move: true,
                auto_fail_str_dex_saves: true,
                attacked_advantage: true,
                crit_within_5ft: true,
                ..none
            },
            Condition::Dodging => ConditionEffects {
                attacked_disadvantage: true,
                ..none
            },
        }
    }
}

/// Case-insensitive lookup; unknown names resolve to `None`
pub fn get_condition(name: &str) -> Option<ConditionEffects> {
    name.parse::<Condition>().ok().map(|c| c.definition())
}

/// Error for a condition name that matches no canonical key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown condition: {0}")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Condition::ALL
            .iter()
            .copied()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

impl TryFrom<String> for Condition {
    type Error = UnknownCondition;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.name().to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteen_standard_conditions() {
        let standard = Condition::ALL.iter().filter(|c| c.is_standard()).count();
        assert_eq!(standard, 14);
    }

    #[test]
    fn test_lookup_case_insensitive() {
        assert_eq!(get_condition("Paralyzed"), Some(Condition::Paralyzed.definition()));
        assert_eq!(get_condition("PRONE"), Some(Condition::Prone.definition()));
        assert_eq!(get_condition("exhausted"), None);
    }

    #[test]
    fn test_dodging_only_attacked_disadvantage() {
        let expected = ConditionEffects {
            attacked_disadvantage: true,
            ..Default::default()
        };
        assert_eq!(Condition::Dodging.definition(), expected);
    }

    #[test]
    fn test_resistance_all_only_petrified() {
        let resistant: Vec<Condition> = Condition::ALL
            .iter()
            .copied()
            .filter(|c| c.definition().resistance_all)
            .collect();
        assert_eq!(resistant, vec![Condition::Petrified]);
    }

    #[test]
    fn test_blinded_does_not_auto_crit() {
        let blinded = Condition::Blinded.definition();
        assert!(blinded.attacked_advantage);
        assert!(!blinded.crit_within_5ft);
    }

    #[test]
    fn test_serde_round_trip_names() {
        let json = serde_json::to_string(&Condition::Frightened).unwrap();
        assert_eq!(json, "\"frightened\"");
        let parsed: Condition = serde_json::from_str("\"Invisible\"").unwrap();
        assert_eq!(parsed, Condition::Invisible);
        assert!(serde_json::from_str::<Condition>("\"hasted\"").is_err());
    }
}
