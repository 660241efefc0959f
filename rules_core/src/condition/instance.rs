//! Condition instances applied to a combatant, and their duration ticks

use super::definitions::Condition;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

/// Which edge of a turn a duration ticks on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Start,
    End,
}

/// A condition applied to a combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionInstance {
    #[serde(rename = "name")]
    pub condition: Condition,
    /// Remaining ticks; `None` means permanent until removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<TurnPhase>,
    /// Who applied the condition (the charmer, the source of fear)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ConditionInstance {
    /// A permanent instance
    pub fn permanent(condition: Condition) -> Self {
        ConditionInstance {
            condition,
            duration: None,
            expires_on: None,
            source: None,
        }
    }

    /// An instance lasting `duration` ticks of `expires_on`
    pub fn timed(condition: Condition, duration: i32, expires_on: TurnPhase) -> Self {
        ConditionInstance {
            condition,
            duration: Some(duration),
            expires_on: Some(expires_on),
            source: None,
        }
    }

    /// Builder: record the source creature
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether this instance has no duration
    pub fn is_permanent(&self) -> bool {
        self.duration.is_none()
    }

    /// Parse a stored instance list, skipping unknown condition names
    pub fn list_from_json(json: &str) -> Result<Vec<ConditionInstance>, serde_json::Error> {
        let mut de = serde_json::Deserializer::from_str(json);
        let instances = deserialize_condition_instances(&mut de)?;
        de.end()?;
        Ok(instances)
    }
}

/// Stored instance before its name is normalized
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredInstance {
    name: String,
    #[serde(default)]
    duration: Option<i32>,
    #[serde(default)]
    expires_on: Option<TurnPhase>,
    #[serde(default)]
    source: Option<String>,
}

/// Deserialize an instance list, dropping entries with unknown names
///
/// For use with `#[serde(deserialize_with = ...)]`.
pub fn deserialize_condition_instances<'de, D>(deserializer: D) -> Result<Vec<ConditionInstance>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Vec::<StoredInstance>::deserialize(deserializer)?;
    Ok(stored
        .into_iter()
        .filter_map(|s| match s.name.parse::<Condition>() {
            Ok(condition) => Some(ConditionInstance {
                condition,
                duration: s.duration,
                expires_on: s.expires_on,
                source: s.source,
            }),
            Err(_) => {
                debug!(condition = %s.name, "ignoring unknown condition");
                None
            }
        })
        .collect())
}

/// Deserialize a list of condition names, dropping unknown ones
///
/// For use with `#[serde(deserialize_with = ...)]`.
pub fn deserialize_conditions<'de, D>(deserializer: D) -> Result<Vec<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Vec::<String>::deserialize(deserializer)?;
    Ok(parse_conditions(&names))
}

/// Normalize free-text condition names, dropping unknown ones
pub fn parse_conditions<S: AsRef<str>>(names: &[S]) -> Vec<Condition> {
    names
        .iter()
        .filter_map(|name| match name.as_ref().parse::<Condition>() {
            Ok(condition) => Some(condition),
            Err(_) => {
                debug!(condition = name.as_ref(), "ignoring unknown condition");
                None
            }
        })
        .collect()
}

/// The conditions named by a list of instances
pub fn active_conditions(instances: &[ConditionInstance]) -> Vec<Condition> {
    instances.iter().map(|i| i.condition).collect()
}

/// Tick durations for the given turn phase
///
/// Instances expiring on `timing` with a numeric duration lose one tick and
/// are dropped once they reach zero. Everything else passes through unchanged.
pub fn process_condition_durations(
    conditions: &[ConditionInstance],
    timing: TurnPhase,
) -> Vec<ConditionInstance> {
    conditions
        .iter()
        .filter_map(|instance| match (instance.duration, instance.expires_on) {
            (Some(duration), Some(phase)) if phase == timing => {
                let remaining = duration.saturating_sub(1);
                if remaining <= 0 {
                    trace!(condition = %instance.condition, "condition expired");
                    None
                } else {
                    Some(ConditionInstance {
                        duration: Some(remaining),
                        ..instance.clone()
                    })
                }
            }
            _ => Some(instance.clone()),
        })
        .collect()
}

/// Apply a condition, returning the new list
///
/// A condition already present is replaced rather than stacked. The longer of
/// the two durations wins and a permanent instance beats any timed one.
pub fn apply_condition(
    conditions: &[ConditionInstance],
    incoming: ConditionInstance,
) -> Vec<ConditionInstance> {
    let mut result: Vec<ConditionInstance> = Vec::with_capacity(conditions.len() + 1);
    let mut merged = incoming;
    for existing in conditions {
        if existing.condition != merged.condition {
            result.push(existing.clone());
            continue;
        }
        let keep_existing = match (existing.duration, merged.duration) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(old), Some(new)) => old > new,
        };
        if keep_existing {
            merged = existing.clone();
        }
    }
    result.push(merged);
    result
}

/// Remove every instance of a condition, returning the new list
pub fn remove_condition(conditions: &[ConditionInstance], condition: Condition) -> Vec<ConditionInstance> {
    conditions
        .iter()
        .filter(|i| i.condition != condition)
        .cloned()
        .collect()
}
