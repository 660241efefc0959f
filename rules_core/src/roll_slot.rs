//! Pending roll slot
//!
//! A session holds at most one outstanding roll. The slot is a typestate:
//! only `RollSlot<Idle>` can accept a request, so submitting a second roll
//! while one is pending does not compile. `RollSlotState` is the persisted
//! form; `into_slot` re-enters the typed API after loading.

use dice_core::{
    make_ability_check_with, make_attack_roll_with, make_saving_throw_with, AbilityCheckResult,
    AdvantageState, AttackRollResult, DiceError, DiceExpression, DiceRollResult, Proficiency,
    Roller, SavingThrowResult, DEFAULT_MAX_DICE,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Requests and outcomes
// ============================================================================

/// Validated damage notation
///
/// Serialized as the notation string and parsed again on load, so a saved
/// request goes through the same checks as a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DamageDice {
    notation: String,
    expression: DiceExpression,
}

impl DamageDice {
    /// Parse notation, rejecting anything over `limit` dice
    pub fn with_limit(notation: &str, limit: u32) -> Result<Self, DiceError> {
        let expression = DiceExpression::parse(notation)?;
        expression.check_limit(limit)?;
        Ok(DamageDice {
            notation: notation.trim().to_string(),
            expression,
        })
    }

    pub fn notation(&self) -> &str {
        &self.notation
    }

    pub fn expression(&self) -> &DiceExpression {
        &self.expression
    }
}

impl TryFrom<String> for DamageDice {
    type Error = DiceError;

    fn try_from(notation: String) -> Result<Self, Self::Error> {
        DamageDice::with_limit(&notation, DEFAULT_MAX_DICE)
    }
}

impl From<DamageDice> for String {
    fn from(dice: DamageDice) -> Self {
        dice.notation
    }
}

/// A roll waiting for dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RollRequest {
    AbilityCheck {
        ability_score: i32,
        proficiency_bonus: i32,
        proficiency: Proficiency,
        advantage: AdvantageState,
    },
    Attack {
        ability_score: i32,
        proficiency_bonus: i32,
        target_ac: i32,
        advantage: AdvantageState,
    },
    SavingThrow {
        ability_score: i32,
        proficiency_bonus: i32,
        is_proficient: bool,
        dc: i32,
        advantage: AdvantageState,
    },
    Damage {
        dice: DamageDice,
        is_critical: bool,
    },
}

impl RollRequest {
    /// Damage request from notation; the notation is validated up front
    pub fn damage(notation: &str, is_critical: bool) -> Result<RollRequest, DiceError> {
        Self::damage_with_limit(notation, is_critical, DEFAULT_MAX_DICE)
    }

    /// Damage request with a caller-supplied dice limit (e.g. `dice.max_dice`)
    pub fn damage_with_limit(
        notation: &str,
        is_critical: bool,
        limit: u32,
    ) -> Result<RollRequest, DiceError> {
        Ok(RollRequest::Damage {
            dice: DamageDice::with_limit(notation, limit)?,
            is_critical,
        })
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            RollRequest::AbilityCheck { .. } => "ability_check",
            RollRequest::Attack { .. } => "attack",
            RollRequest::SavingThrow { .. } => "saving_throw",
            RollRequest::Damage { .. } => "damage",
        }
    }

    /// Roll the request
    pub fn roll_with(&self, roller: &mut impl Roller) -> RollOutcome {
        match self {
            RollRequest::AbilityCheck {
                ability_score,
                proficiency_bonus,
                proficiency,
                advantage,
            } => RollOutcome::AbilityCheck(make_ability_check_with(
                roller,
                *ability_score,
                *proficiency_bonus,
                *proficiency,
                *advantage,
            )),
            RollRequest::Attack {
                ability_score,
                proficiency_bonus,
                target_ac,
                advantage,
            } => RollOutcome::Attack(make_attack_roll_with(
                roller,
                *ability_score,
                *proficiency_bonus,
                *target_ac,
                *advantage,
            )),
            RollRequest::SavingThrow {
                ability_score,
                proficiency_bonus,
                is_proficient,
                dc,
                advantage,
            } => RollOutcome::SavingThrow(make_saving_throw_with(
                roller,
                *ability_score,
                *proficiency_bonus,
                *is_proficient,
                *dc,
                *advantage,
            )),
            RollRequest::Damage { dice, is_critical } => {
                let result = if *is_critical {
                    dice.expression().roll_critical_with(roller)
                } else {
                    dice.expression().roll_with(roller)
                };
                RollOutcome::Damage(DamageOutcome {
                    result,
                    is_critical: *is_critical,
                })
            }
        }
    }
}

/// Rolled damage, floored at zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub result: DiceRollResult,
    pub is_critical: bool,
}

impl DamageOutcome {
    pub fn total(&self) -> i32 {
        self.result.total.max(0)
    }
}

/// Result of a resolved roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum RollOutcome {
    AbilityCheck(AbilityCheckResult),
    Attack(AttackRollResult),
    SavingThrow(SavingThrowResult),
    Damage(DamageOutcome),
}

// ============================================================================
// Typestate slot
// ============================================================================

/// No roll outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Idle;

/// A roll has been requested and awaits dice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwaitingRoll {
    request: RollRequest,
}

/// The roll has been made and awaits acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    request: RollRequest,
    outcome: RollOutcome,
}

/// A session's single pending-roll slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSlot<S> {
    state: S,
}

impl RollSlot<Idle> {
    pub fn new() -> Self {
        RollSlot { state: Idle }
    }

    /// Ask for a roll
    pub fn request(self, request: RollRequest) -> RollSlot<AwaitingRoll> {
        debug!(kind = request.label(), "roll requested");
        RollSlot {
            state: AwaitingRoll { request },
        }
    }
}

impl Default for RollSlot<Idle> {
    fn default() -> Self {
        Self::new()
    }
}

impl RollSlot<AwaitingRoll> {
    pub fn pending(&self) -> &RollRequest {
        &self.state.request
    }

    /// Roll the pending request with the thread RNG
    pub fn resolve(self) -> RollSlot<Resolved> {
        self.resolve_with(&mut rand::thread_rng())
    }

    /// Roll the pending request with a provided roller
    ///
    /// Physical dice rolled at the table arrive through a `ScriptedRoller`.
    pub fn resolve_with(self, roller: &mut impl Roller) -> RollSlot<Resolved> {
        let outcome = self.state.request.roll_with(roller);
        debug!(kind = self.state.request.label(), "roll resolved");
        RollSlot {
            state: Resolved {
                request: self.state.request,
                outcome,
            },
        }
    }

    /// Drop the pending request without rolling
    pub fn cancel(self) -> RollSlot<Idle> {
        debug!(kind = self.state.request.label(), "pending roll cancelled");
        RollSlot::new()
    }
}

impl RollSlot<Resolved> {
    pub fn requested(&self) -> &RollRequest {
        &self.state.request
    }

    pub fn outcome(&self) -> &RollOutcome {
        &self.state.outcome
    }

    /// Take the outcome and free the slot
    pub fn acknowledge(self) -> (RollOutcome, RollSlot<Idle>) {
        (self.state.outcome, RollSlot::new())
    }
}

// ============================================================================
// Persisted form
// ============================================================================

/// Serializable slot state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RollSlotState {
    #[default]
    Idle,
    AwaitingRoll { request: RollRequest },
    Resolved { request: RollRequest, outcome: RollOutcome },
}

/// A slot in whichever state it was loaded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyRollSlot {
    Idle(RollSlot<Idle>),
    AwaitingRoll(RollSlot<AwaitingRoll>),
    Resolved(RollSlot<Resolved>),
}

impl RollSlotState {
    pub fn into_slot(self) -> AnyRollSlot {
        match self {
            RollSlotState::Idle => AnyRollSlot::Idle(RollSlot::new()),
            RollSlotState::AwaitingRoll { request } => AnyRollSlot::AwaitingRoll(RollSlot {
                state: AwaitingRoll { request },
            }),
            RollSlotState::Resolved { request, outcome } => AnyRollSlot::Resolved(RollSlot {
                state: Resolved { request, outcome },
            }),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RollSlotState::Idle)
    }
}

impl From<RollSlot<Idle>> for RollSlotState {
    fn from(_: RollSlot<Idle>) -> Self {
        RollSlotState::Idle
    }
}

impl From<RollSlot<AwaitingRoll>> for RollSlotState {
    fn from(slot: RollSlot<AwaitingRoll>) -> Self {
        RollSlotState::AwaitingRoll {
            request: slot.state.request,
        }
    }
}

impl From<RollSlot<Resolved>> for RollSlotState {
    fn from(slot: RollSlot<Resolved>) -> Self {
        RollSlotState::Resolved {
            request: slot.state.request,
            outcome: slot.state.outcome,
        }
    }
}

impl From<AnyRollSlot> for RollSlotState {
    fn from(slot: AnyRollSlot) -> Self {
        match slot {
            AnyRollSlot::Idle(s) => s.into(),
            AnyRollSlot::AwaitingRoll(s) => s.into(),
            AnyRollSlot::Resolved(s) => s.into(),
        }
    }
}
