//! Dice notation
//!
//! Parses and rolls damage strings like "2d6", "1d8+1d6+3" or "2d6 + 4 fire".
//! One or more `NdM` terms joined by `+`, an optional flat `+K`, and an
//! optional trailing damage-type word which is discarded. Every `N` and `M`
//! must be at least 1.

use crate::error::DiceError;
use crate::roller::Roller;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{trace, warn};

/// Most dice a single expression may roll unless a caller supplies its own limit
pub const DEFAULT_MAX_DICE: u32 = 100;

static GRAMMAR: OnceLock<Regex> = OnceLock::new();

fn grammar() -> &'static Regex {
    GRAMMAR.get_or_init(|| {
        Regex::new(r"^(?P<body>\d+d\d+(?:\s*\+\s*\d+d\d+)*(?:\s*\+\s*\d+)?)(?:\s+(?P<kind>\w+))?$")
            .expect("dice grammar is a valid regex")
    })
}

/// A single `NdM` term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceTerm {
    pub count: u32,
    pub sides: u32,
}

/// A parsed dice expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpression {
    /// Dice terms in the order they were written
    pub terms: Vec<DiceTerm>,
    /// Sum of the flat terms
    pub modifier: i32,
    /// Trailing damage-type word, if any (not used in evaluation)
    pub damage_type: Option<String>,
}

/// Result of rolling a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResult {
    /// Individual die results, in term order
    pub rolls: Vec<u32>,
    /// Sum of the flat terms
    pub modifier: i32,
    /// Sum of all dice plus the modifier
    pub total: i32,
}

impl DiceExpression {
    /// Create an expression from a single term and modifier
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        DiceExpression {
            terms: vec![DiceTerm { count, sides }],
            modifier,
            damage_type: None,
        }
    }

    /// Parse dice notation
    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let trimmed = notation.trim();
        let captures = grammar().captures(trimmed).ok_or_else(|| {
            warn!(notation = trimmed, "rejected dice notation");
            DiceError::InvalidNotation(trimmed.to_string())
        })?;

        let body = captures.name("body").map(|m| m.as_str()).unwrap_or_default();
        let damage_type = captures.name("kind").map(|m| m.as_str().to_string());

        let mut terms = Vec::new();
        let mut modifier: i32 = 0;

        for raw in body.split('+') {
            let part = raw.trim();
            match part.split_once('d') {
                Some((count_str, sides_str)) => {
                    let count = parse_positive(part, count_str, "dice count")?;
                    let sides = parse_positive(part, sides_str, "die sides")?;
                    terms.push(DiceTerm { count, sides });
                }
                None => {
                    let flat: i32 = part.parse().map_err(|_| DiceError::InvalidTerm {
                        term: part.to_string(),
                        reason: "modifier is not a number".to_string(),
                    })?;
                    modifier = modifier.saturating_add(flat);
                }
            }
        }

        Ok(DiceExpression {
            terms,
            modifier,
            damage_type,
        })
    }

    /// Total number of dice across all terms
    pub fn dice_count(&self) -> u64 {
        self.terms.iter().map(|t| u64::from(t.count)).sum()
    }

    /// Reject expressions that would roll more than `limit` dice
    pub fn check_limit(&self, limit: u32) -> Result<(), DiceError> {
        let count = self.dice_count();
        if count > u64::from(limit) {
            return Err(DiceError::TooManyDice { count, limit });
        }
        Ok(())
    }

    /// Minimum possible total
    pub fn min(&self) -> i64 {
        self.dice_count() as i64 + i64::from(self.modifier)
    }

    /// Maximum possible total
    pub fn max(&self) -> i64 {
        let dice: u64 = self
            .terms
            .iter()
            .map(|t| u64::from(t.count) * u64::from(t.sides))
            .sum();
        dice as i64 + i64::from(self.modifier)
    }

    /// Expected average total
    pub fn average(&self) -> f64 {
        let dice: f64 = self
            .terms
            .iter()
            .map(|t| f64::from(t.count) * (1.0 + f64::from(t.sides)) / 2.0)
            .sum();
        dice + f64::from(self.modifier)
    }

    /// Roll the expression with the thread RNG
    pub fn roll(&self) -> DiceRollResult {
        self.roll_with(&mut rand::thread_rng())
    }

    /// Roll the expression with a provided roller
    pub fn roll_with(&self, roller: &mut impl Roller) -> DiceRollResult {
        self.roll_terms(roller, 1)
    }

    /// Roll with every term's dice count doubled; the flat modifier is not doubled
    pub fn roll_critical_with(&self, roller: &mut impl Roller) -> DiceRollResult {
        self.roll_terms(roller, 2)
    }

    fn roll_terms(&self, roller: &mut impl Roller, multiplier: u32) -> DiceRollResult {
        let mut rolls = Vec::new();
        for term in &self.terms {
            for _ in 0..term.count.saturating_mul(multiplier) {
                rolls.push(roller.roll_die(term.sides));
            }
        }
        let dice_total = rolls
            .iter()
            .fold(0i32, |acc, r| acc.saturating_add(*r as i32));
        let total = dice_total.saturating_add(self.modifier);
        trace!(expression = %self, ?rolls, total, "rolled dice expression");
        DiceRollResult {
            rolls,
            modifier: self.modifier,
            total,
        }
    }
}

fn parse_positive(term: &str, value: &str, what: &str) -> Result<u32, DiceError> {
    let parsed: u32 = value.trim().parse().map_err(|_| DiceError::InvalidTerm {
        term: term.to_string(),
        reason: format!("{} '{}' is not a number", what, value),
    })?;
    if parsed < 1 {
        return Err(DiceError::InvalidTerm {
            term: term.to_string(),
            reason: format!("{} must be at least 1", what),
        });
    }
    Ok(parsed)
}

impl FromStr for DiceExpression {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiceExpression::parse(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}d{}", term.count, term.sides)?;
        }
        if self.modifier > 0 {
            write!(f, "+{}", self.modifier)?;
        } else if self.modifier < 0 {
            write!(f, "{}", self.modifier)?;
        }
        if let Some(kind) = &self.damage_type {
            write!(f, " {}", kind)?;
        }
        Ok(())
    }
}

/// Parse and roll a dice string
pub fn parse_dice_string(notation: &str) -> Result<DiceRollResult, DiceError> {
    parse_dice_string_with(&mut rand::thread_rng(), notation)
}

/// Parse and roll a dice string with a provided roller
///
/// Expressions with more than [`DEFAULT_MAX_DICE`] dice are rejected before
/// anything is rolled.
pub fn parse_dice_string_with(
    roller: &mut impl Roller,
    notation: &str,
) -> Result<DiceRollResult, DiceError> {
    let expression = DiceExpression::parse(notation)?;
    expression.check_limit(DEFAULT_MAX_DICE)?;
    Ok(expression.roll_with(roller))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::ScriptedRoller;

    #[test]
    fn test_parse_basic() {
        let expr = DiceExpression::parse("2d6").unwrap();
        assert_eq!(expr.terms, vec![DiceTerm { count: 2, sides: 6 }]);
        assert_eq!(expr.modifier, 0);
        assert_eq!(expr.damage_type, None);
    }

    #[test]
    fn test_parse_compound_with_modifier_and_type() {
        let expr = DiceExpression::parse("1d8 + 2d6 + 3 fire").unwrap();
        assert_eq!(
            expr.terms,
            vec![DiceTerm { count: 1, sides: 8 }, DiceTerm { count: 2, sides: 6 }]
        );
        assert_eq!(expr.modifier, 3);
        assert_eq!(expr.damage_type.as_deref(), Some("fire"));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let expr = DiceExpression::parse("  1d20+5  ").unwrap();
        assert_eq!(expr.modifier, 5);
    }

    #[test]
    fn test_zero_count_and_sides_rejected() {
        match DiceExpression::parse("0d6") {
            Err(DiceError::InvalidTerm { term, .. }) => assert_eq!(term, "0d6"),
            other => panic!("Expected InvalidTerm, got {:?}", other),
        }
        match DiceExpression::parse("2d6+1d0") {
            Err(DiceError::InvalidTerm { term, .. }) => assert_eq!(term, "1d0"),
            other => panic!("Expected InvalidTerm, got {:?}", other),
        }
    }

    #[test]
    fn test_grammar_mismatch_rejected() {
        for bad in ["", "abc", "d6", "2d", "2d6-1", "2D6", "2d6+", "+3", "2d6 fire ice"] {
            assert!(
                matches!(DiceExpression::parse(bad), Err(DiceError::InvalidNotation(_))),
                "'{}' should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_overflowing_count_is_invalid_term() {
        let result = DiceExpression::parse("99999999999d6");
        assert!(matches!(result, Err(DiceError::InvalidTerm { .. })));
    }

    #[test]
    fn test_parse_dice_string_scripted() {
        let mut roller = ScriptedRoller::new([4, 2, 6]);
        let result = parse_dice_string_with(&mut roller, "1d4+2d6+3 slashing").unwrap();
        assert_eq!(result.rolls, vec![4, 2, 6]);
        assert_eq!(result.modifier, 3);
        assert_eq!(result.total, 15);
    }

    #[test]
    fn test_parse_dice_string_bounds() {
        for _ in 0..100 {
            let result = parse_dice_string("3d6+2").unwrap();
            assert_eq!(result.rolls.len(), 3);
            assert!(result.total >= 5 && result.total <= 20);
        }
    }

    #[test]
    fn test_critical_doubles_dice_not_modifier() {
        let expr = DiceExpression::parse("2d6+3").unwrap();
        let mut roller = ScriptedRoller::new([1, 1, 1, 1]);
        let result = expr.roll_critical_with(&mut roller);
        assert_eq!(result.rolls.len(), 4);
        assert_eq!(result.total, 7);
    }

    #[test]
    fn test_min_max_average() {
        let expr = DiceExpression::parse("2d6+3").unwrap();
        assert_eq!(expr.min(), 5);
        assert_eq!(expr.max(), 15);
        assert!((expr.average() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_limit() {
        let expr = DiceExpression::parse("60d6+50d4").unwrap();
        assert!(expr.check_limit(200).is_ok());
        assert_eq!(
            expr.check_limit(100),
            Err(DiceError::TooManyDice { count: 110, limit: 100 })
        );
    }

    #[test]
    fn test_parse_dice_string_rejects_huge_counts() {
        let mut roller = ScriptedRoller::default();
        assert_eq!(
            parse_dice_string_with(&mut roller, "4000000000d6"),
            Err(DiceError::TooManyDice {
                count: 4_000_000_000,
                limit: DEFAULT_MAX_DICE
            })
        );
        assert!(parse_dice_string("101d4").is_err());
        assert_eq!(parse_dice_string_with(&mut roller, "100d1").unwrap().total, 100);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiceExpression::new(2, 6, 0).to_string(), "2d6");
        assert_eq!(DiceExpression::new(1, 20, 5).to_string(), "1d20+5");
        let parsed: DiceExpression = "1d8 + 1d6 + 2 radiant".parse().unwrap();
        assert_eq!(parsed.to_string(), "1d8+1d6+2 radiant");
    }
}
