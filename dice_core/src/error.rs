use thiserror::Error;

/// Error parsing or evaluating dice notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("Invalid dice notation: '{0}'")]
    InvalidNotation(String),
    #[error("Invalid dice term '{term}': {reason}")]
    InvalidTerm { term: String, reason: String },
    #[error("Too many dice: {count} exceeds the limit of {limit}")]
    TooManyDice { count: u64, limit: u32 },
}
