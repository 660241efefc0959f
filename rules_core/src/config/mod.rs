//! Rules configuration
//!
//! Tunables loaded from TOML. A `RulesConfig` is an ordinary value handed to
//! whatever needs it (`ActionResolver::new(&config)`); nothing is stored
//! process-wide.
//!
//! ```toml
//! [combat]
//! melee_reach_ft = 5
//! unarmed_dice = "1d4"
//!
//! [dice]
//! max_dice = 100
//! ```

use dice_core::{DiceExpression, DEFAULT_MAX_DICE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error loading rules configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: Option<PathBuf>,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Tunable rules values
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub dice: DiceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Distance in feet within which melee auto-crits and prone advantage apply
    #[serde(default = "default_melee_reach_ft")]
    pub melee_reach_ft: u32,
    /// Damage dice for an unarmed strike
    #[serde(default = "default_unarmed_dice")]
    pub unarmed_dice: String,
}

impl Default for CombatConfig {
    fn default() -> Self {
        CombatConfig {
            melee_reach_ft: default_melee_reach_ft(),
            unarmed_dice: default_unarmed_dice(),
        }
    }
}

fn default_melee_reach_ft() -> u32 {
    5
}
fn default_unarmed_dice() -> String {
    "1d4".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceConfig {
    /// Most dice a single expression may roll
    #[serde(default = "default_max_dice")]
    pub max_dice: u32,
}

impl Default for DiceConfig {
    fn default() -> Self {
        DiceConfig {
            max_dice: default_max_dice(),
        }
    }
}

fn default_max_dice() -> u32 {
    DEFAULT_MAX_DICE
}

impl RulesConfig {
    /// Load and validate a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            error,
            path: Some(path.to_path_buf()),
        })?;
        let config: RulesConfig = toml::from_str(&content).map_err(|error| ConfigError::Parse {
            error,
            path: Some(path.to_path_buf()),
        })?;
        config.validate()?;
        debug!(path = %path.display(), "loaded rules config");
        Ok(config)
    }

    /// Parse and validate a TOML string
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig =
            toml::from_str(toml).map_err(|error| ConfigError::Parse { error, path: None })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.combat.melee_reach_ft == 0 {
            return Err(ConfigError::Validation(
                "combat.melee_reach_ft must be at least 1".to_string(),
            ));
        }
        if self.dice.max_dice == 0 {
            return Err(ConfigError::Validation(
                "dice.max_dice must be at least 1".to_string(),
            ));
        }
        let unarmed = self.unarmed_expression()?;
        unarmed
            .check_limit(self.dice.max_dice)
            .map_err(|e| ConfigError::Validation(format!("combat.unarmed_dice: {}", e)))?;
        Ok(())
    }

    /// Parsed unarmed strike dice
    pub fn unarmed_expression(&self) -> Result<DiceExpression, ConfigError> {
        self.combat
            .unarmed_dice
            .parse()
            .map_err(|e| ConfigError::Validation(format!("combat.unarmed_dice: {}", e)))
    }
}
