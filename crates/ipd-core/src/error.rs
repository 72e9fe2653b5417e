//! Configuration errors
//!
//! The `Display` text of each variant is the line the simulation log shows
//! when it refuses a configuration.

use thiserror::Error;

use crate::strategy::EVOLVED_STRATEGY_NAME;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid mode value '{0}'. Use 'Tournament' or 'Match'.")]
    InvalidMode(String),

    #[error("Invalid {name} value {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Strategy {slot} '{name}' is invalid. Valid options: {}", .valid.join(", "))]
    UnknownStrategy {
        slot: char,
        name: String,
        valid: Vec<String>,
    },

    #[error("Both strategies cannot be '{}'.", EVOLVED_STRATEGY_NAME)]
    BothEvolved,

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for configuration key '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}
