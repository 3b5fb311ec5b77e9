//! Rule-set specific errors.

use thiserror::Error;

use crate::catalog::ActiveKey;

/// Errors that can occur when loading or validating rule configuration.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("priority order is empty")]
    EmptyPriority,

    #[error("priority entry '{0}' appears more than once")]
    DuplicatePriority(ActiveKey),

    #[error("priority entry '{0}' has no active rule")]
    MissingRule(ActiveKey),

    #[error("active '{0}' has an empty applicable-context set")]
    NoContexts(ActiveKey),

    #[error("active '{0}' excludes itself")]
    SelfExclusion(ActiveKey),

    #[error("rotation policy allows zero actives per routine")]
    ZeroActiveCap,

    #[error("retinoid weekday '{0}' is out of range (expected 0=Mon..6=Sun)")]
    InvalidWeekday(u8),

    #[error("retinoid rule present but its weekday set is empty")]
    EmptyRetinoidDays,

    #[error("Failed to parse rules TOML: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("Failed to serialize rules TOML: {0}")]
    SerializeToml(#[from] toml::ser::Error),

    #[error("Failed to parse rules bundle JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("incompatible rules bundle: {0}")]
    IncompatibleVersion(String),
}

pub type Result<T, E = RulesError> = std::result::Result<T, E>;
