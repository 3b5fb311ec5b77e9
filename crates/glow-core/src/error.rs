//! Core error types for glow-core.
//!
//! The engine itself is total over well-formed input; errors surface at the
//! boundaries: parsing a time-of-day label, loading products or rule files,
//! and validating rule configuration.

use thiserror::Error;

use crate::rules::RulesError;

/// Core error type for glow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Rule configuration errors
    #[error("Rules error: {0}")]
    Rules(#[from] RulesError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A time-of-day label outside the recognized set. There is no bucket or
    /// step template for anything else, so this is a contract violation
    /// rather than something to silently default.
    #[error("unrecognized time-of-day context '{0}' (expected 'morning' or 'evening')")]
    UnknownContext(String),
}
