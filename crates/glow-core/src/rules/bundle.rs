//! Rules bundle for import/export functionality.
//!
//! A bundle wraps a complete rule set with metadata and a semver format
//! version so it can be shared between installs and checked for
//! compatibility on import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_compatibility, Compatibility, RuleSet, RulesError};

/// Current rules format version (semver).
/// Changes when the rule-set structure is modified in a way that affects
/// compatibility.
pub const RULES_VERSION: &str = "1.0.0";

/// Metadata describing the origin and intent of a rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesMetadata {
    /// Human-readable name (e.g., "Sensitive Skin, Slow Rotation").
    pub name: String,
    /// Author or source of the rule set.
    #[serde(default)]
    pub author: String,
    /// Additional notes or usage instructions.
    #[serde(default)]
    pub notes: String,
    /// When this bundle was created.
    pub created_at: DateTime<Utc>,
}

impl Default for RulesMetadata {
    fn default() -> Self {
        Self {
            name: "Unnamed Rule Set".to_string(),
            author: String::new(),
            notes: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// A complete rules bundle ready for export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesBundle {
    /// Rules format version (semver).
    pub version: String,
    /// Metadata about this rule set.
    pub metadata: RulesMetadata,
    /// The rules themselves.
    pub rules: RuleSet,
}

impl RulesBundle {
    /// Create a bundle from a rule set, with default metadata.
    pub fn new(name: String, rules: RuleSet) -> Self {
        Self {
            version: RULES_VERSION.to_string(),
            metadata: RulesMetadata {
                name,
                ..Default::default()
            },
            rules,
        }
    }

    /// Create a bundle with custom metadata.
    pub fn with_metadata(metadata: RulesMetadata, rules: RuleSet) -> Self {
        Self {
            version: RULES_VERSION.to_string(),
            metadata,
            rules,
        }
    }

    /// Serialize the bundle to a JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a bundle from a JSON string without any checks.
    ///
    /// # Errors
    /// Returns an error if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Import a bundle: parse it, check version compatibility, and validate
    /// the rule set it carries.
    ///
    /// A `MinorNewer` result is returned alongside the bundle so callers can
    /// warn; an incompatible major version is an error.
    pub fn import(json: &str) -> Result<(Self, Compatibility), RulesError> {
        let bundle = Self::from_json(json)?;

        let compat = check_compatibility(RULES_VERSION, &bundle.version);
        if let Compatibility::Incompatible { .. } = compat {
            return Err(RulesError::IncompatibleVersion(compat.to_string()));
        }

        bundle.rules.validate()?;
        Ok((bundle, compat))
    }
}

impl Default for RulesBundle {
    fn default() -> Self {
        Self {
            version: RULES_VERSION.to_string(),
            metadata: RulesMetadata::default(),
            rules: RuleSet::default(),
        }
    }
}
