//! Routine rule configuration.
//!
//! Everything the engine consults at build time lives here as data:
//! - Category override table for labels that don't normalize mechanically
//! - Active-ingredient label map
//! - Hand-authored priority order for conflict resolution
//! - Per-active rules (applicable contexts, exclusions, frequency)
//! - Rotation policy (selection cap, retinoid weekdays)
//!
//! A [`RuleSet`] is handed to the engine at construction, so callers and test
//! suites can substitute alternate rule sets without touching engine logic.
//! [`RuleSet::default`] is the built-in table set matching the product form's
//! vocabulary.

mod bundle;
mod compat;
mod error;

pub use bundle::{RulesBundle, RulesMetadata, RULES_VERSION};
pub use compat::{check_compatibility, parse_version, Compatibility};
pub use error::{Result, RulesError};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ActiveKey, Category};
use crate::routine::TimeOfDay;

/// How often an active is meant to be used. Informational: the engine is
/// stateless per call and does not track usage history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "2x_week")]
    TwicePerWeek,
    #[serde(rename = "2-3x_week")]
    TwoToThreePerWeek,
}

/// Placement hint carried by some rules. The sequencer orders steps from its
/// fixed template and never consults this; it is kept as metadata so bundles
/// round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    First,
    Last,
}

/// Per-active rule: when the active applies and what it cannot share a
/// routine with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRule {
    /// Time-of-day contexts this active is eligible for.
    pub contexts: Vec<TimeOfDay>,
    /// Actives that cannot co-occur with this one in a single routine.
    #[serde(default)]
    pub exclude_with: Vec<ActiveKey>,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl ActiveRule {
    /// Whether `key` is in this rule's exclusion set.
    pub fn excludes(&self, key: ActiveKey) -> bool {
        self.exclude_with.contains(&key)
    }

    /// Whether this active applies to `context`.
    pub fn applies_to(&self, context: TimeOfDay) -> bool {
        self.contexts.contains(&context)
    }
}

/// Static limits governing active selection.
///
/// Weekdays are encoded as 0=Mon .. 6=Sun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationPolicy {
    /// Maximum active-ingredient products selected per routine build.
    #[serde(default = "default_max_actives")]
    pub max_actives_per_routine: usize,
    /// Weekdays on which retinoid products are eligible.
    #[serde(default = "default_retinoid_weekdays")]
    pub retinoid_weekdays: Vec<u8>,
    /// Declared weekly exfoliant cap. The engine has no cross-call memory,
    /// so enforcement belongs to the caller's persistence layer.
    #[serde(default = "default_exfoliant_max_per_week")]
    pub exfoliant_max_per_week: u32,
}

impl RotationPolicy {
    /// Whether retinoid rotates in on the given weekday (0=Mon .. 6=Sun).
    pub fn retinoid_day(&self, weekday: u8) -> bool {
        self.retinoid_weekdays.contains(&weekday)
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_actives_per_routine: default_max_actives(),
            retinoid_weekdays: default_retinoid_weekdays(),
            exfoliant_max_per_week: default_exfoliant_max_per_week(),
        }
    }
}

/// Complete rule configuration consulted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Hand-authored priority order, highest priority first.
    #[serde(default = "default_priority")]
    pub priority: Vec<ActiveKey>,
    /// Raw labels that don't map onto a canonical category mechanically.
    #[serde(default = "default_category_overrides")]
    pub category_overrides: HashMap<String, Category>,
    /// Active-ingredient label map, e.g. "Glycolic Acid" -> aha.
    #[serde(default = "default_active_labels")]
    pub active_labels: HashMap<String, ActiveKey>,
    /// Per-active rules keyed by ingredient.
    #[serde(default = "default_active_rules")]
    pub actives: HashMap<ActiveKey, ActiveRule>,
    #[serde(default)]
    pub rotation: RotationPolicy,
}

impl RuleSet {
    /// Look up the rule for an active key.
    pub fn rule(&self, key: ActiveKey) -> Option<&ActiveRule> {
        self.actives.get(&key)
    }

    /// Validate internal consistency. Run once at engine construction so the
    /// build path can stay total.
    pub fn validate(&self) -> Result<()> {
        if self.priority.is_empty() {
            return Err(RulesError::EmptyPriority);
        }

        let mut seen = Vec::with_capacity(self.priority.len());
        for &key in &self.priority {
            if seen.contains(&key) {
                return Err(RulesError::DuplicatePriority(key));
            }
            seen.push(key);

            if !self.actives.contains_key(&key) {
                return Err(RulesError::MissingRule(key));
            }
        }

        for (&key, rule) in &self.actives {
            if rule.contexts.is_empty() {
                return Err(RulesError::NoContexts(key));
            }
            if rule.excludes(key) {
                return Err(RulesError::SelfExclusion(key));
            }
        }

        if self.rotation.max_actives_per_routine == 0 {
            return Err(RulesError::ZeroActiveCap);
        }
        for &day in &self.rotation.retinoid_weekdays {
            if day > 6 {
                return Err(RulesError::InvalidWeekday(day));
            }
        }
        if self.actives.contains_key(&ActiveKey::Retinoid)
            && self.rotation.retinoid_weekdays.is_empty()
        {
            return Err(RulesError::EmptyRetinoidDays);
        }

        Ok(())
    }

    /// Parse and validate a rule set from a TOML rules file.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let rules: RuleSet = toml::from_str(input)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Serialize the rule set to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            category_overrides: default_category_overrides(),
            active_labels: default_active_labels(),
            actives: default_active_rules(),
            rotation: RotationPolicy::default(),
        }
    }
}

// Built-in tables. These mirror the labels offered by the product form, so a
// stock install normalizes everything the app can record.

fn default_category_overrides() -> HashMap<String, Category> {
    HashMap::from([
        (
            "Serum / Active Ingredients".to_string(),
            Category::Serums,
        ),
        ("Sunscreen".to_string(), Category::Spf),
    ])
}

fn default_active_labels() -> HashMap<String, ActiveKey> {
    HashMap::from([
        ("Vitamin C".to_string(), ActiveKey::VitaminC),
        ("Hyaluronic Acid".to_string(), ActiveKey::HyaluronicAcid),
        ("Niacinamide".to_string(), ActiveKey::Niacinamide),
        ("Retinoid".to_string(), ActiveKey::Retinoid),
        ("Glycolic Acid".to_string(), ActiveKey::Aha),
        ("Lactic Acid".to_string(), ActiveKey::Aha),
        ("Mandelic Acid".to_string(), ActiveKey::Aha),
        ("BHA (Salicylic Acid)".to_string(), ActiveKey::Bha),
        ("Peptide".to_string(), ActiveKey::Peptides),
    ])
}

fn default_priority() -> Vec<ActiveKey> {
    vec![
        ActiveKey::Peptides,
        ActiveKey::HyaluronicAcid,
        ActiveKey::VitaminC,
        ActiveKey::Aha,
        ActiveKey::Bha,
        ActiveKey::Niacinamide,
        ActiveKey::AzelaicAcid,
        ActiveKey::Retinoid,
    ]
}

fn default_active_rules() -> HashMap<ActiveKey, ActiveRule> {
    HashMap::from([
        (
            ActiveKey::VitaminC,
            ActiveRule {
                contexts: vec![TimeOfDay::Morning],
                exclude_with: vec![ActiveKey::Retinoid],
                frequency: Frequency::Daily,
                placement: None,
            },
        ),
        (
            ActiveKey::HyaluronicAcid,
            ActiveRule {
                contexts: vec![TimeOfDay::Morning, TimeOfDay::Evening],
                exclude_with: Vec::new(),
                frequency: Frequency::Daily,
                placement: None,
            },
        ),
        (
            ActiveKey::Niacinamide,
            ActiveRule {
                contexts: vec![TimeOfDay::Morning, TimeOfDay::Evening],
                exclude_with: Vec::new(),
                frequency: Frequency::Daily,
                placement: None,
            },
        ),
        (
            ActiveKey::Peptides,
            ActiveRule {
                contexts: vec![TimeOfDay::Morning, TimeOfDay::Evening],
                exclude_with: Vec::new(),
                frequency: Frequency::Daily,
                placement: Some(Placement::First),
            },
        ),
        (
            ActiveKey::Retinoid,
            ActiveRule {
                contexts: vec![TimeOfDay::Evening],
                exclude_with: vec![ActiveKey::VitaminC, ActiveKey::Aha, ActiveKey::Bha],
                frequency: Frequency::TwoToThreePerWeek,
                placement: Some(Placement::Last),
            },
        ),
        (
            ActiveKey::Aha,
            ActiveRule {
                contexts: vec![TimeOfDay::Evening],
                exclude_with: vec![ActiveKey::Retinoid, ActiveKey::Bha],
                frequency: Frequency::TwicePerWeek,
                placement: None,
            },
        ),
        (
            ActiveKey::Bha,
            ActiveRule {
                contexts: vec![TimeOfDay::Evening],
                exclude_with: vec![ActiveKey::Retinoid, ActiveKey::Aha],
                frequency: Frequency::TwicePerWeek,
                placement: None,
            },
        ),
        (
            ActiveKey::AzelaicAcid,
            ActiveRule {
                contexts: vec![TimeOfDay::Morning, TimeOfDay::Evening],
                exclude_with: vec![ActiveKey::VitaminC],
                frequency: Frequency::Daily,
                placement: None,
            },
        ),
    ])
}

fn default_max_actives() -> usize {
    2
}

fn default_retinoid_weekdays() -> Vec<u8> {
    // Mon, Wed, Fri
    vec![0, 2, 4]
}

fn default_exfoliant_max_per_week() -> u32 {
    2
}
