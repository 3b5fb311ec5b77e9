//! Routine-building engine.
//!
//! Turns a product inventory, a time-of-day context, and a calendar date into
//! an ordered skincare routine:
//! - Normalizes free-form labels onto the canonical vocabulary
//! - Buckets products into mandatory, optional, and candidate-active sets
//! - Resolves active-ingredient conflicts by priority and rotation policy
//! - Orders the surviving steps from a fixed per-context template
//!
//! The engine is a pure function of its inputs plus the rule set it was
//! constructed with: no clock reads, no storage, no shared mutable state.
//! Callers default the date to "today" themselves before calling.

mod normalize;
mod resolve;
mod segment;
mod sequence;

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog::{EnrichedProduct, Product};
use crate::error::CoreError;
use crate::rules::{RuleSet, RulesError};

/// Time-of-day context selecting which rules and step template apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Evening,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "evening" => Ok(TimeOfDay::Evening),
            other => Err(CoreError::UnknownContext(other.to_string())),
        }
    }
}

/// Pipeline stage at which a product silently fell out of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropStage {
    /// The canonical category matched no bucket for the requested context.
    Bucketing,
    /// A serum without a usable active key or rule, or one whose rule does
    /// not apply to the requested context.
    Candidacy,
    /// A retinoid outside its rotation weekdays.
    Rotation,
}

/// Observer for products the engine drops without reporting.
///
/// Builds stay silent by default; callers that want visibility attach a sink
/// at engine construction. The sink never changes what the engine returns.
pub trait DropSink: Send + Sync {
    fn dropped(&self, product: &EnrichedProduct, stage: DropStage);
}

/// One ordered step of a built routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineStep {
    #[serde(flatten)]
    pub product: EnrichedProduct,
    /// Inclusion note, present on selected actives only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// An active the resolver considered but left out of the routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedActive {
    pub product: EnrichedProduct,
    pub reason: String,
}

/// Summary metadata for one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineSummary {
    pub date: NaiveDate,
    pub context: TimeOfDay,
    /// Number of active-ingredient products in the ordered steps. Never
    /// exceeds the rotation policy's cap.
    pub active_count: usize,
}

/// A fully assembled routine. Step order is the application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    pub steps: Vec<RoutineStep>,
    pub excluded: Vec<ExcludedActive>,
    pub summary: RoutineSummary,
}

/// Routine builder configured with a rule set.
pub struct RoutineEngine {
    rules: RuleSet,
    drop_sink: Option<Box<dyn DropSink>>,
}

impl RoutineEngine {
    /// Create an engine with the built-in rule set.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::default(),
            drop_sink: None,
        }
    }

    /// Create an engine with a custom rule set, validating it first.
    ///
    /// # Errors
    /// Returns an error if the rule set is internally inconsistent.
    pub fn with_rules(rules: RuleSet) -> Result<Self, RulesError> {
        rules.validate()?;
        Ok(Self {
            rules,
            drop_sink: None,
        })
    }

    /// Attach an observer for silently dropped products.
    pub fn with_drop_sink(mut self, sink: Box<dyn DropSink>) -> Self {
        self.drop_sink = Some(sink);
        self
    }

    /// The rule set this engine was constructed with.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Normalize products without building a routine.
    pub fn normalize(&self, products: &[Product]) -> Vec<EnrichedProduct> {
        normalize::normalize(products, &self.rules)
    }

    /// Build a routine for the given products, context, and calendar date.
    ///
    /// Deterministic: identical inputs always produce identical output, and
    /// caller-supplied product order is preserved within each step slot.
    pub fn build(&self, products: &[Product], context: TimeOfDay, date: NaiveDate) -> Routine {
        let enriched = normalize::normalize(products, &self.rules);

        let weekday = date.weekday().num_days_from_monday() as u8;
        let segments = segment::segment(enriched, context, weekday, &self.rules);

        for (product, stage) in &segments.dropped {
            tracing::debug!(
                product = %product.product.id,
                stage = ?stage,
                "product dropped from routine"
            );
            if let Some(sink) = &self.drop_sink {
                sink.dropped(product, *stage);
            }
        }

        let resolution = resolve::resolve(&segments.candidates, &self.rules);
        let steps = sequence::sequence(
            &segments.mandatory,
            &segments.optional,
            &resolution.selected,
            context,
        );

        Routine {
            summary: RoutineSummary {
                date,
                context,
                active_count: resolution.selected.len(),
            },
            steps,
            excluded: resolution.skipped,
        }
    }
}

impl Default for RoutineEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_parses_known_labels() {
        assert_eq!("morning".parse::<TimeOfDay>().unwrap(), TimeOfDay::Morning);
        assert_eq!("Evening".parse::<TimeOfDay>().unwrap(), TimeOfDay::Evening);
    }

    #[test]
    fn time_of_day_rejects_anything_else() {
        let err = "noon".parse::<TimeOfDay>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownContext(label) if label == "noon"));
    }

    #[test]
    fn with_rules_rejects_invalid_configuration() {
        let mut rules = RuleSet::default();
        rules.rotation.max_actives_per_routine = 0;
        assert!(RoutineEngine::with_rules(rules).is_err());
    }
}
