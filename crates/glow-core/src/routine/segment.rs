//! Product bucketing for a time-of-day context.
//!
//! Mandatory: cleanser and moisturizer always, SPF in the morning.
//! Optional: toner and eye cream always, exfoliant in the evening.
//! Candidate actives: serums whose key has an applicable rule, with the
//! retinoid rotation gate applied up front so gated-out products never reach
//! the resolver (and are never reported as excluded).

use crate::catalog::{ActiveKey, Category, EnrichedProduct};
use crate::rules::RuleSet;

use super::{DropStage, TimeOfDay};

/// Bucketed products for one build. Caller-supplied order is preserved
/// within each bucket.
#[derive(Debug, Default)]
pub(crate) struct Segments {
    pub mandatory: Vec<EnrichedProduct>,
    pub optional: Vec<EnrichedProduct>,
    pub candidates: Vec<EnrichedProduct>,
    /// Products that matched no bucket, with the stage that dropped them.
    pub dropped: Vec<(EnrichedProduct, DropStage)>,
}

/// Partition enriched products into mandatory, optional, and candidate
/// actives for the requested context. `weekday` is 0=Mon .. 6=Sun.
pub(crate) fn segment(
    enriched: Vec<EnrichedProduct>,
    context: TimeOfDay,
    weekday: u8,
    rules: &RuleSet,
) -> Segments {
    let mut segments = Segments::default();

    for product in enriched {
        match &product.canonical_category {
            Category::Cleanser | Category::Moisturizer => segments.mandatory.push(product),
            Category::Spf if context == TimeOfDay::Morning => segments.mandatory.push(product),
            Category::Toner | Category::EyeCream => segments.optional.push(product),
            Category::Exfoliant if context == TimeOfDay::Evening => {
                segments.optional.push(product)
            }
            Category::Serums => match candidacy(&product, context, weekday, rules) {
                Ok(()) => segments.candidates.push(product),
                Err(stage) => segments.dropped.push((product, stage)),
            },
            _ => segments.dropped.push((product, DropStage::Bucketing)),
        }
    }

    segments
}

/// Check whether a serum is a candidate active for this build.
fn candidacy(
    product: &EnrichedProduct,
    context: TimeOfDay,
    weekday: u8,
    rules: &RuleSet,
) -> Result<(), DropStage> {
    let key = match product.active_key {
        Some(key) => key,
        None => return Err(DropStage::Candidacy),
    };
    let rule = match rules.rule(key) {
        Some(rule) => rule,
        None => return Err(DropStage::Candidacy),
    };

    if !rule.applies_to(context) {
        return Err(DropStage::Candidacy);
    }

    if key == ActiveKey::Retinoid && !rules.rotation.retinoid_day(weekday) {
        return Err(DropStage::Rotation);
    }

    Ok(())
}
