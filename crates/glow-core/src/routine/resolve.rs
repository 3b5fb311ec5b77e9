//! Active-ingredient conflict resolution.
//!
//! Walks the hand-authored priority order and picks at most the rotation
//! cap of mutually compatible actives, recording a reason for everything it
//! skips over a conflict.

use crate::catalog::{ActiveKey, EnrichedProduct};
use crate::rules::RuleSet;

use super::ExcludedActive;

/// Note attached to selected actives.
pub(crate) const INCLUDED_REASON: &str = "Included based on routine compatibility and priority";
/// Reason attached to actives skipped over a conflict.
pub(crate) const CONFLICT_REASON: &str = "Excluded due to conflict with another active";

/// An active chosen for the routine.
#[derive(Debug, Clone)]
pub(crate) struct SelectedActive {
    pub product: EnrichedProduct,
    pub note: String,
}

/// Resolver output: chosen actives plus the ones skipped with reasons.
#[derive(Debug, Default)]
pub(crate) struct Resolution {
    pub selected: Vec<SelectedActive>,
    pub skipped: Vec<ExcludedActive>,
}

/// Select compatible actives from the candidates in priority order.
///
/// One candidate per key: the first in caller order is examined, later
/// duplicates never are. Iteration stops once the cap is reached, so keys
/// past that point are not examined and do not appear in `skipped`.
pub(crate) fn resolve(candidates: &[EnrichedProduct], rules: &RuleSet) -> Resolution {
    let mut resolution = Resolution::default();
    let mut selected_keys: Vec<ActiveKey> = Vec::new();

    for &key in &rules.priority {
        let candidate = match candidates.iter().find(|c| c.active_key == Some(key)) {
            Some(candidate) => candidate,
            None => continue,
        };
        let rule = match rules.rule(key) {
            Some(rule) => rule,
            None => continue,
        };

        if selected_keys.iter().any(|&chosen| rule.excludes(chosen)) {
            tracing::debug!(
                product = %candidate.product.id,
                key = %key,
                "active skipped over conflict"
            );
            resolution.skipped.push(ExcludedActive {
                product: candidate.clone(),
                reason: CONFLICT_REASON.to_string(),
            });
            continue;
        }

        selected_keys.push(key);
        resolution.selected.push(SelectedActive {
            product: candidate.clone(),
            note: INCLUDED_REASON.to_string(),
        });

        if resolution.selected.len() >= rules.rotation.max_actives_per_routine {
            break;
        }
    }

    resolution
}
