//! Routine step ordering.
//!
//! Fixed application-order templates:
//! - Morning: cleanser, toner, actives, eye cream, moisturizer, SPF
//! - Evening: cleanser, toner, exfoliant, actives, eye cream, moisturizer
//!
//! Within each slot, caller-supplied relative order is preserved. This stage
//! trusts bucket membership computed upstream and performs no validation.

use crate::catalog::{Category, EnrichedProduct};

use super::resolve::SelectedActive;
use super::{RoutineStep, TimeOfDay};

/// Assemble the final ordered step list for the context's template.
pub(crate) fn sequence(
    mandatory: &[EnrichedProduct],
    optional: &[EnrichedProduct],
    selected: &[SelectedActive],
    context: TimeOfDay,
) -> Vec<RoutineStep> {
    let mut steps = Vec::new();

    push_category(&mut steps, mandatory, &Category::Cleanser);
    push_category(&mut steps, optional, &Category::Toner);

    if context == TimeOfDay::Evening {
        push_category(&mut steps, optional, &Category::Exfoliant);
    }

    steps.extend(selected.iter().map(|active| RoutineStep {
        product: active.product.clone(),
        note: Some(active.note.clone()),
    }));

    push_category(&mut steps, optional, &Category::EyeCream);
    push_category(&mut steps, mandatory, &Category::Moisturizer);

    if context == TimeOfDay::Morning {
        push_category(&mut steps, mandatory, &Category::Spf);
    }

    steps
}

fn push_category(steps: &mut Vec<RoutineStep>, bucket: &[EnrichedProduct], category: &Category) {
    steps.extend(
        bucket
            .iter()
            .filter(|p| &p.canonical_category == category)
            .map(|p| RoutineStep {
                product: p.clone(),
                note: None,
            }),
    );
}
