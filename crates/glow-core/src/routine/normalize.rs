//! Label normalization.
//!
//! Maps raw category and active-ingredient labels onto the canonical
//! vocabulary. This stage never fails: labels outside the vocabulary become
//! [`Category::Unknown`] and fall out of the routine downstream.

use crate::catalog::{Category, EnrichedProduct, Product};
use crate::rules::RuleSet;

/// Enrich every product with its canonical category and active key.
pub(crate) fn normalize(products: &[Product], rules: &RuleSet) -> Vec<EnrichedProduct> {
    products.iter().map(|p| enrich(p, rules)).collect()
}

fn enrich(product: &Product, rules: &RuleSet) -> EnrichedProduct {
    let canonical_category = match rules.category_overrides.get(&product.category) {
        Some(category) => category.clone(),
        None => Category::from_slug(&slugify(&product.category)),
    };

    let active_key = product
        .active
        .as_deref()
        .and_then(|label| rules.active_labels.get(label).copied());

    EnrichedProduct {
        product: product.clone(),
        canonical_category,
        active_key,
    }
}

/// Lowercase, collapse whitespace runs to underscores, strip slashes.
fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace('/', "")
}
