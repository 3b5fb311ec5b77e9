//! Product catalog model.
//!
//! Products come from the caller (the surrounding app's storage layer) with
//! the free-form labels typed or picked on the product form. The engine never
//! mutates them; it derives a canonical category and, for actives, a
//! normalized ingredient key, and carries both alongside the raw record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category labels offered by the product form.
pub const CATEGORY_LABELS: [&str; 7] = [
    "Cleanser",
    "Toner",
    "Serum / Active Ingredients",
    "Moisturizer",
    "Eye cream",
    "Exfoliant",
    "Sunscreen",
];

/// Active-ingredient labels offered by the serum picker.
pub const ACTIVE_LABELS: [&str; 9] = [
    "Vitamin C",
    "Hyaluronic Acid",
    "Niacinamide",
    "Retinoid",
    "Glycolic Acid",
    "Lactic Acid",
    "Mandelic Acid",
    "BHA (Salicylic Acid)",
    "Peptide",
];

/// A product as supplied by the caller.
///
/// `id` is an opaque unique token owned by the caller; the engine only uses
/// it for identity in its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    /// Free-text ingredient list. Not interpreted by the engine.
    #[serde(default)]
    pub ingredients: Option<String>,
    /// Free-form category label, e.g. "Serum / Active Ingredients".
    pub category: String,
    /// Free-form active-ingredient label, present on active products.
    #[serde(default)]
    pub active: Option<String>,
}

/// Canonical product category.
///
/// Labels that normalize outside the known set land in `Unknown` and never
/// match a routine bucket, so they fall out of the built routine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Cleanser,
    Toner,
    Serums,
    EyeCream,
    Moisturizer,
    Spf,
    Exfoliant,
    Unknown(String),
}

impl Category {
    /// The normalized slug for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Cleanser => "cleanser",
            Category::Toner => "toner",
            Category::Serums => "serums",
            Category::EyeCream => "eye_cream",
            Category::Moisturizer => "moisturizer",
            Category::Spf => "spf",
            Category::Exfoliant => "exfoliant",
            Category::Unknown(slug) => slug,
        }
    }

    /// Map a normalized slug back onto a category.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "cleanser" => Category::Cleanser,
            "toner" => Category::Toner,
            "serums" => Category::Serums,
            "eye_cream" => Category::EyeCream,
            "moisturizer" => Category::Moisturizer,
            "spf" => Category::Spf,
            "exfoliant" => Category::Exfoliant,
            other => Category::Unknown(other.to_string()),
        }
    }

    /// Whether this category is part of the known vocabulary.
    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unknown(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slug = String::deserialize(deserializer)?;
        Ok(Category::from_slug(&slug))
    }
}

/// Normalized key for a serum/treatment active ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveKey {
    VitaminC,
    HyaluronicAcid,
    Niacinamide,
    Retinoid,
    Aha,
    Bha,
    Peptides,
    AzelaicAcid,
}

impl ActiveKey {
    /// All keys, in declaration order.
    pub const ALL: [ActiveKey; 8] = [
        ActiveKey::VitaminC,
        ActiveKey::HyaluronicAcid,
        ActiveKey::Niacinamide,
        ActiveKey::Retinoid,
        ActiveKey::Aha,
        ActiveKey::Bha,
        ActiveKey::Peptides,
        ActiveKey::AzelaicAcid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveKey::VitaminC => "vitamin_c",
            ActiveKey::HyaluronicAcid => "hyaluronic_acid",
            ActiveKey::Niacinamide => "niacinamide",
            ActiveKey::Retinoid => "retinoid",
            ActiveKey::Aha => "aha",
            ActiveKey::Bha => "bha",
            ActiveKey::Peptides => "peptides",
            ActiveKey::AzelaicAcid => "azelaic_acid",
        }
    }
}

impl fmt::Display for ActiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product annotated with its derived canonical category and active key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Canonical category derived from the raw label.
    pub canonical_category: Category,
    /// Normalized active-ingredient key, when the label mapped to one.
    #[serde(default)]
    pub active_key: Option<ActiveKey>,
}

impl EnrichedProduct {
    /// Whether this product is an active-ingredient product the resolver
    /// can reason about.
    pub fn is_active(&self) -> bool {
        self.canonical_category == Category::Serums && self.active_key.is_some()
    }
}
