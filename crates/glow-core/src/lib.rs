//! # Glow Core Library
//!
//! This library provides the core business logic for the Glow skincare
//! routine tracker. It implements a CLI-first philosophy where all operations
//! are available via a standalone CLI binary, with any GUI application being
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Routine Engine**: a pure, deterministic pipeline that turns a product
//!   inventory, a time-of-day context, and a calendar date into an ordered
//!   routine with per-active inclusion/exclusion reasons
//! - **Catalog**: the caller-owned product model and the canonical
//!   category/active-ingredient vocabulary
//! - **Rules**: swappable rule configuration with versioned import/export
//!
//! The engine performs no I/O and holds no state between calls; persistence,
//! auth, and rendering belong to the surrounding application.
//!
//! ## Key Components
//!
//! - [`RoutineEngine`]: routine builder configured with a [`RuleSet`]
//! - [`RuleSet`]: category overrides, active rules, priority, rotation policy
//! - [`RulesBundle`]: versioned rule-set export/import
//! - [`Product`]: raw caller-supplied product record

pub mod catalog;
pub mod error;
pub mod routine;
pub mod rules;

pub use catalog::{ActiveKey, Category, EnrichedProduct, Product};
pub use error::CoreError;
pub use routine::{
    DropSink, DropStage, ExcludedActive, Routine, RoutineEngine, RoutineStep, RoutineSummary,
    TimeOfDay,
};
pub use rules::{
    check_compatibility, ActiveRule, Compatibility, Frequency, Placement, RotationPolicy,
    RuleSet, RulesBundle, RulesError, RulesMetadata, RULES_VERSION,
};
