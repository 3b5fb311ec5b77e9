//! Integration tests for the routine-building pipeline.
//!
//! These drive the public engine API end-to-end: normalization, bucketing,
//! conflict resolution, and step ordering together.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use glow_core::{
    ActiveKey, Category, DropSink, DropStage, EnrichedProduct, Product, RoutineEngine, TimeOfDay,
};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 3).unwrap()
}

fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
}

fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
}

fn make_product(id: &str, category: &str, active: Option<&str>) -> Product {
    Product {
        id: id.to_string(),
        name: format!("Product {id}"),
        brand: None,
        ingredients: None,
        category: category.to_string(),
        active: active.map(str::to_string),
    }
}

fn step_ids(routine: &glow_core::Routine) -> Vec<&str> {
    routine
        .steps
        .iter()
        .map(|s| s.product.product.id.as_str())
        .collect()
}

#[test]
fn basic_morning_routine_orders_core_steps() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("moisturizer", "Moisturizer", None),
        make_product("vitc", "Serum / Active Ingredients", Some("Vitamin C")),
        make_product("cleanser", "Cleanser", None),
    ];

    let routine = engine.build(&products, TimeOfDay::Morning, monday());

    assert_eq!(step_ids(&routine), ["cleanser", "vitc", "moisturizer"]);
    assert!(routine.excluded.is_empty());
    assert_eq!(routine.summary.active_count, 1);
    assert_eq!(routine.summary.context, TimeOfDay::Morning);
    assert_eq!(routine.summary.date, monday());

    // The selected active carries its note; mandatory steps do not.
    assert!(routine.steps[1].note.is_some());
    assert!(routine.steps[0].note.is_none());
}

#[test]
fn morning_only_actives_never_reach_evening_candidacy() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("vitc", "Serum / Active Ingredients", Some("Vitamin C")),
        make_product("retinoid", "Serum / Active Ingredients", Some("Retinoid")),
    ];

    // Monday is a retinoid day; vitamin C is morning-only so it is dropped
    // before the resolver and is not reported as excluded.
    let routine = engine.build(&products, TimeOfDay::Evening, monday());

    assert_eq!(step_ids(&routine), ["retinoid"]);
    assert!(routine.excluded.is_empty());
    assert_eq!(routine.summary.active_count, 1);
}

#[test]
fn conflict_resolution_reports_skipped_actives_in_priority_order() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("retinoid", "Serum / Active Ingredients", Some("Retinoid")),
        make_product("aha", "Serum / Active Ingredients", Some("Glycolic Acid")),
        make_product("bha", "Serum / Active Ingredients", Some("BHA (Salicylic Acid)")),
    ];

    let routine = engine.build(&products, TimeOfDay::Evening, wednesday());

    assert_eq!(step_ids(&routine), ["aha"]);
    let skipped: Vec<&str> = routine
        .excluded
        .iter()
        .map(|e| e.product.product.id.as_str())
        .collect();
    assert_eq!(skipped, ["bha", "retinoid"]);
    for excluded in &routine.excluded {
        assert_eq!(excluded.reason, "Excluded due to conflict with another active");
    }
}

#[test]
fn first_product_wins_when_two_share_an_active_key() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("first", "Serum / Active Ingredients", Some("Vitamin C")),
        make_product("second", "Serum / Active Ingredients", Some("Vitamin C")),
    ];

    let routine = engine.build(&products, TimeOfDay::Morning, monday());

    assert_eq!(step_ids(&routine), ["first"]);
    // The second product was never evaluated, so it is not excluded either.
    assert!(routine.excluded.is_empty());
}

#[test]
fn empty_inventory_builds_an_empty_routine() {
    let engine = RoutineEngine::new();
    let routine = engine.build(&[], TimeOfDay::Evening, monday());

    assert!(routine.steps.is_empty());
    assert!(routine.excluded.is_empty());
    assert_eq!(routine.summary.active_count, 0);
}

#[test]
fn mandatory_categories_always_appear_with_spf_last_in_the_morning() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("spf", "Sunscreen", None),
        make_product("cleanser", "Cleanser", None),
        make_product("toner", "Toner", None),
        make_product("eye", "Eye cream", None),
        make_product("moisturizer", "Moisturizer", None),
    ];

    let morning = engine.build(&products, TimeOfDay::Morning, monday());
    assert_eq!(
        step_ids(&morning),
        ["cleanser", "toner", "eye", "moisturizer", "spf"]
    );

    // In the evening SPF matches no bucket and silently disappears.
    let evening = engine.build(&products, TimeOfDay::Evening, monday());
    assert_eq!(step_ids(&evening), ["cleanser", "toner", "eye", "moisturizer"]);
}

#[test]
fn exfoliant_appears_in_the_evening_between_toner_and_actives() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("cleanser", "Cleanser", None),
        make_product("exfoliant", "Exfoliant", None),
        make_product("toner", "Toner", None),
        make_product("ha", "Serum / Active Ingredients", Some("Hyaluronic Acid")),
    ];

    let evening = engine.build(&products, TimeOfDay::Evening, tuesday());
    assert_eq!(step_ids(&evening), ["cleanser", "toner", "exfoliant", "ha"]);

    let morning = engine.build(&products, TimeOfDay::Morning, tuesday());
    assert_eq!(step_ids(&morning), ["cleanser", "toner", "ha"]);
}

#[test]
fn retinoid_weekday_gate_controls_candidacy() {
    let engine = RoutineEngine::new();
    let products = vec![make_product(
        "retinoid",
        "Serum / Active Ingredients",
        Some("Retinoid"),
    )];

    let on_day = engine.build(&products, TimeOfDay::Evening, monday());
    assert_eq!(on_day.summary.active_count, 1);

    // Off-rotation the retinoid never reaches the resolver: no step, no
    // exclusion record.
    let off_day = engine.build(&products, TimeOfDay::Evening, tuesday());
    assert!(off_day.steps.is_empty());
    assert!(off_day.excluded.is_empty());
}

#[test]
fn unrecognized_categories_degrade_silently() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("cleanser", "Cleanser", None),
        make_product("mist", "Face Mist", None),
    ];

    let routine = engine.build(&products, TimeOfDay::Morning, monday());
    assert_eq!(step_ids(&routine), ["cleanser"]);
    assert!(routine.excluded.is_empty());
}

#[test]
fn repeated_builds_are_identical() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("cleanser", "Cleanser", None),
        make_product("retinoid", "Serum / Active Ingredients", Some("Retinoid")),
        make_product("aha", "Serum / Active Ingredients", Some("Lactic Acid")),
        make_product("moisturizer", "Moisturizer", None),
    ];

    let first = engine.build(&products, TimeOfDay::Evening, wednesday());
    let second = engine.build(&products, TimeOfDay::Evening, wednesday());
    assert_eq!(first, second);
}

struct RecordingSink {
    drops: Arc<Mutex<Vec<(String, DropStage)>>>,
}

impl DropSink for RecordingSink {
    fn dropped(&self, product: &EnrichedProduct, stage: DropStage) {
        self.drops
            .lock()
            .unwrap()
            .push((product.product.id.clone(), stage));
    }
}

#[test]
fn drop_sink_observes_silent_drops_without_changing_output() {
    let products = vec![
        make_product("mist", "Face Mist", None),
        make_product("retinoid", "Serum / Active Ingredients", Some("Retinoid")),
        make_product("cleanser", "Cleanser", None),
    ];

    let silent = RoutineEngine::new().build(&products, TimeOfDay::Evening, tuesday());

    let drops = Arc::new(Mutex::new(Vec::new()));
    let engine = RoutineEngine::new().with_drop_sink(Box::new(RecordingSink {
        drops: Arc::clone(&drops),
    }));
    let observed = engine.build(&products, TimeOfDay::Evening, tuesday());

    // The sink sees the drops, the result does not change.
    assert_eq!(silent, observed);
    let recorded = drops.lock().unwrap();
    assert_eq!(
        *recorded,
        vec![
            ("mist".to_string(), DropStage::Bucketing),
            ("retinoid".to_string(), DropStage::Rotation),
        ]
    );
}

#[test]
fn normalize_exposes_the_enrichment_without_building() {
    let engine = RoutineEngine::new();
    let products = vec![
        make_product("mist", "Face Mist", None),
        make_product("retinoid", "Serum / Active Ingredients", Some("Retinoid")),
    ];

    let normalized = engine.normalize(&products);
    assert_eq!(
        normalized[0].canonical_category,
        Category::Unknown("face_mist".to_string())
    );
    assert_eq!(normalized[1].active_key, Some(ActiveKey::Retinoid));
}
