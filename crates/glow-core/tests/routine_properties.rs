//! Property tests for the routine engine's invariants.

use chrono::{Duration, NaiveDate};
use glow_core::{Product, RoutineEngine, RuleSet, TimeOfDay};
use proptest::prelude::*;

fn category_label() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Cleanser".to_string()),
        Just("Toner".to_string()),
        Just("Serum / Active Ingredients".to_string()),
        Just("Moisturizer".to_string()),
        Just("Eye cream".to_string()),
        Just("Exfoliant".to_string()),
        Just("Sunscreen".to_string()),
        "[A-Za-z ]{0,12}",
    ]
}

fn active_label() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(prop_oneof![
        Just("Vitamin C".to_string()),
        Just("Hyaluronic Acid".to_string()),
        Just("Niacinamide".to_string()),
        Just("Retinoid".to_string()),
        Just("Glycolic Acid".to_string()),
        Just("Lactic Acid".to_string()),
        Just("Mandelic Acid".to_string()),
        Just("BHA (Salicylic Acid)".to_string()),
        Just("Peptide".to_string()),
        "[A-Za-z ]{0,10}",
    ])
}

fn products() -> impl Strategy<Value = Vec<Product>> {
    proptest::collection::vec((category_label(), active_label()), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (category, active))| Product {
                id: format!("p{i}"),
                name: format!("Product {i}"),
                brand: None,
                ingredients: None,
                category,
                active,
            })
            .collect()
    })
}

fn context() -> impl Strategy<Value = TimeOfDay> {
    prop_oneof![Just(TimeOfDay::Morning), Just(TimeOfDay::Evening)]
}

proptest! {
    #[test]
    fn active_cap_and_summary_hold(products in products(), context in context(), offset in 0i64..14) {
        let engine = RoutineEngine::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap() + Duration::days(offset);

        let routine = engine.build(&products, context, date);

        let selected: Vec<_> = routine
            .steps
            .iter()
            .filter(|s| s.note.is_some())
            .filter_map(|s| s.product.active_key)
            .collect();

        prop_assert!(selected.len() <= engine.rules().rotation.max_actives_per_routine);
        prop_assert_eq!(routine.summary.active_count, selected.len());
    }

    #[test]
    fn no_selected_pair_is_mutually_exclusive(products in products(), context in context(), offset in 0i64..14) {
        let engine = RoutineEngine::new();
        let rules = RuleSet::default();
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap() + Duration::days(offset);

        let routine = engine.build(&products, context, date);

        let selected: Vec<_> = routine
            .steps
            .iter()
            .filter_map(|s| s.product.active_key)
            .collect();

        for &a in &selected {
            for &b in &selected {
                if a != b {
                    let rule = rules.rule(a).unwrap();
                    prop_assert!(!rule.excludes(b), "{a} and {b} were both selected");
                }
            }
        }
    }

    #[test]
    fn builds_are_deterministic(products in products(), context in context(), offset in 0i64..14) {
        let engine = RoutineEngine::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap() + Duration::days(offset);

        let first = engine.build(&products, context, date);
        let second = engine.build(&products, context, date);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn steps_are_unique_and_come_from_the_input(products in products(), context in context(), offset in 0i64..14) {
        let engine = RoutineEngine::new();
        let date = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap() + Duration::days(offset);

        let routine = engine.build(&products, context, date);

        let mut seen = std::collections::HashSet::new();
        for step in &routine.steps {
            prop_assert!(seen.insert(step.product.product.id.clone()), "duplicate step");
            prop_assert!(products.iter().any(|p| p.id == step.product.product.id));
        }

        // An active never appears both as a step and as excluded.
        for excluded in &routine.excluded {
            prop_assert!(!seen.contains(&excluded.product.product.id));
        }
    }
}
