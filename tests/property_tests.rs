//! Property-based tests using proptest

use logpipe::prelude::*;
use proptest::prelude::*;

fn default_engine() -> MaskingEngine {
    MaskingEngine::from_config(&MaskConfig::default()).expect("default mask config compiles")
}

proptest! {
    /// Masking the same input twice never changes the result further.
    #[test]
    fn prop_masking_is_idempotent(input in ".{0,200}") {
        let engine = default_engine();
        let once = engine.mask_text(&input);
        let twice = engine.mask_text(&once);
        prop_assert_eq!(once, twice);
    }

    /// Masking is a pure function of its input.
    #[test]
    fn prop_masking_is_deterministic(input in ".{0,200}") {
        let engine = default_engine();
        prop_assert_eq!(engine.mask_text(&input), engine.mask_text(&input));
    }

    /// Masking a mapping twice yields the same mapping.
    #[test]
    fn prop_mapping_masking_is_idempotent(
        keys in proptest::collection::vec("[a-z_]{1,20}", 0..8),
        values in proptest::collection::vec(".{0,40}", 0..8),
    ) {
        let engine = default_engine();
        let mut fields = FieldMap::new();
        for (key, value) in keys.iter().zip(values.iter()) {
            fields.insert(key.clone(), FieldValue::from(value.as_str()));
        }
        let mut once = fields.clone();
        engine.mask_fields(&mut once);
        let mut twice = once.clone();
        engine.mask_fields(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// Level filtering agrees with numeric comparison.
    #[test]
    fn prop_level_filtering_matches_values(
        level in prop_oneof![
            Just(Level::TRACE),
            Just(Level::DEBUG),
            Just(Level::INFO),
            Just(Level::SUCCESS),
            Just(Level::WARNING),
            Just(Level::ERROR),
            Just(Level::CRITICAL),
        ],
        threshold in prop_oneof![
            Just(Level::TRACE),
            Just(Level::DEBUG),
            Just(Level::INFO),
            Just(Level::SUCCESS),
            Just(Level::WARNING),
            Just(Level::ERROR),
            Just(Level::CRITICAL),
        ],
    ) {
        prop_assert_eq!(
            level.is_enabled(threshold),
            level.value() >= threshold.value()
        );
        prop_assert_eq!(level <= threshold, level.value() <= threshold.value());
    }

    /// Built-in level names round-trip through the registry.
    #[test]
    fn prop_level_names_roundtrip(
        level in prop_oneof![
            Just(Level::TRACE),
            Just(Level::DEBUG),
            Just(Level::INFO),
            Just(Level::SUCCESS),
            Just(Level::WARNING),
            Just(Level::ERROR),
            Just(Level::CRITICAL),
        ],
    ) {
        let parsed: Level = level.name().parse().expect("builtin resolves");
        prop_assert_eq!(parsed, level);
    }

    /// Scope nesting: snapshot always reflects the innermost value, and
    /// popping restores the outer view.
    #[test]
    fn prop_scopes_nest_and_unwind(
        outer_value in any::<i64>(),
        inner_value in any::<i64>(),
        extra in any::<i64>(),
    ) {
        use logpipe::core::{pop_scope, push_scope, snapshot};

        let outer = push_scope(
            [("a".to_string(), FieldValue::Int(outer_value))].into_iter().collect(),
        );
        let inner = push_scope(
            [
                ("a".to_string(), FieldValue::Int(inner_value)),
                ("b".to_string(), FieldValue::Int(extra)),
            ]
            .into_iter()
            .collect(),
        );

        let merged = snapshot();
        prop_assert_eq!(merged.get("a"), Some(&FieldValue::Int(inner_value)));
        prop_assert_eq!(merged.get("b"), Some(&FieldValue::Int(extra)));

        pop_scope(inner).expect("inner pops first");
        let merged = snapshot();
        prop_assert_eq!(merged.get("a"), Some(&FieldValue::Int(outer_value)));
        prop_assert_eq!(merged.get("b"), None);

        pop_scope(outer).expect("outer pops last");
        prop_assert!(snapshot().is_empty());
    }
}
