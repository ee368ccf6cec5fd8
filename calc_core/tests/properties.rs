//! Property-based tests for the calculation engine and history log.

use calc_core::calculations::{door_width, egress_widths, occupant_load, MIN_DOOR_WIDTH_IN};
use calc_core::history::{CalculationHistory, HistoryEntry};
use calc_core::units::{convert, Direction, QuantityKind};
use calc_core::{calculate, CalculationInput, UnitSystem};
use calc_core::code_tables::{CodeVersion, OccupancyClass};
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_area() -> impl Strategy<Value = f64> {
    0.01f64..2_000_000.0
}

fn arb_factor() -> impl Strategy<Value = f64> {
    0.5f64..500.0
}

fn arb_kind() -> impl Strategy<Value = QuantityKind> {
    prop_oneof![
        Just(QuantityKind::Area),
        Just(QuantityKind::Length),
        Just(QuantityKind::Width),
    ]
}

fn arb_version() -> impl Strategy<Value = CodeVersion> {
    proptest::sample::select(CodeVersion::ALL.to_vec())
}

fn arb_occupancy() -> impl Strategy<Value = OccupancyClass> {
    proptest::sample::select(OccupancyClass::ALL.to_vec())
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Occupant load is the ceiling of area over factor.
    #[test]
    fn occupant_load_is_ceiling(area in arb_area(), factor in arb_factor()) {
        let load = occupant_load(area, factor).unwrap();
        prop_assert_eq!(f64::from(load), (area / factor).ceil());
    }

    /// More area never means fewer occupants.
    #[test]
    fn occupant_load_monotonic_in_area(a in arb_area(), b in arb_area(), factor in arb_factor()) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(occupant_load(small, factor).unwrap() <= occupant_load(large, factor).unwrap());
    }

    /// A larger factor (more area per person) never means more occupants.
    #[test]
    fn occupant_load_antitone_in_factor(area in arb_area(), f in arb_factor(), g in arb_factor()) {
        let (small, large) = if f <= g { (f, g) } else { (g, f) };
        prop_assert!(occupant_load(area, large).unwrap() <= occupant_load(area, small).unwrap());
    }

    /// Sprinklers never widen any egress component.
    #[test]
    fn sprinklers_never_widen(load in 0u32..1_000_000) {
        let with = egress_widths(load, true);
        let without = egress_widths(load, false);
        prop_assert!(with.stair_in <= without.stair_in);
        prop_assert!(with.other_in <= without.other_in);
    }

    /// Converting to metric and back stays within 0.01%.
    #[test]
    fn conversion_round_trip(value in 0.001f64..1.0e9, kind in arb_kind()) {
        let back = convert(convert(value, kind, Direction::ToMetric), kind, Direction::ToImperial);
        prop_assert!(((back - value) / value).abs() < 1.0e-4, "{} -> {}", value, back);
    }

    /// Each door is at least the code minimum.
    #[test]
    fn door_width_has_floor(load in 0u32..1_000_000, doors in 1u32..1_000, sprinklered in any::<bool>()) {
        prop_assert!(door_width(load, doors, sprinklered).unwrap() >= MIN_DOOR_WIDTH_IN);
    }

    /// Every table combination calculates, and door figures appear only in
    /// advanced mode.
    #[test]
    fn every_combination_calculates(
        version in arb_version(),
        occupancy in arb_occupancy(),
        area in 1.0f64..500_000.0,
        sprinklered in any::<bool>(),
        metric in any::<bool>(),
        advanced in any::<bool>(),
        doors in 1u32..10,
    ) {
        let input = CalculationInput {
            state: "Ohio".to_string(),
            code_version: version,
            occupancy,
            floor_area: area,
            sprinklered,
            travel_distance: None,
            exit_doors: Some(doors),
            units: if metric { UnitSystem::Metric } else { UnitSystem::Imperial },
            advanced,
        };
        let result = calculate(&input).unwrap();
        prop_assert!(result.occupant_load >= 1);
        prop_assert_eq!(result.door_width_in.is_some(), advanced);
        prop_assert_eq!(result.total_exit_width_in.is_some(), advanced);
    }

    /// The log never holds more than its limit, newest first.
    #[test]
    fn history_never_exceeds_limit(runs in 1usize..120) {
        let input = CalculationInput {
            state: "Texas".to_string(),
            code_version: CodeVersion::Ibc2021,
            occupancy: OccupancyClass::Business,
            floor_area: 1_000.0,
            sprinklered: true,
            travel_distance: None,
            exit_doors: None,
            units: UnitSystem::Imperial,
            advanced: false,
        };
        let result = calculate(&input).unwrap();

        let mut history = CalculationHistory::default();
        for i in 1..=runs {
            history.record(HistoryEntry::new(format!("Run {}", i), 1, &result));
        }
        prop_assert_eq!(history.len(), runs.min(50));
        let newest = format!("Run {}", runs);
        prop_assert_eq!(&history.entries()[0].project_name, &newest);
    }
}
