//! Property-based tests for the calculation engine using proptest.
//!
//! Covers: monotonicity in run length, idempotence, compliance
//! consistency, safety-margin bound, cost reconciliation and the shape of
//! failure results.

use cable_core::calculations::CalculationResult;
use cable_core::environment::EnvironmentConditions;
use cable_core::{calculate, InstallationPlan};
use proptest::prelude::*;

const LOAD_TYPES: [&str; 8] = [
    "Electric shower",
    "Lighting",
    "Kitchen sockets",
    "Cooker",
    "EV charger",
    "Immersion heater",
    "Fire alarm",
    "General",
];

fn plan(load_type: &str, load_w: f64, length_m: f64, ambient: f64, grouping: u32) -> InstallationPlan {
    InstallationPlan::new(load_type, load_w, 230.0, length_m).with_environment(EnvironmentConditions {
        ambient_temp_c: ambient,
        grouping,
        ..EnvironmentConditions::default()
    })
}

fn any_plan() -> impl Strategy<Value = InstallationPlan> {
    (0usize..LOAD_TYPES.len(), 100.0f64..15000.0, 1.0f64..120.0, 10.0f64..55.0, 1u32..7)
        .prop_map(|(i, load, length, ambient, grouping)| plan(LOAD_TYPES[i], load, length, ambient, grouping))
}

// ── Sizing Properties ────────────────────────────────────────────────

proptest! {
    /// A longer run never needs a smaller cable.
    #[test]
    fn size_monotonic_in_length(
        i in 0usize..LOAD_TYPES.len(),
        load in 100.0f64..15000.0,
        short in 1.0f64..60.0,
        extra in 0.0f64..60.0,
    ) {
        let near = calculate(&plan(LOAD_TYPES[i], load, short, 30.0, 1));
        let far = calculate(&plan(LOAD_TYPES[i], load, short + extra, 30.0, 1));

        if far.is_success() {
            prop_assert!(near.is_success());
            prop_assert!(near.recommended_cable_size() <= far.recommended_cable_size(),
                "{}m → {} mm², {}m → {} mm²",
                short, near.recommended_cable_size(), short + extra, far.recommended_cable_size());
        }
    }

    /// Same plan, same result.
    #[test]
    fn calculation_is_idempotent(p in any_plan()) {
        prop_assert_eq!(calculate(&p), calculate(&p));
    }

    /// A compliant result satisfies every individual check.
    #[test]
    fn compliance_is_consistent(p in any_plan()) {
        if let CalculationResult::Success(s) = calculate(&p) {
            if s.compliant {
                prop_assert!(s.voltage_drop_percent <= 5.0);
                prop_assert!(s.voltage_drop_percent <= s.voltage_drop_limit_percent);
                prop_assert!(s.zs < 1.5);
                prop_assert!(s.design_current <= s.protective_device.rating());
                prop_assert!(s.protective_device.rating() <= s.derated_capacity);
            }
        }
    }

    /// A successful result is never undersized.
    #[test]
    fn safety_margin_non_negative(p in any_plan()) {
        if let CalculationResult::Success(s) = calculate(&p) {
            prop_assert!(s.safety_margin >= 0.0, "margin {}", s.safety_margin);
            prop_assert!(s.derated_capacity >= s.design_current);
        }
    }

    /// Cost breakdown adds up and tracks the materials list.
    #[test]
    fn cost_reconciles_with_materials(p in any_plan()) {
        if let CalculationResult::Success(s) = calculate(&p) {
            let cost = &s.cost_estimate;
            let breakdown: f64 = cost.breakdown.iter().map(|l| l.amount).sum();
            prop_assert_eq!(breakdown, cost.total);
            prop_assert_eq!(cost.materials + cost.labour, cost.total);

            let raw: f64 = s.materials.iter().map(|m| m.total_cost).sum();
            prop_assert!((raw - cost.materials).abs() <= 2.0, "raw {} vs {}", raw, cost.materials);
        }
    }

    /// Failures carry no size, no materials and at least one warning.
    #[test]
    fn failure_shape(p in any_plan()) {
        let result = calculate(&p);
        if !result.is_success() {
            prop_assert_eq!(result.recommended_cable_size(), 0.0);
            prop_assert!(result.materials().is_empty());
            prop_assert!(!result.warnings().is_empty());
            prop_assert!(!result.is_compliant());
        }
    }

    /// Degenerate numbers are reported, never panicked on.
    #[test]
    fn invalid_numbers_fail_cleanly(
        load in prop_oneof![Just(0.0), Just(-5.0), Just(f64::NAN), Just(f64::INFINITY)],
        length in 1.0f64..50.0,
    ) {
        let result = calculate(&InstallationPlan::new("Cooker", load, 230.0, length));
        prop_assert!(!result.is_success());
        prop_assert!(result.design_current().is_finite());
    }
}
