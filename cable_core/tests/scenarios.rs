//! End-to-end circuit scenarios run through `calculate`.

use cable_core::calculations::{CalculationResult, SelectionReason};
use cable_core::cables::{CableType, InstallationMethod};
use cable_core::environment::{EarthingSystem, EnvironmentConditions, EnvironmentOverrides, EnvironmentalProfile};
use cable_core::outputs::{CostLineKind, MaterialCategory, MaterialItem};
use cable_core::{calculate, calculate_with_settings, DesignSettings, InstallationPlan};

fn has_item(items: &[MaterialItem], text: &str) -> bool {
    items.iter().any(|i| i.description.contains(text))
}

#[test]
fn test_shower_short_run() {
    let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 18.0);
    let result = calculate(&plan);
    let s = result.success().expect("shower should size");

    assert!((s.design_current - 41.3).abs() < 0.01);
    assert_eq!(s.protective_device.to_string(), "50A Type B MCB");
    assert!(matches!(s.cable_type, CableType::PvcTwinEarth | CableType::XlpeTwinEarth));
    assert!(s.recommended_cable_size == 6.0 || s.recommended_cable_size == 10.0);
    assert!(s.compliant);
    assert!(s.voltage_drop_percent <= 5.0);
    assert!(s.zs < 1.5);
    assert!(s.safety_margin >= 0.0);
}

#[test]
fn test_shower_long_run_upsized_for_voltage_drop() {
    let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 60.0);
    match calculate(&plan) {
        CalculationResult::Success(s) => {
            assert!(s.recommended_cable_size >= 10.0);
            assert_eq!(s.selection_reason, SelectionReason::VoltageDrop);
            assert!(s.voltage_drop_percent <= 5.0);
            assert!(s.recommendations.iter().any(|r| r.contains("60m") && r.contains("5%")));
        }
        CalculationResult::Failure(f) => {
            assert!(f.warnings.iter().any(|w| w.contains("60m") && w.contains("5%")));
        }
    }
}

#[test]
fn test_shower_beyond_twin_earth_range() {
    let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 90.0);
    let result = calculate(&plan);

    assert!(!result.is_success());
    assert_eq!(result.recommended_cable_size(), 0.0);
    assert!(!result.is_compliant());
    assert!(result.materials().is_empty());
    assert!(result.warnings().iter().any(|w| w.contains("90m") && w.contains("5%")));
    assert!(result.recommendations().len() >= 3);
}

#[test]
fn test_lighting_uses_three_percent_limit() {
    let plan = InstallationPlan::new("Lighting circuit", 1000.0, 230.0, 20.0);
    let s = calculate(&plan);
    let s = s.success().expect("lighting should size");

    assert_eq!(s.voltage_drop_limit_percent, 3.0);
    assert!(s.voltage_drop_percent <= 3.0);
    assert_eq!(s.protective_device.rating_a, 6);
    assert_eq!(s.recommended_cable_size, 1.0);

    // materials are never priced below 1.5 mm²
    let cable = s.materials.iter().find(|i| i.category == MaterialCategory::Cable).unwrap();
    assert!(cable.description.contains("1.5mm²"));
}

#[test]
fn test_long_lighting_run_hits_three_percent() {
    // 44 mV/A/m × 4.35 A × 40 m = 7.65 V = 3.3% on 1.0 mm²
    let plan = InstallationPlan::new("Garden lighting", 1000.0, 230.0, 40.0);
    let s = calculate(&plan);
    let s = s.success().unwrap();
    assert_eq!(s.recommended_cable_size, 1.5);
    assert_eq!(s.selection_reason, SelectionReason::VoltageDrop);
}

#[test]
fn test_ev_charger_underground() {
    let plan = InstallationPlan::new("EV charger", 7000.0, 230.0, 25.0)
        .with_location("outdoor underground")
        .with_installation_method("buried");
    let s = calculate(&plan);
    let s = s.success().expect("EV charger should size");

    assert_eq!(s.cable_type, CableType::Swa);
    assert_eq!(s.installation_method, InstallationMethod::D2);
    assert_eq!(s.protective_device.rating_a, 40);
    assert_eq!(s.recommended_cable_size, 4.0);
    assert!(s.compliant);

    for expected in ["gland", "Banjo", "lockring", "warning tape", "marker post"] {
        assert!(has_item(&s.materials, expected), "missing {expected}");
    }
    assert!(s.recommendations.iter().any(|r| r.contains("RCD")));
}

#[test]
fn test_ev_charger_underground_with_default_method() {
    let plan = InstallationPlan::new("EV charger", 7000.0, 230.0, 25.0).with_location("underground");
    let s = calculate(&plan);
    let s = s.success().expect("EV charger should size");

    assert_eq!(s.cable_type, CableType::Swa);
    assert_eq!(s.installation_method, InstallationMethod::D2);
    assert_eq!(s.recommended_cable_size, 4.0);
    assert_eq!(s.capacity, 48.0);
    assert!(s.warnings.iter().any(|w| w.contains("'clipped-direct'") && w.contains("D2")));

    assert!(!has_item(&s.materials, "cleat"));
    assert!(!has_item(&s.materials, "clip"));
    assert!(has_item(&s.materials, "warning tape"));
    assert!(has_item(&s.materials, "marker post"));
}

#[test]
fn test_fire_alarm_circuit() {
    let plan = InstallationPlan::new("Fire alarm panel", 500.0, 230.0, 30.0).with_fire_protection("fire-alarm");
    let s = calculate(&plan);
    let s = s.success().expect("fire alarm should size");

    assert_eq!(s.cable_type, CableType::FireRated);
    assert!(s.cable_type_reason.contains("BS 5839-1"));

    let clips = s.materials.iter().find(|i| i.description.contains("P-clip")).unwrap();
    assert!(clips.description.contains("0.3m"));
    // 30 / 0.3 + 2
    assert_eq!(clips.quantity, 102.0);
    assert!(has_item(&s.materials, "Intumescent"));
    assert!(has_item(&s.materials, "DO NOT SWITCH OFF"));

    assert!(s.practical_guidance.iter().any(|g| g.title == "Fire & Emergency Circuits"));
}

#[test]
fn test_hot_grouped_circuit_derated() {
    let plan = InstallationPlan::new("Kitchen sockets", 7000.0, 230.0, 15.0).with_environment(EnvironmentConditions {
        ambient_temp_c: 40.0,
        grouping: 3,
        ..EnvironmentConditions::default()
    });
    let s = calculate(&plan);
    let s = s.success().unwrap();

    assert_eq!(s.cable_type, CableType::XlpeTwinEarth);
    assert!((s.factors.temperature - 0.91).abs() < 1e-9);
    assert!((s.factors.grouping - 0.70).abs() < 1e-9);
    assert!(s.derated_capacity >= f64::from(s.protective_device.rating_a));
    assert!(s.recommendations.iter().any(|r| r.starts_with("Derating applied")));
}

#[test]
fn test_tt_supply_fails_zs() {
    let profile = EnvironmentalProfile::resolve(
        EnvironmentConditions::default(),
        EnvironmentOverrides {
            earthing: Some(EarthingSystem::Tt),
            ..EnvironmentOverrides::default()
        },
    );
    let plan = InstallationPlan::new("Outbuilding supply", 3000.0, 230.0, 20.0).with_environmental_profile(profile);
    let s = calculate(&plan);
    let s = s.success().unwrap();

    assert!(s.zs > 21.0);
    assert!(!s.compliant);
}

#[test]
fn test_three_phase_submain_aluminium() {
    let plan = InstallationPlan::new("Sub-main to workshop", 90000.0, 400.0, 40.0)
        .with_three_phase(Some(0.9))
        .with_installation_method("tray");
    let s = calculate(&plan);
    let s = s.success().unwrap();

    assert_eq!(s.cable_type, CableType::AluminiumXlpe);
    assert!(s.recommended_cable_size >= 16.0);
    assert!(has_item(&s.materials, "bimetallic"));
}

#[test]
fn test_cost_estimate_reconciles() {
    let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 18.0);
    let s = calculate(&plan);
    let s = s.success().unwrap();
    let cost = &s.cost_estimate;

    let raw: f64 = s.materials.iter().map(|i| i.total_cost).sum();
    assert!((raw - cost.materials).abs() <= 2.0);

    let breakdown: f64 = cost.breakdown.iter().map(|l| l.amount).sum();
    assert_eq!(breakdown, cost.total);
    assert_eq!(cost.labour_hours, 2.25);
    assert_eq!(cost.line(CostLineKind::Labour), 101.0);
}

#[test]
fn test_settings_change_limits() {
    let settings = DesignSettings::from_json_str(r#"{ "vd_limit_other_percent": 3.0, "labour_rate_per_hour": 60.0 }"#).unwrap();
    let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 40.0);

    let default = calculate(&plan);
    let strict = calculate_with_settings(&plan, &settings);

    assert!(strict.recommended_cable_size() >= default.recommended_cable_size() || !strict.is_success());
    if let Some(s) = strict.success() {
        assert_eq!(s.voltage_drop_limit_percent, 3.0);
        assert_eq!(s.cost_estimate.labour, 90.0);
    }
}

#[test]
fn test_plan_from_json() {
    let json = r#"{
        "load_type": "ev charger",
        "total_load_w": 7000.0,
        "voltage": 230.0,
        "cable_length_m": 25.0,
        "installation_method": "buried",
        "location": "outdoor underground"
    }"#;
    let plan: InstallationPlan = serde_json::from_str(json).unwrap();
    let result = calculate(&plan);
    assert_eq!(result.cable_type(), Some(CableType::Swa));

    let out = serde_json::to_value(&result).unwrap();
    assert_eq!(out["outcome"], "success");
    assert_eq!(out["cable_type"], "swa");
}

#[test]
fn test_zero_length_is_failure_not_panic() {
    let result = calculate(&InstallationPlan::new("Cooker", 9000.0, 230.0, 0.0));
    let f = result.failure().unwrap();
    assert!(!f.warnings.is_empty());
    assert!(f.cable_type.is_none());
}
