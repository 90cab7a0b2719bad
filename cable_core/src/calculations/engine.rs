//! # Cable Calculation Engine
//!
//! Runs one [`InstallationPlan`] through the full design sequence:
//!
//! 1. Validate the plan and compute the design current Ib
//! 2. Classify the circuit and choose a cable construction
//! 3. Select the protective device (In ≥ Ib × 1.1)
//! 4. Size the conductor against capacity and voltage drop
//! 5. Check earth-fault loop impedance
//! 6. Generate materials, guidance and a cost estimate
//!
//! The engine never returns `Err` and never panics: invalid plans and
//! circuits no cable can serve both come back as
//! [`CalculationResult::Failure`] with warnings explaining why.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::calculations::engine::calculate;
//! use cable_core::plan::InstallationPlan;
//!
//! let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 18.0);
//! let result = calculate(&plan);
//!
//! assert!(result.is_compliant());
//! assert_eq!(result.recommended_cable_size(), 6.0);
//! ```

use serde::{Deserialize, Serialize};

use super::protection::ProtectiveDevice;
use super::sizing::{diagnose_shortfall, size_cable, SelectionReason, SizingParams};
use crate::cables::{
    earth_fault_loop_impedance, r1_plus_r2_per_metre, select_optimal_cable_type, CableType, DeratingFactors,
    InstallationMethod, SelectionContext,
};
use crate::classification::{CircuitProfile, LoadCategory};
use crate::errors::CalcError;
use crate::outputs::{
    estimate_cost, generate_guidance, generate_materials, CostEstimate, GuidanceContext, GuidanceSection,
    MaterialItem, MaterialsContext,
};
use crate::plan::{InstallationPlan, Phases};
use crate::settings::DesignSettings;

/// A sized, checked circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingSuccess {
    pub cable_type: CableType,
    pub cable_type_reason: String,
    pub load_category: LoadCategory,
    pub installation_method: InstallationMethod,

    /// Conductor cross-section (mm²)
    pub recommended_cable_size: f64,

    /// Tabulated capacity It (A)
    pub capacity: f64,

    /// Derated capacity Iz (A)
    pub derated_capacity: f64,

    /// Design current Ib (A)
    pub design_current: f64,

    pub protective_device: ProtectiveDevice,

    /// Voltage drop (V)
    pub voltage_drop: f64,
    pub voltage_drop_percent: f64,
    pub voltage_drop_limit_percent: f64,

    /// Earth-fault loop impedance at the end of the run (Ω)
    pub zs: f64,

    /// Advisory maximum measured Zs for the device (Ω)
    pub max_zs_for_device: f64,

    pub compliant: bool,
    pub factors: DeratingFactors,

    /// (Iz − Ib) / Ib × 100
    pub safety_margin: f64,

    pub selection_reason: SelectionReason,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub materials: Vec<MaterialItem>,
    pub practical_guidance: Vec<GuidanceSection>,
    pub cost_estimate: CostEstimate,
}

/// A circuit no size in the catalogue can serve, or an invalid plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingFailure {
    /// Design current Ib (A), 0 when it could not be computed
    pub design_current: f64,

    /// Construction that was tried, absent when the plan was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cable_type: Option<CableType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cable_type_reason: Option<String>,

    /// Validation error that rejected the plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CalcError>,

    /// Always at least one entry
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Outcome of [`calculate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum CalculationResult {
    Success(SizingSuccess),
    Failure(SizingFailure),
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    /// Sized circuit meeting every check; always false for failures
    pub fn is_compliant(&self) -> bool {
        match self {
            CalculationResult::Success(s) => s.compliant,
            CalculationResult::Failure(_) => false,
        }
    }

    /// Conductor size in mm², 0 for failures
    pub fn recommended_cable_size(&self) -> f64 {
        match self {
            CalculationResult::Success(s) => s.recommended_cable_size,
            CalculationResult::Failure(_) => 0.0,
        }
    }

    pub fn design_current(&self) -> f64 {
        match self {
            CalculationResult::Success(s) => s.design_current,
            CalculationResult::Failure(f) => f.design_current,
        }
    }

    pub fn cable_type(&self) -> Option<CableType> {
        match self {
            CalculationResult::Success(s) => Some(s.cable_type),
            CalculationResult::Failure(f) => f.cable_type,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            CalculationResult::Success(s) => &s.warnings,
            CalculationResult::Failure(f) => &f.warnings,
        }
    }

    pub fn recommendations(&self) -> &[String] {
        match self {
            CalculationResult::Success(s) => &s.recommendations,
            CalculationResult::Failure(f) => &f.recommendations,
        }
    }

    /// Materials list, empty for failures
    pub fn materials(&self) -> &[MaterialItem] {
        match self {
            CalculationResult::Success(s) => &s.materials,
            CalculationResult::Failure(_) => &[],
        }
    }

    pub fn success(&self) -> Option<&SizingSuccess> {
        match self {
            CalculationResult::Success(s) => Some(s),
            CalculationResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&SizingFailure> {
        match self {
            CalculationResult::Success(_) => None,
            CalculationResult::Failure(f) => Some(f),
        }
    }
}

/// Size a circuit with default settings.
pub fn calculate(plan: &InstallationPlan) -> CalculationResult {
    calculate_with_settings(plan, &DesignSettings::default())
}

/// Size a circuit.
///
/// # Arguments
///
/// * `plan` - The circuit to size
/// * `settings` - Compliance limits, wastage and labour rates
///
/// # Returns
///
/// [`CalculationResult::Success`] with the sized circuit, or
/// [`CalculationResult::Failure`] when the plan is invalid or no size of the
/// selected construction satisfies the constraints.
pub fn calculate_with_settings(plan: &InstallationPlan, settings: &DesignSettings) -> CalculationResult {
    if let Err(error) = plan.validate().and_then(|_| settings.validate()) {
        tracing::warn!(code = error.error_code(), %error, "plan rejected");
        return rejected(plan, error);
    }

    let design_current = plan.design_current();
    let env = plan.environment();
    let profile = CircuitProfile::classify(plan);
    let mut warnings = Vec::new();
    let mut recommendations = Vec::new();

    let method = match plan.installation_method.parse::<InstallationMethod>() {
        Ok(method) => method,
        Err(error) => {
            tracing::warn!(method = %plan.installation_method, %error, "falling back to method C");
            warnings.push(format!(
                "Installation method '{}' not recognised; sized as clipped direct (method C)",
                plan.installation_method
            ));
            InstallationMethod::C
        }
    };
    let method = if profile.is_underground && !method.is_underground() {
        tracing::warn!(method = %plan.installation_method, "underground route, sizing as method D2");
        warnings.push(format!(
            "Route is underground but installation method '{}' is above ground; sized as direct buried (method D2)",
            plan.installation_method
        ));
        InstallationMethod::D2
    } else {
        method
    };

    let selection = select_optimal_cable_type(&SelectionContext::from_profile(
        &profile,
        plan.mechanical_protection,
        plan.phases,
        design_current,
        env.ambient_temp_c,
        env.grouping,
    ));
    let device = ProtectiveDevice::select(design_current, settings.device_margin);
    let vd_limit = settings.vd_limit_percent(profile.is_lighting);

    let params = SizingParams {
        cable_type: selection.cable_type,
        method,
        design_current,
        device_rating_a: device.rating(),
        length_m: plan.cable_length_m,
        voltage: plan.voltage,
        phases: plan.phases,
        vd_limit_percent: vd_limit,
        ambient_temp_c: env.ambient_temp_c,
        grouping: env.grouping,
    };

    let Some(outcome) = size_cable(&params) else {
        let shortfall = diagnose_shortfall(&params);
        warnings.push(shortfall.warning(selection.cable_type, plan.cable_length_m));
        recommendations.extend(failure_recommendations());
        tracing::warn!(
            cable = %selection.cable_type,
            ib = design_current,
            length_m = plan.cable_length_m,
            ?shortfall,
            "no compliant cable size"
        );
        return CalculationResult::Failure(SizingFailure {
            design_current,
            cable_type: Some(selection.cable_type),
            cable_type_reason: Some(selection.reason),
            error: None,
            warnings,
            recommendations,
        });
    };

    let r1_r2 = r1_plus_r2_per_metre(outcome.size, selection.cable_type.conductor()).value;
    let zs = earth_fault_loop_impedance(env.ze_ohm, r1_r2, plan.cable_length_m);
    let max_zs_for_device = device.max_zs_ohm();
    let zs_ok = zs < settings.zs_limit_ohm;
    let compliant = outcome.voltage_drop_percent <= settings.vd_limit_other_percent && outcome.compliant && zs_ok;

    if outcome.method_fallback {
        warnings.push(format!(
            "No tabulated rating for {} installed by method {}; rating derived from method C × {:.2}",
            selection.cable_type,
            method.code(),
            outcome.factors.installation
        ));
    }
    if !device.covers(design_current) {
        warnings.push(format!(
            "Design current {:.1}A exceeds the largest standard device ({}); a dedicated supply design is required",
            design_current, device
        ));
    }
    if outcome.safety_margin < settings.low_margin_percent {
        warnings.push(format!(
            "Low safety margin of {:.1}%: consider the next size up",
            outcome.safety_margin
        ));
    }
    if !zs_ok {
        warnings.push(format!(
            "Earth fault loop impedance {:.2}Ω exceeds the {}Ω limit",
            zs, settings.zs_limit_ohm
        ));
        recommendations.push("Fit RCD protection or increase the CPC size to reduce Zs".to_string());
    } else if zs > max_zs_for_device {
        warnings.push(format!(
            "Zs of {:.2}Ω exceeds the {:.2}Ω maximum for a {}: RCD protection required for disconnection",
            zs, max_zs_for_device, device
        ));
    }

    match outcome.selection_reason {
        SelectionReason::VoltageDrop => recommendations.push(format!(
            "Cable upsized to {} to keep voltage drop within {}% over {}m",
            outcome.size, vd_limit, plan.cable_length_m
        )),
        SelectionReason::Current
            if outcome.safety_margin > settings.high_margin_percent
                && outcome.size > selection.cable_type.min_size() =>
        {
            recommendations.push(format!(
                "Safety margin of {:.0}% is generous: consider a smaller size to reduce cost",
                outcome.safety_margin
            ))
        }
        SelectionReason::Current => {}
    }
    if outcome.factors.overall < 1.0 {
        recommendations.push(format!(
            "Derating applied: Ca {:.2}, Cg {:.2}, Cm {:.2} (overall {:.3})",
            outcome.factors.temperature, outcome.factors.grouping, outcome.factors.installation, outcome.factors.overall
        ));
    }
    if profile.needs_rcd {
        recommendations.push("Provide 30mA RCD protection (mandatory for this circuit)".to_string());
    }
    if env.is_harsh() {
        recommendations.push(format!(
            "Conditions reported as '{}': use IP-rated enclosures and glands suited to the environment",
            env.conditions
        ));
    }
    if plan.phases == Phases::Three {
        recommendations.push("Balance three-phase loads across L1, L2 and L3 at the distribution board".to_string());
    }

    let materials_ctx = MaterialsContext {
        cable_type: selection.cable_type,
        cable_size: outcome.size,
        length_m: plan.cable_length_m,
        device,
        route: profile.route,
        is_underground: profile.is_underground,
        fire_rated: profile.is_life_safety || selection.cable_type == CableType::FireRated,
        wastage_factor: settings.wastage_factor,
    };
    let materials = generate_materials(&materials_ctx);
    let practical_guidance = generate_guidance(&GuidanceContext {
        cable_type: selection.cable_type,
        profile: profile.clone(),
        device,
        clip_spacing_m: materials_ctx.clip_spacing_m(),
        zs_ohm: zs,
        regulations: settings.regulations.clone(),
    });
    let cost_estimate = estimate_cost(&materials, plan.cable_length_m, settings);

    tracing::info!(
        cable = %selection.cable_type,
        size = %outcome.size,
        device = %device,
        vd_percent = outcome.voltage_drop_percent,
        zs,
        compliant,
        "cable sized"
    );

    CalculationResult::Success(SizingSuccess {
        cable_type: selection.cable_type,
        cable_type_reason: selection.reason,
        load_category: profile.category,
        installation_method: method,
        recommended_cable_size: outcome.size.mm2(),
        capacity: outcome.capacity,
        derated_capacity: outcome.derated_capacity,
        design_current,
        protective_device: device,
        voltage_drop: outcome.voltage_drop_v,
        voltage_drop_percent: outcome.voltage_drop_percent,
        voltage_drop_limit_percent: vd_limit,
        zs,
        max_zs_for_device,
        compliant,
        factors: outcome.factors,
        safety_margin: outcome.safety_margin,
        selection_reason: outcome.selection_reason,
        warnings,
        recommendations,
        materials,
        practical_guidance,
        cost_estimate,
    })
}

fn rejected(plan: &InstallationPlan, error: CalcError) -> CalculationResult {
    let design_current = plan.design_current();
    CalculationResult::Failure(SizingFailure {
        design_current: if design_current.is_finite() { design_current } else { 0.0 },
        cable_type: None,
        cable_type_reason: None,
        warnings: vec![error.to_string()],
        recommendations: vec!["Correct the circuit details and recalculate".to_string()],
        error: Some(error),
    })
}

fn failure_recommendations() -> Vec<String> {
    vec![
        "Use a larger cable construction (SWA or single-core in trunking) beyond this cable's size range".to_string(),
        "Shorten the cable run or relocate the distribution board closer to the load".to_string(),
        "Change the installation method to improve heat dissipation".to_string(),
        "Split the load across multiple circuits".to_string(),
    ]
}
