//! # Cable Sizing Search
//!
//! Walks the sizes of one cable construction from smallest to largest and
//! accepts the first that satisfies both constraints:
//!
//! ```text
//! Iz = It × Ca × Cg (× Cm)  ≥  max(Ib, In)
//! Vd% = mV/A/m × Ib × L / 1000 / U × 100  ≤  limit
//! ```
//!
//! The record of which constraint decided the size (`current` or
//! `voltage-drop`) is kept for the recommendations text. When nothing in
//! the catalogue qualifies, [`size_cable`] returns `None` and
//! [`diagnose_shortfall`] explains which limit could not be met.

use serde::{Deserialize, Serialize};

use crate::cables::{
    capacity, mv_per_amp_metre, temperature_factor, voltage_drop_volts, CableType, ConductorSize, DeratingFactors,
    InstallationMethod, Insulation,
};
use crate::plan::Phases;

/// Which constraint fixed the selected size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionReason {
    /// Smallest size with enough current-carrying capacity
    Current,
    /// Upsized beyond the current requirement to meet the voltage-drop limit
    VoltageDrop,
}

impl SelectionReason {
    pub fn display_name(&self) -> &'static str {
        match self {
            SelectionReason::Current => "current-carrying capacity",
            SelectionReason::VoltageDrop => "voltage drop",
        }
    }
}

impl std::fmt::Display for SelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Inputs to the sizing search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingParams {
    pub cable_type: CableType,
    pub method: InstallationMethod,

    /// Design current Ib (A)
    pub design_current: f64,

    /// Protective device rating In (A)
    pub device_rating_a: f64,

    pub length_m: f64,

    /// Nominal voltage the drop percentage is measured against (V)
    pub voltage: f64,

    pub phases: Phases,

    /// Maximum voltage drop (%)
    pub vd_limit_percent: f64,

    pub ambient_temp_c: f64,
    pub grouping: u32,
}

impl SizingParams {
    /// Current Iz must reach: the larger of Ib and In
    pub fn required_current(&self) -> f64 {
        self.design_current.max(self.device_rating_a)
    }
}

/// Selected size with its electrical checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingOutcome {
    pub size: ConductorSize,

    /// Tabulated capacity It (A), scaled by Cm when the method fallback applied
    pub capacity: f64,

    /// Derated capacity Iz (A)
    pub derated_capacity: f64,

    /// Ib ≤ In ≤ Iz and voltage drop within limit
    pub compliant: bool,

    pub factors: DeratingFactors,

    /// (Iz − Ib) / Ib × 100
    pub safety_margin: f64,

    pub voltage_drop_v: f64,
    pub voltage_drop_percent: f64,
    pub selection_reason: SelectionReason,

    /// Rating came from method C × Cm because the method is not tabulated
    pub method_fallback: bool,
}

/// One size evaluated against the constraints
#[derive(Debug, Clone, Copy)]
struct Candidate {
    size: ConductorSize,
    capacity: f64,
    derated_capacity: f64,
    factors: DeratingFactors,
    voltage_drop_v: f64,
    voltage_drop_percent: f64,
    method_fallback: bool,
}

fn evaluate(params: &SizingParams, size: ConductorSize) -> Option<Candidate> {
    let rating = capacity(params.cable_type, size, params.method)?;
    let factors = DeratingFactors::for_environment(
        params.ambient_temp_c,
        params.grouping,
        params.cable_type.insulation(),
    )
    .with_installation(rating.method_factor);

    // the method factor is already folded into `rating.amps`
    let derated_capacity = rating.amps * factors.temperature * factors.grouping;

    let mv = mv_per_amp_metre(size, params.cable_type.conductor(), params.phases).value;
    let voltage_drop_v = voltage_drop_volts(mv, params.design_current, params.length_m);
    let voltage_drop_percent = voltage_drop_v / params.voltage * 100.0;

    Some(Candidate {
        size,
        capacity: rating.amps,
        derated_capacity,
        factors,
        voltage_drop_v,
        voltage_drop_percent,
        method_fallback: rating.fallback,
    })
}

fn candidates(params: &SizingParams) -> Vec<Candidate> {
    params
        .cable_type
        .available_sizes()
        .into_iter()
        .filter_map(|size| evaluate(params, size))
        .collect()
}

/// Find the smallest size meeting the current and voltage-drop constraints.
///
/// Returns `None` when no size of the construction qualifies. Never panics,
/// including for zero or non-finite inputs (those simply fail every check).
///
/// # Example
///
/// ```rust
/// use cable_core::calculations::sizing::{size_cable, SelectionReason, SizingParams};
/// use cable_core::cables::{CableType, ConductorSize, InstallationMethod};
/// use cable_core::plan::Phases;
///
/// let params = SizingParams {
///     cable_type: CableType::PvcTwinEarth,
///     method: InstallationMethod::C,
///     design_current: 41.3,
///     device_rating_a: 50.0,
///     length_m: 18.0,
///     voltage: 230.0,
///     phases: Phases::Single,
///     vd_limit_percent: 5.0,
///     ambient_temp_c: 30.0,
///     grouping: 1,
/// };
/// let outcome = size_cable(&params).unwrap();
/// assert_eq!(outcome.size, ConductorSize::Mm6);
/// assert_eq!(outcome.selection_reason, SelectionReason::Current);
/// ```
pub fn size_cable(params: &SizingParams) -> Option<SizingOutcome> {
    let required = params.required_current();
    let mut first_current_ok: Option<ConductorSize> = None;

    for candidate in candidates(params) {
        let current_ok = candidate.derated_capacity >= required;
        let vd_ok = candidate.voltage_drop_percent <= params.vd_limit_percent;

        tracing::debug!(
            cable = %params.cable_type,
            size = %candidate.size,
            iz = candidate.derated_capacity,
            required,
            vd_percent = candidate.voltage_drop_percent,
            current_ok,
            vd_ok,
            "sizing candidate"
        );

        if current_ok && first_current_ok.is_none() {
            first_current_ok = Some(candidate.size);
        }
        if !(current_ok && vd_ok) {
            continue;
        }

        let selection_reason = if first_current_ok == Some(candidate.size) {
            SelectionReason::Current
        } else {
            SelectionReason::VoltageDrop
        };
        let ib = params.design_current;
        let compliant = ib <= params.device_rating_a
            && params.device_rating_a <= candidate.derated_capacity
            && vd_ok;

        return Some(SizingOutcome {
            size: candidate.size,
            capacity: candidate.capacity,
            derated_capacity: candidate.derated_capacity,
            compliant,
            factors: candidate.factors,
            safety_margin: (candidate.derated_capacity - ib) / ib * 100.0,
            voltage_drop_v: candidate.voltage_drop_v,
            voltage_drop_percent: candidate.voltage_drop_percent,
            selection_reason,
            method_fallback: candidate.method_fallback,
        });
    }

    None
}

/// Why no size qualified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "limit", rename_all = "kebab-case")]
pub enum SizingShortfall {
    /// Ambient is beyond what the insulation can be corrected for
    Temperature { ambient_temp_c: f64, insulation: Insulation },

    /// Even the largest size cannot carry the current
    CurrentCapacity {
        largest: ConductorSize,
        derated_capacity: f64,
        required_current: f64,
    },

    /// Sizes carry the current but all exceed the voltage-drop limit
    VoltageDrop { best_percent: f64, limit_percent: f64 },
}

impl SizingShortfall {
    /// Warning naming the run length and the limit that could not be met
    pub fn warning(&self, cable_type: CableType, length_m: f64) -> String {
        match self {
            SizingShortfall::Temperature { ambient_temp_c, insulation } => format!(
                "No {} cable can be used at {}°C ambient: beyond the {} insulation limit for a {}m run",
                cable_type.display_name(),
                ambient_temp_c,
                insulation,
                length_m
            ),
            SizingShortfall::CurrentCapacity {
                largest,
                derated_capacity,
                required_current,
            } => format!(
                "No compliant cable size found: {:.1}A exceeds the current capacity of the largest {} ({}, {:.1}A derated) over {}m",
                required_current,
                cable_type.display_name(),
                largest,
                derated_capacity,
                length_m
            ),
            SizingShortfall::VoltageDrop {
                best_percent,
                limit_percent,
            } => format!(
                "No compliant cable size found: voltage drop over {}m exceeds the {}% limit for every {} size (best {:.2}%)",
                length_m,
                limit_percent,
                cable_type.display_name(),
                best_percent
            ),
        }
    }
}

/// Explain why [`size_cable`] found nothing.
pub fn diagnose_shortfall(params: &SizingParams) -> SizingShortfall {
    let insulation = params.cable_type.insulation();
    if temperature_factor(params.ambient_temp_c, insulation) <= 0.0 {
        return SizingShortfall::Temperature {
            ambient_temp_c: params.ambient_temp_c,
            insulation,
        };
    }

    let all = candidates(params);
    let required = params.required_current();
    let carrying: Vec<&Candidate> = all.iter().filter(|c| c.derated_capacity >= required).collect();

    match carrying.last() {
        Some(best) => SizingShortfall::VoltageDrop {
            best_percent: best.voltage_drop_percent,
            limit_percent: params.vd_limit_percent,
        },
        None => {
            let (largest, derated_capacity) = all
                .last()
                .map(|c| (c.size, c.derated_capacity))
                .unwrap_or((params.cable_type.max_practical_size(), 0.0));
            SizingShortfall::CurrentCapacity {
                largest,
                derated_capacity,
                required_current: required,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shower(length_m: f64) -> SizingParams {
        SizingParams {
            cable_type: CableType::PvcTwinEarth,
            method: InstallationMethod::C,
            design_current: 9500.0 / 230.0,
            device_rating_a: 50.0,
            length_m,
            voltage: 230.0,
            phases: Phases::Single,
            vd_limit_percent: 5.0,
            ambient_temp_c: 30.0,
            grouping: 1,
        }
    }

    #[test]
    fn test_shower_short_run_current_governs() {
        let outcome = size_cable(&shower(18.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Mm6);
        assert_eq!(outcome.capacity, 62.0);
        assert_eq!(outcome.selection_reason, SelectionReason::Current);
        assert!(outcome.compliant);
        assert!((outcome.voltage_drop_percent - 2.3597).abs() < 0.001);
    }

    #[test]
    fn test_shower_long_run_voltage_drop_governs() {
        let outcome = size_cable(&shower(60.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Mm10);
        assert_eq!(outcome.selection_reason, SelectionReason::VoltageDrop);
        assert!(outcome.voltage_drop_percent <= 5.0);
    }

    #[test]
    fn test_twin_earth_runs_out_of_sizes() {
        let params = shower(90.0);
        assert!(size_cable(&params).is_none());
        match diagnose_shortfall(&params) {
            SizingShortfall::VoltageDrop { best_percent, limit_percent } => {
                assert!(best_percent > 5.0);
                assert_eq!(limit_percent, 5.0);
            }
            other => panic!("unexpected shortfall {other:?}"),
        }
        let warning = diagnose_shortfall(&params).warning(CableType::PvcTwinEarth, 90.0);
        assert!(warning.contains("90m"));
        assert!(warning.contains("5%"));
    }

    #[test]
    fn test_current_shortfall() {
        let params = SizingParams {
            design_current: 120.0,
            device_rating_a: 100.0,
            ..shower(5.0)
        };
        assert!(size_cable(&params).is_none());
        match diagnose_shortfall(&params) {
            SizingShortfall::CurrentCapacity { largest, required_current, .. } => {
                assert_eq!(largest, ConductorSize::Mm10);
                assert_eq!(required_current, 120.0);
            }
            other => panic!("unexpected shortfall {other:?}"),
        }
    }

    #[test]
    fn test_temperature_shortfall() {
        let params = SizingParams {
            ambient_temp_c: 65.0,
            ..shower(10.0)
        };
        assert!(size_cable(&params).is_none());
        assert!(matches!(diagnose_shortfall(&params), SizingShortfall::Temperature { .. }));
    }

    #[test]
    fn test_derating_increases_size() {
        let hot_grouped = SizingParams {
            ambient_temp_c: 40.0,
            grouping: 3,
            ..shower(10.0)
        };
        let outcome = size_cable(&hot_grouped).unwrap();
        // 62 × 0.87 × 0.70 = 37.8 A is not enough for a 50 A device
        assert_eq!(outcome.size, ConductorSize::Mm10);
        assert!((outcome.factors.overall - 0.609).abs() < 1e-9);
    }

    #[test]
    fn test_method_fallback_reported() {
        let params = SizingParams {
            cable_type: CableType::Swa,
            method: InstallationMethod::B1,
            ..shower(10.0)
        };
        let outcome = size_cable(&params).unwrap();
        assert!(outcome.method_fallback);
        assert!(outcome.factors.installation < 1.0);
        assert!(outcome.derated_capacity >= 50.0);
    }

    #[test]
    fn test_device_coordination_drives_size() {
        // 4 mm² carries Ib = 41.3 A (49 A) but not In = 50 A
        let outcome = size_cable(&shower(5.0)).unwrap();
        assert_eq!(outcome.size, ConductorSize::Mm6);
        assert!(outcome.derated_capacity >= 50.0);
    }

    #[test]
    fn test_invalid_inputs_do_not_panic() {
        let zero_voltage = SizingParams { voltage: 0.0, ..shower(10.0) };
        assert!(size_cable(&zero_voltage).is_none());

        let nan_current = SizingParams { design_current: f64::NAN, ..shower(10.0) };
        assert!(size_cable(&nan_current).is_none());
    }

    #[test]
    fn test_safety_margin_formula() {
        let outcome = size_cable(&shower(18.0)).unwrap();
        let ib = 9500.0 / 230.0;
        let expected = (62.0 - ib) / ib * 100.0;
        assert!((outcome.safety_margin - expected).abs() < 1e-9);
    }
}
