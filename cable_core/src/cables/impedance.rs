//! # Voltage Drop and Conductor Resistance
//!
//! Per-size data for the voltage-drop and earth-fault loop checks:
//!
//! ```text
//! Vd (V) = mV/A/m × Ib × L / 1000
//! Zs (Ω) = Ze + (R1+R2 mΩ/m) × L / 1000
//! ```
//!
//! Both tables are immutable maps keyed by [`ConductorSize`]. A size
//! missing from a table falls back to the 2.5 mm² entry; the fallback is
//! reported through [`TableValue::fallback`] and logged at `warn`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::sizes::ConductorSize;
use super::types::ConductorMaterial;
use crate::plan::Phases;

/// Size used when a table has no entry for the requested size
pub const FALLBACK_SIZE: ConductorSize = ConductorSize::Mm2_5;

/// Single-phase voltage drop for copper conductors (mV/A/m)
static COPPER_MV_PER_A_M: Lazy<HashMap<ConductorSize, f64>> = Lazy::new(|| {
    HashMap::from([
        (ConductorSize::Mm1_0, 44.0),
        (ConductorSize::Mm1_5, 29.0),
        (ConductorSize::Mm2_5, 18.0),
        (ConductorSize::Mm4, 11.0),
        (ConductorSize::Mm6, 7.3),
        (ConductorSize::Mm10, 4.4),
        (ConductorSize::Mm16, 2.8),
        (ConductorSize::Mm25, 1.75),
        (ConductorSize::Mm35, 1.25),
        (ConductorSize::Mm50, 0.93),
        (ConductorSize::Mm70, 0.64),
        (ConductorSize::Mm95, 0.46),
        (ConductorSize::Mm120, 0.37),
        (ConductorSize::Mm150, 0.30),
        (ConductorSize::Mm185, 0.24),
        (ConductorSize::Mm240, 0.18),
        (ConductorSize::Mm300, 0.145),
        (ConductorSize::Mm400, 0.113),
    ])
});

/// Single-phase voltage drop for aluminium conductors (mV/A/m)
static ALUMINIUM_MV_PER_A_M: Lazy<HashMap<ConductorSize, f64>> = Lazy::new(|| {
    HashMap::from([
        (ConductorSize::Mm16, 4.6),
        (ConductorSize::Mm25, 2.9),
        (ConductorSize::Mm35, 2.1),
        (ConductorSize::Mm50, 1.55),
        (ConductorSize::Mm70, 1.05),
        (ConductorSize::Mm95, 0.77),
        (ConductorSize::Mm120, 0.61),
        (ConductorSize::Mm150, 0.49),
        (ConductorSize::Mm185, 0.39),
        (ConductorSize::Mm240, 0.30),
        (ConductorSize::Mm300, 0.24),
    ])
});

/// Line plus protective conductor resistance at 20°C for copper (mΩ/m).
///
/// Up to 16 mm² these are twin-and-earth pairs with a reduced CPC
/// (2.5/1.5, 4/1.5, 6/2.5, 10/4, 16/6). Larger sizes pair the line
/// conductor with the next-but-one smaller CPC.
static COPPER_R1_R2: Lazy<HashMap<ConductorSize, f64>> = Lazy::new(|| {
    HashMap::from([
        (ConductorSize::Mm1_0, 36.20),
        (ConductorSize::Mm1_5, 30.20),
        (ConductorSize::Mm2_5, 19.51),
        (ConductorSize::Mm4, 16.71),
        (ConductorSize::Mm6, 10.49),
        (ConductorSize::Mm10, 6.44),
        (ConductorSize::Mm16, 4.23),
        (ConductorSize::Mm25, 2.557),
        (ConductorSize::Mm35, 1.674),
        (ConductorSize::Mm50, 1.114),
        (ConductorSize::Mm70, 0.792),
        (ConductorSize::Mm95, 0.580),
        (ConductorSize::Mm120, 0.421),
        (ConductorSize::Mm150, 0.317),
        (ConductorSize::Mm185, 0.252),
        (ConductorSize::Mm240, 0.199),
        (ConductorSize::Mm300, 0.159),
        (ConductorSize::Mm400, 0.122),
    ])
});

/// A table value and whether it came from the fallback entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableValue {
    pub value: f64,
    pub fallback: bool,
}

/// Look a size up in a table, falling back to the 2.5 mm² entry.
///
/// Returns `None` only if the table has neither the size nor the fallback.
pub(crate) fn lookup_or_fallback(
    table: &HashMap<ConductorSize, f64>,
    size: ConductorSize,
    table_name: &str,
) -> Option<TableValue> {
    if let Some(value) = table.get(&size) {
        return Some(TableValue { value: *value, fallback: false });
    }

    let value = *table.get(&FALLBACK_SIZE)?;
    tracing::warn!(
        table = table_name,
        size = %size,
        fallback = %FALLBACK_SIZE,
        "size not tabulated, using fallback entry"
    );
    Some(TableValue { value, fallback: true })
}

/// Voltage drop per amp per metre (mV/A/m) for a conductor size.
///
/// Three-phase circuits use the balanced three-phase figure, √3/2 of the
/// single-phase value.
pub fn mv_per_amp_metre(size: ConductorSize, conductor: ConductorMaterial, phases: Phases) -> TableValue {
    let single = match conductor {
        ConductorMaterial::Copper => lookup_or_fallback(&COPPER_MV_PER_A_M, size, "copper mV/A/m"),
        ConductorMaterial::Aluminium => lookup_or_fallback(&ALUMINIUM_MV_PER_A_M, size, "aluminium mV/A/m")
            .or_else(|| {
                lookup_or_fallback(&COPPER_MV_PER_A_M, size, "copper mV/A/m").map(|v| TableValue {
                    value: v.value * conductor.resistance_ratio(),
                    fallback: true,
                })
            }),
    }
    .unwrap_or(TableValue { value: 18.0, fallback: true });

    match phases {
        Phases::Single => single,
        Phases::Three => TableValue {
            value: single.value * 3.0_f64.sqrt() / 2.0,
            fallback: single.fallback,
        },
    }
}

/// R1+R2 per metre (mΩ/m) for a conductor size
pub fn r1_plus_r2_per_metre(size: ConductorSize, conductor: ConductorMaterial) -> TableValue {
    let copper = lookup_or_fallback(&COPPER_R1_R2, size, "R1+R2")
        .unwrap_or(TableValue { value: 19.51, fallback: true });
    TableValue {
        value: copper.value * conductor.resistance_ratio(),
        fallback: copper.fallback,
    }
}

/// Voltage drop in volts
pub fn voltage_drop_volts(mv_per_a_m: f64, design_current: f64, length_m: f64) -> f64 {
    mv_per_a_m * design_current * length_m / 1000.0
}

/// Earth fault loop impedance Zs (Ω) from Ze and the circuit's R1+R2
pub fn earth_fault_loop_impedance(ze_ohm: f64, r1_r2_mohm_per_m: f64, length_m: f64) -> f64 {
    ze_ohm + r1_r2_mohm_per_m * length_m / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copper_voltage_drop() {
        let v = mv_per_amp_metre(ConductorSize::Mm6, ConductorMaterial::Copper, Phases::Single);
        assert_eq!(v.value, 7.3);
        assert!(!v.fallback);
    }

    #[test]
    fn test_three_phase_voltage_drop() {
        let single = mv_per_amp_metre(ConductorSize::Mm10, ConductorMaterial::Copper, Phases::Single).value;
        let three = mv_per_amp_metre(ConductorSize::Mm10, ConductorMaterial::Copper, Phases::Three).value;
        assert!((three - single * 0.8660254).abs() < 1e-6);
    }

    #[test]
    fn test_aluminium_is_higher_than_copper() {
        for size in [ConductorSize::Mm16, ConductorSize::Mm95, ConductorSize::Mm300] {
            let cu = mv_per_amp_metre(size, ConductorMaterial::Copper, Phases::Single).value;
            let al = mv_per_amp_metre(size, ConductorMaterial::Aluminium, Phases::Single).value;
            assert!(al > cu);
        }
    }

    #[test]
    fn test_r1_r2_values() {
        let r = r1_plus_r2_per_metre(ConductorSize::Mm2_5, ConductorMaterial::Copper);
        assert_eq!(r.value, 19.51);
        let al = r1_plus_r2_per_metre(ConductorSize::Mm16, ConductorMaterial::Aluminium);
        assert!((al.value - 4.23 * 1.64).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_or_fallback_uses_2_5_entry() {
        let sparse = HashMap::from([(ConductorSize::Mm2_5, 18.0), (ConductorSize::Mm6, 7.3)]);

        let hit = lookup_or_fallback(&sparse, ConductorSize::Mm6, "test").unwrap();
        assert_eq!(hit, TableValue { value: 7.3, fallback: false });

        let miss = lookup_or_fallback(&sparse, ConductorSize::Mm95, "test").unwrap();
        assert_eq!(miss, TableValue { value: 18.0, fallback: true });
    }

    #[test]
    fn test_lookup_without_fallback_entry() {
        let sparse = HashMap::from([(ConductorSize::Mm6, 7.3)]);
        assert!(lookup_or_fallback(&sparse, ConductorSize::Mm4, "test").is_none());
    }

    #[test]
    fn test_every_catalogue_size_is_tabulated() {
        for size in ConductorSize::ALL {
            assert!(!mv_per_amp_metre(size, ConductorMaterial::Copper, Phases::Single).fallback);
            assert!(!r1_plus_r2_per_metre(size, ConductorMaterial::Copper).fallback);
        }
    }

    #[test]
    fn test_formulas() {
        // 6 mm² shower: 41.3 A over 18 m
        let vd = voltage_drop_volts(7.3, 41.3, 18.0);
        assert!((vd - 5.42682).abs() < 1e-5);

        let zs = earth_fault_loop_impedance(0.35, 10.49, 18.0);
        assert!((zs - 0.53882).abs() < 1e-9);
    }
}
