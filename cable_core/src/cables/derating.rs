//! # BS 7671 Correction Factors
//!
//! Correction factors applied to tabulated current-carrying capacity It to
//! obtain the derated capacity Iz:
//!
//! ```text
//! Iz = It × Ca × Cg            (tabulated method)
//! Iz = It(C) × Cm × Ca × Cg    (method not tabulated for the construction)
//! ```
//!
//! ## Factor Summary
//!
//! | Factor | Description              | Source          | Typical Values |
//! |--------|--------------------------|-----------------|----------------|
//! | Ca     | Ambient temperature      | Table 4B1       | 0.41 - 1.26    |
//! | Cg     | Grouping                 | Table 4C1       | 0.38 - 1.0     |
//! | Cm     | Installation method      | Appendix 4      | 0.52 - 1.16    |
//!
//! Lookups round *up* to the next tabulated row: an ambient of 32°C uses
//! the 35°C factor, 7 grouped circuits use the 7-circuit factor, 10 use the
//! 12-circuit factor.

use serde::{Deserialize, Serialize};

use super::methods::InstallationMethod;
use super::types::Insulation;

// ============================================================================
// BS 7671 References
// ============================================================================

/// BS 7671:2018+A2:2022 references for each check and factor.
pub mod bs7671_ref {
    /// Ambient temperature correction Ca
    pub const CA: &str = "BS 7671 Table 4B1";
    /// Grouping correction Cg
    pub const CG: &str = "BS 7671 Table 4C1";
    /// Reference installation methods
    pub const CM: &str = "BS 7671 Table 4A2";
    /// Ib ≤ In ≤ Iz coordination
    pub const COORDINATION: &str = "Reg 433.1.1";
    /// Voltage drop limits
    pub const VOLTAGE_DROP: &str = "Reg 525 / Appendix 4 Table 4Ab";
    /// Earth fault loop impedance / disconnection time
    pub const DISCONNECTION: &str = "Reg 411.4.4 / Table 41.3";
    /// Additional protection by 30 mA RCD
    pub const RCD: &str = "Reg 411.3.3";
    /// Concealed cables in walls (safe zones)
    pub const SAFE_ZONES: &str = "Reg 522.6.202";
    /// Buried cables
    pub const BURIED: &str = "Reg 522.8.10";
    /// Premature collapse of wiring systems in a fire
    pub const FIRE_SUPPORT: &str = "Reg 521.10.202";
    /// Safety services
    pub const SAFETY_SERVICES: &str = "Chapter 56";
    /// Initial verification
    pub const VERIFICATION: &str = "Part 6 (Reg 643)";
}

// ============================================================================
// Ambient temperature (Table 4B1)
// ============================================================================

/// 70°C thermoplastic (PVC)
const TEMP_PVC70: &[(f64, f64)] = &[
    (10.0, 1.22),
    (15.0, 1.17),
    (20.0, 1.12),
    (25.0, 1.06),
    (30.0, 1.00),
    (35.0, 0.94),
    (40.0, 0.87),
    (45.0, 0.79),
    (50.0, 0.71),
    (55.0, 0.61),
    (60.0, 0.50),
];

/// 90°C thermosetting (XLPE, LSOH)
const TEMP_XLPE90: &[(f64, f64)] = &[
    (10.0, 1.15),
    (15.0, 1.12),
    (20.0, 1.08),
    (25.0, 1.04),
    (30.0, 1.00),
    (35.0, 0.96),
    (40.0, 0.91),
    (45.0, 0.87),
    (50.0, 0.82),
    (55.0, 0.76),
    (60.0, 0.71),
    (65.0, 0.65),
    (70.0, 0.58),
    (75.0, 0.50),
    (80.0, 0.41),
];

/// Mineral, 105°C sheath not exposed to touch
const TEMP_MINERAL: &[(f64, f64)] = &[
    (10.0, 1.14),
    (15.0, 1.11),
    (20.0, 1.07),
    (25.0, 1.04),
    (30.0, 1.00),
    (35.0, 0.96),
    (40.0, 0.92),
    (45.0, 0.88),
    (50.0, 0.84),
    (55.0, 0.80),
    (60.0, 0.75),
    (65.0, 0.70),
    (70.0, 0.65),
    (75.0, 0.60),
    (80.0, 0.54),
    (85.0, 0.47),
    (90.0, 0.40),
    (95.0, 0.32),
];

/// Ambient temperature correction factor Ca.
///
/// Rounds up to the next tabulated ambient. Ambients below 10°C use the
/// 10°C factor. Returns 0.0 above the last tabulated ambient for the
/// insulation: the cable cannot be used there at all.
///
/// # Example
///
/// ```rust
/// use cable_core::cables::{temperature_factor, Insulation};
///
/// assert_eq!(temperature_factor(30.0, Insulation::Pvc70), 1.0);
/// assert_eq!(temperature_factor(32.0, Insulation::Pvc70), 0.94);
/// assert_eq!(temperature_factor(65.0, Insulation::Pvc70), 0.0);
/// ```
pub fn temperature_factor(ambient_c: f64, insulation: Insulation) -> f64 {
    if ambient_c.is_nan() {
        return 0.0;
    }
    let table = match insulation {
        Insulation::Pvc70 => TEMP_PVC70,
        Insulation::Xlpe90 => TEMP_XLPE90,
        Insulation::Mineral => TEMP_MINERAL,
    };
    table
        .iter()
        .find(|(ambient, _)| ambient_c <= *ambient)
        .map(|(_, factor)| *factor)
        .unwrap_or(0.0)
}

// ============================================================================
// Grouping (Table 4C1, bunched / enclosed)
// ============================================================================

const GROUPING: &[(u32, f64)] = &[
    (1, 1.00),
    (2, 0.80),
    (3, 0.70),
    (4, 0.65),
    (5, 0.60),
    (6, 0.57),
    (7, 0.54),
    (8, 0.52),
    (9, 0.50),
    (12, 0.45),
    (16, 0.41),
    (20, 0.38),
];

/// Grouping correction factor Cg for circuits bunched together.
///
/// 0 is treated as 1 (installed alone). Counts between tabulated rows use
/// the next larger row; 20 or more circuits use 0.38.
pub fn grouping_factor(circuit_count: u32) -> f64 {
    let count = circuit_count.max(1);
    GROUPING
        .iter()
        .find(|(circuits, _)| count <= *circuits)
        .map(|(_, factor)| *factor)
        .unwrap_or(0.38)
}

// ============================================================================
// Installation method
// ============================================================================

/// Installation-method factor Cm relative to method C (clipped direct).
///
/// Ratios of the single-core 2.5 mm² ratings (and the armoured ratings for
/// the underground methods) to the clipped-direct rating. Only used when a
/// construction has no tabulated rating for the requested method.
pub fn installation_method_factor(method: InstallationMethod) -> f64 {
    match method {
        InstallationMethod::A1 => 0.52,
        InstallationMethod::A2 => 0.62,
        InstallationMethod::B1 => 0.67,
        InstallationMethod::B2 => 0.79,
        InstallationMethod::C => 1.0,
        InstallationMethod::D1 => 0.77,
        InstallationMethod::D2 => 0.84,
        InstallationMethod::E => 1.09,
        InstallationMethod::F => 1.04,
        InstallationMethod::G => 1.16,
    }
}

// ============================================================================
// Combined factors
// ============================================================================

/// Correction factors applied to one selected cable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeratingFactors {
    /// Ambient temperature factor Ca
    pub temperature: f64,
    /// Grouping factor Cg
    pub grouping: f64,
    /// Installation-method factor Cm (1.0 unless the method C fallback applied)
    pub installation: f64,
    /// Ca × Cg × Cm
    pub overall: f64,
}

impl Default for DeratingFactors {
    fn default() -> Self {
        DeratingFactors::new(1.0, 1.0, 1.0)
    }
}

impl DeratingFactors {
    pub fn new(temperature: f64, grouping: f64, installation: f64) -> Self {
        DeratingFactors {
            temperature,
            grouping,
            installation,
            overall: temperature * grouping * installation,
        }
    }

    /// Ca and Cg for an environment, with Cm = 1.0
    pub fn for_environment(ambient_c: f64, circuits: u32, insulation: Insulation) -> Self {
        DeratingFactors::new(temperature_factor(ambient_c, insulation), grouping_factor(circuits), 1.0)
    }

    /// Same Ca and Cg with a method factor applied
    pub fn with_installation(self, installation: f64) -> Self {
        DeratingFactors::new(self.temperature, self.grouping, installation)
    }

    /// Derated capacity Iz for a tabulated capacity
    pub fn apply(&self, tabulated_amps: f64) -> f64 {
        tabulated_amps * self.overall
    }

    /// Summary for reports
    pub fn summary(&self, ambient_c: f64, circuits: u32, insulation: Insulation) -> DeratingSummary {
        DeratingSummary {
            factors: *self,
            ambient_temp_c: ambient_c,
            circuits: circuits.max(1),
            insulation,
        }
    }
}

/// Factors together with the conditions that produced them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeratingSummary {
    pub factors: DeratingFactors,
    pub ambient_temp_c: f64,
    pub circuits: u32,
    pub insulation: Insulation,
}

impl DeratingSummary {
    /// Format as a multi-line string for reports
    pub fn format_report(&self) -> String {
        format!(
            "BS 7671 Correction Factors ({}, {:.0}°C, {} circuit(s))\n\
             ================================================\n\
             Ca (Ambient temperature) = {:.2}    {}\n\
             Cg (Grouping)            = {:.2}    {}\n\
             Cm (Installation method) = {:.2}    {}\n\
             ------------------------------------------------\n\
             Overall                  = {:.3}",
            self.insulation,
            self.ambient_temp_c,
            self.circuits,
            self.factors.temperature,
            bs7671_ref::CA,
            self.factors.grouping,
            bs7671_ref::CG,
            self.factors.installation,
            bs7671_ref::CM,
            self.factors.overall,
        )
    }
}
