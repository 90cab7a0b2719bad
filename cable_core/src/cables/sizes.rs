//! Nominal Conductor Sizes
//!
//! The fixed catalogue of conductor cross-sections (mm²) the engine sizes
//! against. Declaration order is ascending, so `Ord` and `ALL` both walk
//! from smallest to largest.

use serde::{Deserialize, Serialize};

/// Nominal conductor cross-sectional area
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ConductorSize {
    /// 1.0 mm²
    Mm1_0,
    /// 1.5 mm²
    Mm1_5,
    /// 2.5 mm²
    #[default]
    Mm2_5,
    Mm4,
    Mm6,
    Mm10,
    Mm16,
    Mm25,
    Mm35,
    Mm50,
    Mm70,
    Mm95,
    Mm120,
    Mm150,
    Mm185,
    Mm240,
    Mm300,
    Mm400,
}

impl ConductorSize {
    /// Every catalogue size, smallest first
    pub const ALL: [ConductorSize; 18] = [
        ConductorSize::Mm1_0,
        ConductorSize::Mm1_5,
        ConductorSize::Mm2_5,
        ConductorSize::Mm4,
        ConductorSize::Mm6,
        ConductorSize::Mm10,
        ConductorSize::Mm16,
        ConductorSize::Mm25,
        ConductorSize::Mm35,
        ConductorSize::Mm50,
        ConductorSize::Mm70,
        ConductorSize::Mm95,
        ConductorSize::Mm120,
        ConductorSize::Mm150,
        ConductorSize::Mm185,
        ConductorSize::Mm240,
        ConductorSize::Mm300,
        ConductorSize::Mm400,
    ];

    /// Smallest size used for ordering and pricing materials
    pub const MIN_MATERIAL: ConductorSize = ConductorSize::Mm1_5;

    /// Cross-sectional area in mm²
    pub fn mm2(&self) -> f64 {
        match self {
            ConductorSize::Mm1_0 => 1.0,
            ConductorSize::Mm1_5 => 1.5,
            ConductorSize::Mm2_5 => 2.5,
            ConductorSize::Mm4 => 4.0,
            ConductorSize::Mm6 => 6.0,
            ConductorSize::Mm10 => 10.0,
            ConductorSize::Mm16 => 16.0,
            ConductorSize::Mm25 => 25.0,
            ConductorSize::Mm35 => 35.0,
            ConductorSize::Mm50 => 50.0,
            ConductorSize::Mm70 => 70.0,
            ConductorSize::Mm95 => 95.0,
            ConductorSize::Mm120 => 120.0,
            ConductorSize::Mm150 => 150.0,
            ConductorSize::Mm185 => 185.0,
            ConductorSize::Mm240 => 240.0,
            ConductorSize::Mm300 => 300.0,
            ConductorSize::Mm400 => 400.0,
        }
    }

    /// Look up the catalogue entry for an exact area
    pub fn from_mm2(mm2: f64) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| (s.mm2() - mm2).abs() < 1e-9)
    }

    /// Size used for materials: never smaller than 1.5 mm²
    pub fn for_materials(&self) -> Self {
        (*self).max(Self::MIN_MATERIAL)
    }

    /// Display name ("1.0mm²", "2.5mm²", "16mm²")
    pub fn display_name(&self) -> String {
        let mm2 = self.mm2();
        if mm2 < 4.0 {
            format!("{:.1}mm²", mm2)
        } else {
            format!("{:.0}mm²", mm2)
        }
    }
}

impl std::fmt::Display for ConductorSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
