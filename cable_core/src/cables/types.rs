//! Cable Constructions
//!
//! The cable types the engine can select, with the physical properties the
//! sizing, materials and guidance stages need.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sizes::ConductorSize;
use crate::errors::CalcError;

/// Insulation class, which sets the maximum conductor operating temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Insulation {
    /// Thermoplastic PVC, 70°C conductor
    Pvc70,
    /// Thermosetting XLPE / LSOH, 90°C conductor
    Xlpe90,
    /// Mineral insulation, 105°C sheath not exposed to touch
    Mineral,
}

impl Insulation {
    pub fn display_name(&self) -> &'static str {
        match self {
            Insulation::Pvc70 => "PVC 70°C",
            Insulation::Xlpe90 => "XLPE 90°C",
            Insulation::Mineral => "Mineral 105°C",
        }
    }
}

impl std::fmt::Display for Insulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConductorMaterial {
    Copper,
    Aluminium,
}

impl ConductorMaterial {
    /// Resistance relative to a copper conductor of the same area
    pub fn resistance_ratio(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 1.0,
            ConductorMaterial::Aluminium => 1.64,
        }
    }
}

/// Cable construction.
///
/// `FireRated` is its own variant; `PvcSingle` always means a literal
/// single-core PVC cable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CableType {
    /// 3-hour fire-resistant cable (FP200 class) for life-safety circuits
    FireRated,
    /// Single-core PVC in conduit or trunking (6491X)
    PvcSingle,
    /// Single-core XLPE / LSOH in conduit or trunking
    XlpeSingle,
    /// Flat twin and earth (6242Y)
    #[default]
    PvcTwinEarth,
    /// Flat twin and earth with XLPE insulation (6242B)
    XlpeTwinEarth,
    /// Steel-wire armoured, XLPE insulated (6944X)
    Swa,
    /// Mineral-insulated copper-clad
    Micc,
    /// Aluminium conductor, XLPE insulated, armoured
    AluminiumXlpe,
}

impl CableType {
    pub const ALL: [CableType; 8] = [
        CableType::FireRated,
        CableType::PvcSingle,
        CableType::XlpeSingle,
        CableType::PvcTwinEarth,
        CableType::XlpeTwinEarth,
        CableType::Swa,
        CableType::Micc,
        CableType::AluminiumXlpe,
    ];

    /// Stable identifier, identical to the serialized form
    pub fn tag(&self) -> &'static str {
        match self {
            CableType::FireRated => "fire-rated",
            CableType::PvcSingle => "pvc-single",
            CableType::XlpeSingle => "xlpe-single",
            CableType::PvcTwinEarth => "pvc-twin-earth",
            CableType::XlpeTwinEarth => "xlpe-twin-earth",
            CableType::Swa => "swa",
            CableType::Micc => "micc",
            CableType::AluminiumXlpe => "aluminium-xlpe",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CableType::FireRated => "Fire-resistant (FP200)",
            CableType::PvcSingle => "PVC single-core",
            CableType::XlpeSingle => "XLPE/LSOH single-core",
            CableType::PvcTwinEarth => "PVC twin & earth",
            CableType::XlpeTwinEarth => "XLPE twin & earth",
            CableType::Swa => "XLPE/SWA armoured",
            CableType::Micc => "MICC mineral-insulated",
            CableType::AluminiumXlpe => "Aluminium XLPE/SWA",
        }
    }

    /// Trade designation
    pub fn designation(&self) -> &'static str {
        match self {
            CableType::FireRated => "FP200 Gold",
            CableType::PvcSingle => "6491X",
            CableType::XlpeSingle => "6491B",
            CableType::PvcTwinEarth => "6242Y",
            CableType::XlpeTwinEarth => "6242B",
            CableType::Swa => "6944X",
            CableType::Micc => "BS EN 60702-1",
            CableType::AluminiumXlpe => "6944X-Al",
        }
    }

    pub fn insulation(&self) -> Insulation {
        match self {
            CableType::PvcSingle | CableType::PvcTwinEarth => Insulation::Pvc70,
            CableType::Micc => Insulation::Mineral,
            CableType::FireRated
            | CableType::XlpeSingle
            | CableType::XlpeTwinEarth
            | CableType::Swa
            | CableType::AluminiumXlpe => Insulation::Xlpe90,
        }
    }

    pub fn conductor(&self) -> ConductorMaterial {
        match self {
            CableType::AluminiumXlpe => ConductorMaterial::Aluminium,
            _ => ConductorMaterial::Copper,
        }
    }

    /// Minimum internal bend radius as a multiple of overall diameter
    pub fn min_bend_radius_multiple(&self) -> f64 {
        match self {
            CableType::PvcSingle | CableType::PvcTwinEarth | CableType::XlpeTwinEarth => 4.0,
            CableType::XlpeSingle | CableType::Swa | CableType::Micc => 6.0,
            CableType::FireRated | CableType::AluminiumXlpe => 8.0,
        }
    }

    /// Largest size that is realistic to terminate in the field
    pub fn max_practical_size(&self) -> ConductorSize {
        match self {
            CableType::PvcTwinEarth | CableType::XlpeTwinEarth => ConductorSize::Mm10,
            CableType::Micc => ConductorSize::Mm25,
            CableType::FireRated => ConductorSize::Mm240,
            CableType::XlpeSingle | CableType::AluminiumXlpe => ConductorSize::Mm300,
            CableType::PvcSingle | CableType::Swa => ConductorSize::Mm400,
        }
    }

    /// Smallest size manufactured in this construction
    pub fn min_size(&self) -> ConductorSize {
        match self {
            CableType::PvcSingle | CableType::PvcTwinEarth | CableType::XlpeTwinEarth | CableType::Micc => {
                ConductorSize::Mm1_0
            }
            CableType::FireRated | CableType::XlpeSingle | CableType::Swa => ConductorSize::Mm1_5,
            CableType::AluminiumXlpe => ConductorSize::Mm16,
        }
    }

    /// Sizes available in this construction, smallest first
    pub fn available_sizes(&self) -> Vec<ConductorSize> {
        let (min, max) = (self.min_size(), self.max_practical_size());
        ConductorSize::ALL
            .iter()
            .copied()
            .filter(|s| *s >= min && *s <= max)
            .collect()
    }

    /// Suitable for direct burial without further protection
    pub fn direct_burial(&self) -> bool {
        matches!(self, CableType::Swa | CableType::Micc | CableType::AluminiumXlpe)
    }

    /// Steel-wire armoured construction (needs glands and armour earthing)
    pub fn is_armoured(&self) -> bool {
        matches!(self, CableType::Swa | CableType::AluminiumXlpe)
    }

    /// Rated to maintain circuit integrity in a fire
    pub fn is_fire_resistant(&self) -> bool {
        matches!(self, CableType::FireRated | CableType::Micc)
    }

    /// Single-core cable that must be enclosed in conduit or trunking
    pub fn is_single_core(&self) -> bool {
        matches!(self, CableType::PvcSingle | CableType::XlpeSingle)
    }
}

impl std::fmt::Display for CableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CableType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        CableType::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == text)
            .or(match text.as_str() {
                "fp200" | "fire-resistant" => Some(CableType::FireRated),
                "swa-xlpe" | "armoured" => Some(CableType::Swa),
                "lsoh" | "lsoh-cable" => Some(CableType::XlpeSingle),
                "twin-and-earth" | "t&e" => Some(CableType::PvcTwinEarth),
                _ => None,
            })
            .ok_or_else(|| CalcError::unknown_cable_type(s))
    }
}
