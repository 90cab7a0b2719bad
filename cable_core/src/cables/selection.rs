//! # Cable Type Selection
//!
//! Priority heuristic choosing a cable construction for a circuit. Every
//! selection carries a human-readable reason so a reviewing electrician can
//! see why the construction was chosen.
//!
//! Rules, first match wins:
//!
//! 1. Life-safety circuits (fire alarm, emergency lighting, escape routes) → fire-rated
//! 2. Ambient above 70°C → MICC
//! 3. Underground, or mechanical protection required → SWA
//! 4. Three-phase sub-main above 100 A → aluminium XLPE/SWA
//! 5. Conduit or trunking → single-core (XLPE when hot or grouped)
//! 6. Design current beyond twin-and-earth range → SWA
//! 7. Otherwise twin and earth (XLPE when hot, grouped or above 32 A)

use serde::{Deserialize, Serialize};

use super::types::CableType;
use crate::classification::{CircuitProfile, LoadCategory, RouteKind};
use crate::plan::Phases;

/// Ambient above which only mineral-insulated cable is considered (°C)
pub const MICC_AMBIENT_C: f64 = 70.0;

/// Reference ambient for the capacity tables (°C)
pub const REFERENCE_AMBIENT_C: f64 = 30.0;

/// Sub-main current above which aluminium conductors pay off (A)
pub const ALUMINIUM_SUBMAIN_A: f64 = 100.0;

/// Largest design current a twin-and-earth circuit is offered for (A)
pub const TWIN_EARTH_MAX_A: f64 = 63.0;

/// Current above which XLPE twin and earth is preferred (A)
pub const XLPE_PREFERRED_A: f64 = 32.0;

/// Everything the heuristic looks at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionContext {
    pub category: LoadCategory,
    pub route: RouteKind,
    pub is_life_safety: bool,
    pub is_outdoor: bool,
    pub is_underground: bool,
    pub mechanical_protection: bool,
    pub phases: Phases,
    pub design_current: f64,
    pub ambient_temp_c: f64,
    pub grouping: u32,
}

impl SelectionContext {
    /// Build a context from a classified circuit and its electrical values
    pub fn from_profile(
        profile: &CircuitProfile,
        mechanical_protection: bool,
        phases: Phases,
        design_current: f64,
        ambient_temp_c: f64,
        grouping: u32,
    ) -> Self {
        SelectionContext {
            category: profile.category,
            route: profile.route,
            is_life_safety: profile.is_life_safety,
            is_outdoor: profile.is_outdoor,
            is_underground: profile.is_underground,
            mechanical_protection,
            phases,
            design_current,
            ambient_temp_c,
            grouping,
        }
    }

    fn hot_or_grouped(&self) -> bool {
        self.ambient_temp_c > REFERENCE_AMBIENT_C || self.grouping > 2
    }
}

/// Chosen construction and why
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSelection {
    pub cable_type: CableType,
    pub reason: String,
}

impl CableSelection {
    fn new(cable_type: CableType, reason: impl Into<String>) -> Self {
        CableSelection {
            cable_type,
            reason: reason.into(),
        }
    }
}

/// Choose a cable construction for a circuit.
///
/// # Example
///
/// ```rust
/// use cable_core::cables::{select_optimal_cable_type, CableType, SelectionContext};
/// use cable_core::classification::{LoadCategory, RouteKind};
/// use cable_core::plan::Phases;
///
/// let context = SelectionContext {
///     category: LoadCategory::EvCharger,
///     route: RouteKind::Buried,
///     is_life_safety: false,
///     is_outdoor: true,
///     is_underground: true,
///     mechanical_protection: false,
///     phases: Phases::Single,
///     design_current: 30.4,
///     ambient_temp_c: 30.0,
///     grouping: 1,
/// };
/// let selection = select_optimal_cable_type(&context);
/// assert_eq!(selection.cable_type, CableType::Swa);
/// assert!(!selection.reason.is_empty());
/// ```
pub fn select_optimal_cable_type(context: &SelectionContext) -> CableSelection {
    let selection = select(context);
    tracing::debug!(
        cable = %selection.cable_type,
        reason = %selection.reason,
        "cable type selected"
    );
    selection
}

fn select(ctx: &SelectionContext) -> CableSelection {
    if ctx.is_life_safety {
        let role = match ctx.category {
            LoadCategory::FireAlarm => "Fire alarm circuit",
            LoadCategory::EmergencyLighting => "Emergency lighting circuit",
            _ => "Life-safety circuit",
        };
        return CableSelection::new(
            CableType::FireRated,
            format!(
                "{} must maintain circuit integrity during a fire: 3-hour fire-resistant cable (BS 5839-1 / BS 5266-1)",
                role
            ),
        );
    }

    if ctx.ambient_temp_c > MICC_AMBIENT_C {
        return CableSelection::new(
            CableType::Micc,
            format!(
                "Ambient temperature of {:.0}°C exceeds the rating of polymeric insulation: mineral-insulated cable required",
                ctx.ambient_temp_c
            ),
        );
    }

    if ctx.is_underground {
        return CableSelection::new(
            CableType::Swa,
            "Underground run: steel-wire armoured cable is suitable for direct burial and the armour provides the CPC",
        );
    }
    if ctx.mechanical_protection {
        let reason = if ctx.is_outdoor {
            "Outdoor run exposed to mechanical damage: steel-wire armoured cable gives UV resistance and impact protection"
        } else {
            "Mechanical protection required: steel-wire armoured cable resists impact and crushing"
        };
        return CableSelection::new(CableType::Swa, reason);
    }

    if ctx.category == LoadCategory::SubMain
        && ctx.phases == Phases::Three
        && ctx.design_current > ALUMINIUM_SUBMAIN_A
    {
        return CableSelection::new(
            CableType::AluminiumXlpe,
            format!(
                "Three-phase sub-main at {:.0}A: aluminium XLPE/SWA is lighter and cheaper than copper at this rating",
                ctx.design_current
            ),
        );
    }

    if ctx.route.is_enclosed() {
        let containment = if ctx.route == RouteKind::Trunking { "trunking" } else { "conduit" };
        if ctx.hot_or_grouped() {
            return CableSelection::new(
                CableType::XlpeSingle,
                format!(
                    "Single-core cables in {}: XLPE's 90°C rating offsets the derating for heat or grouping",
                    containment
                ),
            );
        }
        return CableSelection::new(
            CableType::PvcSingle,
            format!("Single-core PVC cables drawn into {}", containment),
        );
    }

    if ctx.design_current > TWIN_EARTH_MAX_A {
        return CableSelection::new(
            CableType::Swa,
            format!(
                "Design current of {:.1}A is beyond the practical range of twin and earth: multicore armoured cable",
                ctx.design_current
            ),
        );
    }

    if ctx.hot_or_grouped() || ctx.design_current > XLPE_PREFERRED_A {
        let why = if ctx.ambient_temp_c > REFERENCE_AMBIENT_C {
            format!("ambient of {:.0}°C", ctx.ambient_temp_c)
        } else if ctx.grouping > 2 {
            format!("grouping with {} circuits", ctx.grouping)
        } else {
            format!("design current of {:.1}A", ctx.design_current)
        };
        return CableSelection::new(
            CableType::XlpeTwinEarth,
            format!("Twin and earth with XLPE insulation: the 90°C rating gives headroom for the {}", why),
        );
    }

    CableSelection::new(
        CableType::PvcTwinEarth,
        "Standard PVC twin and earth (6242Y) for a domestic circuit in normal conditions",
    )
}
