//! # Bill of Materials
//!
//! Turns a sized circuit into a priced list of what to buy: cable with a
//! wastage allowance, the protective device, terminations, fixings or
//! containment, and the extras required by armoured, mineral, aluminium
//! and fire-rated constructions.
//!
//! ## Rules
//!
//! ```text
//! cable metres  = ceil(L × wastage)              (wastage = 1.1 by default)
//! clip count    = ceil(L / spacing) + 2
//! spacing       = 0.3 m fire-rated | 0.4 m surface | 0.25 m otherwise
//! conduit       = ceil(L / 3) × 3 m lengths, couplers between lengths
//! ```
//!
//! The priced size is never below 1.5 mm² even when the electrical
//! calculation allows 1.0 mm².

use serde::{Deserialize, Serialize};

use crate::calculations::protection::ProtectiveDevice;
use crate::cables::{cable_price_per_metre, device_price, unit_prices, CableType, ConductorSize};
use crate::classification::RouteKind;

/// Clip spacing for fire-rated supports (m)
pub const FIRE_CLIP_SPACING_M: f64 = 0.3;

/// Clip spacing for cables clipped to a surface (m)
pub const SURFACE_CLIP_SPACING_M: f64 = 0.4;

/// Clip spacing for every other exposed route (m)
pub const DEFAULT_CLIP_SPACING_M: f64 = 0.25;

/// Length of one piece of conduit or trunking (m)
pub const CONTAINMENT_LENGTH_M: f64 = 3.0;

/// Saddle spacing along PVC conduit (m)
pub const CONDUIT_SADDLE_SPACING_M: f64 = 0.75;

/// Route length covered by one underground marker post (m)
pub const MARKER_POST_SPACING_M: f64 = 10.0;

/// Route length sealed by one tube of intumescent sealant (m)
pub const SEALANT_COVERAGE_M: f64 = 25.0;

/// Line item grouping used by the cost breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialCategory {
    Cable,
    Protection,
    Accessory,
    Fixing,
    Containment,
    Labelling,
}

impl MaterialCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialCategory::Cable => "Cable",
            MaterialCategory::Protection => "Protection",
            MaterialCategory::Accessory => "Accessory",
            MaterialCategory::Fixing => "Fixing",
            MaterialCategory::Containment => "Containment",
            MaterialCategory::Labelling => "Labelling",
        }
    }
}

impl std::fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One priced line of the materials list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    pub description: String,
    pub category: MaterialCategory,
    pub quantity: f64,

    /// "m", "each", "pack", "tube"
    pub unit: String,

    pub unit_cost: f64,

    /// quantity × unit_cost
    pub total_cost: f64,
}

impl MaterialItem {
    pub fn new(
        description: impl Into<String>,
        category: MaterialCategory,
        quantity: f64,
        unit: &str,
        unit_cost: f64,
    ) -> Self {
        MaterialItem {
            description: description.into(),
            category,
            quantity,
            unit: unit.to_string(),
            unit_cost,
            total_cost: quantity * unit_cost,
        }
    }
}

/// What the materials list depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialsContext {
    pub cable_type: CableType,

    /// Size from the sizing search (floored to 1.5 mm² for pricing)
    pub cable_size: ConductorSize,

    pub length_m: f64,
    pub device: ProtectiveDevice,
    pub route: RouteKind,
    pub is_underground: bool,

    /// Life-safety circuit or fire-rated construction
    pub fire_rated: bool,

    /// Cable wastage multiplier
    pub wastage_factor: f64,
}

impl MaterialsContext {
    /// Clip spacing for exposed routes, `None` where clips are not used
    /// (conduit, trunking, and buried runs).
    pub fn clip_spacing_m(&self) -> Option<f64> {
        if self.route.is_enclosed() || self.route == RouteKind::Buried {
            return None;
        }
        Some(if self.fire_rated {
            FIRE_CLIP_SPACING_M
        } else if self.route == RouteKind::Surface {
            SURFACE_CLIP_SPACING_M
        } else {
            DEFAULT_CLIP_SPACING_M
        })
    }

    /// Metres of cable to order
    pub fn cable_quantity_m(&self) -> f64 {
        (self.length_m * self.wastage_factor).ceil()
    }
}

/// Build the materials list for a sized circuit.
///
/// # Example
///
/// ```rust
/// use cable_core::outputs::materials::{generate_materials, MaterialCategory, MaterialsContext};
/// use cable_core::calculations::protection::ProtectiveDevice;
/// use cable_core::cables::{CableType, ConductorSize};
/// use cable_core::classification::RouteKind;
///
/// let items = generate_materials(&MaterialsContext {
///     cable_type: CableType::PvcTwinEarth,
///     cable_size: ConductorSize::Mm2_5,
///     length_m: 20.0,
///     device: ProtectiveDevice::type_b_mcb(20),
///     route: RouteKind::Surface,
///     is_underground: false,
///     fire_rated: false,
///     wastage_factor: 1.1,
/// });
/// let cable = items.iter().find(|i| i.category == MaterialCategory::Cable).unwrap();
/// assert_eq!(cable.quantity, 22.0);
/// ```
pub fn generate_materials(ctx: &MaterialsContext) -> Vec<MaterialItem> {
    let mut items = Vec::new();
    let length = ctx.length_m;
    let priced_size = ctx.cable_size.for_materials();

    let price = cable_price_per_metre(ctx.cable_type, priced_size);
    items.push(MaterialItem::new(
        format!(
            "{} {} cable ({})",
            priced_size,
            ctx.cable_type.display_name(),
            ctx.cable_type.designation()
        ),
        MaterialCategory::Cable,
        ctx.cable_quantity_m(),
        "m",
        price.price,
    ));

    items.push(MaterialItem::new(
        ctx.device.to_string(),
        MaterialCategory::Protection,
        1.0,
        "each",
        device_price(ctx.device.rating_a),
    ));

    items.push(MaterialItem::new(
        "Grommets and cable entry protection",
        MaterialCategory::Accessory,
        1.0,
        "pack",
        unit_prices::GROMMETS,
    ));
    items.push(MaterialItem::new(
        "Terminal connectors",
        MaterialCategory::Accessory,
        1.0,
        "pack",
        unit_prices::CONNECTORS,
    ));

    push_supports(ctx, &mut items);

    if ctx.cable_type.is_armoured() {
        push_armoured_terminations(ctx, &mut items);
    }
    if ctx.cable_type == CableType::Micc {
        items.push(MaterialItem::new(
            "MICC pot, seal and gland kit",
            MaterialCategory::Accessory,
            2.0,
            "each",
            unit_prices::MICC_TERMINATION,
        ));
    }
    if ctx.is_underground {
        items.push(MaterialItem::new(
            "Underground cable warning tape",
            MaterialCategory::Labelling,
            length.ceil(),
            "m",
            unit_prices::WARNING_TAPE_PER_M,
        ));
        items.push(MaterialItem::new(
            "Cable route marker post",
            MaterialCategory::Labelling,
            (length / MARKER_POST_SPACING_M).ceil() + 1.0,
            "each",
            unit_prices::MARKER_POST,
        ));
    }
    if ctx.fire_rated {
        push_fire_extras(ctx, &mut items);
    }

    tracing::debug!(
        items = items.len(),
        cable = %ctx.cable_type,
        size = %priced_size,
        "materials list generated"
    );
    items
}

fn push_supports(ctx: &MaterialsContext, items: &mut Vec<MaterialItem>) {
    let length = ctx.length_m;

    match ctx.route {
        RouteKind::Conduit => {
            let lengths = (length / CONTAINMENT_LENGTH_M).ceil();
            items.push(MaterialItem::new(
                "20mm PVC conduit (3m length)",
                MaterialCategory::Containment,
                lengths,
                "each",
                unit_prices::CONDUIT_LENGTH,
            ));
            items.push(MaterialItem::new(
                "20mm conduit coupler",
                MaterialCategory::Containment,
                (lengths - 1.0).max(0.0),
                "each",
                unit_prices::CONDUIT_COUPLER,
            ));
            items.push(MaterialItem::new(
                "20mm conduit saddle",
                MaterialCategory::Fixing,
                (length / CONDUIT_SADDLE_SPACING_M).ceil() + 1.0,
                "each",
                unit_prices::CONDUIT_SADDLE,
            ));
        }
        RouteKind::Trunking => {
            let lengths = (length / CONTAINMENT_LENGTH_M).ceil();
            items.push(MaterialItem::new(
                "38 x 25mm PVC trunking (3m length)",
                MaterialCategory::Containment,
                lengths,
                "each",
                unit_prices::TRUNKING_LENGTH,
            ));
            items.push(MaterialItem::new(
                "Trunking coupler",
                MaterialCategory::Containment,
                (lengths - 1.0).max(0.0),
                "each",
                unit_prices::TRUNKING_COUPLER,
            ));
            items.push(MaterialItem::new(
                "Trunking fixings",
                MaterialCategory::Fixing,
                (lengths / 3.0).ceil(),
                "pack",
                unit_prices::TRUNKING_FIXINGS,
            ));
        }
        _ => {
            let Some(spacing) = ctx.clip_spacing_m() else {
                return;
            };
            let count = (length / spacing).ceil() + 2.0;
            let (description, unit_cost) = if ctx.fire_rated {
                ("Fire-rated metal P-clip", unit_prices::FIRE_CLIP)
            } else if ctx.cable_type.is_armoured() {
                ("Armoured cable cleat", unit_prices::CLEAT)
            } else {
                ("Cable clip", unit_prices::CLIP)
            };
            items.push(MaterialItem::new(
                format!("{} ({}m spacing)", description, spacing),
                MaterialCategory::Fixing,
                count,
                "each",
                unit_cost,
            ));
        }
    }
}

fn push_armoured_terminations(ctx: &MaterialsContext, items: &mut Vec<MaterialItem>) {
    let (gland, gland_cost) = if ctx.cable_type == CableType::AluminiumXlpe {
        ("Aluminium-rated gland and bimetallic lug kit", unit_prices::ALUMINIUM_TERMINATION)
    } else {
        ("SWA gland (CW type)", unit_prices::SWA_GLAND)
    };

    items.push(MaterialItem::new(gland, MaterialCategory::Accessory, 2.0, "each", gland_cost));
    items.push(MaterialItem::new(
        "Banjo earth washer",
        MaterialCategory::Accessory,
        2.0,
        "each",
        unit_prices::BANJO_WASHER,
    ));
    items.push(MaterialItem::new(
        "Gland lockring",
        MaterialCategory::Accessory,
        2.0,
        "each",
        unit_prices::LOCKRING,
    ));
    items.push(MaterialItem::new(
        "PVC gland shroud",
        MaterialCategory::Accessory,
        2.0,
        "each",
        unit_prices::SHROUD,
    ));
}

fn push_fire_extras(ctx: &MaterialsContext, items: &mut Vec<MaterialItem>) {
    items.push(MaterialItem::new(
        "Intumescent fire sealant (310ml)",
        MaterialCategory::Accessory,
        (ctx.length_m / SEALANT_COVERAGE_M).ceil().max(1.0),
        "tube",
        unit_prices::INTUMESCENT_SEALANT,
    ));
    items.push(MaterialItem::new(
        "Stainless steel fire-rated cable ties",
        MaterialCategory::Fixing,
        1.0,
        "pack",
        unit_prices::FIRE_TIES,
    ));
    items.push(MaterialItem::new(
        "\"DO NOT SWITCH OFF\" safety label",
        MaterialCategory::Labelling,
        2.0,
        "each",
        unit_prices::SAFETY_LABEL,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> MaterialsContext {
        MaterialsContext {
            cable_type: CableType::PvcTwinEarth,
            cable_size: ConductorSize::Mm2_5,
            length_m: 20.0,
            device: ProtectiveDevice::type_b_mcb(20),
            route: RouteKind::Surface,
            is_underground: false,
            fire_rated: false,
            wastage_factor: 1.1,
        }
    }

    fn find<'a>(items: &'a [MaterialItem], text: &str) -> Option<&'a MaterialItem> {
        items.iter().find(|i| i.description.contains(text))
    }

    #[test]
    fn test_basic_twin_earth_list() {
        let items = generate_materials(&context());
        let cable = &items[0];
        assert_eq!(cable.category, MaterialCategory::Cable);
        assert_eq!(cable.quantity, 22.0);
        assert_eq!(cable.unit_cost, 2.25);
        assert!(cable.description.contains("2.5mm²"));

        let device = find(&items, "20A Type B MCB").unwrap();
        assert_eq!(device.category, MaterialCategory::Protection);

        // 20 / 0.4 + 2
        let clips = find(&items, "Cable clip").unwrap();
        assert_eq!(clips.quantity, 52.0);
        assert!(clips.description.contains("0.4m"));

        assert!(find(&items, "gland").is_none());
        assert!(find(&items, "warning tape").is_none());
    }

    #[test]
    fn test_priced_size_floor() {
        let items = generate_materials(&MaterialsContext {
            cable_size: ConductorSize::Mm1_0,
            ..context()
        });
        assert!(items[0].description.contains("1.5mm²"));
        assert_eq!(items[0].unit_cost, 1.45);
    }

    #[test]
    fn test_wastage_rounds_up() {
        let ctx = MaterialsContext {
            length_m: 18.0,
            ..context()
        };
        // 19.8 m rounds up to 20
        assert_eq!(ctx.cable_quantity_m(), 20.0);
    }

    #[test]
    fn test_clip_spacing_rules() {
        assert_eq!(context().clip_spacing_m(), Some(0.4));
        let fire = MaterialsContext { fire_rated: true, ..context() };
        assert_eq!(fire.clip_spacing_m(), Some(0.3));
        let tray = MaterialsContext { route: RouteKind::Tray, ..context() };
        assert_eq!(tray.clip_spacing_m(), Some(0.25));
        let conduit = MaterialsContext { route: RouteKind::Conduit, ..context() };
        assert_eq!(conduit.clip_spacing_m(), None);
    }

    #[test]
    fn test_conduit_replaces_clips() {
        let items = generate_materials(&MaterialsContext {
            route: RouteKind::Conduit,
            cable_type: CableType::PvcSingle,
            ..context()
        });
        assert!(find(&items, "clip").is_none());
        assert_eq!(find(&items, "PVC conduit").unwrap().quantity, 7.0);
        assert_eq!(find(&items, "coupler").unwrap().quantity, 6.0);
        assert!(find(&items, "saddle").is_some());
    }

    #[test]
    fn test_trunking_materials() {
        let items = generate_materials(&MaterialsContext {
            route: RouteKind::Trunking,
            ..context()
        });
        assert_eq!(find(&items, "trunking (3m").unwrap().category, MaterialCategory::Containment);
        assert!(find(&items, "Trunking fixings").is_some());
    }

    #[test]
    fn test_underground_swa_extras() {
        let items = generate_materials(&MaterialsContext {
            cable_type: CableType::Swa,
            cable_size: ConductorSize::Mm4,
            length_m: 25.0,
            route: RouteKind::Buried,
            is_underground: true,
            ..context()
        });
        assert_eq!(find(&items, "SWA gland").unwrap().quantity, 2.0);
        assert!(find(&items, "Banjo").is_some());
        assert!(find(&items, "lockring").is_some());
        assert!(find(&items, "shroud").is_some());
        assert_eq!(find(&items, "warning tape").unwrap().quantity, 25.0);
        assert_eq!(find(&items, "marker post").unwrap().quantity, 4.0);
        assert!(find(&items, "clip").is_none());
    }

    #[test]
    fn test_surface_swa_uses_cleats() {
        let items = generate_materials(&MaterialsContext {
            cable_type: CableType::Swa,
            cable_size: ConductorSize::Mm6,
            ..context()
        });
        assert!(find(&items, "cleat").is_some());
        assert!(find(&items, "warning tape").is_none());
    }

    #[test]
    fn test_fire_rated_extras() {
        let items = generate_materials(&MaterialsContext {
            cable_type: CableType::FireRated,
            cable_size: ConductorSize::Mm1_5,
            fire_rated: true,
            ..context()
        });
        let clips = find(&items, "P-clip").unwrap();
        assert!(clips.description.contains("0.3m"));
        assert_eq!(clips.unit_cost, unit_prices::FIRE_CLIP);
        assert!(find(&items, "Intumescent").is_some());
        assert!(find(&items, "fire-rated cable ties").is_some());
        let label = find(&items, "DO NOT SWITCH OFF").unwrap();
        assert_eq!(label.category, MaterialCategory::Labelling);
    }

    #[test]
    fn test_micc_and_aluminium_terminations() {
        let micc = generate_materials(&MaterialsContext {
            cable_type: CableType::Micc,
            ..context()
        });
        assert!(find(&micc, "MICC pot").is_some());

        let aluminium = generate_materials(&MaterialsContext {
            cable_type: CableType::AluminiumXlpe,
            cable_size: ConductorSize::Mm95,
            ..context()
        });
        assert!(find(&aluminium, "bimetallic").is_some());
        assert!(find(&aluminium, "SWA gland").is_none());
    }

    #[test]
    fn test_line_totals() {
        for item in generate_materials(&context()) {
            assert!((item.total_cost - item.quantity * item.unit_cost).abs() < 1e-9);
        }
    }
}
