//! # Practical Guidance
//!
//! Site notes for the installing electrician, generated as titled sections
//! in a fixed order:
//!
//! 1. Cable-type specific (armoured, mineral, aluminium)
//! 2. Fire and emergency circuits
//! 3. Routing
//! 4. Installation method
//! 5. RCD protection
//! 6. Testing and verification
//!
//! Sections that do not apply are omitted; the order of the rest never
//! changes.

use serde::{Deserialize, Serialize};

use crate::calculations::protection::ProtectiveDevice;
use crate::cables::{bs7671_ref, CableType};
use crate::classification::{CircuitProfile, LoadCategory, RouteKind};

/// Smallest bend radius multiple quoted on site
pub const MIN_BEND_RADIUS_MULTIPLE: f64 = 6.0;

/// Conduit/trunking space factor limit (%)
pub const MAX_SPACE_FACTOR_PERCENT: f64 = 45.0;

/// One titled group of guidance points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceSection {
    pub title: String,
    pub points: Vec<String>,
}

impl GuidanceSection {
    fn new(title: impl Into<String>, points: Vec<String>) -> Self {
        GuidanceSection {
            title: title.into(),
            points,
        }
    }
}

/// Inputs to the guidance generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceContext {
    pub cable_type: CableType,
    pub profile: CircuitProfile,
    pub device: ProtectiveDevice,

    /// Clip spacing from the materials list, `None` for enclosed or buried routes
    pub clip_spacing_m: Option<f64>,

    /// Calculated Zs at the end of the run (Ω)
    pub zs_ohm: f64,

    pub regulations: String,
}

/// Generate the guidance sections for a circuit.
///
/// # Example
///
/// ```rust
/// use cable_core::outputs::guidance::{generate_guidance, GuidanceContext};
/// use cable_core::calculations::protection::ProtectiveDevice;
/// use cable_core::cables::CableType;
/// use cable_core::classification::CircuitProfile;
/// use cable_core::plan::InstallationPlan;
///
/// let plan = InstallationPlan::new("Kitchen sockets", 7000.0, 230.0, 15.0);
/// let sections = generate_guidance(&GuidanceContext {
///     cable_type: CableType::PvcTwinEarth,
///     profile: CircuitProfile::classify(&plan),
///     device: ProtectiveDevice::type_b_mcb(32),
///     clip_spacing_m: Some(0.4),
///     zs_ohm: 0.62,
///     regulations: "BS 7671:2018+A2:2022".to_string(),
/// });
/// assert_eq!(sections.last().unwrap().title, "Testing & Verification");
/// ```
pub fn generate_guidance(ctx: &GuidanceContext) -> Vec<GuidanceSection> {
    let mut sections = Vec::new();

    if let Some(section) = cable_type_section(ctx) {
        sections.push(section);
    }
    if let Some(section) = fire_section(ctx) {
        sections.push(section);
    }
    sections.push(routing_section(ctx));
    sections.push(installation_section(ctx));
    sections.push(rcd_section(ctx));
    sections.push(testing_section(ctx));

    sections
}

fn cable_type_section(ctx: &GuidanceContext) -> Option<GuidanceSection> {
    let points = match ctx.cable_type {
        CableType::Swa => vec![
            "Bury at a minimum depth of 600mm, or 450mm under gardens and areas not subject to vehicle traffic".to_string(),
            "Earth the armour at the supply end via a banjo washer on the CW gland".to_string(),
            "Fit PVC shrouds over glands on outdoor or damp terminations".to_string(),
            format!("Lay warning tape 150mm above the cable along the whole buried route ({})", bs7671_ref::BURIED),
        ],
        CableType::AluminiumXlpe => vec![
            "Terminate with bimetallic lugs or aluminium-rated terminals only".to_string(),
            "Abrade conductor oxide and apply jointing compound before crimping".to_string(),
            "Torque terminations to the manufacturer's figures and re-check after 24 hours".to_string(),
            "Earth the armour at the supply end; confirm armour CPC adequacy by calculation".to_string(),
        ],
        CableType::Micc => vec![
            "Seal pots immediately after stripping to keep moisture out of the mineral insulation".to_string(),
            "Insulation-test each termination before and 24 hours after sealing".to_string(),
            "Use copper clips or saddles compatible with the sheath".to_string(),
        ],
        _ => return None,
    };
    Some(GuidanceSection::new(
        format!("{} Installation", ctx.cable_type.display_name()),
        points,
    ))
}

fn fire_section(ctx: &GuidanceContext) -> Option<GuidanceSection> {
    if !ctx.profile.is_life_safety {
        return None;
    }

    let standard = match ctx.profile.category {
        LoadCategory::EmergencyLighting => "BS 5266-1 (emergency lighting)",
        LoadCategory::FireAlarm => "BS 5839-1 (fire detection and alarm)",
        _ => "BS 5839-1 / BS 5266-1",
    };
    let points = vec![
        format!("Install in accordance with {} and {}", standard, bs7671_ref::SAFETY_SERVICES),
        "Cable must hold a 3-hour fire rating to BS 8434-2 / BS EN 50200 (standard grade insufficient for enhanced systems)".to_string(),
        format!(
            "Support with fire-rated metal clips or ties only; no plastic fixings ({})",
            bs7671_ref::FIRE_SUPPORT
        ),
        "Seal penetrations through fire compartments with intumescent sealant".to_string(),
        "Label the supply isolator \"DO NOT SWITCH OFF\" and segregate from other circuits".to_string(),
    ];
    Some(GuidanceSection::new("Fire & Emergency Circuits", points))
}

fn routing_section(ctx: &GuidanceContext) -> GuidanceSection {
    let mut points = Vec::new();

    if ctx.profile.is_underground {
        points.push("Route buried cable away from other services and record the route on the as-built drawing".to_string());
        points.push("Use ducts under driveways and where the route crosses paths".to_string());
    } else {
        points.push(format!(
            "Run concealed cables within safe zones: horizontally or vertically from accessories, or within 150mm of wall/ceiling junctions ({})",
            bs7671_ref::SAFE_ZONES
        ));
        points.push("Cables less than 50mm deep outside safe zones need RCD protection or earthed mechanical protection".to_string());
    }
    if ctx.profile.is_outdoor && !ctx.profile.is_underground {
        points.push("Protect exposed outdoor runs from UV and impact".to_string());
    }
    if ctx.profile.is_bathroom {
        points.push("Observe bathroom zones 0-2: keep joints and accessories out of the zones".to_string());
    }
    if ctx.profile.route == RouteKind::Insulated {
        points.push("Avoid running through thermal insulation where possible; the rating has been reduced for it".to_string());
    }

    GuidanceSection::new("Cable Routing", points)
}

fn installation_section(ctx: &GuidanceContext) -> GuidanceSection {
    let mut points = Vec::new();

    match ctx.clip_spacing_m {
        Some(spacing) => points.push(format!("Fix cable at intervals not exceeding {}m", spacing)),
        None if ctx.profile.route.is_enclosed() => points.push(format!(
            "Keep the {} space factor below {:.0}% so cables can be drawn in without damage",
            if ctx.profile.route == RouteKind::Trunking { "trunking" } else { "conduit" },
            MAX_SPACE_FACTOR_PERCENT
        )),
        None => {}
    }

    let bend = ctx.cable_type.min_bend_radius_multiple().max(MIN_BEND_RADIUS_MULTIPLE);
    points.push(format!("Minimum internal bend radius {:.0}× the overall cable diameter", bend));

    if ctx.cable_type.is_single_core() {
        points.push("Single-core cables must be enclosed throughout; run line and neutral together in the same enclosure".to_string());
    }

    GuidanceSection::new("Installation Method", points)
}

fn rcd_section(ctx: &GuidanceContext) -> GuidanceSection {
    let points = if ctx.profile.needs_rcd {
        let reason = match ctx.profile.category {
            LoadCategory::Sockets => "socket-outlet circuit",
            LoadCategory::EvCharger => "EV charge point",
            _ if ctx.profile.is_bathroom => "bathroom circuit",
            _ => "outdoor circuit",
        };
        let mut points = vec![format!(
            "30mA RCD protection is mandatory for this {} ({})",
            reason,
            bs7671_ref::RCD
        )];
        if ctx.profile.category == LoadCategory::EvCharger {
            points.push("Use a Type A RCD with 6mA DC detection in the charger, or a Type B RCD".to_string());
        }
        points.push(format!(
            "Consider a {}A RCBO so an earth fault does not take out other circuits",
            ctx.device.rating_a
        ));
        points
    } else {
        vec![
            "30mA RCD protection is required if the cable is concealed less than 50mm deep in a wall".to_string(),
            "Otherwise RCD protection is recommended but not mandatory for this circuit".to_string(),
        ]
    };
    GuidanceSection::new("RCD Protection", points)
}

fn testing_section(ctx: &GuidanceContext) -> GuidanceSection {
    let points = vec![
        "Continuity of protective conductors (R1+R2) and of ring final conductors where applicable".to_string(),
        "Insulation resistance at 500V DC: minimum 1MΩ".to_string(),
        "Polarity at every accessory".to_string(),
        format!(
            "Measured Zs must not exceed {:.2}Ω for the {} (calculated {:.2}Ω, {})",
            ctx.device.max_zs_ohm(),
            ctx.device,
            ctx.zs_ohm,
            bs7671_ref::DISCONNECTION
        ),
        format!(
            "Complete the Electrical Installation Certificate to {} ({})",
            ctx.regulations,
            bs7671_ref::VERIFICATION
        ),
    ];
    GuidanceSection::new("Testing & Verification", points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::InstallationPlan;

    fn context(plan: &InstallationPlan, cable_type: CableType) -> GuidanceContext {
        GuidanceContext {
            cable_type,
            profile: CircuitProfile::classify(plan),
            device: ProtectiveDevice::type_b_mcb(32),
            clip_spacing_m: Some(0.4),
            zs_ohm: 0.62,
            regulations: "BS 7671:2018+A2:2022".to_string(),
        }
    }

    fn titles(sections: &[GuidanceSection]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_domestic_circuit_sections() {
        let plan = InstallationPlan::new("Immersion heater", 3000.0, 230.0, 12.0);
        let sections = generate_guidance(&context(&plan, CableType::PvcTwinEarth));
        assert_eq!(
            titles(&sections),
            vec!["Cable Routing", "Installation Method", "RCD Protection", "Testing & Verification"]
        );
        let routing = &sections[0];
        assert!(routing.points.iter().any(|p| p.contains("150mm")));
    }

    #[test]
    fn test_fixed_order_with_all_sections() {
        let plan = InstallationPlan::new("Emergency lighting", 500.0, 230.0, 30.0).with_fire_protection("emergency-lighting");
        let sections = generate_guidance(&context(&plan, CableType::Micc));
        assert_eq!(
            titles(&sections),
            vec![
                "MICC mineral-insulated Installation",
                "Fire & Emergency Circuits",
                "Cable Routing",
                "Installation Method",
                "RCD Protection",
                "Testing & Verification",
            ]
        );
        assert!(sections[1].points.iter().any(|p| p.contains("BS 5266-1")));
        assert!(sections[1].points.iter().any(|p| p.contains("3-hour")));
    }

    #[test]
    fn test_swa_burial_depth() {
        let plan = InstallationPlan::new("Garage supply", 7000.0, 230.0, 25.0)
            .with_installation_method("buried")
            .with_location("outdoor underground");
        let sections = generate_guidance(&context(&plan, CableType::Swa));
        assert!(sections[0].points.iter().any(|p| p.contains("600mm") && p.contains("450mm")));
    }

    #[test]
    fn test_rcd_mandatory_for_sockets() {
        let plan = InstallationPlan::new("Ring final sockets", 7000.0, 230.0, 40.0);
        let sections = generate_guidance(&context(&plan, CableType::PvcTwinEarth));
        let rcd = sections.iter().find(|s| s.title == "RCD Protection").unwrap();
        assert!(rcd.points[0].contains("mandatory"));
        assert!(rcd.points[0].contains("socket"));
    }

    #[test]
    fn test_bend_radius_never_below_six() {
        let plan = InstallationPlan::new("Cooker", 9000.0, 230.0, 8.0);
        let sections = generate_guidance(&context(&plan, CableType::PvcTwinEarth));
        let method = sections.iter().find(|s| s.title == "Installation Method").unwrap();
        assert!(method.points.iter().any(|p| p.contains("6×")));

        let fire = generate_guidance(&context(&plan, CableType::FireRated));
        let method = fire.iter().find(|s| s.title == "Installation Method").unwrap();
        assert!(method.points.iter().any(|p| p.contains("8×")));
    }

    #[test]
    fn test_testing_section_quotes_device_max_zs() {
        let plan = InstallationPlan::new("Cooker", 9000.0, 230.0, 8.0);
        let sections = generate_guidance(&context(&plan, CableType::PvcTwinEarth));
        let testing = sections.last().unwrap();
        assert!(testing.points.iter().any(|p| p.contains("1.15Ω") && p.contains("32A Type B MCB")));
        assert!(testing.points.iter().any(|p| p.contains("1MΩ")));
    }
}
