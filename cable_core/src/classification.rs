//! # Load Classification
//!
//! Turns the free-text parts of a plan (`load_type`, `location`,
//! `fire_protection`, installation method) into a tagged [`CircuitProfile`]
//! once, so the rest of the engine matches on enums and flags instead of
//! repeating substring tests.

use serde::{Deserialize, Serialize};

use crate::plan::InstallationPlan;

/// Circuit category inferred from the load description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LoadCategory {
    Lighting,
    EmergencyLighting,
    FireAlarm,
    Shower,
    Cooker,
    EvCharger,
    Sockets,
    Heating,
    Motor,
    SubMain,
    #[default]
    General,
}

impl LoadCategory {
    pub const ALL: [LoadCategory; 11] = [
        LoadCategory::Lighting,
        LoadCategory::EmergencyLighting,
        LoadCategory::FireAlarm,
        LoadCategory::Shower,
        LoadCategory::Cooker,
        LoadCategory::EvCharger,
        LoadCategory::Sockets,
        LoadCategory::Heating,
        LoadCategory::Motor,
        LoadCategory::SubMain,
        LoadCategory::General,
    ];

    /// Classify a free-text load description.
    ///
    /// Life-safety terms are checked first, so "emergency lighting" is
    /// [`LoadCategory::EmergencyLighting`] rather than plain lighting.
    pub fn from_description(text: &str) -> Self {
        let text = text.to_lowercase();
        let has = |needle: &str| text.contains(needle);
        let has_word = |word: &str| {
            text.split(|c: char| !c.is_ascii_alphanumeric())
                .any(|token| token == word)
        };

        if has("emergency") {
            LoadCategory::EmergencyLighting
        } else if has("fire alarm") || has("fire-alarm") || has("smoke") {
            LoadCategory::FireAlarm
        } else if has("light") {
            LoadCategory::Lighting
        } else if has("shower") {
            LoadCategory::Shower
        } else if has("cooker") || has("oven") || has("hob") {
            LoadCategory::Cooker
        } else if has_word("ev") || has("charger") || has("electric vehicle") {
            LoadCategory::EvCharger
        } else if has("socket") || has("ring final") || has("ring main") {
            LoadCategory::Sockets
        } else if has("heat") || has("immersion") {
            LoadCategory::Heating
        } else if has("motor") || has("pump") || has("compressor") {
            LoadCategory::Motor
        } else if has("sub-main") || has("submain") || has("sub main") || has("distribution") {
            LoadCategory::SubMain
        } else {
            LoadCategory::General
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCategory::Lighting => "Lighting",
            LoadCategory::EmergencyLighting => "Emergency lighting",
            LoadCategory::FireAlarm => "Fire alarm",
            LoadCategory::Shower => "Shower",
            LoadCategory::Cooker => "Cooker",
            LoadCategory::EvCharger => "EV charger",
            LoadCategory::Sockets => "Socket outlets",
            LoadCategory::Heating => "Heating",
            LoadCategory::Motor => "Motor",
            LoadCategory::SubMain => "Sub-main",
            LoadCategory::General => "General power",
        }
    }
}

impl std::fmt::Display for LoadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Route style derived from the installation method descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    /// Clipped to a surface
    #[default]
    Surface,
    /// Enclosed in conduit
    Conduit,
    /// Enclosed in trunking
    Trunking,
    /// In or through thermal insulation
    Insulated,
    /// On tray, ladder or cleats
    Tray,
    /// Buried in the ground or in ducts
    Buried,
}

impl RouteKind {
    /// Classify an installation method descriptor or BS 7671 reference code
    pub fn from_method(method: &str) -> Self {
        let text = method.trim().to_lowercase();
        match text.as_str() {
            "a1" | "a2" => return RouteKind::Insulated,
            "b1" | "b2" => return RouteKind::Conduit,
            "c" => return RouteKind::Surface,
            "d" | "d1" | "d2" => return RouteKind::Buried,
            "e" | "f" | "g" => return RouteKind::Tray,
            _ => {}
        }

        if text.contains("trunking") {
            RouteKind::Trunking
        } else if text.contains("conduit") {
            RouteKind::Conduit
        } else if text.contains("buried") || text.contains("underground") || text.contains("duct") {
            RouteKind::Buried
        } else if text.contains("insulation") || text.contains("insulated") {
            RouteKind::Insulated
        } else if text.contains("tray") || text.contains("ladder") || text.contains("cleat") || text.contains("free air") {
            RouteKind::Tray
        } else {
            RouteKind::Surface
        }
    }

    /// Cable is enclosed in conduit or trunking
    pub fn is_enclosed(&self) -> bool {
        matches!(self, RouteKind::Conduit | RouteKind::Trunking)
    }
}

/// Classification of one plan, computed once per calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitProfile {
    pub category: LoadCategory,
    pub route: RouteKind,

    /// `load_type` mentions lighting (selects the tighter voltage-drop limit)
    pub is_lighting: bool,

    /// Fire alarm, emergency lighting or escape-route circuit
    pub is_life_safety: bool,

    pub is_outdoor: bool,
    pub is_underground: bool,

    /// Circuit in or near a bathroom
    pub is_bathroom: bool,

    /// 30 mA RCD protection is mandatory
    pub needs_rcd: bool,
}

impl CircuitProfile {
    /// Classify a plan.
    pub fn classify(plan: &InstallationPlan) -> Self {
        let load_type = plan.load_type.to_lowercase();
        let location = plan.location.as_deref().unwrap_or("").to_lowercase();
        let fire = plan.fire_protection.as_deref().unwrap_or("").to_lowercase();

        let category = LoadCategory::from_description(&plan.load_type);
        let located_underground = location.contains("underground") || location.contains("buried");
        // a buried location overrides an above-ground method descriptor
        let route = match RouteKind::from_method(&plan.installation_method) {
            _ if located_underground => RouteKind::Buried,
            route => route,
        };

        let fire_role = !fire.is_empty() && fire != "none" && fire != "no";
        let is_life_safety = fire_role
            || matches!(category, LoadCategory::EmergencyLighting | LoadCategory::FireAlarm)
            || load_type.contains("escape");

        let is_underground = route == RouteKind::Buried;
        let is_outdoor = is_underground
            || location.contains("outdoor")
            || location.contains("outside")
            || location.contains("external")
            || location.contains("garden");
        let is_bathroom = location.contains("bathroom")
            || load_type.contains("bathroom")
            || category == LoadCategory::Shower;

        let needs_rcd = matches!(category, LoadCategory::Sockets | LoadCategory::EvCharger)
            || is_outdoor
            || is_bathroom;

        CircuitProfile {
            category,
            route,
            is_lighting: load_type.contains("light"),
            is_life_safety,
            is_outdoor,
            is_underground,
            is_bathroom,
            needs_rcd,
        }
    }
}
