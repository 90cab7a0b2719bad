//! # Installation Environment
//!
//! The environment a circuit is installed in: ambient temperature, how many
//! circuits share the route, the supply earthing arrangement and its external
//! loop impedance Ze.
//!
//! Values are usually auto-detected from the job description and may then be
//! overridden by the user. [`EnvironmentalProfile::resolve`] lays the
//! overrides over the detected values and records the result in
//! `final_applied`, which is the only part the engine reads.

use serde::{Deserialize, Serialize};

/// Supply earthing arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EarthingSystem {
    /// PME supply, combined neutral and earth in the service cable
    #[serde(rename = "TN-C-S", alias = "TNCS", alias = "tn-c-s")]
    #[default]
    TnCS,

    /// Separate earth via the cable sheath
    #[serde(rename = "TN-S", alias = "TNS", alias = "tn-s")]
    TnS,

    /// Installation earth electrode
    #[serde(rename = "TT", alias = "tt")]
    Tt,
}

impl EarthingSystem {
    /// All earthing systems for UI selection
    pub const ALL: [EarthingSystem; 3] = [EarthingSystem::TnCS, EarthingSystem::TnS, EarthingSystem::Tt];

    /// Maximum Ze a distribution network operator typically declares (Ω)
    pub fn typical_ze_ohm(&self) -> f64 {
        match self {
            EarthingSystem::TnCS => 0.35,
            EarthingSystem::TnS => 0.80,
            EarthingSystem::Tt => 21.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            EarthingSystem::TnCS => "TN-C-S (PME)",
            EarthingSystem::TnS => "TN-S",
            EarthingSystem::Tt => "TT",
        }
    }
}

impl std::fmt::Display for EarthingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolved environment for one circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConditions {
    /// Ambient temperature along the route (°C)
    pub ambient_temp_c: f64,

    /// Number of circuits grouped together (1 = installed alone)
    pub grouping: u32,

    /// External earth-fault loop impedance (Ω)
    pub ze_ohm: f64,

    /// Supply earthing arrangement
    pub earthing: EarthingSystem,

    /// Free-text conditions ("dry", "damp", "corrosive", ...)
    pub conditions: String,
}

impl Default for EnvironmentConditions {
    fn default() -> Self {
        EnvironmentConditions {
            ambient_temp_c: 30.0,
            grouping: 1,
            ze_ohm: EarthingSystem::TnCS.typical_ze_ohm(),
            earthing: EarthingSystem::TnCS,
            conditions: "dry".to_string(),
        }
    }
}

impl EnvironmentConditions {
    /// Whether the conditions description mentions moisture or corrosion
    pub fn is_harsh(&self) -> bool {
        let conditions = self.conditions.to_lowercase();
        ["wet", "damp", "corrosive", "chemical", "marine"]
            .iter()
            .any(|k| conditions.contains(k))
    }
}

/// User overrides; any `None` keeps the auto-detected value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentOverrides {
    pub ambient_temp_c: Option<f64>,
    pub grouping: Option<u32>,
    pub ze_ohm: Option<f64>,
    pub earthing: Option<EarthingSystem>,
    pub conditions: Option<String>,
}

impl EnvironmentOverrides {
    /// True when no field is overridden
    pub fn is_empty(&self) -> bool {
        self.ambient_temp_c.is_none()
            && self.grouping.is_none()
            && self.ze_ohm.is_none()
            && self.earthing.is_none()
            && self.conditions.is_none()
    }
}

/// Auto-detected environment, user overrides, and the merged result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentalProfile {
    /// Values inferred from the job description
    pub auto_detected: EnvironmentConditions,

    /// Values the user changed
    pub user_overrides: EnvironmentOverrides,

    /// What the engine actually uses
    pub final_applied: EnvironmentConditions,
}

impl EnvironmentalProfile {
    /// Merge user overrides over auto-detected values.
    ///
    /// Overriding the earthing system without giving a Ze replaces Ze with
    /// the typical value for the new system, since the detected Ze belonged
    /// to a different supply arrangement.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cable_core::environment::{EarthingSystem, EnvironmentConditions, EnvironmentOverrides, EnvironmentalProfile};
    ///
    /// let overrides = EnvironmentOverrides {
    ///     earthing: Some(EarthingSystem::TnS),
    ///     ..Default::default()
    /// };
    /// let profile = EnvironmentalProfile::resolve(EnvironmentConditions::default(), overrides);
    /// assert_eq!(profile.final_applied.ze_ohm, 0.80);
    /// ```
    pub fn resolve(auto_detected: EnvironmentConditions, user_overrides: EnvironmentOverrides) -> Self {
        let mut applied = auto_detected.clone();

        if let Some(ambient) = user_overrides.ambient_temp_c {
            applied.ambient_temp_c = ambient;
        }
        if let Some(grouping) = user_overrides.grouping {
            applied.grouping = grouping;
        }
        if let Some(earthing) = user_overrides.earthing {
            applied.earthing = earthing;
            if user_overrides.ze_ohm.is_none() && earthing != auto_detected.earthing {
                applied.ze_ohm = earthing.typical_ze_ohm();
            }
        }
        if let Some(ze) = user_overrides.ze_ohm {
            applied.ze_ohm = ze;
        }
        if let Some(conditions) = &user_overrides.conditions {
            applied.conditions = conditions.clone();
        }

        EnvironmentalProfile {
            auto_detected,
            user_overrides,
            final_applied: applied,
        }
    }

    /// Profile with the given conditions used directly (nothing detected, nothing overridden)
    pub fn fixed(conditions: EnvironmentConditions) -> Self {
        EnvironmentalProfile {
            auto_detected: conditions.clone(),
            user_overrides: EnvironmentOverrides::default(),
            final_applied: conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_conditions() {
        let env = EnvironmentConditions::default();
        assert_eq!(env.ambient_temp_c, 30.0);
        assert_eq!(env.grouping, 1);
        assert_eq!(env.earthing, EarthingSystem::TnCS);
        assert_eq!(env.ze_ohm, 0.35);
    }

    #[test]
    fn test_resolve_without_overrides() {
        let detected = EnvironmentConditions {
            ambient_temp_c: 35.0,
            ..Default::default()
        };
        let profile = EnvironmentalProfile::resolve(detected.clone(), EnvironmentOverrides::default());
        assert_eq!(profile.final_applied, detected);
        assert!(profile.user_overrides.is_empty());
    }

    #[test]
    fn test_override_wins() {
        let overrides = EnvironmentOverrides {
            ambient_temp_c: Some(45.0),
            grouping: Some(4),
            ..Default::default()
        };
        let profile = EnvironmentalProfile::resolve(EnvironmentConditions::default(), overrides);
        assert_eq!(profile.final_applied.ambient_temp_c, 45.0);
        assert_eq!(profile.final_applied.grouping, 4);
        assert_eq!(profile.auto_detected.ambient_temp_c, 30.0);
    }

    #[test]
    fn test_earthing_override_resets_ze() {
        let overrides = EnvironmentOverrides {
            earthing: Some(EarthingSystem::Tt),
            ..Default::default()
        };
        let profile = EnvironmentalProfile::resolve(EnvironmentConditions::default(), overrides);
        assert_eq!(profile.final_applied.ze_ohm, 21.0);
    }

    #[test]
    fn test_explicit_ze_beats_earthing_default() {
        let overrides = EnvironmentOverrides {
            earthing: Some(EarthingSystem::TnS),
            ze_ohm: Some(0.42),
            ..Default::default()
        };
        let profile = EnvironmentalProfile::resolve(EnvironmentConditions::default(), overrides);
        assert_eq!(profile.final_applied.ze_ohm, 0.42);
    }

    #[test]
    fn test_earthing_serialization() {
        let json = serde_json::to_string(&EarthingSystem::TnCS).unwrap();
        assert_eq!(json, "\"TN-C-S\"");
        let parsed: EarthingSystem = serde_json::from_str("\"TNS\"").unwrap();
        assert_eq!(parsed, EarthingSystem::TnS);
    }

    #[test]
    fn test_partial_profile_json() {
        let json = r#"{ "final_applied": { "ambient_temp_c": 40.0, "grouping": 3 } }"#;
        let profile: EnvironmentalProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.final_applied.ambient_temp_c, 40.0);
        assert_eq!(profile.final_applied.ze_ohm, 0.35);
    }

    #[test]
    fn test_harsh_conditions() {
        let env = EnvironmentConditions {
            conditions: "Damp cellar".to_string(),
            ..Default::default()
        };
        assert!(env.is_harsh());
        assert!(!EnvironmentConditions::default().is_harsh());
    }
}
