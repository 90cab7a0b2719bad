//! # Installation Plan
//!
//! The input to the engine: one circuit described by its load, supply,
//! route and environment.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::plan::{InstallationPlan, Phases};
//!
//! let plan = InstallationPlan::new("shower", 9500.0, 230.0, 18.0);
//! assert_eq!(plan.phases, Phases::Single);
//! assert!((plan.design_current() - 41.304).abs() < 0.001);
//! ```
//!
//! ## JSON
//!
//! ```json
//! {
//!   "load_type": "ev charger",
//!   "total_load_w": 7000.0,
//!   "voltage": 230.0,
//!   "cable_length_m": 25.0,
//!   "installation_method": "buried",
//!   "location": "outdoor underground"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::environment::{EnvironmentConditions, EnvironmentalProfile};
use crate::errors::{CalcError, CalcResult};

/// Power factor assumed for three-phase loads when none is given
pub const DEFAULT_POWER_FACTOR: f64 = 0.85;

/// Installation method assumed when a plan does not name one
pub const DEFAULT_INSTALLATION_METHOD: &str = "clipped-direct";

/// Supply phase configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phases {
    #[default]
    #[serde(alias = "1", alias = "single-phase")]
    Single,
    #[serde(alias = "3", alias = "three-phase")]
    Three,
}

impl Phases {
    pub fn display_name(&self) -> &'static str {
        match self {
            Phases::Single => "Single-phase",
            Phases::Three => "Three-phase",
        }
    }
}

impl std::fmt::Display for Phases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One circuit to be sized.
///
/// Field names are snake_case in JSON. `cable_run` is accepted as an alias
/// for `installation_method`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallationPlan {
    /// Free-text category tag ("shower", "kitchen sockets", "emergency lighting", ...)
    pub load_type: String,

    /// Total connected load (W)
    pub total_load_w: f64,

    /// Nominal supply voltage (V); line-to-line for three-phase
    pub voltage: f64,

    /// Phase configuration
    #[serde(default)]
    pub phases: Phases,

    /// Power factor for three-phase loads (defaults to 0.85)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_factor: Option<f64>,

    /// Route length from the distribution board (m)
    pub cable_length_m: f64,

    /// Installation method descriptor ("clipped-direct", "conduit", "C", "B1", ...)
    #[serde(default = "default_installation_method", alias = "cable_run")]
    pub installation_method: String,

    /// Free-text location ("underground", "outdoor", "loft", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Route needs protection against mechanical damage
    #[serde(default)]
    pub mechanical_protection: bool,

    /// Fire-protection role ("fire-alarm", "emergency-lighting", "escape-route", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_protection: Option<String>,

    /// Detected environment, overrides and the applied result
    #[serde(default)]
    pub environmental_profile: EnvironmentalProfile,
}

fn default_installation_method() -> String {
    DEFAULT_INSTALLATION_METHOD.to_string()
}

impl InstallationPlan {
    /// Create a single-phase plan with default environment and clipped-direct installation
    pub fn new(load_type: impl Into<String>, total_load_w: f64, voltage: f64, cable_length_m: f64) -> Self {
        InstallationPlan {
            load_type: load_type.into(),
            total_load_w,
            voltage,
            phases: Phases::Single,
            power_factor: None,
            cable_length_m,
            installation_method: default_installation_method(),
            location: None,
            mechanical_protection: false,
            fire_protection: None,
            environmental_profile: EnvironmentalProfile::default(),
        }
    }

    /// Switch to a three-phase supply with an optional power factor
    pub fn with_three_phase(mut self, power_factor: Option<f64>) -> Self {
        self.phases = Phases::Three;
        self.power_factor = power_factor;
        self
    }

    pub fn with_installation_method(mut self, method: impl Into<String>) -> Self {
        self.installation_method = method.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_mechanical_protection(mut self, required: bool) -> Self {
        self.mechanical_protection = required;
        self
    }

    pub fn with_fire_protection(mut self, role: impl Into<String>) -> Self {
        self.fire_protection = Some(role.into());
        self
    }

    /// Use the given conditions as the applied environment
    pub fn with_environment(mut self, conditions: EnvironmentConditions) -> Self {
        self.environmental_profile = EnvironmentalProfile::fixed(conditions);
        self
    }

    pub fn with_environmental_profile(mut self, profile: EnvironmentalProfile) -> Self {
        self.environmental_profile = profile;
        self
    }

    /// The environment the engine applies
    pub fn environment(&self) -> &EnvironmentConditions {
        &self.environmental_profile.final_applied
    }

    /// Power factor used for three-phase design current
    pub fn effective_power_factor(&self) -> f64 {
        self.power_factor.unwrap_or(DEFAULT_POWER_FACTOR)
    }

    /// Design current Ib (A), unrounded.
    ///
    /// ```text
    /// single-phase: Ib = P / V
    /// three-phase:  Ib = P / (√3 × V × pf)
    /// ```
    pub fn design_current(&self) -> f64 {
        match self.phases {
            Phases::Single => self.total_load_w / self.voltage,
            Phases::Three => {
                self.total_load_w / (3.0_f64.sqrt() * self.voltage * self.effective_power_factor())
            }
        }
    }

    /// Validate the plan before sizing.
    ///
    /// Rejects anything that would divide by zero or produce a meaningless
    /// current: non-positive voltage, load or length, non-finite numbers, a
    /// power factor outside (0, 1], and negative environment values.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("total_load_w", self.total_load_w),
            ("voltage", self.voltage),
            ("cable_length_m", self.cable_length_m),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
            }
            if value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be greater than zero"));
            }
        }

        if let Some(pf) = self.power_factor {
            if !pf.is_finite() || pf <= 0.0 || pf > 1.0 {
                return Err(CalcError::invalid_input(
                    "power_factor",
                    pf.to_string(),
                    "Power factor must be in the range (0, 1]",
                ));
            }
        }

        if self.load_type.trim().is_empty() {
            return Err(CalcError::missing_field("load_type"));
        }

        let env = self.environment();
        if !env.ambient_temp_c.is_finite() {
            return Err(CalcError::invalid_input(
                "ambient_temp_c",
                env.ambient_temp_c.to_string(),
                "Ambient temperature must be a finite number",
            ));
        }
        if !env.ze_ohm.is_finite() || env.ze_ohm < 0.0 {
            return Err(CalcError::invalid_input(
                "ze_ohm",
                env.ze_ohm.to_string(),
                "Ze must be a non-negative number",
            ));
        }

        Ok(())
    }
}
