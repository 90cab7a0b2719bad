//! # Design Settings
//!
//! Global knobs for the engine: regulation edition, compliance limits,
//! wastage and labour rates. Every field has a default matching the values
//! an electrician would expect for a UK domestic installation, so a
//! settings file only needs to list the fields it changes.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::from_json_str(r#"{ "labour_rate_per_hour": 52.0 }"#).unwrap();
//! assert_eq!(settings.labour_rate_per_hour, 52.0);
//! assert_eq!(settings.zs_limit_ohm, 1.5);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Regulation edition the tables approximate
pub const DEFAULT_REGULATIONS: &str = "BS 7671:2018+A2:2022";

/// Engine-wide design settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Regulation edition reported in guidance text
    pub regulations: String,

    /// Voltage-drop limit for lighting circuits (%)
    pub vd_limit_lighting_percent: f64,

    /// Voltage-drop limit for all other circuits (%)
    pub vd_limit_other_percent: f64,

    /// Earth-fault loop impedance ceiling used as a disconnection-time proxy (Ω)
    pub zs_limit_ohm: f64,

    /// Multiplier on Ib when picking the device rating
    pub device_margin: f64,

    /// Multiplier on run length for cable ordering
    pub wastage_factor: f64,

    /// Labour rate (currency units per hour)
    pub labour_rate_per_hour: f64,

    /// Minimum labour hours charged
    pub min_labour_hours: f64,

    /// Maximum labour hours charged for a single circuit
    pub max_labour_hours: f64,

    /// Metres of cable installed per labour hour
    pub metres_per_labour_hour: f64,

    /// ISO currency code for cost output
    pub currency: String,

    /// Safety margin below which a warning is raised (%)
    pub low_margin_percent: f64,

    /// Safety margin above which downsizing is suggested (%)
    pub high_margin_percent: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            regulations: DEFAULT_REGULATIONS.to_string(),
            vd_limit_lighting_percent: 3.0,
            vd_limit_other_percent: 5.0,
            zs_limit_ohm: 1.5,
            device_margin: 1.1,
            wastage_factor: 1.1,
            labour_rate_per_hour: 45.0,
            min_labour_hours: 1.5,
            max_labour_hours: 3.0,
            metres_per_labour_hour: 8.0,
            currency: "GBP".to_string(),
            low_margin_percent: 10.0,
            high_margin_percent: 50.0,
        }
    }
}

impl DesignSettings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON document, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: DesignSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    ///
    /// # Returns
    ///
    /// * `Ok(DesignSettings)` - Parsed and validated settings
    /// * `Err(CalcError::FileError)` - File could not be read
    /// * `Err(CalcError::SerializationError)` - Invalid JSON
    /// * `Err(CalcError::InvalidInput)` - A limit is out of range
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CalcError::file_error("read settings", path.display().to_string(), e.to_string())
        })?;

        let settings: DesignSettings = serde_json::from_str(&contents).map_err(|e| {
            CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
        })?;
        settings.validate()?;

        tracing::debug!(path = %path.display(), "loaded design settings");
        Ok(settings)
    }

    /// Reject settings that would make every calculation meaningless.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("vd_limit_lighting_percent", self.vd_limit_lighting_percent),
            ("vd_limit_other_percent", self.vd_limit_other_percent),
            ("zs_limit_ohm", self.zs_limit_ohm),
            ("metres_per_labour_hour", self.metres_per_labour_hour),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        if self.device_margin < 1.0 {
            return Err(CalcError::invalid_input(
                "device_margin",
                self.device_margin.to_string(),
                "Device margin below 1.0 would undersize the protective device",
            ));
        }
        if self.wastage_factor < 1.0 {
            return Err(CalcError::invalid_input(
                "wastage_factor",
                self.wastage_factor.to_string(),
                "Wastage factor cannot be below 1.0",
            ));
        }
        if self.min_labour_hours > self.max_labour_hours {
            return Err(CalcError::invalid_input(
                "min_labour_hours",
                self.min_labour_hours.to_string(),
                "Minimum labour hours exceed maximum labour hours",
            ));
        }
        Ok(())
    }

    /// Voltage-drop limit (%) for a circuit
    pub fn vd_limit_percent(&self, is_lighting: bool) -> f64 {
        if is_lighting {
            self.vd_limit_lighting_percent
        } else {
            self.vd_limit_other_percent
        }
    }
}
