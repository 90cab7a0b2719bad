//! # Protective Device Selection
//!
//! Picks the overcurrent device for a circuit from the standard MCB
//! ratings. The rating must cover the design current with a margin:
//!
//! ```text
//! In ≥ Ib × margin      (margin = 1.1 by default)
//! ```
//!
//! If no standard rating is large enough the largest is returned and the
//! caller reports the shortfall.

use serde::{Deserialize, Serialize};

/// Standard MCB ratings (A), ascending
pub const STANDARD_RATINGS: [u32; 11] = [6, 10, 16, 20, 25, 32, 40, 50, 63, 80, 100];

/// Nominal supply voltage to earth U0 used for the advisory Zs maximum (V)
pub const NOMINAL_U0: f64 = 230.0;

/// Multiplier applied to tabulated maximum Zs for values measured at ambient
pub const MEASURED_ZS_FACTOR: f64 = 0.8;

/// MCB tripping characteristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TripCurve {
    /// Trips instantaneously at 3-5 × In
    #[default]
    TypeB,
}

impl TripCurve {
    /// Multiple of In guaranteeing instantaneous disconnection
    pub fn instantaneous_multiple(&self) -> f64 {
        match self {
            TripCurve::TypeB => 5.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TripCurve::TypeB => "Type B",
        }
    }
}

/// Device kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeviceKind {
    #[default]
    Mcb,
}

impl DeviceKind {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            DeviceKind::Mcb => "MCB",
        }
    }
}

/// Overcurrent protective device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtectiveDevice {
    /// Nominal rating In (A)
    pub rating_a: u32,
    pub curve: TripCurve,
    pub kind: DeviceKind,
}

impl ProtectiveDevice {
    /// Type B MCB of the given rating
    pub fn type_b_mcb(rating_a: u32) -> Self {
        ProtectiveDevice {
            rating_a,
            curve: TripCurve::TypeB,
            kind: DeviceKind::Mcb,
        }
    }

    /// Smallest standard Type B MCB with `In ≥ Ib × margin`, else the largest.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cable_core::calculations::protection::ProtectiveDevice;
    ///
    /// let device = ProtectiveDevice::select(41.3, 1.1);
    /// assert_eq!(device.to_string(), "50A Type B MCB");
    /// ```
    pub fn select(design_current: f64, margin: f64) -> Self {
        let required = design_current * margin;
        let rating = STANDARD_RATINGS
            .iter()
            .copied()
            .find(|r| f64::from(*r) >= required)
            .unwrap_or(STANDARD_RATINGS[STANDARD_RATINGS.len() - 1]);
        Self::type_b_mcb(rating)
    }

    /// Nominal rating In as a float
    pub fn rating(&self) -> f64 {
        f64::from(self.rating_a)
    }

    /// Device rating covers the design current (Ib ≤ In)
    pub fn covers(&self, design_current: f64) -> bool {
        self.rating() >= design_current
    }

    /// Advisory maximum measured Zs for 0.4 s disconnection (Ω).
    ///
    /// ```text
    /// Zs_max = 0.8 × U0 / (k × In)     k = 5 for Type B, 10 for Type C
    /// ```
    pub fn max_zs_ohm(&self) -> f64 {
        MEASURED_ZS_FACTOR * NOMINAL_U0 / (self.curve.instantaneous_multiple() * self.rating())
    }
}

impl std::fmt::Display for ProtectiveDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}A {} {}", self.rating_a, self.curve.display_name(), self.kind.abbreviation())
    }
}
