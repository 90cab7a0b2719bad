//! # Price Lists
//!
//! Retail prices (GBP, 2025 UK trade counter) for cable, protective devices
//! and sundries. Cable prices are keyed by `(CableType, ConductorSize)`;
//! a missing key falls back to the nearest smaller tabulated size of the
//! same construction, or its smallest size if none is smaller.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::sizes::ConductorSize;
use super::types::CableType;

/// Unit prices for sundries and containment (GBP each unless noted)
pub mod unit_prices {
    /// Grommets and cable entry protection (pack)
    pub const GROMMETS: f64 = 2.50;
    /// Wago-style connectors / terminal blocks (pack)
    pub const CONNECTORS: f64 = 4.20;
    /// Standard plastic cable clip
    pub const CLIP: f64 = 0.08;
    /// Fire-rated metal P-clip
    pub const FIRE_CLIP: f64 = 0.35;
    /// Armoured cable cleat
    pub const CLEAT: f64 = 0.45;
    /// Armoured cable gland (CW type)
    pub const SWA_GLAND: f64 = 6.85;
    /// Banjo earth washer
    pub const BANJO_WASHER: f64 = 0.85;
    /// Gland lockring
    pub const LOCKRING: f64 = 0.45;
    /// PVC gland shroud
    pub const SHROUD: f64 = 0.65;
    /// Underground warning tape (per metre)
    pub const WARNING_TAPE_PER_M: f64 = 0.15;
    /// Cable route marker post
    pub const MARKER_POST: f64 = 12.50;
    /// MICC pot, seal and gland kit
    pub const MICC_TERMINATION: f64 = 7.95;
    /// Aluminium-rated gland and bimetallic lug kit
    pub const ALUMINIUM_TERMINATION: f64 = 24.50;
    /// Intumescent fire sealant (310 ml)
    pub const INTUMESCENT_SEALANT: f64 = 9.95;
    /// Stainless steel fire-rated cable ties (pack of 100)
    pub const FIRE_TIES: f64 = 12.50;
    /// "DO NOT SWITCH OFF" label
    pub const SAFETY_LABEL: f64 = 1.50;
    /// 20 mm PVC conduit (3 m length)
    pub const CONDUIT_LENGTH: f64 = 2.95;
    /// Conduit coupler
    pub const CONDUIT_COUPLER: f64 = 0.35;
    /// Conduit saddle
    pub const CONDUIT_SADDLE: f64 = 0.15;
    /// 38 × 25 mm PVC trunking (3 m length)
    pub const TRUNKING_LENGTH: f64 = 6.50;
    /// Trunking coupler
    pub const TRUNKING_COUPLER: f64 = 0.60;
    /// Trunking fixing screws and plugs (pack)
    pub const TRUNKING_FIXINGS: f64 = 3.00;
}

/// Cable retail price per metre
static CABLE_PRICES: Lazy<HashMap<(CableType, ConductorSize), f64>> = Lazy::new(|| {
    use CableType::*;
    use ConductorSize::*;

    let rows: &[(CableType, &[(ConductorSize, f64)])] = &[
        (
            PvcTwinEarth,
            &[(Mm1_0, 1.20), (Mm1_5, 1.45), (Mm2_5, 2.25), (Mm4, 3.35), (Mm6, 5.25), (Mm10, 8.75)],
        ),
        (
            XlpeTwinEarth,
            &[(Mm1_0, 1.38), (Mm1_5, 1.67), (Mm2_5, 2.59), (Mm4, 3.85), (Mm6, 6.04), (Mm10, 10.06)],
        ),
        (
            PvcSingle,
            &[
                (Mm1_0, 0.55), (Mm1_5, 0.65), (Mm2_5, 0.95), (Mm4, 1.35), (Mm6, 1.95), (Mm10, 3.05),
                (Mm16, 4.65), (Mm25, 6.95), (Mm35, 9.75), (Mm50, 13.45), (Mm70, 20.35), (Mm95, 27.05),
                (Mm120, 34.85), (Mm150, 44.05), (Mm185, 54.65), (Mm240, 71.25), (Mm300, 90.65),
                (Mm400, 118.35),
            ],
        ),
        (
            XlpeSingle,
            &[
                (Mm1_5, 0.95), (Mm2_5, 1.35), (Mm4, 1.95), (Mm6, 2.75), (Mm10, 4.35), (Mm16, 6.65),
                (Mm25, 9.95), (Mm35, 14.05), (Mm50, 19.35), (Mm70, 29.25), (Mm95, 38.95), (Mm120, 50.25),
                (Mm150, 63.45), (Mm185, 78.65), (Mm240, 102.45), (Mm300, 130.45),
            ],
        ),
        (
            FireRated,
            &[
                (Mm1_5, 5.45), (Mm2_5, 7.95), (Mm4, 11.95), (Mm6, 18.15), (Mm10, 27.45), (Mm16, 42.15),
                (Mm25, 64.45), (Mm35, 91.65), (Mm50, 130.65), (Mm70, 195.95), (Mm95, 261.85),
                (Mm120, 337.05), (Mm150, 418.45), (Mm185, 514.85), (Mm240, 668.85),
            ],
        ),
        (
            Swa,
            &[
                (Mm1_5, 3.35), (Mm2_5, 4.45), (Mm4, 6.35), (Mm6, 9.35), (Mm10, 14.25), (Mm16, 21.65),
                (Mm25, 33.95), (Mm35, 47.35), (Mm50, 65.95), (Mm70, 98.95), (Mm95, 132.25),
                (Mm120, 171.35), (Mm150, 214.25), (Mm185, 266.65), (Mm240, 348.15), (Mm300, 444.55),
                (Mm400, 581.55),
            ],
        ),
        (
            Micc,
            &[
                (Mm1_0, 11.95), (Mm1_5, 14.45), (Mm2_5, 19.55), (Mm4, 26.75), (Mm6, 35.05), (Mm10, 45.75),
                (Mm16, 60.45), (Mm25, 79.35),
            ],
        ),
        (
            AluminiumXlpe,
            &[
                (Mm16, 9.75), (Mm25, 15.30), (Mm35, 21.30), (Mm50, 29.70), (Mm70, 44.55), (Mm95, 59.50),
                (Mm120, 77.10), (Mm150, 96.40), (Mm185, 120.00), (Mm240, 156.65), (Mm300, 200.05),
            ],
        ),
    ];

    rows.iter()
        .flat_map(|(cable, prices)| prices.iter().map(move |(size, price)| ((*cable, *size), *price)))
        .collect()
});

/// A looked-up price and whether it came from a neighbouring size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLookup {
    pub price: f64,
    pub fallback: bool,
}

/// Retail price per metre for a cable
pub fn cable_price_per_metre(cable_type: CableType, size: ConductorSize) -> PriceLookup {
    if let Some(price) = CABLE_PRICES.get(&(cable_type, size)) {
        return PriceLookup { price: *price, fallback: false };
    }

    let nearest_below = ConductorSize::ALL
        .iter()
        .rev()
        .filter(|s| **s < size)
        .find_map(|s| CABLE_PRICES.get(&(cable_type, *s)));
    let smallest = || {
        ConductorSize::ALL
            .iter()
            .find_map(|s| CABLE_PRICES.get(&(cable_type, *s)))
    };

    let price = nearest_below.or_else(smallest).copied().unwrap_or(0.0);
    tracing::warn!(cable = %cable_type, size = %size, price, "no list price for size, using neighbouring size");
    PriceLookup { price, fallback: true }
}

/// Retail price of a Type B MCB by rating
pub fn device_price(rating_a: u32) -> f64 {
    match rating_a {
        0..=20 => 4.85,
        21..=32 => 5.25,
        33..=40 => 6.45,
        41..=50 => 7.95,
        51..=63 => 9.45,
        64..=80 => 24.50,
        _ => 29.50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_prices() {
        let p = cable_price_per_metre(CableType::PvcTwinEarth, ConductorSize::Mm2_5);
        assert_eq!(p, PriceLookup { price: 2.25, fallback: false });
        assert_eq!(cable_price_per_metre(CableType::Swa, ConductorSize::Mm4).price, 6.35);
        assert_eq!(cable_price_per_metre(CableType::FireRated, ConductorSize::Mm1_5).price, 5.45);
    }

    #[test]
    fn test_every_available_size_is_priced() {
        for cable in CableType::ALL {
            for size in cable.available_sizes() {
                assert!(!cable_price_per_metre(cable, size).fallback, "{cable} {size}");
            }
        }
    }

    #[test]
    fn test_fallback_uses_nearest_smaller_size() {
        let p = cable_price_per_metre(CableType::PvcTwinEarth, ConductorSize::Mm16);
        assert!(p.fallback);
        assert_eq!(p.price, 8.75);
    }

    #[test]
    fn test_fallback_below_smallest_size() {
        let p = cable_price_per_metre(CableType::AluminiumXlpe, ConductorSize::Mm6);
        assert!(p.fallback);
        assert_eq!(p.price, 9.75);
    }

    #[test]
    fn test_device_prices_rise_with_rating() {
        let ratings = [6, 10, 16, 20, 25, 32, 40, 50, 63, 80, 100];
        for pair in ratings.windows(2) {
            assert!(device_price(pair[0]) <= device_price(pair[1]));
        }
    }
}
