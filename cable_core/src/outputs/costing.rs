//! # Cost Estimate
//!
//! Rolls the materials list up into five breakdown lines and adds labour.
//!
//! ```text
//! labour hours = clamp(L / 8, 1.5, 3.0)
//! labour       = hours × rate
//! materials    = Σ rounded material lines
//! total        = materials + labour
//! ```
//!
//! Every line is rounded to whole currency units before summing, so the
//! breakdown always adds up exactly to the total shown.

use serde::{Deserialize, Serialize};

use super::materials::{MaterialCategory, MaterialItem};
use crate::settings::DesignSettings;

/// Breakdown line kinds, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostLineKind {
    Cable,
    ProtectiveDevice,
    Accessories,
    ClipsAndFixings,
    Labour,
}

impl CostLineKind {
    pub const ALL: [CostLineKind; 5] = [
        CostLineKind::Cable,
        CostLineKind::ProtectiveDevice,
        CostLineKind::Accessories,
        CostLineKind::ClipsAndFixings,
        CostLineKind::Labour,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CostLineKind::Cable => "Cable",
            CostLineKind::ProtectiveDevice => "Protective device",
            CostLineKind::Accessories => "Accessories",
            CostLineKind::ClipsAndFixings => "Clips & fixings",
            CostLineKind::Labour => "Labour",
        }
    }

    /// Breakdown line a material category rolls up into
    pub fn for_category(category: MaterialCategory) -> Self {
        match category {
            MaterialCategory::Cable => CostLineKind::Cable,
            MaterialCategory::Protection => CostLineKind::ProtectiveDevice,
            MaterialCategory::Accessory | MaterialCategory::Labelling => CostLineKind::Accessories,
            MaterialCategory::Fixing | MaterialCategory::Containment => CostLineKind::ClipsAndFixings,
        }
    }
}

/// One rounded breakdown line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub kind: CostLineKind,
    pub label: String,

    /// Whole currency units
    pub amount: f64,
}

/// Cost estimate for one circuit (whole currency units)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub materials: f64,
    pub labour: f64,
    pub total: f64,
    pub labour_hours: f64,
    pub currency: String,
    pub breakdown: Vec<CostLine>,
}

impl CostEstimate {
    /// Amount on one breakdown line
    pub fn line(&self, kind: CostLineKind) -> f64 {
        self.breakdown
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.amount)
            .unwrap_or(0.0)
    }

    /// Format as a short block of text
    pub fn format_report(&self) -> String {
        let symbol = currency_symbol(&self.currency);
        let mut out = String::new();
        for line in &self.breakdown {
            out.push_str(&format!("  {:<20} {}{:>6.0}\n", line.label, symbol, line.amount));
        }
        out.push_str(&format!("  {:<20} {}{:>6.0}\n", "Total", symbol, self.total));
        out.push_str(&format!("  ({:.1} labour hours)\n", self.labour_hours));
        out
    }
}

fn currency_symbol(code: &str) -> String {
    match code {
        "GBP" => "£".to_string(),
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        other => format!("{} ", other),
    }
}

/// Labour hours for a run: `L / metres_per_hour`, clamped to the settings range
pub fn labour_hours(length_m: f64, settings: &DesignSettings) -> f64 {
    (length_m / settings.metres_per_labour_hour)
        .max(settings.min_labour_hours)
        .min(settings.max_labour_hours)
}

/// Price a materials list and add labour.
///
/// # Example
///
/// ```rust
/// use cable_core::outputs::costing::estimate_cost;
/// use cable_core::outputs::materials::{MaterialCategory, MaterialItem};
/// use cable_core::settings::DesignSettings;
///
/// let materials = vec![
///     MaterialItem::new("2.5mm² cable", MaterialCategory::Cable, 22.0, "m", 2.25),
///     MaterialItem::new("20A Type B MCB", MaterialCategory::Protection, 1.0, "each", 4.85),
/// ];
/// let estimate = estimate_cost(&materials, 20.0, &DesignSettings::default());
/// assert_eq!(estimate.labour_hours, 2.5);
/// assert_eq!(estimate.total, estimate.materials + estimate.labour);
/// ```
pub fn estimate_cost(materials: &[MaterialItem], cable_length_m: f64, settings: &DesignSettings) -> CostEstimate {
    let hours = labour_hours(cable_length_m, settings);
    let labour = (hours * settings.labour_rate_per_hour).round();

    let breakdown: Vec<CostLine> = CostLineKind::ALL
        .iter()
        .map(|kind| {
            let raw = if *kind == CostLineKind::Labour {
                labour
            } else {
                materials
                    .iter()
                    .filter(|item| CostLineKind::for_category(item.category) == *kind)
                    .map(|item| item.total_cost)
                    .sum::<f64>()
            };
            CostLine {
                kind: *kind,
                label: kind.display_name().to_string(),
                amount: raw.round(),
            }
        })
        .collect();

    let materials_total: f64 = breakdown
        .iter()
        .filter(|l| l.kind != CostLineKind::Labour)
        .map(|l| l.amount)
        .sum();

    CostEstimate {
        materials: materials_total,
        labour,
        total: materials_total + labour,
        labour_hours: hours,
        currency: settings.currency.clone(),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<MaterialItem> {
        vec![
            MaterialItem::new("6mm² cable", MaterialCategory::Cable, 20.0, "m", 6.04),
            MaterialItem::new("50A Type B MCB", MaterialCategory::Protection, 1.0, "each", 7.95),
            MaterialItem::new("Grommets", MaterialCategory::Accessory, 1.0, "pack", 2.50),
            MaterialItem::new("Connectors", MaterialCategory::Accessory, 1.0, "pack", 4.20),
            MaterialItem::new("Clips", MaterialCategory::Fixing, 47.0, "each", 0.08),
            MaterialItem::new("Label", MaterialCategory::Labelling, 2.0, "each", 1.50),
        ]
    }

    #[test]
    fn test_labour_clamped() {
        let settings = DesignSettings::default();
        assert_eq!(labour_hours(4.0, &settings), 1.5);
        assert_eq!(labour_hours(20.0, &settings), 2.5);
        assert_eq!(labour_hours(100.0, &settings), 3.0);
    }

    #[test]
    fn test_breakdown_lines() {
        let estimate = estimate_cost(&items(), 18.0, &DesignSettings::default());
        // 120.8 → 121
        assert_eq!(estimate.line(CostLineKind::Cable), 121.0);
        assert_eq!(estimate.line(CostLineKind::ProtectiveDevice), 8.0);
        // 2.50 + 4.20 + 3.00 = 9.70
        assert_eq!(estimate.line(CostLineKind::Accessories), 10.0);
        // 3.76 → 4
        assert_eq!(estimate.line(CostLineKind::ClipsAndFixings), 4.0);
        // 18 / 8 = 2.25 h × 45 = 101.25
        assert_eq!(estimate.labour, 101.0);
        assert_eq!(estimate.line(CostLineKind::Labour), 101.0);
        assert_eq!(estimate.breakdown.len(), 5);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let estimate = estimate_cost(&items(), 33.0, &DesignSettings::default());
        let sum: f64 = estimate.breakdown.iter().map(|l| l.amount).sum();
        assert_eq!(sum, estimate.total);
        assert_eq!(estimate.materials + estimate.labour, estimate.total);
    }

    #[test]
    fn test_custom_labour_rate() {
        let settings = DesignSettings {
            labour_rate_per_hour: 60.0,
            ..DesignSettings::default()
        };
        let estimate = estimate_cost(&[], 8.0, &settings);
        assert_eq!(estimate.labour, 90.0);
        assert_eq!(estimate.materials, 0.0);
        assert_eq!(estimate.total, 90.0);
    }

    #[test]
    fn test_report() {
        let report = estimate_cost(&items(), 18.0, &DesignSettings::default()).format_report();
        assert!(report.contains("Clips & fixings"));
        assert!(report.contains("£"));
        assert!(report.contains("Total"));
    }
}
