//! # Cable Catalogue
//!
//! Everything the engine knows about cables: sizes, constructions,
//! reference installation methods, rating tables, correction factors,
//! impedance data, prices and the construction-selection heuristic.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::cables::{capacity, CableType, ConductorSize, DeratingFactors, InstallationMethod};
//!
//! let rating = capacity(CableType::PvcTwinEarth, ConductorSize::Mm2_5, InstallationMethod::C).unwrap();
//! let factors = DeratingFactors::for_environment(35.0, 2, CableType::PvcTwinEarth.insulation());
//! let iz = factors.apply(rating.amps);
//! assert!(iz < rating.amps);
//! ```

pub mod capacity;
pub mod derating;
pub mod impedance;
pub mod methods;
pub mod pricing;
pub mod selection;
pub mod sizes;
pub mod types;

pub use capacity::{capacity, tabulated_capacity, CapacityLookup};
pub use derating::{
    bs7671_ref, grouping_factor, installation_method_factor, temperature_factor, DeratingFactors, DeratingSummary,
};
pub use impedance::{
    earth_fault_loop_impedance, mv_per_amp_metre, r1_plus_r2_per_metre, voltage_drop_volts, TableValue,
};
pub use methods::InstallationMethod;
pub use pricing::{cable_price_per_metre, device_price, unit_prices};
pub use selection::{select_optimal_cable_type, CableSelection, SelectionContext};
pub use sizes::ConductorSize;
pub use types::{CableType, ConductorMaterial, Insulation};
