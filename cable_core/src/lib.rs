//! # cable_core - BS 7671 Cable Selection Engine
//!
//! `cable_core` sizes a single circuit to BS 7671: it chooses a cable
//! construction, a protective device and a conductor size, checks voltage
//! drop and earth-fault loop impedance, and produces a priced materials
//! list with site guidance. All inputs and outputs are JSON-serializable,
//! making it easy to drive from an assistant or a web front end.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a plan and return a result
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Never throws**: "no cable fits" is a result, not an error
//! - **Traceable**: Every table fallback is logged through `tracing`
//!
//! ## Quick Start
//!
//! ```rust
//! use cable_core::{calculate, InstallationPlan};
//!
//! let plan = InstallationPlan::new("Electric shower", 9500.0, 230.0, 18.0);
//! let result = calculate(&plan);
//!
//! assert!(result.is_success());
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("\"outcome\": \"success\""));
//! ```
//!
//! ## Modules
//!
//! - [`plan`] - The circuit to size
//! - [`environment`] - Ambient, grouping and earthing conditions
//! - [`classification`] - One-time classification of a plan
//! - [`cables`] - Cable catalogue, rating tables and correction factors
//! - [`calculations`] - Device selection, sizing and the engine
//! - [`outputs`] - Materials, guidance and cost estimate
//! - [`settings`] - Design limits and rates
//! - [`errors`] - Structured error types

pub mod cables;
pub mod calculations;
pub mod classification;
pub mod environment;
pub mod errors;
pub mod outputs;
pub mod plan;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use cables::{
    grouping_factor, installation_method_factor, select_optimal_cable_type, temperature_factor, CableType,
    ConductorSize, InstallationMethod,
};
pub use calculations::{calculate, calculate_with_settings, size_cable, CalculationResult};
pub use errors::{CalcError, CalcResult};
pub use plan::{InstallationPlan, Phases};
pub use settings::DesignSettings;
