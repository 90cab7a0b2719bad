//! # Circuit Outputs
//!
//! What a successful sizing produces besides the electrical figures:
//!
//! - [`materials`] - Priced bill of materials
//! - [`guidance`] - Ordered site guidance sections
//! - [`costing`] - Cost breakdown with labour

pub mod costing;
pub mod guidance;
pub mod materials;

pub use costing::{estimate_cost, CostEstimate, CostLine, CostLineKind};
pub use guidance::{generate_guidance, GuidanceContext, GuidanceSection};
pub use materials::{generate_materials, MaterialCategory, MaterialItem, MaterialsContext};
