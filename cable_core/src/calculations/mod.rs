//! # Circuit Calculations
//!
//! The design sequence for one circuit, split the same way an electrician
//! works through it:
//!
//! - [`protection`] - Protective device selection (In ≥ Ib × 1.1)
//! - [`sizing`] - Conductor sizing against capacity and voltage drop
//! - [`engine`] - The full sequence: `calculate(plan) -> CalculationResult`
//!
//! All inputs and results are JSON-serializable.

pub mod engine;
pub mod protection;
pub mod sizing;

// Re-export commonly used types
pub use engine::{calculate, calculate_with_settings, CalculationResult, SizingFailure, SizingSuccess};
pub use protection::{DeviceKind, ProtectiveDevice, TripCurve, STANDARD_RATINGS};
pub use sizing::{diagnose_shortfall, size_cable, SelectionReason, SizingOutcome, SizingParams, SizingShortfall};
