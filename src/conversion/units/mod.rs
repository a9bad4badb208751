//! Quantity parsing and unit conversion.
//!
//! The engine is built around an immutable [`UnitRegistry`] constructed once
//! at startup and passed into the orchestrators. The registry owns the unit
//! definitions, the alias table used by the expression parser, and the
//! bidirectional pair map that picks default conversion targets.

pub mod convert;
pub mod expr;
pub mod pairs;
pub mod registry;

use rust_decimal::Decimal;

pub use convert::{convert_measurement, QuantityError, QuantityOutcome};
pub use registry::{Dimension, UnitId, UnitRegistry};

/// A parsed physical quantity: a decimal magnitude in some registry unit.
///
/// Magnitudes are decimals rather than binary floats so user-facing output
/// never picks up representation artifacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub magnitude: Decimal,
    pub unit: UnitId,
}
