//! Simplicity and validity checks.
//!
//! - `simple`: `IsSimple` and the segment pair classifier `NonSimpleFinder`.
//! - `validity`: `IsValid`, the ordered validity checks.
//! - `analyzer`: area topology of polygon rings (crossings, touches, disconnection).
//! - `nested`: holes inside holes.
//! - `error`: `ValidationError` and its `ErrorCode` taxonomy.

mod analyzer;
mod error;
mod nested;
mod ring;
mod simple;
mod validity;

pub use analyzer::PolygonTopologyAnalyzer;
pub use error::{ErrorCode, ValidationError};
pub use nested::NestedHoleTester;
pub use simple::{is_simple, non_simple_location, IsSimple, NonSimpleFinder, SimpleCfg};
pub use validity::{is_valid, validation_error, IsValid, ValidCfg};

#[cfg(test)]
mod tests;
