//! Numeric building blocks.

pub mod dd;

pub use dd::DD;
