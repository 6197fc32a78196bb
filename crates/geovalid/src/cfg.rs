//! Fixed constants shared by the predicates and checkers (internal).
//!
//! Policy
//! - Tolerances are compile-time constants. Exact predicates need none; the only
//!   epsilon is the error bound of the orientation fast path.

/// Relative error bound for the `f64` orientation filter; above it the sign is trusted.
pub(crate) const DP_SAFE_EPSILON: f64 = 1e-15;
/// Minimum number of non-repeated points of a LineString.
pub(crate) const MIN_SIZE_LINESTRING: usize = 2;
/// Minimum number of non-repeated points of a ring (including the closing point).
pub(crate) const MIN_SIZE_RING: usize = 4;
