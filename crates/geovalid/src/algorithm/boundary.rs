//! Boundary node rules: which line endpoints belong to the boundary.
//!
//! A rule answers whether a point that is the endpoint of `count` line
//! components lies on the boundary. Simplicity only asks the question once,
//! for `count == 2` (the start and end of a closed line).

/// Decides boundary membership from the number of incident line endpoints.
pub trait BoundaryNodeRule {
    fn is_in_boundary(&self, count: usize) -> bool;
}

/// OGC SFS rule: a point is on the boundary iff it is an endpoint an odd number of times.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mod2;

/// Every endpoint is on the boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct EndPoint;

/// Only endpoints shared by more than one line are on the boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultivalentEndPoint;

/// Only endpoints of exactly one line are on the boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonovalentEndPoint;

impl BoundaryNodeRule for Mod2 {
    #[inline]
    fn is_in_boundary(&self, count: usize) -> bool {
        count % 2 == 1
    }
}

impl BoundaryNodeRule for EndPoint {
    #[inline]
    fn is_in_boundary(&self, count: usize) -> bool {
        count > 0
    }
}

impl BoundaryNodeRule for MultivalentEndPoint {
    #[inline]
    fn is_in_boundary(&self, count: usize) -> bool {
        count > 1
    }
}

impl BoundaryNodeRule for MonovalentEndPoint {
    #[inline]
    fn is_in_boundary(&self, count: usize) -> bool {
        count == 1
    }
}
