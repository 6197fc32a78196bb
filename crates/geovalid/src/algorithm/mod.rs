//! Geometric predicates and search drivers used by the checkers.
//!
//! - `orientation`: robust turn test (f64 filter, DD fallback) and ring orientation.
//! - `intersector`: segment–segment intersection topology and points.
//! - `boundary`: boundary node rules for closed line endpoints.
//! - `locate`: point-in-ring location.
//! - `node`: angular ordering of edges around a node.
//! - `sweep`: envelope sweep driving pairwise segment tests.

pub mod boundary;
pub mod intersector;
pub mod locate;
pub mod node;
pub mod orientation;
pub mod sweep;

pub use boundary::{BoundaryNodeRule, EndPoint, Mod2, MonovalentEndPoint, MultivalentEndPoint};
pub use intersector::{IntersectionKind, LineIntersector};
pub use locate::{locate_in_ring, Location};
pub use orientation::{is_ccw, orientation_index, Orientation};
pub use sweep::{segment_sweep, SegmentRef};
