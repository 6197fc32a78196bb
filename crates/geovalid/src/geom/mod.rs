//! Planar geometry model and its segment-chain decomposition.
//!
//! - `types`: `Coord`, `Envelope` and the `Geometry` sum type.
//! - `chain`: `SegmentChain`, the per-check read-only view of a ring or line.
//! - `rand`: seeded star-shaped rings for tests and benches.

mod chain;
pub mod rand;
mod types;

pub use chain::{has_repeated_points, remove_repeated_points, SegmentChain};
pub use types::{
    coord, Coord, Envelope, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
