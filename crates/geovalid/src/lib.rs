//! Planar geometry validity and simplicity.
//!
//! - `math`: double-double arithmetic backing the robust predicates.
//! - `geom`: coordinates, envelopes, the geometry sum type, segment chains and
//!   seeded random rings.
//! - `algorithm`: orientation, segment intersection, point-in-ring location,
//!   node topology, boundary node rules and the pairwise segment sweep.
//! - `valid`: `IsSimple` and `IsValid`.
//!
//! Invalid or non-simple input is an ordinary result: checkers return
//! verdicts and witness locations, never errors.

pub mod algorithm;
mod cfg;
pub mod geom;
pub mod math;
pub mod valid;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use valid::{is_simple, is_valid, non_simple_location, validation_error};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algorithm::{BoundaryNodeRule, EndPoint, Mod2, MonovalentEndPoint, MultivalentEndPoint};
    pub use crate::geom::{
        coord, Coord, Envelope, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString,
        MultiPoint, MultiPolygon, Point, Polygon,
    };
    pub use crate::math::DD;
    pub use crate::valid::{
        is_simple, is_valid, non_simple_location, validation_error, ErrorCode, IsSimple, IsValid,
        SimpleCfg, ValidCfg, ValidationError,
    };
}
