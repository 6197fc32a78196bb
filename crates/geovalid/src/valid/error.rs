//! Validation error taxonomy.

use thiserror::Error;

use crate::geom::Coord;

/// Kind of topology failure. Variants are listed in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    /// A coordinate is NaN or infinite.
    #[error("Invalid Coordinate")]
    InvalidCoordinate,
    #[error("Ring is not closed")]
    RingNotClosed,
    /// Fewer distinct consecutive points than the component needs.
    #[error("Too few distinct points in geometry component")]
    TooFewPoints,
    #[error("Ring Self-intersection")]
    RingSelfIntersection,
    /// Rings cross, overlap, or touch in a way that crosses the area.
    #[error("Self-intersection")]
    SelfIntersection,
    /// Double touch, self-touch, or a cycle of touching rings.
    #[error("Interior is disconnected")]
    DisconnectedInterior,
    #[error("Hole lies outside shell")]
    HoleOutsideShell,
    #[error("Holes are nested")]
    NestedHoles,
    #[error("Nested shells")]
    NestedShells,
}

/// First failure found by a validity check, with its location.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("{code} at or near point ({}, {})", .coord.x, .coord.y)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub coord: Coord,
}

impl ValidationError {
    #[inline]
    pub fn new(code: ErrorCode, coord: Coord) -> Self {
        Self { code, coord }
    }

    /// Message without the location suffix.
    pub fn message(&self) -> String {
        self.code.to_string()
    }
}
