//! Point location against a single ring by crossing-number counting.

use crate::geom::Coord;

use super::orientation::{orientation_index, Orientation};

/// Topological location of a point relative to an areal ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

/// Locate `p` against the closed ring `ring`.
///
/// Counts crossings of the rightward ray from `p` with the ring edges. Edges
/// that straddle the ray are tested with the robust orientation predicate, so
/// points arbitrarily close to an edge are classified consistently.
pub fn locate_in_ring(p: Coord, ring: &[Coord]) -> Location {
    let mut crossings = 0usize;
    for w in ring.windows(2) {
        match count_segment(p, w[0], w[1]) {
            Segment::OnBoundary => return Location::Boundary,
            Segment::Crosses => crossings += 1,
            Segment::Misses => {}
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

enum Segment {
    OnBoundary,
    Crosses,
    Misses,
}

fn count_segment(p: Coord, p1: Coord, p2: Coord) -> Segment {
    // Entirely left of the ray origin.
    if p1.x < p.x && p2.x < p.x {
        return Segment::Misses;
    }
    if p == p2 {
        return Segment::OnBoundary;
    }
    // Horizontal segment on the ray line.
    if p1.y == p.y && p2.y == p.y {
        let (lo, hi) = if p1.x <= p2.x { (p1.x, p2.x) } else { (p2.x, p1.x) };
        if p.x >= lo && p.x <= hi {
            return Segment::OnBoundary;
        }
        return Segment::Misses;
    }
    // Half-open rule on y: upward edges include their start, downward their end.
    let straddles = (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y);
    if !straddles {
        return Segment::Misses;
    }
    let orient = orientation_index(p1, p2, p);
    if orient == Orientation::Collinear {
        return Segment::OnBoundary;
    }
    // Left of an upward edge or right of a downward one.
    let left = orient == Orientation::CounterClockwise;
    if left == (p2.y > p1.y) {
        Segment::Crosses
    } else {
        Segment::Misses
    }
}
