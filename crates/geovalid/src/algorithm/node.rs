//! Angular ordering of edges around a shared node.
//!
//! Angles are measured counter-clockwise from the positive x-axis about the
//! node. Ordering first compares quadrants, then breaks ties with the robust
//! orientation predicate, so no trigonometry is involved.

use std::cmp::Ordering;

use crate::geom::Coord;

use super::orientation::{orientation_index, Orientation};

/// Quadrant of `p` around `origin`: 0 = NE, 1 = NW, 2 = SW, 3 = SE.
/// Axis-aligned directions fall into the quadrant they open
/// (+x → NE, +y → NE, -x → NW, -y → SE).
#[inline]
fn quadrant(origin: Coord, p: Coord) -> u8 {
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    match (dx >= 0.0, dy >= 0.0) {
        (true, true) => 0,
        (false, true) => 1,
        (false, false) => 2,
        (true, false) => 3,
    }
}

/// Compares the angles of `origin → p` and `origin → q`.
pub fn compare_angle(origin: Coord, p: Coord, q: Coord) -> Ordering {
    let (qp, qq) = (quadrant(origin, p), quadrant(origin, q));
    qp.cmp(&qq).then_with(|| match orientation_index(origin, q, p) {
        Orientation::CounterClockwise => Ordering::Greater,
        Orientation::Clockwise => Ordering::Less,
        Orientation::Collinear => Ordering::Equal,
    })
}

#[inline]
fn is_angle_greater(origin: Coord, p: Coord, q: Coord) -> bool {
    compare_angle(origin, p, q) == Ordering::Greater
}

/// `Some(true)` if `p` lies strictly inside the angle range `(e0, e1)`,
/// `Some(false)` if strictly outside, `None` if collinear with either edge.
fn compare_between(origin: Coord, p: Coord, e0: Coord, e1: Coord) -> Option<bool> {
    let c0 = compare_angle(origin, p, e0);
    if c0 == Ordering::Equal {
        return None;
    }
    let c1 = compare_angle(origin, p, e1);
    if c1 == Ordering::Equal {
        return None;
    }
    Some(c0 == Ordering::Greater && c1 == Ordering::Less)
}

fn is_between(origin: Coord, p: Coord, e0: Coord, e1: Coord) -> bool {
    is_angle_greater(origin, p, e0) && !is_angle_greater(origin, p, e1)
}

/// True if edge pair `a` (`node → a0`, `node → a1`) is crossed by edge pair `b`:
/// one `b` edge lies strictly inside the angle spanned by `a`, the other
/// strictly outside. Collinear edges are a touch, not a crossing.
pub fn is_crossing(node: Coord, a0: Coord, a1: Coord, b0: Coord, b1: Coord) -> bool {
    let (lo, hi) = if is_angle_greater(node, a0, a1) {
        (a1, a0)
    } else {
        (a0, a1)
    };
    let Some(side0) = compare_between(node, b0, lo, hi) else {
        return false;
    };
    let Some(side1) = compare_between(node, b1, lo, hi) else {
        return false;
    };
    side0 != side1
}

/// True if the edge `node → b` lies in the interior angle between
/// `node → a0` and `node → a1`, taking the interior to be the region swept
/// counter-clockwise from `a0` to `a1`.
pub fn is_interior_segment(node: Coord, a0: Coord, a1: Coord, b: Coord) -> bool {
    let (lo, hi, interior_between) = if is_angle_greater(node, a0, a1) {
        (a1, a0, false)
    } else {
        (a0, a1, true)
    };
    is_between(node, b, lo, hi) == interior_between
}
