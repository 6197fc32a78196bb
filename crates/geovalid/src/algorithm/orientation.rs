//! Robust orientation predicate and ring orientation.
//!
//! `orientation_index` first evaluates the determinant in `f64` with a
//! forward error bound; only when the sign is not certain does it fall back
//! to double-double arithmetic.

use crate::cfg::DP_SAFE_EPSILON;
use crate::geom::Coord;
use crate::math::DD;

/// Turn direction of `q` relative to the directed line `p1 → p2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    #[inline]
    fn from_sign(s: i32) -> Self {
        match s {
            s if s > 0 => Orientation::CounterClockwise,
            s if s < 0 => Orientation::Clockwise,
            _ => Orientation::Collinear,
        }
    }

    /// -1, 0 or 1.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

/// Orientation of `q` with respect to the segment `p1 → p2`.
pub fn orientation_index(p1: Coord, p2: Coord, q: Coord) -> Orientation {
    if let Some(s) = orientation_filter(p1, p2, q) {
        return Orientation::from_sign(s);
    }
    let dx1 = DD::from(p2.x) - p1.x;
    let dy1 = DD::from(p2.y) - p1.y;
    let dx2 = DD::from(q.x) - p2.x;
    let dy2 = DD::from(q.y) - p2.y;
    Orientation::from_sign((dx1 * dy2 - dy1 * dx2).signum())
}

/// Fast `f64` determinant sign; `None` when round-off could flip it.
fn orientation_filter(pa: Coord, pb: Coord, pc: Coord) -> Option<i32> {
    let detleft = (pa.x - pc.x) * (pb.y - pc.y);
    let detright = (pa.y - pc.y) * (pb.x - pc.x);
    let det = detleft - detright;
    let detsum = if detleft > 0.0 {
        if detright <= 0.0 {
            return Some(signum(det));
        }
        detleft + detright
    } else if detleft < 0.0 {
        if detright >= 0.0 {
            return Some(signum(det));
        }
        -detleft - detright
    } else {
        return Some(signum(det));
    };
    let errbound = DP_SAFE_EPSILON * detsum;
    if det >= errbound || -det >= errbound {
        return Some(signum(det));
    }
    None
}

#[inline]
fn signum(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Twice the signed area of a closed ring, accumulated in double-double.
/// Positive for counter-clockwise rings.
pub fn signed_area_2x(ring: &[Coord]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    // Shift to the first vertex to keep the products small.
    let o = ring[0];
    let mut sum = DD::default();
    for w in ring.windows(2) {
        let (a, b) = (w[0] - o, w[1] - o);
        sum += DD::from(a.x) * b.y - DD::from(b.x) * a.y;
    }
    sum.value()
}

/// True if the closed ring is oriented counter-clockwise.
#[inline]
pub fn is_ccw(ring: &[Coord]) -> bool {
    signed_area_2x(ring) > 0.0
}
