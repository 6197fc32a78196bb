//! Segment–segment intersection with exact topology and DD intersection points.
//!
//! Topology (none / point / collinear overlap, proper or not) is decided with
//! the robust orientation predicate only. The coordinate of a proper crossing is
//! computed in double-double and falls back to the nearest input endpoint if
//! round-off pushes it outside both segment envelopes.

use crate::geom::{Coord, Envelope};
use crate::math::DD;

use super::orientation::{orientation_index, Orientation};

/// Number and shape of the intersection of two segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionKind {
    None,
    Point,
    Collinear,
}

/// Reusable intersector; `compute` overwrites the previous result.
#[derive(Clone, Debug)]
pub struct LineIntersector {
    kind: IntersectionKind,
    proper: bool,
    pts: [Coord; 2],
    input: [[Coord; 2]; 2],
}

impl Default for LineIntersector {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIntersector {
    pub fn new() -> Self {
        Self {
            kind: IntersectionKind::None,
            proper: false,
            pts: [Coord::zeros(); 2],
            input: [[Coord::zeros(); 2]; 2],
        }
    }

    /// Intersect segment `p1–p2` with segment `q1–q2`.
    pub fn compute(&mut self, p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> IntersectionKind {
        self.input = [[p1, p2], [q1, q2]];
        self.proper = false;
        self.kind = self.compute_intersect(p1, p2, q1, q2);
        self.kind
    }

    #[inline]
    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    #[inline]
    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    /// 0, 1 or 2.
    #[inline]
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    #[inline]
    pub fn intersection(&self, i: usize) -> Coord {
        self.pts[i]
    }

    /// Endpoint `vertex` (0 or 1) of input segment `segment` (0 or 1).
    #[inline]
    pub fn endpoint(&self, segment: usize, vertex: usize) -> Coord {
        self.input[segment][vertex]
    }

    /// Single crossing point in the interior of both segments.
    #[inline]
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    /// Some intersection point lies in the interior of either segment.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// Some intersection point is not an endpoint of input segment `segment`.
    pub fn is_interior_intersection_of(&self, segment: usize) -> bool {
        let [a, b] = self.input[segment];
        self.pts[..self.intersection_num()]
            .iter()
            .any(|p| *p != a && *p != b)
    }

    fn compute_intersect(&mut self, p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> IntersectionKind {
        if !Envelope::of_segment(p1, p2).intersects(&Envelope::of_segment(q1, q2)) {
            return IntersectionKind::None;
        }
        let pq1 = orientation_index(p1, p2, q1).sign();
        let pq2 = orientation_index(p1, p2, q2).sign();
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return IntersectionKind::None;
        }
        let qp1 = orientation_index(q1, q2, p1).sign();
        let qp2 = orientation_index(q1, q2, p2).sign();
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return IntersectionKind::None;
        }
        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return self.compute_collinear(p1, p2, q1, q2);
        }
        // At least one endpoint touches the other segment: the intersection is
        // that endpoint, preferring shared vertices.
        let p = if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            if p1 == q1 || p1 == q2 {
                p1
            } else if p2 == q1 || p2 == q2 {
                p2
            } else if pq1 == 0 {
                q1
            } else if pq2 == 0 {
                q2
            } else if qp1 == 0 {
                p1
            } else {
                p2
            }
        } else {
            self.proper = true;
            self.proper_intersection(p1, p2, q1, q2)
        };
        self.pts[0] = p;
        IntersectionKind::Point
    }

    fn compute_collinear(&mut self, p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> IntersectionKind {
        let env_p = Envelope::of_segment(p1, p2);
        let env_q = Envelope::of_segment(q1, q2);
        let q1_in_p = env_p.intersects_coord(q1);
        let q2_in_p = env_p.intersects_coord(q2);
        let p1_in_q = env_q.intersects_coord(p1);
        let p2_in_q = env_q.intersects_coord(p2);

        let (a, b, touch_only) = if q1_in_p && q2_in_p {
            (q1, q2, false)
        } else if p1_in_q && p2_in_q {
            (p1, p2, false)
        } else if q1_in_p && p1_in_q {
            (q1, p1, q1 == p1 && !q2_in_p && !p2_in_q)
        } else if q1_in_p && p2_in_q {
            (q1, p2, q1 == p2 && !q2_in_p && !p1_in_q)
        } else if q2_in_p && p1_in_q {
            (q2, p1, q2 == p1 && !q1_in_p && !p2_in_q)
        } else if q2_in_p && p2_in_q {
            (q2, p2, q2 == p2 && !q1_in_p && !p1_in_q)
        } else {
            return IntersectionKind::None;
        };
        self.pts = [a, b];
        if touch_only {
            IntersectionKind::Point
        } else {
            IntersectionKind::Collinear
        }
    }

    fn proper_intersection(&self, p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Coord {
        intersection_dd(p1, p2, q1, q2)
            .filter(|pt| {
                Envelope::of_segment(p1, p2).intersects_coord(*pt)
                    && Envelope::of_segment(q1, q2).intersects_coord(*pt)
            })
            .unwrap_or_else(|| nearest_endpoint(p1, p2, q1, q2))
    }
}

/// Intersection of the infinite lines through `p1–p2` and `q1–q2`, computed
/// in double-double. `None` for parallel lines or non-finite results.
pub fn intersection_dd(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Option<Coord> {
    let px = DD::from(p1.y) - p2.y;
    let py = DD::from(p2.x) - p1.x;
    let pw = DD::from(p1.x) * p2.y - DD::from(p2.x) * p1.y;

    let qx = DD::from(q1.y) - q2.y;
    let qy = DD::from(q2.x) - q1.x;
    let qw = DD::from(q1.x) * q2.y - DD::from(q2.x) * q1.y;

    let x = py * qw - qy * pw;
    let y = qx * pw - px * qw;
    let w = px * qy - qx * py;

    let x_int = (x / w).value();
    let y_int = (y / w).value();
    if !x_int.is_finite() || !y_int.is_finite() {
        return None;
    }
    Some(Coord::new(x_int, y_int))
}

/// True if `p` lies on the closed segment `p1–p2`.
pub fn point_on_segment(p: Coord, p1: Coord, p2: Coord) -> bool {
    Envelope::of_segment(p1, p2).intersects_coord(p)
        && orientation_index(p1, p2, p) == Orientation::Collinear
}

/// Euclidean distance from `p` to the closed segment `a–b`.
pub fn distance_point_segment(p: Coord, a: Coord, b: Coord) -> f64 {
    if a == b {
        return (p - a).norm();
    }
    let ab = b - a;
    let r = (p - a).dot(&ab) / ab.norm_squared();
    if r <= 0.0 {
        return (p - a).norm();
    }
    if r >= 1.0 {
        return (p - b).norm();
    }
    let cross = (a.y - p.y) * ab.x - (a.x - p.x) * ab.y;
    cross.abs() / ab.norm()
}

fn nearest_endpoint(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> Coord {
    let candidates = [
        (p1, distance_point_segment(p1, q1, q2)),
        (p2, distance_point_segment(p2, q1, q2)),
        (q1, distance_point_segment(q1, p1, p2)),
        (q2, distance_point_segment(q2, p1, p2)),
    ];
    let mut best = candidates[0];
    for c in &candidates[1..] {
        if c.1 < best.1 {
            best = *c;
        }
    }
    best.0
}
