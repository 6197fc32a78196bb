//! Topology of polygonal areas: invalid ring intersections, double touches
//! and interior disconnection.
//!
//! The analyzer decomposes every non-empty ring into a chain and sweeps all
//! segment pairs once. A pair is invalid when the rings cross (properly, by
//! collinear overlap, or at a node where the edges interleave) or when a ring
//! touches itself and inverted rings are not allowed. Single touches between
//! rings of one polygon are recorded in a [`RingGraph`] so the interior
//! connectivity can be queried afterwards.

use std::ops::ControlFlow;

use tracing::trace;

use crate::algorithm::intersector::point_on_segment;
use crate::algorithm::node::{is_crossing, is_interior_segment};
use crate::algorithm::{is_ccw, locate_in_ring, segment_sweep, LineIntersector, Location, SegmentRef};
use crate::geom::{Coord, Polygon, SegmentChain};

use super::error::ErrorCode;
use super::ring::RingGraph;

/// Area topology of one polygon, a set of polygons, or a single ring.
pub struct PolygonTopologyAnalyzer<'a> {
    graph: RingGraph<'a>,
    invalid: Option<(ErrorCode, Coord)>,
    double_touch: Option<Coord>,
    disconnection: Option<Coord>,
}

impl<'a> PolygonTopologyAnalyzer<'a> {
    pub fn from_polygon(polygon: &'a Polygon, inverted_ring_valid: bool) -> Self {
        Self::from_polygons(std::slice::from_ref(polygon), inverted_ring_valid)
    }

    /// Analyze all rings of `polygons` together. Touch records are only kept
    /// for polygons with holes, or for every polygon when self-touching rings
    /// forming holes are allowed.
    pub fn from_polygons(polygons: &'a [Polygon], inverted_ring_valid: bool) -> Self {
        let mut graph = RingGraph::default();
        let mut chains = Vec::new();
        for poly in polygons.iter().filter(|p| !p.is_empty()) {
            let shell = (!poly.holes.is_empty() || inverted_ring_valid)
                .then(|| graph.add_shell(&poly.shell.coords));
            chains.push(SegmentChain::with_tag(&poly.shell.coords, shell));
            for hole in poly.holes.iter().filter(|h| !h.is_empty()) {
                let slot = shell.map(|s| graph.add_hole(&hole.coords, s));
                chains.push(SegmentChain::with_tag(&hole.coords, slot));
            }
        }
        Self::analyze(chains, graph, inverted_ring_valid)
    }

    /// Analyze one standalone ring. It never forms inverted holes.
    pub fn from_ring(ring: &'a [Coord]) -> Self {
        let chains = if ring.is_empty() {
            Vec::new()
        } else {
            vec![SegmentChain::new(ring)]
        };
        Self::analyze(chains, RingGraph::default(), false)
    }

    fn analyze(chains: Vec<SegmentChain<'a>>, mut graph: RingGraph<'a>, inverted_ring_valid: bool) -> Self {
        let mut scan = IntersectionScan {
            chains: &chains,
            graph: &mut graph,
            li: LineIntersector::new(),
            inverted_ring_valid,
            invalid: None,
            double_touch: None,
        };
        let _ = segment_sweep(&chains, |s0, s1| scan.process(s0, s1));
        let (invalid, double_touch) = (scan.invalid, scan.double_touch);
        trace!(
            rings = chains.len(),
            invalid = invalid.is_some(),
            double_touch = double_touch.is_some(),
            "area topology analyzed"
        );
        Self {
            graph,
            invalid,
            double_touch,
            disconnection: None,
        }
    }

    /// Rings cross or overlap, or a ring touches itself where it may not.
    #[inline]
    pub fn has_intersection(&self) -> bool {
        self.invalid.is_some()
    }

    /// `SelfIntersection` or `RingSelfIntersection`.
    #[inline]
    pub fn intersection_code(&self) -> Option<ErrorCode> {
        self.invalid.map(|(code, _)| code)
    }

    #[inline]
    pub fn intersection_location(&self) -> Option<Coord> {
        self.invalid.map(|(_, pt)| pt)
    }

    /// Two rings of one polygon touch at more than one point.
    #[inline]
    pub fn has_double_touch(&self) -> bool {
        self.double_touch.is_some()
    }

    #[inline]
    pub fn double_touch_location(&self) -> Option<Coord> {
        self.double_touch
    }

    /// A self-touch node of some ring pinches the interior. Only self-touches
    /// recorded with inverted rings allowed are considered.
    pub fn is_interior_disconnected_by_self_touch(&mut self) -> bool {
        if self.graph.is_empty() {
            return false;
        }
        self.disconnection = self.graph.find_interior_self_node();
        self.disconnection.is_some()
    }

    /// The rings of some polygon touch in a cycle.
    pub fn is_interior_disconnected_by_ring_cycle(&mut self) -> bool {
        if self.graph.is_empty() {
            return false;
        }
        self.disconnection = self.graph.find_hole_cycle_location();
        self.disconnection.is_some()
    }

    /// Witness of the last positive disconnection query.
    #[inline]
    pub fn disconnection_location(&self) -> Option<Coord> {
        self.disconnection
    }

    /// First invalid self-intersection of a single ring.
    pub fn find_self_intersection(ring: &[Coord]) -> Option<Coord> {
        PolygonTopologyAnalyzer::from_ring(ring).intersection_location()
    }

    /// True if the segment `p0–p1` starts inside `ring`, or starts on its
    /// boundary and leaves `p0` towards the ring interior.
    pub fn is_segment_in_ring(p0: Coord, p1: Coord, ring: &[Coord]) -> bool {
        match locate_in_ring(p0, ring) {
            Location::Exterior => false,
            Location::Interior => true,
            Location::Boundary => is_incident_segment_in_ring(p0, p1, ring),
        }
    }

    /// True if ring `test` lies inside ring `target`. The rings must not cross.
    pub fn is_ring_nested(test: &[Coord], target: &[Coord]) -> bool {
        let Some(&p0) = test.first() else {
            return false;
        };
        match locate_in_ring(p0, target) {
            Location::Exterior => false,
            Location::Interior => true,
            Location::Boundary => {
                let p1 = test[1..]
                    .iter()
                    .take(test.len().saturating_sub(2))
                    .find(|p| **p != p0)
                    .copied()
                    .unwrap_or(p0);
                is_incident_segment_in_ring(p0, p1, target)
            }
        }
    }
}

/// Decides by the corner of `ring` at `p0` whether `p0 → p1` points inside.
fn is_incident_segment_in_ring(p0: Coord, p1: Coord, ring: &[Coord]) -> bool {
    let Some(index) = intersecting_seg_index(ring, p0) else {
        return false;
    };
    let mut prev = find_ring_vertex_prev(ring, index, p0);
    let mut next = find_ring_vertex_next(ring, index, p0);
    // The corner test wants the interior on the right.
    if is_ccw(ring) {
        std::mem::swap(&mut prev, &mut next);
    }
    is_interior_segment(p0, prev, next, p1)
}

/// Index of the ring segment containing `pt`; a vertex maps to the segment it starts.
fn intersecting_seg_index(ring: &[Coord], pt: Coord) -> Option<usize> {
    let last = ring.len().checked_sub(1)?;
    ring.windows(2).position(|w| point_on_segment(pt, w[0], w[1])).map(|i| {
        if pt == ring[i + 1] && i + 1 < last {
            i + 1
        } else {
            i
        }
    })
}

fn ring_index_prev(ring: &[Coord], index: usize) -> usize {
    if index == 0 {
        ring.len().saturating_sub(2)
    } else {
        index - 1
    }
}

fn ring_index_next(ring: &[Coord], index: usize) -> usize {
    if index + 2 >= ring.len() {
        0
    } else {
        index + 1
    }
}

fn find_ring_vertex_prev(ring: &[Coord], index: usize, node: Coord) -> Coord {
    let mut i = index;
    for _ in 0..ring.len() {
        if ring[i] != node {
            break;
        }
        i = ring_index_prev(ring, i);
    }
    ring[i]
}

fn find_ring_vertex_next(ring: &[Coord], index: usize, node: Coord) -> Coord {
    let mut i = (index + 1).min(ring.len() - 1);
    for _ in 0..ring.len() {
        if ring[i] != node {
            break;
        }
        i = ring_index_next(ring, i);
    }
    ring[i]
}

/// Per-pair state of one analyzer sweep.
struct IntersectionScan<'s, 'a> {
    chains: &'s [SegmentChain<'a>],
    graph: &'s mut RingGraph<'a>,
    li: LineIntersector,
    inverted_ring_valid: bool,
    invalid: Option<(ErrorCode, Coord)>,
    double_touch: Option<Coord>,
}

impl IntersectionScan<'_, '_> {
    fn process(&mut self, s0: SegmentRef, s1: SegmentRef) -> ControlFlow<()> {
        if s0 == s1 {
            return ControlFlow::Continue(());
        }
        if let Some(code) = self.find_invalid_intersection(s0, s1) {
            self.invalid = Some((code, self.li.intersection(0)));
        }
        if self.invalid.is_some() || self.double_touch.is_some() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn find_invalid_intersection(&mut self, s0: SegmentRef, s1: SegmentRef) -> Option<ErrorCode> {
        let chains = self.chains;
        let (c0, c1) = (&chains[s0.chain], &chains[s1.chain]);
        let (p00, p01) = c0.segment(s0.index);
        let (p10, p11) = c1.segment(s1.index);
        self.li.compute(p00, p01, p10, p11);
        if !self.li.has_intersection() {
            return None;
        }
        if self.li.is_proper() || self.li.intersection_num() >= 2 {
            return Some(ErrorCode::SelfIntersection);
        }
        let pt = self.li.intersection(0);
        let same_ring = s0.chain == s1.chain;
        if same_ring && is_adjacent_in_ring(c0, s0.index, s1.index) {
            return None;
        }
        if same_ring && !self.inverted_ring_valid {
            return Some(ErrorCode::RingSelfIntersection);
        }
        // Nodes at segment ends are handled by the pair of following segments.
        if pt == p01 || pt == p11 {
            return None;
        }
        let e00 = if pt == p00 { prev_in_ring(c0, s0.index) } else { p00 };
        let e10 = if pt == p10 { prev_in_ring(c1, s1.index) } else { p10 };
        if is_crossing(pt, e00, p01, e10, p11) {
            return Some(ErrorCode::SelfIntersection);
        }
        if same_ring {
            if let Some(ring) = c0.tag() {
                self.graph.add_self_touch(ring, pt, e00, p01, p11);
            }
        } else if self.graph.add_touch(c0.tag(), c1.tag(), pt) {
            self.double_touch = Some(pt);
        }
        None
    }
}

fn is_adjacent_in_ring(chain: &SegmentChain<'_>, i: usize, j: usize) -> bool {
    let delta = i.abs_diff(j);
    delta <= 1 || delta >= chain.len().saturating_sub(2)
}

fn prev_in_ring(chain: &SegmentChain<'_>, index: usize) -> Coord {
    if index == 0 {
        chain.coord(chain.len() - 2)
    } else {
        chain.coord(index - 1)
    }
}
