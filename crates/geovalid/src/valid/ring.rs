//! Touch graph over the rings of polygons.
//!
//! Each ring of a polygon that needs connectivity analysis gets a slot in an
//! arena. Rings of the same polygon share the slot of their shell. Two rings
//! touching at a single point form an edge of the graph; touching at two
//! different points disconnects the interior immediately, and a cycle of
//! single touches does so as well.

use std::collections::BTreeMap;

use crate::algorithm::is_ccw;
use crate::algorithm::node::is_interior_segment;
use crate::geom::Coord;

/// Point where a ring touches itself, with the two corners meeting there.
#[derive(Clone, Copy, Debug)]
struct SelfNode {
    node: Coord,
    e00: Coord,
    e01: Coord,
    e11: Coord,
}

impl SelfNode {
    /// The second corner points into the exterior: the touch encloses an
    /// inverted hole and leaves the interior connected.
    fn is_exterior(&self, interior_on_right: bool) -> bool {
        let interior_seg = is_interior_segment(self.node, self.e00, self.e01, self.e11);
        interior_seg != interior_on_right
    }
}

#[derive(Clone, Debug)]
struct PolygonRing<'a> {
    coords: &'a [Coord],
    shell: usize,
    /// Other ring slot → the single point where the two rings touch.
    touches: BTreeMap<usize, Coord>,
    self_nodes: Vec<SelfNode>,
}

/// Arena of ring records.
#[derive(Clone, Debug, Default)]
pub(crate) struct RingGraph<'a> {
    rings: Vec<PolygonRing<'a>>,
}

impl<'a> RingGraph<'a> {
    pub(crate) fn add_shell(&mut self, coords: &'a [Coord]) -> usize {
        let id = self.rings.len();
        self.rings.push(PolygonRing {
            coords,
            shell: id,
            touches: BTreeMap::new(),
            self_nodes: Vec::new(),
        });
        id
    }

    pub(crate) fn add_hole(&mut self, coords: &'a [Coord], shell: usize) -> usize {
        let id = self.rings.len();
        self.rings.push(PolygonRing {
            coords,
            shell,
            touches: BTreeMap::new(),
            self_nodes: Vec::new(),
        });
        id
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// True unless `a` already touches `b` at a point other than `pt`.
    fn is_only_touch(&self, a: usize, b: usize, pt: Coord) -> bool {
        !matches!(self.rings[a].touches.get(&b), Some(t) if *t != pt)
    }

    /// Record a touch between two different rings. Returns true if the rings
    /// already touch elsewhere (a double touch). Rings without a slot, or of
    /// different polygons, are ignored.
    pub(crate) fn add_touch(&mut self, a: Option<usize>, b: Option<usize>, pt: Coord) -> bool {
        let (Some(a), Some(b)) = (a, b) else {
            return false;
        };
        if a == b || self.rings[a].shell != self.rings[b].shell {
            return false;
        }
        if !self.is_only_touch(a, b, pt) || !self.is_only_touch(b, a, pt) {
            return true;
        }
        self.rings[a].touches.entry(b).or_insert(pt);
        self.rings[b].touches.entry(a).or_insert(pt);
        false
    }

    pub(crate) fn add_self_touch(&mut self, ring: usize, node: Coord, e00: Coord, e01: Coord, e11: Coord) {
        self.rings[ring].self_nodes.push(SelfNode { node, e00, e01, e11 });
    }

    /// First self-touch node that pinches the interior.
    pub(crate) fn find_interior_self_node(&self) -> Option<Coord> {
        self.rings.iter().enumerate().find_map(|(id, ring)| {
            if ring.self_nodes.is_empty() {
                return None;
            }
            let interior_on_right = (ring.shell == id) != is_ccw(ring.coords);
            ring.self_nodes
                .iter()
                .find(|n| !n.is_exterior(interior_on_right))
                .map(|n| n.node)
        })
    }

    /// Location closing a cycle in the touch graph, if any.
    ///
    /// Depth-first over each connected touch set. Touches at the point a ring
    /// was entered through are skipped, so two rings touching once do not
    /// count as a cycle.
    pub(crate) fn find_hole_cycle_location(&self) -> Option<Coord> {
        let mut root_of: Vec<Option<usize>> = vec![None; self.rings.len()];
        let mut stack: Vec<(usize, Coord)> = Vec::new();
        for root in 0..self.rings.len() {
            if root_of[root].is_some() {
                continue;
            }
            root_of[root] = Some(root);
            for (&other, &pt) in &self.rings[root].touches {
                root_of[other] = Some(root);
                stack.push((other, pt));
            }
            while let Some((ring, entry)) = stack.pop() {
                for (&other, &pt) in &self.rings[ring].touches {
                    if pt == entry {
                        continue;
                    }
                    if root_of[other] == Some(root) {
                        return Some(pt);
                    }
                    root_of[other] = Some(root);
                    stack.push((other, pt));
                }
            }
        }
        None
    }
}
