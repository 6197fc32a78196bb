//! Simplicity: no self-intersection other than at boundary points.
//!
//! - Points are always simple; multipoints are simple iff no coordinate repeats.
//! - Linear geometry is split into chains and every envelope-overlapping
//!   segment pair is classified by [`NonSimpleFinder`].
//! - Polygonal geometry is simple iff each ring is simple on its own.
//! - Collections are simple iff every component is.
//!
//! `IsSimple` computes its verdict once and memoizes it together with the
//! witness locations.

use std::collections::HashSet;
use std::ops::ControlFlow;

use tracing::debug;

use crate::algorithm::{segment_sweep, BoundaryNodeRule, LineIntersector, Mod2, SegmentRef};
use crate::geom::{Coord, Geometry, MultiPoint, SegmentChain};

/// Simplicity options.
#[derive(Clone, Copy, Debug)]
pub struct SimpleCfg {
    /// Collect every non-simple location instead of stopping at the first.
    pub find_all_locations: bool,
    /// Endpoints of closed lines are interior points (derived from a boundary node rule).
    pub closed_endpoints_in_interior: bool,
}

impl Default for SimpleCfg {
    fn default() -> Self {
        Self::with_rule(&Mod2)
    }
}

impl SimpleCfg {
    pub fn with_rule<R: BoundaryNodeRule + ?Sized>(rule: &R) -> Self {
        Self {
            find_all_locations: false,
            closed_endpoints_in_interior: !rule.is_in_boundary(2),
        }
    }
}

/// Classifies segment pairs of a chain set and accumulates non-simple locations.
pub struct NonSimpleFinder<'c, 'a> {
    chains: &'c [SegmentChain<'a>],
    closed_endpoints_in_interior: bool,
    find_all: bool,
    li: LineIntersector,
    locations: Vec<Coord>,
}

impl<'c, 'a> NonSimpleFinder<'c, 'a> {
    pub fn new(chains: &'c [SegmentChain<'a>], closed_endpoints_in_interior: bool, find_all: bool) -> Self {
        Self {
            chains,
            closed_endpoints_in_interior,
            find_all,
            li: LineIntersector::new(),
            locations: Vec::new(),
        }
    }

    /// Test one segment pair. Breaks once a location is known and find-all is off.
    pub fn process(&mut self, s0: SegmentRef, s1: SegmentRef) -> ControlFlow<()> {
        if s0 == s1 {
            return ControlFlow::Continue(());
        }
        if self.find_intersection(s0, s1) {
            let p = self.li.intersection(0);
            if !self.locations.contains(&p) {
                self.locations.push(p);
            }
        }
        if self.is_done() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    #[inline]
    pub fn has_intersection(&self) -> bool {
        !self.locations.is_empty()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        !self.find_all && self.has_intersection()
    }

    pub fn locations(&self) -> &[Coord] {
        &self.locations
    }

    pub fn into_locations(self) -> Vec<Coord> {
        self.locations
    }

    fn find_intersection(&mut self, s0: SegmentRef, s1: SegmentRef) -> bool {
        let chains = self.chains;
        let (c0, c1) = (&chains[s0.chain], &chains[s1.chain]);
        let (p00, p01) = c0.segment(s0.index);
        let (p10, p11) = c1.segment(s1.index);
        self.li.compute(p00, p01, p10, p11);
        if !self.li.has_intersection() {
            return false;
        }
        // Crossing or touching in the interior of either segment.
        if self.li.is_interior_intersection() {
            return true;
        }
        // Collinear overlap.
        if self.li.intersection_num() >= 2 {
            return true;
        }
        let same_chain = s0.chain == s1.chain;
        if same_chain && s0.index.abs_diff(s1.index) <= 1 {
            return false;
        }
        // The intersection is a vertex of both segments. It is only allowed at
        // chain endpoints.
        let end0 = self.is_chain_endpoint(c0, s0.index, 0);
        let end1 = self.is_chain_endpoint(c1, s1.index, 1);
        if !(end0 && end1) {
            return true;
        }
        self.closed_endpoints_in_interior && !same_chain && (c0.is_closed() || c1.is_closed())
    }

    fn is_chain_endpoint(&self, chain: &SegmentChain<'_>, seg_index: usize, li_segment: usize) -> bool {
        let at_start = self.li.intersection(0) == self.li.endpoint(li_segment, 0);
        if at_start {
            seg_index == 0
        } else {
            seg_index + 2 == chain.len()
        }
    }
}

/// Simplicity checker over one geometry. The verdict is computed on first query.
pub struct IsSimple<'g> {
    geom: &'g Geometry,
    cfg: SimpleCfg,
    result: Option<SimpleResult>,
}

#[derive(Clone, Debug)]
struct SimpleResult {
    simple: bool,
    locations: Vec<Coord>,
}

impl<'g> IsSimple<'g> {
    /// Checker using the Mod-2 boundary node rule.
    pub fn new(geom: &'g Geometry) -> Self {
        Self::with_cfg(geom, SimpleCfg::default())
    }

    pub fn with_rule<R: BoundaryNodeRule + ?Sized>(geom: &'g Geometry, rule: &R) -> Self {
        Self::with_cfg(geom, SimpleCfg::with_rule(rule))
    }

    pub fn with_cfg(geom: &'g Geometry, cfg: SimpleCfg) -> Self {
        Self {
            geom,
            cfg,
            result: None,
        }
    }

    /// Only takes effect before the first query.
    pub fn set_find_all_locations(&mut self, find_all: bool) {
        self.cfg.find_all_locations = find_all;
    }

    pub fn is_simple(&mut self) -> bool {
        self.compute().simple
    }

    /// First location where the geometry is not simple.
    pub fn non_simple_location(&mut self) -> Option<Coord> {
        self.compute().locations.first().copied()
    }

    /// All found locations (at most one unless find-all is on).
    pub fn non_simple_locations(&mut self) -> &[Coord] {
        &self.compute().locations
    }

    fn compute(&mut self) -> &SimpleResult {
        let (geom, cfg) = (self.geom, self.cfg);
        self.result.get_or_insert_with(|| {
            let mut eval = Evaluator {
                cfg,
                locations: Vec::new(),
            };
            let simple = eval.compute_simple(geom);
            if !simple {
                debug!(
                    geometry = geom.geometry_type(),
                    locations = eval.locations.len(),
                    "geometry is not simple"
                );
            }
            SimpleResult {
                simple,
                locations: eval.locations,
            }
        })
    }
}

struct Evaluator {
    cfg: SimpleCfg,
    locations: Vec<Coord>,
}

impl Evaluator {
    fn compute_simple(&mut self, geom: &Geometry) -> bool {
        if geom.is_empty() {
            return true;
        }
        match geom {
            Geometry::Point(_) => true,
            Geometry::MultiPoint(mp) => self.is_simple_multipoint(mp),
            Geometry::LineString(l) => self.is_simple_linear([l.coords.as_slice()]),
            Geometry::LinearRing(r) => self.is_simple_linear([r.coords.as_slice()]),
            Geometry::MultiLineString(ml) => {
                self.is_simple_linear(ml.lines.iter().map(|l| l.coords.as_slice()))
            }
            Geometry::Polygon(p) => self.is_simple_rings(p.rings().map(|r| r.coords.as_slice())),
            Geometry::MultiPolygon(mp) => self.is_simple_rings(
                mp.polygons
                    .iter()
                    .flat_map(|p| p.rings())
                    .map(|r| r.coords.as_slice()),
            ),
            Geometry::GeometryCollection(gc) => {
                let mut simple = true;
                for g in &gc.geometries {
                    if !self.compute_simple(g) {
                        simple = false;
                        if !self.cfg.find_all_locations {
                            break;
                        }
                    }
                }
                simple
            }
        }
    }

    fn is_simple_multipoint(&mut self, mp: &MultiPoint) -> bool {
        let mut seen: HashSet<(u64, u64)> = HashSet::new();
        let mut simple = true;
        for c in mp.points.iter().filter_map(|p| p.coord) {
            // NaN never equals anything, so it cannot repeat.
            if c.x.is_nan() || c.y.is_nan() {
                continue;
            }
            // Adding 0.0 folds -0.0 into 0.0.
            let key = ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits());
            if !seen.insert(key) {
                simple = false;
                self.push_location(c);
                if !self.cfg.find_all_locations {
                    break;
                }
            }
        }
        simple
    }

    /// Each ring is checked on its own.
    fn is_simple_rings<'a>(&mut self, rings: impl IntoIterator<Item = &'a [Coord]>) -> bool {
        let mut simple = true;
        for ring in rings {
            if !self.is_simple_linear([ring]) {
                simple = false;
                if !self.cfg.find_all_locations {
                    break;
                }
            }
        }
        simple
    }

    fn is_simple_linear<'a>(&mut self, lines: impl IntoIterator<Item = &'a [Coord]>) -> bool {
        let chains: Vec<SegmentChain<'a>> = lines
            .into_iter()
            .map(SegmentChain::new)
            .filter(|c| c.len() > 1)
            .collect();
        let mut finder = NonSimpleFinder::new(
            &chains,
            self.cfg.closed_endpoints_in_interior,
            self.cfg.find_all_locations,
        );
        let _ = segment_sweep(&chains, |s0, s1| finder.process(s0, s1));
        let simple = !finder.has_intersection();
        for p in finder.into_locations() {
            self.push_location(p);
        }
        simple
    }

    fn push_location(&mut self, p: Coord) {
        if !self.locations.contains(&p) {
            self.locations.push(p);
        }
    }
}

/// True if `geom` is simple under the Mod-2 boundary node rule.
pub fn is_simple(geom: &Geometry) -> bool {
    IsSimple::new(geom).is_simple()
}

/// First non-simple location of `geom`, if any.
pub fn non_simple_location(geom: &Geometry) -> Option<Coord> {
    IsSimple::new(geom).non_simple_location()
}
