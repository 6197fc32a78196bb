//! Validity: an ordered battery of structural and topological checks.
//!
//! Each check either passes or yields the single [`ValidationError`] that is
//! reported; later checks are skipped. Order per variant:
//!
//! - Point / MultiPoint: coordinates finite.
//! - LineString: coordinates finite, at least 2 distinct consecutive points.
//! - LinearRing: coordinates finite, closed, at least 4 distinct consecutive
//!   points, no self-intersection.
//! - Polygon: coordinates finite, rings closed, ring sizes, area topology
//!   (intersection, double touch, self-touch), holes inside shell, holes not
//!   nested, interior not disconnected by a ring cycle.
//! - MultiPolygon: as Polygon, with the per-polygon structural checks run for
//!   every polygon first, one area analysis over all polygons, and a
//!   shells-not-nested check before the ring-cycle check.
//! - MultiLineString / GeometryCollection: every component valid.
//!
//! `IsValid` recomputes from scratch on every query.

use tracing::debug;

use crate::algorithm::{locate_in_ring, Location};
use crate::cfg::{MIN_SIZE_LINESTRING, MIN_SIZE_RING};
use crate::geom::{Coord, Geometry, LineString, LinearRing, MultiPolygon, Polygon};

use super::analyzer::PolygonTopologyAnalyzer;
use super::error::{ErrorCode, ValidationError};
use super::nested::NestedHoleTester;

type CheckResult = Result<(), ValidationError>;

/// Validity options.
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidCfg {
    /// Accept shells that touch themselves at a point to enclose a hole
    /// ("inverted" rings), as long as the interior stays connected.
    pub self_touching_ring_forming_hole_valid: bool,
}

/// Validity checker over one geometry.
pub struct IsValid<'g> {
    geom: &'g Geometry,
    cfg: ValidCfg,
}

impl<'g> IsValid<'g> {
    pub fn new(geom: &'g Geometry) -> Self {
        Self::with_cfg(geom, ValidCfg::default())
    }

    pub fn with_cfg(geom: &'g Geometry, cfg: ValidCfg) -> Self {
        Self { geom, cfg }
    }

    pub fn set_self_touching_ring_forming_hole_valid(&mut self, valid: bool) {
        self.cfg.self_touching_ring_forming_hole_valid = valid;
    }

    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    /// First failing check, in the fixed check order.
    pub fn validation_error(&self) -> Option<ValidationError> {
        let err = self.check_geometry(self.geom).err()?;
        debug!(
            geometry = self.geom.geometry_type(),
            code = ?err.code,
            x = err.coord.x,
            y = err.coord.y,
            "geometry is invalid"
        );
        Some(err)
    }

    /// Both ordinates are finite.
    #[inline]
    pub fn is_valid_coord(c: &Coord) -> bool {
        c.x.is_finite() && c.y.is_finite()
    }

    fn check_geometry(&self, g: &Geometry) -> CheckResult {
        if g.is_empty() {
            return Ok(());
        }
        match g {
            Geometry::Point(p) => match p.coord {
                Some(c) => check_coords(&[c]),
                None => Ok(()),
            },
            Geometry::MultiPoint(mp) => {
                let coords: Vec<Coord> = mp.points.iter().filter_map(|p| p.coord).collect();
                check_coords(&coords)
            }
            Geometry::LineString(l) => check_line_string(l),
            Geometry::LinearRing(r) => check_linear_ring(r),
            Geometry::Polygon(p) => self.check_polygon(p),
            Geometry::MultiPolygon(mp) => self.check_multipolygon(mp),
            Geometry::MultiLineString(ml) => ml
                .lines
                .iter()
                .filter(|l| !l.is_empty())
                .try_for_each(check_line_string),
            Geometry::GeometryCollection(gc) => {
                gc.geometries.iter().try_for_each(|g| self.check_geometry(g))
            }
        }
    }

    fn check_polygon(&self, p: &Polygon) -> CheckResult {
        check_polygon_structure(p)?;
        let mut analyzer = PolygonTopologyAnalyzer::from_polygon(p, self.cfg.self_touching_ring_forming_hole_valid);
        check_area_intersections(&mut analyzer)?;
        check_holes_outside_shell(p)?;
        check_holes_not_nested(p)?;
        check_interior_disconnected(&mut analyzer)
    }

    fn check_multipolygon(&self, mp: &MultiPolygon) -> CheckResult {
        mp.polygons.iter().try_for_each(check_polygon_structure)?;
        let mut analyzer =
            PolygonTopologyAnalyzer::from_polygons(&mp.polygons, self.cfg.self_touching_ring_forming_hole_valid);
        check_area_intersections(&mut analyzer)?;
        mp.polygons.iter().try_for_each(check_holes_outside_shell)?;
        mp.polygons.iter().try_for_each(check_holes_not_nested)?;
        check_shells_not_nested(mp)?;
        check_interior_disconnected(&mut analyzer)
    }
}

#[inline]
fn fail(code: ErrorCode, coord: Coord) -> CheckResult {
    Err(ValidationError::new(code, coord))
}

/// Location reported for components without any coordinate.
#[inline]
fn nan_coord() -> Coord {
    Coord::new(f64::NAN, f64::NAN)
}

fn check_coords(coords: &[Coord]) -> CheckResult {
    match coords.iter().find(|c| !IsValid::is_valid_coord(c)) {
        Some(c) => fail(ErrorCode::InvalidCoordinate, *c),
        None => Ok(()),
    }
}

fn check_line_string(l: &LineString) -> CheckResult {
    check_coords(&l.coords)?;
    check_too_few_points(&l.coords, MIN_SIZE_LINESTRING)
}

fn check_linear_ring(r: &LinearRing) -> CheckResult {
    check_coords(&r.coords)?;
    check_ring_closed(r)?;
    check_ring_too_few_points(r)?;
    match PolygonTopologyAnalyzer::find_self_intersection(&r.coords) {
        Some(pt) => fail(ErrorCode::RingSelfIntersection, pt),
        None => Ok(()),
    }
}

/// Finite coordinates, closed rings and ring sizes, each over shell then holes.
fn check_polygon_structure(p: &Polygon) -> CheckResult {
    p.rings().try_for_each(|r| check_coords(&r.coords))?;
    p.rings().try_for_each(check_ring_closed)?;
    p.rings().try_for_each(check_ring_too_few_points)
}

fn check_ring_closed(r: &LinearRing) -> CheckResult {
    if r.is_empty() || r.is_closed() {
        return Ok(());
    }
    fail(ErrorCode::RingNotClosed, r.coords[0])
}

fn check_ring_too_few_points(r: &LinearRing) -> CheckResult {
    if r.is_empty() {
        return Ok(());
    }
    check_too_few_points(&r.coords, MIN_SIZE_RING)
}

fn check_too_few_points(coords: &[Coord], min_size: usize) -> CheckResult {
    if is_non_repeated_size_at_least(coords, min_size) {
        return Ok(());
    }
    fail(ErrorCode::TooFewPoints, coords.first().copied().unwrap_or_else(nan_coord))
}

/// Counts points that differ from their predecessor, stopping at `min_size`.
fn is_non_repeated_size_at_least(coords: &[Coord], min_size: usize) -> bool {
    let mut count = 0usize;
    let mut prev: Option<&Coord> = None;
    for p in coords {
        if count >= min_size {
            return true;
        }
        if prev != Some(p) {
            count += 1;
        }
        prev = Some(p);
    }
    count >= min_size
}

fn check_area_intersections(analyzer: &mut PolygonTopologyAnalyzer<'_>) -> CheckResult {
    if let (Some(code), Some(pt)) = (analyzer.intersection_code(), analyzer.intersection_location()) {
        return fail(code, pt);
    }
    if let Some(pt) = analyzer.double_touch_location() {
        return fail(ErrorCode::DisconnectedInterior, pt);
    }
    if analyzer.is_interior_disconnected_by_self_touch() {
        let pt = analyzer.disconnection_location().unwrap_or_else(nan_coord);
        return fail(ErrorCode::DisconnectedInterior, pt);
    }
    Ok(())
}

fn check_interior_disconnected(analyzer: &mut PolygonTopologyAnalyzer<'_>) -> CheckResult {
    if analyzer.is_interior_disconnected_by_ring_cycle() {
        let pt = analyzer.disconnection_location().unwrap_or_else(nan_coord);
        return fail(ErrorCode::DisconnectedInterior, pt);
    }
    Ok(())
}

fn check_holes_outside_shell(p: &Polygon) -> CheckResult {
    let shell_empty = p.shell.is_empty();
    for hole in p.holes.iter().filter(|h| !h.is_empty()) {
        let outside = if shell_empty {
            Some(hole.coords[0])
        } else {
            find_hole_outside_shell_point(&p.shell.coords, &hole.coords)
        };
        if let Some(pt) = outside {
            return fail(ErrorCode::HoleOutsideShell, pt);
        }
    }
    Ok(())
}

/// Boundary vertices are inconclusive; the first interior vertex settles that
/// the hole is inside, the first exterior vertex is the witness.
fn find_hole_outside_shell_point(shell: &[Coord], hole: &[Coord]) -> Option<Coord> {
    for &pt in &hole[..hole.len() - 1] {
        match locate_in_ring(pt, shell) {
            Location::Boundary => continue,
            Location::Interior => return None,
            Location::Exterior => return Some(pt),
        }
    }
    None
}

fn check_holes_not_nested(p: &Polygon) -> CheckResult {
    if p.holes.is_empty() {
        return Ok(());
    }
    let mut tester = NestedHoleTester::new(p);
    if tester.is_nested() {
        let pt = tester.nested_point().unwrap_or_else(nan_coord);
        return fail(ErrorCode::NestedHoles, pt);
    }
    Ok(())
}

fn check_shells_not_nested(mp: &MultiPolygon) -> CheckResult {
    for (i, p) in mp.polygons.iter().enumerate() {
        if p.is_empty() {
            continue;
        }
        for (j, other) in mp.polygons.iter().enumerate() {
            if i == j {
                continue;
            }
            if let Some(pt) = find_shell_segment_in_polygon(&p.shell, other) {
                return fail(ErrorCode::NestedShells, pt);
            }
        }
    }
    Ok(())
}

/// First vertex of `shell` if its first segment lies inside `poly` but in
/// none of its holes.
fn find_shell_segment_in_polygon(shell: &LinearRing, poly: &Polygon) -> Option<Coord> {
    if poly.shell.is_empty() {
        return None;
    }
    let shell_env = shell.envelope();
    if !poly.envelope().covers(&shell_env) {
        return None;
    }
    let (s0, s1) = (shell.coords[0], shell.coords[1]);
    if !PolygonTopologyAnalyzer::is_segment_in_ring(s0, s1, &poly.shell.coords) {
        return None;
    }
    let in_hole = poly.holes.iter().any(|hole| {
        hole.envelope().covers(&shell_env) && PolygonTopologyAnalyzer::is_segment_in_ring(s0, s1, &hole.coords)
    });
    (!in_hole).then_some(s0)
}

/// True if `geom` is valid.
pub fn is_valid(geom: &Geometry) -> bool {
    IsValid::new(geom).is_valid()
}

/// First validation error of `geom`, if any.
pub fn validation_error(geom: &Geometry) -> Option<ValidationError> {
    IsValid::new(geom).validation_error()
}
