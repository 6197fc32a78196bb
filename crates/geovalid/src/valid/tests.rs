use super::*;
use crate::algorithm::{EndPoint, Mod2, MonovalentEndPoint, MultivalentEndPoint};
use crate::geom::rand::{draw_multipolygon_grid, draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use crate::geom::{
    coord, Coord, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use proptest::prelude::*;

fn line(pts: &[(f64, f64)]) -> LineString {
    LineString::from_xy(pts)
}

fn ring(pts: &[(f64, f64)]) -> LinearRing {
    LinearRing::from_xy(pts)
}

fn square(x0: f64, y0: f64, s: f64) -> LinearRing {
    ring(&[(x0, y0), (x0 + s, y0), (x0 + s, y0 + s), (x0, y0 + s), (x0, y0)])
}

fn poly(shell: LinearRing, holes: Vec<LinearRing>) -> Geometry {
    Polygon::new(shell, holes).into()
}

fn error_of(g: &Geometry) -> Option<(ErrorCode, Coord)> {
    validation_error(g).map(|e| (e.code, e.coord))
}

/// Crosses itself once, at (x0 + 1, 1).
fn figure_eight(x0: f64) -> LineString {
    line(&[(x0, 0.0), (x0 + 2.0, 2.0), (x0 + 2.0, 0.0), (x0, 2.0)])
}

/// Shell touching itself at (2, 0) around a diamond-shaped inverted hole.
fn inverted_hole_shell() -> LinearRing {
    ring(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (1.0, 1.0),
        (2.0, 2.0),
        (3.0, 1.0),
        (2.0, 0.0),
        (4.0, 0.0),
        (4.0, 4.0),
        (0.0, 4.0),
        (0.0, 0.0),
    ])
}

/// Two squares joined at the single vertex (2, 2).
fn two_lobe_shell() -> LinearRing {
    ring(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (4.0, 2.0),
        (4.0, 4.0),
        (2.0, 4.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (0.0, 0.0),
    ])
}

// ---------------------------------------------------------------------------
// Simplicity

#[test]
fn closed_ring_is_simple() {
    let g: Geometry = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]).into();
    let mut op = IsSimple::new(&g);
    assert!(op.is_simple());
    assert!(op.non_simple_locations().is_empty());
    assert_eq!(op.non_simple_location(), None);
    assert!(is_simple(&Geometry::from(square(0.0, 0.0, 1.0))));
}

#[test]
fn figure_eight_reports_crossing() {
    let g: Geometry = figure_eight(0.0).into();
    let mut op = IsSimple::new(&g);
    assert!(!op.is_simple());
    assert_eq!(op.non_simple_location(), Some(coord(1.0, 1.0)));
    assert_eq!(non_simple_location(&g), Some(coord(1.0, 1.0)));
}

#[test]
fn interior_vertex_touch_is_not_simple() {
    // The end of the line touches one of its own interior vertices.
    let g: Geometry = line(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (1.0, 2.0), (2.0, 0.0)]).into();
    assert!(!is_simple(&g));
    let g: Geometry = line(&[(0.0, 0.0), (3.0, 0.0), (3.0, 1.0), (1.0, 0.0)]).into();
    assert!(!is_simple(&g));
    // Doubles back over its first segment.
    let g: Geometry = line(&[(0.0, 0.0), (2.0, 0.0), (1.0, 0.0)]).into();
    assert!(!is_simple(&g));
}

#[test]
fn closed_ring_endpoint_depends_on_boundary_rule() {
    let closed: Geometry = square(0.0, 0.0, 10.0).into();
    assert!(IsSimple::with_rule(&closed, &Mod2).is_simple());
    assert!(IsSimple::with_rule(&closed, &EndPoint).is_simple());
    assert!(IsSimple::with_rule(&closed, &MultivalentEndPoint).is_simple());
    assert!(IsSimple::with_rule(&closed, &MonovalentEndPoint).is_simple());

    // A second line starting at the ring's closing point.
    let g: Geometry = MultiLineString {
        lines: vec![
            line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            line(&[(0.0, 0.0), (-5.0, -5.0)]),
        ],
    }
    .into();
    let mut mod2 = IsSimple::with_rule(&g, &Mod2);
    assert!(!mod2.is_simple());
    assert_eq!(mod2.non_simple_location(), Some(coord(0.0, 0.0)));
    assert!(!IsSimple::with_rule(&g, &MonovalentEndPoint).is_simple());
    assert!(IsSimple::with_rule(&g, &EndPoint).is_simple());
    assert!(IsSimple::with_rule(&g, &MultivalentEndPoint).is_simple());
}

#[test]
fn open_lines_meeting_at_endpoints_are_simple() {
    let g: Geometry = MultiLineString {
        lines: vec![
            line(&[(0.0, 0.0), (1.0, 0.0)]),
            line(&[(1.0, 0.0), (2.0, 1.0)]),
            line(&[(1.0, 0.0), (2.0, -1.0)]),
        ],
    }
    .into();
    assert!(is_simple(&g));
    // Endpoint of one line on the interior of another.
    let g: Geometry = MultiLineString {
        lines: vec![line(&[(0.0, 0.0), (2.0, 0.0)]), line(&[(1.0, 0.0), (1.0, 1.0)])],
    }
    .into();
    assert_eq!(non_simple_location(&g), Some(coord(1.0, 0.0)));
}

#[test]
fn find_all_collects_every_crossing() {
    let g: Geometry = MultiLineString {
        lines: vec![figure_eight(0.0), figure_eight(10.0)],
    }
    .into();
    let mut first = IsSimple::new(&g);
    assert_eq!(first.non_simple_locations().len(), 1);

    let mut all = IsSimple::new(&g);
    all.set_find_all_locations(true);
    assert!(!all.is_simple());
    let mut locs = all.non_simple_locations().to_vec();
    locs.sort_by(|a, b| a.x.total_cmp(&b.x));
    assert_eq!(locs, vec![coord(1.0, 1.0), coord(11.0, 1.0)]);
}

#[test]
fn verdict_is_memoized() {
    let g: Geometry = MultiLineString {
        lines: vec![figure_eight(0.0), figure_eight(10.0)],
    }
    .into();
    let mut op = IsSimple::new(&g);
    assert!(!op.is_simple());
    // Too late to change the mode.
    op.set_find_all_locations(true);
    assert_eq!(op.non_simple_locations().len(), 1);
    let first = op.non_simple_location();
    assert_eq!(op.non_simple_location(), first);
    assert!(!op.is_simple());
}

#[test]
fn multipoint_repeats() {
    let mp = |pts: Vec<Point>| Geometry::from(MultiPoint { points: pts });
    assert!(is_simple(&mp(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)])));
    let g = mp(vec![Point::new(0.0, 0.0), Point::empty(), Point::new(1.0, 1.0), Point::new(0.0, 0.0)]);
    assert_eq!(non_simple_location(&g), Some(coord(0.0, 0.0)));
    // Signed zeros compare equal.
    assert!(!is_simple(&mp(vec![Point::new(0.0, 1.0), Point::new(-0.0, 1.0)])));
    assert!(is_simple(&mp(vec![Point::new(f64::NAN, 1.0), Point::new(f64::NAN, 1.0)])));

    let g = mp(vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(5.0, 5.0),
        Point::new(5.0, 5.0),
        Point::new(0.0, 0.0),
    ]);
    let mut op = IsSimple::new(&g);
    op.set_find_all_locations(true);
    assert_eq!(op.non_simple_locations(), &[coord(0.0, 0.0), coord(5.0, 5.0)]);
}

#[test]
fn polygon_rings_are_checked_independently() {
    // The hole touches the shell, but each ring on its own is simple.
    let hole = ring(&[(0.0, 5.0), (5.0, 2.0), (5.0, 8.0), (0.0, 5.0)]);
    assert!(is_simple(&poly(square(0.0, 0.0, 10.0), vec![hole])));
    let bowtie = ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]);
    assert_eq!(non_simple_location(&poly(bowtie, vec![])), Some(coord(1.0, 1.0)));
}

#[test]
fn collections_recurse() {
    let g: Geometry = GeometryCollection {
        geometries: vec![
            Point::new(0.0, 0.0).into(),
            square(0.0, 0.0, 1.0).into(),
            figure_eight(5.0).into(),
        ],
    }
    .into();
    assert_eq!(non_simple_location(&g), Some(coord(6.0, 1.0)));
    assert!(is_simple(&Geometry::from(GeometryCollection::default())));
    assert!(is_simple(&Geometry::from(Point::new(f64::NAN, 0.0))));
}

// ---------------------------------------------------------------------------
// Validity

#[test]
fn empty_geometries_are_valid() {
    assert!(is_valid(&Polygon::default().into()));
    assert!(is_valid(&GeometryCollection::default().into()));
    assert!(is_valid(&LineString::default().into()));
    assert!(is_valid(&Point::empty().into()));
}

#[test]
fn invalid_coordinates() {
    let g: Geometry = MultiPoint {
        points: vec![Point::new(0.0, 0.0), Point::empty(), Point::new(f64::INFINITY, 2.0)],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::InvalidCoordinate, coord(f64::INFINITY, 2.0))));
    let g: Geometry = line(&[(0.0, 0.0), (1.0, f64::NEG_INFINITY)]).into();
    assert_eq!(validation_error(&g).map(|e| e.code), Some(ErrorCode::InvalidCoordinate));
    assert!(IsValid::is_valid_coord(&coord(1.0, -2.0)));
    assert!(!IsValid::is_valid_coord(&coord(f64::NAN, 0.0)));
}

#[test]
fn nan_point_is_invalid() {
    let err = validation_error(&Point::new(f64::NAN, 1.0).into());
    let err = err.expect("NaN point must be invalid");
    assert_eq!(err.code, ErrorCode::InvalidCoordinate);
    assert!(err.coord.x.is_nan());
    assert_eq!(err.coord.y, 1.0);
}

#[test]
fn line_string_too_few_points() {
    let g: Geometry = line(&[(3.0, 4.0), (3.0, 4.0), (3.0, 4.0)]).into();
    assert_eq!(error_of(&g), Some((ErrorCode::TooFewPoints, coord(3.0, 4.0))));
    assert!(is_valid(&line(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]).into()));
    // Self-crossing lines are valid, just not simple.
    assert!(is_valid(&figure_eight(0.0).into()));
}

#[test]
fn linear_ring_checks() {
    let open: Geometry = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]).into();
    assert_eq!(error_of(&open), Some((ErrorCode::RingNotClosed, coord(1.0, 1.0))));
    let short: Geometry = ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]).into();
    assert_eq!(error_of(&short), Some((ErrorCode::TooFewPoints, coord(0.0, 0.0))));
    let bowtie: Geometry = ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]).into();
    assert_eq!(error_of(&bowtie), Some((ErrorCode::RingSelfIntersection, coord(1.0, 1.0))));
    assert!(is_valid(&square(0.0, 0.0, 1.0).into()));
}

#[test]
fn shell_with_three_distinct_points_has_too_few_points() {
    let g = poly(ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 0.0)]), vec![]);
    assert_eq!(error_of(&g), Some((ErrorCode::TooFewPoints, coord(0.0, 0.0))));
    // A triangle has four points counting the closing one.
    assert!(is_valid(&poly(ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]), vec![])));
}

#[test]
fn hole_outside_shell() {
    let hole = square(20.0, 20.0, 2.0);
    let g = poly(square(0.0, 0.0, 10.0), vec![hole]);
    assert_eq!(error_of(&g), Some((ErrorCode::HoleOutsideShell, coord(20.0, 20.0))));

    // Hole vertices on the shell boundary are skipped until one decides.
    let hole = ring(&[(0.0, 5.0), (5.0, 2.0), (5.0, 8.0), (0.0, 5.0)]);
    assert!(is_valid(&poly(square(0.0, 0.0, 10.0), vec![hole])));

    let g = poly(LinearRing::default(), vec![square(1.0, 1.0, 1.0)]);
    assert!(is_valid(&g), "polygon with empty shell is empty");
    let g: Geometry = MultiPolygon {
        polygons: vec![
            Polygon::new(square(0.0, 0.0, 10.0), vec![]),
            Polygon::new(square(20.0, 0.0, 10.0), vec![square(40.0, 0.0, 1.0)]),
        ],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::HoleOutsideShell, coord(40.0, 0.0))));
}

#[test]
fn bowtie_crossing_versus_vertex_touch() {
    let bowtie = ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]);
    assert_eq!(error_of(&poly(bowtie, vec![])), Some((ErrorCode::SelfIntersection, coord(1.0, 1.0))));
    assert_eq!(
        error_of(&poly(inverted_hole_shell(), vec![])),
        Some((ErrorCode::RingSelfIntersection, coord(2.0, 0.0)))
    );
}

#[test]
fn inverted_rings_when_allowed() {
    let g = poly(inverted_hole_shell(), vec![]);
    let mut op = IsValid::new(&g);
    assert!(!op.is_valid());
    op.set_self_touching_ring_forming_hole_valid(true);
    assert!(op.is_valid());

    let lobes = poly(two_lobe_shell(), vec![]);
    let cfg = ValidCfg {
        self_touching_ring_forming_hole_valid: true,
    };
    let err = IsValid::with_cfg(&lobes, cfg).validation_error();
    assert_eq!(err.map(|e| (e.code, e.coord)), Some((ErrorCode::DisconnectedInterior, coord(2.0, 2.0))));
    assert_eq!(error_of(&lobes), Some((ErrorCode::RingSelfIntersection, coord(2.0, 2.0))));
}

#[test]
fn rings_crossing_each_other() {
    let hole = ring(&[(5.0, 5.0), (15.0, 5.0), (15.0, 6.0), (5.0, 6.0), (5.0, 5.0)]);
    let err = validation_error(&poly(square(0.0, 0.0, 10.0), vec![hole]));
    assert_eq!(err.map(|e| e.code), Some(ErrorCode::SelfIntersection));

    // Overlapping polygons of a multipolygon.
    let g: Geometry = MultiPolygon {
        polygons: vec![
            Polygon::new(square(0.0, 0.0, 10.0), vec![]),
            Polygon::new(square(5.0, 5.0, 10.0), vec![]),
        ],
    }
    .into();
    assert_eq!(validation_error(&g).map(|e| e.code), Some(ErrorCode::SelfIntersection));
}

#[test]
fn double_touch_disconnects_interior() {
    let hole = ring(&[(0.0, 2.0), (2.0, 1.0), (4.0, 2.0), (2.0, 3.0), (0.0, 2.0)]);
    let err = validation_error(&poly(square(0.0, 0.0, 4.0), vec![hole])).expect("invalid");
    assert_eq!(err.code, ErrorCode::DisconnectedInterior);
    assert!(err.coord == coord(0.0, 2.0) || err.coord == coord(4.0, 2.0));
}

#[test]
fn ring_cycle_disconnects_interior() {
    let h1 = ring(&[(0.0, 2.0), (1.0, 1.0), (2.0, 2.0), (1.0, 3.0), (0.0, 2.0)]);
    let h2 = ring(&[(2.0, 2.0), (3.0, 1.0), (4.0, 2.0), (3.0, 3.0), (2.0, 2.0)]);
    let g = poly(square(0.0, 0.0, 4.0), vec![h1.clone(), h2]);
    assert_eq!(validation_error(&g).map(|e| e.code), Some(ErrorCode::DisconnectedInterior));

    // Without the second hole the touches form a tree.
    assert!(is_valid(&poly(square(0.0, 0.0, 4.0), vec![h1])));
}

#[test]
fn nested_holes() {
    let g = poly(square(0.0, 0.0, 20.0), vec![square(2.0, 2.0, 10.0), square(4.0, 4.0, 2.0)]);
    assert_eq!(error_of(&g), Some((ErrorCode::NestedHoles, coord(4.0, 4.0))));
    let g = poly(square(0.0, 0.0, 20.0), vec![square(2.0, 2.0, 3.0), square(10.0, 10.0, 3.0)]);
    assert!(is_valid(&g));
}

#[test]
fn nested_shells() {
    let outer = Polygon::new(square(0.0, 0.0, 10.0), vec![]);
    let inner = Polygon::new(square(2.0, 2.0, 2.0), vec![]);
    let g: Geometry = MultiPolygon {
        polygons: vec![outer, inner.clone()],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::NestedShells, coord(2.0, 2.0))));

    let outer_with_hole = Polygon::new(square(0.0, 0.0, 10.0), vec![square(1.0, 1.0, 8.0)]);
    let g: Geometry = MultiPolygon {
        polygons: vec![outer_with_hole, inner],
    }
    .into();
    assert!(is_valid(&g));
}

#[test]
fn check_order_is_fixed() {
    // Unclosed shell and a NaN in the hole: coordinates are checked first.
    let shell = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
    let hole = ring(&[(1.0, 1.0), (2.0, 1.0), (f64::NAN, 2.0), (1.0, 1.0)]);
    let g = poly(shell.clone(), vec![hole]);
    assert_eq!(validation_error(&g).map(|e| e.code), Some(ErrorCode::InvalidCoordinate));

    // Too-few-points shell and an unclosed hole: closure comes first.
    let short = ring(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]);
    let open_hole = ring(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]);
    let g = poly(short, vec![open_hole]);
    assert_eq!(error_of(&g), Some((ErrorCode::RingNotClosed, coord(1.0, 1.0))));

    // Multipolygon: structure of every polygon before any topology.
    let g: Geometry = MultiPolygon {
        polygons: vec![
            Polygon::new(ring(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]), vec![]),
            Polygon::new(shell, vec![]),
        ],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::RingNotClosed, coord(0.0, 0.0))));
}

#[test]
fn multipolygon_hole_checks_run_across_all_polygons() {
    // Nested holes in the first polygon, a stray hole in the second: every
    // hole is placed against its shell before any nesting is looked at.
    let g: Geometry = MultiPolygon {
        polygons: vec![
            Polygon::new(square(0.0, 0.0, 20.0), vec![square(2.0, 2.0, 10.0), square(4.0, 4.0, 2.0)]),
            Polygon::new(square(30.0, 0.0, 10.0), vec![square(50.0, 0.0, 1.0)]),
        ],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::HoleOutsideShell, coord(50.0, 0.0))));
}

#[test]
fn empty_shell_with_hole_inside_multipolygon() {
    let g: Geometry = MultiPolygon {
        polygons: vec![
            Polygon::new(square(0.0, 0.0, 10.0), vec![]),
            Polygon::new(LinearRing::default(), vec![square(30.0, 30.0, 1.0)]),
        ],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::HoleOutsideShell, coord(30.0, 30.0))));
}

#[test]
fn collection_stops_at_first_invalid_component() {
    let g: Geometry = GeometryCollection {
        geometries: vec![
            Point::new(0.0, 0.0).into(),
            line(&[(5.0, 5.0), (5.0, 5.0)]).into(),
            Point::new(f64::NAN, 0.0).into(),
        ],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::TooFewPoints, coord(5.0, 5.0))));
    let g: Geometry = MultiLineString {
        lines: vec![line(&[(0.0, 0.0), (1.0, 0.0)]), LineString::default(), line(&[(2.0, 2.0)])],
    }
    .into();
    assert_eq!(error_of(&g), Some((ErrorCode::TooFewPoints, coord(2.0, 2.0))));
}

#[test]
fn repeated_queries_agree() {
    let hole = ring(&[(0.0, 2.0), (2.0, 1.0), (4.0, 2.0), (2.0, 3.0), (0.0, 2.0)]);
    let g = poly(square(0.0, 0.0, 4.0), vec![hole]);
    let op = IsValid::new(&g);
    let first = op.validation_error();
    for _ in 0..3 {
        assert_eq!(op.validation_error(), first);
        assert!(!op.is_valid());
    }
    let mut s = IsSimple::new(&g);
    assert_eq!(s.is_simple(), s.is_simple());
}

#[test]
fn error_display() {
    let g = poly(square(0.0, 0.0, 10.0), vec![square(20.0, 20.0, 2.0)]);
    let err = validation_error(&g).expect("invalid");
    assert_eq!(err.to_string(), "Hole lies outside shell at or near point (20, 20)");
}

// ---------------------------------------------------------------------------
// Random star-shaped input

fn radial_cfg(n: usize) -> RadialCfg {
    RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        ..RadialCfg::default()
    }
}

proptest! {
    #[test]
    fn prop_random_polygons_are_valid_and_simple(seed in any::<u64>(), n in 3usize..40) {
        let tok = ReplayToken { seed, index: 0 };
        let g: Geometry = draw_polygon_radial(radial_cfg(n), tok, coord(0.0, 0.0), &[0.5]).into();
        prop_assert_eq!(validation_error(&g), None);
        prop_assert!(is_simple(&g));
    }

    #[test]
    fn prop_random_rings_are_simple_lines(seed in any::<u64>(), n in 3usize..40) {
        let tok = ReplayToken { seed, index: 1 };
        let p = draw_polygon_radial(radial_cfg(n), tok, coord(3.0, -7.0), &[]);
        let g: Geometry = LineString::new(p.shell.coords).into();
        prop_assert!(IsSimple::with_rule(&g, &Mod2).is_simple());
        prop_assert!(IsSimple::with_rule(&g, &MonovalentEndPoint).is_simple());
        prop_assert!(is_valid(&g));
    }

    #[test]
    fn prop_random_multipolygons_are_valid(seed in any::<u64>(), count in 1usize..8) {
        let tok = ReplayToken { seed, index: 2 };
        let g: Geometry = draw_multipolygon_grid(radial_cfg(10), tok, count, true).into();
        prop_assert_eq!(validation_error(&g), None);
    }
}
