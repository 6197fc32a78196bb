//! Geometry model: coordinates, envelopes and the closed set of planar geometries.
//!
//! - `Coord`: `nalgebra::Vector2<f64>`; equality is exact (`==`), NaN never equals.
//! - `Envelope`: axis-aligned bounds with a null (empty) state.
//! - `Geometry`: sum type over the eight supported variants; checkers `match`
//!   on it exhaustively.

use nalgebra::Vector2;

/// Planar coordinate.
pub type Coord = Vector2<f64>;

/// Shorthand for `Coord::new(x, y)`.
#[inline]
pub fn coord(x: f64, y: f64) -> Coord {
    Coord::new(x, y)
}

/// Axis-aligned bounding box. Null when nothing has been included yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min: Coord,
    pub max: Coord,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

impl Envelope {
    #[inline]
    pub fn null() -> Self {
        Self {
            min: Coord::new(f64::INFINITY, f64::INFINITY),
            max: Coord::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_coords(pts: &[Coord]) -> Self {
        let mut env = Self::null();
        for p in pts {
            env.expand_to_include(*p);
        }
        env
    }

    /// Bounds of the segment `p`–`q`.
    #[inline]
    pub fn of_segment(p: Coord, q: Coord) -> Self {
        Self {
            min: Coord::new(p.x.min(q.x), p.y.min(q.y)),
            max: Coord::new(p.x.max(q.x), p.y.max(q.y)),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    #[inline]
    pub fn expand_to_include(&mut self, p: Coord) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn expand_to_include_env(&mut self, other: &Envelope) {
        if other.is_null() {
            return;
        }
        self.expand_to_include(other.min);
        self.expand_to_include(other.max);
    }

    #[inline]
    pub fn intersects(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min.x > self.max.x
            || other.max.x < self.min.x
            || other.min.y > self.max.y
            || other.max.y < self.min.y)
    }

    #[inline]
    pub fn intersects_coord(&self, p: Coord) -> bool {
        !self.is_null()
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
    }

    /// True if `other` lies entirely inside (or on the edge of) `self`.
    #[inline]
    pub fn covers(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

/// Zero-dimensional geometry; `None` is the empty point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub coord: Option<Coord>,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            coord: Some(Coord::new(x, y)),
        }
    }

    #[inline]
    pub fn empty() -> Self {
        Self { coord: None }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coord.is_none()
    }
}

/// Open or closed polyline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineString {
    pub coords: Vec<Coord>,
}

impl LineString {
    #[inline]
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    pub fn from_xy(pts: &[(f64, f64)]) -> Self {
        Self::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    /// First and last coordinates are equal (false when empty).
    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Ring boundary of a polygon. Closure is not enforced at construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearRing {
    pub coords: Vec<Coord>,
}

impl LinearRing {
    #[inline]
    pub fn new(coords: Vec<Coord>) -> Self {
        Self { coords }
    }

    pub fn from_xy(pts: &[(f64, f64)]) -> Self {
        Self::new(pts.iter().map(|&(x, y)| Coord::new(x, y)).collect())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn is_closed(&self) -> bool {
        match (self.coords.first(), self.coords.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    #[inline]
    pub fn envelope(&self) -> Envelope {
        Envelope::from_coords(&self.coords)
    }
}

/// Shell plus holes. Empty iff the shell is empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub shell: LinearRing,
    pub holes: Vec<LinearRing>,
}

impl Polygon {
    #[inline]
    pub fn new(shell: LinearRing, holes: Vec<LinearRing>) -> Self {
        Self { shell, holes }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }

    /// Shell followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    #[inline]
    pub fn envelope(&self) -> Envelope {
        self.shell.envelope()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPoint {
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiLineString {
    pub lines: Vec<LineString>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiPolygon {
    pub polygons: Vec<Polygon>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
}

/// Closed set of planar geometry variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Name of the variant (OGC spelling).
    pub fn geometry_type(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::LinearRing(_) => "LinearRing",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Collections are empty when every component is.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.is_empty(),
            Geometry::LineString(l) => l.is_empty(),
            Geometry::LinearRing(r) => r.is_empty(),
            Geometry::Polygon(p) => p.is_empty(),
            Geometry::MultiPoint(mp) => mp.points.iter().all(Point::is_empty),
            Geometry::MultiLineString(ml) => ml.lines.iter().all(LineString::is_empty),
            Geometry::MultiPolygon(mp) => mp.polygons.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(gc) => gc.geometries.iter().all(Geometry::is_empty),
        }
    }

    /// Number of top-level components (1 for atomic variants).
    pub fn num_geometries(&self) -> usize {
        match self {
            Geometry::MultiPoint(mp) => mp.points.len(),
            Geometry::MultiLineString(ml) => ml.lines.len(),
            Geometry::MultiPolygon(mp) => mp.polygons.len(),
            Geometry::GeometryCollection(gc) => gc.geometries.len(),
            _ => 1,
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(p) => p
                .coord
                .map(|c| Envelope::from_coords(&[c]))
                .unwrap_or_default(),
            Geometry::LineString(l) => Envelope::from_coords(&l.coords),
            Geometry::LinearRing(r) => r.envelope(),
            Geometry::Polygon(p) => p.envelope(),
            Geometry::MultiPoint(mp) => {
                let mut env = Envelope::null();
                for c in mp.points.iter().filter_map(|p| p.coord) {
                    env.expand_to_include(c);
                }
                env
            }
            Geometry::MultiLineString(ml) => {
                let mut env = Envelope::null();
                for l in &ml.lines {
                    env.expand_to_include_env(&Envelope::from_coords(&l.coords));
                }
                env
            }
            Geometry::MultiPolygon(mp) => {
                let mut env = Envelope::null();
                for p in &mp.polygons {
                    env.expand_to_include_env(&p.envelope());
                }
                env
            }
            Geometry::GeometryCollection(gc) => {
                let mut env = Envelope::null();
                for g in &gc.geometries {
                    env.expand_to_include_env(&g.envelope());
                }
                env
            }
        }
    }
}

macro_rules! impl_from_variant {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Geometry {
                #[inline]
                fn from(g: $ty) -> Self {
                    Geometry::$ty(g)
                }
            }
        )*
    };
}

impl_from_variant!(
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);
