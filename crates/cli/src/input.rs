//! GeoJSON-like geometry input.
//!
//! Accepts one geometry object or an array of them. Extensions over GeoJSON:
//! `LinearRing` is a geometry type, and ordinates may be the strings `"NaN"`,
//! `"Infinity"` or `"-Infinity"` so that invalid coordinates can be expressed.
//! Positions with more than two ordinates keep the first two.

use anyhow::{bail, Context, Result};
use geovalid::geom::{
    Coord, Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Num {
    Value(f64),
    Special(String),
}

impl Num {
    fn to_f64(&self) -> Result<f64> {
        match self {
            Num::Value(v) => Ok(*v),
            Num::Special(s) => match s.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" | "+Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => bail!("unrecognized number {other:?}"),
            },
        }
    }
}

type Position = Vec<Num>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    LinearRing { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPoint { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection { geometries: Vec<RawGeometry> },
}

impl RawGeometry {
    fn into_geometry(self) -> Result<Geometry> {
        Ok(match self {
            RawGeometry::Point { coordinates } => point(&coordinates)?.into(),
            RawGeometry::LineString { coordinates } => LineString::new(positions(&coordinates)?).into(),
            RawGeometry::LinearRing { coordinates } => LinearRing::new(positions(&coordinates)?).into(),
            RawGeometry::Polygon { coordinates } => polygon(&coordinates)?.into(),
            RawGeometry::MultiPoint { coordinates } => MultiPoint {
                points: coordinates.iter().map(|p| point(p)).collect::<Result<_>>()?,
            }
            .into(),
            RawGeometry::MultiLineString { coordinates } => MultiLineString {
                lines: coordinates
                    .iter()
                    .map(|l| positions(l).map(LineString::new))
                    .collect::<Result<_>>()?,
            }
            .into(),
            RawGeometry::MultiPolygon { coordinates } => MultiPolygon {
                polygons: coordinates.iter().map(|p| polygon(p)).collect::<Result<_>>()?,
            }
            .into(),
            RawGeometry::GeometryCollection { geometries } => GeometryCollection {
                geometries: geometries
                    .into_iter()
                    .map(RawGeometry::into_geometry)
                    .collect::<Result<_>>()?,
            }
            .into(),
        })
    }
}

fn position(p: &[Num]) -> Result<Coord> {
    match p {
        [x, y, ..] => Ok(Coord::new(x.to_f64()?, y.to_f64()?)),
        _ => bail!("position needs two ordinates, got {}", p.len()),
    }
}

fn positions(ps: &[Position]) -> Result<Vec<Coord>> {
    ps.iter().map(|p| position(p)).collect()
}

/// An empty position is the empty point.
fn point(p: &[Num]) -> Result<Point> {
    if p.is_empty() {
        return Ok(Point::empty());
    }
    Ok(Point { coord: Some(position(p)?) })
}

/// First ring is the shell; no rings is the empty polygon.
fn polygon(rings: &[Vec<Position>]) -> Result<Polygon> {
    let mut rings = rings.iter().map(|r| positions(r).map(LinearRing::new));
    let shell = rings.next().transpose()?.unwrap_or_default();
    let holes = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(shell, holes))
}

/// Parse one geometry object or an array of them.
pub fn parse_str(s: &str) -> Result<Vec<Geometry>> {
    let value: Value = serde_json::from_str(s).context("parsing geometry JSON")?;
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let raw: RawGeometry = serde_json::from_value(v).with_context(|| format!("decoding geometry #{i}"))?;
            raw.into_geometry().with_context(|| format!("converting geometry #{i}"))
        })
        .collect()
}

pub fn load(path: &Path) -> Result<Vec<Geometry>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_str(&text).with_context(|| format!("in {}", path.display()))
}
