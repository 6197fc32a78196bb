//! Detects holes of one polygon lying inside another hole of the same polygon.

use crate::geom::{Coord, Envelope, Polygon};

use super::analyzer::PolygonTopologyAnalyzer;

/// Nested-hole test over the holes of one polygon.
///
/// Assumes the holes have already been checked not to cross.
pub struct NestedHoleTester<'a> {
    polygon: &'a Polygon,
    nested_pt: Option<Coord>,
}

impl<'a> NestedHoleTester<'a> {
    pub fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            nested_pt: None,
        }
    }

    /// True if some hole lies inside another; the witness is its first vertex.
    pub fn is_nested(&mut self) -> bool {
        let holes: Vec<(&[Coord], Envelope)> = self
            .polygon
            .holes
            .iter()
            .filter(|h| !h.is_empty())
            .map(|h| (h.coords.as_slice(), h.envelope()))
            .collect();
        self.nested_pt = holes.iter().enumerate().find_map(|(i, (hole, env))| {
            holes
                .iter()
                .enumerate()
                .filter(|(j, (_, other_env))| *j != i && other_env.covers(env))
                .any(|(_, (other, _))| PolygonTopologyAnalyzer::is_ring_nested(hole, other))
                .then(|| hole[0])
        });
        self.nested_pt.is_some()
    }

    #[inline]
    pub fn nested_point(&self) -> Option<Coord> {
        self.nested_pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{coord, LinearRing};

    fn square(x0: f64, y0: f64, s: f64) -> LinearRing {
        LinearRing::from_xy(&[(x0, y0), (x0, y0 + s), (x0 + s, y0 + s), (x0 + s, y0), (x0, y0)])
    }

    #[test]
    fn finds_hole_inside_hole() {
        let shell = LinearRing::from_xy(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0), (0.0, 0.0)]);
        let poly = Polygon::new(shell.clone(), vec![square(2.0, 2.0, 10.0), square(4.0, 4.0, 2.0)]);
        let mut t = NestedHoleTester::new(&poly);
        assert!(t.is_nested());
        assert_eq!(t.nested_point(), Some(coord(4.0, 4.0)));

        let poly = Polygon::new(shell, vec![square(2.0, 2.0, 3.0), square(10.0, 10.0, 3.0)]);
        let mut t = NestedHoleTester::new(&poly);
        assert!(!t.is_nested());
        assert_eq!(t.nested_point(), None);
    }
}
