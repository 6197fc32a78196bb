//! Segment chains: read-only views of one ring or line, repeated points removed.
//!
//! A chain borrows the source coordinates when they contain no consecutive
//! duplicates and owns a compacted copy otherwise. Chains live for one check.

use std::borrow::Cow;

use super::types::{Coord, Envelope};

/// Ordered coordinates of one linear component; segment `i` is `pts[i]`–`pts[i+1]`.
#[derive(Clone, Debug)]
pub struct SegmentChain<'a> {
    pts: Cow<'a, [Coord]>,
    tag: Option<usize>,
}

impl<'a> SegmentChain<'a> {
    /// Chain over `coords` with consecutive duplicates removed.
    pub fn new(coords: &'a [Coord]) -> Self {
        let pts = if has_repeated_points(coords) {
            Cow::Owned(remove_repeated_points(coords))
        } else {
            Cow::Borrowed(coords)
        };
        Self { pts, tag: None }
    }

    /// Chain carrying caller data (e.g. a ring slot in a touch graph).
    pub fn with_tag(coords: &'a [Coord], tag: Option<usize>) -> Self {
        let mut chain = Self::new(coords);
        chain.tag = tag;
        chain
    }

    #[inline]
    pub fn tag(&self) -> Option<usize> {
        self.tag
    }

    #[inline]
    pub fn coords(&self) -> &[Coord] {
        &self.pts
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.pts.len().saturating_sub(1)
    }

    #[inline]
    pub fn coord(&self, i: usize) -> Coord {
        self.pts[i]
    }

    #[inline]
    pub fn segment(&self, i: usize) -> (Coord, Coord) {
        (self.pts[i], self.pts[i + 1])
    }

    #[inline]
    pub fn segment_envelope(&self, i: usize) -> Envelope {
        Envelope::of_segment(self.pts[i], self.pts[i + 1])
    }

    pub fn is_closed(&self) -> bool {
        match (self.pts.first(), self.pts.last()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// True if two consecutive coordinates are equal.
pub fn has_repeated_points(pts: &[Coord]) -> bool {
    pts.windows(2).any(|w| w[0] == w[1])
}

/// Copy of `pts` without consecutive duplicates.
pub fn remove_repeated_points(pts: &[Coord]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::with_capacity(pts.len());
    for p in pts {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    out
}
