//! Pairwise segment search over a set of chains.
//!
//! Segments are sorted by the minimum x of their envelopes and swept left to
//! right; every pair whose envelopes overlap is handed to the callback exactly
//! once. The callback steers the search: `ControlFlow::Break` stops it.

use std::ops::ControlFlow;

use tracing::trace;

use crate::geom::{Envelope, SegmentChain};

/// Identity of one segment: chain position and index of its first vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SegmentRef {
    pub chain: usize,
    pub index: usize,
}

struct Item {
    env: Envelope,
    seg: SegmentRef,
}

/// Invoke `visit` for every pair of distinct segments with overlapping
/// envelopes, across and within `chains`.
///
/// Pairs are visited in a deterministic order. Returns the `Break` value of
/// the first callback that stops the search.
pub fn segment_sweep<B, F>(chains: &[SegmentChain<'_>], mut visit: F) -> ControlFlow<B>
where
    F: FnMut(SegmentRef, SegmentRef) -> ControlFlow<B>,
{
    let mut items: Vec<Item> = chains
        .iter()
        .enumerate()
        .flat_map(|(chain, c)| {
            (0..c.num_segments()).map(move |index| Item {
                env: c.segment_envelope(index),
                seg: SegmentRef { chain, index },
            })
        })
        .collect();
    items.sort_by(|a, b| a.env.min.x.total_cmp(&b.env.min.x));

    let mut tested = 0usize;
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            if b.env.min.x > a.env.max.x {
                break;
            }
            if b.env.min.y > a.env.max.y || b.env.max.y < a.env.min.y {
                continue;
            }
            tested += 1;
            if let ControlFlow::Break(v) = visit(a.seg, b.seg) {
                trace!(segments = items.len(), tested, "segment sweep stopped early");
                return ControlFlow::Break(v);
            }
        }
    }
    trace!(segments = items.len(), tested, "segment sweep exhausted");
    ControlFlow::Continue(())
}
