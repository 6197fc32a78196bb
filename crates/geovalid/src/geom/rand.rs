//! Random star-shaped rings and polygons (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic inputs for property tests and benchmarks. Every ring drawn
//!   here is simple and valid by construction, so checkers must accept it.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter. Angles stay strictly increasing and radii positive, so the
//!   ring is star-shaped about the origin and cannot self-intersect.
//! - Holes are the shell scaled towards the origin, which keeps them strictly
//!   inside; they are emitted clockwise.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Coord, LinearRing, MultiPolygon, Polygon};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude), clamped to [0, 0.9].
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            random_phase: true,
        }
    }
}

impl RadialCfg {
    /// Smallest and largest radius a drawn vertex can have.
    fn radius_bounds(&self) -> (f64, f64) {
        let rj = self.radial_jitter.clamp(0.0, 0.9);
        let r0 = self.base_radius.max(1e-9);
        ((1.0 - rj) * r0, (1.0 + rj) * r0)
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a closed, counter-clockwise, star-shaped ring around `center`.
pub fn draw_ring_radial(cfg: RadialCfg, tok: ReplayToken, center: Coord) -> LinearRing {
    let mut rng = tok.to_std_rng();
    // Four vertices keep every angular gap below π, so the center stays in the kernel.
    let n = cfg.vertex_count.sample(&mut rng).max(4);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let (r_min, r_max) = cfg.radius_bounds();
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut coords: Vec<Coord> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let r = rng.gen_range(r_min..=r_max);
            center + Coord::new(th.cos() * r, th.sin() * r)
        })
        .collect();
    coords.push(coords[0]);
    LinearRing::new(coords)
}

/// Draw a polygon whose holes are shrunken, reversed copies of the shell.
///
/// `hole_scales` must lie in (0, r_min/r_max); values outside are clamped so the
/// holes stay strictly inside the shell. Multiple holes are nested copies, so
/// at most one scale should be given if a valid polygon is wanted.
pub fn draw_polygon_radial(
    cfg: RadialCfg,
    tok: ReplayToken,
    center: Coord,
    hole_scales: &[f64],
) -> Polygon {
    let shell = draw_ring_radial(cfg, tok, center);
    let (r_min, r_max) = cfg.radius_bounds();
    let s_max = 0.95 * r_min / r_max;
    let holes = hole_scales
        .iter()
        .map(|&s| {
            let s = s.clamp(1e-3, s_max);
            let mut pts: Vec<Coord> = shell
                .coords
                .iter()
                .map(|p| center + (p - center) * s)
                .collect();
            pts.reverse();
            LinearRing::new(pts)
        })
        .collect();
    Polygon::new(shell, holes)
}

/// Draw `count` pairwise disjoint polygons laid out on a square grid.
pub fn draw_multipolygon_grid(
    cfg: RadialCfg,
    tok: ReplayToken,
    count: usize,
    with_holes: bool,
) -> MultiPolygon {
    let (_, r_max) = cfg.radius_bounds();
    let spacing = 2.5 * r_max;
    let cols = (count as f64).sqrt().ceil().max(1.0) as usize;
    let polygons = (0..count)
        .map(|k| {
            let center = Coord::new((k % cols) as f64 * spacing, (k / cols) as f64 * spacing);
            let t = ReplayToken {
                seed: tok.seed,
                index: tok.index.wrapping_add(k as u64),
            };
            let scales: &[f64] = if with_holes { &[0.5] } else { &[] };
            draw_polygon_radial(cfg, t, center, scales)
        })
        .collect();
    MultiPolygon { polygons }
}
