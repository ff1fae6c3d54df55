//! Synthetic rose-curve dataset.
//!
//! The two-class "rose" dataset is generated from the parametric curve
//! r = sin(2θ): four petals, alternating class membership by angular sector.
//! Each curve point is emitted twice per class cloud, once exact and once
//! jittered, so the kernel density estimate sees a slightly thickened curve.
//! Construction is deterministic for a fixed seed and happens once per mount;
//! the dataset is never mutated afterwards.

use crate::rng::Mulberry32;
use std::f64::consts::PI;

pub const CURVE_RESOLUTION: usize = 2000;
pub const DEFAULT_NOISE_SCALE: f64 = 0.01;
pub const DEFAULT_SEED: u32 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone)]
pub struct RoseConfig {
    pub noise_scale: f64,
    pub seed: u32,
    pub resolution: usize,
}

impl Default for RoseConfig {
    fn default() -> Self {
        Self {
            noise_scale: DEFAULT_NOISE_SCALE,
            seed: DEFAULT_SEED,
            resolution: CURVE_RESOLUTION,
        }
    }
}

/// Fully materialized dataset: one cloud per class plus the noise-free curve.
#[derive(Debug, Clone)]
pub struct RoseDataset {
    pub class0: Vec<Point>,
    pub class1: Vec<Point>,
    pub curve: Vec<Point>,
}

pub fn build_rose_dataset(cfg: &RoseConfig) -> RoseDataset {
    let mut rng = Mulberry32::new(cfg.seed);
    let steps = cfg.resolution.max(2);

    let mut curve = Vec::with_capacity(steps);
    let mut red = Vec::new();
    let mut blue = Vec::new();
    for i in 0..steps {
        let theta = 2.0 * PI * i as f64 / (steps as f64 - 1.0);
        let r = (2.0 * theta).sin();
        let p = Point::new(r * theta.cos(), r * theta.sin());
        curve.push(p);
        if in_class0_sector(theta) {
            red.push(p);
        } else {
            blue.push(p);
        }
    }

    // Class 0 is jittered before class 1; the draw order is part of the
    // reproducibility contract.
    let class0 = noisy(&red, cfg.noise_scale, &mut rng);
    let class1 = noisy(&blue, cfg.noise_scale, &mut rng);

    RoseDataset { class0, class1, curve }
}

/// Alternating quadrant bands: petals one and three belong to class 0.
fn in_class0_sector(theta: f64) -> bool {
    (0.0..=PI / 2.0).contains(&theta) || (PI..=1.5 * PI).contains(&theta)
}

/// Every source point is kept and emits one jittered companion, so the
/// output cloud is exactly twice the input.
fn noisy(points: &[Point], noise_scale: f64, rng: &mut Mulberry32) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for p in points {
        let nx = p.x + (rng.next_f64() * 2.0 - 1.0) * noise_scale;
        let ny = p.y + (rng.next_f64() * 2.0 - 1.0) * noise_scale;
        out.push(*p);
        out.push(Point::new(nx, ny));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_has_configured_resolution() {
        let ds = build_rose_dataset(&RoseConfig::default());
        assert_eq!(ds.curve.len(), CURVE_RESOLUTION);
    }

    #[test]
    fn clouds_are_double_the_sector_counts() {
        let ds = build_rose_dataset(&RoseConfig::default());
        let class0_curve = ds
            .curve
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let theta = 2.0 * PI * *i as f64 / (CURVE_RESOLUTION as f64 - 1.0);
                in_class0_sector(theta)
            })
            .count();
        assert_eq!(ds.class0.len(), 2 * class0_curve);
        assert_eq!(ds.class1.len(), 2 * (CURVE_RESOLUTION - class0_curve));
    }

    #[test]
    fn repeated_builds_are_identical() {
        let cfg = RoseConfig::default();
        let a = build_rose_dataset(&cfg);
        let b = build_rose_dataset(&cfg);
        assert_eq!(a.class0, b.class0);
        assert_eq!(a.class1, b.class1);
        assert_eq!(a.curve, b.curve);
    }

    #[test]
    fn jitter_stays_within_noise_scale() {
        let cfg = RoseConfig::default();
        let ds = build_rose_dataset(&cfg);
        // Pairs are (exact, jittered); the jittered copy is at most
        // noise_scale away per axis.
        for pair in ds.class0.chunks(2) {
            let (exact, jittered) = (pair[0], pair[1]);
            assert!((exact.x - jittered.x).abs() <= cfg.noise_scale);
            assert!((exact.y - jittered.y).abs() <= cfg.noise_scale);
        }
    }

    #[test]
    fn zero_noise_duplicates_points() {
        let cfg = RoseConfig {
            noise_scale: 0.0,
            ..RoseConfig::default()
        };
        let ds = build_rose_dataset(&cfg);
        for pair in ds.class0.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }
}
