//! Ground-truth oracle: class-mixing probability and noise level at a point.
//!
//! The oracle combines the two class densities into a mixing probability mu
//! and turns distance-to-curve into a noise magnitude sigma. The distribution
//! sampler then draws from Normal(mu, sigma) so the chart can overlay a
//! ground-truth density against the model's predicted one. Both are pure;
//! nothing here is cached between clicks.

use crate::kde::{density2d, DEFAULT_BANDWIDTH_2D};
use crate::rng::{standard_normal, Mulberry32};
use crate::rose::{Point, RoseDataset};

/// Combined-density floor below which the mixing probability is undefined.
/// Falling back to 0.5 there is policy, not an accident: far from all data,
/// both classes are equally plausible.
const DENSITY_FLOOR: f64 = 1e-12;

pub const DEFAULT_SAMPLE_COUNT: usize = 200;

#[derive(Debug, Clone, Copy)]
pub struct GroundTruthPolicy {
    /// Noise floor at zero distance from the curve.
    pub sigma_base: f64,
    /// Scale applied to the distance-to-curve term.
    pub k: f64,
    /// Bandwidth for the class density estimates.
    pub bandwidth: f64,
}

impl Default for GroundTruthPolicy {
    fn default() -> Self {
        Self {
            sigma_base: 0.01,
            k: 1.0,
            bandwidth: DEFAULT_BANDWIDTH_2D,
        }
    }
}

/// Per-query oracle output; derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTruthParams {
    /// Class-0 mixing probability in [0, 1].
    pub mu: f64,
    /// Non-negative noise scale.
    pub sigma: f64,
}

pub fn ground_truth(
    query: Point,
    dataset: &RoseDataset,
    policy: &GroundTruthPolicy,
) -> GroundTruthParams {
    let d0 = density2d(query, &dataset.class0, policy.bandwidth);
    let d1 = density2d(query, &dataset.class1, policy.bandwidth);
    let total = d0 + d1;
    let mu = if total < DENSITY_FLOOR { 0.5 } else { d0 / total };

    let d_min = dataset
        .curve
        .iter()
        .map(|p| query.distance(p))
        .fold(f64::INFINITY, f64::min);
    // An empty curve leaves d_min infinite; fall back to the noise floor.
    let sigma = if d_min.is_finite() {
        policy.sigma_base + policy.k * d_min
    } else {
        policy.sigma_base
    };

    GroundTruthParams { mu, sigma }
}

/// Draw `n` samples from Normal(mu, sigma) for the queried point.
///
/// A fresh generator per call keeps the overlay identical across clicks on
/// the same point. Samples are not clipped to [0, 1]; display clipping is the
/// chart's concern.
pub fn sample_ground_truth(
    query: Point,
    dataset: &RoseDataset,
    policy: &GroundTruthPolicy,
    n: usize,
    seed: u32,
) -> Vec<f64> {
    let params = ground_truth(query, dataset, policy);
    sample_params(&params, n, seed)
}

pub fn sample_params(params: &GroundTruthParams, n: usize, seed: u32) -> Vec<f64> {
    let mut rng = Mulberry32::new(seed);
    (0..n)
        .map(|_| params.mu + params.sigma * standard_normal(&mut rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rose::{build_rose_dataset, RoseConfig};

    fn empty_dataset() -> RoseDataset {
        RoseDataset {
            class0: vec![],
            class1: vec![],
            curve: vec![],
        }
    }

    #[test]
    fn empty_clouds_give_exactly_half() {
        let params = ground_truth(
            Point::new(0.1, 0.1),
            &empty_dataset(),
            &GroundTruthPolicy::default(),
        );
        assert_eq!(params.mu, 0.5);
        assert!(params.mu.is_finite() && params.sigma.is_finite());
    }

    #[test]
    fn distant_query_gives_exactly_half() {
        let ds = build_rose_dataset(&RoseConfig::default());
        let params = ground_truth(
            Point::new(1e6, 1e6),
            &ds,
            &GroundTruthPolicy::default(),
        );
        assert_eq!(params.mu, 0.5);
    }

    #[test]
    fn query_inside_class0_petal_leans_class0() {
        let ds = build_rose_dataset(&RoseConfig::default());
        // Petal tip near theta = pi/4 belongs to class 0; the origin would
        // not do, all four petals meet there.
        let on_curve = ds.curve[250];
        let params = ground_truth(on_curve, &ds, &GroundTruthPolicy::default());
        assert!(params.mu > 0.9, "mu {} should be close to 1", params.mu);
    }

    #[test]
    fn sigma_grows_with_distance_from_curve() {
        let ds = build_rose_dataset(&RoseConfig::default());
        let policy = GroundTruthPolicy::default();
        let near = ground_truth(ds.curve[100], &ds, &policy);
        let far = ground_truth(Point::new(0.9, -0.9), &ds, &policy);
        assert!(near.sigma < far.sigma);
        assert!((near.sigma - policy.sigma_base).abs() < 1e-9);
    }

    #[test]
    fn zero_sigma_collapses_samples_to_mu() {
        let params = GroundTruthParams { mu: 0.37, sigma: 0.0 };
        let samples = sample_params(&params, 100, 42);
        assert!(samples.iter().all(|&s| s == 0.37));
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let params = GroundTruthParams { mu: 0.5, sigma: 0.2 };
        assert_eq!(sample_params(&params, 50, 42), sample_params(&params, 50, 42));
        assert_ne!(sample_params(&params, 50, 42), sample_params(&params, 50, 43));
    }
}
