//! Gaussian kernel density estimation, 2D and 1D.
//!
//! Both estimators are pure functions. The 2D form scores an arbitrary query
//! point against a point cloud (O(N) per query); the 1D form turns a discrete
//! probability sample into a smooth curve over a fixed evaluation axis
//! (O(N*M)). Neither caches anything.

use crate::rose::Point;
use std::f64::consts::PI;

pub const DEFAULT_BANDWIDTH_2D: f64 = 0.01;
pub const DEFAULT_BANDWIDTH_1D: f64 = 0.05;
pub const DEFAULT_AXIS_POINTS: usize = 200;

/// Normalized 2D Gaussian KDE of `cloud` evaluated at `query`.
///
/// An empty cloud has no mass anywhere and evaluates to 0.
pub fn density2d(query: Point, cloud: &[Point], bandwidth: f64) -> f64 {
    if cloud.is_empty() {
        return 0.0;
    }
    let two_bw2 = 2.0 * bandwidth * bandwidth;
    let sum: f64 = cloud
        .iter()
        .map(|p| {
            let dx = query.x - p.x;
            let dy = query.y - p.y;
            (-(dx * dx + dy * dy) / two_bw2).exp()
        })
        .sum();
    sum / (PI * two_bw2 * cloud.len() as f64)
}

/// Evenly spaced evaluation axis covering [0, 1], endpoints included.
pub fn probability_axis(points: usize) -> Vec<f64> {
    let n = points.max(2);
    (0..n).map(|i| i as f64 / (n as f64 - 1.0)).collect()
}

/// 1D Gaussian KDE of `samples` evaluated at each point of `axis`.
pub fn density1d(samples: &[f64], bandwidth: f64, axis: &[f64]) -> Vec<f64> {
    if samples.is_empty() {
        return vec![0.0; axis.len()];
    }
    let factor = 1.0 / ((2.0 * PI).sqrt() * bandwidth * samples.len() as f64);
    axis.iter()
        .map(|&x| {
            let sum: f64 = samples
                .iter()
                .map(|&s| (-0.5 * ((x - s) / bandwidth).powi(2)).exp())
                .sum();
            sum * factor
        })
        .collect()
}
