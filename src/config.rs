//! Environment-driven configuration.

use crate::kde::{DEFAULT_AXIS_POINTS, DEFAULT_BANDWIDTH_1D, DEFAULT_BANDWIDTH_2D};
use crate::oracle::DEFAULT_SAMPLE_COUNT;
use crate::rose::{CURVE_RESOLUTION, DEFAULT_NOISE_SCALE, DEFAULT_SEED};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for result documents; unset means read from `results_dir`.
    pub results_url: Option<String>,
    pub results_dir: String,
    pub model: String,
    pub perturbation: String,
    pub measure: String,
    pub seed: u32,
    pub noise_scale: f64,
    pub curve_resolution: usize,
    pub kde_bandwidth: f64,
    pub sigma_base: f64,
    pub k: f64,
    pub gt_samples: usize,
    pub density_bandwidth: f64,
    pub axis_points: usize,
    /// Plot-space coordinate to probe, as if the user clicked there.
    pub click: Option<(f64, f64)>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            results_url: std::env::var("RESULTS_URL").ok(),
            results_dir: std::env::var("RESULTS_DIR").unwrap_or_else(|_| "public".to_string()),
            model: std::env::var("MODEL").unwrap_or_else(|_| "mlp".to_string()),
            perturbation: std::env::var("PERTURBATION").unwrap_or_else(|_| "tree".to_string()),
            measure: std::env::var("MEASURE")
                .unwrap_or_else(|_| "total_uncertainty".to_string()),
            seed: env_parse("SEED", DEFAULT_SEED),
            noise_scale: env_parse("NOISE_SCALE", DEFAULT_NOISE_SCALE),
            curve_resolution: env_parse("CURVE_RESOLUTION", CURVE_RESOLUTION),
            kde_bandwidth: env_parse("KDE_BANDWIDTH", DEFAULT_BANDWIDTH_2D),
            sigma_base: env_parse("SIGMA_BASE", 0.01),
            k: env_parse("SIGMA_K", 1.0),
            gt_samples: env_parse("GT_SAMPLES", DEFAULT_SAMPLE_COUNT),
            density_bandwidth: env_parse("DENSITY_BANDWIDTH", DEFAULT_BANDWIDTH_1D),
            axis_points: env_parse("AXIS_POINTS", DEFAULT_AXIS_POINTS),
            click: match (env_parse_opt::<f64>("CLICK_X"), env_parse_opt::<f64>("CLICK_Y")) {
                (Some(x), Some(y)) => Some((x, y)),
                _ => None,
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_parse_opt<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
