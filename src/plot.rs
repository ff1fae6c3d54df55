//! Chart payloads for the external charting collaborator.
//!
//! The chart library is an external capability: it accepts a data/config
//! description and produces a visual plot. These types are that description,
//! serialized as JSON. Nothing here draws anything.

use crate::kde::{density1d, probability_axis, DEFAULT_AXIS_POINTS, DEFAULT_BANDWIDTH_1D};
use crate::oracle::{sample_ground_truth, GroundTruthPolicy, DEFAULT_SAMPLE_COUNT};
use crate::results::ResultEntry;
use crate::rose::{Point, RoseDataset, DEFAULT_SEED};
use crate::view::GridAxes;
use anyhow::{anyhow, bail, Result};
use serde::Serialize;

/// Measure keys drawn as vertical reference lines in the density panel.
const REFERENCE_MEASURES: [&str; 3] = [
    "aleatoric_uncertainty",
    "epistemic_uncertainty",
    "var_eu",
];

/// 2D uncertainty heatmap: row-major z matrix plus axis coordinates.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapSpec {
    pub measure: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<f64>>,
    pub zmax: f64,
}

/// Training-sample overlay plus the extreme-uncertainty markers.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterSpec {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub labels: Vec<i64>,
    pub max_uncertainty: Option<Marker>,
    pub min_uncertainty: Option<Marker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
}

/// Predicted-vs-ground-truth density comparison for one grid point.
#[derive(Debug, Clone, Serialize)]
pub struct DensityPanelSpec {
    pub location: (f64, f64),
    pub axis: Vec<f64>,
    /// Absent when the document carries no predicted samples for the point.
    pub predicted: Option<Vec<f64>>,
    pub ground_truth: Vec<f64>,
    pub reference_lines: Vec<ReferenceLine>,
}

#[derive(Debug, Clone)]
pub struct DensityPanelOptions {
    pub samples: usize,
    pub seed: u32,
    pub bandwidth: f64,
    pub axis_points: usize,
}

impl Default for DensityPanelOptions {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLE_COUNT,
            seed: DEFAULT_SEED,
            bandwidth: DEFAULT_BANDWIDTH_1D,
            axis_points: DEFAULT_AXIS_POINTS,
        }
    }
}

pub fn heatmap(
    entry: &ResultEntry,
    axes: &GridAxes,
    measure: &str,
) -> Result<HeatmapSpec> {
    let values = measure_values(entry, measure)?;
    let g = axes.grid_size();
    if values.len() != g * g {
        bail!(
            "measure \"{}\" has {} values for a {}x{} grid",
            measure,
            values.len(),
            g,
            g
        );
    }
    let z = (0..g).map(|i| values[i * g..(i + 1) * g].to_vec()).collect();
    let zmax = entry
        .vmax
        .get(measure)
        .copied()
        .unwrap_or_else(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    Ok(HeatmapSpec {
        measure: measure.to_string(),
        x: axes.xs.clone(),
        y: axes.ys.clone(),
        z,
        zmax,
    })
}

pub fn scatter(entry: &ResultEntry, measure: &str) -> Result<ScatterSpec> {
    let values = measure_values(entry, measure)?;
    let max_uncertainty = extreme_marker(entry, values, "max uncertainty", |a, b| a > b);
    let min_uncertainty = extreme_marker(entry, values, "min uncertainty", |a, b| a < b);
    Ok(ScatterSpec {
        x: entry.x.iter().map(|p| p[0]).collect(),
        y: entry.x.iter().map(|p| p[1]).collect(),
        labels: entry.y.clone(),
        max_uncertainty,
        min_uncertainty,
    })
}

/// Build the density comparison for a clicked grid index: ground-truth
/// samples drawn fresh from the oracle, predicted samples taken from the
/// document when present, both smoothed over the same probability axis.
pub fn density_panel(
    entry: &ResultEntry,
    dataset: &RoseDataset,
    policy: &GroundTruthPolicy,
    idx: usize,
    opts: &DensityPanelOptions,
) -> Result<DensityPanelSpec> {
    let grid_point = entry.x_grid.get(idx).ok_or_else(|| {
        anyhow!(
            "grid index {} out of range ({} grid points)",
            idx,
            entry.x_grid.len()
        )
    })?;
    let query = Point::new(grid_point[0], grid_point[1]);
    let axis = probability_axis(opts.axis_points);

    let true_samples = sample_ground_truth(query, dataset, policy, opts.samples, opts.seed);
    let ground_truth = density1d(&true_samples, opts.bandwidth, &axis);

    let pred_samples = entry
        .proba
        .as_ref()
        .and_then(|p| p.get(idx))
        .and_then(|rows| rows.first())
        .filter(|s| !s.is_empty());
    let predicted = pred_samples.map(|s| density1d(s, opts.bandwidth, &axis));
    let predicted_mean = pred_samples
        .map(|s| s.iter().sum::<f64>() / s.len() as f64)
        .or_else(|| entry.mean_class0.as_ref().and_then(|m| m.get(idx).copied()));

    let mut reference_lines = Vec::new();
    if let Some(mean) = predicted_mean {
        reference_lines.push(ReferenceLine {
            label: "predicted_mean".to_string(),
            value: mean,
        });
    }
    for key in REFERENCE_MEASURES {
        if let Some(&value) = entry.uncertainty.get(key).and_then(|vs| vs.get(idx)) {
            reference_lines.push(ReferenceLine {
                label: key.to_string(),
                value,
            });
        }
    }

    Ok(DensityPanelSpec {
        location: (query.x, query.y),
        axis,
        predicted,
        ground_truth,
        reference_lines,
    })
}

fn measure_values<'a>(
    entry: &'a ResultEntry,
    measure: &str,
) -> Result<&'a Vec<f64>> {
    entry
        .uncertainty
        .get(measure)
        .ok_or_else(|| anyhow!("unknown uncertainty measure \"{}\"", measure))
}

fn extreme_marker(
    entry: &ResultEntry,
    values: &[f64],
    label: &str,
    better: fn(f64, f64) -> bool,
) -> Option<Marker> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if !better(v, b) => {}
            _ => best = Some((i, v)),
        }
    }
    let (idx, _) = best?;
    let p = entry.x_grid.get(idx)?;
    Some(Marker {
        x: p[0],
        y: p[1],
        label: label.to_string(),
    })
}
