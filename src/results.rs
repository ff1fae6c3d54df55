//! Precomputed result documents: data model, lookup, validation.
//!
//! One JSON document per model, each an array of entries keyed by
//! (model_name, pdc_perturbation). Uncertainty scores arrive precomputed;
//! this module never calculates them, it only finds the requested entry and
//! refuses to hand over anything malformed. All four failure classes
//! (transport is the source's concern, then parse, no-match, missing-key)
//! are terminal for the attempt: no retry, no partial result set.

use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Keys every matched entry must carry before typed decoding is attempted.
pub const REQUIRED_KEYS: [&str; 5] = ["uncertainty", "vmax", "X", "y", "X_grid"];

/// One (model, perturbation) result set.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEntry {
    pub model_name: String,
    pub pdc_perturbation: String,
    /// Measure key (e.g. "var_eu", "aleatoric_uncertainty") to one value per
    /// grid point.
    pub uncertainty: HashMap<String, Vec<f64>>,
    /// Per-measure colorbar maxima.
    pub vmax: HashMap<String, f64>,
    /// Raw training points.
    #[serde(rename = "X")]
    pub x: Vec<[f64; 2]>,
    /// Integer class labels, one per training point.
    pub y: Vec<i64>,
    /// Evaluation grid, row-major over a square grid.
    #[serde(rename = "X_grid")]
    pub x_grid: Vec<[f64; 2]>,
    /// Predicted probability samples per grid point, when the pipeline
    /// exported them.
    #[serde(default)]
    pub proba: Option<Vec<Vec<Vec<f64>>>>,
    #[serde(default)]
    pub kde_class0: Option<Vec<f64>>,
    #[serde(default)]
    pub mean_class0: Option<Vec<f64>>,
}

impl ResultEntry {
    /// Side length of the square evaluation grid.
    pub fn grid_size(&self) -> usize {
        (self.x_grid.len() as f64).sqrt().round() as usize
    }
}

/// Parse a raw document and extract the validated entry for
/// (model, perturbation). `origin` is the URL or path the document came
/// from, used only in error messages.
pub fn load_entry(
    raw: &str,
    origin: &str,
    model: &str,
    perturbation: &str,
) -> Result<ResultEntry> {
    let doc: Value =
        serde_json::from_str(raw).map_err(|e| anyhow!("invalid JSON in {}: {}", origin, e))?;
    let entries = doc
        .as_array()
        .ok_or_else(|| anyhow!("expected an array in {}, got {}", origin, json_type(&doc)))?;

    let matched = entries
        .iter()
        .find(|item| {
            item.get("model_name").and_then(Value::as_str) == Some(model)
                && item.get("pdc_perturbation").and_then(Value::as_str) == Some(perturbation)
        })
        .ok_or_else(|| {
            anyhow!(
                "no compute results for model=\"{}\" perturbation=\"{}\"",
                model,
                perturbation
            )
        })?;

    // Name the missing key instead of letting serde produce a generic
    // decode error.
    for key in REQUIRED_KEYS {
        if matched.get(key).is_none() {
            bail!("missing key \"{}\" in compute-results entry", key);
        }
    }

    let entry: ResultEntry = serde_json::from_value(matched.clone())
        .map_err(|e| anyhow!("malformed entry in {}: {}", origin, e))?;
    validate_entry(&entry)?;
    Ok(entry)
}

/// Structural invariants: square grid, and every measure array aligned 1:1
/// with the grid.
pub fn validate_entry(entry: &ResultEntry) -> Result<()> {
    let n = entry.x_grid.len();
    let g = entry.grid_size();
    if g * g != n {
        bail!("X_grid length {} is not a perfect square", n);
    }
    for (key, values) in &entry.uncertainty {
        if values.len() != n {
            bail!(
                "uncertainty[\"{}\"] has {} values for {} grid points",
                key,
                values.len(),
                n
            );
        }
    }
    if entry.x.len() != entry.y.len() {
        bail!(
            "{} training points but {} labels",
            entry.x.len(),
            entry.y.len()
        );
    }
    Ok(())
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_doc() -> String {
        json!([{
            "model_name": "mlp",
            "pdc_perturbation": "tree",
            "uncertainty": {
                "total_uncertainty": [0.1, 0.2, 0.3, 0.4],
                "aleatoric_uncertainty": [0.05, 0.1, 0.15, 0.2]
            },
            "vmax": { "total_uncertainty": 0.4, "aleatoric_uncertainty": 0.2 },
            "X": [[0.0, 0.0], [0.5, 0.5]],
            "y": [0, 1],
            "X_grid": [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]]
        }])
        .to_string()
    }

    #[test]
    fn loads_matching_entry() {
        let entry = load_entry(&sample_doc(), "mlp.json", "mlp", "tree").unwrap();
        assert_eq!(entry.model_name, "mlp");
        assert_eq!(entry.grid_size(), 2);
        assert!(entry.proba.is_none());
    }

    #[test]
    fn invalid_json_names_the_origin() {
        let err = load_entry("{not json", "mlp.json", "mlp", "tree").unwrap_err();
        assert!(err.to_string().contains("mlp.json"), "{}", err);
    }

    #[test]
    fn non_array_document_is_rejected() {
        let err = load_entry("{}", "mlp.json", "mlp", "tree").unwrap_err();
        assert!(err.to_string().contains("expected an array"), "{}", err);
    }

    #[test]
    fn no_match_names_both_arguments() {
        let err = load_entry(&sample_doc(), "mlp.json", "mlp", "anchor").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("mlp") && msg.contains("anchor"), "{}", msg);
    }

    #[test]
    fn missing_required_key_is_named() {
        let doc = json!([{
            "model_name": "mlp",
            "pdc_perturbation": "tree",
            "uncertainty": {},
            "vmax": {},
            "X": [],
            "X_grid": []
        }])
        .to_string();
        let err = load_entry(&doc, "mlp.json", "mlp", "tree").unwrap_err();
        assert!(err.to_string().contains("\"y\""), "{}", err);
    }

    #[test]
    fn non_square_grid_is_rejected() {
        let doc = json!([{
            "model_name": "mlp",
            "pdc_perturbation": "tree",
            "uncertainty": { "total_uncertainty": [0.1, 0.2, 0.3] },
            "vmax": { "total_uncertainty": 0.3 },
            "X": [],
            "y": [],
            "X_grid": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]
        }])
        .to_string();
        let err = load_entry(&doc, "mlp.json", "mlp", "tree").unwrap_err();
        assert!(err.to_string().contains("perfect square"), "{}", err);
    }

    #[test]
    fn misaligned_measure_is_rejected() {
        let doc = json!([{
            "model_name": "mlp",
            "pdc_perturbation": "tree",
            "uncertainty": { "total_uncertainty": [0.1] },
            "vmax": { "total_uncertainty": 0.1 },
            "X": [],
            "y": [],
            "X_grid": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
        }])
        .to_string();
        let err = load_entry(&doc, "mlp.json", "mlp", "tree").unwrap_err();
        assert!(err.to_string().contains("total_uncertainty"), "{}", err);
    }
}
