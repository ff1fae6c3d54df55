//! View state and click-to-grid resolution.
//!
//! The view owns exactly two pieces of state: the current selection and the
//! outcome of the fetch it triggered. Both are immutable values replaced
//! wholesale on every transition, never mutated in place. A completed fetch
//! simply overwrites whatever is displayed; replies can arrive out of order
//! and the last one to complete wins. There is no cancellation.

use crate::results::ResultEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub model: String,
    pub perturbation: String,
    pub measure: String,
}

/// Outcome of the one asynchronous operation in the system.
#[derive(Debug, Clone)]
pub enum FetchState {
    Loading,
    Ready(ResultEntry),
    Failed(String),
}

impl FetchState {
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub selection: Selection,
    pub fetch: FetchState,
    /// Grid index of the clicked point, if any.
    pub selected_point: Option<usize>,
}

impl ViewState {
    pub fn loading(selection: Selection) -> Self {
        Self {
            selection,
            fetch: FetchState::Loading,
            selected_point: None,
        }
    }

    /// Changing any control issues exactly one new fetch and drops the
    /// current point selection.
    pub fn reselect(&self, selection: Selection) -> Self {
        ViewState::loading(selection)
    }

    /// Record a completed fetch. Last write wins.
    pub fn resolved(&self, outcome: Result<ResultEntry, String>) -> Self {
        Self {
            selection: self.selection.clone(),
            fetch: match outcome {
                Ok(entry) => FetchState::Ready(entry),
                Err(msg) => FetchState::Failed(msg),
            },
            selected_point: None,
        }
    }

    pub fn with_selected_point(&self, idx: usize) -> Self {
        Self {
            selection: self.selection.clone(),
            fetch: self.fetch.clone(),
            selected_point: Some(idx),
        }
    }
}

/// Sorted, deduplicated axis coordinates of a square evaluation grid.
#[derive(Debug, Clone)]
pub struct GridAxes {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl GridAxes {
    pub fn from_grid(grid: &[[f64; 2]]) -> Self {
        Self {
            xs: sorted_unique(grid.iter().map(|p| p[0])),
            ys: sorted_unique(grid.iter().map(|p| p[1])),
        }
    }

    pub fn grid_size(&self) -> usize {
        self.xs.len()
    }

    /// Map a clicked plot coordinate to the nearest grid index
    /// (row-major, index = yi * grid_size + xi).
    pub fn resolve_click(&self, x: f64, y: f64) -> Option<usize> {
        let xi = nearest(&self.xs, x)?;
        let yi = nearest(&self.ys, y)?;
        Some(yi * self.xs.len() + xi)
    }
}

// Grid coordinates repeat bit-identically within a document, so exact
// dedup is safe here.
fn sorted_unique(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.collect();
    out.sort_by(f64::total_cmp);
    out.dedup();
    out
}

fn nearest(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter()
        .enumerate()
        .min_by(|a, b| (a.1 - value).abs().total_cmp(&(b.1 - value).abs()))
        .map(|(i, _)| i)
}
