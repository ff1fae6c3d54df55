use anyhow::{bail, Result};
use url::Url;

use uqplay::config::Config;
use uqplay::logging::{json_log, json_log_at, obj, v_num, v_str, Level};
use uqplay::oracle::GroundTruthPolicy;
use uqplay::plot::{self, DensityPanelOptions};
use uqplay::results;
use uqplay::rose::{build_rose_dataset, RoseConfig};
use uqplay::source::{FileSource, HttpSource, ResultSource};
use uqplay::view::{FetchState, GridAxes, Selection, ViewState};

/// Load one result set, emit the heatmap and scatter payloads, and if a
/// click coordinate is configured, the density comparison panel for that
/// point. Chart payloads go to stdout as JSON, one per line, for whatever
/// renders them.
#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let selection = Selection {
        model: cfg.model.clone(),
        perturbation: cfg.perturbation.clone(),
        measure: cfg.measure.clone(),
    };

    let source: Box<dyn ResultSource> = match &cfg.results_url {
        Some(base) => {
            let base = Url::parse(base)?;
            json_log(
                "source",
                obj(&[("kind", v_str("http")), ("base", v_str(base.as_str()))]),
            );
            Box::new(HttpSource::new(base))
        }
        None => {
            json_log(
                "source",
                obj(&[("kind", v_str("file")), ("dir", v_str(&cfg.results_dir))]),
            );
            Box::new(FileSource::new(&cfg.results_dir))
        }
    };

    // One fetch per (model, perturbation) selection; any failure is terminal
    // and the view falls back to "unavailable" instead of a partial render.
    let view = ViewState::loading(selection);
    let origin = source.origin(&cfg.model);
    let outcome = match source.fetch_raw(&cfg.model).await {
        Ok(raw) => results::load_entry(&raw, &origin, &cfg.model, &cfg.perturbation)
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    let view = view.resolved(outcome);

    let entry = match &view.fetch {
        FetchState::Ready(entry) => entry.clone(),
        FetchState::Failed(msg) => {
            json_log_at(
                Level::Error,
                "load",
                obj(&[("status", v_str("unavailable")), ("error", v_str(msg))]),
            );
            bail!("{}", msg);
        }
        FetchState::Loading => bail!("fetch did not resolve"),
    };
    json_log(
        "load",
        obj(&[
            ("status", v_str("ok")),
            ("model", v_str(&entry.model_name)),
            ("perturbation", v_str(&entry.pdc_perturbation)),
            ("grid_points", v_num(entry.x_grid.len() as f64)),
            ("grid_size", v_num(entry.grid_size() as f64)),
        ]),
    );

    let axes = GridAxes::from_grid(&entry.x_grid);
    let heatmap = plot::heatmap(&entry, &axes, &cfg.measure)?;
    let scatter = plot::scatter(&entry, &cfg.measure)?;
    println!("{}", serde_json::to_string(&heatmap)?);
    println!("{}", serde_json::to_string(&scatter)?);

    if let Some((cx, cy)) = cfg.click {
        let Some(idx) = axes.resolve_click(cx, cy) else {
            json_log_at(
                Level::Warn,
                "click",
                obj(&[("status", v_str("empty_grid"))]),
            );
            return Ok(());
        };
        let view = view.with_selected_point(idx);
        json_log(
            "click",
            obj(&[
                ("x", v_num(cx)),
                ("y", v_num(cy)),
                ("grid_index", v_num(idx as f64)),
            ]),
        );

        // Built once per run; recomputing per click would give the same
        // dataset anyway, the seed is fixed.
        let dataset = build_rose_dataset(&RoseConfig {
            noise_scale: cfg.noise_scale,
            seed: cfg.seed,
            resolution: cfg.curve_resolution,
        });
        let policy = GroundTruthPolicy {
            sigma_base: cfg.sigma_base,
            k: cfg.k,
            bandwidth: cfg.kde_bandwidth,
        };
        let opts = DensityPanelOptions {
            samples: cfg.gt_samples,
            seed: cfg.seed,
            bandwidth: cfg.density_bandwidth,
            axis_points: cfg.axis_points,
        };
        if let Some(selected) = view.selected_point {
            let panel = plot::density_panel(&entry, &dataset, &policy, selected, &opts)?;
            println!("{}", serde_json::to_string(&panel)?);
        }
    }

    Ok(())
}
