//! Where result documents come from.
//!
//! The loader in [`crate::results`] only sees a raw string; this seam decides
//! how that string is obtained. HTTP for the deployed tool, the filesystem
//! for offline runs and tests. Fetch failures are terminal for the attempt:
//! there is no retry and no caching here.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[async_trait]
pub trait ResultSource: Send + Sync {
    /// Human-readable origin for error messages and logs.
    fn origin(&self, model: &str) -> String;

    /// Fetch the raw JSON document for a model name.
    async fn fetch_raw(&self, model: &str) -> Result<String>;
}

/// Fetches `{base}/{model}.json` over HTTP.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base,
        }
    }

    fn model_url(&self, model: &str) -> Result<Url> {
        self.base
            .join(&format!("{}.json", model))
            .map_err(|e| anyhow!("cannot build results url for \"{}\": {}", model, e))
    }
}

#[async_trait]
impl ResultSource for HttpSource {
    fn origin(&self, model: &str) -> String {
        self.model_url(model)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}.json", model))
    }

    async fn fetch_raw(&self, model: &str) -> Result<String> {
        let url = self.model_url(model)?;
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("failed to fetch {}: {}", url, e))?;
        if !resp.status().is_success() {
            return Err(anyhow!("failed to fetch {}: {}", url, resp.status()));
        }
        resp.text()
            .await
            .map_err(|e| anyhow!("failed to read body of {}: {}", url, e))
    }
}

/// Reads `{dir}/{model}.json` from disk.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn model_path(&self, model: &str) -> PathBuf {
        self.dir.join(format!("{}.json", model))
    }
}

#[async_trait]
impl ResultSource for FileSource {
    fn origin(&self, model: &str) -> String {
        self.model_path(model).display().to_string()
    }

    async fn fetch_raw(&self, model: &str) -> Result<String> {
        let path = self.model_path(model);
        std::fs::read_to_string(&path)
            .map_err(|e| anyhow!("failed to read {}: {}", path.display(), e))
    }
}
