//! Infrastructure implementations of the `ConfigFetcher` port.
//!
//! The HTTP fetcher blocks inside `spawn_blocking` — `ureq` is a blocking
//! client and must not run on the async executor threads.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::ConfigFetcher;
use crate::domain::error::FetchError;

/// Default location of hosted configurations.
pub const DEFAULT_CONFIG_BASE_URL: &str =
    "https://raw.githubusercontent.com/agora-stack/agora-configs/main";

/// Fetches `{base_url}/{name}.env` with an optional bearer token for
/// privately hosted configurations.
pub struct HttpConfigFetcher {
    base_url: String,
    token: Option<String>,
}

impl HttpConfigFetcher {
    #[must_use]
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self { base_url, token }
    }
}

impl ConfigFetcher for HttpConfigFetcher {
    async fn fetch(&self, name: &str) -> Result<String> {
        let url = format!("{}/{name}.env", self.base_url.trim_end_matches('/'));
        let token = self.token.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || fetch_blocking(&url, &name, token.as_deref()))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}

fn fetch_blocking(url: &str, name: &str, token: Option<&str>) -> Result<String> {
    let mut request = ureq::get(url).timeout(std::time::Duration::from_secs(30));
    if let Some(token) = token {
        request = request.set("Authorization", &format!("token {token}"));
    }

    match request.call() {
        Ok(response) => response
            .into_string()
            .with_context(|| format!("reading response body from {url}")),
        Err(ureq::Error::Status(404, _)) => Err(FetchError::NotFound {
            name: name.to_string(),
            url: url.to_string(),
        }
        .into()),
        Err(ureq::Error::Status(401 | 403, _)) => Err(FetchError::AccessDenied {
            url: url.to_string(),
        }
        .into()),
        Err(e) => Err(FetchError::Failed {
            url: url.to_string(),
            reason: e.to_string(),
        }
        .into()),
    }
}

/// Reads a configuration from a local file instead of the hosted location.
pub struct FileConfigFetcher {
    path: PathBuf,
}

impl FileConfigFetcher {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ConfigFetcher for FileConfigFetcher {
    async fn fetch(&self, _name: &str) -> Result<String> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            std::fs::read_to_string(&path).with_context(|| format!("cannot read {}", path.display()))
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}
